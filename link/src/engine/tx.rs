use log::{debug, warn};

use super::{Cursor, Link};
use crate::error::{Direction, LinkError};
use crate::hal::{RfMode, Transceiver};
use crate::protocol::frame::{crc_region, packet_len};
use crate::protocol::{write_header, LinkState, DUMMY_BYTE, SYNC_SIZE};
use crate::utils::calculate_checksum;

impl<T: Transceiver> Link<T> {
    /// 发送缓冲区中已准备好的 `length` 字节
    ///
    /// 写入长度与控制字节、追加CRC，发出首个同步字节后打开中断，
    /// 其余字节由中断逐个发送。
    pub fn start_transmit(&mut self, length: usize) -> Result<(), LinkError> {
        if !self.config.tx {
            return Err(LinkError::Disabled(Direction::Tx));
        }
        let max = self.config.max_payload();
        if length == 0 || length > max {
            return Err(LinkError::InvalidLength { length, max });
        }
        if self.state == LinkState::Transmitting {
            return Err(LinkError::Busy);
        }

        self.radio.disable_irq();

        // 尽早打开发射机，接收方才能同步
        if self.radio.mode() != RfMode::Tx {
            self.radio.set_mode(RfMode::Tx);
        }

        let frame_len = self.build_frame(length);

        // +1：末尾多发一个哑字节，避免过早关闭发射
        self.tx_cursor = Some(Cursor { current: 1, end: frame_len + 1 });
        self.state = LinkState::Transmitting;

        self.radio.transmit_byte(self.tx_frame.get(0));
        self.status = self.radio.read_status();
        self.radio.enable_irq();

        debug!("开始发送 {} 字节负载，帧长 {}", length, frame_len);
        Ok(())
    }

    /// 复制负载到发送缓冲区并开始发送
    pub fn transmit(&mut self, payload: &[u8]) -> Result<(), LinkError> {
        if self.state == LinkState::Transmitting {
            return Err(LinkError::Busy);
        }
        let max = self.config.max_payload();
        if payload.is_empty() || payload.len() > max {
            return Err(LinkError::InvalidLength { length: payload.len(), max });
        }

        let offset = self.payload_offset();
        self.tx_frame.copy_from_slice(offset, payload);
        self.start_transmit(payload.len())
    }

    /// 发送负载缓冲区，长度为当前配置的最大负载
    pub fn get_tx_buffer(&mut self) -> &mut [u8] {
        let offset = self.payload_offset();
        let max = self.config.max_payload();
        &mut self.tx_frame.as_mut_slice()[offset..offset + max]
    }

    /// 设置下一帧控制字节的高半字节
    pub fn set_tx_config_nibble(&mut self, nibble: u8) {
        self.tx_config = nibble & 0x0F;
    }

    pub fn is_tx_ready(&self) -> bool {
        self.state == LinkState::TransmitDone
    }

    /// 提前打开发射机，让接收方在缓冲区准备期间锁定
    pub fn prepare_transmit(&mut self) {
        self.state = LinkState::Idle;
        self.radio.disable_irq();
        self.radio.set_mode(RfMode::Tx);
    }

    /// 写入帧头、CRC与哑字节，返回帧长度（不含哑字节）
    fn build_frame(&mut self, length: usize) -> usize {
        let config = self.config;
        let nibble = self.tx_config;
        let packet = &mut self.tx_frame.as_mut_slice()[SYNC_SIZE..];

        let header_size = write_header(&config, packet, length, nibble);

        if config.crc {
            let crc = calculate_checksum(&packet[crc_region(&config, length)]);
            let at = header_size + length;
            packet[at..at + 2].copy_from_slice(&crc.to_le_bytes());
            self.crc = crc;
        }

        let frame_len = SYNC_SIZE + packet_len(&config, length);
        self.tx_frame.set(frame_len, DUMMY_BYTE);
        self.tx_frame.set_len(frame_len);
        frame_len
    }

    /// 发送寄存器就绪
    pub(super) fn on_tx_ready(&mut self) {
        let Some(mut cursor) = self.tx_cursor else {
            return;
        };

        if cursor.at_end() {
            // 哑字节已发出
            self.state = LinkState::TransmitDone;
            self.stats.record_tx();
            // 发射机保持开启：关闭发射会让接收方在同步字节上丢帧
            self.radio.disable_irq();
            debug!("帧发送完成");
            return;
        }

        let byte = self.tx_frame.get(cursor.current);
        cursor.current += 1;
        self.tx_cursor = Some(cursor);
        self.radio.transmit_byte(byte);
    }

    /// 发送寄存器欠载
    pub(super) fn on_tx_underrun(&mut self) {
        self.stats.record_control_error();

        if self.config.tx_retry {
            warn!("发送欠载，从帧头重新发送");
            if let Some(cursor) = self.tx_cursor.as_mut() {
                cursor.current = 1;
            }
            self.radio.transmit_byte(self.tx_frame.get(0));
        } else {
            warn!("发送欠载，放弃本帧");
            self.tx_cursor = None;
            self.state = LinkState::Idle;
            self.radio.set_mode(RfMode::Default);
            self.radio.disable_irq();
        }
    }
}
