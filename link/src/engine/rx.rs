use log::{debug, trace};

use super::{Cursor, Link};
use crate::error::{Direction, FrameError, LinkError};
use crate::hal::{RfMode, Transceiver};
use crate::protocol::{Header, LinkState};
use crate::utils::{crc_ccitt_update, CRC_INIT};

impl<T: Transceiver> Link<T> {
    /// 开始接收：切换到接收模式，侦听下一帧的帧头
    ///
    /// 已在侦听时再次调用会重新初始化游标与CRC，丢弃半截帧头。
    pub fn start_receive(&mut self) -> Result<(), LinkError> {
        if !self.config.rx {
            return Err(LinkError::Disabled(Direction::Rx));
        }
        if self.state == LinkState::Transmitting {
            return Err(LinkError::Busy);
        }

        self.radio.disable_irq();

        if self.radio.mode() != RfMode::Rx {
            self.radio.set_mode(RfMode::Rx);
            self.radio.reset_fifo();
        }

        // 清除挂起的状态（例如旧的 FFOV）
        self.status = self.radio.read_status();
        self.arm_rx();
        self.radio.enable_irq();
        Ok(())
    }

    /// 收到的负载及其长度；只有 `FrameReady` 时才有结果，且不会清除结果
    pub fn get_result(&self) -> Option<(&[u8], usize)> {
        if self.state != LinkState::FrameReady {
            return None;
        }

        let header = Header::parse(&self.config, self.rx_packet.as_bytes())?;
        let start = self.config.header_size();
        Some((&self.rx_packet.as_bytes()[start..start + header.length], header.length))
    }

    /// 最近一帧控制字节的高半字节
    pub fn get_rx_config_nibble(&self) -> u8 {
        Header::parse(&self.config, self.rx_packet.as_bytes()).map_or(0, |header| header.config_nibble())
    }

    /// 本次接收尝试已结束（收到帧，或出错后放弃）
    pub fn is_rx_ready(&self) -> bool {
        matches!(self.state, LinkState::FrameReady | LinkState::Idle)
    }

    /// 重新装载接收机：状态、游标、CRC
    fn arm_rx(&mut self) {
        self.state = LinkState::ListeningHeader;
        // 长度与控制字节都到齐时命中
        self.rx_cursor = Some(Cursor { current: 0, end: self.config.header_size() - 1 });
        self.crc = CRC_INIT;
        self.rx_packet.clear();
    }

    /// FIFO中有一个字节
    pub(super) fn on_rx_byte(&mut self) {
        let byte = self.radio.receive_byte();
        let Some(mut cursor) = self.rx_cursor else {
            return;
        };

        self.rx_packet.set(cursor.current, byte);
        if self.config.crc && cursor.current >= self.config.length_field.size() {
            self.crc = crc_ccitt_update(self.crc, byte);
        }

        if cursor.at_end() {
            match self.state {
                LinkState::ListeningHeader => match self.check_header() {
                    Ok(length) => {
                        cursor.end = cursor.current + length + self.config.trailer_size();
                        self.state = LinkState::ReceivingBody;
                        trace!("帧头有效，长度 {}", length);
                    }
                    Err(err) => {
                        self.stats.record_control_error();
                        debug!("丢弃帧：{}", err);
                        self.recover_rx();
                        return;
                    }
                },
                LinkState::ReceivingBody => {
                    if !self.config.crc || self.crc == 0x0000 {
                        self.radio.set_mode(RfMode::Default);
                        self.radio.disable_irq();
                        self.stats.record_rx();
                        self.state = LinkState::FrameReady;
                        self.rx_packet.set_len(cursor.current + 1);
                        self.rx_cursor = Some(cursor);
                        debug!("收到 {} 字节的帧", cursor.current + 1);
                        return;
                    }

                    self.stats.record_crc_error();
                    debug!("丢弃帧：CRC余数 {:04X}", self.crc);
                    self.recover_rx();
                    return;
                }
                _ => return,
            }
        }

        cursor.current += 1;
        self.rx_cursor = Some(cursor);
    }

    /// 接收FIFO溢出
    pub(super) fn on_rx_overrun(&mut self) {
        self.stats.record_control_error();
        debug!("接收溢出，重新侦听");
        self.recover_rx();
    }

    /// 帧头检查通过时返回负载长度
    fn check_header(&self) -> Result<usize, FrameError> {
        let header = Header::parse(&self.config, self.rx_packet.as_bytes()).ok_or(FrameError::Truncated)?;
        header.check(&self.config)?;
        Ok(header.length)
    }

    /// 出错恢复：允许重试时复位FIFO并重新侦听，否则回到空闲
    fn recover_rx(&mut self) {
        if self.config.rx_retry {
            self.radio.reset_fifo();
            self.arm_rx();
        } else {
            self.state = LinkState::Idle;
            self.radio.set_mode(RfMode::Default);
            self.rx_cursor = None;
            self.radio.disable_irq();
        }
    }
}
