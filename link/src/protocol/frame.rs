//! 帧编解码：帧头大小、控制字节冗余校验、CRC尾部。
//!
//! ```text
//! SYNC(4) | LENGTH(1|2) | CONTROL(0|1) | PAYLOAD(LENGTH) | CRC_LO | CRC_HI
//! ```
//!
//! CRC覆盖 CONTROL 与 PAYLOAD，不覆盖长度字段。

use core::ops::Range;

use heapless::Vec;

use crate::config::{LengthField, LinkConfig};
use crate::error::FrameError;
use crate::protocol::{MAX_PAYLOAD, SYNC_PATTERN, SYNC_SIZE};
use crate::utils::{calculate_checksum, crc_ccitt_update, CRC_INIT};

/// 由长度与配置半字节生成控制字节
pub fn control_byte(length: usize, config_nibble: u8) -> u8 {
    ((config_nibble & 0x0F) << 4) | (!(length as u8) & 0x0F)
}

/// 控制字节低半字节必须等于长度低半字节取反，且长度非零
pub fn validate_header(length: usize, control: u8) -> bool {
    length != 0 && (control & 0x0F) == (!(length as u8) & 0x0F)
}

/// 包内CRC覆盖范围（相对包起始位置）
pub fn crc_region(config: &LinkConfig, length: usize) -> Range<usize> {
    config.length_field.size()..config.header_size() + length
}

/// 包长度（不含同步与哑字节）
pub fn packet_len(config: &LinkConfig, length: usize) -> usize {
    config.header_size() + length + config.trailer_size()
}

/// 帧头
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Header {
    pub length: usize,
    /// 未启用控制字节时为 None
    pub control: Option<u8>,
}

impl Header {
    /// 从包起始处解析帧头，数据不足时返回 None
    pub fn parse(config: &LinkConfig, bytes: &[u8]) -> Option<Self> {
        if bytes.len() < config.header_size() {
            return None;
        }

        let length = match config.length_field {
            LengthField::U8 => bytes[0] as usize,
            LengthField::U16 => u16::from_le_bytes([bytes[0], bytes[1]]) as usize,
        };
        let control = config
            .control_byte
            .then(|| bytes[config.length_field.size()]);

        Some(Self { length, control })
    }

    /// 长度范围与控制字节冗余检查
    pub fn check(&self, config: &LinkConfig) -> Result<(), FrameError> {
        if self.length == 0 || self.length > config.max_payload() {
            return Err(FrameError::InvalidLength(self.length));
        }

        match self.control {
            Some(control) if !validate_header(self.length, control) => {
                Err(FrameError::ControlMismatch { length: self.length, control })
            }
            _ => Ok(()),
        }
    }

    /// 控制字节高半字节
    pub fn config_nibble(&self) -> u8 {
        self.control.map_or(0, |control| control >> 4)
    }
}

/// 写入帧头，返回写入的字节数
pub fn write_header(config: &LinkConfig, out: &mut [u8], length: usize, config_nibble: u8) -> usize {
    match config.length_field {
        LengthField::U8 => out[0] = length as u8,
        LengthField::U16 => out[..2].copy_from_slice(&(length as u16).to_le_bytes()),
    }

    if config.control_byte {
        out[config.length_field.size()] = control_byte(length, config_nibble);
    }

    config.header_size()
}

/// 解码后的数据包
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// 配置半字节
    pub config: u8,
    pub payload: Vec<u8, MAX_PAYLOAD>,
}

impl Packet {
    pub fn new(config_nibble: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::InvalidLength(payload.len()))?;
        Ok(Self { config: config_nibble & 0x0F, payload })
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn encode(&self, config: &LinkConfig, out: &mut [u8]) -> Result<usize, FrameError> {
        encode_frame(config, self.config, &self.payload, out)
    }
}

/// 编码完整帧（含同步图样），返回帧长度
pub fn encode_frame(
    config: &LinkConfig,
    config_nibble: u8,
    payload: &[u8],
    out: &mut [u8],
) -> Result<usize, FrameError> {
    let length = payload.len();
    if length == 0 || length > config.max_payload() {
        return Err(FrameError::InvalidLength(length));
    }

    let needed = SYNC_SIZE + packet_len(config, length);
    if out.len() < needed {
        return Err(FrameError::BufferTooSmall { needed, available: out.len() });
    }

    out[..SYNC_SIZE].copy_from_slice(&SYNC_PATTERN);

    let packet = &mut out[SYNC_SIZE..needed];
    let header_size = write_header(config, packet, length, config_nibble);
    packet[header_size..header_size + length].copy_from_slice(payload);

    if config.crc {
        let crc = calculate_checksum(&packet[crc_region(config, length)]);
        packet[header_size + length..].copy_from_slice(&crc.to_le_bytes());
    }

    Ok(needed)
}

/// 解码从长度字段开始的包
pub fn decode_packet(config: &LinkConfig, bytes: &[u8]) -> Result<Packet, FrameError> {
    let header = Header::parse(config, bytes).ok_or(FrameError::Truncated)?;
    header.check(config)?;

    let total = packet_len(config, header.length);
    if bytes.len() < total {
        return Err(FrameError::Truncated);
    }

    if config.crc {
        let residue = bytes[config.length_field.size()..total]
            .iter()
            .fold(CRC_INIT, |crc, byte| crc_ccitt_update(crc, *byte));
        if residue != 0x0000 {
            return Err(FrameError::CrcMismatch { residue });
        }
    }

    let start = config.header_size();
    Packet::new(header.config_nibble(), &bytes[start..start + header.length])
}

/// 解码完整帧；同步图样被跳过而不校验
pub fn decode_frame(config: &LinkConfig, bytes: &[u8]) -> Result<Packet, FrameError> {
    let packet = bytes.get(SYNC_SIZE..).ok_or(FrameError::Truncated)?;
    decode_packet(config, packet)
}
