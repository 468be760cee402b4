use core::fmt;

/// 传输方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Tx,
    Rx,
}

/// 前台接口错误
///
/// 协议层错误（帧头、CRC、欠载/溢出）在中断内部恢复，只体现在统计计数中，
/// 不会出现在这里。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// 长度为 0 或超过最大负载
    InvalidLength { length: usize, max: usize },
    /// 正在发送
    Busy,
    /// 该方向未在配置中启用
    Disabled(Direction),
    /// 有限次轮询内未完成
    Timeout,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::InvalidLength { length, max } => {
                write!(f, "invalid payload length {} (allowed 1..={})", length, max)
            }
            LinkError::Busy => f.write_str("transmitter busy"),
            LinkError::Disabled(Direction::Tx) => f.write_str("transmit direction disabled"),
            LinkError::Disabled(Direction::Rx) => f.write_str("receive direction disabled"),
            LinkError::Timeout => f.write_str("timed out waiting for link"),
        }
    }
}

/// 离线编解码错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// 输出缓冲区放不下整帧
    BufferTooSmall { needed: usize, available: usize },
    /// 输入在帧头或帧体中途结束
    Truncated,
    /// 长度为 0 或超过最大负载
    InvalidLength(usize),
    /// 控制字节低半字节与长度不匹配
    ControlMismatch { length: usize, control: u8 },
    /// CRC余数非零
    CrcMismatch { residue: u16 },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::BufferTooSmall { needed, available } => {
                write!(f, "buffer too small: need {} bytes, have {}", needed, available)
            }
            FrameError::Truncated => f.write_str("frame truncated"),
            FrameError::InvalidLength(length) => write!(f, "invalid length field {}", length),
            FrameError::ControlMismatch { length, control } => {
                write!(f, "control byte {:#04x} does not match length {}", control, length)
            }
            FrameError::CrcMismatch { residue } => write!(f, "crc residue {:#06x}", residue),
        }
    }
}
