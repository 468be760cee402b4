//! RF12 半双工包链路层
//!
//! 中断驱动的逐字节收发状态机：帧头控制字节快速丢弃、CRC-16 完整性校验、
//! 欠载/溢出自动重试。全部缓冲区静态分配，中断上下文中不分配、不阻塞。

#![cfg_attr(not(feature = "simulator"), no_std)]

pub mod config;
pub mod engine;
pub mod error;
pub mod hal;
pub mod protocol;
pub mod utils;

// 重新导出核心类型
pub use config::{LengthField, LinkConfig};
pub use engine::{Cursor, Link, LinkStats, SharedLink};
pub use error::{Direction, FrameError, LinkError};
pub use hal::{RfMode, StatusWord, Transceiver};
pub use protocol::{LinkState, Packet};
pub use utils::{calculate_checksum, AlignedBuffer};
