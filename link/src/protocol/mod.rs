pub mod frame;
pub mod state;

pub use frame::{
    control_byte, decode_frame, decode_packet, encode_frame, validate_header, write_header, Header,
    Packet,
};
pub use state::LinkState;

// 协议常量
/// 帧同步图样；收发器相关器识别 2D D4，内核从不校验
pub const SYNC_PATTERN: [u8; SYNC_SIZE] = [0xAA, 0xAA, 0x2D, 0xD4];
pub const SYNC_SIZE: usize = 4;

/// 单包最大负载
pub const MAX_PAYLOAD: usize = 256;

pub const CONTROL_SIZE: usize = 1;
pub const CRC_SIZE: usize = 2;

/// 两字节长度字段加控制字节
pub const MAX_HEADER_SIZE: usize = 3;

/// 帧尾哑字节，防止发射机最后一个字节被截断
pub const DUMMY_BYTE: u8 = 0xAA;

/// 接收缓冲区：帧头 + 负载 + CRC
pub const PACKET_CAPACITY: usize = MAX_HEADER_SIZE + MAX_PAYLOAD + CRC_SIZE;

/// 发送缓冲区：同步 + 包 + 哑字节
pub const FRAME_CAPACITY: usize = SYNC_SIZE + PACKET_CAPACITY + 1;
