//! RF12 16位命令字

/// 读状态字，同时清除挂起的中断标志
pub const STATUS_READ: u16 = 0x0000;

/// 从接收FIFO读取一个字节（低8位）
pub const FIFO_READ: u16 = 0xB000;

/// 向发送寄存器写入一个字节
pub const TX_WRITE: u16 = 0xB800;

pub const fn tx_write(byte: u8) -> u16 {
    TX_WRITE | byte as u16
}

// 电源管理 0x82xx
const PM_BASE: u16 = 0x8200;
const PM_ER: u16 = 1 << 7; // 接收机
const PM_EBB: u16 = 1 << 6; // 基带
const PM_ET: u16 = 1 << 5; // 发射机
const PM_ES: u16 = 1 << 4; // 频率合成器
const PM_EX: u16 = 1 << 3; // 晶振
const PM_DC: u16 = 1 << 0; // 关闭时钟输出

pub const PM_TX: u16 = PM_BASE | PM_ET | PM_ES | PM_EX | PM_DC;
pub const PM_RX: u16 = PM_BASE | PM_ER | PM_EBB | PM_ES | PM_EX | PM_DC;
pub const PM_DEFAULT: u16 = PM_BASE | PM_EX | PM_DC | PM_ES | PM_EBB;
pub const PM_LOW_POWER: u16 = PM_BASE | PM_DC;

// FIFO与复位模式 0xCAxx：8位触发中断，同步图样启动填充，关闭高灵敏复位
const FIFO_BASE: u16 = 0xCA00;
const FIFO_INT_BITS: u16 = 8 << 4;
const FIFO_DRESET: u16 = 1 << 0;
const FIFO_FF: u16 = 1 << 1;

pub const FIFO_OFF: u16 = FIFO_BASE | FIFO_INT_BITS | FIFO_DRESET;
pub const FIFO_ON: u16 = FIFO_OFF | FIFO_FF;

/// 配置：433MHz 频段，12pF 负载电容，使能内部数据寄存器与FIFO
pub const CONFIG: u16 = 0x8000 | (1 << 4) | 0x07 | (1 << 7) | (1 << 6);
/// 频率：10 * 1 * (43 + 0x190/4000) = 431MHz
pub const FREQUENCY: u16 = 0xA000 | 0x0190;
/// 数据率：50kbps
pub const DATA_RATE: u16 = 0xC600 | 0x0005;
/// 接收控制：VDI 输出、始终有效，134kHz 带宽，LNA 0dB，RSSI -103dBm
pub const RX_CONTROL: u16 = 0x9000 | (1 << 10) | (0b11 << 8) | (0b101 << 5);
/// 数据滤波：自动时钟恢复锁定，数字滤波，DQD 门限 4
pub const DATA_FILTER: u16 = 0xC228 | (1 << 7) | 4;
/// AFC：仅接收时自动，无偏差限制，输出与使能
pub const AFC: u16 = 0xC400 | (2 << 6) | (1 << 1) | (1 << 0);
/// 发送配置：90kHz 频偏，满功率
pub const TX_CONTROL: u16 = 0x9800 | (0x05 << 4);
pub const WAKE_UP: u16 = 0xE000;
pub const LOW_DUTY: u16 = 0xC800;
/// 低电压检测与时钟分频（10MHz）
pub const BATTERY: u16 = 0xC000 | (7 << 5);

/// 上电后的配置序列
pub const INIT_SEQUENCE: [u16; 12] = [
    CONFIG,
    PM_DEFAULT,
    FREQUENCY,
    DATA_RATE,
    RX_CONTROL,
    DATA_FILTER,
    FIFO_OFF,
    AFC,
    TX_CONTROL,
    WAKE_UP,
    LOW_DUTY,
    BATTERY,
];
