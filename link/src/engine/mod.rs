//! 链路引擎：单一共享状态记录，前台入口与中断处理都作用于它。
//!
//! 同步约定：状态为 `Idle`、`FrameReady`、`TransmitDone` 时由前台读写；
//! 状态为 `Transmitting`、`ListeningHeader`、`ReceivingBody` 时由中断独占修改。
//! 缓冲区只分配一次，逐帧复用。

mod irq;
mod rx;
mod shared;
mod stats;
mod tx;

pub use shared::SharedLink;
pub use stats::LinkStats;

use crate::config::LinkConfig;
use crate::hal::{RfMode, StatusWord, Transceiver};
use crate::protocol::{LinkState, FRAME_CAPACITY, PACKET_CAPACITY, SYNC_PATTERN, SYNC_SIZE};
use crate::utils::{AlignedBuffer, CRC_INIT};

/// 缓冲区游标，`current == end` 表示当前阶段结束
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    pub current: usize,
    pub end: usize,
}

impl Cursor {
    #[inline]
    pub fn at_end(&self) -> bool {
        self.current == self.end
    }
}

/// 半双工链路
pub struct Link<T> {
    radio: T,
    config: LinkConfig,
    state: LinkState,
    /// 最近一次中断读到的状态字
    status: StatusWord,

    tx_frame: AlignedBuffer<FRAME_CAPACITY>,
    tx_cursor: Option<Cursor>,
    tx_config: u8,

    rx_packet: AlignedBuffer<PACKET_CAPACITY>,
    rx_cursor: Option<Cursor>,

    /// 收发共用的CRC累加器
    crc: u16,
    stats: LinkStats,
}

impl<T: Transceiver> Link<T> {
    pub fn new(radio: T, config: LinkConfig) -> Self {
        let mut tx_frame = AlignedBuffer::new();
        tx_frame.copy_from_slice(0, &SYNC_PATTERN);

        Self {
            radio,
            config,
            state: LinkState::Idle,
            status: StatusWord::default(),
            tx_frame,
            tx_cursor: None,
            tx_config: 0,
            rx_packet: AlignedBuffer::new(),
            rx_cursor: None,
            crc: CRC_INIT,
            stats: LinkStats::default(),
        }
    }

    /// 初始化：清空统计并进入空闲低功耗状态
    pub fn init(&mut self) {
        self.stats = LinkStats::default();
        self.idle();
    }

    /// 强制链路进入空闲低功耗状态
    pub fn idle(&mut self) {
        self.radio.disable_irq();
        self.radio.set_mode(RfMode::LowPower);
        self.state = LinkState::Idle;
        self.tx_cursor = None;
        self.rx_cursor = None;
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    pub fn last_status(&self) -> StatusWord {
        self.status
    }

    pub fn tx_cursor(&self) -> Option<Cursor> {
        self.tx_cursor
    }

    pub fn rx_cursor(&self) -> Option<Cursor> {
        self.rx_cursor
    }

    pub fn transceiver(&self) -> &T {
        &self.radio
    }

    pub fn transceiver_mut(&mut self) -> &mut T {
        &mut self.radio
    }

    pub fn release(self) -> T {
        self.radio
    }

    /// 当前发送帧（同步图样到CRC，不含哑字节）
    pub fn tx_frame(&self) -> &[u8] {
        self.tx_frame.as_slice()
    }

    fn payload_offset(&self) -> usize {
        SYNC_SIZE + self.config.header_size()
    }
}
