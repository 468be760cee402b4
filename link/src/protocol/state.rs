/// 链路状态
///
/// ```text
///            start_receive                 header ok
///   Idle ───────────────▶ ListeningHeader ──────────▶ ReceivingBody ──crc ok──▶ FrameReady
///    │  ▲                   ▲    │ error (retry)            │ error (retry)
///    │  │                   └────┴──────────────────────────┘
///    │  └──── error (no retry) / underrun (no retry) / idle()
///    │ start_transmit
///    ▼
///   Transmitting ──cursor == end──▶ TransmitDone
///    ▲    │ underrun (retry)
///    └────┘
/// ```
///
/// `FrameReady` 与 `TransmitDone` 不会自动清除，由下一次 start 调用重新装载。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LinkState {
    #[default]
    Idle = 0x00,
    /// 接收模式，等待帧头
    ListeningHeader = 0x01,
    /// 帧头已通过校验，正在接收帧体
    ReceivingBody = 0x02,
    /// 收到完整且校验通过的帧
    FrameReady = 0x04,
    /// 帧已发出
    TransmitDone = 0x10,
    Transmitting = 0x20,
}

impl LinkState {
    /// 中断上下文不会修改共享状态的取值
    pub fn is_quiescent(self) -> bool {
        matches!(self, LinkState::Idle | LinkState::FrameReady | LinkState::TransmitDone)
    }

    pub fn is_receiving(self) -> bool {
        matches!(self, LinkState::ListeningHeader | LinkState::ReceivingBody)
    }
}
