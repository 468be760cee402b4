use core::fmt;

/// 链路统计，单调递增（回绕）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// 发送成功的帧数
    pub tx_frames: u32,
    /// 接收成功的帧数
    pub rx_frames: u32,
    /// 控制字节不匹配、长度为零、欠载/溢出
    pub control_errors: u32,
    /// CRC余数非零
    pub crc_errors: u32,
}

impl LinkStats {
    pub(crate) fn record_tx(&mut self) {
        self.tx_frames = self.tx_frames.wrapping_add(1);
    }

    pub(crate) fn record_rx(&mut self) {
        self.rx_frames = self.rx_frames.wrapping_add(1);
    }

    pub(crate) fn record_control_error(&mut self) {
        self.control_errors = self.control_errors.wrapping_add(1);
    }

    pub(crate) fn record_crc_error(&mut self) {
        self.crc_errors = self.crc_errors.wrapping_add(1);
    }

    pub fn total_errors(&self) -> u32 {
        self.control_errors.wrapping_add(self.crc_errors)
    }
}

impl fmt::Display for LinkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TX/RX {}/{} Err: {}/{}",
            self.tx_frames, self.rx_frames, self.control_errors, self.crc_errors
        )
    }
}
