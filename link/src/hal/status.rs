use core::fmt;

/// RF12 16位状态字
///
/// 发送与接收共用同一位置的标志位：
/// bit15 为 RGIT（发送寄存器就绪）/ FFIT（FIFO 满足门限），
/// bit13 为 RGUR（发送欠载）/ FFOV（接收溢出）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusWord(pub u16);

impl StatusWord {
    pub const RGIT_FFIT: u16 = 1 << 15;
    pub const POR: u16 = 1 << 14;
    pub const RGUR_FFOV: u16 = 1 << 13;
    pub const WKUP: u16 = 1 << 12;
    pub const EXT: u16 = 1 << 11;
    pub const LBD: u16 = 1 << 10;
    pub const FFEM: u16 = 1 << 9;
    pub const RSSI_ATS: u16 = 1 << 8;
    pub const DQD: u16 = 1 << 7;
    pub const CRL: u16 = 1 << 6;
    pub const ATGL: u16 = 1 << 5;
    pub const OFFS_MASK: u16 = 0x001F;

    const NAMES: [(u16, &'static str); 11] = [
        (Self::RGIT_FFIT, "RGIT/FFIT"),
        (Self::POR, "POR"),
        (Self::RGUR_FFOV, "RGUR/FFOV"),
        (Self::WKUP, "WKUP"),
        (Self::EXT, "EXT"),
        (Self::LBD, "LBD"),
        (Self::FFEM, "FFEM"),
        (Self::RSSI_ATS, "RSSI/ATS"),
        (Self::DQD, "DQD"),
        (Self::CRL, "CRL"),
        (Self::ATGL, "ATGL"),
    ];

    #[inline]
    pub fn contains(self, flag: u16) -> bool {
        self.0 & flag != 0
    }

    /// 发送欠载或接收溢出
    #[inline]
    pub fn is_buffer_error(self) -> bool {
        self.contains(Self::RGUR_FFOV)
    }

    /// 发送寄存器就绪或FIFO有数据
    #[inline]
    pub fn is_data_event(self) -> bool {
        self.contains(Self::RGIT_FFIT)
    }

    /// AFC 频偏值（5位有符号补码）
    pub fn frequency_offset(self) -> i8 {
        let raw = (self.0 & Self::OFFS_MASK) as i8;
        (raw << 3) >> 3
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)?;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                write!(f, " {}", name)?;
            }
        }
        Ok(())
    }
}
