use crate::protocol::{CONTROL_SIZE, CRC_SIZE, MAX_PAYLOAD};

/// 长度字段宽度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LengthField {
    /// 单字节，最大 255
    U8,
    /// 双字节小端，最大 MAX_PAYLOAD
    U16,
}

impl LengthField {
    pub const fn size(self) -> usize {
        match self {
            LengthField::U8 => 1,
            LengthField::U16 => 2,
        }
    }

    /// 字段本身能表示的最大值
    pub const fn max_value(self) -> usize {
        match self {
            LengthField::U8 => u8::MAX as usize,
            LengthField::U16 => u16::MAX as usize,
        }
    }
}

/// 链路构造期配置，每个开关对应一条可选代码路径
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// 发送方向可用
    pub tx: bool,
    /// 接收方向可用
    pub rx: bool,
    /// 附加/校验CRC尾部
    pub crc: bool,
    /// 发送/校验控制字节
    pub control_byte: bool,
    /// 发送欠载后从帧头重发
    pub tx_retry: bool,
    /// 接收出错后重新侦听帧头
    pub rx_retry: bool,
    pub length_field: LengthField,
}

impl LinkConfig {
    pub const DEFAULT: Self = Self {
        tx: true,
        rx: true,
        crc: true,
        control_byte: true,
        tx_retry: true,
        rx_retry: true,
        length_field: LengthField::U8,
    };

    pub const fn with_crc(mut self, enabled: bool) -> Self {
        self.crc = enabled;
        self
    }

    pub const fn with_control_byte(mut self, enabled: bool) -> Self {
        self.control_byte = enabled;
        self
    }

    pub const fn with_tx_retry(mut self, enabled: bool) -> Self {
        self.tx_retry = enabled;
        self
    }

    pub const fn with_rx_retry(mut self, enabled: bool) -> Self {
        self.rx_retry = enabled;
        self
    }

    pub const fn with_length_field(mut self, field: LengthField) -> Self {
        self.length_field = field;
        self
    }

    /// 仅发送
    pub const fn tx_only(mut self) -> Self {
        self.tx = true;
        self.rx = false;
        self
    }

    /// 仅接收
    pub const fn rx_only(mut self) -> Self {
        self.tx = false;
        self.rx = true;
        self
    }

    /// 长度字段 + 控制字节
    pub const fn header_size(&self) -> usize {
        self.length_field.size() + if self.control_byte { CONTROL_SIZE } else { 0 }
    }

    /// CRC尾部大小，未启用CRC时为 0
    pub const fn trailer_size(&self) -> usize {
        if self.crc {
            CRC_SIZE
        } else {
            0
        }
    }

    /// 当前配置下允许的最大负载长度
    pub const fn max_payload(&self) -> usize {
        let field_max = self.length_field.max_value();
        if field_max < MAX_PAYLOAD {
            field_max
        } else {
            MAX_PAYLOAD
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
