pub mod commands;
pub mod rf12;
pub mod status;

#[cfg(feature = "simulator")]
pub mod simulator;

pub use status::StatusWord;

/// 收发器工作模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RfMode {
    /// 发射机开启
    Tx,
    /// 接收机开启
    Rx,
    /// 晶振、合成器与基带保持开启，可快速切换
    Default,
    /// 仅保留寄存器，最省电
    LowPower,
}

/// 收发器驱动抽象
///
/// 链路引擎只依赖这些原语；所有方法不可阻塞超过一次总线传输，
/// 因为它们会在中断上下文中被调用。
pub trait Transceiver {
    /// 发送16位命令并返回同时移入的16位应答
    fn send_command(&mut self, command: u16) -> u16;

    /// 切换工作模式
    fn set_mode(&mut self, mode: RfMode);

    /// 当前工作模式
    fn mode(&self) -> RfMode;

    /// 写入发送寄存器，完成由下一次中断通知
    fn transmit_byte(&mut self, byte: u8);

    /// 从接收FIFO取出一个字节
    fn receive_byte(&mut self) -> u8 {
        (self.send_command(commands::FIFO_READ) & 0x00FF) as u8
    }

    /// 复位FIFO，重新等待同步图样
    fn reset_fifo(&mut self);

    /// 打开事件中断线
    fn enable_irq(&mut self);

    /// 关闭事件中断线
    fn disable_irq(&mut self);

    /// 读取并清除状态字
    fn read_status(&mut self) -> StatusWord {
        StatusWord(self.send_command(commands::STATUS_READ))
    }
}
