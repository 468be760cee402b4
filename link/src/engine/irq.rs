use log::trace;

use super::Link;
use crate::hal::Transceiver;
use crate::protocol::LinkState;

impl<T: Transceiver> Link<T> {
    /// 收发器事件中断入口
    ///
    /// 可能的事件：
    /// - 发送：RGIT 寄存器就绪，RGUR 欠载
    /// - 接收：FFIT 有数据，FFOV 溢出
    /// - 其他：唤醒、低电压、上电复位
    ///
    /// 状态字总是先读；每个分支只做有限的几次总线传输，从不阻塞。
    pub fn on_interrupt(&mut self) {
        let status = self.radio.read_status();
        self.status = status;

        // 发送欠载与接收溢出共用同一标志位
        if status.is_buffer_error() {
            match self.state {
                LinkState::Transmitting => self.on_tx_underrun(),
                state if state.is_receiving() => self.on_rx_overrun(),
                _ => trace!("空闲时的缓冲区错误 {}", status),
            }
            return;
        }

        match self.state {
            LinkState::Transmitting => self.on_tx_ready(),
            state if state.is_receiving() => self.on_rx_byte(),
            _ => trace!("忽略空闲状态下的中断 {}", status),
        }
    }
}
