use std::collections::VecDeque;

use log::trace;

use crate::engine::{Link, SharedLink};
use crate::hal::{commands, RfMode, StatusWord, Transceiver};

/// 同步图样中由相关器识别的两个字节
const SYNC_WORD: [u8; 2] = [0x2D, 0xD4];

/// 模拟收发器
///
/// 每次模拟的硬件事件对应一次中断调用，由测试代码驱动，从不重入。
/// - 发送模式下中断线打开即视为发送寄存器就绪；
/// - 接收模式下“空中”的帧在相关器找到 2D D4 后逐字节进入FIFO；
/// - FIFO复位丢弃当前帧剩余的字节，等待下一个同步图样。
#[derive(Debug)]
pub struct SimTransceiver {
    mode: RfMode,
    irq_enabled: bool,
    transmitted: Vec<u8>,
    air: VecDeque<Vec<u8>>,
    fifo: VecDeque<u8>,
    buffer_error: bool,
    commands: Vec<u16>,
    fifo_resets: usize,
    modes: Vec<RfMode>,
}

impl SimTransceiver {
    pub fn new() -> Self {
        Self {
            mode: RfMode::LowPower,
            irq_enabled: false,
            transmitted: Vec::new(),
            air: VecDeque::new(),
            fifo: VecDeque::new(),
            buffer_error: false,
            commands: Vec::new(),
            fifo_resets: 0,
            modes: Vec::new(),
        }
    }

    /// 把空中收到的原始字节交给相关器；没有同步字时返回 false
    pub fn deliver(&mut self, air_bytes: &[u8]) -> bool {
        match air_bytes.windows(SYNC_WORD.len()).position(|w| w == &SYNC_WORD[..]) {
            Some(at) => {
                self.air.push_back(air_bytes[at + SYNC_WORD.len()..].to_vec());
                true
            }
            None => false,
        }
    }

    /// 直接投递同步图样之后的包字节
    pub fn deliver_packet(&mut self, packet: &[u8]) {
        self.air.push_back(packet.to_vec());
    }

    /// 下一次状态读取报告 RGUR/FFOV
    pub fn inject_buffer_error(&mut self) {
        self.buffer_error = true;
    }

    /// 中断线打开且有事件待处理
    pub fn interrupt_pending(&self) -> bool {
        if !self.irq_enabled {
            return false;
        }

        self.buffer_error
            || match self.mode {
                RfMode::Tx => true,
                RfMode::Rx => !self.fifo.is_empty() || !self.air.is_empty(),
                RfMode::Default | RfMode::LowPower => false,
            }
    }

    pub fn irq_enabled(&self) -> bool {
        self.irq_enabled
    }

    pub fn transmitted(&self) -> &[u8] {
        &self.transmitted
    }

    pub fn take_transmitted(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.transmitted)
    }

    /// 把本机发出的字节送入另一台收发器
    pub fn pipe_to(&mut self, other: &mut SimTransceiver) -> bool {
        let bytes = self.take_transmitted();
        other.deliver(&bytes)
    }

    pub fn commands(&self) -> &[u16] {
        &self.commands
    }

    pub fn mode_history(&self) -> &[RfMode] {
        &self.modes
    }

    pub fn fifo_resets(&self) -> usize {
        self.fifo_resets
    }

    /// FIFO中尚未读取的字节数
    pub fn fifo_len(&self) -> usize {
        self.fifo.len()
    }

    fn status(&mut self) -> u16 {
        let mut status = 0;
        if std::mem::take(&mut self.buffer_error) {
            status |= StatusWord::RGUR_FFOV;
        }

        match self.mode {
            RfMode::Tx => status |= StatusWord::RGIT_FFIT,
            RfMode::Rx => {
                if self.fifo.is_empty() {
                    if let Some(frame) = self.air.pop_front() {
                        self.fifo.extend(frame);
                    }
                }
                if !self.fifo.is_empty() {
                    status |= StatusWord::RGIT_FFIT;
                } else {
                    status |= StatusWord::FFEM;
                }
            }
            RfMode::Default | RfMode::LowPower => {}
        }
        status
    }
}

impl Default for SimTransceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl Transceiver for SimTransceiver {
    fn send_command(&mut self, command: u16) -> u16 {
        self.commands.push(command);
        match command {
            commands::STATUS_READ => self.status(),
            commands::FIFO_READ => self.fifo.pop_front().map_or(0, u16::from),
            _ => 0,
        }
    }

    fn set_mode(&mut self, mode: RfMode) {
        self.mode = mode;
        self.modes.push(mode);
    }

    fn mode(&self) -> RfMode {
        self.mode
    }

    fn transmit_byte(&mut self, byte: u8) {
        self.commands.push(commands::tx_write(byte));
        if self.mode == RfMode::Tx {
            self.transmitted.push(byte);
        }
    }

    fn reset_fifo(&mut self) {
        self.commands.push(commands::FIFO_OFF);
        self.commands.push(commands::FIFO_ON);
        self.fifo.clear();
        self.fifo_resets += 1;
    }

    fn enable_irq(&mut self) {
        self.irq_enabled = true;
    }

    fn disable_irq(&mut self) {
        self.irq_enabled = false;
    }
}

/// 处理所有挂起的中断，最多 `max_events` 次，返回处理次数
pub fn run_pending(link: &mut Link<SimTransceiver>, max_events: usize) -> usize {
    let mut handled = 0;
    while handled < max_events && link.transceiver().interrupt_pending() {
        link.on_interrupt();
        handled += 1;
    }
    trace!("模拟器处理了 {} 次中断", handled);
    handled
}

/// 共享链路上处理一次挂起的中断
pub fn service_once(shared: &SharedLink<SimTransceiver>) -> bool {
    shared.with(|link| {
        if link.transceiver().interrupt_pending() {
            link.on_interrupt();
            true
        } else {
            false
        }
    })
}
