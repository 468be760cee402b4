use embedded_hal::blocking::spi::Transfer;
use embedded_hal::digital::v2::OutputPin;
use log::warn;

use crate::hal::commands;
use crate::hal::{RfMode, StatusWord, Transceiver};

/// 板级中断线屏蔽控制（外部中断引脚）
pub trait IrqLine {
    fn enable(&mut self);
    fn disable(&mut self);
}

/// 通过 SPI 连接的 RF12/RFM12 收发器
pub struct Rf12<SPI, CS, IRQ> {
    spi: SPI,
    cs: CS,
    irq: IRQ,
    mode: RfMode,
    bus_errors: u16,
}

impl<SPI, CS, IRQ> Rf12<SPI, CS, IRQ>
where
    SPI: Transfer<u8>,
    CS: OutputPin,
    IRQ: IrqLine,
{
    pub fn new(spi: SPI, cs: CS, irq: IRQ) -> Self {
        Self {
            spi,
            cs,
            irq,
            mode: RfMode::LowPower,
            bus_errors: 0,
        }
    }

    /// 发送上电配置序列，返回随后读到的状态字
    pub fn init(&mut self) -> StatusWord {
        self.irq.disable();
        for command in commands::INIT_SEQUENCE {
            self.transfer16(command);
        }
        self.mode = RfMode::Default;

        self.read_status()
    }

    /// 累计的总线错误次数
    pub fn bus_errors(&self) -> u16 {
        self.bus_errors
    }

    /// 释放底层外设
    pub fn release(self) -> (SPI, CS, IRQ) {
        (self.spi, self.cs, self.irq)
    }

    fn transfer16(&mut self, command: u16) -> u16 {
        if self.cs.set_low().is_err() {
            self.bus_error(command);
            return 0;
        }

        let mut words = command.to_be_bytes();
        let response = match self.spi.transfer(&mut words) {
            Ok(reply) if reply.len() >= 2 => u16::from_be_bytes([reply[0], reply[1]]),
            _ => {
                self.bus_error(command);
                0
            }
        };

        if self.cs.set_high().is_err() {
            self.bus_error(command);
        }
        response
    }

    fn bus_error(&mut self, command: u16) {
        self.bus_errors = self.bus_errors.wrapping_add(1);
        warn!("RF12 总线错误，命令 {:04X}", command);
    }
}

impl<SPI, CS, IRQ> Transceiver for Rf12<SPI, CS, IRQ>
where
    SPI: Transfer<u8>,
    CS: OutputPin,
    IRQ: IrqLine,
{
    fn send_command(&mut self, command: u16) -> u16 {
        self.transfer16(command)
    }

    fn set_mode(&mut self, mode: RfMode) {
        let command = match mode {
            RfMode::Tx => commands::PM_TX,
            RfMode::Rx => commands::PM_RX,
            RfMode::Default => commands::PM_DEFAULT,
            RfMode::LowPower => commands::PM_LOW_POWER,
        };
        self.transfer16(command);
        self.mode = mode;
    }

    fn mode(&self) -> RfMode {
        self.mode
    }

    fn transmit_byte(&mut self, byte: u8) {
        self.transfer16(commands::tx_write(byte));
    }

    fn reset_fifo(&mut self) {
        self.transfer16(commands::FIFO_OFF);
        self.transfer16(commands::FIFO_ON);
    }

    fn enable_irq(&mut self) {
        self.irq.enable();
    }

    fn disable_irq(&mut self) {
        self.irq.disable();
    }
}
