use core::cell::RefCell;
use core::hint::spin_loop;

use critical_section::Mutex;

use super::{Link, LinkStats};
use crate::error::LinkError;
use crate::hal::Transceiver;
use crate::protocol::LinkState;

/// 前台与中断共享的链路
///
/// 中断向量调用 [`SharedLink::on_interrupt`]；前台的每次访问都在一个短临界区内完成，
/// 因此装载缓冲区与游标期间不会被挂起的中断看到半配置的状态。
///
/// ```ignore
/// static LINK: SharedLink<Rf12<Spi, Cs, Exti>> = SharedLink::new(Link::new(rf, LinkConfig::DEFAULT));
///
/// #[interrupt]
/// fn EXTI0() {
///     LINK.on_interrupt();
/// }
/// ```
pub struct SharedLink<T> {
    inner: Mutex<RefCell<Link<T>>>,
}

impl<T: Transceiver> SharedLink<T> {
    pub const fn new(link: Link<T>) -> Self {
        Self { inner: Mutex::new(RefCell::new(link)) }
    }

    /// 在临界区内访问链路
    pub fn with<R>(&self, f: impl FnOnce(&mut Link<T>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow(cs).borrow_mut()))
    }

    pub fn on_interrupt(&self) {
        self.with(|link| link.on_interrupt());
    }

    pub fn state(&self) -> LinkState {
        self.with(|link| link.state())
    }

    pub fn stats(&self) -> LinkStats {
        self.with(|link| link.stats())
    }

    /// 忙等直到不再处于发送状态，没有超时
    pub fn wait_for_tx(&self) {
        while self.state() == LinkState::Transmitting {
            spin_loop();
        }
    }

    /// 忙等直到收到帧或接收被放弃，没有超时
    pub fn wait_for_rx(&self) {
        while !Self::rx_finished(self.state()) {
            spin_loop();
        }
    }

    /// 最多轮询 `max_polls` 次的 [`wait_for_tx`](Self::wait_for_tx)
    pub fn try_wait_for_tx(&self, max_polls: u32) -> Result<(), LinkError> {
        self.poll(max_polls, |state| state != LinkState::Transmitting)
    }

    /// 最多轮询 `max_polls` 次的 [`wait_for_rx`](Self::wait_for_rx)
    pub fn try_wait_for_rx(&self, max_polls: u32) -> Result<(), LinkError> {
        self.poll(max_polls, Self::rx_finished)
    }

    pub fn into_inner(self) -> Link<T> {
        self.inner.into_inner().into_inner()
    }

    fn rx_finished(state: LinkState) -> bool {
        matches!(state, LinkState::Idle | LinkState::FrameReady)
    }

    fn poll(&self, max_polls: u32, done: impl Fn(LinkState) -> bool) -> Result<(), LinkError> {
        for _ in 0..max_polls {
            if done(self.state()) {
                return Ok(());
            }
            spin_loop();
        }
        Err(LinkError::Timeout)
    }
}
