#[cfg(test)]
mod shared_link_tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    use link::config::LinkConfig;
    use link::engine::{Link, SharedLink};
    use link::error::LinkError;
    use link::hal::simulator::{service_once, SimTransceiver};
    use link::protocol::LinkState;

    fn shared(config: LinkConfig) -> SharedLink<SimTransceiver> {
        let mut link = Link::new(SimTransceiver::new(), config);
        link.init();
        SharedLink::new(link)
    }

    #[test]
    fn test_foreground_waits_while_interrupt_thread_runs() {
        let sender = shared(LinkConfig::DEFAULT);
        let receiver = shared(LinkConfig::DEFAULT);
        let done = AtomicBool::new(false);

        thread::scope(|s| {
            // 模拟中断线：轮流服务两条链路
            s.spawn(|| {
                while !done.load(Ordering::Acquire) {
                    service_once(&sender);
                    service_once(&receiver);
                    thread::yield_now();
                }
            });

            receiver.with(|link| link.start_receive()).unwrap();
            sender.with(|link| link.transmit(b"across threads")).unwrap();
            sender.wait_for_tx();
            assert_eq!(sender.state(), LinkState::TransmitDone);

            let air = sender.with(|link| link.transceiver_mut().take_transmitted());
            assert!(receiver.with(|link| link.transceiver_mut().deliver(&air)));
            receiver.wait_for_rx();

            done.store(true, Ordering::Release);
        });

        assert_eq!(sender.stats().tx_frames, 1);
        assert_eq!(receiver.state(), LinkState::FrameReady);

        let link = receiver.into_inner();
        assert_eq!(link.get_result(), Some((&b"across threads"[..], 14)));
    }

    #[test]
    fn test_bounded_waits() {
        let link = shared(LinkConfig::DEFAULT);

        // 空闲链路立即返回
        assert_eq!(link.try_wait_for_tx(1), Ok(()));
        assert_eq!(link.try_wait_for_rx(1), Ok(()));

        // 没有中断服务，发送永远不会结束
        link.with(|link| link.transmit(b"stuck")).unwrap();
        assert_eq!(link.try_wait_for_tx(100), Err(LinkError::Timeout));

        while service_once(&link) {}
        assert_eq!(link.try_wait_for_tx(1), Ok(()));

        link.with(|link| link.start_receive()).unwrap();
        assert_eq!(link.try_wait_for_rx(100), Err(LinkError::Timeout));
        assert_eq!(link.state(), LinkState::ListeningHeader);
    }

    #[test]
    fn test_interrupt_entry_point() {
        let link = shared(LinkConfig::DEFAULT);
        link.with(|link| link.transmit(b"ab")).unwrap();

        // 帧长 10：九个字节加哑字节，再加完成事件
        for _ in 0..11 {
            link.on_interrupt();
        }
        assert_eq!(link.state(), LinkState::TransmitDone);
        assert_eq!(link.stats().tx_frames, 1);
    }
}
