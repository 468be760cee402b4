#[cfg(test)]
mod tx_engine_tests {
    use link::config::LinkConfig;
    use link::engine::{Cursor, Link};
    use link::error::{Direction, LinkError};
    use link::hal::simulator::{run_pending, SimTransceiver};
    use link::hal::{RfMode, Transceiver};
    use link::protocol::{encode_frame, LinkState, DUMMY_BYTE, FRAME_CAPACITY};

    fn new_link(config: LinkConfig) -> Link<SimTransceiver> {
        let mut link = Link::new(SimTransceiver::new(), config);
        link.init();
        link
    }

    fn expected_frame(config: &LinkConfig, nibble: u8, payload: &[u8]) -> Vec<u8> {
        let mut out = [0u8; FRAME_CAPACITY];
        let len = encode_frame(config, nibble, payload, &mut out).unwrap();
        let mut frame = out[..len].to_vec();
        frame.push(DUMMY_BYTE);
        frame
    }

    #[test]
    fn test_transmit_hello() {
        let mut link = new_link(LinkConfig::DEFAULT);
        link.set_tx_config_nibble(0x3);
        link.transmit(b"Hello").unwrap();

        // 首字节已由前台发出
        assert_eq!(link.state(), LinkState::Transmitting);
        assert_eq!(link.tx_cursor(), Some(Cursor { current: 1, end: 14 }));
        assert_eq!(link.transceiver().transmitted(), &[0xAA]);
        assert!(link.transceiver().irq_enabled());

        let events = run_pending(&mut link, 1000);
        assert_eq!(events, 14);

        let expected = expected_frame(&LinkConfig::DEFAULT, 0x3, b"Hello");
        assert_eq!(link.transceiver().transmitted(), &expected[..]);
        assert_eq!(link.tx_frame(), &expected[..expected.len() - 1]);
        assert!(link.is_tx_ready());
        assert_eq!(link.stats().tx_frames, 1);
    }

    #[test]
    fn test_carrier_stays_on_after_done() {
        let mut link = new_link(LinkConfig::DEFAULT);
        link.transmit(&[0x01, 0x02]).unwrap();
        run_pending(&mut link, 1000);

        assert_eq!(link.state(), LinkState::TransmitDone);
        assert_eq!(link.transceiver().mode(), RfMode::Tx);
        assert!(!link.transceiver().irq_enabled());
        assert_eq!(link.transceiver().transmitted().last(), Some(&DUMMY_BYTE));

        // 再来一次中断也不会多发
        link.on_interrupt();
        assert_eq!(link.stats().tx_frames, 1);
    }

    #[test]
    fn test_start_transmit_from_buffer() {
        let mut link = new_link(LinkConfig::DEFAULT);
        assert_eq!(link.get_tx_buffer().len(), 255);

        link.get_tx_buffer()[..3].copy_from_slice(b"abc");
        link.start_transmit(3).unwrap();
        run_pending(&mut link, 1000);

        let expected = expected_frame(&LinkConfig::DEFAULT, 0, b"abc");
        assert_eq!(link.transceiver().transmitted(), &expected[..]);
    }

    #[test]
    fn test_underrun_retries_from_start() {
        let mut link = new_link(LinkConfig::DEFAULT);
        link.transmit(b"Hello").unwrap();
        run_pending(&mut link, 5);

        link.transceiver_mut().inject_buffer_error();
        link.on_interrupt();

        // 游标回到同步图样之后，首字节重新发出
        assert_eq!(link.state(), LinkState::Transmitting);
        assert_eq!(link.tx_cursor().map(|cursor| cursor.current), Some(1));

        run_pending(&mut link, 1000);

        let expected = expected_frame(&LinkConfig::DEFAULT, 0, b"Hello");
        let sent = link.transceiver().transmitted();
        assert_eq!(sent.len(), 6 + expected.len());
        assert!(sent.ends_with(&expected));
        assert_eq!(link.state(), LinkState::TransmitDone);
        assert_eq!(link.stats().tx_frames, 1);
        assert_eq!(link.stats().control_errors, 1);
    }

    #[test]
    fn test_underrun_without_retry_aborts() {
        let mut link = new_link(LinkConfig::DEFAULT.with_tx_retry(false));
        link.transmit(b"Hello").unwrap();
        run_pending(&mut link, 3);

        link.transceiver_mut().inject_buffer_error();
        link.on_interrupt();

        assert_eq!(link.state(), LinkState::Idle);
        assert_eq!(link.tx_cursor(), None);
        assert_eq!(link.transceiver().mode(), RfMode::Default);
        assert!(!link.transceiver().irq_enabled());
        assert!(!link.is_tx_ready());
        assert_eq!(link.stats().tx_frames, 0);
        assert_eq!(run_pending(&mut link, 1000), 0);
    }

    #[test]
    fn test_transmit_errors() {
        let mut link = new_link(LinkConfig::DEFAULT);

        assert_eq!(link.transmit(&[]), Err(LinkError::InvalidLength { length: 0, max: 255 }));
        assert_eq!(
            link.start_transmit(256),
            Err(LinkError::InvalidLength { length: 256, max: 255 })
        );

        link.transmit(b"first").unwrap();
        assert_eq!(link.transmit(b"second"), Err(LinkError::Busy));
        assert_eq!(link.start_transmit(1), Err(LinkError::Busy));

        let mut rx_only = new_link(LinkConfig::DEFAULT.rx_only());
        assert_eq!(rx_only.transmit(b"x"), Err(LinkError::Disabled(Direction::Tx)));
        assert_eq!(rx_only.state(), LinkState::Idle);
    }

    #[test]
    fn test_prepare_transmit_keys_carrier() {
        let mut link = new_link(LinkConfig::DEFAULT);
        link.prepare_transmit();

        assert_eq!(link.state(), LinkState::Idle);
        assert_eq!(link.transceiver().mode(), RfMode::Tx);
        assert!(!link.transceiver().irq_enabled());

        // 发射机已打开，不再切换模式
        let switches = link.transceiver().mode_history().len();
        link.transmit(b"go").unwrap();
        assert_eq!(link.transceiver().mode_history().len(), switches);
    }
}
