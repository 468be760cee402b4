#[cfg(test)]
mod frame_codec_tests {
    use link::config::{LengthField, LinkConfig};
    use link::error::FrameError;
    use link::protocol::{control_byte, decode_frame, decode_packet, encode_frame, FRAME_CAPACITY, SYNC_SIZE};
    use link::utils::calculate_checksum;
    use proptest::prelude::*;

    #[test]
    fn test_hello_frame_layout() {
        let config = LinkConfig::DEFAULT;
        let mut out = [0u8; FRAME_CAPACITY];

        let len = encode_frame(&config, 0x3, b"Hello", &mut out).unwrap();
        assert_eq!(len, SYNC_SIZE + 2 + 5 + 2);

        // 同步图样、长度、控制字节
        assert_eq!(&out[..4], &[0xAA, 0xAA, 0x2D, 0xD4]);
        assert_eq!(out[4], 5);
        assert_eq!(out[5], 0x3A);
        assert_eq!(out[5] & 0x0F, 0x0A);
        assert_eq!(&out[6..11], b"Hello");

        let packet = decode_frame(&config, &out[..len]).unwrap();
        assert_eq!(packet.config, 0x3);
        assert_eq!(&packet.payload[..], b"Hello");
    }

    #[test]
    fn test_length_bounds() {
        let config = LinkConfig::DEFAULT;
        let mut out = [0u8; FRAME_CAPACITY];

        assert_eq!(encode_frame(&config, 0, &[], &mut out), Err(FrameError::InvalidLength(0)));

        // 单字节长度字段最多 255
        let payload = [0x42u8; 256];
        assert_eq!(encode_frame(&config, 0, &payload, &mut out), Err(FrameError::InvalidLength(256)));
        let len = encode_frame(&config, 0, &payload[..255], &mut out).unwrap();
        assert_eq!(decode_frame(&config, &out[..len]).unwrap().len(), 255);

        let wide = config.with_length_field(LengthField::U16);
        let len = encode_frame(&wide, 0, &payload, &mut out).unwrap();
        assert_eq!(decode_frame(&wide, &out[..len]).unwrap().len(), 256);
    }

    #[test]
    fn test_header_rejection() {
        let config = LinkConfig::DEFAULT;

        // 长度为零
        assert_eq!(
            decode_packet(&config, &[0x00, 0x0F, 0x00, 0x00]),
            Err(FrameError::InvalidLength(0))
        );

        // 控制字节低半字节不是长度取反
        assert_eq!(
            decode_packet(&config, &[0x05, 0x3B, 1, 2, 3, 4, 5, 0, 0]),
            Err(FrameError::ControlMismatch { length: 5, control: 0x3B })
        );

        // 数据不足
        assert_eq!(decode_packet(&config, &[0x05, 0x0A, 1, 2]), Err(FrameError::Truncated));
    }

    #[test]
    fn test_crc_excludes_length_field() {
        let mut out = [0u8; 16];

        let bare = LinkConfig::DEFAULT.with_control_byte(false);
        let len = encode_frame(&bare, 0, b"abcd", &mut out).unwrap();
        assert_eq!(u16::from_le_bytes([out[len - 2], out[len - 1]]), calculate_checksum(b"abcd"));

        // 控制字节在CRC覆盖范围内
        let len = encode_frame(&LinkConfig::DEFAULT, 0x1, b"abcd", &mut out).unwrap();
        assert_eq!(
            u16::from_le_bytes([out[len - 2], out[len - 1]]),
            calculate_checksum(&[0x1B, b'a', b'b', b'c', b'd'])
        );

        let mut corrupted = out;
        corrupted[SYNC_SIZE + 3] ^= 0x01;
        assert!(matches!(
            decode_frame(&LinkConfig::DEFAULT, &corrupted[..len]),
            Err(FrameError::CrcMismatch { .. })
        ));
    }

    #[test]
    fn test_control_byte_keeps_config_nibble() {
        for nibble in 0..16u8 {
            let control = control_byte(0x21, nibble);
            assert_eq!(control >> 4, nibble);
            assert_eq!(control & 0x0F, !0x21u8 & 0x0F);
        }
        // 高位被截断
        assert_eq!(control_byte(1, 0xF3), 0x3E);
    }

    proptest! {
        #[test]
        fn prop_encode_decode(
            payload in prop::collection::vec(any::<u8>(), 1..=255),
            nibble in 0u8..16,
            crc in any::<bool>(),
            control in any::<bool>(),
        ) {
            let config = LinkConfig::DEFAULT.with_crc(crc).with_control_byte(control);
            let mut out = [0u8; FRAME_CAPACITY];

            let len = encode_frame(&config, nibble, &payload, &mut out).unwrap();
            prop_assert_eq!(len, SYNC_SIZE + config.header_size() + payload.len() + config.trailer_size());

            let packet = decode_frame(&config, &out[..len]).unwrap();
            prop_assert_eq!(&packet.payload[..], &payload[..]);
            prop_assert_eq!(packet.config, if control { nibble } else { 0 });
        }
    }
}
