pub mod aligned_buffer;
pub mod checksum;

pub use aligned_buffer::AlignedBuffer;
pub use checksum::{calculate_checksum, crc_ccitt_update, verify_checksum, CRC_INIT};
