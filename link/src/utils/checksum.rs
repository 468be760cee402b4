use crc::{Crc, CRC_16_MCRF4XX};

/// CRC-16/CCITT（反射形式，多项式 0x1021，初值 0xFFFF，无结果异或）
static CCITT: Crc<u16> = Crc::<u16>::new(&CRC_16_MCRF4XX);

/// 累加器初始值，每次新的帧尝试前复位
pub const CRC_INIT: u16 = 0xFFFF;

/// 计算整段数据的CRC-16校验和
pub fn calculate_checksum(data: &[u8]) -> u16 {
    CCITT.checksum(data)
}

/// 逐字节更新CRC累加器，用于中断上下文
///
/// 与 [`calculate_checksum`] 结果一致；低字节在前附加校验和后，
/// 对整段数据继续累加得到的余数为 0。
#[inline]
pub fn crc_ccitt_update(crc: u16, byte: u8) -> u16 {
    let mut data = byte ^ (crc as u8);
    data ^= data << 4;

    (((data as u16) << 8) | (crc >> 8)) ^ ((data >> 4) as u16) ^ ((data as u16) << 3)
}

/// 校验带尾部CRC（低字节在前）的数据，余数为零即通过
pub fn verify_checksum(data_with_crc: &[u8]) -> bool {
    data_with_crc
        .iter()
        .fold(CRC_INIT, |crc, byte| crc_ccitt_update(crc, *byte))
        == 0x0000
}
