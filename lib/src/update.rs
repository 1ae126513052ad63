//! Bit-serial CRC-16 recurrences.
//!
//! Both named updaters are thin wrappers around a polynomial-generic
//! recurrence, so a caller with a non-standard polynomial gets the same
//! shape of computation.

/// Polynomial of the reflected "disk" CRC-16 (x^16 + x^15 + x^2 + 1, reflected).
pub const CRC16_POLY: u16 = 0xA001;

/// Polynomial of the Xmodem-CRC checksum (x^16 + x^12 + x^5 + 1).
pub const XMODEM_POLY: u16 = 0x1021;

/// Feeds one byte through a reflected (LSB-first) CRC-16 register.
///
/// `poly` must be given in reflected form, e.g. `0xA001` for CRC-16/ARC.
pub const fn reflected_update(poly: u16, crc: u16, data: u8) -> u16 {
    let mut crc = crc ^ data as u16;
    let mut i = 0;
    while i < u8::BITS {
        if crc & 0x0001 != 0 {
            crc = (crc >> 1) ^ poly;
        } else {
            crc >>= 1;
        }
        i += 1;
    }
    crc
}

/// Feeds one byte through a non-reflected (MSB-first) CRC-16 register.
pub const fn normal_update(poly: u16, crc: u16, data: u8) -> u16 {
    let mut crc = crc ^ ((data as u16) << 8);
    let mut i = 0;
    while i < u8::BITS {
        if crc & 0x8000 != 0 {
            crc = (crc << 1) ^ poly;
        } else {
            crc <<= 1;
        }
        i += 1;
    }
    crc
}

/// Optimized CRC-16 update, polynomial `0xA001`, initial value `0xFFFF`.
///
/// This is the CRC normally used by disk-drive controllers.
pub const fn crc16_update(crc: u16, data: u8) -> u16 {
    reflected_update(CRC16_POLY, crc, data)
}

/// CRC-XMODEM update, polynomial `0x1021`, initial value `0x0000`.
pub const fn crc_xmodem_update(crc: u16, data: u8) -> u16 {
    normal_update(XMODEM_POLY, crc, data)
}
