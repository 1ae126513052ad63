#![cfg_attr(not(test), no_std)]

//! Incremental 16-bit CRC engine for serial links and image verification.
//!
//! Two variants are provided: the reflected CRC-16 used by disk controllers
//! (polynomial `0xA001`, initial value `0xFFFF`) and the Xmodem-CRC
//! (polynomial `0x1021`, initial value `0x0000`). Neither applies a final
//! XOR, so the accumulator after the last byte is the checksum.
//!
//! ```
//! use mangonel_lib::{checksum, Variant, XMODEM};
//!
//! assert_eq!(checksum(XMODEM, b"123456789"), 0x31C3);
//!
//! let head = XMODEM.checksum(b"1234");
//! assert_eq!(XMODEM.resume(head, b"56789"), 0x31C3);
//! assert_eq!(Variant::by_name("xmodem"), Some(XMODEM));
//! ```

mod digest;
mod table;
mod update;
mod variant;

pub use digest::Digest;
pub use table::{Table, CRC16_TABLE, XMODEM_TABLE};
pub use update::{
    crc16_update, crc_xmodem_update, normal_update, reflected_update, CRC16_POLY, XMODEM_POLY,
};
pub use variant::{BitOrder, Variant, CRC16, VARIANTS, XMODEM};

pub static CHUNK_SIZE: usize = 256;

pub fn checksum(variant: Variant, msg: &[u8]) -> u16 {
    variant.checksum(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_messages() {
        assert_eq!(checksum(CRC16, &[]), 0xFFFF);
        assert_eq!(checksum(XMODEM, &[]), 0x0000);
    }

    #[test]
    fn concatenation_matches_resume() {
        let first = [0x01, 0x02, 0x03, 0xFE];
        let second = [0x7F, 0x80, 0x00];
        let joined = [0x01, 0x02, 0x03, 0xFE, 0x7F, 0x80, 0x00];
        for variant in VARIANTS {
            let resumed = variant.resume(checksum(variant, &first), &second);
            let bytewise = joined
                .iter()
                .fold(variant.init, |crc, &byte| variant.update(crc, byte));
            assert_eq!(checksum(variant, &joined), resumed);
            assert_eq!(resumed, bytewise);
        }
    }
}
