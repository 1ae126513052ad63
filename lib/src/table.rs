use crate::variant::{BitOrder, Variant, CRC16, XMODEM};

/// Byte-at-a-time lookup table for one [`Variant`].
///
/// Entry `i` is the bit-serial register after feeding byte `i` into a zeroed
/// register, so one lookup replaces eight shift/test rounds.
#[derive(Clone, Debug)]
pub struct Table {
    variant: Variant,
    entries: [u16; 256],
}

pub static CRC16_TABLE: Table = Table::new(CRC16);
pub static XMODEM_TABLE: Table = Table::new(XMODEM);

impl Table {
    pub const fn new(variant: Variant) -> Self {
        let mut entries = [0u16; 256];
        let mut i = 0;
        while i < 256 {
            entries[i] = variant.update(0, i as u8);
            i += 1;
        }
        Self { variant, entries }
    }

    pub const fn variant(&self) -> Variant {
        self.variant
    }

    pub const fn entries(&self) -> &[u16; 256] {
        &self.entries
    }

    #[inline]
    pub const fn update(&self, crc: u16, data: u8) -> u16 {
        match self.variant.order {
            BitOrder::LsbFirst => (crc >> 8) ^ self.entries[((crc ^ data as u16) & 0xFF) as usize],
            BitOrder::MsbFirst => {
                (crc << 8) ^ self.entries[(((crc >> 8) ^ data as u16) & 0xFF) as usize]
            }
        }
    }

    pub fn resume(&self, crc: u16, data: &[u8]) -> u16 {
        data.iter().fold(crc, |crc, &byte| self.update(crc, byte))
    }

    pub fn checksum(&self, data: &[u8]) -> u16 {
        self.resume(self.variant.init, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::{crc16_update, crc_xmodem_update};

    #[test]
    fn known_entries() {
        assert_eq!(CRC16_TABLE.entries()[0x00], 0x0000);
        assert_eq!(CRC16_TABLE.entries()[0x01], 0xC0C1);
        assert_eq!(CRC16_TABLE.entries()[0xFF], 0x4040);
        assert_eq!(XMODEM_TABLE.entries()[0x01], 0x1021);
        assert_eq!(XMODEM_TABLE.entries()[0xFF], 0x1EF0);
    }

    #[test]
    fn check_strings() {
        assert_eq!(CRC16_TABLE.checksum(b"123456789"), 0x4B37);
        assert_eq!(XMODEM_TABLE.checksum(b"123456789"), 0x31C3);
        assert_eq!(CRC16_TABLE.checksum(&[]), 0xFFFF);
        assert_eq!(XMODEM_TABLE.checksum(&[]), 0x0000);
    }

    #[test]
    fn table_matches_bit_serial_for_every_pair() {
        for crc in 0..=u16::MAX {
            for data in 0..=u8::MAX {
                assert_eq!(
                    CRC16_TABLE.update(crc, data),
                    crc16_update(crc, data),
                    "crc16 crc={crc:#06x} data={data:#04x}"
                );
                assert_eq!(
                    XMODEM_TABLE.update(crc, data),
                    crc_xmodem_update(crc, data),
                    "xmodem crc={crc:#06x} data={data:#04x}"
                );
            }
        }
    }

    #[test]
    fn custom_variant_table() {
        let kermit = Table::new(Variant::reflected("kermit", 0x8408, 0x0000));
        assert_eq!(kermit.checksum(b"123456789"), 0x2189);
    }
}
