use crc::Algorithm;

use crate::update::{normal_update, reflected_update, CRC16_POLY, XMODEM_POLY};

/// Standard check input used by the CRC catalogue.
const CHECK_INPUT: &[u8] = b"123456789";

/// Direction in which bits of each byte enter the register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitOrder {
    /// Reflected: least-significant bit first, register shifts right.
    LsbFirst,
    /// Non-reflected: most-significant bit first, register shifts left.
    MsbFirst,
}

/// Parameters of a 16-bit CRC without output reflection or final XOR.
///
/// `poly` is stored in the bit order the recurrence consumes it, i.e. the
/// reflected constant for [`BitOrder::LsbFirst`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Variant {
    pub name: &'static str,
    pub poly: u16,
    pub init: u16,
    pub order: BitOrder,
}

/// Reflected CRC-16 as used by disk controllers and MODBUS.
pub const CRC16: Variant = Variant::reflected("crc16", CRC16_POLY, 0xFFFF);

/// Non-reflected CRC-CCITT as used by the Xmodem-CRC protocol.
pub const XMODEM: Variant = Variant::normal("xmodem", XMODEM_POLY, 0x0000);

pub const VARIANTS: [Variant; 2] = [CRC16, XMODEM];

impl Variant {
    pub const fn reflected(name: &'static str, poly: u16, init: u16) -> Self {
        Self {
            name,
            poly,
            init,
            order: BitOrder::LsbFirst,
        }
    }

    pub const fn normal(name: &'static str, poly: u16, init: u16) -> Self {
        Self {
            name,
            poly,
            init,
            order: BitOrder::MsbFirst,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        VARIANTS
            .into_iter()
            .find(|variant| variant.name.eq_ignore_ascii_case(name))
    }

    #[inline]
    pub const fn update(self, crc: u16, data: u8) -> u16 {
        match self.order {
            BitOrder::LsbFirst => reflected_update(self.poly, crc, data),
            BitOrder::MsbFirst => normal_update(self.poly, crc, data),
        }
    }

    /// Continues a checksum from `crc`, the value returned for the previous chunk.
    pub const fn resume(self, crc: u16, data: &[u8]) -> u16 {
        let mut crc = crc;
        let mut i = 0;
        while i < data.len() {
            crc = self.update(crc, data[i]);
            i += 1;
        }
        crc
    }

    pub const fn checksum(self, data: &[u8]) -> u16 {
        self.resume(self.init, data)
    }

    /// Checksums bytes pulled one at a time from any source.
    pub fn checksum_iter<I>(self, bytes: I) -> u16
    where
        I: IntoIterator<Item = u8>,
    {
        bytes
            .into_iter()
            .fold(self.init, |crc, byte| self.update(crc, byte))
    }

    /// Checksum of the ASCII string `"123456789"`.
    pub const fn check(self) -> u16 {
        self.checksum(CHECK_INPUT)
    }

    /// Describes this variant in the Rocksoft model used by the `crc` crate.
    ///
    /// The model keeps the polynomial and initial value in natural bit order,
    /// so both are reversed for reflected variants.
    pub const fn algorithm(self) -> Algorithm<u16> {
        let (poly, init, reflect) = match self.order {
            BitOrder::LsbFirst => (self.poly.reverse_bits(), self.init.reverse_bits(), true),
            BitOrder::MsbFirst => (self.poly, self.init, false),
        };
        Algorithm {
            width: 16,
            poly,
            init,
            refin: reflect,
            refout: reflect,
            xorout: 0x0000,
            check: self.check(),
            residue: 0x0000,
        }
    }
}
