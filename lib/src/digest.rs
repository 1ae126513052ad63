use crate::variant::Variant;

/// Running checksum over a message delivered in pieces.
///
/// Holds nothing beyond the variant and its accumulator; the same result is
/// reached by threading the `u16` returned from [`Variant::resume`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digest {
    variant: Variant,
    crc: u16,
}

impl Digest {
    pub const fn new(variant: Variant) -> Self {
        Self::resume(variant, variant.init)
    }

    /// Picks up a stream from an accumulator saved after an earlier chunk.
    pub const fn resume(variant: Variant, crc: u16) -> Self {
        Self { variant, crc }
    }

    pub fn update(&mut self, data: &[u8]) {
        self.crc = self.variant.resume(self.crc, data);
    }

    pub fn push(&mut self, byte: u8) {
        self.crc = self.variant.update(self.crc, byte);
    }

    pub const fn variant(&self) -> Variant {
        self.variant
    }

    pub const fn value(&self) -> u16 {
        self.crc
    }

    pub const fn finalize(self) -> u16 {
        self.crc
    }
}

impl Extend<u8> for Digest {
    fn extend<T: IntoIterator<Item = u8>>(&mut self, iter: T) {
        iter.into_iter().for_each(|byte| self.push(byte));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{CRC16, XMODEM};

    #[test]
    fn fresh_digest_yields_init() {
        assert_eq!(Digest::new(CRC16).finalize(), 0xFFFF);
        assert_eq!(Digest::new(XMODEM).finalize(), 0x0000);
    }

    #[test]
    fn pieces_match_one_shot() {
        let mut digest = Digest::new(XMODEM);
        digest.update(b"1234");
        digest.push(b'5');
        digest.extend(b"6789".iter().copied());
        assert_eq!(digest.finalize(), 0x31C3);
    }

    #[test]
    fn resumed_digest_continues_stream() {
        let head = CRC16.checksum(b"12345");
        let mut digest = Digest::resume(CRC16, head);
        digest.update(b"6789");
        assert_eq!(digest.value(), 0x4B37);
    }
}
