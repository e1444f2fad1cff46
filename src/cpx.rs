//! Complex sample types shared by the mixer, correlators and search code.

use rustfft::num_complex::Complex32;

/// One complex IF sample. Components are full-range signed bytes per the
/// §3 invariant `|I|,|Q| <= 127`, matching what raw IF files actually
/// contain ([`crate::ingest`]). The carrier LUT only has room for a
/// single byte-wide key per sample (§3/§4.2), so [`Cpx8::to_key`]
/// quantizes each component down to a four-bit two's complement value
/// (range -8..=7) before packing; components outside that range are
/// saturated to its edge rather than wrapped, so an out-of-range sample
/// degrades to the nearest representable phase/amplitude instead of
/// silently aliasing to an unrelated one (see DESIGN.md).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cpx8 {
    pub i: i8,
    pub q: i8,
}

impl Cpx8 {
    pub fn new(i: i8, q: i8) -> Self {
        Self { i, q }
    }

    /// Pack into the byte used as the high half of a carrier LUT key,
    /// saturating each component to the four-bit range the LUT indexes.
    pub fn to_key(self) -> u8 {
        let i_nib = Self::saturate_nibble(self.i);
        let q_nib = Self::saturate_nibble(self.q);
        (q_nib << 4) | i_nib
    }

    /// Clamp a full-range component to -8..=7 and return its four-bit
    /// two's complement encoding.
    fn saturate_nibble(v: i8) -> u8 {
        (v.clamp(-8, 7) as i32 & 0x0f) as u8
    }

    /// Decode a LUT key byte back into a sample. Inverse of [`Cpx8::to_key`].
    pub fn from_key(byte: u8) -> Self {
        let i_nib = (byte & 0x0f) as i8;
        let i = if i_nib >= 8 { i_nib - 16 } else { i_nib };
        let q_nib = ((byte >> 4) & 0x0f) as i8;
        let q = if q_nib >= 8 { q_nib - 16 } else { q_nib };
        Self { i, q }
    }
}

/// A carrier-mixed sample: the output of [`crate::mixer::mix_carr`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cpx16 {
    pub i: i16,
    pub q: i16,
}

impl Cpx16 {
    pub fn new(i: i16, q: i16) -> Self {
        Self { i, q }
    }

    pub fn to_f32(self) -> CpxF {
        Complex32::new(self.i as f32, self.q as f32)
    }
}

/// Correlator and FFT working precision.
pub type CpxF = Complex32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_key_round_trips_within_representable_range() {
        for i in -8i8..=7 {
            for q in -8i8..=7 {
                let sample = Cpx8::new(i, q);
                assert_eq!(Cpx8::from_key(sample.to_key()), sample);
            }
        }
    }

    #[test]
    fn to_key_saturates_full_range_samples_instead_of_aliasing() {
        // A raw IF byte near the top of the full i8 range must clip to the
        // representable edge, not wrap around to a negative, unrelated key.
        let high = Cpx8::new(120, -120);
        let decoded = Cpx8::from_key(high.to_key());
        assert_eq!(decoded, Cpx8::new(7, -8));

        let low = Cpx8::new(-100, 100);
        let decoded = Cpx8::from_key(low.to_key());
        assert_eq!(decoded, Cpx8::new(-8, 7));
    }
}
