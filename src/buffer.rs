//! Sample buffer: the ring of signed 8-bit complex IF samples the mixer
//! and correlators read from.

use crate::cpx::Cpx8;

/// Sampling type: one real channel, or an interleaved I/Q pair per sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Iq {
    Real = 1,
    Complex = 2,
}

/// Owns a dense array of [`Cpx8`] samples, addressed modulo its length.
pub struct SampleBuffer {
    data: Vec<Cpx8>,
    iq: Iq,
}

impl SampleBuffer {
    /// Allocate an N-sample buffer, zero-initialized.
    pub fn new(n: usize, iq: Iq) -> Self {
        Self {
            data: vec![Cpx8::default(); n],
            iq,
        }
    }

    /// Build a buffer directly from already-decoded samples.
    pub fn from_samples(data: Vec<Cpx8>, iq: Iq) -> Self {
        Self { data, iq }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iq(&self) -> Iq {
        self.iq
    }

    pub fn as_slice(&self) -> &[Cpx8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Cpx8] {
        &mut self.data
    }

    /// Read `n_req` consecutive samples starting at `ix`, wrapping to
    /// index 0 when `ix + n_req` exceeds the buffer length. Ring
    /// semantics: this never fails regardless of `ix`/`n_req` relative
    /// to `len()`, as long as the buffer is non-empty.
    pub fn read_ring(&self, ix: usize, n_req: usize) -> Vec<Cpx8> {
        let n = self.data.len();
        assert!(n > 0, "cannot read from an empty sample buffer");
        let mut out = Vec::with_capacity(n_req);
        let mut idx = ix % n;
        for _ in 0..n_req {
            out.push(self.data[idx]);
            idx += 1;
            if idx == n {
                idx = 0;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_ring_wraps_at_boundary() {
        let samples: Vec<Cpx8> = (0..8).map(|k| Cpx8::new(k as i8, -(k as i8))).collect();
        let buf = SampleBuffer::from_samples(samples, Iq::Complex);

        let out = buf.read_ring(6, 4);
        let want = vec![
            Cpx8::new(6, -6),
            Cpx8::new(7, -7),
            Cpx8::new(0, 0),
            Cpx8::new(1, -1),
        ];
        assert_eq!(out, want);
    }

    #[test]
    fn read_ring_within_bounds_is_identity() {
        let samples: Vec<Cpx8> = (0..8).map(|k| Cpx8::new(k as i8, 0)).collect();
        let buf = SampleBuffer::from_samples(samples.clone(), Iq::Real);
        assert_eq!(buf.read_ring(0, 8), samples);
    }
}
