use std::fmt;

use crate::shape::ConvDims;
use crate::Datum;

/// Accumulator for the output feature map, indexed `[h][w][c]`.
///
/// Created zeroed; the engine re-zeroes it before accumulating anyway.
#[derive(Clone)]
pub struct LocalOutput {
    size: usize,
    channels: usize,
    data: Vec<Datum>,
}

impl LocalOutput {
    pub fn new(dims: &ConvDims) -> Self {
        LocalOutput {
            size: dims.out_size(),
            channels: dims.channels(),
            data: vec![0.0; dims.output_len()],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    fn index(&self, h: usize, w: usize, c: usize) -> usize {
        (h * self.size + w) * self.channels + c
    }

    #[inline]
    pub fn get(&self, h: usize, w: usize, c: usize) -> Datum {
        self.data[self.index(h, w, c)]
    }

    #[inline]
    pub fn set(&mut self, h: usize, w: usize, c: usize, val: Datum) {
        let idx = self.index(h, w, c);
        self.data[idx] = val;
    }

    pub fn fill(&mut self, val: Datum) {
        self.data.fill(val);
    }

    /// Elements of one output row `h`, i.e. `size * channels` values.
    pub fn row_len(&self) -> usize {
        self.size * self.channels
    }

    pub fn as_slice(&self) -> &[Datum] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Datum] {
        &mut self.data
    }

    pub fn memory_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<Datum>()
    }
}

impl fmt::Display for LocalOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.size, self.size, self.channels)
    }
}
