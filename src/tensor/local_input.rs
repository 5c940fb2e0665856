use std::fmt;

use crate::shape::ConvDims;
use crate::Datum;

/// Working copy of the input feature map for one invocation.
///
/// Indexed `[h][w][c]`, channel-minor, `in_size x in_size x channels`.
#[derive(Clone)]
pub struct LocalInput {
    size: usize,
    channels: usize,
    data: Vec<Datum>,
}

impl LocalInput {
    pub fn new(dims: &ConvDims) -> Self {
        LocalInput {
            size: dims.in_size(),
            channels: dims.channels(),
            data: vec![0.0; dims.input_len()],
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

    pub fn as_slice(&self) -> &[Datum] {
        &self.data
    }

    pub fn memory_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<Datum>()
    }
}

impl fmt::Display for LocalInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.size, self.size, self.channels)
    }
}
