use std::fmt;

use crate::shape::ConvDims;
use crate::Datum;

/// Working copy of the weight tensor for one invocation.
///
/// Logically indexed `[p][q][i][j]` like the external weight layout. Storage is
/// `[p][q][j][i]`: for a fixed kernel tap and source channel `j`, the
/// `channels` values over `i` sit contiguously (a "lane"), which is exactly
/// what the innermost accumulation loop walks.
#[derive(Clone)]
pub struct LocalWeight {
    kernel: usize,
    channels: usize,
    data: Vec<Datum>,
}

impl LocalWeight {
    pub fn new(dims: &ConvDims) -> Self {
        LocalWeight {
            kernel: dims.kernel(),
            channels: dims.channels(),
            data: vec![0.0; dims.weight_len()],
        }
    }

    pub fn kernel(&self) -> usize {
        self.kernel
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    fn lane_offset(&self, p: usize, q: usize, j: usize) -> usize {
        ((p * self.kernel + q) * self.channels + j) * self.channels
    }

    #[inline]
    pub fn get(&self, p: usize, q: usize, i: usize, j: usize) -> Datum {
        self.data[self.lane_offset(p, q, j) + i]
    }

    #[inline]
    pub fn set(&mut self, p: usize, q: usize, i: usize, j: usize, val: Datum) {
        let idx = self.lane_offset(p, q, j) + i;
        self.data[idx] = val;
    }

    /// `local_weight[p][q][0..channels][j]` as a contiguous slice.
    #[inline]
    pub fn lane(&self, p: usize, q: usize, j: usize) -> &[Datum] {
        let off = self.lane_offset(p, q, j);
        &self.data[off..off + self.channels]
    }

    pub fn memory_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<Datum>()
    }
}

impl fmt::Display for LocalWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}x{}", self.kernel, self.kernel, self.channels, self.channels)
    }
}
