//! Convolution dimensions: compile-time shapes and their validated run-time form.

use std::fmt;

use crate::error::{Error, Result};

/// A convolution shape fixed at build time.
///
/// Implementors only supply `IN_SIZE`, `KERNEL` and `CHANNELS`; the remaining
/// constants are derived. Usually declared with [`conv_shape!`](crate::conv_shape).
pub trait ConvShape {
    const IN_SIZE: usize;
    const KERNEL: usize;
    const CHANNELS: usize;

    /// `IN_SIZE - KERNEL + 1` (valid convolution, stride 1).
    const OUT_SIZE: usize = Self::IN_SIZE - Self::KERNEL + 1;

    const INPUT_LEN: usize = Self::IN_SIZE * Self::IN_SIZE * Self::CHANNELS;
    const WEIGHT_LEN: usize = Self::KERNEL * Self::KERNEL * Self::CHANNELS * Self::CHANNELS;
    const OUTPUT_LEN: usize = Self::OUT_SIZE * Self::OUT_SIZE * Self::CHANNELS;

    /// Evaluated whenever the shape is used; an invalid shape fails to compile.
    const SHAPE_CHECK: () = {
        assert!(Self::IN_SIZE > 0, "conv shape: IN_SIZE must be non-zero");
        assert!(Self::KERNEL > 0, "conv shape: KERNEL must be non-zero");
        assert!(Self::CHANNELS > 0, "conv shape: CHANNELS must be non-zero");
        assert!(Self::IN_SIZE >= Self::KERNEL, "conv shape: KERNEL exceeds IN_SIZE");
        assert!(Self::OUT_SIZE == Self::IN_SIZE - Self::KERNEL + 1);
        assert!(Self::INPUT_LEN > 0 && Self::WEIGHT_LEN > 0 && Self::OUTPUT_LEN > 0);
    };
}

/// Declares a zero-sized marker type implementing [`ConvShape`].
///
/// ```
/// microconv::conv_shape!(pub Small { in_size: 3, kernel: 2, channels: 1 });
///
/// use microconv::shape::ConvShape;
/// assert_eq!(Small::OUT_SIZE, 2);
/// ```
///
/// A kernel larger than the input is rejected at compile time once the shape
/// is used:
///
/// ```compile_fail
/// microconv::conv_shape!(TooWide { in_size: 2, kernel: 3, channels: 1 });
///
/// let _ = microconv::shape::ConvDims::of::<TooWide>();
/// ```
#[macro_export]
macro_rules! conv_shape {
    ($(#[$meta:meta])* $vis:vis $name:ident {
        in_size: $in_size:expr,
        kernel: $kernel:expr,
        channels: $channels:expr $(,)?
    }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        $vis struct $name;

        impl $crate::shape::ConvShape for $name {
            const IN_SIZE: usize = $in_size;
            const KERNEL: usize = $kernel;
            const CHANNELS: usize = $channels;
        }
    };
}

/// Validated convolution dimensions.
///
/// Construction guarantees every dimension is non-zero, `kernel <= in_size`,
/// and that all tensor lengths fit in `usize`, so the accessors below never
/// overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConvDims {
    in_size: usize,
    kernel: usize,
    channels: usize,
}

impl ConvDims {
    pub fn new(in_size: usize, kernel: usize, channels: usize) -> Result<Self> {
        if in_size == 0 {
            return Err(Error::ZeroDimension { name: "in_size" });
        }
        if kernel == 0 {
            return Err(Error::ZeroDimension { name: "kernel" });
        }
        if channels == 0 {
            return Err(Error::ZeroDimension { name: "channels" });
        }
        if in_size < kernel {
            return Err(Error::KernelLargerThanInput { kernel, in_size });
        }

        // The weight length and the MAC count are the largest products.
        let plane = in_size.checked_mul(in_size).ok_or(Error::DimensionOverflow)?;
        plane.checked_mul(channels).ok_or(Error::DimensionOverflow)?;
        let taps = kernel.checked_mul(kernel).ok_or(Error::DimensionOverflow)?;
        let pairs = channels.checked_mul(channels).ok_or(Error::DimensionOverflow)?;
        let weight_len = taps.checked_mul(pairs).ok_or(Error::DimensionOverflow)?;
        let out_size = in_size - kernel + 1;
        (out_size * out_size)
            .checked_mul(weight_len)
            .ok_or(Error::DimensionOverflow)?;

        Ok(ConvDims { in_size, kernel, channels })
    }

    /// Dimensions of a compile-time shape.
    pub fn of<S: ConvShape>() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = S::SHAPE_CHECK;
        ConvDims {
            in_size: S::IN_SIZE,
            kernel: S::KERNEL,
            channels: S::CHANNELS,
        }
    }

    pub fn in_size(&self) -> usize {
        self.in_size
    }

    pub fn kernel(&self) -> usize {
        self.kernel
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn out_size(&self) -> usize {
        self.in_size - self.kernel + 1
    }

    pub fn input_len(&self) -> usize {
        self.in_size * self.in_size * self.channels
    }

    pub fn weight_len(&self) -> usize {
        self.kernel * self.kernel * self.channels * self.channels
    }

    pub fn output_len(&self) -> usize {
        self.out_size() * self.out_size() * self.channels
    }

    /// Multiply-accumulates performed by one invocation.
    pub fn macs(&self) -> usize {
        self.out_size() * self.out_size() * self.weight_len()
    }
}

impl fmt::Display for ConvDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let out = self.out_size();
        write!(
            f,
            "{0}x{0}x{1} * {2}x{2}x{1}x{1} -> {3}x{3}x{1}",
            self.in_size, self.channels, self.kernel, out
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::conv_shape!(Lenet1 { in_size: 32, kernel: 5, channels: 6 });

    #[test]
    fn shape_constants_are_derived() {
        assert_eq!(Lenet1::OUT_SIZE, 28);
        assert_eq!(Lenet1::INPUT_LEN, 32 * 32 * 6);
        assert_eq!(Lenet1::WEIGHT_LEN, 5 * 5 * 6 * 6);
        assert_eq!(Lenet1::OUTPUT_LEN, 28 * 28 * 6);
    }

    #[test]
    fn dims_of_shape_match_runtime_dims() {
        let dims = ConvDims::new(32, 5, 6).unwrap();
        assert_eq!(ConvDims::of::<Lenet1>(), dims);
    }

    #[test]
    fn overflowing_dims_are_rejected() {
        let err = ConvDims::new(usize::MAX, 1, 2).unwrap_err();
        assert_eq!(err, Error::DimensionOverflow);
    }

    #[test]
    fn display() {
        let dims = ConvDims::new(3, 2, 1).unwrap();
        assert_eq!(dims.to_string(), "3x3x1 * 2x2x1x1 -> 2x2x1");
    }
}
