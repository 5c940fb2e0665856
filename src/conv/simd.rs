//! AXPY micro-kernel with NEON/SSE acceleration and a scalar fallback.
//!
//! All variants multiply and add as separate rounding steps (no FMA), so
//! vector and scalar paths produce bit-identical results.

// ── FP32 AXPY: c[c_off..c_off+len] += a_val * b[b_off..b_off+len] ──

#[cfg(all(target_arch = "aarch64", feature = "simd"))]
pub fn axpy_f32(c: &mut [f32], c_off: usize, b: &[f32], b_off: usize, a_val: f32, len: usize) {
    use core::arch::aarch64::*;
    assert!(c_off + len <= c.len() && b_off + len <= b.len());
    let mut j = 0usize;
    // SAFETY: bounds asserted above; loads/stores stay below len.
    unsafe {
        let a_vec = vdupq_n_f32(a_val);
        while j + 4 <= len {
            let b_vec = vld1q_f32(b.as_ptr().add(b_off + j));
            let c_vec = vld1q_f32(c.as_ptr().add(c_off + j));
            let r = vaddq_f32(c_vec, vmulq_f32(a_vec, b_vec));
            vst1q_f32(c.as_mut_ptr().add(c_off + j), r);
            j += 4;
        }
    }
    // scalar tail
    while j < len {
        c[c_off + j] += a_val * b[b_off + j];
        j += 1;
    }
}

#[cfg(all(target_arch = "x86_64", feature = "simd"))]
pub fn axpy_f32(c: &mut [f32], c_off: usize, b: &[f32], b_off: usize, a_val: f32, len: usize) {
    use core::arch::x86_64::*;
    assert!(c_off + len <= c.len() && b_off + len <= b.len());
    let mut j = 0usize;
    // SAFETY: SSE is baseline on x86_64; bounds asserted above.
    unsafe {
        let a_vec = _mm_set1_ps(a_val);
        while j + 4 <= len {
            let b_vec = _mm_loadu_ps(b.as_ptr().add(b_off + j));
            let c_vec = _mm_loadu_ps(c.as_ptr().add(c_off + j));
            let r = _mm_add_ps(c_vec, _mm_mul_ps(a_vec, b_vec));
            _mm_storeu_ps(c.as_mut_ptr().add(c_off + j), r);
            j += 4;
        }
    }
    while j < len {
        c[c_off + j] += a_val * b[b_off + j];
        j += 1;
    }
}

#[cfg(not(all(any(target_arch = "aarch64", target_arch = "x86_64"), feature = "simd")))]
pub fn axpy_f32(c: &mut [f32], c_off: usize, b: &[f32], b_off: usize, a_val: f32, len: usize) {
    axpy_f32_scalar(c, c_off, b, b_off, a_val, len);
}

/// Scalar AXPY, always available. Used as the oracle for the vector paths.
pub fn axpy_f32_scalar(c: &mut [f32], c_off: usize, b: &[f32], b_off: usize, a_val: f32, len: usize) {
    let c = &mut c[c_off..c_off + len];
    let b = &b[b_off..b_off + len];
    for (dst, &src) in c.iter_mut().zip(b) {
        *dst += a_val * src;
    }
}
