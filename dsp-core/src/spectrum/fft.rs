//! In-place radix-2 FFT over parallel real/imaginary arrays
//!
//! Iterative Cooley-Tukey transform with the bit-reversal reordering done
//! after the butterfly stages. The spectrum is kept as two parallel `f32`
//! slices rather than an interleaved complex type so effects can address
//! bins with plain index arithmetic.

use std::f32::consts::PI;

/// Transform direction: the inverse uses the conjugate twiddle factor
/// and normalizes by the transform length afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Inverse,
}

/// Forward transform, in place.
///
/// # Arguments
/// * `reals` - Real components, length must be a power of two
/// * `imags` - Imaginary components, same length as `reals`
///
/// # Panics
/// Panics if the slices differ in length or the length is zero or not a
/// power of two. These are caller contract violations, not runtime faults.
pub fn fft(reals: &mut [f32], imags: &mut [f32]) {
    transform(reals, imags, Direction::Forward);
}

/// Inverse transform, in place. Divides every component by the transform
/// length after reordering, so `ifft(fft(x)) == x` up to rounding.
///
/// # Panics
/// Same contract as [`fft`].
pub fn ifft(reals: &mut [f32], imags: &mut [f32]) {
    transform(reals, imags, Direction::Inverse);

    let size = reals.len() as f32;

    for k in 0..reals.len() {
        reals[k] /= size;
        imags[k] /= size;
    }
}

fn transform(reals: &mut [f32], imags: &mut [f32], direction: Direction) {
    let size = reals.len();

    assert_eq!(size, imags.len(), "real/imaginary length mismatch");
    assert!(size.is_power_of_two(), "transform length must be a power of two");

    let stages = size.trailing_zeros() as usize;

    for stage in 1..=stages {
        let groups = 1usize << (stage - 1);
        // Distance between the two legs of each butterfly at this stage
        let span = 1usize << (stages - stage);

        for group in 0..groups {
            for position in 0..span {
                let n = group * (span << 1) + position;
                let m = n + span;

                let even_real = reals[n];
                let even_imag = imags[n];
                let odd_real = reals[m];
                let odd_imag = imags[m];

                if stage < stages {
                    let theta = 2.0 * PI * (position * groups) as f32 / size as f32;
                    let (sin_theta, cos_theta) = theta.sin_cos();

                    let twiddle_imag = match direction {
                        Direction::Forward => -sin_theta,
                        Direction::Inverse => sin_theta,
                    };

                    let diff_real = even_real - odd_real;
                    let diff_imag = even_imag - odd_imag;

                    reals[n] = even_real + odd_real;
                    imags[n] = even_imag + odd_imag;
                    reals[m] = (cos_theta * diff_real) - (twiddle_imag * diff_imag);
                    imags[m] = (cos_theta * diff_imag) + (twiddle_imag * diff_real);
                } else {
                    // Final stage: the twiddle factor is always unity
                    reals[n] = even_real + odd_real;
                    imags[n] = even_imag + odd_imag;
                    reals[m] = even_real - odd_real;
                    imags[m] = even_imag - odd_imag;
                }
            }
        }
    }

    // Bit-reversal permutation, built stage by stage with the recursive
    // doubling rule. Swapping only when index[k] > k avoids double swaps.
    let mut index = vec![0usize; size];

    for stage in 1..=stages {
        let groups = 1usize << (stage - 1);
        let step = 1usize << (stages - stage);

        for i in 0..groups {
            index[groups + i] = index[i] + step;
        }
    }

    for k in 0..size {
        if index[k] > k {
            reals.swap(k, index[k]);
            imags.swap(k, index[k]);
        }
    }
}
