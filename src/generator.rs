//! Seeded random input generators for operator sweeps.
//!
//! Every generator takes the RNG as an argument so reproducibility is a
//! property of the caller's seed, with no process-wide seed state.
use crate::{Error, Result, Shape, Tensor};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;

const SIGN_BIT: u32 = 0x8000_0000;

/// Left shift across all 32 bits, the reference semantics.
pub fn full_left_shift(v: i32, shift_bits: u32) -> i32 {
    ((v as u32) << shift_bits) as i32
}

/// Left shift over bits 0..=30 with the sign bit preserved, the accelerator
/// semantics.
pub fn truncated_left_shift(v: i32, shift_bits: u32) -> i32 {
    let sign = v as u32 & SIGN_BIT;
    let magnitude = ((v as u32 & !SIGN_BIT) << shift_bits) & !SIGN_BIT;
    (sign | magnitude) as i32
}

fn check_shift_bits(shift_bits: u32) -> Result<()> {
    if shift_bits > 31 {
        return Err(Error::ShiftOutOfRange { shift_bits });
    }
    Ok(())
}

fn check_i32_range(low: i64, high: i64) -> Result<()> {
    if low >= high || low < i32::MIN as i64 || high > i32::MAX as i64 + 1 {
        return Err(Error::InvalidRange {
            low: low as f64,
            high: high as f64,
        });
    }
    Ok(())
}

/// Generates uniform random `i32` values in `[low, high)`.
pub fn rand_int<S: Into<Shape>, R: Rng + ?Sized>(
    shape: S,
    low: i64,
    high: i64,
    rng: &mut R,
) -> Result<Tensor> {
    check_i32_range(low, high)?;
    let shape = shape.into();
    let uniform = Uniform::new(low, high);
    let data: Vec<i32> = (0..shape.elem_count())
        .map(|_| uniform.sample(rng) as i32)
        .collect();
    Tensor::from_vec(data, shape)
}

/// Generates random `i32` values in `[low, high)` that are safe to shift
/// left by `shift_bits` under either shift semantics.
///
/// The accelerator shifts bits 0..=30 and preserves the sign bit while the
/// reference shifts all 32 bits, so the two disagree whenever bit
/// `31 - shift_bits` differs from the sign bit. Forcing that bit to match
/// the sign of each draw makes the two implementations agree bit-for-bit
/// after the shift.
pub fn gen_rand_bitwise_left_shift<S: Into<Shape>, R: Rng + ?Sized>(
    shape: S,
    shift_bits: u32,
    low: i64,
    high: i64,
    rng: &mut R,
) -> Result<Tensor> {
    check_shift_bits(shift_bits)?;
    check_i32_range(low, high)?;
    let shape = shape.into();
    let change_bit = 31 - shift_bits;
    let include_mask = 1i32 << change_bit;
    let exclude_mask = !include_mask;
    let uniform = Uniform::new(low, high);
    let data: Vec<i32> = (0..shape.elem_count())
        .map(|_| {
            let v = uniform.sample(rng) as i32;
            if v < 0 {
                v | include_mask
            } else {
                v & exclude_mask
            }
        })
        .collect();
    Tensor::from_vec(data, shape)
}

/// Applies [`full_left_shift`] elementwise to an `i32` tensor, producing the
/// host-side expected output for a shift sweep case.
pub fn reference_left_shift(input: &Tensor, shift_bits: u32) -> Result<Tensor> {
    check_shift_bits(shift_bits)?;
    let data = input.to_vec1::<i32>()?;
    let shifted: Vec<i32> = data
        .iter()
        .map(|v| full_left_shift(*v, shift_bits))
        .collect();
    Tensor::from_vec(shifted, input.shape().clone())
}

/// Generates uniform random `f32` values in `[low, high)`.
pub fn rand_uniform<S: Into<Shape>, R: Rng + ?Sized>(
    shape: S,
    low: f32,
    high: f32,
    rng: &mut R,
) -> Result<Tensor> {
    if !(low < high) {
        return Err(Error::InvalidRange {
            low: low as f64,
            high: high as f64,
        });
    }
    let shape = shape.into();
    let uniform = Uniform::new(low, high);
    let data: Vec<f32> = (0..shape.elem_count()).map(|_| uniform.sample(rng)).collect();
    Tensor::from_vec(data, shape)
}

/// Generates normally distributed random `f32` values.
pub fn rand_normal<S: Into<Shape>, R: Rng + ?Sized>(
    shape: S,
    mean: f32,
    std: f32,
    rng: &mut R,
) -> Result<Tensor> {
    let normal = Normal::new(mean, std).map_err(|_| Error::InvalidNormalParams {
        mean: mean as f64,
        std: std as f64,
    })?;
    let shape = shape.into();
    let data: Vec<f32> = (0..shape.elem_count()).map(|_| normal.sample(rng)).collect();
    Tensor::from_vec(data, shape)
}

/// Expands per-dimension `[start, end]` ranges stepped by `interval` into
/// the full list of shapes, optionally down-sampled to `num_samples`
/// distinct shapes with the supplied RNG.
pub fn gen_shapes<R: Rng + ?Sized>(
    start: &[usize],
    end: &[usize],
    interval: &[usize],
    num_samples: Option<usize>,
    rng: &mut R,
) -> Result<Vec<Shape>> {
    if start.len() != end.len() || start.len() != interval.len() {
        return Err(Error::SweepRankMismatch {
            start: start.len(),
            end: end.len(),
            interval: interval.len(),
        });
    }
    for dim in 0..start.len() {
        if start[dim] == 0 || interval[dim] == 0 || start[dim] > end[dim] {
            return Err(Error::InvalidSweepBounds {
                dim,
                start: start[dim],
                end: end[dim],
                interval: interval[dim],
            });
        }
    }

    let mut dims: Vec<Vec<usize>> = vec![vec![]];
    for dim in 0..start.len() {
        let steps: Vec<usize> = (start[dim]..=end[dim]).step_by(interval[dim]).collect();
        let mut next = Vec::with_capacity(dims.len() * steps.len());
        for prefix in &dims {
            for step in &steps {
                let mut candidate = prefix.clone();
                candidate.push(*step);
                next.push(candidate);
            }
        }
        dims = next;
    }
    let shapes: Vec<Shape> = dims.into_iter().map(Shape::from).collect();

    match num_samples {
        Some(n) if n < shapes.len() => {
            let picked = rand::seq::index::sample(rng, shapes.len(), n);
            Ok(picked.into_iter().map(|i| shapes[i].clone()).collect())
        }
        _ => Ok(shapes),
    }
}
