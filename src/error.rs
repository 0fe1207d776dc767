use crate::{DType, Shape};

/// Main library error type.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{msg}, expected: {expected:?}, got: {got:?}")]
    UnexpectedDType {
        msg: &'static str,
        expected: DType,
        got: DType,
    },

    #[error("shape mismatch in {op}, expected: {expected:?}, actual: {actual:?}")]
    ShapeMismatchCompare {
        op: &'static str,
        expected: Shape,
        actual: Shape,
    },

    #[error(
        "shape mismatch, got buffer of size {buffer_size} which is incompatible with shape {shape:?}"
    )]
    ShapeMismatch { buffer_size: usize, shape: Shape },

    #[error("unexpected rank, expected: {expected}, got: {got} ({shape:?})")]
    UnexpectedNumberOfDims {
        expected: usize,
        got: usize,
        shape: Shape,
    },

    #[error("shift amount {shift_bits} is outside the supported [0, 31] range")]
    ShiftOutOfRange { shift_bits: u32 },

    #[error("empty or inverted sampling range, low: {low}, high: {high}")]
    InvalidRange { low: f64, high: f64 },

    #[error("invalid normal distribution parameters, mean: {mean}, std: {std}")]
    InvalidNormalParams { mean: f64, std: f64 },

    #[error("rank mismatch in shape sweep bounds, start: {start}, end: {end}, interval: {interval}")]
    SweepRankMismatch {
        start: usize,
        end: usize,
        interval: usize,
    },

    #[error("invalid shape sweep bounds for dim {dim}, start: {start}, end: {end}, interval: {interval}")]
    InvalidSweepBounds {
        dim: usize,
        start: usize,
        end: usize,
        interval: usize,
    },

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Sweep table decoding error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
