//! Host-side utilities for validating tensor operations executed on an
//! accelerator against a CPU reference.
//!
//! ```rust
//! use tensor_parity::{comp_pcc, rectangle_grid, Tensor};
//! # fn main() -> Result<(), tensor_parity::Error> {
//! let expected = Tensor::from_slice(&[1f32, 2., 3., 4.], (2, 2))?;
//! let actual = Tensor::from_slice(&[1f32, 2., 3., 4.], (2, 2))?;
//! let check = comp_pcc(&expected, &actual, 0.99)?;
//! assert!(check.passed);
//!
//! let grid = rectangle_grid(24, 8).expect("24 cores fit a rectangle");
//! assert_eq!((grid.width(), grid.height()), (8, 3));
//! # Ok(()) }
//! ```
//!
//! The crate covers three concerns:
//!
//! - [`compare`]: statistical comparison oracles (Pearson correlation with a
//!   pass/fail threshold, exact equality, elementwise closeness).
//! - [`grid`]: rectangular core-grid partitioning for multi-core operator
//!   launches.
//! - [`generator`] and [`sweep`]: seeded test-input generation and the
//!   parametrized sweep tables and run harness built on top of the oracles.
pub mod compare;
mod dtype;
pub mod error;
pub mod generator;
pub mod grid;
pub mod shape;
pub mod sweep;
mod tensor;

pub use compare::{
    comp_allclose, comp_equal, comp_pcc, comp_pcc_with_tolerance, ComparisonResult, Tolerance,
};
pub use dtype::{DType, DTypeParseError, WithDType};
pub use error::{Error, Result};
pub use generator::{
    full_left_shift, gen_rand_bitwise_left_shift, gen_shapes, truncated_left_shift,
};
pub use grid::{rectangle_grid, CoreCoord, CoreGrid};
pub use shape::Shape;
pub use tensor::{CpuStorage, Tensor};
