//! Sweep parametrization tables and the per-case run harness.
//!
//! The tables are configuration data, not logic: they enumerate the operator
//! configurations a sweep covers and are loaded independently of the
//! comparison and partitioning code, which stays reusable outside this
//! module.
use crate::generator::{gen_rand_bitwise_left_shift, rand_int, reference_left_shift};
use crate::{comp_pcc, ComparisonResult, DType, Result, Tensor};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// Pearson-correlation threshold applied to every sweep case.
pub const SWEEP_PCC_THRESHOLD: f64 = 0.999;

/// The `[low, high)` draw range for shift sweep inputs, covering the full
/// `i32` domain.
pub const SHIFT_INPUT_LOW: i64 = -2147483647;
pub const SHIFT_INPUT_HIGH: i64 = 2147483648;

/// Placement of a device tensor, as named by the accelerator runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryConfig {
    Dram,
    L1,
}

/// Parameter lists for the elementwise left-shift sweep. Each test case is
/// one element of the cartesian product of the lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftSweepParameters {
    pub input_shapes: Vec<Vec<usize>>,
    pub shift_bits: Vec<u32>,
    pub use_safe_nums: Vec<bool>,
    pub input_dtypes: Vec<DType>,
    pub input_memory_configs: Vec<MemoryConfig>,
    pub output_memory_configs: Vec<MemoryConfig>,
}

/// One fully-bound sweep test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSweepCase {
    pub input_shape: Vec<usize>,
    pub shift_bits: u32,
    pub use_safe_nums: bool,
    pub input_dtype: DType,
    pub input_memory_config: MemoryConfig,
    pub output_memory_config: MemoryConfig,
}

impl ShiftSweepParameters {
    /// Expands the parameter lists into the full cartesian product of cases.
    pub fn cases(&self) -> Vec<ShiftSweepCase> {
        let mut cases = Vec::new();
        for input_shape in &self.input_shapes {
            for &shift_bits in &self.shift_bits {
                for &use_safe_nums in &self.use_safe_nums {
                    for &input_dtype in &self.input_dtypes {
                        for &input_memory_config in &self.input_memory_configs {
                            for &output_memory_config in &self.output_memory_configs {
                                cases.push(ShiftSweepCase {
                                    input_shape: input_shape.clone(),
                                    shift_bits,
                                    use_safe_nums,
                                    input_dtype,
                                    input_memory_config,
                                    output_memory_config,
                                });
                            }
                        }
                    }
                }
            }
        }
        cases
    }
}

/// A named suite of sweep parameters, e.g. "nightly" or "xfail".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSuite {
    pub name: String,
    pub parameters: ShiftSweepParameters,
}

/// Loads sweep suites from a JSON reader.
pub fn load_suites<R: std::io::Read>(reader: R) -> Result<Vec<SweepSuite>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Loads sweep suites from a JSON file.
pub fn load_suites_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<SweepSuite>> {
    let file = std::fs::File::open(path)?;
    load_suites(std::io::BufReader::new(file))
}

/// Pass/fail verdict plus wall-clock time for one executed case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseOutcome {
    pub result: ComparisonResult,
    pub elapsed_secs: f64,
}

impl CaseOutcome {
    /// The `[passed, elapsed_seconds]` record consumed by the reporting
    /// layer.
    pub fn as_record(&self) -> (bool, f64) {
        (self.result.passed, self.elapsed_secs)
    }
}

/// Runs one left-shift sweep case against `device_op`.
///
/// The input tensor is drawn from `rng` (shift-safe values when the case
/// asks for them), the expected output is computed on the host with
/// full-width shift semantics, and only the device call is timed. The device
/// runtime stays an opaque collaborator: it is reached exclusively through
/// the closure, so its session lifetime is scoped by the caller.
pub fn run_shift_case<R, F>(case: &ShiftSweepCase, device_op: F, rng: &mut R) -> Result<CaseOutcome>
where
    R: Rng + ?Sized,
    F: FnOnce(&Tensor, u32) -> Result<Tensor>,
{
    let input = if case.use_safe_nums {
        gen_rand_bitwise_left_shift(
            case.input_shape.clone(),
            case.shift_bits,
            SHIFT_INPUT_LOW,
            SHIFT_INPUT_HIGH,
            rng,
        )?
    } else {
        rand_int(
            case.input_shape.clone(),
            SHIFT_INPUT_LOW,
            SHIFT_INPUT_HIGH,
            rng,
        )?
    };
    let expected = reference_left_shift(&input, case.shift_bits)?;

    let start = Instant::now();
    let actual = device_op(&input, case.shift_bits)?;
    let elapsed_secs = start.elapsed().as_secs_f64();

    let result = comp_pcc(&expected, &actual, SWEEP_PCC_THRESHOLD)?;
    debug!(
        shape = ?case.input_shape,
        shift_bits = case.shift_bits,
        passed = result.passed,
        elapsed_secs,
        "sweep case finished"
    );
    Ok(CaseOutcome {
        result,
        elapsed_secs,
    })
}
