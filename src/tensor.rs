use crate::{DType, Error, Result, Shape, WithDType};
use half::{bf16, f16};

/// Host-side storage for a flat buffer of elements.
#[derive(Debug, Clone, PartialEq)]
pub enum CpuStorage {
    U32(Vec<u32>),
    I32(Vec<i32>),
    BF16(Vec<bf16>),
    F16(Vec<f16>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl CpuStorage {
    pub fn dtype(&self) -> DType {
        match self {
            Self::U32(_) => DType::U32,
            Self::I32(_) => DType::I32,
            Self::BF16(_) => DType::BF16,
            Self::F16(_) => DType::F16,
            Self::F32(_) => DType::F32,
            Self::F64(_) => DType::F64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::U32(data) => data.len(),
            Self::I32(data) => data.len(),
            Self::BF16(data) => data.len(),
            Self::F16(data) => data.len(),
            Self::F32(data) => data.len(),
            Self::F64(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            Self::U32(data) => data.iter().map(|v| *v as f64).collect(),
            Self::I32(data) => data.iter().map(|v| *v as f64).collect(),
            Self::BF16(data) => data.iter().map(|v| v.to_f64()).collect(),
            Self::F16(data) => data.iter().map(|v| v.to_f64()).collect(),
            Self::F32(data) => data.iter().map(|v| *v as f64).collect(),
            Self::F64(data) => data.to_vec(),
        }
    }
}

/// A host tensor: a flat row-major buffer of elements plus its shape.
///
/// Produced by the input generators and consumed by the comparison oracles;
/// immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    storage: CpuStorage,
    shape: Shape,
}

impl Tensor {
    /// Creates a new tensor from a vector, checking that the buffer length
    /// matches the number of elements in `shape`.
    pub fn from_vec<S: Into<Shape>, D: WithDType>(data: Vec<D>, shape: S) -> Result<Self> {
        let shape = shape.into();
        if data.len() != shape.elem_count() {
            return Err(Error::ShapeMismatch {
                buffer_size: data.len(),
                shape,
            });
        }
        Ok(Self {
            storage: D::to_cpu_storage_owned(data),
            shape,
        })
    }

    pub fn from_slice<S: Into<Shape>, D: WithDType>(array: &[D], shape: S) -> Result<Self> {
        Self::from_vec(array.to_vec(), shape)
    }

    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    pub fn elem_count(&self) -> usize {
        self.shape.elem_count()
    }

    pub fn dims1(&self) -> Result<usize> {
        self.shape.dims1()
    }

    pub fn dims2(&self) -> Result<(usize, usize)> {
        self.shape.dims2()
    }

    pub fn storage(&self) -> &CpuStorage {
        &self.storage
    }

    /// Extracts the flat buffer, checking that `D` matches the tensor dtype.
    pub fn to_vec1<D: WithDType>(&self) -> Result<Vec<D>> {
        let data = D::cpu_storage_as_slice(&self.storage)?;
        Ok(data.to_vec())
    }

    /// Flattens the tensor to `f64` regardless of its dtype. This is the
    /// path the comparison oracles use, so comparisons across storage types
    /// all happen in double precision.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.storage.to_f64_vec()
    }
}
