//! Value objects describing tensors, parameters and nodes as the NPU SDK
//! expects them, plus the in-memory backend graph they are committed to.

mod display;
mod graph;

pub use graph::{BackendGraph, tensor_id_from_name};

/// Element types of the NPU backend. Fixed-point variants are the quantized
/// forms of the matching-width integers. `Unknown` stands in for values a
/// newer SDK could hand back that this build does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendDataType {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float16,
    Float32,
    Bool8,
    SFixed8,
    SFixed16,
    SFixed32,
    UFixed8,
    UFixed16,
    UFixed32,
    Unknown,
}

/// Byte width of a backend element type. Unknown types report 0; callers
/// must treat 0 as "unknown", never as a valid zero-byte type.
pub fn element_size(data_type: BackendDataType) -> usize {
    const SIZES: &[(BackendDataType, usize)] = &[
        (BackendDataType::Int8, 1),
        (BackendDataType::Int16, 2),
        (BackendDataType::Int32, 4),
        (BackendDataType::Int64, 8),
        (BackendDataType::Uint8, 1),
        (BackendDataType::Uint16, 2),
        (BackendDataType::Uint32, 4),
        (BackendDataType::Uint64, 8),
        (BackendDataType::Float16, 2),
        (BackendDataType::Float32, 4),
        (BackendDataType::Bool8, 1),
        (BackendDataType::SFixed8, 1),
        (BackendDataType::SFixed16, 2),
        (BackendDataType::SFixed32, 4),
        (BackendDataType::UFixed8, 1),
        (BackendDataType::UFixed16, 2),
        (BackendDataType::UFixed32, 4),
    ];
    SIZES
        .iter()
        .find(|(dt, _)| *dt == data_type)
        .map(|(_, size)| *size)
        .unwrap_or(0)
}

/// Element count implied by a dimension list; 0 for an empty list.
pub fn data_size(dims: &[u32]) -> u64 {
    if dims.is_empty() {
        return 0;
    }
    dims.iter().map(|&d| d as u64).product()
}

/// Role of a tensor in the backend graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TensorKind {
    /// Written by the application: a graph input.
    AppWrite,
    /// Read by the application: a graph output.
    AppRead,
    /// Internal to the graph.
    Native,
    /// Constant data baked into the graph.
    Static,
    Null,
}

/// Quantization encoding attached to a backend tensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantization {
    Undefined,
    ScaleOffset { scale: f32, offset: i32 },
}

/// A typed scalar value for a node parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    Bool8(u8),
}

impl Scalar {
    pub fn data_type(self) -> BackendDataType {
        match self {
            Scalar::I8(_) => BackendDataType::Int8,
            Scalar::I16(_) => BackendDataType::Int16,
            Scalar::I32(_) => BackendDataType::Int32,
            Scalar::I64(_) => BackendDataType::Int64,
            Scalar::U8(_) => BackendDataType::Uint8,
            Scalar::U16(_) => BackendDataType::Uint16,
            Scalar::U32(_) => BackendDataType::Uint32,
            Scalar::U64(_) => BackendDataType::Uint64,
            Scalar::F32(_) => BackendDataType::Float32,
            Scalar::Bool8(_) => BackendDataType::Bool8,
        }
    }
}

/// Everything needed to submit a tensor to the backend graph. Construction
/// cannot fail; validation happened in the pipeline stages that resolved the
/// fields. Once passed into node submission the graph owns the buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorWrapper {
    pub name: String,
    pub kind: TensorKind,
    pub data_type: BackendDataType,
    pub quant: Quantization,
    pub shape: Vec<u32>,
    /// Raw constant payload for `Static` tensors, empty otherwise.
    pub data: Vec<u8>,
}

impl TensorWrapper {
    pub fn new(
        name: impl Into<String>,
        kind: TensorKind,
        data_type: BackendDataType,
        quant: Quantization,
        shape: Vec<u32>,
        data: Vec<u8>,
    ) -> Self {
        TensorWrapper {
            name: name.into(),
            kind,
            data_type,
            quant,
            shape,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Scalar(Scalar),
    Tensor(TensorWrapper),
}

/// A named node parameter (attribute translated to backend form).
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: &'static str,
    pub value: ParamValue,
}

impl Param {
    pub fn scalar(name: &'static str, value: Scalar) -> Self {
        Param {
            name,
            value: ParamValue::Scalar(value),
        }
    }

    pub fn tensor(name: &'static str, value: TensorWrapper) -> Self {
        Param {
            name,
            value: ParamValue::Tensor(value),
        }
    }
}

/// A node as stored in the backend graph after submission.
#[derive(Debug, Clone)]
pub struct BackendNode {
    pub name: String,
    pub package: String,
    pub op_type: String,
    pub params: Vec<Param>,
    pub input_names: Vec<String>,
    pub output_ids: Vec<u32>,
}
