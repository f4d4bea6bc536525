use std::path::PathBuf;

/// Unified error type for the lowering layer.
///
/// Variants fall into four groups: unsupported features (recoverable, the
/// upstream partitioner reassigns the node), validation failures, backend
/// mutation failures, and configuration errors from the session-options
/// surface. Every pipeline stage short-circuits with `?` and forwards the
/// first failure unchanged; no retries happen at this layer.
#[derive(Debug, thiserror::Error)]
pub enum LowerError {
    // ========== Unsupported features ==========
    #[error("operator `{op_type}` is not supported by the NPU backend")]
    UnsupportedOperator { op_type: String },

    #[error("data type {data_type:?} has no NPU mapping (quantized: {quantized}) for tensor `{name}`")]
    UnsupportedDataType {
        name: String,
        data_type: crate::graph::DataType,
        quantized: bool,
    },

    #[error("unsupported attribute on `{op_type}`: {reason}")]
    UnsupportedAttribute { op_type: String, reason: String },

    // ========== Validation failures ==========
    #[error("axis {axis} out of range for rank {rank}; NPU requires axis range [0, rank-1]")]
    AxisOutOfRange { axis: i64, rank: usize },

    #[error("attribute `{name}` has the wrong type: expected {expected}")]
    AttributeType { name: String, expected: String },

    #[error("missing required attribute `{name}` on `{op_type}`")]
    MissingAttribute { op_type: String, name: String },

    #[error("cannot get shape for tensor `{name}`")]
    ShapeUnavailable { name: String },

    #[error("cannot get quantization parameter for fixed-point tensor `{name}`")]
    MissingQuantization { name: String },

    #[error("initializer data missing for `{name}`")]
    MissingInitializer { name: String },

    #[error("shape inference failed for `{op_type}`: {reason}")]
    ShapeInference { op_type: String, reason: String },

    // ========== Backend mutation failures ==========
    #[error("failed to add tensor `{name}`: {reason}")]
    TensorRejected { name: String, reason: String },

    #[error("failed to add node `{name}`: {reason}")]
    NodeRejected { name: String, reason: String },

    // ========== Configuration ==========
    #[error("{provider} execution provider is not enabled in this build.")]
    ProviderNotEnabled { provider: &'static str },

    // ========== Loading ==========
    #[error("failed to read graph file `{path}`: {source}")]
    GraphRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse graph file `{path}`: {source}")]
    GraphParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("type does not describe a sequence")]
    NotASequence,
}

pub type LowerResult<T> = Result<T, LowerError>;
