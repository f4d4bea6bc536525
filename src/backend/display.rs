//! Human-readable rendering of the backend types for logs and debugging.
//! Not on any correctness path. Values this build does not recognize render
//! an explicit marker instead of nothing.

use std::fmt;

use crate::backend::{
    BackendDataType, BackendNode, Param, ParamValue, Quantization, Scalar, TensorKind,
    TensorWrapper,
};

const DATA_TYPE_NAMES: &[(BackendDataType, &str)] = &[
    (BackendDataType::Int8, "NPU_DATATYPE_INT_8"),
    (BackendDataType::Int16, "NPU_DATATYPE_INT_16"),
    (BackendDataType::Int32, "NPU_DATATYPE_INT_32"),
    (BackendDataType::Int64, "NPU_DATATYPE_INT_64"),
    (BackendDataType::Uint8, "NPU_DATATYPE_UINT_8"),
    (BackendDataType::Uint16, "NPU_DATATYPE_UINT_16"),
    (BackendDataType::Uint32, "NPU_DATATYPE_UINT_32"),
    (BackendDataType::Uint64, "NPU_DATATYPE_UINT_64"),
    (BackendDataType::Float16, "NPU_DATATYPE_FLOAT_16"),
    (BackendDataType::Float32, "NPU_DATATYPE_FLOAT_32"),
    (BackendDataType::Bool8, "NPU_DATATYPE_BOOL_8"),
    (BackendDataType::SFixed8, "NPU_DATATYPE_SFIXED_POINT_8"),
    (BackendDataType::SFixed16, "NPU_DATATYPE_SFIXED_POINT_16"),
    (BackendDataType::SFixed32, "NPU_DATATYPE_SFIXED_POINT_32"),
    (BackendDataType::UFixed8, "NPU_DATATYPE_UFIXED_POINT_8"),
    (BackendDataType::UFixed16, "NPU_DATATYPE_UFIXED_POINT_16"),
    (BackendDataType::UFixed32, "NPU_DATATYPE_UFIXED_POINT_32"),
];

impl fmt::Display for BackendDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = DATA_TYPE_NAMES
            .iter()
            .find(|(dt, _)| dt == self)
            .map(|(_, name)| *name)
            .unwrap_or("unknown data type");
        write!(f, "{name}")
    }
}

const TENSOR_KIND_NAMES: &[(TensorKind, &str)] = &[
    (TensorKind::AppWrite, "NPU_TENSOR_TYPE_APP_WRITE"),
    (TensorKind::AppRead, "NPU_TENSOR_TYPE_APP_READ"),
    (TensorKind::Native, "NPU_TENSOR_TYPE_NATIVE"),
    (TensorKind::Static, "NPU_TENSOR_TYPE_STATIC"),
    (TensorKind::Null, "NPU_TENSOR_TYPE_NULL"),
];

impl fmt::Display for TensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = TENSOR_KIND_NAMES
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, name)| *name)
            .unwrap_or("unsupported tensor type");
        write!(f, "{name}")
    }
}

impl fmt::Display for Quantization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantization::Undefined => write!(f, "encoding=undefined"),
            Quantization::ScaleOffset { scale, offset } => {
                write!(f, "encoding=scale_offset scale={scale} offset={offset}")
            }
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::I8(v) => write!(f, "{v}"),
            Scalar::I16(v) => write!(f, "{v}"),
            Scalar::I32(v) => write!(f, "{v}"),
            Scalar::I64(_) => write!(f, "int64 scalar is not supported"),
            Scalar::U8(v) => write!(f, "{v}"),
            Scalar::U16(v) => write!(f, "{v}"),
            Scalar::U32(v) => write!(f, "{v}"),
            Scalar::U64(_) => write!(f, "uint64 scalar is not supported"),
            Scalar::F32(v) => write!(f, "{v}"),
            Scalar::Bool8(v) => write!(f, "{v}"),
        }
    }
}

impl fmt::Display for TensorWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name={} type={} dataType={} rank={} dims=(",
            self.name,
            self.kind,
            self.data_type,
            self.shape.len()
        )?;
        for dim in &self.shape {
            write!(f, "{dim} ")?;
        }
        write!(f, ") quantizeParams: {}", self.quant)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            ParamValue::Scalar(scalar) => {
                write!(f, "name={} value={}", self.name, scalar)
            }
            ParamValue::Tensor(tensor) => write!(f, "name={} {}", self.name, tensor),
        }
    }
}

impl fmt::Display for BackendNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "node name: {} package: {} op_type: {} num_of_params: {} num_of_inputs: {} num_of_outputs: {}",
            self.name,
            self.package,
            self.op_type,
            self.params.len(),
            self.input_names.len(),
            self.output_ids.len()
        )?;
        writeln!(f, " node_inputs:")?;
        for input in &self.input_names {
            writeln!(f, "  {input}")?;
        }
        writeln!(f, " node_params:")?;
        for param in &self.params {
            writeln!(f, "  {param}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_type_names() {
        assert_eq!(
            BackendDataType::SFixed16.to_string(),
            "NPU_DATATYPE_SFIXED_POINT_16"
        );
        assert_eq!(
            BackendDataType::Unknown.to_string(),
            "unknown data type"
        );
    }

    #[test]
    fn tensor_kind_names() {
        assert_eq!(
            TensorKind::AppRead.to_string(),
            "NPU_TENSOR_TYPE_APP_READ"
        );
    }

    #[test]
    fn scalar_rendering() {
        assert_eq!(Scalar::I32(-3).to_string(), "-3");
        assert_eq!(Scalar::U32(7).to_string(), "7");
        assert_eq!(
            Scalar::I64(1).to_string(),
            "int64 scalar is not supported"
        );
    }

    #[test]
    fn quantization_rendering() {
        assert_eq!(Quantization::Undefined.to_string(), "encoding=undefined");
        let q = Quantization::ScaleOffset {
            scale: 0.5,
            offset: -2,
        };
        assert_eq!(q.to_string(), "encoding=scale_offset scale=0.5 offset=-2");
    }
}
