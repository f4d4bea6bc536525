use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

use crate::error::LowerError;

/// A single dimension of a tensor shape. Dynamic dimensions carry a name so
/// shape inference can keep symbolic sizes tied together.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct DynamicDimension {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(untagged)]
pub enum Dimension {
    Static(u32),
    Dynamic(DynamicDimension),
}

pub fn to_dimension_vector(shape: &[u32]) -> Vec<Dimension> {
    shape.iter().copied().map(Dimension::Static).collect()
}

/// Portable element types, as carried by the upstream graph format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
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
    Bool,
}

impl DataType {
    pub fn bytes_per_element(self) -> usize {
        match self {
            DataType::Int8 | DataType::Uint8 | DataType::Bool => 1,
            DataType::Int16 | DataType::Uint16 | DataType::Float16 => 2,
            DataType::Int32 | DataType::Uint32 | DataType::Float32 => 4,
            DataType::Int64 | DataType::Uint64 => 8,
        }
    }

    /// Fixed-point storage types carry quantization parameters in a
    /// quantized graph; everything else does not.
    pub fn is_fixed_point(self) -> bool {
        matches!(
            self,
            DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Uint8
                | DataType::Uint16
                | DataType::Uint32
        )
    }
}

/// Affine mapping from fixed-point storage to real values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantParams {
    pub scale: f32,
    pub offset: i32,
}

/// One input or output of a node unit: name, element type, static shape and
/// optional quantization parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TensorDef {
    pub name: String,
    pub data_type: DataType,
    /// Static shape when known; `None` when the upstream graph left it
    /// unresolved, which the lowering pipeline treats as a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quant: Option<QuantParams>,
}

/// A logical compute node from the portable graph, possibly a fusion of
/// several underlying nodes. Immutable once constructed upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeUnit {
    pub name: String,
    #[serde(rename = "type")]
    pub op_type: String,
    #[serde(default)]
    pub inputs: Vec<TensorDef>,
    #[serde(default)]
    pub outputs: Vec<TensorDef>,
    #[serde(default)]
    pub attributes: serde_json::Value,
}

impl NodeUnit {
    /// Read an integer attribute, falling back to `default` when absent.
    /// A present attribute of the wrong JSON type is a validation error.
    pub fn attr_i64(&self, name: &str, default: i64) -> Result<i64, LowerError> {
        match self.attributes.get(name) {
            None => Ok(default),
            Some(value) => value.as_i64().ok_or_else(|| LowerError::AttributeType {
                name: name.to_string(),
                expected: "integer".to_string(),
            }),
        }
    }

    pub fn attr_f32(&self, name: &str, default: f32) -> Result<f32, LowerError> {
        match self.attributes.get(name) {
            None => Ok(default),
            Some(value) => value
                .as_f64()
                .map(|v| v as f32)
                .ok_or_else(|| LowerError::AttributeType {
                    name: name.to_string(),
                    expected: "float".to_string(),
                }),
        }
    }
}

/// Raw bytes of a graph initializer, base64 in the JSON form.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstantData {
    #[serde_as(as = "Base64")]
    pub data: Vec<u8>,
}

/// The portable graph handed down by the upstream partitioner: node units in
/// execution order plus the graph boundary and the initializer payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphInfo {
    #[serde(default)]
    pub node_units: Vec<NodeUnit>,
    #[serde(default)]
    pub graph_inputs: Vec<String>,
    #[serde(default)]
    pub graph_outputs: Vec<String>,
    #[serde(default)]
    pub initializers: HashMap<String, ConstantData>,
    #[serde(default)]
    pub quantized: bool,
}

impl GraphInfo {
    pub fn is_graph_output(&self, name: &str) -> bool {
        self.graph_outputs.iter().any(|n| n == name)
    }

    pub fn is_initializer(&self, name: &str) -> bool {
        self.initializers.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_bytes_per_element() {
        assert_eq!(DataType::Int8.bytes_per_element(), 1);
        assert_eq!(DataType::Uint16.bytes_per_element(), 2);
        assert_eq!(DataType::Float16.bytes_per_element(), 2);
        assert_eq!(DataType::Float32.bytes_per_element(), 4);
        assert_eq!(DataType::Int64.bytes_per_element(), 8);
        assert_eq!(DataType::Bool.bytes_per_element(), 1);
    }

    #[test]
    fn test_data_type_serialization() {
        assert_eq!(
            serde_json::to_string(&DataType::Float32).unwrap(),
            "\"float32\""
        );
        assert_eq!(
            serde_json::from_str::<DataType>("\"uint16\"").unwrap(),
            DataType::Uint16
        );
    }

    #[test]
    fn test_fixed_point_classification() {
        assert!(DataType::Int8.is_fixed_point());
        assert!(DataType::Uint32.is_fixed_point());
        assert!(!DataType::Float32.is_fixed_point());
        assert!(!DataType::Int64.is_fixed_point());
        assert!(!DataType::Bool.is_fixed_point());
    }

    #[test]
    fn test_attr_i64_default_and_override() {
        let node = NodeUnit {
            name: "n".to_string(),
            op_type: "ArgMax".to_string(),
            inputs: vec![],
            outputs: vec![],
            attributes: serde_json::json!({ "axis": -1 }),
        };
        assert_eq!(node.attr_i64("axis", 0).unwrap(), -1);
        assert_eq!(node.attr_i64("keepdims", 1).unwrap(), 1);
    }

    #[test]
    fn test_attr_i64_wrong_type() {
        let node = NodeUnit {
            name: "n".to_string(),
            op_type: "ArgMax".to_string(),
            inputs: vec![],
            outputs: vec![],
            attributes: serde_json::json!({ "axis": "last" }),
        };
        let err = node.attr_i64("axis", 0).unwrap_err();
        assert!(matches!(err, LowerError::AttributeType { .. }));
    }

    #[test]
    fn test_graph_info_queries() {
        let mut initializers = HashMap::new();
        initializers.insert("w".to_string(), ConstantData { data: vec![1, 2] });
        let graph = GraphInfo {
            node_units: vec![],
            graph_inputs: vec!["x".to_string()],
            graph_outputs: vec!["y".to_string()],
            initializers,
            quantized: false,
        };
        assert!(graph.is_graph_output("y"));
        assert!(!graph.is_graph_output("x"));
        assert!(graph.is_initializer("w"));
        assert!(!graph.is_initializer("x"));
    }

    #[test]
    fn test_constant_data_base64_round_trip() {
        let constant = ConstantData {
            data: vec![0u8, 1, 2, 255],
        };
        let json = serde_json::to_string(&constant).unwrap();
        let back: ConstantData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.data, constant.data);
    }
}
