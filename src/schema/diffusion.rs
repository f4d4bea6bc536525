//! Schemas for the fused diffusion-model operators.

use crate::error::{LowerError, LowerResult};
use crate::graph::{DataType, Dimension, DynamicDimension};
use crate::schema::{
    AttrDef, AttrType, FormalSlot, InferredValue, OpSchema, propagate_elem_type_from_first_input,
};

const FLOAT_TYPES: &[DataType] = &[DataType::Float16, DataType::Float32];
const FLOAT32_ONLY: &[DataType] = &[DataType::Float32];

/// GroupNorm: group normalization over (N, C, H, W) input with optional
/// Swish activation. Output Y has the type and shape of X.
pub fn group_norm_schema() -> OpSchema {
    OpSchema {
        name: "GroupNorm",
        since_version: 1,
        attributes: vec![
            AttrDef {
                name: "epsilon",
                attr_type: AttrType::Float,
                default_int: None,
                default_float: Some(1e-5),
            },
            AttrDef {
                name: "groups",
                attr_type: AttrType::Int,
                default_int: None,
                default_float: None,
            },
            AttrDef {
                name: "activation",
                attr_type: AttrType::Int,
                default_int: None,
                default_float: None,
            },
        ],
        inputs: vec![
            FormalSlot {
                name: "X",
                allowed_types: FLOAT_TYPES,
            },
            FormalSlot {
                name: "gamma",
                allowed_types: FLOAT32_ONLY,
            },
            FormalSlot {
                name: "beta",
                allowed_types: FLOAT32_ONLY,
            },
        ],
        outputs: vec![FormalSlot {
            name: "Y",
            allowed_types: FLOAT_TYPES,
        }],
        infer: infer_group_norm,
    }
}

fn infer_group_norm(op_name: &str, inputs: &[InferredValue]) -> LowerResult<Vec<InferredValue>> {
    let data_type = propagate_elem_type_from_first_input(op_name, inputs)?;
    // Shape and type both propagate from input 0.
    Ok(vec![InferredValue {
        data_type,
        shape: inputs[0].shape.clone(),
    }])
}

/// SplitGelu: the hidden state (N, H*W, D) is sliced in two halves along the
/// last dimension, Gelu is applied to one half and the halves are multiplied,
/// giving (N, H*W, D/2). A static odd D divides truncating.
pub fn split_gelu_schema() -> OpSchema {
    OpSchema {
        name: "SplitGelu",
        since_version: 1,
        attributes: vec![],
        inputs: vec![FormalSlot {
            name: "X",
            allowed_types: FLOAT_TYPES,
        }],
        outputs: vec![FormalSlot {
            name: "Y",
            allowed_types: FLOAT_TYPES,
        }],
        infer: infer_split_gelu,
    }
}

fn infer_split_gelu(op_name: &str, inputs: &[InferredValue]) -> LowerResult<Vec<InferredValue>> {
    let data_type = propagate_elem_type_from_first_input(op_name, inputs)?;

    let Some(input_shape) = inputs[0].shape.as_ref() else {
        // Rank unknown: type propagates, shape stays unknown.
        return Ok(vec![InferredValue {
            data_type,
            shape: None,
        }]);
    };

    if input_shape.len() != 3 {
        return Err(LowerError::ShapeInference {
            op_type: op_name.to_string(),
            reason: "input shall be 3 dimensions".to_string(),
        });
    }

    let last = match &input_shape[2] {
        Dimension::Static(d) => Dimension::Static(d / 2),
        Dimension::Dynamic(dim) => Dimension::Dynamic(DynamicDimension {
            name: format!("{}_half", dim.name),
        }),
    };

    Ok(vec![InferredValue {
        data_type,
        shape: Some(vec![input_shape[0].clone(), input_shape[1].clone(), last]),
    }])
}
