//! Operator schema declarations: attribute contracts, input/output type
//! constraints and the shape/type inference callback each schema carries.

pub mod diffusion;

use std::collections::HashMap;

use crate::error::{LowerError, LowerResult};
use crate::graph::{DataType, Dimension};

/// Declared type of a schema attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    Int,
    Float,
}

/// One declared attribute: name, type and optional default (absence of a
/// default makes the attribute required).
#[derive(Debug, Clone)]
pub struct AttrDef {
    pub name: &'static str,
    pub attr_type: AttrType,
    pub default_int: Option<i64>,
    pub default_float: Option<f32>,
}

/// A formal input or output slot with its type-constraint set.
#[derive(Debug, Clone)]
pub struct FormalSlot {
    pub name: &'static str,
    pub allowed_types: &'static [DataType],
}

/// Known element type and (possibly symbolic) shape of a value, as seen by
/// shape inference.
#[derive(Debug, Clone, PartialEq)]
pub struct InferredValue {
    pub data_type: DataType,
    /// `None` when the rank itself is unknown.
    pub shape: Option<Vec<Dimension>>,
}

pub type InferenceFn = fn(&str, &[InferredValue]) -> LowerResult<Vec<InferredValue>>;

/// An operator schema: declared attributes, formal inputs/outputs and the
/// type/shape inference function.
#[derive(Debug, Clone)]
pub struct OpSchema {
    pub name: &'static str,
    pub since_version: u32,
    pub attributes: Vec<AttrDef>,
    pub inputs: Vec<FormalSlot>,
    pub outputs: Vec<FormalSlot>,
    pub infer: InferenceFn,
}

impl OpSchema {
    /// Run this schema's inference over the known input values.
    pub fn infer_types(&self, inputs: &[InferredValue]) -> LowerResult<Vec<InferredValue>> {
        (self.infer)(self.name, inputs)
    }
}

#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, OpSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, schema: OpSchema) {
        if self.schemas.insert(schema.name, schema).is_some() {
            panic!("duplicate schema registration");
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&OpSchema> {
        self.schemas.get(name)
    }
}

/// Registry holding the fusion-operator schemas this crate contributes.
pub fn contrib_schemas() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    registry.register(diffusion::group_norm_schema());
    registry.register(diffusion::split_gelu_schema());
    registry
}

/// Shared inference helper: propagate the element type of input 0 to
/// output 0, leaving the shape to the caller.
pub fn propagate_elem_type_from_first_input(
    op_name: &str,
    inputs: &[InferredValue],
) -> LowerResult<DataType> {
    inputs
        .first()
        .map(|value| value.data_type)
        .ok_or_else(|| LowerError::ShapeInference {
            op_type: op_name.to_string(),
            reason: "missing input 0".to_string(),
        })
}
