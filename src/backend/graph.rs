use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tracing::debug;

use crate::backend::{BackendNode, Param, TensorWrapper};
use crate::error::{LowerError, LowerResult};

/// Stateless hash of a tensor name into the 32-bit id space the SDK uses.
pub fn tensor_id_from_name(name: &str) -> u32 {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    hasher.finish() as u32
}

/// The backend graph under construction. Tensors live in an arena indexed by
/// insertion order; a name maps to at most one tensor id. Nodes own their
/// parameter and output buffers once submitted.
#[derive(Debug, Default)]
pub struct BackendGraph {
    tensors: Vec<TensorWrapper>,
    tensor_ids: HashMap<String, u32>,
    nodes: Vec<BackendNode>,
    node_names: HashMap<String, u32>,
}

impl BackendGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_tensor(&self, name: &str) -> bool {
        self.tensor_ids.contains_key(name)
    }

    pub fn tensor(&self, name: &str) -> Option<&TensorWrapper> {
        self.tensor_ids
            .get(name)
            .map(|&id| &self.tensors[id as usize])
    }

    pub fn tensor_count(&self) -> usize {
        self.tensors.len()
    }

    pub fn nodes(&self) -> &[BackendNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Register a tensor, transferring ownership of its buffers into the
    /// graph arena. A name may be registered at most once.
    pub fn add_tensor(&mut self, wrapper: TensorWrapper) -> LowerResult<u32> {
        if self.tensor_ids.contains_key(&wrapper.name) {
            return Err(LowerError::TensorRejected {
                name: wrapper.name,
                reason: "tensor name already registered".to_string(),
            });
        }
        let id = self.tensors.len() as u32;
        debug!(name = %wrapper.name, id, "registering backend tensor");
        self.tensor_ids.insert(wrapper.name.clone(), id);
        self.tensors.push(wrapper);
        Ok(id)
    }

    /// Submit a node. All inputs must already be registered and the output
    /// names must be fresh. With `validate_only` every check runs against the
    /// current graph state but nothing is committed.
    pub fn add_node(
        &mut self,
        name: String,
        package: String,
        op_type: String,
        params: Vec<Param>,
        input_names: Vec<String>,
        outputs: Vec<TensorWrapper>,
        validate_only: bool,
    ) -> LowerResult<()> {
        if self.node_names.contains_key(&name) {
            return Err(LowerError::NodeRejected {
                name,
                reason: "node name already registered".to_string(),
            });
        }
        for input in &input_names {
            if !self.tensor_ids.contains_key(input) {
                return Err(LowerError::NodeRejected {
                    name,
                    reason: format!("input tensor `{input}` is not registered"),
                });
            }
        }
        for output in &outputs {
            if self.tensor_ids.contains_key(&output.name) {
                return Err(LowerError::NodeRejected {
                    name,
                    reason: format!("output tensor `{}` already registered", output.name),
                });
            }
        }

        if validate_only {
            return Ok(());
        }

        let mut output_ids = Vec::with_capacity(outputs.len());
        for output in outputs {
            output_ids.push(self.add_tensor(output)?);
        }

        let node_id = self.nodes.len() as u32;
        debug!(node = %name, op = %op_type, "committing backend node");
        self.node_names.insert(name.clone(), node_id);
        self.nodes.push(BackendNode {
            name,
            package,
            op_type,
            params,
            input_names,
            output_ids,
        });
        Ok(())
    }
}
