//! The operator-builder layer: a registry of per-operator builders sharing a
//! three-stage pipeline, the model wrapper they mutate the backend graph
//! through, and the drivers the execution provider calls during partitioning
//! and compilation.

pub mod builder;
pub mod registry;
pub mod types;
pub mod wrapper;

use tracing::debug;

pub use builder::{OpBuilder, OpKind};
pub use registry::{OpBuilderRegistry, default_registry};
pub use types::map_data_type;
pub use wrapper::{ModelWrapper, PACKAGE_NAME};

use crate::backend::BackendGraph;
use crate::error::{LowerError, LowerResult};
use crate::graph::GraphInfo;

/// Capability verdict for one node unit.
#[derive(Debug, Clone)]
pub struct NodeSupport {
    pub name: String,
    pub op_type: String,
    pub supported: bool,
    pub reason: Option<String>,
}

/// Capability pass: run every node unit through its builder in validate-only
/// mode against a scratch backend graph. The pass itself never fails;
/// unsupported nodes are reported with the reason.
pub fn capability(graph: &GraphInfo, registry: &OpBuilderRegistry) -> Vec<NodeSupport> {
    let mut scratch = BackendGraph::new();
    let mut report = Vec::with_capacity(graph.node_units.len());

    for node_unit in &graph.node_units {
        let verdict = match registry.lookup(&node_unit.op_type) {
            None => Err(LowerError::UnsupportedOperator {
                op_type: node_unit.op_type.clone(),
            }),
            Some(builder) => {
                let mut wrapper = ModelWrapper::new(graph, &mut scratch);
                builder.is_op_supported(&mut wrapper, node_unit)
            }
        };
        match verdict {
            Ok(()) => report.push(NodeSupport {
                name: node_unit.name.clone(),
                op_type: node_unit.op_type.clone(),
                supported: true,
                reason: None,
            }),
            Err(err) => {
                debug!(node = %node_unit.name, %err, "node not supported");
                report.push(NodeSupport {
                    name: node_unit.name.clone(),
                    op_type: node_unit.op_type.clone(),
                    supported: false,
                    reason: Some(err.to_string()),
                });
            }
        }
    }

    report
}

/// Per-node supported flags, in node-unit order.
pub fn supported_nodes(graph: &GraphInfo, registry: &OpBuilderRegistry) -> Vec<bool> {
    capability(graph, registry)
        .into_iter()
        .map(|support| support.supported)
        .collect()
}

/// Build mode: lower every node unit into a backend graph. The first failure
/// aborts the pass; already-registered shared input tensors are the only
/// state left behind by a failed node.
pub fn lower_graph(graph: &GraphInfo, registry: &OpBuilderRegistry) -> LowerResult<BackendGraph> {
    let mut backend = BackendGraph::new();

    for node_unit in &graph.node_units {
        let builder =
            registry
                .lookup(&node_unit.op_type)
                .ok_or_else(|| LowerError::UnsupportedOperator {
                    op_type: node_unit.op_type.clone(),
                })?;
        let mut wrapper = ModelWrapper::new(graph, &mut backend);
        builder.add_to_model(&mut wrapper, node_unit)?;
    }

    Ok(backend)
}
