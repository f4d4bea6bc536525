use tracing::trace;

use crate::backend::{BackendGraph, Param, Quantization, TensorWrapper};
use crate::error::{LowerError, LowerResult};
use crate::graph::{GraphInfo, TensorDef};
use crate::lowering::types::map_data_type;

/// Namespace under which all lowered nodes are registered.
pub const PACKAGE_NAME: &str = "npu.core";

/// Binds the portable graph being lowered to the backend graph under
/// construction. The builder pipeline talks to the backend exclusively
/// through this wrapper.
pub struct ModelWrapper<'a> {
    graph: &'a GraphInfo,
    backend: &'a mut BackendGraph,
}

impl<'a> ModelWrapper<'a> {
    pub fn new(graph: &'a GraphInfo, backend: &'a mut BackendGraph) -> Self {
        ModelWrapper { graph, backend }
    }

    pub fn is_quantized(&self) -> bool {
        self.graph.quantized
    }

    pub fn contains_tensor(&self, name: &str) -> bool {
        self.backend.contains_tensor(name)
    }

    pub fn is_graph_input(&self, name: &str) -> bool {
        self.graph.graph_inputs.iter().any(|n| n == name)
    }

    pub fn is_graph_output(&self, name: &str) -> bool {
        self.graph.is_graph_output(name)
    }

    pub fn is_initializer_input(&self, name: &str) -> bool {
        self.graph.is_initializer(name)
    }

    /// Raw bytes of an initializer, unpacked eagerly at registration time.
    pub fn initializer_bytes(&self, name: &str) -> LowerResult<Vec<u8>> {
        self.graph
            .initializers
            .get(name)
            .map(|constant| constant.data.clone())
            .ok_or_else(|| LowerError::MissingInitializer {
                name: name.to_string(),
            })
    }

    pub fn shape_of(&self, def: &TensorDef) -> LowerResult<Vec<u32>> {
        def.shape
            .clone()
            .ok_or_else(|| LowerError::ShapeUnavailable {
                name: def.name.clone(),
            })
    }

    /// Backend element type of a tensor, quantization-aware.
    pub fn backend_data_type(&self, def: &TensorDef) -> LowerResult<crate::backend::BackendDataType> {
        map_data_type(def.data_type, self.graph.quantized).ok_or_else(|| {
            LowerError::UnsupportedDataType {
                name: def.name.clone(),
                data_type: def.data_type,
                quantized: self.graph.quantized,
            }
        })
    }

    /// Quantization encoding of a tensor. Fixed-point storage in a quantized
    /// graph must carry scale/offset; everything else is undefined.
    pub fn quantization_of(&self, def: &TensorDef) -> LowerResult<Quantization> {
        if self.graph.quantized && def.data_type.is_fixed_point() {
            let params = def.quant.ok_or_else(|| LowerError::MissingQuantization {
                name: def.name.clone(),
            })?;
            Ok(Quantization::ScaleOffset {
                scale: params.scale,
                offset: params.offset,
            })
        } else {
            Ok(Quantization::Undefined)
        }
    }

    pub fn add_tensor(&mut self, wrapper: TensorWrapper) -> LowerResult<u32> {
        trace!(name = %wrapper.name, kind = %wrapper.kind, "adding tensor");
        self.backend.add_tensor(wrapper)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_node(
        &mut self,
        name: String,
        op_type: String,
        params: Vec<Param>,
        input_names: Vec<String>,
        outputs: Vec<TensorWrapper>,
        validate_only: bool,
    ) -> LowerResult<()> {
        self.backend.add_node(
            name,
            PACKAGE_NAME.to_string(),
            op_type,
            params,
            input_names,
            outputs,
            validate_only,
        )
    }
}
