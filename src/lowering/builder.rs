use tracing::debug;

use crate::backend::{Param, Scalar, TensorKind, TensorWrapper};
use crate::error::{LowerError, LowerResult};
use crate::graph::NodeUnit;
use crate::lowering::wrapper::ModelWrapper;

/// Operator-specific behavior of the middle pipeline stage. The three-stage
/// skeleton (inputs -> attributes/outputs -> submit) is fixed; only the
/// attribute translation varies per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    /// No attributes; the default middle stage.
    Simple,
    /// A single `axis` attribute, encoded unsigned. `default` of `None`
    /// makes the attribute required (Concat).
    Axis { default: Option<i64> },
    /// Gather encodes its resolved axis signed. This is a backend format
    /// quirk specific to gather-style operators, not a general rule.
    Gather,
    ArgMaxMin,
}

/// Lowers one operator family. Holds the ONNX-to-backend op name pair, the
/// middle-stage variant and the declared output limit.
#[derive(Debug, Clone, Copy)]
pub struct OpBuilder {
    pub op_type: &'static str,
    pub backend_op: &'static str,
    pub kind: OpKind,
    pub max_outputs: usize,
}

impl OpBuilder {
    pub const fn new(
        op_type: &'static str,
        backend_op: &'static str,
        kind: OpKind,
        max_outputs: usize,
    ) -> Self {
        OpBuilder {
            op_type,
            backend_op,
            kind,
            max_outputs,
        }
    }

    /// Dry run of the full pipeline: node submission is validated but not
    /// committed. Used by the upstream partitioner for capability queries.
    pub fn is_op_supported(
        &self,
        wrapper: &mut ModelWrapper<'_>,
        node_unit: &NodeUnit,
    ) -> LowerResult<()> {
        self.run(wrapper, node_unit, true)
    }

    /// Full pipeline with mutation enabled: commits tensors and the node to
    /// the backend graph.
    pub fn add_to_model(
        &self,
        wrapper: &mut ModelWrapper<'_>,
        node_unit: &NodeUnit,
    ) -> LowerResult<()> {
        self.run(wrapper, node_unit, false)
    }

    fn run(
        &self,
        wrapper: &mut ModelWrapper<'_>,
        node_unit: &NodeUnit,
        validate_only: bool,
    ) -> LowerResult<()> {
        debug!(
            node = %node_unit.name,
            op = %node_unit.op_type,
            validate_only,
            "builder adding node"
        );
        let input_names = self.process_inputs(wrapper, node_unit)?;
        self.process_attributes_and_outputs(wrapper, node_unit, input_names, validate_only)
    }

    /// Stage 1: resolve and register every input tensor not yet in the
    /// backend graph. Registration is idempotent across nodes sharing an
    /// input: already-registered names are skipped.
    fn process_inputs(
        &self,
        wrapper: &mut ModelWrapper<'_>,
        node_unit: &NodeUnit,
    ) -> LowerResult<Vec<String>> {
        let mut input_names = Vec::with_capacity(node_unit.inputs.len());

        for input in &node_unit.inputs {
            if wrapper.contains_tensor(&input.name) {
                debug!(tensor = %input.name, "tensor already added, skip it");
                input_names.push(input.name.clone());
                continue;
            }

            let data_type = wrapper.backend_data_type(input)?;
            let shape = wrapper.shape_of(input)?;
            let quant = wrapper.quantization_of(input)?;

            let is_initializer = wrapper.is_initializer_input(&input.name);
            let data = if is_initializer {
                wrapper.initializer_bytes(&input.name)?
            } else {
                Vec::new()
            };

            let kind = if is_initializer {
                TensorKind::Static
            } else if wrapper.is_graph_input(&input.name) {
                TensorKind::AppWrite
            } else {
                TensorKind::Native
            };

            input_names.push(input.name.clone());
            wrapper.add_tensor(TensorWrapper::new(
                input.name.clone(),
                kind,
                data_type,
                quant,
                shape,
                data,
            ))?;
        }

        Ok(input_names)
    }

    /// Stage 2: operator-specific attribute translation, then stage 3.
    fn process_attributes_and_outputs(
        &self,
        wrapper: &mut ModelWrapper<'_>,
        node_unit: &NodeUnit,
        input_names: Vec<String>,
        validate_only: bool,
    ) -> LowerResult<()> {
        match self.kind {
            OpKind::Simple => {
                if input_names.is_empty() {
                    return Ok(());
                }
                self.process_outputs(wrapper, node_unit, input_names, vec![], validate_only)
            }
            OpKind::Axis { default } => {
                let axis = self.resolve_axis_attribute(wrapper, node_unit, default)?;
                let params = vec![Param::scalar("axis", Scalar::U32(axis as u32))];
                self.process_outputs(wrapper, node_unit, input_names, params, validate_only)
            }
            OpKind::Gather => {
                let axis = self.resolve_axis_attribute(wrapper, node_unit, Some(0))?;
                let params = vec![Param::scalar("axis", Scalar::I32(axis as i32))];
                self.process_outputs(wrapper, node_unit, input_names, params, validate_only)
            }
            OpKind::ArgMaxMin => {
                let axis = self.resolve_axis_attribute(wrapper, node_unit, Some(0))?;
                let mut params = vec![Param::scalar("axis", Scalar::U32(axis as u32))];

                let select_last_index = node_unit.attr_i64("select_last_index", 0)?;
                if select_last_index != 0 {
                    return Err(LowerError::UnsupportedAttribute {
                        op_type: node_unit.op_type.clone(),
                        reason: "NPU ArgMax/ArgMin only support select_last_index=0".to_string(),
                    });
                }
                let keepdims = node_unit.attr_i64("keepdims", 1)?;
                params.push(Param::scalar(
                    "keep_dims",
                    Scalar::Bool8(u8::from(keepdims != 0)),
                ));

                self.process_outputs(wrapper, node_unit, input_names, params, validate_only)
            }
        }
    }

    /// Stage 3: resolve each output up to the declared maximum and submit
    /// the node. Submission is the sole mutating, irreversible step.
    fn process_outputs(
        &self,
        wrapper: &mut ModelWrapper<'_>,
        node_unit: &NodeUnit,
        input_names: Vec<String>,
        params: Vec<Param>,
        validate_only: bool,
    ) -> LowerResult<()> {
        let mut outputs = Vec::new();
        for output in node_unit.outputs.iter().take(self.max_outputs) {
            let data_type = wrapper.backend_data_type(output)?;
            let quant = wrapper.quantization_of(output)?;
            let shape = wrapper.shape_of(output)?;

            let kind = if wrapper.is_graph_output(&output.name) {
                TensorKind::AppRead
            } else {
                TensorKind::Native
            };

            outputs.push(TensorWrapper::new(
                output.name.clone(),
                kind,
                data_type,
                quant,
                shape,
                Vec::new(),
            ));
        }

        wrapper.add_node(
            node_unit.name.clone(),
            self.backend_op.to_string(),
            params,
            input_names,
            outputs,
            validate_only,
        )
    }

    /// Shared axis resolution: read the `axis` attribute (caller-supplied
    /// default, or required when `None`), normalize negative values by the
    /// rank of input 0, and range-check the result.
    fn resolve_axis_attribute(
        &self,
        wrapper: &ModelWrapper<'_>,
        node_unit: &NodeUnit,
        default: Option<i64>,
    ) -> LowerResult<i64> {
        let input = node_unit
            .inputs
            .first()
            .ok_or_else(|| LowerError::ShapeUnavailable {
                name: node_unit.name.clone(),
            })?;
        let shape = wrapper.shape_of(input)?;
        let rank = shape.len() as i64;

        let requested = match default {
            Some(value) => node_unit.attr_i64("axis", value)?,
            None => match node_unit.attributes.get("axis") {
                Some(_) => node_unit.attr_i64("axis", 0)?,
                None => {
                    return Err(LowerError::MissingAttribute {
                        op_type: node_unit.op_type.clone(),
                        name: "axis".to_string(),
                    });
                }
            },
        };

        let mut axis = requested;
        if axis < 0 {
            axis += rank;
        }
        if axis < 0 || axis >= rank {
            return Err(LowerError::AxisOutOfRange {
                axis: requested,
                rank: shape.len(),
            });
        }
        Ok(axis)
    }
}
