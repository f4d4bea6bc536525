pub mod backend;
pub mod error;
pub mod graph;
pub mod loader;
pub mod lowering;
pub mod providers;
pub mod schema;
pub mod typeinfo;

pub use backend::{
    BackendDataType, BackendGraph, BackendNode, Param, ParamValue, Quantization, Scalar,
    TensorKind, TensorWrapper, data_size, element_size, tensor_id_from_name,
};
pub use error::{LowerError, LowerResult};
pub use graph::{
    ConstantData, DataType, Dimension, DynamicDimension, GraphInfo, NodeUnit, QuantParams,
    TensorDef,
};
pub use loader::load_graph_from_path;
pub use lowering::{
    ModelWrapper, NodeSupport, OpBuilder, OpBuilderRegistry, OpKind, PACKAGE_NAME, capability,
    default_registry, lower_graph, map_data_type, supported_nodes,
};
pub use providers::{NpuProviderOptions, ProfilingLevel, SessionOptions};
pub use schema::{InferredValue, OpSchema, SchemaRegistry, contrib_schemas};
pub use typeinfo::TypeInfo;
