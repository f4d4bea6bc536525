use std::collections::HashMap;

use crate::lowering::builder::{OpBuilder, OpKind};

/// Associates each supported portable operator type with its builder.
/// Registration happens once at startup; lookup misses are the normal
/// "unsupported on this backend" outcome used by capability queries.
#[derive(Debug, Default)]
pub struct OpBuilderRegistry {
    builders: HashMap<&'static str, OpBuilder>,
}

impl OpBuilderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering the same op type twice is a programmer error, fatal at
    /// startup rather than a runtime condition.
    pub fn register(&mut self, builder: OpBuilder) {
        if self
            .builders
            .insert(builder.op_type, builder)
            .is_some()
        {
            panic!("duplicate op builder registration for {}", builder.op_type);
        }
    }

    pub fn lookup(&self, op_type: &str) -> Option<&OpBuilder> {
        self.builders.get(op_type)
    }

    pub fn supported_op_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.builders.keys().copied()
    }
}

/// The supported operator catalog.
pub fn default_registry() -> OpBuilderRegistry {
    let mut registry = OpBuilderRegistry::new();

    // Operators without attributes.
    for (op_type, backend_op) in [
        ("Relu", "Relu"),
        ("Sigmoid", "Sigmoid"),
        ("Tanh", "Tanh"),
        ("Gelu", "Gelu"),
        ("Sqrt", "ElementWiseSquareRoot"),
        ("Add", "ElementWiseAdd"),
        ("Sub", "ElementWiseSubtract"),
        ("Mul", "ElementWiseMultiply"),
        ("Div", "ElementWiseDivide"),
    ] {
        registry.register(OpBuilder::new(op_type, backend_op, OpKind::Simple, 1));
    }

    // Axis-carrying operators; the backend takes the axis unsigned.
    registry.register(OpBuilder::new(
        "Softmax",
        "Softmax",
        OpKind::Axis { default: Some(-1) },
        1,
    ));
    registry.register(OpBuilder::new(
        "LogSoftmax",
        "LogSoftmax",
        OpKind::Axis { default: Some(-1) },
        1,
    ));
    registry.register(OpBuilder::new(
        "Concat",
        "Concat",
        OpKind::Axis { default: None },
        1,
    ));

    // Gather takes the axis signed.
    registry.register(OpBuilder::new("Gather", "Gather", OpKind::Gather, 1));

    registry.register(OpBuilder::new("ArgMax", "Argmax", OpKind::ArgMaxMin, 1));
    registry.register(OpBuilder::new("ArgMin", "Argmin", OpKind::ArgMaxMin, 1));

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_miss_is_none() {
        let registry = default_registry();
        assert!(registry.lookup("Conv").is_none());
    }

    #[test]
    fn lookup_hit_returns_builder() {
        let registry = default_registry();
        let builder = registry.lookup("ArgMax").unwrap();
        assert_eq!(builder.backend_op, "Argmax");
    }

    #[test]
    #[should_panic(expected = "duplicate op builder registration")]
    fn duplicate_registration_panics() {
        let mut registry = OpBuilderRegistry::new();
        registry.register(OpBuilder::new("Relu", "Relu", OpKind::Simple, 1));
        registry.register(OpBuilder::new("Relu", "Relu", OpKind::Simple, 1));
    }

    #[test]
    fn catalog_covers_expected_ops() {
        let registry = default_registry();
        for op in [
            "Relu", "Sigmoid", "Tanh", "Gelu", "Sqrt", "Add", "Sub", "Mul", "Div", "Softmax",
            "LogSoftmax", "Concat", "Gather", "ArgMax", "ArgMin",
        ] {
            assert!(registry.lookup(op).is_some(), "{op}");
        }
    }
}
