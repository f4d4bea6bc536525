//! Type-info plumbing for sequence values exchanged over the session API.

use crate::error::{LowerError, LowerResult};
use crate::graph::{DataType, Dimension};

/// Description of a value's type: a tensor with element type and (possibly
/// symbolic) shape, or a homogeneous sequence of such values.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeInfo {
    Tensor {
        data_type: DataType,
        shape: Vec<Dimension>,
    },
    Sequence(Box<TypeInfo>),
}

impl TypeInfo {
    pub fn tensor(data_type: DataType, shape: Vec<Dimension>) -> Self {
        TypeInfo::Tensor { data_type, shape }
    }

    pub fn sequence(element: TypeInfo) -> Self {
        TypeInfo::Sequence(Box::new(element))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, TypeInfo::Sequence(_))
    }

    /// Element type of a sequence. Calling this on anything that is not a
    /// sequence is an error, matching the construction-side check.
    pub fn element_type(&self) -> LowerResult<TypeInfo> {
        match self {
            TypeInfo::Sequence(element) => Ok((**element).clone()),
            TypeInfo::Tensor { .. } => Err(LowerError::NotASequence),
        }
    }

    /// Build sequence type info from an element description; fails when the
    /// described type is not a sequence.
    pub fn sequence_from(type_info: &TypeInfo) -> LowerResult<TypeInfo> {
        match type_info {
            TypeInfo::Sequence(element) => Ok(TypeInfo::sequence((**element).clone())),
            TypeInfo::Tensor { .. } => Err(LowerError::NotASequence),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::to_dimension_vector;

    #[test]
    fn sequence_element_type_round_trips() {
        let element = TypeInfo::tensor(DataType::Float32, to_dimension_vector(&[2, 2]));
        let sequence = TypeInfo::sequence(element.clone());
        assert!(sequence.is_sequence());
        assert_eq!(sequence.element_type().unwrap(), element);
    }

    #[test]
    fn tensor_is_not_a_sequence() {
        let tensor = TypeInfo::tensor(DataType::Int64, vec![]);
        assert!(matches!(
            tensor.element_type().unwrap_err(),
            LowerError::NotASequence
        ));
        assert!(matches!(
            TypeInfo::sequence_from(&tensor).unwrap_err(),
            LowerError::NotASequence
        ));
    }

    #[test]
    fn nested_sequences() {
        let inner = TypeInfo::tensor(DataType::Float16, to_dimension_vector(&[4]));
        let nested = TypeInfo::sequence(TypeInfo::sequence(inner.clone()));
        let once = nested.element_type().unwrap();
        assert!(once.is_sequence());
        assert_eq!(once.element_type().unwrap(), inner);
    }
}
