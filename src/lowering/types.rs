//! Translation tables from the portable element types to the backend types.
//! A lookup miss means "unsupported on this backend" and is reported to the
//! caller as `None`, never as a failure here.

use tracing::debug;

use crate::backend::BackendDataType;
use crate::graph::DataType;

const UNQUANTIZED: &[(DataType, BackendDataType)] = &[
    (DataType::Int8, BackendDataType::Int8),
    (DataType::Int16, BackendDataType::Int16),
    (DataType::Int32, BackendDataType::Int32),
    (DataType::Int64, BackendDataType::Int64),
    (DataType::Uint8, BackendDataType::Uint8),
    (DataType::Uint16, BackendDataType::Uint16),
    (DataType::Uint32, BackendDataType::Uint32),
    (DataType::Uint64, BackendDataType::Uint64),
    (DataType::Float16, BackendDataType::Float16),
    (DataType::Float32, BackendDataType::Float32),
    (DataType::Bool, BackendDataType::Bool8),
];

const QUANTIZED: &[(DataType, BackendDataType)] = &[
    (DataType::Int8, BackendDataType::SFixed8),
    (DataType::Int16, BackendDataType::SFixed16),
    (DataType::Int32, BackendDataType::SFixed32),
    (DataType::Int64, BackendDataType::Int64),
    (DataType::Uint8, BackendDataType::UFixed8),
    (DataType::Uint16, BackendDataType::UFixed16),
    (DataType::Uint32, BackendDataType::UFixed32),
    (DataType::Uint64, BackendDataType::Uint64),
    (DataType::Float16, BackendDataType::Float16),
    (DataType::Float32, BackendDataType::Float32),
    (DataType::Bool, BackendDataType::Bool8),
];

/// Map a portable element type to the backend type, using the fixed-point
/// table when lowering a quantized graph.
pub fn map_data_type(data_type: DataType, quantized: bool) -> Option<BackendDataType> {
    let table = if quantized { QUANTIZED } else { UNQUANTIZED };
    let mapped = table
        .iter()
        .find(|(portable, _)| *portable == data_type)
        .map(|(_, backend)| *backend);
    if mapped.is_none() {
        debug!(?data_type, quantized, "data type not supported by the NPU backend");
    }
    mapped
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[DataType] = &[
        DataType::Int8,
        DataType::Int16,
        DataType::Int32,
        DataType::Int64,
        DataType::Uint8,
        DataType::Uint16,
        DataType::Uint32,
        DataType::Uint64,
        DataType::Float16,
        DataType::Float32,
        DataType::Bool,
    ];

    #[test]
    fn every_portable_type_maps_unquantized() {
        for &dt in ALL {
            assert!(map_data_type(dt, false).is_some(), "{dt:?}");
        }
    }

    #[test]
    fn every_portable_type_maps_quantized() {
        for &dt in ALL {
            assert!(map_data_type(dt, true).is_some(), "{dt:?}");
        }
    }

    #[test]
    fn quantized_table_uses_fixed_point() {
        assert_eq!(
            map_data_type(DataType::Int8, true),
            Some(BackendDataType::SFixed8)
        );
        assert_eq!(
            map_data_type(DataType::Uint16, true),
            Some(BackendDataType::UFixed16)
        );
        // 64-bit and float types pass through unchanged under quantization.
        assert_eq!(
            map_data_type(DataType::Int64, true),
            Some(BackendDataType::Int64)
        );
        assert_eq!(
            map_data_type(DataType::Float32, true),
            Some(BackendDataType::Float32)
        );
    }

    #[test]
    fn unquantized_table_is_identity_like() {
        assert_eq!(
            map_data_type(DataType::Int8, false),
            Some(BackendDataType::Int8)
        );
        assert_eq!(
            map_data_type(DataType::Bool, false),
            Some(BackendDataType::Bool8)
        );
    }
}
