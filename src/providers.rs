//! Session-options surface for execution-provider registration.
//!
//! Providers compiled out of the build keep their append functions as stubs
//! returning a "not enabled in this build" status, so callers get a clear
//! configuration error instead of a generic failure.

use std::collections::HashMap;

use tracing::warn;

use crate::error::{LowerError, LowerResult};

/// Options accumulated before session creation: the ordered provider list
/// and per-provider option maps.
#[derive(Debug, Default)]
pub struct SessionOptions {
    providers: Vec<&'static str>,
    provider_options: HashMap<&'static str, HashMap<String, String>>,
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn providers(&self) -> &[&'static str] {
        &self.providers
    }

    pub fn provider_options(&self, provider: &str) -> Option<&HashMap<String, String>> {
        self.provider_options.get(provider)
    }

    fn append(&mut self, provider: &'static str, options: HashMap<String, String>) {
        self.providers.push(provider);
        self.provider_options.insert(provider, options);
    }
}

fn not_enabled(provider: &'static str) -> LowerError {
    LowerError::ProviderNotEnabled { provider }
}

macro_rules! provider_append {
    ($fn_name:ident, $feature:literal, $provider:literal) => {
        #[cfg(feature = $feature)]
        pub fn $fn_name(
            options: &mut SessionOptions,
            provider_options: HashMap<String, String>,
        ) -> LowerResult<()> {
            options.append($provider, provider_options);
            Ok(())
        }

        #[cfg(not(feature = $feature))]
        pub fn $fn_name(
            _options: &mut SessionOptions,
            _provider_options: HashMap<String, String>,
        ) -> LowerResult<()> {
            Err(not_enabled($provider))
        }
    };
}

provider_append!(append_execution_provider_npu, "npu", "NPU");
provider_append!(append_execution_provider_tensorrt, "tensorrt", "TensorRT");
provider_append!(append_execution_provider_cuda, "cuda", "CUDA");
provider_append!(append_execution_provider_rocm, "rocm", "ROCM");
provider_append!(append_execution_provider_openvino, "openvino", "OpenVINO");
provider_append!(append_execution_provider_migraphx, "migraphx", "MIGraphX");
provider_append!(append_execution_provider_nnapi, "nnapi", "NNAPI");
provider_append!(append_execution_provider_dml, "dml", "DML");
provider_append!(append_execution_provider_snpe, "snpe", "SNPE");
provider_append!(append_execution_provider_xnnpack, "xnnpack", "XNNPACK");

/// Profiling granularity of the NPU provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfilingLevel {
    #[default]
    Off,
    Basic,
    Detailed,
}

/// Runtime options of the NPU provider, parsed from the provider option map.
#[derive(Debug, Clone, Default)]
pub struct NpuProviderOptions {
    pub backend_path: Option<String>,
    pub profiling_level: ProfilingLevel,
    pub rpc_control_latency: Option<u32>,
}

impl NpuProviderOptions {
    /// Case-insensitive parse. An invalid profiling level logs a warning and
    /// falls back to `Off`; an unparsable latency is ignored the same way.
    pub fn from_map(options: &HashMap<String, String>) -> Self {
        let mut parsed = NpuProviderOptions::default();

        if let Some(path) = options.get("backend_path") {
            parsed.backend_path = Some(path.clone());
        }

        if let Some(level) = options.get("profiling_level") {
            parsed.profiling_level = match level.to_ascii_lowercase().as_str() {
                "off" => ProfilingLevel::Off,
                "basic" => ProfilingLevel::Basic,
                "detailed" => ProfilingLevel::Detailed,
                other => {
                    warn!(profiling_level = other, "profiling level not valid");
                    ProfilingLevel::Off
                }
            };
        }

        if let Some(latency) = options.get("rpc_control_latency") {
            match latency.parse::<u32>() {
                Ok(value) => parsed.rpc_control_latency = Some(value),
                Err(_) => warn!(rpc_control_latency = %latency, "rpc control latency not valid"),
            }
        }

        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "tensorrt"))]
    #[test]
    fn disabled_provider_stub_names_the_provider() {
        // TensorRT is off by default in this build.
        let mut options = SessionOptions::new();
        let err =
            append_execution_provider_tensorrt(&mut options, HashMap::new()).unwrap_err();
        let message = err.to_string();
        assert_eq!(
            message,
            "TensorRT execution provider is not enabled in this build."
        );
        assert!(options.providers().is_empty());
    }

    #[cfg(feature = "npu")]
    #[test]
    fn enabled_provider_is_appended() {
        let mut options = SessionOptions::new();
        let mut provider_options = HashMap::new();
        provider_options.insert("profiling_level".to_string(), "basic".to_string());
        append_execution_provider_npu(&mut options, provider_options).unwrap();
        assert_eq!(options.providers(), &["NPU"]);
        assert!(options.provider_options("NPU").is_some());
    }

    #[test]
    fn profiling_level_parses_case_insensitively() {
        let mut map = HashMap::new();
        map.insert("profiling_level".to_string(), "DeTaiLeD".to_string());
        let parsed = NpuProviderOptions::from_map(&map);
        assert_eq!(parsed.profiling_level, ProfilingLevel::Detailed);
    }

    #[test]
    fn invalid_profiling_level_falls_back_to_off() {
        let mut map = HashMap::new();
        map.insert("profiling_level".to_string(), "verbose".to_string());
        let parsed = NpuProviderOptions::from_map(&map);
        assert_eq!(parsed.profiling_level, ProfilingLevel::Off);
    }

    #[test]
    fn npu_options_parse_latency_and_path() {
        let mut map = HashMap::new();
        map.insert("backend_path".to_string(), "/opt/npu/libbackend.so".to_string());
        map.insert("rpc_control_latency".to_string(), "10".to_string());
        let parsed = NpuProviderOptions::from_map(&map);
        assert_eq!(parsed.backend_path.as_deref(), Some("/opt/npu/libbackend.so"));
        assert_eq!(parsed.rpc_control_latency, Some(10));
    }
}
