// Workload Request Domain Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::aliases;
use super::{DomainError, Operation};

/// Parameters passed through to smallfile_cli.py via its YAML input file
///
/// Every optional field left as `None` is omitted from the YAML so that
/// smallfile applies its own default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmallfileParams {
    pub top: String,
    pub operation: Operation,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<u64>,
    /// KiB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_per_dir: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dirs_per_dir: Option<u64>,
    /// KiB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size_distribution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xattr_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xattr_count: Option<u64>,
    /// Microseconds between files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stonewall: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_into_dirs: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_dir: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fsync: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incompressible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanup_delay_usec_per_file: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permute_host_dirs: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_set: Option<String>,

    /// Options not modeled above, written to the YAML under their given key
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl SmallfileParams {
    pub fn new(top: impl Into<String>, operation: Operation) -> Self {
        Self {
            top: top.into(),
            operation,
            threads: None,
            files: None,
            file_size: None,
            files_per_dir: None,
            dirs_per_dir: None,
            record_size: None,
            file_size_distribution: None,
            xattr_size: None,
            xattr_count: None,
            pause: None,
            stonewall: None,
            finish: None,
            prefix: None,
            suffix: None,
            hash_into_dirs: None,
            same_dir: None,
            fsync: None,
            verify_read: None,
            incompressible: None,
            cleanup_delay_usec_per_file: None,
            permute_host_dirs: None,
            host_set: None,
            extra: BTreeMap::new(),
        }
    }

    /// Decode a mapping that may use smallfile's external key names
    /// (`file-size`) as well as the canonical ones (`file_size`).
    pub fn from_value(value: serde_yaml::Value) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_value(canonicalize_keys(value))
    }
}

fn canonicalize_keys(value: serde_yaml::Value) -> serde_yaml::Value {
    match value {
        serde_yaml::Value::Mapping(mapping) => serde_yaml::Value::Mapping(
            mapping
                .into_iter()
                .map(|(key, value)| match key {
                    serde_yaml::Value::String(name) => (
                        serde_yaml::Value::String(aliases::param_canonical_name(&name).to_string()),
                        value,
                    ),
                    other => (other, value),
                })
                .collect(),
        ),
        other => other,
    }
}

/// Input of the `workload` step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadParams {
    pub samples: u32,

    #[serde(rename = "SmallfileParams", deserialize_with = "deserialize_smallfile_params")]
    pub smallfile_params: SmallfileParams,

    /// Remove the files created by the run once results are collected
    #[serde(default = "default_cleanup")]
    pub cleanup: bool,
}

fn default_cleanup() -> bool {
    true
}

fn deserialize_smallfile_params<'de, D>(deserializer: D) -> Result<SmallfileParams, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    SmallfileParams::from_value(value).map_err(serde::de::Error::custom)
}

impl WorkloadParams {
    pub fn new(smallfile_params: SmallfileParams) -> Self {
        Self {
            samples: 1,
            smallfile_params,
            cleanup: true,
        }
    }

    /// Parse a request document (YAML, or JSON as a YAML subset)
    pub fn from_yaml_str(input: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(input)
    }

    /// Reject requests that cannot be handed to smallfile at all
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.smallfile_params.top.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "top directory must not be empty".to_string(),
            ));
        }

        if self.smallfile_params.top.contains('\0') {
            return Err(DomainError::ValidationError(
                "top directory contains a NUL byte".to_string(),
            ));
        }

        // smallfile runs from its install dir; a relative top would name a
        // different directory there than here
        if !Path::new(&self.smallfile_params.top).is_absolute() {
            return Err(DomainError::ValidationError(format!(
                "top directory must be an absolute path, got '{}'",
                self.smallfile_params.top
            )));
        }

        Ok(())
    }
}
