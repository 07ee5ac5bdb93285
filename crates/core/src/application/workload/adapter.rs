// Parameter Adapter - SmallfileParams -> smallfile YAML input

use serde_yaml::Value;
use std::collections::BTreeMap;

use crate::domain::aliases;
use crate::domain::{Operation, SmallfileParams};
use crate::error::{AppError, Result};

/// Flat key/value mapping handed to smallfile_cli.py via --yaml-input-file
///
/// Keys are smallfile's external names. Fields absent from the request are
/// absent here too.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfiguration {
    entries: BTreeMap<String, Value>,
}

impl RunConfiguration {
    pub fn from_params(params: &SmallfileParams) -> Result<Self> {
        let mapping = match serde_yaml::to_value(params)? {
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(AppError::Parse(format!(
                    "smallfile parameters did not serialize to a mapping: {:?}",
                    other
                )))
            }
        };

        let mut entries = BTreeMap::new();
        for (key, value) in mapping {
            let field = match key {
                Value::String(field) => field,
                other => {
                    return Err(AppError::Parse(format!(
                        "non-string parameter key: {:?}",
                        other
                    )))
                }
            };

            if value.is_null() {
                continue;
            }

            let value = match value {
                Value::Bool(flag) if aliases::is_flag_param(&field) => {
                    Value::String(if flag { "Y" } else { "N" }.to_string())
                }
                other => other,
            };

            entries.insert(aliases::param_external_name(&field).to_string(), value);
        }

        Ok(Self { entries })
    }

    /// Same configuration with only the operation replaced
    ///
    /// Used for the cleanup pass, which must see the thread count, file
    /// size etc. of the original run to find its files.
    pub fn with_operation(&self, operation: Operation) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(
            "operation".to_string(),
            Value::String(operation.as_str().to_string()),
        );
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.entries)?)
    }
}
