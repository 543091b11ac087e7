use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Module record as listed by the backend.
///
/// Only `category` is required. The backend copies the other fields out of
/// hand-edited config, so a null or wrong-typed value reads as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub category: String,
    #[serde(default, deserialize_with = "string_or_none", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_none", skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    #[serde(default, deserialize_with = "string_or_none", skip_serializing_if = "Option::is_none")]
    pub deployment: Option<String>,
    #[serde(default, deserialize_with = "string_or_none", skip_serializing_if = "Option::is_none")]
    pub source_environment: Option<String>,
    #[serde(default, deserialize_with = "string_or_none", skip_serializing_if = "Option::is_none")]
    pub source_environment_key: Option<String>,
    #[serde(default, deserialize_with = "strings_or_empty", skip_serializing_if = "Vec::is_empty")]
    pub target_environments: Vec<String>,
    #[serde(default, deserialize_with = "strings_or_empty", skip_serializing_if = "Vec::is_empty")]
    pub target_environment_keys: Vec<String>,
    /// Fields this client does not interpret, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Module {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: None,
            tenant: None,
            deployment: None,
            source_environment: None,
            source_environment_key: None,
            target_environments: Vec::new(),
            target_environment_keys: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn named(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(category)
        }
    }
}

fn string_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

// Non-string entries are dropped; anything but an array is an empty list.
fn strings_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Distinct categories across a module list.
pub fn categories_of(modules: &[Module]) -> BTreeSet<String> {
    modules.iter().map(|module| module.category.clone()).collect()
}

/// Keys of the configuration's `deployments` mapping, in the order the backend sent them.
pub fn deployment_names(config: &Value) -> Vec<String> {
    config
        .get("deployments")
        .and_then(Value::as_object)
        .map(|deployments| deployments.keys().cloned().collect())
        .unwrap_or_default()
}

/// Tenant record. Held verbatim; the accessors read the documented shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tenant(pub Value);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TenantDeployment {
    pub name: String,
    #[serde(default)]
    pub environments: Vec<EnvironmentRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnvironmentRef {
    pub key: String,
    pub name: String,
}

impl Tenant {
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Deployments under this tenant; empty when the record does not follow the documented shape.
    pub fn deployments(&self) -> Vec<TenantDeployment> {
        self.0
            .get("deployments")
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    #[default]
    Idle,
    Running,
    Success,
    Error,
    Cancelled,
    Cancelling,
}

impl OperationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationStatus::Idle => "idle",
            OperationStatus::Running => "running",
            OperationStatus::Success => "success",
            OperationStatus::Error => "error",
            OperationStatus::Cancelled => "cancelled",
            OperationStatus::Cancelling => "cancelling",
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Long-running backend operations the dashboard can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    Deploy,
    Sync,
    UpdateVersion,
    Ship,
    CreateModule,
    CreateRelease,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OperationKind::Deploy => "deploy",
            OperationKind::Sync => "sync",
            OperationKind::UpdateVersion => "update version",
            OperationKind::Ship => "ship",
            OperationKind::CreateModule => "create module",
            OperationKind::CreateRelease => "create release",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveOperation {
    pub kind: OperationKind,
    pub category: String,
    pub module: String,
}
