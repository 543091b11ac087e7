use dashboard_core::{update, DashboardState, Module, Msg, Tenant};
use dashboard_logging::{dashboard_debug, dashboard_error};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{ApiError, Backend, FailureKind};

/// Fetch the configuration and derive the deployment names. Returns `false`
/// and leaves state untouched on any failure.
pub async fn load_config(state: &DashboardState, backend: &dyn Backend) -> bool {
    match backend.get_json(&backend.endpoints().config).await {
        Ok(data) => {
            dashboard_debug!("Loaded config: {}", data);
            update(state, Msg::ConfigLoaded(data));
            true
        }
        Err(err) => {
            report_failure("config", &err);
            false
        }
    }
}

pub async fn load_modules(state: &DashboardState, backend: &dyn Backend) -> bool {
    let modules = backend
        .get_json(&backend.endpoints().modules)
        .await
        .and_then(|data| list_field::<Module>(&data, "modules"));
    match modules {
        Ok(modules) => {
            dashboard_debug!("Loaded {} modules", modules.len());
            update(state, Msg::ModulesLoaded(modules));
            true
        }
        Err(err) => {
            report_failure("modules", &err);
            false
        }
    }
}

pub async fn load_environments(state: &DashboardState, backend: &dyn Backend) -> bool {
    let tenants = backend
        .get_json(&backend.endpoints().environments)
        .await
        .and_then(|data| list_field::<Tenant>(&data, "tenants"));
    match tenants {
        Ok(tenants) => {
            dashboard_debug!("Loaded {} tenants", tenants.len());
            update(state, Msg::EnvironmentsLoaded(tenants));
            true
        }
        Err(err) => {
            report_failure("environments", &err);
            false
        }
    }
}

/// Decode `data[field]` as a list; an absent or null field is an empty list.
fn list_field<T: DeserializeOwned>(data: &Value, field: &str) -> Result<Vec<T>, ApiError> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(items) => serde_json::from_value(items.clone())
            .map_err(|err| ApiError::new(FailureKind::Decode, format!("{field}: {err}"))),
    }
}

fn report_failure(resource: &str, err: &ApiError) {
    match err.kind {
        FailureKind::HttpStatus(_) => dashboard_error!("Failed to load {}: {}", resource, err),
        _ => dashboard_error!("Error loading {} ({}): {}", resource, err.kind, err),
    }
}
