use dashboard_core::{update, ActiveOperation, DashboardState, Msg, OperationKind, OperationStatus};
use dashboard_logging::{dashboard_error, dashboard_info};
use serde::Serialize;

use crate::{consume_stream, Backend, Endpoints};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest {
    pub deployment: String,
    pub category: String,
    pub module: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_environment: Option<String>,
    pub managed: bool,
    pub upgrade: bool,
}

impl DeployRequest {
    /// Managed, non-upgrade deployment to the module's default target.
    pub fn new(
        deployment: impl Into<String>,
        category: impl Into<String>,
        module: impl Into<String>,
    ) -> Self {
        Self {
            deployment: deployment.into(),
            category: category.into(),
            module: module.into(),
            target_environment: None,
            managed: true,
            upgrade: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncRequest {
    pub deployment: String,
    pub category: String,
    pub module: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateVersionRequest {
    pub deployment: String,
    pub category: String,
    pub module: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShipRequest {
    pub tenant: String,
    pub environment: String,
    pub category: String,
    pub module: String,
    pub managed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateModuleRequest {
    pub category: String,
    pub module_name: String,
    pub deployment: String,
    pub source_environment: String,
    pub target_environments: Vec<String>,
    /// Deploy to the source environment right after scaffolding.
    pub deploy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseRequest {
    pub category: String,
    pub module: String,
}

/// Any request that starts a streamed backend operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OperationRequest {
    Deploy(DeployRequest),
    Sync(SyncRequest),
    UpdateVersion(UpdateVersionRequest),
    Ship(ShipRequest),
    CreateModule(CreateModuleRequest),
    CreateRelease(ReleaseRequest),
}

impl OperationRequest {
    pub fn kind(&self) -> OperationKind {
        match self {
            OperationRequest::Deploy(_) => OperationKind::Deploy,
            OperationRequest::Sync(_) => OperationKind::Sync,
            OperationRequest::UpdateVersion(_) => OperationKind::UpdateVersion,
            OperationRequest::Ship(_) => OperationKind::Ship,
            OperationRequest::CreateModule(_) => OperationKind::CreateModule,
            OperationRequest::CreateRelease(_) => OperationKind::CreateRelease,
        }
    }

    pub fn endpoint<'a>(&self, endpoints: &'a Endpoints) -> &'a str {
        match self {
            OperationRequest::Deploy(_) => endpoints.deploy.as_str(),
            OperationRequest::Sync(_) => endpoints.sync.as_str(),
            OperationRequest::UpdateVersion(_) => endpoints.version.as_str(),
            OperationRequest::Ship(_) => endpoints.ship.as_str(),
            OperationRequest::CreateModule(_) => endpoints.create_module.as_str(),
            OperationRequest::CreateRelease(_) => endpoints.release.as_str(),
        }
    }

    fn active_operation(&self) -> ActiveOperation {
        let (category, module) = match self {
            OperationRequest::Deploy(req) => (&req.category, &req.module),
            OperationRequest::Sync(req) => (&req.category, &req.module),
            OperationRequest::UpdateVersion(req) => (&req.category, &req.module),
            OperationRequest::Ship(req) => (&req.category, &req.module),
            OperationRequest::CreateModule(req) => (&req.category, &req.module_name),
            OperationRequest::CreateRelease(req) => (&req.category, &req.module),
        };
        ActiveOperation {
            kind: self.kind(),
            category: category.clone(),
            module: module.clone(),
        }
    }
}

/// Start an operation and stream its output into `state` until the backend closes the stream.
///
/// Returns the status the operation ended in.
pub async fn run_operation(
    state: &DashboardState,
    backend: &dyn Backend,
    request: &OperationRequest,
) -> OperationStatus {
    update(state, Msg::ClearOutputClicked);

    let body = match serde_json::to_value(request) {
        Ok(body) => body,
        Err(err) => {
            update(
                state,
                Msg::OperationRejected {
                    message: err.to_string(),
                },
            );
            return state.operation_status().get();
        }
    };

    let path = request.endpoint(backend.endpoints());
    dashboard_info!("Starting {} via {}", request.kind(), path);
    match backend.post_stream(path, &body).await {
        Ok(stream) => {
            update(
                state,
                Msg::OperationStarted {
                    operation: request.active_operation(),
                    operation_id: stream.operation_id,
                },
            );
            consume_stream(state, stream.body).await;
        }
        Err(err) => {
            dashboard_error!("Failed to start {}: {}", request.kind(), err);
            update(
                state,
                Msg::OperationRejected {
                    message: err.to_string(),
                },
            );
        }
    }
    state.operation_status().get()
}
