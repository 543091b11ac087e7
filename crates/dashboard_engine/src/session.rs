use std::sync::Arc;

use dashboard_core::{DashboardState, Msg, OperationStatus};

use crate::{
    cancel_operation, clear_output, dispatch, load_config, load_environments, load_modules,
    run_operation, ApiError, ApiSettings, Backend, OperationRequest, ReqwestBackend,
};

/// Outcome of [`DashboardSession::load_all`], one flag per resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub config: bool,
    pub modules: bool,
    pub environments: bool,
}

impl LoadReport {
    pub fn all_loaded(&self) -> bool {
        self.config && self.modules && self.environments
    }
}

/// One dashboard session: the state the UI renders plus the backend it talks to.
///
/// Dropping the session drops every subscriber registered on its state.
pub struct DashboardSession {
    state: Arc<DashboardState>,
    backend: Arc<dyn Backend>,
}

impl DashboardSession {
    pub fn open(settings: ApiSettings) -> Result<Self, ApiError> {
        let backend = ReqwestBackend::new(settings)?;
        Ok(Self::with_backend(Arc::new(backend)))
    }

    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        Self {
            state: Arc::new(DashboardState::new()),
            backend,
        }
    }

    pub fn state(&self) -> &Arc<DashboardState> {
        &self.state
    }

    pub async fn load_config(&self) -> bool {
        load_config(&self.state, self.backend.as_ref()).await
    }

    pub async fn load_modules(&self) -> bool {
        load_modules(&self.state, self.backend.as_ref()).await
    }

    pub async fn load_environments(&self) -> bool {
        load_environments(&self.state, self.backend.as_ref()).await
    }

    /// Run the three loaders one after another.
    pub async fn load_all(&self) -> LoadReport {
        LoadReport {
            config: self.load_config().await,
            modules: self.load_modules().await,
            environments: self.load_environments().await,
        }
    }

    pub async fn run(&self, request: &OperationRequest) -> OperationStatus {
        run_operation(&self.state, self.backend.as_ref(), request).await
    }

    pub async fn cancel(&self) {
        cancel_operation(&self.state, self.backend.as_ref()).await;
    }

    pub fn clear_output(&self) {
        clear_output(&self.state);
    }

    /// Forward a UI message, running any backend request it triggers.
    pub async fn dispatch(&self, msg: Msg) {
        dispatch(&self.state, self.backend.as_ref(), msg).await;
    }

    pub fn close(self) {}
}

impl Drop for DashboardSession {
    fn drop(&mut self) {
        self.state.teardown();
    }
}
