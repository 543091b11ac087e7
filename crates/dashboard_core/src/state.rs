use std::collections::BTreeSet;

use serde_json::Value;

use crate::store::Store;
use crate::view_model::DashboardView;
use crate::{ActiveOperation, Module, OperationStatus, Tenant};

/// All dashboard state, owned by one session and shared by reference with the rendering layer.
#[derive(Debug, Default)]
pub struct DashboardState {
    config: Store<Option<Value>>,
    modules: Store<Vec<Module>>,
    tenants: Store<Vec<Tenant>>,
    deployments: Store<Vec<String>>,
    categories: Store<BTreeSet<String>>,
    output_lines: Store<Vec<String>>,
    operation_status: Store<OperationStatus>,
    active_operation: Store<Option<ActiveOperation>>,
    current_operation_id: Store<Option<String>>,
    sidebar_collapsed: Store<bool>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &Store<Option<Value>> {
        &self.config
    }

    pub fn modules(&self) -> &Store<Vec<Module>> {
        &self.modules
    }

    pub fn tenants(&self) -> &Store<Vec<Tenant>> {
        &self.tenants
    }

    pub fn deployments(&self) -> &Store<Vec<String>> {
        &self.deployments
    }

    pub fn categories(&self) -> &Store<BTreeSet<String>> {
        &self.categories
    }

    pub fn output_lines(&self) -> &Store<Vec<String>> {
        &self.output_lines
    }

    pub fn operation_status(&self) -> &Store<OperationStatus> {
        &self.operation_status
    }

    pub fn active_operation(&self) -> &Store<Option<ActiveOperation>> {
        &self.active_operation
    }

    pub fn current_operation_id(&self) -> &Store<Option<String>> {
        &self.current_operation_id
    }

    pub fn sidebar_collapsed(&self) -> &Store<bool> {
        &self.sidebar_collapsed
    }

    pub fn view(&self) -> DashboardView {
        let status = self.operation_status.get();
        let operation_id = self.current_operation_id.get();
        DashboardView {
            config_loaded: self.config.with(Option::is_some),
            deployments: self.deployments.get(),
            categories: self.categories.with(|cats| cats.iter().cloned().collect()),
            module_count: self.modules.with(Vec::len),
            tenant_count: self.tenants.with(Vec::len),
            output_lines: self.output_lines.get(),
            status,
            active_operation: self.active_operation.get(),
            can_cancel: operation_id.is_some() && status == OperationStatus::Running,
            operation_id,
            sidebar_collapsed: self.sidebar_collapsed.get(),
        }
    }

    /// Drop every subscriber; values are left as they are.
    pub fn teardown(&self) {
        self.config.clear_subscribers();
        self.modules.clear_subscribers();
        self.tenants.clear_subscribers();
        self.deployments.clear_subscribers();
        self.categories.clear_subscribers();
        self.output_lines.clear_subscribers();
        self.operation_status.clear_subscribers();
        self.active_operation.clear_subscribers();
        self.current_operation_id.clear_subscribers();
        self.sidebar_collapsed.clear_subscribers();
    }

    pub(crate) fn push_output(&self, line: impl Into<String>) {
        let line = line.into();
        self.output_lines.update(|lines| lines.push(line));
    }
}
