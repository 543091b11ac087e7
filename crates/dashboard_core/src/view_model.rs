use crate::{ActiveOperation, OperationStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardView {
    pub config_loaded: bool,
    pub deployments: Vec<String>,
    pub categories: Vec<String>,
    pub module_count: usize,
    pub tenant_count: usize,
    pub output_lines: Vec<String>,
    pub status: OperationStatus,
    pub active_operation: Option<ActiveOperation>,
    pub operation_id: Option<String>,
    /// Only a running operation with a known id can be cancelled.
    pub can_cancel: bool,
    pub sidebar_collapsed: bool,
}
