use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Configuration document fetched from the backend.
    ConfigLoaded(Value),
    /// Module list fetched from the backend.
    ModulesLoaded(Vec<crate::Module>),
    /// Tenant topology fetched from the backend.
    EnvironmentsLoaded(Vec<crate::Tenant>),
    /// Backend accepted an operation and is about to stream its output.
    OperationStarted {
        operation: crate::ActiveOperation,
        operation_id: Option<String>,
    },
    /// Backend refused to start an operation, or the request never reached it.
    OperationRejected { message: String },
    /// Decoded event from the operation stream.
    Stream(crate::StreamEvent),
    /// A `data:` line whose payload was not valid JSON.
    StreamLineMalformed { line: String },
    /// Reading the operation stream failed.
    StreamFailed { message: String },
    /// User clicked Cancel.
    CancelClicked,
    /// Backend answered the cancel request.
    CancelAnswered {
        success: bool,
        message: Option<String>,
    },
    /// Cancel request failed before an answer could be decoded.
    CancelFailed { message: String },
    /// User cleared the output pane.
    ClearOutputClicked,
    /// User toggled the sidebar.
    SidebarToggled,
}
