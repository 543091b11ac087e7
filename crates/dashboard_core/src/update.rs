use dashboard_logging::{dashboard_debug, dashboard_warn};
use serde_json::Number;

use crate::{
    categories_of, deployment_names, DashboardState, Effect, Msg, OperationStatus, StreamEvent,
};

/// Applies a message to the dashboard state and returns any effects the caller must run.
pub fn update(state: &DashboardState, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::ConfigLoaded(config) => {
            let names = deployment_names(&config);
            state.config().set(Some(config));
            state.deployments().set(names);
            Vec::new()
        }
        Msg::ModulesLoaded(modules) => {
            let categories = categories_of(&modules);
            state.modules().set(modules);
            state.categories().set(categories);
            Vec::new()
        }
        Msg::EnvironmentsLoaded(tenants) => {
            state.tenants().set(tenants);
            Vec::new()
        }
        Msg::OperationStarted {
            operation,
            operation_id,
        } => {
            state.output_lines().set(Vec::new());
            state.active_operation().set(Some(operation));
            state.current_operation_id().set(operation_id);
            state.operation_status().set(OperationStatus::Running);
            Vec::new()
        }
        Msg::OperationRejected { message } => {
            state.operation_status().set(OperationStatus::Error);
            state.push_output(format!("\n✗ Error: {message}"));
            Vec::new()
        }
        Msg::Stream(event) => {
            apply_stream_event(state, event);
            Vec::new()
        }
        Msg::StreamLineMalformed { line } => {
            state.push_output(format!("\n✗ Parse error: {line}"));
            Vec::new()
        }
        Msg::StreamFailed { message } => {
            state.operation_status().set(OperationStatus::Error);
            state.push_output(format!("\n✗ Stream error: {message}"));
            Vec::new()
        }
        Msg::CancelClicked => {
            let Some(operation_id) = state.current_operation_id().get() else {
                dashboard_warn!("No operation to cancel");
                return Vec::new();
            };
            state.operation_status().set(OperationStatus::Cancelling);
            state.push_output("\n⏸ Cancelling operation...");
            vec![Effect::RequestCancel { operation_id }]
        }
        Msg::CancelAnswered { success, message } => {
            if success {
                state.operation_status().set(OperationStatus::Cancelled);
                state.push_output("✗ Operation cancelled by user");
            } else {
                state.operation_status().set(OperationStatus::Error);
                let message = message.as_deref().unwrap_or("Unknown error");
                state.push_output(format!("✗ Failed to cancel: {message}"));
            }
            Vec::new()
        }
        Msg::CancelFailed { message } => {
            state.operation_status().set(OperationStatus::Error);
            state.push_output(format!("✗ Cancel error: {message}"));
            Vec::new()
        }
        Msg::ClearOutputClicked => {
            state.output_lines().set(Vec::new());
            state.active_operation().set(None);
            state.operation_status().set(OperationStatus::Idle);
            state.current_operation_id().set(None);
            Vec::new()
        }
        Msg::SidebarToggled => {
            state.sidebar_collapsed().update(|collapsed| *collapsed = !*collapsed);
            Vec::new()
        }
    }
}

fn apply_stream_event(state: &DashboardState, event: StreamEvent) {
    match event {
        StreamEvent::Output { line } => state.push_output(line),
        StreamEvent::Complete { exit_code } => {
            let succeeded = exit_code.as_ref().and_then(Number::as_f64) == Some(0.0);
            state.operation_status().set(if succeeded {
                OperationStatus::Success
            } else {
                OperationStatus::Error
            });
            let mark = if succeeded { '✓' } else { '✗' };
            let code = exit_code.map_or_else(|| "unknown".to_string(), |code| code.to_string());
            state.push_output(format!("\n{mark} Completed with exit code: {code}"));
        }
        StreamEvent::Error { message } => {
            state.operation_status().set(OperationStatus::Error);
            let message = message.as_deref().unwrap_or("Unknown error");
            state.push_output(format!("\n✗ Error: {message}"));
        }
        StreamEvent::Ignored { kind } => {
            dashboard_debug!("Ignoring stream event with type {:?}", kind);
        }
    }
}
