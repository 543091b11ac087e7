use std::sync::Once;

use dashboard_core::{
    update, ActiveOperation, DashboardState, DashboardView, Effect, Msg, OperationKind,
    OperationStatus,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dashboard_logging::initialize_for_tests);
}

fn running_state(operation_id: Option<&str>) -> DashboardState {
    let state = DashboardState::new();
    update(
        &state,
        Msg::OperationStarted {
            operation: ActiveOperation {
                kind: OperationKind::Sync,
                category: "core".to_string(),
                module: "accounts".to_string(),
            },
            operation_id: operation_id.map(ToOwned::to_owned),
        },
    );
    state
}

#[test]
fn cancel_without_operation_id_emits_nothing() {
    init_logging();
    let state = running_state(None);
    let before = state.view();

    let effects = update(&state, Msg::CancelClicked);

    assert!(effects.is_empty());
    assert_eq!(state.view(), before);
}

#[test]
fn cancel_marks_cancelling_and_requests_backend() {
    init_logging();
    let state = running_state(Some("op-1"));

    let effects = update(&state, Msg::CancelClicked);

    assert_eq!(
        effects,
        vec![Effect::RequestCancel {
            operation_id: "op-1".to_string()
        }]
    );
    assert_eq!(state.operation_status().get(), OperationStatus::Cancelling);
    assert_eq!(
        state.output_lines().get(),
        vec!["\n⏸ Cancelling operation...".to_string()]
    );
}

#[test]
fn cancel_answers_drive_final_status() {
    init_logging();
    let state = running_state(Some("op-1"));
    update(&state, Msg::CancelClicked);

    update(
        &state,
        Msg::CancelAnswered {
            success: true,
            message: None,
        },
    );
    assert_eq!(state.operation_status().get(), OperationStatus::Cancelled);
    assert_eq!(
        state.output_lines().get().last().map(String::as_str),
        Some("✗ Operation cancelled by user")
    );

    update(
        &state,
        Msg::CancelAnswered {
            success: false,
            message: Some("operation not found".to_string()),
        },
    );
    assert_eq!(state.operation_status().get(), OperationStatus::Error);
    assert_eq!(
        state.output_lines().get().last().map(String::as_str),
        Some("✗ Failed to cancel: operation not found")
    );

    update(
        &state,
        Msg::CancelFailed {
            message: "network error".to_string(),
        },
    );
    assert_eq!(
        state.output_lines().get().last().map(String::as_str),
        Some("✗ Cancel error: network error")
    );
}

#[test]
fn clear_output_resets_all_transient_cells() {
    init_logging();
    let state = running_state(Some("op-3"));
    update(&state, Msg::CancelClicked);
    state.sidebar_collapsed().set(true);

    let effects = update(&state, Msg::ClearOutputClicked);
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(
        view,
        DashboardView {
            sidebar_collapsed: true,
            ..DashboardView::default()
        }
    );
}

#[test]
fn clear_output_on_fresh_state_is_idle() {
    init_logging();
    let state = DashboardState::new();

    update(&state, Msg::ClearOutputClicked);

    assert_eq!(state.view(), DashboardView::default());
}

#[test]
fn sidebar_toggle_flips_flag() {
    init_logging();
    let state = DashboardState::new();

    update(&state, Msg::SidebarToggled);
    assert!(state.sidebar_collapsed().get());
    update(&state, Msg::SidebarToggled);
    assert!(!state.sidebar_collapsed().get());
}
