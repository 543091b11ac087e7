use std::collections::VecDeque;

use dashboard_core::{update, DashboardState, Effect, Msg};
use dashboard_logging::{dashboard_error, dashboard_info};
use serde_json::{json, Value};

use crate::Backend;

/// Reset output, active operation, status and operation id.
pub fn clear_output(state: &DashboardState) {
    update(state, Msg::ClearOutputClicked);
}

/// Ask the backend to cancel the current operation.
///
/// Without a recorded operation id this only logs a warning and sends
/// nothing. The local stream reader keeps running until the backend closes
/// the stream.
pub async fn cancel_operation(state: &DashboardState, backend: &dyn Backend) {
    dispatch(state, backend, Msg::CancelClicked).await;
}

/// Apply a message and run the effects it produces until none remain.
pub async fn dispatch(state: &DashboardState, backend: &dyn Backend, msg: Msg) {
    let mut queue: VecDeque<Effect> = update(state, msg).into();
    while let Some(effect) = queue.pop_front() {
        let outcome = run_effect(backend, effect).await;
        queue.extend(update(state, outcome));
    }
}

async fn run_effect(backend: &dyn Backend, effect: Effect) -> Msg {
    match effect {
        Effect::RequestCancel { operation_id } => {
            dashboard_info!("Requesting cancel of operation {}", operation_id);
            let body = json!({ "operationId": operation_id });
            match backend.post_json(&backend.endpoints().cancel, &body).await {
                Ok(answer) => cancel_answer(&answer),
                Err(err) => {
                    dashboard_error!("Cancel request failed: {}", err);
                    Msg::CancelFailed {
                        message: err.to_string(),
                    }
                }
            }
        }
    }
}

fn cancel_answer(answer: &Value) -> Msg {
    let success = answer.get("success").and_then(Value::as_bool) == Some(true);
    let message = match answer.get("message") {
        Some(Value::String(message)) => Some(message.clone()),
        None | Some(Value::Null) => None,
        Some(other) => Some(other.to_string()),
    };
    Msg::CancelAnswered { success, message }
}
