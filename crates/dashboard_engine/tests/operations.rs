use std::sync::Once;

use dashboard_core::{ActiveOperation, DashboardState, OperationKind, OperationStatus};
use dashboard_engine::{
    run_operation, ApiSettings, CreateModuleRequest, DeployRequest, OperationRequest,
    ReqwestBackend, ShipRequest, UpdateVersionRequest,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dashboard_logging::initialize_for_tests);
}

fn backend_for(server: &MockServer) -> ReqwestBackend {
    ReqwestBackend::new(ApiSettings::with_base_url(server.uri())).expect("backend")
}

fn sse_body(events: &[serde_json::Value]) -> String {
    events
        .iter()
        .map(|event| format!("data: {event}\n\n"))
        .collect()
}

#[tokio::test]
async fn deploy_streams_output_and_records_operation() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/deploy"))
        .and(body_json(json!({
            "deployment": "contoso",
            "category": "sales",
            "module": "quotes",
            "managed": true,
            "upgrade": false
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Operation-Id", "op-42")
                .set_body_raw(
                    sse_body(&[
                        json!({ "type": "output", "line": "Packing solution" }),
                        json!({ "type": "output", "line": "Importing" }),
                        json!({ "type": "complete", "exitCode": 0 }),
                    ]),
                    "text/event-stream",
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let state = DashboardState::new();
    state.output_lines().set(vec!["previous run".to_string()]);
    let request = OperationRequest::Deploy(DeployRequest::new("contoso", "sales", "quotes"));

    let status = run_operation(&state, &backend_for(&server), &request).await;

    assert_eq!(status, OperationStatus::Success);
    let view = state.view();
    assert_eq!(
        view.output_lines,
        vec![
            "Packing solution".to_string(),
            "Importing".to_string(),
            "\n✓ Completed with exit code: 0".to_string(),
        ]
    );
    assert_eq!(view.operation_id.as_deref(), Some("op-42"));
    assert_eq!(
        view.active_operation,
        Some(ActiveOperation {
            kind: OperationKind::Deploy,
            category: "sales".to_string(),
            module: "quotes".to_string(),
        })
    );
}

#[tokio::test]
async fn create_module_sends_camel_case_body() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/modules/create"))
        .and(body_json(json!({
            "category": "sales",
            "moduleName": "Price Lists",
            "deployment": "contoso",
            "sourceEnvironment": "dev",
            "targetEnvironments": ["test", "prod"],
            "deploy": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            sse_body(&[json!({ "type": "complete", "exitCode": 3 })]),
            "text/event-stream",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let state = DashboardState::new();
    let request = OperationRequest::CreateModule(CreateModuleRequest {
        category: "sales".to_string(),
        module_name: "Price Lists".to_string(),
        deployment: "contoso".to_string(),
        source_environment: "dev".to_string(),
        target_environments: vec!["test".to_string(), "prod".to_string()],
        deploy: false,
    });

    let status = run_operation(&state, &backend_for(&server), &request).await;

    assert_eq!(status, OperationStatus::Error);
    assert_eq!(state.current_operation_id().get(), None);
    assert_eq!(
        state.active_operation().get().map(|op| op.module),
        Some("Price Lists".to_string())
    );
}

#[tokio::test]
async fn rejected_start_reports_http_status() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ship"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let state = DashboardState::new();
    let request = OperationRequest::Ship(ShipRequest {
        tenant: "fabrikam".to_string(),
        environment: "prod".to_string(),
        category: "sales".to_string(),
        module: "quotes".to_string(),
        managed: true,
    });

    let status = run_operation(&state, &backend_for(&server), &request).await;

    assert_eq!(status, OperationStatus::Error);
    assert_eq!(
        state.output_lines().get(),
        vec!["\n✗ Error: HTTP 400 Bad Request".to_string()]
    );
    assert_eq!(state.active_operation().get(), None);
}

#[tokio::test]
async fn backend_error_event_ends_operation_in_error() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/version"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            sse_body(&[json!({ "type": "error", "message": "pwsh not found" })]),
            "text/event-stream",
        ))
        .mount(&server)
        .await;

    let state = DashboardState::new();
    let request = OperationRequest::UpdateVersion(UpdateVersionRequest {
        deployment: "contoso".to_string(),
        category: "core".to_string(),
        module: "accounts".to_string(),
        version: "1.2.0.0".to_string(),
    });

    let status = run_operation(&state, &backend_for(&server), &request).await;

    assert_eq!(status, OperationStatus::Error);
    assert_eq!(
        state.output_lines().get(),
        vec!["\n✗ Error: pwsh not found".to_string()]
    );
}

#[test]
fn deploy_body_omits_unset_target_environment() {
    let mut request = DeployRequest::new("contoso", "sales", "quotes");
    let body = serde_json::to_value(OperationRequest::Deploy(request.clone())).unwrap();
    assert!(body.get("targetEnvironment").is_none());

    request.target_environment = Some("test".to_string());
    request.upgrade = true;
    let body = serde_json::to_value(OperationRequest::Deploy(request)).unwrap();
    assert_eq!(body["targetEnvironment"], "test");
    assert_eq!(body["upgrade"], true);
}
