//! Dashboard engine: backend IO, SSE consumption and session wiring.
mod backend;
mod controls;
mod loaders;
mod operations;
mod session;
mod settings;
mod sse;
mod stream;
mod types;

pub use backend::{Backend, ByteStream, OperationStream, ReqwestBackend, OPERATION_ID_HEADER};
pub use controls::{cancel_operation, clear_output, dispatch};
pub use loaders::{load_config, load_environments, load_modules};
pub use operations::{
    run_operation, CreateModuleRequest, DeployRequest, OperationRequest, ReleaseRequest,
    ShipRequest, SyncRequest, UpdateVersionRequest,
};
pub use session::{DashboardSession, LoadReport};
pub use settings::{ApiSettings, Endpoints};
pub use sse::SseLineDecoder;
pub use stream::consume_stream;
pub use types::{ApiError, FailureKind};
