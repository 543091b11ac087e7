//! Dashboard core: observable state cells, data model and the message-driven update function.
mod effect;
mod event;
mod model;
mod msg;
mod state;
mod store;
mod update;
mod view_model;

pub use effect::Effect;
pub use event::{SseLine, StreamEvent, DATA_PREFIX};
pub use model::{
    categories_of, deployment_names, ActiveOperation, EnvironmentRef, Module, OperationKind,
    OperationStatus, Tenant, TenantDeployment,
};
pub use msg::Msg;
pub use state::DashboardState;
pub use store::{Listener, Store, Subscription};
pub use update::update;
pub use view_model::DashboardView;
