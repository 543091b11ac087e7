#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST a cancel request for the given operation.
    RequestCancel { operation_id: String },
}
