pub mod ids;

pub use ids::{validate_identifier_value, FlowId, SessionId, StepId, UserId};
