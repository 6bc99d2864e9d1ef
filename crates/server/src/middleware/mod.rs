//! Tower middleware shared by every route.

pub mod request_id;
pub mod timeout;

pub use request_id::{request_id_layers, request_span, MakeUuidRequestId, X_REQUEST_ID};
pub use timeout::request_timeout_middleware;
