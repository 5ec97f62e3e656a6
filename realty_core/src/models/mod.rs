pub mod lead;
pub mod post;
pub mod request;

pub use lead::*;
pub use post::*;
pub use request::{ApiResponse, InputUpdate, OpenSessionRequest};
