//! Credential models attached to outbound requests.

pub mod bearer;
pub mod credentials;

pub use bearer::*;
pub use credentials::*;
