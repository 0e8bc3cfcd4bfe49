//! BNet backend subsystem.
//!
//! # Data Flow
//! ```text
//! gateway handler
//!     → paths.rs (logical resource name → backend path)
//!     → client.rs (GET/POST with fail-fast timeout)
//!     → relay.rs (backend response → RelayedResponse)
//!     → back to the handler, returned to the caller
//! ```
//!
//! # Design Decisions
//! - One client handle, constructed at startup, immutable afterwards
//! - Every backend failure is normalized into a response value here;
//!   handlers never see a transport error
//! - The relay type owns buffered bytes, decoupled from the HTTP
//!   client's response type

pub mod client;
pub mod paths;
pub mod relay;

pub use client::BNetClient;
pub use paths::Resource;
pub use relay::RelayedResponse;
