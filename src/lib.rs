//! BNet forwarding gateway library.

pub mod bnet;
pub mod config;
pub mod http;

pub use bnet::BNetClient;
pub use config::schema::GatewayConfig;
pub use http::HttpServer;
