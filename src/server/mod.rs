//! Serving glue: a small HTTP service that exposes the generated client for
//! download. Excluded from the generation core; it only reads the route
//! registry at request time.

pub mod http_server;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use service::ClientCodeService;
