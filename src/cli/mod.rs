//! # CLI Module
//!
//! Command-line interface for the routesmith generator and glue tools.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate a typed client from a service description:
//!
//! ```bash
//! routesmith generate --registry service.yaml --output client.rs
//! ```
//!
//! ### `serve`
//!
//! Serve the generated client for download:
//!
//! ```bash
//! routesmith serve --registry service.yaml --addr 0.0.0.0:8080
//! ```
//!
//! ### `fetch`
//!
//! Download a generated client from a running service:
//!
//! ```bash
//! routesmith fetch --url http://localhost:8080 --output client.rs
//! ```

mod commands;


pub use commands::{run_cli, Cli, Commands};
