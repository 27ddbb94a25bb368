//! # routesmith
//!
//! **routesmith** generates a typed, async Rust client from a service's
//! route registry: serde models for every distinct schema shape, one
//! `async fn` per route, and a client struct over a shared
//! [`reqwest`](https://docs.rs/reqwest) transport, all in a single source
//! unit.
//!
//! ## Architecture
//!
//! - **[`registry`]** - the normalized route/schema data model, the
//!   extractor that validates it, and the service-description loader
//! - **[`generator`]** - schema-to-Rust type mapping, method rendering, and
//!   client assembly (Askama templates under `templates/`)
//! - **[`diagnostics`]** - non-fatal warning records for degraded mappings
//! - **[`server`]** - glue endpoint serving the generated unit for download
//! - **[`fetch`]** - glue command writing a served unit to a local file
//! - **[`cli`]** - the `routesmith` binary: `generate`, `serve`, `fetch`
//!
//! ## Generation Flow
//!
//! ```text
//! service description → extract_routes → schema mapping → method rendering → client unit
//! ```
//!
//! The engine is synchronous and side-effect-free: all naming state lives in
//! a per-run [`generator::GeneratorContext`], so repeated or concurrent runs
//! cannot interfere, and equal inputs produce byte-identical output. Only
//! the *generated* methods are async; no network call happens at generation
//! time.
//!
//! ## Quick Start
//!
//! ```no_run
//! use routesmith::generator::generate_from_description;
//! use routesmith::registry::load_description;
//!
//! # fn main() -> anyhow::Result<()> {
//! let description = load_description(std::path::Path::new("service.yaml"))?;
//! let (source, diagnostics) = generate_from_description(&description, None)?;
//! std::fs::write("client.rs", source)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Model
//!
//! Ambiguous route identity (duplicate `(method, path)`, colliding parameter
//! names, unbound path placeholders) is a fatal
//! [`registry::ExtractionError`]: either the whole client is generated or
//! nothing is. Unrecognized schema shapes are never fatal; the affected
//! field degrades to `serde_json::Value` and the run records a
//! [`diagnostics::Diagnostic`].

pub mod cli;
pub mod diagnostics;
pub mod fetch;
pub mod generator;
pub mod registry;
pub mod server;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use generator::{assemble, generate_from_description, render_client, ClientSpec};
pub use registry::{
    extract_routes, load_description, parse_description, ExtractionError, ParamSpec,
    RouteDescriptor, RouteRegistry, SchemaIndex, SchemaNode, SchemaRef, SchemaSource,
    ServiceDescription,
};
