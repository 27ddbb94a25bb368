//! # Generator Module
//!
//! Turns extracted route descriptors into the typed client unit.
//!
//! ## Pipeline
//!
//! ```text
//! Service description → Extractor → Schema mapping → Template rendering → Client unit
//! ```
//!
//! 1. **Schema mapping** ([`schema`]) - maps schema nodes to Rust types,
//!    deduplicating identical shapes into shared named declarations
//! 2. **Method rendering** ([`method`]) - renders one `async fn` per route
//! 3. **Assembly** ([`client`]) - concatenates declarations, the client
//!    type, and the methods into one self-contained source unit
//!
//! Rendering uses Askama templates from the `templates/` directory:
//!
//! - `model.rs.txt` - generated struct declarations
//! - `enum.rs.txt` - generated enumerations
//! - `method.rs.txt` - one client method
//! - `client.rs.txt` - the full unit
//!
//! All naming state (the NamedType registry, synthesized-name counters) lives
//! in a [`GeneratorContext`] owned by one generation run, so repeated or
//! concurrent runs cannot interfere with each other.

mod client;
mod method;
mod schema;
mod templates;

pub use client::*;
pub use method::*;
pub use schema::*;
pub use templates::*;
