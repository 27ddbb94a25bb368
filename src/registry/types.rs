use http::Method;
use serde_json::Value;
use std::collections::HashMap;

/// Where a declared parameter lives in the request.
///
/// Body payloads are carried separately on [`RouteEntry`]; the classification
/// here is taken verbatim from the source registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Path,
    Query,
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "Path"),
            ParameterLocation::Query => write!(f, "Query"),
        }
    }
}

/// Primitive schema kinds and their fixed Rust mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Integer,
    Number,
    Boolean,
    Null,
}

/// One field of an object schema. Field order is declaration order and is
/// significant: it feeds both the structural signature and the emitted
/// struct.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub schema: SchemaRef,
}

/// Normalized representation of a data shape.
///
/// `Unknown` carries shapes the loader did not recognize so the mapper can
/// degrade that one field instead of aborting the run.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Primitive(PrimitiveKind),
    Object {
        name: Option<String>,
        fields: Vec<FieldSpec>,
    },
    Array(SchemaRef),
    Optional(SchemaRef),
    Enum {
        name: Option<String>,
        values: Vec<String>,
    },
    Unknown(Value),
}

/// Reference to a schema node: inline, or a string index into a
/// [`SchemaIndex`]. Named references are how self-referential schemas avoid
/// a cyclic object graph.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaRef {
    Inline(Box<SchemaNode>),
    Named(String),
}

impl SchemaRef {
    pub fn inline(node: SchemaNode) -> Self {
        SchemaRef::Inline(Box::new(node))
    }
}

/// Flat arena of named schemas, insertion-ordered.
///
/// All named types live here and are looked up by name, so a schema may
/// reference itself or a later entry without any ownership cycle.
#[derive(Debug, Clone, Default)]
pub struct SchemaIndex {
    order: Vec<String>,
    nodes: HashMap<String, SchemaNode>,
}

impl SchemaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named schema. Re-inserting a name replaces the node but
    /// keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, node: SchemaNode) {
        let name = name.into();
        if !self.nodes.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.nodes.insert(name, node);
    }

    pub fn resolve(&self, name: &str) -> Option<&SchemaNode> {
        self.nodes.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Read-only schema resolution interface consumed by the type mapper.
pub trait SchemaSource {
    fn resolve(&self, name: &str) -> Option<&SchemaNode>;
}

impl SchemaSource for SchemaIndex {
    fn resolve(&self, name: &str) -> Option<&SchemaNode> {
        SchemaIndex::resolve(self, name)
    }
}

/// Raw parameter as the source registry declares it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterEntry {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub schema: Option<SchemaRef>,
}

/// Raw route as the source registry declares it, in registration order.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
    pub method: String,
    pub path: String,
    pub description: Option<String>,
    pub parameters: Vec<ParameterEntry>,
    pub body_schema: Option<SchemaRef>,
    pub response_schema: Option<SchemaRef>,
}

/// Read-only route listing interface the extractor consumes. The engine
/// never mutates the registry behind it.
pub trait RouteRegistry {
    fn list_routes(&self) -> &[RouteEntry];
}

/// Validated, normalized descriptor for one callable endpoint.
///
/// Identity is `(method, path_template)`; duplicates are rejected during
/// extraction. Immutable once extracted.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    pub method: Method,
    pub path_template: String,
    pub description: Option<String>,
    pub path_params: Vec<ParamSpec>,
    pub query_params: Vec<ParamSpec>,
    pub body_schema: Option<SchemaRef>,
    pub response_schema: Option<SchemaRef>,
}

/// One declared parameter of a route. `name` is the wire name; invariant
/// after extraction: no two params of one descriptor share a sanitized name.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub schema: SchemaRef,
    pub required: bool,
}

/// Rewrite a raw name into a valid Rust identifier: invalid characters become
/// underscores, a leading digit gets an underscore prefix, empty input maps
/// to a lone underscore.
pub fn sanitize_field_name(name: &str) -> String {
    let mut s: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if s.is_empty() {
        s = "_".to_string();
    }
    if s.chars()
        .next()
        .map(|c| c.is_ascii_digit())
        .unwrap_or(false)
    {
        s.insert(0, '_');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_field_name() {
        assert_eq!(sanitize_field_name("user_id"), "user_id");
        assert_eq!(sanitize_field_name("user-id"), "user_id");
        assert_eq!(sanitize_field_name("full name"), "full_name");
        assert_eq!(sanitize_field_name("9lives"), "_9lives");
        assert_eq!(sanitize_field_name(""), "_");
        assert_eq!(sanitize_field_name("a "), "a_");
    }

    #[test]
    fn test_sanitize_distinct_inputs_may_collide() {
        // The extractor is responsible for rejecting these within one route.
        assert_eq!(sanitize_field_name("a-b"), sanitize_field_name("a b"));
    }

    #[test]
    fn test_schema_index_preserves_insertion_order() {
        let mut index = SchemaIndex::new();
        index.insert("Zebra", SchemaNode::Primitive(PrimitiveKind::String));
        index.insert("Apple", SchemaNode::Primitive(PrimitiveKind::Integer));
        let names: Vec<&str> = index.names().collect();
        assert_eq!(names, vec!["Zebra", "Apple"]);
        assert!(index.resolve("Apple").is_some());
        assert!(index.resolve("Missing").is_none());
    }

    #[test]
    fn test_schema_index_reinsert_keeps_position() {
        let mut index = SchemaIndex::new();
        index.insert("A", SchemaNode::Primitive(PrimitiveKind::String));
        index.insert("B", SchemaNode::Primitive(PrimitiveKind::Boolean));
        index.insert("A", SchemaNode::Primitive(PrimitiveKind::Integer));
        let names: Vec<&str> = index.names().collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(
            index.resolve("A"),
            Some(&SchemaNode::Primitive(PrimitiveKind::Integer))
        );
    }
}
