use super::error::ExtractionError;
use super::types::{
    sanitize_field_name, ParamSpec, ParameterLocation, PrimitiveKind, RouteDescriptor,
    RouteEntry, RouteRegistry, SchemaNode, SchemaRef,
};
use http::Method;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Placeholder segments in a path template, e.g. `{id}` in `/items/{id}`.
pub(crate) static PATH_PARAM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^/{}]+)\}").expect("path placeholder regex"));

/// HTTP methods the engine accepts, in the source tool's priority order.
const METHODS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"];

fn parse_method(raw: &str, path: &str) -> Result<Method, ExtractionError> {
    let upper = raw.to_ascii_uppercase();
    if !METHODS.contains(&upper.as_str()) {
        return Err(ExtractionError::UnsupportedMethod {
            method: raw.to_string(),
            path: path.to_string(),
        });
    }
    upper
        .parse::<Method>()
        .map_err(|_| ExtractionError::UnsupportedMethod {
            method: raw.to_string(),
            path: path.to_string(),
        })
}

/// Walk the registry and produce one validated [`RouteDescriptor`] per route,
/// preserving registration order so repeated generation yields stable output.
///
/// Parameter classification (path vs query vs body) is taken from the
/// registry verbatim. A parameter without a declared schema is treated as a
/// string, the way the source frameworks default untyped path segments.
///
/// # Errors
///
/// Returns [`ExtractionError`] on duplicate `(method, path)` identity, an
/// unsupported HTTP method, a sanitized parameter-name collision within one
/// route, or a path placeholder with no declared path parameter.
pub fn extract_routes<R: RouteRegistry + ?Sized>(
    registry: &R,
) -> Result<Vec<RouteDescriptor>, ExtractionError> {
    let mut seen: HashSet<(Method, String)> = HashSet::new();
    let mut descriptors = Vec::new();

    for entry in registry.list_routes() {
        let method = parse_method(&entry.method, &entry.path)?;
        if !seen.insert((method.clone(), entry.path.clone())) {
            return Err(ExtractionError::DuplicateRoute {
                method: method.to_string(),
                path: entry.path.clone(),
            });
        }
        descriptors.push(build_descriptor(method, entry)?);
    }

    Ok(descriptors)
}

fn build_descriptor(
    method: Method,
    entry: &RouteEntry,
) -> Result<RouteDescriptor, ExtractionError> {
    let mut path_params = Vec::new();
    let mut query_params = Vec::new();
    let mut taken: HashSet<String> = HashSet::new();

    for param in &entry.parameters {
        if !taken.insert(sanitize_field_name(&param.name)) {
            return Err(ExtractionError::ParameterCollision {
                method: method.to_string(),
                path: entry.path.clone(),
                name: param.name.clone(),
            });
        }
        let spec = ParamSpec {
            name: param.name.clone(),
            schema: param.schema.clone().unwrap_or_else(|| {
                SchemaRef::inline(SchemaNode::Primitive(PrimitiveKind::String))
            }),
            required: param.required,
        };
        match param.location {
            ParameterLocation::Path => path_params.push(spec),
            ParameterLocation::Query => query_params.push(spec),
        }
    }

    // The body argument is rendered as `body`; it competes for that name.
    if entry.body_schema.is_some() && !taken.insert("body".to_string()) {
        return Err(ExtractionError::ParameterCollision {
            method: method.to_string(),
            path: entry.path.clone(),
            name: "body".to_string(),
        });
    }

    for caps in PATH_PARAM_RE.captures_iter(&entry.path) {
        let placeholder = &caps[1];
        if !path_params.iter().any(|p| p.name == placeholder) {
            return Err(ExtractionError::UnboundPathParameter {
                method: method.to_string(),
                path: entry.path.clone(),
                name: placeholder.to_string(),
            });
        }
    }

    Ok(RouteDescriptor {
        method,
        path_template: entry.path.clone(),
        description: entry.description.clone(),
        path_params,
        query_params,
        body_schema: entry.body_schema.clone(),
        response_schema: entry.response_schema.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::types::ParameterEntry;

    struct StaticRegistry(Vec<RouteEntry>);

    impl RouteRegistry for StaticRegistry {
        fn list_routes(&self) -> &[RouteEntry] {
            &self.0
        }
    }

    fn route(method: &str, path: &str) -> RouteEntry {
        RouteEntry {
            method: method.to_string(),
            path: path.to_string(),
            description: None,
            parameters: Vec::new(),
            body_schema: None,
            response_schema: None,
        }
    }

    fn path_param(name: &str) -> ParameterEntry {
        ParameterEntry {
            name: name.to_string(),
            location: ParameterLocation::Path,
            required: true,
            schema: None,
        }
    }

    fn query_param(name: &str, required: bool) -> ParameterEntry {
        ParameterEntry {
            name: name.to_string(),
            location: ParameterLocation::Query,
            required,
            schema: None,
        }
    }

    #[test]
    fn test_extract_preserves_registration_order() {
        let registry = StaticRegistry(vec![
            route("GET", "/zebras"),
            route("GET", "/apples"),
            route("POST", "/zebras"),
        ]);
        let routes = extract_routes(&registry).unwrap();
        let paths: Vec<&str> = routes.iter().map(|r| r.path_template.as_str()).collect();
        assert_eq!(paths, vec!["/zebras", "/apples", "/zebras"]);
        assert_eq!(routes[2].method, Method::POST);
    }

    #[test]
    fn test_extract_classifies_parameters() {
        let mut entry = route("GET", "/items/{id}");
        entry.parameters = vec![path_param("id"), query_param("limit", false)];
        let routes = extract_routes(&StaticRegistry(vec![entry])).unwrap();
        assert_eq!(routes[0].path_params.len(), 1);
        assert_eq!(routes[0].query_params.len(), 1);
        assert_eq!(routes[0].path_params[0].name, "id");
        assert!(!routes[0].query_params[0].required);
        // Undeclared schema defaults to string.
        assert_eq!(
            routes[0].path_params[0].schema,
            SchemaRef::inline(SchemaNode::Primitive(PrimitiveKind::String))
        );
    }

    #[test]
    fn test_extract_rejects_duplicate_route() {
        let registry = StaticRegistry(vec![route("GET", "/items"), route("get", "/items")]);
        let err = extract_routes(&registry).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::DuplicateRoute {
                method: "GET".to_string(),
                path: "/items".to_string(),
            }
        );
    }

    #[test]
    fn test_extract_rejects_unsupported_method() {
        let registry = StaticRegistry(vec![route("TRACE", "/items")]);
        assert!(matches!(
            extract_routes(&registry).unwrap_err(),
            ExtractionError::UnsupportedMethod { .. }
        ));
    }

    #[test]
    fn test_extract_rejects_sanitized_collision() {
        let mut entry = route("GET", "/search");
        entry.parameters = vec![query_param("a-b", true), query_param("a b", true)];
        assert!(matches!(
            extract_routes(&StaticRegistry(vec![entry])).unwrap_err(),
            ExtractionError::ParameterCollision { name, .. } if name == "a b"
        ));
    }

    #[test]
    fn test_extract_rejects_body_name_collision() {
        let mut entry = route("POST", "/items");
        entry.parameters = vec![query_param("body", true)];
        entry.body_schema = Some(SchemaRef::Named("Item".to_string()));
        assert!(matches!(
            extract_routes(&StaticRegistry(vec![entry])).unwrap_err(),
            ExtractionError::ParameterCollision { name, .. } if name == "body"
        ));
    }

    #[test]
    fn test_extract_rejects_unbound_placeholder() {
        let entry = route("GET", "/items/{id}");
        assert!(matches!(
            extract_routes(&StaticRegistry(vec![entry])).unwrap_err(),
            ExtractionError::UnboundPathParameter { name, .. } if name == "id"
        ));
    }
}
