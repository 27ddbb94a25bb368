use super::types::{
    FieldSpec, ParameterEntry, ParameterLocation, PrimitiveKind, RouteEntry, RouteRegistry,
    SchemaIndex, SchemaNode, SchemaRef, SchemaSource,
};
use crate::generator::to_camel_case;
use anyhow::{bail, Context};
use serde_json::Value;
use std::path::Path;

/// A loaded service description: the route registry and schema system the
/// generation engine consumes, as read from a YAML or JSON file.
#[derive(Debug, Clone)]
pub struct ServiceDescription {
    pub service: String,
    pub schemas: SchemaIndex,
    pub routes: Vec<RouteEntry>,
}

impl ServiceDescription {
    /// URL-safe identifier derived from the service name.
    pub fn slug(&self) -> String {
        self.service
            .to_lowercase()
            .replace(|c: char| !c.is_ascii_alphanumeric(), "_")
            .trim_matches('_')
            .to_string()
    }

    /// Default name for the generated client type, e.g. `PetStoreClient`.
    pub fn default_client_name(&self) -> String {
        format!("{}Client", to_camel_case(&self.slug()))
    }

    /// Drop routes whose path is in `paths`. The serving glue uses this to
    /// keep its own download route out of the generated client.
    pub fn exclude_paths(&mut self, paths: &[String]) {
        self.routes.retain(|r| !paths.contains(&r.path));
    }
}

impl RouteRegistry for ServiceDescription {
    fn list_routes(&self) -> &[RouteEntry] {
        &self.routes
    }
}

impl SchemaSource for ServiceDescription {
    fn resolve(&self, name: &str) -> Option<&SchemaNode> {
        self.schemas.resolve(name)
    }
}

/// Load a service description from a YAML (`.yaml`/`.yml`) or JSON file.
pub fn load_description(file_path: &Path) -> anyhow::Result<ServiceDescription> {
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("failed to read service description {file_path:?}"))?;
    let yaml = file_path
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext == "yaml" || ext == "yml")
        .unwrap_or(false);
    parse_description(&content, yaml)
        .with_context(|| format!("invalid service description {file_path:?}"))
}

/// Parse a service description from in-memory text.
pub fn parse_description(content: &str, yaml: bool) -> anyhow::Result<ServiceDescription> {
    let value: Value = if yaml {
        serde_yaml::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };

    let service = value
        .get("service")
        .and_then(Value::as_str)
        .context("description is missing the 'service' name")?
        .to_string();

    let mut schemas = SchemaIndex::new();
    if let Some(map) = value.get("schemas").and_then(Value::as_object) {
        for (name, schema) in map {
            schemas.insert(name.clone(), parse_schema_node(schema));
        }
    }

    let mut routes = Vec::new();
    if let Some(entries) = value.get("routes").and_then(Value::as_array) {
        for (index, entry) in entries.iter().enumerate() {
            routes.push(
                parse_route(entry).with_context(|| format!("route at index {index}"))?,
            );
        }
    }

    Ok(ServiceDescription {
        service,
        schemas,
        routes,
    })
}

fn parse_route(entry: &Value) -> anyhow::Result<RouteEntry> {
    let method = entry
        .get("method")
        .and_then(Value::as_str)
        .context("missing 'method'")?
        .to_string();
    let path = entry
        .get("path")
        .and_then(Value::as_str)
        .context("missing 'path'")?
        .to_string();
    let description = entry
        .get("description")
        .and_then(Value::as_str)
        .map(String::from);

    let mut parameters = Vec::new();
    if let Some(params) = entry.get("parameters").and_then(Value::as_array) {
        for param in params {
            parameters.push(parse_parameter(param)?);
        }
    }

    Ok(RouteEntry {
        method,
        path,
        description,
        parameters,
        body_schema: entry.get("body").map(parse_schema_ref),
        response_schema: entry.get("response").map(parse_schema_ref),
    })
}

fn parse_parameter(param: &Value) -> anyhow::Result<ParameterEntry> {
    let name = param
        .get("name")
        .and_then(Value::as_str)
        .context("parameter is missing 'name'")?
        .to_string();
    let location = match param.get("in").and_then(Value::as_str) {
        Some("path") => ParameterLocation::Path,
        Some("query") | None => ParameterLocation::Query,
        Some(other) => bail!("parameter '{name}' has unknown location '{other}'"),
    };
    // Path parameters are always required; query parameters default to
    // optional, matching the source framework's own classification.
    let required = param
        .get("required")
        .and_then(Value::as_bool)
        .unwrap_or(location == ParameterLocation::Path);
    Ok(ParameterEntry {
        name,
        location,
        required,
        schema: param.get("schema").map(parse_schema_ref),
    })
}

/// Parse a schema reference: either `{"$ref": "..."}` pointing into the
/// shared index, or an inline schema node.
pub fn parse_schema_ref(value: &Value) -> SchemaRef {
    if let Some(r) = value.get("$ref").and_then(Value::as_str) {
        let name = r.strip_prefix("#/schemas/").unwrap_or(r);
        return SchemaRef::Named(name.to_string());
    }
    SchemaRef::inline(parse_schema_node(value))
}

/// Parse one JSON-Schema-flavored node. Shapes the parser does not recognize
/// become [`SchemaNode::Unknown`] so the mapper can degrade per-field rather
/// than failing the run.
pub fn parse_schema_node(value: &Value) -> SchemaNode {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => return SchemaNode::Unknown(value.clone()),
    };
    let declared_name = obj.get("title").and_then(Value::as_str).map(String::from);

    // `nullable: true` wraps the remaining shape.
    if obj.get("nullable").and_then(Value::as_bool) == Some(true) {
        let mut inner = obj.clone();
        inner.remove("nullable");
        return SchemaNode::Optional(parse_schema_ref(&Value::Object(inner)));
    }

    // `oneOf: [X, {type: null}]` is the other spelling of an optional.
    if let Some(variants) = obj.get("oneOf").and_then(Value::as_array) {
        let mut inner = None;
        let mut has_null = false;
        for variant in variants {
            if variant.get("type").and_then(Value::as_str) == Some("null") {
                has_null = true;
            } else if inner.is_none() {
                inner = Some(variant);
            } else {
                // More than one non-null variant: not a shape we model.
                return SchemaNode::Unknown(value.clone());
            }
        }
        return match (inner, has_null) {
            (Some(inner), true) => SchemaNode::Optional(parse_schema_ref(inner)),
            _ => SchemaNode::Unknown(value.clone()),
        };
    }

    if let Some(values) = obj.get("enum").and_then(Value::as_array) {
        let mut literals = Vec::with_capacity(values.len());
        for v in values {
            match v.as_str() {
                Some(s) => literals.push(s.to_string()),
                // Non-string literals are out of the enum model.
                None => return SchemaNode::Unknown(value.clone()),
            }
        }
        return SchemaNode::Enum {
            name: declared_name,
            values: literals,
        };
    }

    let type_str = obj.get("type").and_then(Value::as_str);
    match type_str {
        Some("string") => SchemaNode::Primitive(PrimitiveKind::String),
        Some("integer") => SchemaNode::Primitive(PrimitiveKind::Integer),
        Some("number") => SchemaNode::Primitive(PrimitiveKind::Number),
        Some("boolean") => SchemaNode::Primitive(PrimitiveKind::Boolean),
        Some("null") => SchemaNode::Primitive(PrimitiveKind::Null),
        Some("array") => {
            let element = obj
                .get("items")
                .map(parse_schema_ref)
                .unwrap_or_else(|| SchemaRef::inline(SchemaNode::Unknown(Value::Null)));
            SchemaNode::Array(element)
        }
        Some("object") | None if obj.contains_key("properties") => {
            let required: Vec<&str> = obj
                .get("required")
                .and_then(Value::as_array)
                .map(|a| a.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            let mut fields = Vec::new();
            if let Some(props) = obj.get("properties").and_then(Value::as_object) {
                for (field_name, prop) in props {
                    let mut schema = parse_schema_ref(prop);
                    let optional = !required.contains(&field_name.as_str());
                    if optional && !matches!(schema, SchemaRef::Inline(ref b) if matches!(**b, SchemaNode::Optional(_)))
                    {
                        schema = SchemaRef::inline(SchemaNode::Optional(schema));
                    }
                    fields.push(FieldSpec {
                        name: field_name.clone(),
                        schema,
                    });
                }
            }
            SchemaNode::Object {
                name: declared_name,
                fields,
            }
        }
        Some("object") => SchemaNode::Object {
            name: declared_name,
            fields: Vec::new(),
        },
        _ => SchemaNode::Unknown(value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DESCRIPTION: &str = r##"
service: Pet Store
schemas:
  Item:
    type: object
    required: [id, name]
    properties:
      id: {type: integer}
      name: {type: string}
routes:
  - method: GET
    path: /items/{id}
    description: Fetch one item.
    parameters:
      - name: id
        in: path
        schema: {type: integer}
    response: {$ref: "#/schemas/Item"}
  - method: GET
    path: /items
    response:
      type: array
      items: {$ref: Item}
"##;

    #[test]
    fn test_parse_description_yaml() {
        let desc = parse_description(DESCRIPTION, true).unwrap();
        assert_eq!(desc.service, "Pet Store");
        assert_eq!(desc.slug(), "pet_store");
        assert_eq!(desc.default_client_name(), "PetStoreClient");
        assert_eq!(desc.routes.len(), 2);
        assert_eq!(desc.routes[0].parameters.len(), 1);
        assert!(desc.routes[0].parameters[0].required);
        assert_eq!(
            desc.routes[0].response_schema,
            Some(SchemaRef::Named("Item".to_string()))
        );
        match desc.schemas.resolve("Item") {
            Some(SchemaNode::Object { fields, .. }) => {
                let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
                assert_eq!(names, vec!["id", "name"]);
            }
            other => panic!("unexpected Item schema: {other:?}"),
        }
    }

    #[test]
    fn test_parse_optional_field_wrapping() {
        let node = parse_schema_node(&json!({
            "type": "object",
            "required": ["id"],
            "properties": {
                "id": {"type": "integer"},
                "note": {"type": "string"}
            }
        }));
        match node {
            SchemaNode::Object { fields, .. } => {
                assert_eq!(fields[0].schema, SchemaRef::inline(SchemaNode::Primitive(PrimitiveKind::Integer)));
                assert!(matches!(
                    &fields[1].schema,
                    SchemaRef::Inline(b) if matches!(**b, SchemaNode::Optional(_))
                ));
            }
            other => panic!("unexpected node: {other:?}"),
        }
    }

    #[test]
    fn test_parse_nullable_and_oneof_null() {
        let nullable = parse_schema_node(&json!({"type": "string", "nullable": true}));
        assert!(matches!(nullable, SchemaNode::Optional(_)));

        let one_of = parse_schema_node(&json!({
            "oneOf": [{"type": "integer"}, {"type": "null"}]
        }));
        assert!(matches!(one_of, SchemaNode::Optional(_)));
    }

    #[test]
    fn test_parse_enum_strings_only() {
        let good = parse_schema_node(&json!({"enum": ["A", "B"]}));
        assert!(matches!(good, SchemaNode::Enum { ref values, .. } if values.len() == 2));

        let mixed = parse_schema_node(&json!({"enum": ["A", 3]}));
        assert!(matches!(mixed, SchemaNode::Unknown(_)));
    }

    #[test]
    fn test_parse_unrecognized_shape() {
        let node = parse_schema_node(&json!({"type": "tuple", "items": []}));
        assert!(matches!(node, SchemaNode::Unknown(_)));
    }

    #[test]
    fn test_exclude_paths() {
        let mut desc = parse_description(DESCRIPTION, true).unwrap();
        desc.exclude_paths(&["/items".to_string()]);
        assert_eq!(desc.routes.len(), 1);
        assert_eq!(desc.routes[0].path, "/items/{id}");
    }
}
