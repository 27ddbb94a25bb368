use super::schema::{sanitize_rust_identifier, wrap_optional, GeneratorContext, UNTYPED};
use super::templates::{MethodArg, MethodTemplateData, QueryPair};
use crate::registry::{sanitize_field_name, ParamSpec, RouteDescriptor, PATH_PARAM_RE};
use askama::Template;

/// Rendered source for one client method.
#[derive(Debug, Clone)]
pub struct MethodSource {
    pub name: String,
    pub source: String,
}

/// Derive the method name from the HTTP verb and the sanitized path
/// template, e.g. `GET /items/{id}` → `get_items_id`. Deterministic, so
/// repeated generation over the same registry is byte-identical.
pub fn method_name(descriptor: &RouteDescriptor) -> String {
    let verb = descriptor.method.as_str().to_ascii_lowercase();
    let path = PATH_PARAM_RE.replace_all(&descriptor.path_template, "$1");
    let mut slug = String::new();
    let mut boundary = false;
    for c in path.chars() {
        if c.is_ascii_alphanumeric() {
            if boundary && !slug.is_empty() {
                slug.push('_');
            }
            slug.push(c.to_ascii_lowercase());
            boundary = false;
        } else {
            boundary = true;
        }
    }
    if slug.is_empty() {
        format!("{verb}_root")
    } else {
        format!("{verb}_{slug}")
    }
}

fn argument(ctx: &mut GeneratorContext<'_>, param: &ParamSpec, location: &str) -> MethodArg {
    let ty = ctx.map_schema(&param.schema, location);
    MethodArg {
        name: sanitize_rust_identifier(&sanitize_field_name(&param.name)),
        ty: if param.required { ty } else { wrap_optional(ty) },
    }
}

/// Render one route into a typed `async fn`.
///
/// Signature order: required parameters first (path, then query, then body),
/// optional parameters after. The body substitutes path parameters into the
/// template, pushes present query pairs, attaches the JSON body when
/// declared, sends through the shared transport, and decodes the response
/// into the mapped type; no call happens at generation time.
pub fn render_method(
    ctx: &mut GeneratorContext<'_>,
    descriptor: &RouteDescriptor,
) -> Result<MethodSource, askama::Error> {
    render_method_named(ctx, descriptor, method_name(descriptor))
}

pub(crate) fn render_method_named(
    ctx: &mut GeneratorContext<'_>,
    descriptor: &RouteDescriptor,
    name: String,
) -> Result<MethodSource, askama::Error> {
    let location = format!("{} {}", descriptor.method, descriptor.path_template);

    let mut required = Vec::new();
    let mut optional = Vec::new();
    for param in &descriptor.path_params {
        let arg = argument(ctx, param, &location);
        if param.required {
            required.push(arg);
        } else {
            optional.push(arg);
        }
    }
    for param in &descriptor.query_params {
        let arg = argument(ctx, param, &location);
        if param.required {
            required.push(arg);
        } else {
            optional.push(arg);
        }
    }
    if let Some(body) = &descriptor.body_schema {
        required.push(MethodArg {
            name: "body".to_string(),
            ty: ctx.map_schema(body, &location),
        });
    }
    let args: Vec<MethodArg> = required.into_iter().chain(optional).collect();

    let mut url_args = Vec::new();
    let replaced = PATH_PARAM_RE.replace_all(&descriptor.path_template, |caps: &regex::Captures| {
        url_args.push(sanitize_rust_identifier(&sanitize_field_name(&caps[1])));
        "{}"
    });
    let url_format = format!("{{}}{replaced}");

    let query: Vec<QueryPair> = descriptor
        .query_params
        .iter()
        .map(|p| QueryPair {
            raw: p.name.clone(),
            var: sanitize_rust_identifier(&sanitize_field_name(&p.name)),
            required: p.required,
        })
        .collect();

    let return_type = descriptor
        .response_schema
        .as_ref()
        .map(|schema| ctx.map_schema(schema, &location))
        .unwrap_or_else(|| UNTYPED.to_string());

    let doc_lines = descriptor
        .description
        .as_deref()
        .map(|d| {
            d.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let source = MethodTemplateData {
        doc_lines,
        name: name.clone(),
        args,
        return_type,
        url_format,
        url_args,
        has_query: !descriptor.query_params.is_empty(),
        query,
        has_body: descriptor.body_schema.is_some(),
        method: descriptor.method.as_str().to_string(),
    }
    .render()?;

    Ok(MethodSource { name, source })
}
