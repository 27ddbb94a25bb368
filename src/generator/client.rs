use super::method::{method_name, render_method_named, MethodSource};
use super::schema::{unique_name, GeneratorContext, TypeDecl};
use super::templates::{ClientTemplateData, EnumTemplateData, ModelTemplateData};
use crate::diagnostics::Diagnostic;
use crate::registry::{extract_routes, RouteDescriptor, SchemaSource, ServiceDescription};
use askama::Template;
use std::collections::HashSet;

/// The assembled client: every declaration and method for one generation
/// run, in emission order. Built once, rendered once.
#[derive(Debug, Clone)]
pub struct ClientSpec {
    pub client_name: String,
    pub declarations: Vec<TypeDecl>,
    pub methods: Vec<MethodSource>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Assemble a [`ClientSpec`] from extracted descriptors.
///
/// One shared [`GeneratorContext`] spans the whole assembly: first a mapping
/// pass over every descriptor's schemas (so declarations land in
/// first-encounter order and identical shapes share one name), then a
/// rendering pass over every descriptor in registration order. Calling this
/// twice with the same input yields an identical spec.
pub fn assemble(
    client_name: &str,
    descriptors: &[RouteDescriptor],
    schemas: &dyn SchemaSource,
) -> Result<ClientSpec, askama::Error> {
    let mut ctx = GeneratorContext::new(schemas);

    for descriptor in descriptors {
        let location = format!("{} {}", descriptor.method, descriptor.path_template);
        for param in descriptor.path_params.iter().chain(&descriptor.query_params) {
            ctx.map_schema(&param.schema, &location);
        }
        if let Some(body) = &descriptor.body_schema {
            ctx.map_schema(body, &location);
        }
        if let Some(response) = &descriptor.response_schema {
            ctx.map_schema(response, &location);
        }
    }

    let mut seen = HashSet::new();
    let mut methods = Vec::with_capacity(descriptors.len());
    for descriptor in descriptors {
        let name = unique_name(&mut seen, &method_name(descriptor));
        methods.push(render_method_named(&mut ctx, descriptor, name)?);
    }

    let (declarations, diagnostics) = ctx.finish();
    Ok(ClientSpec {
        client_name: client_name.to_string(),
        declarations,
        methods,
        diagnostics,
    })
}

/// Render the assembled spec into the single client unit.
///
/// Declarations come first, in the order the mapper first encountered them,
/// so the unit never forward-references an undeclared name.
pub fn render_client(spec: &ClientSpec) -> Result<String, askama::Error> {
    let mut declarations = Vec::with_capacity(spec.declarations.len());
    for decl in &spec.declarations {
        declarations.push(match decl {
            TypeDecl::Struct(s) => ModelTemplateData { decl: s }.render()?,
            TypeDecl::Enum(e) => EnumTemplateData { decl: e }.render()?,
        });
    }
    ClientTemplateData {
        client_name: spec.client_name.clone(),
        declarations,
        methods: spec.methods.iter().map(|m| m.source.clone()).collect(),
    }
    .render()
}

/// Extract, assemble, and render in one step.
///
/// Fatal extraction errors surface here; nothing partial is ever returned.
/// The diagnostics carry every non-fatal degradation of the run.
pub fn generate_from_description(
    description: &ServiceDescription,
    client_name: Option<&str>,
) -> anyhow::Result<(String, Vec<Diagnostic>)> {
    let descriptors = extract_routes(description)?;
    let name = client_name
        .map(String::from)
        .unwrap_or_else(|| description.default_client_name());
    let spec = assemble(&name, &descriptors, &description.schemas)?;
    let source = render_client(&spec)?;
    Ok((source, spec.diagnostics))
}
