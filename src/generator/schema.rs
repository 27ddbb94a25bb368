use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::registry::{
    sanitize_field_name, FieldSpec, PrimitiveKind, SchemaNode, SchemaRef, SchemaSource,
};
use std::collections::{HashMap, HashSet};

/// Rust type used wherever no concrete type can be determined.
pub const UNTYPED: &str = "serde_json::Value";

/// Convert a snake_case string to CamelCase.
///
/// Used for generating Rust type names from declared schema names.
pub fn to_camel_case(s: &str) -> String {
    s.split('_')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Escape Rust keywords with a raw-identifier prefix.
pub fn sanitize_rust_identifier(name: &str) -> String {
    const KEYWORDS: &[&str] = &[
        "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn",
        "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
        "return", "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe",
        "use", "where", "while", "async", "await", "dyn",
    ];
    if KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// Claim `base` in `seen`, appending `_1`, `_2`, … until the name is free.
pub(crate) fn unique_name(seen: &mut HashSet<String>, base: &str) -> String {
    if seen.insert(base.to_string()) {
        return base.to_string();
    }
    let mut counter = 1;
    loop {
        let candidate = format!("{base}_{counter}");
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}

/// A generated type declaration, in first-encounter order.
#[derive(Debug, Clone)]
pub enum TypeDecl {
    Struct(StructDecl),
    Enum(EnumDecl),
}

impl TypeDecl {
    pub fn name(&self) -> &str {
        match self {
            TypeDecl::Struct(s) => &s.name,
            TypeDecl::Enum(e) => &e.name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    /// Sanitized Rust field name (keyword-escaped).
    pub name: String,
    /// Original field name from the schema, kept for serde rename.
    pub original_name: String,
    /// Mapped Rust type, `Option<…>` included when the field is optional.
    pub ty: String,
    pub optional: bool,
}

#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub name: String,
    pub variants: Vec<VariantDecl>,
    /// Set when suffixed variants force an `allow(non_camel_case_types)`.
    pub non_camel: bool,
}

#[derive(Debug, Clone)]
pub struct VariantDecl {
    pub name: String,
    pub literal: String,
}

/// Per-run mapping state: the NamedType registry, name reservations, counters
/// for synthesized names, and recorded diagnostics.
///
/// One context per generation run; nothing here is shared between runs, so
/// concurrent or repeated generations cannot interfere.
pub struct GeneratorContext<'a> {
    schemas: &'a dyn SchemaSource,
    /// Structural signature → generated type name. Guarantees at most one
    /// declaration per distinct shape.
    by_signature: HashMap<String, String>,
    /// Arena name → generated type name. Filled before a named object's
    /// fields are resolved, so self-references land on the reserved name.
    by_ref: HashMap<String, String>,
    used_names: HashSet<String>,
    decls: Vec<TypeDecl>,
    model_counter: usize,
    enum_counter: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> GeneratorContext<'a> {
    pub fn new(schemas: &'a dyn SchemaSource) -> Self {
        GeneratorContext {
            schemas,
            by_signature: HashMap::new(),
            by_ref: HashMap::new(),
            used_names: HashSet::new(),
            decls: Vec::new(),
            model_counter: 0,
            enum_counter: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Map a schema reference to a Rust type reference, registering any newly
    /// required declarations on the context.
    ///
    /// `location` identifies the route or schema being mapped and only feeds
    /// diagnostics. Unrecognized shapes degrade to [`UNTYPED`] with an
    /// `UnsupportedSchema` diagnostic; they never abort the run.
    pub fn map_schema(&mut self, schema: &SchemaRef, location: &str) -> String {
        match schema {
            SchemaRef::Named(name) => {
                if let Some(ty) = self.by_ref.get(name) {
                    return ty.clone();
                }
                let node = match self.schemas.resolve(name) {
                    Some(node) => node.clone(),
                    None => {
                        self.diagnostics.push(Diagnostic::new(
                            DiagnosticKind::UnsupportedSchema,
                            location,
                            format!("unresolved schema reference '{name}'"),
                        ));
                        return UNTYPED.to_string();
                    }
                };
                self.map_node(&node, Some(name), location)
            }
            SchemaRef::Inline(node) => self.map_node(node, None, location),
        }
    }

    fn map_node(&mut self, node: &SchemaNode, ref_name: Option<&str>, location: &str) -> String {
        match node {
            SchemaNode::Primitive(kind) => match kind {
                PrimitiveKind::String => "String".to_string(),
                PrimitiveKind::Integer => "i32".to_string(),
                PrimitiveKind::Number => "f64".to_string(),
                PrimitiveKind::Boolean => "bool".to_string(),
                PrimitiveKind::Null => format!("Option<{UNTYPED}>"),
            },
            SchemaNode::Array(element) => {
                format!("Vec<{}>", self.map_schema(element, location))
            }
            SchemaNode::Optional(inner) => wrap_optional(self.map_schema(inner, location)),
            SchemaNode::Object { name, fields } => {
                self.map_object(ref_name, name.as_deref(), fields, location)
            }
            SchemaNode::Enum { name, values } => {
                self.map_enum(ref_name, name.as_deref(), values, location)
            }
            SchemaNode::Unknown(_) => {
                self.diagnostics.push(Diagnostic::new(
                    DiagnosticKind::UnsupportedSchema,
                    location,
                    "unrecognized schema shape, using untyped placeholder".to_string(),
                ));
                UNTYPED.to_string()
            }
        }
    }

    fn map_object(
        &mut self,
        ref_name: Option<&str>,
        declared: Option<&str>,
        fields: &[FieldSpec],
        location: &str,
    ) -> String {
        // Named schemas are forward-declared: reserve the type name before
        // resolving the fields, so a self-reference maps to that name.
        let base = ref_name
            .or(declared)
            .map(|n| to_camel_case(&sanitize_field_name(n)))
            .filter(|n| !n.is_empty());
        let reserved = base.map(|b| self.claim_type_name(&b, location));
        if let (Some(r), Some(ty)) = (ref_name, reserved.as_ref()) {
            self.by_ref.insert(r.to_string(), ty.clone());
        }

        let mut decl_fields = Vec::with_capacity(fields.len());
        let mut signature_parts = Vec::with_capacity(fields.len());
        let mut field_names = HashSet::new();
        for field in fields {
            let ty = self.map_schema(&field.schema, location);
            signature_parts.push(format!("{}:{}", field.name, ty));
            let sanitized = unique_name(&mut field_names, &sanitize_field_name(&field.name));
            decl_fields.push(FieldDecl {
                name: sanitize_rust_identifier(&sanitized),
                original_name: field.name.clone(),
                optional: ty.starts_with("Option<"),
                ty,
            });
        }
        let signature = format!("object{{{}}}", signature_parts.join(","));

        if let Some(existing) = self.by_signature.get(&signature).cloned() {
            // Identical shape already declared: reuse it and release any
            // reservation made above.
            if let Some(reserved) = reserved {
                self.used_names.remove(&reserved);
                if let Some(r) = ref_name {
                    self.by_ref.insert(r.to_string(), existing.clone());
                }
            }
            return existing;
        }

        let name = match reserved {
            Some(name) => name,
            None => {
                self.model_counter += 1;
                let base = format!("Model{}", self.model_counter);
                unique_name(&mut self.used_names, &base)
            }
        };
        self.by_signature.insert(signature, name.clone());
        self.decls.push(TypeDecl::Struct(StructDecl {
            name: name.clone(),
            fields: decl_fields,
        }));
        name
    }

    fn map_enum(
        &mut self,
        ref_name: Option<&str>,
        declared: Option<&str>,
        values: &[String],
        location: &str,
    ) -> String {
        let signature = format!("enum{}", serde_json::to_string(values).unwrap_or_default());
        if let Some(existing) = self.by_signature.get(&signature).cloned() {
            if let Some(r) = ref_name {
                self.by_ref.insert(r.to_string(), existing.clone());
            }
            return existing;
        }

        let base = ref_name
            .or(declared)
            .map(|n| to_camel_case(&sanitize_field_name(n)))
            .filter(|n| !n.is_empty());
        let name = match base {
            Some(base) => self.claim_type_name(&base, location),
            None => {
                self.enum_counter += 1;
                let base = format!("Enum{}", self.enum_counter);
                unique_name(&mut self.used_names, &base)
            }
        };
        if let Some(r) = ref_name {
            self.by_ref.insert(r.to_string(), name.clone());
        }

        let mut seen = HashSet::new();
        let mut variants = Vec::with_capacity(values.len());
        for literal in values {
            let base = to_camel_case(&sanitize_field_name(literal));
            let base = if base.is_empty() {
                "Value".to_string()
            } else {
                base
            };
            variants.push(VariantDecl {
                name: unique_name(&mut seen, &base),
                literal: literal.clone(),
            });
        }
        let non_camel = variants.iter().any(|v| v.name.contains('_'));

        self.by_signature.insert(signature, name.clone());
        self.decls.push(TypeDecl::Enum(EnumDecl {
            name: name.clone(),
            variants,
            non_camel,
        }));
        name
    }

    /// Claim a declared type name, suffixing and recording a collision when a
    /// structurally different schema already took it.
    fn claim_type_name(&mut self, base: &str, location: &str) -> String {
        let name = unique_name(&mut self.used_names, base);
        if name != base {
            self.diagnostics.push(Diagnostic::new(
                DiagnosticKind::NameCollision,
                location,
                format!("type name '{base}' already declared, using '{name}'"),
            ));
        }
        name
    }

    pub fn declarations(&self) -> &[TypeDecl] {
        &self.decls
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the context, yielding declarations in first-encounter order
    /// and the diagnostics recorded along the way.
    pub fn finish(self) -> (Vec<TypeDecl>, Vec<Diagnostic>) {
        (self.decls, self.diagnostics)
    }
}

/// Wrap a mapped type in `Option` unless it already is one.
pub(crate) fn wrap_optional(ty: String) -> String {
    if ty.starts_with("Option<") {
        ty
    } else {
        format!("Option<{ty}>")
    }
}
