use askama::Template;

use super::schema::{EnumDecl, StructDecl};

/// One argument of a generated method signature. `name` is already sanitized
/// and keyword-escaped; `ty` includes the `Option<…>` wrapper for optionals.
#[derive(Debug, Clone)]
pub struct MethodArg {
    pub name: String,
    pub ty: String,
}

/// One query-string pair: the wire name and the local variable holding it.
#[derive(Debug, Clone)]
pub struct QueryPair {
    pub raw: String,
    pub var: String,
    pub required: bool,
}

/// Template data for one generated model struct.
#[derive(Template)]
#[template(path = "model.rs.txt", escape = "none")]
pub struct ModelTemplateData<'a> {
    pub decl: &'a StructDecl,
}

/// Template data for one generated enumeration.
#[derive(Template)]
#[template(path = "enum.rs.txt", escape = "none")]
pub struct EnumTemplateData<'a> {
    pub decl: &'a EnumDecl,
}

/// Template data for one generated client method.
///
/// `url_format` is the `format!` string with the base URL first (`{}` per
/// substituted segment); `url_args` are the path parameter variables in
/// template order.
#[derive(Template)]
#[template(path = "method.rs.txt", escape = "none")]
pub struct MethodTemplateData {
    pub doc_lines: Vec<String>,
    pub name: String,
    pub args: Vec<MethodArg>,
    pub return_type: String,
    pub url_format: String,
    pub url_args: Vec<String>,
    pub has_query: bool,
    pub query: Vec<QueryPair>,
    pub has_body: bool,
    pub method: String,
}

/// Template data for the assembled client unit: pre-rendered declarations
/// and methods, concatenated around the client type.
#[derive(Template)]
#[template(path = "client.rs.txt", escape = "none")]
pub struct ClientTemplateData {
    pub client_name: String,
    pub declarations: Vec<String>,
    pub methods: Vec<String>,
}
