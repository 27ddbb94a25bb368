/// Category of a non-fatal generation warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A schema shape the mapper does not recognize; the field degraded to
    /// an untyped placeholder.
    UnsupportedSchema,
    /// Two structurally distinct schemas sanitized to the same declared
    /// name; resolved with a suffix.
    NameCollision,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::UnsupportedSchema => write!(f, "UnsupportedSchema"),
            DiagnosticKind::NameCollision => write!(f, "NameCollision"),
        }
    }
}

/// One recorded warning from a generation run. Diagnostics never abort
/// generation; they surface what degraded and where.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub location: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic {
            kind,
            location: location.into(),
            message: message.into(),
        }
    }
}

/// Log every diagnostic from a run at warn level.
pub fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        tracing::warn!(kind = %d.kind, location = %d.location, "{}", d.message);
    }
}
