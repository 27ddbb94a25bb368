use std::fmt;

/// Fatal extraction failure.
///
/// Any of these aborts generation for the whole registry: a client must not
/// be emitted when route identity is ambiguous. Each variant carries the
/// identity of the offending route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The declared HTTP method is not one the engine understands.
    UnsupportedMethod { method: String, path: String },
    /// Two routes share the same `(method, path)` identity.
    DuplicateRoute { method: String, path: String },
    /// Two parameters of one route collide after identifier sanitization
    /// (the synthetic `body` parameter participates).
    ParameterCollision {
        method: String,
        path: String,
        name: String,
    },
    /// The path template contains a placeholder with no declared path
    /// parameter, so the rendered method could not substitute it.
    UnboundPathParameter {
        method: String,
        path: String,
        name: String,
    },
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionError::UnsupportedMethod { method, path } => {
                write!(f, "unsupported HTTP method '{method}' on route {path}")
            }
            ExtractionError::DuplicateRoute { method, path } => {
                write!(f, "duplicate route registration: {method} {path}")
            }
            ExtractionError::ParameterCollision { method, path, name } => {
                write!(
                    f,
                    "parameter '{name}' on {method} {path} collides with another \
                    parameter after sanitization"
                )
            }
            ExtractionError::UnboundPathParameter { method, path, name } => {
                write!(
                    f,
                    "path placeholder '{{{name}}}' on {method} {path} has no declared \
                    path parameter"
                )
            }
        }
    }
}

impl std::error::Error for ExtractionError {}
