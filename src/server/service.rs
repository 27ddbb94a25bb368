use crate::diagnostics::report_diagnostics;
use crate::generator::generate_from_description;
use crate::registry::ServiceDescription;
use may_minihttp::{HttpService, Request, Response};
use serde_json::Value;
use std::io;
use std::sync::Arc;

/// HTTP service exposing the generated client for download.
///
/// Serves `GET /client.rs` (the generated unit, as an attachment) and
/// `GET /health`. The route registry is only read at request time; each
/// request runs its own generation with its own context.
#[derive(Clone)]
pub struct ClientCodeService {
    description: Arc<ServiceDescription>,
    client_name: Option<String>,
}

impl ClientCodeService {
    /// Build the service. Routes whose path appears in `exclude_paths` are
    /// left out of the generated client.
    pub fn new(
        mut description: ServiceDescription,
        client_name: Option<String>,
        exclude_paths: &[String],
    ) -> Self {
        description.exclude_paths(exclude_paths);
        ClientCodeService {
            description: Arc::new(description),
            client_name,
        }
    }

    /// Generate the client unit for the current registry contents.
    ///
    /// # Errors
    ///
    /// Returns the underlying extraction or rendering error; no partial
    /// source is ever produced.
    pub fn client_source(&self) -> anyhow::Result<String> {
        let (source, diagnostics) =
            generate_from_description(&self.description, self.client_name.as_deref())?;
        report_diagnostics(&diagnostics);
        Ok(source)
    }
}

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

fn write_json_error(res: &mut Response, status: u16, body: Value) {
    res.status_code(status as usize, status_reason(status));
    res.header("Content-Type: application/json");
    res.body_vec(body.to_string().into_bytes());
}

impl HttpService for ClientCodeService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let method = req.method().to_string();
        let path = req
            .path()
            .split('?')
            .next()
            .unwrap_or_default()
            .to_string();

        if method == "GET" && path == "/health" {
            res.header("Content-Type: application/json");
            res.body_vec(serde_json::json!({"status": "ok"}).to_string().into_bytes());
            return Ok(());
        }

        if method == "GET" && path == "/client.rs" {
            match self.client_source() {
                Ok(source) => {
                    res.header("Content-Type: text/x-rust");
                    res.header("Content-Disposition: attachment; filename=client.rs");
                    res.body_vec(source.into_bytes());
                }
                Err(err) => {
                    tracing::error!(error = %err, "client generation failed");
                    write_json_error(
                        res,
                        500,
                        serde_json::json!({"error": err.to_string()}),
                    );
                }
            }
            return Ok(());
        }

        write_json_error(
            res,
            404,
            serde_json::json!({"error": "Not Found", "method": method, "path": path}),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::parse_description;

    const DESCRIPTION: &str = r#"
service: demo
schemas:
  Item:
    type: object
    required: [id]
    properties:
      id: {type: integer}
routes:
  - method: GET
    path: /items
    response:
      type: array
      items: {$ref: Item}
  - method: GET
    path: /private
"#;

    #[test]
    fn test_status_reason() {
        assert_eq!(status_reason(200), "OK");
        assert_eq!(status_reason(404), "Not Found");
        assert_eq!(status_reason(500), "Internal Server Error");
    }

    #[test]
    fn test_client_source_generates_unit() {
        let description = parse_description(DESCRIPTION, true).unwrap();
        let service = ClientCodeService::new(description, None, &[]);
        let source = service.client_source().unwrap();
        assert!(source.contains("pub struct DemoClient {"));
        assert!(source.contains("fn get_items"));
    }

    #[test]
    fn test_excluded_paths_stay_out_of_the_client() {
        let description = parse_description(DESCRIPTION, true).unwrap();
        let service =
            ClientCodeService::new(description, None, &["/private".to_string()]);
        let source = service.client_source().unwrap();
        assert!(source.contains("fn get_items"));
        assert!(!source.contains("fn get_private"));
    }
}
