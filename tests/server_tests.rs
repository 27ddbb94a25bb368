use routesmith::fetch::fetch_client;
use routesmith::registry::parse_description;
use routesmith::server::{ClientCodeService, HttpServer};

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
    path: /internal/debug
"#;

#[test]
fn test_serve_and_fetch_round_trip() {
    let description = parse_description(DESCRIPTION, true).unwrap();
    let service = ClientCodeService::new(
        description,
        Some("DemoClient".to_string()),
        &["/internal/debug".to_string()],
    );
    let expected = service.client_source().unwrap();
    assert!(expected.contains("fn get_items"));
    assert!(!expected.contains("fn get_internal_debug"));

    let addr = "127.0.0.1:18643";
    let handle = HttpServer(service).start(addr).unwrap();
    handle.wait_ready().unwrap();

    let health = reqwest::blocking::get(format!("http://{addr}/health")).unwrap();
    assert!(health.status().is_success());

    let response = reqwest::blocking::get(format!("http://{addr}/client.rs")).unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/x-rust")
    );
    let body = response.text().unwrap();
    assert_eq!(body, expected);

    let missing = reqwest::blocking::get(format!("http://{addr}/nope")).unwrap();
    assert_eq!(missing.status().as_u16(), 404);

    // The fetch tool normalizes the URL and writes the payload verbatim.
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("client.rs");
    fetch_client(&format!("http://{addr}"), &output).unwrap();
    assert_eq!(std::fs::read_to_string(&output).unwrap(), expected);

    handle.stop();
}
