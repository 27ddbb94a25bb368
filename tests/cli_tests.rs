use std::fs;
use std::process::Command;

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
"#;

#[test]
fn test_cli_generate_writes_client_file() {
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("service.yaml");
    fs::write(&registry, DESCRIPTION).unwrap();
    let output = dir.path().join("client.rs");

    let exe = env!("CARGO_BIN_EXE_routesmith");
    let status = Command::new(exe)
        .arg("generate")
        .arg("--registry")
        .arg(&registry)
        .arg("--output")
        .arg(&output)
        .status()
        .expect("run cli");
    assert!(status.success());

    let source = fs::read_to_string(&output).unwrap();
    assert!(source.starts_with("// @generated by routesmith."));
    assert!(source.contains("pub struct DemoClient {"));
    assert!(source.contains("fn get_items"));
}

#[test]
fn test_cli_generate_default_output_uses_slug() {
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("service.yaml");
    fs::write(&registry, DESCRIPTION).unwrap();

    let exe = env!("CARGO_BIN_EXE_routesmith");
    let status = Command::new(exe)
        .current_dir(dir.path())
        .arg("generate")
        .arg("--registry")
        .arg(&registry)
        .status()
        .expect("run cli");
    assert!(status.success());
    assert!(dir.path().join("demo_client.rs").exists());
}

#[test]
fn test_cli_generate_fails_on_duplicate_routes() {
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("service.yaml");
    fs::write(
        &registry,
        "service: demo\nroutes:\n  - {method: GET, path: /x}\n  - {method: GET, path: /x}\n",
    )
    .unwrap();
    let output = dir.path().join("client.rs");

    let exe = env!("CARGO_BIN_EXE_routesmith");
    let status = Command::new(exe)
        .arg("generate")
        .arg("--registry")
        .arg(&registry)
        .arg("--output")
        .arg(&output)
        .status()
        .expect("run cli");
    assert!(!status.success());
    // Nothing partial is written on a fatal error.
    assert!(!output.exists());
}

#[test]
fn test_cli_fetch_maps_network_failure_to_nonzero_exit() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("client.rs");

    let exe = env!("CARGO_BIN_EXE_routesmith");
    let status = Command::new(exe)
        .arg("fetch")
        .arg("--url")
        .arg("http://127.0.0.1:9/")
        .arg("--output")
        .arg(&output)
        .status()
        .expect("run cli");
    assert!(!status.success());
    assert!(!output.exists());
}
