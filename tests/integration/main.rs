//! Integration tests for Repo-Ray
//!
//! These tests drive the built binary and a live server end to end.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const FLAT_LISTING: &str = r#"[
    {"name": "README.md", "type": "file"},
    {"name": "src", "type": "dir"},
    {"name": ".gitignore", "type": "file"}
]"#;

const TREE_LISTING: &str = r#"{
    "sha": "abc123",
    "tree": [
        {"path": "src", "type": "tree"},
        {"path": "src/a.ts", "type": "blob"},
        {"path": "src/b.ts", "type": "blob"},
        {"path": "node_modules/left-pad/index.js", "type": "blob"}
    ],
    "truncated": false
}"#;

fn repo_ray(dir: &TempDir, args: &[&str], stdin: Option<&str>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_repo-ray"))
        .args(args)
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run repo-ray binary");

    {
        let mut pipe = child.stdin.take().unwrap();
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).unwrap();
        }
    }
    child.wait_with_output().unwrap()
}

fn write_listing(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    let output = repo_ray(&dir, &["--help"], None);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Turn repository listings into architecture diagrams"));
    assert!(stdout.contains("render"));
}

#[test]
fn test_render_flat_listing_from_file() {
    let dir = TempDir::new().unwrap();
    let file = write_listing(&dir, "flat.json", FLAT_LISTING);
    let output = repo_ray(&dir, &["render", &file, "--no-icons"], None);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.starts_with("graph TD\n"));
    assert!(stdout.contains(r#">"README.md"]"#));
    assert!(stdout.contains(r#"["src"]"#));
    assert!(!stdout.contains("gitignore"));
}

#[test]
fn test_render_tree_listing_from_stdin() {
    let dir = TempDir::new().unwrap();
    let output = repo_ray(&dir, &["render", "--name", "octo/demo", "--direction", "lr"], Some(TREE_LISTING));
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.starts_with("graph LR\n"));
    assert!(stdout.contains("octo/demo"));
    assert_eq!(stdout.matches(" --> ").count(), 3);
    assert!(!stdout.contains("left"));
}

#[test]
fn test_render_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let first = repo_ray(&dir, &["render"], Some(TREE_LISTING));
    let second = repo_ray(&dir, &["render"], Some(TREE_LISTING));
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_render_json_output() {
    let dir = TempDir::new().unwrap();
    let output = repo_ray(&dir, &["render", "--json"], Some(TREE_LISTING));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(value["mode"], "hierarchical");
    assert_eq!(value["stats"]["listed"], 4);
    assert_eq!(value["stats"]["filtered"], 3);
}

#[test]
fn test_render_rejects_malformed_listing() {
    let dir = TempDir::new().unwrap();
    let output = repo_ray(&dir, &["render"], Some(r#"{"files": []}"#));
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("invalid listing"));
}

#[test]
fn test_config_file_sets_cap() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("repo-ray.toml"), "[transform]\nflat_cap = 1\nicons = false\n").unwrap();
    let output = repo_ray(&dir, &["render"], Some(FLAT_LISTING));
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains(r#"OVERFLOW["Other entries: 1"]"#));
    assert!(stdout.contains("ROOT -.-> OVERFLOW"));
}

#[test]
fn test_check_reports_ambiguous_paths() {
    let dir = TempDir::new().unwrap();
    let listing = r#"{"tree": [
        {"path": "docs", "type": "blob"},
        {"path": "docs/guide.md", "type": "blob"}
    ]}"#;
    let output = repo_ray(&dir, &["check"], Some(listing));
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("ambiguous_path"));
    assert!(stdout.contains("ok: 3 nodes, 2 edges"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    let output = repo_ray(&dir, &["version"], None);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Repo-Ray v"));
}

/// Start a server on an ephemeral port and exercise the HTTP API
#[tokio::test]
async fn test_server_visualize_roundtrip() {
    use repo_ray_core::TransformConfig;
    use repo_ray_server::{RepoRayServer, ServerConfig};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = RepoRayServer::new(TransformConfig::default(), ServerConfig::default());
    tokio::spawn(server.serve(listener));

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/api/visualize"))
        .header("content-type", "application/json")
        .body(TREE_LISTING)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "SUCCESS");
    assert!(body["diagram"].as_str().unwrap().contains("📁 src"));

    let response = client
        .post(format!("http://{addr}/api/visualize"))
        .body("null")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let health: serde_json::Value = client
        .get(format!("http://{addr}/api/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");
}
