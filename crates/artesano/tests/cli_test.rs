//! Integration tests for the `artesano` CLI binary.
//!
//! Argument parsing, help output and completions run without a backend;
//! command tests point `--api-url` at a wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `artesano` binary with env isolation.
///
/// Clears all `ARTESANO_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn artesano_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("artesano");
    cmd.env("HOME", "/tmp/artesano-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/artesano-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("ARTESANO_PROFILE")
        .env_remove("ARTESANO_API_URL")
        .env_remove("ARTESANO_OUTPUT")
        .env_remove("ARTESANO_INSECURE")
        .env_remove("ARTESANO_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let mut full: Vec<String> = vec!["--api-url".into(), server.uri()];
    full.extend(args.iter().map(|a| (*a).to_owned()));
    tokio::task::spawn_blocking(move || artesano_cmd().args(full).output().unwrap())
        .await
        .unwrap()
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn feedstock_json(id: i64, name: &str, products: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "feedstockCode": format!("F-{id}"),
        "name": name,
        "stock": 10,
        "unitOfMeasure": "KG",
        "products": products
    })
}

fn table_product_json() -> serde_json::Value {
    json!({
        "id": 4,
        "productCode": "MESA-01",
        "name": "Mesa",
        "unitPrice": 1500,
        "feedstocks": [
            { "id": 1, "feedstockCode": "CARV-01", "name": "Carvalho", "stock": 10, "quantity": 2 },
            { "id": 2, "feedstockCode": "VERN-01", "name": "Verniz", "stock": 3, "quantity": 1 }
        ]
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = artesano_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    artesano_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("catalog")
            .and(predicate::str::contains("feedstocks"))
            .and(predicate::str::contains("products"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    artesano_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("artesano"));
}

#[test]
fn test_products_subcommands_exist() {
    artesano_cmd()
        .args(["products", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("create"))
                .and(predicate::str::contains("delete"))
                .and(predicate::str::contains("capacity")),
        );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    artesano_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    artesano_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = artesano_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = artesano_cmd()
        .args(["--output", "invalid", "feedstocks", "list"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_config_show_no_config() {
    artesano_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("feedstock_page_size = 10"));
}

#[test]
fn test_unknown_profile_is_usage_error() {
    artesano_cmd()
        .args(["--profile", "galpao", "feedstocks", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("galpao"));
}

#[test]
fn test_product_create_needs_a_line() {
    artesano_cmd()
        .args(["products", "create", "--code", "X", "--name", "Y", "--price", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--line"));
}

// ── Against a backend ───────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_feedstocks_list_renders_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feedstocks"))
        .and(query_param("page", "0"))
        .and(query_param("size", "10"))
        .and(query_param("q", "carv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [feedstock_json(1, "Carvalho", json!([]))],
            "total": 1, "page": 0, "size": 10
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["feedstocks", "list", "--search", "carv"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Carvalho"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_in_use_feedstock_delete_is_refused() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feedstocks/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feedstock_json(
            1,
            "Carvalho",
            json!([
                { "id": 10, "productCode": "MESA-01", "name": "Mesa", "unitPrice": 900, "quantity": 2 },
                { "id": 11, "productCode": "CAD-01", "name": "Cadeira", "unitPrice": 300, "quantity": 1 }
            ]),
        )))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_against(&server, &["--yes", "feedstocks", "delete", "1"]).await;
    assert_eq!(output.status.code(), Some(6));
    let text = combined_output(&output);
    assert!(text.contains("Carvalho") && text.contains("2 product(s)"), "{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unused_feedstock_delete_sends_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feedstocks/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feedstock_json(
            7,
            "Pinus",
            json!([]),
        )))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/feedstocks/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["--yes", "feedstocks", "delete", "7"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_without_terminal_needs_yes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(table_product_json()))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_against(&server, &["products", "delete", "4"]).await;
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--yes"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_capacity_plain_prints_units() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(table_product_json()))
        .mount(&server)
        .await;

    let output = run_against(&server, &["-o", "plain", "products", "capacity", "4"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "3");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_product_exits_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let output = run_against(&server, &["products", "get", "99"]).await;
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("products list"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_product_create_sends_composition() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .and(body_json(json!({
            "productCode": "MESA-01",
            "name": "Mesa",
            "unitPrice": 1500.0,
            "feedstocks": [
                { "feedstockId": 1, "quantity": 2.0 },
                { "feedstockId": 2, "quantity": 1.0 }
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(table_product_json()))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        &[
            "-o", "json", "products", "create", "--code", "MESA-01", "--name", "Mesa", "--price",
            "1500", "--line", "1=2", "--line", "2=1",
        ],
    )
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["code"], "MESA-01");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_duplicate_code_is_a_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/feedstocks"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "code already exists" })),
        )
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        &["feedstocks", "create", "--code", "F-1", "--name", "Pinus", "--stock", "4"],
    )
    .await;
    assert_eq!(output.status.code(), Some(6));
    assert!(combined_output(&output).contains("code already exists"));
}
