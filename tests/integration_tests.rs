//! Integration tests for butterfly-visit
//!
//! These tests run the library pipeline and the compiled binary against a
//! local mock Nominatim server, so no network access is needed. The binary
//! runs that talk to the mock server are skipped with `ci-tests-disabled`.

use std::path::Path;
use std::process::{Command, Output};
use std::time::Duration;

use butterfly_visit::{
    plan_for_owner, GeocoderConfig, NominatimGeocoder, PlanOptions, Sheet, SheetConfig,
};
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHEET: &str = "\
Proprietário,Endereço,Cidade
Ana,Rua A,Curitiba
Bruno,Rua Z,Londrina
Ana,Rua Perdida,Curitiba
Ana,Rua C,Curitiba
Ana,Rua B,Curitiba
";

/// Mock server that knows Rua A/B/C and Rua Z; anything else gets a 404
async fn mock_nominatim() -> MockServer {
    let server = MockServer::start().await;
    for (address, lat, lon) in [
        ("Rua A", "10.0", "10.0"),
        ("Rua B", "10.0", "11.0"),
        ("Rua C", "12.0", "10.0"),
        ("Rua Z", "50.0", "50.0"),
    ] {
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", address))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "display_name": format!("{address}, Brasil"), "lat": lat, "lon": lon }
            ])))
            .mount(&server)
            .await;
    }
    server
}

fn write_sheet(dir: &Path, content: &str) -> std::path::PathBuf {
    let sheet_path = dir.join("visits.csv");
    std::fs::write(&sheet_path, content).unwrap();
    sheet_path
}

/// Run the compiled binary off the async runtime
async fn run_binary(args: Vec<String>) -> Output {
    tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_butterfly-visit"))
            .args(&args)
            .env("RUST_LOG", "error")
            .output()
            .expect("Failed to execute butterfly-visit")
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_plan_for_owner_against_mock_nominatim() {
    let server = mock_nominatim().await;
    let dir = tempdir().unwrap();

    let sheet = Sheet::from_reader(SHEET.as_bytes(), &SheetConfig::default()).unwrap();
    let geocoder = NominatimGeocoder::new(GeocoderConfig {
        base_url: server.uri(),
        min_interval: Duration::ZERO,
        max_retries: 0,
        ..Default::default()
    })
    .unwrap();
    let options = PlanOptions {
        route_path: dir.path().join("pontos_rota.txt"),
        ..Default::default()
    };

    let plan = plan_for_owner(&sheet, "Ana", &geocoder, &options).await.unwrap();

    assert_eq!(plan.located_count(), 3);
    assert_eq!(plan.route.labels(), ["Rua A", "Rua B", "Rua C", "Rua Perdida"]);
    assert_eq!(
        std::fs::read_to_string(&options.route_path).unwrap(),
        "Rua A\nRua B\nRua C\nRua Perdida\n"
    );
    assert_eq!(
        plan.link.as_deref(),
        Some("https://www.google.com/maps/dir/Rua%20A/Rua%20B/Rua%20C/Rua%20Perdida")
    );
}

#[tokio::test]
#[cfg(not(feature = "ci-tests-disabled"))]
async fn test_cli_full_run() {
    let server = mock_nominatim().await;
    let dir = tempdir().unwrap();
    let sheet_path = write_sheet(dir.path(), SHEET);
    let route_path = dir.path().join("ana.txt");

    let output = run_binary(vec![
        sheet_path.to_string_lossy().to_string(),
        "--owner".to_string(),
        "Ana".to_string(),
        "--output".to_string(),
        route_path.to_string_lossy().to_string(),
        "--geocoder-url".to_string(),
        server.uri(),
        "--delay-ms".to_string(),
        "0".to_string(),
    ])
    .await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "CLI should succeed. Stderr: {stderr}");

    assert_eq!(
        stdout.trim(),
        "https://www.google.com/maps/dir/Rua%20A/Rua%20B/Rua%20C/Rua%20Perdida"
    );
    assert!(stderr.contains("3 of 4 addresses located"), "Stderr: {stderr}");
    assert_eq!(
        std::fs::read_to_string(&route_path).unwrap(),
        "Rua A\nRua B\nRua C\nRua Perdida\n"
    );
}

#[tokio::test]
#[cfg(not(feature = "ci-tests-disabled"))]
async fn test_cli_single_address_warns_without_link() {
    let server = mock_nominatim().await;
    let dir = tempdir().unwrap();
    let sheet_path = write_sheet(dir.path(), SHEET);
    let route_path = dir.path().join("bruno.txt");

    let output = run_binary(vec![
        sheet_path.to_string_lossy().to_string(),
        "--owner".to_string(),
        "Bruno".to_string(),
        "-o".to_string(),
        route_path.to_string_lossy().to_string(),
        "--geocoder-url".to_string(),
        server.uri(),
        "--delay-ms".to_string(),
        "0".to_string(),
    ])
    .await;

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "Stderr: {stderr}");
    assert!(output.stdout.is_empty());
    assert!(stderr.contains("at least two addresses"), "Stderr: {stderr}");
    assert_eq!(std::fs::read_to_string(&route_path).unwrap(), "Rua Z\n");
}

#[tokio::test]
async fn test_cli_list_owners() {
    let dir = tempdir().unwrap();
    let sheet_path = write_sheet(dir.path(), SHEET);

    let output = run_binary(vec![
        sheet_path.to_string_lossy().to_string(),
        "--list-owners".to_string(),
    ])
    .await;

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Ana\nBruno\n");
}

#[tokio::test]
async fn test_cli_unknown_owner_fails_with_suggestion() {
    let dir = tempdir().unwrap();
    let sheet_path = write_sheet(dir.path(), SHEET);

    let output = run_binary(vec![
        sheet_path.to_string_lossy().to_string(),
        "--owner".to_string(),
        "Bruna".to_string(),
        "--dry-run".to_string(),
    ])
    .await;

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Did you mean 'Bruno'?"), "Stderr: {stderr}");
}

#[tokio::test]
async fn test_cli_missing_column_fails() {
    let dir = tempdir().unwrap();
    let sheet_path = write_sheet(dir.path(), "Proprietário,Endereco\nAna,Rua A\n");

    let output = run_binary(vec![
        sheet_path.to_string_lossy().to_string(),
        "--list-owners".to_string(),
    ])
    .await;

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("no 'Endereço' column"), "Stderr: {stderr}");
    assert!(stderr.contains("Did you mean 'Endereco'?"), "Stderr: {stderr}");
}

#[tokio::test]
async fn test_cli_dry_run_does_not_write() {
    let dir = tempdir().unwrap();
    let sheet_path = write_sheet(dir.path(), SHEET);
    let route_path = dir.path().join("never.txt");

    let output = run_binary(vec![
        sheet_path.to_string_lossy().to_string(),
        "--dry-run".to_string(),
        "-o".to_string(),
        route_path.to_string_lossy().to_string(),
    ])
    .await;

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "Stderr: {stderr}");
    assert!(stderr.contains("[DRY RUN] Would geocode 3 addresses for 'Ana'"), "Stderr: {stderr}");
    assert!(!route_path.exists());
}

#[test]
fn test_cli_help_works() {
    let output = Command::new(env!("CARGO_BIN_EXE_butterfly-visit"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should exit successfully");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("butterfly-visit"), "Help output should contain program name");
    assert!(stdout.contains("Usage:"), "Help output should contain usage information");
    assert!(stdout.contains("--owner"), "Help output should list --owner");
}

#[test]
fn test_cli_version_works() {
    let output = Command::new(env!("CARGO_BIN_EXE_butterfly-visit"))
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Version command should exit successfully");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "Version output should contain version number");
}
