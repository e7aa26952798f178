//! CLI integration tests for one-shot mode.
//!
//! These tests spawn the Aspectra binary as a subprocess to verify output and
//! exit behaviour when a review is passed on the command line.

use std::process::{Command, Output};

use rstest::{fixture, rstest};
use serde_json::json;
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Returns the path to the built binary.
fn binary_path() -> std::path::PathBuf {
    // cargo test builds binaries in target/debug
    let mut path = std::env::current_exe()
        .unwrap_or_else(|error| panic!("failed to get current exe path: {error}"));
    path.pop(); // remove test binary name
    path.pop(); // remove deps
    path.push("aspectra");
    path
}

fn run_aspectra(args: &[&str]) -> Output {
    let working_dir = TempDir::new()
        .unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"));
    let mut command = Command::new(binary_path());
    command.args(args);
    command.current_dir(working_dir.path());

    // Ensure tests are hermetic even if the developer has Aspectra env vars set.
    command
        .env_remove("ASPECTRA_SERVER_URL")
        .env_remove("ASPECTRA_CHECKPOINT")
        .env_remove("ASPECTRA_DEVICE")
        .env_remove("ASPECTRA_API_KEY")
        .env_remove("ASPECTRA_REVIEW")
        .env_remove("ASPECTRA_LOG_FILE")
        .env_remove("ABSA_API_KEY");

    command
        .output()
        .unwrap_or_else(|error| panic!("failed to execute binary: {error}"))
}

/// Mock inference runtime; the server is declared first so it drops before
/// the Tokio runtime that started it.
struct InferenceRuntime {
    server: MockServer,
    _runtime: Runtime,
}

#[fixture]
fn inference_runtime() -> InferenceRuntime {
    let runtime =
        Runtime::new().unwrap_or_else(|error| panic!("failed to create runtime: {error}"));
    let server = runtime.block_on(MockServer::start());
    let create = Mock::given(method("POST"))
        .and(path("/v1/extractors"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"extractor_id": "ex-1", "device": "cpu"})),
        );
    let predict = Mock::given(method("POST"))
        .and(path("/v1/extractors/ex-1/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "aspect": ["battery life", "camera"],
            "sentiment": ["Positive", "Negative"],
            "confidence": [0.9812, 0.873],
        }])));
    runtime.block_on(create.mount(&server));
    runtime.block_on(predict.mount(&server));
    InferenceRuntime {
        server,
        _runtime: runtime,
    }
}

#[rstest]
fn blank_review_warns_without_loading_model() {
    let output = run_aspectra(&["--review", "   ", "--server-url", "http://127.0.0.1:9"]);

    assert!(output.status.success(), "blank review should not fail");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "Warning: Please enter a review to analyze.\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("Loading ABSA model"),
        "model should not be loaded for blank input: {stderr}"
    );
}

#[rstest]
fn review_is_printed_as_table(inference_runtime: InferenceRuntime) {
    let uri = inference_runtime.server.uri();

    let output = run_aspectra(&["--review", "Battery great, camera meh.", "--server-url", &uri]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("battery life | 😄 Positive | 98.12%"), "{stdout}");
    assert!(stdout.contains("camera       | 😞 Negative | 87.30%"), "{stdout}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Loading ABSA model"), "{stderr}");
}

#[rstest]
fn unreachable_runtime_is_fatal() {
    let output = run_aspectra(&["--review", "Nice.", "--server-url", "http://127.0.0.1:9"]);

    assert!(!output.status.success(), "load failure should exit non-zero");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Loading ABSA model"), "{stderr}");
    assert!(stderr.contains("failed to load ABSA model"), "{stderr}");
}

#[rstest]
fn unsupported_device_is_rejected() {
    let output = run_aspectra(&["--review", "Nice.", "--device", "tpu"]);

    assert!(!output.status.success(), "invalid device should exit non-zero");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported device 'tpu'"), "{stderr}");
}
