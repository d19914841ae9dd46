use std::path::Path;
use std::process::Command;

fn studio_binary(dir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ad-studio"));
    // No inherited secrets and no .env to pick up
    command.env_clear().current_dir(dir);
    command
}

#[test]
fn it_should_exit_before_serving_without_api_key() {
    let dir = tempfile::tempdir().unwrap();
    let output = studio_binary(dir.path())
        .env("GCP_VI_SERVICE_ACCOUNT_JSON", "{}")
        .env("PORT", "0")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("GOOGLE_API_KEY"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn it_should_exit_before_serving_without_service_account() {
    let dir = tempfile::tempdir().unwrap();
    let output = studio_binary(dir.path())
        .env("GOOGLE_API_KEY", "key")
        .env("PORT", "0")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("GCP_VI_SERVICE_ACCOUNT_JSON"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn it_should_exit_on_unusable_service_account() {
    let dir = tempfile::tempdir().unwrap();
    let output = studio_binary(dir.path())
        .env("GOOGLE_API_KEY", "key")
        .env("GCP_VI_SERVICE_ACCOUNT_JSON", r#"{"type": "service_account"}"#)
        .env("PORT", "0")
        .output()
        .unwrap();

    assert!(!output.status.success());
    // The credentials file is written before it is parsed
    assert!(dir.path().join("tts_credentials.json").exists());
}
