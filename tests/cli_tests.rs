use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary run from an empty directory so no stray config file is discovered
fn swingframes(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("swingframes").unwrap();
    cmd.current_dir(workdir.path())
        .env_remove("SWINGFRAMES_CONFIG")
        .env_remove("SWINGFRAMES_URL_PREFIX")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    swingframes(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("phases"))
        .stdout(predicate::str::contains("full-clip"))
        .stdout(predicate::str::contains("url"));
}

#[test]
fn test_url_for_phase_gif() {
    let dir = TempDir::new().unwrap();
    swingframes(&dir)
        .args(["url", "--analysis-id", "a1", "--phase", "Follow-Through!"])
        .assert()
        .success()
        .stdout("/api/frames/a1/follow_through_.gif\n");
}

#[test]
fn test_url_for_phase_still() {
    let dir = TempDir::new().unwrap();
    swingframes(&dir)
        .args(["url", "--analysis-id", "a1", "--phase", "Impact", "--still"])
        .assert()
        .success()
        .stdout("/api/frames/a1/impact.jpg\n");
}

#[test]
fn test_url_prefix_from_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("swingframes.toml"),
        "[swingframes]\nurl_prefix = \"https://cdn.example.com/frames/\"\n",
    )
    .unwrap();

    swingframes(&dir)
        .args(["url", "--analysis-id", "a1", "--phase", "Address"])
        .assert()
        .success()
        .stdout("https://cdn.example.com/frames/a1/address.gif\n");
}

#[test]
fn test_url_prefix_env_beats_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("swingframes.toml"),
        "[swingframes]\nurl_prefix = \"/from-file\"\n",
    )
    .unwrap();

    swingframes(&dir)
        .env("SWINGFRAMES_URL_PREFIX", "/from-env")
        .args(["url", "--analysis-id", "a1", "--phase", "Address"])
        .assert()
        .success()
        .stdout("/from-env/a1/address.gif\n");
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("swingframes.toml"), "[swingframes]\ngif_fps = 500\n").unwrap();

    swingframes(&dir)
        .args(["url", "--analysis-id", "a1", "--phase", "Address"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("gif_fps"));
}

#[test]
fn test_missing_required_argument() {
    let dir = TempDir::new().unwrap();
    swingframes(&dir)
        .args(["url", "--phase", "Impact"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--analysis-id"));
}

#[test]
fn test_phases_requires_existing_video() {
    let dir = TempDir::new().unwrap();
    swingframes(&dir)
        .args(["phases", "--video", "missing.mp4", "--analysis-id", "a1", "--phase", "Impact=1.0s"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input video does not exist"));
}

#[test]
fn test_phases_rejects_malformed_phase() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("swing.mp4"), b"").unwrap();

    swingframes(&dir)
        .args(["phases", "--video", "swing.mp4", "--analysis-id", "a1", "--phase", "Impact"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("NAME=TIMESTAMP"));
}
