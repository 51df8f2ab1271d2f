//! CLI smoke tests for the `hlspack` binary.

use assert_cmd::Command;
use predicates::str::contains;

fn hlspack() -> Command {
    Command::cargo_bin("hlspack").unwrap()
}

#[test]
fn version_prints_package_version() {
    hlspack()
        .arg("version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn validate_without_config_uses_defaults() {
    hlspack()
        .arg("validate")
        .assert()
        .success()
        .stdout(contains("Renditions: 4"));
}

#[test]
fn validate_accepts_custom_ladder() {
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("hlspack.toml");
    std::fs::write(
        &config,
        r#"
        [[packaging.renditions]]
        label = "540p"
        width = 960
        height = 540
        video_bitrate_kbps = 2000
        "#,
    )
    .unwrap();

    hlspack()
        .arg("validate")
        .arg(&config)
        .assert()
        .success()
        .stdout(contains("540p 960x540 @ 2000k"));
}

#[test]
fn validate_rejects_empty_ladder() {
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("hlspack.toml");
    std::fs::write(
        &config,
        r#"
        [packaging]
        renditions = []
        "#,
    )
    .unwrap();

    hlspack().arg("validate").arg(&config).assert().failure();
}

#[test]
fn package_rejects_missing_input() {
    let tmp = tempfile::tempdir().unwrap();
    hlspack()
        .args(["package", "no_such_file.mp4", "--output-dir"])
        .arg(tmp.path())
        .assert()
        .failure();
}

#[test]
fn check_tools_reports_both_engines() {
    // Success depends on the host having ffmpeg installed; only the report
    // contents are asserted.
    hlspack()
        .arg("check-tools")
        .assert()
        .stdout(contains("ffmpeg"))
        .stdout(contains("ffprobe"));
}

#[cfg(unix)]
#[test]
fn package_runs_end_to_end_with_stub_engine() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let stub = tmp.path().join("ffmpeg-stub");
    std::fs::write(&stub, "#!/bin/sh\nexit 0\n").unwrap();
    let mut perms = std::fs::metadata(&stub).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&stub, perms).unwrap();

    let config = tmp.path().join("hlspack.toml");
    std::fs::write(
        &config,
        format!("[tools]\nffmpeg_path = \"{}\"\n", stub.display()),
    )
    .unwrap();

    let input = tmp.path().join("clip.mp4");
    std::fs::write(&input, b"not actually video").unwrap();
    let out = tmp.path().join("out");

    hlspack()
        .arg("--config")
        .arg(&config)
        .arg("package")
        .arg(&input)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("master_clip.m3u8"));

    assert!(out.join("master_clip.m3u8").exists());
}
