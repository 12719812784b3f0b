use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Throwaway project directory seeded with tests/fixtures.
struct GameplanTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl GameplanTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures");

        let dest = tmp.path().join("project");
        Self::copy_dir(&fixtures, &dest)?;

        Ok(Self {
            _tmp: tmp,
            root: dest,
        })
    }

    fn copy_dir(src: &Path, dst: &Path) -> std::io::Result<()> {
        let mut options = fs_extra::dir::CopyOptions::new();
        options.skip_exist = true;
        options.content_only = true;

        std::fs::create_dir_all(dst)?;
        fs_extra::dir::copy(src, dst, &options)
            .map(|_| ())
            .map_err(|e| std::io::Error::other(e.to_string()))
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    fn gameplan(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gameplan"));
        cmd.current_dir(&self.root)
            .env_remove("GAMEPLAN_REFERENCE")
            .env_remove("GAMEPLAN_CHUNK_SIZE")
            .env_remove("GAMEPLAN_REPORT_LIMIT")
            .env_remove("RUST_LOG");
        cmd
    }

    fn validate_json(&self, input: &str) -> Command {
        let mut cmd = self.gameplan();
        cmd.args([
            "validate",
            "--reference",
            "reference.json",
            "--input",
            input,
            "--format",
            "json",
        ]);
        cmd
    }
}

fn stdout_json(output: &std::process::Output) -> Result<serde_json::Value> {
    let text = String::from_utf8(output.stdout.clone())?;
    serde_json::from_str(&text).with_context(|| format!("stdout is not JSON:\n{}", text))
}

#[test]
fn test_clean_upload_can_be_imported() -> Result<()> {
    let env = GameplanTestEnv::new()?;

    env.gameplan()
        .args(["validate", "-r", "reference.json", "-i", "uploads/clean.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("can be imported"))
        .stdout(predicate::str::contains("allowed"));
    Ok(())
}

#[test]
fn test_blocked_upload_exits_with_error() -> Result<()> {
    let env = GameplanTestEnv::new()?;

    env.gameplan()
        .args(["validate", "-r", "reference.json", "-i", "blocked.csv"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("CRITICAL"))
        .stdout(predicate::str::contains("Unknown Campaign X"))
        .stderr(predicate::str::contains("Import blocked"));
    Ok(())
}

#[test]
fn test_json_report_shape() -> Result<()> {
    let env = GameplanTestEnv::new()?;

    let output = env.validate_json("blocked.csv").output()?;
    assert_eq!(output.status.code(), Some(1));

    let json = stdout_json(&output)?;
    assert_eq!(json["canImport"], false);
    let report = &json["files"][0]["report"];
    assert_eq!(json["files"][0]["rows"], 2);
    assert_eq!(report["summary"]["critical"], 2);
    assert_eq!(report["summary"]["warning"], 2);
    assert_eq!(report["summary"]["suggestion"], 1);
    assert_eq!(report["totalIssues"], 5);
    assert_eq!(report["truncated"], false);
    // Spreadsheet numbering: header is row 1
    assert_eq!(report["issues"][0]["rowIndex"], 2);
    assert_eq!(report["issues"][0]["column"], "Campaign");
    Ok(())
}

#[test]
fn test_directory_input_validates_every_csv() -> Result<()> {
    let env = GameplanTestEnv::new()?;

    let output = env.validate_json(".").output()?;
    let json = stdout_json(&output)?;

    let files: Vec<String> = json["files"]
        .as_array()
        .context("files must be an array")?
        .iter()
        .filter_map(|f| f["file"].as_str().map(str::to_string))
        .collect();
    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("blocked.csv"));
    assert!(files[1].ends_with("clean.csv"));
    assert_eq!(json["files"][1]["report"]["summary"]["canImport"], true);
    Ok(())
}

#[test]
fn test_project_config_caps_the_report() -> Result<()> {
    let env = GameplanTestEnv::new()?;
    std::fs::write(
        env.path("gameplan.yaml"),
        "name: test\nvalidation:\n  report_limit: 2\n",
    )?;

    let json = stdout_json(&env.validate_json("blocked.csv").output()?)?;
    let report = &json["files"][0]["report"];
    assert_eq!(report["issues"].as_array().map(Vec::len), Some(2));
    assert_eq!(report["totalIssues"], 5);
    assert_eq!(report["truncated"], true);

    // Flag beats file
    let json = stdout_json(&env.validate_json("blocked.csv").args(["--limit", "1"]).output()?)?;
    assert_eq!(json["files"][0]["report"]["issues"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[test]
fn test_env_override_and_downgraded_unlinked_campaigns() -> Result<()> {
    let env = GameplanTestEnv::new()?;
    std::fs::write(
        env.path("gameplan.yml"),
        "validation:\n  unlinked_campaign_severity: warning\n",
    )?;

    let output = env
        .validate_json("blocked.csv")
        .env("GAMEPLAN_REPORT_LIMIT", "3")
        .output()?;
    let json = stdout_json(&output)?;
    let report = &json["files"][0]["report"];
    assert_eq!(report["issues"].as_array().map(Vec::len), Some(3));
    assert_eq!(report["summary"]["critical"], 1);
    assert_eq!(report["summary"]["warning"], 3);
    Ok(())
}

#[test]
fn test_output_file_is_written() -> Result<()> {
    let env = GameplanTestEnv::new()?;

    env.gameplan()
        .args([
            "validate",
            "-r",
            "reference.json",
            "-i",
            "uploads",
            "-o",
            "report.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("JSON report saved"));

    let content = std::fs::read_to_string(env.path("report.json"))?;
    let json: serde_json::Value = serde_json::from_str(&content)?;
    assert_eq!(json["canImport"], true);
    Ok(())
}

#[test]
fn test_unreadable_reference_is_fatal() -> Result<()> {
    let env = GameplanTestEnv::new()?;
    std::fs::write(env.path("broken.json"), "{ \"ranges\": [")?;

    env.gameplan()
        .args(["validate", "-r", "broken.json", "-i", "blocked.csv"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("could not be parsed as json"));
    Ok(())
}

#[test]
fn test_unsupported_reference_format() -> Result<()> {
    let env = GameplanTestEnv::new()?;

    env.gameplan()
        .args(["validate", "-r", "reference.xml", "-i", "blocked.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
    Ok(())
}

#[test]
fn test_inspect_clean_reference() -> Result<()> {
    let env = GameplanTestEnv::new()?;

    env.gameplan()
        .args(["inspect", "-r", "reference.json", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Campaigns"))
        .stdout(predicate::str::contains("No data-quality anomalies"));
    Ok(())
}

#[test]
fn test_inspect_check_fails_on_anomalies() -> Result<()> {
    let env = GameplanTestEnv::new()?;
    std::fs::write(
        env.path("dirty.yaml"),
        "ranges:\n  - name: Deo\ncampaigns:\n  - name: Fresh Launch\ncampaign_range:\n  Promo: Deo\n",
    )?;

    env.gameplan()
        .args(["inspect", "-r", "dirty.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Promo"));

    env.gameplan()
        .args(["inspect", "-r", "dirty.yaml", "--check"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--check mode"));
    Ok(())
}
