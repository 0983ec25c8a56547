use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_input(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_cli_dump() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let file = write_input(&dir, "likes.nt", "a likes b .\nb likes c .\n");

    let mut cmd = Command::cargo_bin("skein")?;
    cmd.arg("dump").arg(&file).arg("--quiet");
    cmd.assert().success().stdout("a\n  b\nb\n  c\nc\n");
    Ok(())
}

#[test]
fn test_cli_dump_labeled_predicate() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let file = write_input(&dir, "likes.nt", "b likes a .\nc knows b .\n");

    let mut cmd = Command::cargo_bin("skein")?;
    cmd.arg("dump")
        .arg(&file)
        .arg("--labeled")
        .arg("--edge-labels")
        .arg("predicate")
        .arg("-q");
    cmd.assert()
        .success()
        .stdout("a\n  likes\nb\n  knows\nc\n");
    Ok(())
}

#[test]
fn test_cli_dump_labeled_from_config() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let file = write_input(&dir, "likes.nt", "b likes a .\n");
    let config = write_input(&dir, "skein.json", r#"{"edge_labels": "predicate"}"#);

    let mut cmd = Command::cargo_bin("skein")?;
    cmd.arg("--config")
        .arg(&config)
        .arg("dump")
        .arg(&file)
        .arg("--labeled")
        .arg("-q");
    cmd.assert().success().stdout("a\n  likes\nb\n");
    Ok(())
}

#[test]
fn test_cli_stats() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let file = write_input(
        &dir,
        "social.nt",
        "alice knows bob .\nbob knows alice .\nbob knows carol .\n",
    );

    let mut cmd = Command::cargo_bin("skein")?;
    cmd.arg("stats").arg(&file).arg("--quiet");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Records:        3"))
        .stdout(predicate::str::contains("Vertices:       3"))
        .stdout(predicate::str::contains("Edges:          2"));
    Ok(())
}

#[test]
fn test_cli_empty_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let file = write_input(&dir, "empty.nt", "");

    let mut cmd = Command::cargo_bin("skein")?;
    cmd.arg("dump").arg(&file).arg("--quiet");
    cmd.assert().success().stdout("");
    Ok(())
}

#[test]
fn test_cli_malformed_record() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let file = write_input(&dir, "broken.nt", "a likes b .\nb likes c\n");

    let mut cmd = Command::cargo_bin("skein")?;
    cmd.arg("dump").arg(&file).arg("--quiet");
    cmd.assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains(":2: error reading end of record symbol"));
    Ok(())
}

#[test]
fn test_cli_missing_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    let mut cmd = Command::cargo_bin("skein")?;
    cmd.arg("dump").arg(dir.path().join("absent.nt"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("absent.nt"));
    Ok(())
}
