// sanitize-md/tests/cli_integration_tests.rs
//! Command-line integration tests for the `sanitize-md` binary.
//!
//! Each test builds a scratch docs tree with `tempfile`, runs the binary with
//! `assert_cmd`, and checks stdout, the exit status, and the files on disk.
//! The working directory is always the scratch dir so a stray `.env` or
//! `./docs-source` in the repo cannot leak in.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn sanitize_md(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sanitize-md").unwrap();
    cmd.current_dir(cwd);
    cmd.env_remove("SANITIZE_MD_ROOT");
    cmd.env("RUST_LOG", "warn");
    cmd
}

#[test]
fn test_sanitize_rewrites_and_reports() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path().join("docs");
    let dirty = write(&root, "guide/intro.md", "Use <Component foo=\"bar\" /> here.\n<X> and <a=1>\n");
    write(&root, "clean.md", "Nothing here.\n");
    let image = write(&root, "img/logo.svg", "<svg><Foo/></svg>");

    let assert = sanitize_md(dir.path())
        .args(["sanitize", "--root"])
        .arg(&root)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.first(), Some(&"Sanitizing markdown…"));
    assert_eq!(lines.last(), Some(&"Done."));
    assert_eq!(lines.len(), 3, "unexpected stdout: {}", stdout);
    assert_eq!(lines[1], format!("Sanitized: {}", dirty.display()));

    assert_eq!(
        fs::read_to_string(&dirty)?,
        "Use `<Component foo=\"bar\" />` here.\n`<X>` and `<a=1>`\n"
    );
    assert_eq!(fs::read_to_string(&image)?, "<svg><Foo/></svg>");
    Ok(())
}

#[test]
fn test_second_sanitize_run_reports_nothing() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path().join("docs");
    let doc = write(&root, "a.md", "Generic <T> and <Vec<T>>\n");

    sanitize_md(dir.path()).args(["sanitize", "--root"]).arg(&root).assert().success();
    let after_first = fs::read_to_string(&doc)?;

    sanitize_md(dir.path())
        .args(["sanitize", "--root"])
        .arg(&root)
        .assert()
        .success()
        .stdout("Sanitizing markdown…\nDone.\n");
    assert_eq!(fs::read_to_string(&doc)?, after_first);
    Ok(())
}

#[test]
fn test_default_root_is_docs_source() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let doc = write(dir.path(), "docs-source/index.md", "<Foo>\n");

    sanitize_md(dir.path())
        .arg("sanitize")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sanitized:"));
    assert_eq!(fs::read_to_string(&doc)?, "`<Foo>`\n");
    Ok(())
}

#[test]
fn test_root_from_environment() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path().join("elsewhere");
    let doc = write(&root, "page.md", "<Bar/>\n");

    sanitize_md(dir.path())
        .env("SANITIZE_MD_ROOT", &root)
        .arg("sanitize")
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&doc)?, "`<Bar/>`\n");
    Ok(())
}

#[test]
fn test_missing_root_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    sanitize_md(dir.path())
        .args(["sanitize", "--root", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
    Ok(())
}

#[test]
fn test_keep_going_still_fails_the_run() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path().join("docs");
    fs::create_dir_all(&root)?;
    fs::write(root.join("a_bad.md"), [0xff, 0xfe, b'<', b'A', b'>'])?;
    let good = write(&root, "b_good.md", "<Foo>\n");

    sanitize_md(dir.path())
        .args(["sanitize", "--keep-going", "--root"])
        .arg(&root)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Sanitized:").and(predicate::str::contains("b_good.md")))
        .stderr(predicate::str::contains("could not be sanitized"));
    assert_eq!(fs::read_to_string(&good)?, "`<Foo>`\n");
    Ok(())
}

#[test]
fn test_check_exits_non_zero_without_writing() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path().join("docs");
    let doc = write(&root, "a.md", "<Foo>\n");

    sanitize_md(dir.path())
        .args(["check", "--root"])
        .arg(&root)
        .assert()
        .code(1)
        .stdout(predicate::str::diff(format!("Would sanitize: {}\n", doc.display())));
    assert_eq!(fs::read_to_string(&doc)?, "<Foo>\n");
    Ok(())
}

#[test]
fn test_check_passes_on_clean_tree() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path().join("docs");
    write(&root, "a.md", "Already `<Foo>` fine.\n");

    sanitize_md(dir.path())
        .args(["check", "--root"])
        .arg(&root)
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("are clean"));
    Ok(())
}

#[test]
fn test_check_json_report() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path().join("docs");
    write(&root, "a.md", "<Foo> <Bar>\n");
    write(&root, "b.md", "clean\n");

    let assert = sanitize_md(dir.path())
        .args(["check", "--json-stdout", "--root"])
        .arg(&root)
        .assert()
        .code(1);

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(report["visited"], 2);
    assert_eq!(report["would_change"].as_array().map(Vec::len), Some(1));
    assert_eq!(report["summary"][0]["rule_name"], "tag");
    assert_eq!(report["summary"][0]["occurrences"], 2);
    Ok(())
}

#[test]
fn test_custom_rule_file_and_disable() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path().join("docs");
    let doc = write(&root, "a.md", "Hi {name}, <Foo> and <X>\n");
    let rules = write(
        dir.path(),
        "rules.yaml",
        "rules:\n  - name: curly\n    pattern: '\\{([a-z]+)\\}'\n    replace_with: '`{${1}}`'\n",
    );

    sanitize_md(dir.path())
        .args(["sanitize", "--disable", "tag", "--config"])
        .arg(&rules)
        .arg("--root")
        .arg(&root)
        .assert()
        .success();

    // With `tag` disabled, <Foo> survives and <X> falls through to short_tag.
    assert_eq!(fs::read_to_string(&doc)?, "Hi `{name}`, <Foo> and `<X>`\n");
    Ok(())
}

#[test]
fn test_invalid_rule_file_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let rules = write(dir.path(), "rules.yaml", "rules:\n  - name: broken\n    pattern: '(('\n");

    sanitize_md(dir.path())
        .args(["rules", "--config"])
        .arg(&rules)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load rule file"));
    Ok(())
}

#[test]
fn test_rules_lists_in_order() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let assert = sanitize_md(dir.path()).arg("rules").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let names: Vec<&str> = stdout
        .lines()
        .filter(|l| !l.starts_with(' '))
        .collect();
    assert_eq!(
        names,
        vec!["1. self_closing_tag", "2. tag", "3. short_tag", "4. eq_attr"]
    );
    Ok(())
}
