//! Command-line tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const SOURCE: &str = r#"
/// <summary>Does X.</summary>
public class Foo
{
    /// <summary>counter</summary>
    private int x;

    /// <summary>Runs it</summary>
    public void Run() { }
}
"#;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("xmldoc-tables").unwrap();
    cmd.env_remove("XMLDOC_TABLES_LOG");
    cmd
}

#[test]
fn test_raw_rows_from_stdin() {
    cli()
        .write_stdin(SOURCE)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("% Types\nFoo & Does X. \\\\\n"))
        .stdout(predicate::str::contains("% Foo: Fields\nx & private & int & "))
        .stdout(predicate::str::contains(
            "% Foo: Methods\nRun & public & void & () & Runs it \\\\\n",
        ));
}

#[test]
fn test_latex_format_from_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Foo.cs");
    fs::write(&input, SOURCE).unwrap();

    cli()
        .arg(&input)
        .args(["--format", "latex", "--booktabs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\\begin{tabular}").count(3))
        .stdout(predicate::str::contains("\\toprule"))
        .stdout(predicate::str::contains("\\multicolumn{2}{p{0.45\\linewidth}}{counter}"));
}

#[test]
fn test_output_directory() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tables");

    cli()
        .arg("-o")
        .arg(&out)
        .write_stdin(SOURCE)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(
        fs::read_to_string(out.join("classes.tex")).unwrap(),
        "Foo & Does X. \\\\\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("Foo.methods.tex")).unwrap(),
        "Run & public & void & () & Runs it \\\\\n"
    );
    assert!(out.join("Foo.fields.tex").exists());
    assert!(!out.join("Foo.properties.tex").exists());
}

#[test]
fn test_colliding_owner_file_names() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("tables");
    let source = "class Ünï {\n  /// <summary>a</summary>\n  int a;\n}\n\
                  class _n_ {\n  /// <summary>b</summary>\n  int b;\n}\n";

    cli().arg("-o").arg(&out).write_stdin(source).assert().success();

    assert!(fs::read_to_string(out.join("_n_.fields.tex"))
        .unwrap()
        .starts_with("a & "));
    assert!(fs::read_to_string(out.join("_n_-2.fields.tex"))
        .unwrap()
        .starts_with("b & "));
}

#[test]
fn test_unwritable_output_directory() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("taken");
    fs::write(&file, "").unwrap();

    cli()
        .arg("-o")
        .arg(&file)
        .write_stdin(SOURCE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to create the output directory"));
}

#[test]
fn test_json_format() {
    cli()
        .args(["--format", "json"])
        .write_stdin(SOURCE)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"class_table\""))
        .stdout(predicate::str::contains("\"Foo\""));
}

#[test]
fn test_summary_field_flag() {
    cli()
        .args(["--summary-field", "remarks"])
        .write_stdin("/// <remarks>Noted.</remarks>\nclass R { }")
        .assert()
        .success()
        .stdout(predicate::str::contains("R & Noted. \\\\"));
}

#[test]
fn test_syntax_errors_are_reported() {
    let broken = "/// <summary>kept</summary>\nclass C { ) }";

    cli()
        .write_stdin(broken)
        .assert()
        .success()
        .stdout(predicate::str::contains("C & kept"))
        .stderr(predicate::str::contains("<stdin>:"))
        .stderr(predicate::str::contains("error"));

    cli()
        .arg("--quiet")
        .write_stdin(broken)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    cli()
        .arg("--strict")
        .write_stdin(broken)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--strict"));
}

#[test]
fn test_missing_input_file() {
    cli()
        .arg("does-not-exist.cs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read does-not-exist.cs"));
}
