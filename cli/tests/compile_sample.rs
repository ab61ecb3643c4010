use std::path::{Path, PathBuf};
use std::process::Command;

fn vypr() -> Command {
    Command::new(env!("CARGO_BIN_EXE_vypr"))
}

fn sample(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(name)
}

#[test]
fn compiles_the_checked_in_fibonacci_sample() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out_base = dir.path().join("fib");

    let output = vypr()
        .arg("-v")
        .arg("-o")
        .arg(&out_base)
        .arg(sample("fib.vy"))
        .output()
        .expect("failed to spawn vypr binary");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let py = std::fs::read_to_string(out_base.with_extension("py")).expect("generated python");
    assert!(py.contains("def fib(n):"));
    assert!(py.contains("def __main__():"));
}

#[test]
fn compiles_a_sample_and_writes_python_plus_wrapper() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = dir.path().join("sample.vy");
    std::fs::write(&src, "var x = 2\nvar y = 3\nprint x + y * 4\n").expect("write sample");
    let out_base = dir.path().join("sample_out");

    // Verbose mode skips launching the host interpreter, so the test does
    // not depend on python being installed.
    let output = vypr()
        .arg("-v")
        .arg("-o")
        .arg(&out_base)
        .arg(&src)
        .output()
        .expect("failed to spawn vypr binary");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let py = std::fs::read_to_string(out_base.with_extension("py")).expect("generated python");
    assert!(py.contains("def __main__():"));
    assert!(py.contains("if __name__ == \"__main__\":"));

    let bat = std::fs::read_to_string(out_base.with_extension("bat")).expect("wrapper");
    assert!(bat.starts_with("@echo off"));
    assert!(bat.contains("python "));
}

#[test]
fn verbose_mode_prints_stage_banners() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = dir.path().join("sample.vy");
    std::fs::write(&src, "print \"hello\"\n").expect("write sample");

    let output = vypr()
        .arg("-v")
        .arg("-o")
        .arg(dir.path().join("out"))
        .arg(&src)
        .output()
        .expect("failed to spawn vypr binary");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for banner in [
        "Lexical Analysis",
        "Syntax Analysis",
        "Semantic Analysis",
        "Intermediate Representation",
        "Code Generation",
    ] {
        assert!(stdout.contains(banner), "missing banner {}: {}", banner, stdout);
    }
}

#[test]
fn rejects_sources_without_the_vy_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = dir.path().join("sample.txt");
    std::fs::write(&src, "print 1\n").expect("write sample");

    let output = vypr().arg(&src).output().expect("failed to spawn vypr binary");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn missing_source_file_exits_with_an_error() {
    let output = vypr()
        .arg("/nonexistent/sample.vy")
        .output()
        .expect("failed to spawn vypr binary");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn semantic_failure_exits_nonzero_and_writes_no_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = dir.path().join("bad.vy");
    std::fs::write(&src, "print y\n").expect("write sample");
    let out_base = dir.path().join("bad_out");

    let output = vypr()
        .arg("-o")
        .arg(&out_base)
        .arg(&src)
        .output()
        .expect("failed to spawn vypr binary");
    assert_eq!(output.status.code(), Some(1));
    assert!(
        !Path::new(&out_base.with_extension("py")).exists(),
        "no output file may be written on failure"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'y' is not defined"), "{}", stderr);
}

#[test]
fn dump_flag_writes_the_requested_stage() {
    let dir = tempfile::tempdir().expect("tempdir");
    let src = dir.path().join("sample.vy");
    std::fs::write(&src, "var x = 1\nprint x\n").expect("write sample");

    let output = vypr()
        .current_dir(dir.path())
        .arg("-v")
        .arg("-d")
        .arg("ir")
        .arg("-o")
        .arg(dir.path().join("out"))
        .arg(&src)
        .output()
        .expect("failed to spawn vypr binary");
    assert!(output.status.success());

    let dumped = std::fs::read_to_string(dir.path().join("dumped_ir.txt")).expect("ir dump");
    assert!(dumped.contains("Function: __main__"), "{}", dumped);
    assert!(dumped.contains("STORE_VAR"), "{}", dumped);
}
