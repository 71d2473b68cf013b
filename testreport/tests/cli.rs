// Copyright (c) The testreport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests that run the `testreport` binary.

use camino::Utf8PathBuf;
use camino_tempfile::Utf8TempDir;
use std::{
    fmt,
    io::Write,
    process::{Command, Output, Stdio},
};

const PASSING: &str = concat!(
    r#"{"Time":"2024-03-01T20:45:01.563Z","Action":"run","Package":"example.com/calc","Test":"TestAdd"}"#,
    "\n",
    r#"{"Time":"2024-03-01T20:45:01.564Z","Action":"output","Package":"example.com/calc","Test":"TestAdd","Output":"=== RUN   TestAdd\n"}"#,
    "\n",
    r#"{"Time":"2024-03-01T20:45:01.565Z","Action":"pass","Package":"example.com/calc","Test":"TestAdd","Elapsed":0.25}"#,
    "\n",
    r#"{"Time":"2024-03-01T20:45:01.566Z","Action":"pass","Package":"example.com/calc","Elapsed":0.5}"#,
    "\n",
    r#"{"Action":"skip","Package":"example.com/calc/internal","Elapsed":0}"#,
    "\n",
);

const FAILING: &str = concat!(
    r#"{"Action":"run","Package":"example.com/calc","Test":"TestSub"}"#,
    "\n",
    r#"{"Action":"output","Package":"example.com/calc","Test":"TestSub","Output":"    calc_test.go:12: want 1, got 2\n"}"#,
    "\n",
    r#"{"Action":"fail","Package":"example.com/calc","Test":"TestSub","Elapsed":0.1}"#,
    "\n",
    r#"{"Action":"fail","Package":"example.com/calc","Elapsed":0.2}"#,
    "\n",
);

struct TestReportCli {
    args: Vec<String>,
    stdin: Option<String>,
}

impl TestReportCli {
    fn new() -> Self {
        Self {
            args: vec!["--color".to_owned(), "never".to_owned()],
            stdin: None,
        }
    }

    fn args(&mut self, args: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn stdin(&mut self, stdin: &str) -> &mut Self {
        self.stdin = Some(stdin.to_owned());
        self
    }

    fn output(&self) -> TestReportOutput {
        let mut command = Command::new(env!("CARGO_BIN_EXE_testreport"));
        command
            .args(&self.args)
            .env_remove("TESTREPORT_INPUT")
            .env_remove("TESTREPORT_OUTPUT")
            .env_remove("TESTREPORT_TEMPLATE")
            .env_remove("TESTREPORT_VARS")
            .env_remove("TESTREPORT_VERBOSE")
            .env_remove("TESTREPORT_COLOR")
            .env_remove("TESTREPORT_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn().expect("spawned testreport");
        {
            let mut stdin = child.stdin.take().expect("stdin is piped");
            if let Some(input) = &self.stdin {
                // testreport may exit before reading stdin, e.g. on invalid arguments.
                if let Err(err) = stdin.write_all(input.as_bytes()) {
                    assert_eq!(
                        err.kind(),
                        std::io::ErrorKind::BrokenPipe,
                        "writing events to stdin failed: {err}"
                    );
                }
            }
            // Dropping stdin closes it.
        }
        let output = child.wait_with_output().expect("testreport exited");

        TestReportOutput { output }
    }
}

struct TestReportOutput {
    output: Output,
}

impl TestReportOutput {
    fn exit_code(&self) -> Option<i32> {
        self.output.status.code()
    }

    fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }
}

// Debug is used by assertion failures, so show everything.
impl fmt::Debug for TestReportOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "exit code: {:?}\n--- stdout ---\n{}\n--- stderr ---\n{}\n",
            self.exit_code(),
            self.stdout(),
            self.stderr(),
        )
    }
}

fn write_file(dir: &Utf8TempDir, name: &str, contents: &str) -> Utf8PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("wrote file");
    path
}

#[test]
fn markdown_from_stdin() {
    let output = TestReportCli::new().stdin(PASSING).output();

    assert_eq!(output.exit_code(), Some(0), "{output:?}");
    let stdout = output.stdout();
    assert!(stdout.starts_with("# Test Report\n"), "{output:?}");
    assert!(stdout.contains("example.com/<b>calc</b>"), "{output:?}");
    assert!(stdout.contains("`20:45:01.564`"), "{output:?}");
    // Skipped packages are only counted.
    assert!(!stdout.contains("internal"), "{output:?}");
    assert_eq!(
        output.stderr(),
        "ok      example.com/calc 0.500s\n\
         ?       example.com/calc/internal [no test files]\n",
    );
}

#[test]
fn html_format() {
    let output = TestReportCli::new()
        .args(["--format", "html", "--quiet"])
        .stdin(PASSING)
        .output();

    assert_eq!(output.exit_code(), Some(0), "{output:?}");
    assert!(output.stdout().starts_with("<!DOCTYPE html>"), "{output:?}");
    assert_eq!(output.stderr(), "");
}

#[test]
fn failures_from_stdin_exit_successfully() {
    let output = TestReportCli::new().stdin(FAILING).output();

    assert_eq!(output.exit_code(), Some(0), "{output:?}");
    assert!(output.stdout().contains("❌"), "{output:?}");
    assert_eq!(
        output.stderr(),
        "    calc_test.go:12: want 1, got 2\nFAIL    example.com/calc 0.200s\n",
    );
}

#[test]
fn failures_from_input_file_exit_with_failure() {
    let dir = Utf8TempDir::new().expect("created temp dir");
    let input = write_file(&dir, "events.json", FAILING);

    let output = TestReportCli::new()
        .args(["--input", input.as_str(), "--quiet"])
        .output();
    assert_eq!(output.exit_code(), Some(1), "{output:?}");
    assert!(
        output.stderr().contains("test run failed: 1 package failed"),
        "{output:?}"
    );

    let output = TestReportCli::new()
        .args(["--input", input.as_str(), "--quiet", "--fail-exit", "never"])
        .output();
    assert_eq!(output.exit_code(), Some(0), "{output:?}");
}

#[test]
fn output_file_is_appended() {
    let dir = Utf8TempDir::new().expect("created temp dir");
    let template = write_file(
        &dir,
        "summary.j2",
        "{{ vars.Title }}: {{ passed }}/{{ tests }}\n",
    );
    let report = dir.path().join("report.txt");
    std::fs::write(&report, "existing\n").expect("wrote report");

    let output = TestReportCli::new()
        .args([
            "--output",
            report.as_str(),
            "--template",
            template.as_str(),
            "--vars",
            "Title:Nightly",
            "--quiet",
        ])
        .stdin(PASSING)
        .output();

    assert_eq!(output.exit_code(), Some(0), "{output:?}");
    assert_eq!(output.stdout(), "");
    assert_eq!(
        std::fs::read_to_string(&report).expect("read report"),
        "existing\nNightly: 1/1\n",
    );
}

#[test]
fn invalid_events() {
    let output = TestReportCli::new()
        .stdin("{\"Action\":\"run\",\"Package\":\"p\"}\n{not json}\n")
        .output();

    assert_eq!(output.exit_code(), Some(104), "{output:?}");
    assert_eq!(output.stdout(), "");
    let stderr = output.stderr();
    assert!(
        stderr.contains("failed to parse test events from stdin"),
        "{output:?}"
    );
    assert!(stderr.contains("line 2"), "{output:?}");
}

#[test]
fn invalid_vars() {
    let output = TestReportCli::new()
        .args(["--vars", "no separator"])
        .stdin(PASSING)
        .output();

    assert_eq!(output.exit_code(), Some(96), "{output:?}");
    assert!(
        output.stderr().contains("item `no separator`"),
        "{output:?}"
    );
}
