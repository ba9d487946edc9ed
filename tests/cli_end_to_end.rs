// tests/cli_end_to_end.rs

use std::error::Error;
use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Output, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use regex::Regex;

type TestResult = Result<(), Box<dyn Error>>;

const ABSOLUTE_LINE: &str = r"^\[\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\] ";

fn ets() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ets"));
    cmd.env_remove("ETS_LOG");
    cmd
}

fn run(args: &[&str], stdin: &[u8]) -> Result<Output, Box<dyn Error>> {
    feed(ets().args(args), stdin)
}

fn feed(cmd: &mut Command, stdin: &[u8]) -> Result<Output, Box<dyn Error>> {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .take()
        .ok_or("no stdin pipe")?
        .write_all(stdin)?;
    Ok(child.wait_with_output()?)
}

#[test]
fn echo_hi_is_timestamped() -> TestResult {
    let output = run(&["echo", "hi"], b"")?;
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8(output.stdout)?;
    let shape = Regex::new(&format!("{ABSOLUTE_LINE}hi$"))?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "stdout was {stdout:?}");
    assert!(shape.is_match(lines[0]), "unexpected line {:?}", lines[0]);
    Ok(())
}

#[test]
fn single_argument_with_whitespace_runs_in_a_shell() -> TestResult {
    let output = run(&["-s", "-f", "%s", "echo one; echo two"], b"")?;
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8(output.stdout)?;
    let bodies: Vec<&str> = stdout
        .lines()
        .filter_map(|l| l.split_once(' ').map(|(_, body)| body))
        .collect();
    assert_eq!(bodies, vec!["one", "two"]);
    Ok(())
}

#[test]
fn child_exit_code_becomes_ours() -> TestResult {
    let output = run(&["sh", "-c", "exit 3"], b"")?;
    assert_eq!(output.status.code(), Some(3));
    Ok(())
}

#[test]
fn conflicting_modes_fail_before_any_output() -> TestResult {
    let output = run(&["--elapsed", "--incremental", "echo", "hi"], b"")?;
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr)?;
    assert!(
        stderr.contains("conflicting flags --elapsed and --incremental"),
        "stderr was {stderr:?}"
    );
    Ok(())
}

#[test]
fn conflicting_zones_fail() -> TestResult {
    let output = run(&["-u", "-z", "Asia/Tokyo"], b"")?;
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr)?.contains("conflicting flags --utc and --timezone"));
    Ok(())
}

#[test]
fn calendar_directive_in_elapsed_mode_is_rejected() -> TestResult {
    let output = run(&["-s", "-f", "%Y", "echo", "hi"], b"")?;
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr)?.contains("'%Y'"));
    Ok(())
}

#[test]
fn missing_command_fails_to_start() -> TestResult {
    let output = run(&["ets-no-such-command"], b"")?;
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("failed to start 'ets-no-such-command'"), "stderr was {stderr:?}");
    Ok(())
}

#[test]
fn piped_stdin_lines_are_each_timestamped() -> TestResult {
    let output = run(&["-u"], b"first\nsecond\nthird\n")?;
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    for (line, body) in lines.iter().zip(["first", "second", "third"]) {
        let shape = Regex::new(&format!("{ABSOLUTE_LINE}{body}$"))?;
        assert!(shape.is_match(line), "unexpected line {line:?}");
    }
    Ok(())
}

#[test]
fn local_zone_from_tz_renders_its_abbreviation() -> TestResult {
    let output = feed(ets().env("TZ", ":Asia/Tokyo").args(["-f", "%Z"]), b"x\n")?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8(output.stdout)?, "JST x\n");

    let output = feed(ets().env("TZ", "Europe/Oslo").args(["-f", "%Z"]), b"x\n")?;
    let stdout = String::from_utf8(output.stdout)?;
    assert!(
        Regex::new(r"^CES?T x\n$")?.is_match(&stdout),
        "unexpected output {stdout:?}"
    );
    Ok(())
}

#[test]
fn piped_stdin_lines_are_emitted_as_they_arrive() -> TestResult {
    let mut child = ets()
        .args(["-i", "-f", "%s"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;
    let mut stdin = child.stdin.take().ok_or("no stdin pipe")?;
    let stdout = child.stdout.take().ok_or("no stdout pipe")?;

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in BufReader::new(stdout).lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    for body in ["one", "two", "three"] {
        stdin.write_all(format!("{body}\n").as_bytes())?;
        stdin.flush()?;
        // Input stays open, so this line can only show up if it was not batched.
        let line = rx.recv_timeout(Duration::from_secs(5))?;
        assert!(line.ends_with(&format!(" {body}")), "unexpected line {line:?}");
    }

    drop(stdin);
    assert_eq!(child.wait()?.code(), Some(0));
    Ok(())
}

#[test]
fn version_flag_prints_the_version() -> TestResult {
    let output = run(&["-v"], b"")?;
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8(output.stdout)?.contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}
