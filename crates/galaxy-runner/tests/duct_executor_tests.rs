//! Process execution tests against real shell commands

#![cfg(unix)]

use galaxy_runner::{ArgFormat, ArgFormats, ArgSet, CmdRunner, Error};

fn sh_runner() -> CmdRunner {
    CmdRunner::new("sh", ArgFormats::new().with("script", ArgFormat::opt_val("-c")))
}

#[test]
fn test_captures_streams_and_exit_code() {
    let runner = sh_runner();
    let mut ctx = runner.context("script").unwrap();
    let output = ctx
        .run(&ArgSet::new().with("script", "echo out; echo err >&2; exit 3"))
        .unwrap();

    assert_eq!(output.rc, 3);
    assert_eq!(output.stdout, "out\n");
    assert_eq!(output.stderr, "err\n");
}

#[test]
fn test_forced_locale_reaches_child() {
    let runner = sh_runner().with_locale("C.UTF-8");
    let mut ctx = runner.context("script").unwrap();
    let output = ctx
        .run(&ArgSet::new().with("script", "echo \"$LC_ALL|$LANGUAGE|$LC_MESSAGES\""))
        .unwrap();

    assert_eq!(output.stdout.trim(), "C.UTF-8|C.UTF-8|C.UTF-8");
}

#[test]
fn test_check_rc_attaches_stderr() {
    let runner = sh_runner().with_check_rc(true);
    let mut ctx = runner.context("script").unwrap();
    let err = ctx
        .run(&ArgSet::new().with("script", "echo nope >&2; exit 1"))
        .unwrap_err();

    match err {
        Error::NonZeroExit { rc, stderr, .. } => {
            assert_eq!(rc, 1);
            assert_eq!(stderr, "nope");
        }
        other => panic!("unexpected error: {other}"),
    }
}
