// tests/binary_exit_codes.rs
//
// Runs the built `dxlaunch` binary against a throwaway install whose engine
// is `sh`, so real signal handlers and real process exit codes are involved.
#![cfg(unix)]

mod common;
use crate::common::{init_tracing, write_script};

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::sleep;
use std::time::{Duration, Instant};

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn Error>>;

const DEADLINE: Duration = Duration::from_secs(10);

/// Install root with a `launcher.toml` that runs the job file with `sh`.
fn sh_install() -> Result<TempDir, Box<dyn Error>> {
    let home = tempfile::tempdir()?;
    std::fs::create_dir_all(home.path().join("conf"))?;
    std::fs::create_dir_all(home.path().join("lib"))?;
    std::fs::write(
        home.path().join("conf/launcher.toml"),
        "[engine]\n\
         java = \"sh\"\n\
         command_template = \"${java} ${job}\"\n\
         grace_period_ms = 300\n",
    )?;
    Ok(home)
}

fn launcher(home: &Path, args: &[PathBuf]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dxlaunch"));
    cmd.env("DXLAUNCH_HOME", home)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd
}

fn wait_with_deadline(child: &mut Child) -> Result<ExitStatus, Box<dyn Error>> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if start.elapsed() > DEADLINE {
            let _ = child.kill();
            return Err("launcher did not exit in time".into());
        }
        sleep(Duration::from_millis(20));
    }
}

fn wait_for_file(path: &Path) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    while !path.exists() {
        if start.elapsed() > DEADLINE {
            return Err(format!("{} never appeared", path.display()).into());
        }
        sleep(Duration::from_millis(20));
    }
    Ok(())
}

#[test]
fn natural_exit_code_reaches_the_shell() -> TestResult {
    init_tracing();

    let home = sh_install()?;
    let job = write_script(home.path(), "job.sh", "exit 5");

    let status = launcher(home.path(), &[job]).status()?;
    assert_eq!(status.code(), Some(5));
    Ok(())
}

#[test]
fn two_job_descriptors_exit_255() -> TestResult {
    init_tracing();

    let home = sh_install()?;
    let a = write_script(home.path(), "a.sh", "exit 0");
    let b = write_script(home.path(), "b.sh", "exit 0");

    let status = launcher(home.path(), &[a, b]).status()?;
    assert_eq!(status.code(), Some(255));
    Ok(())
}

#[test]
fn sigterm_to_launcher_exits_143_after_grace() -> TestResult {
    init_tracing();

    let home = sh_install()?;
    let started = home.path().join("started");
    let job = write_script(
        home.path(),
        "job.sh",
        &format!("trap '' QUIT\ntouch '{}'\nexec sleep 30", started.display()),
    );

    let mut child = launcher(home.path(), &[job]).spawn()?;

    // Handlers are installed before the engine is spawned, so once the job
    // has run its first line the launcher is ready for SIGTERM.
    wait_for_file(&started)?;
    let sent = Instant::now();
    kill(Pid::from_raw(i32::try_from(child.id())?), Signal::SIGTERM)?;

    let status = wait_with_deadline(&mut child)?;
    assert_eq!(status.code(), Some(143));
    assert!(
        sent.elapsed() >= Duration::from_millis(250),
        "engine ignores SIGQUIT, so the launcher must wait out the grace period"
    );
    Ok(())
}

#[test]
fn sigint_with_cooperative_engine_still_exits_143() -> TestResult {
    init_tracing();

    let home = sh_install()?;
    let started = home.path().join("started");
    let job = write_script(
        home.path(),
        "job.sh",
        &format!("touch '{}'\nexec sleep 30", started.display()),
    );

    let mut child = launcher(home.path(), &[job]).spawn()?;
    wait_for_file(&started)?;
    kill(Pid::from_raw(i32::try_from(child.id())?), Signal::SIGINT)?;

    let status = wait_with_deadline(&mut child)?;
    assert_eq!(status.code(), Some(143));
    Ok(())
}
