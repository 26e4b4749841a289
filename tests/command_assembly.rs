// tests/command_assembly.rs
mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::path::{Path, PathBuf};

use dxlaunch::command::CommandAssembler;
use dxlaunch::config::Installation;
use dxlaunch::errors::{LauncherError, TemplateError};
use dxlaunch::resolve::{resolve_in, JobTarget};
use dxlaunch::types::ExecutionMode;
use dxlaunch_test_utils::builders::{
    config_with_template, default_config, fixed_context, RuntimeOptionsBuilder,
};

type TestResult = Result<(), Box<dyn Error>>;

fn arg_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

#[cfg(unix)]
#[test]
fn local_job_in_local_mode_has_expected_engine_arguments() -> TestResult {
    init_tracing();

    let install = Installation::new("/opt/datax");
    let config = default_config();
    let options = RuntimeOptionsBuilder::new("/var/log/x")
        .mode(ExecutionMode::Local)
        .job_id("42")
        .build();
    let target = resolve_in("/tmp/job.json", Path::new("/work"));

    let cmd = CommandAssembler::new(&install, &config).assemble(&options, &target, &fixed_context())?;
    let args = cmd.args();

    assert_eq!(cmd.program(), "java");
    assert_eq!(args.first().map(String::as_str), Some("-server"));
    assert_eq!(arg_after(args, "-mode"), Some("local"));
    assert_eq!(arg_after(args, "-jobid"), Some("42"));
    assert_eq!(arg_after(args, "-job"), Some("/tmp/job.json"));
    assert_eq!(
        arg_after(args, "-classpath"),
        Some("/etc/hbase/conf:/opt/datax/lib/*:.")
    );
    assert!(args.contains(&"-Ddatax.log=/var/log/x".to_string()));
    assert!(args.contains(&"-Dlog.file.name=datax_job_20240309_070501_4242.log".to_string()));

    // Engine entry point sits between job-scoped params and -mode.
    let entry = args
        .iter()
        .position(|a| a == "com.wgzhao.datax.core.Engine")
        .ok_or("entry point missing")?;
    let log_param = args
        .iter()
        .position(|a| a.starts_with("-Dlog.file.name="))
        .ok_or("log param missing")?;
    let mode = args.iter().position(|a| a == "-mode").ok_or("-mode missing")?;
    assert!(log_param < entry && entry < mode);

    Ok(())
}

#[test]
fn remote_job_is_passed_verbatim_and_named_from_its_tail() -> TestResult {
    let install = Installation::new("/opt/datax");
    let config = default_config();
    let options = RuntimeOptionsBuilder::new("/var/log/x").build();
    let url = "https://cfg.example.com/jobs/v2/daily.json";
    let target = resolve_in(url, Path::new("/work"));
    assert!(target.is_remote());

    let cmd = CommandAssembler::new(&install, &config).assemble(&options, &target, &fixed_context())?;

    assert_eq!(arg_after(cmd.args(), "-job"), Some(url));
    assert!(cmd.args().contains(
        &"-Dlog.file.name=datax_m_jobs_v2_daily_json_20240309_070501_4242.log".to_string()
    ));
    Ok(())
}

#[test]
fn operator_flags_and_params_stay_single_words() -> TestResult {
    let install = Installation::new("/opt/datax");
    let config = default_config();
    let options = RuntimeOptionsBuilder::new("/var/log/x")
        .jvm("-Xmx8g -Duser.name='ops team'")
        .params(r#"-Dwhere="id > 10 and region = 'eu'" -DtableName=orders"#)
        .build();
    let target = JobTarget::Local(PathBuf::from("/jobs/orders.json"));

    let cmd = CommandAssembler::new(&install, &config).assemble(&options, &target, &fixed_context())?;
    let args = cmd.args();

    assert!(args.contains(&"-Duser.name=ops team".to_string()));
    assert!(args.contains(&"-Dwhere=id > 10 and region = 'eu'".to_string()));
    assert!(args.contains(&"-DtableName=orders".to_string()));
    Ok(())
}

#[test]
fn repeated_assembly_is_byte_identical() -> TestResult {
    let install = Installation::new("/opt/datax");
    let config = default_config();
    let options = RuntimeOptionsBuilder::new("/var/log/x").jvm("-Xmx3g").remote_debug().build();
    let target = JobTarget::Local(PathBuf::from("/jobs/a.json"));
    let asm = CommandAssembler::new(&install, &config);

    let first = asm.assemble(&options, &target, &fixed_context())?;
    let second = asm.assemble(&options, &target, &fixed_context())?;
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
    Ok(())
}

#[test]
fn custom_template_can_rearrange_arguments() -> TestResult {
    let install = Installation::new("/opt/addax");
    let config = config_with_template("/usr/bin/java", "${java} ${jvm} -cp ${classpath} ${entry} -job ${job}");
    let options = RuntimeOptionsBuilder::new("/log").build();
    let target = JobTarget::Remote("http://h/j.json".to_string());

    let cmd = CommandAssembler::new(&install, &config).assemble(&options, &target, &fixed_context())?;

    assert_eq!(cmd.program(), "/usr/bin/java");
    assert!(!cmd.args().iter().any(|a| a == "-mode"));
    assert!(!cmd.args().iter().any(|a| a.starts_with("-Dlog.file.name")));
    assert_eq!(cmd.args().last().map(String::as_str), Some("http://h/j.json"));
    Ok(())
}

#[test]
fn template_with_unknown_variable_never_validates() {
    let mut raw = dxlaunch::config::RawLauncherConfig::default();
    raw.engine.command_template = "${java} -job ${jobfile}".to_string();

    match dxlaunch::config::LauncherConfig::try_from(raw) {
        Err(LauncherError::Template(TemplateError::MissingVariable(name))) => {
            assert_eq!(name, "jobfile")
        }
        other => panic!("expected missing variable error, got {other:?}"),
    }
}
