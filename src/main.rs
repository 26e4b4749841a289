// src/main.rs

use dxlaunch::supervise::EXIT_FAIL;
use dxlaunch::{cli, logging, run};

#[tokio::main]
async fn main() {
    let args = cli::parse_or_exit();
    let code = match run_main(args).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("dxlaunch error: {err:?}");
            EXIT_FAIL
        }
    };
    std::process::exit(code);
}

async fn run_main(args: cli::CliArgs) -> anyhow::Result<i32> {
    logging::init_logging(args.loglevel)?;
    Ok(run(args).await?)
}
