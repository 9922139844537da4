//! Interactive task manager entry point.
//!
//! # Responsibility
//! - Resolve configuration, start file logging and open the data directory.
//! - Hand stdin/stdout to the session controller and map fatal errors to a
//!   non-zero exit code.

mod config;
mod render;
mod session;

use config::AppConfig;
use log::{error, info};
use session::{run_session, Console};
use std::error::Error;
use std::io;
use std::process::ExitCode;
use taskmgr_core::{
    init_logging, open_data_dir, AccountService, JsonAccountRepository, JsonTaskRepository,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!("{}", render::failure(&format!("taskmgr: {err}")));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::resolve()?;
    // The tracker still works without file logs.
    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let data_dir = open_data_dir(&config.data_dir)?;
    let mut accounts = AccountService::load(JsonAccountRepository::new(&data_dir))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    let end = run_session(
        &mut accounts,
        JsonTaskRepository::new(&data_dir),
        &mut console,
    )?;

    info!("event=app_exit module=cli status=ok end={end:?}");
    Ok(())
}
