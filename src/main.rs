mod account;
mod auth;
mod config;
mod console;
mod courses;
mod db;
mod error;
mod roles;
mod seed;
mod session;
mod state;
mod telemetry;

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};

use error::RegistrarError;
use state::AppState;

fn open_state(cfg: &config::Config) -> anyhow::Result<AppState> {
    let conn = db::open_db(&cfg.db_path)
        .with_context(|| format!("failed to open store {}", cfg.db_path.to_string_lossy()))?;
    if let Some(seed_path) = &cfg.seed_path {
        let seed = seed::load_seed_file(seed_path)?;
        seed::apply_seed(&conn, &seed)?;
    }
    Ok(AppState::new(Some(cfg.db_path.clone()), conn))
}

fn main() -> ExitCode {
    let cfg = config::Config::from_env();
    telemetry::init_tracing(&cfg.log_filter);
    info!("Configuration:\n{:#?}", &cfg);

    let mut state = match open_state(&cfg) {
        Ok(s) => s,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("registrar: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let mut console = console::Console::new(stdin.lock(), io::stdout());

    let outcome = match session::run(&mut state, &mut console) {
        Ok(()) => Ok(()),
        // Input ran out mid-session; treat it like choosing to exit.
        Err(RegistrarError::InputClosed) => {
            info!("input closed, shutting down");
            state.close()
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "session aborted");
            if let Err(close_err) = state.close() {
                error!(error = %close_err, "store did not close cleanly");
            }
            eprintln!("registrar: {}", e);
            ExitCode::FAILURE
        }
    }
}
