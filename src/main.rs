mod config;
mod parse;
mod run;
mod ui;

use spendguard::{db, evaluator, models, store};

use std::io;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let (db_flag, args) = config::take_db_flag(std::env::args().collect())?;
    let db_path = config::resolve_db_path(db_flag, std::env::var_os(config::DB_ENV_VAR))?;
    let db = db::Database::open(&db_path)?;

    match args.len() {
        0 | 1 => {
            let today = chrono::Local::now().date_naive();
            run::as_menu(&db, io::stdin().lock(), io::stdout().lock(), today)
        }
        _ => run::as_cli(&args, &db, &mut io::stdout().lock()),
    }
}

/// Logs go to stderr so they never interleave with report output.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("spendguard=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
