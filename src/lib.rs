pub mod assemble;
pub mod cli;
pub mod config;
pub mod data;
pub mod document;
pub mod error;
pub mod export;
pub mod fold;
pub mod io_utils;
pub mod normalize;
pub mod selection;
pub mod table;
pub mod template;
pub mod xlsx;

use std::{env, io, sync::OnceLock};

use anyhow::Result;
use log::{LevelFilter, debug};

use crate::{
    cli::{Cli, Commands},
    error::ExportError,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("grade_table", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging();
    debug!("{:?}", cli.command);
    match &cli.command {
        Commands::Export(args) => export::execute(args),
        Commands::Preview(args) => export::preview(args),
        Commands::Fields(args) => export::list_fields(args),
        Commands::Template(command) => template::execute(command),
    }
}

/// Exit status for a failed command; "nothing to export" is reported apart.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ExportError>()
        .map(ExportError::exit_code)
        .unwrap_or(1)
}

pub fn wait_for_enter() {
    println!("Press Enter to exit...");
    let mut line = String::new();
    if let Err(err) = io::stdin().read_line(&mut line) {
        debug!("Stopped waiting for Enter: {err}");
    }
}
