use std::{
    fs::OpenOptions,
    io::{BufWriter, stdin, stdout},
    sync::Mutex,
};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    common::error::AppError, config::Config, io::store::CsvStore, menu::Menu,
    worker::processor::Processor,
};

pub fn run<I, S>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString> + Clone,
{
    let config = Config::parse_from(args);
    init_tracing(&config)?;

    let mut processor = Processor::open(CsvStore::new(&config.file))?;

    let stdin = stdin();
    let stdout = stdout();
    let mut menu = Menu::new(stdin.lock(), BufWriter::new(stdout.lock()));
    menu.run(&mut processor)?;

    processor.close()
}

/// Sends diagnostics to the configured log file. Failing to install a
/// subscriber (one already exists) is not an error.
fn init_tracing(config: &Config) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
