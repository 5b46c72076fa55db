use crate::cells::{Cell, CellIdMode};
use crate::config::load_config;
use crate::extract::parse_document;
use crate::validate::validate;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "dfd-layout",
    version,
    about = "Lay out infrastructure components and flows as data flow diagram cells"
)]
pub struct Args {
    /// Extractor output (JSON, or a response containing fenced JSON), or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the cell list. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config file (JSON or JSON5) overriding layout constants and colors
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Cell id scheme; overrides the config file
    #[arg(long = "ids", value_enum)]
    pub ids: Option<IdScheme>,

    /// Pretty-print the cell list
    #[arg(long)]
    pub pretty: bool,

    /// Only validate the input and print a summary
    #[arg(long = "validate-only")]
    pub validate_only: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum IdScheme {
    Component,
    Uuid,
}

impl From<IdScheme> for CellIdMode {
    fn from(scheme: IdScheme) -> Self {
        match scheme {
            IdScheme::Component => CellIdMode::Component,
            IdScheme::Uuid => CellIdMode::Uuid,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logger(&args.log_level);
    debug!(args:?; "parsed arguments");
    run_with(&args)
}

pub fn run_with(args: &Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(ids) = args.ids {
        config.layout.cell_ids = ids.into();
    }

    let input = read_input(args.input.as_deref())?;
    let doc = parse_document(&input)?;

    if args.validate_only {
        let graph = validate(&doc, config.layout.cell_ids)?;
        let containers = graph
            .components()
            .iter()
            .filter(|c| c.kind.is_container())
            .count();
        let summary = format!(
            "valid: {} components ({} boundaries), {} flows\n",
            graph.components().len(),
            containers,
            graph.flows().len()
        );
        return write_output(summary.as_bytes(), args.output.as_deref());
    }

    let cells = crate::build_cells(&doc, &config.layout, &config.theme)?;
    let json = serialize_cells(&cells, args.pretty)?;
    write_output(json.as_bytes(), args.output.as_deref())?;
    info!(cells = cells.len(); "wrote diagram cells");
    Ok(())
}

fn init_logger(level: &str) {
    let filter = level.parse::<log::LevelFilter>().unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        log::LevelFilter::Warn
    });
    // A second initialization (tests, embedding) is harmless.
    let _ = env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .try_init();
}

pub fn serialize_cells(cells: &[Cell], pretty: bool) -> Result<String> {
    let mut json = if pretty {
        serde_json::to_string_pretty(cells)?
    } else {
        serde_json::to_string(cells)?
    };
    json.push('\n');
    Ok(json)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_output(bytes: &[u8], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, bytes)?,
        None => io::stdout().write_all(bytes)?,
    }
    Ok(())
}
