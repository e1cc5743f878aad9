use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};
use underline::{Config, Emit};

#[derive(Parser)]
#[command(name = "underline")]
#[command(about = "Convert underscore emphasis markup to HTML")]
struct Cli {
    /// Input file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Output file (writes to stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (defaults to underline.toml in the working directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// What to print instead of the configured output
    #[arg(long, value_enum)]
    emit: Option<Emit>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Error reading {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Error reading stdin: {0}")]
    Stdin(io::Error),
    #[error("Error writing {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("Error writing stdout: {0}")]
    Stdout(io::Error),
    #[error("Error serializing output: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::discover(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log.level))
        .init();

    if let Err(e) = run(&cli, &config) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &Config) -> Result<(), CliError> {
    let markup = read_input(cli.input.as_ref())?;
    let emit = cli.emit.unwrap_or(config.output.emit);
    debug!("emitting {:?} for {} bytes of input", emit, markup.len());

    let mut rendered = match emit {
        Emit::Html => underline::convert(&markup),
        Emit::Tokens => serde_json::to_string_pretty(&underline::lex(&markup))?,
        Emit::Tree => serde_json::to_string_pretty(&underline::parse(&markup))?,
        Emit::Locations => serde_json::to_string_pretty(&underline::locate(&markup))?,
    };
    if config.output.trailing_newline && !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    match &cli.output {
        Some(path) => {
            fs::write(path, rendered).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            info!("Created {}", path.display());
        }
        None => io::stdout()
            .write_all(rendered.as_bytes())
            .map_err(CliError::Stdout)?,
    }

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String, CliError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        }),
        None => {
            let mut markup = String::new();
            io::stdin()
                .read_to_string(&mut markup)
                .map_err(CliError::Stdin)?;
            Ok(markup)
        }
    }
}
