//! Embed Markup CLI
//!
//! Usage:
//!   embed-markup [OPTIONS] [FILE]
//!
//! Options:
//!   -b, --blueprint          Treat the input as a blueprint
//!   -s, --set <TOKEN=VALUE>  Blueprint replacement value (repeatable)
//!   -c, --config <FILE>      Compiler configuration (TOML format)
//!       --compact            Print JSON on a single line
//!   -h, --help               Print help

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use embed_markup::{Compiler, CompilerConfig, Error};

#[derive(Parser)]
#[command(name = "embed-markup")]
#[command(about = "Compile embed markup into embed JSON")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Treat the input as a blueprint and substitute its placeholders
    #[arg(short, long)]
    blueprint: bool,

    /// Blueprint replacement as TOKEN=VALUE
    #[arg(short = 's', long = "set", value_name = "TOKEN=VALUE", value_parser = parse_override)]
    overrides: Vec<(String, String)>,

    /// Compiler configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,
}

fn parse_override(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(token, value)| (token.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected TOKEN=VALUE, got '{}'", s))
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("embed_markup=warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match CompilerConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => CompilerConfig::default(),
    };

    // Read input
    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    // Templates resolve next to the input file
    let base_dir = cli
        .input
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let compiler = Compiler::new().with_config(config).with_base_dir(base_dir);

    let overrides: HashMap<String, String> = cli.overrides.iter().cloned().collect();
    let result = if cli.blueprint {
        compiler
            .parse_blueprint_str(&source)
            .map_err(Error::from)
            .and_then(|bp| bp.render(&overrides).map_err(Error::from))
    } else {
        compiler.compile_str(&source)
    };

    match result {
        Ok(value) => println!("{}", to_json(&value, cli.compact)),
        Err(Error::Parse(e)) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn to_json(value: &Value, compact: bool) -> String {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    json.unwrap_or_else(|_| value.to_string())
}
