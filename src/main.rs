//! wiki-localurl CLI
//!
//! Usage:
//!   wiki-localurl [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>        Configuration file (TOML format)
//!   -l, --link-base <PATTERN>  Link base URL pattern containing ${title}
//!   -t, --title <TITLE>        Title of the page being rendered
//!   -v, --verbose              Debug logging on stderr
//!   -h, --help                 Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use wiki_localurl::{expand_with_config, logging, ExpandError, WikiConfig};

#[derive(Parser)]
#[command(name = "wiki-localurl")]
#[command(about = "Expand {{localurl:...}} directives in wiki markup")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Link base URL pattern containing ${title}
    #[arg(short, long = "link-base")]
    link_base: Option<String>,

    /// Title of the page being rendered
    #[arg(short, long)]
    title: Option<String>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => match WikiConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => WikiConfig::default(),
    };
    if let Some(pattern) = cli.link_base {
        config = config.with_link_base_url(pattern);
    }
    if let Some(title) = cli.title {
        config = config.with_page_title(title);
    }

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

    match expand_with_config(&source, config) {
        Ok(text) => {
            print!("{}", text);
        }
        Err(ExpandError::Parse(errors)) => {
            for error in &errors {
                eprint!("{}", error.format(&source, &filename));
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
