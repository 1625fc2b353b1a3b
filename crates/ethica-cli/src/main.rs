use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ethica_config::Config;
use ethica_engine::parsing::{InputNode, Scanner};
use ethica_engine::render::{HtmlInterpreter, InterpreterStyles, outline};
use ethica_engine::{Edition, EditionError};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "ethica")]
#[command(about = "Parse and render structured editions of Spinoza's Ethics")]
struct Cli {
    /// Log at debug level (RUST_LOG still takes precedence per module)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Input {
    /// Path to an edition JSON file
    #[arg(required_unless_present = "edition", conflicts_with = "edition")]
    path: Option<PathBuf>,

    /// Name of an edition listed in the config file
    #[arg(short, long)]
    edition: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the token stream, one token per line
    Tokens {
        #[command(flatten)]
        input: Input,
    },
    /// Print the document tree as an outline
    Tree {
        #[command(flatten)]
        input: Input,
        /// Print the tree and index map as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Print the index map, one `position key label` line per label
    Index {
        #[command(flatten)]
        input: Input,
        /// Print the index map as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Render HTML for the whole source or a single book
    Render {
        #[command(flatten)]
        input: Input,
        /// Book number (1-5; anything else renders book 1)
        #[arg(short, long)]
        book: Option<usize>,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            log::warn!("ignoring config file: {e}");
            Config::default()
        }
    };

    match command {
        Command::Tokens { input } => {
            let (_, json) = read_input(&config, &input)?;
            let root: InputNode = serde_json::from_str(&json).context("Invalid edition JSON")?;
            let mut scanner = Scanner::new(root);
            for token in scanner.run() {
                println!("{token}");
            }
        }
        Command::Tree { input, json } => {
            let edition = load_edition(&config, &input)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&edition)?);
            } else {
                print!("{}", outline(edition.source()));
            }
        }
        Command::Index { input, json } => {
            let edition = load_edition(&config, &input)?;
            if json {
                println!("{}", serde_json::to_string_pretty(edition.index())?);
            } else {
                print!("{}", edition.index());
            }
        }
        Command::Render { input, book, out } => {
            let edition = load_edition(&config, &input)?;
            let template = config.link_template.clone();
            let link = move |index: &str| template.apply(index);
            let mut interpreter = HtmlInterpreter::new(InterpreterStyles::default(), &link);

            let html = match book {
                Some(number) => {
                    let book = edition
                        .book(number)
                        .with_context(|| format!("Edition `{}` has no books", edition.name()))?;
                    interpreter.render_book(book)
                }
                None => interpreter.render_source(edition.source()),
            };

            match out {
                Some(file) => write_output(&config.output_path(&file), &html)?,
                None => print!("{html}"),
            }
        }
        Command::Init { force } => {
            let config_path = Config::config_path();
            if config_path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {} (use --force to overwrite)",
                    config_path.display()
                );
            }
            Config::default().save()?;
            println!("Wrote {}", config_path.display());
        }
    }
    Ok(())
}

/// Resolves the input to `(name, json)`.
fn read_input(config: &Config, input: &Input) -> Result<(String, String)> {
    let (name, path) = match (&input.edition, &input.path) {
        (Some(name), _) => (name.clone(), config.edition(name)?.path.clone()),
        (None, Some(path)) => (
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path.clone(),
        ),
        (None, None) => anyhow::bail!("Either a path or --edition is required"),
    };
    log::debug!("reading edition `{name}` from {}", path.display());
    let json = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read edition file {}", path.display()))?;
    Ok((name, json))
}

fn load_edition(config: &Config, input: &Input) -> Result<Edition> {
    let (name, json) = read_input(config, input)?;
    match Edition::from_json_str(name, &json) {
        Ok(edition) => Ok(edition),
        Err(EditionError::ParseFailed { name, source }) => {
            log::error!("edition `{name}`: {source}");
            eprintln!("parse error");
            process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}
