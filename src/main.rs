use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use scrawl::control::{self, ReplaySummary};
use scrawl::{Config, Engine};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "scrawl")]
#[command(version, about = "Annotation drawing engine for live presentations")]
struct Cli {
    /// Config file to use instead of ~/.config/scrawl/config.toml
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a newline-delimited JSON script of control messages and input
    /// events against a headless engine and print the resulting state
    Replay {
        /// Script file, or `-` for stdin
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Viewport width in pixels
        #[arg(long, default_value_t = 1920)]
        width: i32,

        /// Viewport height in pixels
        #[arg(long, default_value_t = 1080)]
        height: i32,

        /// Print the summary as JSON
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Replay {
            script,
            width,
            height,
            json,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let summary = run_replay(&config, &script, width, height)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
            }
        }
        None => {
            // No subcommand: show usage
            println!("scrawl: Annotation drawing engine for live presentations");
            println!();
            println!("Usage:");
            println!("  scrawl replay <SCRIPT>   Replay a JSON-lines script headlessly");
            println!("  scrawl replay -          Read the script from stdin");
            println!("  scrawl --help            Show help");
            println!();
            println!("Config: ~/.config/scrawl/config.toml");
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load().context("Failed to load config"),
    }
}

fn run_replay(config: &Config, script: &Path, width: i32, height: i32) -> Result<ReplaySummary> {
    let records = if script == Path::new("-") {
        control::parse_script(io::stdin().lock()).context("Failed to parse script from stdin")?
    } else {
        let file = File::open(script)
            .with_context(|| format!("Failed to open script {}", script.display()))?;
        control::parse_script(BufReader::new(file))
            .with_context(|| format!("Failed to parse script {}", script.display()))?
    };
    log::info!("Loaded {} script records", records.len());

    let mut engine = Engine::with_config(width, height, config)
        .with_context(|| format!("Failed to create {}x{} engine", width, height))?;

    Ok(control::replay(&mut engine, &records, Instant::now()))
}
