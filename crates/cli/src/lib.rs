mod check;
mod resolve;
mod view;

use clap::{Parser, Subcommand};
use grail_runtime::{GrailConfig, LoadedWorkspace, Workspace};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "grail",
    version,
    about = "Resolve Groovy `new` expressions to the constructors they invoke",
    long_about = "Grail resolves the constructor invoked by each `new` expression in a workspace \
                  fixture: class declarations plus source files with call sites, as JSON."
)]
pub struct Cli {
    /// Config file (defaults to ~/.grail/config.json when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve call sites to constructors
    Resolve {
        /// Workspace fixture (JSON)
        #[arg(value_name = "WORKSPACE")]
        workspace: PathBuf,
        /// Only this call site
        #[arg(long, value_name = "ID")]
        call: Option<u32>,
        /// Resolve as incomplete code: list every constructor unchecked
        #[arg(long)]
        incomplete: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// List constructors of every class the call's type name may denote
    Variants {
        #[arg(value_name = "WORKSPACE")]
        workspace: PathBuf,
        #[arg(long, value_name = "ID")]
        call: u32,
    },
    /// Report unresolved, ambiguous and inapplicable call sites
    #[command(
        long_about = "Resolves every call site of the workspace in parallel and prints one \
                      row per call site. Array creations and resolved calls are listed too."
    )]
    Check {
        #[arg(value_name = "WORKSPACE")]
        workspace: PathBuf,
        /// Only list call sites with problems
        #[arg(long)]
        problems: bool,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = GrailConfig::load(cli.config.as_deref())?;
    if cli.verbose {
        config.log.level = "debug".to_string();
        config.log.to_stderr = true;
    }
    let _guard = grail_runtime::init_logging("cli", &config.log);

    let output = execute(cli.command, &config)?;
    print!("{}", output);
    Ok(())
}

/// Run one command and return what it prints.
pub fn execute(command: Commands, config: &GrailConfig) -> Result<String, Box<dyn std::error::Error>> {
    match command {
        Commands::Resolve {
            workspace,
            call,
            incomplete,
            json,
        } => resolve::run(&load(&workspace, config)?, call, incomplete, json),
        Commands::Variants { workspace, call } => resolve::variants(&load(&workspace, config)?, call),
        Commands::Check {
            workspace,
            problems,
        } => check::run(&load(&workspace, config)?, problems),
    }
}

fn load(path: &Path, config: &GrailConfig) -> grail_runtime::Result<LoadedWorkspace> {
    Workspace::load(path)?.into_loaded(&config.resolve)
}
