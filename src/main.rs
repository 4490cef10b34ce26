use clap::{Parser, Subcommand};
use git_changelists::commands::*;
use git_changelists::core::{
    error::{ChangelistError, Result},
    print_error,
};
use std::env;

#[derive(Parser)]
#[command(name = "git-changelists")]
#[command(about = "Group working-tree changes into named changelists")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh and show every changelist with its files
    Status,
    /// Create an empty changelist
    Create {
        /// Name of the new changelist
        name: String,
    },
    /// Delete a changelist; its files return to Changes or Unversioned
    Delete {
        /// Changelist id or name
        list: String,
    },
    /// Rename a changelist
    Rename {
        /// Changelist id or name
        list: String,
        /// New name
        new_name: String,
    },
    /// Move files into a changelist
    Move {
        /// Target changelist id or name
        list: String,
        /// Files to move, relative to the current directory
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Stage a changelist's files and unstage everything else
    Stage {
        /// Changelist id or name
        list: String,
    },
    /// Keep changelists refreshed as the working tree changes
    Watch {
        /// Also refresh every N seconds (0 disables)
        #[arg(long)]
        interval: Option<u64>,
    },
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Status => execute_status(),
        Commands::Create { name } => execute_create(&name),
        Commands::Delete { list } => execute_delete(&list),
        Commands::Rename { list, new_name } => execute_rename(&list, &new_name),
        Commands::Move { list, paths } => execute_move(&list, paths),
        Commands::Stage { list } => execute_stage(&list),
        Commands::Watch { interval } => execute_watch(interval),
    }
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(e) = run(cli.command) {
        if let ChangelistError::NotInGitRepo = e {
            print_error("Not in a git repository");
        } else {
            print_error(&e.to_string());
        }
        std::process::exit(1);
    }
}
