//! socnet CLI - In-memory social network directory over flat text files
//!
//! This is the main entry point for the socnet command-line tool, which provides:
//! - User management (`user` subcommand: add, update, delete, show, find, list)
//! - Symmetric friendship management (`friend` subcommand)
//! - Post creation, sharing and deletion with cascade semantics (`post` subcommand)
//! - Read-only reports over the network (`report` subcommand)
//! - Relational invariant checking (`verify` subcommand)
//!
//! Every command loads the data directory (users.txt, friendships.txt,
//! posts.txt), applies one operation through socnet-core, and writes the
//! directory back if anything changed.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod store;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "socnet",
    author,
    version,
    about = "In-memory social network directory backed by flat text files",
    long_about = "Manage a small social network (users, friendships, posts, sharing) held \
                  in memory and persisted as three comma-separated text files. All \
                  relationship edits keep both ends consistent, including cascade deletes."
)]
struct Cli {
    /// Data directory holding users.txt, friendships.txt and posts.txt
    /// (default: config data_dir, then ./data)
    #[arg(long, global = true, value_name = "DIR")]
    data: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage users (add, update, delete, show, find, list)
    User(commands::user::UserArgs),
    /// Manage symmetric friendships
    Friend(commands::friend::FriendArgs),
    /// Manage posts (create, share, unshare, delete, list)
    Post(commands::post::PostArgs),
    /// Read-only reports over the network
    Report(commands::report::ReportArgs),
    /// Check every relational invariant of the data directory
    Verify(commands::verify::VerifyArgs),
    /// Manage socnet configuration (init, show, path)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        // Completions and config never touch the data directory.
        Commands::Completions(args) => run_completions(args)?,
        Commands::Config(args) => config::run_config(args)?,
        command => {
            let data_dir = store::resolve_data_dir(cli.data)?;
            match command {
                Commands::User(args) => commands::run_user(args, &data_dir)?,
                Commands::Friend(args) => commands::run_friend(args, &data_dir)?,
                Commands::Post(args) => commands::run_post(args, &data_dir)?,
                Commands::Report(args) => commands::run_report(args, &data_dir)?,
                Commands::Verify(args) => commands::run_verify(args, &data_dir)?,
                Commands::Config(_) | Commands::Completions(_) => unreachable!("handled above"),
            }
        }
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
