//! CLI tool for removing JNDILookup.class from Java archives.

mod commands;
mod exit_codes;
mod input;
mod output;
mod prompt;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use exit_codes::ExitCode;

/// Removes JNDILookup.class from Java archives
#[derive(Parser)]
#[command(name = "jndi-strip")]
#[command(author, version, about = "Removes JNDILookup.class from Java archives", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "human", global = true)]
    format: OutputFormat,

    /// Do not echo log lines to the console
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Audit log file (appended to)
    #[arg(
        long,
        short = 'l',
        env = "JNDI_STRIP_LOG",
        default_value = jndi_strip::audit::DEFAULT_LOG_FILE,
        global = true
    )]
    log_file: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Back up archives and remove the target entry after confirmation (alias: rm)
    #[command(alias = "rm")]
    Remove {
        /// Archives to process (glob patterns supported)
        paths: Vec<PathBuf>,

        /// Also read archive records from standard input, one per line
        #[arg(long)]
        stdin: bool,

        /// Approve every removal without prompting
        #[arg(short = 'y', long, conflicts_with_all = ["no", "answers"])]
        yes: bool,

        /// Decline every removal without prompting
        #[arg(short = 'n', long, conflicts_with = "answers")]
        no: bool,

        /// Pre-recorded answers, in order (e.g. y,n,y); missing answers decline
        #[arg(long, value_delimiter = ',', value_parser = prompt::parse_answer_arg)]
        answers: Option<Vec<bool>>,

        #[command(flatten)]
        matching: MatchArgs,
    },

    /// Report archives containing the target entry without changing them (alias: s)
    #[command(alias = "s")]
    Scan {
        /// Archives to inspect (glob patterns supported)
        paths: Vec<PathBuf>,

        /// Also read archive records from standard input, one per line
        #[arg(long)]
        stdin: bool,

        #[command(flatten)]
        matching: MatchArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
struct MatchArgs {
    /// Base name of the entries to look for
    #[arg(long, default_value = jndi_strip::TARGET_ENTRY)]
    target: String,

    /// Compare entry names case-sensitively
    #[arg(long)]
    case_sensitive: bool,
}

impl MatchArgs {
    fn options(&self, quiet: bool) -> jndi_strip::RemoveOptions {
        let matching = if self.case_sensitive {
            jndi_strip::inspect::NameMatching::CaseSensitive
        } else {
            jndi_strip::inspect::NameMatching::CaseInsensitive
        };
        jndi_strip::RemoveOptions::new()
            .target(self.target.clone())
            .matching(matching)
            .echo(!quiet)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// How removals are confirmed.
#[derive(Clone, PartialEq, Eq)]
pub enum ConfirmMode {
    Interactive,
    Yes,
    No,
    Scripted(Vec<bool>),
}

fn main() {
    // Set up Ctrl+C handler
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupted");
        std::process::exit(exit_codes::USER_INTERRUPT);
    })
    .ok();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Remove {
            paths,
            stdin,
            yes,
            no,
            answers,
            matching,
        } => {
            let confirm = match (yes, no, answers) {
                (true, _, _) => ConfirmMode::Yes,
                (_, true, _) => ConfirmMode::No,
                (_, _, Some(answers)) => ConfirmMode::Scripted(answers),
                _ => ConfirmMode::Interactive,
            };
            commands::remove(&commands::RemoveConfig {
                paths: &paths,
                read_stdin: stdin,
                confirm,
                options: matching.options(cli.quiet),
                log_file: &cli.log_file,
                format: cli.format,
            })
        }

        Commands::Scan {
            paths,
            stdin,
            matching,
        } => commands::scan(&commands::ScanConfig {
            paths: &paths,
            read_stdin: stdin,
            options: matching.options(cli.quiet),
            log_file: &cli.log_file,
            format: cli.format,
        }),

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            ExitCode::Success
        }
    };

    std::process::exit(exit_code.code());
}
