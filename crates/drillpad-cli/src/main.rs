//! drillpad CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "drillpad", version, about = "Quiz practice backend over flat-file storage")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create starter config and example problem set
    Init,

    /// Validate problem-set TOML files
    Validate {
        /// Path to a problem-set file or directory (defaults to the
        /// configured problem-sets directory)
        #[arg(long)]
        problem_set: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Import a problem set into the catalog
    Import {
        /// Path to a problem-set file
        #[arg(long)]
        problem_set: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the problem catalog
    Problems {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Submit an answer and print the graded outcome
    Submit {
        /// Submitting user
        #[arg(long)]
        user: String,

        /// Problem id
        #[arg(long)]
        problem: u32,

        /// Answer text
        #[arg(long)]
        answer: String,

        /// Self-reported solve time in seconds
        #[arg(long)]
        time_secs: Option<f64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show a user's statistics and achievements
    Stats {
        /// User to report on
        #[arg(long)]
        user: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show aggregate statistics for a problem
    ProblemStats {
        /// Problem id
        #[arg(long)]
        problem: u32,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Submit a review, optionally attaching a media file
    Review {
        /// Reviewing user
        #[arg(long)]
        user: String,

        /// Problem id
        #[arg(long)]
        problem: u32,

        /// Review text
        #[arg(long)]
        content: String,

        /// Media file to upload and attach
        #[arg(long)]
        media: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List reviews for a problem
    Reviews {
        /// Problem id
        #[arg(long)]
        problem: u32,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("drillpad=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate {
            problem_set,
            config,
        } => commands::validate::execute(problem_set, config),
        Commands::Import {
            problem_set,
            config,
        } => commands::import::execute(problem_set, config).await,
        Commands::Problems { config } => commands::problems::execute(config).await,
        Commands::Submit {
            user,
            problem,
            answer,
            time_secs,
            config,
        } => commands::submit::execute(user, problem, answer, time_secs, config).await,
        Commands::Stats { user, config } => commands::stats::execute(user, config).await,
        Commands::ProblemStats { problem, config } => {
            commands::problem_stats::execute(problem, config).await
        }
        Commands::Review {
            user,
            problem,
            content,
            media,
            config,
        } => commands::review::execute(user, problem, content, media, config).await,
        Commands::Reviews { problem, config } => {
            commands::reviews::execute(problem, config).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
