//! tubesift CLI entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tubesift::SamplingMode;

mod commands;

/// Clean, sample and filter caption tracks and viewer comments
#[derive(Parser)]
#[command(name = "tubesift")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a clean, sampled transcript from an SRT or WebVTT file
    #[command(long_about = "Extract a clean, sampled transcript from an SRT or WebVTT file.

Cue markup, sound annotations and rolling duplicate cues are removed. When
the transcript has more segments than the budget, segments are sampled
according to the mode: 'full' keeps the opening, 'smart' spreads the budget
over intro, middle and conclusion, 'summary' favors the conclusion.

EXAMPLES:
    tubesift transcript talk.en.vtt
    tubesift transcript talk.srt --mode summary --max-segments 50
    tubesift transcript talk.vtt --json")]
    Transcript(TranscriptArgs),

    /// Filter spam, noise and bot chatter out of a comment dump
    #[command(long_about = "Filter spam, noise and bot chatter out of a comment dump.

The input is JSON: an array of comments, one page object with a 'comments'
array and optional 'nextPageToken', or an array of such pages. Each comment
has id, text, author, authorChannelId, likes, publishedAt and replies.

EXAMPLES:
    tubesift comments comments.json
    tubesift comments comments.json --author-channel-id UC123 --json
    tubesift comments comments.json --keep-unrelated")]
    Comments(CommentsArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args)]
struct TranscriptArgs {
    /// Caption file (.srt or .vtt)
    file: PathBuf,

    /// Sampling mode: full, smart or summary
    #[arg(long, value_name = "MODE")]
    mode: Option<String>,

    /// Maximum number of segments to output
    #[arg(long, value_name = "N")]
    max_segments: Option<usize>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CommentsArgs {
    /// JSON file with comments or comment pages
    file: PathBuf,

    /// Channel id of the video author; their comments are never filtered
    #[arg(long, value_name = "ID", default_value = "")]
    author_channel_id: String,

    /// Disable filtering entirely
    #[arg(long)]
    no_filter: bool,

    /// Keep spam (short links, self-promotion, repeated tokens)
    #[arg(long)]
    keep_spam: bool,

    /// Keep noise (markup, floods, gibberish)
    #[arg(long)]
    keep_noise: bool,

    /// Keep unrelated bot chatter ("first!", "who's watching in 2024")
    #[arg(long)]
    keep_unrelated: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Write the default configuration to the config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("TUBESIFT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Transcript(args) => commands::transcript::handle(
            &args.file,
            args.mode.as_deref().map(SamplingMode::from_name),
            args.max_segments,
            args.json,
            config_path,
        ),
        Commands::Comments(args) => commands::comments::handle(
            &args.file,
            commands::comments::Overrides {
                author_channel_id: args.author_channel_id,
                no_filter: args.no_filter,
                keep_spam: args.keep_spam,
                keep_noise: args.keep_noise,
                keep_unrelated: args.keep_unrelated,
            },
            args.json,
            config_path,
        ),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(config_path),
            ConfigCommands::Path => commands::config::handle_path(config_path),
            ConfigCommands::Init { force } => commands::config::handle_init(config_path, force),
        },
    }
}
