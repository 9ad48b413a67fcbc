//! CLI frontend for the Colloquy dialogue engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use cq_dialogue::SkipAudio;
use cq_stage::FocusPolicy;

#[derive(Parser)]
#[command(
    name = "colloquy",
    about = "Colloquy: check, outline, and replay dialogue libraries",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a library file and report authoring issues
    Check {
        /// Library JSON file
        file: PathBuf,

        /// Fail on warnings as well as errors
        #[arg(long)]
        strict: bool,
    },

    /// Show scripts, lines, questions, and placements
    Outline {
        /// Library JSON file
        file: PathBuf,

        /// Only show this script
        #[arg(short, long)]
        script: Option<String>,
    },

    /// Replay an input script against a stage built from the library
    Play {
        /// Library JSON file
        file: PathBuf,

        /// Input script (enter, leave, interact, release, press, option, wait)
        #[arg(short, long)]
        input: PathBuf,

        /// Focus policy when several instances overlap: most-recent, nearest
        #[arg(long, default_value = "most-recent")]
        focus: FocusPolicy,

        /// Audio while skipping a line: per-letter, once, silent
        #[arg(long, default_value = "per-letter")]
        skip_audio: SkipAudio,

        /// Start the next line without waiting for another interact
        #[arg(long)]
        auto_continue: bool,

        /// Seconds per stage tick while waiting
        #[arg(long, default_value = "0.1")]
        tick: f64,

        /// Print the stage event log
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { file, strict } => commands::check::run(&file, strict),
        Commands::Outline { file, script } => commands::outline::run(&file, script.as_deref()),
        Commands::Play {
            file,
            input,
            focus,
            skip_audio,
            auto_continue,
            tick,
            verbose,
        } => commands::play::run(
            &file,
            &input,
            &commands::play::PlayOptions {
                focus,
                skip_audio,
                auto_continue,
                tick,
                verbose,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
