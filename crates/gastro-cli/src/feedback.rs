//! Feedback command handlers.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use gastro_core::AppConfig;
use gastro_insights::{FeedbackBoard, InsightClient};

use crate::render;

/// Sub-commands available under `feedback`.
#[derive(Debug, Subcommand)]
pub enum FeedbackCommands {
    /// Show feedback records and any sentiment already assigned
    List {
        /// Feedback YAML file (defaults to `GASTRO_FEEDBACK_PATH`)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Classify the sentiment of a single record
    Analyze {
        /// Id of the record to classify
        #[arg(long)]
        id: String,

        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Classify every unclassified record, one at a time
    Batch {
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn load_board(config: &AppConfig, file: Option<&Path>) -> anyhow::Result<FeedbackBoard> {
    let path = file.unwrap_or(config.feedback_path.as_path());
    let records = gastro_core::load_feedback(path)?.feedback;
    tracing::debug!(path = %path.display(), count = records.len(), "feedback loaded");
    Ok(FeedbackBoard::new(records))
}

fn print_board(board: &FeedbackBoard, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(board.records())?);
    } else {
        print!("{}", render::feedback_table(board.records()));
    }
    Ok(())
}

/// Dispatch a `feedback` sub-command.
///
/// # Errors
///
/// Returns an error if the feedback file cannot be loaded, the requested id
/// does not exist, or output cannot be serialized. Classification failures
/// are not errors; they merge the neutral fallback verdict.
pub(crate) async fn run_feedback(
    config: &AppConfig,
    client: &InsightClient,
    command: FeedbackCommands,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        FeedbackCommands::List { file } => {
            let board = load_board(config, file.as_deref())?;
            print_board(&board, json)
        }
        FeedbackCommands::Analyze { id, file } => {
            let mut board = load_board(config, file.as_deref())?;
            if board.get(&id).is_none() {
                anyhow::bail!("feedback '{id}' not found");
            }
            if !board.analyze(client, &id).await {
                eprintln!("feedback '{id}' already has a sentiment; skipping");
            }
            print_board(&board, json)
        }
        FeedbackCommands::Batch { file } => {
            let mut board = load_board(config, file.as_deref())?;
            let pending = board.pending_ids().len();
            if pending == 0 {
                eprintln!("all feedback already classified");
                return print_board(&board, json);
            }

            eprintln!("classifying {pending} feedback records...");
            let requests = board
                .analyze_pending(client, |record| {
                    if let Some(sentiment) = record.sentiment {
                        eprintln!("  {} -> {sentiment}", record.id);
                    }
                })
                .await;
            eprintln!("batch complete: {requests} records classified");
            print_board(&board, json)
        }
    }
}
