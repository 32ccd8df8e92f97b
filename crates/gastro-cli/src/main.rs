mod feedback;
mod render;

use clap::{Parser, Subcommand};
use gastro_insights::{
    ExecutiveReport, ExecutiveReportRequest, InsightClient, InsightItem, LoadState, SmartInsights,
};
use tracing_subscriber::EnvFilter;

use crate::feedback::{run_feedback, FeedbackCommands};

/// Data summary the dashboard sends when none is given.
const DASHBOARD_CONTEXT: &str =
    "Sales are up 15% in the Mumbai region. AOV is ₹1,450. Top dish: Paneer Tikka Platter.";

/// Data summary the analyst view sends when none is given.
const ANALYST_CONTEXT: &str =
    "Total Sales ₹18.4 Lakhs, AOV ₹1,250, Repeat Ratio 32%, Festive Growth +24%.";

#[derive(Debug, Parser)]
#[command(name = "gastro-cli")]
#[command(about = "GastroAI sales intelligence command line interface")]
struct Cli {
    /// Print results as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate actionable sales insights for the dashboard
    Insights {
        /// Free-text sales summary to analyse
        #[arg(long, default_value = DASHBOARD_CONTEXT)]
        context: String,
    },
    /// Generate the executive strategy report
    Report {
        /// Free-text aggregate sales summary
        #[arg(long, default_value = ANALYST_CONTEXT)]
        context: String,
    },
    /// Inspect and classify customer feedback
    Feedback {
        #[command(subcommand)]
        command: FeedbackCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("gastro-cli ready; run with --help to list commands");
        return Ok(());
    };

    let config = gastro_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    let client = InsightClient::from_app_config(&config)?;

    match command {
        Commands::Insights { context } => run_insights(&client, &context, cli.json).await,
        Commands::Report { context } => run_report(&client, &context, cli.json).await,
        Commands::Feedback { command } => run_feedback(&config, &client, command, cli.json).await,
    }
}

async fn run_insights(client: &InsightClient, context: &str, json: bool) -> anyhow::Result<()> {
    let mut state: LoadState<Vec<InsightItem>> = LoadState::default();
    state.begin();
    eprintln!("generating insights...");
    state.settle(
        client
            .fetch(&SmartInsights {
                data_context: context,
            })
            .await,
    );

    let items = state.value().map(Vec::as_slice).unwrap_or_default();
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        print!("{}", render::insights(items));
    }
    Ok(())
}

async fn run_report(client: &InsightClient, context: &str, json: bool) -> anyhow::Result<()> {
    let mut state: LoadState<Option<ExecutiveReport>> = LoadState::default();
    state.begin();
    eprintln!("Agent Gastro is building your strategy...");
    state.settle(
        client
            .fetch(&ExecutiveReportRequest {
                data_context: context,
            })
            .await,
    );

    let report = state.value().and_then(Option::as_ref);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::report(report));
    }
    Ok(())
}
