use clap::{Parser, Subcommand};
use dashboard_core::constants::{API_BASE_URL_ENV, API_KEY_ENV, MODEL_ENV};
use dashboard_core::prompt::build_prompt;
use dashboard_core::{DashboardConfig, DashboardService, RenderOutcome};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod terminal;

#[derive(Parser)]
#[command(name = "disease-dashboard")]
#[command(about = "Disease information dashboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a disease and print its dashboard
    Report {
        /// Disease name (multiple words are joined with spaces)
        #[arg(required = true)]
        disease: Vec<String>,
        /// Show medication panels collapsed, titles only
        #[arg(long)]
        collapsed: bool,
    },
    /// Print the prompt that would be sent for a disease
    Prompt {
        /// Disease name (multiple words are joined with spaces)
        #[arg(required = true)]
        disease: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dashboard_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Report { disease, collapsed }) => {
            let disease = disease.join(" ");
            let config = DashboardConfig::from_env_values(
                std::env::var(API_KEY_ENV).ok(),
                std::env::var(MODEL_ENV).ok(),
                std::env::var(API_BASE_URL_ENV).ok(),
            )?;
            let service = DashboardService::from_config(config)?;

            eprintln!("{}", dashboard_core::constants::SPINNER_TEXT);
            match service.lookup(&disease).await? {
                None => println!("No disease name given."),
                Some(RenderOutcome::Rendered(dashboard)) => {
                    print!("{}", terminal::render_text(&dashboard, !collapsed));
                }
                Some(RenderOutcome::ParseFailed(failure)) => {
                    eprintln!("{}", failure.message);
                    std::process::exit(2);
                }
            }
        }
        Some(Commands::Prompt { disease }) => {
            println!("{}", build_prompt(&disease.join(" ")));
        }
        None => {
            println!("Use 'disease-dashboard --help' for commands");
        }
    }

    Ok(())
}
