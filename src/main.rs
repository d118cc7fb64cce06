//! Dashboard AI CLI
//!
//! Command-line front end for the analysis backend:
//! - Run the whole upload → suggestions → dashboard pipeline
//! - Upload a dataset
//! - List suggestions for a dataset
//! - Fetch a single chart
//! - Generate a default config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dashboard_ai::api::{
    AnalysisBackend, ApiClient, ChartType, Suggestion, SuggestionParameters, KNOWN_AGGREGATIONS,
};
use dashboard_ai::components::chart_card::{self, CHART_WIDTH};
use dashboard_ai::components::{side_by_side, suggestion_card, ChartRenderer, DropZone};
use dashboard_ai::config::{generate_default_config, Config};
use dashboard_ai::state::{RequestState, ToastCenter};
use dashboard_ai::App;

#[derive(Parser)]
#[command(name = "dashboard-ai")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Upload a spreadsheet, get AI chart suggestions, build a dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: <config dir>/dashboard-ai/config.toml, then ./config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides the config file
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file, fetch suggestions and render the dashboard
    Run {
        /// CSV or XLSX file
        file: PathBuf,
        /// Add the suggestion with this title (repeatable)
        #[arg(short, long)]
        add: Vec<String>,
        /// Add every suggestion
        #[arg(long)]
        add_all: bool,
        /// Suggestion page to show (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Upload a dataset and print its reference
    Upload {
        /// CSV or XLSX file
        file: PathBuf,
    },

    /// List chart suggestions for a dataset
    Suggest {
        dataset_id: String,
    },

    /// Fetch and draw a single chart
    Chart {
        dataset_id: String,
        /// bar, line, pie or scatter
        #[arg(long, default_value = "bar")]
        chart_type: String,
        #[arg(long)]
        x_axis: String,
        #[arg(long)]
        y_axis: String,
        /// sum, mean, count, median, min or max
        #[arg(long, default_value = "sum")]
        aggregation: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config);
    tracing::debug!(base_url = %config.api.base_url, "Starting dashboard-ai");

    let client = Arc::new(ApiClient::from_config(&config.api));
    let toasts = Arc::new(ToastCenter::new().with_echo(cli.format == OutputFormat::Text));

    match cli.command {
        Commands::Run {
            file,
            add,
            add_all,
            page,
        } => run(client, toasts, &config, cli.format, file, add, add_all, page).await,

        Commands::Upload { file } => {
            let selected = DropZone::new(config.upload.max_file_size_bytes).accept(&[file])?;
            let payload = selected
                .read()
                .await
                .with_context(|| format!("Failed to read {}", selected.path.display()))?;
            let dataset = client.upload_dataset(payload).await?;

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dataset)?),
                OutputFormat::Text => {
                    println!("Uploaded {} as dataset {}", dataset.filename, dataset.dataset_id)
                }
            }
            Ok(())
        }

        Commands::Suggest { dataset_id } => {
            let suggestions = client.get_suggestions(&dataset_id).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&suggestions)?),
                OutputFormat::Text => {
                    if suggestions.is_empty() {
                        println!("No suggestions were generated for this dataset.");
                    }
                    let cards: Vec<Vec<String>> = suggestions
                        .iter()
                        .enumerate()
                        .map(|(i, s)| suggestion_card::render(s, i + 1, false))
                        .collect();
                    for row in cards.chunks(3) {
                        println!("{}", side_by_side(row, 2).join("\n"));
                    }
                }
            }
            Ok(())
        }

        Commands::Chart {
            dataset_id,
            chart_type,
            x_axis,
            y_axis,
            aggregation,
        } => {
            if !KNOWN_AGGREGATIONS.contains(&aggregation.as_str()) {
                bail!(
                    "Unknown aggregation '{}'. Expected one of: {}",
                    aggregation,
                    KNOWN_AGGREGATIONS.join(", ")
                );
            }

            let suggestion = Suggestion {
                title: format!("{} by {}", y_axis, x_axis),
                insight: String::new(),
                parameters: SuggestionParameters {
                    chart_type: ChartType::from(chart_type.as_str()),
                    x_axis,
                    y_axis,
                    aggregation,
                },
            };
            let chart = ChartRenderer::new(suggestion, client, toasts);
            chart.sync(Some(&dataset_id)).await;

            match cli.format {
                OutputFormat::Json => match chart.hook().state() {
                    RequestState::Success(data) => {
                        println!("{}", serde_json::to_string_pretty(&data)?)
                    }
                    RequestState::Error(e) => bail!("{}", e),
                    _ => bail!("Unsupported chart type: {}", chart_type),
                },
                OutputFormat::Text => {
                    let body = chart.render(CHART_WIDTH);
                    println!("{}", chart_card::render(chart.suggestion(), &body).join("\n"));
                    if let Some(e) = chart.hook().state().error() {
                        bail!("{}", e);
                    }
                }
            }
            Ok(())
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, &content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run(
    client: Arc<ApiClient>,
    toasts: Arc<ToastCenter>,
    config: &Config,
    format: OutputFormat,
    file: PathBuf,
    add: Vec<String>,
    add_all: bool,
    page: usize,
) -> anyhow::Result<()> {
    let mut app = App::new(client, toasts, config);

    if app.drop_files(&[file]).await?.is_none() {
        let message = app
            .upload()
            .hook()
            .state()
            .error()
            .map(str::to_string)
            .unwrap_or_else(|| "no dataset returned".to_string());
        bail!("Upload failed: {}", message);
    }

    app.load_suggestions().await;
    if let Some(e) = app.suggestions().hook().state().error() {
        bail!("Suggestion request failed: {}", e);
    }

    if add_all {
        app.add_all_charts();
    }
    for title in &add {
        match app.add_chart_by_title(title) {
            Some(outcome) => tracing::debug!(title = %title, ?outcome, "Add to dashboard"),
            None => tracing::warn!(title = %title, "No suggestion with this title"),
        }
    }

    let per_page = app.suggestions().carousel().per_page();
    for _ in 0..page.saturating_sub(1) * per_page {
        app.suggestions_mut().scroll_next();
    }

    let fetched = app.refresh_dashboard().await;
    tracing::info!(fetched, "Dashboard refreshed");

    match format {
        OutputFormat::Text => println!("{}", app.render().join("\n")),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary(&app))?),
    }
    Ok(())
}

fn summary(app: &App) -> serde_json::Value {
    let charts: Vec<serde_json::Value> = app
        .dashboard()
        .charts()
        .iter()
        .map(|chart| {
            let state = chart.hook().state();
            json!({
                "title": chart.suggestion().title,
                "parameters": chart.suggestion().parameters,
                "status": state.status().as_str(),
                "error": state.error(),
                "data": state.data(),
            })
        })
        .collect();

    json!({
        "dataset": app.dataset(),
        "suggestions": app.suggestions().suggestions(),
        "charts": charts,
    })
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dashboard_ai={}", config.logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
