use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use taskrank_core::{
    Clock, FixedClock, STRATEGIES, ZonedClock, parse_due_date, rank_tasks, score_batch,
    strategy::lookup, validate_batch,
};
use taskrank_server::{
    AppState,
    config::{self, Config, DEFAULT_CONFIG_PATH},
    intake::parse_batch,
    router,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TASKRANK_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "taskrank",
    version = VERSION,
    about = "Smart task analyzer: weighted priority scoring"
)]
struct Cli {
    /// Config file (defaults apply when it does not exist)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Override [server].host
        #[arg(long)]
        host: Option<String>,

        /// Override [server].port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Rank a JSON file of tasks and print the result
    Analyze {
        /// Path to a JSON array of tasks
        file: PathBuf,

        /// smart | fastest | impact | deadline (default from config)
        #[arg(long)]
        strategy: Option<String>,

        /// Evaluate as of this day (YYYY-MM-DD) instead of today
        #[arg(long)]
        today: Option<String>,

        /// Print the ranking as JSON, same shape as the API
        #[arg(long)]
        json: bool,
    },

    /// Print the strategy weight table
    Strategies,

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Command::Serve { host, port } => {
            let mut cfg = cfg;
            if let Some(host) = host {
                cfg.server.host = host;
            }
            if let Some(port) = port {
                cfg.server.port = port;
            }
            serve(cfg).await?;
        }

        Command::Analyze {
            file,
            strategy,
            today,
            json,
        } => {
            let strategy = strategy.unwrap_or_else(|| cfg.scoring.default_strategy.clone());
            let clock: Box<dyn Clock> = match today {
                Some(day) => Box::new(FixedClock(
                    parse_due_date(&day).with_context(|| "parsing --today")?,
                )),
                None => Box::new(ZonedClock::from_name(&cfg.scoring.timezone)?),
            };
            analyze(&file, &strategy, clock.as_ref(), json)?;
        }

        Command::Strategies => {
            println!(
                "{:<10} {:>8} {:>10} {:>7} {:>12}",
                "strategy", "urgency", "importance", "effort", "dependencies"
            );
            for (name, w) in STRATEGIES {
                println!(
                    "{:<10} {:>8.2} {:>10.2} {:>7.2} {:>12.2}",
                    name, w.urgency, w.importance, w.effort, w.dependencies
                );
            }
            println!("\nUnknown names use the weights of '{}'.", STRATEGIES[0].0);
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                if config::init_config(&cli.config)? {
                    println!("Wrote {}", cli.config.display());
                } else {
                    println!("Config already exists: {}", cli.config.display());
                }
            }
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

async fn serve(cfg: Config) -> Result<()> {
    let clock = ZonedClock::from_name(&cfg.scoring.timezone)?;
    if lookup(&cfg.scoring.default_strategy).is_none() {
        warn!(
            strategy = %cfg.scoring.default_strategy,
            "default strategy is not a known preset; smart weights will be used"
        );
    }

    let state = Arc::new(AppState::new(
        Arc::new(clock),
        cfg.scoring.default_strategy.clone(),
        cfg.frontend.index_path.clone(),
    ));
    let app = router(state);

    let addr = cfg.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(version = VERSION, timezone = %clock.timezone(), "listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}

fn analyze(file: &Path, strategy: &str, clock: &dyn Clock, json: bool) -> Result<()> {
    if !file.exists() {
        bail!("task file not found: {}", file.display());
    }
    let body = std::fs::read(file).with_context(|| format!("read {}", file.display()))?;

    let tasks = parse_batch(&body)
        .and_then(validate_batch)
        .with_context(|| format!("validating {}", file.display()))?;

    let today = clock.today();
    let factors: Vec<_> = tasks
        .iter()
        .map(|t| t.title.clone())
        .zip(score_batch(&tasks, strategy, today))
        .collect();
    let ranking = rank_tasks(tasks, strategy, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&ranking)?);
        return Ok(());
    }

    println!("# {} tasks ranked with '{}' as of {}\n", ranking.total_tasks, strategy, today);

    for (i, t) in ranking.tasks.iter().enumerate() {
        println!(
            "{:>2}. {:.2} | {} | due {} | {}h | importance {}",
            i + 1,
            t.priority_score,
            t.task.title,
            t.task.due_date,
            t.task.estimated_hours,
            t.task.importance
        );
    }

    println!("\n## Factors (input order)\n");
    for (title, b) in &factors {
        println!(
            "- {}: urgency={:.2} importance={:.2} effort={:.2} dependencies={:.2} => {:.2}",
            title, b.urgency, b.importance, b.effort, b.dependencies, b.total
        );
    }

    Ok(())
}
