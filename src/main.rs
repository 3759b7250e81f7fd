use analytics::{AnalyticsData, AnalyticsEngine};
use clap::{Parser, Subcommand};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use configuration::{Config, LoggingSettings};
use core_types::TimeRange;
use rust_decimal::Decimal;
use std::path::PathBuf;
use trade_store::SnapshotRepository;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use web_server::sorting::{sort_groups, SortKey};

/// The main entry point for the Botwatch analytics application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; it only carries optional overrides.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();
    let mut config = configuration::load_config(&cli.config)?;

    // The guard flushes the file appender on drop, so it lives until main returns.
    let _log_guard = init_tracing(&config.logging);

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args, &config).await,
        Commands::Serve(args) => {
            if let Some(port) = args.port {
                config.server.port = port;
            }
            web_server::run_server(&config).await
        }
    }
}

/// Console logging on stderr, plus a daily rolling file when a log directory is configured.
///
/// `RUST_LOG` takes precedence over `logging.level`.
fn init_tracing(settings: &LoggingSettings) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let (file_layer, guard) = match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, &settings.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Performance analytics for automated trading bots.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Missing files fall back to defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the analytics for a trade snapshot.
    Report(ReportArgs),
    /// Run the HTTP API.
    Serve(ServeArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// The snapshot file to read. Defaults to `store.snapshot_path`.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// The time window (1W, 1M, 3M, 6M, 1Y or ALL). Defaults to `analytics.default_time_range`.
    #[arg(long)]
    range: Option<TimeRange>,

    /// Print the raw analytics as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides `server.port`.
    #[arg(long)]
    port: Option<u16>,
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

async fn handle_report(args: ReportArgs, config: &Config) -> anyhow::Result<()> {
    let path = args
        .snapshot
        .unwrap_or_else(|| config.store.snapshot_path.clone());
    let range = args.range.unwrap_or(config.analytics.default_time_range);

    tracing::info!(snapshot = %path.display(), %range, "Building report.");
    let snapshot = SnapshotRepository::new(path).load_snapshot().await?;
    let mut data = AnalyticsEngine::new().compute(&snapshot.trades, range, &snapshot.bots)?;
    sort_groups(&mut data, SortKey::Pnl);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        print_report(&data);
    }
    Ok(())
}

/// Green for gains, red for losses.
fn pnl_cell(value: Decimal) -> Cell {
    let cell = Cell::new(value);
    if value.is_sign_positive() && !value.is_zero() {
        cell.fg(Color::Green)
    } else if value.is_sign_negative() && !value.is_zero() {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

fn print_report(data: &AnalyticsData) {
    let o = &data.overview;
    println!("Performance over {}", data.time_range);

    let mut overview = Table::new();
    overview
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value"]);
    overview.add_row(vec![Cell::new("Total P&L"), pnl_cell(o.total_pnl)]);
    overview.add_row(vec![Cell::new("Total P&L %"), pnl_cell(o.total_pnl_percentage)]);
    overview.add_row(vec![
        Cell::new("Trades (closed / open)"),
        Cell::new(format!("{} ({} / {})", o.total_trades, o.closed_trades, o.open_trades)),
    ]);
    overview.add_row(vec![Cell::new("Win rate %"), Cell::new(o.win_rate)]);
    overview.add_row(vec![Cell::new("Avg trade"), pnl_cell(o.avg_trade_return)]);
    overview.add_row(vec![
        Cell::new("Avg win / avg loss"),
        Cell::new(format!("{} / {}", o.avg_win, o.avg_loss)),
    ]);
    overview.add_row(vec![
        Cell::new("Best / worst trade"),
        Cell::new(format!("{} / {}", o.best_trade, o.worst_trade)),
    ]);
    overview.add_row(vec![Cell::new("Profit factor"), Cell::new(o.profit_factor)]);
    overview.add_row(vec![Cell::new("Sharpe ratio"), Cell::new(o.sharpe_ratio)]);
    overview.add_row(vec![
        Cell::new("Max drawdown"),
        Cell::new(format!("{} ({}%)", o.max_drawdown, o.max_drawdown_percentage)),
    ]);
    overview.add_row(vec![Cell::new("Capital deployed"), Cell::new(o.total_capital_deployed)]);
    println!("{overview}");

    let mut bots = Table::new();
    bots.set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Bot", "Status", "P&L", "ROC %", "Trades", "Win %", "Profit factor"]);
    for bot in &data.bot_performance {
        let status = bot
            .status
            .map(|s| format!("{s:?}").to_lowercase())
            .unwrap_or_else(|| "-".to_string());
        bots.add_row(vec![
            Cell::new(&bot.display_name),
            Cell::new(status),
            pnl_cell(bot.stats.total_pnl),
            Cell::new(bot.return_on_capital),
            Cell::new(bot.stats.total_trades),
            Cell::new(bot.stats.win_rate),
            Cell::new(bot.stats.profit_factor),
        ]);
    }
    println!("{bots}");

    let mut symbols = Table::new();
    symbols
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Symbol", "P&L", "Trades", "Win %", "Volume", "Avg size"]);
    for symbol in &data.symbol_performance {
        symbols.add_row(vec![
            Cell::new(&symbol.display_name),
            pnl_cell(symbol.stats.total_pnl),
            Cell::new(symbol.stats.total_trades),
            Cell::new(symbol.stats.win_rate),
            Cell::new(symbol.total_volume),
            Cell::new(symbol.avg_trade_size),
        ]);
    }
    println!("{symbols}");
}
