//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::finmind_adapter::{FinMindAdapter, DEFAULT_TIMEOUT_SECS};
use crate::domain::config_validation::validate_config;
use crate::domain::error::HunterError;
use crate::domain::position::{size_position, PositionSize, PositionSizeInput};
use crate::domain::scanner::{scan_market, ScanOptions, ScanResult, MIN_BARS};
use crate::domain::strategy::Strategy;
use crate::domain::universe::{default_universe, parse_universe, UniverseEntry};
use crate::domain::watchlist::{StopAlert, Watchlist};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

pub const DEFAULT_CAPITAL: f64 = 1_000_000.0;
pub const DEFAULT_RISK_PCT: f64 = 1.0;

#[derive(Parser, Debug)]
#[command(name = "vcphunter", about = "Taiwan-market VCP / Power Play screener")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan the universe for setups
    Scan {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// standard or power_play
        #[arg(short, long)]
        strategy: Option<String>,
        /// Scan as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Comma-separated symbols to watch for stop alerts
        #[arg(long)]
        watch: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Size a position from capital, risk and stop distance
    Size {
        #[arg(long)]
        entry: f64,
        #[arg(long)]
        stop: f64,
        #[arg(long)]
        capital: Option<f64>,
        #[arg(long)]
        risk_pct: Option<f64>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List the configured symbol universe
    Universe {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Start the JSON API server
    Serve {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Scan {
            config,
            strategy,
            as_of,
            watch,
            json,
        } => run_scan(config.as_ref(), strategy.as_deref(), as_of, watch.as_deref(), json),
        Command::Size {
            entry,
            stop,
            capital,
            risk_pct,
            config,
        } => run_size(entry, stop, capital, risk_pct, config.as_ref()),
        Command::Universe { config } => run_universe(config.as_ref()),
        Command::Validate { config } => run_validate(&config),
        Command::Serve { config } => run_serve(config.as_ref()),
    }
}

fn fail(err: HunterError) -> ExitCode {
    tracing::error!("{err}");
    (&err).into()
}

/// Loads and validates the config file, or an empty config when none is given.
pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, HunterError> {
    let adapter = match path {
        Some(p) => {
            tracing::info!("loading config from {}", p.display());
            FileConfigAdapter::from_file(p)?
        }
        None => FileConfigAdapter::from_string("")?,
    };
    validate_config(&adapter)?;
    Ok(adapter)
}

pub fn resolve_universe(config: &dyn ConfigPort) -> Result<Vec<UniverseEntry>, HunterError> {
    match config.get_trimmed("universe", "stocks") {
        Some(stocks) => Ok(parse_universe(&stocks)?),
        None => Ok(default_universe()),
    }
}

fn positive(config: &dyn ConfigPort, key: &str, default: i64) -> Result<i64, HunterError> {
    let value = config.get_int("scan", key, default);
    if value < 1 {
        return Err(HunterError::invalid("scan", key, format!("{key} must be at least 1")));
    }
    Ok(value)
}

/// Builds scan options from the `[scan]` and `[data]` sections.
pub fn build_scan_options(
    config: &dyn ConfigPort,
    as_of: NaiveDate,
    strategy_override: Option<&str>,
) -> Result<ScanOptions, HunterError> {
    let strategy = match strategy_override.map(str::to_string).or_else(|| config.get_trimmed("scan", "strategy")) {
        Some(s) => s.parse::<Strategy>()?,
        None => Strategy::default(),
    };

    let mut options = ScanOptions::new(as_of, strategy);
    options.price_lookback_days = positive(config, "price_lookback_days", options.price_lookback_days)?;
    options.flow_lookback_days = positive(config, "flow_lookback_days", options.flow_lookback_days)?;
    options.revenue_lookback_days =
        positive(config, "revenue_lookback_days", options.revenue_lookback_days)?;
    options.flow_max_rows = positive(config, "flow_max_rows", options.flow_max_rows as i64)? as usize;
    options.min_bars = positive(config, "min_bars", options.min_bars as i64)? as usize;
    if options.min_bars < MIN_BARS {
        return Err(HunterError::invalid(
            "scan",
            "min_bars",
            format!("min_bars must be at least {MIN_BARS}"),
        ));
    }
    options.gate_fundamentals = config.get_bool("scan", "gate_fundamentals", false);

    // outer bound sits just above the HTTP client's own request timeout
    let timeout_secs = config.get_int("data", "timeout_secs", DEFAULT_TIMEOUT_SECS).max(1) as u64;
    options.fetch_timeout = Duration::from_secs(timeout_secs + 5);
    Ok(options)
}

/// Merges flags over the `[risk]` section. `risk_pct` must lie in 0..=100.
pub fn build_size_input(
    config: &dyn ConfigPort,
    entry: f64,
    stop: f64,
    capital: Option<f64>,
    risk_pct: Option<f64>,
) -> Result<PositionSizeInput, HunterError> {
    let risk_pct =
        risk_pct.unwrap_or_else(|| config.get_double("risk", "risk_pct", DEFAULT_RISK_PCT));
    if !(0.0..=100.0).contains(&risk_pct) {
        return Err(HunterError::invalid(
            "risk",
            "risk_pct",
            format!("risk_pct {risk_pct} must be between 0 and 100"),
        ));
    }
    Ok(PositionSizeInput {
        capital: capital.unwrap_or_else(|| config.get_double("risk", "capital", DEFAULT_CAPITAL)),
        risk_pct,
        entry,
        stop,
    })
}

#[derive(Debug, serde::Serialize)]
pub struct ScanReport {
    pub strategy: Strategy,
    pub as_of: NaiveDate,
    pub results: Vec<ScanResult>,
    pub alerts: Vec<StopAlert>,
}

/// Runs one scan and checks watched symbols against their stops.
pub async fn execute_scan(
    port: &dyn DataPort,
    universe: &[UniverseEntry],
    options: &ScanOptions,
    watch: &[String],
) -> ScanReport {
    let results = scan_market(port, universe, options).await;

    let mut watchlist = Watchlist::new();
    for result in &results {
        let bare = result.symbol.trim_end_matches(".TW");
        if watch.iter().any(|w| w == &result.symbol || w == bare) {
            watchlist.toggle(result);
        }
    }
    let alerts = watchlist.alerts(&results);

    ScanReport {
        strategy: options.strategy,
        as_of: options.as_of,
        results,
        alerts,
    }
}

pub fn parse_watch(watch: Option<&str>) -> Vec<String> {
    watch
        .map(|w| {
            w.split(',')
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

pub fn render_report(report: &ScanReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} scan as of {}: {} setup(s)",
        report.strategy,
        report.as_of,
        report.results.len()
    );
    for r in &report.results {
        let _ = writeln!(
            out,
            "\n{} {} [{}]  price {:.2} ({:+.2}%)  trend {}",
            r.symbol, r.name, r.sector, r.price, r.change_pct, r.trend
        );
        let _ = writeln!(
            out,
            "  pivot {:.2}  stop {:.2}  target {:.2}  contractions {}  dry-up {}",
            r.setup.pivot_price,
            r.setup.stop_loss,
            r.setup.target1,
            r.setup.contractions,
            if r.setup.dry_up_volume { "yes" } else { "no" }
        );
        let _ = writeln!(
            out,
            "  foreign {:+} lots  trust {:+} lots  revenue yoy {:.2}%",
            r.chips.foreign_net_buy, r.chips.trust_net_buy, r.fundamentals.revenue_yoy
        );
        let _ = writeln!(out, "  {}", r.rationale);
    }
    for a in &report.alerts {
        let _ = writeln!(
            out,
            "\nALERT {} at {:.2} is within 5% of its stop {:.2}",
            a.symbol, a.price, a.alert_price
        );
    }
    out
}

pub fn render_size(input: &PositionSizeInput, size: &PositionSize) -> String {
    let mut out = String::new();
    if size.is_empty() {
        let _ = writeln!(
            out,
            "no valid position: stop {:.2} must be below entry {:.2} and capital positive",
            input.stop, input.entry
        );
        return out;
    }
    let _ = writeln!(out, "buy {} {} ({} shares)", size.quantity, size.unit, size.shares);
    let _ = writeln!(out, "max loss at stop: {:.0}", size.risk_amount);
    let _ = writeln!(out, "position value:   {:.0}", size.total_cost);
    if size.capital_bound {
        let _ = writeln!(out, "limited by total capital");
    }
    out
}

fn runtime() -> Result<tokio::runtime::Runtime, HunterError> {
    Ok(tokio::runtime::Runtime::new()?)
}

fn run_scan(
    config_path: Option<&PathBuf>,
    strategy: Option<&str>,
    as_of: Option<NaiveDate>,
    watch: Option<&str>,
    json: bool,
) -> ExitCode {
    let result = (|| -> Result<String, HunterError> {
        let config = load_config(config_path)?;
        let universe = resolve_universe(&config)?;
        let as_of = as_of.unwrap_or_else(|| chrono::Local::now().date_naive());
        let options = build_scan_options(&config, as_of, strategy)?;
        let port = FinMindAdapter::from_config(&config)?;
        let watch = parse_watch(watch);

        let report = runtime()?.block_on(execute_scan(&port, &universe, &options, &watch));
        if json {
            serde_json::to_string_pretty(&report).map_err(|e| HunterError::Io(e.into()))
        } else {
            Ok(render_report(&report))
        }
    })();

    match result {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn run_size(
    entry: f64,
    stop: f64,
    capital: Option<f64>,
    risk_pct: Option<f64>,
    config_path: Option<&PathBuf>,
) -> ExitCode {
    let input = match load_config(config_path)
        .and_then(|c| build_size_input(&c, entry, stop, capital, risk_pct))
    {
        Ok(input) => input,
        Err(e) => return fail(e),
    };
    let size = size_position(&input);
    print!("{}", render_size(&input, &size));
    ExitCode::SUCCESS
}

fn run_universe(config_path: Option<&PathBuf>) -> ExitCode {
    let universe = match load_config(config_path).and_then(|c| resolve_universe(&c)) {
        Ok(u) => u,
        Err(e) => return fail(e),
    };
    for entry in &universe {
        println!("{}\t{}\t{}", entry.display_symbol(), entry.name, entry.sector);
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    match load_config(Some(config_path)).and_then(|c| resolve_universe(&c).map(|u| u.len())) {
        Ok(count) => {
            println!("{}: OK ({} symbols)", config_path.display(), count);
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn run_serve(config_path: Option<&PathBuf>) -> ExitCode {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{build_router, AppState};
        use std::net::SocketAddr;
        use std::sync::Arc;

        let result = (|| -> Result<(), HunterError> {
            let config = load_config(config_path)?;
            let universe = resolve_universe(&config)?;
            let options = build_scan_options(&config, chrono::Local::now().date_naive(), None)?;
            let port = FinMindAdapter::from_config(&config)?;
            let addr: SocketAddr = config
                .get_trimmed("web", "listen")
                .unwrap_or_else(|| "127.0.0.1:3000".to_string())
                .parse()
                .map_err(|_| HunterError::invalid("web", "listen", "not a socket address"))?;

            let state = AppState {
                data_port: Arc::new(port),
                universe,
                scan_defaults: options,
                default_capital: config.get_double("risk", "capital", DEFAULT_CAPITAL),
                default_risk_pct: config.get_double("risk", "risk_pct", DEFAULT_RISK_PCT),
            };
            let router = build_router(state);

            runtime()?.block_on(async {
                let listener = tokio::net::TcpListener::bind(addr).await?;
                tracing::info!("listening on {addr}");
                axum::serve(listener, router).await
            })?;
            Ok(())
        })();

        match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => fail(e),
        }
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        tracing::error!("web feature is required for serve");
        ExitCode::from(1)
    }
}
