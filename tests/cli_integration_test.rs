//! CLI wiring tests: config loading, option building, report rendering.

mod common;

use approx::assert_relative_eq;
use common::*;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::NamedTempFile;
use vcphunter::adapters::file_config_adapter::FileConfigAdapter;
use vcphunter::cli::{
    build_scan_options, build_size_input, execute_scan, load_config, parse_watch, render_report,
    render_size, resolve_universe, DEFAULT_CAPITAL, DEFAULT_RISK_PCT,
};
use vcphunter::domain::error::HunterError;
use vcphunter::domain::position::size_position;
use vcphunter::domain::scanner::ScanOptions;
use vcphunter::domain::strategy::Strategy;

fn config(ini: &str) -> FileConfigAdapter {
    FileConfigAdapter::from_string(ini).unwrap()
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

mod config_loading {
    use super::*;

    #[test]
    fn no_path_gives_empty_config() {
        let adapter = load_config(None).unwrap();
        let universe = resolve_universe(&adapter).unwrap();
        assert_eq!(universe.len(), 8);
        assert_eq!(universe[0].symbol, "2330");
    }

    #[test]
    fn loads_and_validates_file() {
        let file = write_config(
            "[scan]\nstrategy = power_play\n[universe]\nstocks = 2330|TSMC|Semis, 2603.tw|Evergreen|Shipping\n",
        );
        let path = PathBuf::from(file.path());
        let adapter = load_config(Some(&path)).unwrap();

        let universe = resolve_universe(&adapter).unwrap();
        assert_eq!(universe.len(), 2);
        assert_eq!(universe[1].symbol, "2603");
        assert_eq!(universe[1].display_symbol(), "2603.TW");
    }

    #[test]
    fn invalid_file_is_rejected() {
        let file = write_config("[risk]\nrisk_pct = 250\n");
        let path = PathBuf::from(file.path());
        assert!(matches!(
            load_config(Some(&path)),
            Err(HunterError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn min_bars_below_floor_is_rejected() {
        let file = write_config("[scan]\nstrategy = power_play\nmin_bars = 20\n");
        let path = PathBuf::from(file.path());
        assert!(matches!(
            load_config(Some(&path)),
            Err(HunterError::ConfigInvalid { key, .. }) if key == "min_bars"
        ));
    }

    #[test]
    fn missing_file_is_parse_error() {
        let path = PathBuf::from("/nonexistent/dir/vcphunter.ini");
        assert!(matches!(
            load_config(Some(&path)),
            Err(HunterError::ConfigParse { .. })
        ));
    }
}

mod scan_options {
    use super::*;

    #[test]
    fn defaults_without_config() {
        let opts = build_scan_options(&config(""), as_of(), None).unwrap();
        let defaults = ScanOptions::new(as_of(), Strategy::Standard);
        assert_eq!(opts.strategy, Strategy::Standard);
        assert_eq!(opts.price_lookback_days, defaults.price_lookback_days);
        assert_eq!(opts.min_bars, 50);
        assert!(!opts.gate_fundamentals);
        assert_eq!(opts.fetch_timeout, Duration::from_secs(15));
    }

    #[test]
    fn config_values_applied() {
        let cfg = config(
            "[data]\ntimeout_secs = 20\n[scan]\nstrategy = power_play\nflow_lookback_days = 5\nmin_bars = 60\ngate_fundamentals = yes\n",
        );
        let opts = build_scan_options(&cfg, as_of(), None).unwrap();
        assert_eq!(opts.strategy, Strategy::PowerPlay);
        assert_eq!(opts.flow_lookback_days, 5);
        assert_eq!(opts.min_bars, 60);
        assert!(opts.gate_fundamentals);
        assert_eq!(opts.fetch_timeout, Duration::from_secs(25));
    }

    #[test]
    fn min_bars_below_floor_is_error() {
        let cfg = config("[scan]\nstrategy = power_play\nmin_bars = 20\n");
        assert!(matches!(
            build_scan_options(&cfg, as_of(), None),
            Err(HunterError::ConfigInvalid { key, .. }) if key == "min_bars"
        ));
    }

    #[test]
    fn override_beats_config() {
        let cfg = config("[scan]\nstrategy = power_play\n");
        let opts = build_scan_options(&cfg, as_of(), Some("vcp")).unwrap();
        assert_eq!(opts.strategy, Strategy::Standard);
    }

    #[test]
    fn unknown_strategy_is_error() {
        let err = build_scan_options(&config(""), as_of(), Some("breakout")).unwrap_err();
        assert!(matches!(err, HunterError::UnknownStrategy(s) if s == "breakout"));
    }

    #[test]
    fn non_positive_lookback_is_error() {
        let cfg = config("[scan]\nprice_lookback_days = 0\n");
        assert!(matches!(
            build_scan_options(&cfg, as_of(), None),
            Err(HunterError::ConfigInvalid { key, .. }) if key == "price_lookback_days"
        ));
    }
}

mod sizing {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cfg = config("[risk]\ncapital = 500000\nrisk_pct = 2\n");
        let input = build_size_input(&cfg, 100.0, 95.0, Some(1_000_000.0), None).unwrap();
        assert_relative_eq!(input.capital, 1_000_000.0);
        assert_relative_eq!(input.risk_pct, 2.0);
    }

    #[test]
    fn defaults_when_unset() {
        let input = build_size_input(&config(""), 100.0, 95.0, None, None).unwrap();
        assert_relative_eq!(input.capital, DEFAULT_CAPITAL);
        assert_relative_eq!(input.risk_pct, DEFAULT_RISK_PCT);
    }

    #[test]
    fn risk_pct_out_of_range_is_error() {
        assert!(matches!(
            build_size_input(&config(""), 100.0, 95.0, None, Some(150.0)),
            Err(HunterError::ConfigInvalid { key, .. }) if key == "risk_pct"
        ));
        assert!(build_size_input(&config(""), 100.0, 95.0, None, Some(-1.0)).is_err());
        assert!(build_size_input(&config(""), 100.0, 95.0, None, Some(100.0)).is_ok());
    }

    #[test]
    fn renders_lots() {
        let input = build_size_input(&config(""), 100.0, 95.0, None, None).unwrap();
        let out = render_size(&input, &size_position(&input));
        assert!(out.contains("buy 2 lots (2000 shares)"));
        assert!(out.contains("max loss at stop: 10000"));
        assert!(out.contains("position value:   200000"));
        assert!(!out.contains("limited by total capital"));
    }

    #[test]
    fn renders_invalid_position() {
        let input = build_size_input(&config(""), 100.0, 100.0, None, None).unwrap();
        let out = render_size(&input, &size_position(&input));
        assert!(out.starts_with("no valid position"));
    }

    #[test]
    fn renders_capital_bound() {
        let input = build_size_input(&config(""), 500.0, 499.0, None, None).unwrap();
        let out = render_size(&input, &size_position(&input));
        assert!(out.contains("limited by total capital"));
    }
}

mod scan_report {
    use super::*;

    #[tokio::test]
    async fn report_lists_setups() {
        let port = MockDataPort::new().with_prices("2330", &rising(55, 100.0, 1.0));
        let opts = ScanOptions::new(as_of(), Strategy::PowerPlay);

        let report = execute_scan(&port, &[entry("2330")], &opts, &[]).await;

        assert_eq!(report.results.len(), 1);
        assert!(report.alerts.is_empty());
        let out = render_report(&report);
        assert!(out.starts_with("power_play scan as of 2024-06-28: 1 setup(s)"));
        assert!(out.contains("2330.TW Name 2330 [Test]"));
        assert!(out.contains("stop 147.84"));
        assert!(out.contains("target 192.50"));
    }

    #[tokio::test]
    async fn watched_symbol_near_stop_alerts() {
        // a 4% stop always sits within the 5% alert band
        let port = MockDataPort::new()
            .with_prices("2330", &rising(55, 100.0, 1.0))
            .with_prices("2454", &rising(55, 200.0, 2.0));
        let opts = ScanOptions::new(as_of(), Strategy::PowerPlay);
        let watch = parse_watch(Some("2330.tw"));

        let report = execute_scan(&port, &[entry("2330"), entry("2454")], &opts, &watch).await;

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.alerts.len(), 1);
        assert_eq!(report.alerts[0].symbol, "2330.TW");
        assert_relative_eq!(report.alerts[0].alert_price, 147.84);
        assert!(render_report(&report).contains("ALERT 2330.TW at 154.00"));
    }

    #[tokio::test]
    async fn standard_stop_outside_alert_band() {
        let port = MockDataPort::new().with_prices("2330", &rising(200, 100.0, 1.0));
        let opts = ScanOptions::new(as_of(), Strategy::Standard);

        let report = execute_scan(&port, &[entry("2330")], &opts, &parse_watch(Some("2330"))).await;

        // 299 > 273.42 * 1.05
        assert_eq!(report.results.len(), 1);
        assert!(report.alerts.is_empty());
    }

    #[tokio::test]
    async fn report_serializes_to_json() {
        let port = MockDataPort::new().with_prices("2330", &rising(55, 100.0, 1.0));
        let opts = ScanOptions::new(as_of(), Strategy::PowerPlay);
        let report = execute_scan(&port, &[entry("2330")], &opts, &[]).await;

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["strategy"], "power_play");
        assert_eq!(value["as_of"], "2024-06-28");
        assert_eq!(value["results"][0]["symbol"], "2330.TW");
        assert_eq!(value["results"][0]["trend"], "neutral");
        assert_eq!(value["results"][0]["candles"].as_array().unwrap().len(), 55);
        assert!(value["results"][0]["fundamentals"]["eps_growth"].is_null());
    }
}
