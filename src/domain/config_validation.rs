//! Configuration validation.
//!
//! Checks every section before a scan or server start. Absent keys are fine
//! (defaults apply); present keys must hold usable values.

use crate::domain::error::HunterError;
use crate::domain::scanner::MIN_BARS;
use crate::domain::strategy::Strategy;
use crate::domain::universe::parse_universe;
use crate::ports::config_port::ConfigPort;
use std::net::SocketAddr;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), HunterError> {
    validate_data(config)?;
    validate_scan(config)?;
    validate_universe(config)?;
    validate_risk(config)?;
    validate_web(config)?;
    Ok(())
}

fn validate_data(config: &dyn ConfigPort) -> Result<(), HunterError> {
    if let Some(url) = config.get_trimmed("data", "base_url") {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(HunterError::invalid(
                "data",
                "base_url",
                "base_url must be an http(s) URL",
            ));
        }
    }
    if config.get_int("data", "timeout_secs", 1) <= 0 {
        return Err(HunterError::invalid("data", "timeout_secs", "timeout_secs must be positive"));
    }
    Ok(())
}

fn validate_scan(config: &dyn ConfigPort) -> Result<(), HunterError> {
    if let Some(s) = config.get_trimmed("scan", "strategy") {
        s.parse::<Strategy>()
            .map_err(|e| HunterError::invalid("scan", "strategy", e.to_string()))?;
    }
    for key in [
        "price_lookback_days",
        "flow_lookback_days",
        "revenue_lookback_days",
        "flow_max_rows",
        "min_bars",
    ] {
        if config.get_int("scan", key, 1) < 1 {
            return Err(HunterError::invalid("scan", key, format!("{key} must be at least 1")));
        }
    }
    if config.get_int("scan", "min_bars", MIN_BARS as i64) < MIN_BARS as i64 {
        return Err(HunterError::invalid(
            "scan",
            "min_bars",
            format!("min_bars must be at least {MIN_BARS}"),
        ));
    }
    Ok(())
}

fn validate_universe(config: &dyn ConfigPort) -> Result<(), HunterError> {
    if let Some(stocks) = config.get_trimmed("universe", "stocks") {
        parse_universe(&stocks)?;
    }
    Ok(())
}

fn validate_risk(config: &dyn ConfigPort) -> Result<(), HunterError> {
    if config.get_double("risk", "capital", 1.0) <= 0.0 {
        return Err(HunterError::invalid("risk", "capital", "capital must be positive"));
    }
    let risk_pct = config.get_double("risk", "risk_pct", 1.0);
    if !(0.0..=100.0).contains(&risk_pct) {
        return Err(HunterError::invalid(
            "risk",
            "risk_pct",
            "risk_pct must be between 0 and 100",
        ));
    }
    Ok(())
}

fn validate_web(config: &dyn ConfigPort) -> Result<(), HunterError> {
    if let Some(listen) = config.get_trimmed("web", "listen") {
        listen.parse::<SocketAddr>().map_err(|_| {
            HunterError::invalid("web", "listen", format!("{listen:?} is not a socket address"))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn check(ini: &str) -> Result<(), HunterError> {
        validate_config(&FileConfigAdapter::from_string(ini).unwrap())
    }

    fn invalid_key(result: Result<(), HunterError>) -> Option<(String, String)> {
        match result {
            Err(HunterError::ConfigInvalid { section, key, .. }) => Some((section, key)),
            _ => None,
        }
    }

    #[test]
    fn empty_config_is_valid() {
        assert!(check("").is_ok());
    }

    #[test]
    fn full_config_is_valid() {
        let ini = r#"
[data]
base_url = https://api.finmindtrade.com/api/v4/data
timeout_secs = 10
[scan]
strategy = standard
min_bars = 50
[universe]
stocks = 2330|TSMC|Semiconductors
[risk]
capital = 500000
risk_pct = 2
[web]
listen = 127.0.0.1:3000
"#;
        assert!(check(ini).is_ok());
    }

    #[test]
    fn rejects_bad_url() {
        assert_eq!(
            invalid_key(check("[data]\nbase_url = ftp://example.com\n")),
            Some(("data".into(), "base_url".into()))
        );
    }

    #[test]
    fn rejects_unknown_strategy() {
        assert_eq!(
            invalid_key(check("[scan]\nstrategy = breakout\n")),
            Some(("scan".into(), "strategy".into()))
        );
    }

    #[test]
    fn rejects_zero_lookback() {
        assert_eq!(
            invalid_key(check("[scan]\nflow_lookback_days = 0\n")),
            Some(("scan".into(), "flow_lookback_days".into()))
        );
    }

    #[test]
    fn rejects_min_bars_below_floor() {
        assert_eq!(
            invalid_key(check("[scan]\nmin_bars = 20\n")),
            Some(("scan".into(), "min_bars".into()))
        );
        assert!(check("[scan]\nmin_bars = 50\n").is_ok());
        assert!(check("[scan]\nmin_bars = 120\n").is_ok());
    }

    #[test]
    fn rejects_bad_universe() {
        assert!(matches!(
            check("[universe]\nstocks = 2330|TSMC\n"),
            Err(HunterError::Universe(_))
        ));
    }

    #[test]
    fn rejects_bad_risk() {
        assert_eq!(
            invalid_key(check("[risk]\ncapital = -1\n")),
            Some(("risk".into(), "capital".into()))
        );
        assert_eq!(
            invalid_key(check("[risk]\nrisk_pct = 150\n")),
            Some(("risk".into(), "risk_pct".into()))
        );
    }

    #[test]
    fn rejects_bad_listen() {
        assert_eq!(
            invalid_key(check("[web]\nlisten = localhost\n")),
            Some(("web".into(), "listen".into()))
        );
    }
}
