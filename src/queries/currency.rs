//! Currency conversion with a remembered-rate and static fallback chain.
//!
//! Conversions try the live exchange-rate API first. When it fails, a rate
//! fetched for the same pair within the last ten minutes is reused, and
//! failing that BRL/USD falls back to the configured static rate.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::config;
use crate::error::{CompareError, Result};
use crate::models::{CurrencyConversion, ExchangeRateResponse};
use crate::session::{RememberedRate, Session};

// ---------------------------------------------------------------------------
// CurrencyQuery
// ---------------------------------------------------------------------------

pub struct CurrencyQuery<'a> {
    session: &'a Session,
}

impl<'a> CurrencyQuery<'a> {
    /// Create a new `CurrencyQuery` bound to the given session.
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Convert `amount` from one currency to another.
    ///
    /// Only a non-finite amount or an unsupported pair during an outage is an
    /// error; otherwise the result is flagged `fallback` when it did not come
    /// from a live lookup.
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Result<CurrencyConversion> {
        if !amount.is_finite() {
            return Err(CompareError::InvalidArgument("Invalid amount".into()));
        }
        let from = from.trim().to_uppercase();
        let to = to.trim().to_uppercase();

        if from == to {
            return Ok(conversion(&from, &to, amount, 1.0, now_secs(), None, None));
        }

        match self.live_rate(&from, &to) {
            Ok(live) => {
                let result = conversion(
                    &from,
                    &to,
                    amount,
                    live.rate,
                    live.timestamp,
                    live.date.clone(),
                    None,
                );
                self.session.remember_rate(&from, &to, live);
                Ok(result)
            }
            Err(e) => {
                warn!(%from, %to, error = %e, "exchange rate lookup failed");
                self.fallback(&from, &to, amount)
            }
        }
    }

    /// BRL -> USD rate, never failing thanks to the static fallback.
    pub fn brl_to_usd_rate(&self) -> f64 {
        self.convert(1.0, "BRL", "USD")
            .map(|c| c.rate)
            .unwrap_or(self.session.fallback_rate)
    }

    fn live_rate(&self, from: &str, to: &str) -> Result<RememberedRate> {
        let url = format!("{}/{}", config::EXCHANGE_API_BASE, from);
        let value = self
            .session
            .cache
            .borrow_mut()
            .get_json_as(&url, config::API_USER_AGENT)?;
        let resp: ExchangeRateResponse = serde_json::from_value(value)?;

        if resp.success == Some(false) {
            return Err(CompareError::NotFound(
                "Exchange rate API returned error".into(),
            ));
        }
        let rate = resp
            .rates
            .get(to)
            .copied()
            .filter(|r| r.is_finite() && *r > 0.0)
            .ok_or_else(|| {
                CompareError::NotFound(format!("Exchange rate not found for {from} to {to}"))
            })?;

        let timestamp = resp
            .timestamp
            .or(resp.time_last_updated)
            .unwrap_or_else(now_secs);
        Ok(RememberedRate::new(rate, timestamp, resp.date))
    }

    fn fallback(&self, from: &str, to: &str, amount: f64) -> Result<CurrencyConversion> {
        if let Some(recent) = self.session.recent_rate(from, to) {
            return Ok(conversion(
                from,
                to,
                amount,
                recent.rate,
                recent.timestamp,
                recent.date,
                Some("Using cached exchange rate"),
            ));
        }

        let rate = match (from, to) {
            ("BRL", "USD") => self.session.fallback_rate,
            ("USD", "BRL") => 1.0 / self.session.fallback_rate,
            _ => {
                return Err(CompareError::NotFound(format!(
                    "No fallback exchange rate for {from} to {to}"
                )))
            }
        };
        Ok(conversion(
            from,
            to,
            amount,
            rate,
            now_secs(),
            None,
            Some("Using fallback exchange rate"),
        ))
    }
}

fn conversion(
    from: &str,
    to: &str,
    amount: f64,
    rate: f64,
    timestamp: u64,
    date: Option<String>,
    warning: Option<&str>,
) -> CurrencyConversion {
    CurrencyConversion {
        from: from.to_string(),
        to: to.to_string(),
        amount,
        rate,
        converted_amount: amount * rate,
        timestamp,
        date,
        fallback: warning.is_some(),
        warning: warning.map(str::to_string),
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
