// src/prices/client.rs

use std::cell::Cell;
use std::fmt;
use std::str::FromStr;
use std::thread;
use std::time::Instant;

use serde_json::{Map, Value};

use crate::config::options::{ClientOptions, Endpoints};
use crate::core::net::{self, HttpTransport, Transport};
use crate::core::sanitize;
use crate::error::{Error, Result};

use super::pacing::Pacing;

/// Routes under the wiki prices endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Latest,
    FiveMinute,
    OneHour,
    TimeSeries,
    Mapping,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Latest => "latest",
            Route::FiveMinute => "5m",
            Route::OneHour => "1h",
            Route::TimeSeries => "timeseries",
            Route::Mapping => "mapping",
        }
    }
}

/// Averaging window of the timeseries route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timestep {
    FiveMinutes,
    OneHour,
    SixHours,
    OneDay,
}

impl Timestep {
    pub fn as_str(self) -> &'static str {
        match self {
            Timestep::FiveMinutes => "5m",
            Timestep::OneHour => "1h",
            Timestep::SixHours => "6h",
            Timestep::OneDay => "24h",
        }
    }
}

impl FromStr for Timestep {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "5m" => Ok(Timestep::FiveMinutes),
            "1h" => Ok(Timestep::OneHour),
            "6h" => Ok(Timestep::SixHours),
            "24h" => Ok(Timestep::OneDay),
            _ => Err(Error::InvalidTimestep(s!(s))),
        }
    }
}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grand exchange price lookups.
///
/// Every operation comes in two forms. `try_*` returns the failure. The
/// plain form returns an empty value instead (`{}` for JSON, `0` for a
/// price) on *any* failure, so "no data" and "request failed" look the same
/// to the caller. This matches the upstream APIs, which answer unknown ids
/// with empty results rather than errors.
pub struct PriceClient {
    transport: Box<dyn Transport>,
    endpoints: Endpoints,
    pacing: Pacing,
    last_request: Cell<Option<Instant>>,
}

impl PriceClient {
    pub fn new(opts: &ClientOptions) -> Self {
        Self::with_transport(opts, Box::new(HttpTransport::new(opts)))
    }

    pub fn with_transport(opts: &ClientOptions, transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            endpoints: opts.endpoints.clone(),
            pacing: opts.pacing,
            last_request: Cell::new(None),
        }
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    pub fn set_pacing(&mut self, pacing: Pacing) {
        self.pacing = pacing;
    }

    /* ---------- wiki prices API ---------- */

    /// Latest high/low for one item, or for every item when `id` is `None`.
    pub fn try_latest(&self, id: Option<u32>) -> Result<Value> {
        let query = match id {
            Some(id) => query!["id" => id],
            None => query![],
        };
        self.prices(Route::Latest, &query)
    }

    pub fn latest(&self, id: Option<u32>) -> Value {
        self.try_latest(id).unwrap_or_else(|e| degrade("latest", e, empty_object()))
    }

    /// 5-minute averages for all items. `timestamp` selects the window
    /// starting at that unix time; `None` is the most recent window.
    pub fn try_five_minute(&self, timestamp: Option<i64>) -> Result<Value> {
        self.prices(Route::FiveMinute, &timestamp_query(timestamp))
    }

    pub fn five_minute(&self, timestamp: Option<i64>) -> Value {
        self.try_five_minute(timestamp).unwrap_or_else(|e| degrade("5m", e, empty_object()))
    }

    /// 1-hour averages for all items; see [`PriceClient::try_five_minute`].
    pub fn try_one_hour(&self, timestamp: Option<i64>) -> Result<Value> {
        self.prices(Route::OneHour, &timestamp_query(timestamp))
    }

    pub fn one_hour(&self, timestamp: Option<i64>) -> Value {
        self.try_one_hour(timestamp).unwrap_or_else(|e| degrade("1h", e, empty_object()))
    }

    pub fn try_time_series(&self, id: u32, timestep: Timestep) -> Result<Value> {
        self.prices(Route::TimeSeries, &query!["id" => id, "timestep" => timestep.as_str()])
    }

    pub fn time_series(&self, id: u32, timestep: Timestep) -> Value {
        self.try_time_series(id, timestep)
            .unwrap_or_else(|e| degrade("timeseries", e, empty_object()))
    }

    /// Metadata for every item. Large; the catalog caches it on disk.
    pub fn try_mapping(&self) -> Result<Value> {
        self.prices(Route::Mapping, &query![])
    }

    /* ---------- official grand exchange API ---------- */

    /// Exact current price: the newest point of the item's daily graph.
    pub fn try_current_price(&self, id: u32) -> Result<i64> {
        let url = format!("{}{}.json", self.endpoints.graph, id);
        let graph = self.get_json(&url, &query![])?;
        latest_daily_price(&graph)
            .ok_or_else(|| Error::UnexpectedResponse(format!("no daily prices for item {id}")))
    }

    /// `0` when the price could not be fetched.
    pub fn current_price(&self, id: u32) -> i64 {
        self.try_current_price(id).unwrap_or_else(|e| degrade("current price", e, 0))
    }

    /// Catalogue entry for an item: rounded price plus trend fields.
    pub fn try_ge_lookup(&self, id: u32) -> Result<Value> {
        let detail = self.get_json(&self.endpoints.ge_detail, &query!["item" => id])?;
        match detail.get("item") {
            Some(item @ Value::Object(_)) => Ok(item.clone()),
            _ => Err(Error::UnexpectedResponse(format!("no catalogue entry for item {id}"))),
        }
    }

    pub fn ge_lookup(&self, id: u32) -> Value {
        self.try_ge_lookup(id).unwrap_or_else(|e| degrade("ge lookup", e, empty_object()))
    }

    /// The catalogue's rounded price (`"217.1k"`) as a number.
    pub fn try_ge_price(&self, id: u32) -> Result<i64> {
        let item = self.try_ge_lookup(id)?;
        match item.pointer("/current/price") {
            Some(Value::String(p)) => sanitize::convert(p),
            Some(Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| Error::InvalidNumber(n.to_string())),
            _ => Err(Error::UnexpectedResponse(format!("no current price for item {id}"))),
        }
    }

    /* ---------- plumbing ---------- */

    fn prices(&self, route: Route, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}/{}", self.endpoints.prices, route.path());
        self.get_json(&url, query)
    }

    fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        self.pace();
        logd!("GET {}", net::describe(url, query));
        let body = self.transport.get(url, query)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn pace(&self) {
        let wait = self.pacing.delay_before(self.last_request.get(), Instant::now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        self.last_request.set(Some(Instant::now()));
    }
}

fn timestamp_query(timestamp: Option<i64>) -> Vec<(&'static str, String)> {
    match timestamp {
        Some(ts) => query!["timestamp" => ts],
        None => query![],
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn degrade<T>(op: &str, err: Error, fallback: T) -> T {
    logd!("{op} failed, returning empty result: {err}");
    fallback
}

/// Value under the greatest timestamp key of `daily`. Keys are unix
/// millis as strings; object order is not relied on.
fn latest_daily_price(graph: &Value) -> Option<i64> {
    let daily = graph.get("daily")?.as_object()?;
    let (_, price) = daily
        .iter()
        .filter_map(|(k, v)| Some((k.parse::<u64>().ok()?, v)))
        .max_by_key(|(ts, _)| *ts)?;
    price.as_i64().or_else(|| price.as_f64().map(|f| f as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn newest_daily_point_wins_regardless_of_key_order() {
        let graph = json!({
            "daily": {
                "1665187200000": 120,
                "999999999999": 999,
                "1665273600000": 135,
                "1665100800000": 110
            },
            "average": { "1665273600000": 128 }
        });
        assert_eq!(latest_daily_price(&graph), Some(135));
    }

    #[test]
    fn missing_or_empty_daily_is_none() {
        assert_eq!(latest_daily_price(&json!({})), None);
        assert_eq!(latest_daily_price(&json!({ "daily": {} })), None);
        assert_eq!(latest_daily_price(&json!({ "daily": [1, 2] })), None);
    }

    #[test]
    fn timestep_round_trips_through_str() {
        for t in [Timestep::FiveMinutes, Timestep::OneHour, Timestep::SixHours, Timestep::OneDay] {
            assert_eq!(t.as_str().parse::<Timestep>().unwrap(), t);
        }
        assert!(matches!("2h".parse::<Timestep>(), Err(Error::InvalidTimestep(_))));
    }

    #[test]
    fn route_paths() {
        assert_eq!(Route::FiveMinute.path(), "5m");
        assert_eq!(Route::Mapping.path(), "mapping");
    }
}
