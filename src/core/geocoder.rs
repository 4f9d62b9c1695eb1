//! Address geocoding
//!
//! [`Geocoder`] is the seam the planner resolves addresses through.
//! [`NominatimGeocoder`] implements it against an OpenStreetMap Nominatim
//! server, pacing its requests with a [`Throttle`] and retrying transient
//! network failures. Every failure ends up as [`GeocodeOutcome::Unresolved`];
//! nothing is raised to the caller.

use std::future::Future;
use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::core::error::{Error, Result};

/// Result of resolving one address
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    /// The service found the address
    Resolved { label: String, lat: f64, lon: f64 },

    /// No usable result; `reason` is for display only
    Unresolved { reason: String },
}

impl GeocodeOutcome {
    pub fn unresolved(reason: impl Into<String>) -> Self {
        Self::Unresolved {
            reason: reason.into(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    /// Raw (latitude, longitude) as handed to the point constructor
    pub fn coordinates(&self) -> (Option<f64>, Option<f64>) {
        match self {
            Self::Resolved { lat, lon, .. } => (Some(*lat), Some(*lon)),
            Self::Unresolved { .. } => (None, None),
        }
    }
}

/// Something that can turn an address into coordinates
pub trait Geocoder {
    fn resolve(&self, address: &str) -> impl Future<Output = GeocodeOutcome>;
}

/// Configuration for the Nominatim client
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// Nominatim server root
    pub base_url: String,

    /// User-Agent sent with every request (required by the public server)
    pub user_agent: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// Minimum time between the starts of two requests
    pub min_interval: Duration,

    /// Retries after a connect or timeout failure
    pub max_retries: u32,

    /// First retry delay, doubled on every further attempt
    pub retry_delay: Duration,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: format!("butterfly-visit/{}", env!("BUTTERFLY_VERSION")),
            timeout: Duration::from_secs(5),
            min_interval: Duration::from_secs(2),
            max_retries: 3,
            retry_delay: Duration::from_millis(1000),
        }
    }
}

/// Minimum-interval pacing between calls
pub struct Throttle {
    min_interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: Mutex::new(None),
        }
    }

    /// Wait until `min_interval` has passed since the previous call started
    pub async fn wait(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        let mut last = self.last.lock().await;
        if let Some(previous) = *last {
            tokio::time::sleep_until(previous + self.min_interval).await;
        }
        *last = Some(Instant::now());
    }
}

/// Execute an operation with retry logic for network errors
async fn retry_on_network_error<F, Fut, T>(
    max_retries: u32,
    base_delay: Duration,
    operation: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(Error::NetworkError(msg)) if attempt < max_retries => {
                attempt += 1;
                let delay = backoff_delay(base_delay, attempt);
                warn!("⚠️  Network error (attempt {attempt}): {msg}. Retrying in {delay:?}...");
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// `base_delay` doubled for every retry after the first, saturating
fn backoff_delay(base_delay: Duration, attempt: u32) -> Duration {
    base_delay.saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
}

/// One entry of a Nominatim `jsonv2` search response
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
}

/// Geocoder backed by a Nominatim search endpoint
pub struct NominatimGeocoder {
    client: Client,
    config: GeocoderConfig,
    throttle: Throttle,
}

impl NominatimGeocoder {
    pub fn new(config: GeocoderConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            throttle: Throttle::new(config.min_interval),
            config,
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url.trim_end_matches('/'))
    }

    /// Query the server; `Ok(None)` means the address is unknown to it
    async fn lookup(&self, address: &str) -> Result<Option<GeocodeOutcome>> {
        let client = &self.client;
        let throttle = &self.throttle;
        let url = self.search_url();
        let url = url.as_str();

        let places: Vec<NominatimPlace> = retry_on_network_error(
            self.config.max_retries,
            self.config.retry_delay,
            || async move {
                throttle.wait().await;
                let response = client
                    .get(url)
                    .query(&[("q", address), ("format", "jsonv2"), ("limit", "1")])
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    return Err(Error::HttpError(format!("Geocoder returned {status}")));
                }
                Ok(response.json::<Vec<NominatimPlace>>().await?)
            },
        )
        .await?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        let lat = parse_degrees(&place.lat)?;
        let lon = parse_degrees(&place.lon)?;
        Ok(Some(GeocodeOutcome::Resolved {
            label: place.display_name,
            lat,
            lon,
        }))
    }
}

fn parse_degrees(value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| Error::InvalidInput(format!("Bad coordinate '{value}' from geocoder: {e}")))
}

impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, address: &str) -> GeocodeOutcome {
        let address = address.trim();
        if address.is_empty() {
            return GeocodeOutcome::unresolved("invalid address");
        }

        match self.lookup(address).await {
            Ok(Some(outcome)) => {
                debug!("Geocoded '{address}': {outcome:?}");
                outcome
            }
            Ok(None) => {
                debug!("No geocoding result for '{address}'");
                GeocodeOutcome::unresolved("address not found")
            }
            Err(e) => {
                warn!("Geocoding '{address}' failed: {e}");
                GeocodeOutcome::unresolved(format!("error: {e}"))
            }
        }
    }
}
