use std::{thread, time::Duration};

use schema::PriceRecord;
use tracing::warn;

use crate::mock::mock_prices;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Short pause before serving fallback data so a flapping server is not
/// hammered on every invocation.
const MOCK_FALLBACK_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    Remote,
    Mock,
}

/// Outcome of a price load: the records to render plus where they came
/// from. Loading never fails; the mock dataset is the floor.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLoad {
    pub source: PriceSource,
    pub prices: Vec<PriceRecord>,
}

pub fn api_base_url() -> String {
    std::env::var("AGRIMATE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Fetch prices for the selection, falling back to the embedded dataset on
/// any transport, status, or decode failure. `offline` skips the network
/// attempt (and the fallback delay) entirely.
pub fn load_prices(api_url: &str, state: &str, district: &str, offline: bool) -> PriceLoad {
    if !offline {
        match fetch_remote(api_url, state, district) {
            Ok(prices) => {
                return PriceLoad {
                    source: PriceSource::Remote,
                    prices,
                };
            }
            Err(err) => {
                warn!(error = %err, "server unavailable, using mock data");
                thread::sleep(MOCK_FALLBACK_DELAY);
            }
        }
    }
    PriceLoad {
        source: PriceSource::Mock,
        prices: mock_prices(state, district),
    }
}

fn fetch_remote(api_url: &str, state: &str, district: &str) -> Result<Vec<PriceRecord>, String> {
    let url = format!("{api_url}/prices");
    let response = ureq::get(&url)
        .query("state", state)
        .query("district", district)
        .call()
        .map_err(|err| err.to_string())?;
    response
        .into_json::<Vec<PriceRecord>>()
        .map_err(|err| format!("invalid price payload: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_load_serves_mock_data_for_the_selection() {
        let load = load_prices(DEFAULT_API_URL, "tamil-nadu", "Chennai", true);
        assert_eq!(load.source, PriceSource::Mock);
        assert_eq!(load.prices.len(), 4);
    }

    #[test]
    fn unreachable_server_falls_back_without_failing() {
        // Port 1 refuses connections immediately.
        let load = load_prices("http://127.0.0.1:1/api", "kerala", "", false);
        assert_eq!(load.source, PriceSource::Mock);
        // Unknown state lands on the default pair, so rendering still has
        // records to work with.
        assert_eq!(load.prices.len(), 4);
    }
}
