//! Current-conditions lookup against WeatherAPI.
//!
//! One request per invocation, no retries, no caching. Provider errors
//! arrive as a JSON `error` payload regardless of status code, so the
//! body is parsed before anything else is decided.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::LookupError;
use crate::router::WeatherLookup;

/// Per-call timeout so a dead provider cannot stall the turn.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct WeatherPayload {
    error: Option<ProviderErrorBody>,
    current: Option<CurrentConditions>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// The subset of WeatherAPI's `current` object we render.
#[derive(Debug, Deserialize)]
pub struct CurrentConditions {
    pub condition: Condition,
    pub temp_c: f64,
    pub temp_f: f64,
    pub humidity: i64,
    pub wind_kph: f64,
    pub wind_mph: f64,
    pub uv: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Condition {
    pub text: String,
}

/// WeatherAPI client.
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Fetch current conditions for a location.
    async fn current(&self, location: &str) -> Result<CurrentConditions, LookupError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", location),
                ("aqi", "no"),
            ])
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        // WeatherAPI reports domain errors in the body, not the status.
        let payload: WeatherPayload = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))?;

        if let Some(err) = payload.error {
            return Err(LookupError::Provider(err.message));
        }
        payload
            .current
            .ok_or_else(|| LookupError::Shape("missing current conditions".to_string()))
    }
}

#[async_trait]
impl WeatherLookup for WeatherClient {
    async fn fetch(&self, location: &str) -> String {
        match self.current(location).await {
            Ok(current) => render_report(location, &current),
            Err(e) => {
                tracing::warn!(location = %location, error = %e, "Weather lookup failed");
                failure_text(&e)
            }
        }
    }
}

/// Render the multi-line weather summary.
pub fn render_report(location: &str, current: &CurrentConditions) -> String {
    let uv = current
        .uv
        .map(|v| v.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    format!(
        "🌤️ Weather in {}:\n\n\
         ☁️ Condition: {}\n\
         \n🌡️ Temperature: {}°C ({}°F)\n\
         \n💧 Humidity: {}%\n\
         \n🌬️ Wind: {} km/h ({} mph)\n\
         \n🌞 UV Index: {}",
        location,
        current.condition.text,
        current.temp_c,
        current.temp_f,
        current.humidity,
        current.wind_kph,
        current.wind_mph,
        uv,
    )
}

/// Map a lookup failure onto the user-facing message.
pub fn failure_text(err: &LookupError) -> String {
    match err {
        LookupError::Provider(message) => format!("Could not get weather: {}", message),
        other => format!("Error getting weather: {}", other),
    }
}
