//! Daily prayer times from the AlAdhan API.
//!
//! Used to anchor tasks such as the dawn prayer to real clock times. The
//! recommendation core never calls this.

use chrono::{NaiveDate, NaiveTime};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{CoreError, Result};
use crate::storage::LocationConfig;
use crate::task::PrayerAnchor;

pub const DEFAULT_BASE_URL: &str = "https://api.aladhan.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerTimings {
    pub date: NaiveDate,
    pub fajr: NaiveTime,
    pub sunrise: NaiveTime,
    pub dhuhr: NaiveTime,
    pub asr: NaiveTime,
    pub maghrib: NaiveTime,
    pub isha: NaiveTime,
}

impl PrayerTimings {
    pub fn timing_for(&self, anchor: PrayerAnchor) -> NaiveTime {
        match anchor {
            PrayerAnchor::Fajr => self.fajr,
            PrayerAnchor::Dhuhr => self.dhuhr,
            PrayerAnchor::Asr => self.asr,
            PrayerAnchor::Maghrib => self.maghrib,
            PrayerAnchor::Isha => self.isha,
        }
    }
}

#[derive(Deserialize)]
struct TimingsEnvelope {
    data: TimingsData,
}

#[derive(Deserialize)]
struct TimingsData {
    timings: RawTimings,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawTimings {
    fajr: String,
    sunrise: String,
    dhuhr: String,
    asr: String,
    maghrib: String,
    isha: String,
}

fn integration_error(message: impl Into<String>) -> CoreError {
    CoreError::Integration {
        service: "aladhan".into(),
        message: message.into(),
        source: None,
    }
}

/// Parse `"05:12"` or `"05:12 (CET)"`.
fn parse_clock(name: &str, raw: &str) -> Result<NaiveTime> {
    let clock = raw.split_whitespace().next().unwrap_or_default();
    NaiveTime::parse_from_str(clock, "%H:%M")
        .map_err(|e| integration_error(format!("bad {name} time '{raw}': {e}")))
}

pub struct PrayerTimesClient {
    client: Client,
    base_url: Url,
    location: LocationConfig,
}

impl PrayerTimesClient {
    pub fn new(location: LocationConfig) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, location)
    }

    /// Point the client at another host (tests, mirrors).
    pub fn with_base_url(base_url: &str, location: LocationConfig) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| integration_error(format!("invalid base url '{base_url}': {e}")))?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url,
            location,
        })
    }

    fn timings_url(&self, date: NaiveDate) -> Result<Url> {
        let mut url = self
            .base_url
            .join(&format!("v1/timings/{}", date.format("%d-%m-%Y")))
            .map_err(|e| integration_error(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("latitude", &self.location.latitude.to_string())
            .append_pair("longitude", &self.location.longitude.to_string())
            .append_pair("method", &self.location.prayer_method.to_string())
            .append_pair("timezonestring", &self.location.timezone);
        Ok(url)
    }

    /// Fetch the timings for `date` at the configured location.
    ///
    /// # Errors
    /// Returns [`CoreError::Integration`] on transport failure, a non-success
    /// status, or an unparsable body.
    pub async fn fetch(&self, date: NaiveDate) -> Result<PrayerTimings> {
        let url = self.timings_url(date)?;
        debug!(%url, "fetching prayer times");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(integration_error(format!("HTTP {status}: {text}")));
        }

        let envelope: TimingsEnvelope = resp.json().await?;
        let raw = envelope.data.timings;
        Ok(PrayerTimings {
            date,
            fajr: parse_clock("Fajr", &raw.fajr)?,
            sunrise: parse_clock("Sunrise", &raw.sunrise)?,
            dhuhr: parse_clock("Dhuhr", &raw.dhuhr)?,
            asr: parse_clock("Asr", &raw.asr)?,
            maghrib: parse_clock("Maghrib", &raw.maghrib)?,
            isha: parse_clock("Isha", &raw.isha)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clock_with_zone_suffix() {
        assert_eq!(
            parse_clock("Fajr", "05:12 (CET)").unwrap(),
            NaiveTime::from_hms_opt(5, 12, 0).unwrap()
        );
        assert!(parse_clock("Fajr", "late").is_err());
    }

    #[test]
    fn builds_timings_url() {
        let client =
            PrayerTimesClient::with_base_url("http://localhost:1234", LocationConfig::default())
                .unwrap();
        let url = client
            .timings_url(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap())
            .unwrap();
        assert_eq!(url.path(), "/v1/timings/07-03-2025");
        let query = url.query().unwrap();
        assert!(query.contains("latitude=40.4168"));
        assert!(query.contains("method=3"));
        assert!(query.contains("timezonestring=Europe%2FMadrid"));
    }
}
