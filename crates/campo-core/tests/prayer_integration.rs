//! Integration tests for the prayer-times client against a mock server.

use campo_core::storage::LocationConfig;
use campo_core::{CoreError, PrayerAnchor, PrayerTimesClient};
use chrono::{NaiveDate, NaiveTime};
use mockito::Matcher;

const BODY: &str = r#"{
  "code": 200,
  "status": "OK",
  "data": {
    "timings": {
      "Fajr": "06:41",
      "Sunrise": "08:07",
      "Dhuhr": "14:21",
      "Asr": "17:18",
      "Sunset": "20:35",
      "Maghrib": "20:35",
      "Isha": "21:55 (CEST)",
      "Imsak": "06:31",
      "Midnight": "02:21"
    }
  }
}"#;

#[tokio::test]
async fn fetches_and_parses_timings() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/timings/21-03-2025")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("latitude".into(), "40.4168".into()),
            Matcher::UrlEncoded("longitude".into(), "-3.7038".into()),
            Matcher::UrlEncoded("method".into(), "3".into()),
            Matcher::UrlEncoded("timezonestring".into(), "Europe/Madrid".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(BODY)
        .create_async()
        .await;

    let client = PrayerTimesClient::with_base_url(&server.url(), LocationConfig::default()).unwrap();
    let timings = client
        .fetch(NaiveDate::from_ymd_opt(2025, 3, 21).unwrap())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(timings.fajr, NaiveTime::from_hms_opt(6, 41, 0).unwrap());
    assert_eq!(
        timings.timing_for(PrayerAnchor::Isha),
        NaiveTime::from_hms_opt(21, 55, 0).unwrap()
    );
}

#[tokio::test]
async fn server_error_is_integration_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Regex(r"^/v1/timings/.*$".into()))
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let client = PrayerTimesClient::with_base_url(&server.url(), LocationConfig::default()).unwrap();
    let err = client
        .fetch(NaiveDate::from_ymd_opt(2025, 3, 21).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Integration { ref service, .. } if service == "aladhan"));
    assert!(err.to_string().contains("HTTP 500"));
}
