use std::time::Duration;

use apipoll_common::{JsonClient, PollError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::summary::CountryCounts;

pub const HOLIDAYS_URL: &str = "https://date.nager.at";

const UNKNOWN: &str = "Unknown";

/// One element of the PublicHolidays response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Holiday {
    pub date: Option<String>,
    pub local_name: Option<String>,
    pub name: Option<String>,
    pub country_code: Option<String>,
    pub fixed: Option<bool>,
    pub global: Option<bool>,
    pub counties: Option<Vec<String>>,
    pub launch_year: Option<i32>,
    pub types: Option<Vec<String>>,
}

impl Holiday {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn display_date(&self) -> &str {
        self.date.as_deref().unwrap_or(UNKNOWN)
    }
}

pub struct HolidaysClient {
    client: JsonClient,
}

impl HolidaysClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PollError> {
        Ok(Self {
            client: JsonClient::with_timeout(base_url, timeout)?,
        })
    }

    /// Public holidays for one country and year; `None` on any failure.
    pub async fn fetch_holidays(&self, country: &str, year: i32) -> Option<Vec<Holiday>> {
        info!("Fetching holidays for {} in {}", country, year);

        let path = format!("/api/v3/PublicHolidays/{}/{}", year, country);
        match self.client.get_json::<Vec<Holiday>>(&path, &[]).await {
            Ok(holidays) => {
                info!(
                    "Successfully retrieved {} holidays for {}",
                    holidays.len(),
                    country
                );
                Some(holidays)
            }
            Err(e) => {
                match &e {
                    PollError::Timeout { .. } => error!("Request timeout for {}", country),
                    PollError::Connection(_) => error!("Connection error for {}", country),
                    PollError::Status { .. } => error!("HTTP error for {}: {}", country, e),
                    _ => error!("Request failed for {}: {}", country, e),
                }
                None
            }
        }
    }
}

/// Fetch and print each country's holidays, recording its count.
///
/// A failed request or an empty list records 0 for that country.
pub async fn collect_counts(
    client: &HolidaysClient,
    countries: &[String],
    year: i32,
) -> CountryCounts {
    let mut counts = CountryCounts::new();

    for country in countries.iter().map(|c| c.trim()).filter(|c| !c.is_empty()) {
        match client.fetch_holidays(country, year).await {
            Some(holidays) if !holidays.is_empty() => {
                counts.insert(country.to_string(), Value::from(holidays.len()));
                print_holiday_details(&holidays, country);
            }
            _ => {
                counts.insert(country.to_string(), Value::from(0));
                println!("Failed to get holidays for {}", country);
            }
        }
    }

    counts
}

/// `date: name` lines for display.
pub fn holiday_lines(holidays: &[Holiday]) -> Vec<String> {
    holidays
        .iter()
        .map(|h| format!("{}: {}", h.display_date(), h.display_name()))
        .collect()
}

pub fn print_holiday_details(holidays: &[Holiday], country: &str) {
    if holidays.is_empty() {
        warn!("No holidays to display for {}", country);
        return;
    }

    println!("\n - Holidays for {} -", country);
    for line in holiday_lines(holidays) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, HolidaysClient) {
        let server = MockServer::start().await;
        let client = HolidaysClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
        (server, client)
    }

    #[tokio::test]
    async fn test_fetch_holidays_success() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/PublicHolidays/2024/CA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "date": "2024-01-01",
                    "localName": "New Year's Day",
                    "name": "New Year's Day",
                    "countryCode": "CA",
                    "fixed": false,
                    "global": true,
                    "counties": null,
                    "launchYear": null,
                    "types": ["Public"]
                },
                {
                    "date": "2024-07-01",
                    "localName": "Canada Day",
                    "name": "Canada Day",
                    "countryCode": "CA"
                }
            ])))
            .mount(&server)
            .await;

        let holidays = client.fetch_holidays("CA", 2024).await.unwrap();
        assert_eq!(holidays.len(), 2);
        assert_eq!(holidays[0].local_name.as_deref(), Some("New Year's Day"));
        assert_eq!(holidays[0].types, Some(vec!["Public".to_string()]));
        assert_eq!(holidays[1].display_name(), "Canada Day");
        assert_eq!(holidays[1].global, None);
    }

    #[tokio::test]
    async fn test_fetch_holidays_http_error() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/PublicHolidays/2024/XX"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(client.fetch_holidays("XX", 2024).await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_holidays_bad_body() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/PublicHolidays/2024/US"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": "nope"})))
            .mount(&server)
            .await;

        assert!(client.fetch_holidays("US", 2024).await.is_none());
    }

    #[tokio::test]
    async fn test_collect_counts_records_zero_for_empty_and_failed() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/PublicHolidays/2024/US"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v3/PublicHolidays/2024/CA"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v3/PublicHolidays/2024/GB"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"date": "2024-01-01", "name": "New Year's Day", "countryCode": "GB"},
                {"date": "2024-12-25", "name": "Christmas Day", "countryCode": "GB"}
            ])))
            .mount(&server)
            .await;

        let countries = vec!["US".to_string(), "CA".to_string(), " GB ".to_string()];
        let counts = collect_counts(&client, &countries, 2024).await;

        assert_eq!(
            serde_json::to_string(&counts).unwrap(),
            r#"{"US":0,"CA":0,"GB":2}"#
        );
    }

    #[test]
    fn test_holiday_lines_default_missing_fields() {
        let holidays = vec![
            Holiday {
                date: Some("2024-12-25".to_string()),
                name: Some("Christmas Day".to_string()),
                ..Holiday::default()
            },
            Holiday::default(),
        ];
        assert_eq!(
            holiday_lines(&holidays),
            vec![
                "2024-12-25: Christmas Day".to_string(),
                "Unknown: Unknown".to_string()
            ]
        );
    }
}
