//! Usage statistics

use super::{ClientError, ConsoleClient};
use crate::types::ApiStats;
use chrono::NaiveDate;
use reqwest::Method;

impl ConsoleClient {
    /// Per-endpoint counters for `date`, or for the backend's current day when `None`
    pub async fn stats(&self, date: Option<NaiveDate>) -> Result<Vec<ApiStats>, ClientError> {
        let mut request = self.request(Method::GET, "/stats");
        if let Some(date) = date {
            request = request.query(&[("date", date.format("%Y-%m-%d").to_string())]);
        }
        self.execute(request).await
    }
}
