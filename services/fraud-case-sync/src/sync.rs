// Fetch -> transform -> upsert for every page, then delete stale records

use crate::config::Config;
use crate::error::{FatalSyncError, HttpError, Result, SyncError};
use crate::fetcher::FraudCaseFetcher;
use crate::http_client::{ApiRequest, HttpClient, API_KEY_HEADER};
use crate::models::{
    DestinationRecord, FraudCasePage, SyncCredential, SyncReport, UpsertResponse,
};
use crate::transformer::{transform, TransformOptions};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Method, StatusCode};
use tracing::{debug, info};

/// Running minimum of the `updatedAt` values seen in one run,
/// seeded with page 0's timestamp
#[derive(Debug, Clone, Copy)]
pub struct CutoffTracker {
    oldest: DateTime<Utc>,
}

impl CutoffTracker {
    pub fn new(first: DateTime<Utc>) -> Self {
        Self { oldest: first }
    }

    pub fn observe(&mut self, updated_at: DateTime<Utc>) {
        if updated_at < self.oldest {
            self.oldest = updated_at;
        }
    }

    pub fn oldest(&self) -> DateTime<Utc> {
        self.oldest
    }
}

/// Delete boundary as sent in the `latest` query parameter
pub fn format_cutoff(cutoff: DateTime<Utc>) -> String {
    cutoff.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Clone)]
pub struct FraudCaseSync {
    fetcher: FraudCaseFetcher,
    http: HttpClient,
    destination_url: String,
    destination_api_key: String,
    transform: TransformOptions,
}

impl FraudCaseSync {
    pub fn new(config: &Config) -> std::result::Result<Self, HttpError> {
        Ok(Self::with_http(HttpClient::new()?, config))
    }

    pub fn with_http(http: HttpClient, config: &Config) -> Self {
        Self {
            fetcher: FraudCaseFetcher::new(http.clone(), config.source_api_url.clone()),
            http,
            destination_url: config.destination_api_url.clone(),
            destination_api_key: config.destination_api_key.clone(),
            transform: config.transform,
        }
    }

    /// Sync every page visible to `credential`, then delete destination
    /// records older than the oldest upsert timestamp of this run.
    ///
    /// Any failure before the delete leaves the destination without the
    /// stale-record cleanup for this run.
    pub async fn process_credential(&self, credential: &SyncCredential) -> Result<SyncReport> {
        let (first, mut pages) = self.fetcher.first_page(credential).await?;
        let (updated_at, mut record_count) = self.sync_page(0, &first).await?;
        let mut cutoff = CutoffTracker::new(updated_at);
        let mut page_count = 1;

        while let Some(next) = pages.next_page().await {
            let (page, fraud_cases) = next?;
            let (updated_at, records) = self.sync_page(page, &fraud_cases).await?;
            cutoff.observe(updated_at);
            page_count += 1;
            record_count += records;
        }

        let cutoff = cutoff.oldest();
        self.delete_older_than(cutoff).await?;

        let report = SyncReport {
            pages: page_count,
            records: record_count,
            cutoff,
        };
        info!(
            pages = report.pages,
            records = report.records,
            cutoff = %format_cutoff(report.cutoff),
            "Fraud case sync completed"
        );
        Ok(report)
    }

    /// Transform and upsert one page; returns its `updatedAt` and record count
    async fn sync_page(
        &self,
        page: u32,
        fraud_cases: &FraudCasePage,
    ) -> Result<(DateTime<Utc>, usize)> {
        let records = transform(&fraud_cases.fraud_cases, &self.transform);
        let updated_at = self.upsert(&records).await?;
        debug!(page, records = records.len(), %updated_at, "Upserted fraud cases page");
        Ok((updated_at, records.len()))
    }

    /// PUT a batch of records; returns the destination's `updatedAt`
    async fn upsert(&self, records: &[DestinationRecord]) -> Result<DateTime<Utc>> {
        let request = ApiRequest::new(Method::PUT, &self.destination_url)
            .header(API_KEY_HEADER, &self.destination_api_key)
            .json(records)?;

        let response = self.http.execute(request).await.map_err(SyncError::Upsert)?;
        debug!("Response: {}", response.text());

        if response.status != StatusCode::OK {
            return Err(FatalSyncError::UnexpectedUpsertStatus(response.status).into());
        }

        let parsed: UpsertResponse = response.json().map_err(SyncError::Upsert)?;
        Ok(parsed.updated_at)
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<()> {
        let request = ApiRequest::new(Method::DELETE, &self.destination_url)
            .header(API_KEY_HEADER, &self.destination_api_key)
            .query("latest", format_cutoff(cutoff));

        let response = self.http.execute(request).await.map_err(SyncError::Delete)?;
        if !response.body.is_empty() {
            debug!("Response: {}", response.text());
        }

        if response.status != StatusCode::NO_CONTENT {
            return Err(FatalSyncError::UnexpectedDeleteStatus(response.status).into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_cutoff_is_minimum() {
        let mut tracker = CutoffTracker::new(ts(12));
        assert_eq!(tracker.oldest(), ts(12));

        tracker.observe(ts(10));
        tracker.observe(ts(14));
        assert_eq!(tracker.oldest(), ts(10));
    }

    #[test]
    fn test_cutoff_ignores_equal_and_later() {
        let mut tracker = CutoffTracker::new(ts(9));
        tracker.observe(ts(9));
        tracker.observe(ts(23));
        assert_eq!(tracker.oldest(), ts(9));
    }

    #[test]
    fn test_format_cutoff_rfc3339_seconds() {
        let with_nanos = ts(8) + chrono::Duration::milliseconds(250);
        assert_eq!(format_cutoff(with_nanos), "2024-05-01T08:00:00Z");
    }
}
