// Paginated fraud case fetching from the source API

use crate::error::FetchError;
use crate::http_client::{ApiRequest, HttpClient, API_KEY_HEADER};
use crate::models::{FraudCasePage, SyncCredential};
use crate::{CLASSIFICATION, PAGE_SIZE};
use reqwest::Method;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FraudCaseFetcher {
    http: HttpClient,
    base_url: String,
}

impl FraudCaseFetcher {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Fetch a single page for a credential
    pub async fn fetch_page(
        &self,
        credential: &SyncCredential,
        page: u32,
    ) -> Result<FraudCasePage, FetchError> {
        let request = ApiRequest::new(Method::GET, &self.base_url)
            .header(API_KEY_HEADER, credential.as_str())
            .query("classification", CLASSIFICATION)
            .query("pageSize", PAGE_SIZE)
            .query("page", page);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|source| FetchError::Request { page, source })?;

        if !response.status.is_success() {
            return Err(FetchError::Status {
                page,
                status: response.status,
            });
        }

        let fraud_cases: FraudCasePage = response
            .json()
            .map_err(|source| FetchError::Request { page, source })?;

        debug!(
            page,
            number_of_pages = fraud_cases.number_of_pages,
            cases = fraud_cases.fraud_cases.len(),
            "Fetched fraud cases page"
        );

        Ok(fraud_cases)
    }

    /// Fetch page 0 and return it with a cursor over the remaining pages
    /// `1..numberOfPages`. Page 0 is fetched even when it reports zero pages.
    pub async fn first_page<'a>(
        &'a self,
        credential: &'a SyncCredential,
    ) -> Result<(FraudCasePage, Pagination<'a>), FetchError> {
        let first = self.fetch_page(credential, 0).await?;
        let rest = Pagination {
            fetcher: self,
            credential,
            next: 1,
            total: first.number_of_pages,
            done: false,
        };
        Ok((first, rest))
    }
}

/// Cursor over pages `1..total`, where `total` came from page 0
pub struct Pagination<'a> {
    fetcher: &'a FraudCaseFetcher,
    credential: &'a SyncCredential,
    next: u32,
    total: u32,
    done: bool,
}

impl Pagination<'_> {
    /// Fetch the next page. Yields `None` once every page was returned or
    /// after the first error.
    pub async fn next_page(&mut self) -> Option<Result<(u32, FraudCasePage), FetchError>> {
        if self.done || self.next >= self.total {
            return None;
        }

        let page = self.next;
        match self.fetcher.fetch_page(self.credential, page).await {
            Ok(fraud_cases) => {
                self.next += 1;
                Some(Ok((page, fraud_cases)))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    /// Page count reported by page 0
    pub fn total(&self) -> u32 {
        self.total
    }
}
