//! Shared fixtures for the tickwatch behavior tests.

use std::future::Future;
use std::pin::Pin;

use tickwatch_core::{
    HttpClient, HttpError, HttpRequest, HttpResponse, Listing, ObservationDate, Snapshot, Symbol,
};

pub fn observed(date: &str) -> ObservationDate {
    ObservationDate::parse(date).expect("valid date")
}

pub fn listing(symbol: &str, name: &str, exchange: &str, date: &str) -> Listing {
    Listing::new(
        Symbol::parse(symbol).expect("valid symbol"),
        name,
        exchange,
        observed(date),
    )
    .expect("listing should build")
}

pub fn snapshot_of(rows: &[(&str, &str, &str)], date: &str) -> Snapshot {
    Snapshot::from_listings(rows.iter().map(|(s, n, e)| listing(s, n, e, date)))
}

/// Transport double that serves one canned response per request URL, falling
/// back to a default body.
pub struct StaticHttpClient {
    responses: Vec<(String, HttpResponse)>,
    fallback: Result<HttpResponse, HttpError>,
}

impl StaticHttpClient {
    pub fn serving(body: impl Into<String>) -> Self {
        Self {
            responses: Vec::new(),
            fallback: Ok(HttpResponse::ok_text(body)),
        }
    }

    pub fn failing(error: HttpError) -> Self {
        Self {
            responses: Vec::new(),
            fallback: Err(error),
        }
    }

    pub fn with_response(mut self, url: impl Into<String>, response: HttpResponse) -> Self {
        self.responses.push((url.into(), response));
        self
    }
}

impl HttpClient for StaticHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let matched = self
            .responses
            .iter()
            .find(|(url, _)| *url == request.url)
            .map(|(_, response)| Ok(response.clone()))
            .unwrap_or_else(|| self.fallback.clone());
        Box::pin(async move { matched })
    }
}
