//! Lazy traversal of paginated list endpoints

use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::awx::client::AwxClient;
use crate::awx::locator::Locator;
use crate::awx::transport::Method;
use crate::config::api;
use crate::error::Result;

/// One raw record as returned by the server
pub type Record = Map<String, Value>;

#[derive(Debug, Deserialize)]
struct RawPage {
    count: u64,
    #[serde(default)]
    next: Option<String>,
    results: Vec<Record>,
}

/// One fetched page of a list endpoint.
///
/// Pages are immutable snapshots: the collection total as the server
/// reported it, the continuation locator if any, and the records in
/// server order.
#[derive(Debug, Clone)]
pub struct Page {
    count: u64,
    next: Option<Locator>,
    results: Vec<Record>,
}

impl Page {
    pub(crate) fn from_value(value: Value) -> Result<Self> {
        let raw: RawPage = serde_json::from_value(value)?;
        Ok(Self {
            count: raw.count,
            next: raw.next.as_deref().map(Locator::parse),
            results: raw.results,
        })
    }

    /// Collection total reported by the server
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Continuation locator, `None` on the last page
    pub fn next(&self) -> Option<&Locator> {
        self.next.as_ref()
    }

    /// Records in server order
    pub fn results(&self) -> &[Record] {
        &self.results
    }

    fn into_parts(self) -> (u64, Option<Locator>, Vec<Record>) {
        (self.count, self.next, self.results)
    }
}

/// Cursor over the raw records of a list endpoint.
///
/// Pages are fetched one at a time, only when the buffered records run
/// out, and continuation always follows the server's `next` value. The
/// cursor never re-fetches: once exhausted it keeps returning `None`,
/// and abandoning it early simply stops the traffic.
pub struct RecordCursor<'a> {
    client: &'a AwxClient,
    next: Option<Locator>,
    buffer: std::vec::IntoIter<Record>,
    total: Option<u64>,
}

impl<'a> RecordCursor<'a> {
    pub(crate) fn new(client: &'a AwxClient, start: Locator, page_size: u32) -> Self {
        let start = start.with_param("page_size", page_size.to_string());
        Self {
            client,
            next: Some(start),
            buffer: Vec::new().into_iter(),
            total: None,
        }
    }

    /// Next record, fetching the next page when the buffer is empty
    pub async fn try_next(&mut self) -> Result<Option<Record>> {
        loop {
            if let Some(record) = self.buffer.next() {
                return Ok(Some(record));
            }
            let locator = match self.next.take() {
                Some(locator) => locator,
                None => return Ok(None),
            };
            debug!("fetching page {}", locator);
            let value = self.client.request_json(Method::Get, &locator, None).await?;
            let (count, next, results) = Page::from_value(value)?.into_parts();
            if self.total.is_none() {
                self.total = Some(count);
            }
            self.next = next;
            self.buffer = results.into_iter();
        }
    }

    /// Collection total from the first fetched page, `None` before any fetch
    pub fn total(&self) -> Option<u64> {
        self.total
    }
}

impl AwxClient {
    /// Raw record cursor over an arbitrary list endpoint.
    ///
    /// The typed managers are built on this. It is exposed for endpoints
    /// the crate does not model.
    pub fn records(&self, start: Locator) -> RecordCursor<'_> {
        RecordCursor::new(self, start, api::DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_page_parses_wire_shape() {
        let page = Page::from_value(json!({
            "count": 3,
            "next": "/api/v2/hosts/?page=2",
            "results": [{"id": 1}, {"id": 2}]
        }))
        .unwrap();
        assert_eq!(page.count(), 3);
        assert_eq!(page.next().unwrap().path(), "/api/v2/hosts/");
        assert_eq!(page.results().len(), 2);
    }

    #[test]
    fn test_page_null_next_means_last() {
        let page = Page::from_value(json!({
            "count": 1,
            "next": null,
            "results": [{"id": 1}]
        }))
        .unwrap();
        assert!(page.next().is_none());
    }

    #[test]
    fn test_page_missing_count_is_rejected() {
        let result = Page::from_value(json!({
            "next": null,
            "results": []
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_page_non_list_body_is_rejected() {
        assert!(Page::from_value(json!({"detail": "Not found."})).is_err());
        assert!(Page::from_value(json!([1, 2, 3])).is_err());
    }
}
