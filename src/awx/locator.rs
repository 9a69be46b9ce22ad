//! Endpoint locators for API requests

use std::fmt;

use crate::config::api;

/// An endpoint path plus query parameters, relative to the API origin.
///
/// Locators are how every request names its target: collection listings,
/// single resources, and the `next` continuation values returned by list
/// endpoints. Query values are percent-encoded when the locator is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    path: String,
    query: Vec<(String, String)>,
}

impl Locator {
    /// Locator for a collection endpoint, e.g. `/api/v2/hosts/`
    pub fn collection(endpoint: &str) -> Self {
        Self {
            path: format!("{}/{}/", api::BASE_PATH, endpoint),
            query: Vec::new(),
        }
    }

    /// Locator for a single resource, e.g. `/api/v2/hosts/42/`
    pub fn resource(endpoint: &str, id: u64) -> Self {
        Self {
            path: format!("{}/{}/{}/", api::BASE_PATH, endpoint, id),
            query: Vec::new(),
        }
    }

    /// Parse a server-supplied locator.
    ///
    /// Accepts both relative values (`/api/v2/hosts/?page=2`) and absolute
    /// URLs; the scheme and authority of an absolute URL are discarded
    /// because the transport supplies its own origin.
    pub fn parse(raw: &str) -> Self {
        let rest = match raw.find("://") {
            Some(idx) => {
                let after = &raw[idx + 3..];
                match after.find('/') {
                    Some(slash) => &after[slash..],
                    None => "/",
                }
            }
            None => raw,
        };
        let (path, query_str) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };
        let mut query = Vec::new();
        if let Some(raw_query) = query_str {
            for pair in raw_query.split('&').filter(|pair| !pair.is_empty()) {
                let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
                query.push((decode(name), decode(value)));
            }
        }
        Self {
            path: path.to_string(),
            query,
        }
    }

    /// Append a query parameter
    pub fn push_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.query.push((name.into(), value.into()));
    }

    /// Builder-style variant of [`push_param`](Self::push_param)
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_param(name, value);
        self
    }

    /// The path component
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query parameters in insertion order
    pub fn params(&self) -> &[(String, String)] {
        &self.query
    }

    /// Render the locator as a path-and-query string with encoded values
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let pairs: Vec<String> = self
            .query
            .iter()
            .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
            .collect();
        format!("{}?{}", self.path, pairs.join("&"))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_and_query())
    }
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}
