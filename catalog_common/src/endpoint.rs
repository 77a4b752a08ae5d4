//! Declarative description of one catalog API call
//!
//! An [`Endpoint`] is pure data. [`Endpoint::build_request`] turns it into a
//! [`RequestSpec`] deterministically; nothing here touches the network.

use crate::error::{FetchError, Result};
use reqwest::{Method, Url};
use std::collections::BTreeMap;

/// HTTP methods the catalog API is called with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_method(self) -> Method {
        match self {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }
}

/// One logical API call: where it goes and what it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub scheme: String,
    pub host: String,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    /// Sent in the URL for GET, as a JSON object body for POST. Order is kept.
    pub query_params: Vec<(String, String)>,
    /// Typed POST body fields, written after `query_params`. Ignored for GET.
    pub body_params: Vec<(String, serde_json::Value)>,
    pub method: HttpMethod,
}

/// A fully built request, ready to hand to an HTTP client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl Endpoint {
    pub fn new(
        method: HttpMethod,
        scheme: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            path: path.into(),
            headers: BTreeMap::new(),
            query_params: Vec::new(),
            body_params: Vec::new(),
            method,
        }
    }

    pub fn get(scheme: impl Into<String>, host: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, scheme, host, path)
    }

    pub fn post(
        scheme: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self::new(HttpMethod::Post, scheme, host, path)
    }

    /// Add a header, replacing any previous value for the same name
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Append a query parameter after the ones already present
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query_params.push((name.into(), value.to_string()));
        self
    }

    /// Append a typed JSON field to a POST body, e.g. a number or a boolean
    pub fn body(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.body_params.push((name.into(), value.into()));
        self
    }

    /// `scheme://host/path` without any query string
    fn base_url(&self) -> String {
        format!(
            "{}://{}/{}",
            self.scheme,
            self.host,
            self.path.trim_start_matches('/')
        )
    }

    /// Build the request this endpoint describes.
    ///
    /// Query parameters go into the URL only for GET. For POST they are
    /// serialised as string fields of a JSON object body, followed by the
    /// typed `body_params`; a later field with the same name wins. A JSON
    /// content type is added unless the caller already set one.
    pub fn build_request(&self) -> Result<RequestSpec> {
        let raw = self.base_url();
        let invalid = |reason: String| FetchError::UrlConstruction {
            url: raw.clone(),
            reason,
        };

        let scheme_ok = self
            .scheme
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && self
                .scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !scheme_ok {
            return Err(invalid(format!("bad scheme '{}'", self.scheme)));
        }
        if self.host.is_empty() {
            return Err(invalid("empty host".to_string()));
        }
        if self
            .host
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '@'))
        {
            return Err(invalid(format!("bad host '{}'", self.host)));
        }
        if self.path.contains(['?', '#']) {
            return Err(invalid("path must not carry a query or fragment".to_string()));
        }

        let mut url = Url::parse(&raw).map_err(|e| invalid(e.to_string()))?;
        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(invalid("URL has no host".to_string()));
        }

        let mut headers: Vec<(String, String)> = self
            .headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let body = match self.method {
            HttpMethod::Get => {
                if !self.query_params.is_empty() {
                    let mut pairs = url.query_pairs_mut();
                    for (name, value) in &self.query_params {
                        pairs.append_pair(name, value);
                    }
                }
                None
            }
            HttpMethod::Post => {
                let mut object = serde_json::Map::new();
                for (name, value) in &self.query_params {
                    object.insert(name.clone(), serde_json::Value::String(value.clone()));
                }
                for (name, value) in &self.body_params {
                    object.insert(name.clone(), value.clone());
                }
                let has_content_type = headers
                    .iter()
                    .any(|(k, _)| k.eq_ignore_ascii_case("content-type"));
                if !has_content_type {
                    headers.push(("Content-Type".to_string(), "application/json".to_string()));
                }
                Some(serde_json::Value::Object(object).to_string().into_bytes())
            }
        };

        log::debug!("Built {:?} request for {}", self.method, url);

        Ok(RequestSpec {
            method: self.method,
            url,
            headers,
            body,
        })
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;
