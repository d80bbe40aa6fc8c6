//! Outbound fetch descriptors.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::header::HeaderName;
use http::{HeaderMap, Method, Request};

use crate::discovery::ServiceDiscovery;
use crate::handler::{ErrHandlerRef, ResponseProcessor};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Lower values are scheduled first.
pub const DEFAULT_PRIORITY: i32 = 0;

/// Request headers carried over by [`FetchDefinition::from_request`], besides
/// every `x-*` header.
const FORWARDED_HEADERS: &[&str] = &[
    "authorization",
    "cache-control",
    "content-disposition",
    "content-type",
    "cookie",
    "if-match",
    "if-modified-since",
    "if-none-match",
    "if-range",
    "if-unmodified-since",
    "pragma",
    "referer",
    "x-correlation-id",
];

fn is_forwarded(name: &HeaderName) -> bool {
    let name = name.as_str();
    name.starts_with("x-") || FORWARDED_HEADERS.contains(&name)
}

/// One dependency the orchestrator has to retrieve.
///
/// Built once, either by the parser from `uic-fetch`/`uic-include` or from an
/// inbound request, and never changed afterwards.
#[derive(Clone)]
pub struct FetchDefinition {
    pub url: String,
    /// Matches a fetched result back to its consumer.
    pub name: String,
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    pub timeout: Duration,
    /// A failed required fetch aborts the page; an optional one falls back.
    pub required: bool,
    pub priority: i32,
    pub err_handler: ErrHandlerRef,
    pub response_processor: Option<Arc<dyn ResponseProcessor>>,
    pub service_discovery: Option<ServiceDiscovery>,
}

impl FetchDefinition {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            name: url.clone(),
            url,
            method: Method::GET,
            headers: HeaderMap::new(),
            body: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            required: false,
            priority: DEFAULT_PRIORITY,
            err_handler: ErrHandlerRef::Default,
            response_processor: None,
            service_discovery: None,
        }
    }

    /// Proxy `request` to the configured base URL.
    ///
    /// Copies method, body and the forwarded headers, appends path and query
    /// to the base URL, and makes the fetch required with the default timeout.
    /// Priority, processor and handler are left as configured.
    pub fn from_request<B: AsRef<[u8]>>(mut self, request: &Request<B>) -> Self {
        let uri = request.uri();
        let mut url = self.url.trim_end_matches('/').to_string();
        url.push_str(uri.path());
        if let Some(query) = uri.query() {
            url.push('?');
            url.push_str(query);
        }
        log::trace!(target: "uic.fetch", "proxying {} {} to {url}", request.method(), uri);

        self.url = url;
        self.method = request.method().clone();
        self.body = request.body().as_ref().to_vec();
        self.headers = HeaderMap::new();
        for (name, value) in request.headers() {
            if is_forwarded(name) {
                self.headers.append(name.clone(), value.clone());
            }
        }
        self.timeout = DEFAULT_TIMEOUT;
        self.required = true;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_response_processor(mut self, processor: Arc<dyn ResponseProcessor>) -> Self {
        self.response_processor = Some(processor);
        self
    }

    pub fn with_err_handler(mut self, handler: ErrHandlerRef) -> Self {
        self.err_handler = handler;
        self
    }

    pub fn with_service_discovery(mut self, discovery: ServiceDiscovery) -> Self {
        self.service_discovery = Some(discovery);
        self
    }

    pub fn service_discovery_active(&self) -> bool {
        self.service_discovery.is_some()
    }
}

impl PartialEq for FetchDefinition {
    fn eq(&self, other: &Self) -> bool {
        let same_processor = match (&self.response_processor, &other.response_processor) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        self.url == other.url
            && self.name == other.name
            && self.method == other.method
            && self.headers == other.headers
            && self.body == other.body
            && self.timeout == other.timeout
            && self.required == other.required
            && self.priority == other.priority
            && self.err_handler == other.err_handler
            && same_processor
            && self.service_discovery == other.service_discovery
    }
}

impl fmt::Debug for FetchDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchDefinition")
            .field("url", &self.url)
            .field("name", &self.name)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .field("timeout", &self.timeout)
            .field("required", &self.required)
            .field("priority", &self.priority)
            .field("err_handler", &self.err_handler)
            .field("response_processor", &self.response_processor.is_some())
            .field("service_discovery", &self.service_discovery)
            .finish()
    }
}
