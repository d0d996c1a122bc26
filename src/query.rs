//! Request descriptors for the directory service.
//!
//! Everything here is a pure function of the filter criteria and page
//! number: building a descriptor never touches the network. The HTTP client
//! renders a descriptor into a URL with [`RequestDescriptor::to_url`].
//!
//! The free-text search endpoint only understands the `by_type` and
//! `by_state` facets. When search text is present, city, country and sort
//! are therefore dropped from the request. The metadata endpoint has the
//! same restriction.

use crate::model::FilterCriteria;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt;

/// Characters left as-is in query values and path segments (RFC 3986
/// unreserved set).
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub const DEFAULT_PER_PAGE: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Faceted listing: `/breweries`
    Browse,
    /// Free-text search: `/breweries/search`
    Search,
    /// Count metadata: `/breweries/meta`
    Meta,
    /// One random record: `/breweries/random`
    Random,
    /// Single record by id: `/breweries/{id}`
    Detail(String),
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Browse => "breweries".to_string(),
            Endpoint::Search => "breweries/search".to_string(),
            Endpoint::Meta => "breweries/meta".to_string(),
            Endpoint::Random => "breweries/random".to_string(),
            Endpoint::Detail(id) => format!("breweries/{}", encode(id)),
        }
    }
}

/// Endpoint plus ordered query parameters. Parameter values are stored
/// unencoded; encoding happens in [`RequestDescriptor::to_url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub endpoint: Endpoint,
    pub params: Vec<(&'static str, String)>,
    pub page: Option<u32>,
}

impl RequestDescriptor {
    /// Descriptor for one page of results under `criteria`.
    ///
    /// Non-empty search text selects [`Endpoint::Search`] and keeps only the
    /// type and state facets; otherwise [`Endpoint::Browse`] is used with
    /// every non-empty facet plus the sort key.
    pub fn page(criteria: &FilterCriteria, page: u32, per_page: u32) -> Self {
        let mut params = Vec::new();

        let endpoint = match criteria.search_text() {
            Some(text) => {
                params.push(("query", text.to_string()));
                params.push(("per_page", per_page.to_string()));
                params.push(("page", page.to_string()));
                push_opt(&mut params, "by_type", criteria.type_filter());
                push_opt(&mut params, "by_state", criteria.state_filter());
                Endpoint::Search
            }
            None => {
                params.push(("per_page", per_page.to_string()));
                params.push(("page", page.to_string()));
                push_opt(&mut params, "by_type", criteria.type_filter());
                push_opt(&mut params, "by_state", criteria.state_filter());
                push_opt(&mut params, "by_city", criteria.city_filter());
                push_opt(&mut params, "by_country", criteria.country_filter());
                if let Some(sort) = criteria.sort {
                    params.push(("sort", sort.to_string()));
                }
                Endpoint::Browse
            }
        };

        Self {
            endpoint,
            params,
            page: Some(page),
        }
    }

    /// Descriptor for the total-count endpoint (type and state only).
    pub fn metadata(criteria: &FilterCriteria) -> Self {
        let mut params = Vec::new();
        push_opt(&mut params, "by_type", criteria.type_filter());
        push_opt(&mut params, "by_state", criteria.state_filter());

        Self {
            endpoint: Endpoint::Meta,
            params,
            page: None,
        }
    }

    pub fn random() -> Self {
        Self {
            endpoint: Endpoint::Random,
            params: Vec::new(),
            page: None,
        }
    }

    pub fn detail(id: &str) -> Self {
        Self {
            endpoint: Endpoint::Detail(id.to_string()),
            params: Vec::new(),
            page: None,
        }
    }

    /// Value of the first parameter named `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_param(&self, key: &str) -> bool {
        self.param(key).is_some()
    }

    /// Percent-encoded query string without the leading `?`.
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| format!("{}={}", key, encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Full request URL under `base` (e.g. `https://api.openbrewerydb.org/v1`).
    pub fn to_url(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        let query = self.query_string();
        if query.is_empty() {
            format!("{}/{}", base, self.endpoint.path())
        } else {
            format!("{}/{}?{}", base, self.endpoint.path(), query)
        }
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = self.query_string();
        if query.is_empty() {
            write!(f, "/{}", self.endpoint.path())
        } else {
            write!(f, "/{}?{}", self.endpoint.path(), query)
        }
    }
}

fn push_opt(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value {
        params.push((key, value.to_string()));
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}
