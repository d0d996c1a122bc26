//! Command implementations for the taproom CLI
//!
//! - **browse**: filtered listing with load-more paging and summary stats
//! - **analytics**: multi-page distributions (types, states)
//! - **detail**: single brewery views (by id, random)
//! - **config**: resolved configuration
//! - **utils**: shared output helpers (internal)

pub mod analytics;
pub mod browse;
pub mod config;
pub mod detail;
pub(crate) mod utils;

pub use analytics::analytics;
pub use browse::{browse, stats};
pub use config::config;
pub use detail::{random, show};

use clap::Args;
use taproom::error::Result;
use taproom::model::{BreweryType, FilterCriteria, SortKey};

/// Filter flags shared by `browse` and `stats`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Free-text search (drops --city, --country and --sort)
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Facility type (micro, nano, regional, brewpub, ...)
    #[arg(short = 't', long = "type")]
    pub brewery_type: Option<String>,

    /// State or province
    #[arg(long)]
    pub state: Option<String>,

    /// City
    #[arg(long)]
    pub city: Option<String>,

    /// Country
    #[arg(long)]
    pub country: Option<String>,

    /// Sort key, e.g. name:asc or state:desc
    #[arg(long)]
    pub sort: Option<String>,
}

impl FilterArgs {
    pub fn to_criteria(&self) -> Result<FilterCriteria> {
        let sort = match self.sort.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Some(s.parse::<SortKey>()?),
            _ => None,
        };

        if let Some(value) = self.brewery_type.as_deref() {
            utils::warn_unknown_type(value);
        }

        Ok(FilterCriteria {
            search: self.search.clone(),
            brewery_type: self.brewery_type.as_deref().map(BreweryType::from),
            state: self.state.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            sort,
        }
        .normalized())
    }
}
