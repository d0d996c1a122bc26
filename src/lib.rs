//! Library interface for taproom, a terminal dashboard for the Open Brewery DB
//! directory.
//!
//! The view model lives in [`session`]; [`query`], [`accumulator`] and
//! [`report`] are its building blocks and can be used on their own.

pub mod accumulator;
pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod query;
pub mod report;
pub mod session;

// Re-export commonly used types
pub use accumulator::{AppendOutcome, Facets, Generation, ResultAccumulator};
pub use api::{BreweryApi, DirectoryService};
pub use config::Config;
pub use error::{Result, TaproomError};
pub use model::{Brewery, BreweryType, FilterCriteria, Metadata, SortField, SortKey, SortOrder};
pub use query::{Endpoint, RequestDescriptor};
pub use report::{ChartRow, Distribution, Report, Summary};
pub use session::{DashboardSession, FetchStatus, PageLoad, PageRequest};
