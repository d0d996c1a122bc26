//! Paginated, filter-scoped result list.
//!
//! A [`ResultAccumulator`] holds the records loaded so far for one set of
//! [`FilterCriteria`]. Each [`reset`](ResultAccumulator::reset) starts a new
//! generation; pages fetched under an older generation are dropped when they
//! arrive, so a slow response for superseded criteria can never leak into
//! the current list.

use crate::error::{Result, TaproomError};
use crate::model::{Brewery, FilterCriteria};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Identifies one filter session. Strictly increasing across resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Records were added; `page` is the page counter after the append.
    Appended { page: u32, added: usize },
    /// The page was requested under an older generation and was discarded.
    Stale,
}

/// Distinct location values, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub states: Vec<String>,
    pub cities: Vec<String>,
    pub countries: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ResultAccumulator {
    criteria: Option<FilterCriteria>,
    generation: Generation,
    page: u32,
    pages_loaded: u32,
    last_page_len: usize,
    records: Vec<Brewery>,
    total: u64,
}

impl ResultAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new filter session: clears records, sets the page to 1 and
    /// returns the generation that page fetches must be tagged with.
    pub fn reset(&mut self, criteria: FilterCriteria) -> Generation {
        self.generation = self.generation.next();
        self.criteria = Some(criteria);
        self.page = 1;
        self.pages_loaded = 0;
        self.last_page_len = 0;
        self.records.clear();
        self.total = 0;

        tracing::debug!(generation = %self.generation, "result list reset");
        self.generation
    }

    /// Appends a fetched page to the list.
    ///
    /// The first append after a reset is page 1 and leaves the counter at 1;
    /// every later append is the next page and advances the counter by one.
    /// Pages tagged with an older generation are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TaproomError::InvalidSequence`] if no reset has happened yet.
    pub fn append_page(
        &mut self,
        generation: Generation,
        records: Vec<Brewery>,
    ) -> Result<AppendOutcome> {
        if self.criteria.is_none() {
            return Err(TaproomError::InvalidSequence);
        }

        if generation != self.generation {
            tracing::debug!(
                stale = %generation,
                current = %self.generation,
                "discarding stale page"
            );
            return Ok(AppendOutcome::Stale);
        }

        if self.pages_loaded > 0 {
            self.page += 1;
        }
        self.pages_loaded += 1;

        let added = records.len();
        self.last_page_len = added;
        self.records.extend(records);

        Ok(AppendOutcome::Appended {
            page: self.page,
            added,
        })
    }

    /// Records the server-reported total for `generation`. Stale totals are
    /// ignored; returns whether the value was stored.
    pub fn set_total(&mut self, generation: Generation, total: u64) -> bool {
        if self.criteria.is_none() || generation != self.generation {
            return false;
        }
        self.total = total;
        true
    }

    /// Page number the next fetch must request.
    pub fn next_page(&self) -> u32 {
        if self.pages_loaded == 0 {
            1
        } else {
            self.page + 1
        }
    }

    /// Whether another page may exist: nothing loaded yet, or the last page
    /// came back full.
    pub fn has_more(&self, per_page: u32) -> bool {
        self.criteria.is_some()
            && (self.pages_loaded == 0 || self.last_page_len >= per_page as usize)
    }

    pub fn derive_facets(&self) -> Facets {
        Facets {
            states: distinct(self.records.iter().filter_map(Brewery::state)),
            cities: distinct(self.records.iter().filter_map(Brewery::city)),
            countries: distinct(self.records.iter().filter_map(Brewery::country)),
        }
    }

    pub fn records(&self) -> &[Brewery] {
        &self.records
    }

    pub fn criteria(&self) -> Option<&FilterCriteria> {
        self.criteria.as_ref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn pages_loaded(&self) -> u32 {
        self.pages_loaded
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
