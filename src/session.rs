//! Dashboard view model.
//!
//! [`DashboardSession`] owns the current [`FilterCriteria`], the
//! [`ResultAccumulator`] and the last fetch status. Renderers read from it
//! (`records`, `facets`, `report`) and drive it through two entry points:
//!
//! - [`set_filter_criteria`](DashboardSession::set_filter_criteria) resets the
//!   list when the criteria changed and hands back the page-1 request the
//!   caller must issue under the new generation.
//! - [`load_next_page`](DashboardSession::load_next_page) fetches and appends
//!   the next page.
//!
//! Callers that issue fetches themselves (for example from a spawned task)
//! pass the result back through
//! [`ingest_page`](DashboardSession::ingest_page); results for a superseded
//! generation are dropped there.

use crate::accumulator::{AppendOutcome, Facets, Generation, ResultAccumulator};
use crate::api::DirectoryService;
use crate::error::{Result, TaproomError};
use crate::model::{Brewery, FilterCriteria};
use crate::query::RequestDescriptor;
use crate::report::Report;
use futures::future::try_join_all;

/// A page request tagged with the generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: Generation,
    pub request: RequestDescriptor,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Ready,
    /// Last fetch failed; previously loaded records are still available and
    /// the same fetch can be retried.
    Failed(String),
}

/// Result of one page load as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLoad {
    Appended { page: u32, added: usize },
    /// Arrived for an older generation and was discarded.
    Stale,
    /// The fetch failed; see [`DashboardSession::status`].
    Failed,
}

pub struct DashboardSession<S> {
    service: S,
    per_page: u32,
    criteria: FilterCriteria,
    accumulator: ResultAccumulator,
    status: FetchStatus,
}

impl<S: DirectoryService> DashboardSession<S> {
    pub fn new(service: S, per_page: u32) -> Self {
        Self {
            service,
            per_page,
            criteria: FilterCriteria::default(),
            accumulator: ResultAccumulator::new(),
            status: FetchStatus::Idle,
        }
    }

    /// Replaces the filter criteria.
    ///
    /// Returns `None` when the normalized criteria equal the ones already in
    /// effect. Otherwise the result list is reset and the returned request
    /// (page 1 under the new generation) must be fetched by the caller.
    pub fn set_filter_criteria(&mut self, criteria: FilterCriteria) -> Option<PageRequest> {
        let criteria = criteria.normalized();
        if self.accumulator.criteria() == Some(&criteria) {
            return None;
        }
        Some(self.restart(criteria))
    }

    /// Resets with the current criteria even if they didn't change. Used for
    /// the initial load and for explicit reloads.
    pub fn reload(&mut self) -> PageRequest {
        self.restart(self.criteria.clone())
    }

    fn restart(&mut self, criteria: FilterCriteria) -> PageRequest {
        self.criteria = criteria;
        let generation = self.accumulator.reset(self.criteria.clone());
        self.status = FetchStatus::Idle;

        tracing::info!(%generation, criteria = ?self.criteria, "filter session started");

        PageRequest {
            generation,
            request: RequestDescriptor::page(&self.criteria, 1, self.per_page),
        }
    }

    /// Request for the next page of the current session.
    ///
    /// # Errors
    ///
    /// [`TaproomError::InvalidSequence`] before the first reset.
    pub fn next_page_request(&self) -> Result<PageRequest> {
        let criteria = self
            .accumulator
            .criteria()
            .ok_or(TaproomError::InvalidSequence)?;

        Ok(PageRequest {
            generation: self.accumulator.generation(),
            request: RequestDescriptor::page(criteria, self.accumulator.next_page(), self.per_page),
        })
    }

    /// Feeds a finished page fetch back into the session.
    ///
    /// Fetch failures are absorbed: they set [`FetchStatus::Failed`] and leave
    /// the loaded records untouched. Any other error is returned.
    pub fn ingest_page(
        &mut self,
        generation: Generation,
        fetched: Result<Vec<Brewery>>,
    ) -> Result<PageLoad> {
        match fetched {
            Ok(records) => match self.accumulator.append_page(generation, records)? {
                AppendOutcome::Appended { page, added } => {
                    self.status = FetchStatus::Ready;
                    tracing::debug!(page, added, total = self.accumulator.len(), "page appended");
                    Ok(PageLoad::Appended { page, added })
                }
                AppendOutcome::Stale => Ok(PageLoad::Stale),
            },
            Err(err) if err.is_fetch_failure() => {
                if generation == self.accumulator.generation() {
                    tracing::warn!(error = %err, "page fetch failed");
                    self.status = FetchStatus::Failed(err.to_string());
                    Ok(PageLoad::Failed)
                } else {
                    Ok(PageLoad::Stale)
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Issues a request produced by `set_filter_criteria`, `reload` or
    /// `next_page_request` and ingests the result.
    pub async fn fetch(&mut self, pending: PageRequest) -> Result<PageLoad> {
        let fetched = self.service.fetch_page(&pending.request).await;
        self.ingest_page(pending.generation, fetched)
    }

    /// Applies new criteria and, when they changed, loads page 1 and the
    /// total count. Returns `None` when nothing changed.
    pub async fn apply(&mut self, criteria: FilterCriteria) -> Result<Option<PageLoad>> {
        match self.set_filter_criteria(criteria) {
            Some(pending) => {
                let load = self.fetch(pending).await?;
                self.refresh_total().await;
                Ok(Some(load))
            }
            None => Ok(None),
        }
    }

    pub async fn load_next_page(&mut self) -> Result<PageLoad> {
        let pending = self.next_page_request()?;
        self.fetch(pending).await
    }

    /// Fetches pages `1..=pages` of the current criteria concurrently and
    /// appends them in page order. All-or-nothing: one failed page means no
    /// page is appended.
    pub async fn load_first_pages(&mut self, pages: u32) -> Result<PageLoad> {
        let generation = self.reload().generation;
        let requests: Vec<_> = (1..=pages.max(1))
            .map(|page| RequestDescriptor::page(&self.criteria, page, self.per_page))
            .collect();

        let fetched = try_join_all(requests.iter().map(|r| self.service.fetch_page(r))).await;

        match fetched {
            Ok(batches) => {
                let mut added = 0;
                for batch in batches {
                    if let PageLoad::Appended { added: n, .. } =
                        self.ingest_page(generation, Ok(batch))?
                    {
                        added += n;
                    }
                }
                Ok(PageLoad::Appended {
                    page: self.accumulator.page(),
                    added,
                })
            }
            Err(err) => self.ingest_page(generation, Err(err)),
        }
    }

    /// Fetches the total count for the current criteria. Failures are logged
    /// and leave the total unknown (0).
    pub async fn refresh_total(&mut self) -> u64 {
        let generation = self.accumulator.generation();
        let request = RequestDescriptor::metadata(&self.criteria);

        match self.service.fetch_metadata(&request).await {
            Ok(meta) => {
                self.accumulator.set_total(generation, meta.total);
            }
            Err(err) => {
                tracing::warn!(error = %err, "metadata fetch failed");
            }
        }
        self.accumulator.total()
    }

    /// One random record, outside the accumulated list.
    pub async fn random(&self) -> Result<Brewery> {
        self.service.fetch_random().await
    }

    pub async fn detail(&self, id: &str) -> Result<Brewery> {
        self.service.fetch_detail(id).await
    }

    pub fn records(&self) -> &[Brewery] {
        self.accumulator.records()
    }

    pub fn facets(&self) -> Facets {
        self.accumulator.derive_facets()
    }

    pub fn report(&self) -> Report<'_> {
        Report::new(self.accumulator.records(), self.accumulator.total())
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn generation(&self) -> Generation {
        self.accumulator.generation()
    }

    pub fn page(&self) -> u32 {
        self.accumulator.page()
    }

    pub fn total(&self) -> u64 {
        self.accumulator.total()
    }

    pub fn has_more(&self) -> bool {
        self.accumulator.has_more(self.per_page)
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}
