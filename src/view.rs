//! Derived view state for the application review list

use crate::client::ApiClient;
use crate::filter::admits;
use crate::models::{Application, ApplicationStatus};

/// Per-status badge counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub reviewing: usize,
    pub approved: usize,
    pub rejected: usize,
}

/// Projection of one snapshot under the current search text and status filter.
#[derive(Debug, Clone)]
pub struct ProjectedView<'a> {
    /// Admitted records, fetch order preserved.
    pub filtered: Vec<&'a Application>,
    /// Badge counts over the full snapshot, independent of the applied filter.
    pub counts: StatusCounts,
}

/// Compute the filtered subsequence and the badge counts for one snapshot.
///
/// Counts are taken over the full unfiltered snapshot so the badges stay
/// stable while the admin narrows the list. Filtering only removes records;
/// it never reorders them.
pub fn project<'a>(
    snapshot: &'a [Application],
    search: &str,
    status_filter: &str,
) -> ProjectedView<'a> {
    let mut counts = StatusCounts::default();
    for application in snapshot {
        match application.status {
            ApplicationStatus::Pending => counts.pending += 1,
            ApplicationStatus::Reviewing => counts.reviewing += 1,
            ApplicationStatus::Approved => counts.approved += 1,
            ApplicationStatus::Rejected => counts.rejected += 1,
            ApplicationStatus::Other(_) => {}
        }
    }

    let filtered = snapshot
        .iter()
        .filter(|application| admits(application, search, status_filter))
        .collect();

    ProjectedView { filtered, counts }
}

/// Load state exposed to the rendering layer.
///
/// The consumer always renders exactly one of these; there is no state where
/// stale results are shown while a fetch is outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// A fetch is outstanding.
    Loading,
    /// The last fetch failed; the message is ready for display.
    Failed(String),
    /// The latest snapshot is available for projection.
    Ready(Vec<Application>),
}

/// Owns the fetch lifecycle and the current filter inputs for the review list.
pub struct ApplicationBrowser {
    client: ApiClient,
    state: LoadState,
    search: String,
    status_filter: String,
}

impl ApplicationBrowser {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: LoadState::Loading,
            search: String::new(),
            status_filter: String::new(),
        }
    }

    /// Fetch (or re-fetch) the snapshot, replacing it wholesale.
    pub async fn refresh(&mut self) {
        self.state = LoadState::Loading;
        match self.client.fetch_applications().await {
            Ok(snapshot) => {
                tracing::info!("Loaded {} applications", snapshot.len());
                self.state = LoadState::Ready(snapshot);
            }
            Err(e) => {
                tracing::error!("Failed to load applications: {}", e);
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }

    /// Explicit retry control: drop the cached snapshot and re-fetch.
    pub async fn retry(&mut self) {
        self.client.invalidate();
        self.refresh().await;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_status_filter(&mut self, filter: impl Into<String>) {
        self.status_filter = filter.into();
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    /// Error message for display, when the last fetch failed.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Project the current snapshot under the current inputs.
    ///
    /// Recomputed from scratch on every call; collections here are tens to
    /// low hundreds of records, so there is nothing worth memoizing.
    pub fn view(&self) -> ProjectedView<'_> {
        match &self.state {
            LoadState::Ready(snapshot) => project(snapshot, &self.search, &self.status_filter),
            _ => ProjectedView {
                filtered: Vec::new(),
                counts: StatusCounts::default(),
            },
        }
    }
}
