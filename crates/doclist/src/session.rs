//! Page-level listing session
//!
//! A [`Session`] is the single writer of the listing state. It owns the fetched
//! doctors, the specialty facets built from them and the current
//! [`FilterState`]. Every state change re-runs the pipeline first and only then
//! rewrites the query string, so the displayed list and the query never
//! disagree.

use crate::prelude::{eprintln, *};
use doclist_core::doctor::{NormalizedBatch, NormalizedDoctor};
use doclist_core::filter::{apply, FilterState};
use doclist_core::listing::{build_listing, ListingOutput};
use doclist_core::query::{parse_query, serialize_query};
use doclist_core::specialty::{build_index, SpecialtyFacet, COMMON_SPECIALTIES};
use indicatif::{ProgressBar, ProgressStyle};

use crate::feed::{fetch_doctors, FeedConfig};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready,
    /// The feed could not be fetched; carries the message shown to the user
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Session {
    load_state: LoadState,
    doctors: Vec<NormalizedDoctor>,
    facets: Vec<SpecialtyFacet>,
    state: FilterState,
    displayed: Vec<NormalizedDoctor>,
    /// Current query string, without the leading `?`
    query: String,
}

impl Session {
    /// Start a session in the loading state, restoring filters from `initial_query`
    pub fn new(initial_query: &str) -> Self {
        Self {
            load_state: LoadState::Loading,
            doctors: Vec::new(),
            facets: Vec::new(),
            state: parse_query(initial_query),
            displayed: Vec::new(),
            query: initial_query.trim_start_matches('?').to_string(),
        }
    }

    /// Settle the session with the outcome of the feed fetch
    ///
    /// A failed fetch leaves no partial data behind.
    pub fn finish_loading(&mut self, outcome: std::result::Result<NormalizedBatch, Error>) {
        match outcome {
            Ok(batch) => {
                self.facets = build_index(&batch.doctors, COMMON_SPECIALTIES);
                self.doctors = batch.doctors;
                self.load_state = LoadState::Ready;

                log::info!("Loaded {} doctors", self.doctors.len());
                for facet in &self.facets {
                    log::debug!("Specialty {}: {} doctors", facet.label, facet.count);
                }
            }
            Err(err) => {
                log::error!("Failed to fetch or process doctors: {err}");
                self.doctors.clear();
                self.facets.clear();
                self.load_state = LoadState::Failed(err.to_string());
            }
        }

        self.refresh();
    }

    /// Apply one user interaction to the filter state
    pub fn update(&mut self, change: impl FnOnce(FilterState) -> FilterState) {
        self.state = change(self.state.clone());
        self.refresh();
    }

    // Filtering waits for the fetch to settle.
    fn refresh(&mut self) {
        if self.load_state == LoadState::Loading {
            return;
        }

        self.displayed = apply(&self.doctors, &self.state);
        self.query = serialize_query(&self.state, &self.query);
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.load_state {
            LoadState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn doctors(&self) -> &[NormalizedDoctor] {
        &self.doctors
    }

    pub fn facets(&self) -> &[SpecialtyFacet] {
        &self.facets
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn displayed(&self) -> &[NormalizedDoctor] {
        &self.displayed
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Snapshot of everything the presentation layer draws
    pub fn listing(&self) -> ListingOutput {
        build_listing(&self.doctors, &self.facets, &self.state, &self.query)
    }

    /// Turn a failed session into an error for callers that cannot render one
    pub fn into_ready(self) -> Result<Self> {
        match self.load_state {
            LoadState::Failed(message) => Err(eyre!(message)),
            _ => Ok(self),
        }
    }
}

/// Spinner shown while the doctor feed is loading
pub fn new_spinner() -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(spinner)
}

/// Create a session from `initial_query` and fetch the doctor feed into it
pub async fn open_session(
    global: &crate::Global,
    initial_query: &str,
    spinner: Option<&ProgressBar>,
) -> Session {
    let config = FeedConfig::from_global(global);
    let mut session = Session::new(initial_query);

    if global.verbose {
        eprintln!("Fetching doctors from {}", config.source_url);
    }
    if let Some(s) = spinner {
        s.set_message("Loading doctors...");
    }

    let outcome = fetch_doctors(&config).await;

    if let Some(s) = spinner {
        s.finish_and_clear();
    }

    session.finish_loading(outcome);
    session
}
