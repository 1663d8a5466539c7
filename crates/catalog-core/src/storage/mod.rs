//! Snapshot cache for the component catalog
//!
//! The store owns the current `CatalogSnapshot`, reloads it from its
//! `CatalogSource` once the TTL has passed, and never fails a read: when a
//! reload goes wrong callers get the previous snapshot, or an empty one if
//! nothing was ever loaded.

pub mod static_source;


use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::data::{
    CatalogError, CatalogInfo, CatalogSnapshot, CatalogStats, RawCatalog, ValidationReport,
};
use crate::normalize::normalize_catalog;
use crate::traits::{CatalogSource, Clock};

pub use static_source::{InMemorySource, StaticFileSource};

/// Default maximum age of a snapshot (5 minutes)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Default bound on a single source fetch
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum age of a snapshot before a read triggers a reload
    pub ttl: Duration,
    /// Upper bound on one fetch from the source
    pub load_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CACHE_TTL,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }
}

/// What a reload hands to every caller waiting on it
#[derive(Debug, Clone)]
struct ReloadOutcome {
    snapshot: Arc<CatalogSnapshot>,
    refreshed: bool,
}

type ReloadFuture = Shared<BoxFuture<'static, ReloadOutcome>>;

struct InFlight {
    generation: u64,
    invalidations: u64,
    future: ReloadFuture,
}

#[derive(Default)]
struct StoreState {
    current: Option<Arc<CatalogSnapshot>>,
    forced_stale: bool,
    /// Bumped by every `invalidate()`
    invalidations: u64,
    /// Generation of the most recently started reload
    generation: u64,
    /// Generation that produced `current`
    installed: u64,
    in_flight: Option<InFlight>,
}

#[derive(Default)]
struct StoreCounters {
    hits: AtomicU64,
    reloads: AtomicU64,
    failed_reloads: AtomicU64,
    last_error: Mutex<Option<String>>,
}

/// TTL cache of catalog snapshots with single-flight reloads.
pub struct CatalogStore {
    source: Arc<dyn CatalogSource>,
    clock: Arc<dyn Clock>,
    config: StoreConfig,
    state: Mutex<StoreState>,
    counters: Arc<StoreCounters>,
}

impl CatalogStore {
    /// Creates an empty store; nothing is loaded until the first `get()`.
    pub fn new(source: Arc<dyn CatalogSource>, clock: Arc<dyn Clock>, config: StoreConfig) -> Self {
        info!(source = %source.describe(), ttl_ms = config.ttl.as_millis() as u64, "Creating catalog store");
        Self {
            source,
            clock,
            config,
            state: Mutex::new(StoreState::default()),
            counters: Arc::new(StoreCounters::default()),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Description of the backing source
    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Returns the current snapshot, reloading it first when it is missing,
    /// older than the TTL, or invalidated.
    ///
    /// Concurrent callers arriving while a reload is pending share it; the
    /// source is fetched once. Never fails: a failed reload yields the
    /// previous snapshot unchanged, or an empty snapshot.
    pub async fn get(&self) -> Arc<CatalogSnapshot> {
        let (generation, invalidations, future) = {
            let mut state = self.state.lock();
            if let Some(snapshot) = self.fresh(&state) {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                return snapshot;
            }

            match &state.in_flight {
                Some(in_flight) => {
                    debug!(generation = in_flight.generation, "Joining pending catalog reload");
                    (in_flight.generation, in_flight.invalidations, in_flight.future.clone())
                }
                None => {
                    let in_flight = self.start_reload(&mut state);
                    let handle = (in_flight.generation, in_flight.invalidations, in_flight.future.clone());
                    state.in_flight = Some(in_flight);
                    handle
                }
            }
        };

        let outcome = future.await;
        self.finish_reload(generation, invalidations, &outcome);
        outcome.snapshot
    }

    /// Peeks at the installed snapshot without reloading.
    pub fn current(&self) -> Option<Arc<CatalogSnapshot>> {
        self.state.lock().current.clone()
    }

    /// Forces the next `get()` to reload. The old snapshot stays around as
    /// the fallback, and a reload already in progress is detached so its
    /// callers finish but later readers start a new one.
    pub fn invalidate(&self) {
        let mut state = self.state.lock();
        state.forced_stale = true;
        state.invalidations += 1;
        state.in_flight = None;
        debug!(invalidations = state.invalidations, "Catalog snapshot invalidated");
    }

    /// Invalidates and reloads in one step.
    pub async fn reload(&self) -> Arc<CatalogSnapshot> {
        self.invalidate();
        self.get().await
    }

    /// Metadata of the current catalog plus cache statistics.
    pub async fn info(&self) -> CatalogInfo {
        let snapshot = self.get().await;
        let stale = {
            let state = self.state.lock();
            self.fresh(&state).is_none()
        };
        let age_ms = (self.clock.now() - snapshot.loaded_at()).num_milliseconds();

        CatalogInfo {
            metadata: snapshot.metadata(),
            stats: CatalogStats {
                source: self.source.describe(),
                total_components: snapshot.len(),
                skipped_items: snapshot.diagnostics().len(),
                loaded_at: Some(snapshot.loaded_at()),
                age_ms: Some(age_ms),
                stale,
                cache_hits: self.counters.hits.load(Ordering::Relaxed),
                reloads: self.counters.reloads.load(Ordering::Relaxed),
                failed_reloads: self.counters.failed_reloads.load(Ordering::Relaxed),
                last_error: self.counters.last_error.lock().clone(),
            },
        }
    }

    /// Normalizes the whole source as a dry run. The cached snapshot is left
    /// untouched; source failures are returned instead of absorbed.
    #[instrument(skip(self), fields(source = %self.source.describe()))]
    pub async fn validate(&self) -> Result<ValidationReport, CatalogError> {
        let raw = fetch_with_timeout(self.source.as_ref(), self.config.load_timeout).await?;
        let normalized = normalize_catalog(&raw.components);

        let report = ValidationReport {
            source: self.source.describe(),
            total: normalized.raw_count,
            valid: normalized.len(),
            invalid: normalized.diagnostics.len(),
            diagnostics: normalized.diagnostics,
        };
        info!(total = report.total, valid = report.valid, invalid = report.invalid, "Catalog validated");
        Ok(report)
    }

    fn fresh(&self, state: &StoreState) -> Option<Arc<CatalogSnapshot>> {
        let current = state.current.as_ref()?;
        if state.forced_stale {
            return None;
        }
        // A snapshot stamped in the future (clock skew) counts as brand new.
        let within_ttl = match (self.clock.now() - current.loaded_at()).to_std() {
            Ok(age) => age < self.config.ttl,
            Err(_) => true,
        };
        within_ttl.then(|| Arc::clone(current))
    }

    fn start_reload(&self, state: &mut StoreState) -> InFlight {
        state.generation += 1;
        let generation = state.generation;
        let previous = state.current.clone();
        let source = Arc::clone(&self.source);
        let clock = Arc::clone(&self.clock);
        let counters = Arc::clone(&self.counters);
        let timeout = self.config.load_timeout;

        let future = async move {
            counters.reloads.fetch_add(1, Ordering::Relaxed);
            match load_snapshot(source.as_ref(), clock.as_ref(), timeout).await {
                Ok(snapshot) => {
                    info!(
                        generation,
                        components = snapshot.len(),
                        skipped = snapshot.diagnostics().len(),
                        "Catalog snapshot loaded"
                    );
                    ReloadOutcome {
                        snapshot: Arc::new(snapshot),
                        refreshed: true,
                    }
                }
                Err(error) => {
                    counters.failed_reloads.fetch_add(1, Ordering::Relaxed);
                    *counters.last_error.lock() = Some(error.to_string());
                    warn!(
                        generation,
                        error = %error,
                        has_previous = previous.is_some(),
                        "Catalog reload failed, serving fallback snapshot"
                    );
                    let snapshot = previous
                        .unwrap_or_else(|| Arc::new(CatalogSnapshot::empty(clock.now())));
                    ReloadOutcome {
                        snapshot,
                        refreshed: false,
                    }
                }
            }
        }
        .boxed()
        .shared();

        InFlight {
            generation,
            invalidations: state.invalidations,
            future,
        }
    }

    /// Installs a finished reload. Every waiter calls this; only the first
    /// call for a generation changes anything, and an older generation never
    /// replaces a newer snapshot.
    fn finish_reload(&self, generation: u64, invalidations: u64, outcome: &ReloadOutcome) {
        let mut state = self.state.lock();
        if state.in_flight.as_ref().map(|f| f.generation) == Some(generation) {
            state.in_flight = None;
        }
        if outcome.refreshed && generation > state.installed {
            state.current = Some(Arc::clone(&outcome.snapshot));
            state.installed = generation;
            if state.invalidations == invalidations {
                state.forced_stale = false;
            }
        }
    }
}

async fn fetch_with_timeout(
    source: &dyn CatalogSource,
    timeout: Duration,
) -> Result<RawCatalog, CatalogError> {
    tokio::time::timeout(timeout, source.fetch())
        .await
        .map_err(|_| CatalogError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        })?
}

async fn load_snapshot(
    source: &dyn CatalogSource,
    clock: &dyn Clock,
    timeout: Duration,
) -> Result<CatalogSnapshot, CatalogError> {
    let raw = fetch_with_timeout(source, timeout).await?;
    let normalized = normalize_catalog(&raw.components);

    // A non-empty source where nothing survives is a schema break, not an
    // empty catalog; keep serving the previous snapshot.
    if normalized.is_empty() && normalized.raw_count > 0 {
        return Err(CatalogError::InvalidResponse(format!(
            "none of the {} catalog records could be normalized",
            normalized.raw_count
        )));
    }

    Ok(CatalogSnapshot::build(normalized, raw.metadata, clock.now()))
}
