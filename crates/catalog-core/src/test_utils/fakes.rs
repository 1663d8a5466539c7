use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use crate::data::{CatalogError, RawCatalog};
use crate::traits::{CatalogSource, Clock};

/// Manually driven clock for TTL tests
pub struct FakeClock {
    now: Mutex<DateTime<Utc>>,
}

impl FakeClock {
    /// Creates a clock frozen at `start`
    pub fn at(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Creates a clock frozen at a fixed, arbitrary instant
    pub fn new() -> Self {
        Self::at(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).single().unwrap_or_else(Utc::now))
    }

    /// Moves the clock forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += chrono::Duration::from_std(by).unwrap_or_else(|_| chrono::Duration::zero());
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock() = to;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Fake implementation of CatalogSource for testing.
///
/// Answers with scripted results first, then with its standing response.
/// Counts every fetch and can delay them to widen race windows; a delayed
/// fetch still answers with whatever was due when it was called.
pub struct FakeCatalogSource {
    scripted: Mutex<VecDeque<Result<RawCatalog, CatalogError>>>,
    standing: Mutex<Result<RawCatalog, CatalogError>>,
    delay: Mutex<Option<Duration>>,
    calls: AtomicUsize,
}

impl FakeCatalogSource {
    /// Creates a source that always returns these raw records
    pub fn new(components: Vec<Value>) -> Self {
        Self {
            scripted: Mutex::new(VecDeque::new()),
            standing: Mutex::new(Ok(RawCatalog::from_items(components))),
            delay: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a source whose every fetch fails
    pub fn failing(error: CatalogError) -> Self {
        let source = Self::new(Vec::new());
        source.fail_with(error);
        source
    }

    /// Delays every fetch by `delay`
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock() = Some(delay);
        self
    }

    /// Replaces the standing response with these raw records
    pub fn set_components(&self, components: Vec<Value>) {
        *self.standing.lock() = Ok(RawCatalog::from_items(components));
    }

    /// Replaces the standing response with a full raw catalog
    pub fn set_catalog(&self, catalog: RawCatalog) {
        *self.standing.lock() = Ok(catalog);
    }

    /// Makes every later fetch fail with `error`
    pub fn fail_with(&self, error: CatalogError) {
        *self.standing.lock() = Err(error);
    }

    /// Queues a one-off result ahead of the standing response
    pub fn push_result(&self, result: Result<RawCatalog, CatalogError>) {
        self.scripted.lock().push_back(result);
    }

    /// Number of fetches performed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for FakeCatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeCatalogSource")
            .field("calls", &self.calls())
            .finish()
    }
}

#[async_trait]
impl CatalogSource for FakeCatalogSource {
    async fn fetch(&self) -> Result<RawCatalog, CatalogError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(call, "FakeCatalogSource fetch");

        // The answer is fixed when the fetch starts, not when the delay ends
        let scripted = self.scripted.lock().pop_front();
        let result = scripted.unwrap_or_else(|| self.standing.lock().clone());

        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }

    fn describe(&self) -> String {
        "fake".to_string()
    }
}
