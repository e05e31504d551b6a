// ── Instance-port completion ──
//
// Every completion request fetches the live identifier set once, merges it
// with the statically known candidates into a fresh `CandidatePool`, matches
// the partial buffer against it and throws the pool away. Inventory
// failures and timeouts degrade to "no live candidates"; they never reach
// the shell.

use std::collections::BTreeSet;
use std::ops::Bound;
use std::time::Duration;

use tracing::{debug, warn};

use crate::service::InstancePortInventory;

/// Upper bound on a single inventory query made from the completion path.
pub const DEFAULT_COMPLETION_TIMEOUT: Duration = Duration::from_secs(2);

// ── CandidatePool ───────────────────────────────────────────────────

/// Sorted, de-duplicated completion candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePool(BTreeSet<String>);

impl CandidatePool {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(candidates.into_iter().map(Into::into).collect())
    }

    /// Sorted union of `known` and `live`.
    pub fn merged<'a, I>(known: I, live: BTreeSet<String>) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut pool = live;
        pool.extend(known.into_iter().cloned());
        Self(pool)
    }

    /// Add candidates. Merging a set that is already present changes nothing.
    pub fn merge<I, S>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(candidates.into_iter().map(Into::into));
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.0.contains(candidate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Candidates starting with `buffer[..cursor]`, in sorted order.
    ///
    /// Matching is case-sensitive. An empty prefix matches everything. A
    /// cursor past the end, or inside a multi-byte character, is moved back
    /// to the nearest character boundary.
    pub fn complete(&self, buffer: &str, cursor: usize) -> Vec<String> {
        let prefix = prefix_at(buffer, cursor);
        self.0
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|candidate| candidate.starts_with(prefix))
            .cloned()
            .collect()
    }
}

fn prefix_at(buffer: &str, cursor: usize) -> &str {
    let mut end = cursor.min(buffer.len());
    while !buffer.is_char_boundary(end) {
        end -= 1;
    }
    &buffer[..end]
}

// ── CandidateSetResolver ────────────────────────────────────────────

/// Fetches the live instance-port identifier set with a bounded wait.
pub struct CandidateSetResolver<I> {
    inventory: I,
    timeout: Duration,
}

impl<I: InstancePortInventory> CandidateSetResolver<I> {
    pub fn new(inventory: I, timeout: Duration) -> Self {
        Self { inventory, timeout }
    }

    /// One inventory query. Failures and timeouts yield the empty set.
    pub async fn resolve(&self) -> BTreeSet<String> {
        match tokio::time::timeout(self.timeout, self.inventory.list_all()).await {
            Ok(Ok(ids)) => {
                debug!(count = ids.len(), "instance ports resolved");
                ids
            }
            Ok(Err(err)) => {
                warn!(error = %err, "instance port query failed, completing without live candidates");
                BTreeSet::new()
            }
            Err(_) => {
                warn!(
                    timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                    "instance port query timed out, completing without live candidates"
                );
                BTreeSet::new()
            }
        }
    }
}

// ── InstancePortCompleter ───────────────────────────────────────────

/// Completion engine for instance-port identifiers.
pub struct InstancePortCompleter<I> {
    resolver: CandidateSetResolver<I>,
    known: BTreeSet<String>,
}

impl<I: InstancePortInventory> InstancePortCompleter<I> {
    pub fn new(resolver: CandidateSetResolver<I>) -> Self {
        Self {
            resolver,
            known: BTreeSet::new(),
        }
    }

    /// Candidates offered even when the inventory has nothing to say.
    pub fn with_static<T, S>(mut self, candidates: T) -> Self
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known.extend(candidates.into_iter().map(Into::into));
        self
    }

    /// Fresh pool for this request: known ∪ live.
    pub async fn pool(&self) -> CandidatePool {
        let live = self.resolver.resolve().await;
        CandidatePool::merged(&self.known, live)
    }

    pub async fn complete(&self, buffer: &str, cursor: usize) -> Vec<String> {
        self.pool().await.complete(buffer, cursor)
    }
}
