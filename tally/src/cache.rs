//! Stats cache keyed by (proposal, network).
//!
//! Requests for the same key can overlap: a user switches away and back, or a
//! refresh fires while the previous one is still waiting on the indexer. Each
//! request takes a [`Ticket`] with a fresh generation when it starts; only a
//! completion carrying the newest generation for its key is stored, so a slow
//! superseded response can never overwrite a newer one.
//!
//! The cache is bounded. When full, the least recently started key is evicted.

use crate::stats::PostStats;

use govtally_types::Network;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub proposal_id: u32,
    pub network: Network,
}

impl CacheKey {
    pub fn new(proposal_id: u32, network: Network) -> Self {
        Self {
            proposal_id,
            network,
        }
    }
}

/// Proof that a request was started, carrying its generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    key: CacheKey,
    generation: u64,
}

impl Ticket {
    pub fn key(&self) -> CacheKey {
        self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

struct Slot {
    latest_started: u64,
    completed: Option<Arc<PostStats>>,
}

#[derive(Default)]
struct Inner {
    slots: HashMap<CacheKey, Slot>,
    order: VecDeque<CacheKey>,
}

pub struct StatsCache {
    inner: RwLock<Inner>,
    next_generation: AtomicU64,
    capacity: usize,
}

impl StatsCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            next_generation: AtomicU64::new(1),
            capacity: capacity.max(1),
        }
    }

    /// Start a request for `key`. Any ticket issued earlier for the same key
    /// becomes stale.
    pub async fn begin(&self, key: CacheKey) -> Ticket {
        // Generations are drawn under the write lock so they reach the slot
        // in increasing order.
        let mut inner = self.inner.write().await;
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

        if let Some(slot) = inner.slots.get_mut(&key) {
            slot.latest_started = generation;
            inner.order.retain(|k| *k != key);
        } else {
            if inner.slots.len() >= self.capacity {
                if let Some(evicted) = inner.order.pop_front() {
                    inner.slots.remove(&evicted);
                    tracing::debug!(?evicted, "evicting stats cache entry");
                }
            }
            inner.slots.insert(
                key,
                Slot {
                    latest_started: generation,
                    completed: None,
                },
            );
        }
        inner.order.push_back(key);

        Ticket { key, generation }
    }

    /// Store the result of a request. Returns `None`, discarding `stats`,
    /// when the ticket was superseded or its key was evicted.
    pub async fn complete(&self, ticket: Ticket, stats: PostStats) -> Option<Arc<PostStats>> {
        let mut inner = self.inner.write().await;
        let Some(slot) = inner.slots.get_mut(&ticket.key) else {
            tracing::debug!(key = ?ticket.key, "discarding result for evicted key");
            return None;
        };
        if ticket.generation < slot.latest_started {
            tracing::debug!(
                key = ?ticket.key,
                generation = ticket.generation,
                latest = slot.latest_started,
                "discarding stale stats result"
            );
            return None;
        }

        let stats = Arc::new(stats);
        slot.completed = Some(Arc::clone(&stats));
        Some(stats)
    }

    /// Whether `ticket` is still the newest request for its key.
    pub async fn is_current(&self, ticket: &Ticket) -> bool {
        let inner = self.inner.read().await;
        inner
            .slots
            .get(&ticket.key)
            .is_some_and(|slot| slot.latest_started == ticket.generation)
    }

    /// Latest completed stats for `key`.
    pub async fn get(&self, key: CacheKey) -> Option<Arc<PostStats>> {
        let inner = self.inner.read().await;
        inner.slots.get(&key).and_then(|slot| slot.completed.clone())
    }

    pub async fn invalidate(&self, key: CacheKey) {
        let mut inner = self.inner.write().await;
        inner.slots.remove(&key);
        inner.order.retain(|k| *k != key);
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.slots.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for StatsCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
