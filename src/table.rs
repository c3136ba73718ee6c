//! The two-level FKS core.
//!
//! An [`OuterTable`] partitions the key set into `n` buckets with a randomly
//! drawn [`UniversalHash`], then builds one [`InnerTable`] per bucket, sized
//! quadratically in the bucket's key count so a random hash places the whole
//! bucket without collision in O(1) expected attempts. Outer draws whose
//! buckets would blow the total-slot budget are rejected before any inner
//! table is touched.
//!
//! Both levels share one retry loop: draw a hash, attempt a fill, redraw on
//! failure. Construction is total for any set of distinct keys, so neither
//! level surfaces an error type.

use alloc::vec;
use alloc::vec::Vec;

use rand::Rng;

use crate::hash::Key;
use crate::hash::UniversalHash;

/// Budget factor for the outer level: an outer draw is accepted only when
/// the summed squared bucket counts stay within `ratio × n`, which bounds
/// total slot memory to O(n). With a universal family the expected sum is
/// below `2n`, so a factor of 4 rejects a draw with probability < 1/2.
pub const MEMORY_REPLETION_RATIO: usize = 4;

/// Draws hash functions until `attempt` accepts one, returning the accepted
/// draw. Shared by both table levels.
///
/// No attempt cap: each round succeeds with constant probability for the
/// fills used here, so the loop terminates after O(1) expected draws. A
/// failed attempt may leave partial buffer state behind; the next attempt
/// overwrites it.
fn retry<R, F>(rng: &mut R, mut attempt: F) -> UniversalHash
where
    R: Rng,
    F: FnMut(UniversalHash) -> bool,
{
    loop {
        let hash = UniversalHash::draw(rng);
        if attempt(hash) {
            return hash;
        }
    }
}

/// Per-bucket key counts under `hash`, used both to accept or reject an
/// outer draw and to size the buckets it implies.
fn distribution<K: Key>(hash: &UniversalHash, keys: &[K], buckets: usize) -> Vec<usize> {
    let mut counts = vec![0usize; buckets];
    for &key in keys {
        counts[hash.position(key.to_word(), buckets)] += 1;
    }
    counts
}

/// Clears the buffer and places every key at its hashed slot, failing on
/// the first collision.
fn try_place<K: Key>(slots: &mut [Option<K>], hash: &UniversalHash, keys: &[K]) -> bool {
    slots.fill(None);
    for &key in keys {
        let position = hash.position(key.to_word(), slots.len());
        if slots[position].is_some() {
            return false;
        }
        slots[position] = Some(key);
    }
    true
}

/// The collision-free table for one bucket.
///
/// For `m` keys the table holds exactly `m²` slots, so a freshly drawn hash
/// places all keys without collision with probability at least 1/2 and the
/// retry loop finishes quickly. A slot is either empty or holds one key;
/// a lookup is a hit only when the slot holds exactly the queried key, so a
/// hash collision with a stored key never reads as membership.
#[derive(Clone, Debug)]
pub struct InnerTable<K> {
    hash: UniversalHash,
    slots: Vec<Option<K>>,
}

impl<K: Key> InnerTable<K> {
    /// Builds the table for one bucket's keys.
    ///
    /// Keys must be distinct: two equal keys hash to the same slot under
    /// every function in the family, so no draw could ever be accepted.
    /// An empty bucket allocates zero slots and succeeds on the first draw.
    pub fn build<R: Rng>(keys: &[K], rng: &mut R) -> Self {
        let mut slots = vec![None; keys.len() * keys.len()];
        let hash = retry(rng, |h| try_place(&mut slots, &h, keys));
        Self { hash, slots }
    }

    /// Whether `key` is in this bucket.
    #[inline(always)]
    pub fn contains(&self, key: K) -> bool {
        if self.slots.is_empty() {
            return false;
        }
        let position = self.hash.position(key.to_word(), self.slots.len());
        self.slots[position] == Some(key)
    }

    pub(crate) fn slots(&self) -> &[Option<K>] {
        &self.slots
    }
}

/// The top-level table over the whole key set.
///
/// Holds one [`InnerTable`] per outer bucket, with exactly as many buckets
/// as keys. Once built it is immutable; lookups hash twice, touch one slot,
/// and never allocate.
#[derive(Clone, Debug)]
pub struct OuterTable<K> {
    hash: UniversalHash,
    buckets: Vec<InnerTable<K>>,
}

impl<K: Key> OuterTable<K> {
    /// Builds the full two-level structure over `keys`.
    ///
    /// Keys must be distinct (callers deduplicate first). Each outer
    /// attempt computes the bucket distribution and rejects the draw when
    /// the implied slot total exceeds [`MEMORY_REPLETION_RATIO`]` × n`,
    /// without building any inner table; an accepted draw then builds every
    /// bucket, which always succeeds. An empty key set yields zero buckets.
    pub fn build<R: Rng>(keys: &[K], rng: &mut R) -> Self {
        let n = keys.len();
        let mut groups: Vec<Vec<K>> = Vec::new();
        let hash = retry(rng, |h| {
            let counts = distribution(&h, keys, n);
            let slot_total: usize = counts.iter().map(|&count| count * count).sum();
            if slot_total > MEMORY_REPLETION_RATIO * n {
                return false;
            }
            groups = split_by_bucket(&h, keys, &counts);
            true
        });
        let buckets = groups
            .iter()
            .map(|group| InnerTable::build(group, rng))
            .collect();
        Self { hash, buckets }
    }

    /// Whether `key` is in the set.
    #[inline(always)]
    pub fn contains(&self, key: K) -> bool {
        if self.buckets.is_empty() {
            return false;
        }
        let bucket = self.hash.position(key.to_word(), self.buckets.len());
        self.buckets[bucket].contains(key)
    }

    /// Number of outer buckets (equal to the number of distinct keys).
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total slots across all inner tables. Bounded by
    /// [`MEMORY_REPLETION_RATIO`]` × `[`bucket_count`](Self::bucket_count)
    /// for every accepted build.
    pub fn slot_count(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.slots.len()).sum()
    }

    pub(crate) fn buckets(&self) -> &[InnerTable<K>] {
        &self.buckets
    }
}

/// Splits keys into their buckets under `hash`, pre-sizing each group from
/// the already-computed distribution.
fn split_by_bucket<K: Key>(hash: &UniversalHash, keys: &[K], counts: &[usize]) -> Vec<Vec<K>> {
    let mut groups: Vec<Vec<K>> = counts.iter().map(|&count| Vec::with_capacity(count)).collect();
    for &key in keys {
        groups[hash.position(key.to_word(), counts.len())].push(key);
    }
    groups
}
