use core::fmt::Debug;

use alloc::vec::Vec;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::hash::Key;
use crate::table::InnerTable;
use crate::table::OuterTable;

/// Seed used by [`FixedSet::from_keys`], so default builds are reproducible
/// across runs and platforms given the same rand version.
const DEFAULT_SEED: u64 = 42;

/// A build-once, read-many membership set over integer keys, backed by the
/// two-level FKS perfect-hash scheme.
///
/// `FixedSet<K>` stores keys of any primitive integer type `K`. Construction
/// takes the whole key collection up front (duplicates collapse to one
/// membership) and always succeeds; afterwards the set is immutable and
/// [`contains`](FixedSet::contains) answers in worst-case O(1) time with no
/// false positives or negatives, for every possible key value.
///
/// # Performance characteristics
///
/// - **Lookup**: two hash evaluations and one slot read, worst case.
/// - **Memory**: at most 4 slots per distinct key, plus per-bucket overhead.
/// - **Build**: O(n) expected time; randomized, but reproducible for a
///   fixed seed.
#[derive(Clone)]
pub struct FixedSet<K> {
    table: OuterTable<K>,
    len: usize,
}

impl<K: Key> FixedSet<K> {
    /// Builds a set from `keys` using the crate's fixed default seed.
    ///
    /// Never fails, for any finite key collection: duplicates collapse to a
    /// single membership and an empty collection yields a set that reports
    /// every key absent. Two builds from the same keys behave identically
    /// for every query.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fks_set::FixedSet;
    ///
    /// let set = FixedSet::from_keys([1i64, 2, 3]);
    /// assert!(set.contains(1));
    /// assert!(!set.contains(4));
    /// assert!(set.contains(2));
    /// assert!(!set.contains(10));
    /// ```
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        Self::with_seed(keys, DEFAULT_SEED)
    }

    /// Builds a set from `keys` with a caller-chosen seed.
    ///
    /// Useful when several sets should draw distinct hash functions, or when
    /// a test needs a particular reproducible construction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fks_set::FixedSet;
    ///
    /// let a = FixedSet::with_seed([10u32, 20, 30], 7);
    /// let b = FixedSet::with_seed([10u32, 20, 30], 7);
    /// for key in 0..100 {
    ///     assert_eq!(a.contains(key), b.contains(key));
    /// }
    /// ```
    pub fn with_seed<I>(keys: I, seed: u64) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::with_rng(keys, &mut rng)
    }

    /// Builds a set from `keys`, drawing all hash functions from `rng`.
    ///
    /// The generator is the build's only source of randomness; the
    /// construction is otherwise deterministic, so a seeded generator gives
    /// a reproducible structure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rand::SeedableRng;
    /// use rand::rngs::SmallRng;
    ///
    /// use fks_set::FixedSet;
    ///
    /// let mut rng = SmallRng::seed_from_u64(1);
    /// let set = FixedSet::with_rng([-3i32, 0, 3], &mut rng);
    /// assert!(set.contains(-3));
    /// assert!(!set.contains(2));
    /// ```
    pub fn with_rng<I, R>(keys: I, rng: &mut R) -> Self
    where
        I: IntoIterator<Item = K>,
        R: Rng,
    {
        let mut keys: Vec<K> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();
        let table = OuterTable::build(&keys, rng);
        Self {
            table,
            len: keys.len(),
        }
    }

    /// Returns `true` if the set contains `key`.
    ///
    /// Total over all values of `K`, including keys never seen at build
    /// time; never panics and never allocates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fks_set::FixedSet;
    ///
    /// let set = FixedSet::from_keys([5i64, 5, 5]);
    /// assert!(set.contains(5));
    /// assert!(!set.contains(6));
    /// ```
    #[inline(always)]
    pub fn contains(&self, key: K) -> bool {
        self.table.contains(key)
    }

    /// Returns the number of distinct keys in the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fks_set::FixedSet;
    ///
    /// let set = FixedSet::from_keys([5i64, 5, 5]);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set contains no keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fks_set::FixedSet;
    ///
    /// let set: FixedSet<i64> = FixedSet::from_keys([]);
    /// assert!(set.is_empty());
    /// assert!(!set.contains(0));
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an iterator over the keys of the set, in arbitrary order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fks_set::FixedSet;
    ///
    /// let set = FixedSet::from_keys([1u8, 2, 3]);
    /// let mut keys: Vec<u8> = set.iter().collect();
    /// keys.sort_unstable();
    /// assert_eq!(keys, [1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            buckets: self.table.buckets().iter(),
            slots: [].iter(),
        }
    }

    /// Number of outer buckets, equal to the number of distinct keys.
    #[cfg(any(test, feature = "stats"))]
    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }

    /// Total slots allocated across all inner tables. For every build this
    /// stays within [`MEMORY_REPLETION_RATIO`](crate::table::MEMORY_REPLETION_RATIO)
    /// times the number of distinct keys.
    #[cfg(any(test, feature = "stats"))]
    pub fn slot_count(&self) -> usize {
        self.table.slot_count()
    }
}

impl<K: Key> Default for FixedSet<K> {
    fn default() -> Self {
        Self::from_keys(core::iter::empty())
    }
}

impl<K: Key> FromIterator<K> for FixedSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}

impl<K: Key> PartialEq for FixedSet<K> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|key| other.contains(key))
    }
}

impl<K: Key> Eq for FixedSet<K> {}

impl<K: Key + Debug> Debug for FixedSet<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, K: Key> IntoIterator for &'a FixedSet<K> {
    type Item = K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the keys of a [`FixedSet`], in arbitrary order.
pub struct Iter<'a, K> {
    buckets: core::slice::Iter<'a, InnerTable<K>>,
    slots: core::slice::Iter<'a, Option<K>>,
}

impl<K: Key> Iterator for Iter<'_, K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            for slot in self.slots.by_ref() {
                if let Some(key) = slot {
                    return Some(*key);
                }
            }
            self.slots = self.buckets.next()?.slots().iter();
        }
    }
}
