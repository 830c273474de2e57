use core::fmt::Debug;
use core::fmt::Display;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::DefaultHashBuilder;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;

/// A flat hash map storing `(K, V)` pairs inline in a SwissTable-style
/// [`HashTable`].
///
/// `FlatHashMap<K, V, S>` stores key-value pairs where keys implement
/// `Hash + Eq` and uses a configurable hasher builder `S` to hash keys. Each
/// slot has a one-byte control code holding a 7-bit fingerprint of its hash,
/// so most misses are rejected 16 slots at a time without touching the
/// entries themselves.
///
/// # Performance Characteristics
///
/// - **Memory**: 1 control byte per slot, plus the size of `(K, V)` and a u64
///   for the hash
/// - **Load**: at most 14 live entries per 16-slot group before growing
#[derive(Clone)]
pub struct FlatHashMap<K, V, S = DefaultHashBuilder> {
    table: HashTable<(K, V)>,
    hash_builder: S,
}

impl<K, V, S> Debug for FlatHashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders resident pairs in slot order followed by the current capacity.
///
/// ```rust
/// use flat_hash::FlatHashMap;
///
/// let mut map = FlatHashMap::new();
/// map.put("a", 1);
/// assert_eq!(map.to_string(), "{a: 1} (capacity: 16)");
/// ```
impl<K, V, S> Display for FlatHashMap<K, V, S>
where
    K: Display,
    V: Display,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        write!(f, "}} (capacity: {})", self.capacity())
    }
}

impl<K, V, S> FlatHashMap<K, V, S> {
    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flat_hash::FlatHashMap;
    /// #
    /// let mut map = FlatHashMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.put(1, "a");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of slots in the map.
    ///
    /// Always a multiple of 16. The map holds at most `capacity / 16 * 14`
    /// entries before its next insert grows it.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes all key-value pairs, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns an iterator over the key-value pairs of the map.
    ///
    /// Pairs are yielded in slot order, which depends on the hasher and on
    /// the history of the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flat_hash::FlatHashMap;
    /// #
    /// let mut map = FlatHashMap::new();
    /// map.put(1, "a");
    /// map.put(2, "b");
    ///
    /// let mut pairs: Vec<_> = map.iter().collect();
    /// pairs.sort();
    /// assert_eq!(pairs, [(&1, &"a"), (&2, &"b")]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the keys of the map.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Removes all key-value pairs from the map and returns them as an
    /// iterator.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
        }
    }

    #[cfg(test)]
    pub(crate) fn raw_table(&self) -> &HashTable<(K, V)> {
        &self.table
    }
}

impl<K, V, S> FlatHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a new hash map with the given hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use flat_hash::FlatHashMap;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let map: FlatHashMap<i32, String, _> = FlatHashMap::with_hasher(SimpleHasher);
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 16);
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates a new hash map with at least `capacity` slots and the given
    /// hasher builder.
    ///
    /// The capacity is rounded up to a multiple of 16.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::BuildHasher;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # use flat_hash::FlatHashMap;
    /// #
    /// # struct SimpleHasher;
    /// # impl BuildHasher for SimpleHasher {
    /// #     type Hasher = SipHasher;
    /// #
    /// #     fn build_hasher(&self) -> Self::Hasher {
    /// #         SipHasher::new()
    /// #     }
    /// # }
    /// #
    /// let map: FlatHashMap<i32, String, _> =
    ///     FlatHashMap::with_capacity_and_hasher(100, SimpleHasher);
    /// assert_eq!(map.capacity(), 112);
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the key was already present, only its value is replaced and the
    /// previous value is returned. If the map is at its load limit it is
    /// rehashed before the insert.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flat_hash::FlatHashMap;
    /// #
    /// let mut map = FlatHashMap::new();
    /// assert_eq!(map.put(37, "a"), None);
    /// assert_eq!(map.put(37, "b"), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_builder.hash_one(&key);
        match self.table.entry(hash, |(k, _)| k == &key) {
            TableEntry::Occupied(mut entry) => {
                Some(core::mem::replace(&mut entry.get_mut().1, value))
            }
            TableEntry::Vacant(entry) => {
                entry.insert((key, value));
                None
            }
        }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flat_hash::FlatHashMap;
    /// #
    /// let mut map = FlatHashMap::new();
    /// map.put(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = self.hash_builder.hash_one(key);
        self.table.find(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hash_builder.hash_one(key);
        self.table.find_mut(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes a key from the map, returning the value if it was present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flat_hash::FlatHashMap;
    /// #
    /// let mut map = FlatHashMap::new();
    /// map.put(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// assert!(!map.contains(&1));
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was present.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.hash_builder.hash_one(key);
        self.table.remove(hash, |(k, _)| k == key)
    }

    /// Rebuilds the map with at least `capacity` slots, dropping all
    /// tombstones.
    ///
    /// Never shrinks below what the current entries need.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flat_hash::FlatHashMap;
    /// #
    /// let mut map = FlatHashMap::new();
    /// map.put("x", 1);
    /// map.rehash(200);
    /// assert_eq!(map.capacity(), 208);
    /// assert_eq!(map.get(&"x"), Some(&1));
    /// ```
    pub fn rehash(&mut self, capacity: usize) {
        self.table.rehash(capacity);
    }

    /// Puts a clone of every pair of `other` into this map.
    ///
    /// Keys already present take the value from `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flat_hash::FlatHashMap;
    /// #
    /// let mut a = FlatHashMap::new();
    /// a.put(1, "one");
    /// a.put(2, "two");
    ///
    /// let mut b = FlatHashMap::new();
    /// b.put(2, "deux");
    /// b.put(3, "trois");
    ///
    /// a.merge_into(&b);
    /// assert_eq!(a.len(), 3);
    /// assert_eq!(a.get(&2), Some(&"deux"));
    /// ```
    pub fn merge_into<S2>(&mut self, other: &FlatHashMap<K, V, S2>)
    where
        K: Clone,
        V: Clone,
    {
        for (k, v) in other.iter() {
            self.put(k.clone(), v.clone());
        }
    }

    /// Removes every key of `other` from this map.
    ///
    /// Only the keys of `other` are used, so its value type is unrelated.
    pub fn merge_remove<W, S2>(&mut self, other: &FlatHashMap<K, W, S2>) {
        for k in other.keys() {
            self.remove(k);
        }
    }
}

#[cfg(any(feature = "foldhash", feature = "std"))]
impl<K, V> FlatHashMap<K, V, DefaultHashBuilder>
where
    K: Hash + Eq,
{
    /// Creates a new hash map with 16 slots using the default hasher builder.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates a new hash map with at least `capacity` slots using the
    /// default hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flat_hash::FlatHashMap;
    /// #
    /// let map: FlatHashMap<i32, String> = FlatHashMap::with_capacity(20);
    /// assert_eq!(map.capacity(), 32);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> Default for FlatHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> PartialEq for FlatHashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for FlatHashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Extend<(K, V)> for FlatHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for FlatHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a FlatHashMap<K, V, S> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for FlatHashMap<K, V, S> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

/// An iterator over the key-value pairs of a `FlatHashMap`.
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// An iterator over the keys of a `FlatHashMap`.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// An iterator over the values of a `FlatHashMap`.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// A draining iterator over the key-value pairs of a `FlatHashMap`.
pub struct Drain<'a, K, V> {
    inner: crate::hash_table::Drain<'a, (K, V)>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Drain<'_, K, V> {}

/// An owning iterator over the key-value pairs of a `FlatHashMap`.
pub struct IntoIter<K, V> {
    inner: crate::hash_table::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;
    use core::hash::Hasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone)]
    struct SipHashBuilder {
        k1: u64,
        k2: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k1, self.k2)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k1: rng.try_next_u64().unwrap_or(0),
                k2: rng.try_next_u64().unwrap_or(0),
            }
        }
    }

    /// Hashes every key to 10^16, so all keys share one home group and one
    /// fingerprint.
    #[derive(Clone, Default)]
    struct CollidingState;

    struct CollidingHasher;

    impl Hasher for CollidingHasher {
        fn finish(&self) -> u64 {
            10u64.pow(16)
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    impl BuildHasher for CollidingState {
        type Hasher = CollidingHasher;

        fn build_hasher(&self) -> Self::Hasher {
            CollidingHasher
        }
    }

    fn sip_map<K: Hash + Eq, V>(capacity: usize) -> FlatHashMap<K, V, SipHashBuilder> {
        FlatHashMap::with_capacity_and_hasher(capacity, SipHashBuilder::default())
    }

    #[test]
    fn test_new_and_with_hasher() {
        let map: FlatHashMap<i32, String> = FlatHashMap::new();
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 16);

        let map2 = FlatHashMap::<i32, String, _>::with_hasher(SipHashBuilder::default());
        assert!(map2.is_empty());
        assert_eq!(map2.len(), 0);
    }

    #[test]
    fn test_with_capacity() {
        let map: FlatHashMap<i32, String> = FlatHashMap::with_capacity(100);
        assert_eq!(map.capacity(), 112);

        let map2 = sip_map::<i32, String>(0);
        assert_eq!(map2.capacity(), 16);

        let map3 = sip_map::<i32, String>(48);
        assert_eq!(map3.capacity(), 48);
    }

    #[test]
    fn put_then_overwrite() {
        let mut map = sip_map(16);
        assert_eq!(map.put("a", 1), None);
        assert_eq!(map.len(), 1);
        assert!(map.contains(&"a"));

        assert_eq!(map.put("a", 2), Some(1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&"a"), Some(&2));
        assert_eq!(map.get(&"b"), None);
    }

    #[test]
    fn test_get_mut() {
        let mut map = sip_map(0);
        map.put(1, "hello".to_string());

        if let Some(value) = map.get_mut(&1) {
            value.push_str(" world");
        }

        assert_eq!(map.get(&1), Some(&"hello world".to_string()));
        assert_eq!(map.get_mut(&2), None);
    }

    #[test]
    fn test_remove() {
        let mut map = sip_map(0);
        map.put(1, "hello".to_string());
        map.put(2, "world".to_string());

        assert_eq!(map.remove(&1), Some("hello".to_string()));
        assert_eq!(map.len(), 1);
        assert!(!map.contains(&1));
        assert_eq!(map.get(&1), None);
        assert!(map.contains(&2));

        assert_eq!(map.remove(&1), None);
        assert_eq!(map.remove(&3), None);

        assert_eq!(map.remove_entry(&2), Some((2, "world".to_string())));
        assert!(map.is_empty());
    }

    #[test]
    fn growth_keeps_every_key() {
        let mut map = sip_map(16);
        for i in 0..250u32 {
            assert_eq!(map.put(format!("key-{i}"), i), None);
            assert!(map.len() <= map.capacity() / 16 * 14);
            assert_eq!(map.capacity() % 16, 0);
            for j in 0..=i {
                assert_eq!(map.get(&format!("key-{j}")), Some(&j), "{i}");
            }
        }
        assert_eq!(map.len(), 250);
        map.raw_table().assert_invariants();
    }

    #[test]
    fn reinsert_after_removing_everything() {
        let mut map = sip_map(16);
        for i in 0..10 {
            map.put(i, i);
        }
        for i in 0..10 {
            assert_eq!(map.remove(&i), Some(i));
        }
        assert!(map.is_empty());

        for i in 10..20 {
            map.put(i, i);
        }
        assert_eq!(map.len(), 10);
        for i in 0..10 {
            assert!(!map.contains(&i));
        }
        for i in 10..20 {
            assert_eq!(map.get(&i), Some(&i));
        }
        map.raw_table().assert_invariants();
    }

    #[test]
    fn colliding_keys_are_independent() {
        let mut map = FlatHashMap::with_capacity_and_hasher(16, CollidingState);
        for i in 0..100 {
            map.put(i, i * 3);
        }
        assert_eq!(map.len(), 100);
        for i in 0..100 {
            assert_eq!(map.get(&i), Some(&(i * 3)));
        }

        for i in (0..100).filter(|i| i % 3 == 0) {
            assert_eq!(map.remove(&i), Some(i * 3));
        }
        for i in 0..100 {
            assert_eq!(map.contains(&i), i % 3 != 0, "{i}");
        }
        map.raw_table().assert_invariants();
    }

    #[test]
    fn tombstone_churn_terminates() {
        let mut map = FlatHashMap::with_capacity_and_hasher(32, CollidingState);
        for round in 0..50u64 {
            for i in 0..20 {
                map.put(round * 100 + i, i);
            }
            for i in 0..20 {
                assert_eq!(map.remove(&(round * 100 + i)), Some(i));
            }
            assert!(map.is_empty());
            map.raw_table().assert_invariants();
        }
        assert!(map.capacity() <= 64);
    }

    #[test]
    fn tombstones_count_against_load_limit() {
        let mut map = FlatHashMap::with_capacity_and_hasher(32, CollidingState);
        for i in 0..16 {
            map.put(i, ());
        }
        for i in 0..8 {
            map.remove(&i);
        }
        assert_eq!(map.raw_table().tombstones(), 8);

        for i in 100..120 {
            map.put(i, ());
        }
        assert_eq!(map.len(), 28);
        for i in (8..16).chain(100..120) {
            assert!(map.contains(&i));
        }
        map.raw_table().assert_invariants();
    }

    #[test]
    fn rehash_preserves_entries() {
        let mut map = sip_map(0);
        for i in 0..50 {
            map.put(i, i.to_string());
        }
        map.rehash(1000);
        assert_eq!(map.capacity(), 1008);
        map.rehash(0);
        assert_eq!(map.capacity(), 64);
        for i in 0..50 {
            assert_eq!(map.get(&i), Some(&i.to_string()));
        }
        map.raw_table().assert_invariants();
    }

    #[test]
    fn merge_into_and_remove() {
        let mut a = sip_map(0);
        let mut b = FlatHashMap::with_hasher(CollidingState);
        for i in 0..10 {
            a.put(i, i);
        }
        for i in 5..15 {
            b.put(i, i * 10);
        }

        a.merge_into(&b);
        assert_eq!(a.len(), 15);
        assert_eq!(a.get(&4), Some(&4));
        assert_eq!(a.get(&5), Some(&50));
        assert_eq!(a.get(&14), Some(&140));

        let mut names: FlatHashMap<i32, &str, _> =
            FlatHashMap::with_hasher(SipHashBuilder::default());
        names.put(0, "zero");
        names.put(14, "fourteen");
        names.put(99, "missing");
        a.merge_remove(&names);
        assert_eq!(a.len(), 13);
        assert!(!a.contains(&0));
        assert!(!a.contains(&14));
    }

    #[test]
    fn test_iterators() {
        let mut map = sip_map(0);
        map.put(1, "one".to_string());
        map.put(2, "two".to_string());
        map.put(3, "three".to_string());

        assert_eq!(map.iter().len(), 3);
        let pairs: std::collections::HashMap<i32, String> =
            map.iter().map(|(k, v)| (*k, v.clone())).collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs.get(&2), Some(&"two".to_string()));

        assert_eq!(map.keys().size_hint(), (3, Some(3)));
        assert_eq!(map.values().len(), 3);
        let keys: std::collections::HashSet<i32> = map.keys().copied().collect();
        assert_eq!(keys, [1, 2, 3].into_iter().collect());

        let values: std::collections::HashSet<String> = map.values().cloned().collect();
        assert!(values.contains("three"));

        let mut owned: Vec<(i32, String)> = map.clone().into_iter().collect();
        owned.sort();
        assert_eq!(owned[0], (1, "one".to_string()));
        assert_eq!(owned.len(), 3);

        let mut count = 0;
        for (_k, _v) in &map {
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[test]
    fn test_drain() {
        let mut map = sip_map(0);
        for i in 0..30 {
            map.put(i, i * 2);
        }
        let capacity = map.capacity();

        let drained: std::collections::HashMap<i32, i32> = map.drain().collect();
        assert_eq!(drained.len(), 30);
        assert_eq!(drained.get(&7), Some(&14));
        assert!(map.is_empty());
        assert_eq!(map.capacity(), capacity);
        map.raw_table().assert_invariants();
    }

    #[test]
    fn leaked_drain_leaves_empty_table() {
        let mut map = FlatHashMap::with_capacity_and_hasher(32, CollidingState);
        for i in 0..20 {
            map.put(i, i);
        }

        let mut drain = map.drain();
        assert_eq!(drain.len(), 20);
        assert!(drain.next().is_some());
        assert_eq!(drain.len(), 19);
        core::mem::forget(drain);

        assert!(map.is_empty());
        assert_eq!(map.capacity(), 32);
        map.raw_table().assert_invariants();
        for i in 0..20 {
            assert!(!map.contains(&i));
        }

        for i in 0..20 {
            assert_eq!(map.put(i, i + 1), None);
        }
        assert_eq!(map.put(19, 0), Some(20));
        assert_eq!(map.len(), 20);
        assert_eq!(map.keys().filter(|&&k| k == 19).count(), 1);
        map.raw_table().assert_invariants();
    }

    #[test]
    fn test_clear() {
        let mut map = sip_map(0);
        map.put(1, "hello".to_string());
        map.put(2, "world".to_string());

        map.clear();
        assert!(map.is_empty());
        assert!(!map.contains(&1));
        assert!(!map.contains(&2));
    }

    #[test]
    fn display_lists_pairs_and_capacity() {
        let mut map = sip_map(16);
        assert_eq!(map.to_string(), "{} (capacity: 16)");

        map.put("k", 7);
        assert_eq!(map.to_string(), "{k: 7} (capacity: 16)");

        map.put("j", 8);
        let rendered = map.to_string();
        assert!(
            rendered == "{k: 7, j: 8} (capacity: 16)" || rendered == "{j: 8, k: 7} (capacity: 16)",
            "{rendered}"
        );
        assert!(format!("{map:?}").contains("\"k\": 7"));
    }

    #[test]
    fn equality_ignores_layout() {
        let a: FlatHashMap<i32, i32, SipHashBuilder> = (0..40).map(|i| (i, i)).collect();
        let mut b = sip_map(256);
        b.extend((0..40).rev().map(|i| (i, i)));
        assert_eq!(a, b);

        b.put(0, 1);
        assert_ne!(a, b);
        b.put(0, 0);
        b.put(40, 40);
        assert_ne!(a, b);
    }

    #[test]
    fn test_complex_values() {
        let mut map = sip_map(0);

        let vec1 = vec![1, 2, 3];
        let vec2 = vec![4, 5, 6];

        map.put("first".to_string(), vec1.clone());
        map.put("second".to_string(), vec2.clone());

        assert_eq!(map.get(&"first".to_string()), Some(&vec1));
        assert_eq!(map.get(&"second".to_string()), Some(&vec2));

        if let Some(v) = map.get_mut(&"first".to_string()) {
            v.push(4);
        }

        assert_eq!(map.get(&"first".to_string()), Some(&vec![1, 2, 3, 4]));
    }
}
