//! The raw SwissTable-style table underneath the map and set.
//!
//! `HashTable<V>` works on precomputed hashes and equality predicates, so it
//! can store any value type. Each slot has a control byte: `EMPTY`,
//! `TOMBSTONE`, or the 7-bit fingerprint of the stored hash. Lookups compare
//! the fingerprint against a whole 16-slot group at once and only touch slot
//! storage for lanes that match.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::marker::PhantomData;

use crate::control::ControlBytes;
use crate::control::EMPTY;
use crate::control::Status;
use crate::control::TOMBSTONE;
use crate::control::fingerprint;
use crate::group;
use crate::group::GROUP_WIDTH;
use crate::probe;
use crate::probe::Probe;

/// Resident entries allowed per group, on average, before the table grows.
const MAX_GROUP_LOAD: usize = 14;

#[inline(always)]
fn round_capacity(requested: usize) -> usize {
    requested
        .max(GROUP_WIDTH)
        .checked_next_multiple_of(GROUP_WIDTH)
        .expect("capacity overflow")
}

#[inline(always)]
fn load_limit(capacity: usize) -> usize {
    (capacity / GROUP_WIDTH) * MAX_GROUP_LOAD
}

/// Smallest capacity whose load limit admits `entries`.
#[inline(always)]
fn capacity_for(entries: usize) -> usize {
    round_capacity(
        entries
            .div_ceil(MAX_GROUP_LOAD)
            .checked_mul(GROUP_WIDTH)
            .expect("capacity overflow"),
    )
}

fn empty_slots<V>(capacity: usize) -> Box<[Option<Bucket<V>>]> {
    (0..capacity).map(|_| None).collect()
}

#[cold]
#[inline(never)]
fn control_desync(slot: usize) -> ! {
    panic!("control byte of slot {slot} is occupied but the slot is empty")
}

#[derive(Clone)]
struct Bucket<V> {
    hash: u64,
    value: V,
}

/// Debug statistics for hash table analysis.
///
/// Only available with the `stats` feature (or in tests).
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of entries currently in the table
    pub populated: usize,
    /// Total number of slots
    pub capacity: usize,
    /// Number of live entries plus tombstones that triggers a rehash
    pub limit: usize,
    /// Number of tombstoned slots
    pub tombstones: usize,
    /// Number of empty slots
    pub empty_slots: usize,
    /// Load factor (populated / capacity)
    pub load_factor: f64,
    /// Longest probe, in groups past the home group
    pub max_probe_length: usize,
    /// Total memory in bytes used by the control bytes and slots
    pub total_bytes: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor, limit {})",
            self.populated,
            self.capacity,
            self.load_factor * 100.0,
            self.limit
        );
        println!(
            "Slots: {} empty, {} tombstones",
            self.empty_slots, self.tombstones
        );
        println!("Longest probe: {} groups", self.max_probe_length);
        println!("Total Allocated: {} bytes", self.total_bytes);
    }
}

/// A flat hash table using SwissTable-style control bytes.
///
/// `HashTable<V>` stores values of type `V` and provides insertion, lookup,
/// and removal. Like other raw tables, it requires you to provide both the
/// hash value and an equality predicate for each operation. The hash must be
/// the same every time for a given value.
///
/// Capacity is counted in slots and is always a multiple of 16. The table
/// rehashes before an insert once live entries plus tombstones reach 14 per
/// group on average.
///
/// ## Example
///
/// ```rust
/// # use core::hash::Hash;
/// # use core::hash::Hasher;
/// #
/// # use flat_hash::hash_table::HashTable;
/// # use siphasher::sip::SipHasher;
/// #
/// # #[derive(Debug, PartialEq)]
/// # struct Person {
/// #     id: u64,
/// #     name: String,
/// # }
/// #
/// # fn hash_id(id: u64) -> u64 {
/// #     let mut hasher = SipHasher::new();
/// #     id.hash(&mut hasher);
/// #     hasher.finish()
/// # }
///
/// let mut table = HashTable::with_capacity(16);
/// let hash = hash_id(123);
///
/// match table.entry(hash, |p: &Person| p.id == 123) {
///     flat_hash::hash_table::Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     flat_hash::hash_table::Entry::Occupied(_) => {
///         println!("Person already exists");
///     }
/// }
/// ```
#[derive(Clone)]
pub struct HashTable<V> {
    control: ControlBytes,
    slots: Box<[Option<Bucket<V>>]>,

    resident: usize,
    removed: usize,
    limit: usize,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::format;
        use alloc::string::String;
        use alloc::string::ToString;

        f.debug_struct("HashTable")
            .field(
                "control",
                &self
                    .control
                    .as_bytes()
                    .chunks(GROUP_WIDTH)
                    .map(|group| {
                        group
                            .iter()
                            .map(|&byte| match Status::of(byte) {
                                Status::Empty => "..".to_string(),
                                Status::Tombstone => "xx".to_string(),
                                Status::Occupied(fp) => format!("{fp:02x}"),
                            })
                            .collect::<Vec<String>>()
                            .join(", ")
                    })
                    .collect::<Vec<_>>(),
            )
            .field("populated", &self.resident)
            .field("tombstones", &self.removed)
            .field("capacity", &self.capacity())
            .field("limit", &self.limit)
            .finish()
    }
}

impl<V> HashTable<V> {
    /// Creates a new hash table with at least `capacity` slots.
    ///
    /// The capacity is rounded up to a multiple of 16, with a minimum of 16.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flat_hash::hash_table::HashTable;
    /// #
    /// let table: HashTable<String> = HashTable::with_capacity(100);
    /// assert_eq!(table.capacity(), 112);
    ///
    /// let table: HashTable<String> = HashTable::with_capacity(0);
    /// assert_eq!(table.capacity(), 16);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = round_capacity(capacity);
        Self {
            control: ControlBytes::new(capacity),
            slots: empty_slots(capacity),
            resident: 0,
            removed: 0,
            limit: load_limit(capacity),
        }
    }

    /// Returns the number of elements in the table.
    pub fn len(&self) -> usize {
        self.resident
    }

    /// Returns `true` if the table contains no elements.
    pub fn is_empty(&self) -> bool {
        self.resident == 0
    }

    /// Returns the number of slots in the table.
    ///
    /// This is always a multiple of 16.
    pub fn capacity(&self) -> usize {
        self.control.len()
    }

    /// Returns the load limit. An insert rehashes the table first once live
    /// entries plus tombstones reach this value.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of tombstoned slots.
    pub fn tombstones(&self) -> usize {
        self.removed
    }

    #[inline(always)]
    fn bucket(&self, slot: usize) -> &Bucket<V> {
        match &self.slots[slot] {
            Some(bucket) => bucket,
            None => control_desync(slot),
        }
    }

    #[inline(always)]
    fn bucket_mut(&mut self, slot: usize) -> &mut Bucket<V> {
        match &mut self.slots[slot] {
            Some(bucket) => bucket,
            None => control_desync(slot),
        }
    }

    #[inline]
    fn probe(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Probe {
        probe::find(&self.control, hash, |slot| eq(&self.bucket(slot).value))
    }

    /// Finds a value in the table by hash and equality predicate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use flat_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_u64(n: u64) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     n.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(16);
    /// table.entry(hash_u64(42), |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.find(hash_u64(42), |&n| n == 42), Some(&42));
    /// assert_eq!(table.find(hash_u64(99), |&n| n == 99), None);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        match self.probe(hash, eq) {
            Probe::Found { slot, .. } => Some(&self.bucket(slot).value),
            Probe::Vacant { .. } => None,
        }
    }

    /// Finds a value in the table by hash and equality predicate, returning a
    /// mutable reference.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        match self.probe(hash, eq) {
            Probe::Found { slot, .. } => Some(&mut self.bucket_mut(slot).value),
            Probe::Vacant { .. } => None,
        }
    }

    /// Gets an entry for the given hash and equality predicate.
    ///
    /// If the table is at its load limit it is rehashed first, so a vacant
    /// entry always has room.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use flat_hash::hash_table::Entry;
    /// # use flat_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_str(s: &str) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     s.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(16);
    /// let hash = hash_str("hello");
    ///
    /// match table.entry(hash, |s: &String| s == "hello") {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert("hello".to_string());
    ///     }
    ///     Entry::Occupied(mut entry) => {
    ///         *entry.get_mut() = "updated".to_string();
    ///     }
    /// }
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        self.maybe_grow();
        self.entry_impl(hash, eq)
    }

    #[inline]
    fn entry_impl(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        match self.probe(hash, eq) {
            Probe::Found { slot, group } => Entry::Occupied(OccupiedEntry {
                table: self,
                slot,
                group,
            }),
            Probe::Vacant { slot, .. } => Entry::Vacant(VacantEntry {
                table: self,
                hash,
                slot,
            }),
        }
    }

    /// Removes a value from the table by hash and equality predicate.
    ///
    /// If more than half of the slots are tombstones, the table is rebuilt
    /// at the same capacity before searching.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use core::hash::Hash;
    /// # use core::hash::Hasher;
    /// #
    /// # use flat_hash::hash_table::HashTable;
    /// # use siphasher::sip::SipHasher;
    /// #
    /// # fn hash_u64(n: u64) -> u64 {
    /// #     let mut hasher = SipHasher::new();
    /// #     n.hash(&mut hasher);
    /// #     hasher.finish()
    /// # }
    /// #
    /// let mut table = HashTable::with_capacity(16);
    /// table.entry(hash_u64(42), |&n: &u64| n == 42).or_insert(42);
    ///
    /// assert_eq!(table.remove(hash_u64(42), |&n| n == 42), Some(42));
    /// assert!(table.is_empty());
    /// assert_eq!(table.remove(hash_u64(99), |&n| n == 99), None);
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        if self.removed > self.capacity() / 2 {
            self.rehash(self.capacity());
        }

        match self.entry_impl(hash, eq) {
            Entry::Occupied(entry) => Some(entry.remove()),
            Entry::Vacant(_) => None,
        }
    }

    // Tombstones count against the limit: like live entries, they never end
    // a probe, and only empty lanes are reused.
    #[inline]
    fn maybe_grow(&mut self) {
        if self.resident + self.removed >= self.limit {
            self.grow();
        }
    }

    #[cold]
    #[inline(never)]
    fn grow(&mut self) {
        let capacity = if self.removed >= self.resident {
            self.capacity()
        } else {
            self.capacity()
                .checked_mul(2)
                .expect("capacity overflow")
        };
        self.rehash(capacity);
    }

    /// Rebuilds the table with at least `capacity` slots.
    ///
    /// Every entry is re-probed into freshly allocated control bytes and
    /// slots, which then replace the old ones. Tombstones are discarded. The
    /// capacity is rounded up to a multiple of 16 and to whatever is needed
    /// to keep the current entries under the load limit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flat_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(16);
    /// for n in 0..10u64 {
    ///     table.entry(n, |&v: &u64| v == n).or_insert(n);
    /// }
    ///
    /// table.rehash(100);
    /// assert_eq!(table.capacity(), 112);
    /// assert_eq!(table.find(7, |&v| v == 7), Some(&7));
    ///
    /// // Never shrinks below what the entries need.
    /// table.rehash(0);
    /// assert_eq!(table.capacity(), 16);
    /// ```
    pub fn rehash(&mut self, capacity: usize) {
        let capacity = round_capacity(capacity).max(capacity_for(self.resident));

        let mut control = ControlBytes::new(capacity);
        let mut slots = empty_slots(capacity);
        for bucket in self.slots.iter_mut().filter_map(Option::take) {
            let slot = probe::find_insert_slot(&control, bucket.hash);
            control.set(slot, fingerprint(bucket.hash));
            slots[slot] = Some(bucket);
        }

        self.control = control;
        self.slots = slots;
        self.removed = 0;
        self.limit = load_limit(capacity);
    }

    /// Removes all elements from the table, keeping its capacity.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.control.reset();
        self.resident = 0;
        self.removed = 0;
    }

    /// Returns an iterator over all values in the table, in slot order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flat_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(16);
    /// table.entry(1, |&v: &u64| v == 1).or_insert(1);
    /// table.entry(2, |&v: &u64| v == 2).or_insert(2);
    ///
    /// let mut values: Vec<u64> = table.iter().copied().collect();
    /// values.sort();
    /// assert_eq!(values, [1, 2]);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            table: self,
            slot: 0,
            remaining: self.resident,
        }
    }

    /// Returns an iterator that removes and yields all values from the table.
    ///
    /// The table keeps its capacity. Any values not consumed are dropped
    /// when the iterator is.
    pub fn drain(&mut self) -> Drain<'_, V> {
        let capacity = self.capacity();
        let slots = core::mem::replace(&mut self.slots, empty_slots(capacity));
        self.control = ControlBytes::new(capacity);
        let remaining = core::mem::take(&mut self.resident);
        self.removed = 0;

        Drain {
            inner: slots.into_vec().into_iter(),
            remaining,
            marker: PhantomData,
        }
    }

    /// Computes a histogram of probe lengths for the current table state.
    ///
    /// Entry `n` counts the values stored `n` groups past their home group.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> Vec<usize> {
        let mut hist = alloc::vec![0usize; 1];
        let groups = self.control.num_groups();

        for (slot, bucket) in self.slots.iter().enumerate() {
            let Some(bucket) = bucket else { continue };
            let home = self.control.home_group(bucket.hash) / GROUP_WIDTH;
            let distance = (slot / GROUP_WIDTH + groups - home) % groups;
            if hist.len() <= distance {
                hist.resize(distance + 1, 0);
            }
            hist[distance] += 1;
        }

        hist
    }

    /// Returns performance and utilization statistics for debugging.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        DebugStats {
            populated: self.resident,
            capacity: self.capacity(),
            limit: self.limit,
            tombstones: self.removed,
            empty_slots: self.control.count(EMPTY),
            load_factor: self.resident as f64 / self.capacity() as f64,
            max_probe_length: self.probe_histogram().len() - 1,
            total_bytes: self.capacity()
                * (core::mem::size_of::<u8>() + core::mem::size_of::<Option<Bucket<V>>>()),
        }
    }

    /// Panics unless the control bytes, slots and counters agree.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let capacity = self.capacity();
        assert!(capacity >= GROUP_WIDTH && capacity % GROUP_WIDTH == 0);
        assert_eq!(self.slots.len(), capacity);
        assert_eq!(self.limit, load_limit(capacity));
        assert!(self.resident <= self.limit, "{self:#?}");

        let mut occupied = 0;
        for slot in 0..capacity {
            match Status::of(self.control.get(slot)) {
                Status::Occupied(fp) => {
                    occupied += 1;
                    let bucket = self.slots[slot].as_ref().expect("occupied slot is empty");
                    assert_eq!(fp, fingerprint(bucket.hash), "slot {slot}");
                }
                Status::Empty | Status::Tombstone => {
                    assert!(self.slots[slot].is_none(), "slot {slot}");
                }
            }
        }
        assert_eq!(occupied, self.resident);
        assert_eq!(self.control.count(TOMBSTONE), self.removed);
        assert!(self.control.count(EMPTY) > 0, "{self:#?}");
    }
}

impl<V> IntoIterator for HashTable<V> {
    type IntoIter = IntoIter<V>;
    type Item = V;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            remaining: self.resident,
            inner: self.slots.into_vec().into_iter(),
        }
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type IntoIter = Iter<'a, V>;
    type Item = &'a V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A view into a single entry in the hash table, which may be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashTable`].
///
/// [`entry`]: HashTable::entry
pub enum Entry<'a, V> {
    /// A vacant entry - the value is not present in the table
    Vacant(VacantEntry<'a, V>),
    /// An occupied entry - the value is present in the table
    Occupied(OccupiedEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flat_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(16);
    ///
    /// let value = table.entry(7, |s: &String| s == "key").or_insert("key".to_string());
    /// assert_eq!(value, "key");
    ///
    /// let existing = table.entry(7, |s: &String| s == "key").or_insert("other".to_string());
    /// assert_eq!(existing, "key");
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the value computed by `default` if the entry is vacant and
    /// returns a mutable reference to the value in the entry.
    ///
    /// The closure is only called for vacant entries.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Applies `f` to the value of an occupied entry.
    ///
    /// Returns `None` without inserting anything if the entry is vacant.
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Option<&'a mut V> {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Some(entry.into_mut())
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Inserts `V::default()` if the entry is vacant and returns a mutable
    /// reference to the value in the entry.
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the hash table.
///
/// Holds the empty slot the probe stopped at.
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: u64,
    slot: usize,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Inserts a value into the vacant entry and returns a mutable reference
    /// to it.
    pub fn insert(self, value: V) -> &'a mut V {
        let table = self.table;
        debug_assert_eq!(table.control.get(self.slot), EMPTY);

        table.control.set(self.slot, fingerprint(self.hash));
        table.resident += 1;
        &mut table.slots[self.slot]
            .insert(Bucket {
                hash: self.hash,
                value,
            })
            .value
    }
}

/// A view into an occupied entry in the hash table.
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    slot: usize,
    group: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.table.bucket(self.slot).value
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.table.bucket_mut(self.slot).value
    }

    /// Converts the entry into a mutable reference to the value with the
    /// lifetime of the table borrow.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.table.bucket_mut(self.slot).value
    }

    /// Replaces the value in the entry, returning the old one.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(self.get_mut(), value)
    }

    /// Removes the entry from the table and returns the value.
    ///
    /// The slot becomes empty when the group the lookup stopped in still has
    /// an empty lane, since every probe through that group already ends
    /// there. Otherwise it becomes a tombstone so later probes keep going.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flat_hash::hash_table::Entry;
    /// # use flat_hash::hash_table::HashTable;
    /// #
    /// let mut table = HashTable::with_capacity(16);
    /// table.entry(3, |&v: &u64| v == 3).or_insert(3);
    ///
    /// let removed = match table.entry(3, |&v| v == 3) {
    ///     Entry::Occupied(entry) => entry.remove(),
    ///     Entry::Vacant(_) => unreachable!(),
    /// };
    /// assert_eq!(removed, 3);
    /// assert!(table.is_empty());
    /// assert_eq!(table.tombstones(), 0);
    /// ```
    pub fn remove(self) -> V {
        let table = self.table;

        let window = table.control.group_at(self.group);
        if group::match_byte(EMPTY, &window) != 0 {
            table.control.set(self.slot, EMPTY);
        } else {
            table.control.set(self.slot, TOMBSTONE);
            table.removed += 1;
        }
        table.resident -= 1;

        match table.slots[self.slot].take() {
            Some(bucket) => bucket.value,
            None => control_desync(self.slot),
        }
    }
}

/// An iterator over the values in a [`HashTable`], in slot order.
///
/// This struct is created by the [`iter`] method on [`HashTable`].
///
/// [`iter`]: HashTable::iter
pub struct Iter<'a, V> {
    table: &'a HashTable<V>,
    slot: usize,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        while self.slot < self.table.capacity() {
            let slot = self.slot;
            self.slot += 1;
            if self.table.control.is_occupied(slot) {
                self.remaining -= 1;
                return Some(&self.table.bucket(slot).value);
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// A draining iterator over the values in a [`HashTable`].
///
/// This struct is created by the [`drain`] method on [`HashTable`]. The
/// table is emptied when the iterator is created, so leaking it leaves an
/// empty table behind.
///
/// [`drain`]: HashTable::drain
pub struct Drain<'a, V> {
    inner: alloc::vec::IntoIter<Option<Bucket<V>>>,
    remaining: usize,
    marker: PhantomData<&'a mut HashTable<V>>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.inner.by_ref().flatten().next()?.value;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Drain<'_, V> {}

/// An owning iterator over the values of a [`HashTable`].
pub struct IntoIter<V> {
    inner: alloc::vec::IntoIter<Option<Bucket<V>>>,
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.inner.by_ref().flatten().next()?.value;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
