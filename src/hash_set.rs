use core::fmt::Debug;
use core::fmt::Display;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::ops::BitAnd;
use core::ops::BitOr;
use core::ops::Sub;

use crate::DefaultHashBuilder;
use crate::hash_map::FlatHashMap;

/// A flat hash set storing its values as the keys of a [`FlatHashMap`] with
/// unit values.
///
/// Set algebra (`union`, `intersection`, `difference`) builds new sets and
/// is also available through the `|`, `&` and `-` operators on references.
///
/// # Examples
///
/// ```rust
/// use flat_hash::FlatHashSet;
///
/// let a: FlatHashSet<i32> = (1..=100).collect();
/// let b: FlatHashSet<i32> = (51..=150).collect();
///
/// assert_eq!(a.intersection(&b).len(), 50);
/// assert_eq!(a.union(&b).len(), 150);
/// assert_eq!((&a - &b).len(), 50);
/// ```
#[derive(Clone)]
pub struct FlatHashSet<T, S = DefaultHashBuilder> {
    map: FlatHashMap<T, (), S>,
}

impl<T, S> PartialEq for FlatHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Eq for FlatHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
}

impl<T, S> Debug for FlatHashSet<T, S>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Renders the values in slot order, joined with `", "`.
impl<T, S> Display for FlatHashSet<T, S>
where
    T: Display,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

impl<T, S> FlatHashSet<T, S> {
    /// Returns the number of values in the set.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no values.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of slots in the set. Always a multiple of 16.
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Returns a reference to the set's hasher builder.
    pub fn hasher(&self) -> &S {
        self.map.hasher()
    }

    /// Removes all values, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns an iterator over the values of the set, in slot order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.map.keys(),
        }
    }

    /// Removes all values from the set and returns them as an iterator.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain {
            inner: self.map.drain(),
        }
    }
}

impl<T, S> FlatHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a new hash set with the given hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates a new hash set with at least `capacity` slots and the given
    /// hasher builder.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            map: FlatHashMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Adds a value to the set.
    ///
    /// Returns `true` if the value was not already present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flat_hash::FlatHashSet;
    /// #
    /// let mut set = FlatHashSet::new();
    /// assert!(set.add(2));
    /// assert!(!set.add(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn add(&mut self, value: T) -> bool {
        self.map.put(value, ()).is_none()
    }

    /// Returns `true` if the set contains the value.
    pub fn contains(&self, value: &T) -> bool {
        self.map.contains(value)
    }

    /// Removes a value from the set. Returns `true` if it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.map.remove(value).is_some()
    }

    /// Returns a new set holding every value in `self` or `other`.
    ///
    /// The result uses a clone of `self`'s hasher builder.
    pub fn union(&self, other: &FlatHashSet<T, S>) -> Self
    where
        T: Clone,
        S: Clone,
    {
        let mut map = FlatHashMap::with_hasher(self.hasher().clone());
        map.merge_into(&other.map);
        map.merge_into(&self.map);
        Self { map }
    }

    /// Returns a new set holding the values present in both `self` and
    /// `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use flat_hash::FlatHashSet;
    /// #
    /// let a: FlatHashSet<_> = ["x", "y"].into_iter().collect();
    /// let b: FlatHashSet<_> = ["y", "z"].into_iter().collect();
    ///
    /// let both = a.intersection(&b);
    /// assert_eq!(both.len(), 1);
    /// assert!(both.contains(&"y"));
    /// ```
    pub fn intersection(&self, other: &FlatHashSet<T, S>) -> Self
    where
        T: Clone,
        S: Clone,
    {
        let mut set = Self::with_hasher(self.hasher().clone());
        for value in self.iter().filter(|v| other.contains(v)) {
            set.add(value.clone());
        }
        set
    }

    /// Returns a copy of `self` with every value of `other` removed.
    pub fn difference(&self, other: &FlatHashSet<T, S>) -> Self
    where
        T: Clone,
        S: Clone,
    {
        let mut map = self.map.clone();
        map.merge_remove(&other.map);
        Self { map }
    }

    /// Returns `true` if every value of `self` is in `other`.
    pub fn is_subset(&self, other: &FlatHashSet<T, S>) -> bool {
        self.len() <= other.len() && self.iter().all(|v| other.contains(v))
    }

    /// Returns `true` if `self` and `other` share no values.
    pub fn is_disjoint(&self, other: &FlatHashSet<T, S>) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().all(|v| !large.contains(v))
    }
}

#[cfg(any(feature = "foldhash", feature = "std"))]
impl<T> FlatHashSet<T, DefaultHashBuilder>
where
    T: Hash + Eq,
{
    /// Creates a new hash set with 16 slots using the default hasher builder.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates a new hash set with at least `capacity` slots using the
    /// default hasher builder.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<T, S> Default for FlatHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T, S> BitOr<&FlatHashSet<T, S>> for &FlatHashSet<T, S>
where
    T: Hash + Eq + Clone,
    S: BuildHasher + Clone,
{
    type Output = FlatHashSet<T, S>;

    fn bitor(self, rhs: &FlatHashSet<T, S>) -> Self::Output {
        self.union(rhs)
    }
}

impl<T, S> BitAnd<&FlatHashSet<T, S>> for &FlatHashSet<T, S>
where
    T: Hash + Eq + Clone,
    S: BuildHasher + Clone,
{
    type Output = FlatHashSet<T, S>;

    fn bitand(self, rhs: &FlatHashSet<T, S>) -> Self::Output {
        self.intersection(rhs)
    }
}

impl<T, S> Sub<&FlatHashSet<T, S>> for &FlatHashSet<T, S>
where
    T: Hash + Eq + Clone,
    S: BuildHasher + Clone,
{
    type Output = FlatHashSet<T, S>;

    fn sub(self, rhs: &FlatHashSet<T, S>) -> Self::Output {
        self.difference(rhs)
    }
}

/// An iterator over the values of a `FlatHashSet`.
pub struct Iter<'a, T> {
    inner: crate::hash_map::Keys<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// A draining iterator over the values of a `FlatHashSet`.
pub struct Drain<'a, T> {
    inner: crate::hash_map::Drain<'a, T, ()>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(v, ())| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

/// An owning iterator over the values of a `FlatHashSet`.
pub struct IntoIter<T> {
    inner: crate::hash_map::IntoIter<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(v, ())| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T, S> IntoIterator for FlatHashSet<T, S> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.map.into_iter(),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a FlatHashSet<T, S> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> FromIterator<T> for FlatHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for FlatHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}
