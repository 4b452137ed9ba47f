//! # Sorted lists
//!
//! Wrapping a `Vec` of elements that is kept sorted by an integer key. Searching is a binary
//! search, inserting and deleting shift the tail of the array.
use std::iter::Rev;
use std::ops::Deref;
use std::slice::Iter;
use std::vec::IntoIter;

use itertools::Either;

pub mod algebra;

pub use algebra::{difference, merge, union};

/// An element that can be stored in a `SortedList`.
pub trait Keyed {
    /// Lists can only be combined with the set algebra of this module when their elements share
    /// this type.
    type Key: Ord + Copy;

    /// The key of this element.
    ///
    /// Should not change while the element is stored in a list.
    fn key(&self) -> Self::Key;
}

impl Keyed for i64 {
    type Key = i64;

    fn key(&self) -> Self::Key {
        *self
    }
}

/// Order in which a `SortedList` is visited.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Direction {
    /// By ascending key.
    Forward,
    /// By descending key.
    Backward,
}

/// A set of elements with unique keys, sorted by ascending key.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct SortedList<T> {
    data: Vec<T>,
}

impl<T> Default for SortedList<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T: Keyed> SortedList<T> {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty list that can hold `capacity` elements without reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { data: Vec::with_capacity(capacity) }
    }

    fn get_data_index(&self, key: T::Key) -> Result<usize, usize> {
        self.data.binary_search_by_key(&key, Keyed::key)
    }

    /// Get the element with a key, inserting a new one if it is not yet present.
    ///
    /// # Arguments
    ///
    /// * `key`: Key to search for.
    /// * `factory`: Called only if the key is absent. Should create an element with key `key`.
    ///
    /// # Return value
    ///
    /// The stored element, unchanged if it was already present, such that the caller can
    /// accumulate into it.
    pub fn insert_or_fetch(&mut self, key: T::Key, factory: impl FnOnce() -> T) -> &mut T {
        let index = match self.get_data_index(key) {
            Ok(index) => index,
            Err(index) => {
                let element = factory();
                debug_assert!(element.key() == key);
                self.data.insert(index, element);
                index
            }
        };

        &mut self.data[index]
    }

    /// Find the element with a key.
    pub fn lookup(&self, key: T::Key) -> Option<&T> {
        self.get_data_index(key).ok().map(|index| &self.data[index])
    }

    /// Find the element with a key for modification.
    ///
    /// The key of the element should not be changed.
    pub fn lookup_mut(&mut self, key: T::Key) -> Option<&mut T> {
        match self.get_data_index(key) {
            Ok(index) => Some(&mut self.data[index]),
            Err(_) => None,
        }
    }

    /// Whether an element with this key is stored.
    pub fn contains(&self, key: T::Key) -> bool {
        self.get_data_index(key).is_ok()
    }

    /// Take the element with a key out of the list, if it is there.
    pub fn remove(&mut self, key: T::Key) -> Option<T> {
        self.get_data_index(key).ok().map(|index| self.data.remove(index))
    }

    /// Take an element that is known to be present out of the list.
    ///
    /// # Panics
    ///
    /// If no element with this key is stored.
    pub fn delete(&mut self, key: T::Key) -> T {
        match self.get_data_index(key) {
            Ok(index) => self.data.remove(index),
            Err(_) => panic!("element to delete is not in the list"),
        }
    }

    /// Visit all elements in a direction.
    ///
    /// The returned iterator can be cloned to restart from the current position.
    pub fn iter_in(&self, direction: Direction) -> Either<Iter<'_, T>, Rev<Iter<'_, T>>> {
        match direction {
            Direction::Forward => Either::Left(self.data.iter()),
            Direction::Backward => Either::Right(self.data.iter().rev()),
        }
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = T::Key> + '_ {
        self.data.iter().map(Keyed::key)
    }
}

pub(crate) fn is_strictly_sorted<T: Keyed>(data: &[T]) -> bool {
    data.windows(2).all(|pair| pair[0].key() < pair[1].key())
}

impl<T> Deref for SortedList<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.data.deref()
    }
}

impl<T: Keyed> FromIterator<T> for SortedList<T> {
    /// Collect elements in any order.
    ///
    /// Of elements with equal keys, the first one is kept.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut data = iter.into_iter().collect::<Vec<_>>();
        data.sort_by_key(Keyed::key);
        data.dedup_by_key(|element| element.key());

        Self { data }
    }
}

impl<T> IntoIterator for SortedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SortedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
