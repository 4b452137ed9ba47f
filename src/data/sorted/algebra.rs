//! # Set algebra
//!
//! Linear co-scans of two sorted lists whose elements share a key type.
use itertools::{EitherOrBoth, Itertools};

use crate::data::sorted::{Keyed, SortedList, is_strictly_sorted};

/// Elements of both lists that share a key, as pairs.
///
/// The lists may store different element types, such as a query vector and a document vector.
///
/// # Return value
///
/// Pairs by ascending key. Runs in `O(left.len() + right.len())`.
pub fn union<'a, A, B, K>(
    left: &'a SortedList<A>,
    right: &'a SortedList<B>,
) -> impl Iterator<Item = (&'a A, &'a B)> + 'a
where
    A: Keyed<Key = K>,
    B: Keyed<Key = K>,
    K: Ord + Copy,
{
    debug_assert!(is_strictly_sorted(left));
    debug_assert!(is_strictly_sorted(right));

    left.iter()
        .merge_join_by(right.iter(), |a, b| a.key().cmp(&b.key()))
        .filter_map(|pair| match pair {
            EitherOrBoth::Both(a, b) => Some((a, b)),
            EitherOrBoth::Left(_) | EitherOrBoth::Right(_) => None,
        })
}

/// Elements of `left` whose key is not in `right`.
pub fn difference<'a, A, B, K>(
    left: &'a SortedList<A>,
    right: &'a SortedList<B>,
) -> impl Iterator<Item = &'a A> + 'a
where
    A: Keyed<Key = K>,
    B: Keyed<Key = K>,
    K: Ord + Copy,
{
    debug_assert!(is_strictly_sorted(left));
    debug_assert!(is_strictly_sorted(right));

    left.iter()
        .merge_join_by(right.iter(), |a, b| a.key().cmp(&b.key()))
        .filter_map(|pair| match pair {
            EitherOrBoth::Left(a) => Some(a),
            EitherOrBoth::Both(_, _) | EitherOrBoth::Right(_) => None,
        })
}

/// Elements of either list, by ascending key.
///
/// For keys present in both lists, the element of `left` is produced.
pub fn merge<'a, T: Keyed>(
    left: &'a SortedList<T>,
    right: &'a SortedList<T>,
) -> impl Iterator<Item = &'a T> + 'a {
    debug_assert!(is_strictly_sorted(left));
    debug_assert!(is_strictly_sorted(right));

    left.iter()
        .merge_join_by(right.iter(), |a, b| a.key().cmp(&b.key()))
        .map(|pair| match pair {
            EitherOrBoth::Both(a, _) | EitherOrBoth::Left(a) => a,
            EitherOrBoth::Right(b) => b,
        })
}
