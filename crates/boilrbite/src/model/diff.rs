//! Item comparison and list diffing.
//!
//! [`ItemCallback`] bundles the two predicates a caller supplies instead of a
//! full diff-callback object:
//!
//! - `same_identity(old, new)`: do both values describe the same row?
//! - `same_content(old, new)`: did the row's visible content stay the same?
//!
//! A [`DiffEngine`] turns an old and a new list into a [`ListDiff`] using
//! those predicates. The engine is a black box to the reconciler, so hosts can
//! plug in their own; [`MyersDiffEngine`] is the default.

use std::ops::{Index, IndexMut, Range};
use std::sync::Arc;

/// Type alias for an identity predicate.
pub type IdentityFn<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// Type alias for a content-equality predicate.
pub type ContentFn<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// The pair of predicates used to compare items across list versions.
///
/// # Example
///
/// ```
/// use boilrbite::model::ItemCallback;
///
/// #[derive(Clone, PartialEq)]
/// struct Contact {
///     id: u32,
///     name: String,
/// }
///
/// let callback = ItemCallback::with_identity(
///     |old: &Contact, new: &Contact| old.id == new.id,
///     |old: &Contact, new: &Contact| old.name == new.name,
/// );
///
/// let before = Contact { id: 1, name: "Ada".into() };
/// let after = Contact { id: 1, name: "Ada L.".into() };
/// assert!(callback.are_items_the_same(&before, &after));
/// assert!(!callback.are_contents_the_same(&before, &after));
/// ```
pub struct ItemCallback<T> {
    same_identity: IdentityFn<T>,
    same_content: ContentFn<T>,
}

impl<T> Clone for ItemCallback<T> {
    fn clone(&self) -> Self {
        Self {
            same_identity: self.same_identity.clone(),
            same_content: self.same_content.clone(),
        }
    }
}

impl<T: PartialEq + 'static> ItemCallback<T> {
    /// Creates a callback whose identity predicate is structural equality.
    pub fn new<C>(same_content: C) -> Self
    where
        C: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        Self {
            same_identity: Arc::new(|old: &T, new: &T| old == new),
            same_content: Arc::new(same_content),
        }
    }
}

impl<T: 'static> ItemCallback<T> {
    /// Creates a callback from explicit identity and content predicates.
    pub fn with_identity<I, C>(same_identity: I, same_content: C) -> Self
    where
        I: Fn(&T, &T) -> bool + Send + Sync + 'static,
        C: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        Self {
            same_identity: Arc::new(same_identity),
            same_content: Arc::new(same_content),
        }
    }

    pub(crate) fn from_parts(same_identity: IdentityFn<T>, same_content: ContentFn<T>) -> Self {
        Self {
            same_identity,
            same_content,
        }
    }

    /// Returns `true` if both values represent the same row.
    pub fn are_items_the_same(&self, old: &T, new: &T) -> bool {
        (self.same_identity)(old, new)
    }

    /// Returns `true` if a matched row's content is unchanged.
    pub fn are_contents_the_same(&self, old: &T, new: &T) -> bool {
        (self.same_content)(old, new)
    }
}

/// A single row-level change between two list versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowChange {
    /// A row was inserted. `position` indexes the new list.
    Inserted {
        /// Position in the new list.
        position: usize,
    },
    /// A row was removed. `position` indexes the old list.
    Removed {
        /// Position in the old list.
        position: usize,
    },
    /// A row kept its identity but its content changed.
    Updated {
        /// Position in the old list.
        old_position: usize,
        /// Position in the new list.
        new_position: usize,
    },
}

/// The result of diffing two list versions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDiff {
    /// Length of the list before the change.
    pub old_len: usize,
    /// Length of the list after the change.
    pub new_len: usize,
    /// Row changes, in list order.
    pub changes: Vec<RowChange>,
}

impl ListDiff {
    /// Returns `true` if no row was inserted, removed or updated.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// New-list positions of inserted rows.
    pub fn inserted(&self) -> impl Iterator<Item = usize> + '_ {
        self.changes.iter().filter_map(|change| match change {
            RowChange::Inserted { position } => Some(*position),
            _ => None,
        })
    }

    /// Old-list positions of removed rows.
    pub fn removed(&self) -> impl Iterator<Item = usize> + '_ {
        self.changes.iter().filter_map(|change| match change {
            RowChange::Removed { position } => Some(*position),
            _ => None,
        })
    }

    /// New-list positions of updated rows.
    pub fn updated(&self) -> impl Iterator<Item = usize> + '_ {
        self.changes.iter().filter_map(|change| match change {
            RowChange::Updated { new_position, .. } => Some(*new_position),
            _ => None,
        })
    }
}

/// Computes the difference between two list versions.
///
/// Implementations must be deterministic for a given pair of lists and
/// predicates. The reconciler calls the engine once per submission and hands
/// the result to observers without waiting on them.
pub trait DiffEngine<T>: Send + Sync {
    /// Diffs `old` against `new` using the callback's predicates.
    fn diff(&self, old: &[T], new: &[T], callback: &ItemCallback<T>) -> ListDiff;
}

/// Default diff engine: Myers' O((N+M)·D) shortest edit script.
///
/// The script is found by recursively splitting each region on its middle
/// snake, so memory stays proportional to `N + M` even when every row moved.
/// Moves are reported as a removal plus an insertion.
#[derive(Debug, Clone, Copy, Default)]
pub struct MyersDiffEngine;

impl<T: 'static> DiffEngine<T> for MyersDiffEngine {
    fn diff(&self, old: &[T], new: &[T], callback: &ItemCallback<T>) -> ListDiff {
        let mut search = SnakeSearch {
            same: |o: usize, n: usize| callback.are_items_the_same(&old[o], &new[n]),
            forward: Diagonals::new(old.len(), new.len()),
            backward: Diagonals::new(old.len(), new.len()),
            matches: Vec::new(),
        };
        search.conquer(0..old.len(), 0..new.len());

        let mut changes = Vec::new();
        let (mut next_old, mut next_new) = (0, 0);
        for (o, n) in search.matches.into_iter().chain([(old.len(), new.len())]) {
            changes.extend((next_old..o).map(|position| RowChange::Removed { position }));
            changes.extend((next_new..n).map(|position| RowChange::Inserted { position }));
            if o < old.len() && !callback.are_contents_the_same(&old[o], &new[n]) {
                changes.push(RowChange::Updated {
                    old_position: o,
                    new_position: n,
                });
            }
            (next_old, next_new) = (o + 1, n + 1);
        }

        ListDiff {
            old_len: old.len(),
            new_len: new.len(),
            changes,
        }
    }
}

fn max_edit_distance(old_len: usize, new_len: usize) -> usize {
    (old_len + new_len).div_ceil(2) + 1
}

/// Furthest-reaching `x` per diagonal `k = x - y`. `k` may be negative.
struct Diagonals {
    offset: isize,
    x: Vec<isize>,
}

impl Diagonals {
    fn new(old_len: usize, new_len: usize) -> Self {
        let max_d = max_edit_distance(old_len, new_len);
        Self {
            offset: max_d as isize + 1,
            x: vec![0; 2 * max_d + 3],
        }
    }
}

impl Index<isize> for Diagonals {
    type Output = isize;

    fn index(&self, k: isize) -> &isize {
        &self.x[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for Diagonals {
    fn index_mut(&mut self, k: isize) -> &mut isize {
        &mut self.x[(k + self.offset) as usize]
    }
}

/// Linear-space Myers search collecting matched `(old, new)` pairs in order.
struct SnakeSearch<F> {
    same: F,
    forward: Diagonals,
    backward: Diagonals,
    matches: Vec<(usize, usize)>,
}

impl<F: Fn(usize, usize) -> bool> SnakeSearch<F> {
    fn common_prefix(&self, old: Range<usize>, new: Range<usize>) -> usize {
        old.zip(new).take_while(|&(o, n)| (self.same)(o, n)).count()
    }

    fn common_suffix(&self, old: Range<usize>, new: Range<usize>) -> usize {
        old.rev()
            .zip(new.rev())
            .take_while(|&(o, n)| (self.same)(o, n))
            .count()
    }

    fn conquer(&mut self, mut old: Range<usize>, mut new: Range<usize>) {
        let prefix = self.common_prefix(old.clone(), new.clone());
        self.matches
            .extend((0..prefix).map(|i| (old.start + i, new.start + i)));
        old.start += prefix;
        new.start += prefix;

        let suffix = self.common_suffix(old.clone(), new.clone());
        old.end -= suffix;
        new.end -= suffix;

        // No split point means nothing in between matches.
        if !old.is_empty()
            && !new.is_empty()
            && let Some((x, y)) = self.middle_snake(&old, &new)
        {
            self.conquer(old.start..x, new.start..y);
            self.conquer(x..old.end, y..new.end);
        }

        self.matches
            .extend((0..suffix).map(|i| (old.end + i, new.end + i)));
    }

    /// Returns the absolute point where a shortest edit script of the region
    /// crosses its middle.
    fn middle_snake(&mut self, old: &Range<usize>, new: &Range<usize>) -> Option<(usize, usize)> {
        let n = old.len() as isize;
        let m = new.len() as isize;
        let delta = n - m;
        let odd = delta & 1 == 1;
        self.forward[1] = 0;
        self.backward[1] = 0;

        for d in 0..max_edit_distance(old.len(), new.len()) as isize {
            for k in (-d..=d).rev().step_by(2) {
                let mut x = if k == -d || (k != d && self.forward[k - 1] < self.forward[k + 1]) {
                    self.forward[k + 1]
                } else {
                    self.forward[k - 1] + 1
                };
                let y = x - k;
                let (x0, y0) = (x, y);
                if x < n && (0..m).contains(&y) {
                    x += self.common_prefix(
                        old.start + x as usize..old.end,
                        new.start + y as usize..new.end,
                    ) as isize;
                }
                self.forward[k] = x;

                if odd && (k - delta).abs() < d && x + self.backward[delta - k] >= n {
                    return Some((old.start + x0 as usize, new.start + y0 as usize));
                }
            }

            for k in (-d..=d).rev().step_by(2) {
                let mut x = if k == -d || (k != d && self.backward[k - 1] < self.backward[k + 1]) {
                    self.backward[k + 1]
                } else {
                    self.backward[k - 1] + 1
                };
                let mut y = x - k;
                if x < n && (0..m).contains(&y) {
                    let advance = self.common_suffix(
                        old.start..old.end - x as usize,
                        new.start..new.end - y as usize,
                    ) as isize;
                    x += advance;
                    y += advance;
                }
                self.backward[k] = x;

                if !odd && (k - delta).abs() <= d && x + self.forward[delta - k] >= n {
                    return Some((old.end - x as usize, new.end - y as usize));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        label: &'static str,
    }

    fn row(id: u32, label: &'static str) -> Row {
        Row { id, label }
    }

    fn by_id() -> ItemCallback<Row> {
        ItemCallback::with_identity(|a: &Row, b: &Row| a.id == b.id, |a: &Row, b: &Row| a == b)
    }

    #[test]
    fn test_default_identity_is_structural() {
        let callback = ItemCallback::new(|a: &String, b: &String| a == b);
        assert!(callback.are_items_the_same(&"a".to_string(), &"a".to_string()));
        assert!(!callback.are_items_the_same(&"a".to_string(), &"b".to_string()));
    }

    #[test]
    fn test_identical_lists_produce_empty_diff() {
        let rows = vec![row(1, "a"), row(2, "b")];
        let diff = MyersDiffEngine.diff(&rows, &rows, &by_id());
        assert!(diff.is_empty());
        assert_eq!((diff.old_len, diff.new_len), (2, 2));
    }

    #[test]
    fn test_insert_and_remove() {
        let old = vec![row(1, "a"), row(2, "b"), row(3, "c")];
        let new = vec![row(1, "a"), row(3, "c"), row(4, "d")];
        let diff = MyersDiffEngine.diff(&old, &new, &by_id());

        assert_eq!(diff.removed().collect::<Vec<_>>(), vec![1]);
        assert_eq!(diff.inserted().collect::<Vec<_>>(), vec![2]);
        assert_eq!(diff.updated().count(), 0);
    }

    #[test]
    fn test_content_change_reports_update() {
        let old = vec![row(1, "a"), row(2, "b")];
        let new = vec![row(1, "a"), row(2, "bee")];
        let diff = MyersDiffEngine.diff(&old, &new, &by_id());

        assert_eq!(
            diff.changes,
            vec![RowChange::Updated {
                old_position: 1,
                new_position: 1
            }]
        );
    }

    #[test]
    fn test_from_empty_and_to_empty() {
        let rows = vec![row(1, "a"), row(2, "b")];

        let grow = MyersDiffEngine.diff(&[], &rows, &by_id());
        assert_eq!(grow.inserted().collect::<Vec<_>>(), vec![0, 1]);

        let shrink = MyersDiffEngine.diff(&rows, &[], &by_id());
        assert_eq!(shrink.removed().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_move_is_remove_plus_insert() {
        let old = vec![row(1, "a"), row(2, "b"), row(3, "c")];
        let new = vec![row(3, "c"), row(1, "a"), row(2, "b")];
        let diff = MyersDiffEngine.diff(&old, &new, &by_id());

        assert_eq!(diff.removed().collect::<Vec<_>>(), vec![2]);
        assert_eq!(diff.inserted().collect::<Vec<_>>(), vec![0]);
    }

    fn assert_kept_rows_agree(old: &[u32], new: &[u32], diff: &ListDiff) {
        let removed: HashSet<usize> = diff.removed().collect();
        let inserted: HashSet<usize> = diff.inserted().collect();
        let kept_old: Vec<u32> = (0..old.len())
            .filter(|i| !removed.contains(i))
            .map(|i| old[i])
            .collect();
        let kept_new: Vec<u32> = (0..new.len())
            .filter(|i| !inserted.contains(i))
            .map(|i| new[i])
            .collect();
        assert_eq!(kept_old, kept_new);
    }

    fn numbers() -> ItemCallback<u32> {
        ItemCallback::new(|a: &u32, b: &u32| a == b)
    }

    #[test]
    fn test_reversed_list_keeps_one_row() {
        let old: Vec<u32> = (0..2_000).collect();
        let new: Vec<u32> = old.iter().rev().copied().collect();
        let diff = MyersDiffEngine.diff(&old, &new, &numbers());

        assert_eq!(diff.removed().count(), 1_999);
        assert_eq!(diff.inserted().count(), 1_999);
        assert_kept_rows_agree(&old, &new, &diff);
    }

    #[test]
    fn test_shuffled_list() {
        let count = 2_003u32;
        let old: Vec<u32> = (0..count).collect();
        let new: Vec<u32> = (0..count).map(|i| i * 7_919 % count).collect();
        let diff = MyersDiffEngine.diff(&old, &new, &numbers());

        assert_eq!(diff.removed().count(), diff.inserted().count());
        assert_kept_rows_agree(&old, &new, &diff);
    }

    #[test]
    fn test_large_list_with_few_edits() {
        let old: Vec<u32> = (0..50_000).collect();
        let mut new = old.clone();
        let moved = new.remove(10);
        new.insert(40_000, moved);
        new.retain(|&n| n != 25_000);
        let diff = MyersDiffEngine.diff(&old, &new, &numbers());

        assert_eq!(diff.removed().collect::<Vec<_>>(), vec![10, 25_000]);
        assert_eq!(diff.inserted().collect::<Vec<_>>(), vec![39_999]);
        assert_kept_rows_agree(&old, &new, &diff);
    }
}
