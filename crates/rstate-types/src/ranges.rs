//! Operations over sets of ranges.
//!
//! "Normalized" below means sorted by left endpoint, pairwise disjoint, and
//! with touching neighbours merged: the minimal representation of a union.

use crate::range::{Range, Token};

/// Minimal disjoint union of `ranges`.
///
/// Overlapping and touching ranges merge, so `(1,2]` and `(2,3]` become `(1,3]`.
#[must_use]
pub fn normalize<T: Token>(ranges: impl IntoIterator<Item = Range<T>>) -> Vec<Range<T>> {
    coalesce(ranges, true)
}

/// Sorted union of `ranges` that merges only true overlaps.
///
/// Touching ranges stay separate, which keeps an already-disjoint input
/// exactly as it was.
#[must_use]
pub fn deoverlap<T: Token>(ranges: impl IntoIterator<Item = Range<T>>) -> Vec<Range<T>> {
    coalesce(ranges, false)
}

fn coalesce<T: Token>(
    ranges: impl IntoIterator<Item = Range<T>>,
    merge_touching: bool,
) -> Vec<Range<T>> {
    let mut sorted: Vec<Range<T>> = ranges.into_iter().collect();
    sorted.sort();

    let mut out: Vec<Range<T>> = Vec::with_capacity(sorted.len());
    for range in sorted {
        if let Some(last) = out.last_mut() {
            let joins = if merge_touching {
                range.left <= last.right
            } else {
                range.left < last.right
            };
            if joins {
                if range.right > last.right {
                    last.right = range.right;
                }
                continue;
            }
        }
        out.push(range);
    }
    out
}

/// First pair of overlapping neighbours in a sorted slice.
///
/// Checking neighbours is enough: if any two ranges of a sorted slice
/// overlap, some adjacent pair does too.
#[must_use]
pub fn find_overlap<T: Token>(sorted: &[Range<T>]) -> Option<(&Range<T>, &Range<T>)> {
    sorted
        .windows(2)
        .find(|pair| pair[1].left < pair[0].right)
        .map(|pair| (&pair[0], &pair[1]))
}

/// True when `ranges` is sorted, disjoint, and free of touching neighbours.
#[must_use]
pub fn is_normalized<T: Token>(ranges: &[Range<T>]) -> bool {
    ranges.windows(2).all(|pair| pair[0].right < pair[1].left)
}

/// Remove the normalized set `claimed` from every range in `ranges`.
///
/// Pieces come back in the order of `ranges`, each split left to right.
#[must_use]
pub fn subtract_all<T: Token>(ranges: &[Range<T>], claimed: &[Range<T>]) -> Vec<Range<T>> {
    let mut out = Vec::with_capacity(ranges.len());
    for range in ranges {
        subtract_into(range, claimed, &mut out);
    }
    out
}

fn subtract_into<T: Token>(range: &Range<T>, claimed: &[Range<T>], out: &mut Vec<Range<T>>) {
    let start = claimed.partition_point(|c| c.right <= range.left);
    let mut tail = Some(range.clone());

    for hole in claimed[start..].iter().take_while(|c| c.left < range.right) {
        let Some(current) = tail.take() else {
            break;
        };
        let mut pieces = current.subtract(hole).into_iter().peekable();
        while let Some(piece) = pieces.next() {
            // Anything right of the hole may still be cut by later holes.
            if pieces.peek().is_none() && piece.left >= hole.right {
                tail = Some(piece);
            } else {
                out.push(piece);
            }
        }
    }
    out.extend(tail);
}

/// True when `query` lies entirely inside the normalized set `covered`.
#[must_use]
pub fn covers<T: Token>(covered: &[Range<T>], query: &Range<T>) -> bool {
    let idx = covered.partition_point(|c| c.right < query.right);
    covered.get(idx).is_some_and(|c| c.contains(query))
}
