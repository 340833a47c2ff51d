//! Approximate string similarity.
//!
//! Implements the Ratcliff/Obershelp "gestalt" ratio: find the longest common
//! contiguous block, recurse on the unmatched text to its left and right, and
//! score `2 * matched / (len(a) + len(b))`. Works on chars, so multi-byte text
//! is compared by code point.
//!
//! When `b` has at least 200 chars, any char occurring more than
//! `len(b) / 100 + 1` times in it is popular. Popular chars never start a
//! block, though a block may grow over them once found.

use std::collections::{HashMap, HashSet};

/// Length of `b` from which popular chars stop seeding blocks.
const POPULAR_MIN_LEN: usize = 200;

/// Similarity between two strings on a 0.0..=1.0 scale.
///
/// Two empty strings are identical (1.0).
///
/// # Examples
///
/// ```
/// use haven::services::similarity::ratio;
///
/// assert!((ratio("abcd", "bcde") - 0.75).abs() < f64::EPSILON);
/// assert!((ratio("", "") - 1.0).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    score(matching_characters(&a, &b), a.len() + b.len())
}

/// Upper bound on [`ratio`] from character multiset overlap.
#[must_use]
pub fn quick_ratio(a: &str, b: &str) -> f64 {
    let mut available: HashMap<char, usize> = HashMap::new();
    for c in b.chars() {
        *available.entry(c).or_insert(0) += 1;
    }
    let mut matches = 0;
    for c in a.chars() {
        if let Some(count) = available.get_mut(&c) {
            if *count > 0 {
                *count -= 1;
                matches += 1;
            }
        }
    }
    score(matches, a.chars().count() + b.chars().count())
}

/// Upper bound on [`ratio`] from lengths alone.
#[must_use]
pub fn real_quick_ratio(a: &str, b: &str) -> f64 {
    let la = a.chars().count();
    let lb = b.chars().count();
    score(la.min(lb), la + lb)
}

/// Returns the candidate most similar to `word`, if it scores at least `cutoff`.
///
/// Cheap upper bounds are checked before the full ratio. Among equally
/// similar candidates the greatest string wins, so the result depends only on
/// the inputs.
#[must_use]
pub fn closest_match<'a, I>(word: &str, candidates: I, cutoff: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .filter(|candidate| {
            real_quick_ratio(candidate, word) >= cutoff && quick_ratio(candidate, word) >= cutoff
        })
        .map(|candidate| (ratio(candidate, word), candidate))
        .filter(|(similarity, _)| *similarity >= cutoff)
        .max_by(|(sa, ca), (sb, cb)| sa.total_cmp(sb).then_with(|| ca.cmp(cb)))
        .map(|(_, candidate)| candidate)
}

#[allow(clippy::cast_precision_loss)]
fn score(matches: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        2.0 * matches as f64 / total as f64
    }
}

/// Chars of `b` too frequent to start a block.
fn popular_chars(b: &[char]) -> HashSet<char> {
    if b.len() < POPULAR_MIN_LEN {
        return HashSet::new();
    }
    let limit = b.len() / 100 + 1;
    let mut counts: HashMap<char, usize> = HashMap::new();
    for &c in b {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|&(_, count)| count > limit)
        .map(|(c, _)| c)
        .collect()
}

/// Total size of the matching blocks between `a` and `b`.
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let popular = popular_chars(b);
    let mut pending = vec![(0, a.len(), 0, b.len())];
    let mut matched = 0;

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, b, &popular, (alo, ahi), (blo, bhi));
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Returns `(i, j, size)`. Ties go to the block starting earliest in `a`,
/// then earliest in `b`. Blocks are seeded from non-popular chars, then
/// extended over equal chars on both sides.
fn longest_match(
    a: &[char],
    b: &[char],
    popular: &HashSet<char>,
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> (usize, usize, usize) {
    let width = bhi - blo;
    let mut previous = vec![0usize; width + 1];
    let mut current = vec![0usize; width + 1];
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

    for i in alo..ahi {
        for j in blo..bhi {
            let col = j - blo;
            if a[i] == b[j] && !popular.contains(&b[j]) {
                let size = previous[col] + 1;
                current[col + 1] = size;
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            } else {
                current[col + 1] = 0;
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
        best_i -= 1;
        best_j -= 1;
        best_size += 1;
    }
    while best_i + best_size < ahi
        && best_j + best_size < bhi
        && a[best_i + best_size] == b[best_j + best_size]
    {
        best_size += 1;
    }

    (best_i, best_j, best_size)
}
