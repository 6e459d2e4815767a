// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Relevance scoring for the filter box.
//!
//! Scores are plain integers: [`MAX_SCORE`] for exact hits, one less for a
//! case-insensitive substring, `0..=100` for fuzzy subsequence matches, and
//! [`NO_MATCH`] when the candidate should be hidden.

pub const MAX_SCORE: i32 = 1_000;
pub const NO_MATCH: i32 = -1;

const FUZZY_CEILING: i32 = 100;
const FUZZY_THRESHOLD: i32 = 25;

pub fn score(haystack: &str, needle: &str) -> i32 {
    if needle.is_empty() {
        return MAX_SCORE;
    }
    if haystack.is_empty() {
        return NO_MATCH;
    }
    if haystack == needle {
        return MAX_SCORE;
    }

    let haystack = haystack.to_lowercase();
    let needle = needle.to_lowercase();
    if haystack.contains(&needle) {
        return MAX_SCORE - 1;
    }

    fuzzy_score(&haystack, &needle)
}

/// Scores an item described by its id and the text fields searched for it.
pub fn score_fields<S: AsRef<str>>(id: i64, fields: &[S], needle: &str) -> i32 {
    if needle.is_empty() {
        return MAX_SCORE;
    }
    if id.to_string() == needle || fields.iter().any(|field| field.as_ref() == needle) {
        return MAX_SCORE;
    }

    let haystack = fields
        .iter()
        .map(AsRef::as_ref)
        .filter(|field| !field.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    score(&haystack, needle)
}

pub const fn is_match(score: i32) -> bool {
    score >= 0
}

fn fuzzy_score(haystack: &str, needle: &str) -> i32 {
    let Some(distance) = subsequence_distance(haystack, needle) else {
        return NO_MATCH;
    };
    let score = FUZZY_CEILING.saturating_sub(i32::try_from(distance).unwrap_or(i32::MAX));
    if score.max(0) > FUZZY_THRESHOLD {
        score
    } else {
        NO_MATCH
    }
}

/// Edit distance between `needle` and `haystack` when `needle` is a
/// subsequence of it. That distance is exactly the number of deleted chars.
fn subsequence_distance(haystack: &str, needle: &str) -> Option<usize> {
    let mut remaining = needle.chars().peekable();
    let mut haystack_len = 0usize;
    for c in haystack.chars() {
        haystack_len += 1;
        if remaining.peek() == Some(&c) {
            remaining.next();
        }
    }
    if remaining.peek().is_some() {
        return None;
    }
    Some(haystack_len - needle.chars().count())
}
