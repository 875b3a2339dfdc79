//! Weighted, threshold-filtered fuzzy search over a corpus.
//!
//! An item's score is the best (lowest) weighted score among its configured
//! fields, where a field's weighted score is `min(1, score / weight)` and
//! weights are normalized so the heaviest field has weight `1`. Items scoring
//! above the threshold are discarded; the rest are ranked by score, ties
//! broken by corpus order.
//!
//! An empty query is not a filter: it returns the whole corpus in corpus
//! order, so callers can tell "no filter" apart from "no matches".

use std::borrow::Cow;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scorer::{field_score, normalize, tokenize};

/// Default match threshold (normalized distance).
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Items that expose named text fields to the search engine.
pub trait Searchable {
    /// Text of field `name`, or `None` when the item has no such field.
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// A field to search, with its relative weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchField {
    pub name: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl SearchField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight: default_weight(),
        }
    }

    pub fn weighted(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// A search hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredItem<'a, T> {
    pub item: &'a T,
    /// Position of the item in the corpus.
    pub index: usize,
    /// `0.0` is a perfect match.
    pub score: f64,
}

/// Clamp a caller-supplied threshold into `[0, 1]`.
pub fn clamp_threshold(threshold: f64) -> f64 {
    if threshold.is_nan() {
        DEFAULT_THRESHOLD
    } else {
        threshold.clamp(0.0, 1.0)
    }
}

/// Scale weights so the heaviest is `1`. Non-positive weights become `0`.
fn normalized_weights(fields: &[SearchField]) -> Vec<f64> {
    let sanitized: Vec<f64> = fields
        .iter()
        .map(|f| {
            if f.weight.is_finite() && f.weight > 0.0 {
                f.weight
            } else {
                0.0
            }
        })
        .collect();

    let max = sanitized.iter().copied().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return vec![1.0; fields.len()];
    }
    sanitized.into_iter().map(|w| w / max).collect()
}

fn weighted_score<'t, I>(tokens: &[Vec<char>], fields: I) -> f64
where
    I: IntoIterator<Item = (&'t [char], f64)>,
{
    fields
        .into_iter()
        .filter(|(_, weight)| *weight > 0.0)
        .map(|(text, weight)| (field_score(tokens, text) / weight).min(1.0))
        .fold(1.0_f64, f64::min)
}

fn rank<'a, T>(mut hits: Vec<ScoredItem<'a, T>>) -> Vec<ScoredItem<'a, T>> {
    hits.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.index.cmp(&b.index)));
    hits
}

fn unfiltered<T>(items: &[T]) -> Vec<ScoredItem<'_, T>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| ScoredItem {
            item,
            index,
            score: 0.0,
        })
        .collect()
}

/// One-shot search over `corpus`.
///
/// Equivalent to building a [`SearchIndex`] and searching it once.
pub fn search<'a, T>(
    corpus: &'a [T],
    query: &str,
    fields: &[SearchField],
    threshold: f64,
) -> Vec<ScoredItem<'a, T>>
where
    T: Searchable + Sync,
{
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return unfiltered(corpus);
    }

    let threshold = clamp_threshold(threshold);
    let weights = normalized_weights(fields);

    let hits: Vec<ScoredItem<'a, T>> = corpus
        .par_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let texts: Vec<(Vec<char>, f64)> = fields
                .iter()
                .zip(&weights)
                .filter_map(|(field, &weight)| {
                    item.field(&field.name).map(|text| (normalize(&text), weight))
                })
                .collect();
            let score = weighted_score(
                &tokens,
                texts.iter().map(|(text, weight)| (text.as_slice(), *weight)),
            );
            (score <= threshold).then_some(ScoredItem { item, index, score })
        })
        .collect();

    debug!(query = %query, matches = hits.len(), corpus = corpus.len(), "Fuzzy search evaluated");
    rank(hits)
}

/// A rebuildable index over a corpus.
///
/// Field texts are normalized once at build time. Rebuild the index whenever
/// the underlying items change.
#[derive(Debug, Clone)]
pub struct SearchIndex<T> {
    items: Vec<T>,
    fields: Vec<SearchField>,
    weights: Vec<f64>,
    /// `texts[item][field]`; `None` when the item lacks the field.
    texts: Vec<Vec<Option<Vec<char>>>>,
}

impl<T> SearchIndex<T>
where
    T: Searchable + Sync,
{
    pub fn new(items: Vec<T>, fields: Vec<SearchField>) -> Self {
        let texts = items
            .iter()
            .map(|item| {
                fields
                    .iter()
                    .map(|field| item.field(&field.name).map(|text| normalize(&text)))
                    .collect()
            })
            .collect();
        let weights = normalized_weights(&fields);

        Self {
            items,
            fields,
            weights,
            texts,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn fields(&self) -> &[SearchField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ranked items scoring at or below `threshold`.
    pub fn search(&self, query: &str, threshold: f64) -> Vec<ScoredItem<'_, T>> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return unfiltered(&self.items);
        }

        let threshold = clamp_threshold(threshold);
        let hits: Vec<ScoredItem<'_, T>> = self
            .texts
            .par_iter()
            .enumerate()
            .filter_map(|(index, texts)| {
                let fields = texts
                    .iter()
                    .zip(&self.weights)
                    .filter_map(|(text, &weight)| text.as_deref().map(|t| (t, weight)));
                let score = weighted_score(&tokens, fields);
                (score <= threshold).then_some(ScoredItem {
                    item: &self.items[index],
                    index,
                    score,
                })
            })
            .collect();

        debug!(query = %query, matches = hits.len(), corpus = self.items.len(), "Fuzzy search evaluated");
        rank(hits)
    }
}
