use std::{collections::BTreeSet, ops::Bound};

use parking_lot::RwLock;

use crate::models::Phrase;

/// Thread-safe ordered set of phrases, unique by text.
///
/// Batches may be inserted from several threads while readers run range
/// lookups. Every lookup holds the read lock for both bounds, so a single
/// range never observes a half-applied batch.
#[derive(Default)]
pub struct Corpus {
    phrases: RwLock<BTreeSet<Phrase>>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a batch of phrases under one write lock. A phrase replaces any
    /// existing phrase with the same text.
    pub fn extend(&self, batch: impl IntoIterator<Item = Phrase>) {
        let mut set = self.phrases.write();
        for p in batch {
            insert_unique(&mut set, p);
        }
    }

    /// Whether any phrase starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.phrases.read().range(bounds(prefix)).next().is_some()
    }

    /// Phrases starting with `prefix` that pass `keep`, in text order.
    ///
    /// `keep` runs under the read lock, so only the survivors are cloned.
    pub fn filter_range(
        &self,
        prefix: &str,
        mut keep: impl FnMut(&Phrase) -> bool,
    ) -> Vec<Phrase> {
        let set = self.phrases.read();
        set.range(bounds(prefix))
            .filter(|p| keep(*p))
            .cloned()
            .collect()
    }

    /// All phrases starting with `prefix`, in text order.
    #[cfg(test)]
    pub fn range(&self, prefix: &str) -> Vec<Phrase> {
        self.filter_range(prefix, |_| true)
    }

    pub fn len(&self) -> usize {
        self.phrases.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.read().is_empty()
    }
}

impl FromIterator<Phrase> for Corpus {
    fn from_iter<I: IntoIterator<Item = Phrase>>(iter: I) -> Self {
        let c = Corpus::new();
        c.extend(iter);
        c
    }
}

/// The half-open range `[prefix, prefix + char::MAX)` between two probe keys.
fn bounds(prefix: &str) -> (Bound<Phrase>, Bound<Phrase>) {
    let lo = Phrase::probe(prefix);
    let hi = Phrase::probe(format!("{}{}", prefix, char::MAX));
    (Bound::Included(lo), Bound::Excluded(hi))
}

/// The probe matches the stored phrase with the same text whatever its
/// frequency, so removing it first keeps texts unique (last writer wins).
fn insert_unique(set: &mut BTreeSet<Phrase>, phrase: Phrase) {
    set.remove(&Phrase::probe(phrase.text.as_str()));
    set.insert(phrase);
}
