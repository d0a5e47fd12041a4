use std::cmp::Ordering;

/// Popularity score attached to a phrase.
///
/// `Probe` is never stored in the corpus. It only marks the text-only keys that
/// bound a range query, so that real zero scores can't be mistaken for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Frequency {
    Probe,
    /// A stored phrase without a score. Ranks below every scored phrase.
    Unscored,
    Count(i64),
}

/// A phrase (n-gram) and its frequency.
///
/// Phrases are ordered by text. Equal texts compare equal when either side is a
/// probe, otherwise the frequency breaks the tie.
#[derive(Debug, Clone)]
pub struct Phrase {
    pub text: String,
    pub freq: Frequency,
}

impl Phrase {
    pub fn new(text: impl Into<String>, freq: i64) -> Self {
        Self {
            text: text.into(),
            freq: Frequency::Count(freq),
        }
    }

    pub fn unscored(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            freq: Frequency::Unscored,
        }
    }

    /// Text-only key for building range bounds.
    pub fn probe(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            freq: Frequency::Probe,
        }
    }

    pub fn is_probe(&self) -> bool {
        self.freq == Frequency::Probe
    }
}

impl Ord for Phrase {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.text.cmp(&other.text) {
            Ordering::Equal if self.is_probe() || other.is_probe() => Ordering::Equal,
            Ordering::Equal => self.freq.cmp(&other.freq),
            ord => ord,
        }
    }
}

impl PartialOrd for Phrase {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Phrase {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Phrase {}
