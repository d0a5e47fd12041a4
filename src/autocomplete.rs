use regex::Regex;

use crate::corpus::Corpus;

/// Normalize a phrase: lowercase, trim and collapse whitespace runs into single spaces.
pub fn normalize_phrase(s: &str, re_spaces: &Regex) -> String {
    re_spaces.replace_all(s.trim(), " ").to_lowercase()
}

/// Overlapping pairs of adjacent characters: "tion" -> ["ti", "io", "on"].
pub fn pairwise(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    chars.windows(2).map(|w| w.iter().collect()).collect()
}

/// Complete `input` against the corpus, most frequent phrase first.
///
/// The longest prefix of the input that starts at least one phrase narrows the
/// candidates. The rest of the input must then appear in each candidate's
/// remaining text as a loose sequence of character pairs, which lets
/// abbreviations like "weltm" match "welcome to my". Every survivor is
/// returned; truncating for display is up to the caller.
pub fn complete(corpus: &Corpus, input: &str) -> Vec<String> {
    let input = input.to_lowercase();

    let Some(prefix_len) = longest_prefix(corpus, &input) else {
        return Vec::new();
    };

    let remaining = &input[prefix_len..];
    let pattern = if remaining.chars().count() <= 1 {
        if remaining.is_empty() {
            Vec::new()
        } else {
            vec![remaining.to_string()]
        }
    } else {
        pairwise(remaining)
    };

    let mut out = corpus.filter_range(&input[..prefix_len], |c| {
        let postfix = &c.text[prefix_len..];
        pattern.iter().all(|p| matches_part(postfix, p))
    });

    // Stable, so equal frequencies keep text order.
    out.sort_by(|a, b| b.freq.cmp(&a.freq));

    out.into_iter().map(|p| p.text).collect()
}

/// Length in bytes of the longest prefix of `input` that starts at least one
/// phrase in the corpus.
fn longest_prefix(corpus: &Corpus, input: &str) -> Option<usize> {
    let bounds = input
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(input.len()));

    for end in bounds.rev() {
        if corpus.has_prefix(&input[..end]) {
            return Some(end);
        }
    }

    None
}

/// Check one pattern element against a candidate's postfix.
///
/// A single char only has to occur somewhere. For a pair "xy", the first `x`
/// must not be the first char of the postfix, and some `y` must come after it.
fn matches_part(postfix: &str, part: &str) -> bool {
    let mut chars = part.chars();
    let (Some(x), y) = (chars.next(), chars.next()) else {
        return true;
    };

    let Some(y) = y else {
        return postfix.contains(x);
    };

    match (postfix.find(x), postfix.rfind(y)) {
        (Some(i), Some(j)) => i > 0 && i < j,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Phrase;

    fn corpus() -> Corpus {
        [
            Phrase::unscored("whatever"),
            Phrase::new("a very common thing", 3),
            Phrase::new("a very common phrase", 2),
            Phrase::new("a very good call", 1),
            Phrase::new("welcome to the", 0),
            Phrase::new("welcome to my", 0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn unscored_ranks_below_negative_counts() {
        let c: Corpus = [
            Phrase::unscored("rank none"),
            Phrase::new("rank minus two", -2),
            Phrase::new("rank zero", 0),
            Phrase::new("rank minus one", -1),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            complete(&c, "rank "),
            vec!["rank zero", "rank minus one", "rank minus two", "rank none"]
        );
    }

    #[test]
    fn pairs() {
        assert_eq!(pairwise("hello"), vec!["he", "el", "ll", "lo"]);
        assert_eq!(pairwise("ct"), vec!["ct"]);
        assert_eq!(pairwise("tion"), vec!["ti", "io", "on"]);
        assert!(pairwise("a").is_empty());
        assert!(pairwise("").is_empty());
        assert_eq!(pairwise("né!"), vec!["né", "é!"]);
    }

    #[test]
    fn basics() {
        let c = corpus();
        assert_eq!(complete(&c, "weltm"), vec!["welcome to my"]);
        assert_eq!(
            complete(&c, "a ver"),
            vec!["a very common thing", "a very common phrase", "a very good call"]
        );
        assert_eq!(complete(&c, "a vect"), vec!["a very common thing"]);
        assert!(complete(&c, "xyz").is_empty());
    }

    #[test]
    fn case_insensitive() {
        let c = corpus();
        assert_eq!(complete(&c, "WELtm"), complete(&c, "weltm"));
        assert_eq!(complete(&c, "A VER"), complete(&c, "a ver"));
    }

    #[test]
    fn longest_prefix_wins() {
        let c: Corpus = [
            Phrase::new("cat", 1),
            Phrase::new("category theory", 5),
            Phrase::new("cart", 100),
        ]
        .into_iter()
        .collect();

        // "cat" and "ca" both have matches; only the "cat" range is used.
        let got = complete(&c, "cat");
        assert_eq!(got, vec!["category theory", "cat"]);
        assert!(!got.contains(&"cart".to_string()));
    }

    #[test]
    fn single_char_remainder() {
        let c: Corpus = [
            Phrase::new("the quick fox", 2),
            Phrase::new("the lazy dog", 3),
            Phrase::new("the slow turtle", 1),
        ]
        .into_iter()
        .collect();

        // "the q" has no match, so "the " leaves "q" which only needs to occur.
        assert_eq!(complete(&c, "the q"), vec!["the quick fox"]);
        assert_eq!(complete(&c, "the w"), vec!["the slow turtle"]);
    }

    #[test]
    fn pair_skips_first_char_of_postfix() {
        let c: Corpus = [Phrase::new("abcbd", 1)].into_iter().collect();

        assert_eq!(complete(&c, "ab"), vec!["abcbd"]);
        assert!(complete(&c, "ax").is_empty());
        assert_eq!(complete(&c, "acd"), vec!["abcbd"]);

        // Prefix "a" leaves "cbd". The pair "bd" looks at the first 'b', which
        // opens the postfix "bcbd", so it fails even though "b..d" occurs later.
        assert!(complete(&c, "acbd").is_empty());
    }

    #[test]
    fn pairs_checked_independently() {
        let c: Corpus = [Phrase::new("x banana", 1)].into_iter().collect();

        // prefix "x", remaining "bnn": pairs "bn" and "nn", both satisfied
        // against the whole postfix " banana".
        assert_eq!(complete(&c, "xbnn"), vec!["x banana"]);
    }

    #[test]
    fn empty_input_returns_everything() {
        let c = corpus();
        let got = complete(&c, "");
        assert_eq!(got.len(), 6);
        assert_eq!(got[0], "a very common thing");
        assert_eq!(got[5], "whatever");
    }

    #[test]
    fn empty_corpus() {
        assert!(complete(&Corpus::new(), "anything").is_empty());
        assert!(complete(&Corpus::new(), "").is_empty());
    }

    #[test]
    fn deterministic_with_ties_in_text_order() {
        let c: Corpus = [
            Phrase::new("go west", 5),
            Phrase::new("go east", 5),
            Phrase::new("go north", 9),
            Phrase::new("go south", 5),
        ]
        .into_iter()
        .collect();

        let first = complete(&c, "go ");
        assert_eq!(first, vec!["go north", "go east", "go south", "go west"]);
        for _ in 0..5 {
            assert_eq!(complete(&c, "go "), first);
        }
    }

    #[test]
    fn normalize() {
        let re = Regex::new(r"\s+").unwrap();
        assert_eq!(normalize_phrase("  Hello \t  World ", &re), "hello world");
        assert_eq!(normalize_phrase("A\tVery\tCommon", &re), "a very common");
        assert_eq!(normalize_phrase("   ", &re), "");
    }
}
