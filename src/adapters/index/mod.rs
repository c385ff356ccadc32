//! Transcript index adapters.
//!
//! Both adapters share the same similarity measure: cosine over the sets of
//! lowercased word tokens. It is a deliberately small stand-in for an
//! embedding index - good enough to rank stored transcripts for offline
//! review, and the request path never reads from it anyway.

mod file_index;
mod in_memory;

pub use file_index::FileTranscriptIndex;
pub use in_memory::InMemoryTranscriptIndex;

use std::collections::HashSet;

/// Token-set cosine similarity between two texts, in [0, 1].
pub(crate) fn similarity(a: &str, b: &str) -> f64 {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let shared = tokens_a.intersection(&tokens_b).count() as f64;
    shared / ((tokens_a.len() as f64).sqrt() * (tokens_b.len() as f64).sqrt())
}

fn tokenize(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_score_one() {
        let score = similarity("send the OTP now", "send the OTP now");
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_texts_score_zero() {
        assert_eq!(similarity("hello world", "lottery winner"), 0.0);
    }

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(similarity("", "anything"), 0.0);
    }

    #[test]
    fn overlap_ranks_between_zero_and_one() {
        let score = similarity("your account will be blocked", "account blocked send otp");
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn tokenization_is_case_insensitive() {
        assert!((similarity("OTP", "otp") - 1.0).abs() < 1e-9);
    }
}
