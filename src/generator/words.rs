use rand::Rng;

use crate::generator::TextGenerator;

/// Number of words in every practice text.
pub const WORDS_PER_TEXT: usize = 50;

/// Sample vocabulary. Never empty.
pub const VOCABULARY: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "I", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at",
];

/// Draws words uniformly, with replacement, from a fixed vocabulary.
pub struct WordSampler<R: Rng> {
    rng: R,
    vocabulary: &'static [&'static str],
}

impl<R: Rng> WordSampler<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            vocabulary: VOCABULARY,
        }
    }
}

impl<R: Rng> TextGenerator for WordSampler<R> {
    fn generate(&mut self, word_count: usize) -> String {
        let words: Vec<&str> = (0..word_count)
            .map(|_| self.vocabulary[self.rng.gen_range(0..self.vocabulary.len())])
            .collect();
        words.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn generates_requested_word_count_from_vocabulary() {
        let mut sampler = WordSampler::new(SmallRng::seed_from_u64(42));
        let text = sampler.generate(WORDS_PER_TEXT);

        let tokens: Vec<&str> = text.split(' ').collect();
        assert_eq!(tokens.len(), WORDS_PER_TEXT);
        assert!(tokens.iter().all(|t| VOCABULARY.contains(t)));
        assert_eq!(text.matches(' ').count(), WORDS_PER_TEXT - 1);
        assert!(!text.contains("  "));
    }

    #[test]
    fn same_seed_same_text() {
        let a = WordSampler::new(SmallRng::seed_from_u64(7)).generate(10);
        let b = WordSampler::new(SmallRng::seed_from_u64(7)).generate(10);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_words_is_empty() {
        let mut sampler = WordSampler::new(SmallRng::seed_from_u64(1));
        assert_eq!(sampler.generate(0), "");
    }
}
