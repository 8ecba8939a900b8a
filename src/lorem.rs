//! `lorem[N]` paragraph generation (spec §4.6).
//!
//! Randomness is a per-call [`fastrand::Rng`] seeded from
//! [`crate::options::Options::lorem_seed`] — there is no global PRNG, so two
//! calls with the same seed and the same word count produce byte-identical
//! output (spec §5, §8).

/// Default word count for a bare `lorem`/`ipsum` abbreviation.
pub const DEFAULT_WORD_COUNT: usize = 30;

const MIN_SENTENCE: usize = 2;
const MAX_SENTENCE: usize = 12;

/// Generate a lorem-ipsum paragraph of `count` words drawn from `words`,
/// starting at a seed-determined offset and wrapping around.
pub fn generate(words: &[String], seed: u64, count: usize) -> String {
    if words.is_empty() || count == 0 {
        return String::new();
    }

    let mut rng = fastrand::Rng::with_seed(seed);
    let start = rng.usize(0..words.len());
    let chosen: Vec<&str> = (0..count)
        .map(|i| words[(start + i) % words.len()].as_str())
        .collect();

    let mut sentences: Vec<&[&str]> = Vec::new();
    let mut remaining = count;
    let mut offset = 0;
    let mut first = true;
    while remaining > 0 {
        let min_len = if first { 1 } else { MIN_SENTENCE }.min(remaining);
        let max_len = MAX_SENTENCE.min(remaining);
        let len = if max_len <= min_len {
            max_len.max(1)
        } else {
            rng.usize(min_len..=max_len)
        };
        sentences.push(&chosen[offset..offset + len]);
        offset += len;
        remaining -= len;
        first = false;
    }

    let rendered: Vec<String> = sentences
        .into_iter()
        .map(|sentence_words| render_sentence(sentence_words, &mut rng))
        .collect();
    rendered.join(" ")
}

fn render_sentence(words: &[&str], rng: &mut fastrand::Rng) -> String {
    let mut joined = words.join(" ");
    if joined.ends_with(',') {
        joined.pop();
    }

    let mut out = String::with_capacity(joined.len() + 1);
    let mut chars = joined.chars();
    if let Some(first_char) = chars.next() {
        out.extend(first_char.to_uppercase());
        out.push_str(chars.as_str());
    }

    let punctuation = match rng.usize(0..4) {
        v if v > 1 => '.',
        v if v > 0 => '?',
        _ => '!',
    };
    out.push(punctuation);
    out
}
