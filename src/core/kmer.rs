/// Token cleaning and k-mer extraction.

/// Lowercase a token and drop every character outside `a`-`z`.
///
/// A token made only of punctuation or digits cleans to the empty string.
pub fn clean_word(token: &str) -> String {
    token
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

/// Every contiguous substring of `k` characters, sliding by one.
///
/// Yields nothing when `k` is zero or longer than the text.
pub fn kmers(text: &str, k: usize) -> Vec<&str> {
    if k == 0 {
        return Vec::new();
    }

    // Byte offset of every char, plus the end of the string
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();

    bounds
        .windows(k + 1)
        .map(|w| &text[w[0]..w[k]])
        .collect()
}
