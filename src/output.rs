/// Rendering of generated words for display.

/// Format one word with its 1-based sequence number, right-justified to
/// three columns: `  1: word`.
pub fn format_line(number: usize, word: &str) -> String {
    format!("{:>3}: {}", number, word)
}

/// Number every word starting at 1.
pub fn format_lines(words: &[String]) -> Vec<String> {
    words
        .iter()
        .enumerate()
        .map(|(i, word)| format_line(i + 1, word))
        .collect()
}
