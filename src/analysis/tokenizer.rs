/// Splits on the space character only. Runs of spaces never yield empty words.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split(' ')
        .filter(|word| !word.is_empty())
        .collect()
}

/// A word is valid when none of its characters is a control character (code point below 0x20).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| (c as u32) < 0x20)
}
