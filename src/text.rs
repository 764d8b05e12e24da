/// Text helpers shared by matching and suggestion

/// Lowercase `text` and split it on runs of whitespace.
///
/// Missing text is treated as empty and yields no tokens.
pub fn normalize<'a>(text: impl Into<Option<&'a str>>) -> Vec<String> {
    text.into()
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// Uppercase the first character, leaving the rest untouched
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
