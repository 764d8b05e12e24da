/// Context matching: does a chat belong in a folder?
///
/// The checks run in order and the first hit wins:
/// 1. Word overlap between chat text and folder name, in either direction
///    ("cook" matches "cooking")
/// 2. Category overlap on the chat text: the folder names a category (or one
///    of its keywords) and the chat text mentions a keyword of that category
/// 3. With context only: a folder word appears in the context, or the
///    category overlap holds against the context
///
/// Any single substring hit is enough. There is no score or threshold.
use crate::catalog::CATALOG;
use crate::text::normalize;

/// Decide whether `candidate` (a chat title) fits the folder called `folder_name`.
pub fn matches(candidate: &str, folder_name: &str, context: Option<&str>) -> bool {
    let chat_words = normalize(candidate);
    let folder_words = normalize(folder_name);

    if words_overlap(&chat_words, &folder_words) {
        return true;
    }

    let folder_lower = folder_name.to_lowercase();
    if category_overlap(&folder_lower, &candidate.to_lowercase()) {
        return true;
    }

    match context.filter(|c| !c.is_empty()) {
        Some(context) => {
            let context_lower = context.to_lowercase();
            folder_words.iter().any(|word| context_lower.contains(word.as_str()))
                || category_overlap(&folder_lower, &context_lower)
        }
        None => false,
    }
}

fn words_overlap(chat_words: &[String], folder_words: &[String]) -> bool {
    folder_words.iter().any(|folder_word| {
        chat_words
            .iter()
            .any(|chat_word| chat_word.contains(folder_word.as_str()) || folder_word.contains(chat_word.as_str()))
    })
}

fn category_overlap(folder_lower: &str, text_lower: &str) -> bool {
    CATALOG
        .iter()
        .any(|category| category.describes(folder_lower) && category.any_keyword_in(text_lower))
}
