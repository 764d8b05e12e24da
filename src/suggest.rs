/// Folder name suggestion for a chat
use crate::catalog::{CATALOG, Category};
use crate::text::capitalize;

/// Minimum length (exclusive) of a title word usable as a fallback name
const FALLBACK_MIN_CHARS: usize = 3;

/// Suggest a folder name for a chat.
///
/// Algorithm:
/// 1. Lowercase title + context into one blob
/// 2. Score each category by how many of its keywords occur in the blob
/// 3. Keep the strictly best score; ties go to the earlier catalog entry
/// 4. Score >= 1 → the capitalized category name
/// 5. Otherwise the first title word longer than 3 characters, capitalized
///
/// `None` means there is nothing worth suggesting.
///
/// Examples:
/// - "Best pasta recipes for dinner" → "Cooking"
/// - "Xyzzy plugh" → "Xyzzy"
/// - "a to it" → None
pub fn suggest(chat_title: &str, context: Option<&str>) -> Option<String> {
    let blob = format!("{} {}", chat_title, context.unwrap_or_default()).to_lowercase();

    if let Some((category, _)) = best_category(&blob) {
        return Some(capitalize(category.name));
    }

    chat_title
        .split_whitespace()
        .find(|word| word.chars().count() > FALLBACK_MIN_CHARS)
        .map(capitalize)
}

/// Highest-scoring category with at least one keyword hit
fn best_category(blob: &str) -> Option<(&'static Category, usize)> {
    CATALOG.iter().fold(None, |best, category| {
        let score = category.keyword_hits(blob);
        match best {
            Some((_, best_score)) if score <= best_score => best,
            _ if score == 0 => best,
            _ => Some((category, score)),
        }
    })
}
