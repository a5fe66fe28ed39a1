// larder-core/src/domain/search.rs
//
// Fuzzy text search shared by recipe title lookup and the food pickers.

use strsim::levenshtein;

use crate::domain::recipe::Recipe;

/// Maximum edit distance for a title to count as a fuzzy hit.
pub const TITLE_DISTANCE: usize = 7;
/// Items scoring below this are dropped by `rank`.
pub const RANK_THRESHOLD: i64 = -3;

const EXACT_BONUS: i64 = 100;
const CONTAINS_BONUS: i64 = 50;

/// Relevance of `name` for an already lowercased `query`.
pub fn score(query_lower: &str, name: &str) -> i64 {
    let name_lower = name.to_lowercase();
    let distance = levenshtein(query_lower, &name_lower) as i64;

    let mut score = -distance;
    if name_lower == query_lower {
        score += EXACT_BONUS;
    }
    if name_lower.contains(query_lower) {
        score += CONTAINS_BONUS;
    }
    score
}

/// Ranks `items` by relevance to `query`, best first, dropping those below
/// `threshold`. A blank query yields nothing.
pub fn rank<'a, T, F>(query: &str, items: &'a [T], name_of: F, threshold: i64) -> Vec<&'a T>
where
    F: Fn(&T) -> &str,
{
    let query_lower = query.trim().to_lowercase();
    if query_lower.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(i64, &T)> = items
        .iter()
        .map(|item| (score(&query_lower, name_of(item)), item))
        .filter(|(s, _)| *s >= threshold)
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, item)| item).collect()
}

/// Recipes whose title contains the query or sits within `max_distance`
/// edits of it. Input order is kept. A blank query yields nothing.
pub fn find_by_fuzzy_title<'a>(
    query: &str,
    recipes: &'a [Recipe],
    max_distance: usize,
) -> Vec<&'a Recipe> {
    let query_lower = query.trim().to_lowercase();
    if query_lower.is_empty() {
        return Vec::new();
    }

    recipes
        .iter()
        .filter(|recipe| {
            let title = recipe.title.to_lowercase();
            title.contains(&query_lower) || levenshtein(&query_lower, &title) <= max_distance
        })
        .collect()
}
