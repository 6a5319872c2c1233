//! Quality Mapper: four-level packaging ratings → 0–100 sub-scores.

/// Map a qualitative rating to a numeric sub-score.
///
/// The input is lower-cased before lookup. Anything outside the known
/// vocabulary (empty string included) scores 50 — the extractor's wording is
/// not strictly enforced, so an odd rating degrades to "average" instead of
/// failing the request.
pub fn score_quality(rating: &str) -> u8 {
    match rating.trim().to_ascii_lowercase().as_str() {
        "poor" => 25,
        "average" => 50,
        "good" => 75,
        "excellent" => 95,
        _ => 50,
    }
}
