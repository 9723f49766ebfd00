use crate::layout::{Layout, Viewport};
use crate::parse::Element;

/// Configuration for the container scoring heuristic
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Points per `<p>` descendant
    pub paragraph_weight: f64,
    /// Characters per point for text length scoring
    pub chars_per_point: f64,
    /// Cap on the text length score
    pub max_length_score: f64,
    /// Bonus for a content-like class
    pub class_weight: f64,
    /// Bonus for a content-like id
    pub id_weight: f64,
    /// Penalty for a navigation-like class
    pub negative_weight: f64,
    /// Bonus for sitting in the middle column of the viewport
    pub centered_bonus: f64,
    /// Allowed distance from the viewport center, as a fraction of half the viewport width
    pub center_tolerance: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            paragraph_weight: 2.0,
            chars_per_point: 100.0,
            max_length_score: 20.0,
            class_weight: 10.0,
            id_weight: 10.0,
            negative_weight: -20.0,
            centered_bonus: 5.0,
            center_tolerance: 0.3,
        }
    }
}

/// Breakdown of an element's score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    /// The element's tag name
    pub tag_name: String,
    /// Score from `<p>` descendants
    pub paragraph_score: f64,
    /// Score from text length
    pub length_score: f64,
    /// Bonus from a content-like class
    pub class_weight: f64,
    /// Bonus from a content-like id
    pub id_weight: f64,
    /// Penalty from a navigation-like class (zero or negative)
    pub negative_weight: f64,
    /// Bonus from horizontal position in the viewport
    pub position_bonus: f64,
    /// Sum of all components
    pub final_score: f64,
}

/// Fragments that suggest an element holds the article
pub const POSITIVE_KEYWORDS: &[&str] = &["content", "article", "post", "story"];

/// Fragments that suggest an element is page chrome
pub const NEGATIVE_KEYWORDS: &[&str] = &["nav", "sidebar", "menu", "footer"];

fn has_keyword(value: &str, keywords: &[&str]) -> bool {
    let value = value.to_lowercase();
    keywords.iter().any(|keyword| value.contains(keyword))
}

/// `paragraph_weight` points per `<p>` descendant
pub fn paragraph_score(element: &Element<'_>, config: &ScoreConfig) -> f64 {
    let paragraphs = element.count("p").unwrap_or_default();
    paragraphs as f64 * config.paragraph_weight
}

/// One point per `chars_per_point` characters, capped at `max_length_score`
pub fn length_score(element: &Element<'_>, config: &ScoreConfig) -> f64 {
    let text_length = element.text().chars().count() as f64;
    (text_length / config.chars_per_point).min(config.max_length_score)
}

/// Class and id bonuses, counted independently
pub fn class_id_weight(element: &Element<'_>, config: &ScoreConfig) -> (f64, f64) {
    let class_weight = if has_keyword(element.class_name(), POSITIVE_KEYWORDS) { config.class_weight } else { 0.0 };
    let id_weight = if has_keyword(element.id(), POSITIVE_KEYWORDS) { config.id_weight } else { 0.0 };
    (class_weight, id_weight)
}

/// Penalty for a navigation-like class
pub fn negative_class_weight(element: &Element<'_>, config: &ScoreConfig) -> f64 {
    if has_keyword(element.class_name(), NEGATIVE_KEYWORDS) { config.negative_weight } else { 0.0 }
}

/// Bonus when the element's horizontal center is near the viewport center
///
/// Contributes nothing when the host cannot report geometry.
pub fn position_bonus(element: &Element<'_>, config: &ScoreConfig, layout: &dyn Layout) -> f64 {
    let Viewport::Available { width } = layout.viewport() else {
        return 0.0;
    };
    let Some(rect) = layout.bounding_box(element) else {
        return 0.0;
    };

    let center = rect.center_x();
    if !center.is_finite() {
        return 0.0;
    }

    let half = width / 2.0;
    if (center - half).abs() < half * config.center_tolerance { config.centered_bonus } else { 0.0 }
}

/// Calculate the score for a candidate container
///
/// The components are additive and independent of each other:
/// - `+2` per paragraph
/// - `+min(chars / 100, 20)`
/// - `+10` for a content-like class, `+10` for a content-like id
/// - `-20` for a navigation-like class
/// - `+5` when centered in the viewport
pub fn calculate_score(element: &Element<'_>, config: &ScoreConfig, layout: &dyn Layout) -> ScoreResult {
    let paragraph_score = paragraph_score(element, config);
    let length_score = length_score(element, config);
    let (class_weight, id_weight) = class_id_weight(element, config);
    let negative_weight = negative_class_weight(element, config);
    let position_bonus = position_bonus(element, config, layout);

    let final_score = paragraph_score + length_score + class_weight + id_weight + negative_weight + position_bonus;

    ScoreResult {
        tag_name: element.tag_name(),
        paragraph_score,
        length_score,
        class_weight,
        id_weight,
        negative_weight,
        position_bonus,
        final_score,
    }
}

/// Shorthand for `calculate_score(..).final_score`
pub fn score(element: &Element<'_>, config: &ScoreConfig, layout: &dyn Layout) -> f64 {
    calculate_score(element, config, layout).final_score
}
