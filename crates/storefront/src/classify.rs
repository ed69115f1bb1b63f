//! Keyword classification of free-text description lines.
//!
//! Catalog descriptions arrive as plain paragraphs imported from supplier
//! documents. The display layer labels individual lines (covering/finish,
//! glass, hinge orientation) by keyword matching. The keyword tables are
//! configuration: extend them here, not inline at call sites.

/// Display label for a classified description line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailLabel {
    /// Covering / surface finish.
    Covering,
    /// Glazing.
    Glass,
    /// Hinge side.
    Orientation,
}

impl DetailLabel {
    /// Human-readable label shown next to the line.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Covering => "Покриття",
            Self::Glass => "Скління",
            Self::Orientation => "Сторона петель",
        }
    }
}

/// Keywords marking a covering/finish line.
pub const COVERING_KEYWORDS: &[&str] =
    &["пвх", "шпон", "ламінат", "горіх", "дуб", "ясен", "покриття"];

/// Keywords marking a glazing line.
pub const GLASS_KEYWORDS: &[&str] = &["скло", "скла", "скління", "glass"];

/// Keywords marking a hinge-orientation line.
pub const ORIENTATION_KEYWORDS: &[&str] = &["праве", "ліве", "правий", "лівий"];

/// Position of the line treated as the covering line when no keyword
/// matches anywhere in a description (the second paragraph).
pub const COVERING_FALLBACK_POSITION: usize = 1;

/// Number of leading lines joined into the description summary.
const SUMMARY_LINES: usize = 3;

/// Separator between summary lines.
const SUMMARY_SEPARATOR: &str = " • ";

/// Classify a single description line.
///
/// Keyword matches win; a line at [`COVERING_FALLBACK_POSITION`] that
/// matches nothing is still treated as the covering line. Everything else
/// stays unlabeled.
#[must_use]
pub fn classify_detail(line: &str, position: usize) -> Option<DetailLabel> {
    let lower = line.to_lowercase();

    if contains_any(&lower, COVERING_KEYWORDS) {
        return Some(DetailLabel::Covering);
    }
    if contains_any(&lower, GLASS_KEYWORDS) {
        return Some(DetailLabel::Glass);
    }
    if contains_any(&lower, ORIENTATION_KEYWORDS) {
        return Some(DetailLabel::Orientation);
    }
    if position == COVERING_FALLBACK_POSITION {
        return Some(DetailLabel::Covering);
    }

    None
}

/// Facts derived from a whole description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionFacts {
    /// Some line mentions glazing.
    pub has_glass: bool,
    /// Some line mentions a hinge side.
    pub has_orientation: bool,
    /// The covering line: first keyword match, else the fallback position.
    pub covering: Option<String>,
}

/// Derive [`DescriptionFacts`] from description lines.
#[must_use]
pub fn description_facts(details: &[String]) -> DescriptionFacts {
    let full_text = details.join(" ").to_lowercase();

    let covering = details
        .iter()
        .find(|line| contains_any(&line.to_lowercase(), COVERING_KEYWORDS))
        .or_else(|| {
            if details.len() > 1 {
                details.get(COVERING_FALLBACK_POSITION)
            } else {
                None
            }
        })
        .cloned();

    DescriptionFacts {
        has_glass: contains_any(&full_text, GLASS_KEYWORDS),
        has_orientation: contains_any(&full_text, ORIENTATION_KEYWORDS),
        covering,
    }
}

/// Join the leading description lines into a one-line summary.
#[must_use]
pub fn summarize(details: &[String]) -> String {
    details
        .iter()
        .take(SUMMARY_LINES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(SUMMARY_SEPARATOR)
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| haystack.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_covering_keyword_wins_over_position() {
        assert_eq!(
            classify_detail("Покриття: плівка ПВХ", 0),
            Some(DetailLabel::Covering)
        );
    }

    #[test]
    fn test_glass_keyword() {
        assert_eq!(
            classify_detail("Скло сатин з двох сторін", 4),
            Some(DetailLabel::Glass)
        );
        assert_eq!(classify_detail("Tempered glass insert", 4), Some(DetailLabel::Glass));
    }

    #[test]
    fn test_orientation_keyword() {
        assert_eq!(
            classify_detail("Відкривання: праве або ліве", 5),
            Some(DetailLabel::Orientation)
        );
    }

    #[test]
    fn test_keyword_matching_is_case_insensitive() {
        assert_eq!(classify_detail("ШПОН дуба", 0), Some(DetailLabel::Covering));
    }

    #[test]
    fn test_position_fallback_labels_second_line() {
        assert_eq!(classify_detail("Полотно 40 мм", 1), Some(DetailLabel::Covering));
        assert_eq!(classify_detail("Полотно 40 мм", 0), None);
        assert_eq!(classify_detail("Полотно 40 мм", 2), None);
    }

    #[test]
    fn test_description_facts_keyword_covering() {
        let facts = description_facts(&lines(&[
            "Міжкімнатні двері",
            "Полотно 40 мм",
            "Покриття: ламінат",
            "Скло: сатин",
        ]));
        assert!(facts.has_glass);
        assert!(!facts.has_orientation);
        assert_eq!(facts.covering.as_deref(), Some("Покриття: ламінат"));
    }

    #[test]
    fn test_description_facts_positional_covering() {
        let facts = description_facts(&lines(&["Міжкімнатні двері", "Полотно 40 мм"]));
        assert_eq!(facts.covering.as_deref(), Some("Полотно 40 мм"));
    }

    #[test]
    fn test_description_facts_single_line_has_no_covering() {
        let facts = description_facts(&lines(&["Міжкімнатні двері"]));
        assert_eq!(facts.covering, None);
    }

    #[test]
    fn test_summary_joins_first_three_lines() {
        let summary = summarize(&lines(&["a", "b", "c", "d"]));
        assert_eq!(summary, "a • b • c");
    }

    #[test]
    fn test_summary_of_short_description() {
        assert_eq!(summarize(&lines(&["a", "b"])), "a • b");
        assert_eq!(summarize(&[]), "");
    }
}
