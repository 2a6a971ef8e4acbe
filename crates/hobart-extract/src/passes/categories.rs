//! Fixed-vocabulary category counts.

use crate::vocabulary::CategoryDefinition;
use indexmap::IndexMap;
use tracing::debug;

/// Count case-insensitive, non-overlapping occurrences of `phrase` in `text`.
pub fn count_phrase_occurrences(text: &str, phrase: &str) -> usize {
    count_in_lowered(&text.to_lowercase(), phrase)
}

/// Count occurrences for every category, sorted by descending count.
///
/// Every category appears in the result, including those with zero
/// occurrences. A category's count is the sum over its phrases. The sort is
/// stable, so categories with equal counts keep their table order.
pub fn count_category_occurrences<'a, I>(text: &str, categories: I) -> IndexMap<String, usize>
where
    I: IntoIterator<Item = &'a CategoryDefinition>,
{
    count_lowered(&text.to_lowercase(), categories)
}

/// Same as [`count_category_occurrences`] for text that is already lowercase.
pub(crate) fn count_lowered<'a, I>(lowered: &str, categories: I) -> IndexMap<String, usize>
where
    I: IntoIterator<Item = &'a CategoryDefinition>,
{
    let mut counts: Vec<(String, usize)> = categories
        .into_iter()
        .map(|category| {
            let total = category
                .phrases
                .iter()
                .map(|phrase| count_in_lowered(lowered, phrase))
                .sum();
            (category.label.clone(), total)
        })
        .collect();

    counts.sort_by(|a, b| b.1.cmp(&a.1));

    debug!(
        categories = counts.len(),
        mentions = counts.iter().map(|(_, c)| c).sum::<usize>(),
        "category pass complete"
    );
    counts.into_iter().collect()
}

fn count_in_lowered(lowered: &str, phrase: &str) -> usize {
    let phrase = phrase.to_lowercase();
    if phrase.is_empty() {
        return 0;
    }
    lowered.matches(phrase.as_str()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{CategoryGroup, Vocabulary};

    #[test]
    fn test_phrase_count_is_case_insensitive() {
        let text = "Gaming, GAMING and gaming. Data Center data center";
        assert_eq!(count_phrase_occurrences(text, "gaming"), 3);
        assert_eq!(count_phrase_occurrences(text, "Data Center"), 2);
    }

    #[test]
    fn test_phrase_count_is_non_overlapping() {
        assert_eq!(count_phrase_occurrences("aaaa", "aa"), 2);
        assert_eq!(count_phrase_occurrences(" ai ai ai ", " ai "), 2);
    }

    #[test]
    fn test_composite_label_sums_phrases() {
        let text = "We lead in AI . Artificial intelligence drives AI demand; \
                    artificial Intelligence.";
        let vocab = Vocabulary::default();
        let ai = vocab.get_category("AI").unwrap();

        let counts = count_category_occurrences(text, [ai]);
        let expected = count_phrase_occurrences(text, " ai ")
            + count_phrase_occurrences(text, "artificial intelligence");
        assert_eq!(counts.get("AI"), Some(&expected));
        assert_eq!(expected, 4);
    }

    #[test]
    fn test_every_label_present_and_sorted() {
        let text = "Gaming revenue rose. Automotive and gaming. \
                    Data center was the largest: data center, data center.";
        let vocab = Vocabulary::default();
        let segments = vocab.categories_in(CategoryGroup::BusinessSegment);

        let counts = count_category_occurrences(text, segments.iter().copied());
        assert_eq!(counts.len(), segments.len());

        let top = counts.iter().take(3);
        let ordered: Vec<_> = top.map(|(l, c)| (l.as_str(), *c)).collect();
        assert_eq!(
            ordered,
            vec![("Data Center", 3), ("Gaming", 2), ("Automotive", 1)]
        );
        assert_eq!(counts.get("Professional Visualization"), Some(&0));

        let values: Vec<_> = counts.values().copied().collect();
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_ties_keep_table_order() {
        let categories = vec![
            CategoryDefinition::new("Zeta", CategoryGroup::MarketTheme, ["zeta"]),
            CategoryDefinition::new("Alpha", CategoryGroup::MarketTheme, ["alpha"]),
        ];
        let counts = count_category_occurrences("alpha zeta", &categories);
        let labels: Vec<_> = counts.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["Zeta", "Alpha"]);
    }
}
