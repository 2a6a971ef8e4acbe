//! Integration tests for the extraction passes over report-like text

use approx::assert_relative_eq;
use hobart_extract::{
    CategoryGroup, ExtractorConfig, InsightExtractor, PercentageStats, Vocabulary,
    count_category_occurrences, count_phrase_occurrences, extract_currency_mentions,
    extract_percentage_stats, extract_year_mentions,
};
use rstest::rstest;
use std::io::Write;

const REPORT_EXCERPT: &str = "\
NVIDIA Corporation Annual Report, Fiscal Year 2024.

Revenue for fiscal year 2024 was $60.9 billion, up 126% from a year ago.
Data Center revenue for fiscal year 2024 was a record $47.5 billion, up 217%.
Gaming revenue was $10.45 billion, up 15%. Professional Visualization revenue
was $1.55 billion and Automotive revenue was $1,091 million.

Generative AI and large language models are driving demand for accelerated computing.
Our Hopper GPU architecture and CUDA software, together with InfiniBand networking,
power artificial intelligence workloads in the cloud. Competition is intense, and
export controls on China announced in 2023 may affect our data center business.
Gross margin increased to 72.7% from 56.9% in fiscal year 2023.
Interest income grew 1,200% while a one-off item moved 4500%.
";

#[test]
fn test_no_currency_matches_yields_empty_mentions() {
    let summary = InsightExtractor::default()
        .extract("Revenue grew strongly in 2024; margin 70%.")
        .unwrap();

    assert!(summary.revenue_mentions.values.is_empty());
    assert!(summary.revenue_mentions.max.is_none());
    assert!(summary.revenue_mentions.average.is_none());
}

#[rstest]
#[case("$1.5 billion", 1500.0)]
#[case("$200 million", 200.0)]
#[case("$1,091 million", 1091.0)]
fn test_currency_normalization(#[case] text: &str, #[case] expected: f64) {
    let amounts = extract_currency_mentions(text, 10).unwrap();
    assert_eq!(amounts.len(), 1);
    assert_relative_eq!(amounts[0], expected);
}

#[test]
fn test_report_excerpt_currency_in_document_order() {
    let amounts = extract_currency_mentions(REPORT_EXCERPT, 10).unwrap();
    let expected = [60900.0, 47500.0, 10450.0, 1550.0, 1091.0];

    assert_eq!(amounts.len(), expected.len());
    for (actual, expected) in amounts.iter().zip(expected) {
        assert_relative_eq!(*actual, expected, max_relative = 1e-12);
    }
}

#[test]
fn test_one_entry_per_label_for_every_group() {
    let vocab = Vocabulary::default();
    for group in CategoryGroup::all() {
        let categories = vocab.categories_in(group);
        let counts = count_category_occurrences(REPORT_EXCERPT, categories.iter().copied());

        assert_eq!(counts.len(), categories.len(), "group {group}");
        for category in &categories {
            assert!(counts.contains_key(&category.label));
        }
    }
}

#[test]
fn test_composite_ai_label_equals_constituent_counts() {
    let vocab = Vocabulary::default();
    let ai = vocab.get_category("AI").unwrap();

    let counts = count_category_occurrences(REPORT_EXCERPT, [ai]);
    let constituents: usize = ai
        .phrases
        .iter()
        .map(|p| count_phrase_occurrences(REPORT_EXCERPT, p))
        .sum();

    assert_eq!(counts["AI"], constituents);
    assert_eq!(constituents, 2);
}

#[test]
fn test_percentage_outlier_example() {
    let stats = extract_percentage_stats("1500% increase and 42% margin", 1000.0).unwrap();
    assert_eq!(
        stats,
        PercentageStats {
            count: 1,
            average: 42.0,
            max: 42.0,
            min: 42.0
        }
    );
}

#[test]
fn test_report_excerpt_percentages() {
    let stats = extract_percentage_stats(REPORT_EXCERPT, 1000.0).unwrap();

    // "1,200%" only matches its "200%" tail; 4500% is an outlier
    assert_eq!(stats.count, 6);
    assert_relative_eq!(stats.max, 217.0);
    assert_relative_eq!(stats.min, 15.0);
}

#[test]
fn test_year_mentions_bounded_and_ordered() {
    let mut text = String::new();
    for (year, n) in [("2023", 5), ("2022", 5), ("2021", 2)] {
        for _ in 0..n {
            text.push_str(year);
            text.push(' ');
        }
    }
    for year in 2005..2015 {
        text.push_str(&format!("{year} "));
    }

    let years = extract_year_mentions(&text, 10);
    assert!(years.len() <= 10);

    let keys: Vec<_> = years.keys().map(String::as_str).collect();
    assert_eq!(&keys[..3], &["2023", "2022", "2021"]);

    let counts: Vec<_> = years.values().copied().collect();
    assert!(counts.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_summary_is_idempotent() {
    let extractor = InsightExtractor::default();
    let first = extractor.extract(REPORT_EXCERPT).unwrap();
    let second = extractor.extract(REPORT_EXCERPT).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_summary_category_maps_sorted() {
    let summary = InsightExtractor::default().extract(REPORT_EXCERPT).unwrap();

    for group in CategoryGroup::all() {
        let counts: Vec<_> = summary.category_counts(group).values().copied().collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]), "group {group}");
    }
    assert_eq!(
        summary.top_category(CategoryGroup::BusinessSegment),
        Some(("Data Center", 2))
    );
}

#[test]
fn test_config_limits_respected() {
    let config = ExtractorConfig::default()
        .max_currency_mentions(2)
        .max_year_mentions(1)
        .percentage_outlier_threshold(100.0);
    let extractor = InsightExtractor::new(config);
    let summary = extractor.extract(REPORT_EXCERPT).unwrap();

    assert_eq!(summary.revenue_mentions.values.len(), 2);
    assert_eq!(summary.year_mentions.len(), 1);
    assert!(summary.percentage_stats.max < 100.0);
}

#[test]
fn test_vocabulary_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"categories": [
            {{"label": "Search", "group": "business_segment", "phrases": ["search"]}},
            {{"label": "TPU", "group": "technology", "phrases": ["tpu"]}},
            {{"label": "Regulation", "group": "market_theme", "phrases": ["antitrust", "regulat"]}}
        ]}}"#
    )
    .unwrap();

    let vocab = Vocabulary::from_json_file(file.path()).unwrap();
    assert_eq!(vocab.len(), 3);

    let summary = InsightExtractor::new(ExtractorConfig::with_vocabulary(vocab))
        .extract("Search grew. TPU v5 shipped. Antitrust regulators and new regulation.")
        .unwrap();
    assert_eq!(summary.business_segments["Search"], 1);
    assert_eq!(summary.technology_focus["TPU"], 1);
    assert_eq!(summary.market_insights["Regulation"], 3);
}
