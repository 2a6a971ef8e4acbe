//! Integration tests for dataset loading and analysis

use approx::assert_relative_eq;
use hobart_metrics::{FinancialDataset, MetricsError, analyze};
use rstest::rstest;

const ACME_JSON: &str = r#"{
    "company": "Acme Semiconductors",
    "fiscal_years": [
        {"fiscal_year": 2022, "revenue": 1000.0, "gross_profit": 500.0,
         "operating_income": 200.0, "net_income": 150.0},
        {"fiscal_year": 2023, "revenue": 800.0, "gross_profit": 320.0,
         "operating_income": 40.0, "net_income": 20.0}
    ],
    "segments": [
        {"name": "Chips", "revenue_by_year": {"2022": 700.0, "2023": 600.0}},
        {"name": "Boards", "revenue_by_year": {"2022": 300.0, "2023": 200.0}}
    ],
    "regions": [
        {"name": "Europe", "revenue": 300.0},
        {"name": "Asia", "revenue": 500.0}
    ]
}"#;

#[test]
fn test_declining_company() {
    let dataset = FinancialDataset::from_json_str(ACME_JSON).unwrap();
    let summary = analyze(&dataset).unwrap();

    assert_eq!(summary.fiscal_year, 2023);
    assert_relative_eq!(summary.revenue_growth_yoy.unwrap(), -20.0, epsilon = 1e-9);
    assert_relative_eq!(summary.gross_margin.unwrap(), 40.0, epsilon = 1e-9);
    assert_relative_eq!(
        summary.gross_margin_change_pp.unwrap(),
        -10.0,
        epsilon = 1e-9
    );

    let largest = summary.largest_segment.as_ref().unwrap();
    assert_eq!(largest.name, "Chips");
    assert_relative_eq!(largest.share_of_revenue.unwrap(), 75.0, epsilon = 1e-9);

    assert_eq!(summary.regions[0].name, "Asia");
    assert_relative_eq!(summary.regions[0].share, 62.5, epsilon = 1e-9);
    assert!(summary.product_mix.is_empty());

    let insights = summary.key_insights.join("\n");
    assert!(insights.contains("Revenue declined year over year (-20.0%) to $0.8B"));
    assert!(insights.contains("Gross margin contracted to 40.0% from 50.0% in FY2022"));
    assert!(insights.contains("Boards revenue declined 33% to $0.2B"));
}

#[test]
fn test_dataset_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nvidia.json");
    let json = FinancialDataset::nvidia_fy2024().to_json().unwrap();
    std::fs::write(&path, json).unwrap();

    let loaded = FinancialDataset::from_json_file(&path).unwrap();
    assert_eq!(
        analyze(&loaded).unwrap(),
        analyze(&FinancialDataset::nvidia_fy2024()).unwrap()
    );
}

#[rstest]
#[case(r#"{"company": "X", "fiscal_years": []}"#)]
#[case(r#"{"company": "X", "fiscal_years": [
    {"fiscal_year": 2023, "revenue": 1.0, "gross_profit": 1.0, "operating_income": 1.0, "net_income": 1.0},
    {"fiscal_year": 2023, "revenue": 1.0, "gross_profit": 1.0, "operating_income": 1.0, "net_income": 1.0}
]}"#)]
#[case(r#"{"company": "X", "fiscal_years": [
    {"fiscal_year": 2023, "revenue": -5.0, "gross_profit": 1.0, "operating_income": 1.0, "net_income": 1.0}
]}"#)]
fn test_invalid_datasets_rejected(#[case] json: &str) {
    assert!(matches!(
        FinancialDataset::from_json_str(json),
        Err(MetricsError::InvalidDataset(_))
    ));
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        FinancialDataset::from_json_str("{not json"),
        Err(MetricsError::Json(_))
    ));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        FinancialDataset::from_json_file("/nonexistent/dataset.json"),
        Err(MetricsError::Io(_))
    ));
}

#[test]
fn test_zero_revenue_year_has_undefined_margins() {
    let json = r#"{"company": "Startup", "fiscal_years": [
        {"fiscal_year": 2023, "revenue": 0.0, "gross_profit": 0.0, "operating_income": -5.0, "net_income": -5.0},
        {"fiscal_year": 2024, "revenue": 10.0, "gross_profit": 4.0, "operating_income": -1.0, "net_income": -1.0}
    ]}"#;
    let dataset = FinancialDataset::from_json_str(json).unwrap();
    let summary = analyze(&dataset).unwrap();

    assert_eq!(summary.year(2023).unwrap().gross_margin, None);
    assert_eq!(summary.revenue_growth_yoy, None);
    assert_eq!(summary.gross_margin_change_pp, None);
    assert!(summary.largest_segment.is_none());
}
