//! Keyword vocabulary
//!
//! Fixed table of category labels and the literal phrases counted for each.
//! Categories are grouped into business segments, technology terms and
//! market/strategy themes. Adding a category means adding a table row.

use crate::error::{ExtractError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

/// Category groups, one per keyword-count pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGroup {
    /// Business segments (Data Center, Gaming, ...)
    BusinessSegment,
    /// Technology and product terms (GPU, CUDA, ...)
    Technology,
    /// Market and strategy themes (competition, supply chain, ...)
    MarketTheme,
}

impl CategoryGroup {
    /// Returns all category groups.
    pub fn all() -> Vec<Self> {
        vec![Self::BusinessSegment, Self::Technology, Self::MarketTheme]
    }

    /// Human-readable group name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BusinessSegment => "Business Segments",
            Self::Technology => "Technology Focus",
            Self::MarketTheme => "Market Insights",
        }
    }

    /// Key under which the group's counts are serialized.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::BusinessSegment => "business_segments",
            Self::Technology => "technology_focus",
            Self::MarketTheme => "market_insights",
        }
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A category label and the phrases that count towards it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    /// Label surfaced in the summary (unique within a vocabulary)
    pub label: String,
    /// Group the category belongs to
    pub group: CategoryGroup,
    /// Literal phrases, matched case-insensitively; the category count is the
    /// sum over all phrases. Surrounding whitespace is significant.
    pub phrases: Vec<String>,
}

impl CategoryDefinition {
    /// Create a new category definition.
    pub fn new<S: Into<String>>(
        label: impl Into<String>,
        group: CategoryGroup,
        phrases: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            label: label.into(),
            group,
            phrases: phrases.into_iter().map(Into::into).collect(),
        }
    }
}

/// Built-in vocabulary for NVIDIA annual reports.
const NVIDIA_CATEGORIES: &[(&str, CategoryGroup, &[&str])] = &[
    // Business segments
    (
        "Data Center",
        CategoryGroup::BusinessSegment,
        &["data center"],
    ),
    ("Gaming", CategoryGroup::BusinessSegment, &["gaming"]),
    (
        "Professional Visualization",
        CategoryGroup::BusinessSegment,
        &["professional visualization"],
    ),
    (
        "Automotive",
        CategoryGroup::BusinessSegment,
        &["automotive"],
    ),
    (
        "Networking",
        CategoryGroup::BusinessSegment,
        &["networking"],
    ),
    ("Cloud", CategoryGroup::BusinessSegment, &["cloud"]),
    ("OEM & Other", CategoryGroup::BusinessSegment, &["oem"]),
    // Technology
    (
        "AI",
        CategoryGroup::Technology,
        &[" ai ", "artificial intelligence"],
    ),
    ("GPU", CategoryGroup::Technology, &["gpu"]),
    ("CUDA", CategoryGroup::Technology, &["cuda"]),
    (
        "Machine Learning",
        CategoryGroup::Technology,
        &["machine learning"],
    ),
    (
        "Deep Learning",
        CategoryGroup::Technology,
        &["deep learning"],
    ),
    (
        "Generative AI",
        CategoryGroup::Technology,
        &["generative ai"],
    ),
    ("Hopper", CategoryGroup::Technology, &["hopper"]),
    ("Ampere", CategoryGroup::Technology, &["ampere"]),
    ("Grace", CategoryGroup::Technology, &["grace"]),
    ("DGX", CategoryGroup::Technology, &["dgx"]),
    ("RTX", CategoryGroup::Technology, &["rtx"]),
    ("Omniverse", CategoryGroup::Technology, &["omniverse"]),
    ("Tensor Core", CategoryGroup::Technology, &["tensor core"]),
    ("InfiniBand", CategoryGroup::Technology, &["infiniband"]),
    // Market and strategy
    (
        "Revenue Growth",
        CategoryGroup::MarketTheme,
        &["revenue growth"],
    ),
    (
        "Competition",
        CategoryGroup::MarketTheme,
        &["competition", "competitor"],
    ),
    (
        "Supply Chain",
        CategoryGroup::MarketTheme,
        &["supply chain"],
    ),
    ("Customers", CategoryGroup::MarketTheme, &["customer"]),
    ("Partners", CategoryGroup::MarketTheme, &["partner"]),
    ("Innovation", CategoryGroup::MarketTheme, &["innovation"]),
    ("Demand", CategoryGroup::MarketTheme, &["demand"]),
    (
        "Export Controls",
        CategoryGroup::MarketTheme,
        &["export control"],
    ),
    ("China", CategoryGroup::MarketTheme, &["china"]),
    ("Acquisitions", CategoryGroup::MarketTheme, &["acquisition"]),
    (
        "Sustainability",
        CategoryGroup::MarketTheme,
        &["sustainability"],
    ),
];

/// On-disk vocabulary layout.
#[derive(Debug, Deserialize, Serialize)]
struct VocabularyFile {
    categories: Vec<CategoryDefinition>,
}

/// A validated set of category definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    categories: Vec<CategoryDefinition>,
}

impl Vocabulary {
    /// Build a vocabulary, validating the definitions.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Vocabulary`] if a label is empty or duplicated,
    /// or if a category has no phrases or a blank phrase.
    pub fn from_categories(categories: Vec<CategoryDefinition>) -> Result<Self> {
        let mut seen = HashSet::new();
        for category in &categories {
            if category.label.trim().is_empty() {
                return Err(ExtractError::Vocabulary(
                    "category label must not be empty".to_string(),
                ));
            }
            if !seen.insert(category.label.as_str()) {
                return Err(ExtractError::Vocabulary(format!(
                    "duplicate category label: {}",
                    category.label
                )));
            }
            if category.phrases.is_empty() {
                return Err(ExtractError::Vocabulary(format!(
                    "category {} has no phrases",
                    category.label
                )));
            }
            if category.phrases.iter().any(|p| p.trim().is_empty()) {
                return Err(ExtractError::Vocabulary(format!(
                    "category {} has a blank phrase",
                    category.label
                )));
            }
        }
        Ok(Self { categories })
    }

    /// The built-in NVIDIA annual report vocabulary.
    pub fn nvidia_annual_report() -> Self {
        let categories = NVIDIA_CATEGORIES
            .iter()
            .map(|(label, group, phrases)| {
                CategoryDefinition::new(*label, *group, phrases.iter().copied())
            })
            .collect();
        Self { categories }
    }

    /// Parse a vocabulary from JSON of the form
    /// `{"categories": [{"label": ..., "group": ..., "phrases": [...]}]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: VocabularyFile = serde_json::from_str(json)?;
        Self::from_categories(file.categories)
    }

    /// Load a vocabulary from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize to the JSON layout accepted by [`Vocabulary::from_json_str`].
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let file = VocabularyFile {
            categories: self.categories.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// All categories in table order.
    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    /// Categories belonging to `group`, in table order.
    pub fn categories_in(&self, group: CategoryGroup) -> Vec<&CategoryDefinition> {
        self.categories
            .iter()
            .filter(|c| c.group == group)
            .collect()
    }

    /// Look up a category by label.
    pub fn get_category(&self, label: &str) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|c| c.label == label)
    }

    /// All labels in table order.
    pub fn list_labels(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.label.as_str()).collect()
    }

    /// Number of categories per group.
    pub fn count_by_group(&self) -> HashMap<CategoryGroup, usize> {
        let mut counts = HashMap::new();
        for category in &self.categories {
            *counts.entry(category.group).or_insert(0) += 1;
        }
        counts
    }

    /// Total number of categories.
    pub const fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the vocabulary has no categories.
    pub const fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::nvidia_annual_report()
    }
}
