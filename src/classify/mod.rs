//! Subject classification into fixed thematic categories
//!
//! This module maps free-text subject strings (comma-joined phrases as
//! returned by the Open Library subject endpoint) onto a closed set of
//! fifteen categories using keyword substring matching.

use serde::{Deserialize, Serialize};

use crate::models::{CategoryAssignment, WorkRecord};

/// Thematic category for a harvested work
///
/// The set is closed: every chart, table and report in the pipeline is keyed
/// by these fifteen labels. Keyword tables and chart styles hang off the
/// variant instead of string lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    BusinessAndEconomics,
    ComputerVision,
    DataCollectionAndMining,
    DataProcessingAndAnalysis,
    DatabasesAndManagement,
    EducationAndLearning,
    HealthcareAndMedicine,
    HumanComputerInteraction,
    InformationSystems,
    NaturalLanguageProcessing,
    NeuralNetworks,
    PhilosophyAndEthics,
    RoboticsAndAutomation,
    ScienceFictionAndLiterature,
    SecurityAndPrivacy,
}

/// Chart style associated with a category
///
/// Colors follow the original steel-blue/green palette; adjacent categories
/// share a hue and are distinguished by position in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    /// RGB fill/stroke color
    pub rgb: (u8, u8, u8),
}

impl Category {
    /// Get the display label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BusinessAndEconomics => "Business and Economics",
            Self::ComputerVision => "Computer Vision and Image Processing",
            Self::DataCollectionAndMining => "Data Collection and Mining",
            Self::DataProcessingAndAnalysis => "Data Processing and Analysis",
            Self::DatabasesAndManagement => "Databases and Management",
            Self::EducationAndLearning => "Education and Learning",
            Self::HealthcareAndMedicine => "Healthcare and Medicine",
            Self::HumanComputerInteraction => {
                "Human-Computer Interaction and User Experience"
            }
            Self::InformationSystems => "Information Systems and Technology",
            Self::NaturalLanguageProcessing => {
                "Natural Language Processing and Linguistics"
            }
            Self::NeuralNetworks => "Neural Networks and Evolutionary Computation",
            Self::PhilosophyAndEthics => "Philosophy and Ethics",
            Self::RoboticsAndAutomation => "Robotics and Automation",
            Self::ScienceFictionAndLiterature => "Science Fiction and Literature",
            Self::SecurityAndPrivacy => "Security and Privacy",
        }
    }

    /// Path-safe slug: lower-cased label with spaces and hyphens as underscores
    pub fn slug(&self) -> String {
        self.as_str().to_lowercase().replace([' ', '-'], "_")
    }

    /// Create from a display label
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.as_str() == s)
    }

    /// All categories in canonical (table) order
    pub fn all() -> Vec<Self> {
        vec![
            Self::BusinessAndEconomics,
            Self::ComputerVision,
            Self::DataCollectionAndMining,
            Self::DataProcessingAndAnalysis,
            Self::DatabasesAndManagement,
            Self::EducationAndLearning,
            Self::HealthcareAndMedicine,
            Self::HumanComputerInteraction,
            Self::InformationSystems,
            Self::NaturalLanguageProcessing,
            Self::NeuralNetworks,
            Self::PhilosophyAndEthics,
            Self::RoboticsAndAutomation,
            Self::ScienceFictionAndLiterature,
            Self::SecurityAndPrivacy,
        ]
    }

    /// Keyword phrases that place a subject string in this category
    ///
    /// Phrases are matched as substrings of the lower-cased subject string,
    /// so they may span comma boundaries. The table is load-bearing: changing
    /// a phrase changes which works are counted.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::BusinessAndEconomics => {
                &["business", "economic", "management", "decision support system"]
            }
            Self::ComputerVision => &[
                "computer vision",
                "image processing",
                "optical pattern recognition",
                "computer imaging",
                "pattern perception",
                "pattern recognition",
                "image analysis",
                "imaging system",
            ],
            Self::DataCollectionAndMining => {
                &["data mining", "knowledge discovery", "big data"]
            }
            Self::DataProcessingAndAnalysis => &[
                "data processing",
                "data structure",
                "data encryption",
                "data protection",
            ],
            Self::DatabasesAndManagement => &["database"],
            Self::EducationAndLearning => &[
                "education",
                "computer-assisted instruction",
                "tutoring system",
                "learning",
                "teaching",
            ],
            Self::HealthcareAndMedicine => {
                &["medical", "diagnostic imaging", "health", "medical records"]
            }
            Self::HumanComputerInteraction => &[
                "human-computer",
                "user interface",
                "human-machine",
                "human information processing",
                "interactive computer system",
                "user-centered system design",
                "psychology",
                "psychological",
            ],
            Self::InformationSystems => {
                &["information", "multimedia system", "web services"]
            }
            Self::NaturalLanguageProcessing => &[
                "NLP",
                "psycholinguistics",
                "language",
                "linguistics",
                "discourse analysis",
                "semantics",
                "syntax",
                "text processing",
                "conceptual structures",
            ],
            Self::NeuralNetworks => &["neural", "genetic algorithm", "evolution"],
            Self::PhilosophyAndEthics => {
                &["philosophy", "cognitive science", "consciousness", "ethic", "moral"]
            }
            Self::RoboticsAndAutomation => &[
                "robotic",
                "robot",
                "intelligent control systems",
                "automation",
                "control system",
                "control theory",
            ],
            Self::ScienceFictionAndLiterature => &["fiction", "thrillers", "suspense"],
            Self::SecurityAndPrivacy => {
                &["security", "encryption", "biometric identification", "privacy"]
            }
        }
    }

    /// Chart style for this category
    pub fn style(&self) -> CategoryStyle {
        let rgb = match self {
            Self::BusinessAndEconomics | Self::ComputerVision => (0xA9, 0xA9, 0xA9),
            Self::DataCollectionAndMining | Self::DataProcessingAndAnalysis => {
                (0xB0, 0xC4, 0xDE)
            }
            Self::DatabasesAndManagement | Self::EducationAndLearning => (0x46, 0x82, 0xB4),
            Self::HealthcareAndMedicine | Self::HumanComputerInteraction => {
                (0x5F, 0x9E, 0xA0)
            }
            Self::InformationSystems | Self::NaturalLanguageProcessing => (0x1E, 0x90, 0xFF),
            Self::NeuralNetworks | Self::PhilosophyAndEthics => (0x3C, 0xB3, 0x71),
            Self::RoboticsAndAutomation | Self::ScienceFictionAndLiterature => {
                (0x55, 0x6B, 0x2F)
            }
            Self::SecurityAndPrivacy => (0xB0, 0xE0, 0xE6),
        };
        CategoryStyle { rgb }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a subject string into zero or more categories
///
/// Matching is case-insensitive substring containment: the input is
/// lower-cased once and a category matches when any of its keyword phrases
/// occurs anywhere in the lowered text. A missing subject string yields the
/// empty set, never an error. Multiple categories may match the same input.
pub fn classify(subjects: Option<&str>) -> Vec<Category> {
    let Some(subjects) = subjects else {
        return Vec::new();
    };

    let lowered = subjects.to_lowercase();

    Category::all()
        .into_iter()
        .filter(|category| {
            category
                .keywords()
                .iter()
                .any(|keyword| lowered.contains(keyword))
        })
        .collect()
}

/// Fan a batch of records out into per-category assignments
///
/// Each record contributes one assignment per matched category; records that
/// match nothing contribute no assignments and are counted separately so the
/// caller can report how much activity went uncategorized.
pub fn expand_records(records: &[WorkRecord]) -> (Vec<CategoryAssignment>, u64) {
    let mut assignments = Vec::new();
    let mut uncategorized = 0u64;

    for record in records {
        let categories = classify(record.subjects());
        if categories.is_empty() {
            uncategorized += 1;
            continue;
        }

        let year = record.publish_year();
        for category in categories {
            assignments.push(CategoryAssignment { year, category });
        }
    }

    (assignments, uncategorized)
}
