//! Content-improvement recommendations.
//!
//! Checks run in table order and each contributes at most one entry. Only the
//! domain check is unconditional, so long content that already mentions a
//! "case" and nothing "complex" ends up with a single recommendation.

use super::types::{Domain, DomainClassification, RecommendationSet};

/// Content shorter than this (in characters, after lowercasing) is flagged as thin
pub const MIN_CONTENT_CHARS: usize = 500;

pub const EXPAND_CONTENT: &str = "Expand content with more detailed examples and case studies";
pub const INCLUDE_EXAMPLES: &str = "Include real-world examples to enhance learner engagement";
pub const COMPLIANCE_CHECKPOINTS: &str =
    "Incorporate compliance checkpoints and assessment criteria";
pub const HANDS_ON_EXERCISES: &str = "Add hands-on exercises and practical demonstrations";
pub const INTERACTIVE_ELEMENTS: &str = "Integrate interactive elements and knowledge checks";
pub const SCAFFOLDED_LEARNING: &str = "Consider scaffolded learning approach for complex topics";

/// Lowercased view of the content shared by every check
#[derive(Debug, Clone)]
pub struct ContentFeatures {
    normalized: String,
}

impl ContentFeatures {
    pub fn new(content: &str) -> Self {
        Self {
            normalized: content.to_lowercase(),
        }
    }

    pub fn char_len(&self) -> usize {
        self.normalized.chars().count()
    }

    pub fn mentions_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.normalized.contains(n))
    }
}

/// One row of the recommendation table
#[derive(Clone, Copy)]
pub struct RecommendationCheck {
    pub name: &'static str,
    pub evaluate: fn(&ContentFeatures, Domain) -> Option<&'static str>,
}

impl std::fmt::Debug for RecommendationCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationCheck")
            .field("name", &self.name)
            .finish()
    }
}

fn check_length(features: &ContentFeatures, _domain: Domain) -> Option<&'static str> {
    (features.char_len() < MIN_CONTENT_CHARS).then_some(EXPAND_CONTENT)
}

fn check_examples(features: &ContentFeatures, _domain: Domain) -> Option<&'static str> {
    (!features.mentions_any(&["example", "case"])).then_some(INCLUDE_EXAMPLES)
}

fn check_domain(_features: &ContentFeatures, domain: Domain) -> Option<&'static str> {
    Some(match domain {
        Domain::Healthcare | Domain::Compliance => COMPLIANCE_CHECKPOINTS,
        Domain::Technology => HANDS_ON_EXERCISES,
        _ => INTERACTIVE_ELEMENTS,
    })
}

fn check_complexity(features: &ContentFeatures, _domain: Domain) -> Option<&'static str> {
    features
        .mentions_any(&["complex", "advanced"])
        .then_some(SCAFFOLDED_LEARNING)
}

/// Ordered recommendation checks
pub const RECOMMENDATION_CHECKS: &[RecommendationCheck] = &[
    RecommendationCheck {
        name: "content_length",
        evaluate: check_length,
    },
    RecommendationCheck {
        name: "real_world_examples",
        evaluate: check_examples,
    },
    RecommendationCheck {
        name: "domain_practice",
        evaluate: check_domain,
    },
    RecommendationCheck {
        name: "complexity",
        evaluate: check_complexity,
    },
];

/// Build recommendations for a classified submission
pub fn generate_recommendations(
    content: &str,
    classification: &DomainClassification,
) -> RecommendationSet {
    let features = ContentFeatures::new(content);
    let picked = RECOMMENDATION_CHECKS
        .iter()
        .filter_map(|check| (check.evaluate)(&features, classification.domain))
        .map(str::to_string)
        .collect();
    RecommendationSet::new(picked)
}
