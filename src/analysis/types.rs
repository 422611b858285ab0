//! Value types for content analysis inputs and outputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use super::frameworks::PedagogicalFramework;

/// Maximum number of SME questions returned for one submission
pub const MAX_QUESTIONS: usize = 8;

/// Maximum number of recommendations returned for one submission
pub const MAX_RECOMMENDATIONS: usize = 4;

/// Subject domains a submission can be classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Healthcare,
    Technology,
    Business,
    Compliance,
    CustomerService,
    ProfessionalDevelopment,
}

impl Domain {
    pub const ALL: [Domain; 6] = [
        Domain::Healthcare,
        Domain::Technology,
        Domain::Business,
        Domain::Compliance,
        Domain::CustomerService,
        Domain::ProfessionalDevelopment,
    ];

    /// Display label used in responses and summaries
    pub const fn label(self) -> &'static str {
        match self {
            Domain::Healthcare => "Healthcare & Medical Education",
            Domain::Technology => "Technology & Software",
            Domain::Business => "Business & Management",
            Domain::Compliance => "Compliance & Regulatory",
            Domain::CustomerService => "Customer Service",
            Domain::ProfessionalDevelopment => "Professional Development",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Domain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One uploaded piece of training content, as received from the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSubmission {
    #[serde(default, deserialize_with = "crate::deserializers::de_content_text")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "crate::deserializers::de_lenient_text")]
    pub file_name: Option<String>,
}

impl ContentSubmission {
    pub fn new(content: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            file_name: Some(file_name.into()),
        }
    }

    /// Content text, with an absent field treated as empty
    pub fn content_text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// Outcome of the domain classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainClassification {
    pub domain: Domain,
    pub reasoning: &'static str,
}

/// Ordered SME questions; never empty, never longer than [`MAX_QUESTIONS`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionSet(Vec<String>);

impl QuestionSet {
    /// Builds a set from a leading question and its follow-ups, truncating to
    /// [`MAX_QUESTIONS`]. The lead makes the set non-empty by construction.
    pub fn new(lead: impl Into<String>, follow_ups: impl IntoIterator<Item = String>) -> Self {
        let questions = std::iter::once(lead.into())
            .chain(follow_ups)
            .take(MAX_QUESTIONS)
            .collect();
        Self(questions)
    }

    pub fn lead(&self) -> &str {
        &self.0[0]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Ordered improvement recommendations; at most [`MAX_RECOMMENDATIONS`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecommendationSet(Vec<String>);

impl RecommendationSet {
    pub fn new(mut recommendations: Vec<String>) -> Self {
        recommendations.truncate(MAX_RECOMMENDATIONS);
        Self(recommendations)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The nested `analysis` object of a successful response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub domain: Domain,
    pub reasoning: &'static str,
    pub summary: String,
    pub recommendations: RecommendationSet,
    pub sme_questions: QuestionSet,
    pub default_frameworks: Vec<PedagogicalFramework>,
    pub available_frameworks: Vec<PedagogicalFramework>,
    pub max_framework_selection: usize,
}

/// Success envelope for one analyzed submission
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub success: bool,
    pub expert: &'static str,
    pub file_name: String,
    pub analysis: AnalysisReport,
    #[serde(serialize_with = "crate::serializers::serialize_iso_millis")]
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_serializes_as_label() {
        let json = serde_json::to_value(Domain::CustomerService).unwrap();
        assert_eq!(json, "Customer Service");
        assert_eq!(Domain::Technology.to_string(), "Technology & Software");
    }

    #[test]
    fn question_set_keeps_lead_and_caps_length() {
        let only = QuestionSet::new("lead", Vec::new());
        assert_eq!(only.len(), 1);
        assert_eq!(only.lead(), "lead");

        let set = QuestionSet::new("lead", (0..12).map(|i| format!("q{i}")));
        assert_eq!(set.len(), MAX_QUESTIONS);
        assert_eq!(set.lead(), "lead");
        assert_eq!(set.as_slice()[7], "q6");
    }

    #[test]
    fn recommendation_set_caps_length() {
        let many: Vec<String> = (0..6).map(|i| format!("r{i}")).collect();
        let set = RecommendationSet::new(many);
        assert_eq!(set.len(), MAX_RECOMMENDATIONS);
        assert!(RecommendationSet::new(Vec::new()).is_empty());
    }

    #[test]
    fn submission_reads_camel_case_fields() {
        let sub: ContentSubmission =
            serde_json::from_str(r#"{"content":"abc","fileName":"a.docx"}"#).unwrap();
        assert_eq!(sub.content_text(), "abc");
        assert_eq!(sub.file_name.as_deref(), Some("a.docx"));

        let empty: ContentSubmission = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.content_text(), "");
        assert_eq!(empty.file_name, None);
    }
}
