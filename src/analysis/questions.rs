//! SME question generation.

use super::types::{Domain, DomainClassification, QuestionSet};

/// Always the first question in every set
pub const AUDIENCE_QUESTION: &str = "Who is the target audience for this training material?";

/// Follow-up tracks; every domain maps onto exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionTrack {
    Healthcare,
    Technology,
    Business,
    General,
}

impl QuestionTrack {
    pub fn for_domain(domain: Domain) -> Self {
        match domain {
            Domain::Healthcare => QuestionTrack::Healthcare,
            Domain::Technology => QuestionTrack::Technology,
            Domain::Business => QuestionTrack::Business,
            Domain::Compliance | Domain::CustomerService | Domain::ProfessionalDevelopment => {
                QuestionTrack::General
            }
        }
    }

    pub const fn follow_ups(self) -> &'static [&'static str] {
        match self {
            QuestionTrack::Healthcare => &[
                "What clinical competencies should learners demonstrate?",
                "Are there specific patient safety considerations to address?",
                "What regulatory compliance requirements must be met?",
            ],
            QuestionTrack::Technology => &[
                "What technical proficiency level is expected?",
                "Are hands-on practice exercises required?",
                "What tools or platforms will learners need access to?",
            ],
            QuestionTrack::Business => &[
                "What business outcomes should this training achieve?",
                "How will learner performance be measured?",
                "What real-world scenarios should be included?",
            ],
            QuestionTrack::General => &[
                "What practical skills should learners be able to demonstrate?",
                "How will knowledge retention be assessed?",
                "What follow-up support will learners need?",
            ],
        }
    }
}

/// Build the SME question set for a classified submission.
///
/// `_content` does not influence the output; questions depend on the domain only.
pub fn generate_questions(_content: &str, classification: &DomainClassification) -> QuestionSet {
    let track = QuestionTrack::for_domain(classification.domain);
    QuestionSet::new(
        AUDIENCE_QUESTION,
        track.follow_ups().iter().map(|q| q.to_string()),
    )
}
