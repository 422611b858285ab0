//! Content analysis: domain classification, SME questions, and recommendations.
//! Deterministic keyword heuristics; no state survives between calls.

pub mod classifier;
pub mod frameworks;
pub mod questions;
pub mod recommendations;
pub mod types;

pub use classifier::{CLASSIFICATION_RULES, ClassificationRule, classify, classify_with};
pub use frameworks::{
    DEFAULT_FRAMEWORKS, FrameworkCatalog, MAX_FRAMEWORK_SELECTION, PedagogicalFramework,
};
pub use questions::{AUDIENCE_QUESTION, generate_questions};
pub use recommendations::generate_recommendations;
pub use types::{
    AnalysisReport, AnalysisResult, ContentSubmission, Domain, DomainClassification,
    MAX_QUESTIONS, MAX_RECOMMENDATIONS, QuestionSet, RecommendationSet,
};

use crate::deserializers::json_type_name;
use crate::error::{CourseCraftError, Result};
use tracing::debug;

/// Display name of the reviewing expert attached to every result
pub const EXPERT_NAME: &str = "Dr. Elena Rodriguez";

/// File name reported when the caller sends none
pub const DEFAULT_FILE_NAME: &str = "uploaded-file";

/// Analyze one submission.
///
/// Runs the classifier, then the question generator, then the recommendation
/// generator, and assembles the success envelope. A missing `content` is
/// analyzed as the empty string; a missing or empty `fileName` becomes
/// [`DEFAULT_FILE_NAME`].
pub fn analyze(submission: &ContentSubmission) -> Result<AnalysisResult> {
    let content = submission.content_text();
    let file_name = submission
        .file_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_FILE_NAME);

    let classification = classify(content);
    let sme_questions = generate_questions(content, &classification);
    let recommendations = generate_recommendations(content, &classification);

    check_invariants(&sme_questions, &recommendations)?;

    debug!(
        domain = %classification.domain,
        questions = sme_questions.len(),
        recommendations = recommendations.len(),
        content_chars = content.chars().count(),
        "content analyzed"
    );

    let catalog = FrameworkCatalog::standard();
    Ok(AnalysisResult {
        success: true,
        expert: EXPERT_NAME,
        file_name: file_name.to_string(),
        analysis: AnalysisReport {
            domain: classification.domain,
            reasoning: classification.reasoning,
            summary: summary_for(classification.domain),
            recommendations,
            sme_questions,
            default_frameworks: catalog.default_frameworks,
            available_frameworks: catalog.available_frameworks,
            max_framework_selection: catalog.max_framework_selection,
        },
        timestamp: chrono::Utc::now(),
    })
}

/// Analyze a raw JSON request payload.
///
/// Anything other than a JSON object (including `null`) carries no fields and
/// is analyzed like `{}`. Falsy `content` counts as absent and a non-string
/// `fileName` falls back to [`DEFAULT_FILE_NAME`]. Only a truthy `content`
/// that is not a string is rejected as a validation fault.
pub fn analyze_payload(payload: serde_json::Value) -> Result<AnalysisResult> {
    let submission = match payload {
        serde_json::Value::Object(map) => {
            serde_json::from_value::<ContentSubmission>(serde_json::Value::Object(map)).map_err(
                |e| CourseCraftError::Validation {
                    message: e.to_string(),
                },
            )?
        }
        other => {
            debug!(
                "payload is a JSON {}, analyzing as an empty submission",
                json_type_name(&other)
            );
            ContentSubmission::default()
        }
    };
    analyze(&submission)
}

/// Fixed-template summary line for a domain
pub fn summary_for(domain: Domain) -> String {
    format!("Professional analysis completed for {} content.", domain)
}

fn check_invariants(questions: &QuestionSet, recommendations: &RecommendationSet) -> Result<()> {
    if questions.is_empty() || questions.len() > MAX_QUESTIONS {
        return Err(CourseCraftError::Analysis {
            message: format!("question set has {} entries", questions.len()),
        });
    }
    if questions.lead() != AUDIENCE_QUESTION {
        return Err(CourseCraftError::Analysis {
            message: "question set does not lead with the audience question".to_string(),
        });
    }
    if recommendations.len() > MAX_RECOMMENDATIONS {
        return Err(CourseCraftError::Analysis {
            message: format!(
                "recommendation set has {} entries",
                recommendations.len()
            ),
        });
    }
    Ok(())
}
