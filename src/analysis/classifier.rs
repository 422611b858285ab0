//! Domain classification for uploaded training content.
//!
//! Classification is a first-match walk over an ordered keyword table. Rule
//! order decides ties: content that mentions both `clinical` and `software`
//! is Healthcare because the healthcare rule comes first. Keyword counts play
//! no part.

use super::types::{Domain, DomainClassification};

/// One row of the classification table
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    pub domain: Domain,
    pub keywords: &'static [&'static str],
    pub reasoning: &'static str,
}

impl ClassificationRule {
    /// True if any keyword occurs in `normalized` (already lowercased)
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|k| normalized.contains(k))
    }

    pub const fn classification(&self) -> DomainClassification {
        DomainClassification {
            domain: self.domain,
            reasoning: self.reasoning,
        }
    }
}

/// Ordered classification rules; the first match wins
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        domain: Domain::Healthcare,
        keywords: &["health", "medical", "patient", "clinical"],
        reasoning: "Content contains healthcare-specific terminology and medical education concepts",
    },
    ClassificationRule {
        domain: Domain::Technology,
        keywords: &["software", "code", "programming", "tech"],
        reasoning: "Content focuses on technical skills and software development concepts",
    },
    ClassificationRule {
        domain: Domain::Business,
        keywords: &["business", "management", "corporate", "strategy"],
        reasoning: "Content addresses business processes and organizational development",
    },
    ClassificationRule {
        domain: Domain::Compliance,
        keywords: &["compliance", "regulation", "policy", "legal"],
        reasoning: "Content covers regulatory requirements and compliance procedures",
    },
    ClassificationRule {
        domain: Domain::CustomerService,
        keywords: &["customer", "service", "support"],
        reasoning: "Content emphasizes customer interaction and service excellence",
    },
];

/// Returned when no rule matches
pub const FALLBACK_CLASSIFICATION: DomainClassification = DomainClassification {
    domain: Domain::ProfessionalDevelopment,
    reasoning: "Content addresses general professional skills and knowledge development",
};

/// Classify content against [`CLASSIFICATION_RULES`].
///
/// Total over all inputs, including the empty string.
///
/// # Examples
/// ```
/// use coursecraft::analysis::{classify, Domain};
///
/// assert_eq!(classify("Patient intake basics").domain, Domain::Healthcare);
/// assert_eq!(classify("").domain, Domain::ProfessionalDevelopment);
/// ```
pub fn classify(content: &str) -> DomainClassification {
    classify_with(content, CLASSIFICATION_RULES)
}

/// First-match classification over an arbitrary rule table
pub fn classify_with(content: &str, rules: &[ClassificationRule]) -> DomainClassification {
    let normalized = content.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&normalized))
        .map(ClassificationRule::classification)
        .unwrap_or(FALLBACK_CLASSIFICATION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_rule_matches_its_keywords() {
        for rule in CLASSIFICATION_RULES {
            for kw in rule.keywords {
                let text = format!("An overview of {kw} topics");
                let got = classify(&text);
                // A later rule's keyword may also trip an earlier one; the
                // earlier rule must win in that case.
                let expected = CLASSIFICATION_RULES
                    .iter()
                    .find(|r| r.matches(&text.to_lowercase()))
                    .map(|r| r.domain);
                assert_eq!(Some(got.domain), expected, "keyword {kw}");
            }
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("MEDICAL Terminology").domain, Domain::Healthcare);
        assert_eq!(classify("Corporate Onboarding").domain, Domain::Business);
    }

    #[test]
    fn test_first_match_wins_over_count() {
        // One healthcare keyword beats three technology keywords
        let c = classify("software code programming for clinical staff");
        assert_eq!(c.domain, Domain::Healthcare);
        assert_eq!(
            classify("clinical software training").domain,
            Domain::Healthcare
        );
        assert_eq!(
            classify("legal and customer support").domain,
            Domain::Compliance
        );
    }

    #[test]
    fn test_substring_semantics() {
        // "technique" contains "tech"; "codes" contains "code"
        assert_eq!(classify("Painting technique").domain, Domain::Technology);
        assert_eq!(classify("Dress codes").domain, Domain::Technology);
        // "services" contains "service"
        assert_eq!(classify("Vehicle services").domain, Domain::CustomerService);
    }

    #[test]
    fn test_fallback() {
        assert_eq!(classify(""), FALLBACK_CLASSIFICATION);
        assert_eq!(
            classify("Leadership and communication skills").domain,
            Domain::ProfessionalDevelopment
        );
    }

    #[test]
    fn test_reasoning_is_fixed_per_rule() {
        let a = classify("health");
        let b = classify("clinical trials and patients");
        assert_eq!(a.reasoning, b.reasoning);
        assert_eq!(a.reasoning, CLASSIFICATION_RULES[0].reasoning);
    }

    #[test]
    fn test_classify_with_custom_table() {
        let rules = [ClassificationRule {
            domain: Domain::CustomerService,
            keywords: &["helpdesk"],
            reasoning: "custom",
        }];
        let c = classify_with("Helpdesk escalation", &rules);
        assert_eq!(c.domain, Domain::CustomerService);
        assert_eq!(c.reasoning, "custom");
        assert_eq!(classify_with("medical", &rules), FALLBACK_CLASSIFICATION);
        assert_eq!(classify_with("anything", &[]), FALLBACK_CLASSIFICATION);
    }
}
