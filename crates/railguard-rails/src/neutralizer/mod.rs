//! Advice neutralization: ordered regex substitution converting advisory
//! phrasing into descriptive phrasing.

pub mod patterns;

use regex::Regex;

use self::patterns::{ADVICE_PATTERNS, BORDERLINE_PATTERNS};

/// Result of a plain neutralization pass.
#[derive(Debug, Clone)]
pub struct NeutralizedText {
    pub text: String,
    /// Human-readable descriptions of applied substitutions, in order.
    pub transformations: Vec<String>,
    /// Borderline phrases found (recorded, never transformed).
    pub borderline: Vec<String>,
}

/// Full scan report with risk scoring.
#[derive(Debug, Clone)]
pub struct NeutralizationReport {
    pub original_text: String,
    pub neutralized_text: String,
    pub transformations: Vec<String>,
    pub borderline: Vec<String>,
    pub risk_score: u32,
    pub requires_human_review: bool,
}

struct CompiledPattern {
    regex: Regex,
    replacement: &'static str,
}

/// Ordered regex-substitution engine for advice language.
pub struct AdviceNeutralizer {
    advice: Vec<CompiledPattern>,
    borderline: Vec<Regex>,
}

impl AdviceNeutralizer {
    /// Create a neutralizer with the built-in ordered tables.
    pub fn new() -> Self {
        // Tables hold hand-checked patterns; a non-compiling entry is a
        // programming error caught by the conformance tests, so it is
        // skipped rather than panicking at construction.
        let advice = ADVICE_PATTERNS
            .iter()
            .filter_map(|p| {
                Regex::new(&format!("(?i){}", p.pattern))
                    .ok()
                    .map(|regex| CompiledPattern {
                        regex,
                        replacement: p.replacement,
                    })
            })
            .collect();
        let borderline = BORDERLINE_PATTERNS
            .iter()
            .filter_map(|p| Regex::new(&format!("(?i){p}")).ok())
            .collect();
        Self { advice, borderline }
    }

    /// Apply the ordered substitution table and record borderline phrases.
    ///
    /// Empty input is returned unchanged with empty lists; this never
    /// errors on normal text.
    pub fn neutralize(&self, text: &str) -> NeutralizedText {
        if text.is_empty() {
            return NeutralizedText {
                text: String::new(),
                transformations: Vec::new(),
                borderline: Vec::new(),
            };
        }

        let mut current = text.to_string();
        let mut transformations = Vec::new();

        // List order is the contract: apply each pattern fully before the next.
        for pattern in &self.advice {
            if pattern.regex.is_match(&current) {
                let matched: Vec<String> = pattern
                    .regex
                    .find_iter(&current)
                    .map(|m| m.as_str().to_string())
                    .collect();
                current = pattern
                    .regex
                    .replace_all(&current, pattern.replacement)
                    .into_owned();
                for m in matched {
                    transformations.push(format!("\"{m}\" -> \"{}\"", pattern.replacement));
                }
            }
        }

        let borderline = self
            .borderline
            .iter()
            .flat_map(|re| re.find_iter(&current).map(|m| m.as_str().to_string()))
            .collect();

        NeutralizedText {
            text: current,
            transformations,
            borderline,
        }
    }

    /// Neutralize and compute the risk report.
    ///
    /// `risk_score = 2 * transformations + borderline`. Human review is
    /// required when the caller demands it, when the score exceeds 5, when
    /// more than 3 substitutions fired, or when the original text mentions
    /// "legal advice" (case-insensitive).
    pub fn scan_and_neutralize(&self, text: &str, require_review: bool) -> NeutralizationReport {
        let outcome = self.neutralize(text);
        let risk_score = 2 * outcome.transformations.len() as u32 + outcome.borderline.len() as u32;
        let mentions_legal_advice = text.to_lowercase().contains("legal advice");
        let requires_human_review = require_review
            || risk_score > 5
            || outcome.transformations.len() > 3
            || mentions_legal_advice;

        if requires_human_review {
            tracing::debug!(
                risk_score,
                transformations = outcome.transformations.len(),
                "neutralization flagged for human review"
            );
        }

        NeutralizationReport {
            original_text: text.to_string(),
            neutralized_text: outcome.text,
            transformations: outcome.transformations,
            borderline: outcome.borderline,
            risk_score,
            requires_human_review,
        }
    }
}

impl Default for AdviceNeutralizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_table_patterns_compile() {
        for p in ADVICE_PATTERNS {
            assert!(Regex::new(&format!("(?i){}", p.pattern)).is_ok(), "{}", p.pattern);
        }
        for p in BORDERLINE_PATTERNS {
            assert!(Regex::new(&format!("(?i){p}")).is_ok(), "{p}");
        }
    }

    #[test]
    fn empty_input_passes_through() {
        let n = AdviceNeutralizer::new();
        let out = n.neutralize("");
        assert_eq!(out.text, "");
        assert!(out.transformations.is_empty());
        assert!(out.borderline.is_empty());
    }

    #[test]
    fn case_insensitive_matching() {
        let n = AdviceNeutralizer::new();
        let out = n.neutralize("YOU SHOULD appeal");
        assert_eq!(out.text, "parties typically appeal");
        assert_eq!(out.transformations.len(), 1);
    }
}
