//! Disclaimer wrapping: every end-user text passes through here exactly
//! once. Double-wrapping is detected and skipped.

use railguard_core::epoch_secs;
use railguard_core::errors::RailsError;
use railguard_core::types::{ComplianceLevel, GeneratedOutput, OutputContext};
use xxhash_rust::xxh3::xxh3_64;

/// Marker glyph present in every disclaimer template. The idempotence
/// guard requires both this glyph and the literal `DISCLAIMER`.
pub const DISCLAIMER_MARKER: char = '⚖';

const LEGAL_TEMPLATE: &str = "⚖ DISCLAIMER: This content was generated by an automated system \
and discusses legal topics for informational purposes only. It is not legal advice, does not \
create an attorney-client relationship, and may not reflect current law in your jurisdiction. \
Consult a licensed attorney before acting on any of this material.";

const GENERAL_TEMPLATE: &str = "⚖ DISCLAIMER: This content was generated by an automated \
system for informational purposes only and is not legal advice.";

/// Keywords counted during legal/general classification.
const LEGAL_KEYWORDS: &[&str] = &[
    "court",
    "plaintiff",
    "defendant",
    "statute",
    "liability",
    "contract",
    "lawsuit",
    "attorney",
    "motion",
    "filing",
    "evidence",
    "testimony",
    "settlement",
    "damages",
    "jurisdiction",
];

/// Classification outcome for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextClass {
    Legal,
    General,
}

/// Wraps generated text with the appropriate disclaimer template.
pub struct DisclaimerWrapper {
    level: ComplianceLevel,
}

impl DisclaimerWrapper {
    pub fn new(level: ComplianceLevel) -> Self {
        Self { level }
    }

    /// Classify text as legal or general.
    ///
    /// Legal when the lowercased text contains ≥ 3 legal keyword hits or
    /// is longer than 200 characters.
    pub fn classify(&self, text: &str) -> TextClass {
        let lower = text.to_lowercase();
        let hits: usize = LEGAL_KEYWORDS
            .iter()
            .map(|kw| lower.matches(kw).count())
            .sum();
        if hits >= 3 || text.chars().count() > 200 {
            TextClass::Legal
        } else {
            TextClass::General
        }
    }

    /// Wrap text with a disclaimer and footer.
    ///
    /// Idempotent: text already carrying the marker glyph and the literal
    /// `DISCLAIMER` is returned unchanged, so `wrap(wrap(t)) == wrap(t)`.
    pub fn wrap(&self, text: &str, context: &OutputContext) -> String {
        if text.contains(DISCLAIMER_MARKER) && text.contains("DISCLAIMER") {
            return text.to_string();
        }

        let template = match self.classify(text) {
            TextClass::Legal => LEGAL_TEMPLATE,
            TextClass::General => GENERAL_TEMPLATE,
        };
        let session = if context.session_id.is_empty() {
            "unknown"
        } else {
            &context.session_id
        };
        let footer = format!(
            "Generated at {} | session {} | automated output, not reviewed by an attorney",
            epoch_secs(),
            session
        );
        format!("{template}\n\n{text}\n\n{footer}")
    }

    /// Explicit pipeline stage: wrap a tagged output value.
    ///
    /// Both variants carry wrappable text, so this cannot bypass; callers
    /// holding an un-representable shape must go through
    /// [`report_bypass`](Self::report_bypass) instead of inventing a variant.
    pub fn apply(
        &self,
        output: &GeneratedOutput,
        context: &OutputContext,
    ) -> Result<String, RailsError> {
        Ok(self.wrap(output.text(), context))
    }

    /// Record an output shape the pipeline could not wrap.
    ///
    /// Logs the content hash and a truncated preview. Under
    /// `ComplianceLevel::Strict` this is an error; under other levels the
    /// caller passes the raw value through.
    pub fn report_bypass(&self, raw: &str) -> Result<(), RailsError> {
        let content_hash = format!("{:016x}", xxh3_64(raw.as_bytes()));
        let preview: String = raw.chars().take(80).collect();
        tracing::warn!(%content_hash, preview = %preview, "disclaimer bypass attempt");

        if self.level == ComplianceLevel::Strict {
            return Err(RailsError::BypassDetected {
                content_hash,
                preview,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapper() -> DisclaimerWrapper {
        DisclaimerWrapper::new(ComplianceLevel::Strict)
    }

    #[test]
    fn short_nonlegal_text_gets_general_template() {
        let w = wrapper();
        assert_eq!(w.classify("the sky is blue"), TextClass::General);
    }

    #[test]
    fn keyword_density_triggers_legal_template() {
        let w = wrapper();
        let text = "The plaintiff filed a motion; the court weighed the evidence.";
        assert_eq!(w.classify(text), TextClass::Legal);
    }

    #[test]
    fn long_text_is_legal_regardless_of_keywords() {
        let w = wrapper();
        let text = "x".repeat(201);
        assert_eq!(w.classify(&text), TextClass::Legal);
    }

    #[test]
    fn length_threshold_counts_characters_not_bytes() {
        let w = wrapper();
        // 80 characters, 240 bytes: still short text.
        assert_eq!(w.classify(&"⚖".repeat(80)), TextClass::General);
        assert_eq!(w.classify(&"é".repeat(201)), TextClass::Legal);
    }

    #[test]
    fn strict_bypass_is_an_error() {
        let w = wrapper();
        assert!(w.report_bypass("weird shape").is_err());
    }

    #[test]
    fn moderate_bypass_logs_and_continues() {
        let w = DisclaimerWrapper::new(ComplianceLevel::Moderate);
        assert!(w.report_bypass("weird shape").is_ok());
    }
}
