//! Advice and borderline phrase tables.
//!
//! The neutralization table is ORDERED: substitutions are applied in list
//! order, and later patterns may match text adjacent to earlier
//! replacements. Reordering entries changes output.

/// One advice phrase and its neutral replacement.
pub struct AdvicePattern {
    pub pattern: &'static str,
    pub replacement: &'static str,
}

/// Ordered advice → neutral substitution table. All patterns are compiled
/// case-insensitively.
pub const ADVICE_PATTERNS: &[AdvicePattern] = &[
    AdvicePattern {
        pattern: r"\byou should\b",
        replacement: "parties typically",
    },
    AdvicePattern {
        pattern: r"\byou must\b",
        replacement: "parties are generally required to",
    },
    AdvicePattern {
        pattern: r"\byou need to\b",
        replacement: "it is common to",
    },
    AdvicePattern {
        pattern: r"\b(?:i|we) recommend\b",
        replacement: "common practice includes",
    },
    AdvicePattern {
        pattern: r"\b(?:i|we) advise\b",
        replacement: "published guidance describes",
    },
    AdvicePattern {
        pattern: r"\b(?:i|we) suggest\b",
        replacement: "one documented approach is",
    },
    AdvicePattern {
        pattern: r"\byour best option is\b",
        replacement: "one available option is",
    },
    AdvicePattern {
        pattern: r"\bmake sure you\b",
        replacement: "parties often",
    },
    AdvicePattern {
        pattern: r"\bdo not sign\b",
        replacement: "signing carries considerations; parties sometimes decline to sign",
    },
    AdvicePattern {
        pattern: r"\byou are entitled to\b",
        replacement: "the law in some circumstances provides for",
    },
    AdvicePattern {
        pattern: r"\byou have a strong case\b",
        replacement: "similar fact patterns have sometimes succeeded",
    },
    AdvicePattern {
        pattern: r"\byou will win\b",
        replacement: "outcomes vary by jurisdiction and facts",
    },
];

/// Ordered borderline (hedged) phrase table. These are never transformed,
/// only recorded for human review.
pub const BORDERLINE_PATTERNS: &[&str] = &[
    r"\byou may want to\b",
    r"\byou might consider\b",
    r"\bit would be wise\b",
    r"\bit may be advisable\b",
    r"\bprobably should\b",
    r"\bthe best course of action\b",
    r"\bin your situation\b",
    r"\bfor your case\b",
];
