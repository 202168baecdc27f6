//! Check 4: disclaimer coverage (blocking on failure). Internal
//! errors degrade to a warning because the measurement itself is
//! best-effort.

use railguard_core::types::{CheckResult, OutputContext};

use crate::disclaimer::{DisclaimerWrapper, DISCLAIMER_MARKER};

use super::{CheckContext, SafetyCheck};

const CHECK_NAME: &str = "disclaimer_coverage";

/// Fixed sample inputs covering both classification branches.
const SAMPLES: &[&str] = &[
    "The weather is pleasant today.",
    "The plaintiff filed a motion and the court reviewed the evidence before the settlement.",
    "Short note.",
];

pub struct DisclaimerCoverageCheck;

impl SafetyCheck for DisclaimerCoverageCheck {
    fn name(&self) -> &'static str {
        CHECK_NAME
    }

    fn blocking(&self) -> bool {
        true
    }

    fn run(&self, ctx: &CheckContext) -> CheckResult {
        let wrapper = DisclaimerWrapper::new(ctx.level);
        let context = OutputContext {
            session_id: "precommit-sample".to_string(),
            ..Default::default()
        };

        let mut missing = Vec::new();
        for sample in SAMPLES {
            // A panicking wrapper must degrade to a warning, not abort
            // the battery.
            let wrapped = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                wrapper.wrap(sample, &context)
            }));
            match wrapped {
                Ok(text) if text.contains(DISCLAIMER_MARKER) => {}
                Ok(_) => missing.push(sample.to_string()),
                Err(_) => {
                    return CheckResult::warning(
                        CHECK_NAME,
                        "disclaimer wrapper errored on a sample; coverage unverified",
                    );
                }
            }
        }

        if missing.is_empty() {
            CheckResult::pass(CHECK_NAME, format!("{} samples wrapped", SAMPLES.len()))
        } else {
            CheckResult::fail(
                CHECK_NAME,
                format!("{} samples missing disclaimer marker", missing.len()),
                true,
            )
            .with_details(serde_json::json!({ "missing": missing }))
        }
    }
}
