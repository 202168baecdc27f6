//! Monitoring hooks: one persisted row per AI interaction, with alerts
//! raised on low compliance scores.

use regex::Regex;
use xxhash_rust::xxh3::xxh3_64;

use railguard_core::epoch_secs;
use railguard_core::config::MonitoringConfig;
use railguard_core::errors::StorageError;
use railguard_core::types::{AlertLevel, ComplianceAlert, InteractionRecord, OutputContext};
use railguard_storage::queries::{alerts, interactions, metrics};
use railguard_storage::DatabaseManager;

/// Simplified advice detection for scoring (the neutralizer owns the full
/// table; monitoring only needs a signal).
const ADVICE_MARKERS: &[&str] = &[
    r"(?i)\byou should\b",
    r"(?i)\byou must\b",
    r"(?i)\b(?:i|we) recommend\b",
    r"(?i)\b(?:i|we) advise\b",
];

/// The four disclaimer marker phrases; any one counts as a disclaimer.
const DISCLAIMER_MARKERS: &[&str] = &[
    "DISCLAIMER",
    "not legal advice",
    "informational purposes",
    "consult a licensed attorney",
];

/// Persists interaction rows and raises compliance alerts.
pub struct MonitoringHooks<'a> {
    db: &'a DatabaseManager,
    config: MonitoringConfig,
    advice_regexes: Vec<Regex>,
}

impl<'a> MonitoringHooks<'a> {
    pub fn new(db: &'a DatabaseManager, config: MonitoringConfig) -> Self {
        let advice_regexes = ADVICE_MARKERS
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect();
        Self {
            db,
            config,
            advice_regexes,
        }
    }

    /// Log one interaction and return its id.
    ///
    /// Raises a `ComplianceAlert` when the score falls below the alert
    /// threshold, the disclaimer is missing, or advice language was
    /// detected. Alerts are never auto-resolved.
    pub fn log_interaction(
        &self,
        prompt: &str,
        response: &str,
        ctx: &OutputContext,
        processing_time_ms: u64,
        error_occurred: bool,
    ) -> Result<String, StorageError> {
        let timestamp = epoch_secs();
        let contains_advice = self.advice_regexes.iter().any(|re| re.is_match(response));
        let has_disclaimer = DISCLAIMER_MARKERS.iter().any(|m| response.contains(m));
        let compliance_score = score(response.len(), contains_advice, has_disclaimer);

        let interaction_id = format!(
            "{:016x}",
            xxh3_64(format!("{prompt}\u{1f}{response}\u{1f}{timestamp}").as_bytes())
        );
        let record = InteractionRecord {
            interaction_id: interaction_id.clone(),
            timestamp,
            user_id: ctx.user_id.clone(),
            session_id: ctx.session_id.clone(),
            model_name: ctx.model_name.clone(),
            prompt_hash: format!("{:016x}", xxh3_64(prompt.as_bytes())),
            response_hash: format!("{:016x}", xxh3_64(response.as_bytes())),
            response_length: response.len() as u64,
            contains_advice,
            has_disclaimer,
            compliance_score,
            processing_time_ms,
            feature_flags_used: ctx.feature_flags_used.clone(),
            error_occurred,
        };
        self.db
            .with_conn(|conn| interactions::insert_interaction(conn, &record))?;

        let threshold = self.config.effective_alert_threshold();
        if compliance_score < threshold || !has_disclaimer || contains_advice {
            let level = if compliance_score < self.config.effective_critical_threshold() {
                AlertLevel::Critical
            } else {
                AlertLevel::Warning
            };
            let alert = ComplianceAlert {
                alert_id: format!("alert-{interaction_id}"),
                timestamp,
                level,
                alert_type: "interaction_compliance".to_string(),
                message: format!(
                    "interaction {interaction_id} scored {compliance_score:.2} (threshold {threshold:.2})"
                ),
                details: serde_json::json!({
                    "compliance_score": compliance_score,
                    "contains_advice": contains_advice,
                    "has_disclaimer": has_disclaimer,
                }),
                resolved: false,
            };
            self.db.with_conn(|conn| alerts::insert_alert(conn, &alert))?;
            tracing::warn!(
                interaction_id = %interaction_id,
                score = compliance_score,
                level = level.as_str(),
                "compliance alert raised"
            );
        }

        Ok(interaction_id)
    }

    /// Upsert the rollup row for the day containing `now`.
    pub fn rollup_day(&self, now: u64) -> Result<(), StorageError> {
        let day_start = now - (now % 86_400);
        let day_end = day_start + 86_400;
        let (count, avg) = self
            .db
            .with_conn(|conn| interactions::day_stats(conn, day_start, day_end))?;
        let alert_count = self
            .db
            .with_conn(|conn| alerts::count_in_window(conn, day_start, day_end))?;
        let row = metrics::DailyMetricRow {
            day: day_label(day_start),
            interaction_count: count,
            avg_compliance_score: avg,
            alert_count,
        };
        self.db.with_conn(|conn| metrics::upsert_daily(conn, &row))
    }
}

/// Compliance score: start at 1.0, subtract 0.5 for a missing disclaimer,
/// 0.3 for advice language, and a further 0.2 for a long (>500 char)
/// response with no disclaimer. Clamped to [0, 1].
fn score(response_len: usize, contains_advice: bool, has_disclaimer: bool) -> f64 {
    let mut score: f64 = 1.0;
    if !has_disclaimer {
        score -= 0.5;
    }
    if contains_advice {
        score -= 0.3;
    }
    if response_len > 500 && !has_disclaimer {
        score -= 0.2;
    }
    score.clamp(0.0, 1.0)
}

/// `YYYY-MM-DD` label for a day-start epoch, via civil-date conversion.
fn day_label(day_start: u64) -> String {
    let days = (day_start / 86_400) as i64;
    let (y, m, d) = civil_from_days(days);
    format!("{y:04}-{m:02}-{d:02}")
}

/// Days-since-epoch to (year, month, day). Howard Hinnant's algorithm.
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    (if m <= 2 { y + 1 } else { y }, m, d)
}
