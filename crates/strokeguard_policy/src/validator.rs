//! Humanization validator.
//!
//! Three independent rules are applied to the whole log:
//!
//! 1. `humanization`: the average circle count per color segment must reach
//!    the policy minimum. Logs with no color change, a single color change,
//!    or an average of exactly zero pass.
//! 2. `exact_color`: `#...` and `rgb...` colors are refused unless the policy
//!    allows them.
//! 3. `brush_size`: every circle radius must reach the policy minimum.
//!
//! The rules share no state, so the verdict does not depend on the order they
//! run in. When several fail, the reported reason is the first failing rule in
//! the order above.

use crate::policy::ValidationPolicy;
use crate::stats::LogStats;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use strokeguard_core::{StrokeCommand, StrokeLog};
use strokeguard_log::{decode_text, CodecResult};
use tracing::debug;

/// Name of the average set-color distance rule
pub const CHECK_HUMANIZATION: &str = "humanization";
/// Name of the literal color rule
pub const CHECK_EXACT_COLOR: &str = "exact_color";
/// Name of the minimum radius rule
pub const CHECK_BRUSH_SIZE: &str = "brush_size";

/// Why a log was refused
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    /// A literal hex or rgb color was used
    ExactColorRejected {
        /// The offending color
        color: String,
    },
    /// A circle was thinner than allowed
    BrushTooSmall {
        /// The offending radius
        radius: u32,
        /// Policy minimum
        minimum: u32,
    },
    /// Too few circles between color changes
    LowHumanizationScore {
        /// Measured average
        average: f64,
        /// Policy minimum
        minimum: f64,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactColorRejected { color } => write!(f, "exact color {} not allowed", color),
            Self::BrushTooSmall { radius, minimum } => {
                write!(f, "brush radius {} below minimum {}", radius, minimum)
            }
            Self::LowHumanizationScore { average, minimum } => write!(
                f,
                "average set-color distance {} below minimum {}",
                average, minimum
            ),
        }
    }
}

/// Outcome of validating a log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "detail", rename_all = "snake_case")]
pub enum Verdict {
    /// The log may be replayed onto a trusted surface
    Accepted,
    /// The log must not be replayed
    Rejected(RejectionReason),
}

impl Verdict {
    /// Check if accepted
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Rejection reason, if rejected
    #[must_use]
    pub const fn reason(&self) -> Option<&RejectionReason> {
        match self {
            Self::Accepted => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

/// A single rule evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationCheck {
    /// Rule name
    pub name: String,
    /// Whether the rule passed
    pub passed: bool,
    /// Human-readable outcome
    pub message: String,
    /// Reason to report if this rule decides the verdict
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<RejectionReason>,
}

impl ValidationCheck {
    /// Create a passed check
    #[must_use]
    pub fn passed(name: &str, message: String) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message,
            rejection: None,
        }
    }

    /// Create a failed check
    #[must_use]
    pub fn failed(name: &str, reason: RejectionReason) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: reason.to_string(),
            rejection: Some(reason),
        }
    }
}

/// Every rule's outcome for one log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Rule outcomes in evaluation order
    pub checks: Vec<ValidationCheck>,
    /// Measured statistics
    pub stats: LogStats,
    /// Additional details
    pub details: IndexMap<String, String>,
}

impl ValidationReport {
    /// Create an empty report for the given statistics
    #[must_use]
    pub fn new(stats: LogStats) -> Self {
        Self {
            checks: Vec::new(),
            stats,
            details: IndexMap::new(),
        }
    }

    /// Add a check
    #[must_use]
    pub fn with_check(mut self, check: ValidationCheck) -> Self {
        self.checks.push(check);
        self
    }

    /// Add detail
    #[must_use]
    pub fn with_detail(mut self, key: &str, value: String) -> Self {
        self.details.insert(key.to_string(), value);
        self
    }

    /// Whether every check passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Overall verdict: the first failing check decides
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        self.checks
            .iter()
            .find_map(|c| c.rejection.clone())
            .map_or(Verdict::Accepted, Verdict::Rejected)
    }

    /// Failed checks
    #[must_use]
    pub fn failed_checks(&self) -> Vec<&ValidationCheck> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }

    /// One-line summary
    #[must_use]
    pub fn summary(&self) -> String {
        let passed_count = self.checks.iter().filter(|c| c.passed).count();
        format!(
            "Validation {}: {}/{} checks passed, {} circles, {} color changes",
            if self.passed() { "PASSED" } else { "FAILED" },
            passed_count,
            self.checks.len(),
            self.stats.circle_count,
            self.stats.set_color_count
        )
    }
}

/// Validator bound to one immutable policy
#[derive(Debug, Clone, PartialEq)]
pub struct HumanizationValidator {
    policy: ValidationPolicy,
}

impl HumanizationValidator {
    /// Create a validator
    #[must_use]
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    /// The policy in force
    #[must_use]
    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Evaluate every rule against `log`
    #[must_use]
    pub fn validate(&self, log: &StrokeLog) -> ValidationReport {
        let stats = LogStats::compute(log);
        let average = stats
            .average_set_color_distance
            .map_or_else(|| "undefined".to_string(), |a| a.to_string());

        let report = ValidationReport::new(stats.clone())
            .with_check(self.check_humanization(&stats))
            .with_check(self.check_exact_color(log))
            .with_check(self.check_brush_size(log))
            .with_detail("average_set_color_distance", average)
            .with_detail("commands", log.len().to_string());

        debug!(
            passed = report.passed(),
            circles = report.stats.circle_count,
            colors = report.stats.set_color_count,
            "log validated"
        );
        report
    }

    /// Decode a text log and evaluate it
    ///
    /// # Errors
    ///
    /// Returns error if the text does not decode
    pub fn validate_text(&self, text: &str) -> CodecResult<ValidationReport> {
        let log = decode_text(text)?;
        Ok(self.validate(&log))
    }

    /// Accept or reject `log`
    #[must_use]
    pub fn accept(&self, log: &StrokeLog) -> Verdict {
        self.validate(log).verdict()
    }

    fn check_humanization(&self, stats: &LogStats) -> ValidationCheck {
        let Some(minimum) = self.policy.min_average_set_color_distance else {
            return ValidationCheck::passed(CHECK_HUMANIZATION, "not enforced".to_string());
        };
        match stats.average_set_color_distance {
            None => ValidationCheck::passed(CHECK_HUMANIZATION, "no color changes".to_string()),
            Some(average) if average == 0.0 => {
                ValidationCheck::passed(CHECK_HUMANIZATION, "average is zero".to_string())
            }
            Some(average) if average < minimum => ValidationCheck::failed(
                CHECK_HUMANIZATION,
                RejectionReason::LowHumanizationScore { average, minimum },
            ),
            Some(average) => ValidationCheck::passed(
                CHECK_HUMANIZATION,
                format!("average {} meets minimum {}", average, minimum),
            ),
        }
    }

    fn check_exact_color(&self, log: &StrokeLog) -> ValidationCheck {
        if self.policy.allow_exact_color {
            return ValidationCheck::passed(CHECK_EXACT_COLOR, "exact colors allowed".to_string());
        }
        let exact = log.iter().find_map(|command| match command {
            StrokeCommand::SetColor { color } if is_exact_color(color) => Some(color.clone()),
            _ => None,
        });
        match exact {
            Some(color) => ValidationCheck::failed(
                CHECK_EXACT_COLOR,
                RejectionReason::ExactColorRejected { color },
            ),
            None => ValidationCheck::passed(CHECK_EXACT_COLOR, "named colors only".to_string()),
        }
    }

    fn check_brush_size(&self, log: &StrokeLog) -> ValidationCheck {
        let minimum = self.policy.min_brush_size;
        let thin = log.iter().find_map(|command| match command {
            StrokeCommand::Circle { radius, .. } if *radius < minimum => Some(*radius),
            _ => None,
        });
        match thin {
            Some(radius) => ValidationCheck::failed(
                CHECK_BRUSH_SIZE,
                RejectionReason::BrushTooSmall { radius, minimum },
            ),
            None => ValidationCheck::passed(CHECK_BRUSH_SIZE, format!("all radii >= {}", minimum)),
        }
    }
}

/// Accept or reject `log` under `policy`
#[must_use]
pub fn accept(log: &StrokeLog, policy: &ValidationPolicy) -> Verdict {
    HumanizationValidator::new(policy.clone()).accept(log)
}

/// Literal hex or functional `rgb`/`rgba` color; the prefix is case-sensitive
fn is_exact_color(color: &str) -> bool {
    color.starts_with('#') || color.starts_with("rgb")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn circles(radius: u32, n: usize) -> Vec<StrokeCommand> {
        (0..n)
            .map(|i| StrokeCommand::circle(radius, i as f64 * 2.0, 10.0))
            .collect()
    }

    fn log_with_color(color: &str) -> StrokeLog {
        let mut commands = vec![StrokeCommand::set_color(color)];
        commands.extend(circles(5, 3));
        commands.into()
    }

    #[test]
    fn test_is_exact_color() {
        assert!(is_exact_color("#ff0000"));
        assert!(is_exact_color("#fff"));
        assert!(is_exact_color("rgb(1,2,3)"));
        assert!(is_exact_color("rgba(1,2,3,0.5)"));
        assert!(!is_exact_color("RGB(1,2,3)"));
        assert!(!is_exact_color("red"));
        assert!(!is_exact_color("black"));
        assert!(!is_exact_color("rg"));
    }

    #[test]
    fn test_exact_color_rejected_when_not_allowed() {
        let log = log_with_color("#ff0000");
        let verdict = accept(&log, &ValidationPolicy::new(1, false));
        assert_eq!(
            verdict,
            Verdict::Rejected(RejectionReason::ExactColorRejected {
                color: "#ff0000".to_string()
            })
        );
    }

    #[test]
    fn test_exact_color_accepted_when_allowed() {
        let log = log_with_color("#ff0000");
        assert_eq!(accept(&log, &ValidationPolicy::new(1, true)), Verdict::Accepted);
    }

    #[test]
    fn test_uppercase_rgb_is_not_exact() {
        let log = log_with_color("RGBA(0,0,0,1)");
        assert_eq!(accept(&log, &ValidationPolicy::new(1, false)), Verdict::Accepted);
        assert!(!accept(&log_with_color("rgba(0,0,0,1)"), &ValidationPolicy::new(1, false)).is_accepted());
    }

    #[test]
    fn test_named_color_accepted() {
        let log = log_with_color("red");
        assert!(accept(&log, &ValidationPolicy::default()).is_accepted());
    }

    #[test]
    fn test_brush_too_small() {
        let mut commands = vec![StrokeCommand::set_color("black")];
        commands.extend(circles(1, 4));
        let log: StrokeLog = commands.into();
        let verdict = accept(&log, &ValidationPolicy::new(5, false));
        assert_eq!(
            verdict,
            Verdict::Rejected(RejectionReason::BrushTooSmall {
                radius: 1,
                minimum: 5
            })
        );
    }

    #[test]
    fn test_brush_at_minimum_accepted() {
        let log: StrokeLog = circles(5, 2).into();
        assert!(accept(&log, &ValidationPolicy::new(5, false)).is_accepted());
    }

    #[test]
    fn test_single_set_color_passes_humanization() {
        let log = decode_text("SETCOLOR black\nCIRCLE 5 10.00 10.00\nCIRCLE 5 12.00 10.00\n").unwrap();
        let policy = ValidationPolicy::new(1, false).with_min_average_set_color_distance(3.0);
        assert!(accept(&log, &policy).is_accepted());
    }

    #[test]
    fn test_no_set_color_passes_humanization() {
        let log: StrokeLog = circles(5, 2).into();
        let policy = ValidationPolicy::default().with_min_average_set_color_distance(50.0);
        assert!(accept(&log, &policy).is_accepted());
    }

    #[test]
    fn test_humanization_threshold() {
        let mut commands = vec![StrokeCommand::set_color("red")];
        commands.extend(circles(5, 1));
        commands.push(StrokeCommand::set_color("blue"));
        commands.extend(circles(5, 5));
        let log: StrokeLog = commands.into();

        let at = ValidationPolicy::default().with_min_average_set_color_distance(5.0);
        assert!(accept(&log, &at).is_accepted());

        let above = ValidationPolicy::default().with_min_average_set_color_distance(6.0);
        assert_eq!(
            accept(&log, &above),
            Verdict::Rejected(RejectionReason::LowHumanizationScore {
                average: 5.0,
                minimum: 6.0
            })
        );
    }

    #[test]
    fn test_zero_average_passes() {
        let log: StrokeLog = vec![
            StrokeCommand::set_color("red"),
            StrokeCommand::circle(5, 0.0, 0.0),
            StrokeCommand::set_color("blue"),
            StrokeCommand::set_color("green"),
        ]
        .into();
        let policy = ValidationPolicy::default().with_min_average_set_color_distance(10.0);
        assert!(accept(&log, &policy).is_accepted());
    }

    #[test]
    fn test_humanization_pass_does_not_skip_other_rules() {
        let log: StrokeLog = vec![
            StrokeCommand::set_color("#000000"),
            StrokeCommand::circle(5, 0.0, 0.0),
        ]
        .into();
        let policy = ValidationPolicy::default().with_min_average_set_color_distance(10.0);
        assert!(!accept(&log, &policy).is_accepted());
    }

    #[test]
    fn test_first_failing_rule_reported() {
        let log: StrokeLog = vec![
            StrokeCommand::set_color("rgb(0,0,0)"),
            StrokeCommand::circle(1, 0.0, 0.0),
        ]
        .into();
        let validator = HumanizationValidator::new(ValidationPolicy::new(3, false));
        let report = validator.validate(&log);
        assert_eq!(report.failed_checks().len(), 2);
        assert!(matches!(
            report.verdict(),
            Verdict::Rejected(RejectionReason::ExactColorRejected { .. })
        ));
    }

    #[test]
    fn test_report_contents() {
        let validator = HumanizationValidator::new(ValidationPolicy::default());
        let report = validator.validate(&log_with_color("red"));
        assert!(report.passed());
        assert_eq!(report.checks.len(), 3);
        assert_eq!(report.checks[0].name, CHECK_HUMANIZATION);
        assert_eq!(report.checks[1].name, CHECK_EXACT_COLOR);
        assert_eq!(report.checks[2].name, CHECK_BRUSH_SIZE);
        assert_eq!(
            report.details.get("average_set_color_distance"),
            Some(&"0".to_string())
        );
        assert!(report.summary().contains("PASSED"));
        assert!(report.summary().contains("3/3"));
    }

    #[test]
    fn test_validate_text() {
        let validator = HumanizationValidator::new(ValidationPolicy::new(5, false));
        let report = validator
            .validate_text("SETCOLOR red\nCIRCLE 2 1.00 1.00\n")
            .unwrap();
        assert!(!report.passed());
        assert!(validator.validate_text("CIRCLE x 1 1\n").is_err());
    }

    #[test]
    fn test_empty_log_accepted() {
        let policy = ValidationPolicy::new(5, false).with_min_average_set_color_distance(10.0);
        assert!(accept(&StrokeLog::new(), &policy).is_accepted());
    }

    #[test]
    fn test_verdict_serde() {
        let json = serde_json::to_string(&Verdict::Accepted).unwrap();
        assert_eq!(json, r#"{"verdict":"accepted"}"#);
    }

    proptest::proptest! {
        #[test]
        fn prop_rule_order_irrelevant_to_acceptance(
            radii in proptest::collection::vec(0u32..10, 0..20),
            min in 0u32..10,
            allow in any::<bool>(),
        ) {
            let mut commands = vec![StrokeCommand::set_color("#123456")];
            commands.extend(radii.iter().map(|r| StrokeCommand::circle(*r, 0.0, 0.0)));
            let log: StrokeLog = commands.clone().into();
            let reversed: StrokeLog = commands.into_iter().rev().collect();

            let policy = ValidationPolicy::new(min, allow);
            prop_assert_eq!(
                accept(&log, &policy).is_accepted(),
                accept(&reversed, &policy).is_accepted()
            );
        }
    }
}
