//! Findings collected during an audit
use serde::{Deserialize, Serialize};

/// How strongly a requirement is stated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    /// The requirement MUST hold
    Must,
    /// The requirement SHOULD hold
    Should,
}

/// The result of checking one requirement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The requirement holds
    Pass,
    /// The requirement does not hold
    Fail,
    /// The requirement does not hold, but is not enforced
    Advisory,
}

/// One checked requirement
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// What was required
    pub requirement: String,
    /// How strongly it was required
    pub level: Level,
    /// Whether it held
    pub outcome: Outcome,
    /// Context for anything other than a pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// All findings for one audited subject
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// What was audited, e.g. `foos.example.com`
    pub subject: String,
    /// Findings in the order they were checked
    pub findings: Vec<Finding>,
}

impl ConformanceReport {
    /// An empty report for a subject
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            findings: vec![],
        }
    }

    /// Record a finding
    ///
    /// Anything short of a pass is logged as it is recorded.
    pub fn record(&mut self, requirement: &str, level: Level, outcome: Outcome, detail: Option<String>) {
        match outcome {
            Outcome::Pass => tracing::debug!(subject = %self.subject, requirement, "requirement met"),
            Outcome::Fail => {
                tracing::warn!(subject = %self.subject, requirement, ?detail, "requirement not met")
            }
            Outcome::Advisory => {
                tracing::warn!(subject = %self.subject, requirement, ?detail, "requirement not met (advisory)")
            }
        }
        self.findings.push(Finding {
            requirement: requirement.to_string(),
            level,
            outcome,
            detail,
        });
    }

    /// Record a pass when `ok`, otherwise a failure with `detail`
    pub fn check(&mut self, requirement: &str, level: Level, ok: bool, detail: impl FnOnce() -> String) {
        if ok {
            self.record(requirement, level, Outcome::Pass, None);
        } else {
            self.record(requirement, level, Outcome::Fail, Some(detail()));
        }
    }

    /// Findings that did not hold and are enforced
    pub fn failures(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.outcome == Outcome::Fail)
    }

    /// Findings that did not hold but are not enforced
    pub fn advisories(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.outcome == Outcome::Advisory)
    }

    /// Whether no enforced requirement failed
    pub fn is_conformant(&self) -> bool {
        self.failures().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advisories_do_not_break_conformance() {
        let mut report = ConformanceReport::new("foos.example.com");
        report.check("has role", Level::Must, true, || unreachable!());
        report.record("has category", Level::Should, Outcome::Advisory, Some("missing".into()));
        assert!(report.is_conformant());
        assert_eq!(report.advisories().count(), 1);

        report.check("is namespaced", Level::Must, false, || "scope Cluster".into());
        assert!(!report.is_conformant());
        let failed: Vec<_> = report.failures().map(|f| f.requirement.as_str()).collect();
        assert_eq!(failed, ["is namespaced"]);
        assert_eq!(report.findings[2].detail.as_deref(), Some("scope Cluster"));
    }

    #[test]
    fn serializes_without_empty_detail() {
        let mut report = ConformanceReport::new("foos.example.com");
        report.check("has role", Level::Must, true, String::new);
        let yaml = serde_yaml::to_string(&report).unwrap();
        assert!(!yaml.contains("detail"));
        let back: ConformanceReport = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, report);
    }
}
