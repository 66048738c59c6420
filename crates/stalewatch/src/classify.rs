//! Staleness classification.
//!
//! Each annotation is classified against the run's reference date:
//!
//! | Condition | Status |
//! |-----------|--------|
//! | `reference < warn_date` | `Pending` (not reported) |
//! | `reference >= warn_date` and `reference <= expire_date` | `Stale` |
//! | `reference >= warn_date` and `reference > expire_date` | `Expired` |
//!
//! An expire date earlier than the warn date is accepted; such a marker goes
//! straight from pending to expired.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use crate::date::format_canonical;
use crate::marker::MarkerKind;
use crate::types::Annotation;

/// Classification of one annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Warn date not reached yet
    Pending,
    /// Past the warn date, not past the expire date
    Stale,
    /// Past the expire date
    Expired,
}

impl Status {
    /// Classify a single annotation against `reference`.
    #[must_use]
    pub fn of(annotation: &Annotation, reference: NaiveDate) -> Self {
        if reference < annotation.warn_date {
            Self::Pending
        } else if reference > annotation.expire_date {
            Self::Expired
        } else {
            Self::Stale
        }
    }

    /// Whether annotations with this status are reported.
    #[must_use]
    pub fn is_reported(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Upper-case label used in output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Stale => "STALE",
            Self::Expired => "EXPIRED",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statuses for a list of annotations, in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// One status per input annotation
    pub statuses: Vec<Status>,
    /// Whether any annotation is expired
    pub any_expired: bool,
}

impl Classification {
    /// Findings for every reported annotation, in input order.
    ///
    /// `annotations` must be the slice that was classified.
    #[must_use]
    pub fn findings(&self, annotations: &[Annotation]) -> Vec<Finding> {
        annotations
            .iter()
            .zip(&self.statuses)
            .filter(|(_, status)| status.is_reported())
            .map(|(annotation, status)| Finding::new(*status, annotation))
            .collect()
    }

    /// Number of annotations with `status`.
    #[must_use]
    pub fn count(&self, status: Status) -> usize {
        self.statuses.iter().filter(|s| **s == status).count()
    }
}

/// Classify every annotation against `reference`.
#[must_use]
pub fn classify(annotations: &[Annotation], reference: NaiveDate) -> Classification {
    let statuses: Vec<Status> = annotations
        .iter()
        .map(|a| Status::of(a, reference))
        .collect();
    let any_expired = statuses.contains(&Status::Expired);

    Classification {
        statuses,
        any_expired,
    }
}

/// A reported (stale or expired) annotation, with dates formatted canonically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// `STALE` or `EXPIRED`
    pub status: Status,
    /// File containing the marker
    pub file: PathBuf,
    /// Line of the marker (1-indexed)
    pub line: u32,
    /// Attributed declaration
    pub declaration: String,
    /// Marker keyword
    pub kind: MarkerKind,
    /// Optional tag
    pub tag: Option<String>,
    /// Warn date, `DD-MM-YYYY`
    pub stale_date: String,
    /// Expire date, `DD-MM-YYYY`
    pub expires: String,
    /// Marker message
    pub message: String,
}

impl Finding {
    fn new(status: Status, annotation: &Annotation) -> Self {
        Self {
            status,
            file: annotation.file.clone(),
            line: annotation.line,
            declaration: annotation.declaration.clone(),
            kind: annotation.kind,
            tag: annotation.tag.clone(),
            stale_date: format_canonical(annotation.warn_date),
            expires: format_canonical(annotation.expire_date),
            message: annotation.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn annotation(warn: NaiveDate, expire: NaiveDate) -> Annotation {
        Annotation {
            file: PathBuf::from("src/lib.rs"),
            line: 3,
            declaration: "run".to_string(),
            kind: MarkerKind::Todo,
            tag: None,
            warn_date: warn,
            expire_date: expire,
            message: "cleanup".to_string(),
        }
    }

    #[rstest]
    #[case::before_warn(ymd(2019, 12, 31), Status::Pending)]
    #[case::on_warn(ymd(2020, 1, 1), Status::Stale)]
    #[case::between(ymd(2020, 6, 1), Status::Stale)]
    #[case::on_expire(ymd(2021, 1, 1), Status::Stale)]
    #[case::day_after_expire(ymd(2021, 1, 2), Status::Expired)]
    fn boundaries(#[case] reference: NaiveDate, #[case] expected: Status) {
        let a = annotation(ymd(2020, 1, 1), ymd(2021, 1, 1));

        assert_eq!(Status::of(&a, reference), expected);
    }

    #[rstest]
    #[case::before_both(ymd(2019, 12, 1), Status::Pending)]
    #[case::between_backwards(ymd(2019, 12, 20), Status::Pending)]
    #[case::on_warn(ymd(2020, 1, 1), Status::Expired)]
    fn expire_before_warn_does_not_panic(#[case] reference: NaiveDate, #[case] expected: Status) {
        let a = annotation(ymd(2020, 1, 1), ymd(2019, 12, 15));

        assert_eq!(Status::of(&a, reference), expected);
    }

    #[test]
    fn any_expired_requires_one_expired() {
        let annotations = vec![
            annotation(ymd(2020, 1, 1), ymd(2021, 1, 1)),
            annotation(ymd(2030, 1, 1), ymd(2031, 1, 1)),
        ];

        assert!(!classify(&annotations, ymd(2020, 6, 1)).any_expired);
        assert!(classify(&annotations, ymd(2021, 6, 1)).any_expired);
    }

    #[test]
    fn empty_input_is_not_expired() {
        let classification = classify(&[], ymd(2021, 6, 1));

        assert!(classification.statuses.is_empty());
        assert!(!classification.any_expired);
    }

    #[test]
    fn findings_skip_pending_and_keep_order() {
        let annotations = vec![
            annotation(ymd(2020, 1, 1), ymd(2020, 2, 1)),
            annotation(ymd(2030, 1, 1), ymd(2031, 1, 1)),
            annotation(ymd(2021, 1, 1), ymd(2022, 1, 1)),
        ];
        let classification = classify(&annotations, ymd(2021, 6, 1));

        let findings = classification.findings(&annotations);

        let statuses: Vec<Status> = findings.iter().map(|f| f.status).collect();
        assert_eq!(statuses, vec![Status::Expired, Status::Stale]);
        assert_eq!(classification.count(Status::Pending), 1);
    }

    #[test]
    fn findings_format_dates_canonically() {
        let annotations = vec![annotation(ymd(2024, 12, 25), ymd(2025, 1, 4))];
        let classification = classify(&annotations, ymd(2025, 1, 1));

        let finding = &classification.findings(&annotations)[0];

        assert_eq!(finding.stale_date, "25-12-2024");
        assert_eq!(finding.expires, "04-01-2025");
    }

    #[test]
    fn finding_serializes_status_in_upper_case() {
        let annotations = vec![annotation(ymd(2020, 1, 1), ymd(2021, 1, 1))];
        let finding = &classify(&annotations, ymd(2021, 6, 1)).findings(&annotations)[0];

        let json = serde_json::to_value(finding).expect("serializable");

        assert_eq!(json["status"], "EXPIRED");
        assert_eq!(json["kind"], "TODO");
        assert_eq!(json["stale_date"], "01-01-2020");
    }
}
