//! Annual visit statistics per branch.

use serde::{Deserialize, Serialize};

use crate::de::text_or_number;

/// Visits recorded at one branch over one year.
///
/// The visit count is kept as published. Use [`VisitRecord::visit_count`] for
/// a numeric view; the join and ranking operations never rely on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Unique record identifier.
    #[serde(rename = "_id")]
    pub id: u64,
    /// Calendar year of the count.
    #[serde(rename = "Year")]
    pub year: i32,
    /// Code of the branch the count belongs to.
    #[serde(rename = "BranchCode")]
    pub branch_code: String,
    /// Visit count as published.
    #[serde(rename = "Visits", deserialize_with = "text_or_number")]
    pub visits: String,
}

impl VisitRecord {
    /// Parse the published count, ignoring thousands separators.
    ///
    /// Returns `None` when the text is not a non-negative integer or does not
    /// fit in a `u64`.
    ///
    /// # Examples
    /// ```
    /// use tpl_core::VisitRecord;
    ///
    /// let record = VisitRecord {
    ///     id: 1,
    ///     year: 2023,
    ///     branch_code: "AB".into(),
    ///     visits: "50,000".into(),
    /// };
    /// assert_eq!(record.visit_count(), Some(50_000));
    /// ```
    pub fn visit_count(&self) -> Option<u64> {
        let digits: String = self
            .visits
            .trim()
            .chars()
            .filter(|ch| *ch != ',')
            .collect();
        digits.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(visits: &str) -> VisitRecord {
        VisitRecord {
            id: 7,
            year: 2022,
            branch_code: "AB".into(),
            visits: visits.into(),
        }
    }

    #[rstest]
    #[case("50000", Some(50_000))]
    #[case(" 1,234 ", Some(1_234))]
    #[case("n/a", None)]
    #[case("-5", None)]
    #[case("99999999999999999999999", None)]
    fn visit_count_tolerates_odd_text(#[case] visits: &str, #[case] expected: Option<u64>) {
        assert_eq!(record(visits).visit_count(), expected);
    }

    #[rstest]
    fn decodes_numeric_visits_as_text() {
        let record: VisitRecord = serde_json::from_str(
            r#"{"_id": 3, "Year": 2023, "BranchCode": "AB", "Visits": 50000}"#,
        )
        .expect("record decodes");
        assert_eq!(record.visits, "50000");
        assert_eq!(record.year, 2023);
    }
}
