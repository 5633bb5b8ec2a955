//! Library programme events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::de::optional_text;

/// Date layout used by the events feed.
pub(crate) const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A scheduled event hosted by a branch.
///
/// Dates are calendar dates without a timezone and are kept as published;
/// [`Event::parsed_start_date`] interprets them. Times and the sub-location
/// are optional, and the feed's `"None"` literal decodes as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique record identifier.
    #[serde(rename = "_id")]
    pub id: u64,
    /// Event title.
    pub title: String,
    /// First day, `YYYY-MM-DD`.
    #[serde(rename = "startdate")]
    pub start_date: String,
    /// Last day, `YYYY-MM-DD`.
    #[serde(rename = "enddate")]
    pub end_date: String,
    /// Wall-clock start time.
    #[serde(rename = "starttime", default, deserialize_with = "optional_text")]
    pub start_time: Option<String>,
    /// Wall-clock end time.
    #[serde(rename = "endtime", default, deserialize_with = "optional_text")]
    pub end_time: Option<String>,
    /// Name of the hosting branch.
    pub library: String,
    /// Room or area inside the branch.
    #[serde(default, deserialize_with = "optional_text")]
    pub location: Option<String>,
    /// Free-text description.
    pub description: String,
}

impl Event {
    /// Start date, or `None` when the published text is not `YYYY-MM-DD`.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// # use tpl_core::Event;
    /// # let mut event = Event {
    /// #     id: 1, title: "Tea & Entertainment".into(),
    /// #     start_date: "2025-09-05".into(), end_date: "2025-12-19".into(),
    /// #     start_time: None, end_time: None, library: "Albion".into(),
    /// #     location: None, description: String::new(),
    /// # };
    /// assert_eq!(event.parsed_start_date(), NaiveDate::from_ymd_opt(2025, 9, 5));
    /// event.start_date = "TBD".into();
    /// assert_eq!(event.parsed_start_date(), None);
    /// ```
    pub fn parsed_start_date(&self) -> Option<NaiveDate> {
        parse_date(&self.start_date)
    }

    /// End date, or `None` when the published text is not `YYYY-MM-DD`.
    pub fn parsed_end_date(&self) -> Option<NaiveDate> {
        parse_date(&self.end_date)
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), EVENT_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn none_literals_decode_as_absent() {
        let event: Event = serde_json::from_str(
            r#"{
                "_id": 12,
                "title": "Tea & Entertainment",
                "startdate": "2025-09-05",
                "enddate": "2025-12-19",
                "starttime": "None",
                "endtime": "None",
                "library": "Albion",
                "location": "None",
                "description": "Weekly social."
            }"#,
        )
        .expect("event decodes");
        assert!(event.start_time.is_none());
        assert!(event.end_time.is_none());
        assert!(event.location.is_none());
        assert_eq!(event.parsed_end_date(), NaiveDate::from_ymd_opt(2025, 12, 19));
    }

    #[rstest]
    fn optional_fields_may_be_missing() {
        let event: Event = serde_json::from_str(
            r#"{
                "_id": 13,
                "title": "Knitting Circle",
                "startdate": "2025-10-01",
                "enddate": "2025-10-01",
                "starttime": "14:00",
                "library": "Albion",
                "description": ""
            }"#,
        )
        .expect("event decodes");
        assert_eq!(event.start_time.as_deref(), Some("14:00"));
        assert!(event.end_time.is_none());
        assert!(event.location.is_none());
    }

    #[rstest]
    #[case("2025-02-30")]
    #[case("05/09/2025")]
    #[case("")]
    fn malformed_dates_do_not_parse(#[case] text: &str) {
        assert_eq!(parse_date(text), None);
    }
}
