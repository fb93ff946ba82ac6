use crate::page::Page;
use chrono::{DateTime, Datelike, FixedOffset};

pub const CURRENT_YEAR: &str = "current-year";

/// Writes the calendar year of `now` into the footer, if the page has one.
pub fn stamp_year(page: &mut Page, now: DateTime<FixedOffset>) -> bool {
    page.set_text(CURRENT_YEAR, &now.year().to_string()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_is_written_when_region_exists() {
        let now = DateTime::parse_from_rfc3339("2026-10-19T09:00:00+02:00").unwrap();
        let mut page = Page::parse("<footer>&copy; {{current-year:2024}}</footer>");
        assert!(stamp_year(&mut page, now));
        assert_eq!(page.finish(), "<footer>&copy; 2026</footer>");
    }

    #[test]
    fn missing_region_is_a_no_op() {
        let now = DateTime::parse_from_rfc3339("2026-10-19T09:00:00Z").unwrap();
        let mut page = Page::parse("<footer></footer>");
        assert!(!stamp_year(&mut page, now));
        assert_eq!(page.finish(), "<footer></footer>");
    }
}
