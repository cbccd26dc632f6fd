//! Page/limit normalisation shared by every list endpoint.
//!
//! Query values arrive as raw strings. Anything that is not an integer `>= 1`
//! (surrounding whitespace included) falls back to [`DEFAULT_PAGE`] / [`DEFAULT_LIMIT`]; the offset is always
//! `(page - 1) * limit`.

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// A normalised page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    /// Normalise raw `page` / `limit` query values.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.parse::<i64>().ok())
        .filter(|n| *n >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        let page = Page::from_raw(None, None);
        assert_eq!(page, Page { page: 1, limit: 10 });
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn non_numeric_values_use_defaults() {
        assert_eq!(Page::from_raw(Some("abc"), Some("ten")), Page::default());
        assert_eq!(Page::from_raw(Some("1.5"), Some("")), Page::default());
    }

    #[test]
    fn padded_values_use_defaults() {
        assert_eq!(Page::from_raw(Some(" 3"), None), Page::default());
        assert_eq!(Page::from_raw(Some("3 "), Some(" 25")), Page::default());
    }

    #[test]
    fn values_below_one_use_defaults() {
        assert_eq!(Page::from_raw(Some("0"), Some("-4")), Page::default());
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        let page = Page::from_raw(Some("3"), Some("25"));
        assert_eq!(page.page, 3);
        assert_eq!(page.limit, 25);
        assert_eq!(page.offset(), 50);
    }

    #[test]
    fn each_value_falls_back_independently() {
        let page = Page::from_raw(Some("4"), Some("nope"));
        assert_eq!(page, Page { page: 4, limit: 10 });
        assert_eq!(page.offset(), 30);
    }
}
