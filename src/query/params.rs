//! Request-parameter parsing and normalization.

use crate::error::AppError;
use serde::Deserialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 5;
pub const MAX_PER_PAGE: i64 = 100;

/// Normalized pagination window. Out-of-range or unparsable input falls back
/// to the defaults rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub per_page: i64,
}

impl PageWindow {
    pub fn from_raw(page: Option<&str>, per_page: Option<&str>) -> Self {
        PageWindow {
            page: positive_or(page, DEFAULT_PAGE),
            per_page: positive_or(per_page, DEFAULT_PER_PAGE).min(MAX_PER_PAGE),
        }
    }

    /// Saturates on huge pages; the window just lands past the end.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        PageWindow {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

fn positive_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything other than `desc` (case-insensitive) sorts ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Static enumeration of an entity's recognized sort fields. Each entity
/// declares which request-facing names are sortable and which column each
/// maps to; nothing is looked up dynamically.
pub trait SortKey: Copy {
    fn parse(name: &str) -> Option<Self>
    where
        Self: Sized;

    fn column(self) -> &'static str;
}

/// Raw list-endpoint query parameters. All values arrive as strings and are
/// parsed here, not by the transport.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl ListParams {
    pub fn window(&self) -> PageWindow {
        PageWindow::from_raw(self.page.as_deref(), self.per_page.as_deref())
    }

    /// Resolve the `sort`/`order` pair against an entity's sort fields.
    /// Unrecognized field names are rejected, not silently ignored.
    pub fn sort_key<S: SortKey>(&self) -> Result<Option<(S, SortOrder)>, AppError> {
        match self.sort.as_deref() {
            None => Ok(None),
            Some(name) => {
                let key = S::parse(name).ok_or_else(|| {
                    AppError::BadRequest(format!("unsupported sort field '{}'", name))
                })?;
                Ok(Some((key, SortOrder::parse(self.order.as_deref()))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum DemoSort {
        Id,
        Name,
    }

    impl SortKey for DemoSort {
        fn parse(name: &str) -> Option<Self> {
            match name {
                "id" => Some(DemoSort::Id),
                "name" => Some(DemoSort::Name),
                _ => None,
            }
        }

        fn column(self) -> &'static str {
            match self {
                DemoSort::Id => "id",
                DemoSort::Name => "name",
            }
        }
    }

    #[test]
    fn window_defaults() {
        let w = PageWindow::from_raw(None, None);
        assert_eq!(w, PageWindow { page: 1, per_page: 5 });
        assert_eq!(w.offset(), 0);
    }

    #[test]
    fn window_parses_valid_input() {
        let w = PageWindow::from_raw(Some("3"), Some("5"));
        assert_eq!(w.page, 3);
        assert_eq!(w.per_page, 5);
        assert_eq!(w.offset(), 10);
        assert_eq!(w.limit(), 5);
    }

    #[test]
    fn window_normalizes_bad_input_to_defaults() {
        assert_eq!(PageWindow::from_raw(Some("0"), Some("-2")), PageWindow::default());
        assert_eq!(PageWindow::from_raw(Some("abc"), Some("")), PageWindow::default());
        assert_eq!(PageWindow::from_raw(Some("-1"), Some("five")), PageWindow::default());
    }

    #[test]
    fn huge_page_offset_saturates() {
        let w = PageWindow::from_raw(Some("9223372036854775807"), Some("5"));
        assert_eq!(w.page, i64::MAX);
        assert_eq!(w.offset(), i64::MAX);
        assert_eq!(w.limit(), 5);
    }

    #[test]
    fn per_page_is_capped() {
        let w = PageWindow::from_raw(Some("1"), Some("100000"));
        assert_eq!(w.per_page, MAX_PER_PAGE);
    }

    #[test]
    fn order_defaults_to_asc() {
        assert_eq!(SortOrder::parse(None), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("upward")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("DESC")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("desc")), SortOrder::Desc);
    }

    #[test]
    fn sort_key_resolves_recognized_fields() {
        let params = ListParams {
            sort: Some("name".into()),
            order: Some("desc".into()),
            ..Default::default()
        };
        let sort = params.sort_key::<DemoSort>().expect("recognized");
        assert_eq!(sort, Some((DemoSort::Name, SortOrder::Desc)));
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let params = ListParams {
            sort: Some("shoe_size".into()),
            ..Default::default()
        };
        let err = params.sort_key::<DemoSort>().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m.contains("shoe_size")));
    }

    #[test]
    fn absent_sort_means_natural_order() {
        let params = ListParams::default();
        assert_eq!(params.sort_key::<DemoSort>().expect("ok"), None);
    }
}
