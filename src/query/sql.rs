//! Builds the parameterized COUNT and SELECT statements for list queries.
//!
//! Table and column names always come from static declarations in the store
//! layer, never from request input; only values are bound as parameters.

use super::bind::BindValue;
use super::params::{PageWindow, SortOrder};

/// SQL text plus its bind parameters in placeholder order.
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    pub fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a parameter, returning its 1-based placeholder number.
    pub fn push(&mut self, v: BindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

impl Default for QueryBuf {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    /// Exact match: `column = value`.
    Eq,
    /// Case-insensitive substring match: `column ILIKE %value%`.
    Contains,
}

/// One filter predicate. Predicates on a query combine as a conjunction.
#[derive(Clone, Debug)]
pub struct Filter {
    pub column: &'static str,
    pub op: FilterOp,
    pub value: BindValue,
}

impl Filter {
    pub fn eq(column: &'static str, value: impl Into<BindValue>) -> Self {
        Filter {
            column,
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    pub fn contains(column: &'static str, needle: &str) -> Self {
        Filter {
            column,
            op: FilterOp::Contains,
            value: BindValue::Text(format!("%{}%", escape_like(needle))),
        }
    }
}

/// Escape LIKE metacharacters so a user-supplied needle matches literally.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// Everything needed to resolve one page of a collection.
pub struct ListSpec<'a> {
    pub table: &'a str,
    pub columns: &'a str,
    /// Tiebreak column; also the natural order when no sort is requested.
    pub key_column: &'a str,
    pub filters: &'a [Filter],
    pub sort: Option<(&'static str, SortOrder)>,
    pub window: PageWindow,
}

fn where_clause(filters: &[Filter], q: &mut QueryBuf) -> String {
    if filters.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = filters
        .iter()
        .map(|f| {
            let n = q.push(f.value.clone());
            match f.op {
                FilterOp::Eq => format!("{} = ${}", f.column, n),
                FilterOp::Contains => format!("{} ILIKE ${}", f.column, n),
            }
        })
        .collect();
    format!(" WHERE {}", parts.join(" AND "))
}

fn order_clause(sort: Option<(&str, SortOrder)>, key_column: &str) -> String {
    match sort {
        // Secondary key keeps equal sort values in natural (key) order.
        Some((col, ord)) if col != key_column => {
            format!(" ORDER BY {} {}, {} ASC", col, ord.sql(), key_column)
        }
        Some((col, ord)) => format!(" ORDER BY {} {}", col, ord.sql()),
        None => format!(" ORDER BY {} ASC", key_column),
    }
}

/// SELECT for one page: filters, stable ordering, LIMIT/OFFSET window.
pub fn select_page(spec: &ListSpec<'_>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(spec.filters, &mut q);
    let order_sql = order_clause(spec.sort, spec.key_column);
    q.sql = format!(
        "SELECT {} FROM {}{}{} LIMIT {} OFFSET {}",
        spec.columns,
        spec.table,
        where_sql,
        order_sql,
        spec.window.limit(),
        spec.window.offset()
    );
    q
}

/// COUNT of all filtered rows, independent of the page window.
pub fn count_rows(table: &str, filters: &[Filter]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(filters, &mut q);
    q.sql = format!("SELECT COUNT(*) FROM {}{}", table, where_sql);
    q
}

/// Unpaginated filtered SELECT in natural order (used by search endpoints).
pub fn select_filtered(table: &str, columns: &str, key_column: &str, filters: &[Filter]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(filters, &mut q);
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {} ASC",
        columns, table, where_sql, key_column
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec<'a>(filters: &'a [Filter], sort: Option<(&'static str, SortOrder)>, window: PageWindow) -> ListSpec<'a> {
        ListSpec {
            table: "books",
            columns: "id, title, author",
            key_column: "id",
            filters,
            sort,
            window,
        }
    }

    #[test]
    fn plain_page_orders_by_key() {
        let q = select_page(&spec(&[], None, PageWindow::default()));
        assert_eq!(
            q.sql,
            "SELECT id, title, author FROM books ORDER BY id ASC LIMIT 5 OFFSET 0"
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn sort_gets_a_stable_tiebreak() {
        let q = select_page(&spec(
            &[],
            Some(("author", SortOrder::Desc)),
            PageWindow::default(),
        ));
        assert_eq!(
            q.sql,
            "SELECT id, title, author FROM books ORDER BY author DESC, id ASC LIMIT 5 OFFSET 0"
        );
    }

    #[test]
    fn sorting_by_the_key_skips_the_tiebreak() {
        let q = select_page(&spec(&[], Some(("id", SortOrder::Desc)), PageWindow::default()));
        assert_eq!(
            q.sql,
            "SELECT id, title, author FROM books ORDER BY id DESC LIMIT 5 OFFSET 0"
        );
    }

    #[test]
    fn page_three_of_five_starts_at_offset_ten() {
        // 12 rows, per_page=5, page=3 -> the 2 remaining rows.
        let q = select_page(&spec(&[], None, PageWindow { page: 3, per_page: 5 }));
        assert!(q.sql.ends_with("LIMIT 5 OFFSET 10"));
    }

    #[test]
    fn filters_combine_as_a_conjunction() {
        let filters = vec![
            Filter::contains("title", "flask"),
            Filter::eq("year", 2018),
        ];
        let q = select_page(&spec(&filters, None, PageWindow::default()));
        assert_eq!(
            q.sql,
            "SELECT id, title, author FROM books WHERE title ILIKE $1 AND year = $2 \
             ORDER BY id ASC LIMIT 5 OFFSET 0"
        );
        assert_eq!(q.params[0], BindValue::Text("%flask%".into()));
        assert_eq!(q.params[1], BindValue::Int(2018));
    }

    #[test]
    fn count_ignores_sort_and_window() {
        let filters = vec![Filter::eq("author", "Robert C. Martin")];
        let q = count_rows("books", &filters);
        assert_eq!(q.sql, "SELECT COUNT(*) FROM books WHERE author = $1");
        assert_eq!(q.params.len(), 1);
    }

    #[test]
    fn unfiltered_count_has_no_where() {
        let q = count_rows("books", &[]);
        assert_eq!(q.sql, "SELECT COUNT(*) FROM books");
    }

    #[test]
    fn filtered_select_keeps_natural_order() {
        let filters = vec![Filter::contains("author", "Martin")];
        let q = select_filtered("books", "id, title, author", "id", &filters);
        assert_eq!(
            q.sql,
            "SELECT id, title, author FROM books WHERE author ILIKE $1 ORDER BY id ASC"
        );
        assert_eq!(q.params[0], BindValue::Text("%Martin%".into()));
    }

    #[test]
    fn contains_escapes_like_metacharacters() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        let f = Filter::contains("title", "100%");
        assert_eq!(f.value, BindValue::Text("%100\\%%".into()));
    }
}
