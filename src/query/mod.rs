//! The list-query resolver: pagination, sorting, and filtering shared by
//! every list endpoint. Parameters arrive as strings from the transport and
//! are parsed and normalized here; the output is a bounded, ordered page of
//! rows plus the total match count.

mod bind;
mod params;
mod resolver;
mod sql;

pub use bind::BindValue;
pub use params::{
    ListParams, PageWindow, SortKey, SortOrder, DEFAULT_PAGE, DEFAULT_PER_PAGE, MAX_PER_PAGE,
};
pub use resolver::{fetch_filtered, fetch_optional_as, fetch_page, Page};
pub use sql::{count_rows, escape_like, select_filtered, select_page, Filter, FilterOp, ListSpec, QueryBuf};
