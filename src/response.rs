//! Success-envelope helpers. List bodies carry the collection under its
//! plural name (`books`, `students`, ...), so the envelope is built as a map
//! rather than a fixed struct.

use crate::query::Page;
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

pub struct Envelope(Map<String, Value>);

impl Envelope {
    pub fn ok() -> Self {
        let mut body = Map::new();
        body.insert("success".into(), Value::Bool(true));
        Envelope(body)
    }

    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.0.insert(key.to_string(), value);
        self
    }

    pub fn json(self) -> Json<Value> {
        Json(Value::Object(self.0))
    }

    /// `{success, page, per_page, total, <key>: [...]}`
    pub fn page<T: Serialize>(key: &str, page: &Page<T>) -> Json<Value> {
        Envelope::ok()
            .field("page", page.page)
            .field("per_page", page.per_page)
            .field("total", page.total)
            .field(key, &page.items)
            .json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_envelope_shape() {
        let page = Page {
            total: 12,
            page: 3,
            per_page: 5,
            items: vec!["a", "b"],
        };
        let Json(body) = Envelope::page("books", &page);
        assert_eq!(body["success"], true);
        assert_eq!(body["page"], 3);
        assert_eq!(body["per_page"], 5);
        assert_eq!(body["total"], 12);
        assert_eq!(body["books"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn fields_accumulate() {
        let Json(body) = Envelope::ok()
            .field("message", "Book created")
            .field("count", 1)
            .json();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Book created");
        assert_eq!(body["count"], 1);
    }
}
