//! Inventory products.

use super::required;
use crate::error::AppError;
use crate::query::SortKey;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewProduct {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub description: String,
}

impl NewProduct {
    pub fn validate(self) -> Result<ProductDraft, AppError> {
        match (required(self.name), self.price) {
            (Some(name), Some(price)) => Ok(ProductDraft {
                name,
                price,
                stock: self.stock.unwrap_or(0),
                description: self.description.unwrap_or_default(),
            }),
            _ => Err(AppError::Validation("Name & Price required".into())),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductSort {
    Id,
    Name,
    Price,
    Stock,
}

impl SortKey for ProductSort {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(ProductSort::Id),
            "name" => Some(ProductSort::Name),
            "price" => Some(ProductSort::Price),
            "stock" => Some(ProductSort::Stock),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            ProductSort::Id => "id",
            ProductSort::Name => "name",
            ProductSort::Price => "price",
            ProductSort::Stock => "stock",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_defaults_to_zero() {
        let draft = NewProduct {
            name: Some("Notebook".into()),
            price: Some(4.5),
            stock: None,
            description: None,
        }
        .validate()
        .expect("valid");
        assert_eq!(draft.stock, 0);
        assert_eq!(draft.description, "");
    }

    #[test]
    fn price_is_required() {
        let err = NewProduct {
            name: Some("Notebook".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m == "Name & Price required"));
    }
}
