use rust_decimal::Decimal;
use serde::Deserialize;

pub type ProductId = u64;

/// Represents a product in the remote catalog.
///
/// Owned by the server; this client only reads it. `price` arrives either
/// as a JSON number or as a decimal string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub description: Option<String>,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: impl Into<Decimal>, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price: price.into(),
            stock,
            description: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_accepts_decimal_string_price() {
        let json = r#"{"id":7,"name":"Widget","price":"1000.00","stock":12,"description":null}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product, Product::new(7, "Widget", 1000, 12));
    }

    #[test]
    fn test_product_missing_stock_defaults_to_zero() {
        let json = r#"{"id":1,"name":"Bolt","price":2.5}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.stock, 0);
        assert_eq!(product.price, Decimal::new(25, 1));
    }
}
