use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub cart_id: u64,
    #[serde(default)]
    pub products: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: u64,
    pub quantity: u64,
}

impl Cart {
    pub fn new(cart_id: u64) -> Self {
        Self {
            cart_id,
            products: Vec::new(),
        }
    }

    /// Adds `quantity` of a product, accumulating onto an existing line item.
    pub fn add_item(&mut self, product_id: u64, quantity: u64) {
        match self.products.iter_mut().find(|item| item.product_id == product_id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.products.push(LineItem {
                product_id,
                quantity,
            }),
        }
    }
}

// ── Request payloads ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct AddToCart {
    /// Defaults to 1 when omitted
    pub quantity: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn add_item_accumulates_same_product() {
        let mut cart = Cart::new(1);
        cart.add_item(7, 2);
        cart.add_item(7, 3);
        assert_eq!(
            cart.products,
            vec![LineItem { product_id: 7, quantity: 5 }]
        );
    }

    #[test]
    fn add_item_keeps_insertion_order() {
        let mut cart = Cart::new(1);
        cart.add_item(3, 1);
        cart.add_item(1, 1);
        cart.add_item(3, 1);
        let ids: Vec<u64> = cart.products.iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn wire_format_is_camel_case() {
        let mut cart = Cart::new(4);
        cart.add_item(9, 2);
        assert_eq!(
            serde_json::to_value(&cart).unwrap(),
            json!({ "cartId": 4, "products": [{ "productId": 9, "quantity": 2 }] })
        );
    }

    #[test]
    fn missing_products_key_reads_as_empty() {
        let cart: Cart = serde_json::from_value(json!({ "cartId": 2 })).unwrap();
        assert!(cart.products.is_empty());
    }
}
