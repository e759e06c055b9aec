use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::{ProductId, VariantId};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartItemId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub variant_id: VariantId,
    #[serde(default)]
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl CartItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Server-held cart. Totals shown to the user are the ones the API computed;
/// `display_subtotal` only sums lines for display when the API omits them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
}

impl Cart {
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn display_subtotal(&self) -> Decimal {
        self.subtotal.unwrap_or_else(|| self.items.iter().map(CartItem::line_total).sum())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{Cart, CartItem, CartItemId};
    use crate::domain::product::{ProductId, VariantId};

    fn item(quantity: u32, unit_price: Decimal) -> CartItem {
        CartItem {
            id: CartItemId(format!("item-{quantity}")),
            product_id: ProductId("prod-1".to_owned()),
            variant_id: VariantId("var-1".to_owned()),
            name: "BPC-157 5mg".to_owned(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn display_subtotal_prefers_server_value() {
        let cart = Cart {
            items: vec![item(2, Decimal::new(4000, 2))],
            subtotal: Some(Decimal::new(7500, 2)),
        };

        assert_eq!(cart.display_subtotal(), Decimal::new(7500, 2));
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn display_subtotal_sums_lines_without_server_value() {
        let cart = Cart {
            items: vec![item(2, Decimal::new(4000, 2)), item(1, Decimal::new(1050, 2))],
            subtotal: None,
        };

        assert_eq!(cart.display_subtotal(), Decimal::new(9050, 2));
    }

    #[test]
    fn item_count_holds_quantities_past_u32() {
        let cart = Cart {
            items: vec![item(4_000_000_000, Decimal::ONE), item(4_000_000_000, Decimal::ONE)],
            subtotal: None,
        };

        assert_eq!(cart.item_count(), 8_000_000_000);
    }
}
