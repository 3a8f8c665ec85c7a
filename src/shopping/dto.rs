use serde::Serialize;

use crate::store::Ingredient;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingListEntry {
    pub ingredient: Ingredient,
    pub quantity: f64, // missing amount, always > 0
}
