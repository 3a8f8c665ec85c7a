//! Storage collaborators used by the planner and the shopping list.
//!
//! Each concern gets its own trait so services only see what they read or
//! write. `PgStore` implements all of them; tests use `MemoryStore`.

use std::collections::HashMap;

use async_trait::async_trait;
use time::Date;

#[cfg(test)]
pub mod memory;
pub mod pg;
pub mod repo_types;

pub use repo_types::{Ingredient, Meal, MealIngredient, MealType, Menu, NewMeal};

#[async_trait]
pub trait MealSchedule: Send + Sync {
    /// Meals of a user with `from <= date <= to`, ordered by date then id.
    /// Missing bounds are open.
    async fn list_meals_by_user(
        &self,
        user_id: i64,
        from: Option<Date>,
        to: Option<Date>,
    ) -> anyhow::Result<Vec<Meal>>;

    /// Returns the assigned id, or `None` when the store refused the row.
    async fn create_meal(&self, meal: &NewMeal) -> anyhow::Result<Option<i64>>;
}

#[async_trait]
pub trait MealIngredientReader: Send + Sync {
    async fn get_meal_ingredients(&self, meal_id: i64) -> anyhow::Result<Vec<MealIngredient>>;
}

#[async_trait]
pub trait MenuCatalog: Send + Sync {
    async fn list_menus(&self) -> anyhow::Result<Vec<Menu>>;
}

#[async_trait]
pub trait InventoryReader: Send + Sync {
    /// On-hand quantities; only positive entries are present.
    async fn get_user_inventory(&self, user_id: i64) -> anyhow::Result<HashMap<i64, f64>>;
}

#[async_trait]
pub trait IngredientReader: Send + Sync {
    async fn get_ingredient(&self, ingredient_id: i64) -> anyhow::Result<Option<Ingredient>>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn user_exists(&self, user_id: i64) -> anyhow::Result<bool>;
    async fn ping(&self) -> anyhow::Result<()>;
}
