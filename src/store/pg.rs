use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;

use super::{
    Ingredient, IngredientReader, InventoryReader, Meal, MealIngredient, MealIngredientReader,
    MealSchedule, Menu, MenuCatalog, NewMeal, UserDirectory,
};

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealSchedule for PgStore {
    async fn list_meals_by_user(
        &self,
        user_id: i64,
        from: Option<Date>,
        to: Option<Date>,
    ) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, date, type, name, description, people, menu_id
              FROM meals
             WHERE user_id = $1
               AND ($2::date IS NULL OR date >= $2)
               AND ($3::date IS NULL OR date <= $3)
             ORDER BY date, id
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.db)
        .await
        .context("list meals by user")?;
        Ok(rows)
    }

    async fn create_meal(&self, meal: &NewMeal) -> anyhow::Result<Option<i64>> {
        // A concurrent insert for the same slot returns no row.
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO meals (user_id, date, type, name, description, people, menu_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, date, type) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(meal.user_id)
        .bind(meal.date)
        .bind(&meal.meal_type)
        .bind(&meal.name)
        .bind(&meal.description)
        .bind(meal.people)
        .bind(meal.menu_id)
        .fetch_optional(&self.db)
        .await
        .context("insert meal")?;
        Ok(id)
    }
}

#[async_trait]
impl MealIngredientReader for PgStore {
    async fn get_meal_ingredients(&self, meal_id: i64) -> anyhow::Result<Vec<MealIngredient>> {
        let rows = sqlx::query_as::<_, MealIngredient>(
            r#"
            SELECT meal_id, ingredient_id, quantity
              FROM meal_ingredients
             WHERE meal_id = $1
             ORDER BY ingredient_id
            "#,
        )
        .bind(meal_id)
        .fetch_all(&self.db)
        .await
        .context("list meal ingredients")?;
        Ok(rows)
    }
}

#[async_trait]
impl MenuCatalog for PgStore {
    async fn list_menus(&self) -> anyhow::Result<Vec<Menu>> {
        let rows = sqlx::query_as::<_, Menu>(
            r#"
            SELECT id, name, description, type, cooking_time, recipe
              FROM menus
             ORDER BY name, id
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list menus")?;
        Ok(rows)
    }
}

#[async_trait]
impl InventoryReader for PgStore {
    async fn get_user_inventory(&self, user_id: i64) -> anyhow::Result<HashMap<i64, f64>> {
        let rows = sqlx::query_as::<_, (i64, f64)>(
            r#"
            SELECT ingredient_id, quantity
              FROM user_ingredients
             WHERE user_id = $1 AND quantity > 0
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("get user inventory")?;
        Ok(rows.into_iter().collect())
    }
}

#[async_trait]
impl IngredientReader for PgStore {
    async fn get_ingredient(&self, ingredient_id: i64) -> anyhow::Result<Option<Ingredient>> {
        let row = sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT id, name, calories, protein, carbs, fat, fiber,
                   vegetarian, vegan, gluten_free, lactose_free, soy_free
              FROM ingredients
             WHERE id = $1
            "#,
        )
        .bind(ingredient_id)
        .fetch_optional(&self.db)
        .await
        .context("get ingredient")?;
        Ok(row)
    }
}

#[async_trait]
impl UserDirectory for PgStore {
    async fn user_exists(&self, user_id: i64) -> anyhow::Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.db)
            .await
            .context("check user exists")?;
        Ok(exists)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.db)
            .await
            .context("database ping")?;
        Ok(())
    }
}
