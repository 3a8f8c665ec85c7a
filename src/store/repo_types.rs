use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use time::Date;

/// The three slots every planned day must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduled meal row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: i64,
    pub user_id: i64,
    pub date: Date,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub meal_type: String, // open text; planner only fills the MealType slots
    pub name: String,
    pub description: String,
    pub people: i32,
    pub menu_id: Option<i64>,
}

/// A meal that has not been written yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeal {
    pub user_id: i64,
    pub date: Date,
    pub meal_type: String,
    pub name: String,
    pub description: String,
    pub people: i32,
    pub menu_id: Option<i64>,
}

impl NewMeal {
    pub fn into_meal(self, id: i64) -> Meal {
        Meal {
            id,
            user_id: self.user_id,
            date: self.date,
            meal_type: self.meal_type,
            name: self.name,
            description: self.description,
            people: self.people,
            menu_id: self.menu_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Menu {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub menu_type: String, // free-text category, matched against meal types
    pub cooking_time: i32,
    pub recipe: Json<Vec<serde_json::Value>>, // preparation steps, not interpreted here
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MealIngredient {
    pub meal_id: i64,
    pub ingredient_id: i64,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub lactose_free: bool,
    pub soy_free: bool,
}
