use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use time::Date;

use super::{
    Ingredient, IngredientReader, InventoryReader, Meal, MealIngredient, MealIngredientReader,
    MealSchedule, Menu, MenuCatalog, NewMeal, UserDirectory,
};

pub fn menu(id: i64, name: &str, menu_type: &str) -> Menu {
    Menu {
        id,
        name: name.into(),
        description: format!("{name} description"),
        menu_type: menu_type.into(),
        cooking_time: 20,
        recipe: sqlx::types::Json(vec![serde_json::json!({ "step": 1, "text": "cook" })]),
    }
}

/// In-memory stand-in for `PgStore`.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_meal_id: i64,
    refuse_creates: bool,
    users: HashSet<i64>,
    meals: Vec<Meal>,
    meal_ingredients: Vec<MealIngredient>,
    menus: Vec<Menu>,
    inventory: HashMap<i64, HashMap<i64, f64>>,
    ingredients: HashMap<i64, Ingredient>,
    create_calls: usize,
    menu_reads: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory store poisoned")
    }

    pub fn add_user(&self, user_id: i64) {
        self.lock().users.insert(user_id);
    }

    pub fn add_menu(&self, id: i64, name: &str, menu_type: &str) {
        self.lock().menus.push(menu(id, name, menu_type));
    }

    pub fn add_meal(&self, user_id: i64, date: Date, meal_type: &str) -> i64 {
        let mut inner = self.lock();
        inner.next_meal_id += 1;
        let id = inner.next_meal_id;
        inner.meals.push(Meal {
            id,
            user_id,
            date,
            meal_type: meal_type.into(),
            name: format!("{meal_type} on {date}"),
            description: String::new(),
            people: 2,
            menu_id: None,
        });
        id
    }

    pub fn add_meal_ingredient(&self, meal_id: i64, ingredient_id: i64, quantity: f64) {
        self.lock().meal_ingredients.push(MealIngredient {
            meal_id,
            ingredient_id,
            quantity,
        });
    }

    pub fn add_ingredient(&self, id: i64, name: &str) {
        self.lock().ingredients.insert(
            id,
            Ingredient {
                id,
                name: name.into(),
                calories: 1.0,
                protein: 0.1,
                carbs: 0.2,
                fat: 0.05,
                fiber: 0.01,
                vegetarian: true,
                vegan: true,
                gluten_free: true,
                lactose_free: true,
                soy_free: true,
            },
        );
    }

    pub fn remove_ingredient(&self, id: i64) {
        self.lock().ingredients.remove(&id);
    }

    /// Mirrors the Postgres upsert: non-positive quantities remove the entry.
    pub fn set_inventory(&self, user_id: i64, ingredient_id: i64, quantity: f64) {
        let mut inner = self.lock();
        let items = inner.inventory.entry(user_id).or_default();
        if quantity > 0.0 {
            items.insert(ingredient_id, quantity);
        } else {
            items.remove(&ingredient_id);
        }
    }

    pub fn refuse_creates(&self, refuse: bool) {
        self.lock().refuse_creates = refuse;
    }

    pub fn meals_of(&self, user_id: i64) -> Vec<Meal> {
        self.lock()
            .meals
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn create_calls(&self) -> usize {
        self.lock().create_calls
    }

    pub fn menu_reads(&self) -> usize {
        self.lock().menu_reads
    }
}

#[async_trait]
impl MealSchedule for MemoryStore {
    async fn list_meals_by_user(
        &self,
        user_id: i64,
        from: Option<Date>,
        to: Option<Date>,
    ) -> anyhow::Result<Vec<Meal>> {
        let mut meals: Vec<Meal> = self
            .lock()
            .meals
            .iter()
            .filter(|m| m.user_id == user_id)
            .filter(|m| from.map_or(true, |f| m.date >= f))
            .filter(|m| to.map_or(true, |t| m.date <= t))
            .cloned()
            .collect();
        meals.sort_by_key(|m| (m.date, m.id));
        Ok(meals)
    }

    async fn create_meal(&self, meal: &NewMeal) -> anyhow::Result<Option<i64>> {
        let mut inner = self.lock();
        inner.create_calls += 1;
        if inner.refuse_creates {
            return Ok(None);
        }
        inner.next_meal_id += 1;
        let id = inner.next_meal_id;
        inner.meals.push(meal.clone().into_meal(id));
        Ok(Some(id))
    }
}

#[async_trait]
impl MealIngredientReader for MemoryStore {
    async fn get_meal_ingredients(&self, meal_id: i64) -> anyhow::Result<Vec<MealIngredient>> {
        let mut rows: Vec<MealIngredient> = self
            .lock()
            .meal_ingredients
            .iter()
            .filter(|mi| mi.meal_id == meal_id)
            .copied()
            .collect();
        rows.sort_by_key(|mi| mi.ingredient_id);
        Ok(rows)
    }
}

#[async_trait]
impl MenuCatalog for MemoryStore {
    async fn list_menus(&self) -> anyhow::Result<Vec<Menu>> {
        let mut inner = self.lock();
        inner.menu_reads += 1;
        Ok(inner.menus.clone())
    }
}

#[async_trait]
impl InventoryReader for MemoryStore {
    async fn get_user_inventory(&self, user_id: i64) -> anyhow::Result<HashMap<i64, f64>> {
        Ok(self
            .lock()
            .inventory
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl IngredientReader for MemoryStore {
    async fn get_ingredient(&self, ingredient_id: i64) -> anyhow::Result<Option<Ingredient>> {
        Ok(self.lock().ingredients.get(&ingredient_id).cloned())
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn user_exists(&self, user_id: i64) -> anyhow::Result<bool> {
        Ok(self.lock().users.contains(&user_id))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
