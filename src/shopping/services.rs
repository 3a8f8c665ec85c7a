use std::collections::{BTreeMap, HashMap};

use time::Date;
use tracing::{debug, instrument, warn};

use super::dto::ShoppingListEntry;
use crate::planner::week_window;
use crate::state::AppState;

/// Sums ingredient quantities over every meal of the user dated within
/// `[from, to]` (open where a bound is missing).
#[instrument(skip(st))]
pub async fn required_ingredients(
    st: &AppState,
    user_id: i64,
    from: Option<Date>,
    to: Option<Date>,
) -> anyhow::Result<BTreeMap<i64, f64>> {
    let meals = st.meals.list_meals_by_user(user_id, from, to).await?;

    let mut required = BTreeMap::new();
    for meal in &meals {
        for item in st.meal_ingredients.get_meal_ingredients(meal.id).await? {
            *required.entry(item.ingredient_id).or_insert(0.0) += item.quantity;
        }
    }

    debug!(user_id, meals = meals.len(), ingredients = required.len(), "required ingredients");
    Ok(required)
}

/// Positive shortfalls in ascending ingredient id. Absent stock counts as zero.
pub fn deficits(required: &BTreeMap<i64, f64>, on_hand: &HashMap<i64, f64>) -> Vec<(i64, f64)> {
    required
        .iter()
        .filter_map(|(&id, &needed)| {
            let missing = needed - on_hand.get(&id).copied().unwrap_or(0.0);
            (missing > 0.0).then_some((id, missing))
        })
        .collect()
}

/// What the user has to buy for the coming week.
///
/// Ingredients that no longer exist are left out of the list.
#[instrument(skip(st))]
pub async fn shopping_list(
    st: &AppState,
    user_id: i64,
    today: Date,
) -> anyhow::Result<Vec<ShoppingListEntry>> {
    let (from, to) = week_window(today);
    let required = required_ingredients(st, user_id, Some(from), Some(to)).await?;
    let on_hand = st.inventory.get_user_inventory(user_id).await?;

    let mut list = Vec::new();
    for (ingredient_id, quantity) in deficits(&required, &on_hand) {
        match st.ingredients.get_ingredient(ingredient_id).await? {
            Some(ingredient) => list.push(ShoppingListEntry {
                ingredient,
                quantity,
            }),
            None => warn!(user_id, ingredient_id, "ingredient not found; skipped"),
        }
    }

    debug!(user_id, entries = list.len(), "shopping list built");
    Ok(list)
}
