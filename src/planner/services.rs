use std::collections::HashSet;

use thiserror::Error;
use time::{Date, Duration};
use tracing::{debug, info, instrument, warn};

use super::picker::MenuPicker;
use crate::state::AppState;
use crate::store::{Meal, MealType, Menu, NewMeal};

pub const WINDOW_DAYS: i64 = 7;

/// `[today, today + 6]`, both ends inclusive.
pub fn week_window(today: Date) -> (Date, Date) {
    (today, today + Duration::days(WINDOW_DAYS - 1))
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("no id assigned to {meal_type} on {date}")]
    Persistence { date: Date, meal_type: MealType },

    #[error("menu catalog is empty")]
    NoCandidateMenu,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Fills every missing breakfast/lunch/dinner slot of the user's week and
/// returns all meals in the window, ordered by date then id.
///
/// Existing meals are matched on exact `date` and `type`. Each new meal is
/// written as soon as it is drafted, so a failure leaves earlier slots in place
/// and a retry only fills what is still missing.
#[instrument(skip(st, picker))]
pub async fn ensure_weekly_plan(
    st: &AppState,
    picker: &mut dyn MenuPicker,
    user_id: i64,
    today: Date,
) -> Result<Vec<Meal>, PlanError> {
    let (from, to) = week_window(today);
    let mut meals = st
        .meals
        .list_meals_by_user(user_id, Some(from), Some(to))
        .await?;

    let filled: HashSet<(Date, &str)> = meals
        .iter()
        .map(|m| (m.date, m.meal_type.as_str()))
        .collect();

    // Read lazily: a complete week never touches the catalog.
    let mut catalog: Option<Vec<Menu>> = None;
    let mut planned = Vec::new();

    for offset in 0..WINDOW_DAYS {
        let date = from + Duration::days(offset);
        for meal_type in MealType::ALL {
            if filled.contains(&(date, meal_type.as_str())) {
                continue;
            }

            if catalog.is_none() {
                catalog = Some(st.menus.list_menus().await?);
            }
            let menus = catalog.as_deref().unwrap_or_default();

            let draft = draft_meal(menus, picker, user_id, date, meal_type)?;
            let id = st
                .meals
                .create_meal(&draft)
                .await?
                .ok_or(PlanError::Persistence { date, meal_type })?;

            info!(user_id, %date, %meal_type, menu_id = ?draft.menu_id, meal_id = id, "meal planned");
            planned.push(draft.into_meal(id));
        }
    }

    debug!(user_id, existing = meals.len(), created = planned.len(), "week planned");
    meals.extend(planned);
    meals.sort_by_key(|m| (m.date, m.id));
    Ok(meals)
}

/// Builds an unsaved meal for one slot from a menu picked out of `menus`.
pub fn draft_meal(
    menus: &[Menu],
    picker: &mut dyn MenuPicker,
    user_id: i64,
    date: Date,
    meal_type: MealType,
) -> Result<NewMeal, PlanError> {
    let menu = select_menu(menus, meal_type, picker)?;
    Ok(NewMeal {
        user_id,
        date,
        meal_type: meal_type.as_str().to_string(),
        name: menu.name.clone(),
        description: menu.description.clone(),
        people: 1,
        menu_id: Some(menu.id),
    })
}

/// Picks among menus whose type contains the meal type (ignoring case),
/// or among the whole catalog when none does.
pub fn select_menu<'a>(
    menus: &'a [Menu],
    meal_type: MealType,
    picker: &mut dyn MenuPicker,
) -> Result<&'a Menu, PlanError> {
    if menus.is_empty() {
        return Err(PlanError::NoCandidateMenu);
    }

    let matching: Vec<&Menu> = menus
        .iter()
        .filter(|m| m.menu_type.to_lowercase().contains(meal_type.as_str()))
        .collect();

    let candidates = if matching.is_empty() {
        warn!(%meal_type, catalog = menus.len(), "no menu matches meal type; using full catalog");
        menus.iter().collect()
    } else {
        matching
    };

    let idx = picker.pick(candidates.len());
    candidates
        .get(idx)
        .copied()
        .ok_or(PlanError::NoCandidateMenu)
}
