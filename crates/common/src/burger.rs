//! Saved burgers and the payload used to save them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Category, Ingredient, IngredientId, UserId};

/// Name given to a burger saved without one
pub const PLACEHOLDER_BURGER_NAME: &str = "My Custom Burger";

/// Reference to a catalog ingredient as stored with a saved burger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurgerIngredientRef {
    pub id: IngredientId,
    pub name: String,
    pub category: Category,
}

impl From<&Ingredient> for BurgerIngredientRef {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name.clone(),
            category: ingredient.category,
        }
    }
}

/// Request body for saving a burger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBurger {
    #[serde(default)]
    pub name: String,
    pub ingredients: Vec<BurgerIngredientRef>,
}

/// A burger after it has been saved. Never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedBurger {
    pub id: u64,
    pub name: String,
    pub ingredients: Vec<BurgerIngredientRef>,

    /// Owner, when saved from an authenticated session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,

    pub created_at: DateTime<Utc>,
}

impl PersistedBurger {
    /// Create a new saved burger record
    pub fn new(id: u64, burger: NewBurger, user_id: Option<UserId>) -> Self {
        Self {
            id,
            name: burger.name,
            ingredients: burger.ingredients,
            user_id,
            created_at: Utc::now(),
        }
    }
}
