//! In-memory storage, used when no Redis URL is configured

use burgerfy_common::{
    normalize_email, Category, Ingredient, IngredientId, NewBurger, NewIngredient, NewUser,
    PersistedBurger, User, UserId,
};
use std::collections::{BTreeMap, HashMap};

/// Process-local store. Everything is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    ingredients: BTreeMap<IngredientId, Ingredient>,
    burgers: BTreeMap<u64, PersistedBurger>,
    users: BTreeMap<UserId, User>,
    emails: HashMap<String, UserId>,
    next_ingredient_id: IngredientId,
    next_burger_id: u64,
    next_user_id: UserId,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_ingredients(&self) -> Vec<Ingredient> {
        self.ingredients.values().cloned().collect()
    }

    pub fn get_ingredient(&self, id: IngredientId) -> Option<Ingredient> {
        self.ingredients.get(&id).cloned()
    }

    pub fn ingredients_by_category(&self, category: Category) -> Vec<Ingredient> {
        self.ingredients
            .values()
            .filter(|i| i.category == category)
            .cloned()
            .collect()
    }

    pub fn create_ingredient(&mut self, ingredient: NewIngredient) -> Ingredient {
        self.next_ingredient_id += 1;
        let ingredient = ingredient.with_id(self.next_ingredient_id);
        self.ingredients.insert(ingredient.id, ingredient.clone());
        ingredient
    }

    pub fn list_burgers(&self) -> Vec<PersistedBurger> {
        self.burgers.values().cloned().collect()
    }

    pub fn get_burger(&self, id: u64) -> Option<PersistedBurger> {
        self.burgers.get(&id).cloned()
    }

    pub fn burgers_by_user(&self, user_id: UserId) -> Vec<PersistedBurger> {
        self.burgers
            .values()
            .filter(|b| b.user_id == Some(user_id))
            .cloned()
            .collect()
    }

    pub fn create_burger(&mut self, burger: NewBurger, user_id: Option<UserId>) -> PersistedBurger {
        self.next_burger_id += 1;
        let burger = PersistedBurger::new(self.next_burger_id, burger, user_id);
        self.burgers.insert(burger.id, burger.clone());
        burger
    }

    /// `None` if the email is already registered
    pub fn create_user(&mut self, user: NewUser) -> Option<User> {
        let email = normalize_email(&user.email);
        if self.emails.contains_key(&email) {
            return None;
        }

        self.next_user_id += 1;
        let user = user.with_id(self.next_user_id);
        self.emails.insert(email, user.id);
        self.users.insert(user.id, user.clone());
        Some(user)
    }

    pub fn get_user(&self, id: UserId) -> Option<User> {
        self.users.get(&id).cloned()
    }

    pub fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.emails
            .get(&normalize_email(email))
            .and_then(|id| self.get_user(*id))
    }
}
