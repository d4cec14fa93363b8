//! Request and response bodies for the BurgerFy API

use burgerfy_common::{Category, Ingredient, PersistedBurger};
use burgerfy_composer::{IngredientCount, RenderPlan};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request to create an account
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(alias = "full_name")]
    pub full_name: String,

    #[serde(default)]
    pub email: Option<String>,

    /// Accepted in place of `email`
    #[serde(default)]
    pub username: Option<String>,

    pub password: String,

    #[serde(default)]
    pub age: Option<u32>,
}

impl RegisterRequest {
    /// The email to register, falling back to `username`
    pub fn login_email(&self) -> Option<&str> {
        self.email.as_deref().or(self.username.as_deref())
    }

    /// Check the fields before anything is hashed or stored
    pub fn validate(&self) -> Result<(), String> {
        if self.full_name.trim().is_empty() {
            return Err("Full name is required".to_string());
        }

        match self.login_email() {
            Some(email) if email.contains('@') => {}
            _ => return Err("A valid email is required".to_string()),
        }

        if self.password.chars().count() < 6 {
            return Err("Password must be at least 6 characters".to_string());
        }

        if let Some(age) = self.age {
            if age > 150 {
                return Err("Age must be 150 or less".to_string());
            }
        }

        Ok(())
    }
}

/// Request to log in
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    pub password: String,
}

impl LoginRequest {
    pub fn login_email(&self) -> Option<&str> {
        self.email.as_deref().or(self.username.as_deref())
    }
}

/// Ingredients of one category on a receipt
#[derive(Debug, Serialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub heading: &'static str,
    pub ingredients: Vec<Ingredient>,
}

/// Everything the summary page shows for a saved burger
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptResponse {
    pub burger: PersistedBurger,
    pub plan: RenderPlan,

    /// One entry per distinct ingredient, by catalog id
    pub counts: Vec<IngredientCount>,

    pub groups: Vec<CategoryGroup>,
    pub price: Decimal,
    pub formatted_price: String,
}
