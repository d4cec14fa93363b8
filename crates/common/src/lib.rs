pub mod burger;
pub mod error;
pub mod ingredient;
pub mod user;

pub use burger::{BurgerIngredientRef, NewBurger, PersistedBurger, PLACEHOLDER_BURGER_NAME};
pub use error::{Error, Result};
pub use ingredient::{parse_price, Category, Ingredient, IngredientId, NewIngredient};
pub use user::{normalize_email, NewUser, PublicUser, User, UserId};
