//! Catalog shared by the unit tests

use burgerfy_common::{Category, Ingredient, IngredientId};
use rust_decimal::Decimal;

pub fn ingredient(
    id: IngredientId,
    name: &str,
    category: Category,
    height: f64,
    width: f64,
    cents: i64,
) -> Ingredient {
    Ingredient {
        id,
        name: name.to_string(),
        display_name: name.to_string(),
        category,
        color: format!("color-{id}"),
        height,
        width,
        label: name.to_uppercase(),
        price: Decimal::new(cents, 2),
    }
}

pub fn brioche() -> Ingredient {
    ingredient(1, "Brioche Bun", Category::Bun, 20.0, 64.0, 0)
}

pub fn sesame() -> Ingredient {
    ingredient(2, "Sesame Bun", Category::Bun, 20.0, 64.0, 0)
}

pub fn beef() -> Ingredient {
    ingredient(5, "Beef Patty", Category::Patty, 10.0, 260.0, 350)
}

pub fn chicken() -> Ingredient {
    ingredient(6, "Chicken Breast", Category::Patty, 10.0, 260.0, 325)
}

pub fn cheddar() -> Ingredient {
    ingredient(9, "Cheddar", Category::Cheese, 6.0, 270.0, 100)
}

pub fn ketchup() -> Ingredient {
    ingredient(17, "Ketchup", Category::Sauce, 2.0, 265.0, 25)
}

pub fn catalog() -> Vec<Ingredient> {
    vec![brioche(), sesame(), beef(), chicken(), cheddar(), ketchup()]
}
