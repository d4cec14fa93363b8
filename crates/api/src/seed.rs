//! Default catalog
//!
//! Loaded into an empty store on startup. Identifiers are assigned by storage
//! in this order, so the buns come first and Brioche is the default bun.

use burgerfy_common::{Category, NewIngredient};
use rust_decimal::Decimal;

fn entry(
    name: &str,
    category: Category,
    color: &str,
    height: f64,
    width: f64,
    label: &str,
    cents: i64,
) -> NewIngredient {
    NewIngredient {
        name: name.to_string(),
        display_name: name.to_string(),
        category,
        color: color.to_string(),
        height,
        width,
        label: label.to_string(),
        price: Decimal::new(cents, 2),
    }
}

/// The 24 ingredients the builder ships with
pub fn default_catalog() -> Vec<NewIngredient> {
    vec![
        entry("Brioche Bun", Category::Bun, "bg-[#F0C080]", 20.0, 64.0, "BUN", 0),
        entry("Sesame Bun", Category::Bun, "bg-[#F0C080] opacity-80", 20.0, 64.0, "BUN", 0),
        entry("Potato Bun", Category::Bun, "bg-[#F0C080] opacity-90", 20.0, 64.0, "BUN", 0),
        entry("Lettuce Wrap", Category::Bun, "bg-gray-300", 20.0, 64.0, "BUN", 0),

        entry("Beef Patty", Category::Patty, "bg-[#7C2D12]", 10.0, 260.0, "BEEF", 350),
        entry("Chicken Breast", Category::Patty, "bg-amber-700", 10.0, 260.0, "CHICK", 325),
        entry("Veggie Patty", Category::Patty, "bg-gray-600", 10.0, 260.0, "VEG", 300),
        entry("Fish Fillet", Category::Patty, "bg-pink-300", 10.0, 260.0, "FISH", 375),

        entry("Cheddar", Category::Cheese, "bg-[#FACC15]", 6.0, 270.0, "CHED", 100),
        entry("American", Category::Cheese, "bg-yellow-400", 6.0, 270.0, "AMER", 75),
        entry("Swiss", Category::Cheese, "bg-yellow-200", 6.0, 270.0, "SWISS", 100),
        entry("Blue Cheese", Category::Cheese, "bg-blue-200", 6.0, 270.0, "BLUE", 125),

        entry("Lettuce", Category::Veggie, "bg-[#84CC16]", 4.0, 275.0, "LETT", 25),
        entry("Tomato", Category::Veggie, "bg-[#EF4444]", 6.0, 260.0, "TOM", 50),
        entry("Onion", Category::Veggie, "bg-purple-200", 4.0, 265.0, "ONI", 25),
        entry("Pickle", Category::Veggie, "bg-green-600", 3.0, 250.0, "PICK", 25),

        entry("Ketchup", Category::Sauce, "bg-red-600", 2.0, 265.0, "KETCH", 0),
        entry("Mustard", Category::Sauce, "bg-yellow-500", 2.0, 265.0, "MUST", 0),
        entry("Mayo", Category::Sauce, "bg-gray-100", 2.0, 265.0, "MAYO", 0),
        entry("BurgerFy Special Sauce", Category::Sauce, "bg-orange-300", 2.0, 265.0, "SPEC", 50),

        entry("Bacon", Category::Extra, "bg-red-800", 3.0, 240.0, "BAC", 150),
        entry("Fried Egg", Category::Extra, "bg-yellow-100", 0.5, 250.0, "EGG", 100),
        entry("Avocado", Category::Extra, "bg-green-300", 5.0, 255.0, "AVO", 150),
        entry("Jalapeños", Category::Extra, "bg-green-500", 4.0, 245.0, "JAL", 50),
    ]
}
