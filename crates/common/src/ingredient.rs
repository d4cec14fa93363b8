//! Catalog ingredients

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Catalog identifier of an ingredient
pub type IngredientId = u32;

/// Ingredient category
///
/// Declaration order is the display order of the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "buns", alias = "bun")]
    Bun,
    #[serde(rename = "meats", alias = "meat", alias = "patty", alias = "patties")]
    Patty,
    #[serde(rename = "cheese", alias = "cheeses")]
    Cheese,
    #[serde(rename = "veggies", alias = "veggie")]
    Veggie,
    #[serde(rename = "sauces", alias = "sauce")]
    Sauce,
    #[serde(rename = "extras", alias = "extra")]
    Extra,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 6] = [
        Category::Bun,
        Category::Patty,
        Category::Cheese,
        Category::Veggie,
        Category::Sauce,
        Category::Extra,
    ];

    /// Wire token
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bun => "buns",
            Category::Patty => "meats",
            Category::Cheese => "cheese",
            Category::Veggie => "veggies",
            Category::Sauce => "sauces",
            Category::Extra => "extras",
        }
    }

    /// Heading shown above the category
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Bun => "Buns",
            Category::Patty => "Meats",
            Category::Cheese => "Cheese",
            Category::Veggie => "Veggies",
            Category::Sauce => "Sauces",
            Category::Extra => "Extras",
        }
    }

    pub fn is_bun(&self) -> bool {
        matches!(self, Category::Bun)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buns" | "bun" => Ok(Category::Bun),
            "meats" | "meat" | "patty" | "patties" => Ok(Category::Patty),
            "cheese" | "cheeses" => Ok(Category::Cheese),
            "veggies" | "veggie" => Ok(Category::Veggie),
            "sauces" | "sauce" => Ok(Category::Sauce),
            "extras" | "extra" => Ok(Category::Extra),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}

/// A catalog entry. Read-only once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: IngredientId,

    /// Internal name, e.g. `Brioche Bun`
    pub name: String,

    /// Name shown to the user
    pub display_name: String,

    pub category: Category,

    /// Style token handed to the presentation layer
    pub color: String,

    /// Layer height in layout units
    pub height: f64,

    /// Layer width in layout units
    pub width: f64,

    /// Short label for compact views
    #[serde(default)]
    pub label: String,

    /// Unit price. Accepts `"3.50"` or `3.5` on input.
    #[serde(default)]
    pub price: Decimal,
}

impl Ingredient {
    pub fn is_bun(&self) -> bool {
        self.category.is_bun()
    }
}

/// An ingredient that has not been assigned an identifier yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIngredient {
    pub name: String,
    pub display_name: String,
    pub category: Category,
    pub color: String,
    pub height: f64,
    pub width: f64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub price: Decimal,
}

impl NewIngredient {
    /// Check the entry before it enters the catalog
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidIngredient("name must not be empty".to_string()));
        }

        if !(self.height > 0.0 && self.width > 0.0) {
            return Err(Error::InvalidIngredient(format!(
                "{} must have positive dimensions",
                self.name
            )));
        }

        if self.price.is_sign_negative() {
            return Err(Error::InvalidPrice(format!(
                "{} has negative price {}",
                self.name, self.price
            )));
        }

        Ok(())
    }

    /// Attach the identifier assigned by storage
    pub fn with_id(self, id: IngredientId) -> Ingredient {
        Ingredient {
            id,
            name: self.name,
            display_name: self.display_name,
            category: self.category,
            color: self.color,
            height: self.height,
            width: self.width,
            label: self.label,
            price: self.price,
        }
    }
}

/// Parse a string-encoded price without going through floating point
pub fn parse_price(raw: &str) -> Result<Decimal> {
    let price = Decimal::from_str(raw.trim())
        .map_err(|e| Error::InvalidPrice(format!("{raw}: {e}")))?;

    if price.is_sign_negative() {
        return Err(Error::InvalidPrice(format!("{raw}: must not be negative")));
    }

    Ok(price)
}
