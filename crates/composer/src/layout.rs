//! Stack layout
//!
//! Orders a burger bottom to top and sizes every layer:
//!
//! 1. base bun: the bun with the lowest catalog id, rounded bottom
//! 2. fillings: everything that is not a bun, in the order given
//! 3. cap bun: the base bun drawn again with a rounded top and a fixed height
//!
//! Each layer is nudged down into the one below by a constant taken from the
//! layer's role and category, never from its actual height. Sauces are nudged
//! only slightly so they read as a thin spread.
//!
//! Dimensions are abstract layout units. The size mode scales every number in
//! the plan.

use burgerfy_common::{Category, Ingredient, IngredientId};
use serde::{Deserialize, Serialize};

use crate::selection::Burger;

const BASE_BUN_OFFSET: f64 = -10.0;
const CAP_BUN_OFFSET: f64 = -5.0;
const CAP_BUN_HEIGHT: f64 = 24.0;
const FALLBACK_BUN_WIDTH: f64 = 64.0;

const SAUCE_OFFSET: f64 = -1.0;
const SOLID_OFFSET: f64 = -5.0;

const STAND_IN_BUN_NAME: &str = "Bun";
const STAND_IN_BUN_HEIGHT: f64 = 20.0;
const STAND_IN_BUN_COLOR: &str = "bg-[#F0C080]";

const BUILDER_EMPTY_MESSAGE: &str = "Select ingredients to build your perfect burger";
const RECEIPT_EMPTY_MESSAGE: &str = "No ingredients selected";

/// Where the plan is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Burger in progress. An empty burger shows a stand-in bun.
    #[default]
    Builder,

    /// Read-only summary of a finished burger
    Receipt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    #[default]
    Regular,
    Compact,
}

impl Size {
    pub fn scale(&self) -> f64 {
        match self {
            Size::Regular => 1.0,
            Size::Compact => 0.75,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderOptions {
    pub view: ViewMode,
    pub size: Size,
}

impl RenderOptions {
    pub fn new(view: ViewMode, size: Size) -> Self {
        Self { view, size }
    }

    /// Compact receipt, as shown on the summary page
    pub fn receipt() -> Self {
        Self::new(ViewMode::Receipt, Size::Compact)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerRole {
    BaseBun,
    Filling,
    CapBun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    RoundedBottom,
    Square,
    RoundedTop,
}

/// One drawn layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    /// `None` for the stand-in bun of an empty builder
    pub ingredient_id: Option<IngredientId>,
    pub name: String,
    pub role: LayerRole,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub rounding: Rounding,

    /// Nudge into the layer below, always negative
    pub offset: f64,

    /// Bottom edge, measured from the bottom of the base layer
    pub position: f64,
}

/// Layers bottom to top, plus a message for empty burgers
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderPlan {
    pub layers: Vec<Layer>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RenderPlan {
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn fillings(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|l| l.role == LayerRole::Filling)
    }

    /// Top edge of the highest layer
    pub fn total_height(&self) -> f64 {
        self.layers
            .last()
            .map(|l| l.position + l.height)
            .unwrap_or(0.0)
    }
}

impl Burger {
    pub fn render(&self, options: RenderOptions) -> RenderPlan {
        compose(self.ingredients(), options)
    }
}

/// Lay out `ingredients` as a stack
pub fn compose<'a>(
    ingredients: impl IntoIterator<Item = &'a Ingredient>,
    options: RenderOptions,
) -> RenderPlan {
    let (buns, others): (Vec<&Ingredient>, Vec<&Ingredient>) =
        ingredients.into_iter().partition(|i| i.is_bun());

    if buns.is_empty() && others.is_empty() {
        return empty_plan(options);
    }

    // Several buns should not happen; the lowest id wins.
    let base = buns.iter().min_by_key(|b| b.id).copied();

    let mut layers = Vec::with_capacity(others.len() + 2);

    if let Some(bun) = base {
        layers.push(Layer {
            ingredient_id: Some(bun.id),
            name: bun.name.clone(),
            role: LayerRole::BaseBun,
            width: bun_width(bun),
            height: bun.height,
            color: bun.color.clone(),
            rounding: Rounding::RoundedBottom,
            offset: BASE_BUN_OFFSET,
            position: 0.0,
        });
    }

    for filling in &others {
        layers.push(Layer {
            ingredient_id: Some(filling.id),
            name: filling.name.clone(),
            role: LayerRole::Filling,
            width: filling.width,
            height: filling.height,
            color: filling.color.clone(),
            rounding: Rounding::Square,
            offset: filling_offset(filling.category),
            position: 0.0,
        });
    }

    if let Some(bun) = base {
        layers.push(Layer {
            ingredient_id: Some(bun.id),
            name: bun.name.clone(),
            role: LayerRole::CapBun,
            width: bun_width(bun),
            height: CAP_BUN_HEIGHT,
            color: bun.color.clone(),
            rounding: Rounding::RoundedTop,
            offset: CAP_BUN_OFFSET,
            position: 0.0,
        });
    }

    stack(&mut layers);
    scale(&mut layers, options.size.scale());

    RenderPlan {
        layers,
        message: None,
    }
}

fn empty_plan(options: RenderOptions) -> RenderPlan {
    match options.view {
        ViewMode::Builder => {
            let mut layers = vec![Layer {
                ingredient_id: None,
                name: STAND_IN_BUN_NAME.to_string(),
                role: LayerRole::BaseBun,
                width: FALLBACK_BUN_WIDTH,
                height: STAND_IN_BUN_HEIGHT,
                color: STAND_IN_BUN_COLOR.to_string(),
                rounding: Rounding::RoundedBottom,
                offset: BASE_BUN_OFFSET,
                position: 0.0,
            }];
            scale(&mut layers, options.size.scale());

            RenderPlan {
                layers,
                message: Some(BUILDER_EMPTY_MESSAGE.to_string()),
            }
        }
        ViewMode::Receipt => RenderPlan {
            layers: Vec::new(),
            message: Some(RECEIPT_EMPTY_MESSAGE.to_string()),
        },
    }
}

fn filling_offset(category: Category) -> f64 {
    match category {
        Category::Sauce => SAUCE_OFFSET,
        _ => SOLID_OFFSET,
    }
}

fn bun_width(bun: &Ingredient) -> f64 {
    if bun.width > 0.0 {
        bun.width
    } else {
        FALLBACK_BUN_WIDTH
    }
}

/// Bottom layer sits at 0; every other layer starts where the one below ends,
/// pulled down by its own offset.
fn stack(layers: &mut [Layer]) {
    let mut top: Option<f64> = None;

    for layer in layers.iter_mut() {
        layer.position = match top {
            Some(edge) => edge + layer.offset,
            None => 0.0,
        };
        top = Some(layer.position + layer.height);
    }
}

fn scale(layers: &mut [Layer], factor: f64) {
    for layer in layers {
        layer.width *= factor;
        layer.height *= factor;
        layer.offset *= factor;
        layer.position *= factor;
    }
}
