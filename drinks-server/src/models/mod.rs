use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single recipe entry
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Ingredient {
    /// Display color of the layer
    pub color: String,
    /// Ingredient name
    pub name: String,
    /// Relative amount of the ingredient
    #[schema(value_type = f64)]
    pub parts: serde_json::Number,
}

/// Recipe entry as exposed to unauthenticated callers
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ShortIngredient {
    pub color: String,
    #[schema(value_type = f64)]
    pub parts: serde_json::Number,
}

/// Long form of a drink
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Drink {
    /// Server assigned identifier
    pub id: u64,
    /// Unique title
    pub title: String,
    /// Ordered recipe
    pub recipe: Vec<Ingredient>,
}

/// Short form of a drink, without ingredient names
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ShortDrink {
    pub id: u64,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

/// A drink that has not been stored yet
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct NewDrink {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl Drink {
    pub fn short(&self) -> ShortDrink {
        ShortDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|ingredient| ShortIngredient {
                    color: ingredient.color.clone(),
                    parts: ingredient.parts.clone(),
                })
                .collect(),
        }
    }
}
