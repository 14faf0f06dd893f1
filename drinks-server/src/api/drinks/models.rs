use crate::models::{Drink, Ingredient, ShortDrink};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response listing drinks in short form
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShortDrinksResponse {
    pub success: bool,
    pub drinks: Vec<ShortDrink>,
}

/// Response listing drinks in long form
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DrinksResponse {
    pub success: bool,
    pub drinks: Vec<Drink>,
}

/// Response carrying a single updated drink
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DrinkResponse {
    pub success: bool,
    pub drinks: Drink,
}

/// Response to a deletion
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub success: bool,
    /// Id of the removed drink
    pub id: u64,
}

/// Partial update of a drink. The recipe is always replaced, the title only when given.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct UpdateDrinkRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub recipe: Vec<Ingredient>,
}
