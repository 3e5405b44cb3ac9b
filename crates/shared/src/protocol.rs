use serde::{Deserialize, Serialize};

use crate::domain::{CreateFoodInput, FoodId};

/// Body of `POST /foods`: the user-supplied fields plus the `available`
/// flag, which every newly created food starts with set to true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFoodRequest {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub available: bool,
}

impl CreateFoodRequest {
    pub fn new(input: CreateFoodInput) -> Self {
        Self {
            name: input.name,
            description: input.description,
            price: input.price,
            image: input.image,
            available: true,
        }
    }
}

pub fn foods_route() -> &'static str {
    "/foods"
}

pub fn food_route(id: FoodId) -> String {
    format!("/foods/{}", id.0)
}
