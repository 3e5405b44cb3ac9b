use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoodId(pub i64);

/// A catalog record as the server returns it. `id` is server-assigned and
/// unique within the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: FoodId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub available: bool,
    pub image: String,
}

/// The subset of fields the user supplies when creating or editing a food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFoodInput {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

impl FoodItem {
    /// Full-record merge: user-editable fields come from the input, the
    /// server-owned `id` and `available` flag are carried over unchanged.
    pub fn merged_with(&self, input: &CreateFoodInput) -> FoodItem {
        FoodItem {
            id: self.id,
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price.clone(),
            available: self.available,
            image: input.image.clone(),
        }
    }
}
