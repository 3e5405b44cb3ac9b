//! Dashboard state and its reducer-style transitions.
//!
//! Every mutation of the local collection and the modal flags goes through
//! [`apply`], a pure function over [`DashboardState`]. The controller layers
//! network calls on top; the transitions themselves stay synchronous and
//! directly testable.

use shared::domain::{FoodId, FoodItem};

/// The local mirror of the remote collection plus the two capture-surface
/// visibility flags. The collection is a possibly stale cache of server
/// state; it is only ever mutated after a confirmed server response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub foods: Vec<FoodItem>,
    pub editing: Option<FoodItem>,
    pub create_modal_open: bool,
    pub edit_modal_open: bool,
}

impl DashboardState {
    pub fn food(&self, id: FoodId) -> Option<&FoodItem> {
        self.foods.iter().find(|food| food.id == id)
    }
}

#[derive(Debug, Clone)]
pub enum StateChange {
    CollectionLoaded(Vec<FoodItem>),
    FoodCreated(FoodItem),
    FoodUpdated(FoodItem),
    FoodDeleted(FoodId),
    EditRequested(FoodItem),
    CreateModalToggled,
    EditModalToggled,
}

pub fn apply(state: &mut DashboardState, change: StateChange) {
    match change {
        StateChange::CollectionLoaded(foods) => {
            state.foods = foods;
        }
        StateChange::FoodCreated(food) => {
            state.foods.push(food);
        }
        StateChange::FoodUpdated(food) => {
            // No spurious append: an id that matches nothing leaves the
            // collection untouched.
            if let Some(slot) = state.foods.iter_mut().find(|f| f.id == food.id) {
                *slot = food;
            }
        }
        StateChange::FoodDeleted(id) => {
            state.foods.retain(|food| food.id != id);
        }
        StateChange::EditRequested(food) => {
            state.editing = Some(food);
            state.edit_modal_open = true;
        }
        StateChange::CreateModalToggled => {
            state.create_modal_open = !state.create_modal_open;
        }
        StateChange::EditModalToggled => {
            state.edit_modal_open = !state.edit_modal_open;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(id: i64, name: &str) -> FoodItem {
        FoodItem {
            id: FoodId(id),
            name: name.to_string(),
            description: format!("{name} description"),
            price: "10.00".to_string(),
            available: true,
            image: format!("https://img.example/{id}.png"),
        }
    }

    #[test]
    fn collection_loaded_replaces_wholesale() {
        let mut state = DashboardState {
            foods: vec![food(7, "Stale")],
            ..Default::default()
        };
        apply(
            &mut state,
            StateChange::CollectionLoaded(vec![food(1, "Pizza"), food(2, "Ramen")]),
        );
        assert_eq!(state.foods, vec![food(1, "Pizza"), food(2, "Ramen")]);
    }

    #[test]
    fn created_food_is_appended_at_the_end() {
        let mut state = DashboardState {
            foods: vec![food(1, "Pizza")],
            ..Default::default()
        };
        apply(&mut state, StateChange::FoodCreated(food(2, "Ramen")));
        assert_eq!(state.foods.last(), Some(&food(2, "Ramen")));
        assert_eq!(state.foods.len(), 2);
    }

    #[test]
    fn updated_food_replaces_only_the_matching_element() {
        let mut state = DashboardState {
            foods: vec![food(1, "Pizza"), food(2, "Ramen")],
            ..Default::default()
        };
        apply(&mut state, StateChange::FoodUpdated(food(1, "Calzone")));
        assert_eq!(state.foods[0].name, "Calzone");
        assert_eq!(state.foods[1], food(2, "Ramen"));
    }

    #[test]
    fn update_without_matching_id_leaves_collection_unchanged() {
        let mut state = DashboardState {
            foods: vec![food(1, "Pizza")],
            ..Default::default()
        };
        apply(&mut state, StateChange::FoodUpdated(food(9, "Ghost")));
        assert_eq!(state.foods, vec![food(1, "Pizza")]);
    }

    #[test]
    fn delete_removes_exactly_the_matching_id() {
        let mut state = DashboardState {
            foods: vec![food(1, "Pizza"), food(2, "Ramen"), food(3, "Udon")],
            ..Default::default()
        };
        apply(&mut state, StateChange::FoodDeleted(FoodId(2)));
        assert_eq!(state.foods, vec![food(1, "Pizza"), food(3, "Udon")]);
    }

    #[test]
    fn edit_request_records_item_and_opens_modal() {
        let mut state = DashboardState::default();
        apply(&mut state, StateChange::EditRequested(food(1, "Pizza")));
        assert_eq!(state.editing, Some(food(1, "Pizza")));
        assert!(state.edit_modal_open);
    }

    #[test]
    fn toggling_a_modal_twice_restores_visibility() {
        let mut state = DashboardState::default();
        apply(&mut state, StateChange::CreateModalToggled);
        assert!(state.create_modal_open);
        apply(&mut state, StateChange::CreateModalToggled);
        assert!(!state.create_modal_open);

        apply(&mut state, StateChange::EditModalToggled);
        apply(&mut state, StateChange::EditModalToggled);
        assert!(!state.edit_modal_open);
    }
}
