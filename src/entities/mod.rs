//! Entity module - `SeaORM` entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod food_item;

pub use food_item::{Column as FoodItemColumn, Entity as FoodItem, Model as FoodItemModel};
