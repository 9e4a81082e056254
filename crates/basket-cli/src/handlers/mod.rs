pub mod list;
pub mod shop;
