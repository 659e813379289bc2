pub mod health;
pub mod navigation;
pub mod records;
pub mod team;
