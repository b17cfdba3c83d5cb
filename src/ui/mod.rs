pub mod panels;
pub mod scenes;
