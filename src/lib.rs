pub mod app;
pub mod badges;
pub mod catalog;
pub mod config;
pub mod data;
pub mod deep_link;
pub mod error;
pub mod model;
pub mod quiz;
pub mod scanner;
pub mod stamp;
pub mod storage;
pub mod ui;
pub mod view_models;

pub use app::TrilhasApp;
