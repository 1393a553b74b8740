pub mod alert;
pub mod badge_modal;
pub mod badges;
pub mod park_detail;
pub mod parks;
pub mod profile;
pub mod quiz;
pub mod scanner;
pub mod stamper;
pub mod welcome;
