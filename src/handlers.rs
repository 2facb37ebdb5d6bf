pub mod booking;
pub mod city;
pub mod event;
pub mod health;
pub mod menu;
pub mod menu_type;
pub mod restaurant;
pub mod section;
pub mod table;
pub mod user;
