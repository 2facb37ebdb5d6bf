pub mod city;
pub mod event;
pub mod menu;
pub mod restaurant;
pub mod table;
pub mod user;
