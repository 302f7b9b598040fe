pub mod app;
pub mod catalog;
pub mod config;
pub mod gateway;
pub mod query;
pub mod shared;
pub mod ui;
pub mod wizard;
