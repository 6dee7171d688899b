pub mod api;
pub mod app;
pub mod config;
pub mod model;
pub mod navigator;
pub mod route;
pub mod view;
