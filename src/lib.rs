pub mod api;
pub mod app;
pub mod controller;
pub mod i18n;
pub mod server;
pub mod storage;
pub mod ui;
pub mod utils;
