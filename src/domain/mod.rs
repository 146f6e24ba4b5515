pub mod enable_handler;
pub mod models;
pub mod settings;
