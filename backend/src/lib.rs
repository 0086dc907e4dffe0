pub mod config;
pub mod document;
pub mod rbac;
pub mod services;
pub mod state;
