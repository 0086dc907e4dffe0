pub mod decree;
pub mod role;
pub mod strategy;
pub mod template;
