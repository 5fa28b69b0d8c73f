// src/api/handlers/mod.rs
mod generate;
mod health;

pub use generate::generate;
pub use health::health_check;
