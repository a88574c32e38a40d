//! Route modules for Mirador Server

pub mod health;
pub mod pdf;
