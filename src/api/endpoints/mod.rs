//! API endpoint handlers.
//!
//! Each module corresponds to a screen. Handlers reuse the screen logic
//! from the core modules.

pub mod doctor;
pub mod health;
pub mod home;
pub mod profile;
