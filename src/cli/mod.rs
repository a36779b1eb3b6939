//! Command-line front end over the storage service

pub mod categories;
pub mod currencies;
pub mod expenses;
pub mod profile;
pub mod setup;
pub mod summary;
pub mod ui;
