//! Application services

pub mod catalog;
