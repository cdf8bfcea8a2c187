//! Domain layer for the dealership price quotation viewer
//!
//! Holds the price table model, the pure pricing rules and the selection
//! state controller. Nothing here performs I/O.

pub mod model;
pub mod repository;
pub mod service;
