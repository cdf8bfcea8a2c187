//! Application use cases

pub mod load_tracker;
pub mod quote_service;

pub use load_tracker::{LoadState, LoadTicket, LoadTracker, LOAD_FAILURE_MESSAGE};
pub use quote_service::{list_models, plans_for, prepare_quote, ModelListing, QuoteRequest};
