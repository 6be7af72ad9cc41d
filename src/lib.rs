//! Client library for the Correios contract API.
//!
//! Authenticates with the postage-card credentials, requests price and
//! delivery-time estimates concurrently and merges them into a single quote
//! per service. Also ships a ViaCEP address-lookup helper and a small CLI
//! demo (feature `cli`).

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::viacep::lookup_address;
pub use config::{CorreiosConfig, Environment};
pub use core::client::CorreiosClient;
pub use domain::model::{Address, ConnectionStatus, QuoteRequest, QuoteResult, ServiceQuote};
pub use utils::error::{CorreiosError, Result};
