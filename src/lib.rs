pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod table;

pub use client::coinbase::{CoinbaseClient, auth::Credentials};
pub use error::{Error, Result};

pub type ProductId = bytestring::ByteString;
