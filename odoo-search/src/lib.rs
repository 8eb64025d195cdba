pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod transport;
pub mod xmlrpc;

pub use error::{OdooSearchError, Result};
