//! sparkreceipt_client - backend client, session cache and CLI for SparkReceipt.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod services;
pub mod session;
pub mod store;

pub use client::SparkReceiptClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use services::BackendServices;
pub use session::{Session, SessionData};
pub use store::InMemoryStore;
