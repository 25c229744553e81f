use chain_api_primitives::*;
use reqwest::Client;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub mod batch;
pub mod client;
pub mod types;
pub mod utils;

pub use batch::*;
pub use client::*;
pub use types::*;
pub use utils::*;
