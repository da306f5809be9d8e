pub mod client;
pub mod retry;
#[cfg(test)]
mod testutil;

pub use client::{ApiClient, HttpError};
pub use retry::RetryConfig;
pub use taskdeck_api;
