//! HTTP client for the Bichance backend.

mod error;
mod http;

pub use error::{ClientError, ClientResult};
pub use http::BichanceClient;
