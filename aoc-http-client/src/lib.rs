//! AOC HTTP Client Library
//!
//! Blocking access to adventofcode.com for a puzzle runner: check that a
//! session cookie is valid (and whose it is) and download personal puzzle
//! inputs.
//!
//! - TLS through rustls, no OpenSSL
//! - Redirects are never followed
//! - Session cookies are sent as sensitive headers
//!
//! # Example
//!
//! ```no_run
//! use aoc_http_client::AocClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AocClient::new()?;
//! let session = "your_session_cookie_here";
//!
//! let session_info = client.verify_session(session)?;
//! if let Some(user_id) = session_info.user_id {
//!     println!("Session is valid! User ID: {}", user_id);
//! }
//!
//! let input = client.get_input(2022, 12, session)?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod parser;

pub use client::{AocClient, AocClientBuilder, SessionInfo};
pub use error::AocError;
