//! HTTP handlers for the Bhoomi Field Analysis Platform

pub mod health;
pub mod session;

pub use health::*;
pub use session::*;
