//! Domain models for the Bhoomi Field Analysis Platform

pub mod session;
pub mod soil;
pub mod water;

pub use session::*;
pub use soil::*;
pub use water::*;
