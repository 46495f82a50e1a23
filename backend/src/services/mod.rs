//! Business logic services for the Bhoomi Field Analysis Platform

pub mod session;
pub mod soil;
pub mod water;

pub use session::SessionService;
pub use soil::SoilAnalysisService;
pub use water::WaterAnalysisService;
