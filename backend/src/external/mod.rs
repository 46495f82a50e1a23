//! External service clients

pub mod earth_engine;
pub mod geocoder;

pub use earth_engine::EarthEngineClient;
pub use geocoder::GeocoderClient;
