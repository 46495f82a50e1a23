//! Validation utilities for the Bhoomi Field Analysis Platform

use crate::types::Coordinate;

/// Maximum accepted length for a free-text location query
pub const MAX_LOCATION_NAME_LEN: usize = 200;

/// Validate a free-text location name (Kannada or English)
pub fn validate_location_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Location name must not be empty");
    }
    if trimmed.len() > MAX_LOCATION_NAME_LEN {
        return Err("Location name is too long");
    }
    Ok(())
}

/// Validate that coordinates fall within valid WGS84 ranges
pub fn validate_coordinate(coordinate: &Coordinate) -> Result<(), &'static str> {
    if !(-90.0..=90.0).contains(&coordinate.latitude) {
        return Err("Latitude must be between -90 and 90 degrees");
    }
    if !(-180.0..=180.0).contains(&coordinate.longitude) {
        return Err("Longitude must be between -180 and 180 degrees");
    }
    Ok(())
}
