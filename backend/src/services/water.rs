//! Water body detection and lake quality service
//!
//! Checks the mean water-mask fraction over the buffered region. Only when a
//! water body is present does it issue the lake-quality sub-query; otherwise
//! the report carries irrigation suggestions and no further requests go out.

use crate::external::earth_engine::EarthEngineClient;
use shared::{no_water_report, water_body_report, water_present, Coordinate, WaterReport};

/// Water analysis service
#[derive(Clone)]
pub struct WaterAnalysisService {
    earth_engine: EarthEngineClient,
}

impl WaterAnalysisService {
    /// Create a new WaterAnalysisService
    pub fn new(earth_engine: EarthEngineClient) -> Self {
        Self { earth_engine }
    }

    /// Detect water presence and, if present, classify pollution and fishery
    ///
    /// Recomputed on every view. Missing observations fall into the default
    /// branches (Moderate pollution, fishery not feasible).
    pub async fn analyze(&self, coordinate: Coordinate) -> WaterReport {
        let fraction = self.earth_engine.water_mask_fraction(coordinate).await;

        if !water_present(fraction) {
            tracing::debug!(
                "No water body at ({}, {}), fraction {:?}",
                coordinate.latitude,
                coordinate.longitude,
                fraction
            );
            return no_water_report(fraction);
        }

        let quality = self.earth_engine.lake_quality(coordinate).await;
        tracing::debug!(
            "Water body at ({}, {}): T {:?} K, depth {:?} m",
            coordinate.latitude,
            coordinate.longitude,
            quality.temperature_k,
            quality.mix_layer_depth_m
        );

        water_body_report(fraction, quality.temperature_k, quality.mix_layer_depth_m)
    }
}
