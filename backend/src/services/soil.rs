//! Soil and crop recommendation service
//!
//! Queries the dominant soil texture class at the confirmed coordinate and
//! maps it through the fixed recommendation tables. Also exposes the
//! segmented land-cover layer as a tile URL for the map widget.

use serde::Serialize;

use crate::external::earth_engine::{EarthEngineClient, VisParams};
use shared::{soil_report, Coordinate, SoilReport};

/// Identifier of the server-side segmented land-cover layer
/// (land, vegetation, water, buildings)
const SEGMENTATION_LAYER: &str = "land-cover-segmentation";

/// A visualized raster layer for the presentation map widget
#[derive(Debug, Clone, Serialize)]
pub struct MapLayer {
    pub name: String,
    pub tile_url: String,
}

/// Full soil view for the SoilAndCrop step
#[derive(Debug, Clone, Serialize)]
pub struct SoilAnalysis {
    pub coordinate: Coordinate,
    pub report: SoilReport,
    pub segmentation: MapLayer,
}

/// Soil analysis service
#[derive(Clone)]
pub struct SoilAnalysisService {
    earth_engine: EarthEngineClient,
}

impl SoilAnalysisService {
    /// Create a new SoilAnalysisService
    pub fn new(earth_engine: EarthEngineClient) -> Self {
        Self { earth_engine }
    }

    /// Classify the soil at a coordinate and build recommendations
    ///
    /// Recomputed on every view; a failed observation degrades to the
    /// Unknown category instead of an error.
    pub async fn analyze(&self, coordinate: Coordinate) -> SoilAnalysis {
        let class_code = self
            .earth_engine
            .soil_texture_class(coordinate)
            .await
            .map(|v| v.round() as i32);

        let report = soil_report(class_code);
        tracing::debug!(
            "Soil at ({}, {}): code {:?} -> {:?}",
            coordinate.latitude,
            coordinate.longitude,
            class_code,
            report.category
        );

        SoilAnalysis {
            coordinate,
            report,
            segmentation: self.segmentation_layer(),
        }
    }

    /// Tile layer for the segmented land-cover visualization
    fn segmentation_layer(&self) -> MapLayer {
        let vis = VisParams {
            min: 0.0,
            max: 4.0,
            palette: vec![
                "black".to_string(),
                "green".to_string(),
                "blue".to_string(),
                "gray".to_string(),
                "yellow".to_string(),
            ],
        };
        MapLayer {
            name: "Segmented Land Cover (Land, Vegetation, Water, Buildings)".to_string(),
            tile_url: self.earth_engine.map_tile_url(SEGMENTATION_LAYER, &vis),
        }
    }
}
