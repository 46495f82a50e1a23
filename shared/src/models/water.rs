//! Water body detection and lake quality classification
//!
//! Water presence uses the mean MODIS water-mask fraction over a buffered
//! region; pollution and fishery feasibility come from ERA5-Land lake
//! temperature (Kelvin) and mix-layer depth (metres) means over the same
//! region. All thresholds are strict inequalities.

use serde::{Deserialize, Serialize};

/// Temperature above which a lake is classified as highly polluted (Kelvin)
pub const POLLUTION_HIGH_TEMP_K: f64 = 305.0;

/// Temperature below which a lake is classified as low pollution (Kelvin)
pub const POLLUTION_LOW_TEMP_K: f64 = 295.0;

/// Minimum mix-layer depth for a viable fishery (metres)
pub const FISHERY_MIN_DEPTH_M: f64 = 0.5;

/// Estimated pollution level of a detected water body
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PollutionLevel {
    Low,
    Moderate,
    High,
}

impl PollutionLevel {
    /// Classify pollution from the mean lake temperature
    ///
    /// Moderate is the default, including when the observation is missing.
    pub fn from_temperature(temperature_k: Option<f64>) -> Self {
        match temperature_k {
            Some(t) if t > POLLUTION_HIGH_TEMP_K => PollutionLevel::High,
            Some(t) if t < POLLUTION_LOW_TEMP_K => PollutionLevel::Low,
            _ => PollutionLevel::Moderate,
        }
    }

    /// Bilingual display label
    pub fn label(&self) -> &'static str {
        match self {
            PollutionLevel::Low => "Low / ಕಡಿಮೆ ಮಾಲಿನ್ಯ",
            PollutionLevel::Moderate => "Moderate",
            PollutionLevel::High => "High / ಹೆಚ್ಚಿನ ಮಾಲಿನ್ಯ",
        }
    }
}

/// Is a water body present at all?
///
/// Any strictly positive mean mask fraction counts as presence. The bare
/// positivity check is deliberately coarse; there is no tolerance band.
pub fn water_present(mask_fraction: Option<f64>) -> bool {
    mask_fraction.map(|f| f > 0.0).unwrap_or(false)
}

/// Is fishing feasible given the mean mix-layer depth?
///
/// Missing depth counts as not feasible.
pub fn fishery_feasible(mix_layer_depth_m: Option<f64>) -> bool {
    mix_layer_depth_m
        .map(|d| d > FISHERY_MIN_DEPTH_M)
        .unwrap_or(false)
}

/// Bilingual yes/no label for fishery feasibility
pub fn fishery_label(feasible: bool) -> &'static str {
    if feasible {
        "Yes / ಹೌದು"
    } else {
        "No / ಇಲ್ಲ"
    }
}

/// Message shown when a water body is detected
pub const WATER_DETECTED_MESSAGE: &str =
    "Water body detected in this region. / ಈ ಪ್ರದೇಶದಲ್ಲಿ ನೀರಿನ ನಕ್ಷೇಪ ಪತ್ತೆಯಾಗಿದೆ.";

/// Message shown when no water body is detected
pub const NO_WATER_MESSAGE: &str =
    "No water body detected in this area. / ಈ ಪ್ರದೇಶದಲ್ಲಿ ಯಾವುದೇ ನೀರಿನ ನಕ್ಷೇಪ ಪತ್ತೆಯಾಗಿಲ್ಲ.";

/// Irrigation advice shown when no water body is present
pub const IRRIGATION_SUGGESTION: &str = "Suggested Irrigation / ಶಿಫಾರಸು ಮಾಡಿದ ನೀರಾವರಿ: \
     Borewell (ಬೋರ್‌ವೆಲ್), Drip (ಟಪಕ ನೀರಾವರಿ), Rainwater Harvesting (ಮಳೆ ನೀರಿನ ಸಂಗ್ರಹಣೆ)";

/// Water analysis result for a field location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaterReport {
    pub water_present: bool,
    pub mask_fraction: Option<f64>,
    pub message: String,
    /// Set only when a water body is present
    pub pollution_level: Option<PollutionLevel>,
    pub pollution_status: Option<String>,
    pub fishery_feasible: Option<bool>,
    pub fishery_possibility: Option<String>,
    /// Set only when no water body is present
    pub irrigation_suggestion: Option<String>,
}

/// Build a report for a location where a water body was detected
pub fn water_body_report(
    mask_fraction: Option<f64>,
    temperature_k: Option<f64>,
    mix_layer_depth_m: Option<f64>,
) -> WaterReport {
    let pollution = PollutionLevel::from_temperature(temperature_k);
    let feasible = fishery_feasible(mix_layer_depth_m);
    WaterReport {
        water_present: true,
        mask_fraction,
        message: WATER_DETECTED_MESSAGE.to_string(),
        pollution_level: Some(pollution),
        pollution_status: Some(pollution.label().to_string()),
        fishery_feasible: Some(feasible),
        fishery_possibility: Some(fishery_label(feasible).to_string()),
        irrigation_suggestion: None,
    }
}

/// Build a report for a location with no detected water body
pub fn no_water_report(mask_fraction: Option<f64>) -> WaterReport {
    WaterReport {
        water_present: false,
        mask_fraction,
        message: NO_WATER_MESSAGE.to_string(),
        pollution_level: None,
        pollution_status: None,
        fishery_feasible: None,
        fishery_possibility: None,
        irrigation_suggestion: Some(IRRIGATION_SUGGESTION.to_string()),
    }
}
