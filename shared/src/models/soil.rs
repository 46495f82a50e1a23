//! Soil texture classification and crop recommendation tables
//!
//! The soil texture class code comes from the USDA texture-class raster
//! (OpenLandMap), sampled with a mode reducer at the field location. The
//! code-to-category rule and the recommendation tables are fixed.

use serde::{Deserialize, Serialize};

/// Placeholder shown whenever a recommendation table has no entry
pub const NOT_AVAILABLE: &str = "N/A / ಲಭ್ಯವಿಲ್ಲ";

/// Soil category derived from the USDA texture class code
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SoilCategory {
    Sandy,
    Loamy,
    Clayey,
    Unknown,
}

impl SoilCategory {
    /// Map a texture class code to a soil category
    ///
    /// Codes 1-2 are sandy, 3-4 loamy, 5-6 clayey. Any other code, or a
    /// missing observation, is Unknown.
    pub fn from_class_code(code: Option<i32>) -> Self {
        match code {
            Some(1) | Some(2) => SoilCategory::Sandy,
            Some(3) | Some(4) => SoilCategory::Loamy,
            Some(5) | Some(6) => SoilCategory::Clayey,
            _ => SoilCategory::Unknown,
        }
    }

    /// Bilingual display label for the soil type
    pub fn label(&self) -> &'static str {
        match self {
            SoilCategory::Sandy => "Sandy Soil / ಮರಳು ಮಣ್ಣು",
            SoilCategory::Loamy => "Loamy Soil / ಮಿಶ್ರ ಮಣ್ಣು",
            SoilCategory::Clayey => "Clayey Soil / ಕಡಲು ಮಣ್ಣು",
            SoilCategory::Unknown => "Unknown",
        }
    }

    /// Recommended crops for this soil type
    pub fn recommended_crops(&self) -> &'static str {
        match self {
            SoilCategory::Sandy => {
                "Carrots, Peanuts, Watermelon / ಗಾಜರಿಗಳು, ಶೇಂಗಾ, ಕಲಂಗಡಿಗಳು"
            }
            SoilCategory::Loamy => "Wheat, Maize, Vegetables / ಗೋಧಿ, ಜೋಳ, ತರಕಾರಿಗಳು",
            SoilCategory::Clayey => "Rice, Sugarcane, Pulses / ಅಕ್ಕಿ, ಸಕ್ಕರೆ, ಕಡಲೆ",
            SoilCategory::Unknown => NOT_AVAILABLE,
        }
    }

    /// Annual rainfall band required by crops suited to this soil type
    pub fn rainfall_requirement(&self) -> &'static str {
        match self {
            SoilCategory::Sandy => "300–600 mm (Low to Moderate)",
            SoilCategory::Loamy => "600–1000 mm (Moderate)",
            SoilCategory::Clayey => "1000+ mm (High)",
            SoilCategory::Unknown => NOT_AVAILABLE,
        }
    }

    /// Typical moisture retention of this soil type
    pub fn moisture_level(&self) -> &'static str {
        match self {
            SoilCategory::Sandy => "Low",
            SoilCategory::Loamy => "Moderate",
            SoilCategory::Clayey => "High",
            SoilCategory::Unknown => NOT_AVAILABLE,
        }
    }
}

/// Soil classification result with recommendation strings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilReport {
    pub category: SoilCategory,
    pub class_code: Option<i32>,
    pub soil_type: String,
    pub recommended_crops: String,
    pub rainfall_requirement: String,
    pub moisture_level: String,
}

/// Build the full soil report from a texture class observation
///
/// Pure function of the observation; recomputed on every view.
pub fn soil_report(class_code: Option<i32>) -> SoilReport {
    let category = SoilCategory::from_class_code(class_code);
    SoilReport {
        category,
        class_code,
        soil_type: category.label().to_string(),
        recommended_crops: category.recommended_crops().to_string(),
        rainfall_requirement: category.rainfall_requirement().to_string(),
        moisture_level: category.moisture_level().to_string(),
    }
}
