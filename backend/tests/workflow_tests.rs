//! End-to-end wizard scenario tests
//!
//! Exercises the full workflow against stubbed external collaborators: a
//! canned geocoder and a scripted observation source. Covers the Mysuru soil
//! walk-through, the no-water shortcut (no lake sub-queries), and the
//! not-found re-prompt.

use std::cell::Cell;

use shared::{
    no_water_report, soil_report, water_body_report, water_present, Coordinate, PollutionLevel,
    Session, SessionStep, SoilCategory, WaterReport,
};

// ============================================================================
// Stub Collaborators
// ============================================================================

/// Canned geocoder: returns a fixed coordinate for known names, nothing
/// otherwise. One "request" per resolve call, like the real client.
struct StubGeocoder {
    requests: Cell<u32>,
}

impl StubGeocoder {
    fn new() -> Self {
        Self {
            requests: Cell::new(0),
        }
    }

    fn resolve(&self, location_name: &str) -> Option<Coordinate> {
        self.requests.set(self.requests.get() + 1);
        match location_name {
            "Mysuru" => Some(Coordinate::new(12.2958, 76.6394)),
            "ಮೈಸೂರು" => Some(Coordinate::new(12.2958, 76.6394)),
            _ => None,
        }
    }
}

/// Scripted observation source with per-query counters, mirroring the
/// Earth-observation client's absorb-into-absent behaviour.
struct StubObservations {
    soil_class_code: Option<f64>,
    water_fraction: Option<f64>,
    lake_temperature_k: Option<f64>,
    lake_depth_m: Option<f64>,
    soil_queries: Cell<u32>,
    water_queries: Cell<u32>,
    lake_queries: Cell<u32>,
}

impl StubObservations {
    fn new() -> Self {
        Self {
            soil_class_code: None,
            water_fraction: None,
            lake_temperature_k: None,
            lake_depth_m: None,
            soil_queries: Cell::new(0),
            water_queries: Cell::new(0),
            lake_queries: Cell::new(0),
        }
    }

    fn soil_texture_class(&self) -> Option<f64> {
        self.soil_queries.set(self.soil_queries.get() + 1);
        self.soil_class_code
    }

    fn water_mask_fraction(&self) -> Option<f64> {
        self.water_queries.set(self.water_queries.get() + 1);
        self.water_fraction
    }

    fn lake_quality(&self) -> (Option<f64>, Option<f64>) {
        self.lake_queries.set(self.lake_queries.get() + 1);
        (self.lake_temperature_k, self.lake_depth_m)
    }
}

/// Mirrors SoilAnalysisService::analyze over the stub source
fn run_soil_analysis(observations: &StubObservations) -> shared::SoilReport {
    let code = observations.soil_texture_class().map(|v| v.round() as i32);
    soil_report(code)
}

/// Mirrors WaterAnalysisService::analyze over the stub source: the lake
/// sub-query is issued only when a water body is present
fn run_water_analysis(observations: &StubObservations) -> WaterReport {
    let fraction = observations.water_mask_fraction();
    if !water_present(fraction) {
        return no_water_report(fraction);
    }
    let (temperature, depth) = observations.lake_quality();
    water_body_report(fraction, temperature, depth)
}

// ============================================================================
// Scenario Tests
// ============================================================================

/// Mysuru end-to-end: resolve, confirm, soil code 4 -> loamy recommendations
#[test]
fn test_mysuru_soil_walkthrough() {
    let geocoder = StubGeocoder::new();
    let mut session = Session::new();

    session.submit_location("Mysuru").unwrap();
    let coordinate = geocoder.resolve(session.location.as_deref().unwrap());
    let coordinate = coordinate.expect("Mysuru should geocode");
    session.confirm_location(coordinate).unwrap();
    assert_eq!(session.step, SessionStep::SoilAndCrop);

    let observations = StubObservations {
        soil_class_code: Some(4.0),
        ..StubObservations::new()
    };
    let report = run_soil_analysis(&observations);

    assert_eq!(report.category, SoilCategory::Loamy);
    assert_eq!(
        report.recommended_crops,
        "Wheat, Maize, Vegetables / ಗೋಧಿ, ಜೋಳ, ತರಕಾರಿಗಳು"
    );
    assert_eq!(report.rainfall_requirement, "600–1000 mm (Moderate)");
    assert_eq!(report.moisture_level, "Moderate");
}

/// Zero water fraction: no water body, irrigation advice, and the
/// pollution/fishery sub-query is never issued
#[test]
fn test_no_water_skips_lake_queries() {
    let observations = StubObservations {
        water_fraction: Some(0.0),
        ..StubObservations::new()
    };

    let report = run_water_analysis(&observations);

    assert!(!report.water_present);
    assert!(report.message.contains("No water body detected"));
    assert!(report.irrigation_suggestion.is_some());
    assert_eq!(observations.water_queries.get(), 1);
    assert_eq!(observations.lake_queries.get(), 0);
}

/// A missing water observation also takes the no-water branch
#[test]
fn test_missing_water_observation_skips_lake_queries() {
    let observations = StubObservations::new();

    let report = run_water_analysis(&observations);

    assert!(!report.water_present);
    assert_eq!(observations.lake_queries.get(), 0);
}

/// Positive fraction: lake quality fetched once and classified
#[test]
fn test_water_body_triggers_quality_analysis() {
    let observations = StubObservations {
        water_fraction: Some(0.02),
        lake_temperature_k: Some(306.0),
        lake_depth_m: Some(0.8),
        ..StubObservations::new()
    };

    let report = run_water_analysis(&observations);

    assert!(report.water_present);
    assert_eq!(report.pollution_level, Some(PollutionLevel::High));
    assert_eq!(report.fishery_feasible, Some(true));
    assert_eq!(observations.lake_queries.get(), 1);
}

/// Lake quality missing entirely: defaults apply, the workflow never aborts
#[test]
fn test_unavailable_lake_quality_degrades_to_defaults() {
    let observations = StubObservations {
        water_fraction: Some(0.5),
        ..StubObservations::new()
    };

    let report = run_water_analysis(&observations);

    assert!(report.water_present);
    assert_eq!(report.pollution_level, Some(PollutionLevel::Moderate));
    assert_eq!(report.fishery_feasible, Some(false));
    assert_eq!(report.fishery_possibility.as_deref(), Some("No / ಇಲ್ಲ"));
}

/// Geocoder finds nothing: the session stays in confirmation with no
/// coordinate, and a later retry with a known name can still advance
#[test]
fn test_unresolvable_location_reprompts() {
    let geocoder = StubGeocoder::new();
    let mut session = Session::new();

    session.submit_location("Atlantis").unwrap();
    let lookup = geocoder.resolve(session.location.as_deref().unwrap());
    assert!(lookup.is_none());
    assert_eq!(session.step, SessionStep::AwaitConfirmation);
    assert!(session.coordinate.is_none());

    // Re-prompt: reset, enter a resolvable name, and continue.
    session.reset();
    session.submit_location("Mysuru").unwrap();
    let coordinate = geocoder.resolve(session.location.as_deref().unwrap()).unwrap();
    session.confirm_location(coordinate).unwrap();
    assert_eq!(session.step, SessionStep::SoilAndCrop);
    assert_eq!(geocoder.requests.get(), 2);
}

/// Kannada place names resolve the same way as English ones
#[test]
fn test_kannada_location_name_resolves() {
    let geocoder = StubGeocoder::new();
    let mut session = Session::new();

    session.submit_location("ಮೈಸೂರು").unwrap();
    let coordinate = geocoder.resolve(session.location.as_deref().unwrap()).unwrap();
    session.confirm_location(coordinate).unwrap();
    assert_eq!(session.coordinate, Some(Coordinate::new(12.2958, 76.6394)));
}

/// Re-entering the soil view with the same coordinate and observations
/// yields an identical result
#[test]
fn test_soil_view_is_idempotent() {
    let observations = StubObservations {
        soil_class_code: Some(5.0),
        ..StubObservations::new()
    };

    let first = run_soil_analysis(&observations);
    let second = run_soil_analysis(&observations);

    assert_eq!(first, second);
    assert_eq!(first.category, SoilCategory::Clayey);
    assert_eq!(observations.soil_queries.get(), 2);
}

/// The full four-step walk ending in a reset lands back at step one
#[test]
fn test_full_cycle_with_reset() {
    let geocoder = StubGeocoder::new();
    let mut session = Session::new();

    session.submit_location("Mysuru").unwrap();
    let coordinate = geocoder.resolve("Mysuru").unwrap();
    session.confirm_location(coordinate).unwrap();
    session.advance_to_water_analysis().unwrap();
    assert_eq!(session.step, SessionStep::WaterAnalysis);

    session.reset();
    assert_eq!(session.step, SessionStep::AwaitLocation);
    assert!(session.location.is_none());
    assert!(session.coordinate.is_none());
}
