//! Telemetry profile: every jitter bound used by a signature
//!
//! The default values encode observations of a stationary handheld device
//! and are reproduced verbatim; the remote service checks them for
//! plausibility. Revisions are made here, never in control flow.
//!
//! # Example
//!
//! ```ignore
//! use rk_02_envelope_builder::TelemetryProfile;
//!
//! let profile = TelemetryProfile::from_json(&std::fs::read_to_string("profile.json")?)?;
//! ```

use crate::error::BuilderError;
use serde::{Deserialize, Serialize};

/// Closed floating-point range `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, field: &str) -> Result<(), BuilderError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(invalid(field, "bounds must be finite"));
        }
        if self.min > self.max {
            return Err(invalid(field, format!("min {} exceeds max {}", self.min, self.max)));
        }
        Ok(())
    }
}

/// Half-open integer range `[low, high)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub low: i64,
    pub high: i64,
}

impl IntRange {
    pub const fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.low && value < self.high
    }

    fn validate(&self, field: &str) -> Result<(), BuilderError> {
        if self.low >= self.high {
            return Err(invalid(field, format!("empty range [{}, {})", self.low, self.high)));
        }
        Ok(())
    }

    fn validate_non_negative(&self, field: &str) -> Result<(), BuilderError> {
        self.validate(field)?;
        if self.low < 0 {
            return Err(invalid(field, "must not be negative"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> BuilderError {
    BuilderError::InvalidProfile {
        field: field.to_string(),
        reason: reason.into(),
    }
}

/// Per-axis sensor ranges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorProfile {
    pub linear_acceleration_x: ValueRange,
    pub linear_acceleration_y: ValueRange,
    pub linear_acceleration_z: ValueRange,
    pub magnetic_field_x: ValueRange,
    pub magnetic_field_y: ValueRange,
    pub magnetic_field_z: ValueRange,
    pub rotation_vector_x: ValueRange,
    pub rotation_vector_y: ValueRange,
    pub rotation_vector_z: ValueRange,
    pub gyroscope_raw_x: ValueRange,
    pub gyroscope_raw_y: ValueRange,
    pub gyroscope_raw_z: ValueRange,
    pub gravity_x: ValueRange,
    pub gravity_y: ValueRange,
    pub gravity_z: ValueRange,
}

impl Default for SensorProfile {
    fn default() -> Self {
        Self {
            linear_acceleration_x: ValueRange::new(-0.31110161542892456, 0.1681540310382843),
            linear_acceleration_y: ValueRange::new(-0.6574847102165222, -0.07290205359458923),
            linear_acceleration_z: ValueRange::new(-0.9943905472755432, -0.7463029026985168),
            magnetic_field_x: ValueRange::new(-0.139084026217, 0.138112977147),
            magnetic_field_y: ValueRange::new(-0.2, 0.19),
            magnetic_field_z: ValueRange::new(-0.2, 0.4),
            rotation_vector_x: ValueRange::new(-47.149471283, 61.8397789001),
            rotation_vector_y: ValueRange::new(-47.149471283, 61.8397789001),
            rotation_vector_z: ValueRange::new(-47.149471283, 5.0),
            gyroscope_raw_x: ValueRange::new(-0.9703824520111084, 0.8556089401245117),
            gyroscope_raw_y: ValueRange::new(-1.7470258474349976, 1.4218578338623047),
            gyroscope_raw_z: ValueRange::new(-0.9681901931762695, 0.8396636843681335),
            gravity_x: ValueRange::new(0.0729667818829, 0.0729667818829),
            gravity_y: ValueRange::new(-2.788630499244109, 3.0586791383810468),
            gravity_z: ValueRange::new(-0.34825887123552773, 0.19347580173737935),
        }
    }
}

impl SensorProfile {
    fn axes(&self) -> [(&'static str, &ValueRange); 15] {
        [
            ("linear_acceleration_x", &self.linear_acceleration_x),
            ("linear_acceleration_y", &self.linear_acceleration_y),
            ("linear_acceleration_z", &self.linear_acceleration_z),
            ("magnetic_field_x", &self.magnetic_field_x),
            ("magnetic_field_y", &self.magnetic_field_y),
            ("magnetic_field_z", &self.magnetic_field_z),
            ("rotation_vector_x", &self.rotation_vector_x),
            ("rotation_vector_y", &self.rotation_vector_y),
            ("rotation_vector_z", &self.rotation_vector_z),
            ("gyroscope_raw_x", &self.gyroscope_raw_x),
            ("gyroscope_raw_y", &self.gyroscope_raw_y),
            ("gyroscope_raw_z", &self.gyroscope_raw_z),
            ("gravity_x", &self.gravity_x),
            ("gravity_y", &self.gravity_y),
            ("gravity_z", &self.gravity_z),
        ]
    }
}

/// Every distribution parameter used while synthesizing a signature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelemetryProfile {
    pub sensors: SensorProfile,
    /// Subtracted from elapsed time for the sensor snapshot (ms)
    pub sensor_snapshot_jitter_ms: IntRange,
    /// Subtracted from elapsed time for the location fix snapshot (ms)
    pub location_fix_snapshot_jitter_ms: IntRange,
    pub horizontal_accuracy: ValueRange,
    /// Decimal places kept on the horizontal accuracy
    pub horizontal_accuracy_decimals: u32,
    pub vertical_accuracy: IntRange,
    /// Envelope-level "ms since last location fix"
    pub ms_since_last_fix: IntRange,
}

impl Default for TelemetryProfile {
    fn default() -> Self {
        Self {
            sensors: SensorProfile::default(),
            sensor_snapshot_jitter_ms: IntRange::new(100, 400),
            location_fix_snapshot_jitter_ms: IntRange::new(100, 300),
            horizontal_accuracy: ValueRange::new(50.0, 250.0),
            horizontal_accuracy_decimals: 7,
            vertical_accuracy: IntRange::new(2, 5),
            ms_since_last_fix: IntRange::new(800, 1900),
        }
    }
}

impl TelemetryProfile {
    /// Parse and validate a profile from JSON.
    pub fn from_json(json: &str) -> Result<Self, BuilderError> {
        let profile: Self = serde_json::from_str(json).map_err(|e| invalid("<document>", e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Reject empty, inverted or non-finite ranges.
    pub fn validate(&self) -> Result<(), BuilderError> {
        for (field, range) in self.sensors.axes() {
            range.validate(field)?;
        }

        self.sensor_snapshot_jitter_ms
            .validate_non_negative("sensor_snapshot_jitter_ms")?;
        self.location_fix_snapshot_jitter_ms
            .validate_non_negative("location_fix_snapshot_jitter_ms")?;
        self.horizontal_accuracy.validate("horizontal_accuracy")?;
        self.vertical_accuracy.validate("vertical_accuracy")?;
        self.ms_since_last_fix
            .validate_non_negative("ms_since_last_fix")?;

        // f64 carries ~15 significant digits; more decimals cannot matter
        if self.horizontal_accuracy_decimals > 15 {
            return Err(invalid("horizontal_accuracy_decimals", "at most 15 decimals"));
        }

        Ok(())
    }

    /// Builder-style method to replace the sensor table
    pub fn with_sensors(mut self, sensors: SensorProfile) -> Self {
        self.sensors = sensors;
        self
    }

    /// Builder-style method to set the horizontal accuracy range
    pub fn with_horizontal_accuracy(mut self, range: ValueRange) -> Self {
        self.horizontal_accuracy = range;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_valid() {
        assert!(TelemetryProfile::default().validate().is_ok());
    }

    #[test]
    fn test_default_bounds_are_verbatim() {
        let profile = TelemetryProfile::default();
        assert_eq!(profile.sensors.rotation_vector_z, ValueRange::new(-47.149471283, 5.0));
        assert_eq!(profile.sensors.gravity_y.max, 3.0586791383810468);
        assert_eq!(profile.sensor_snapshot_jitter_ms, IntRange::new(100, 400));
        assert_eq!(profile.location_fix_snapshot_jitter_ms, IntRange::new(100, 300));
        assert_eq!(profile.ms_since_last_fix, IntRange::new(800, 1900));
        assert_eq!(profile.vertical_accuracy, IntRange::new(2, 5));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut sensors = SensorProfile::default();
        sensors.magnetic_field_z = ValueRange::new(0.4, -0.2);
        let err = TelemetryProfile::default()
            .with_sensors(sensors)
            .validate()
            .unwrap_err();
        assert!(matches!(err, BuilderError::InvalidProfile { ref field, .. } if field == "magnetic_field_z"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_non_finite_range_rejected() {
        let profile = TelemetryProfile::default()
            .with_horizontal_accuracy(ValueRange::new(50.0, f64::INFINITY));
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_empty_int_range_rejected() {
        let mut profile = TelemetryProfile::default();
        profile.ms_since_last_fix = IntRange::new(1900, 800);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_from_json_round_trip() {
        let json = serde_json::to_string(&TelemetryProfile::default()).unwrap();
        assert_eq!(TelemetryProfile::from_json(&json).unwrap(), TelemetryProfile::default());
    }

    #[test]
    fn test_from_json_keeps_every_digit() {
        let json = serde_json::to_string_pretty(&TelemetryProfile::default()).unwrap();
        assert!(json.contains("1.4218578338623047"));
        let profile = TelemetryProfile::from_json(&json).unwrap();

        assert_eq!(
            profile.sensors.gyroscope_raw_y.max.to_bits(),
            1.4218578338623047f64.to_bits()
        );
        assert_eq!(
            profile.sensors.gyroscope_raw_z.min.to_bits(),
            (-0.9681901931762695f64).to_bits()
        );
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = TelemetryProfile::from_json("{\"sensors\": 3}").unwrap_err();
        assert!(matches!(err, BuilderError::InvalidProfile { ref field, .. } if field == "<document>"));
    }
}
