//! Synthetic telemetry: the sensor snapshot and location fix of a signature.
//!
//! Snapshot timestamps are relative to the process start, so they are
//! derived from the elapsed time of the build minus a small jitter and
//! never go below zero.

use crate::domain::jitter::Jitter;
use crate::domain::profile::TelemetryProfile;
use crate::domain::protocol::{
    ACCELEROMETER_AXES, LOCATION_PROVIDER, LOCATION_TYPE, PROVIDER_STATUS,
};
use shared_types::{GeoPosition, LocationFix, SensorInfo, Timestamp};

/// Draw a sensor snapshot, every axis independently.
pub fn synthesize_sensor_info(
    jitter: &Jitter<'_>,
    profile: &TelemetryProfile,
    elapsed_ms: Timestamp,
) -> SensorInfo {
    let s = &profile.sensors;
    SensorInfo {
        timestamp_snapshot: snapshot_before(
            elapsed_ms,
            jitter.integer(profile.sensor_snapshot_jitter_ms),
        ),
        linear_acceleration_x: jitter.in_range(s.linear_acceleration_x),
        linear_acceleration_y: jitter.in_range(s.linear_acceleration_y),
        linear_acceleration_z: jitter.in_range(s.linear_acceleration_z),
        magnetic_field_x: jitter.in_range(s.magnetic_field_x),
        magnetic_field_y: jitter.in_range(s.magnetic_field_y),
        magnetic_field_z: jitter.in_range(s.magnetic_field_z),
        rotation_vector_x: jitter.in_range(s.rotation_vector_x),
        rotation_vector_y: jitter.in_range(s.rotation_vector_y),
        rotation_vector_z: jitter.in_range(s.rotation_vector_z),
        gyroscope_raw_x: jitter.in_range(s.gyroscope_raw_x),
        gyroscope_raw_y: jitter.in_range(s.gyroscope_raw_y),
        gyroscope_raw_z: jitter.in_range(s.gyroscope_raw_z),
        gravity_x: jitter.in_range(s.gravity_x),
        gravity_y: jitter.in_range(s.gravity_y),
        gravity_z: jitter.in_range(s.gravity_z),
        accelerometer_axes: ACCELEROMETER_AXES,
    }
}

/// Draw a reduced-precision location fix for `position`.
pub fn synthesize_location_fix(
    jitter: &Jitter<'_>,
    profile: &TelemetryProfile,
    position: GeoPosition,
    elapsed_ms: Timestamp,
) -> LocationFix {
    let horizontal = round_to(
        jitter.in_range(profile.horizontal_accuracy),
        profile.horizontal_accuracy_decimals,
    );

    LocationFix {
        provider: LOCATION_PROVIDER.to_string(),
        timestamp_snapshot: snapshot_before(
            elapsed_ms,
            jitter.integer(profile.location_fix_snapshot_jitter_ms),
        ),
        latitude: position.latitude as f32,
        longitude: position.longitude as f32,
        altitude: position.altitude as f32,
        horizontal_accuracy: horizontal as f32,
        vertical_accuracy: jitter.integer(profile.vertical_accuracy) as f32,
        provider_status: PROVIDER_STATUS,
        location_type: LOCATION_TYPE,
    }
}

fn snapshot_before(elapsed_ms: Timestamp, jitter_ms: i64) -> Timestamp {
    elapsed_ms.saturating_sub(jitter_ms.max(0) as u64)
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::ValueRange;
    use rk_01_session_state::SeededRandomSource;

    fn position() -> GeoPosition {
        GeoPosition::new(40.785091, -73.968285, 10.0)
    }

    #[test]
    fn test_sensor_values_within_profile() {
        let profile = TelemetryProfile::default();
        let random = SeededRandomSource::new(11);
        let jitter = Jitter::new(&random);

        for _ in 0..200 {
            let info = synthesize_sensor_info(&jitter, &profile, 60_000);
            let s = &profile.sensors;
            assert!(s.linear_acceleration_x.contains(info.linear_acceleration_x));
            assert!(s.linear_acceleration_y.contains(info.linear_acceleration_y));
            assert!(s.linear_acceleration_z.contains(info.linear_acceleration_z));
            assert!(s.magnetic_field_x.contains(info.magnetic_field_x));
            assert!(s.magnetic_field_y.contains(info.magnetic_field_y));
            assert!(s.magnetic_field_z.contains(info.magnetic_field_z));
            assert!(s.rotation_vector_x.contains(info.rotation_vector_x));
            assert!(s.rotation_vector_y.contains(info.rotation_vector_y));
            assert!(s.rotation_vector_z.contains(info.rotation_vector_z));
            assert!(s.gyroscope_raw_x.contains(info.gyroscope_raw_x));
            assert!(s.gyroscope_raw_y.contains(info.gyroscope_raw_y));
            assert!(s.gyroscope_raw_z.contains(info.gyroscope_raw_z));
            assert_eq!(info.gravity_x, s.gravity_x.min);
            assert!(s.gravity_y.contains(info.gravity_y));
            assert!(s.gravity_z.contains(info.gravity_z));
            assert_eq!(info.accelerometer_axes, 3);
            assert!(info.timestamp_snapshot <= 60_000 - 100);
            assert!(info.timestamp_snapshot > 60_000 - 400);
        }
    }

    #[test]
    fn test_location_fix_constants_and_ranges() {
        let profile = TelemetryProfile::default();
        let random = SeededRandomSource::new(5);
        let jitter = Jitter::new(&random);

        for _ in 0..200 {
            let fix = synthesize_location_fix(&jitter, &profile, position(), 10_000);
            assert_eq!(fix.provider, "fused");
            assert_eq!(fix.provider_status, 3);
            assert_eq!(fix.location_type, 1);
            assert_eq!(fix.latitude, 40.785091f64 as f32);
            assert_eq!(fix.longitude, -73.968285f64 as f32);
            assert_eq!(fix.altitude, 10.0);
            assert!(fix.horizontal_accuracy >= 50.0 && fix.horizontal_accuracy <= 250.0);
            assert!([2.0, 3.0, 4.0].contains(&fix.vertical_accuracy));
            assert!(fix.timestamp_snapshot <= 10_000 - 100);
            assert!(fix.timestamp_snapshot > 10_000 - 300);
        }
    }

    #[test]
    fn test_snapshot_never_negative_right_after_start() {
        let profile = TelemetryProfile::default();
        let random = SeededRandomSource::new(1);
        let jitter = Jitter::new(&random);

        assert_eq!(synthesize_sensor_info(&jitter, &profile, 50).timestamp_snapshot, 0);
        assert_eq!(
            synthesize_location_fix(&jitter, &profile, position(), 0).timestamp_snapshot,
            0
        );
    }

    #[test]
    fn test_horizontal_accuracy_rounding() {
        assert_eq!(round_to(123.456_789_123_4, 7), 123.456_789_1);
        assert_eq!(round_to(2.5, 0), 3.0);

        let profile = TelemetryProfile {
            horizontal_accuracy_decimals: 0,
            ..TelemetryProfile::default()
        }
        .with_horizontal_accuracy(ValueRange::new(60.0, 60.4));
        let random = SeededRandomSource::new(2);
        let fix = synthesize_location_fix(&Jitter::new(&random), &profile, position(), 1_000);
        assert_eq!(fix.horizontal_accuracy, 60.0);
    }
}
