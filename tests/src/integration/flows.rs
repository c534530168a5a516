//! # Integration Test Flows
//!
//! A full session: tracker + builder + stock collaborators, with a manual
//! clock so timestamp arithmetic is exact.
//!
//! ## Properties Tested
//!
//! 1. **Request ids**: N builds yield N consecutive ids from the seed
//! 2. **Nonce**: stable across builds and tracker rebuilds, changed by rotation
//! 3. **Request hashes**: one per sub-request, in order, over the exact bytes
//! 4. **Handshake**: credentials, no signature, one id consumed
//! 5. **Missing ticket**: rejected without consuming an id
//! 6. **Timestamps**: `since_start == now - start` for every build
//! 7. **Telemetry bounds**: every jittered value inside its range

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use client_runtime::adapters::{
        Blake3SignatureHasher, FileSettingsStore, XChaChaSignatureCipher,
    };
    use client_runtime::default_device_profile;
    use rk_01_session_state::{
        InMemorySettingsStore, ManualTimeSource, SeededRandomSource, SessionStateApi,
        SessionTracker, SettingsStore, TimeSource,
    };
    use rk_02_envelope_builder::{
        AuthCredentials, BuilderError, EnvelopeBuilder, EnvelopeBuilderApi, SignatureHasher,
        TelemetryProfile,
    };
    use shared_types::{
        AuthTicket, AuthType, GeoPosition, Request, RequestEnvelope, RequestType, Signature,
        WireMessage,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const START: u64 = 1_469_000_000_000;
    const KEY: [u8; 32] = [0x42; 32];

    struct Session {
        builder: EnvelopeBuilder,
        clock: Arc<ManualTimeSource>,
        cipher: Arc<XChaChaSignatureCipher>,
    }

    impl Session {
        /// Decrypt and decode the signature attached to `envelope`.
        fn signature(&self, envelope: &RequestEnvelope) -> Signature {
            let sealed = envelope.encrypted_signature().expect("signed envelope");
            let plaintext = self.cipher.decrypt(sealed).expect("decrypts");
            Signature::from_wire_bytes(&plaintext).expect("decodes")
        }
    }

    fn position() -> GeoPosition {
        GeoPosition::new(40.785091, -73.968285, 10.0)
    }

    fn ticket() -> AuthTicket {
        AuthTicket {
            start: b"ticket-start".to_vec(),
            expire_timestamp_ms: START + 1_800_000,
            end: b"ticket-end".to_vec(),
        }
    }

    fn session_with(store: Arc<dyn SettingsStore>, seed: u64) -> Session {
        let clock = Arc::new(ManualTimeSource::new(START));
        let tracker = SessionTracker::builder(position())
            .settings_store(store)
            .random_source(Arc::new(SeededRandomSource::new(seed)))
            .time_source(clock.clone())
            .build()
            .expect("tracker builds");
        let cipher = Arc::new(XChaChaSignatureCipher::new(&KEY));
        let builder = EnvelopeBuilder::new(
            Arc::new(tracker),
            AuthCredentials::new("jwt", AuthType::Google),
            Arc::new(Blake3SignatureHasher::new(&KEY)),
            cipher.clone(),
        );
        Session {
            builder,
            clock,
            cipher,
        }
    }

    fn session() -> Session {
        session_with(
            Arc::new(InMemorySettingsStore::new(default_device_profile())),
            2016,
        )
    }

    fn requests(n: usize) -> Vec<Request> {
        (0..n)
            .map(|i| Request::new(RequestType(100 + i as i32), format!("body-{i}").into_bytes()))
            .collect()
    }

    // =============================================================================
    // REQUEST IDS
    // =============================================================================

    #[test]
    fn test_request_ids_form_a_consecutive_run() {
        let s = session();
        let seed = s.builder.tracker().peek_request_id();

        let mut ids = vec![s.builder.build_handshake_envelope(&requests(1)).request_id];
        s.builder.attach_auth_ticket(ticket());
        for _ in 0..9 {
            ids.push(s.builder.build_envelope(&requests(2)).unwrap().request_id);
        }

        let expected: Vec<u64> = (0..10).map(|i| seed + i).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_concurrent_builds_never_share_an_id() {
        let s = Arc::new(session().builder.with_auth_ticket(ticket()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let builder = Arc::clone(&s);
                thread::spawn(move || {
                    (0..25)
                        .map(|_| builder.build_envelope(&requests(1)).unwrap().request_id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 100);
        assert_eq!(ids[99] - ids[0], 99);
    }

    // =============================================================================
    // SESSION NONCE
    // =============================================================================

    #[test]
    fn test_nonce_stable_then_rotated() {
        let s = session();
        s.builder.attach_auth_ticket(ticket());
        let nonce = s.builder.tracker().session_nonce();

        for _ in 0..5 {
            let envelope = s.builder.build_envelope(&requests(1)).unwrap();
            assert_eq!(s.signature(&envelope).session_hash, nonce);
        }

        let rotated = s.builder.regenerate_nonce().unwrap();
        assert_ne!(rotated, nonce);
        let envelope = s.builder.build_envelope(&requests(1)).unwrap();
        assert_eq!(s.signature(&envelope).session_hash, rotated);
    }

    #[test]
    fn test_nonce_survives_restart_through_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let open = || -> Arc<dyn SettingsStore> {
            Arc::new(FileSettingsStore::open_or_init(&path, default_device_profile()).unwrap())
        };

        let first = session_with(open(), 1).builder.tracker().session_nonce();
        let second = session_with(open(), 2).builder.tracker().session_nonce();
        assert_eq!(first, second);
    }

    // =============================================================================
    // REQUEST HASHES
    // =============================================================================

    #[test]
    fn test_request_hashes_match_each_sub_request() {
        let s = session();
        s.builder.attach_auth_ticket(ticket());
        let subs = requests(5);

        let envelope = s.builder.build_envelope(&subs).unwrap();
        let signature = s.signature(&envelope);

        let reference = Blake3SignatureHasher::new(&KEY);
        let ticket_bytes = ticket().to_wire_bytes().unwrap();
        let expected: Vec<u64> = subs
            .iter()
            .map(|r| {
                reference
                    .request_hash(&ticket_bytes, &r.to_wire_bytes().unwrap())
                    .unwrap()
            })
            .collect();
        assert_eq!(signature.request_hash, expected);
        assert_eq!(
            signature.location_hash1,
            reference.location_hash1(&ticket_bytes, position()).unwrap()
        );
        assert_eq!(
            signature.location_hash2,
            reference.location_hash2(position()).unwrap()
        );
    }

    #[test]
    fn test_reordered_requests_reorder_hashes() {
        let s = session();
        s.builder.attach_auth_ticket(ticket());
        let subs = requests(3);
        let reversed: Vec<Request> = subs.iter().rev().cloned().collect();

        let forward = s.signature(&s.builder.build_envelope(&subs).unwrap());
        let backward = s.signature(&s.builder.build_envelope(&reversed).unwrap());

        let mut flipped = backward.request_hash.clone();
        flipped.reverse();
        assert_eq!(forward.request_hash, flipped);
    }

    // =============================================================================
    // HANDSHAKE AND FAILURES
    // =============================================================================

    #[test]
    fn test_handshake_shape() {
        let s = session();
        let envelope = s.builder.build_handshake_envelope(&requests(2));

        assert_eq!(envelope.status_code, RequestEnvelope::STATUS_CODE);
        assert_eq!(envelope.auth_info().unwrap().provider, "google");
        assert_eq!(envelope.auth_info().unwrap().token.contents, "jwt");
        assert!(envelope.auth_ticket().is_none());
        assert!(envelope.platform_requests.is_empty());
        assert_eq!(envelope.accuracy, position().altitude);
    }

    #[test]
    fn test_missing_ticket_leaves_sequence_untouched() {
        let s = session();
        let before = s.builder.tracker().peek_request_id();

        assert_eq!(
            s.builder.build_envelope(&requests(1)).unwrap_err(),
            BuilderError::MissingAuthTicket
        );
        assert_eq!(s.builder.tracker().peek_request_id(), before);
    }

    // =============================================================================
    // TIMESTAMPS
    // =============================================================================

    #[test]
    fn test_since_start_tracks_the_clock() {
        let s = session();
        s.builder.attach_auth_ticket(ticket());

        let mut previous = 0;
        for step in [0u64, 120, 3_000, 45_000, 1] {
            s.clock.advance(step);
            let signature = s.signature(&s.builder.build_envelope(&requests(1)).unwrap());

            assert_eq!(signature.timestamp, s.clock.now());
            assert_eq!(signature.timestamp_since_start, s.clock.now() - START);
            assert!(signature.timestamp_since_start >= previous);
            assert!(signature.sensor_info.timestamp_snapshot <= signature.timestamp_since_start);
            assert!(
                signature.location_fix[0].timestamp_snapshot <= signature.timestamp_since_start
            );
            previous = signature.timestamp_since_start;
        }
    }

    // =============================================================================
    // TELEMETRY BOUNDS
    // =============================================================================

    #[test]
    fn test_every_jittered_value_in_range() {
        let s = session();
        s.builder.attach_auth_ticket(ticket());
        s.clock.advance(600_000);
        let profile = TelemetryProfile::default();
        let axes = &profile.sensors;

        for _ in 0..100 {
            let envelope = s.builder.build_envelope(&requests(1)).unwrap();
            assert!(profile
                .ms_since_last_fix
                .contains(envelope.ms_since_last_locationfix));

            let signature = s.signature(&envelope);
            let sensors = &signature.sensor_info;
            assert!(axes.linear_acceleration_x.contains(sensors.linear_acceleration_x));
            assert!(axes.magnetic_field_z.contains(sensors.magnetic_field_z));
            assert!(axes.rotation_vector_z.contains(sensors.rotation_vector_z));
            assert!(axes.gyroscope_raw_y.contains(sensors.gyroscope_raw_y));
            assert!(axes.gravity_y.contains(sensors.gravity_y));

            let fix = &signature.location_fix[0];
            assert!((50.0..=250.0).contains(&fix.horizontal_accuracy));
            assert!((2.0..5.0).contains(&fix.vertical_accuracy));
            assert_eq!(fix.latitude, position().latitude as f32);
        }
    }
}
