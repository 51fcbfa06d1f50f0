use soriamap_core::geo::controller::{
    DeferredAction, BOUNDS_RESTORE_DELAY_MS, ERROR_DISMISS_MS, MSG_FAILURE,
    MSG_PERMISSION_DENIED, MSG_POSITION_UNAVAILABLE, MSG_SUCCESS, MSG_TIMEOUT,
    SUCCESS_DISMISS_MS,
};
use soriamap_core::{
    ButtonState, GeoFailure, GeoFix, GeoOptions, GeolocationCapability, LocateOutcome,
    MemoryKeyValueStore, MemoryMap, PoiApp, StatusKind, FOCUS_ZOOM, SORIA_BOUNDS,
};

struct FakeGeolocation {
    outcome: Result<GeoFix, GeoFailure>,
}

impl GeolocationCapability for FakeGeolocation {
    fn current_position(&mut self, _options: &GeoOptions) -> Result<GeoFix, GeoFailure> {
        self.outcome
    }
}

fn fresh_app() -> PoiApp<MemoryKeyValueStore, MemoryMap> {
    PoiApp::bootstrap(MemoryKeyValueStore::new(), MemoryMap::new()).unwrap()
}

fn fix() -> GeoFix {
    GeoFix {
        lat: 41.66,
        lng: -2.47,
        accuracy_m: 25.0,
    }
}

#[test]
fn request_in_flight_drops_the_second_request() {
    let mut app = fresh_app();
    let mut geolocation = FakeGeolocation { outcome: Ok(fix()) };

    let loading = app.begin_locate().unwrap();
    assert_eq!(loading.kind, StatusKind::Loading);
    assert_eq!(loading.message, "Obteniendo ubicación...");
    assert_eq!(app.geo_button_state(), ButtonState::Loading);

    assert!(app.begin_locate().is_none());
    let outcome = app.locate(&mut geolocation, &GeoOptions::default());
    assert_eq!(outcome, LocateOutcome::Dropped);
}

#[test]
fn success_lifts_bounds_recentres_and_places_overlays() {
    let mut app = fresh_app();
    let mut geolocation = FakeGeolocation { outcome: Ok(fix()) };

    assert_eq!(app.map().max_bounds(), Some(SORIA_BOUNDS));

    let outcome = app.locate(&mut geolocation, &GeoOptions::default());
    let LocateOutcome::Located { status, restore } = outcome else {
        panic!("expected a located outcome");
    };

    assert_eq!(status.message, MSG_SUCCESS);
    assert_eq!(status.kind, StatusKind::Success);
    assert_eq!(status.auto_dismiss_ms, Some(SUCCESS_DISMISS_MS));
    assert_eq!(
        restore,
        DeferredAction::RestoreBounds {
            after_ms: BOUNDS_RESTORE_DELAY_MS
        }
    );

    // Bounds lifted, view centred on the fix at focus zoom.
    assert_eq!(app.map().max_bounds(), None);
    let (center, zoom) = app.map().view().unwrap();
    assert_eq!(zoom, FOCUS_ZOOM);
    assert!((center.lat - 41.66).abs() < f64::EPSILON);

    // One location marker with open popup, one accuracy circle.
    assert_eq!(app.map().marker_count(), 1);
    assert_eq!(app.map().circle_count(), 1);
    let marker = app.map().marker_records().next().unwrap();
    assert!(marker.popup_open);
    assert!(marker.popup_html.as_deref().unwrap().contains("Tu Ubicación"));
    let circle = app.map().circle_records().next().unwrap();
    assert!((circle.radius_m - 25.0).abs() < f64::EPSILON);

    assert_eq!(app.geo_button_state(), ButtonState::Normal);

    // Host runs the deferred action; bounds return even after panning.
    app.restore_bounds();
    assert_eq!(app.map().max_bounds(), Some(SORIA_BOUNDS));
}

#[test]
fn second_success_replaces_the_transient_overlays() {
    let mut app = fresh_app();
    let mut geolocation = FakeGeolocation { outcome: Ok(fix()) };

    app.locate(&mut geolocation, &GeoOptions::default());
    app.restore_bounds();
    app.locate(&mut geolocation, &GeoOptions::default());

    assert_eq!(app.map().marker_count(), 1);
    assert_eq!(app.map().circle_count(), 1);
}

#[test]
fn timeout_maps_to_its_specific_message_and_resets_the_button() {
    let mut app = fresh_app();
    let mut geolocation = FakeGeolocation {
        outcome: Err(GeoFailure::Timeout),
    };

    let outcome = app.locate(&mut geolocation, &GeoOptions::default());
    let LocateOutcome::Failed { status } = outcome else {
        panic!("expected a failed outcome");
    };

    assert_eq!(status.message, MSG_TIMEOUT);
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.auto_dismiss_ms, Some(ERROR_DISMISS_MS));
    assert_ne!(app.geo_button_state(), ButtonState::Loading);

    // Back to idle: the next request is accepted.
    assert!(app.begin_locate().is_some());
}

#[test]
fn every_failure_reason_has_its_own_message() {
    let cases = [
        (GeoFailure::PermissionDenied, MSG_PERMISSION_DENIED),
        (GeoFailure::PositionUnavailable, MSG_POSITION_UNAVAILABLE),
        (GeoFailure::Timeout, MSG_TIMEOUT),
        (GeoFailure::Unspecified, MSG_FAILURE),
    ];

    for (reason, expected) in cases {
        let mut app = fresh_app();
        let mut geolocation = FakeGeolocation {
            outcome: Err(reason),
        };
        let LocateOutcome::Failed { status } =
            app.locate(&mut geolocation, &GeoOptions::default())
        else {
            panic!("expected a failed outcome");
        };
        assert_eq!(status.message, expected);
    }
}

#[test]
fn failure_leaves_the_bounds_in_place() {
    let mut app = fresh_app();
    let mut geolocation = FakeGeolocation {
        outcome: Err(GeoFailure::PositionUnavailable),
    };

    app.locate(&mut geolocation, &GeoOptions::default());
    assert_eq!(app.map().max_bounds(), Some(SORIA_BOUNDS));
    assert_eq!(app.map().marker_count(), 0);
    assert_eq!(app.map().circle_count(), 0);
}

#[test]
fn default_options_match_the_request_contract() {
    let options = GeoOptions::default();
    assert!(options.high_accuracy);
    assert_eq!(options.timeout_ms, 10_000);
    assert_eq!(options.max_age_ms, 0);
}
