//! One-shot geolocation request flow.
//!
//! # Responsibility
//! - Guard the `idle -> requesting -> {success, error}` state machine.
//! - Apply the success side effects on the map: transient location marker,
//!   accuracy circle, temporary lift of the viewport bounds.
//! - Map failure reasons to user-facing status messages.
//!
//! # Invariants
//! - A request in flight drops further requests (no queueing, no
//!   cancellation).
//! - After a terminal state the controller is back at `idle` and the
//!   button state is no longer `Loading`.
//! - The lifted bounds are restored by the host-scheduled deferred action
//!   regardless of what the user did in the interim.

use crate::map::{
    LatLng, MapCapability, ACCURACY_CIRCLE_STYLE, FOCUS_ZOOM, SORIA_BOUNDS, USER_LOCATION_ICON,
};
use log::{info, warn};

/// Status message while a request is in flight.
pub const MSG_LOADING: &str = "Obteniendo ubicación...";
/// Status message after a successful fix.
pub const MSG_SUCCESS: &str = "Ubicación obtenida";
/// Status message when the user denied the permission.
pub const MSG_PERMISSION_DENIED: &str = "Permiso de ubicación denegado";
/// Status message when no position could be determined.
pub const MSG_POSITION_UNAVAILABLE: &str = "Información de ubicación no disponible";
/// Status message when the request timed out.
pub const MSG_TIMEOUT: &str = "Tiempo de espera agotado";
/// Fallback status message for unspecified failures.
pub const MSG_FAILURE: &str = "Error al obtener la ubicación";

/// How long the lifted viewport bounds stay lifted after a fix.
pub const BOUNDS_RESTORE_DELAY_MS: u32 = 1000;
/// Auto-dismiss duration of the success status.
pub const SUCCESS_DISMISS_MS: u32 = 3000;
/// Auto-dismiss duration of failure statuses.
pub const ERROR_DISMISS_MS: u32 = 5000;

/// Options passed to the geolocation capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u32,
    /// Maximum age of a cached position the capability may return.
    pub max_age_ms: u32,
}

impl Default for GeoOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: 10_000,
            max_age_ms: 0,
        }
    }
}

/// A successful position fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFix {
    pub lat: f64,
    pub lng: f64,
    /// Position accuracy radius in metres.
    pub accuracy_m: f64,
}

/// Failure reasons reported by the capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoFailure {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unspecified,
}

impl GeoFailure {
    /// User-facing message for this failure reason.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::PermissionDenied => MSG_PERMISSION_DENIED,
            Self::PositionUnavailable => MSG_POSITION_UNAVAILABLE,
            Self::Timeout => MSG_TIMEOUT,
            Self::Unspecified => MSG_FAILURE,
        }
    }
}

/// One-shot position capability.
pub trait GeolocationCapability {
    fn current_position(&mut self, options: &GeoOptions) -> Result<GeoFix, GeoFailure>;
}

/// Kind of a transient status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Success,
    Error,
}

/// Transient status text with optional auto-dismiss duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoStatus {
    pub message: String,
    pub kind: StatusKind,
    pub auto_dismiss_ms: Option<u32>,
}

/// Visual state of the locate button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Normal,
    Loading,
    Error,
}

/// Action the host must schedule after a delay; the core holds no timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Call [`GeolocationController::restore_bounds`] after `after_ms`.
    RestoreBounds { after_ms: u32 },
}

/// Outcome of a complete locate round-trip.
#[derive(Debug, Clone, PartialEq)]
pub enum LocateOutcome {
    /// A request was already in flight; this one was dropped.
    Dropped,
    Located {
        status: GeoStatus,
        restore: DeferredAction,
    },
    Failed {
        status: GeoStatus,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeoState {
    Idle,
    Requesting,
}

/// Controller for the one-shot geolocation flow.
///
/// The host wires the capability's success/error callback to
/// [`succeed`](Self::succeed) / [`fail`](Self::fail); [`locate`](Self::locate)
/// is the synchronous convenience for blocking capabilities.
#[derive(Debug)]
pub struct GeolocationController<M: MapCapability> {
    state: GeoState,
    button: ButtonState,
    location_marker: Option<M::Handle>,
    accuracy_circle: Option<M::Handle>,
}

impl<M: MapCapability> Default for GeolocationController<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MapCapability> GeolocationController<M> {
    pub fn new() -> Self {
        Self {
            state: GeoState::Idle,
            button: ButtonState::Normal,
            location_marker: None,
            accuracy_circle: None,
        }
    }

    pub fn is_requesting(&self) -> bool {
        self.state == GeoState::Requesting
    }

    pub fn button_state(&self) -> ButtonState {
        self.button
    }

    /// Enters the `requesting` state.
    ///
    /// Returns the loading status to show, or `None` when a request is
    /// already in flight and this one is dropped.
    pub fn begin(&mut self) -> Option<GeoStatus> {
        if self.state == GeoState::Requesting {
            return None;
        }

        self.state = GeoState::Requesting;
        self.button = ButtonState::Loading;
        info!("event=geo_request module=geo status=start");
        Some(GeoStatus {
            message: MSG_LOADING.to_string(),
            kind: StatusKind::Loading,
            auto_dismiss_ms: None,
        })
    }

    /// Concludes the request with a position fix.
    ///
    /// # Side effects
    /// - Replaces the transient location marker and accuracy circle.
    /// - Lifts the viewport max-bounds and recentres on the fix.
    /// - Returns the [`DeferredAction`] the host must schedule to restore
    ///   the bounds after [`BOUNDS_RESTORE_DELAY_MS`].
    pub fn succeed(&mut self, map: &mut M, fix: GeoFix) -> (GeoStatus, DeferredAction) {
        if let Some(handle) = self.location_marker.take() {
            map.remove_marker(handle);
        }
        if let Some(handle) = self.accuracy_circle.take() {
            map.remove_circle(handle);
        }

        let position = LatLng::new(fix.lat, fix.lng);
        map.set_max_bounds(None);
        map.set_view(position, FOCUS_ZOOM);

        let circle = map.add_circle(position, fix.accuracy_m, ACCURACY_CIRCLE_STYLE);
        let marker = map.add_marker(position, USER_LOCATION_ICON);
        map.bind_popup(marker, &location_popup_html(fix));
        map.open_popup(marker);

        self.accuracy_circle = Some(circle);
        self.location_marker = Some(marker);
        self.state = GeoState::Idle;
        self.button = ButtonState::Normal;
        info!(
            "event=geo_request module=geo status=ok accuracy_m={}",
            fix.accuracy_m
        );

        (
            GeoStatus {
                message: MSG_SUCCESS.to_string(),
                kind: StatusKind::Success,
                auto_dismiss_ms: Some(SUCCESS_DISMISS_MS),
            },
            DeferredAction::RestoreBounds {
                after_ms: BOUNDS_RESTORE_DELAY_MS,
            },
        )
    }

    /// Concludes the request with a failure reason.
    pub fn fail(&mut self, reason: GeoFailure) -> GeoStatus {
        self.state = GeoState::Idle;
        self.button = ButtonState::Error;
        warn!("event=geo_request module=geo status=error reason={reason:?}");
        GeoStatus {
            message: reason.user_message().to_string(),
            kind: StatusKind::Error,
            auto_dismiss_ms: Some(ERROR_DISMISS_MS),
        }
    }

    /// Restores the Soria viewport bounds.
    ///
    /// Scheduled by the host for [`DeferredAction::RestoreBounds`]; applies
    /// unconditionally, even if the user panned away in the interim.
    pub fn restore_bounds(&mut self, map: &mut M) {
        map.set_max_bounds(Some(SORIA_BOUNDS));
    }

    /// Runs a full request against a blocking capability.
    pub fn locate<G: GeolocationCapability>(
        &mut self,
        geolocation: &mut G,
        map: &mut M,
        options: &GeoOptions,
    ) -> LocateOutcome {
        if self.begin().is_none() {
            return LocateOutcome::Dropped;
        }

        match geolocation.current_position(options) {
            Ok(fix) => {
                let (status, restore) = self.succeed(map, fix);
                LocateOutcome::Located { status, restore }
            }
            Err(reason) => LocateOutcome::Failed {
                status: self.fail(reason),
            },
        }
    }
}

/// Popup for the transient "current location" marker.
fn location_popup_html(fix: GeoFix) -> String {
    format!(
        concat!(
            r#"<div class="user-location-popup">"#,
            "<h3>Tu Ubicación</h3>",
            "<p><strong>Latitud:</strong> {lat:.6}</p>",
            "<p><strong>Longitud:</strong> {lng:.6}</p>",
            "<p>Precisión: {accuracy}m</p>",
            "</div>"
        ),
        lat = fix.lat,
        lng = fix.lng,
        accuracy = fix.accuracy_m.round() as i64,
    )
}
