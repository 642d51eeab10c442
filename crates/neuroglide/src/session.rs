//! Session orchestration.

use nalgebra::{Point3, UnitQuaternion};
use thiserror::Error;
use tracing::debug;

use coil_control::{
    ControlConfig, GhostController, GhostState, InputState, PlacementDiagnostics, SnapRequest,
};
use scalp_plane::{estimate_reference_plane, FiducialSet};
use scalp_proxy::{build_proxy_surface, ProxyConfig, ProxyError};
use scalp_track::SurfaceTracker;
use scalp_types::{Ray, SurfaceMesh};
use stim_pulse::{IntervalState, Protocol, ProtocolError, PulseScheduler};

/// Errors that prevent a session from starting.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    /// The proxy surface could not be built.
    #[error(transparent)]
    Proxy(#[from] ProxyError),

    /// The stimulation protocol failed validation.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Everything a renderer needs from one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionTick {
    /// Smoothed coil position.
    pub position: Point3<f64>,
    /// Smoothed coil orientation.
    pub orientation: UnitQuaternion<f64>,
    /// Pulses emitted this tick.
    pub pulses_emitted: u32,
    /// Inter-train-interval state after this tick.
    pub interval: IntervalState,
}

/// A running placement-and-stimulation session.
///
/// Owns the surface tracker, the ghost controller, the pulse scheduler, and
/// the placement diagnostics. Single-threaded and tick-driven: call
/// [`Session::update`] once per render frame.
///
/// See the crate docs for a usage example.
#[derive(Debug)]
pub struct Session {
    tracker: SurfaceTracker,
    controller: GhostController,
    scheduler: PulseScheduler,
    diagnostics: PlacementDiagnostics,
    proxy_config: ProxyConfig,
}

impl Session {
    /// Start a session over a source head mesh.
    ///
    /// Estimates the reference plane (fiducials or fallback), builds the
    /// proxy surface once, and seeds the controller and scheduler.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Proxy`] when the proxy cannot be built from
    /// the source mesh. (Protocol validation happens at [`Protocol`]
    /// construction; the variant exists so callers can funnel both failure
    /// modes through one error type.)
    pub fn new(
        source: &SurfaceMesh,
        fiducials: Option<&FiducialSet>,
        proxy_config: ProxyConfig,
        control_config: ControlConfig,
        protocol: Protocol,
    ) -> Result<Self, SessionError> {
        let plane = estimate_reference_plane(fiducials, source);
        let proxy = build_proxy_surface(&plane, source, &proxy_config)?;
        let tracker = SurfaceTracker::new(proxy, plane);
        let controller = GhostController::new(control_config, &tracker);

        debug!(
            proxy_vertices = tracker.proxy().vertex_count(),
            total_pulses = protocol.total_pulses(),
            "session started"
        );

        Ok(Self {
            tracker,
            controller,
            scheduler: PulseScheduler::new(protocol),
            diagnostics: PlacementDiagnostics::new(),
            proxy_config,
        })
    }

    /// Advance one frame: movement first, then pulse timing.
    ///
    /// The delta is clamped to the control config's `max_tick_delta` before
    /// reaching either subsystem, so a hitch cannot trigger bulk catch-up.
    pub fn update(&mut self, input: &InputState, dt: f64) -> SessionTick {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.controller.config().max_tick_delta)
        } else {
            0.0
        };

        let pose = self
            .controller
            .update(input, dt, &self.tracker, &mut self.diagnostics);
        let pulses_emitted = self.scheduler.tick(dt);

        SessionTick {
            position: pose.position,
            orientation: pose.orientation,
            pulses_emitted,
            interval: self.scheduler.interval_state(),
        }
    }

    /// Apply a one-shot snap request. Returns whether it was applied.
    pub fn request_snap(&mut self, request: &SnapRequest) -> bool {
        self.controller
            .snap(request, &self.tracker, &mut self.diagnostics)
    }

    /// Place the coil by pointer drag. Returns whether it was committed.
    pub fn drag(&mut self, ray: &Ray) -> bool {
        self.controller
            .drag(ray, &self.tracker, &mut self.diagnostics)
    }

    /// Lock or unlock movement input.
    pub fn set_locked(&mut self, locked: bool) {
        self.controller.set_locked(locked);
    }

    /// Whether movement input is locked.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.controller.is_locked()
    }

    /// Rebuild the proxy surface for new source data.
    ///
    /// The replacement is atomic: queries before this call see the old
    /// surface, queries after see the new one, and nothing in between. On
    /// error the session keeps the previous surface.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Proxy`] when the new proxy cannot be built.
    pub fn rebuild_surface(
        &mut self,
        source: &SurfaceMesh,
        fiducials: Option<&FiducialSet>,
    ) -> Result<(), SessionError> {
        let plane = estimate_reference_plane(fiducials, source);
        let proxy = build_proxy_surface(&plane, source, &self.proxy_config)?;
        self.tracker.replace_proxy(proxy, plane);
        debug!("proxy surface rebuilt");
        Ok(())
    }

    /// Restart the pulse schedule from zero.
    pub fn reset_stimulation(&mut self) {
        self.scheduler.reset();
    }

    /// The authoritative ghost state.
    #[must_use]
    pub const fn ghost(&self) -> &GhostState {
        self.controller.ghost()
    }

    /// Placement diagnostics accumulated so far.
    #[must_use]
    pub const fn diagnostics(&self) -> &PlacementDiagnostics {
        &self.diagnostics
    }

    /// The surface tracker (read-only).
    #[must_use]
    pub const fn tracker(&self) -> &SurfaceTracker {
        &self.tracker
    }

    /// The pulse scheduler (read-only).
    #[must_use]
    pub const fn scheduler(&self) -> &PulseScheduler {
        &self.scheduler
    }
}
