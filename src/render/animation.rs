//! The animation loop.
//!
//! [`AnimationLoop`] is an explicit two-state machine. It never calls itself:
//! the host asks its [`Scheduler`] whether a frame is due and then calls
//! [`AnimationLoop::tick`] with the request that fired and a monotonic
//! timestamp.

/// Token identifying one outstanding frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest(u64);

/// The host's "run again before the next repaint" primitive.
///
/// A request fires at most once; continuing the animation means requesting again.
pub trait Scheduler {
    fn request_next_frame(&mut self) -> FrameRequest;
    /// Withdraws `request` if it has not fired yet.
    fn cancel(&mut self, request: FrameRequest);
}

/// Fires the pending request once per presented frame.
///
/// With vsync enabled the host presents at the display refresh rate, so
/// polling [`VsyncScheduler::take_due`] once per presented frame gives one
/// tick per refresh.
#[derive(Debug, Default)]
pub struct VsyncScheduler {
    next_id: u64,
    pending: Option<FrameRequest>,
}

impl VsyncScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the pending request, if any.
    pub fn take_due(&mut self) -> Option<FrameRequest> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Scheduler for VsyncScheduler {
    fn request_next_frame(&mut self) -> FrameRequest {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        self.pending = Some(request);
        request
    }

    fn cancel(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopState {
    Idle,
    Running {
        /// Timestamp of the previous tick (or of `start`), in milliseconds.
        previous_ms: f64,
        pending: FrameRequest,
    },
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Seconds since the previous tick.
    pub delta_time: f32,
    /// Angle passed to the renderer.
    pub angle: f32,
}

/// Accumulates elapsed time into a rotation angle, one render per tick.
///
/// The angle grows by one radian per second without wrapping.
pub struct AnimationLoop<S: Scheduler> {
    scheduler: S,
    state: LoopState,
    angle: f32,
}

impl<S: Scheduler> AnimationLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            state: LoopState::Idle,
            angle: 0.0,
        }
    }

    /// Idle → Running. Does nothing if already running.
    pub fn start(&mut self, now_ms: f64) {
        if let LoopState::Running { .. } = self.state {
            log::debug!("animation loop already running");
            return;
        }
        let pending = self.scheduler.request_next_frame();
        self.state = LoopState::Running {
            previous_ms: now_ms,
            pending,
        };
        log::debug!("animation loop started at {now_ms}ms");
    }

    /// Advances the angle, renders once and requests the next frame.
    ///
    /// `fired` is the request the scheduler just delivered. Returns `None`
    /// without rendering while idle or when `fired` is not the outstanding
    /// request.
    pub fn tick<F: FnOnce(f32)>(
        &mut self,
        fired: FrameRequest,
        now_ms: f64,
        render: F,
    ) -> Option<FrameTick> {
        let LoopState::Running {
            previous_ms,
            pending,
        } = self.state
        else {
            return None;
        };
        if fired != pending {
            log::debug!("ignoring stale frame request {:?}", fired);
            return None;
        }

        let delta_time = ((now_ms - previous_ms) / 1000.0) as f32;
        self.angle += delta_time;
        render(self.angle);

        let pending = self.scheduler.request_next_frame();
        self.state = LoopState::Running {
            previous_ms: now_ms,
            pending,
        };

        Some(FrameTick {
            delta_time,
            angle: self.angle,
        })
    }

    /// Running → Idle, withdrawing the outstanding frame request.
    pub fn stop(&mut self) {
        if let LoopState::Running { pending, .. } = self.state {
            self.scheduler.cancel(pending);
            log::debug!("animation loop stopped at angle {}", self.angle);
        }
        self.state = LoopState::Idle;
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
