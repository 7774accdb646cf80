use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::action_metrics::ActionMetrics;
use crate::pal::{Platform, PlatformFacade};
use crate::{ActionSpan, ERR_POISONED_LOCK, Error, Report, Result};

/// Mutable session state, shared between the session and the spans it hands
/// out.
#[derive(Debug)]
pub(crate) struct SessionState {
    /// Monotonic reading at which each currently running action was started.
    /// At most one entry per action name.
    pub(crate) active: HashMap<String, Duration>,

    /// Accumulated totals per action, created on the first completed stop.
    pub(crate) actions: HashMap<String, ActionMetrics>,

    /// Action names in the order their totals record was first created.
    /// Report tie-breaking uses this order, never map iteration order.
    pub(crate) completion_order: Vec<String>,

    /// Monotonic reading at construction or the last explicit reset.
    pub(crate) started_at: Duration,
}

impl SessionState {
    fn start_action(&mut self, name: String, now: Duration) -> Result<()> {
        if self.active.contains_key(&name) {
            return Err(Error::AlreadyStarted { action: name });
        }

        self.active.insert(name, now);
        Ok(())
    }

    pub(crate) fn stop_action(&mut self, name: &str, now: Duration) -> Result<Duration> {
        let Some(started) = self.active.remove(name) else {
            return Err(Error::NeverStarted {
                action: name.to_string(),
            });
        };

        // The clock is monotonic, so this saturation never loses real time.
        let elapsed = now.saturating_sub(started);

        match self.actions.entry(name.to_string()) {
            Entry::Vacant(entry) => {
                self.completion_order.push(entry.key().clone());
                entry.insert(ActionMetrics::default()).record(elapsed);
            }
            Entry::Occupied(mut entry) => entry.get_mut().record(elapsed),
        }

        Ok(elapsed)
    }
}

/// Attributes wall-clock time to named actions and reports each action's
/// share of total elapsed session time.
///
/// A session owns all timer and aggregate state for one profiling run: the
/// currently running timers, the accumulated totals per action and the
/// session start time that report percentages are computed against. Sessions
/// are independently constructible objects; create as many as the embedding
/// program needs.
///
/// # Examples
///
/// ```
/// use time_share::Session;
///
/// # fn main() -> Result<(), time_share::Error> {
/// let session = Session::new();
///
/// for _ in 0..3 {
///     let _span = session.measure("parse")?;
///     // Perform the work being measured.
///     let mut sum = 0;
///     for i in 0..1000 {
///         sum += i;
///     }
///     std::hint::black_box(sum);
/// }
///
/// // One formatted report ranking actions by share of elapsed time.
/// println!("{}", session.summary());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Session {
    state: Arc<Mutex<SessionState>>,
    platform: PlatformFacade,
}

impl Session {
    /// Creates a new wall-clock tracking session.
    ///
    /// The session start time is captured here; [`reset_start_time()`][1]
    /// moves it later without clearing any recorded totals.
    ///
    /// [1]: Self::reset_start_time
    #[expect(
        clippy::new_without_default,
        reason = "to avoid ambiguity with the notion of a 'default session' that is not actually a default session"
    )]
    #[must_use]
    pub fn new() -> Self {
        Self::from_platform(PlatformFacade::real())
    }

    /// Creates a new session with a specific platform.
    ///
    /// This method is primarily used for testing purposes to inject a fake
    /// clock that does not rely on the operating system.
    #[cfg(test)]
    pub(crate) fn with_platform(platform: PlatformFacade) -> Self {
        Self::from_platform(platform)
    }

    fn from_platform(platform: PlatformFacade) -> Self {
        let started_at = platform.monotonic_time();

        Self {
            state: Arc::new(Mutex::new(SessionState {
                active: HashMap::new(),
                actions: HashMap::new(),
                completion_order: Vec::new(),
                started_at,
            })),
            platform,
        }
    }

    /// Starts the timer for the named action.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyStarted`] if the action already has a running
    /// timer. Each name can be timed at most once at any instant.
    pub fn start(&self, name: impl Into<String>) -> Result<()> {
        let now = self.platform.monotonic_time();

        self.state
            .lock()
            .expect(ERR_POISONED_LOCK)
            .start_action(name.into(), now)
    }

    /// Stops the timer for the named action and returns the elapsed time.
    ///
    /// The elapsed time is added to the action's accumulated total and its
    /// completed-cycle count is incremented.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NeverStarted`] if the action has no running timer.
    pub fn stop(&self, name: &str) -> Result<Duration> {
        let now = self.platform.monotonic_time();

        self.state
            .lock()
            .expect(ERR_POISONED_LOCK)
            .stop_action(name, now)
    }

    /// Starts the named action and returns a span that stops it when dropped.
    ///
    /// The stop runs exactly once per span, on every exit path from the
    /// guarded region: normal completion, early return or a panic unwinding
    /// through it.
    ///
    /// # Examples
    ///
    /// ```
    /// use time_share::Session;
    ///
    /// # fn main() -> Result<(), time_share::Error> {
    /// let session = Session::new();
    ///
    /// {
    ///     let _span = session.measure("load training data")?;
    ///     // Load the training data here.
    /// } // The action stops here, however this block is exited.
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyStarted`] if the action already has a running
    /// timer.
    pub fn measure(&self, name: impl Into<String>) -> Result<ActionSpan> {
        let name = name.into();
        self.start(name.clone())?;

        Ok(ActionSpan::new(
            Arc::clone(&self.state),
            name,
            self.platform.clone(),
        ))
    }

    /// Times a single invocation of `f` under the given action name.
    ///
    /// The callable's return value is passed through unchanged. If `f`
    /// panics, the action is still stopped before the panic continues to
    /// propagate.
    ///
    /// # Examples
    ///
    /// ```
    /// use time_share::Session;
    ///
    /// # fn main() -> Result<(), time_share::Error> {
    /// let session = Session::new();
    ///
    /// let answer = session.measure_call("compute", || 6 * 7)?;
    /// assert_eq!(answer, 42);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyStarted`] if the action already has a running
    /// timer; `f` is not invoked in that case.
    pub fn measure_call<T, F>(&self, name: impl Into<String>, f: F) -> Result<T>
    where
        F: FnOnce() -> T,
    {
        let _span = self.measure(name)?;
        Ok(f())
    }

    /// Resets the session start time to now.
    ///
    /// Report percentages are computed against the time elapsed since the
    /// session start. Accumulated action totals are not cleared; there is no
    /// way to clear them short of constructing a new session.
    pub fn reset_start_time(&self) {
        let now = self.platform.monotonic_time();

        self.state.lock().expect(ERR_POISONED_LOCK).started_at = now;
    }

    /// Whether the named action has a currently running timer.
    #[must_use]
    pub fn is_active(&self, name: &str) -> bool {
        self.state
            .lock()
            .expect(ERR_POISONED_LOCK)
            .active
            .contains_key(name)
    }

    /// Whether there is any recorded activity in this session.
    ///
    /// Actions that are running but have not yet completed a cycle do not
    /// count as recorded activity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().expect(ERR_POISONED_LOCK).actions.is_empty()
    }

    /// Creates a point-in-time report from this session.
    ///
    /// The report contains a snapshot of all recorded totals plus the total
    /// session duration at the moment of the call. It holds no reference to
    /// the session and can be kept, printed and inspected while the session
    /// moves on.
    ///
    /// # Examples
    ///
    /// ```
    /// use time_share::Session;
    ///
    /// # fn main() -> Result<(), time_share::Error> {
    /// let session = Session::new();
    /// {
    ///     let _span = session.measure("work")?;
    /// }
    ///
    /// let report = session.to_report();
    /// for action in report.actions() {
    ///     println!("{} ran {} time(s)", action.name(), action.count());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn to_report(&self) -> Report {
        let now = self.platform.monotonic_time();
        let state = self.state.lock().expect(ERR_POISONED_LOCK);

        Report::from_session_state(&state, now)
    }

    /// Produces the formatted report text described on [`Report`].
    ///
    /// Never fails: an empty or partially populated session renders the
    /// header and `Total` row with no action rows.
    #[must_use]
    pub fn summary(&self) -> String {
        self.to_report().to_string()
    }

    /// Prints the report of all recorded actions to stdout.
    ///
    /// This is a convenience method equivalent to
    /// `self.to_report().print_to_stdout()`. Prints nothing at all if no
    /// cycles were recorded, which keeps probe runs of benchmark harnesses
    /// from emitting stray output.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        self.to_report().print_to_stdout();
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Delegate to Report's Display implementation for consistency.
        write!(f, "{}", self.to_report())
    }
}
