//! Point-in-time session reports.

use std::fmt;
use std::time::Duration;

use crate::session::SessionState;

/// Snapshot of a session's recorded activity.
///
/// A `Report` captures the per-action totals and the total elapsed session
/// duration at the moment [`Session::to_report()`](crate::Session::to_report)
/// was called. It holds no reference to the session, so it can be kept,
/// printed and inspected while the session keeps recording.
///
/// The [`Display`](fmt::Display) implementation renders the formatted table
/// that [`Session::summary()`](crate::Session::summary) returns: a header, a
/// synthetic `Total` row and one row per action, ranked by each action's
/// share of the total session duration.
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
/// for action in report.ranked() {
///     println!(
///         "{}: {:?} over {} call(s)",
///         action.name(),
///         action.total_duration(),
///         action.count()
///     );
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Report {
    /// Rows in completion order (the action whose first cycle completed
    /// earliest comes first). Rendering sorts a copy of this sequence and
    /// relies on its order for tie-breaking.
    actions: Vec<ReportAction>,

    total_duration: Duration,
}

/// Recorded totals for a single action in a report.
#[derive(Clone, Debug)]
pub struct ReportAction {
    name: String,
    total_duration: Duration,
    count: u64,
}

impl Report {
    /// Creates a report from a snapshot of session state.
    #[must_use]
    pub(crate) fn from_session_state(state: &SessionState, now: Duration) -> Self {
        let actions = state
            .completion_order
            .iter()
            .map(|name| {
                let metrics = state
                    .actions
                    .get(name)
                    .expect("completion order only contains names with a metrics record");

                ReportAction {
                    name: name.clone(),
                    total_duration: metrics.total_duration,
                    count: metrics.count,
                }
            })
            .collect();

        Self {
            actions,
            total_duration: now.saturating_sub(state.started_at),
        }
    }

    /// Whether there is any recorded activity in this report.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Total elapsed session time at the moment the report was taken.
    ///
    /// This is the time since session construction or the last
    /// [`reset_start_time()`](crate::Session::reset_start_time), not the sum
    /// of the action totals. Unmeasured stretches of the run make the two
    /// differ.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.total_duration
    }

    /// Returns an iterator over the recorded actions in completion order:
    /// the action whose first cycle completed earliest comes first.
    pub fn actions(&self) -> impl Iterator<Item = &ReportAction> {
        self.actions.iter()
    }

    /// Returns the recorded actions in report order: descending share of
    /// total session time, with equal shares kept in completion order.
    ///
    /// Every share has the same denominator, so sorting the duration totals
    /// yields the percentage ranking without comparing floats. The sort is
    /// stable and its input is in completion order, which is what makes the
    /// tie-break deterministic.
    #[must_use]
    pub fn ranked(&self) -> Vec<&ReportAction> {
        let mut ranked: Vec<&ReportAction> = self.actions.iter().collect();
        ranked.sort_by(|a, b| b.total_duration.cmp(&a.total_duration));
        ranked
    }

    /// The percentage of total session time spent in the given action.
    ///
    /// A report whose total duration is zero (taken at the very instant the
    /// session clock started) reports every share as zero rather than
    /// dividing by zero.
    #[must_use]
    pub fn percent_of_total(&self, action: &ReportAction) -> f64 {
        if self.total_duration.is_zero() {
            return 0.0;
        }

        100.0 * action.total_duration.as_secs_f64() / self.total_duration.as_secs_f64()
    }

    /// Prints the report to stdout.
    ///
    /// Prints nothing at all if no cycles were recorded, not even an empty
    /// line, which keeps probe runs of benchmark harnesses from emitting
    /// stray output.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self) {
        if self.is_empty() {
            return;
        }

        println!("{self}");
    }
}

impl ReportAction {
    /// Name of the action.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total recorded time across all completed cycles of this action.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.total_duration
    }

    /// Number of completed start/stop cycles recorded for this action.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean duration per completed cycle.
    #[must_use]
    pub fn mean(&self) -> Duration {
        if self.count == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(
                self.total_duration
                    .as_nanos()
                    .checked_div(u128::from(self.count))
                    .expect("guarded by if condition")
                    .try_into()
                    .expect("all realistic values fit in u64"),
            )
        }
    }
}

fn format_row(
    name_width: usize,
    action: &str,
    mean: &str,
    num_calls: &str,
    total: &str,
    percentage: &str,
) -> String {
    format!(
        "{action:<name_width$}\t|  {mean:<15}\t|  {num_calls:<15}\t|  {total:<15}\t|  {percentage:<15}\t|"
    )
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Profiler Report")?;

        // Width over recorded names only; the label keeps the column wide
        // enough when nothing has been recorded yet.
        let name_width = self
            .actions
            .iter()
            .map(|action| action.name.len())
            .max()
            .unwrap_or(0)
            .max("Action".len());

        let header = format_row(
            name_width,
            "Action",
            "Mean duration (s)",
            "Num calls",
            "Total time (s)",
            "Percentage %",
        );
        let separator = "-".repeat(header.len());

        writeln!(f, "{header}")?;
        writeln!(f, "{separator}")?;
        writeln!(
            f,
            "{}",
            format_row(
                name_width,
                "Total",
                "-",
                "-",
                &format!("{:.5}", self.total_duration.as_secs_f64()),
                "100 %",
            )
        )?;
        writeln!(f, "{separator}")?;

        for action in self.ranked() {
            writeln!(
                f,
                "{}",
                format_row(
                    name_width,
                    &action.name,
                    &format!("{:.5}", action.mean().as_secs_f64()),
                    &action.count.to_string(),
                    &format!("{:.5}", action.total_duration.as_secs_f64()),
                    &format!("{:.3} %", self.percent_of_total(action)),
                )
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Session;
    use crate::pal::{FakePlatform, PlatformFacade};

    fn create_test_session() -> (Session, FakePlatform) {
        let platform = FakePlatform::new();
        let session = Session::with_platform(PlatformFacade::fake(platform.clone()));
        (session, platform)
    }

    fn complete_cycle(session: &Session, platform: &FakePlatform, name: &str, elapsed: Duration) {
        session.start(name).unwrap();
        platform.advance(elapsed);
        session.stop(name).unwrap();
    }

    #[test]
    fn report_from_empty_session_is_empty() {
        let (session, _platform) = create_test_session();

        let report = session.to_report();
        assert!(report.is_empty());
    }

    #[test]
    fn empty_report_renders_header_and_total_only() {
        let (session, platform) = create_test_session();
        platform.advance(Duration::from_millis(500));

        let rendered = session.to_report().to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        // Title, header, separator, Total row, separator. No action rows.
        assert_eq!(lines.len(), 5);
        assert_eq!(lines.first().unwrap(), &"Profiler Report");
        assert!(lines.get(1).unwrap().starts_with("Action"));
        assert!(lines.get(3).unwrap().starts_with("Total"));
        assert!(lines.get(3).unwrap().contains("100 %"));
    }

    #[test]
    fn rows_appear_in_completion_order() {
        let (session, platform) = create_test_session();

        complete_cycle(&session, &platform, "second", Duration::from_millis(10));
        complete_cycle(&session, &platform, "first", Duration::from_millis(20));

        // "second" completed its first cycle before "first" did.
        let report = session.to_report();
        let names: Vec<&str> = report.actions().map(ReportAction::name).collect();
        assert_eq!(names, vec!["second", "first"]);
    }

    #[test]
    fn completion_order_is_fixed_by_first_cycle() {
        let (session, platform) = create_test_session();

        complete_cycle(&session, &platform, "a", Duration::from_millis(10));
        complete_cycle(&session, &platform, "b", Duration::from_millis(10));
        complete_cycle(&session, &platform, "a", Duration::from_millis(10));

        // The later "a" cycle does not move "a" behind "b".
        let report = session.to_report();
        let names: Vec<&str> = report.actions().map(ReportAction::name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn ranked_sorts_by_share_descending() {
        let (session, platform) = create_test_session();

        complete_cycle(&session, &platform, "small", Duration::from_millis(10));
        complete_cycle(&session, &platform, "large", Duration::from_millis(300));
        complete_cycle(&session, &platform, "medium", Duration::from_millis(100));

        let report = session.to_report();
        let names: Vec<&str> = report.ranked().into_iter().map(ReportAction::name).collect();
        assert_eq!(names, vec!["large", "medium", "small"]);
    }

    #[test]
    fn ranked_breaks_ties_by_completion_order() {
        let (session, platform) = create_test_session();

        complete_cycle(&session, &platform, "omega", Duration::from_millis(50));
        complete_cycle(&session, &platform, "alpha", Duration::from_millis(50));
        complete_cycle(&session, &platform, "heavy", Duration::from_millis(200));

        // Equal totals rank in completion order, not name order.
        let report = session.to_report();
        let names: Vec<&str> = report.ranked().into_iter().map(ReportAction::name).collect();
        assert_eq!(names, vec!["heavy", "omega", "alpha"]);
    }

    #[test]
    fn percent_of_total_computes_share() {
        let (session, platform) = create_test_session();

        complete_cycle(&session, &platform, "quarter", Duration::from_millis(100));
        platform.advance(Duration::from_millis(300));

        let report = session.to_report();
        assert_eq!(report.total_duration(), Duration::from_millis(400));

        let action = report.actions().next().unwrap();
        assert!((report.percent_of_total(action) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn sole_action_spanning_whole_session_is_everything() {
        let (session, platform) = create_test_session();

        complete_cycle(&session, &platform, "load", Duration::from_millis(100));
        complete_cycle(&session, &platform, "load", Duration::from_millis(200));

        let report = session.to_report();
        let action = report.actions().next().unwrap();

        assert_eq!(action.count(), 2);
        assert_eq!(action.total_duration(), Duration::from_millis(300));
        assert_eq!(report.total_duration(), Duration::from_millis(300));
        assert!((report.percent_of_total(action) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_total_duration_reports_zero_shares() {
        let (session, _platform) = create_test_session();

        // A cycle completes without the clock moving, and the report is taken
        // at the very instant the session clock started.
        session.start("instant").unwrap();
        session.stop("instant").unwrap();

        let report = session.to_report();
        assert_eq!(report.total_duration(), Duration::ZERO);

        let action = report.actions().next().unwrap();
        assert!(report.percent_of_total(action).abs() < 1e-9);

        // Rendering performs no division either.
        let rendered = report.to_string();
        assert!(rendered.contains("instant"));
        assert!(rendered.contains("0.000 %"));
    }

    #[test]
    fn mean_is_total_over_count() {
        let (session, platform) = create_test_session();

        complete_cycle(&session, &platform, "load", Duration::from_millis(100));
        complete_cycle(&session, &platform, "load", Duration::from_millis(200));

        let report = session.to_report();
        let action = report.actions().next().unwrap();
        assert_eq!(action.mean(), Duration::from_millis(150));
    }

    #[test]
    fn rendering_ranks_higher_shares_first() {
        let (session, platform) = create_test_session();

        complete_cycle(&session, &platform, "fast", Duration::from_millis(10));
        complete_cycle(&session, &platform, "slow", Duration::from_millis(500));

        let rendered = session.summary();
        let slow_at = rendered.find("slow").unwrap();
        let fast_at = rendered.find("fast").unwrap();
        assert!(slow_at < fast_at);
    }

    #[test]
    fn action_column_is_padded_to_longest_name() {
        let (session, platform) = create_test_session();

        complete_cycle(&session, &platform, "x", Duration::from_millis(10));
        complete_cycle(
            &session,
            &platform,
            "a_rather_long_action_name",
            Duration::from_millis(10),
        );

        let rendered = session.summary();
        let short_row = rendered
            .lines()
            .find(|line| line.starts_with('x'))
            .unwrap();

        // The short name is padded out to the longest name's width before
        // its first column separator.
        assert_eq!(
            short_row.find('\t').unwrap(),
            "a_rather_long_action_name".len()
        );
    }

    #[test]
    fn report_is_a_snapshot() {
        let (session, platform) = create_test_session();

        complete_cycle(&session, &platform, "work", Duration::from_millis(50));
        let report = session.to_report();

        // Activity after the snapshot does not appear in it.
        complete_cycle(&session, &platform, "work", Duration::from_millis(50));
        complete_cycle(&session, &platform, "other", Duration::from_millis(50));

        assert_eq!(report.actions().count(), 1);
        let action = report.actions().next().unwrap();
        assert_eq!(action.count(), 1);
        assert_eq!(action.total_duration(), Duration::from_millis(50));
    }

    // Reports can be handed to other threads for printing.
    static_assertions::assert_impl_all!(Report: Send, Sync);
    static_assertions::assert_impl_all!(ReportAction: Send, Sync);
}
