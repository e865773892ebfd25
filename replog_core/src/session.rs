//! Interactive session orchestration.
//!
//! A [`SessionController`] walks one logging session: show the last
//! recorded workout, collect entries (free-form or plan-driven), derive
//! the one-rep-max for each, optionally run the rest timer between
//! exercises, then persist the session as a single record.
//!
//! The controller is generic over its reader and writer so tests can
//! drive it with in-memory buffers.

use crate::metrics::estimate_one_rep_max;
use crate::plan::ExerciseGroup;
use crate::store::EntryStore;
use crate::timer::{InterruptSource, RestTimer};
use crate::{Error, Result, SessionRecord, WorkoutEntry};
use std::io::{BufRead, Write};

/// Rest timer plus the interrupt strategy chosen at startup.
pub struct RestBehavior {
    pub timer: RestTimer,
    pub interrupt: Box<dyn InterruptSource>,
}

/// Lifecycle of a logging session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SessionState {
    Idle,
    CollectingEntries,
    Persisting,
}

/// Orchestrates one interactive logging session.
pub struct SessionController<R: BufRead, W: Write> {
    input: R,
    output: W,
    rest: Option<RestBehavior>,
    state: SessionState,
}

impl<R: BufRead, W: Write> SessionController<R, W> {
    pub fn new(input: R, output: W, rest: Option<RestBehavior>) -> Self {
        Self {
            input,
            output,
            rest,
            state: SessionState::Idle,
        }
    }

    fn transition(&mut self, next: SessionState) {
        tracing::debug!("Session state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Free-form session: prompt for exercise names until "done".
    ///
    /// Returns the persisted record, or `None` when nothing was logged
    /// (in which case nothing is written to the store).
    pub fn run_free_form(&mut self, store: &mut EntryStore) -> Result<Option<SessionRecord>> {
        self.show_last_workout(store)?;
        self.transition(SessionState::CollectingEntries);

        loop {
            write!(self.output, "\nExercise (or 'done'): ")?;
            self.output.flush()?;
            let name = match self.read_line()? {
                Some(line) => line,
                None => break,
            };
            if name.is_empty() || name.eq_ignore_ascii_case("done") {
                break;
            }

            let entry = self.collect_entry(&name)?;
            store.append(entry);
            self.maybe_rest()?;
        }

        self.finish(store)
    }

    /// Plan-driven session: walk the active exercises of each group.
    pub fn run_plan(
        &mut self,
        store: &mut EntryStore,
        plan: &[ExerciseGroup],
    ) -> Result<Option<SessionRecord>> {
        self.show_last_workout(store)?;

        writeln!(self.output, "\nToday's Active Exercises:")?;
        for group in plan {
            writeln!(self.output, "\n[{}]", group.name)?;
            for exercise in group.active_exercises() {
                writeln!(self.output, "  - {}", exercise)?;
            }
        }

        self.transition(SessionState::CollectingEntries);

        for group in plan {
            writeln!(self.output, "\n--- {} ---", group.name.to_uppercase())?;
            let exercises: Vec<String> =
                group.active_exercises().map(String::from).collect();
            for exercise in exercises {
                writeln!(self.output, "\nExercise: {}", exercise)?;
                let entry = self.collect_entry(&exercise)?;
                store.append(entry);
                self.maybe_rest()?;
            }
        }

        self.finish(store)
    }

    fn show_last_workout(&mut self, store: &EntryStore) -> Result<()> {
        let history = store.load()?;
        match history.last() {
            Some(record) => {
                writeln!(self.output, "=== LAST RECORDED WORKOUT ===")?;
                writeln!(self.output, "{}", record.render_summary())?;
            }
            None => writeln!(self.output, "No previous workout found.")?,
        }
        Ok(())
    }

    fn collect_entry(&mut self, exercise: &str) -> Result<WorkoutEntry> {
        let sets = self.prompt_optional_u32("  Sets (blank to skip): ")?;
        let reps = self.prompt_u32("  Reps: ")?;
        let weight = self.prompt_f64("  Weight (lbs): ")?;
        let calories = self.prompt_optional_u32("  Calories (blank to skip): ")?;

        let one_rep_max = estimate_one_rep_max(weight, reps);
        writeln!(self.output, "  Estimated 1RM: {}", one_rep_max)?;

        Ok(WorkoutEntry {
            exercise: exercise.into(),
            sets,
            reps,
            weight,
            calories,
            one_rep_max: Some(one_rep_max),
        })
    }

    fn maybe_rest(&mut self) -> Result<()> {
        if self.rest.is_none() {
            return Ok(());
        }

        write!(self.output, "  Start rest timer? (y/n): ")?;
        self.output.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        if answer.eq_ignore_ascii_case("y") {
            if let Some(rest) = self.rest.as_mut() {
                rest.timer.run(rest.interrupt.as_mut(), &mut self.output)?;
            }
        } else {
            writeln!(self.output, "  Skipping rest timer...")?;
        }
        Ok(())
    }

    fn finish(&mut self, store: &mut EntryStore) -> Result<Option<SessionRecord>> {
        if store.is_empty() {
            writeln!(self.output, "\nNo exercises recorded.")?;
            self.transition(SessionState::Idle);
            return Ok(None);
        }

        self.transition(SessionState::Persisting);
        let record = store.persist_session()?;
        writeln!(self.output, "\nWorkout saved!")?;
        self.transition(SessionState::Idle);
        Ok(Some(record))
    }

    /// Read one trimmed line, `None` on EOF.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let n = self.input.read_line(&mut line)?;
        if n == 0 {
            Ok(None)
        } else {
            Ok(Some(line.trim().to_string()))
        }
    }

    /// Prompt for a required integer, re-prompting on malformed input.
    fn prompt_u32(&mut self, label: &str) -> Result<u32> {
        loop {
            write!(self.output, "{}", label)?;
            self.output.flush()?;
            let line = self
                .read_line()?
                .ok_or_else(|| Error::Input("unexpected end of input".into()))?;
            match line.parse::<u32>() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "  Invalid number, try again.")?,
            }
        }
    }

    /// Prompt for a required weight, re-prompting on malformed input.
    fn prompt_f64(&mut self, label: &str) -> Result<f64> {
        loop {
            write!(self.output, "{}", label)?;
            self.output.flush()?;
            let line = self
                .read_line()?
                .ok_or_else(|| Error::Input("unexpected end of input".into()))?;
            match line.parse::<f64>() {
                Ok(value) if value >= 0.0 => return Ok(value),
                _ => writeln!(self.output, "  Invalid number, try again.")?,
            }
        }
    }

    /// Prompt for an optional integer; blank input means "not recorded".
    fn prompt_optional_u32(&mut self, label: &str) -> Result<Option<u32>> {
        loop {
            write!(self.output, "{}", label)?;
            self.output.flush()?;
            let line = self
                .read_line()?
                .ok_or_else(|| Error::Input("unexpected end of input".into()))?;
            if line.is_empty() {
                return Ok(None);
            }
            match line.parse::<u32>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "  Invalid number, try again.")?,
            }
        }
    }
}
