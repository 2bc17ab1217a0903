//! Simulation runner: drives an integrator over a time grid.

use pd_core::{CoreError, FixedVector, Real};
use tracing::{debug, warn};

use crate::error::SimResult;
use crate::grid::TimeGrid;
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::{DynamicalSystem, State};
use crate::record::{TrajectoryRecord, TrajectorySink};

/// Upper bound on progress callbacks per run.
const PROGRESS_UPDATES: usize = 100;

/// Progress snapshot handed to the optional callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimProgress {
    /// Steps completed so far (1..=steps)
    pub step: usize,
    pub steps: usize,
    /// Time stamp of the record just emitted
    pub t: Real,
    pub fraction_complete: f64,
}

/// Outcome of a completed run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub method: &'static str,
    /// Records emitted (always the grid's step count)
    pub steps: usize,
    /// Time stamp of the last record
    pub final_t: Real,
    /// State after the last step
    pub final_state: State,
}

/// Fixed-step solver owning the time grid.
#[derive(Clone, Copy, Debug)]
pub struct Solver {
    grid: TimeGrid,
}

impl Solver {
    pub fn new(grid: TimeGrid) -> Self {
        Self { grid }
    }

    pub fn from_step_size(t0: Real, tf: Real, h: Real) -> SimResult<Self> {
        Ok(Self::new(TimeGrid::from_step_size(t0, tf, h)?))
    }

    pub fn from_step_count(t0: Real, tf: Real, steps: usize) -> SimResult<Self> {
        Ok(Self::new(TimeGrid::from_step_count(t0, tf, steps)?))
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Integrate with Forward Euler from (θ0, θ̇0).
    pub fn forward_euler<S, K>(
        &self,
        system: &S,
        theta0: Real,
        theta_dot0: Real,
        sink: &mut K,
    ) -> SimResult<RunSummary>
    where
        S: DynamicalSystem + ?Sized,
        K: TrajectorySink + ?Sized,
    {
        self.run(&ForwardEuler, system, theta0, theta_dot0, sink)
    }

    /// Integrate with classical RK4 from (θ0, θ̇0).
    pub fn rk4<S, K>(
        &self,
        system: &S,
        theta0: Real,
        theta_dot0: Real,
        sink: &mut K,
    ) -> SimResult<RunSummary>
    where
        S: DynamicalSystem + ?Sized,
        K: TrajectorySink + ?Sized,
    {
        self.run(&RK4, system, theta0, theta_dot0, sink)
    }

    /// Integrate from (θ0, θ̇0) with any integrator.
    pub fn run<I, S, K>(
        &self,
        integrator: &I,
        system: &S,
        theta0: Real,
        theta_dot0: Real,
        sink: &mut K,
    ) -> SimResult<RunSummary>
    where
        I: Integrator,
        S: DynamicalSystem + ?Sized,
        K: TrajectorySink + ?Sized,
    {
        self.run_with_progress(integrator, system, theta0, theta_dot0, sink, None)
    }

    /// Like [`Solver::run`], reporting progress at most 100 times per run.
    pub fn run_with_progress<I, S, K>(
        &self,
        integrator: &I,
        system: &S,
        theta0: Real,
        theta_dot0: Real,
        sink: &mut K,
        progress: Option<&mut dyn FnMut(SimProgress)>,
    ) -> SimResult<RunSummary>
    where
        I: Integrator,
        S: DynamicalSystem + ?Sized,
        K: TrajectorySink + ?Sized,
    {
        let initial = FixedVector::from([theta0, theta_dot0]);
        if system.dimension() != initial.len() {
            return Err(CoreError::LengthMismatch {
                left: initial.len(),
                right: system.dimension(),
            }
            .into());
        }

        debug!(
            method = integrator.name(),
            steps = self.grid.steps(),
            h = self.grid.h(),
            theta0,
            theta_dot0,
            "starting integration"
        );

        let result = self.integrate(integrator, system, initial, sink, progress);

        // The sink is flushed on every exit path; an integration error wins
        // over a flush error.
        let finished = sink.finish();
        let summary = match (result, finished) {
            (Ok(summary), Ok(())) => summary,
            (Ok(_), Err(e)) => return Err(e),
            (Err(e), Ok(())) => return Err(e),
            (Err(e), Err(flush_err)) => {
                warn!(error = %flush_err, "failed to flush sink after aborted run");
                return Err(e);
            }
        };

        debug!(
            method = summary.method,
            steps = summary.steps,
            final_t = summary.final_t,
            final_state = %summary.final_state,
            "integration finished"
        );
        Ok(summary)
    }

    fn integrate<I, S, K>(
        &self,
        integrator: &I,
        system: &S,
        initial: State,
        sink: &mut K,
        mut progress: Option<&mut dyn FnMut(SimProgress)>,
    ) -> SimResult<RunSummary>
    where
        I: Integrator,
        S: DynamicalSystem + ?Sized,
        K: TrajectorySink + ?Sized,
    {
        let steps = self.grid.steps();
        let h = self.grid.h();
        let report_every = steps.div_ceil(PROGRESS_UPDATES).max(1);

        let mut state = initial;
        let mut t = 0.0;
        for i in 0..steps {
            let new_state = integrator.step(system, &state, h)?;
            let position = system.convert_to_xy(&new_state)?;
            t = self.grid.time_at(i);
            sink.write_record(&TrajectoryRecord::new(t, &new_state, position)?)?;
            state = new_state;

            let done = i + 1;
            if let Some(cb) = progress.as_deref_mut()
                && (done % report_every == 0 || done == steps)
            {
                cb(SimProgress {
                    step: done,
                    steps,
                    t,
                    fraction_complete: done as f64 / steps as f64,
                });
            }
        }

        Ok(RunSummary {
            method: integrator.name(),
            steps,
            final_t: t,
            final_state: state,
        })
    }
}
