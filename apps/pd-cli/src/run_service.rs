//! Run execution: one CSV trajectory per selected integration method.

use std::path::PathBuf;

use pd_core::timing::Timer;
use pd_project::{OutputDef, RunConfig};
use pd_sim::{CsvSink, IntegratorType, RunSummary, SimProgress, Solver, State};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub config: &'a RunConfig,
    /// Methods to run (in order) and where their CSV files go
    pub output: OutputDef,
}

impl<'a> RunRequest<'a> {
    /// Request using the methods and directory named in the configuration.
    pub fn from_config(config: &'a RunConfig) -> Self {
        Self {
            config,
            output: config.output.clone(),
        }
    }
}

/// Result of one method's run.
#[derive(Debug, Clone)]
pub struct MethodOutcome {
    pub method: IntegratorType,
    pub path: PathBuf,
    pub summary: RunSummary,
    pub initial_energy_j: f64,
    pub final_energy_j: f64,
    /// Wall time of the integration, when timing is enabled
    pub integrate_time_s: Option<f64>,
}

impl MethodOutcome {
    pub fn energy_drift_j(&self) -> f64 {
        self.final_energy_j - self.initial_energy_j
    }
}

/// Integrate the configured pendulum once per requested method.
pub fn execute(
    request: &RunRequest<'_>,
    mut progress: Option<&mut dyn FnMut(IntegratorType, SimProgress)>,
) -> AppResult<Vec<MethodOutcome>> {
    let config = request.config;
    let params = config.pendulum_params();
    params.validate()?;
    let pendulum = config.pendulum();
    let solver = Solver::new(config.time_grid()?);

    let out_dir = &request.output.directory;
    std::fs::create_dir_all(out_dir).map_err(|source| AppError::OutputDir {
        path: out_dir.clone(),
        source,
    })?;

    let theta0 = config.initial.theta_rad;
    let theta_dot0 = config.initial.theta_dot_rad_s;
    let initial_energy_j = pendulum.energy(&State::from([theta0, theta_dot0]))?;

    let mut outcomes = Vec::with_capacity(request.output.methods.len());
    for &method in &request.output.methods {
        let path = request.output.path_for(method);
        info!(method = %method, path = %path.display(), "integrating");

        let mut sink = CsvSink::create(&path)?;
        let timer = Timer::start("integrate");
        let summary = match progress.as_deref_mut() {
            Some(cb) => {
                let mut forward = |p: SimProgress| cb(method, p);
                solver.run_with_progress(
                    &method,
                    &pendulum,
                    theta0,
                    theta_dot0,
                    &mut sink,
                    Some(&mut forward),
                )?
            }
            None => solver.run(&method, &pendulum, theta0, theta_dot0, &mut sink)?,
        };
        let integrate_time_s = timer.stop();

        let final_energy_j = pendulum.energy(&summary.final_state)?;
        outcomes.push(MethodOutcome {
            method,
            path,
            summary,
            initial_energy_j,
            final_energy_j,
            integrate_time_s,
        });
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pd_project::{StepDef, TimeDef};
    use std::path::Path;

    fn small_config(dir: &Path) -> RunConfig {
        let mut config = RunConfig::default();
        config.time = TimeDef {
            t0_s: 0.0,
            tf_s: 1.0,
            step: StepDef::StepCount { n: 50 },
        };
        config.output.directory = dir.to_path_buf();
        config
    }

    #[test]
    fn writes_one_csv_per_method() {
        let dir = std::env::temp_dir().join("pd_cli_run_service_both");
        let _ = std::fs::remove_dir_all(&dir);
        let config = small_config(&dir);
        let outcomes = execute(&RunRequest::from_config(&config), None).unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].method, IntegratorType::ForwardEuler);
        assert_eq!(outcomes[1].method, IntegratorType::RK4);
        for outcome in &outcomes {
            let text = std::fs::read_to_string(&outcome.path).unwrap();
            let mut lines = text.lines();
            assert_eq!(lines.next(), Some("t,theta,theta_dot,x,y"));
            assert_eq!(lines.count(), 50);
            assert_eq!(outcome.summary.steps, 50);
        }
        assert!(outcomes[0].path.ends_with("data_fe.csv"));
        assert!(outcomes[1].path.ends_with("data_rk4.csv"));

        // damped run loses energy under RK4
        assert!(outcomes[1].energy_drift_j() < 0.0);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn forwards_progress_per_method() {
        let dir = std::env::temp_dir().join("pd_cli_run_service_progress");
        let _ = std::fs::remove_dir_all(&dir);
        let config = small_config(&dir);
        let mut request = RunRequest::from_config(&config);
        request.output.methods = vec![IntegratorType::RK4];

        let mut seen = Vec::new();
        let mut cb = |m: IntegratorType, p: SimProgress| seen.push((m, p.step));
        execute(&request, Some(&mut cb)).unwrap();

        assert_eq!(seen.len(), 50);
        assert!(seen.iter().all(|(m, _)| *m == IntegratorType::RK4));
        assert_eq!(seen.last().unwrap().1, 50);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn rejects_invalid_pendulum() {
        let dir = std::env::temp_dir().join("pd_cli_run_service_invalid");
        let _ = std::fs::remove_dir_all(&dir);
        let mut config = small_config(&dir);
        config.pendulum.length_m = 0.0;
        let err = execute(&RunRequest::from_config(&config), None).unwrap_err();
        assert!(matches!(err, AppError::Simulation(_)));
    }
}
