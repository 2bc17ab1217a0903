//! Run configuration schema.

use std::path::PathBuf;

use pd_core::units::constants::STANDARD_GRAVITY_MPS2;
use pd_sim::{IntegratorType, Pendulum, PendulumParameters, SimResult, TimeGrid};
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub version: u32,
    pub name: String,
    pub pendulum: PendulumDef,
    pub time: TimeDef,
    pub initial: InitialDef,
    #[serde(default)]
    pub output: OutputDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendulumDef {
    pub mass_kg: f64,
    pub length_m: f64,
    #[serde(default)]
    pub damping: f64,
    #[serde(default = "default_gravity")]
    pub gravity_mps2: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeDef {
    #[serde(default)]
    pub t0_s: f64,
    pub tf_s: f64,
    pub step: StepDef,
}

/// How the time grid is specified: by step size (N derived) or by step
/// count (h derived).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum StepDef {
    StepSize { h_s: f64 },
    StepCount { n: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitialDef {
    pub theta_rad: f64,
    #[serde(default)]
    pub theta_dot_rad_s: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputDef {
    #[serde(default = "default_methods")]
    pub methods: Vec<IntegratorType>,
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

fn default_gravity() -> f64 {
    STANDARD_GRAVITY_MPS2
}

fn default_methods() -> Vec<IntegratorType> {
    IntegratorType::ALL.to_vec()
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputDef {
    fn default() -> Self {
        Self {
            methods: default_methods(),
            directory: default_directory(),
        }
    }
}

impl OutputDef {
    /// CSV path for one method's trajectory, e.g. `<dir>/data_rk4.csv`.
    pub fn path_for(&self, method: IntegratorType) -> PathBuf {
        self.directory.join(format!("data_{}.csv", method.file_tag()))
    }
}

impl Default for RunConfig {
    /// Lightly damped 1 kg, 1 m pendulum released from 0.5 rad.
    fn default() -> Self {
        Self {
            version: LATEST_VERSION,
            name: "damped swing".to_string(),
            pendulum: PendulumDef {
                mass_kg: 1.0,
                length_m: 1.0,
                damping: 0.1,
                gravity_mps2: STANDARD_GRAVITY_MPS2,
            },
            time: TimeDef {
                t0_s: 0.0,
                tf_s: 10.0,
                step: StepDef::StepSize { h_s: 0.01 },
            },
            initial: InitialDef {
                theta_rad: 0.5,
                theta_dot_rad_s: 0.0,
            },
            output: OutputDef::default(),
        }
    }
}

impl RunConfig {
    pub fn pendulum_params(&self) -> PendulumParameters {
        PendulumParameters::damped(
            self.pendulum.mass_kg,
            self.pendulum.length_m,
            self.pendulum.damping,
        )
        .with_gravity(self.pendulum.gravity_mps2)
    }

    pub fn pendulum(&self) -> Pendulum {
        Pendulum::from_params(self.pendulum_params())
    }

    pub fn time_grid(&self) -> SimResult<TimeGrid> {
        let (t0, tf) = (self.time.t0_s, self.time.tf_s);
        match self.time.step {
            StepDef::StepSize { h_s } => TimeGrid::from_step_size(t0, tf, h_s),
            StepDef::StepCount { n } => TimeGrid::from_step_count(t0, tf, n),
        }
    }
}
