//! # Steam reformer tube as an initial value problem
//!
//! The tube is integrated along the catalyst mass from `W = 0` to
//! `W_total = ρb·π·D²/4·l` with the inlet state (per-tube flows, T0, P0 and,
//! with flue-gas heating, Tα0) as initial condition.
//!
//! ## Workflow
//! 1. `SMRreactorIVP::new(config)`
//! 2. `check_task()` - configuration validation, fails naming the field
//! 3. `setup()` - builds the derivative function
//! 4. `solve()` - integrates and stores a [`ReactorProfile`]
//! 5. `pretty_print()` / `save_profile(path)`
//!
//! [`TubeSweep`] repeats the run with a growing number of tubes until a target
//! methane conversion is reached.
//!
//! ## Example
//! ```rust, ignore
//! let mut reactor = SMRreactorIVP::new(ReactorConfig::default());
//! let profile = reactor.solve()?;
//! println!("conversion {:.4}", profile.methane_conversion());
//! ```
use super::reactor_config::{IntegrationMethod, ReactorConfig, SolverSettings};
use super::reactor_error::ReactorError;
use super::reactor_ode::{ReactorDerivativeFunction, ReactorODE};
use super::reactor_state::{ReactorState, StateLayout};
use crate::Thermodynamics::species::Species;
use differential_equations::methods::{ExplicitRungeKutta, ImplicitRungeKutta};
use differential_equations::ode::ODEProblem;
use log::{debug, info, warn};
use nalgebra::SVector;
use prettytable::{Table, row};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// relative atom balance error above which a profile point is reported
const ATOM_BALANCE_THRESHOLD: f64 = 1e-8;

/// Elemental balance of a computed profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolutionQuality {
    /// points where the C, H or O flow deviates from the inlet by more than the threshold
    pub atomic_mass_balance_error: Vec<(usize, f64)>,
    /// largest relative deviation over the whole profile
    pub max_atomic_balance_error: f64,
}

/// Sampled solution of one tube
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactorProfile {
    pub layout: StateLayout,
    pub tubes: u32,
    /// catalyst mass, kg
    pub W: Vec<f64>,
    /// states in layout order, one per entry of `W`
    pub states: Vec<Vec<f64>>,
}

impl ReactorProfile {
    pub fn new(
        layout: StateLayout,
        tubes: u32,
        W: Vec<f64>,
        states: Vec<Vec<f64>>,
    ) -> Result<Self, ReactorError> {
        if W.is_empty() || W.len() != states.len() {
            return Err(ReactorError::IntegrationFailed(format!(
                "solver returned {} abscissas and {} states",
                W.len(),
                states.len()
            )));
        }
        for y in &states {
            layout.check_dim(y.len())?;
        }
        if layout.species.first() != Some(&Species::CH4) {
            return Err(ReactorError::invalid(
                "layout.species",
                "methane must be the first tracked species",
            ));
        }
        if !(states[0][0] > 0.0) {
            return Err(ReactorError::invalid(
                "inlet.CH4",
                format!("profile starts with methane flow {}", states[0][0]),
            ));
        }
        Ok(Self {
            layout,
            tubes,
            W,
            states,
        })
    }

    pub fn len(&self) -> usize {
        self.W.len()
    }

    pub fn is_empty(&self) -> bool {
        self.W.is_empty()
    }

    pub fn inlet(&self) -> &[f64] {
        &self.states[0]
    }

    pub fn outlet(&self) -> &[f64] {
        &self.states[self.states.len() - 1]
    }

    pub fn outlet_state(&self) -> Result<ReactorState, ReactorError> {
        ReactorState::from_slice(&self.layout, self.outlet())
    }

    /// one state variable along the tube
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.states.iter().map(|y| y[index]).collect()
    }

    pub fn species_flows(&self, species: Species) -> Option<Vec<f64>> {
        self.layout.index_of(species).map(|i| self.column(i))
    }

    /// column of a species fed with a positive inlet flow
    fn fed_index(&self, species: Species) -> Option<usize> {
        self.layout
            .index_of(species)
            .filter(|&i| self.inlet()[i] > 0.0)
    }

    /// `1 − F(W_end)/F(0)` of a tracked species, `None` if it is not fed
    pub fn conversion(&self, species: Species) -> Option<f64> {
        let i = self.fed_index(species)?;
        Some(1.0 - self.outlet()[i] / self.inlet()[i])
    }

    /// `1 − F(W)/F(0)` at every profile point
    pub fn conversion_profile(&self, species: Species) -> Option<Vec<f64>> {
        let i = self.fed_index(species)?;
        let F0 = self.inlet()[i];
        Some(self.states.iter().map(|y| 1.0 - y[i] / F0).collect())
    }

    /// methane is fed in every profile accepted by [`ReactorProfile::new`]
    pub fn methane_conversion(&self) -> f64 {
        1.0 - self.outlet()[0] / self.inlet()[0]
    }

    pub fn ethane_conversion(&self) -> Option<f64> {
        self.conversion(Species::C2H6)
    }

    /// `P(0) − P(W_end)`, kPa
    pub fn pressure_drop(&self) -> f64 {
        let i = self.layout.P_index();
        self.inlet()[i] - self.outlet()[i]
    }

    /// K
    pub fn outlet_temperature(&self) -> f64 {
        self.outlet()[self.layout.T_index()]
    }

    pub fn outlet_heating_temperature(&self) -> Option<f64> {
        self.layout.T_alpha_index().map(|i| self.outlet()[i])
    }

    pub fn catalyst_mass(&self) -> f64 {
        self.W[self.W.len() - 1]
    }

    /// outlet flows of all tubes together, mol/s
    pub fn outlet_totals(&self) -> Vec<(Species, f64)> {
        let tubes = self.tubes as f64;
        self.layout
            .species
            .iter()
            .zip(self.outlet())
            .map(|(s, F)| (*s, F * tubes))
            .collect()
    }

    fn atom_flows(&self, y: &[f64]) -> [f64; 3] {
        let mut atoms = [0.0; 3];
        for (s, F) in self.layout.species.iter().zip(y) {
            let count = s.atoms();
            atoms[0] += count.C as f64 * F;
            atoms[1] += count.H as f64 * F;
            atoms[2] += count.O as f64 * F;
        }
        atoms
    }

    /// C, H and O flows compared with the inlet at every point
    pub fn quality(&self) -> SolutionQuality {
        let inlet = self.atom_flows(self.inlet());
        let mut quality = SolutionQuality::default();
        for (k, y) in self.states.iter().enumerate() {
            let atoms = self.atom_flows(y);
            let error = atoms
                .iter()
                .zip(&inlet)
                .map(|(a, a0)| if *a0 > 0.0 { ((a - a0) / a0).abs() } else { a.abs() })
                .fold(0.0, f64::max);
            quality.max_atomic_balance_error = quality.max_atomic_balance_error.max(error);
            if error > ATOM_BALANCE_THRESHOLD {
                quality.atomic_mass_balance_error.push((k, error));
            }
        }
        quality
    }

    pub fn summary_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value"]);
        table.add_row(row!["tubes", self.tubes]);
        table.add_row(row!["catalyst mass per tube (kg)", format!("{:.3}", self.catalyst_mass())]);
        table.add_row(row!["CH4 conversion", format!("{:.4}", self.methane_conversion())]);
        if let Some(x) = self.ethane_conversion() {
            table.add_row(row!["C2H6 conversion", format!("{:.4}", x)]);
        }
        table.add_row(row!["pressure drop (kPa)", format!("{:.4}", self.pressure_drop())]);
        table.add_row(row!["outlet temperature (K)", format!("{:.2}", self.outlet_temperature())]);
        if let Some(T_alpha) = self.outlet_heating_temperature() {
            table.add_row(row!["outlet heating gas temperature (K)", format!("{:.2}", T_alpha)]);
        }
        table.add_row(row!["profile points", self.len()]);
        table
    }

    pub fn outlet_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Species", "inlet (mol/s)", "outlet (mol/s)"]);
        let tubes = self.tubes as f64;
        for ((s, F_out), F_in) in self.outlet_totals().iter().zip(self.inlet()) {
            table.add_row(row![s, format!("{:.3}", F_in * tubes), format!("{:.3}", F_out)]);
        }
        table
    }

    pub fn pretty_print(&self) {
        self.summary_table().printstd();
        self.outlet_table().printstd();
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), ReactorError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)?;
        info!("profile written to {}", path.as_ref().display());
        Ok(())
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ReactorError> {
        let content = fs::read_to_string(path)?;
        let raw: ReactorProfile = serde_json::from_str(&content)?;
        ReactorProfile::new(raw.layout, raw.tubes, raw.W, raw.states)
    }
}

/// one solver run with a fixed state dimension
fn integrate<const N: usize>(
    rhs: &ReactorDerivativeFunction,
    y0: &[f64],
    W_end: f64,
    settings: &SolverSettings,
) -> Result<(Vec<f64>, Vec<Vec<f64>>), ReactorError> {
    let ode = ReactorODE::<N>::new(rhs);
    let y0 = SVector::<f64, N>::from_column_slice(y0);
    let problem = ODEProblem::new(&ode, 0.0, W_end, y0);
    let (rtol, atol) = (settings.rtol, settings.atol);
    let solution = match settings.method {
        IntegrationMethod::Dopri5 => {
            let mut solver = ExplicitRungeKutta::dopri5().rtol(rtol).atol(atol);
            problem.solve(&mut solver)
        }
        IntegrationMethod::Radau5 => {
            let mut solver = ImplicitRungeKutta::radau5().rtol(rtol).atol(atol);
            problem.solve(&mut solver)
        }
        IntegrationMethod::RK4 { step } => {
            let mut solver = ExplicitRungeKutta::rk4(step);
            problem.solve(&mut solver)
        }
    };

    match solution {
        Ok(sol) => {
            if let Some((w, detail)) = ode.take_failure() {
                debug!("rejected trial step at W = {} kg: {}", w, detail);
            }
            let states: Vec<Vec<f64>> = sol.y.iter().map(|y| y.as_slice().to_vec()).collect();
            Ok((sol.t, states))
        }
        Err(e) => match ode.take_failure() {
            Some((w, detail)) => Err(ReactorError::NumericalDegeneracy { w, detail }),
            None => Err(ReactorError::IntegrationFailed(e.to_string())),
        },
    }
}

/// Integrates one tube described by `config`
pub fn simulate(config: &ReactorConfig) -> Result<ReactorProfile, ReactorError> {
    let mut reactor = SMRreactorIVP::new(config.clone());
    reactor.solve()?;
    reactor
        .profile
        .ok_or_else(|| ReactorError::IntegrationFailed("no profile produced".to_string()))
}

pub struct SMRreactorIVP {
    pub config: ReactorConfig,
    pub rhs: Option<ReactorDerivativeFunction>,
    pub profile: Option<ReactorProfile>,
    pub quality: SolutionQuality,
}

impl SMRreactorIVP {
    pub fn new(config: ReactorConfig) -> Self {
        Self {
            config,
            rhs: None,
            profile: None,
            quality: SolutionQuality::default(),
        }
    }

    pub fn check_task(&self) -> Result<(), ReactorError> {
        self.config.validate()
    }

    pub fn setup(&mut self) -> Result<(), ReactorError> {
        self.check_task()?;
        info!("task checked!");
        let rhs = ReactorDerivativeFunction::from_config(&self.config)?;
        info!(
            "derivative function created: {} variables {:?}",
            rhs.dim(),
            rhs.layout.variable_names()
        );
        self.rhs = Some(rhs);
        Ok(())
    }

    /// Integrates over the whole catalyst bed and stores the profile
    pub fn solve(&mut self) -> Result<&ReactorProfile, ReactorError> {
        if self.rhs.is_none() {
            self.setup()?;
        }
        let rhs = self
            .rhs
            .as_ref()
            .ok_or_else(|| ReactorError::MissingData("derivative function".to_string()))?;
        let y0 = ReactorState::inlet(&self.config).to_vec();
        let W_end = self.config.catalyst_mass()?;
        let settings = &self.config.solver;
        info!(
            "integrating {} tubes over {:.3} kg catalyst with {:?}",
            self.config.tubes, W_end, settings.method
        );

        let (W, states) = match rhs.dim() {
            7 => integrate::<7>(rhs, &y0, W_end, settings)?,
            8 => integrate::<8>(rhs, &y0, W_end, settings)?,
            9 => integrate::<9>(rhs, &y0, W_end, settings)?,
            other => {
                return Err(ReactorError::DimensionMismatch {
                    expected: 9,
                    found: other,
                });
            }
        };
        let profile = ReactorProfile::new(rhs.layout.clone(), self.config.tubes, W, states)?;

        let names = rhs.layout.variable_names();
        for (k, y) in profile.states.iter().enumerate() {
            if let Some(i) = y.iter().position(|v| !v.is_finite()) {
                return Err(ReactorError::NumericalDegeneracy {
                    w: profile.W[k],
                    detail: format!("{} = {}", names[i], y[i]),
                });
            }
        }

        self.quality = profile.quality();
        if !self.quality.atomic_mass_balance_error.is_empty() {
            warn!(
                "atom balance violated at {} points, max relative error {:e}",
                self.quality.atomic_mass_balance_error.len(),
                self.quality.max_atomic_balance_error
            );
        }
        info!(
            "solved in {} points: conversion {:.4}, pressure drop {:.3} kPa, outlet temperature {:.2} K",
            profile.len(),
            profile.methane_conversion(),
            profile.pressure_drop(),
            profile.outlet_temperature()
        );
        self.profile = Some(profile);
        self.profile
            .as_ref()
            .ok_or_else(|| ReactorError::MissingData("profile".to_string()))
    }

    pub fn pretty_print(&self) {
        if let Some(profile) = &self.profile {
            profile.pretty_print();
        }
    }

    pub fn save_profile<P: AsRef<Path>>(&self, path: P) -> Result<(), ReactorError> {
        match &self.profile {
            Some(profile) => profile.save_json(path),
            None => Err(ReactorError::MissingData(
                "no profile to save, call solve() first".to_string(),
            )),
        }
    }
}

/// Result of one tube count in a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub tubes: u32,
    /// `None` when the integration broke down for this tube count
    pub conversion: Option<f64>,
    pub pressure_drop: Option<f64>,
    pub outlet_temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub history: Vec<SweepPoint>,
    /// first tube count reaching the target
    pub reached: Option<SweepPoint>,
}

/// Increases the tube count from `start` in steps of `step` up to `max_tubes`
/// and stops at the first count whose methane conversion reaches `target`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TubeSweep {
    pub target: f64,
    pub start: u32,
    pub step: u32,
    pub max_tubes: u32,
}

impl TubeSweep {
    pub fn new(target: f64, start: u32, step: u32, max_tubes: u32) -> Self {
        Self {
            target,
            start,
            step,
            max_tubes,
        }
    }

    fn check(&self) -> Result<(), ReactorError> {
        if !(self.target > 0.0 && self.target < 1.0) {
            return Err(ReactorError::invalid(
                "sweep.target",
                format!("conversion target must lie in (0, 1), got {}", self.target),
            ));
        }
        if self.start == 0 {
            return Err(ReactorError::invalid("sweep.start", "at least one tube is required"));
        }
        if self.step == 0 {
            return Err(ReactorError::invalid("sweep.step", "step must be positive"));
        }
        if self.max_tubes < self.start {
            return Err(ReactorError::invalid(
                "sweep.max_tubes",
                format!("{} is below the starting count {}", self.max_tubes, self.start),
            ));
        }
        Ok(())
    }

    pub fn run(&self, config: &ReactorConfig) -> Result<SweepResult, ReactorError> {
        self.check()?;
        config.validate()?;
        let mut history = Vec::new();
        let mut tubes = self.start;
        while tubes <= self.max_tubes {
            let mut trial = config.clone();
            trial.tubes = tubes;
            let point = match simulate(&trial) {
                Ok(profile) => SweepPoint {
                    tubes,
                    conversion: Some(profile.methane_conversion()),
                    pressure_drop: Some(profile.pressure_drop()),
                    outlet_temperature: Some(profile.outlet_temperature()),
                },
                Err(e @ (ReactorError::NumericalDegeneracy { .. } | ReactorError::IntegrationFailed(_))) => {
                    warn!("{} tubes: {}", tubes, e);
                    SweepPoint {
                        tubes,
                        conversion: None,
                        pressure_drop: None,
                        outlet_temperature: None,
                    }
                }
                Err(e) => return Err(e),
            };
            history.push(point.clone());
            if point.conversion.is_some_and(|x| x >= self.target) {
                info!("target conversion {} reached with {} tubes", self.target, tubes);
                return Ok(SweepResult {
                    history,
                    reached: Some(point),
                });
            }
            tubes = match tubes.checked_add(self.step) {
                Some(next) => next,
                None => break,
            };
        }
        warn!(
            "target conversion {} not reached with up to {} tubes",
            self.target, self.max_tubes
        );
        Ok(SweepResult {
            history,
            reached: None,
        })
    }
}

impl SweepResult {
    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(row!["tubes", "CH4 conversion", "pressure drop (kPa)", "outlet T (K)"]);
        let fmt = |v: Option<f64>, digits: usize| match v {
            Some(x) => format!("{:.*}", digits, x),
            None => "failed".to_string(),
        };
        for point in &self.history {
            table.add_row(row![
                point.tubes,
                fmt(point.conversion, 4),
                fmt(point.pressure_drop, 3),
                fmt(point.outlet_temperature, 2)
            ]);
        }
        table.printstd();
    }
}
