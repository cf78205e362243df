//! # Reactor configuration
//!
//! Everything that is fixed for one integration run: inlet flows, tube and bed
//! geometry, catalyst densities, heat transfer, optional flue-gas heating and
//! the kinetic constant table. The structure is `serde` (de)serializable and
//! every section falls back to the defaults of the reference reformer, so a
//! JSON file only needs the values that differ:
//!
//! ```json
//! {
//!   "tubes": 160,
//!   "T0": 850.0,
//!   "capabilities": { "has_ethane": true, "has_flue_gas": true }
//! }
//! ```
//!
//! [`ReactorConfig::validate`] rejects physically meaningless input before any
//! integration is attempted and names the offending field.
use super::reactor_error::ReactorError;
use crate::Kinetics::rate_constants::SMRconstants;
use crate::Thermodynamics::species::Species;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// relative tolerance of the check ρb = (1 − φ)·ρc
const DENSITY_CONSISTENCY_TOL: f64 = 1e-6;

/// Total inlet molar flows of all tubes together, mol/s
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InletFlows {
    pub CH4: f64,
    pub H2O: f64,
    pub H2: f64,
    pub CO: f64,
    pub CO2: f64,
    pub C2H6: f64,
}

impl Default for InletFlows {
    fn default() -> Self {
        Self {
            CH4: 106.0,
            H2O: 383.0,
            H2: 6.57,
            CO: 0.001,
            CO2: 2.988,
            C2H6: 10.0,
        }
    }
}

impl InletFlows {
    pub fn get(&self, species: Species) -> f64 {
        match species {
            Species::CH4 => self.CH4,
            Species::H2O => self.H2O,
            Species::H2 => self.H2,
            Species::CO => self.CO,
            Species::CO2 => self.CO2,
            Species::C2H6 => self.C2H6,
            Species::N2 | Species::O2 => 0.0,
        }
    }
}

/// Total flue-gas flows of the furnace, mol/s
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlueGas {
    pub N2: f64,
    pub CO2: f64,
    pub H2O: f64,
    pub O2: f64,
}

impl Default for FlueGas {
    fn default() -> Self {
        Self {
            N2: 738.5,
            CO2: 137.15,
            H2O: 137.15,
            O2: 42.2,
        }
    }
}

impl FlueGas {
    pub fn get(&self, species: Species) -> f64 {
        match species {
            Species::N2 => self.N2,
            Species::CO2 => self.CO2,
            Species::H2O => self.H2O,
            Species::O2 => self.O2,
            _ => 0.0,
        }
    }

    pub fn total(&self) -> f64 {
        Species::FLUE.iter().map(|s| self.get(*s)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    /// tube diameter, m
    pub D: f64,
    /// tube length, m
    pub l: f64,
    /// bed voidage φ
    pub voidage: f64,
    /// catalyst particle diameter, m
    pub Dp: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            D: 0.11,
            l: 15.0,
            voidage: 0.44,
            Dp: 0.013,
        }
    }
}

impl Geometry {
    /// cross-section of one tube, m²
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.D.powi(2) / 4.0
    }
}

/// Which optional parts of the model are switched on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// track C2H6 and the ethane reforming reaction
    pub has_ethane: bool,
    /// integrate the heating-gas temperature instead of holding it constant
    pub has_flue_gas: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum IntegrationMethod {
    /// adaptive explicit Dormand-Prince 5(4)
    #[default]
    Dopri5,
    /// adaptive implicit Radau IIA, for stiff cases
    Radau5,
    /// fixed-step classical Runge-Kutta with the given step, kg
    RK4 { step: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub method: IntegrationMethod,
    pub rtol: f64,
    pub atol: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            method: IntegrationMethod::Dopri5,
            rtol: 1e-6,
            atol: 1e-8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactorConfig {
    pub problem_name: Option<String>,
    pub inlet: InletFlows,
    pub geometry: Geometry,
    /// ρb, kg/m³
    pub catalyst_bulk_density: Option<f64>,
    /// ρc, kg/m³
    pub catalyst_particle_density: Option<f64>,
    /// gas density used by the Ergun term, kg/m³
    pub gas_density: f64,
    /// gas viscosity, Pa·s
    pub viscosity: f64,
    /// overall heat transfer coefficient, W/(m²·K)
    pub U: f64,
    /// inlet temperature, K
    pub T0: f64,
    /// heating gas temperature (inlet value when the flue gas is integrated), K
    pub T_alpha: f64,
    /// inlet pressure, kPa
    pub P0: f64,
    /// number of parallel tubes sharing the inlet and flue flows
    pub tubes: u32,
    pub flue: FlueGas,
    pub capabilities: Capabilities,
    pub kinetics: SMRconstants,
    pub solver: SolverSettings,
}

impl Default for ReactorConfig {
    fn default() -> Self {
        Self {
            problem_name: None,
            inlet: InletFlows::default(),
            geometry: Geometry::default(),
            catalyst_bulk_density: Some(870.0),
            catalyst_particle_density: None,
            gas_density: 6.38,
            viscosity: 2e-5,
            U: 40.0,
            T0: 823.15,
            T_alpha: 2000.0,
            P0: 2350.0,
            tubes: 200,
            flue: FlueGas::default(),
            capabilities: Capabilities::default(),
            kinetics: SMRconstants::default(),
            solver: SolverSettings::default(),
        }
    }
}

fn positive(field: &str, value: f64) -> Result<(), ReactorError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ReactorError::invalid(field, format!("must be positive, got {}", value)))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ReactorError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ReactorError::invalid(field, format!("must be non-negative, got {}", value)))
    }
}

impl ReactorConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ReactorError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: ReactorConfig = serde_json::from_str(&content)?;
        info!("reactor configuration loaded from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ReactorError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// process species tracked in the state vector, in state order
    pub fn tracked_species(&self) -> Vec<Species> {
        let mut species = Species::PROCESS.to_vec();
        if self.capabilities.has_ethane {
            species.push(Species::C2H6);
        }
        species
    }

    /// (ρb, ρc), completing the missing one from ρb = (1 − φ)·ρc
    pub fn catalyst_densities(&self) -> Result<(f64, f64), ReactorError> {
        let phi = self.geometry.voidage;
        match (self.catalyst_bulk_density, self.catalyst_particle_density) {
            (Some(rho_b), Some(rho_c)) => {
                positive("catalyst_bulk_density", rho_b)?;
                positive("catalyst_particle_density", rho_c)?;
                let expected = (1.0 - phi) * rho_c;
                if (rho_b - expected).abs() > DENSITY_CONSISTENCY_TOL * rho_b {
                    return Err(ReactorError::invalid(
                        "catalyst_bulk_density",
                        format!(
                            "{} kg/m³ is inconsistent with (1 - voidage)·particle density = {} kg/m³",
                            rho_b, expected
                        ),
                    ));
                }
                Ok((rho_b, rho_c))
            }
            (Some(rho_b), None) => {
                positive("catalyst_bulk_density", rho_b)?;
                Ok((rho_b, rho_b / (1.0 - phi)))
            }
            (None, Some(rho_c)) => {
                positive("catalyst_particle_density", rho_c)?;
                Ok(((1.0 - phi) * rho_c, rho_c))
            }
            (None, None) => Err(ReactorError::MissingData(
                "either catalyst_bulk_density or catalyst_particle_density must be given".to_string(),
            )),
        }
    }

    /// catalyst mass of one tube, kg
    pub fn catalyst_mass(&self) -> Result<f64, ReactorError> {
        let (rho_b, _) = self.catalyst_densities()?;
        Ok(rho_b * self.geometry.area() * self.geometry.l)
    }

    /// inlet flows of one tube for the tracked species, mol/s
    pub fn inlet_flows_per_tube(&self) -> Vec<f64> {
        let tubes = self.tubes as f64;
        self.tracked_species()
            .iter()
            .map(|s| self.inlet.get(*s) / tubes)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ReactorError> {
        for s in self.tracked_species() {
            let field = format!("inlet.{}", s);
            non_negative(&field, self.inlet.get(s))?;
        }
        // hydrogen and steam divide the rate expressions
        positive("inlet.H2", self.inlet.H2)?;
        positive("inlet.H2O", self.inlet.H2O)?;
        // methane conversion is reported against the inlet flow
        positive("inlet.CH4", self.inlet.CH4)?;

        if self.tubes == 0 {
            return Err(ReactorError::invalid("tubes", "at least one tube is required"));
        }
        positive("T0", self.T0)?;
        positive("T_alpha", self.T_alpha)?;
        positive("P0", self.P0)?;
        non_negative("U", self.U)?;
        positive("gas_density", self.gas_density)?;
        positive("viscosity", self.viscosity)?;

        positive("geometry.D", self.geometry.D)?;
        positive("geometry.l", self.geometry.l)?;
        positive("geometry.Dp", self.geometry.Dp)?;
        let phi = self.geometry.voidage;
        if !(phi > 0.0 && phi < 1.0) {
            return Err(ReactorError::invalid(
                "geometry.voidage",
                format!("must lie in (0, 1), got {}", phi),
            ));
        }
        self.catalyst_densities()?;

        if self.capabilities.has_flue_gas {
            for s in Species::FLUE {
                non_negative(&format!("flue.{}", s), self.flue.get(s))?;
            }
            positive("flue", self.flue.total())?;
        }

        positive("solver.rtol", self.solver.rtol)?;
        positive("solver.atol", self.solver.atol)?;
        if let IntegrationMethod::RK4 { step } = self.solver.method {
            positive("solver.method.step", step)?;
        }
        Ok(())
    }
}
