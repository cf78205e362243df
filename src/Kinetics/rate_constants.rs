//! Temperature-dependent constants of the reforming rate laws.
//!
//! Rate and adsorption constants follow the Arrhenius form
//! `k(T) = A * T^n * exp(-E/(R*T))` (`n = 0` for every constant of the
//! reforming table, negative `E` for exothermic adsorption), equilibrium
//! constants the van't Hoff form `Kp(T) = A * exp(B/T)`.
//!
//! Partial pressures are in kPa throughout.
use crate::Thermodynamics::species::Species;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Universal gas constant in J/(mol·K)
pub const R: f64 = 8.314;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum KineticsError {
    #[error("species {0} has no adsorption term in the rate expressions")]
    NoAdsorptionTerm(Species),
    #[error("hydrogen partial pressure must be strictly positive, got {0} kPa")]
    NonPositiveHydrogen(f64),
    #[error("steam partial pressure must be strictly positive, got {0} kPa")]
    NonPositiveSteam(f64),
    #[error("temperature must be positive, got {0} K")]
    NonPositiveTemperature(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrhenius {
    pub A: f64,
    #[serde(default)]
    pub n: f64,
    /// activation energy, J/mol
    pub E: f64,
}

impl Arrhenius {
    pub const fn new(A: f64, E: f64) -> Self {
        Self { A, n: 0.0, E }
    }

    pub fn K_const(&self, T: f64) -> f64 {
        self.A * T.powf(self.n) * f64::exp(-self.E / (R * T))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VantHoff {
    pub A: f64,
    /// K
    pub B: f64,
}

impl VantHoff {
    pub const fn new(A: f64, B: f64) -> Self {
        Self { A, B }
    }

    pub fn K_const(&self, T: f64) -> f64 {
        self.A * f64::exp(self.B / T)
    }
}

/// Full constant table of the four-reaction network
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SMRconstants {
    /// CH4 + H2O ⇌ CO + 3H2
    pub k1: Arrhenius,
    /// CO + H2O ⇌ CO2 + H2
    pub k2: Arrhenius,
    /// CH4 + 2H2O ⇌ CO2 + 4H2
    pub k3: Arrhenius,
    /// C2H6 + 2H2O → 2CO + 5H2
    pub k4: Arrhenius,
    pub kCO: Arrhenius,
    pub kH2: Arrhenius,
    pub kH2O: Arrhenius,
    pub kp1: VantHoff,
    pub kp2: VantHoff,
    pub kp3: VantHoff,
}

impl Default for SMRconstants {
    fn default() -> Self {
        Self {
            k1: Arrhenius::new(5.922e8, 209200.0),
            k2: Arrhenius::new(6.028e-4, 15400.0),
            k3: Arrhenius::new(1.093e3, 109400.0),
            k4: Arrhenius::new(2.0e2, 60000.0),
            kCO: Arrhenius::new(5.127e-13, -140000.0),
            kH2: Arrhenius::new(5.68e-10, -93400.0),
            kH2O: Arrhenius::new(9.251, 15900.0),
            kp1: VantHoff::new(1.2e17, -26830.0),
            kp2: VantHoff::new(1.8e-2, 4400.0),
            kp3: VantHoff::new(2.1e15, -22430.0),
        }
    }
}

impl SMRconstants {
    /// adsorption constant of a surface-active species
    pub fn adsorption(&self, species: Species) -> Result<&Arrhenius, KineticsError> {
        match species {
            Species::CO => Ok(&self.kCO),
            Species::H2 => Ok(&self.kH2),
            Species::H2O => Ok(&self.kH2O),
            other => Err(KineticsError::NoAdsorptionTerm(other)),
        }
    }
}
