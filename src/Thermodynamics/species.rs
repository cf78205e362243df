//! # Species of the reforming system
//!
//! Closed set of the gases that appear either in the process stream of the
//! reformer tube (CH4, H2O, H2, CO, CO2 and optionally C2H6) or in the flue gas
//! that heats it (N2, CO2, H2O, O2).
//!
//! Properties are exhaustive `match`es on [`Species`]. Strings only enter
//! through [`Species::from_name`], which fails on an unknown formula.
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

use super::thermo_api::ThermoError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum Species {
    CH4,
    H2O,
    H2,
    CO,
    CO2,
    C2H6,
    N2,
    O2,
}

/// Number of C, H and O atoms in a molecule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomCount {
    pub C: u32,
    pub H: u32,
    pub O: u32,
}

impl Species {
    /// species of the process stream without ethane, in state-vector order
    pub const PROCESS: [Species; 5] = [
        Species::CH4,
        Species::H2O,
        Species::H2,
        Species::CO,
        Species::CO2,
    ];
    /// components of the flue gas heating the tubes
    pub const FLUE: [Species; 4] = [Species::N2, Species::CO2, Species::H2O, Species::O2];

    /// parse a chemical formula ("CH4", "H2O", ...)
    pub fn from_name(name: &str) -> Result<Species, ThermoError> {
        Species::from_str(name.trim()).map_err(|_| ThermoError::UnknownSpecies(name.to_string()))
    }

    /// molar mass, g/mol
    pub fn molar_mass(&self) -> f64 {
        match self {
            Species::CH4 => 16.04,
            Species::H2O => 18.015,
            Species::H2 => 2.016,
            Species::CO => 28.01,
            Species::CO2 => 44.01,
            Species::C2H6 => 30.069,
            Species::N2 => 28.014,
            Species::O2 => 31.998,
        }
    }

    /// standard enthalpy of formation at 298.15 K, kJ/mol
    pub fn formation_enthalpy(&self) -> f64 {
        match self {
            Species::CH4 => -74.87,
            Species::H2O => -241.83,
            Species::H2 => 0.0,
            Species::CO => -110.5,
            Species::CO2 => -393.52,
            Species::C2H6 => -84.0,
            Species::N2 => 0.0,
            Species::O2 => 0.0,
        }
    }

    pub fn atoms(&self) -> AtomCount {
        let (C, H, O) = match self {
            Species::CH4 => (1, 4, 0),
            Species::H2O => (0, 2, 1),
            Species::H2 => (0, 2, 0),
            Species::CO => (1, 0, 1),
            Species::CO2 => (1, 0, 2),
            Species::C2H6 => (2, 6, 0),
            Species::N2 => (0, 0, 0),
            Species::O2 => (0, 0, 2),
        };
        AtomCount { C, H, O }
    }
}
