use super::NISTdata::NISTdata;
use super::PolynomialData::PolynomialData;
use super::species::Species;
use enum_dispatch::enum_dispatch;
use strum::IntoEnumIterator;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ThermoError {
    #[error("unknown species: {0}")]
    UnknownSpecies(String),
    #[error("no thermodynamic correlation for species {0}")]
    NoCorrelation(Species),
    #[error("temperature must be positive, got {0} K")]
    NonPositiveTemperature(f64),
}

/// heat capacity (J/(mol K)) and enthalpy (kJ/mol, including the formation enthalpy) of a pure gas
#[enum_dispatch]
pub trait ThermoCalculator {
    fn calc_Cp(&self, T: f64) -> f64;
    fn calc_dh(&self, T: f64) -> f64;
}

impl ThermoCalculator for NISTdata {
    fn calc_Cp(&self, T: f64) -> f64 {
        self.cp(T)
    }
    fn calc_dh(&self, T: f64) -> f64 {
        self.dh(T)
    }
}

impl ThermoCalculator for PolynomialData {
    fn calc_Cp(&self, T: f64) -> f64 {
        self.cp(T)
    }
    fn calc_dh(&self, T: f64) -> f64 {
        self.dh(T)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[enum_dispatch(ThermoCalculator)]
pub enum ThermoEnum {
    NIST(NISTdata),
    Polynomial(PolynomialData),
}

pub fn create_thermal(species: Species) -> Result<ThermoEnum, ThermoError> {
    if let Some(nist) = NISTdata::for_species(species) {
        return Ok(ThermoEnum::NIST(nist));
    }
    PolynomialData::for_species(species)
        .map(ThermoEnum::Polynomial)
        .ok_or(ThermoError::NoCorrelation(species))
}

/// Correlations of every species, indexed by the species enum.
#[derive(Clone, Debug)]
pub struct ThermoLibrary {
    calculators: Vec<ThermoEnum>,
}

impl ThermoLibrary {
    pub fn new() -> Result<Self, ThermoError> {
        let calculators = Species::iter()
            .map(create_thermal)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { calculators })
    }

    fn calculator(&self, species: Species) -> &ThermoEnum {
        // built from Species::iter(), so the discriminant is always in range
        &self.calculators[species as usize]
    }

    /// molar heat capacity, J/(mol K)
    pub fn specific_heat(&self, species: Species, T: f64) -> f64 {
        self.calculator(species).calc_Cp(T)
    }

    /// molar enthalpy including formation enthalpy, kJ/mol
    pub fn enthalpy(&self, species: Species, T: f64) -> f64 {
        self.calculator(species).calc_dh(T)
    }

    pub fn specific_heat_by_name(&self, name: &str, T: f64) -> Result<f64, ThermoError> {
        let species = Species::from_name(name)?;
        check_temperature(T)?;
        Ok(self.specific_heat(species, T))
    }

    pub fn enthalpy_by_name(&self, name: &str, T: f64) -> Result<f64, ThermoError> {
        let species = Species::from_name(name)?;
        check_temperature(T)?;
        Ok(self.enthalpy(species, T))
    }

    /// Σ ν_i·H_i(T) over a stoichiometric vector (products positive), kJ/mol
    pub fn reaction_enthalpy(&self, stoichiometry: &[(Species, f64)], T: f64) -> f64 {
        stoichiometry
            .iter()
            .map(|(s, nu)| nu * self.enthalpy(*s, T))
            .sum()
    }

    /// Σ Cp_i(T)·F_i, W/K when flows are in mol/s
    pub fn heat_capacity_flow(&self, species: &[Species], flows: &[f64], T: f64) -> f64 {
        species
            .iter()
            .zip(flows)
            .map(|(s, F)| self.specific_heat(*s, T) * F)
            .sum()
    }
}

fn check_temperature(T: f64) -> Result<(), ThermoError> {
    if T > 0.0 && T.is_finite() {
        Ok(())
    } else {
        Err(ThermoError::NonPositiveTemperature(T))
    }
}
