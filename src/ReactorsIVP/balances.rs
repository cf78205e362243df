//! # Balance equations of one catalyst-filled tube
//!
//! Independent variable is the catalyst mass W (kg) from the tube inlet.
//!
//! - **Mass balance**: `dF_i/dW = Σ_j ν_ij·r_j`
//! - **Energy balance**: `dT/dW = (U·(4/D)/ρb·(Tα − T) − 1000·Σ_j r_j·ΔH_j(T)) / Σ_i Cp_i(T)·F_i`
//!   with the heat of reaction summed over the three methane reactions only
//! - **Heating gas** (co-current): `dTα/dW = U·(4/D)/ρb·(T − Tα) / (ṅ_flue·Cp_flue(Tα))`
//! - **Ergun pressure drop**: `dP/dW = −α/2·P0²/P·(T/T0)·(F/F0)`,
//!   `α = 2β/(A·ρc·(1 − φ)·P0·1000)`,
//!   `β = G·(1 − φ)/(ρ·Dp·φ³)·(1.75·G + 150·(1 − φ)·μ/Dp)`
//!
//! β is in Pa/m while pressures are carried in kPa, hence the factor 1000.
use super::reactor_config::ReactorConfig;
use super::reactor_error::ReactorError;
use crate::Kinetics::SMR_kinetics::{Reaction, ReactionRates};
use crate::Thermodynamics::species::Species;
use crate::Thermodynamics::thermo_api::ThermoLibrary;

/// reactions whose heat enters the energy balance
const HEAT_RELEASING: [Reaction; 3] = [
    Reaction::SteamReforming,
    Reaction::WaterGasShift,
    Reaction::CombinedReforming,
];

/// `dF_i/dW` for every tracked species, mol/(s·kg)
pub fn species_derivatives(species: &[Species], rates: &ReactionRates) -> Vec<f64> {
    species
        .iter()
        .map(|s| {
            Reaction::ALL
                .iter()
                .map(|reaction| reaction.coefficient(*s) * rates.get(*reaction))
                .sum()
        })
        .collect()
}

/// per-tube flue-gas stream heating the tube wall
#[derive(Debug, Clone, PartialEq)]
pub struct FlueStream {
    /// (species, mol/s) per tube
    pub flows: Vec<(Species, f64)>,
}

impl FlueStream {
    pub fn total(&self) -> f64 {
        self.flows.iter().map(|(_, F)| F).sum()
    }

    /// flow-weighted molar heat capacity, J/(mol·K)
    pub fn mean_Cp(&self, thermo: &ThermoLibrary, T: f64) -> f64 {
        let (species, flows): (Vec<Species>, Vec<f64>) = self.flows.iter().copied().unzip();
        thermo.heat_capacity_flow(&species, &flows, T) / self.total()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyBalance {
    /// W/(m²·K)
    pub U: f64,
    /// m
    pub D: f64,
    /// kg/m³
    pub rho_b: f64,
    /// constant heating temperature used when no flue stream is integrated, K
    pub T_alpha: f64,
    pub flue: Option<FlueStream>,
}

impl EnergyBalance {
    pub fn from_config(config: &ReactorConfig) -> Result<Self, ReactorError> {
        let (rho_b, _) = config.catalyst_densities()?;
        let tubes = config.tubes as f64;
        let flue = config.capabilities.has_flue_gas.then(|| FlueStream {
            flows: Species::FLUE
                .iter()
                .map(|s| (*s, config.flue.get(*s) / tubes))
                .collect(),
        });
        Ok(Self {
            U: config.U,
            D: config.geometry.D,
            rho_b,
            T_alpha: config.T_alpha,
            flue,
        })
    }

    /// wall heat transfer per kg catalyst per kelvin, W/(kg·K)
    pub fn wall_coefficient(&self) -> f64 {
        self.U * (4.0 / self.D) / self.rho_b
    }

    /// Σ r_j·ΔH_j(T) over the methane reactions, kJ/(s·kg)
    pub fn heat_of_reaction(&self, thermo: &ThermoLibrary, T: f64, rates: &ReactionRates) -> f64 {
        HEAT_RELEASING
            .iter()
            .map(|reaction| rates.get(*reaction) * thermo.reaction_enthalpy(reaction.stoichiometry(), T))
            .sum()
    }

    /// dT/dW, K/kg
    pub fn dT_dW(
        &self,
        thermo: &ThermoLibrary,
        species: &[Species],
        flows: &[f64],
        T: f64,
        T_alpha: f64,
        rates: &ReactionRates,
    ) -> f64 {
        let Q = self.heat_of_reaction(thermo, T, rates);
        let heat_capacity = thermo.heat_capacity_flow(species, flows, T);
        (self.wall_coefficient() * (T_alpha - T) - Q * 1000.0) / heat_capacity
    }

    /// dTα/dW of the co-current heating gas, K/kg; zero when Tα is held constant
    pub fn dT_alpha_dW(&self, thermo: &ThermoLibrary, T: f64, T_alpha: f64) -> f64 {
        match &self.flue {
            Some(flue) => {
                self.wall_coefficient() * (T - T_alpha) / (flue.total() * flue.mean_Cp(thermo, T_alpha))
            }
            None => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PressureDrop {
    /// tube cross-section, m²
    pub area: f64,
    pub voidage: f64,
    /// m
    pub Dp: f64,
    /// kg/m³
    pub gas_density: f64,
    /// Pa·s
    pub viscosity: f64,
    /// kg/m³
    pub rho_c: f64,
    /// inlet pressure, kPa
    pub P0: f64,
    /// inlet temperature, K
    pub T0: f64,
    /// inlet total flow per tube, mol/s
    pub F0: f64,
}

impl PressureDrop {
    pub fn from_config(config: &ReactorConfig) -> Result<Self, ReactorError> {
        let (_, rho_c) = config.catalyst_densities()?;
        Ok(Self {
            area: config.geometry.area(),
            voidage: config.geometry.voidage,
            Dp: config.geometry.Dp,
            gas_density: config.gas_density,
            viscosity: config.viscosity,
            rho_c,
            P0: config.P0,
            T0: config.T0,
            F0: config.inlet_flows_per_tube().iter().sum(),
        })
    }

    /// superficial mass flux, kg/(s·m²)
    pub fn mass_flux(&self, species: &[Species], flows: &[f64]) -> f64 {
        let mass_flow: f64 = species
            .iter()
            .zip(flows)
            .map(|(s, F)| s.molar_mass() * F)
            .sum();
        mass_flow / 1000.0 / self.area
    }

    /// Ergun coefficient, Pa/m
    pub fn beta(&self, G: f64) -> f64 {
        let phi = self.voidage;
        G * (1.0 - phi) / (self.gas_density * self.Dp * phi.powi(3))
            * (1.75 * G + 150.0 * (1.0 - phi) * self.viscosity / self.Dp)
    }

    /// 1/kg
    pub fn alpha(&self, beta: f64) -> f64 {
        2.0 * beta / (self.area * self.rho_c * (1.0 - self.voidage) * self.P0 * 1000.0)
    }

    /// dP/dW, kPa/kg
    pub fn dP_dW(&self, species: &[Species], flows: &[f64], T: f64, P: f64) -> f64 {
        let alpha = self.alpha(self.beta(self.mass_flux(species, flows)));
        let F: f64 = flows.iter().sum();
        -alpha / 2.0 * (self.P0 / (P / self.P0)) * (T / self.T0) * (F / self.F0)
    }
}
