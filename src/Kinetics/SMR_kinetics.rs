//! # Steam reforming reaction network
//!
//! Langmuir–Hinshelwood rate laws of the Xu–Froment type for
//!
//! | # | reaction | rate |
//! |---|----------|------|
//! | 1 | CH4 + H2O ⇌ CO + 3H2 | `k1·pCH4·pH2O^0.5/pH2^1.25·(1 − pCO·pH2³/(Kp1·pCH4·pH2O))/Den` |
//! | 2 | CO + H2O ⇌ CO2 + H2 | `k2·pCO·pH2O^0.5/pH2^0.5·(1 − pCO2·pH2/(Kp2·pCO·pH2O))/Den` |
//! | 3 | CH4 + 2H2O ⇌ CO2 + 4H2 | `k3·pCH4·pH2O/pH2^1.75·(1 − pCO2·pH2⁴/(Kp3·pCH4·pH2O²))/Den` |
//! | 4 | C2H6 + 2H2O → 2CO + 5H2 | `k4·pC2H6/(1 + 25.2·pC2H6·pH2/pH2O + 0.077·pH2O/pH2)²/3.6` |
//!
//! with the shared adsorption term `Den = (1 + KCO·pCO + KH2·√pH2 + KH2O·pH2O/pH2)²`.
//! Reaction 4 has its own adsorption term; the factor 1/3.6 converts its rate
//! from kmol/(kg·h) to mol/(kg·s).
//!
//! The reversible laws are evaluated as `k·(...)·(pCH4 − pCO·pH2³/(Kp1·pH2O))`,
//! which is the same expression with the reactant pressure multiplied through,
//! so a reactant that has been fully consumed gives a finite rate.
use super::rate_constants::{KineticsError, SMRconstants};
use crate::Thermodynamics::species::Species;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reaction {
    SteamReforming,
    WaterGasShift,
    CombinedReforming,
    EthaneReforming,
}

impl Reaction {
    pub const ALL: [Reaction; 4] = [
        Reaction::SteamReforming,
        Reaction::WaterGasShift,
        Reaction::CombinedReforming,
        Reaction::EthaneReforming,
    ];

    /// stoichiometric coefficients, products positive
    pub fn stoichiometry(&self) -> &'static [(Species, f64)] {
        match self {
            Reaction::SteamReforming => &[
                (Species::CH4, -1.0),
                (Species::H2O, -1.0),
                (Species::CO, 1.0),
                (Species::H2, 3.0),
            ],
            Reaction::WaterGasShift => &[
                (Species::CO, -1.0),
                (Species::H2O, -1.0),
                (Species::CO2, 1.0),
                (Species::H2, 1.0),
            ],
            Reaction::CombinedReforming => &[
                (Species::CH4, -1.0),
                (Species::H2O, -2.0),
                (Species::CO2, 1.0),
                (Species::H2, 4.0),
            ],
            Reaction::EthaneReforming => &[
                (Species::C2H6, -1.0),
                (Species::H2O, -2.0),
                (Species::CO, 2.0),
                (Species::H2, 5.0),
            ],
        }
    }

    pub fn coefficient(&self, species: Species) -> f64 {
        self.stoichiometry()
            .iter()
            .find(|(s, _)| *s == species)
            .map(|(_, nu)| *nu)
            .unwrap_or(0.0)
    }
}

/// Partial pressures of the process stream, kPa
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialPressures {
    pub CH4: f64,
    pub H2O: f64,
    pub H2: f64,
    pub CO: f64,
    pub CO2: f64,
    pub C2H6: f64,
}

impl PartialPressures {
    /// `p_i = F_i/ΣF·P`; species outside the process stream are ignored
    pub fn from_flows(species: &[Species], flows: &[f64], P: f64) -> Self {
        let total: f64 = flows.iter().sum();
        let mut p = PartialPressures::default();
        for (s, F) in species.iter().zip(flows) {
            let pi = F / total * P;
            match s {
                Species::CH4 => p.CH4 = pi,
                Species::H2O => p.H2O = pi,
                Species::H2 => p.H2 = pi,
                Species::CO => p.CO = pi,
                Species::CO2 => p.CO2 = pi,
                Species::C2H6 => p.C2H6 = pi,
                Species::N2 | Species::O2 => {}
            }
        }
        p
    }

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

/// Rates of the four reactions, mol/(s·kg catalyst)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReactionRates {
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
    pub r4: f64,
}

impl ReactionRates {
    pub fn get(&self, reaction: Reaction) -> f64 {
        match reaction {
            Reaction::SteamReforming => self.r1,
            Reaction::WaterGasShift => self.r2,
            Reaction::CombinedReforming => self.r3,
            Reaction::EthaneReforming => self.r4,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.r1.is_finite() && self.r2.is_finite() && self.r3.is_finite() && self.r4.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SMRkinetics {
    pub constants: SMRconstants,
    pub with_ethane: bool,
}

impl SMRkinetics {
    pub fn new(constants: SMRconstants, with_ethane: bool) -> Self {
        Self {
            constants,
            with_ethane,
        }
    }

    /// shared adsorption term of reactions 1-3
    pub fn denominator(&self, T: f64, p: &PartialPressures) -> f64 {
        let c = &self.constants;
        (1.0 + c.kCO.K_const(T) * p.CO
            + c.kH2.K_const(T) * p.H2.sqrt()
            + c.kH2O.K_const(T) * p.H2O / p.H2)
            .powi(2)
    }

    /// Rates without precondition checks. Requires `T > 0`, `p.H2 > 0` and `p.H2O > 0`;
    /// otherwise the result is not finite.
    pub fn rates(&self, T: f64, p: &PartialPressures) -> ReactionRates {
        let c = &self.constants;
        let den = self.denominator(T, p);

        let r1 = c.k1.K_const(T) * p.H2O.sqrt() / p.H2.powf(1.25)
            * (p.CH4 - p.CO * p.H2.powi(3) / (c.kp1.K_const(T) * p.H2O))
            / den;
        let r2 = c.k2.K_const(T) * p.H2O.sqrt() / p.H2.sqrt()
            * (p.CO - p.CO2 * p.H2 / (c.kp2.K_const(T) * p.H2O))
            / den;
        let r3 = c.k3.K_const(T) * p.H2O / p.H2.powf(1.75)
            * (p.CH4 - p.CO2 * p.H2.powi(4) / (c.kp3.K_const(T) * p.H2O.powi(2)))
            / den;
        let r4 = if self.with_ethane {
            c.k4.K_const(T) * p.C2H6
                / (1.0 + 25.2 * p.C2H6 * p.H2 / p.H2O + 0.077 * p.H2O / p.H2).powi(2)
                / 3.6
        } else {
            0.0
        };

        ReactionRates { r1, r2, r3, r4 }
    }

    /// Rates with the preconditions checked up front
    pub fn try_rates(&self, T: f64, p: &PartialPressures) -> Result<ReactionRates, KineticsError> {
        if !(T > 0.0) {
            return Err(KineticsError::NonPositiveTemperature(T));
        }
        if !(p.H2 > 0.0) {
            return Err(KineticsError::NonPositiveHydrogen(p.H2));
        }
        if !(p.H2O > 0.0) {
            return Err(KineticsError::NonPositiveSteam(p.H2O));
        }
        Ok(self.rates(T, p))
    }
}
