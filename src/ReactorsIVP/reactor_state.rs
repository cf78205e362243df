//! Layout of the integrated state vector
//!
//! `[F_CH4, F_H2O, F_H2, F_CO, F_CO2, (F_C2H6), T, P, (Tα)]`
//!
//! Flows are per tube in mol/s, temperatures in K, pressure in kPa.
use super::reactor_config::ReactorConfig;
use super::reactor_error::ReactorError;
use crate::Thermodynamics::species::Species;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateLayout {
    pub species: Vec<Species>,
    pub has_flue_gas: bool,
}

impl StateLayout {
    pub fn from_config(config: &ReactorConfig) -> Self {
        Self {
            species: config.tracked_species(),
            has_flue_gas: config.capabilities.has_flue_gas,
        }
    }

    pub fn n_species(&self) -> usize {
        self.species.len()
    }

    pub fn T_index(&self) -> usize {
        self.species.len()
    }

    pub fn P_index(&self) -> usize {
        self.species.len() + 1
    }

    pub fn T_alpha_index(&self) -> Option<usize> {
        self.has_flue_gas.then(|| self.species.len() + 2)
    }

    /// 7, 8 or 9
    pub fn dim(&self) -> usize {
        self.species.len() + 2 + usize::from(self.has_flue_gas)
    }

    pub fn index_of(&self, species: Species) -> Option<usize> {
        self.species.iter().position(|s| *s == species)
    }

    /// column names in state order
    pub fn variable_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.species.iter().map(|s| format!("F_{}", s)).collect();
        names.push("T".to_string());
        names.push("P".to_string());
        if self.has_flue_gas {
            names.push("T_alpha".to_string());
        }
        names
    }

    pub fn check_dim(&self, found: usize) -> Result<(), ReactorError> {
        if found == self.dim() {
            Ok(())
        } else {
            Err(ReactorError::DimensionMismatch {
                expected: self.dim(),
                found,
            })
        }
    }
}

/// State of one tube at a given catalyst mass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactorState {
    /// mol/s, in layout order
    pub flows: Vec<f64>,
    /// K
    pub T: f64,
    /// kPa
    pub P: f64,
    /// heating gas temperature when it is integrated, K
    pub T_alpha: Option<f64>,
}

impl ReactorState {
    pub fn from_slice(layout: &StateLayout, y: &[f64]) -> Result<Self, ReactorError> {
        layout.check_dim(y.len())?;
        let n = layout.n_species();
        Ok(Self {
            flows: y[..n].to_vec(),
            T: y[layout.T_index()],
            P: y[layout.P_index()],
            T_alpha: layout.T_alpha_index().map(|i| y[i]),
        })
    }

    pub fn to_vec(&self) -> Vec<f64> {
        let mut y = self.flows.clone();
        y.push(self.T);
        y.push(self.P);
        if let Some(T_alpha) = self.T_alpha {
            y.push(T_alpha);
        }
        y
    }

    pub fn total_flow(&self) -> f64 {
        self.flows.iter().sum()
    }

    pub fn flow(&self, layout: &StateLayout, species: Species) -> f64 {
        layout.index_of(species).map(|i| self.flows[i]).unwrap_or(0.0)
    }

    /// inlet state of one tube
    pub fn inlet(config: &ReactorConfig) -> Self {
        Self {
            flows: config.inlet_flows_per_tube(),
            T: config.T0,
            P: config.P0,
            T_alpha: config.capabilities.has_flue_gas.then_some(config.T_alpha),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReactorsIVP::reactor_config::Capabilities;

    fn config_with(has_ethane: bool, has_flue_gas: bool) -> ReactorConfig {
        ReactorConfig {
            capabilities: Capabilities {
                has_ethane,
                has_flue_gas,
            },
            ..ReactorConfig::default()
        }
    }

    #[test]
    fn test_layout_dimensions() {
        let plain = StateLayout::from_config(&config_with(false, false));
        assert_eq!(plain.dim(), 7);
        assert_eq!(plain.T_index(), 5);
        assert_eq!(plain.P_index(), 6);
        assert_eq!(plain.T_alpha_index(), None);

        let ethane = StateLayout::from_config(&config_with(true, false));
        assert_eq!(ethane.dim(), 8);
        assert_eq!(ethane.index_of(Species::C2H6), Some(5));

        let full = StateLayout::from_config(&config_with(true, true));
        assert_eq!(full.dim(), 9);
        assert_eq!(full.T_alpha_index(), Some(8));
        assert_eq!(
            full.variable_names(),
            vec!["F_CH4", "F_H2O", "F_H2", "F_CO", "F_CO2", "F_C2H6", "T", "P", "T_alpha"]
        );
    }

    #[test]
    fn test_inlet_state() {
        let config = config_with(false, true);
        let layout = StateLayout::from_config(&config);
        let inlet = ReactorState::inlet(&config);
        let y = inlet.to_vec();
        assert_eq!(y.len(), layout.dim());
        assert_eq!(y[layout.T_index()], 823.15);
        assert_eq!(y[layout.P_index()], 2350.0);
        assert_eq!(y[7], 2000.0);
        assert_eq!(ReactorState::from_slice(&layout, &y).unwrap(), inlet);
        assert_eq!(inlet.flow(&layout, Species::C2H6), 0.0);
        assert!((inlet.total_flow() - 498.559 / 200.0).abs() < 1e-12);
    }

    #[test]
    fn test_wrong_dimension() {
        let layout = StateLayout::from_config(&config_with(false, false));
        let err = ReactorState::from_slice(&layout, &[1.0; 8]).unwrap_err();
        assert!(matches!(
            err,
            ReactorError::DimensionMismatch {
                expected: 7,
                found: 8
            }
        ));
    }
}
