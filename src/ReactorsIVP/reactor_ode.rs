//! Right-hand side of the tube model and its adapter for `differential-equations`.
use super::balances::{EnergyBalance, PressureDrop, species_derivatives};
use super::reactor_config::ReactorConfig;
use super::reactor_error::ReactorError;
use super::reactor_state::{ReactorState, StateLayout};
use crate::Kinetics::SMR_kinetics::{PartialPressures, SMRkinetics};
use crate::Thermodynamics::thermo_api::ThermoLibrary;
use differential_equations::ode::ODE;
use nalgebra::SVector;
use std::cell::RefCell;

/// `dy/dW = f(W, y)` of one tube. Immutable after construction, so every call
/// with the same arguments gives the same result.
#[derive(Debug, Clone)]
pub struct ReactorDerivativeFunction {
    pub layout: StateLayout,
    pub kinetics: SMRkinetics,
    pub thermo: ThermoLibrary,
    pub energy: EnergyBalance,
    pub pressure: PressureDrop,
}

impl ReactorDerivativeFunction {
    pub fn from_config(config: &ReactorConfig) -> Result<Self, ReactorError> {
        Ok(Self {
            layout: StateLayout::from_config(config),
            kinetics: SMRkinetics::new(config.kinetics, config.capabilities.has_ethane),
            thermo: ThermoLibrary::new()?,
            energy: EnergyBalance::from_config(config)?,
            pressure: PressureDrop::from_config(config)?,
        })
    }

    pub fn dim(&self) -> usize {
        self.layout.dim()
    }

    pub fn evaluate(&self, w: f64, y: &[f64]) -> Result<Vec<f64>, ReactorError> {
        let mut dydw = vec![0.0; y.len()];
        self.evaluate_into(w, y, &mut dydw)?;
        Ok(dydw)
    }

    /// Fills `dydw`; fails with [`ReactorError::NumericalDegeneracy`] when the
    /// state leaves the physical domain or a derivative is not finite.
    pub fn evaluate_into(&self, w: f64, y: &[f64], dydw: &mut [f64]) -> Result<(), ReactorError> {
        let state = ReactorState::from_slice(&self.layout, y)?;
        self.layout.check_dim(dydw.len())?;
        let degenerate = |detail: String| ReactorError::NumericalDegeneracy { w, detail };

        if !(state.T > 0.0) {
            return Err(degenerate(format!("temperature {} K", state.T)));
        }
        if !(state.P > 0.0) {
            return Err(degenerate(format!("pressure {} kPa", state.P)));
        }
        let total = state.total_flow();
        if !(total > 0.0) {
            return Err(degenerate(format!("total flow {} mol/s", total)));
        }

        let species = &self.layout.species;
        let p = PartialPressures::from_flows(species, &state.flows, state.P);
        let rates = self
            .kinetics
            .try_rates(state.T, &p)
            .map_err(|e| degenerate(e.to_string()))?;
        if !rates.is_finite() {
            return Err(degenerate(format!("reaction rates {:?}", rates)));
        }

        let T_alpha = state.T_alpha.unwrap_or(self.energy.T_alpha);
        let dF = species_derivatives(species, &rates);
        let n = dF.len();
        dydw[..n].copy_from_slice(&dF);
        dydw[self.layout.T_index()] =
            self.energy
                .dT_dW(&self.thermo, species, &state.flows, state.T, T_alpha, &rates);
        dydw[self.layout.P_index()] = self.pressure.dP_dW(species, &state.flows, state.T, state.P);
        if let Some(i) = self.layout.T_alpha_index() {
            dydw[i] = self.energy.dT_alpha_dW(&self.thermo, state.T, T_alpha);
        }

        let names = self.layout.variable_names();
        if let Some(i) = dydw.iter().position(|d| !d.is_finite()) {
            return Err(degenerate(format!("d{}/dW = {}", names[i], dydw[i])));
        }
        Ok(())
    }
}

/// Adapter for the `differential-equations` solvers. The solver interface has
/// no error channel, so the first degeneracy is kept here and the derivative
/// is filled with NaN, which makes the step fail.
pub struct ReactorODE<'a, const N: usize> {
    rhs: &'a ReactorDerivativeFunction,
    failure: RefCell<Option<(f64, String)>>,
}

impl<'a, const N: usize> ReactorODE<'a, N> {
    pub fn new(rhs: &'a ReactorDerivativeFunction) -> Self {
        Self {
            rhs,
            failure: RefCell::new(None),
        }
    }

    /// Degeneracy not yet passed by a successful evaluation, as (W, description).
    /// A rejected trial step the solver later steps over leaves nothing behind.
    pub fn take_failure(&self) -> Option<(f64, String)> {
        self.failure.borrow_mut().take()
    }
}

impl<const N: usize> ODE<f64, SVector<f64, N>> for ReactorODE<'_, N> {
    fn diff(&self, t: f64, y: &SVector<f64, N>, dydt: &mut SVector<f64, N>) {
        let mut failure = self.failure.borrow_mut();
        match self.rhs.evaluate_into(t, y.as_slice(), dydt.as_mut_slice()) {
            Ok(()) => {
                if failure.as_ref().is_some_and(|(w, _)| t >= *w) {
                    *failure = None;
                }
            }
            Err(e) => {
                dydt.fill(f64::NAN);
                if failure.is_none() {
                    let detail = match e {
                        ReactorError::NumericalDegeneracy { detail, .. } => detail,
                        other => other.to_string(),
                    };
                    *failure = Some((t, detail));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReactorsIVP::reactor_config::Capabilities;
    use crate::Thermodynamics::species::{AtomCount, Species};
    use approx::assert_relative_eq;

    fn rhs_for(has_ethane: bool, has_flue_gas: bool) -> (ReactorConfig, ReactorDerivativeFunction) {
        let config = ReactorConfig {
            capabilities: Capabilities {
                has_ethane,
                has_flue_gas,
            },
            ..ReactorConfig::default()
        };
        let rhs = ReactorDerivativeFunction::from_config(&config).unwrap();
        (config, rhs)
    }

    fn atom_balance(species: &[Species], d: &[f64]) -> [f64; 3] {
        let mut balance = [0.0; 3];
        for (s, dF) in species.iter().zip(d) {
            let AtomCount { C, H, O } = s.atoms();
            balance[0] += C as f64 * dF;
            balance[1] += H as f64 * dF;
            balance[2] += O as f64 * dF;
        }
        balance
    }

    #[test]
    fn test_inlet_derivatives() {
        let (config, rhs) = rhs_for(false, false);
        let y = ReactorState::inlet(&config).to_vec();
        let d = rhs.evaluate(0.0, &y).unwrap();
        assert_eq!(d.len(), 7);
        // methane is consumed, hydrogen produced, gas heated by the wall, pressure falls
        assert!(d[0] < 0.0);
        assert!(d[2] > 0.0);
        assert!(d[5] > 0.0);
        assert!(d[6] < 0.0);
    }

    #[test]
    fn test_atoms_conserved_along_derivative() {
        for has_ethane in [false, true] {
            let (config, rhs) = rhs_for(has_ethane, true);
            let mut state = ReactorState::inlet(&config);
            for T in [700.0, 823.15, 1000.0, 1200.0] {
                state.T = T;
                let d = rhs.evaluate(0.0, &state.to_vec()).unwrap();
                let n = rhs.layout.n_species();
                let reference = d[..n].iter().map(|x| x.abs()).fold(0.0, f64::max);
                for element in atom_balance(&rhs.layout.species, &d[..n]) {
                    assert!(element.abs() <= 1e-10 * reference, "{} at {} K", element, T);
                }
            }
        }
    }

    #[test]
    fn test_evaluation_is_pure() {
        let (config, rhs) = rhs_for(true, true);
        let y = ReactorState::inlet(&config).to_vec();
        let first = rhs.evaluate(3.0, &y).unwrap();
        let _ = rhs.evaluate(5.0, &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 900.0, 2000.0, 1500.0]);
        let second = rhs.evaluate(3.0, &y).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_constant_heating_temperature_used() {
        let (config, rhs) = rhs_for(false, false);
        let mut y = ReactorState::inlet(&config).to_vec();
        // at T = Tα there is no wall heat, so dT/dW follows from the reaction heat alone
        y[5] = config.T_alpha;
        let d = rhs.evaluate(0.0, &y).unwrap();
        let state = ReactorState::from_slice(&rhs.layout, &y).unwrap();
        let p = PartialPressures::from_flows(&rhs.layout.species, &state.flows, state.P);
        let rates = rhs.kinetics.rates(state.T, &p);
        let Q = rhs.energy.heat_of_reaction(&rhs.thermo, state.T, &rates);
        let cp = rhs
            .thermo
            .heat_capacity_flow(&rhs.layout.species, &state.flows, state.T);
        assert_relative_eq!(d[5], -Q * 1000.0 / cp, max_relative = 1e-10);
    }

    #[test]
    fn test_degenerate_states() {
        let (config, rhs) = rhs_for(false, false);
        let inlet = ReactorState::inlet(&config);

        let mut no_hydrogen = inlet.clone();
        no_hydrogen.flows[2] = 0.0;
        let err = rhs.evaluate(12.5, &no_hydrogen.to_vec()).unwrap_err();
        match err {
            ReactorError::NumericalDegeneracy { w, .. } => assert_eq!(w, 12.5),
            other => panic!("unexpected error {:?}", other),
        }

        let mut no_pressure = inlet.clone();
        no_pressure.P = -1.0;
        assert!(matches!(
            rhs.evaluate(1.0, &no_pressure.to_vec()),
            Err(ReactorError::NumericalDegeneracy { .. })
        ));

        let mut not_a_number = inlet.clone();
        not_a_number.T = f64::NAN;
        assert!(matches!(
            rhs.evaluate(1.0, &not_a_number.to_vec()),
            Err(ReactorError::NumericalDegeneracy { .. })
        ));

        assert!(matches!(
            rhs.evaluate(0.0, &[1.0; 3]),
            Err(ReactorError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_adapter_records_first_failure() {
        let (config, rhs) = rhs_for(false, false);
        let ode = ReactorODE::<7>::new(&rhs);
        let mut bad = ReactorState::inlet(&config);
        bad.P = 0.0;
        let y = SVector::<f64, 7>::from_column_slice(&bad.to_vec());
        let mut dydt = SVector::<f64, 7>::zeros();
        ode.diff(4.0, &y, &mut dydt);
        assert!(dydt.iter().all(|d| d.is_nan()));
        ode.diff(6.0, &y, &mut dydt);
        let (w, detail) = ode.take_failure().unwrap();
        assert_eq!(w, 4.0);
        assert!(detail.contains("pressure"));
        assert!(ode.take_failure().is_none());

        let good = SVector::<f64, 7>::from_column_slice(&ReactorState::inlet(&config).to_vec());
        ode.diff(0.0, &good, &mut dydt);
        assert!(dydt.iter().all(|d| d.is_finite()));
        assert!(ode.take_failure().is_none());
    }

    #[test]
    fn test_adapter_forgets_failure_once_passed() {
        let (config, rhs) = rhs_for(false, false);
        let ode = ReactorODE::<7>::new(&rhs);
        let mut bad = ReactorState::inlet(&config);
        bad.P = -1.0;
        let bad = SVector::<f64, 7>::from_column_slice(&bad.to_vec());
        let good = SVector::<f64, 7>::from_column_slice(&ReactorState::inlet(&config).to_vec());
        let mut dydt = SVector::<f64, 7>::zeros();

        // a retried shorter step before the failure point keeps it
        ode.diff(4.0, &bad, &mut dydt);
        ode.diff(2.0, &good, &mut dydt);
        ode.diff(4.0, &bad, &mut dydt);
        ode.diff(3.5, &good, &mut dydt);
        let (w, _) = ode.take_failure().unwrap();
        assert_eq!(w, 4.0);

        // integration that moves past the failure point clears it
        ode.diff(4.0, &bad, &mut dydt);
        ode.diff(5.0, &good, &mut dydt);
        assert!(dydt.iter().all(|d| d.is_finite()));
        assert!(ode.take_failure().is_none());

        // a later failure is the one reported
        ode.diff(4.0, &bad, &mut dydt);
        ode.diff(4.0, &good, &mut dydt);
        ode.diff(7.5, &bad, &mut dydt);
        let (w, detail) = ode.take_failure().unwrap();
        assert_eq!(w, 7.5);
        assert!(detail.contains("pressure"));
    }
}
