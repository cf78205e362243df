//! Empirical power-series heat capacity `Cp = a + b*T + c*T^2 + d*T^3` (J/(mol K), T in K)
//! with the enthalpy obtained by analytic integration and referenced to 298.15 K.
//!
//! Used for ethane, which has no gas-phase Shomate table. Coefficients are the
//! ideal-gas fit of Poling, Prausnitz and O'Connell (The Properties of Gases and
//! Liquids), valid 273..1500 K and extrapolated outside.
use super::species::Species;

pub const T_REF: f64 = 298.15;

#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialData {
    pub coeffs: [f64; 4],
    pub dh0: f64,
}

impl PolynomialData {
    pub fn for_species(species: Species) -> Option<Self> {
        match species {
            Species::C2H6 => Some(Self {
                coeffs: [5.409, 1.781e-1, -6.938e-5, 8.713e-9],
                dh0: species.formation_enthalpy(),
            }),
            _ => None,
        }
    }

    pub fn cp(&self, T: f64) -> f64 {
        let [a, b, c, d] = self.coeffs;
        a + b * T + c * T.powi(2) + d * T.powi(3)
    }

    /// integral of Cp from 0 to T, kJ/mol
    fn cp_integral(&self, T: f64) -> f64 {
        let [a, b, c, d] = self.coeffs;
        (a * T + b * T.powi(2) / 2.0 + c * T.powi(3) / 3.0 + d * T.powi(4) / 4.0) / 1000.0
    }

    pub fn dh(&self, T: f64) -> f64 {
        self.dh0 + self.cp_integral(T) - self.cp_integral(T_REF)
    }
}
