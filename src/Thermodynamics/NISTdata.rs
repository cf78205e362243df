//! # Shomate correlations (NIST Chemistry WebBook format)
//!
//! Gas-phase heat capacity and enthalpy in the Shomate form
//!
//! ```text
//! Cp = A + B*t + C*t^2 + D*t^3 + E/t^2                         J/(mol K)
//! H - H298 = A*t + B*t^2/2 + C*t^3/3 + D*t^4/4 - E/t + F - H    kJ/mol
//! t = T/1000
//! ```
//!
//! Each species carries a small ordered set of temperature ranges. A range is
//! identified by its upper bound; the first range also serves every temperature
//! below it and the last one is open-ended, so the correlations stay finite for
//! any T > 0. Values are not continuous at the breakpoints, as in the source
//! tables.
use super::species::Species;

/// one temperature range of a Shomate table: coefficients A..H valid up to `T_max`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShomateRange {
    pub T_max: f64,
    pub coeffs: [f64; 8],
}

const fn range(T_max: f64, coeffs: [f64; 8]) -> ShomateRange {
    ShomateRange { T_max, coeffs }
}

const CO_RANGES: [ShomateRange; 2] = [
    range(
        1300.0,
        [25.56759, 6.09613, 4.054656, -2.671301, 0.131021, -118.0089, 227.3665, -110.5271],
    ),
    range(
        f64::INFINITY,
        [35.15070, 1.300095, -0.205921, 0.013550, -3.282780, -127.8375, 231.7120, -110.5271],
    ),
];

const H2O_RANGES: [ShomateRange; 2] = [
    range(
        1700.0,
        [30.092, 6.832514, 6.793435, -2.53448, 0.082139, -250.881, 223.3967, -241.8264],
    ),
    range(
        f64::INFINITY,
        [41.96426, 8.622053, -1.499780, 0.098119, -11.15764, -272.1797, 219.7809, -241.8264],
    ),
];

const H2_RANGES: [ShomateRange; 3] = [
    range(
        1000.0,
        [33.066178, -11.363417, 11.432816, -2.772874, -0.158558, -9.980797, 172.707974, 0.0],
    ),
    range(
        2500.0,
        [18.563083, 12.257357, -2.859786, 0.268238, 1.977990, -1.147438, 156.288133, 0.0],
    ),
    range(
        f64::INFINITY,
        [43.413560, -4.293079, 1.272428, -0.096876, -20.533862, -38.515158, 162.081354, 0.0],
    ),
];

const CO2_RANGES: [ShomateRange; 2] = [
    range(
        1200.0,
        [24.99735, 55.18696, -33.69137, 7.948387, -0.136638, -403.6075, 228.2431, -393.5224],
    ),
    range(
        f64::INFINITY,
        [58.16639, 2.720074, -0.492289, 0.038844, -6.447293, -425.9186, 263.6125, -393.5224],
    ),
];

const CH4_RANGES: [ShomateRange; 2] = [
    range(
        1300.0,
        [-0.703029, 108.4773, -42.52157, 5.862788, 0.678565, -76.84376, 158.7163, -74.87310],
    ),
    range(
        f64::INFINITY,
        [85.81217, 11.26467, -2.114146, 0.138190, -26.42221, -153.5327, 224.4143, -74.87310],
    ),
];

const N2_RANGES: [ShomateRange; 3] = [
    range(
        500.0,
        [28.98641, 1.853978, -9.647459, 16.63537, 0.000117, -8.671914, 226.4168, 0.0],
    ),
    range(
        2000.0,
        [19.50583, 19.88705, -8.598535, 1.369784, 0.527601, -4.935202, 212.3900, 0.0],
    ),
    range(
        f64::INFINITY,
        [35.51872, 1.128728, -0.196103, 0.014662, -4.553760, -18.97091, 224.9810, 0.0],
    ),
];

const O2_RANGES: [ShomateRange; 3] = [
    range(
        700.0,
        [31.32234, -20.23531, 57.86644, -36.50624, -0.007374, -8.903471, 246.7945, 0.0],
    ),
    range(
        2000.0,
        [30.03235, 8.772972, -3.988133, 0.788313, -0.741599, -11.32468, 236.1663, 0.0],
    ),
    range(
        f64::INFINITY,
        [20.91111, 10.72071, -2.020498, 0.146449, 9.245722, 5.337651, 237.6185, 0.0],
    ),
];

/// Shomate data of one substance: range table plus formation enthalpy (kJ/mol)
#[derive(Debug, Clone, PartialEq)]
pub struct NISTdata {
    pub ranges: &'static [ShomateRange],
    pub dh0: f64,
}

impl NISTdata {
    /// Shomate table of a species, `None` for species described by another correlation
    pub fn for_species(species: Species) -> Option<Self> {
        let ranges: &'static [ShomateRange] = match species {
            Species::CO => &CO_RANGES,
            Species::H2O => &H2O_RANGES,
            Species::H2 => &H2_RANGES,
            Species::CO2 => &CO2_RANGES,
            Species::CH4 => &CH4_RANGES,
            Species::N2 => &N2_RANGES,
            Species::O2 => &O2_RANGES,
            Species::C2H6 => return None,
        };
        Some(Self {
            ranges,
            dh0: species.formation_enthalpy(),
        })
    }

    /// coefficients A..H of the range containing T
    pub fn extract_coefficients(&self, T: f64) -> [f64; 8] {
        self.ranges
            .iter()
            .find(|r| T <= r.T_max)
            .or(self.ranges.last())
            .map(|r| r.coeffs)
            .unwrap_or([0.0; 8])
    }

    pub fn cp(&self, T: f64) -> f64 {
        let [a, b, c, d, e, _, _, _] = self.extract_coefficients(T);
        calculate_cp(T / 1000.0, a, b, c, d, e)
    }

    pub fn dh(&self, T: f64) -> f64 {
        let [a, b, c, d, e, f, g, h] = self.extract_coefficients(T);
        self.dh0 + calculate_dh(T / 1000.0, a, b, c, d, e, f, g, h)
    }
}

pub fn calculate_cp(t: f64, a: f64, b: f64, c: f64, d: f64, e: f64) -> f64 {
    a + b * t + c * t.powi(2) + d * t.powi(3) + e / t.powi(2)
}

#[allow(clippy::too_many_arguments)]
pub fn calculate_dh(t: f64, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64, _g: f64, h: f64) -> f64 {
    a * t + (b * t.powi(2)) / 2.0 + (c * t.powi(3)) / 3.0 + (d * t.powi(4)) / 4.0 - e / t + f - h
}
