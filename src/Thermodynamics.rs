//! # Thermodynamic property library
//!
//! Ideal-gas heat capacities and enthalpies of the species taking part in steam
//! reforming and in the flue gas heating the reformer tubes.
//!
//! | Symbol | Description | Units |
//! |--------|-------------|-------|
//! | `Cp` | molar heat capacity | J/(mol·K) |
//! | `H`  | molar enthalpy, formation enthalpy included | kJ/mol |
//!
//! Most species use NIST Shomate tables ([`NISTdata`]); ethane uses a power
//! series ([`PolynomialData`]). Both sit behind the [`thermo_api::ThermoCalculator`]
//! trait and are collected in [`thermo_api::ThermoLibrary`].
//!
//! ```
//! use SteamReformer::Thermodynamics::species::Species;
//! use SteamReformer::Thermodynamics::thermo_api::ThermoLibrary;
//! let thermo = ThermoLibrary::new().unwrap();
//! let cp = thermo.specific_heat(Species::CO, 298.0);
//! assert!((cp - 29.15).abs() < 0.05);
//! assert!(thermo.specific_heat_by_name("XeF2", 298.0).is_err());
//! ```
pub mod NISTdata;
pub mod PolynomialData;
pub mod species;
pub mod thermo_api;
