//! # SteamReformer
//!
//! Model of a fixed-bed steam-methane reformer: parallel catalyst-filled tubes
//! heated from outside, integrated along the catalyst mass.
//!
//! - [`Thermodynamics`]: heat capacities and enthalpies of the process and flue gases
//! - [`Kinetics`]: rate and equilibrium constants, rate laws of the reforming network
//! - [`ReactorsIVP`]: balances, configuration, integration driver and tube-count sweep
#[allow(non_snake_case)]
pub mod Kinetics;
#[allow(non_snake_case)]
pub mod ReactorsIVP;
#[allow(non_snake_case)]
pub mod Thermodynamics;
