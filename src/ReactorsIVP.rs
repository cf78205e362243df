//! # Fixed-bed steam reformer tube
//!
//! Mass, energy and pressure balances of one catalyst-filled tube integrated
//! along the catalyst mass W. Identical tubes run in parallel and share the
//! process feed and the flue gas equally.
//!
//! | Symbol | Description | Units |
//! |--------|-------------|-------|
//! | `F_i` | molar flow of species i in one tube | mol/s |
//! | `T` | process gas temperature | K |
//! | `P` | pressure | kPa |
//! | `Tα` | heating gas temperature | K |
//! | `W` | catalyst mass from the tube inlet | kg |
//!
//! Optional parts are switched on in [`reactor_config::Capabilities`]: ethane
//! in the feed adds `F_C2H6` to the state, flue-gas heating adds `Tα`.
/// errors of setup and integration
pub mod reactor_error;
/// serde configuration with validation
pub mod reactor_config;
pub mod reactor_state;
/// mass, energy and Ergun pressure balances
pub mod balances;
pub mod reactor_ode;
/// integration driver, profiles and tube-count sweep
#[allow(non_snake_case)]
pub mod SMRreactorIVP;
mod reactor_ivp_tests;
