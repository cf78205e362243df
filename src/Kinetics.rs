/// Arrhenius, adsorption and equilibrium constants of the steam reforming network
pub mod rate_constants;
/// rate laws of steam reforming, water-gas shift, combined reforming and ethane reforming
#[allow(non_snake_case)]
pub mod SMR_kinetics;
