#[cfg(test)]
mod tests {
    use crate::ReactorsIVP::SMRreactorIVP::*;
    use crate::ReactorsIVP::reactor_config::{Capabilities, IntegrationMethod, ReactorConfig};
    use crate::ReactorsIVP::reactor_error::ReactorError;
    use crate::ReactorsIVP::reactor_state::StateLayout;
    use crate::Thermodynamics::species::Species;
    use approx::assert_relative_eq;

    fn reference_config(has_ethane: bool, has_flue_gas: bool) -> ReactorConfig {
        ReactorConfig {
            capabilities: Capabilities {
                has_ethane,
                has_flue_gas,
            },
            ..ReactorConfig::default()
        }
    }

    fn solve(config: ReactorConfig) -> ReactorProfile {
        let mut reactor = SMRreactorIVP::new(config);
        reactor.solve().unwrap().clone()
    }

    fn assert_non_increasing(values: &[f64], slack: f64) {
        for pair in values.windows(2) {
            assert!(pair[1] <= pair[0] + slack, "{} followed by {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_reference_reformer_constant_heating() {
        let profile = solve(reference_config(false, false));
        assert_relative_eq!(profile.catalyst_mass(), 124.018297, epsilon = 1e-5);
        assert_relative_eq!(profile.W[0], 0.0);

        let conversion = profile.methane_conversion();
        assert!(conversion > 0.0 && conversion < 1.0);
        assert_relative_eq!(conversion, 0.99634, epsilon = 1e-3);
        assert!(profile.pressure_drop() >= 0.0);
        assert_relative_eq!(profile.pressure_drop(), 76.85, epsilon = 0.5);
        assert_relative_eq!(profile.outlet_temperature(), 1369.74, epsilon = 1.0);
        assert_eq!(profile.outlet_heating_temperature(), None);
        assert_eq!(profile.ethane_conversion(), None);
    }

    #[test]
    fn test_methane_and_pressure_fall_along_the_bed() {
        for (has_ethane, has_flue_gas) in [(false, false), (false, true), (true, true)] {
            let profile = solve(reference_config(has_ethane, has_flue_gas));
            let CH4 = profile.species_flows(Species::CH4).unwrap();
            assert_non_increasing(&CH4, 1e-7);
            assert_non_increasing(&profile.column(profile.layout.P_index()), 0.0);
        }
    }

    #[test]
    fn test_flue_gas_heating() {
        let profile = solve(reference_config(false, true));
        assert_eq!(profile.layout.dim(), 8);
        assert_relative_eq!(profile.methane_conversion(), 0.802046, epsilon = 2e-3);
        assert_relative_eq!(profile.pressure_drop(), 68.688, epsilon = 0.5);
        assert_relative_eq!(profile.outlet_temperature(), 1111.05, epsilon = 1.5);
        // the heating gas gives up heat and stays hotter than the process gas
        let T_alpha = profile.outlet_heating_temperature().unwrap();
        assert!(T_alpha < 2000.0);
        assert!(T_alpha > profile.outlet_temperature());
    }

    #[test]
    fn test_ethane_and_flue_gas() {
        let profile = solve(reference_config(true, true));
        assert_eq!(profile.layout.dim(), 9);
        assert_relative_eq!(profile.methane_conversion(), 0.788885, epsilon = 2e-3);
        assert_relative_eq!(profile.ethane_conversion().unwrap(), 0.273135, epsilon = 2e-3);
        assert_relative_eq!(profile.pressure_drop(), 74.2325, epsilon = 0.5);
        assert_relative_eq!(profile.outlet_temperature(), 1112.07, epsilon = 1.5);

        let ethane = profile.conversion_profile(Species::C2H6).unwrap();
        assert_eq!(ethane.len(), profile.len());
        assert_relative_eq!(ethane[0], 0.0);
    }

    #[test]
    fn test_atoms_conserved_over_profile() {
        for (has_ethane, has_flue_gas) in [(false, false), (true, true)] {
            let mut reactor = SMRreactorIVP::new(reference_config(has_ethane, has_flue_gas));
            reactor.solve().unwrap();
            assert!(reactor.quality.atomic_mass_balance_error.is_empty());
            assert!(reactor.quality.max_atomic_balance_error < 1e-8);
        }
    }

    #[test]
    fn test_outlet_totals_scale_with_tubes() {
        let profile = solve(reference_config(false, false));
        let totals = profile.outlet_totals();
        assert_eq!(totals.len(), 5);
        let outlet = profile.outlet_state().unwrap();
        for ((species, total), per_tube) in totals.iter().zip(&outlet.flows) {
            assert_relative_eq!(*total, per_tube * 200.0, max_relative = 1e-12);
            assert!(*total >= 0.0, "{} outlet {}", species, total);
        }
        // reforming produces hydrogen and consumes steam
        assert!(totals[2].1 > 6.57);
        assert!(totals[1].1 < 383.0);
    }

    #[test]
    fn test_other_integration_methods_agree() {
        let reference = solve(reference_config(false, false)).methane_conversion();

        let mut fixed_step = reference_config(false, false);
        fixed_step.solver.method = IntegrationMethod::RK4 { step: 0.5 };
        let profile = solve(fixed_step);
        assert_relative_eq!(profile.methane_conversion(), reference, epsilon = 2e-3);

        let mut implicit = reference_config(false, false);
        implicit.solver.method = IntegrationMethod::Radau5;
        let profile = solve(implicit);
        assert_relative_eq!(profile.methane_conversion(), reference, epsilon = 5e-3);
    }

    #[test]
    fn test_invalid_configuration_stops_before_integration() {
        let mut config = reference_config(false, false);
        config.inlet.H2 = 0.0;
        let mut reactor = SMRreactorIVP::new(config);
        match reactor.solve() {
            Err(ReactorError::InvalidConfiguration { field, .. }) => assert_eq!(field, "inlet.H2"),
            other => panic!("unexpected result {:?}", other.map(|p| p.len())),
        }
        assert!(reactor.rhs.is_none());
        assert!(reactor.profile.is_none());
        assert!(matches!(
            reactor.save_profile("never_written.json"),
            Err(ReactorError::MissingData(_))
        ));
    }

    #[test]
    fn test_feed_without_steam_or_methane_is_a_configuration_error() {
        let field = |config: ReactorConfig| match simulate(&config) {
            Err(ReactorError::InvalidConfiguration { field, .. }) => field,
            other => panic!("unexpected result {:?}", other.map(|p| p.len())),
        };
        let mut dry = reference_config(false, false);
        dry.inlet.H2O = 0.0;
        assert_eq!(field(dry), "inlet.H2O");
        let mut no_methane = reference_config(false, true);
        no_methane.inlet.CH4 = 0.0;
        assert_eq!(field(no_methane), "inlet.CH4");
    }

    #[test]
    fn test_conversion_of_unfed_species_is_none() {
        let config = reference_config(true, false);
        let layout = StateLayout::from_config(&config);
        // CH4 H2O H2 CO CO2 C2H6 T P, no ethane in the feed
        let inlet = vec![1.0, 3.0, 0.1, 0.0, 0.0, 0.0, 823.15, 2350.0];
        let outlet = vec![0.5, 2.0, 2.1, 0.4, 0.1, 0.0, 1000.0, 2300.0];
        let profile = ReactorProfile::new(layout, 1, vec![0.0, 1.0], vec![inlet, outlet]).unwrap();
        assert_relative_eq!(profile.methane_conversion(), 0.5);
        assert_eq!(profile.ethane_conversion(), None);
        assert_eq!(profile.conversion(Species::CO), None);
        assert_eq!(profile.conversion_profile(Species::C2H6), None);
        assert_relative_eq!(profile.conversion(Species::H2O).unwrap(), 1.0 / 3.0, epsilon = 1e-12);
        let summary = profile.summary_table().to_string();
        assert!(!summary.contains("NaN"));
        assert!(!summary.contains("C2H6"));
    }

    #[test]
    fn test_profile_without_methane_feed_rejected() {
        let layout = StateLayout::from_config(&reference_config(false, false));
        let inlet = vec![0.0, 3.0, 0.1, 0.0, 0.0, 823.15, 2350.0];
        match ReactorProfile::new(layout, 1, vec![0.0], vec![inlet]) {
            Err(ReactorError::InvalidConfiguration { field, .. }) => assert_eq!(field, "inlet.CH4"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_collapsing_pressure_is_reported() {
        // ten tubes carry twenty times the design flow each, the bed cannot pass it
        let mut config = reference_config(false, false);
        config.tubes = 10;
        let err = simulate(&config).unwrap_err();
        assert!(
            matches!(
                err,
                ReactorError::NumericalDegeneracy { .. } | ReactorError::IntegrationFailed(_)
            ),
            "unexpected error {:?}",
            err
        );
    }

    #[test]
    fn test_profile_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        let mut reactor = SMRreactorIVP::new(reference_config(true, false));
        reactor.solve().unwrap();
        reactor.save_profile(&path).unwrap();
        let loaded = ReactorProfile::from_json_file(&path).unwrap();
        let profile = reactor.profile.as_ref().unwrap();
        assert_eq!(loaded.layout, profile.layout);
        assert_eq!(loaded.len(), profile.len());
        assert_relative_eq!(loaded.methane_conversion(), profile.methane_conversion(), epsilon = 1e-12);
    }

    #[test]
    fn test_malformed_profile_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let layout = serde_json::to_value(StateLayout::from_config(&reference_config(false, false))).unwrap();
        let write = |name: &str, W: serde_json::Value, states: serde_json::Value| {
            let path = dir.path().join(name);
            let profile = serde_json::json!({ "layout": layout, "tubes": 200, "W": W, "states": states });
            std::fs::write(&path, profile.to_string()).unwrap();
            path
        };

        let empty = write("empty.json", serde_json::json!([]), serde_json::json!([]));
        assert!(matches!(
            ReactorProfile::from_json_file(&empty),
            Err(ReactorError::IntegrationFailed(_))
        ));

        let row = [1.0, 3.0, 0.1, 0.0, 0.0, 823.15, 2350.0];
        let ragged = write(
            "ragged.json",
            serde_json::json!([0.0, 1.0]),
            serde_json::json!([row, [1.0, 3.0, 0.1]]),
        );
        assert!(matches!(
            ReactorProfile::from_json_file(&ragged),
            Err(ReactorError::DimensionMismatch { expected: 7, found: 3 })
        ));

        let short = write("short.json", serde_json::json!([0.0, 1.0]), serde_json::json!([row]));
        assert!(ReactorProfile::from_json_file(&short).is_err());
    }

    #[test]
    fn test_sweep_finds_tube_count() {
        let sweep = TubeSweep::new(0.9, 100, 20, 300);
        let result = sweep.run(&reference_config(false, false)).unwrap();
        let reached = result.reached.unwrap();
        assert_eq!(reached.tubes, 160);
        assert_relative_eq!(reached.conversion.unwrap(), 0.9375, epsilon = 2e-3);

        let tubes: Vec<u32> = result.history.iter().map(|p| p.tubes).collect();
        assert_eq!(tubes, vec![100, 120, 140, 160]);
        let conversions: Vec<f64> = result.history.iter().map(|p| p.conversion.unwrap()).collect();
        assert_relative_eq!(conversions[0], 0.5963, epsilon = 2e-3);
        for pair in conversions.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        // more tubes means less flow per tube and a smaller pressure drop
        let drops: Vec<f64> = result.history.iter().map(|p| p.pressure_drop.unwrap()).collect();
        for pair in drops.windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn test_sweep_target_not_reached() {
        let sweep = TubeSweep::new(0.99, 100, 50, 150);
        let result = sweep.run(&reference_config(false, false)).unwrap();
        assert!(result.reached.is_none());
        assert_eq!(result.history.len(), 2);
        assert!(result.history.iter().all(|p| p.conversion.unwrap() < 0.99));
    }

    #[test]
    fn test_sweep_rejects_bad_settings() {
        let config = reference_config(false, false);
        let field = |sweep: TubeSweep| match sweep.run(&config) {
            Err(ReactorError::InvalidConfiguration { field, .. }) => field,
            other => panic!("unexpected result {:?}", other),
        };
        assert_eq!(field(TubeSweep::new(1.5, 10, 10, 100)), "sweep.target");
        assert_eq!(field(TubeSweep::new(0.5, 0, 10, 100)), "sweep.start");
        assert_eq!(field(TubeSweep::new(0.5, 10, 0, 100)), "sweep.step");
        assert_eq!(field(TubeSweep::new(0.5, 200, 10, 100)), "sweep.max_tubes");
    }
}
