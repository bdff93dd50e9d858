mod tests {
    use std::collections::HashMap;

    use aqualight_engine::gradient::{AnimationMode, AnimationSpec, ColorStop, GradientConfig};
    use aqualight_engine::presets::{
        DEFAULT_PRESET_NAMES, PresetError, PresetStore, default_preset,
    };
    use aqualight_engine::Rgb;

    #[test]
    fn test_all_default_presets_resolve() {
        for name in DEFAULT_PRESET_NAMES {
            let config = default_preset(name).unwrap();
            assert!(config.stops().len() >= 2, "{name}");
            assert!((0.0..=1.0).contains(&config.brightness()), "{name}");
            // Construction sorts the stops.
            for pair in config.stops().windows(2) {
                assert!(pair[0].position <= pair[1].position, "{name}");
            }
        }
    }

    #[test]
    fn test_unknown_preset_is_none() {
        assert!(default_preset("lava").is_none());
        assert!(default_preset("").is_none());
    }

    #[test]
    fn test_animated_presets() {
        let rainbow = default_preset("rainbow").unwrap();
        assert_eq!(
            rainbow.animation().map(AnimationSpec::mode),
            Some(AnimationMode::Rainbow)
        );

        let aurora = default_preset("aurora").unwrap();
        assert_eq!(
            aurora.animation().map(AnimationSpec::mode),
            Some(AnimationMode::Pulse)
        );

        assert!(!default_preset("ocean").unwrap().is_animated());
        assert!(!default_preset("sunset").unwrap().is_animated());
    }

    #[derive(Default)]
    struct MemoryStore {
        entries: HashMap<String, GradientConfig>,
    }

    impl PresetStore for MemoryStore {
        fn load(&self, name: &str) -> Result<GradientConfig, PresetError> {
            self.entries.get(name).cloned().ok_or(PresetError::NotFound)
        }

        fn save(&mut self, name: &str, config: &GradientConfig) -> Result<(), PresetError> {
            self.entries.insert(name.to_owned(), config.clone());
            Ok(())
        }
    }

    #[test]
    fn test_store_round_trip() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load("custom"), Err(PresetError::NotFound));

        let config = GradientConfig::new(
            &[
                ColorStop::new(0.0, Rgb::new(255, 0, 0)),
                ColorStop::new(1.0, Rgb::new(0, 0, 255)),
            ],
            0.6,
        )
        .unwrap();
        store.save("custom", &config).unwrap();
        assert_eq!(store.load("custom"), Ok(config));
    }
}
