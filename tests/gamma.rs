mod tests {
    use aqualight_engine::{GammaTable, Rgb};

    #[test]
    fn test_identity_gamma_preserves_values() {
        let table = GammaTable::new(1.0);
        for value in [0u8, 1, 64, 127, 128, 254, 255] {
            assert_eq!(table.correct(value), value);
        }
    }

    #[test]
    fn test_endpoints_fixed() {
        let table = GammaTable::default();
        assert_eq!(table.correct(0), 0);
        assert_eq!(table.correct(255), 255);
    }

    #[test]
    fn test_monotonic() {
        let table = GammaTable::default();
        let mut previous = 0;
        for value in 0..=255u8 {
            let corrected = table.correct(value);
            assert!(corrected >= previous);
            previous = corrected;
        }
    }

    #[test]
    fn test_darkens_midtones() {
        // Gamma > 1 pulls midtones down toward the perceptual curve.
        let table = GammaTable::new(2.2);
        assert!(table.correct(128) < 128);
        assert!(table.correct(64) < 64);
    }

    #[test]
    fn test_apply_corrects_whole_frame() {
        let table = GammaTable::new(2.2);
        let mut frame = [Rgb::new(0, 128, 255); 2];
        table.apply(&mut frame);
        for led in frame {
            assert_eq!(led.r, 0);
            assert_eq!(led.g, table.correct(128));
            assert!(led.g < 128);
            assert_eq!(led.b, 255);
        }
    }
}
