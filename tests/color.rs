mod tests {
    use aqualight_engine::Rgb;
    use aqualight_engine::color::{
        clamped_rgb, hsv_to_rgb, lerp_rgb, rgb_from_u32, rgb_to_hsv, scale_rgb,
    };

    #[test]
    fn test_clamped_rgb() {
        assert_eq!(clamped_rgb(10, 20, 30), Rgb::new(10, 20, 30));
        assert_eq!(clamped_rgb(-10, 0, 300), Rgb::new(0, 0, 255));
        assert_eq!(clamped_rgb(256, -1, 255), Rgb::new(255, 0, 255));
    }

    #[test]
    fn test_rgb_from_u32() {
        assert_eq!(rgb_from_u32(0xFF8800), Rgb::new(255, 136, 0));
        assert_eq!(rgb_from_u32(0x000000), Rgb::new(0, 0, 0));
        assert_eq!(rgb_from_u32(0xFFFFFF), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_lerp_rgb_endpoints() {
        let red = Rgb::new(255, 0, 0);
        let blue = Rgb::new(0, 0, 255);
        assert_eq!(lerp_rgb(red, blue, 0.0), red);
        assert_eq!(lerp_rgb(red, blue, 1.0), blue);
    }

    #[test]
    fn test_lerp_rgb_midpoint() {
        let red = Rgb::new(255, 0, 0);
        let blue = Rgb::new(0, 0, 255);
        assert_eq!(lerp_rgb(red, blue, 0.5), Rgb::new(128, 0, 128));
    }

    #[test]
    fn test_scale_rgb() {
        let color = Rgb::new(200, 100, 50);
        assert_eq!(scale_rgb(color, 1.0), color);
        assert_eq!(scale_rgb(color, 0.5), Rgb::new(100, 50, 25));
        assert_eq!(scale_rgb(color, 0.0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_hsv_to_rgb_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(60.0, 1.0, 1.0), Rgb::new(255, 255, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Rgb::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(180.0, 1.0, 1.0), Rgb::new(0, 255, 255));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_hsv_to_rgb_saturation_and_value() {
        assert_eq!(hsv_to_rgb(0.0, 0.0, 1.0), Rgb::new(255, 255, 255));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 0.0), Rgb::new(0, 0, 0));
        // Desaturated red sits between red and white.
        let pink = hsv_to_rgb(0.0, 0.5, 1.0);
        assert_eq!(pink.r, 255);
        assert_eq!(pink.g, pink.b);
        assert!(pink.g > 0 && pink.g < 255);
    }

    #[test]
    fn test_hsv_hue_wraps() {
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), hsv_to_rgb(0.0, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(480.0, 1.0, 1.0), hsv_to_rgb(120.0, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(-120.0, 1.0, 1.0), hsv_to_rgb(240.0, 1.0, 1.0));
    }

    #[test]
    fn test_rgb_to_hsv_primaries() {
        let (h, s, v) = rgb_to_hsv(Rgb::new(255, 0, 0));
        assert_eq!((h, s, v), (0.0, 1.0, 1.0));

        let (h, s, v) = rgb_to_hsv(Rgb::new(0, 255, 0));
        assert_eq!((h, s, v), (120.0, 1.0, 1.0));

        let (h, s, v) = rgb_to_hsv(Rgb::new(0, 0, 255));
        assert_eq!((h, s, v), (240.0, 1.0, 1.0));
    }

    #[test]
    fn test_rgb_to_hsv_grays() {
        let (h, s, _) = rgb_to_hsv(Rgb::new(0, 0, 0));
        assert_eq!((h, s), (0.0, 0.0));

        let (h, s, v) = rgb_to_hsv(Rgb::new(128, 128, 128));
        assert_eq!((h, s), (0.0, 0.0));
        assert!((v - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_hsv_round_trip_within_one_unit() {
        let colors = [
            Rgb::new(12, 200, 100),
            Rgb::new(255, 128, 0),
            Rgb::new(80, 0, 160),
            Rgb::new(1, 2, 3),
            Rgb::new(250, 250, 10),
        ];
        for color in colors {
            let (h, s, v) = rgb_to_hsv(color);
            let back = hsv_to_rgb(h, s, v);
            assert!(i16::from(back.r).abs_diff(i16::from(color.r)) <= 1, "{color:?} -> {back:?}");
            assert!(i16::from(back.g).abs_diff(i16::from(color.g)) <= 1, "{color:?} -> {back:?}");
            assert!(i16::from(back.b).abs_diff(i16::from(color.b)) <= 1, "{color:?} -> {back:?}");
        }
    }
}
