mod tests {
    use myrtio_vehicle_light::color::{BLACK, Rgb, rgb_from_u32, scale_color, wheel};

    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn test_rgb_from_u32() {
        assert_eq!(rgb_from_u32(0x00FF_8C00), Rgb { r: 255, g: 140, b: 0 });
        assert_eq!(rgb_from_u32(0), BLACK);
        // Upper byte is ignored
        assert_eq!(rgb_from_u32(0xAAFF_FFFF), WHITE);
    }

    #[test]
    fn test_scale_color() {
        assert_eq!(scale_color(WHITE, 255), WHITE);
        assert_eq!(scale_color(WHITE, 0), Rgb { r: 0, g: 0, b: 0 });
        assert_eq!(
            scale_color(WHITE, 127),
            Rgb {
                r: 127,
                g: 127,
                b: 127
            }
        );
    }

    #[test]
    fn test_wheel_is_saturated() {
        for hue in [0u8, 64, 128, 192] {
            let color = wheel(hue);
            assert_ne!(color, BLACK);
            assert!(color.r.min(color.g).min(color.b) < 16);
        }
    }
}
