mod tests {
    use myrtio_vehicle_light::color::{BLACK, scale_color};
    use myrtio_vehicle_light::parameters::LightEffect;
    use myrtio_vehicle_light::renderer::{
        ChannelCommands, Pattern, PatternRenderer, RendererInputs, RunningRenderer, pattern_name,
    };
    use myrtio_vehicle_light::{
        AppConfig, Instant, LightCommand, LightMode, LightsConfig, Preferences, Renderer,
        RendererError, RendererSlot, Rgb,
    };

    const PIXELS: usize = 64;
    // Rear strip starts after the 20 headlight pixels
    const REAR: usize = 20;

    fn config() -> AppConfig {
        AppConfig {
            prefs: Preferences::DEFAULT,
            lights: LightsConfig::standard().unwrap(),
        }
    }

    fn normal(color: Rgb) -> Rgb {
        scale_color(color, Preferences::DEFAULT.normal_brightness)
    }

    #[test]
    fn test_running_defaults() {
        let mut renderer = RunningRenderer::new(&config(), PIXELS).unwrap();
        let inputs = RendererInputs::new();
        let mut pixels = [BLACK; PIXELS];

        renderer.process(Instant::from_millis(0), &inputs, &mut pixels);

        assert_eq!(renderer.commands(), ChannelCommands::DEFAULT);
        assert_eq!(pixels[0], normal(Preferences::DEFAULT.headlight()));
        assert_eq!(pixels[REAR], normal(Preferences::DEFAULT.brake()));
        assert_eq!(pixels[REAR + 39], normal(Preferences::DEFAULT.brake()));
        // Beyond the strip
        assert_eq!(pixels[60], BLACK);
    }

    #[test]
    fn test_running_highlights() {
        let mut renderer = RunningRenderer::new(&config(), PIXELS).unwrap();
        let inputs = RendererInputs::new();
        let mut pixels = [BLACK; PIXELS];

        inputs.brake.send_overwrite(LightCommand::BrakeActive);
        inputs.headlight.send_overwrite(LightCommand::HeadlightBright);
        renderer.process(Instant::from_millis(0), &inputs, &mut pixels);

        assert_eq!(pixels[5], Preferences::DEFAULT.headlight());
        assert_eq!(pixels[REAR + 20], Preferences::DEFAULT.brake());
    }

    #[test]
    fn test_turn_signal_blinks_over_taillight() {
        let mut renderer = RunningRenderer::new(&config(), PIXELS).unwrap();
        let inputs = RendererInputs::new();
        let mut pixels = [BLACK; PIXELS];
        let turn = Preferences::DEFAULT.turn();
        let brake = normal(Preferences::DEFAULT.brake());

        inputs.turn.send_overwrite(LightCommand::TurnLeft);
        renderer.process(Instant::from_millis(0), &inputs, &mut pixels);
        assert_eq!(pixels[REAR + 5], turn);
        assert_eq!(pixels[REAR + 35], brake);

        renderer.process(Instant::from_millis(500), &inputs, &mut pixels);
        assert_eq!(pixels[REAR + 5], brake);

        renderer.process(Instant::from_millis(1_000), &inputs, &mut pixels);
        assert_eq!(pixels[REAR + 5], turn);
    }

    #[test]
    fn test_hazard_layers_are_ordered() {
        let mut renderer = RunningRenderer::new(&config(), PIXELS).unwrap();
        let inputs = RendererInputs::new();
        let mut pixels = [BLACK; PIXELS];

        inputs.turn.send_overwrite(LightCommand::TurnHazard);
        renderer.process(Instant::from_millis(0), &inputs, &mut pixels);

        let layers: Vec<u8> = renderer.layers().iter().map(|p| p.layer).collect();
        assert_eq!(layers, vec![0, 1, 2, 2]);
        assert_eq!(renderer.layers()[2].effect, LightEffect::Blink);
        assert_eq!(pixels[REAR + 5], Preferences::DEFAULT.turn());
        assert_eq!(pixels[REAR + 35], Preferences::DEFAULT.turn());
    }

    #[test]
    fn test_off_and_reset() {
        let mut renderer = RunningRenderer::new(&config(), PIXELS).unwrap();
        let inputs = RendererInputs::new();
        let mut pixels = [BLACK; PIXELS];

        for input in [&inputs.headlight, &inputs.brake, &inputs.turn] {
            input.send_overwrite(LightCommand::Off);
        }
        renderer.process(Instant::from_millis(0), &inputs, &mut pixels);
        assert!(renderer.commands().is_dark());
        assert!(pixels.iter().all(|pixel| *pixel == BLACK));

        for input in [&inputs.headlight, &inputs.brake, &inputs.turn] {
            input.send_overwrite(LightCommand::Reset);
        }
        renderer.process(Instant::from_millis(0), &inputs, &mut pixels);
        assert_eq!(renderer.commands(), ChannelCommands::DEFAULT);
        assert_eq!(pixels[0], normal(Preferences::DEFAULT.headlight()));
    }

    #[test]
    fn test_commands_for_other_channels_are_ignored() {
        let mut commands = ChannelCommands::DEFAULT;
        let inputs = RendererInputs::new();

        inputs.brake.send_overwrite(LightCommand::TurnLeft);
        inputs.headlight.send_overwrite(LightCommand::BrakeActive);
        inputs.turn.send_overwrite(LightCommand::NoCommand);

        assert!(!commands.receive(&inputs));
        assert_eq!(commands, ChannelCommands::DEFAULT);
    }

    #[test]
    fn test_running_requires_regions() {
        let mut config = config();
        config.lights.regions.retain(|region| region.name != "turn-right");

        assert_eq!(
            RunningRenderer::new(&config, PIXELS).err(),
            Some(RendererError::MissingRegion("turn-right"))
        );
    }

    #[test]
    fn test_shutdown_blanks_pixels() {
        let mut renderer = RunningRenderer::new(&config(), PIXELS).unwrap();
        let inputs = RendererInputs::new();
        let mut pixels = [BLACK; PIXELS];
        renderer.process(Instant::from_millis(0), &inputs, &mut pixels);

        renderer.shutdown(&mut pixels);

        assert!(pixels.iter().all(|pixel| *pixel == BLACK));
        assert!(renderer.layers().is_empty());
    }

    #[test]
    fn test_pattern_names() {
        assert_eq!(pattern_name(LightMode::Running), None);
        for mode in LightMode::ALL.into_iter().skip(1) {
            let name = pattern_name(mode).unwrap();
            assert_eq!(Pattern::parse_from_str(name).map(Pattern::as_str), Some(name));
        }
        assert_eq!(Pattern::parse_from_str("fire"), None);
    }

    #[test]
    fn test_unknown_pattern() {
        assert_eq!(
            PatternRenderer::new(LightMode::Rainbow, "fire", &config(), PIXELS).err(),
            Some(RendererError::UnknownPattern)
        );
    }

    #[test]
    fn test_theater_chase() {
        let mut renderer =
            PatternRenderer::new(LightMode::TheaterChase, "theater-chase", &config(), PIXELS)
                .unwrap();
        let inputs = RendererInputs::new();
        let mut pixels = [BLACK; PIXELS];
        let accent = Preferences::DEFAULT.accent();

        renderer.process(Instant::from_millis(0), &inputs, &mut pixels);
        assert_eq!(pixels[0], accent);
        assert_eq!(pixels[1], BLACK);
        assert_eq!(pixels[3], accent);

        renderer.process(Instant::from_millis(100), &inputs, &mut pixels);
        assert_eq!(pixels[0], BLACK);
        assert_eq!(pixels[1], accent);
        assert_eq!(pixels[61], BLACK);
    }

    #[test]
    fn test_pattern_goes_dark_when_all_off() {
        let mut renderer =
            PatternRenderer::new(LightMode::Rainbow, "rainbow", &config(), PIXELS).unwrap();
        let inputs = RendererInputs::new();
        let mut pixels = [BLACK; PIXELS];

        renderer.process(Instant::from_millis(0), &inputs, &mut pixels);
        assert!(pixels[..60].iter().all(|pixel| *pixel != BLACK));

        for input in [&inputs.headlight, &inputs.brake, &inputs.turn] {
            input.send_overwrite(LightCommand::Off);
        }
        renderer.process(Instant::from_millis(50), &inputs, &mut pixels);
        assert!(pixels.iter().all(|pixel| *pixel == BLACK));

        inputs.brake.send_overwrite(LightCommand::Reset);
        renderer.process(Instant::from_millis(100), &inputs, &mut pixels);
        assert!(pixels[..60].iter().any(|pixel| *pixel != BLACK));
    }

    #[test]
    fn test_lightning_flashes_on_first_frame() {
        let mut renderer =
            PatternRenderer::new(LightMode::Lightning, "lightning", &config(), PIXELS).unwrap();
        let inputs = RendererInputs::new();
        let mut pixels = [BLACK; PIXELS];

        renderer.process(Instant::from_millis(1_000), &inputs, &mut pixels);

        assert!(pixels.iter().any(|pixel| *pixel != BLACK));
        assert_eq!(renderer.pattern(), Pattern::Lightning);
    }

    #[test]
    fn test_slot_dispatch() {
        let slot = RendererSlot::build(LightMode::TheaterChaseRainbow, &config(), PIXELS).unwrap();

        assert_eq!(slot.mode(), LightMode::TheaterChaseRainbow);
        assert!(!slot.renders_on_start());
        assert_eq!(slot.commands().mode, LightMode::TheaterChaseRainbow);
        assert_eq!(slot.lights().pixel_count(), 60);
        assert!(
            RendererSlot::build(LightMode::Running, &config(), PIXELS)
                .unwrap()
                .renders_on_start()
        );
    }
}
