mod tests {
    use myrtio_vehicle_light::topology::{
        REGION_TURN_LEFT, REGION_TURN_RIGHT, TopologyError,
    };
    use myrtio_vehicle_light::{LightChannel, LightRegion, LightSection, LightsConfig, StripType};

    fn channel(channel: u8, leds: u16) -> LightChannel {
        LightChannel {
            channel,
            leds,
            strip_type: StripType::default(),
        }
    }

    #[test]
    fn test_standard_layout() {
        let lights = LightsConfig::standard().unwrap();

        assert_eq!(lights.pixel_count(), 60);
        assert_eq!(lights.validate(60), Ok(()));
        assert_eq!(lights.channel_offset(0), Some(0));
        assert_eq!(lights.channel_offset(1), Some(20));
        assert_eq!(lights.channel_offset(2), None);

        let right: Vec<usize> = lights
            .region(REGION_TURN_RIGHT)
            .unwrap()
            .pixels(&lights)
            .collect();
        assert_eq!(right, (50..60).collect::<Vec<_>>());
        assert_eq!(lights.region(REGION_TURN_LEFT).unwrap().count(), 10);
        assert_eq!(lights.region("taillight").unwrap().breaks.as_slice(), &[20]);
    }

    #[test]
    fn test_capacity_exceeded() {
        let lights = LightsConfig::standard().unwrap();

        assert_eq!(
            lights.validate(32),
            Err(TopologyError::CapacityExceeded {
                required: 60,
                capacity: 32,
            })
        );
    }

    #[test]
    fn test_invalid_sections() {
        let mut lights = LightsConfig::new();
        lights.add_channel(channel(3, 10)).unwrap();
        lights
            .add_region(
                LightRegion::new("spoiler")
                    .unwrap()
                    .with_section(LightSection::new(3, 5, 12))
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(lights.validate(64), Err(TopologyError::SectionOutOfRange));

        let mut lights = LightsConfig::new();
        lights.add_channel(channel(0, 10)).unwrap();
        lights
            .add_region(
                LightRegion::new("spoiler")
                    .unwrap()
                    .with_section(LightSection::new(1, 0, 5))
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(lights.validate(64), Err(TopologyError::UnknownChannel(1)));
    }

    #[test]
    fn test_region_spanning_channels() {
        let mut lights = LightsConfig::new();
        lights.add_channel(channel(0, 4)).unwrap();
        lights.add_channel(channel(1, 4)).unwrap();
        let region = LightRegion::new("sides")
            .unwrap()
            .with_section(LightSection::new(0, 2, 4))
            .unwrap()
            .with_section(LightSection::new(1, 0, 1))
            .unwrap();

        assert_eq!(region.pixels(&lights).collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(region.count(), 3);
    }

    #[test]
    fn test_table_limits() {
        assert_eq!(
            LightRegion::new("a-very-long-region-name").err(),
            Some(TopologyError::NameTooLong)
        );

        let mut lights = LightsConfig::new();
        for id in 0..4 {
            lights.add_channel(channel(id, 1)).unwrap();
        }
        assert_eq!(
            lights.add_channel(channel(4, 1)),
            Err(TopologyError::TooManyEntries)
        );
    }
}
