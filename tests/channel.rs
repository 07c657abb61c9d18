mod tests {
    use myrtio_vehicle_light::channel::{Channel, Slot, TryReceiveError};

    #[test]
    fn test_send_overwrite_drops_oldest() {
        let channel: Channel<u8, 3> = Channel::new();

        for value in 1..=5 {
            channel.send_overwrite(value);
        }

        assert_eq!(channel.len(), 3);
        assert_eq!(channel.try_receive(), Ok(3));
        assert_eq!(channel.try_receive(), Ok(4));
        assert_eq!(channel.try_receive(), Ok(5));
        assert_eq!(channel.try_receive(), Err(TryReceiveError));
    }

    #[test]
    fn test_slot_keeps_latest() {
        let slot: Slot<u8> = Slot::new();

        assert_eq!(slot.send_overwrite(1), None);
        assert_eq!(slot.send_overwrite(2), Some(1));
        assert_eq!(slot.try_receive(), Ok(2));
        assert!(slot.is_empty());
    }

    #[test]
    fn test_clear() {
        let channel: Channel<u8, 4> = Channel::new();
        channel.send_overwrite(1);
        channel.send_overwrite(2);

        channel.clear();

        assert!(channel.is_empty());
        assert_eq!(channel.try_receive(), Err(TryReceiveError));
    }
}
