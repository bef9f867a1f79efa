//! Flags Tests

use ownet::{DeviceFormat, Flags, TemperatureScale};

#[test]
fn test_default_flags() {
    let flags = Flags::default();

    assert_eq!(flags.bits(), 0x103);
    assert!(!flags.is_persistent());
    assert_eq!(flags.device_format(), DeviceFormat::FdotI);
    assert_eq!(flags.temperature_scale(), TemperatureScale::Celsius);
}

#[test]
fn test_persist_bit() {
    let flags = Flags::default().with_persist();

    assert_eq!(flags.bits(), 0x107);
    assert!(flags.is_persistent());
    assert_eq!(flags.without_persist(), Flags::default());
    // Setting it twice changes nothing
    assert_eq!(flags.with_persist(), flags);
}

#[test]
fn test_temperature_scale_preserves_other_bits() {
    let flags = Flags::default()
        .with_persist()
        .with_temperature_scale(TemperatureScale::Fahrenheit);

    assert_eq!(flags.bits(), 0x0001_0107);
    assert_eq!(flags.temperature_scale(), TemperatureScale::Fahrenheit);

    let flags = flags.with_temperature_scale(TemperatureScale::Rankine);
    assert_eq!(flags.bits(), 0x0003_0107);

    let flags = flags.with_temperature_scale(TemperatureScale::Celsius);
    assert_eq!(flags.bits(), 0x0000_0107);
}

#[test]
fn test_device_format_bits() {
    let cases = [
        (DeviceFormat::FdotI, 0x0000_0000),
        (DeviceFormat::FI, 0x0100_0000),
        (DeviceFormat::FdotIdotC, 0x0200_0000),
        (DeviceFormat::FdotIC, 0x0300_0000),
        (DeviceFormat::FIdotC, 0x0400_0000),
        (DeviceFormat::FIC, 0x0500_0000),
    ];

    for (format, bits) in cases {
        let flags = Flags::default()
            .with_temperature_scale(TemperatureScale::Kelvin)
            .with_device_format(format);

        assert_eq!(flags.bits(), bits | 0x0002_0103);
        assert_eq!(flags.device_format(), format);
        assert_eq!(flags.temperature_scale(), TemperatureScale::Kelvin);
    }
}

#[test]
fn test_display_is_hex() {
    assert_eq!(Flags::from_bits(0x107).to_string(), "0x00000107");
}
