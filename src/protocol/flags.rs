//! Flags word
//!
//! The flags word travels in every header. Most bits only configure how the
//! server formats device ids and temperatures; the client passes them through
//! untouched. The `PERSIST` bit negotiates connection reuse: the client always
//! asks for it, the server's echo decides.
//!
//! ```text
//!  31      24 23      16 15       8 7        0
//! ┌──────────┬──────────┬──────────┬──────────┐
//! │ device   │  temp    │          │     P    │   P = 0x04 persistence
//! │ format   │  scale   │          │          │
//! └──────────┴──────────┴──────────┴──────────┘
//! ```

use serde::{Deserialize, Serialize};

/// Bitmask of formatting options plus the persistence bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flags(u32);

impl Flags {
    /// Request/confirm a persistent connection
    pub const PERSIST: u32 = 0x0000_0004;

    /// Flags sent by default (owserver's usual formatting bits)
    pub const DEFAULT: u32 = 0x0000_0103;

    /// Bits selecting the device display format
    pub const DEVICE_FORMAT_MASK: u32 = 0xFF00_0000;

    /// Bits selecting the temperature scale
    pub const TEMPERATURE_MASK: u32 = 0x0003_0000;

    /// Wrap a raw flags word
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw flags word
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True when the persistence bit is set
    pub fn is_persistent(self) -> bool {
        self.0 & Self::PERSIST == Self::PERSIST
    }

    /// Same flags with the persistence bit set
    pub fn with_persist(self) -> Self {
        Self(self.0 | Self::PERSIST)
    }

    /// Same flags with the persistence bit cleared
    pub fn without_persist(self) -> Self {
        Self(self.0 & !Self::PERSIST)
    }

    pub fn device_format(self) -> DeviceFormat {
        DeviceFormat::from_bits(self.0 & Self::DEVICE_FORMAT_MASK)
    }

    pub fn with_device_format(self, format: DeviceFormat) -> Self {
        Self((self.0 & !Self::DEVICE_FORMAT_MASK) | format.bits())
    }

    pub fn temperature_scale(self) -> TemperatureScale {
        TemperatureScale::from_bits(self.0 & Self::TEMPERATURE_MASK)
    }

    pub fn with_temperature_scale(self, scale: TemperatureScale) -> Self {
        Self((self.0 & !Self::TEMPERATURE_MASK) | scale.bits())
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<u32> for Flags {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl std::fmt::Display for Flags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// How the server renders one-wire device ids (family, id, crc)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceFormat {
    /// `10.67C6697351FF`
    FdotI,
    /// `1067C6697351FF`
    FI,
    /// `10.67C6697351FF.8D`
    FdotIdotC,
    /// `10.67C6697351FF8D`
    FdotIC,
    /// `1067C6697351FF.8D`
    FIdotC,
    /// `1067C6697351FF8D`
    FIC,
}

impl DeviceFormat {
    pub fn bits(self) -> u32 {
        match self {
            DeviceFormat::FdotI => 0x0000_0000,
            DeviceFormat::FI => 0x0100_0000,
            DeviceFormat::FdotIdotC => 0x0200_0000,
            DeviceFormat::FdotIC => 0x0300_0000,
            DeviceFormat::FIdotC => 0x0400_0000,
            DeviceFormat::FIC => 0x0500_0000,
        }
    }

    // Unknown codes fall back to the server default
    fn from_bits(bits: u32) -> Self {
        match bits {
            0x0100_0000 => DeviceFormat::FI,
            0x0200_0000 => DeviceFormat::FdotIdotC,
            0x0300_0000 => DeviceFormat::FdotIC,
            0x0400_0000 => DeviceFormat::FIdotC,
            0x0500_0000 => DeviceFormat::FIC,
            _ => DeviceFormat::FdotI,
        }
    }
}

/// Temperature scale used by the server when reporting temperatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
    Rankine,
}

impl TemperatureScale {
    pub fn bits(self) -> u32 {
        match self {
            TemperatureScale::Celsius => 0x0000_0000,
            TemperatureScale::Fahrenheit => 0x0001_0000,
            TemperatureScale::Kelvin => 0x0002_0000,
            TemperatureScale::Rankine => 0x0003_0000,
        }
    }

    fn from_bits(bits: u32) -> Self {
        match bits {
            0x0001_0000 => TemperatureScale::Fahrenheit,
            0x0002_0000 => TemperatureScale::Kelvin,
            0x0003_0000 => TemperatureScale::Rankine,
            _ => TemperatureScale::Celsius,
        }
    }
}
