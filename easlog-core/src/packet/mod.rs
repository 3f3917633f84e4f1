//! EAS Data Packets
//!
//! ## Frame Format
//!
//! The data block of a log is a flat run of 24-byte frames. Every frame
//! starts with the same 8 bytes:
//!
//! ```text
//! 0        4        8                         24
//! ├────────┼────────┼──────────────────────────┤
//! │ id     │ type   │ payload                   │
//! │ u32 LE │ u32 LE │ 16 bytes, per-type layout │
//! ```
//!
//! Some sensor types only fill the low byte of the id word, so for those
//! the id is read as a single byte.
//!
//! ## Type Table
//!
//! | code | type             | decoded |
//! |------|------------------|---------|
//! | 0x00 | undefined        | no      |
//! | 0x01 | timestamp        | no      |
//! | 0x02 | accelerometer    | yes     |
//! | 0x03 | barometer + temp | yes     |
//! | 0x04 | gyroscope        | no      |
//! | 0x05 | strain gauge     | no      |
//! | 0x06 | clock            | no      |
//! | 0x07 | MPU6050 IMU      | yes     |
//! | 0x08 | ADXL345          | no      |
//! | 0x09 | BMP180           | no      |
//! | 0x0a | BME280 P/T/H     | yes     |
//! | 0x0b | HSC relative pressure | id only |
//! | 0x0c | dual clock       | no      |
//! | 0x0d | reserved         | no      |
//!
//! Frames of a type marked "no", or of a code outside the table, produce
//! no output. A trailing remainder shorter than one frame is dropped.
//! Neither case is an error: the logger pads and truncates freely.
//!
//! ## Two Views
//!
//! - [`Packet`]: typed sum type, decoded by hand-slicing the frame.
//! - [`DecodedReading`]: sparse name → integer map, decoded from a
//!   field table. Useful for generic reporting. It always equals
//!   [`Packet::to_reading`] for the same frame.

mod reading;

pub use reading::{decode_reading, field, DecodedReading};

use core::slice::ChunksExact;

use crate::constants::layout::{FRAME_LEN, FRAME_TYPE_OFFSET};

/// Packet type discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketType {
    /// 0x00, written when the firmware failed to fill in a type
    Undefined,
    /// 0x01
    Timestamp,
    /// 0x02
    Accelerometer,
    /// 0x03, BMP180-style barometer with temperature
    BaroTemp,
    /// 0x04, unused by current firmware
    Gyro,
    /// 0x05, unused by current firmware
    StrainGauge,
    /// 0x06
    Clock,
    /// 0x07, MPU6050 accelerometer + gyroscope
    Imu,
    /// 0x08, unused by current firmware
    Adxl345,
    /// 0x09, unused by current firmware
    Bmp180,
    /// 0x0a, BME280 pressure, temperature and humidity
    PresTempHumid,
    /// 0x0b, HSC relative pressure (pitot)
    RelativePressure,
    /// 0x0c
    DualClock,
    /// 0x0d
    Reserved,
    /// Anything outside the table
    Unknown(u32),
}

impl PacketType {
    /// Map a discriminant to its type
    pub const fn from_code(code: u32) -> Self {
        match code {
            0x00 => Self::Undefined,
            0x01 => Self::Timestamp,
            0x02 => Self::Accelerometer,
            0x03 => Self::BaroTemp,
            0x04 => Self::Gyro,
            0x05 => Self::StrainGauge,
            0x06 => Self::Clock,
            0x07 => Self::Imu,
            0x08 => Self::Adxl345,
            0x09 => Self::Bmp180,
            0x0a => Self::PresTempHumid,
            0x0b => Self::RelativePressure,
            0x0c => Self::DualClock,
            0x0d => Self::Reserved,
            other => Self::Unknown(other),
        }
    }

    /// Discriminant as written in the frame
    pub const fn code(&self) -> u32 {
        match self {
            Self::Undefined => 0x00,
            Self::Timestamp => 0x01,
            Self::Accelerometer => 0x02,
            Self::BaroTemp => 0x03,
            Self::Gyro => 0x04,
            Self::StrainGauge => 0x05,
            Self::Clock => 0x06,
            Self::Imu => 0x07,
            Self::Adxl345 => 0x08,
            Self::Bmp180 => 0x09,
            Self::PresTempHumid => 0x0a,
            Self::RelativePressure => 0x0b,
            Self::DualClock => 0x0c,
            Self::Reserved => 0x0d,
            Self::Unknown(code) => *code,
        }
    }

    /// Whether frames of this type produce a decoded packet
    pub const fn is_decoded(&self) -> bool {
        matches!(
            self,
            Self::Accelerometer
                | Self::BaroTemp
                | Self::Imu
                | Self::PresTempHumid
                | Self::RelativePressure
        )
    }

    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Timestamp => "timestamp",
            Self::Accelerometer => "accelerometer",
            Self::BaroTemp => "baro_temp",
            Self::Gyro => "gyro",
            Self::StrainGauge => "strain_gauge",
            Self::Clock => "clock",
            Self::Imu => "imu",
            Self::Adxl345 => "adxl345",
            Self::Bmp180 => "bmp180",
            Self::PresTempHumid => "pres_temp_humid",
            Self::RelativePressure => "relative_pressure",
            Self::DualClock => "dual_clock",
            Self::Reserved => "reserved",
            Self::Unknown(_) => "unknown",
        }
    }
}

/// Decoded packet
///
/// Only the types the decoder understands have a variant. Raw values are
/// kept as the sensor reported them; compensation happens elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Packet {
    /// 0x02
    Accelerometer {
        /// Sensor id
        id: u32,
        /// Raw X axis
        x: i16,
        /// Raw Y axis
        y: i16,
        /// Raw Z axis
        z: i16,
    },
    /// 0x03
    BaroTemp {
        /// Sensor id (low byte only)
        id: u8,
        /// Raw pressure
        pressure: u32,
        /// Raw temperature
        temperature: u16,
    },
    /// 0x07
    Imu {
        /// Sensor id
        id: u32,
        /// Raw accelerometer X/Y/Z
        accel: [i16; 3],
        /// Raw gyroscope X/Y/Z
        gyro: [i16; 3],
        /// Raw die temperature
        temperature: i16,
    },
    /// 0x0a, the BME280 sample fed to compensation
    PresTempHumid {
        /// Sensor id, matches the calibration section in the header
        id: u32,
        /// Raw pressure count
        pressure: u32,
        /// Raw temperature count
        temperature: u32,
        /// Raw humidity count
        humidity: u16,
    },
    /// 0x0b, partial decode: the status and pressure bit layout of the
    /// HSC payload has not been pinned down, so only the id is read.
    RelativePressure {
        /// Sensor id (low byte only)
        id: u8,
    },
}

impl Packet {
    /// Type of the frame this packet came from
    pub const fn packet_type(&self) -> PacketType {
        match self {
            Self::Accelerometer { .. } => PacketType::Accelerometer,
            Self::BaroTemp { .. } => PacketType::BaroTemp,
            Self::Imu { .. } => PacketType::Imu,
            Self::PresTempHumid { .. } => PacketType::PresTempHumid,
            Self::RelativePressure { .. } => PacketType::RelativePressure,
        }
    }

    /// Sensor id, widened to `u32`
    pub fn sensor_id(&self) -> u32 {
        match *self {
            Self::Accelerometer { id, .. }
            | Self::Imu { id, .. }
            | Self::PresTempHumid { id, .. } => id,
            Self::BaroTemp { id, .. } | Self::RelativePressure { id } => u32::from(id),
        }
    }
}

/// One 24-byte frame borrowed from the data block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPacket<'a> {
    bytes: &'a [u8; FRAME_LEN],
}

impl<'a> RawPacket<'a> {
    /// Wrap a frame
    pub const fn new(bytes: &'a [u8; FRAME_LEN]) -> Self {
        Self { bytes }
    }

    /// Wrap the first 24 bytes of `bytes`, if there are that many
    pub fn from_slice(bytes: &'a [u8]) -> Option<Self> {
        bytes
            .get(..FRAME_LEN)
            .and_then(|frame| frame.try_into().ok())
            .map(Self::new)
    }

    /// Underlying bytes
    pub const fn as_bytes(&self) -> &'a [u8; FRAME_LEN] {
        self.bytes
    }

    /// Type discriminant at offset 4
    pub fn type_code(&self) -> u32 {
        self.u32_at(FRAME_TYPE_OFFSET)
    }

    /// Decoded type discriminant
    pub fn packet_type(&self) -> PacketType {
        PacketType::from_code(self.type_code())
    }

    pub(crate) fn u8_at(&self, offset: usize) -> u8 {
        self.bytes[offset]
    }

    pub(crate) fn u16_at(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }

    pub(crate) fn i16_at(&self, offset: usize) -> i16 {
        i16::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }

    pub(crate) fn u32_at(&self, offset: usize) -> u32 {
        u32::from_le_bytes([
            self.bytes[offset],
            self.bytes[offset + 1],
            self.bytes[offset + 2],
            self.bytes[offset + 3],
        ])
    }

    /// Decode by slicing the frame per type.
    ///
    /// Returns `None` for skipped and unknown types.
    pub fn decode(&self) -> Option<Packet> {
        let packet = match self.packet_type() {
            PacketType::Accelerometer => Packet::Accelerometer {
                id: self.u32_at(0),
                x: self.i16_at(8),
                y: self.i16_at(10),
                z: self.i16_at(12),
            },
            PacketType::BaroTemp => Packet::BaroTemp {
                id: self.u8_at(0),
                pressure: self.u32_at(8),
                temperature: self.u16_at(12),
            },
            PacketType::Imu => Packet::Imu {
                id: self.u32_at(0),
                accel: [self.i16_at(8), self.i16_at(10), self.i16_at(12)],
                gyro: [self.i16_at(14), self.i16_at(16), self.i16_at(18)],
                temperature: self.i16_at(20),
            },
            PacketType::PresTempHumid => Packet::PresTempHumid {
                id: self.u32_at(0),
                pressure: self.u32_at(8),
                temperature: self.u32_at(12),
                humidity: self.u16_at(16),
            },
            PacketType::RelativePressure => Packet::RelativePressure {
                id: self.u8_at(0),
            },
            _skipped => {
                log_trace!("Skipping {} frame (type {:#04x})", _skipped.name(), _skipped.code());
                return None;
            }
        };

        Some(packet)
    }
}

/// Iterator over the whole frames of a data block
///
/// Created by [`split_sensor_data`]. The trailing partial frame, if any,
/// is available from [`remainder`](Frames::remainder).
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    chunks: ChunksExact<'a, u8>,
}

impl<'a> Frames<'a> {
    /// Bytes left over after the last whole frame
    pub fn remainder(&self) -> &'a [u8] {
        self.chunks.remainder()
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = RawPacket<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next().and_then(RawPacket::from_slice)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for Frames<'_> {}

/// Split a data block into 24-byte frames.
///
/// Yields exactly `data.len() / 24` frames. A shorter tail is dropped.
pub fn split_sensor_data(data: &[u8]) -> Frames<'_> {
    Frames {
        chunks: data.chunks_exact(FRAME_LEN),
    }
}

/// Decode every frame of a data block, skipping types without a layout.
pub fn decode_packets(data: &[u8]) -> impl Iterator<Item = Packet> + '_ {
    split_sensor_data(data).filter_map(|frame| frame.decode())
}

/// Decode every frame of a data block into its field map, skipping types
/// without a layout.
pub fn decode_readings(data: &[u8]) -> impl Iterator<Item = DecodedReading> + '_ {
    split_sensor_data(data).filter_map(|frame| decode_reading(&frame))
}
