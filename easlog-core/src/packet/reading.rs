//! Table-driven sparse decoding
//!
//! Each decoded packet type has a field table listing name, byte offset
//! and width. [`decode_reading`] walks the table for the frame's type and
//! collects the values into a [`DecodedReading`].

use heapless::LinearMap;

use super::{Packet, PacketType, RawPacket};

/// Field names used as keys of a [`DecodedReading`]
pub mod field {
    /// Sensor id
    pub const ID: &str = "ID";
    /// Type discriminant
    pub const TYPE: &str = "type";
    /// Raw pressure
    pub const PRESSURE: &str = "uPres";
    /// Raw temperature
    pub const TEMPERATURE: &str = "uTemp";
    /// Raw humidity
    pub const HUMIDITY: &str = "uHumid";
    /// Raw accelerometer X
    pub const ACCEL_X: &str = "uAccX";
    /// Raw accelerometer Y
    pub const ACCEL_Y: &str = "uAccY";
    /// Raw accelerometer Z
    pub const ACCEL_Z: &str = "uAccZ";
    /// Raw gyroscope X
    pub const GYRO_X: &str = "uGyroX";
    /// Raw gyroscope Y
    pub const GYRO_Y: &str = "uGyroY";
    /// Raw gyroscope Z
    pub const GYRO_Z: &str = "uGyroZ";
}

/// Most fields any type carries (IMU: id, type, 3 accel, 3 gyro, temp)
const MAX_FIELDS: usize = 9;

#[derive(Clone, Copy)]
enum Width {
    U8,
    U16,
    I16,
    U32,
}

#[derive(Clone, Copy)]
struct FieldSpec {
    name: &'static str,
    offset: usize,
    width: Width,
}

impl FieldSpec {
    const fn new(name: &'static str, offset: usize, width: Width) -> Self {
        Self { name, offset, width }
    }

    fn read(&self, frame: &RawPacket<'_>) -> i64 {
        match self.width {
            Width::U8 => i64::from(frame.u8_at(self.offset)),
            Width::U16 => i64::from(frame.u16_at(self.offset)),
            Width::I16 => i64::from(frame.i16_at(self.offset)),
            Width::U32 => i64::from(frame.u32_at(self.offset)),
        }
    }
}

const ACCELEROMETER: &[FieldSpec] = &[
    FieldSpec::new(field::ID, 0, Width::U32),
    FieldSpec::new(field::ACCEL_X, 8, Width::I16),
    FieldSpec::new(field::ACCEL_Y, 10, Width::I16),
    FieldSpec::new(field::ACCEL_Z, 12, Width::I16),
];

const BARO_TEMP: &[FieldSpec] = &[
    FieldSpec::new(field::ID, 0, Width::U8),
    FieldSpec::new(field::PRESSURE, 8, Width::U32),
    FieldSpec::new(field::TEMPERATURE, 12, Width::U16),
];

const IMU: &[FieldSpec] = &[
    FieldSpec::new(field::ID, 0, Width::U32),
    FieldSpec::new(field::ACCEL_X, 8, Width::I16),
    FieldSpec::new(field::ACCEL_Y, 10, Width::I16),
    FieldSpec::new(field::ACCEL_Z, 12, Width::I16),
    FieldSpec::new(field::GYRO_X, 14, Width::I16),
    FieldSpec::new(field::GYRO_Y, 16, Width::I16),
    FieldSpec::new(field::GYRO_Z, 18, Width::I16),
    FieldSpec::new(field::TEMPERATURE, 20, Width::I16),
];

const PRES_TEMP_HUMID: &[FieldSpec] = &[
    FieldSpec::new(field::ID, 0, Width::U32),
    FieldSpec::new(field::PRESSURE, 8, Width::U32),
    FieldSpec::new(field::TEMPERATURE, 12, Width::U32),
    FieldSpec::new(field::HUMIDITY, 16, Width::U16),
];

const RELATIVE_PRESSURE: &[FieldSpec] = &[FieldSpec::new(field::ID, 0, Width::U8)];

fn layout(packet_type: PacketType) -> Option<&'static [FieldSpec]> {
    match packet_type {
        PacketType::Accelerometer => Some(ACCELEROMETER),
        PacketType::BaroTemp => Some(BARO_TEMP),
        PacketType::Imu => Some(IMU),
        PacketType::PresTempHumid => Some(PRES_TEMP_HUMID),
        PacketType::RelativePressure => Some(RELATIVE_PRESSURE),
        _ => None,
    }
}

/// Sparse view of one decoded frame
///
/// Maps field names (see [`field`]) to integer values. Only the fields of
/// the frame's type are present; `"type"` is always present.
#[derive(Debug, Clone, Default)]
pub struct DecodedReading {
    fields: LinearMap<&'static str, i64, MAX_FIELDS>,
}

impl DecodedReading {
    fn set(&mut self, name: &'static str, value: i64) {
        // tables never exceed MAX_FIELDS
        let inserted = self.fields.insert(name, value);
        debug_assert!(inserted.is_ok(), "field table overflow at {}", name);
    }

    /// Value of a field, if this type carries it
    pub fn get(&self, name: &str) -> Option<i64> {
        self.fields.get(name).copied()
    }

    /// Whether the field is present
    pub fn contains(&self, name: &str) -> bool {
        self.fields.get(name).is_some()
    }

    /// Number of fields present
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false` for a reading produced by the decoder
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Type of the frame
    pub fn packet_type(&self) -> Option<PacketType> {
        self.get(field::TYPE)
            .and_then(|code| u32::try_from(code).ok())
            .map(PacketType::from_code)
    }

    /// Field names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    /// Name/value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, i64)> + '_ {
        self.fields.iter().map(|(name, value)| (*name, *value))
    }
}

impl PartialEq for DecodedReading {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(name, value)| other.get(name) == Some(value))
    }
}

impl Eq for DecodedReading {}

#[cfg(feature = "serde")]
impl serde::Serialize for DecodedReading {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

/// Decode a frame through its field table.
///
/// Returns `None` for types without a table.
pub fn decode_reading(frame: &RawPacket<'_>) -> Option<DecodedReading> {
    let packet_type = frame.packet_type();
    let table = layout(packet_type)?;

    let mut reading = DecodedReading::default();
    for spec in table {
        reading.set(spec.name, spec.read(frame));
        if spec.name == field::ID {
            reading.set(field::TYPE, i64::from(packet_type.code()));
        }
    }

    Some(reading)
}

impl Packet {
    /// Sparse view of this packet
    pub fn to_reading(&self) -> DecodedReading {
        let mut reading = DecodedReading::default();
        reading.set(field::ID, i64::from(self.sensor_id()));
        reading.set(field::TYPE, i64::from(self.packet_type().code()));

        match *self {
            Packet::Accelerometer { x, y, z, .. } => {
                reading.set(field::ACCEL_X, i64::from(x));
                reading.set(field::ACCEL_Y, i64::from(y));
                reading.set(field::ACCEL_Z, i64::from(z));
            }
            Packet::BaroTemp { pressure, temperature, .. } => {
                reading.set(field::PRESSURE, i64::from(pressure));
                reading.set(field::TEMPERATURE, i64::from(temperature));
            }
            Packet::Imu { accel, gyro, temperature, .. } => {
                reading.set(field::ACCEL_X, i64::from(accel[0]));
                reading.set(field::ACCEL_Y, i64::from(accel[1]));
                reading.set(field::ACCEL_Z, i64::from(accel[2]));
                reading.set(field::GYRO_X, i64::from(gyro[0]));
                reading.set(field::GYRO_Y, i64::from(gyro[1]));
                reading.set(field::GYRO_Z, i64::from(gyro[2]));
                reading.set(field::TEMPERATURE, i64::from(temperature));
            }
            Packet::PresTempHumid { pressure, temperature, humidity, .. } => {
                reading.set(field::PRESSURE, i64::from(pressure));
                reading.set(field::TEMPERATURE, i64::from(temperature));
                reading.set(field::HUMIDITY, i64::from(humidity));
            }
            Packet::RelativePressure { .. } => {}
        }

        reading
    }
}
