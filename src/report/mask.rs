//! Field selection mask for the report.
//!
//! Callers configure the report by writing a little-endian configuration
//! word; its low six bits map one-to-one onto the report fields.

/// The six report fields, in both bit order and display order.
///
/// The discriminant is the field's bit index in the configuration word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Release = 0,
    CpuModel = 1,
    CpuCount = 2,
    Memory = 3,
    Uptime = 4,
    ProcessCount = 5,
}

impl Field {
    /// Number of report fields.
    pub const COUNT: usize = 6;

    /// Fields in the fixed order they appear in a rendered report.
    /// Not user-reconfigurable.
    pub const ORDER: [Field; Self::COUNT] = [
        Field::Release,
        Field::CpuModel,
        Field::CpuCount,
        Field::Memory,
        Field::Uptime,
        Field::ProcessCount,
    ];

    /// The field's bit in the configuration word.
    pub fn bit(self) -> u32 {
        1 << (self as u32)
    }

    /// Label shown in front of the field's value.
    pub fn label(self) -> &'static str {
        match self {
            Field::Release => "Kernel:",
            Field::CpuModel => "CPU:",
            Field::CpuCount => "CPUs:",
            Field::Memory => "Mem:",
            Field::Uptime => "Uptime:",
            Field::ProcessCount => "Procs:",
        }
    }
}

/// Exact number of bytes a configuration word occupies on the wire.
pub const CONFIG_WORD_LEN: usize = 4;

/// Write payload too short to hold a configuration word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedConfig {
    /// Bytes actually supplied.
    pub got: usize,
}

impl std::fmt::Display for MalformedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "config word needs {} bytes, got {}",
            CONFIG_WORD_LEN, self.got
        )
    }
}

impl std::error::Error for MalformedConfig {}

/// Which fields are included in a rendered report.
///
/// Defaults to all fields set. Stored and replaced as a whole; there are no
/// merge semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportMask {
    bits: u8,
}

impl ReportMask {
    const FIELD_BITS: u8 = (1 << Field::COUNT) - 1;

    /// Mask with every field enabled.
    pub fn all() -> Self {
        Self {
            bits: Self::FIELD_BITS,
        }
    }

    /// Decodes a configuration word. Only the low six bits are meaningful;
    /// higher bits are ignored, not rejected.
    pub fn decode(word: u32) -> Self {
        Self {
            bits: (word & Self::FIELD_BITS as u32) as u8,
        }
    }

    /// Decodes a wire payload: the first [`CONFIG_WORD_LEN`] bytes as a
    /// little-endian word. Shorter payloads are rejected; extra bytes are
    /// ignored.
    pub fn from_config_bytes(bytes: &[u8]) -> Result<Self, MalformedConfig> {
        let Some(word) = bytes.first_chunk::<CONFIG_WORD_LEN>() else {
            return Err(MalformedConfig { got: bytes.len() });
        };
        Ok(Self::decode(u32::from_le_bytes(*word)))
    }

    /// Whether the given field is included.
    pub fn is_set(self, field: Field) -> bool {
        self.bits & field.bit() as u8 != 0
    }

    /// Raw low-six-bits value, for storage in an atomic word.
    pub fn bits(self) -> u8 {
        self.bits
    }

    /// Number of enabled fields.
    pub fn enabled_count(self) -> usize {
        self.bits.count_ones() as usize
    }
}

impl Default for ReportMask {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_fields() {
        let mask = ReportMask::default();
        for field in Field::ORDER {
            assert!(mask.is_set(field));
        }
        assert_eq!(mask.bits(), 0b11_1111);
    }

    #[test]
    fn test_decode_round_trip() {
        for word in 0u32..=63 {
            let mask = ReportMask::decode(word);
            for field in Field::ORDER {
                let expected = (word >> (field as u32)) & 1 == 1;
                assert_eq!(mask.is_set(field), expected, "word={} {:?}", word, field);
            }
        }
    }

    #[test]
    fn test_decode_ignores_high_bits() {
        assert_eq!(ReportMask::decode(0xffff_ffc0), ReportMask::decode(0));
        assert_eq!(ReportMask::decode(0x100 | 8), ReportMask::decode(8));
    }

    #[test]
    fn test_memory_bit_is_eight() {
        let mask = ReportMask::decode(8);
        assert!(mask.is_set(Field::Memory));
        assert_eq!(mask.enabled_count(), 1);
    }

    #[test]
    fn test_from_config_bytes() {
        let mask = ReportMask::from_config_bytes(&42u32.to_le_bytes()).unwrap();
        assert_eq!(mask, ReportMask::decode(42));

        // Extra trailing bytes are ignored.
        let mask = ReportMask::from_config_bytes(&[0x3f, 0, 0, 0, 0xaa]).unwrap();
        assert_eq!(mask, ReportMask::all());
    }

    #[test]
    fn test_from_config_bytes_short_payload() {
        assert_eq!(
            ReportMask::from_config_bytes(&[1, 2]),
            Err(MalformedConfig { got: 2 })
        );
        assert_eq!(
            ReportMask::from_config_bytes(&[]),
            Err(MalformedConfig { got: 0 })
        );
    }
}
