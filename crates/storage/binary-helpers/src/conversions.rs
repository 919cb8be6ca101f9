use thiserror::Error;

/// Narrowing conversions used when page offsets and lengths computed as `usize` are written back
/// into fixed-width on-page fields.
pub trait UsizeConversion {
    fn to_u16(self) -> Result<u16, ConversionError>;
    fn to_u32(self) -> Result<u32, ConversionError>;
}

impl UsizeConversion for usize {
    fn to_u16(self) -> Result<u16, ConversionError> {
        u16::try_from(self).map_err(|_| ConversionError::Overflow { value: self })
    }

    fn to_u32(self) -> Result<u32, ConversionError> {
        u32::try_from(self).map_err(|_| ConversionError::Overflow { value: self })
    }
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Value {value} exceeds maximum for target type")]
    Overflow { value: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_u16_within_range() {
        assert_eq!(4095usize.to_u16().unwrap(), 4095);
    }

    #[test]
    fn to_u16_overflow_reports_value() {
        let err = 70_000usize.to_u16().unwrap_err();
        assert!(matches!(err, ConversionError::Overflow { value: 70_000 }));
    }

    #[test]
    fn to_u32_within_range() {
        assert_eq!(70_000usize.to_u32().unwrap(), 70_000);
    }
}
