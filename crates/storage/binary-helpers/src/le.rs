use crate::bin_error::BinaryError;

/// Fixed-width values that can be stored in little-endian byte order.
///
/// Implemented for the unsigned integers used by page and file headers, and for the `i32`/`f32`
/// attribute types that scan predicates compare.
pub trait LittleEndian: Sized + Copy {
    const SIZE: usize;

    /// Converts `bytes` to the target type. `bytes` must be exactly `Self::SIZE` long.
    fn from_le(bytes: &[u8]) -> Result<Self, BinaryError>;

    /// Writes `self` into `target`, which must be exactly `Self::SIZE` long.
    fn to_le(self, target: &mut [u8]) -> Result<(), BinaryError>;
}

macro_rules! impl_little_endian {
    ($($t:ty),* $(,)?) => {
        $(
            impl LittleEndian for $t {
                const SIZE: usize = std::mem::size_of::<$t>();

                fn from_le(bytes: &[u8]) -> Result<Self, BinaryError> {
                    if bytes.len() != Self::SIZE {
                        // The slice carries no position info, so offset 0 is reported.
                        return Err(BinaryError::BytesSliceSizeMismatch {
                            expected: Self::SIZE,
                            from_offset: 0,
                        });
                    }

                    Ok(<$t>::from_le_bytes(bytes.try_into()?))
                }

                fn to_le(self, target: &mut [u8]) -> Result<(), BinaryError> {
                    let self_bytes = self.to_le_bytes();

                    if self_bytes.len() != target.len() {
                        return Err(BinaryError::WriteErrorSliceSizeMismatch {
                            src: self_bytes.len(),
                            target: target.len(),
                        });
                    }

                    target.copy_from_slice(&self_bytes);
                    Ok(())
                }
            }
        )*
    };
}

impl_little_endian!(u16, u32, u64, i32, f32);

/// Reads a little-endian value from `bytes`, starting at `start_offset`.
pub fn read_le<T: LittleEndian>(bytes: &[u8], start_offset: usize) -> Result<T, BinaryError> {
    let Some(slice) = bytes.get(start_offset..start_offset + T::SIZE) else {
        return Err(BinaryError::BytesSliceSizeMismatch {
            expected: T::SIZE,
            from_offset: start_offset,
        });
    };

    T::from_le(slice)
}

/// Converts `value` to bytes and writes them at `start_offset` in `bytes`.
pub fn write_le<T: LittleEndian>(
    bytes: &mut [u8],
    start_offset: usize,
    value: T,
) -> Result<(), BinaryError> {
    let Some(slice) = bytes.get_mut(start_offset..start_offset + T::SIZE) else {
        return Err(BinaryError::BytesSliceSizeMismatch {
            expected: T::SIZE,
            from_offset: start_offset,
        });
    };

    value.to_le(slice)
}


#[cfg(test)]
mod write_le_tests {
    use super::*;

    #[test]
    fn write_u32_then_read_back_bytes() {
        let mut bytes = [0u8; 8];
        write_le::<u32>(&mut bytes, 2, 0xDEADBEEF).unwrap();
        assert_eq!(&bytes[2..6], &[0xEF, 0xBE, 0xAD, 0xDE]);
    }

    #[test]
    fn write_past_end_returns_size_mismatch() {
        let mut bytes = [0u8; 3];
        let result = write_le::<u16>(&mut bytes, 2, 7);
        assert!(matches!(
            result,
            Err(BinaryError::BytesSliceSizeMismatch {
                expected: 2,
                from_offset: 2
            })
        ));
    }
}
