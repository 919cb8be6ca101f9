//! Heap File Header
//! ----------------
//!
//! Page 0 of every heap file starts with the file header. The rest of the page is unused.
//! All integers are little-endian.
//!
//! | Field        | Type          | Offset          | Description |
//! |--------------|---------------|-----------------|-------------|
//! | `name_len`   | u16           | [`NAME_LEN`]    | Length of the file name in bytes. |
//! | name         | [u8; 64]      | [`NAME`]        | File name, zero padded. |
//! | `first_page` | u32           | [`FIRST_PAGE`]  | First data page, `NO_PAGE` if none. |
//! | `last_page`  | u32           | [`LAST_PAGE`]   | Last data page, `NO_PAGE` if none. |
//! | `page_cnt`   | u32           | [`PAGE_CNT`]    | Number of data pages in the chain. |
//! | `rec_cnt`    | u32           | [`REC_CNT`]     | Number of live records. |

use binary_helpers::bin_error::BinaryError;
use binary_helpers::le::{read_le, write_le};
use page::NO_PAGE;
use paste::paste;

/// Longest file name the header can store.
pub const MAX_NAME_LEN: usize = 64;

/// Offset of the file name bytes.
pub const NAME: usize = 2;

/// Bytes of page 0 used by the header.
pub const FILE_HEADER_SIZE: usize = REC_CNT + 4;

/// Immutable view of a heap file header.
#[derive(Debug)]
pub struct FileHeaderRef<'a> {
    bytes: &'a [u8],
}

impl<'a> FileHeaderRef<'a> {
    /// Wraps the start of `bytes`, which must hold at least `FILE_HEADER_SIZE` bytes.
    pub fn new(bytes: &'a [u8]) -> Result<Self, BinaryError> {
        let bytes = bytes
            .get(..FILE_HEADER_SIZE)
            .ok_or(BinaryError::BytesSliceSizeMismatch {
                expected: FILE_HEADER_SIZE,
                from_offset: 0,
            })?;
        Ok(Self { bytes })
    }
}

/// Mutable view of a heap file header.
#[derive(Debug)]
pub struct FileHeaderMut<'a> {
    bytes: &'a mut [u8],
}

impl<'a> FileHeaderMut<'a> {
    /// Wraps the start of `bytes`, which must hold at least `FILE_HEADER_SIZE` bytes.
    pub fn new(bytes: &'a mut [u8]) -> Result<Self, BinaryError> {
        let bytes = bytes
            .get_mut(..FILE_HEADER_SIZE)
            .ok_or(BinaryError::BytesSliceSizeMismatch {
                expected: FILE_HEADER_SIZE,
                from_offset: 0,
            })?;
        Ok(Self { bytes })
    }

    /// Formats a fresh header for a file whose chain is the single page `data_page`.
    pub fn initialize(&mut self, name: &str, data_page: u32) -> Result<(), BinaryError> {
        self.bytes.fill(0);
        self.set_name(name)?;
        self.set_first_page(Some(data_page))?;
        self.set_last_page(Some(data_page))?;
        self.set_page_cnt(1)?;
        self.set_rec_cnt(0)
    }

    /// Stores `name`, which must be at most `MAX_NAME_LEN` bytes long.
    pub fn set_name(&mut self, name: &str) -> Result<(), BinaryError> {
        let name = name.as_bytes();
        if name.len() > MAX_NAME_LEN {
            return Err(BinaryError::WriteErrorSliceSizeMismatch {
                src: name.len(),
                target: MAX_NAME_LEN,
            });
        }

        let region = &mut self.bytes[NAME..NAME + MAX_NAME_LEN];
        region.fill(0);
        region[..name.len()].copy_from_slice(name);
        // Fits in u16, checked against MAX_NAME_LEN above.
        self.set_name_len(name.len() as u16)
    }

    pub fn set_first_page(&mut self, page_no: Option<u32>) -> Result<(), BinaryError> {
        self.set_first_page_raw(page_no.unwrap_or(NO_PAGE))
    }

    pub fn set_last_page(&mut self, page_no: Option<u32>) -> Result<(), BinaryError> {
        self.set_last_page_raw(page_no.unwrap_or(NO_PAGE))
    }
}

/// Defines header field constants and getters on both views, setters on the mutable one.
///
/// Pattern: `field_id(identifier): field_type(type) = field_offset(usize)`
macro_rules! impl_file_header_accessors {
    ( $( $field_name:ident : $field_type:ty = $field_offset:expr ; )* ) => {
        paste! {
            $(
                #[doc = concat!("Offset of ", stringify!($field_name), ", type ", stringify!($field_type))]
                pub const [<$field_name:upper>] : usize = $field_offset;

                impl FileHeaderRef<'_> {
                    #[doc = concat!("Getter for field `", stringify!($field_name), "`.")]
                    pub fn [<get_ $field_name>](&self) -> Result<$field_type, BinaryError> {
                        read_le::<$field_type>(self.bytes, $field_offset)
                    }
                }

                impl FileHeaderMut<'_> {
                    #[doc = concat!("Getter for field `", stringify!($field_name), "`.")]
                    pub fn [<get_ $field_name>](&self) -> Result<$field_type, BinaryError> {
                        read_le::<$field_type>(self.bytes, $field_offset)
                    }

                    #[doc = concat!("Setter for field `", stringify!($field_name), "`.")]
                    pub fn [<set_ $field_name>](&mut self, val: $field_type) -> Result<(), BinaryError> {
                        write_le::<$field_type>(self.bytes, $field_offset, val)
                    }
                }
            )*
        }
    };
}

impl_file_header_accessors! {
    name_len : u16 = 0;
    first_page_raw : u32 = NAME + MAX_NAME_LEN;
    last_page_raw : u32 = FIRST_PAGE_RAW + 4;
    page_cnt : u32 = LAST_PAGE_RAW + 4;
    rec_cnt : u32 = PAGE_CNT + 4;
}

/// Offset of `first_page`.
pub const FIRST_PAGE: usize = FIRST_PAGE_RAW;
/// Offset of `last_page`.
pub const LAST_PAGE: usize = LAST_PAGE_RAW;

fn page_or_none(raw: u32) -> Option<u32> {
    (raw != NO_PAGE).then_some(raw)
}

/// Decoded accessors shared by both views.
macro_rules! impl_decoded_getters {
    ($view:ident) => {
        impl $view<'_> {
            /// The stored file name. Invalid UTF-8 is replaced rather than rejected.
            pub fn name(&self) -> Result<String, BinaryError> {
                let len = (self.get_name_len()? as usize).min(MAX_NAME_LEN);
                Ok(String::from_utf8_lossy(&self.bytes[NAME..NAME + len]).into_owned())
            }

            pub fn first_page(&self) -> Result<Option<u32>, BinaryError> {
                Ok(page_or_none(self.get_first_page_raw()?))
            }

            pub fn last_page(&self) -> Result<Option<u32>, BinaryError> {
                Ok(page_or_none(self.get_last_page_raw()?))
            }

            /// Copies every field out of the page.
            pub fn snapshot(&self) -> Result<FileHeaderInfo, BinaryError> {
                Ok(FileHeaderInfo {
                    name: self.name()?,
                    first_page: self.first_page()?,
                    last_page: self.last_page()?,
                    page_cnt: self.get_page_cnt()?,
                    rec_cnt: self.get_rec_cnt()?,
                })
            }
        }
    };
}

impl_decoded_getters!(FileHeaderRef);
impl_decoded_getters!(FileHeaderMut);

/// Owned copy of a heap file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeaderInfo {
    pub name: String,
    pub first_page: Option<u32>,
    pub last_page: Option<u32>,
    pub page_cnt: u32,
    pub rec_cnt: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_offsets_follow_the_name() {
        assert_eq!(FIRST_PAGE, 66);
        assert_eq!(LAST_PAGE, 70);
        assert_eq!(PAGE_CNT, 74);
        assert_eq!(REC_CNT, 78);
        assert_eq!(FILE_HEADER_SIZE, 82);
    }

    #[test]
    fn initialize_writes_a_single_page_chain() {
        let mut bytes = [0xAAu8; 128];

        FileHeaderMut::new(&mut bytes)
            .unwrap()
            .initialize("orders.tbl", 1)
            .unwrap();

        let header = FileHeaderRef::new(&bytes).unwrap();
        assert_eq!(
            header.snapshot().unwrap(),
            FileHeaderInfo {
                name: "orders.tbl".to_string(),
                first_page: Some(1),
                last_page: Some(1),
                page_cnt: 1,
                rec_cnt: 0,
            }
        );
        // Bytes past the header are untouched.
        assert_eq!(bytes[FILE_HEADER_SIZE], 0xAA);
    }

    #[test]
    fn none_pages_are_stored_as_no_page() {
        let mut bytes = [0u8; FILE_HEADER_SIZE];
        let mut header = FileHeaderMut::new(&mut bytes).unwrap();

        header.set_last_page(None).unwrap();

        assert_eq!(header.get_last_page_raw().unwrap(), NO_PAGE);
        assert_eq!(header.last_page().unwrap(), None);
    }

    #[test]
    fn name_longer_than_limit_is_rejected() {
        let mut bytes = [0u8; FILE_HEADER_SIZE];
        let mut header = FileHeaderMut::new(&mut bytes).unwrap();

        let result = header.set_name(&"x".repeat(MAX_NAME_LEN + 1));

        assert!(matches!(
            result,
            Err(BinaryError::WriteErrorSliceSizeMismatch { src: 65, target: 64 })
        ));
    }

    #[test]
    fn short_slice_is_rejected() {
        let bytes = [0u8; FILE_HEADER_SIZE - 1];

        assert!(matches!(
            FileHeaderRef::new(&bytes),
            Err(BinaryError::BytesSliceSizeMismatch {
                expected: FILE_HEADER_SIZE,
                from_offset: 0
            })
        ));
    }
}
