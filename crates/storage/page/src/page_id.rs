use std::fmt;

/// Identifier of an open file, handed out by the file catalog.
pub type FileId = u32;

/// A unique identifier for any page: the owning file plus the page's position within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId {
    /// Unique identifier of the file containing the page.
    pub file_id: FileId,

    /// The specific page number within the file.
    pub page_number: u32,
}

impl PageId {
    pub const fn new(file_id: FileId, page_number: u32) -> Self {
        Self {
            file_id,
            page_number,
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_id, self.page_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_both_parts() {
        let page_id = PageId::new(1, 42);
        assert_eq!(page_id.file_id, 1);
        assert_eq!(page_id.page_number, 42);
    }

    #[test]
    fn display_formats_file_then_page() {
        assert_eq!(PageId::new(123, 456).to_string(), "123:456");
    }
}
