//! Buffer management module for storage system.
//!
//! The [`buffer::BufferManager`] caches pages of files served by a `FileManager` in a fixed pool
//! of frames. Callers pin a page, receive a [`pinned::PinnedPage`] handle, and the pin is given
//! back either explicitly through [`pinned::PinnedPage::release`] or when the handle is dropped.

pub mod buffer;
pub mod errors;
mod frame;

/// Exposes `guard`-like structs that will provide the access to the `Page` instances
/// from the buffer via `&Page` and `&mut Page`
pub mod guards;

/// Pin handles returned by the buffer manager.
pub mod pinned;
