use page::page::Page;
use std::ops::{Deref, DerefMut};
use std::sync::{RwLockReadGuard, RwLockWriteGuard};

/// Provides read access to a `Page` instance stored in one of the buffer's frames.
/// Shared latch, allowing concurrent reads.
/// Free as soon as possible.
#[derive(Debug)]
pub struct PageReadGuard<'a> {
    /// The underlying `RwLockReadGuard` which will be dereferenced to `&Page`
    pub(crate) guard: RwLockReadGuard<'a, Page>,
}

impl Deref for PageReadGuard<'_> {
    type Target = Page;
    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Exclusive latch on a buffered `Page`.
/// Holding it blocks every other reader and writer of the page, so keep it short.
#[derive(Debug)]
pub struct PageWriteGuard<'a> {
    pub(crate) guard: RwLockWriteGuard<'a, Page>,
}

impl Deref for PageWriteGuard<'_> {
    type Target = Page;
    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl DerefMut for PageWriteGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}
