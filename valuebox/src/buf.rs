//! Buffer ownership for variable length values.
//!
//! A [`Buf`] is a reference counted byte buffer with an explicit length. Cloning one through
//! [`Buf::add_reference`] shares the storage, and the storage lives as long as its longest holder.
//! Text buffers keep one hidden `\0` after `len` so they can be handed to consumers that expect
//! terminated strings; the length is always authoritative.

use core::fmt;
use std::sync::Arc;

use crate::ValueErr;

/// Shared, immutable byte storage with an authoritative length.
#[derive(Clone)]
pub struct Buf {
    data: Arc<[u8]>,
    len: usize,
}

impl Buf {
    /// An empty buffer with no terminator.
    pub fn empty() -> Self {
        Self { data: Arc::from(&[][..]), len: 0 }
    }

    /// An empty text buffer (just the terminator).
    pub fn empty_str() -> Self {
        Self { data: Arc::from(&[0u8][..]), len: 0 }
    }

    /// Duplicate `src` into a new buffer owned by the caller.
    ///
    /// # Errors
    ///
    /// [`ValueErr::AllocError`] if the storage could not be reserved.
    pub fn duplicate(src: &[u8]) -> Result<Self, ValueErr> {
        let mut v = Vec::new();
        v.try_reserve_exact(src.len())?;
        v.extend_from_slice(src);
        Ok(Self { len: v.len(), data: Arc::from(v) })
    }

    /// Duplicate `src` into a new buffer, appending the hidden terminator.
    ///
    /// # Errors
    ///
    /// [`ValueErr::AllocError`] if the storage could not be reserved.
    pub fn duplicate_str(src: &[u8]) -> Result<Self, ValueErr> {
        let mut v = Vec::new();
        v.try_reserve_exact(src.len() + 1)?;
        v.extend_from_slice(src);
        v.push(0);
        Ok(Self { len: src.len(), data: Arc::from(v) })
    }

    /// Take ownership of `src` without copying its contents.
    pub fn transfer(src: Vec<u8>) -> Self {
        Self { len: src.len(), data: Arc::from(src) }
    }

    /// Take ownership of a `\0` terminated text buffer. The terminator is kept hidden.
    ///
    /// # Errors
    ///
    /// [`ValueErr::NotTerminated`] if the last byte of `src` is not `\0`.
    pub fn transfer_str(src: Vec<u8>) -> Result<Self, ValueErr> {
        match src.last() {
            Some(0) => Ok(Self { len: src.len() - 1, data: Arc::from(src) }),
            _ => Err(ValueErr::NotTerminated),
        }
    }

    /// Add a reference to this buffer. Both handles see the same storage.
    pub fn add_reference(&self) -> Self {
        self.clone()
    }

    /// Drop this handle. The storage is freed when the last handle goes.
    pub fn release(self) {}

    /// Number of holders of the underlying storage.
    pub fn holders(&self) -> usize {
        Arc::strong_count(&self.data)
    }

    /// Contents, without any hidden terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Length in bytes, excluding any hidden terminator.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if a hidden `\0` follows the contents.
    pub fn is_terminated(&self) -> bool {
        self.data.get(self.len) == Some(&0)
    }

    /// Contents plus the hidden terminator, if present.
    pub fn as_bytes_with_nul(&self) -> Option<&[u8]> {
        self.is_terminated().then(|| &self.data[..=self.len])
    }
}

impl Default for Buf {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Buf {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Buf {}

impl fmt::Debug for Buf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Buf({:?})", self.as_bytes().escape_ascii().to_string())
    }
}
