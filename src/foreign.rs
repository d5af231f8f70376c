// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Boundary to pixel memory owned by the simulator runtime.
//!
//! The engine hands frames over as a bare integer: the address of an object
//! that owns a contiguous array of `u8` samples. Nothing about that address
//! can be verified from this side, so every dereference of it lives in this
//! module. The rest of the crate only ever sees a [`BorrowedView`].
//!
//! This module never frees, resizes or retains the foreign memory.

use crate::error::{Error, Result};
use std::{fmt, marker::PhantomData, ptr::NonNull, slice::from_raw_parts};
use tracing::trace;

/// Address of a foreign object, as passed across the engine boundary.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ForeignHandle(usize);

impl ForeignHandle {
    pub const NULL: ForeignHandle = ForeignHandle(0);

    pub const fn new(addr: usize) -> Self {
        Self(addr)
    }

    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr as usize)
    }

    pub fn addr(&self) -> usize {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<usize> for ForeignHandle {
    fn from(addr: usize) -> Self {
        Self(addr)
    }
}

/// Engine bindings pass the address as a signed `long`.
impl From<isize> for ForeignHandle {
    fn from(addr: isize) -> Self {
        Self(addr as usize)
    }
}

impl fmt::Display for ForeignHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// How a [`ForeignHandle`] resolves to sample memory.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum HandleConvention {
    /// The handle points to a [`ForeignArray`] whose first word is the
    /// sample pointer.
    #[default]
    ArrayObject,
    /// The handle is the address of the first sample.
    RawSamples,
}

/// Layout of the engine's array-ownership object as seen through a handle.
///
/// Only the sample pointer and the logical length are read. The object
/// itself stays owned by whoever created it.
#[repr(C)]
#[derive(Debug)]
pub struct ForeignArray {
    pub data: *const u8,
    pub len: usize,
}

impl ForeignArray {
    /// Describe an existing slice, e.g. to hand an in-process buffer through
    /// the same path the engine uses.
    pub fn from_slice(samples: &[u8]) -> Self {
        Self {
            data: samples.as_ptr(),
            len: samples.len(),
        }
    }

    pub fn handle(&self) -> ForeignHandle {
        ForeignHandle::from_ptr(self as *const ForeignArray)
    }
}

/// Sample memory resolved from a handle.
///
/// Holds no lifetime: it is only a record of where the samples were when the
/// handle was resolved. Turning it into bytes goes through
/// [`ForeignBuffer::borrow`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ForeignBuffer {
    ptr: NonNull<u8>,
    len: Option<usize>,
}

impl ForeignBuffer {
    /// Resolve `handle` to its sample pointer.
    ///
    /// # Safety
    ///
    /// For [`HandleConvention::ArrayObject`] the handle must be the address
    /// of a live, properly aligned [`ForeignArray`]. For
    /// [`HandleConvention::RawSamples`] nothing is dereferenced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullHandle`] if the handle or the sample pointer
    /// stored behind it is null.
    pub unsafe fn resolve(handle: ForeignHandle, convention: HandleConvention) -> Result<Self> {
        if handle.is_null() {
            return Err(Error::NullHandle);
        }

        let (data, len) = match convention {
            HandleConvention::ArrayObject => {
                let array = &*(handle.addr() as *const ForeignArray);
                (array.data as *mut u8, Some(array.len))
            }
            HandleConvention::RawSamples => (handle.addr() as *mut u8, None),
        };

        let ptr = NonNull::new(data).ok_or(Error::NullHandle)?;
        trace!(handle = %handle, ?len, "resolved foreign buffer");
        Ok(Self { ptr, len })
    }

    /// Length declared by the foreign object, if the convention carries one.
    pub fn declared_len(&self) -> Option<usize> {
        self.len
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// Borrow `expected_min_length` bytes of the buffer.
    ///
    /// # Safety
    ///
    /// The memory must still be live and must not be written for `'a`. When
    /// no length was declared, at least `expected_min_length` bytes must be
    /// readable; this is trusted, not checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`] if the declared length is shorter
    /// than `expected_min_length`.
    pub unsafe fn borrow<'a>(&self, expected_min_length: usize) -> Result<BorrowedView<'a>> {
        if let Some(available) = self.len {
            if available < expected_min_length {
                return Err(Error::BufferTooSmall {
                    required: expected_min_length,
                    available,
                });
            }
        }

        Ok(BorrowedView {
            data: from_raw_parts(self.ptr.as_ptr(), expected_min_length),
            _foreign: PhantomData,
        })
    }
}

/// Read-only bytes borrowed from foreign memory.
#[derive(Copy, Clone)]
pub struct BorrowedView<'a> {
    data: &'a [u8],
    // raw-pointer marker keeps the view !Send/!Sync
    _foreign: PhantomData<*const u8>,
}

impl<'a> BorrowedView<'a> {
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for BorrowedView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BorrowedView")
            .field("ptr", &self.data.as_ptr())
            .field("len", &self.data.len())
            .finish()
    }
}

/// Resolve `handle` and borrow `expected_min_length` bytes behind it.
///
/// This is the one place where the engine's handle contract is trusted
/// rather than verified.
///
/// # Safety
///
/// See [`ForeignBuffer::resolve`] and [`ForeignBuffer::borrow`]: the handle
/// must point to a live object of the expected shape holding at least
/// `expected_min_length` readable bytes, left untouched for `'a`.
pub unsafe fn borrow_foreign_buffer<'a>(
    handle: ForeignHandle,
    convention: HandleConvention,
    expected_min_length: usize,
) -> Result<BorrowedView<'a>> {
    ForeignBuffer::resolve(handle, convention)?.borrow(expected_min_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_handle_is_rejected() {
        let res = unsafe { ForeignBuffer::resolve(ForeignHandle::NULL, HandleConvention::RawSamples) };
        assert!(matches!(res, Err(Error::NullHandle)));
    }

    #[test]
    fn array_object_declares_length() -> Result<()> {
        let samples = vec![7u8; 12];
        let array = ForeignArray::from_slice(&samples);
        let buf = unsafe { ForeignBuffer::resolve(array.handle(), HandleConvention::ArrayObject)? };
        assert_eq!(buf.declared_len(), Some(12));
        assert_eq!(buf.as_ptr(), samples.as_ptr());
        Ok(())
    }
}
