use core::fmt;

use crate::FsError;

/// The capacity of a file name. Names must be strictly shorter.
pub const MAX_FILENAME_LEN: usize = 16;

/// A validated file name stored inline.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FileName {
    bytes: [u8; MAX_FILENAME_LEN],
    len:   usize,
}

impl FileName {
    pub fn new(name: &str) -> Result<Self, FsError> {
        if name.is_empty() || name.bytes().any(|b| b == b'\n' || b == 0) {
            return Err(FsError::InvalidArgument);
        }
        if name.len() >= MAX_FILENAME_LEN {
            return Err(FsError::NameTooLong);
        }

        let mut bytes = [0; MAX_FILENAME_LEN];
        bytes[..name.len()].copy_from_slice(name.as_bytes());
        Ok(Self {
            bytes,
            len: name.len(),
        })
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: the bytes were copied from a `&str` in `new`.
        unsafe { core::str::from_utf8_unchecked(&self.bytes[..self.len]) }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl PartialEq<str> for FileName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}
