use crate::FileName;

/// The capacity of one file in bytes.
pub const MAX_FILE_SIZE: usize = 512;

/// A named, fixed-capacity byte blob.
pub struct File {
    name: FileName,
    data: [u8; MAX_FILE_SIZE],
    /// Logical size, never above `MAX_FILE_SIZE`.
    size: usize,
}

impl File {
    pub(crate) fn new(name: FileName, data: &[u8]) -> Self {
        let mut file = Self {
            name,
            data: [0; MAX_FILE_SIZE],
            size: 0,
        };
        file.replace(data);
        file
    }

    pub fn name(&self) -> &FileName {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..self.size]
    }

    /// Replaces the whole content. The caller has checked the length.
    pub(crate) fn replace(&mut self, data: &[u8]) {
        assert!(data.len() <= MAX_FILE_SIZE);

        self.data[..data.len()].copy_from_slice(data);
        self.data[data.len()..].fill(0);
        self.size = data.len();
    }
}
