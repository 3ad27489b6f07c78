//! Indexed-colour lookup shared by PCX images and 3DI textures

/// A palette stored as consecutive fixed-size entries
#[derive(Debug, Clone, Copy)]
pub struct Palette<'a> {
    data: &'a [u8],
    entry_size: usize,
}

impl<'a> Palette<'a> {
    /// View `data` as entries of `entry_size` bytes; a trailing partial entry is ignored
    pub fn new(data: &'a [u8], entry_size: usize) -> Self {
        Self { data, entry_size }
    }

    /// Number of complete entries
    pub fn len(&self) -> usize {
        self.data.len().checked_div(self.entry_size).unwrap_or(0)
    }

    /// Whether the palette has no complete entry
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entry for a colour index, if the palette is large enough
    pub fn entry(&self, index: u8) -> Option<&'a [u8]> {
        let index = usize::from(index);
        if index >= self.len() {
            return None;
        }
        let start = index * self.entry_size;
        Some(&self.data[start..start + self.entry_size])
    }
}
