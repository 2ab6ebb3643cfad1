//! Packed name strings and their offset indexes.

use serde::Serialize;

use crate::member::Member;

/// Element type of an index array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum IndexWidth {
    U8,
    U16,
    U32,
}

impl IndexWidth {
    /// Smallest width whose unsigned range holds `max_offset`.
    #[must_use]
    pub const fn for_offset(max_offset: usize) -> Self {
        if max_offset <= u8::MAX as usize {
            Self::U8
        } else if max_offset <= u16::MAX as usize {
            Self::U16
        } else {
            Self::U32
        }
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
            Self::U32 => 32,
        }
    }

    #[must_use]
    pub const fn rust_type(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
        }
    }
}

/// Display names concatenated into one string, with byte offsets.
///
/// `index` has one more entry than there are names: `index[0] == 0` and
/// `name[index[i]..index[i + 1]]` is the i-th display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NameTable {
    name: String,
    index: Vec<usize>,
    width: IndexWidth,
}

impl NameTable {
    #[must_use]
    pub fn build<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut name = String::new();
        let mut index = vec![0];
        for display in names {
            name.push_str(display);
            index.push(name.len());
        }
        let width = IndexWidth::for_offset(name.len());
        Self { name, index, width }
    }

    #[must_use]
    pub fn from_members(members: &[Member]) -> Self {
        Self::build(members.iter().map(|member| member.display_name.as_str()))
    }

    /// The concatenated names.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    #[must_use]
    pub const fn width(&self) -> IndexWidth {
        self.width
    }

    /// Number of names in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte range of the `i`-th name.
    #[must_use]
    pub fn span(&self, i: usize) -> Option<(usize, usize)> {
        let start = *self.index.get(i)?;
        let end = *self.index.get(i + 1)?;
        Some((start, end))
    }

    #[must_use]
    pub fn get(&self, i: usize) -> Option<&str> {
        let (start, end) = self.span(i)?;
        self.name.get(start..end)
    }
}

#[cfg(test)]
#[path = "../tests/name_table_tests.rs"]
mod tests;
