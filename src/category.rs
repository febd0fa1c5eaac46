use std::fmt;

/// Handle for a registered category. Wraps the rank value, which is unique
/// within the owning matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub(crate) u32);

impl CategoryId {
    /// The rank value this handle refers to.
    pub fn value(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub code: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub text_color: String,
    pub value: u32,
}

impl Category {
    pub fn id(&self) -> CategoryId {
        CategoryId(self.value)
    }

    pub fn same_rank(&self, other: &Category) -> bool {
        self.value == other.value
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category: {} - {}", self.code, self.name)
    }
}
