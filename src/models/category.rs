/// Label of the menu entry that asks for a free-text description instead.
pub const OTHER_CATEGORY: &str = "Others";

/// Menu order of the built-in categories.
pub const PREDEFINED_CATEGORIES: &[&str] = &[
    "Food",
    "Rent",
    "Bills",
    "Fuel",
    "Electronics",
    "Transport",
    "Entertainment",
    OTHER_CATEGORY,
];

/// A menu pick: either one of the fixed labels or a custom description.
///
/// The store never sees this type; both variants collapse to a plain text key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Predefined(&'static str),
    Custom(String),
}

impl Category {
    /// Map a 1-based menu choice to a category. `None` when out of range.
    /// Picking "Others" yields an empty `Custom` that the caller fills in.
    pub fn from_choice(choice: usize) -> Option<Self> {
        let label = *PREDEFINED_CATEGORIES.get(choice.checked_sub(1)?)?;
        if label == OTHER_CATEGORY {
            Some(Self::Custom(String::new()))
        } else {
            Some(Self::Predefined(label))
        }
    }

    pub fn needs_description(&self) -> bool {
        matches!(self, Self::Custom(desc) if desc.is_empty())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Predefined(label) => label,
            Self::Custom(desc) => desc,
        }
    }

    /// Find a predefined label by name (case-insensitive), falling back to a custom key.
    pub fn parse(name: &str) -> Self {
        let trimmed = name.trim();
        PREDEFINED_CATEGORIES
            .iter()
            .copied()
            .find(|c| *c != OTHER_CATEGORY && c.eq_ignore_ascii_case(trimmed))
            .map(Self::Predefined)
            .unwrap_or_else(|| Self::Custom(trimmed.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
