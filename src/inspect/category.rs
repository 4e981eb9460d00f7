//! Value categories

use std::fmt;

/// The kind of value reported by the describer
///
/// Every value maps to exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Null,
    Undefined,
    Boolean,
    Integer,
    Float,
    NaN,
    Infinity,
    /// Arbitrary-precision integer
    LargeInteger,
    Text,
    UniqueSymbol,
    /// Ordered indexable aggregate (array)
    Sequence,
    /// Insertion-ordered key to value mapping (Map)
    KeyedCollection,
    /// Insertion-ordered deduplicated collection (Set)
    UniqueSet,
    Callable,
    /// Calendar date-time
    Moment,
    /// Regular expression
    Pattern,
    ByteBuffer,
    /// Aggregate of named fields
    StructuredRecord,
    Unknown,
}

impl Category {
    /// All categories in classification order
    pub const ALL: [Category; 19] = [
        Category::Null,
        Category::Undefined,
        Category::Boolean,
        Category::Integer,
        Category::Float,
        Category::NaN,
        Category::Infinity,
        Category::LargeInteger,
        Category::Text,
        Category::UniqueSymbol,
        Category::Sequence,
        Category::KeyedCollection,
        Category::UniqueSet,
        Category::Callable,
        Category::Moment,
        Category::Pattern,
        Category::ByteBuffer,
        Category::StructuredRecord,
        Category::Unknown,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Null => "Null",
            Category::Undefined => "Undefined",
            Category::Boolean => "Boolean",
            Category::Integer => "Integer",
            Category::Float => "Float",
            Category::NaN => "NaN",
            Category::Infinity => "Infinity",
            Category::LargeInteger => "LargeInteger",
            Category::Text => "Text",
            Category::UniqueSymbol => "UniqueSymbol",
            Category::Sequence => "Sequence",
            Category::KeyedCollection => "KeyedCollection",
            Category::UniqueSet => "UniqueSet",
            Category::Callable => "Callable",
            Category::Moment => "Moment",
            Category::Pattern => "Pattern",
            Category::ByteBuffer => "ByteBuffer",
            Category::StructuredRecord => "StructuredRecord",
            Category::Unknown => "Unknown",
        }
    }

    /// Check if values of this category are aggregates that may nest
    pub fn is_aggregate(self) -> bool {
        matches!(
            self,
            Category::Sequence
                | Category::KeyedCollection
                | Category::UniqueSet
                | Category::StructuredRecord
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
