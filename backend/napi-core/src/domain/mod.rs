//! Content-object types, query descriptors and result pages.

pub mod page;
pub mod query;

pub use page::Page;
pub use query::Query;

use std::fmt;

/// Closed registry of the content-object types the API serves.
///
/// Replaces name-based class lookup: a name either maps to one of these
/// variants or the lookup fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Address,
    Category,
    Event,
    Institution,
    InstitutionType,
    Person,
}

impl ObjectType {
    pub const ALL: [ObjectType; 6] = [
        ObjectType::Address,
        ObjectType::Category,
        ObjectType::Event,
        ObjectType::Institution,
        ObjectType::InstitutionType,
        ObjectType::Person,
    ];

    /// Resolve a type name the way callers spell it (`"event"`, `"institutionType"`).
    ///
    /// Only the first character is upper-cased before matching, so
    /// `"event"` and `"Event"` resolve but `"EVENT"` does not.
    pub fn from_name(name: &str) -> Option<Self> {
        let capitalized = capitalize_first(name);
        Self::ALL
            .into_iter()
            .find(|object_type| object_type.name() == capitalized)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ObjectType::Address => "Address",
            ObjectType::Category => "Category",
            ObjectType::Event => "Event",
            ObjectType::Institution => "Institution",
            ObjectType::InstitutionType => "InstitutionType",
            ObjectType::Person => "Person",
        }
    }

    /// Path segment of the collection endpoint, relative to the API base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ObjectType::Address => "addresses",
            ObjectType::Category => "categories",
            ObjectType::Event => "events",
            ObjectType::Institution => "institutions",
            ObjectType::InstitutionType => "institution_types",
            ObjectType::Person => "people",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
