/// A `/name`, `/name=value` or `/name<rel>value` annotation.
///
/// Attached to relations, boolean operators and sort keys. An empty
/// `relation` means `=` once a value is present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Modifier {
    pub name: String,
    pub relation: String,
    pub value: String,
}

impl Modifier {
    /// A modifier that is only a name, such as `/ignoreCase`.
    pub fn flag(name: impl Into<String>) -> Self {
        Modifier {
            name: name.into(),
            ..Modifier::default()
        }
    }

    /// A modifier with a value compared by `relation`.
    pub fn with_value(
        name: impl Into<String>,
        relation: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Modifier {
            name: name.into(),
            relation: relation.into(),
            value: value.into(),
        }
    }
}

// Context-set modifier names
pub const SORT_ASCENDING: &str = "sort.ascending";
pub const SORT_DESCENDING: &str = "sort.descending";
pub const SORT_IGNORE_CASE: &str = "sort.ignoreCase";
pub const SORT_RESPECT_CASE: &str = "sort.respectCase";
pub const SORT_IGNORE_ACCENTS: &str = "sort.ignoreAccents";
pub const SORT_RESPECT_ACCENTS: &str = "sort.respectAccents";
pub const SORT_MISSING_OMIT: &str = "sort.missingOmit";
pub const SORT_MISSING_FAIL: &str = "sort.missingFail";
pub const SORT_MISSING_LOW: &str = "sort.missingLow";
pub const SORT_MISSING_HIGH: &str = "sort.missingHigh";
pub const SORT_LOCALE: &str = "sort.locale";
pub const CQL_DISTANCE: &str = "cql.distance";
pub const CQL_UNIT: &str = "cql.unit";
pub const CQL_ORDERED: &str = "cql.ordered";
pub const CQL_UNORDERED: &str = "cql.unordered";
pub const CQL_IGNORE_CASE: &str = "cql.ignoreCase";
pub const CQL_RESPECT_CASE: &str = "cql.respectCase";
pub const CQL_MASKED: &str = "cql.masked";
pub const CQL_UNMASKED: &str = "cql.unmasked";
pub const CQL_WORD: &str = "cql.word";
pub const CQL_STRING: &str = "cql.string";
pub const CQL_LOCALE: &str = "cql.locale";
