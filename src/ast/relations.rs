//! Relation names understood by CQL, plus the well-known indexes of the
//! `cql` context set.

pub const EQ: &str = "=";
pub const EXACT_EQ: &str = "==";
pub const NE: &str = "<>";
pub const LT: &str = "<";
pub const GT: &str = ">";
pub const LE: &str = "<=";
pub const GE: &str = ">=";
pub const ADJ: &str = "adj";
pub const ALL: &str = "all";
pub const ANY: &str = "any";
pub const SCR: &str = "scr";
pub const ENCLOSES: &str = "encloses";
pub const EXACT: &str = "exact";
pub const WITHIN: &str = "within";

/// Relation assumed when a search clause leaves it empty.
pub const DEFAULT: &str = EQ;

/// Relations accepted by the validated builder.
pub const BUILT_IN: [&str; 13] = [
    EQ, NE, LT, GT, LE, GE, ADJ, ALL, ANY, SCR, ENCLOSES, EXACT, WITHIN,
];

/// Bare words the lexer classifies as relations.
pub(crate) const NAMED: [&str; 7] = [ALL, ANY, ADJ, SCR, EXACT, WITHIN, ENCLOSES];

pub fn is_built_in(relation: &str) -> bool {
    BUILT_IN.contains(&relation)
}

/// Index assumed when a search clause leaves it empty.
pub const SERVER_CHOICE: &str = "cql.serverChoice";
pub const ALL_RECORDS: &str = "cql.allRecords";
pub const ALL_INDEXES: &str = "cql.allIndexes";
pub const ANY_INDEXES: &str = "cql.anyIndexes";
pub const KEYWORDS: &str = "cql.keywords";

/// Prefix name bound in every query.
pub const CQL_PREFIX: &str = "cql";
