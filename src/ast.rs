//! # CQL - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for the Contextual Query
//! Language, the boolean search grammar used by SRU and related retrieval
//! protocols.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[clause]** - Clause tree: search clauses, boolean clauses, prefixes
//! - **[modifiers]** - Modifiers on relations, operators and sort keys
//! - **[operators]** - Boolean operators (`and`, `or`, `not`, `prox`)
//! - **[relations]** - Relation names and well-known `cql` indexes
//! - **[query]** - Complete query with its sort specification
//!
//! ## Quick Start
//!
//! ```text
//! dc.title any fish or dc.creator = sanderson sortBy dc.date/sort.descending
//! ```
//!
//! This query finds records whose title has any of the words, or whose
//! creator is Sanderson, newest first.
//!
//! ## Core Concepts
//!
//! ### Search Clauses
//!
//! A search clause is an index, a relation, optional modifiers and a term:
//!
//! ```text
//! index relation/modifier/modifier term
//! ```
//!
//! Index and relation may be left out, in which case they default to
//! `cql.serverChoice` and `=`. The AST keeps defaults as empty strings, so
//! `fish` and `cql.serverChoice = fish` parse to different trees that print
//! the same.
//!
//! ### Boolean Clauses
//!
//! Clauses combine with `and`, `or`, `not` and `prox`. There is no operator
//! precedence; chains associate to the left:
//!
//! ```text
//! a and b or c      ==  (a and b) or c
//! a and (b or c)    keeps its parentheses
//! ```
//!
//! ### Prefixes
//!
//! A `> name = uri` declaration binds `name` so that dotted words such as
//! `name.rel` are read as relations. It applies to the clause it precedes and
//! everything nested in it. A bare `> uri` binds nothing and puts the clause
//! in a custom context where any bare word after a term is a relation.
//!
//! ### Match-all
//!
//! [`ClauseKind::MatchAll`] is the empty clause, printed as
//! `cql.allRecords = 1`.
//!
//! ## Examples
//!
//! ### Building a tree by hand
//!
//! ```
//! use cql_lang::ast::{Clause, Query};
//!
//! let query = Query::new(Clause::or(
//!     Clause::search("dc.title", "fish"),
//!     Clause::and(Clause::search("a", "1"), Clause::search("b", "2")),
//! ));
//!
//! assert_eq!(query.to_string(), "dc.title = fish or (a = 1 and b = 2)");
//! ```

pub mod clause;
pub mod modifiers;
pub mod operators;
pub mod query;
pub mod relations;
pub mod tokens;

pub use clause::{BoolClause, Clause, ClauseKind, Prefix, SearchClause};
pub use modifiers::Modifier;
pub use operators::Operator;
pub use query::{Query, Sort};
pub use tokens::Token;
