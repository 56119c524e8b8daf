pub mod ast;
pub mod builder;
pub mod cli;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod sql;
pub mod value;
pub mod xcql;

pub use ast::{BoolClause, Clause, ClauseKind, Modifier, Operator, Prefix, Query, SearchClause, Sort, Token};
pub use builder::{BuildError, QueryBuilder};
pub use lexer::Lexer;
pub use output::quote;
pub use parser::{ParseError, Parser, parse};
pub use sql::{Definition, SqlError, SqlQuery};
pub use value::Value;
pub use xcql::{to_xcql, to_xcql_pretty, write_xcql};
