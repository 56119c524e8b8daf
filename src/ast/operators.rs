use std::fmt;

/// Boolean operators joining two clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    /// Both sides match (`and`), also the default
    #[default]
    And,
    /// Either side matches (`or`)
    Or,
    /// Left side matches and right side does not (`not`)
    Not,
    /// Both sides match near each other (`prox`)
    Prox,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::And, Operator::Or, Operator::Not, Operator::Prox];

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Not => "not",
            Operator::Prox => "prox",
        }
    }

    /// Look up an operator by name, ignoring case.
    pub fn from_keyword(word: &str) -> Option<Self> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(word))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
