use std::fmt;

/// A parsed rule: its statements in the order they were written.
///
/// The downstream engine interprets statements in sequence, so the parser
/// never reorders or deduplicates them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

/// One top-level clause of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// The event source to read from (e.g., `SOURCE Block`)
    Source { name: String },
    /// The event or field to watch (e.g., `WATCH Transfer`)
    Watch { name: String },
    /// The gating predicate (e.g., `WHERE amount > 100`)
    Where { condition: Condition },
    /// Where matches are emitted (e.g., `PUBLISH WEBSOCKETS alerts`)
    Publish { target: PublishTarget, channel: String },
    /// A conjunction clause (e.g., `AND to == bob`).
    /// Left flat: the engine combines it with the preceding condition.
    And { condition: Condition },
    /// A disjunction clause (e.g., `OR value CONTAINS 0xff`)
    Or { condition: Condition },
}

impl Statement {
    /// The keyword this statement starts with.
    pub fn keyword(&self) -> &'static str {
        match self {
            Statement::Source { .. } => "SOURCE",
            Statement::Watch { .. } => "WATCH",
            Statement::Where { .. } => "WHERE",
            Statement::Publish { .. } => "PUBLISH",
            Statement::And { .. } => "AND",
            Statement::Or { .. } => "OR",
        }
    }

    pub fn condition(&self) -> Option<&Condition> {
        match self {
            Statement::Where { condition }
            | Statement::And { condition }
            | Statement::Or { condition } => Some(condition),
            Statement::Source { .. } | Statement::Watch { .. } | Statement::Publish { .. } => None,
        }
    }
}

/// The sink a matching rule's output goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublishTarget {
    /// Live socket feed
    Websockets,
    /// Log-based sink
    LogPublisher,
}

/// A `left operator right` triple used by `WHERE`, `AND` and `OR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub left: String,
    pub operator: ComparisonOp,
    pub right: Operand,
}

impl Condition {
    pub fn new(left: impl Into<String>, operator: ComparisonOp, right: Operand) -> Self {
        Self {
            left: left.into(),
            operator,
            right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    Contains,
}

impl ComparisonOp {
    /// Maps an arithmetic symbol lexeme to its operator. `=` is accepted as `==`.
    pub fn from_symbol(symbol: &str) -> Option<ComparisonOp> {
        let op = match symbol {
            "==" | "=" => ComparisonOp::Equal,
            "!=" => ComparisonOp::NotEqual,
            ">" => ComparisonOp::Greater,
            ">=" => ComparisonOp::GreaterOrEqual,
            "<" => ComparisonOp::Less,
            "<=" => ComparisonOp::LessOrEqual,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Equal => "==",
            ComparisonOp::NotEqual => "!=",
            ComparisonOp::Greater => ">",
            ComparisonOp::GreaterOrEqual => ">=",
            ComparisonOp::Less => "<",
            ComparisonOp::LessOrEqual => "<=",
            ComparisonOp::Contains => "CONTAINS",
        }
    }
}

/// Right-hand side of a condition, kept as the raw lexeme.
/// Numeric and hex interpretation belongs to the evaluation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Identifier(String),
    Number(String),
    Address(String),
}

impl Operand {
    pub fn text(&self) -> &str {
        match self {
            Operand::Identifier(text) | Operand::Number(text) | Operand::Address(text) => text,
        }
    }
}

// Display renders canonical rule text that parses back to the same tree.

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Source { name } | Statement::Watch { name } => {
                write!(f, "{} {name}", self.keyword())
            }
            Statement::Where { condition }
            | Statement::And { condition }
            | Statement::Or { condition } => write!(f, "{} {condition}", self.keyword()),
            Statement::Publish { target, channel } => write!(f, "PUBLISH {target} {channel}"),
        }
    }
}

impl fmt::Display for PublishTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishTarget::Websockets => write!(f, "WEBSOCKETS"),
            PublishTarget::LogPublisher => write!(f, "LOG_PUBLISHER"),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
