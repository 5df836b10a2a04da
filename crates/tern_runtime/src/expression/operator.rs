use std::fmt;

/// Binary operators, by symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Power,
    Multiply,
    Divide,
    Modulo,
    Add,
    Subtract,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
    BitAnd,
    BitOr,
    /// Spelled `><`; `^` is exponentiation.
    BitXor,
    And,
    Or,
}

/// Precedence tiers, highest binding first.
///
/// There is no conditional (`? :`) tier; every step is a binary operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Exponent,
    Multiplicative,
    Additive,
    Comparison,
    Equality,
    Bitwise,
    LogicalAnd,
    LogicalOr,
}

impl Tier {
    /// Reduction order.
    pub const ALL: [Tier; 8] = [
        Tier::Exponent,
        Tier::Multiplicative,
        Tier::Additive,
        Tier::Comparison,
        Tier::Equality,
        Tier::Bitwise,
        Tier::LogicalAnd,
        Tier::LogicalOr,
    ];
}

impl Operator {
    pub const ALL: [Operator; 17] = [
        Operator::Power,
        Operator::Multiply,
        Operator::Divide,
        Operator::Modulo,
        Operator::Add,
        Operator::Subtract,
        Operator::Less,
        Operator::LessEqual,
        Operator::Greater,
        Operator::GreaterEqual,
        Operator::Equal,
        Operator::NotEqual,
        Operator::BitAnd,
        Operator::BitOr,
        Operator::BitXor,
        Operator::And,
        Operator::Or,
    ];

    /// The symbol operator functions are registered under.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Power => "^",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Modulo => "%",
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Less => "<",
            Operator::LessEqual => "<=",
            Operator::Greater => ">",
            Operator::GreaterEqual => ">=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::BitAnd => "&",
            Operator::BitOr => "|",
            Operator::BitXor => "><",
            Operator::And => "&&",
            Operator::Or => "||",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Operator::ALL
            .into_iter()
            .find(|operator| operator.symbol() == symbol)
    }

    pub fn tier(self) -> Tier {
        match self {
            Operator::Power => Tier::Exponent,
            Operator::Multiply | Operator::Divide | Operator::Modulo => Tier::Multiplicative,
            Operator::Add | Operator::Subtract => Tier::Additive,
            Operator::Less | Operator::LessEqual | Operator::Greater | Operator::GreaterEqual => {
                Tier::Comparison
            }
            Operator::Equal | Operator::NotEqual => Tier::Equality,
            Operator::BitAnd | Operator::BitOr | Operator::BitXor => Tier::Bitwise,
            Operator::And => Tier::LogicalAnd,
            Operator::Or => Tier::LogicalOr,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
