use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
    pub name: String,
}

impl Token {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Which side of a pair a token sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenSide {
    A,
    B,
}

impl TokenSide {
    /// The opposite side of the pair.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// An ordered trading pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    pub token_a: Token,
    pub token_b: Token,
}

impl TokenPair {
    pub fn new(token_a: Token, token_b: Token) -> Self {
        Self { token_a, token_b }
    }

    /// Pair label in the `BASE/QUOTE` form used by reports.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{}", self.token_a.symbol, self.token_b.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_label() {
        let pair = TokenPair::new(Token::new("BTC", "Bitcoin"), Token::new("ETH", "Ethereum"));
        assert_eq!(pair.label(), "BTC/ETH");
    }

    #[test]
    fn test_side_other() {
        assert_eq!(TokenSide::A.other(), TokenSide::B);
        assert_eq!(TokenSide::B.other(), TokenSide::A);
    }
}
