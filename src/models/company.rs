use serde::{Deserialize, Serialize};

/// One entry of the static company reference list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Ticker symbol, e.g. "AAPL"
    pub symbol: String,

    /// Display name
    pub name: String,

    /// Optional short description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Company {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
