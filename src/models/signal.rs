use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical trading signal for a single row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TradeSignal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl TradeSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSignal::Buy => "Buy",
            TradeSignal::Sell => "Sell",
            TradeSignal::Hold => "Hold",
        }
    }
}

impl fmt::Display for TradeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
