//! Market identifiers and the slot grid.
//!
//! The asset trades in three markets: Markets 1 and 2 price each half-hour
//! slot independently, Market 3 carries a single daily price applied to
//! every slot of its day.

use crate::error::BessError;
use serde::{Deserialize, Serialize};

/// Number of half-hour slots in one trading day.
pub const SLOTS_PER_DAY: usize = 48;

/// One of the three markets the storage asset can trade in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    /// Half-hourly priced market.
    Market1,
    /// Half-hourly priced market, prices independent of Market 1.
    Market2,
    /// Daily priced market. Its price is broadcast to all 48 slots and its
    /// charge/discharge rate must stay constant across the day.
    Market3,
}

impl Market {
    /// All markets, in model index order.
    pub fn all() -> &'static [Market] {
        &[Market::Market1, Market::Market2, Market::Market3]
    }

    /// Zero-based index used for variable and price arrays.
    pub fn index(&self) -> usize {
        match self {
            Market::Market1 => 0,
            Market::Market2 => 1,
            Market::Market3 => 2,
        }
    }

    /// Whether this market trades at a single daily price.
    pub fn is_daily(&self) -> bool {
        matches!(self, Market::Market3)
    }

    /// Get the display name for this market.
    pub fn display_name(&self) -> &'static str {
        match self {
            Market::Market1 => "Market 1",
            Market::Market2 => "Market 2",
            Market::Market3 => "Market 3",
        }
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Market {
    type Err = BessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(' ', "").as_str() {
            "market1" | "m1" | "1" => Ok(Market::Market1),
            "market2" | "m2" | "2" => Ok(Market::Market2),
            "market3" | "m3" | "3" => Ok(Market::Market3),
            _ => Err(BessError::Parse(format!("unknown market '{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_indices_are_stable() {
        for (i, market) in Market::all().iter().enumerate() {
            assert_eq!(market.index(), i);
        }
    }

    #[test]
    fn test_market_from_str() {
        assert_eq!("Market 1".parse::<Market>().unwrap(), Market::Market1);
        assert_eq!("m3".parse::<Market>().unwrap(), Market::Market3);
        assert!("market 4".parse::<Market>().is_err());
    }

    #[test]
    fn test_only_market3_is_daily() {
        assert!(!Market::Market1.is_daily());
        assert!(!Market::Market2.is_daily());
        assert!(Market::Market3.is_daily());
    }
}
