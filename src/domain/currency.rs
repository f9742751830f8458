use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Валюта отображения. На расчёты не влияет – только на формат вывода.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Inr,
    Usd,
    Aed,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Inr, Currency::Usd, Currency::Aed];

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Aed => "AED",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Aed => "AED",
        }
    }

    /// "₹12.50", "$3.00", "AED7.25".
    pub fn format(&self, amount: Chips) -> String {
        format!("{}{}", self.symbol(), amount)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.symbol())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s) || c.symbol() == s)
            .ok_or_else(|| format!("неизвестная валюта: {s}"))
    }
}
