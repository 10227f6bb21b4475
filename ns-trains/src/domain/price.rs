//! Fare records.

use std::fmt;

use serde::Serialize;

/// Travel class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum FareClass {
    First,
    Second,
}

impl FareClass {
    /// Parse the upstream class attribute ("1" or "2").
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(FareClass::First),
            "2" => Some(FareClass::Second),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            FareClass::First => 1,
            FareClass::Second => 2,
        }
    }
}

impl From<FareClass> for u8 {
    fn from(class: FareClass) -> u8 {
        class.number()
    }
}

impl fmt::Display for FareClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Fare reduction tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Discount {
    /// Full fare.
    None,
    Twenty,
    Forty,
}

impl Discount {
    /// Map an upstream discount code to a tier, or `None` if unrecognized.
    pub fn from_code_strict(code: &str) -> Option<Self> {
        match code {
            "vol tarief" => Some(Discount::None),
            "reductie_20" => Some(Discount::Twenty),
            "reductie_40" => Some(Discount::Forty),
            _ => None,
        }
    }

    /// Map an upstream discount code to a tier.
    ///
    /// Unrecognized codes are treated as a 20% reduction.
    ///
    /// ```
    /// use ns_trains::domain::Discount;
    ///
    /// assert_eq!(Discount::from_code("reductie_40").percent(), 40);
    /// assert_eq!(Discount::from_code("vol tarief").percent(), 0);
    /// assert_eq!(Discount::from_code("studenten").percent(), 20);
    /// ```
    pub fn from_code(code: &str) -> Self {
        Self::from_code_strict(code).unwrap_or(Discount::Twenty)
    }

    pub fn percent(&self) -> u8 {
        match self {
            Discount::None => 0,
            Discount::Twenty => 20,
            Discount::Forty => 40,
        }
    }
}

impl From<Discount> for u8 {
    fn from(discount: Discount) -> u8 {
        discount.percent()
    }
}

/// The price of one product in one class at one discount tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Price {
    /// Product name, e.g. "Enkele reis".
    pub product: String,
    pub class: FareClass,
    pub discount: Discount,
    /// Amount in euro cents.
    pub amount_cents: u32,
}

impl Price {
    /// Amount formatted as euros, e.g. "6,30".
    pub fn amount_display(&self) -> String {
        format!("{},{:02}", self.amount_cents / 100, self.amount_cents % 100)
    }
}

/// Parse an amount such as "6,30", "6.30", "12" or "6.3" into cents.
pub fn parse_amount_cents(s: &str) -> Option<u32> {
    let s = s.trim();
    let (euros, cents) = match s.split_once([',', '.']) {
        Some((e, c)) => (e, c),
        None => (s, ""),
    };

    if euros.is_empty() || !euros.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if cents.len() > 2 || !cents.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let euros: u32 = euros.parse().ok()?;
    let cents: u32 = match cents.len() {
        0 => 0,
        1 => cents.parse::<u32>().ok()? * 10,
        _ => cents.parse().ok()?,
    };
    euros.checked_mul(100)?.checked_add(cents)
}
