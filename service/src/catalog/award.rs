//! Award entity and the closed award-name enumeration.

use std::fmt;
use std::str::FromStr;

use async_graphql::{Enum, SimpleObject};

use super::model::Book;

/// Raised when a string names no known award.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown award name: {0}")]
pub struct UnknownAwardName(pub String);

/// The closed set of literary prizes the catalogue tracks.
///
/// Parsing is total and exact-match: [`AwardName::from_str`] returns a
/// result rather than panicking, and anything outside the set (including
/// case variants) is rejected. An unrecognised name must never reach the
/// database.
#[derive(Enum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum AwardName {
    BookerPrize,
    CostaBookAward,
    HugoAward,
    OrwellPrize,
    PorticoPrize,
    PulitzerPrize,
    WomensPrizeForFiction,
}

impl AwardName {
    /// Stable string form, used for database storage and matching input.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BookerPrize => "BOOKER_PRIZE",
            Self::CostaBookAward => "COSTA_BOOK_AWARD",
            Self::HugoAward => "HUGO_AWARD",
            Self::OrwellPrize => "ORWELL_PRIZE",
            Self::PorticoPrize => "PORTICO_PRIZE",
            Self::PulitzerPrize => "PULITZER_PRIZE",
            Self::WomensPrizeForFiction => "WOMENS_PRIZE_FOR_FICTION",
        }
    }
}

impl fmt::Display for AwardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AwardName {
    type Err = UnknownAwardName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BOOKER_PRIZE" => Ok(Self::BookerPrize),
            "COSTA_BOOK_AWARD" => Ok(Self::CostaBookAward),
            "HUGO_AWARD" => Ok(Self::HugoAward),
            "ORWELL_PRIZE" => Ok(Self::OrwellPrize),
            "PORTICO_PRIZE" => Ok(Self::PorticoPrize),
            "PULITZER_PRIZE" => Ok(Self::PulitzerPrize),
            "WOMENS_PRIZE_FOR_FICTION" => Ok(Self::WomensPrizeForFiction),
            other => Err(UnknownAwardName(other.to_string())),
        }
    }
}

/// A literary prize awarded to zero or more catalogued books.
///
/// `id` is assigned by the database on insert; a freshly constructed award
/// has none. Associated books are a set in the data model (the join table's
/// composite key enforces uniqueness); ordering here is not meaningful.
#[derive(Clone, Debug, PartialEq, SimpleObject)]
pub struct Award {
    pub id: Option<i64>,
    pub award_name: AwardName,
    pub category: String,
    pub year: i32,
    pub books: Vec<Book>,
}

impl Award {
    /// A not-yet-persisted award with no associated books.
    #[must_use]
    pub const fn new(award_name: AwardName, category: String, year: i32) -> Self {
        Self {
            id: None,
            award_name,
            category,
            year,
            books: Vec::new(),
        }
    }
}
