//! Book value object and its closed enumerations.
//!
//! Language, genre, and publishing format are closed sets. Each carries an
//! exact-match [`FromStr`] used when decoding database rows; the stored
//! representation is the SCREAMING_SNAKE_CASE name, which also matches the
//! GraphQL enum value.

use std::fmt;
use std::str::FromStr;

use async_graphql::{Enum, SimpleObject};

/// Raised when a stored string does not belong to one of the closed sets.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! closed_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Enum, Copy, Clone, Debug, PartialEq, Eq)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Stable string form, used for database storage.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

closed_enum!(
    /// Languages a catalogued book can be written in.
    LanguageName, "language", {
        Afrikaans => "AFRIKAANS",
        Arabic => "ARABIC",
        English => "ENGLISH",
        French => "FRENCH",
        German => "GERMAN",
        Italian => "ITALIAN",
        Japanese => "JAPANESE",
        Portuguese => "PORTUGUESE",
        Russian => "RUSSIAN",
        Spanish => "SPANISH",
    }
);

closed_enum!(
    /// Genres recognised by the catalogue.
    GenreName, "genre", {
        Adventure => "ADVENTURE",
        Biography => "BIOGRAPHY",
        Classic => "CLASSIC",
        Crime => "CRIME",
        Fantasy => "FANTASY",
        Historical => "HISTORICAL",
        Mystery => "MYSTERY",
        Romance => "ROMANCE",
        Satire => "SATIRE",
        ScienceFiction => "SCIENCE_FICTION",
    }
);

closed_enum!(
    /// Physical or digital form a book is published in.
    PublishingFormat, "publishing format", {
        Hardcover => "HARDCOVER",
        Paperback => "PAPERBACK",
        Ebook => "EBOOK",
        Audiobook => "AUDIOBOOK",
    }
);

/// A catalogued book. Association payload for awards; never mutated by the
/// award operations.
#[derive(Clone, Debug, PartialEq, SimpleObject)]
pub struct Book {
    pub id: Option<i64>,
    pub title: String,
    pub language: LanguageName,
    pub blurb: String,
    pub genre: GenreName,
    pub format: PublishingFormat,
}

impl Book {
    /// A not-yet-persisted book.
    #[must_use]
    pub const fn new(
        title: String,
        language: LanguageName,
        blurb: String,
        genre: GenreName,
        format: PublishingFormat,
    ) -> Self {
        Self {
            id: None,
            title,
            language,
            blurb,
            genre,
            format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parse_is_exact_match() {
        assert_eq!("AFRIKAANS".parse(), Ok(LanguageName::Afrikaans));
        assert!("afrikaans".parse::<LanguageName>().is_err());
        assert!("Afrikaans".parse::<LanguageName>().is_err());
    }

    #[test]
    fn genre_rejects_unknown_value() {
        let err = "WESTERN".parse::<GenreName>().unwrap_err();
        assert_eq!(err.kind, "genre");
        assert_eq!(err.value, "WESTERN");
    }

    #[test]
    fn format_storage_form_round_trips() {
        assert_eq!(
            PublishingFormat::Hardcover.as_str().parse(),
            Ok(PublishingFormat::Hardcover)
        );
    }
}
