//! ISBN format checks.
//!
//! Only the shape of an ISBN is checked (10 or 13 digits), the check digit is not verified and
//! an ISBN-10 ending in `X` is rejected.

use std::{fmt, str::FromStr};

use crate::{Error, ErrorKind};

/// A 10 or 13 digit ISBN with any hyphens removed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Isbn(String);

/// Checks if `input` is a 10 or 13 digit ISBN, hyphens are allowed anywhere.
#[must_use]
pub fn is_valid_isbn_format(input: &str) -> bool {
    is_plain_isbn(&input.replace('-', ""))
}

fn is_plain_isbn(input: &str) -> bool {
    matches!(input.len(), 10 | 13) && input.bytes().all(|b| b.is_ascii_digit())
}

impl Isbn {
    /// Parses `input` as an ISBN, hyphens are allowed and are removed.
    ///
    /// # Errors
    ///
    /// An [`Err`] of [`ErrorKind::InvalidIsbn`] is returned when `input` without hyphens is not
    /// 10 or 13 digits.
    pub fn parse(input: &str) -> Result<Self, Error> {
        if is_valid_isbn_format(input) {
            Ok(Self(input.replace('-', "")))
        } else {
            Err(Error::new(
                ErrorKind::InvalidIsbn,
                format!("Invalid ISBN format: '{input}'. Please provide a 10 or 13 digit ISBN, hyphens are allowed."),
            ))
        }
    }

    /// Parses `input` as an ISBN made of digits only.
    ///
    /// # Errors
    ///
    /// An [`Err`] of [`ErrorKind::InvalidIsbn`] is returned when `input` is not exactly 10 or 13
    /// digits, this includes an `input` containing hyphens.
    pub fn parse_plain(input: &str) -> Result<Self, Error> {
        if is_plain_isbn(input) {
            Ok(Self(input.to_owned()))
        } else {
            Err(Error::new(
                ErrorKind::InvalidIsbn,
                "Invalid ISBN format. Must be 10 or 13 digits.",
            ))
        }
    }

    /// The digits of the ISBN.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Isbn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
