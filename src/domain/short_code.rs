// SPDX-License-Identifier: MPL-2.0
//! Short codes addressing a memory folder.
//!
//! A code is six characters drawn from `A-Z0-9`. The public route of a folder
//! is `{base}/view/{CODE}`, and QR codes encode that URL verbatim.

use crate::config::{SHORT_CODE_ALPHABET, SHORT_CODE_LENGTH};
use crate::error::Error;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Validated, uppercase folder code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortCode(String);

impl ShortCode {
    /// Parses a code typed by a visitor. Case is ignored, surrounding
    /// whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCode`] when the input is not six alphanumeric
    /// ASCII characters.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let code = input.trim().to_ascii_uppercase();
        let valid = code.len() == SHORT_CODE_LENGTH
            && code.bytes().all(|b| SHORT_CODE_ALPHABET.as_bytes().contains(&b));
        if valid {
            Ok(Self(code))
        } else {
            Err(Error::InvalidCode(input.to_string()))
        }
    }

    /// Draws a fresh random code.
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    /// Draws a code from the given generator.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let alphabet = SHORT_CODE_ALPHABET.as_bytes();
        let code = (0..SHORT_CODE_LENGTH)
            .map(|_| char::from(alphabet[rng.random_range(0..alphabet.len())]))
            .collect();
        Self(code)
    }

    /// Extracts the code from a share link: the path segment right after
    /// `view`, uppercased.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());
        segments.find(|segment| *segment == "view")?;
        let candidate = segments.next()?;
        Self::parse(candidate).ok()
    }

    /// Accepts either a bare code or a share link.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCode`] when neither form yields a valid code.
    pub fn from_code_or_url(input: &str) -> Result<Self, Error> {
        Self::parse(input).or_else(|err| Self::from_url(input).ok_or(err))
    }

    /// Public viewer URL for this code.
    #[must_use]
    pub fn public_url(&self, base: &str) -> String {
        format!("{}/view/{}", base.trim_end_matches('/'), self.0)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ShortCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
