//! Resume identifier parsing
//!
//! A resume is addressed by its secure identifier (sid), an ASCII alphanumeric
//! token. Users usually copy the public page URL instead, so both forms are
//! accepted:
//! - `"AbC123"` → `AbC123`
//! - `"https://resume.io/r/AbC123"` → `AbC123`

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static RE_SID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());
static RE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());
static RE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https://resume\.io/r/([A-Za-z0-9]+)").unwrap());

/// Public page of a resume
const RESUME_PAGE: &str = "https://resume.io/r/";

/// Validated secure identifier of a resume
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResumeId(String);

impl ResumeId {
    /// Parse a bare token or a `https://resume.io/r/<sid>` page URL
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if RE_SID.is_match(input) {
            return Ok(ResumeId(input.to_string()));
        }

        if let Some(caps) = RE_URL.captures(input) {
            return Ok(ResumeId(caps[1].to_string()));
        }

        Err(Error::InvalidResumeId(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Public page URL for this resume
    pub fn page_url(&self) -> String {
        format!("{}{}", RESUME_PAGE, self.0)
    }
}

impl fmt::Display for ResumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ResumeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ResumeId::parse(s)
    }
}

/// Whether the input is a purely numeric id (user id, not a sid)
pub fn is_numeric_id(input: &str) -> bool {
    RE_ID.is_match(input.trim())
}
