//! Clave: the 50-digit document key.
//!
//! Layout (all digits):
//!
//! | Segment       | Width | Example        |
//! |---------------|-------|----------------|
//! | Country       | 3     | `506`          |
//! | Issue date    | 6     | `121223` (ddmmyy) |
//! | Issuer ID     | 12    | `003101123456` |
//! | Consecutivo   | 20    | see [`super::consecutive`] |
//! | Security code | 8     | `11111111`     |
//! | Situation     | 1     | `1`            |

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::consecutive::{ConsecutiveError, ConsecutiveFields, validate_consecutive};
use super::error::ErrorKind;
use super::types::Identification;

/// Total clave length.
pub const KEY_LENGTH: usize = 50;

/// Costa Rica's calling code, the fixed clave prefix.
pub const COUNTRY_CODE: &str = "506";

const DATE: std::ops::Range<usize> = 3..9;
const ISSUER: std::ops::Range<usize> = 9..21;
const CONSECUTIVE: std::ops::Range<usize> = 21..41;
const SECURITY: std::ops::Range<usize> = 41..49;
const SITUATION: usize = 49;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum KeyError {
    #[error("clave must be exactly 50 digits, got {0} characters")]
    Length(usize),

    #[error("clave contains non-digit {found:?} at position {position}")]
    Charset { position: usize, found: char },

    #[error("clave embeds an invalid issue date '{0}' (expected ddmmyy)")]
    Date(String),

    #[error("clave country prefix must be 506, got '{0}'")]
    Country(String),

    #[error("clave situation digit must be 1, 2 or 3, got '{0}'")]
    Situation(char),

    #[error("clave issuer segment '{found}' does not match emisor identification '{expected}'")]
    IssuerMismatch { expected: String, found: String },

    #[error("identification '{0}' cannot be embedded in a clave")]
    Issuer(String),

    #[error("security code {0} does not fit in 8 digits")]
    SecurityCode(u32),
}

impl KeyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IssuerMismatch { .. } => ErrorKind::Consistency,
            _ => ErrorKind::Format,
        }
    }
}

/// Situación del comprobante.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Situation {
    /// 1: Normal.
    Normal,
    /// 2: Contingencia.
    Contingencia,
    /// 3: Sin internet.
    SinInternet,
}

impl Situation {
    pub fn code(&self) -> char {
        match self {
            Self::Normal => '1',
            Self::Contingencia => '2',
            Self::SinInternet => '3',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            '1' => Some(Self::Normal),
            '2' => Some(Self::Contingencia),
            '3' => Some(Self::SinInternet),
            _ => None,
        }
    }
}

/// The decomposed segments of a clave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFields {
    pub issue_date: NaiveDate,
    /// Issuer identification, zero-padded to 12 digits.
    pub issuer: String,
    /// The 20-digit consecutivo segment.
    pub consecutive: String,
    /// 8-digit security code.
    pub security_code: String,
    pub situation: Situation,
}

impl KeyFields {
    /// Assemble key fields from typed parts.
    pub fn new(
        issue_date: NaiveDate,
        issuer: &Identification,
        consecutive: &ConsecutiveFields,
        security_code: u32,
        situation: Situation,
    ) -> Result<Self, KeyError> {
        if !(2000..=2099).contains(&issue_date.year()) {
            return Err(KeyError::Date(issue_date.format("%d%m%y").to_string()));
        }
        if security_code > 99_999_999 {
            return Err(KeyError::SecurityCode(security_code));
        }
        let issuer = issuer
            .key_segment()
            .ok_or_else(|| KeyError::Issuer(issuer.numero.clone()))?;
        Ok(Self {
            issue_date,
            issuer,
            consecutive: consecutive.encode(),
            security_code: format!("{security_code:08}"),
            situation,
        })
    }

    /// Render the 50-digit clave.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(KEY_LENGTH);
        out.push_str(COUNTRY_CODE);
        out.push_str(&self.issue_date.format("%d%m%y").to_string());
        out.push_str(&self.issuer);
        out.push_str(&self.consecutive);
        out.push_str(&self.security_code);
        out.push(self.situation.code());
        out
    }

    /// Parse the embedded consecutivo.
    pub fn consecutive_fields(&self) -> Result<ConsecutiveFields, ConsecutiveError> {
        validate_consecutive(&self.consecutive)
    }

    /// Whether the embedded issuer matches `identification` once zero-padded.
    pub fn issuer_matches(&self, identification: &Identification) -> bool {
        identification.key_segment().as_deref() == Some(self.issuer.as_str())
    }
}

impl fmt::Display for KeyFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Structurally parse a clave: length, charset, country, date and situation.
///
/// Does not compare the issuer against a party; see [`validate_key`].
pub fn decompose_key(clave: &str) -> Result<KeyFields, KeyError> {
    let len = clave.chars().count();
    if len != KEY_LENGTH {
        return Err(KeyError::Length(len));
    }
    if let Some((position, found)) = clave.chars().enumerate().find(|(_, c)| !c.is_ascii_digit())
    {
        return Err(KeyError::Charset { position, found });
    }

    // All ASCII from here on, byte ranges are char ranges.
    let country = &clave[..3];
    if country != COUNTRY_CODE {
        return Err(KeyError::Country(country.to_string()));
    }

    let date = &clave[DATE];
    let issue_date = parse_ddmmyy(date).ok_or_else(|| KeyError::Date(date.to_string()))?;

    let situation_char = clave.as_bytes()[SITUATION] as char;
    let situation =
        Situation::from_code(situation_char).ok_or(KeyError::Situation(situation_char))?;

    Ok(KeyFields {
        issue_date,
        issuer: clave[ISSUER].to_string(),
        consecutive: clave[CONSECUTIVE].to_string(),
        security_code: clave[SECURITY].to_string(),
        situation,
    })
}

/// Parse a clave and check its issuer segment against the emisor.
pub fn validate_key(clave: &str, emisor: &Identification) -> Result<KeyFields, KeyError> {
    let fields = decompose_key(clave)?;
    if !fields.issuer_matches(emisor) {
        return Err(KeyError::IssuerMismatch {
            expected: emisor.numero.clone(),
            found: fields.issuer,
        });
    }
    Ok(fields)
}

fn parse_ddmmyy(s: &str) -> Option<NaiveDate> {
    let day: u32 = s.get(0..2)?.parse().ok()?;
    let month: u32 = s.get(2..4)?.parse().ok()?;
    let year: i32 = s.get(4..6)?.parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month, day)
}
