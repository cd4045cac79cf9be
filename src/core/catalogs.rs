//! Runtime code catalogs.
//!
//! Activity, tax, unit and currency codes change by resolution more often
//! than this crate is released, so they are data rather than enums. The
//! built-in tables cover the common cases; a full annex can be loaded from
//! JSON:
//!
//! ```json
//! {
//!   "activity_codes": ["620100", "721001"],
//!   "unit_codes": ["Unid", "Sp"]
//! }
//! ```
//!
//! Any table missing from the JSON falls back to the built-in one.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::FacturaError;
use super::{activities, currencies, tax_codes, units};

/// Code tables consulted by [`super::validate_invoice`].
///
/// Immutable once built; share it by reference across threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalogs {
    activity_codes: BTreeSet<String>,
    tax_codes: BTreeSet<String>,
    unit_codes: BTreeSet<String>,
    currency_codes: BTreeSet<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalogs {
    activity_codes: Option<Vec<String>>,
    tax_codes: Option<Vec<String>>,
    unit_codes: Option<Vec<String>>,
    currency_codes: Option<Vec<String>>,
}

impl Default for Catalogs {
    fn default() -> Self {
        Self {
            activity_codes: owned(activities::ACTIVITY_CODES),
            tax_codes: owned(tax_codes::TAX_CODES),
            unit_codes: owned(units::UNIT_CODES),
            currency_codes: owned(currencies::CURRENCY_CODES),
        }
    }
}

impl Catalogs {
    /// Load catalogs from a JSON object with optional `activity_codes`,
    /// `tax_codes`, `unit_codes` and `currency_codes` arrays.
    pub fn from_json(json: &str) -> Result<Self, FacturaError> {
        let raw: RawCatalogs = serde_json::from_str(json)
            .map_err(|e| FacturaError::Catalog(format!("invalid catalog JSON: {e}")))?;

        let defaults = Self::default();
        Ok(Self {
            activity_codes: table("activity_codes", raw.activity_codes, defaults.activity_codes)?,
            tax_codes: table("tax_codes", raw.tax_codes, defaults.tax_codes)?,
            unit_codes: table("unit_codes", raw.unit_codes, defaults.unit_codes)?,
            currency_codes: table("currency_codes", raw.currency_codes, defaults.currency_codes)?,
        })
    }

    pub fn with_activity_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.activity_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tax_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tax_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_unit_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unit_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_currency_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.currency_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_known_activity(&self, code: &str) -> bool {
        self.activity_codes.contains(code)
    }

    pub fn is_known_tax_code(&self, code: &str) -> bool {
        self.tax_codes.contains(code)
    }

    pub fn is_known_unit(&self, code: &str) -> bool {
        self.unit_codes.contains(code)
    }

    pub fn is_known_currency(&self, code: &str) -> bool {
        self.currency_codes.contains(code)
    }
}

fn owned(codes: &[&str]) -> BTreeSet<String> {
    codes.iter().map(|c| (*c).to_string()).collect()
}

fn table(
    name: &str,
    loaded: Option<Vec<String>>,
    fallback: BTreeSet<String>,
) -> Result<BTreeSet<String>, FacturaError> {
    match loaded {
        Some(codes) if codes.is_empty() => Err(FacturaError::Catalog(format!(
            "{name} must not be empty; omit the key to use the built-in table"
        ))),
        Some(codes) => Ok(codes.into_iter().collect()),
        None => {
            debug!(table = name, "catalog table not supplied, using built-in codes");
            Ok(fallback)
        }
    }
}
