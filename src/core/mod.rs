//! Core document model, codecs and validation.
//!
//! Covers the Factura Electrónica v4.4 value model, the clave and
//! consecutivo codecs, the runtime code catalogs and the validation engine.

pub mod activities;
mod builder;
mod catalogs;
mod consecutive;
pub mod currencies;
mod error;
mod key;
pub mod tax_codes;
mod types;
pub mod units;
mod validation;

pub use activities::is_known_activity_code;
pub use builder::*;
pub use catalogs::*;
pub use consecutive::*;
pub use currencies::is_known_currency_code;
pub use error::*;
pub use key::*;
pub use tax_codes::is_known_tax_code;
pub use types::*;
pub use units::is_known_unit_code;
pub use validation::*;
