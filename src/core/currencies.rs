//! ISO 4217 currency codes and their minor units.
//!
//! Covers the currencies Costa Rican issuers invoice in: the colón, the
//! regional currencies and the major trading currencies.

/// The domestic currency; the only one that needs no exchange rate.
pub const DOMESTIC_CURRENCY: &str = "CRC";

/// Check whether `code` is a built-in ISO 4217 currency code.
pub fn is_known_currency_code(code: &str) -> bool {
    CURRENCY_CODES.binary_search(&code).is_ok()
}

/// Number of decimal digits in the currency's minor unit.
///
/// Unknown codes are treated as two-decimal currencies.
pub fn minor_units(code: &str) -> u32 {
    if ZERO_DECIMAL_CODES.binary_search(&code).is_ok() {
        0
    } else {
        2
    }
}

/// Sorted for binary search.
pub(crate) static CURRENCY_CODES: &[&str] = &[
    "ARS", // Argentine Peso
    "AUD", // Australian Dollar
    "BOB", // Boliviano
    "BRL", // Brazilian Real
    "BZD", // Belize Dollar
    "CAD", // Canadian Dollar
    "CHF", // Swiss Franc
    "CLP", // Chilean Peso
    "CNY", // Chinese Yuan
    "COP", // Colombian Peso
    "CRC", // Costa Rican Colón
    "DKK", // Danish Krone
    "DOP", // Dominican Peso
    "EUR", // Euro
    "GBP", // Pound Sterling
    "GTQ", // Guatemalan Quetzal
    "HKD", // Hong Kong Dollar
    "HNL", // Honduran Lempira
    "INR", // Indian Rupee
    "ISK", // Icelandic Krona
    "JPY", // Japanese Yen
    "KRW", // South Korean Won
    "MXN", // Mexican Peso
    "NIO", // Nicaraguan Córdoba
    "NOK", // Norwegian Krone
    "NZD", // New Zealand Dollar
    "PAB", // Panamanian Balboa
    "PEN", // Peruvian Sol
    "PYG", // Paraguayan Guaraní
    "SEK", // Swedish Krona
    "SGD", // Singapore Dollar
    "TWD", // New Taiwan Dollar
    "USD", // US Dollar
    "UYU", // Uruguayan Peso
    "VND", // Vietnamese Dong
    "ZAR", // South African Rand
];

static ZERO_DECIMAL_CODES: &[&str] = &[
    "CLP",
    "ISK",
    "JPY",
    "KRW",
    "PYG",
    "VND",
];
