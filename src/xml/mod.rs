//! Canonical XML rendering for Factura Electrónica v4.4.
//!
//! # Example
//!
//! ```
//! use factura_cr::core::*;
//! use factura_cr::xml;
//!
//! fn checked_xml(invoice: &ElectronicInvoice) -> Result<String, FacturaError> {
//!     xml::render_validated_invoice(invoice, &Catalogs::default())
//! }
//! ```

mod factura;
pub(crate) mod xml_utils;

pub use factura::{render_invoice, render_invoice_bytes, render_validated_invoice};
pub use xml_utils::{format_datetime, format_decimal};

/// v4.4 Factura Electrónica namespace.
pub const FACTURA_NAMESPACE: &str =
    "https://cdn.comprobanteselectronicos.go.cr/xml-schemas/v4.4/facturaElectronica";

/// Published location of the v4.4 Factura Electrónica schema.
pub const FACTURA_SCHEMA_LOCATION: &str =
    "https://cdn.comprobanteselectronicos.go.cr/xml-schemas/v4.4/facturaElectronica.xsd";

/// XML Schema instance namespace.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Fractional digits per field kind.
pub mod precision {
    /// Monetary amounts and totals.
    pub const MONEY: u32 = 2;
    pub const UNIT_PRICE: u32 = 5;
    pub const QUANTITY: u32 = 3;
    /// Tax rates and percentages.
    pub const RATE: u32 = 2;
    pub const EXCHANGE_RATE: u32 = 5;
    pub const FACTOR_IVA: u32 = 4;
}
