//! # factura-cr
//!
//! Costa Rican electronic invoicing core: the Factura Electrónica v4.4
//! document model, clave and consecutivo codecs, a validation engine that
//! reports every violation at once, and a deterministic XML serializer.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Totals are supplied by the caller and checked, not computed.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::DateTime;
//! use factura_cr::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new(
//!     "50612122300310112345600100001010000000001111111111",
//!     "00100001010000000001",
//!     DateTime::parse_from_rfc3339("2023-12-12T10:30:00-06:00").unwrap(),
//! )
//! .codigo_actividad("620100")
//! .emisor(EmisorBuilder::new(
//!     "Soluciones Digitales S.A.",
//!     Identification::new(IdentificationType::Juridica, "3101123456"),
//! ).build())
//! .medio_pago(PaymentMethod::Efectivo)
//! .add_line(LineBuilder::new(1, "Consultoría", dec!(1), "Sp", dec!(100))
//!     .impuesto(Tax::iva(TaxRateCode::General, dec!(13)))
//!     .totals(dec!(100), dec!(100), dec!(113))
//!     .build()
//!     .unwrap())
//! .resumen(InvoiceSummary {
//!     total_serv_gravados: dec!(100),
//!     total_gravado: dec!(100),
//!     total_venta: dec!(100),
//!     total_venta_neta: dec!(100),
//!     total_impuestos: dec!(13),
//!     total_comprobante: dec!(113),
//!     ..InvoiceSummary::zeroed("CRC")
//! })
//! .build()
//! .unwrap();
//!
//! let xml = factura_cr::xml::render_invoice(&invoice).unwrap();
//! assert!(xml.contains("<TotalComprobante>113.00</TotalComprobante>"));
//! assert!(!xml.contains("<TipoCambio>"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Document model, catalogs, clave/consecutivo codecs, validation |
//! | `xml` (default) | Canonical v4.4 XML rendering |
//! | `hacienda` | Reception API request/response payloads (Base64) |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "xml")]
pub mod xml;

#[cfg(feature = "hacienda")]
pub mod hacienda;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
