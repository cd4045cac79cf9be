//! Numero consecutivo: the 20-digit document sequence number.
//!
//! Layout: branch office (3) + terminal (5) + document type (2) + sequence (10).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::ErrorKind;
use super::key::KeyFields;

/// Total consecutivo length.
pub const CONSECUTIVE_LENGTH: usize = 20;

const MAX_BRANCH: u16 = 999;
const MAX_TERMINAL: u32 = 99_999;
const MAX_SEQUENCE: u64 = 9_999_999_999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConsecutiveError {
    #[error("consecutivo must be exactly 20 digits, got {0} characters")]
    Length(usize),

    #[error("consecutivo contains non-digit {found:?} at position {position}")]
    Charset { position: usize, found: char },

    #[error("consecutivo document type '{0}' is not a known document type")]
    UnknownDocumentType(String),

    #[error("clave embeds consecutivo '{key}' but numero consecutivo is '{consecutive}'")]
    Mismatch { key: String, consecutive: String },

    #[error("{segment} value {value} does not fit its consecutivo segment")]
    OutOfRange { segment: &'static str, value: u64 },
}

impl ConsecutiveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownDocumentType(_) => ErrorKind::Catalog,
            Self::Mismatch { .. } => ErrorKind::Consistency,
            _ => ErrorKind::Format,
        }
    }
}

/// Tipo de comprobante encoded in the consecutivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// 01: Factura electrónica.
    FacturaElectronica,
    /// 02: Nota de débito electrónica.
    NotaDebito,
    /// 03: Nota de crédito electrónica.
    NotaCredito,
    /// 04: Tiquete electrónico.
    TiqueteElectronico,
    /// 05: Confirmación de aceptación.
    Aceptacion,
    /// 06: Confirmación de aceptación parcial.
    AceptacionParcial,
    /// 07: Confirmación de rechazo.
    Rechazo,
    /// 08: Factura electrónica de compra.
    FacturaCompra,
    /// 09: Factura electrónica de exportación.
    FacturaExportacion,
    /// 10: Recibo electrónico de pago.
    ReciboPago,
}

impl DocumentType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::FacturaElectronica => "01",
            Self::NotaDebito => "02",
            Self::NotaCredito => "03",
            Self::TiqueteElectronico => "04",
            Self::Aceptacion => "05",
            Self::AceptacionParcial => "06",
            Self::Rechazo => "07",
            Self::FacturaCompra => "08",
            Self::FacturaExportacion => "09",
            Self::ReciboPago => "10",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::FacturaElectronica),
            "02" => Some(Self::NotaDebito),
            "03" => Some(Self::NotaCredito),
            "04" => Some(Self::TiqueteElectronico),
            "05" => Some(Self::Aceptacion),
            "06" => Some(Self::AceptacionParcial),
            "07" => Some(Self::Rechazo),
            "08" => Some(Self::FacturaCompra),
            "09" => Some(Self::FacturaExportacion),
            "10" => Some(Self::ReciboPago),
            _ => None,
        }
    }
}

/// The decomposed segments of a consecutivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConsecutiveFields {
    /// Casa matriz / sucursal, 0..=999.
    pub branch: u16,
    /// Terminal / punto de venta, 0..=99999.
    pub terminal: u32,
    pub document_type: DocumentType,
    /// Sequential number, 0..=9999999999.
    pub sequence: u64,
}

impl ConsecutiveFields {
    pub fn new(
        branch: u16,
        terminal: u32,
        document_type: DocumentType,
        sequence: u64,
    ) -> Result<Self, ConsecutiveError> {
        if branch > MAX_BRANCH {
            return Err(ConsecutiveError::OutOfRange {
                segment: "branch",
                value: u64::from(branch),
            });
        }
        if terminal > MAX_TERMINAL {
            return Err(ConsecutiveError::OutOfRange {
                segment: "terminal",
                value: u64::from(terminal),
            });
        }
        if sequence > MAX_SEQUENCE {
            return Err(ConsecutiveError::OutOfRange {
                segment: "sequence",
                value: sequence,
            });
        }
        Ok(Self {
            branch,
            terminal,
            document_type,
            sequence,
        })
    }

    /// Render the 20-digit consecutivo.
    pub fn encode(&self) -> String {
        format!(
            "{:03}{:05}{}{:010}",
            self.branch,
            self.terminal,
            self.document_type.code(),
            self.sequence
        )
    }
}

impl fmt::Display for ConsecutiveFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Parse and validate a consecutivo.
pub fn validate_consecutive(consecutivo: &str) -> Result<ConsecutiveFields, ConsecutiveError> {
    let len = consecutivo.chars().count();
    if len != CONSECUTIVE_LENGTH {
        return Err(ConsecutiveError::Length(len));
    }
    if let Some((position, found)) = consecutivo
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_digit())
    {
        return Err(ConsecutiveError::Charset { position, found });
    }

    let document_type = extract_code(consecutivo)?;
    // Segments are digit-only and bounded by width, so these parses cannot fail.
    let branch = consecutivo[0..3].parse().unwrap_or_default();
    let terminal = consecutivo[3..8].parse().unwrap_or_default();
    let sequence = consecutivo[10..20].parse().unwrap_or_default();

    Ok(ConsecutiveFields {
        branch,
        terminal,
        document_type,
        sequence,
    })
}

/// Extract the document type from a consecutivo.
pub fn extract_document_type(consecutivo: &str) -> Result<DocumentType, ConsecutiveError> {
    validate_consecutive(consecutivo).map(|fields| fields.document_type)
}

/// Check that the consecutivo embedded in a clave equals `numero_consecutivo`.
pub fn check_key_consecutive(
    key: &KeyFields,
    numero_consecutivo: &str,
) -> Result<(), ConsecutiveError> {
    if key.consecutive != numero_consecutivo {
        return Err(ConsecutiveError::Mismatch {
            key: key.consecutive.clone(),
            consecutive: numero_consecutivo.to_string(),
        });
    }
    Ok(())
}

fn extract_code(consecutivo: &str) -> Result<DocumentType, ConsecutiveError> {
    let code = &consecutivo[8..10];
    DocumentType::from_code(code)
        .ok_or_else(|| ConsecutiveError::UnknownDocumentType(code.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::key::decompose_key;

    #[test]
    fn parses_segments() {
        let fields = validate_consecutive("00100001010000000001").unwrap();
        assert_eq!(fields.branch, 1);
        assert_eq!(fields.terminal, 1);
        assert_eq!(fields.document_type, DocumentType::FacturaElectronica);
        assert_eq!(fields.sequence, 1);
        assert_eq!(fields.encode(), "00100001010000000001");
    }

    #[test]
    fn encodes_with_padding() {
        let fields = ConsecutiveFields::new(2, 15, DocumentType::NotaCredito, 4321).unwrap();
        assert_eq!(fields.to_string(), "00200015030000004321");
    }

    #[test]
    fn rejects_bad_shapes() {
        assert_eq!(
            validate_consecutive("0010000101"),
            Err(ConsecutiveError::Length(10))
        );
        assert_eq!(
            validate_consecutive("0010000101000000000X"),
            Err(ConsecutiveError::Charset {
                position: 19,
                found: 'X'
            })
        );
    }

    #[test]
    fn unknown_document_type_is_catalog_error() {
        let err = validate_consecutive("00100001990000000001").unwrap_err();
        assert_eq!(err, ConsecutiveError::UnknownDocumentType("99".into()));
        assert_eq!(err.kind(), ErrorKind::Catalog);
    }

    #[test]
    fn extracts_document_type() {
        assert_eq!(
            extract_document_type("00100001040000000007"),
            Ok(DocumentType::TiqueteElectronico)
        );
    }

    #[test]
    fn new_rejects_out_of_range_segments() {
        assert!(ConsecutiveFields::new(1000, 1, DocumentType::FacturaElectronica, 1).is_err());
        assert!(ConsecutiveFields::new(1, 100_000, DocumentType::FacturaElectronica, 1).is_err());
        assert!(
            ConsecutiveFields::new(1, 1, DocumentType::FacturaElectronica, 10_000_000_000)
                .is_err()
        );
    }

    #[test]
    fn key_consistency() {
        let key = decompose_key("50612122300310112345600100001010000000001111111111").unwrap();
        assert!(check_key_consecutive(&key, "00100001010000000001").is_ok());

        let err = check_key_consecutive(&key, "00100001010000000002").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Consistency);
    }
}
