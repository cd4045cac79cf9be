use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::{ElectronicInvoice, FacturaError, Identification};
use crate::xml::{format_datetime, render_invoice_bytes};

/// Identification as the reception API spells it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyIdentification {
    pub tipo_identificacion: String,
    pub numero_identificacion: String,
}

impl From<&Identification> for PartyIdentification {
    fn from(id: &Identification) -> Self {
        Self {
            tipo_identificacion: id.tipo.code().to_string(),
            numero_identificacion: id.numero.clone(),
        }
    }
}

/// Body of a `POST /recepcion` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub clave: String,
    pub fecha: String,
    pub emisor: PartyIdentification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receptor: Option<PartyIdentification>,
    /// Base64 of the (signed) XML document.
    pub comprobante_xml: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consecutivo_receptor: Option<String>,
}

impl SubmissionRequest {
    /// Render `invoice` and wrap the unsigned XML.
    pub fn from_invoice(invoice: &ElectronicInvoice) -> Result<Self, FacturaError> {
        let xml = render_invoice_bytes(invoice)?;
        Ok(Self::with_xml(invoice, &xml))
    }

    /// Wrap an already rendered (typically signed) XML document.
    pub fn with_xml(invoice: &ElectronicInvoice, xml: &[u8]) -> Self {
        debug!(clave = %invoice.clave, bytes = xml.len(), "building submission request");
        Self {
            clave: invoice.clave.clone(),
            fecha: format_datetime(&invoice.fecha_emision),
            emisor: PartyIdentification::from(&invoice.emisor.identificacion),
            receptor: invoice
                .receptor
                .as_ref()
                .and_then(|r| r.identificacion.as_ref())
                .map(PartyIdentification::from),
            comprobante_xml: STANDARD.encode(xml),
            consecutivo_receptor: None,
        }
    }

    /// Consecutivo assigned by the receiver, for acceptance messages.
    pub fn consecutivo_receptor(mut self, consecutivo: impl Into<String>) -> Self {
        self.consecutivo_receptor = Some(consecutivo.into());
        self
    }

    pub fn to_json(&self) -> Result<String, FacturaError> {
        serde_json::to_string(self)
            .map_err(|e| FacturaError::Payload(format!("JSON encode error: {e}")))
    }

    /// The XML document carried by this request.
    pub fn decode_xml(&self) -> Result<Vec<u8>, FacturaError> {
        STANDARD
            .decode(&self.comprobante_xml)
            .map_err(|e| FacturaError::Payload(format!("comprobanteXml is not Base64: {e}")))
    }
}

/// Processing state reported in `ind-estado`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceptionStatus {
    Recibido,
    Procesando,
    Aceptado,
    Rechazado,
    Error,
    Other(String),
}

impl ReceptionStatus {
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "recibido" => Self::Recibido,
            "procesando" => Self::Procesando,
            "aceptado" => Self::Aceptado,
            "rechazado" => Self::Rechazado,
            "error" => Self::Error,
            _ => Self::Other(value.to_string()),
        }
    }

    /// Whether Hacienda has finished with the document.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Aceptado | Self::Rechazado | Self::Error)
    }
}

/// Body returned by `GET /recepcion/{clave}`.
///
/// Fields this crate does not interpret are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceptionResponse {
    pub clave: String,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(rename = "ind-estado", default)]
    pub ind_estado: Option<String>,
    /// Base64 of Hacienda's signed response message.
    #[serde(rename = "respuesta-xml", default)]
    pub respuesta_xml: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReceptionResponse {
    pub fn from_json(json: &str) -> Result<Self, FacturaError> {
        serde_json::from_str(json)
            .map_err(|e| FacturaError::Payload(format!("invalid reception response: {e}")))
    }

    pub fn status(&self) -> Option<ReceptionStatus> {
        self.ind_estado.as_deref().map(ReceptionStatus::parse)
    }

    /// Decode `respuesta-xml`, if present.
    pub fn response_xml(&self) -> Result<Option<String>, FacturaError> {
        let Some(encoded) = &self.respuesta_xml else {
            return Ok(None);
        };
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| FacturaError::Payload(format!("respuesta-xml is not Base64: {e}")))?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| FacturaError::Payload(format!("respuesta-xml is not UTF-8: {e}")))
    }
}
