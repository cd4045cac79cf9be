use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// FacturaElectronica, the top-level document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectronicInvoice {
    /// Clave: 50-digit document key.
    pub clave: String,
    /// CodigoActividad: issuer's economic activity code.
    pub codigo_actividad: String,
    /// NumeroConsecutivo: 20-digit sequence number.
    pub numero_consecutivo: String,
    /// FechaEmision: issue timestamp with UTC offset.
    pub fecha_emision: DateTime<FixedOffset>,
    pub emisor: Emisor,
    pub receptor: Option<Receptor>,
    pub condicion_venta: SaleCondition,
    /// PlazoCredito in days; required iff `condicion_venta` is credit.
    pub plazo_credito: Option<u32>,
    /// MedioPago entries, emitted in the given order.
    pub medios_pago: Vec<PaymentMethod>,
    /// DetalleServicio lines.
    pub detalle_servicio: Vec<InvoiceLine>,
    /// Document-level OtrosCargos.
    #[serde(default)]
    pub otros_cargos: Vec<OtherCharge>,
    pub resumen: InvoiceSummary,
    /// InformacionReferencia blocks.
    #[serde(default)]
    pub informacion_referencia: Vec<ReferenceInformation>,
}

/// Emisor: the issuing taxpayer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emisor {
    pub nombre: String,
    pub identificacion: Identification,
    pub nombre_comercial: Option<String>,
    pub ubicacion: Option<Location>,
    pub telefono: Option<Phone>,
    pub correo_electronico: Option<String>,
}

/// Receptor: the recipient. Identification is optional for walk-in buyers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receptor {
    pub nombre: String,
    pub identificacion: Option<Identification>,
    /// Free-form foreign document number (IdentificacionExtranjero).
    pub identificacion_extranjero: Option<String>,
    pub nombre_comercial: Option<String>,
    pub ubicacion: Option<Location>,
    pub telefono: Option<Phone>,
    pub correo_electronico: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identification {
    pub tipo: IdentificationType,
    pub numero: String,
}

impl Identification {
    pub fn new(tipo: IdentificationType, numero: impl Into<String>) -> Self {
        Self {
            tipo,
            numero: numero.into(),
        }
    }

    /// The 12-digit issuer segment embedded in a clave.
    ///
    /// Returns `None` when the number is not purely numeric or is longer
    /// than the segment (e.g. foreign documents).
    pub fn key_segment(&self) -> Option<String> {
        if self.numero.is_empty()
            || self.numero.len() > 12
            || !self.numero.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        Some(format!("{:0>12}", self.numero))
    }
}

/// Identification type catalog (Tipo de identificación).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentificationType {
    /// 01: Cédula física (9 digits).
    Fisica,
    /// 02: Cédula jurídica (10 digits).
    Juridica,
    /// 03: DIMEX (11 or 12 digits).
    Dimex,
    /// 04: NITE (10 digits).
    Nite,
    /// 05: Foreign document (1–20 alphanumerics).
    Extranjero,
}

impl IdentificationType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fisica => "01",
            Self::Juridica => "02",
            Self::Dimex => "03",
            Self::Nite => "04",
            Self::Extranjero => "05",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::Fisica),
            "02" => Some(Self::Juridica),
            "03" => Some(Self::Dimex),
            "04" => Some(Self::Nite),
            "05" => Some(Self::Extranjero),
            _ => None,
        }
    }

    /// Check a number's length and charset for this type.
    pub fn accepts(&self, numero: &str) -> bool {
        let digits = !numero.is_empty() && numero.bytes().all(|b| b.is_ascii_digit());
        match self {
            Self::Fisica => digits && numero.len() == 9,
            Self::Juridica | Self::Nite => digits && numero.len() == 10,
            Self::Dimex => digits && matches!(numero.len(), 11 | 12),
            Self::Extranjero => {
                (1..=20).contains(&numero.len())
                    && numero.bytes().all(|b| b.is_ascii_alphanumeric())
            }
        }
    }

    /// Human-readable length rule, used in error messages.
    pub fn length_rule(&self) -> &'static str {
        match self {
            Self::Fisica => "9 digits",
            Self::Juridica | Self::Nite => "10 digits",
            Self::Dimex => "11 or 12 digits",
            Self::Extranjero => "1 to 20 alphanumeric characters",
        }
    }
}

/// Ubicacion: province/canton/district codes plus free-text detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// 1 digit.
    pub provincia: String,
    /// 2 digits.
    pub canton: String,
    /// 2 digits.
    pub distrito: String,
    pub barrio: Option<String>,
    pub otras_senas: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phone {
    pub codigo_pais: String,
    pub numero: String,
}

impl Phone {
    /// Costa Rican number (country code 506).
    pub fn costa_rica(numero: impl Into<String>) -> Self {
        Self {
            codigo_pais: "506".into(),
            numero: numero.into(),
        }
    }
}

/// LineaDetalle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub numero_linea: u32,
    /// Seller's own product code (CodigoComercial, type 01).
    pub codigo: Option<String>,
    pub cantidad: Decimal,
    /// Unit of measure from the Hacienda catalog (e.g. "Unid", "Sp").
    pub unidad_medida: String,
    pub detalle: String,
    pub precio_unitario: Decimal,
    /// cantidad * precio_unitario.
    pub monto_total: Decimal,
    pub descuento: Option<Discount>,
    /// monto_total - descuento.
    pub sub_total: Decimal,
    /// Taxable base when it differs from `sub_total`.
    pub base_imponible: Option<Decimal>,
    pub impuesto: Option<Tax>,
    /// Tax after exoneration.
    pub impuesto_neto: Option<Decimal>,
    /// sub_total + line tax.
    pub monto_total_linea: Decimal,
}

impl InvoiceLine {
    /// Tax amount this line contributes to the summary: net tax if
    /// declared, otherwise the gross tax amount.
    pub fn tax_amount(&self) -> Decimal {
        match (self.impuesto_neto, &self.impuesto) {
            (Some(neto), _) => neto,
            (None, Some(tax)) => tax.monto,
            (None, None) => Decimal::ZERO,
        }
    }

    pub fn discount_amount(&self) -> Decimal {
        self.descuento.as_ref().map_or(Decimal::ZERO, |d| d.monto)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tax {
    /// Tax code from the tax catalog (e.g. "01" for IVA).
    pub codigo: String,
    pub codigo_tarifa: Option<TaxRateCode>,
    /// Percentage, e.g. 13 for 13%.
    pub tarifa: Decimal,
    /// Only for tax code 08 (used goods regime).
    pub factor_iva: Option<Decimal>,
    pub monto: Decimal,
    pub exoneracion: Option<Exoneration>,
}

impl Tax {
    /// IVA (tax code 01) at the rate of `rate_code`.
    pub fn iva(rate_code: TaxRateCode, monto: Decimal) -> Self {
        Self {
            codigo: super::tax_codes::TAX_CODE_IVA.to_string(),
            codigo_tarifa: Some(rate_code),
            tarifa: rate_code.rate(),
            factor_iva: None,
            monto,
            exoneracion: None,
        }
    }
}

/// CodigoTarifa: IVA rate codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxRateCode {
    /// 01: Tarifa 0% (exento).
    Exento,
    /// 02: Tarifa reducida 1%.
    Reducida1,
    /// 03: Tarifa reducida 2%.
    Reducida2,
    /// 04: Tarifa reducida 4%.
    Reducida4,
    /// 05: Transitorio 0%.
    Transitorio0,
    /// 06: Transitorio 4%.
    Transitorio4,
    /// 07: Transitorio 8%.
    Transitorio8,
    /// 08: Tarifa general 13%.
    General,
    /// 09: Tarifa reducida 0.5%.
    ReducidaMedio,
    /// 10: Tarifa exenta.
    Exenta,
    /// 11: Tarifa 0% sin derecho a crédito.
    CeroSinCredito,
}

impl TaxRateCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Exento => "01",
            Self::Reducida1 => "02",
            Self::Reducida2 => "03",
            Self::Reducida4 => "04",
            Self::Transitorio0 => "05",
            Self::Transitorio4 => "06",
            Self::Transitorio8 => "07",
            Self::General => "08",
            Self::ReducidaMedio => "09",
            Self::Exenta => "10",
            Self::CeroSinCredito => "11",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::Exento),
            "02" => Some(Self::Reducida1),
            "03" => Some(Self::Reducida2),
            "04" => Some(Self::Reducida4),
            "05" => Some(Self::Transitorio0),
            "06" => Some(Self::Transitorio4),
            "07" => Some(Self::Transitorio8),
            "08" => Some(Self::General),
            "09" => Some(Self::ReducidaMedio),
            "10" => Some(Self::Exenta),
            "11" => Some(Self::CeroSinCredito),
            _ => None,
        }
    }

    /// Percentage the code stands for.
    pub fn rate(&self) -> Decimal {
        match self {
            Self::Exento | Self::Transitorio0 | Self::Exenta | Self::CeroSinCredito => {
                Decimal::ZERO
            }
            Self::Reducida1 => Decimal::ONE,
            Self::Reducida2 => Decimal::TWO,
            Self::Reducida4 | Self::Transitorio4 => Decimal::from(4),
            Self::Transitorio8 => Decimal::from(8),
            Self::General => Decimal::from(13),
            Self::ReducidaMedio => Decimal::new(5, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exoneration {
    pub tipo_documento: ExonerationType,
    pub numero_documento: String,
    pub nombre_institucion: String,
    pub fecha_emision: DateTime<FixedOffset>,
    pub porcentaje_exoneracion: Decimal,
    pub monto_exoneracion: Decimal,
}

/// Exoneration document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExonerationType {
    /// 01: Compras autorizadas.
    ComprasAutorizadas,
    /// 02: Ventas exentas a diplomáticos.
    Diplomaticos,
    /// 03: Autorizado por ley especial.
    LeyEspecial,
    /// 04: Exenciones Dirección General de Hacienda.
    DireccionGeneral,
    /// 05: Transitorio V.
    TransitorioV,
    /// 06: Transitorio IX.
    TransitorioIX,
    /// 07: Transitorio XVII.
    TransitorioXVII,
    /// 99: Otros.
    Otros,
}

impl ExonerationType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ComprasAutorizadas => "01",
            Self::Diplomaticos => "02",
            Self::LeyEspecial => "03",
            Self::DireccionGeneral => "04",
            Self::TransitorioV => "05",
            Self::TransitorioIX => "06",
            Self::TransitorioXVII => "07",
            Self::Otros => "99",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::ComprasAutorizadas),
            "02" => Some(Self::Diplomaticos),
            "03" => Some(Self::LeyEspecial),
            "04" => Some(Self::DireccionGeneral),
            "05" => Some(Self::TransitorioV),
            "06" => Some(Self::TransitorioIX),
            "07" => Some(Self::TransitorioXVII),
            "99" => Some(Self::Otros),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub monto: Decimal,
    /// NaturalezaDescuento: reason for the discount.
    pub naturaleza: String,
}

/// OtrosCargos entry (document level).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherCharge {
    pub tipo_documento: OtherChargeType,
    /// Required for third-party collections.
    pub numero_identidad_tercero: Option<String>,
    /// Required for third-party collections.
    pub nombre_tercero: Option<String>,
    pub detalle: String,
    pub porcentaje: Option<Decimal>,
    pub monto_cargo: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OtherChargeType {
    /// 01: Contribución parafiscal.
    ContribucionParafiscal,
    /// 02: Timbre de la Cruz Roja.
    TimbreCruzRoja,
    /// 03: Timbre del Cuerpo de Bomberos.
    TimbreBomberos,
    /// 04: Cobro de un tercero.
    CobroTercero,
    /// 05: Costos de exportación.
    CostosExportacion,
    /// 06: Impuesto de servicio 10%.
    ImpuestoServicio,
    /// 07: Timbre de colegios profesionales.
    TimbreColegios,
    /// 99: Otros cargos.
    Otros,
}

impl OtherChargeType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ContribucionParafiscal => "01",
            Self::TimbreCruzRoja => "02",
            Self::TimbreBomberos => "03",
            Self::CobroTercero => "04",
            Self::CostosExportacion => "05",
            Self::ImpuestoServicio => "06",
            Self::TimbreColegios => "07",
            Self::Otros => "99",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::ContribucionParafiscal),
            "02" => Some(Self::TimbreCruzRoja),
            "03" => Some(Self::TimbreBomberos),
            "04" => Some(Self::CobroTercero),
            "05" => Some(Self::CostosExportacion),
            "06" => Some(Self::ImpuestoServicio),
            "07" => Some(Self::TimbreColegios),
            "99" => Some(Self::Otros),
            _ => None,
        }
    }
}

/// InformacionReferencia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceInformation {
    pub tipo_documento: ReferenceDocumentType,
    /// Referenced document's clave or number.
    pub numero: String,
    pub fecha_emision: DateTime<FixedOffset>,
    pub codigo: ReferenceCode,
    pub razon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceDocumentType {
    /// 01: Factura electrónica.
    FacturaElectronica,
    /// 02: Nota de débito electrónica.
    NotaDebito,
    /// 03: Nota de crédito electrónica.
    NotaCredito,
    /// 04: Tiquete electrónico.
    TiqueteElectronico,
    /// 05: Nota de despacho.
    NotaDespacho,
    /// 06: Contrato.
    Contrato,
    /// 07: Procedimiento.
    Procedimiento,
    /// 08: Comprobante emitido en contingencia.
    Contingencia,
    /// 09: Devolución de mercadería.
    Devolucion,
    /// 10: Sustituye comprobante rechazado por Hacienda.
    SustituyeRechazado,
    /// 11: Sustituye factura rechazada por el receptor.
    SustituyeRechazoReceptor,
    /// 12: Sustituye factura de exportación.
    SustituyeExportacion,
    /// 13: Facturación mes vencido.
    MesVencido,
    /// 99: Otros.
    Otros,
}

impl ReferenceDocumentType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::FacturaElectronica => "01",
            Self::NotaDebito => "02",
            Self::NotaCredito => "03",
            Self::TiqueteElectronico => "04",
            Self::NotaDespacho => "05",
            Self::Contrato => "06",
            Self::Procedimiento => "07",
            Self::Contingencia => "08",
            Self::Devolucion => "09",
            Self::SustituyeRechazado => "10",
            Self::SustituyeRechazoReceptor => "11",
            Self::SustituyeExportacion => "12",
            Self::MesVencido => "13",
            Self::Otros => "99",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::FacturaElectronica),
            "02" => Some(Self::NotaDebito),
            "03" => Some(Self::NotaCredito),
            "04" => Some(Self::TiqueteElectronico),
            "05" => Some(Self::NotaDespacho),
            "06" => Some(Self::Contrato),
            "07" => Some(Self::Procedimiento),
            "08" => Some(Self::Contingencia),
            "09" => Some(Self::Devolucion),
            "10" => Some(Self::SustituyeRechazado),
            "11" => Some(Self::SustituyeRechazoReceptor),
            "12" => Some(Self::SustituyeExportacion),
            "13" => Some(Self::MesVencido),
            "99" => Some(Self::Otros),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceCode {
    /// 01: Anula documento de referencia.
    Anula,
    /// 02: Corrige texto.
    CorrigeTexto,
    /// 03: Corrige monto.
    CorrigeMonto,
    /// 04: Referencia a otro documento.
    ReferenciaOtroDocumento,
    /// 05: Sustituye comprobante provisional por contingencia.
    SustituyeProvisional,
    /// 99: Otros.
    Otros,
}

impl ReferenceCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Anula => "01",
            Self::CorrigeTexto => "02",
            Self::CorrigeMonto => "03",
            Self::ReferenciaOtroDocumento => "04",
            Self::SustituyeProvisional => "05",
            Self::Otros => "99",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::Anula),
            "02" => Some(Self::CorrigeTexto),
            "03" => Some(Self::CorrigeMonto),
            "04" => Some(Self::ReferenciaOtroDocumento),
            "05" => Some(Self::SustituyeProvisional),
            "99" => Some(Self::Otros),
            _ => None,
        }
    }
}

/// Condición de venta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaleCondition {
    /// 01
    Contado,
    /// 02: requires PlazoCredito.
    Credito,
    /// 03
    Consignacion,
    /// 04
    Apartado,
    /// 05: Arrendamiento con opción de compra.
    Arrendamiento,
    /// 99
    Otro,
}

impl SaleCondition {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Contado => "01",
            Self::Credito => "02",
            Self::Consignacion => "03",
            Self::Apartado => "04",
            Self::Arrendamiento => "05",
            Self::Otro => "99",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::Contado),
            "02" => Some(Self::Credito),
            "03" => Some(Self::Consignacion),
            "04" => Some(Self::Apartado),
            "05" => Some(Self::Arrendamiento),
            "99" => Some(Self::Otro),
            _ => None,
        }
    }
}

/// Medio de pago.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// 01
    Efectivo,
    /// 02
    Tarjeta,
    /// 03
    Cheque,
    /// 04: Transferencia / depósito bancario.
    Transferencia,
    /// 05
    RecaudadoPorTerceros,
    /// 06
    SinpeMovil,
    /// 07
    PlataformaDigital,
    /// 99
    Otros,
}

impl PaymentMethod {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Efectivo => "01",
            Self::Tarjeta => "02",
            Self::Cheque => "03",
            Self::Transferencia => "04",
            Self::RecaudadoPorTerceros => "05",
            Self::SinpeMovil => "06",
            Self::PlataformaDigital => "07",
            Self::Otros => "99",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::Efectivo),
            "02" => Some(Self::Tarjeta),
            "03" => Some(Self::Cheque),
            "04" => Some(Self::Transferencia),
            "05" => Some(Self::RecaudadoPorTerceros),
            "06" => Some(Self::SinpeMovil),
            "07" => Some(Self::PlataformaDigital),
            "99" => Some(Self::Otros),
            _ => None,
        }
    }
}

/// ResumenFactura: pre-computed document totals.
///
/// `Option` fields are schema-optional and are omitted from the XML when
/// `None`; the rest are always emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    /// ISO 4217 code, e.g. "CRC".
    pub moneda: String,
    /// Required iff `moneda` is not "CRC".
    pub tipo_cambio: Option<Decimal>,
    pub total_serv_gravados: Decimal,
    pub total_serv_exentos: Decimal,
    pub total_serv_exonerado: Option<Decimal>,
    pub total_serv_no_sujeto: Option<Decimal>,
    pub total_mercancias_gravadas: Decimal,
    pub total_mercancias_exentas: Decimal,
    pub total_mercancias_exoneradas: Option<Decimal>,
    pub total_mercancias_no_sujeto: Option<Decimal>,
    pub total_gravado: Decimal,
    pub total_exento: Decimal,
    pub total_exonerado: Decimal,
    pub total_no_sujeto: Option<Decimal>,
    pub total_venta: Decimal,
    pub total_descuentos: Decimal,
    pub total_venta_neta: Decimal,
    pub total_impuestos: Decimal,
    pub total_iva_devuelto: Option<Decimal>,
    pub total_otros_cargos: Decimal,
    pub total_comprobante: Decimal,
}

impl InvoiceSummary {
    /// A summary in `moneda` with every total at zero.
    pub fn zeroed(moneda: impl Into<String>) -> Self {
        Self {
            moneda: moneda.into(),
            tipo_cambio: None,
            total_serv_gravados: Decimal::ZERO,
            total_serv_exentos: Decimal::ZERO,
            total_serv_exonerado: None,
            total_serv_no_sujeto: None,
            total_mercancias_gravadas: Decimal::ZERO,
            total_mercancias_exentas: Decimal::ZERO,
            total_mercancias_exoneradas: None,
            total_mercancias_no_sujeto: None,
            total_gravado: Decimal::ZERO,
            total_exento: Decimal::ZERO,
            total_exonerado: Decimal::ZERO,
            total_no_sujeto: None,
            total_venta: Decimal::ZERO,
            total_descuentos: Decimal::ZERO,
            total_venta_neta: Decimal::ZERO,
            total_impuestos: Decimal::ZERO,
            total_iva_devuelto: None,
            total_otros_cargos: Decimal::ZERO,
            total_comprobante: Decimal::ZERO,
        }
    }
}
