use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

use super::catalogs::Catalogs;
use super::error::FacturaError;
use super::types::*;
use super::validation;

/// Builder for assembling a validated [`ElectronicInvoice`].
///
/// Amounts are taken as given; the builder never derives totals.
///
/// ```
/// use chrono::DateTime;
/// use factura_cr::core::*;
/// use rust_decimal_macros::dec;
///
/// let emisor = EmisorBuilder::new(
///     "Soluciones Digitales S.A.",
///     Identification::new(IdentificationType::Juridica, "3101123456"),
/// )
/// .build();
///
/// let line = LineBuilder::new(1, "Consultoría", dec!(1), "Sp", dec!(100))
///     .impuesto(Tax::iva(TaxRateCode::General, dec!(13)))
///     .totals(dec!(100), dec!(100), dec!(113))
///     .build()
///     .unwrap();
///
/// let invoice = InvoiceBuilder::new(
///     "50612122300310112345600100001010000000001111111111",
///     "00100001010000000001",
///     DateTime::parse_from_rfc3339("2023-12-12T10:30:00-06:00").unwrap(),
/// )
/// .codigo_actividad("620100")
/// .emisor(emisor)
/// .medio_pago(PaymentMethod::Transferencia)
/// .add_line(line)
/// .resumen(InvoiceSummary {
///     total_serv_gravados: dec!(100),
///     total_gravado: dec!(100),
///     total_venta: dec!(100),
///     total_venta_neta: dec!(100),
///     total_impuestos: dec!(13),
///     total_comprobante: dec!(113),
///     ..InvoiceSummary::zeroed("CRC")
/// })
/// .build();
///
/// assert!(invoice.is_ok());
/// ```
pub struct InvoiceBuilder {
    clave: String,
    numero_consecutivo: String,
    fecha_emision: DateTime<FixedOffset>,
    codigo_actividad: Option<String>,
    emisor: Option<Emisor>,
    receptor: Option<Receptor>,
    condicion_venta: SaleCondition,
    plazo_credito: Option<u32>,
    medios_pago: Vec<PaymentMethod>,
    lines: Vec<InvoiceLine>,
    otros_cargos: Vec<OtherCharge>,
    resumen: Option<InvoiceSummary>,
    referencias: Vec<ReferenceInformation>,
    catalogs: Option<Catalogs>,
}

impl InvoiceBuilder {
    pub fn new(
        clave: impl Into<String>,
        numero_consecutivo: impl Into<String>,
        fecha_emision: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            clave: clave.into(),
            numero_consecutivo: numero_consecutivo.into(),
            fecha_emision,
            codigo_actividad: None,
            emisor: None,
            receptor: None,
            condicion_venta: SaleCondition::Contado,
            plazo_credito: None,
            medios_pago: Vec::new(),
            lines: Vec::new(),
            otros_cargos: Vec::new(),
            resumen: None,
            referencias: Vec::new(),
            catalogs: None,
        }
    }

    pub fn codigo_actividad(mut self, code: impl Into<String>) -> Self {
        self.codigo_actividad = Some(code.into());
        self
    }

    pub fn emisor(mut self, emisor: Emisor) -> Self {
        self.emisor = Some(emisor);
        self
    }

    pub fn receptor(mut self, receptor: Receptor) -> Self {
        self.receptor = Some(receptor);
        self
    }

    pub fn condicion_venta(mut self, condicion: SaleCondition) -> Self {
        self.condicion_venta = condicion;
        self
    }

    /// Sale on credit with a term in days.
    pub fn credito(mut self, dias: u32) -> Self {
        self.condicion_venta = SaleCondition::Credito;
        self.plazo_credito = Some(dias);
        self
    }

    pub fn medio_pago(mut self, medio: PaymentMethod) -> Self {
        self.medios_pago.push(medio);
        self
    }

    pub fn add_line(mut self, line: InvoiceLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn add_other_charge(mut self, charge: OtherCharge) -> Self {
        self.otros_cargos.push(charge);
        self
    }

    pub fn add_reference(mut self, reference: ReferenceInformation) -> Self {
        self.referencias.push(reference);
        self
    }

    pub fn resumen(mut self, resumen: InvoiceSummary) -> Self {
        self.resumen = Some(resumen);
        self
    }

    /// Validate against these catalogs instead of the built-in ones.
    pub fn catalogs(mut self, catalogs: Catalogs) -> Self {
        self.catalogs = Some(catalogs);
        self
    }

    /// Build the invoice and run validation.
    /// Returns all validation errors (not just the first).
    pub fn build(mut self) -> Result<ElectronicInvoice, FacturaError> {
        let catalogs = self.catalogs.take().unwrap_or_default();
        let invoice = self.assemble()?;
        validation::validate_invoice(&invoice, &catalogs).map_err(FacturaError::Validation)?;
        Ok(invoice)
    }

    /// Build without validation, e.g. to import documents issued elsewhere.
    pub fn build_unchecked(self) -> Result<ElectronicInvoice, FacturaError> {
        self.assemble()
    }

    fn assemble(self) -> Result<ElectronicInvoice, FacturaError> {
        let codigo_actividad = self
            .codigo_actividad
            .ok_or_else(|| FacturaError::Builder("codigo_actividad is required".into()))?;
        let emisor = self
            .emisor
            .ok_or_else(|| FacturaError::Builder("emisor is required".into()))?;
        let resumen = self
            .resumen
            .ok_or_else(|| FacturaError::Builder("resumen is required".into()))?;

        Ok(ElectronicInvoice {
            clave: self.clave,
            codigo_actividad,
            numero_consecutivo: self.numero_consecutivo,
            fecha_emision: self.fecha_emision,
            emisor,
            receptor: self.receptor,
            condicion_venta: self.condicion_venta,
            plazo_credito: self.plazo_credito,
            medios_pago: self.medios_pago,
            detalle_servicio: self.lines,
            otros_cargos: self.otros_cargos,
            resumen,
            informacion_referencia: self.referencias,
        })
    }
}

/// Builder for the issuing party.
pub struct EmisorBuilder {
    nombre: String,
    identificacion: Identification,
    nombre_comercial: Option<String>,
    ubicacion: Option<Location>,
    telefono: Option<Phone>,
    correo_electronico: Option<String>,
}

impl EmisorBuilder {
    pub fn new(nombre: impl Into<String>, identificacion: Identification) -> Self {
        Self {
            nombre: nombre.into(),
            identificacion,
            nombre_comercial: None,
            ubicacion: None,
            telefono: None,
            correo_electronico: None,
        }
    }

    pub fn nombre_comercial(mut self, nombre: impl Into<String>) -> Self {
        self.nombre_comercial = Some(nombre.into());
        self
    }

    pub fn ubicacion(mut self, ubicacion: Location) -> Self {
        self.ubicacion = Some(ubicacion);
        self
    }

    pub fn telefono(mut self, telefono: Phone) -> Self {
        self.telefono = Some(telefono);
        self
    }

    pub fn correo(mut self, correo: impl Into<String>) -> Self {
        self.correo_electronico = Some(correo.into());
        self
    }

    pub fn build(self) -> Emisor {
        Emisor {
            nombre: self.nombre,
            identificacion: self.identificacion,
            nombre_comercial: self.nombre_comercial,
            ubicacion: self.ubicacion,
            telefono: self.telefono,
            correo_electronico: self.correo_electronico,
        }
    }
}

/// Builder for the receiving party.
pub struct ReceptorBuilder {
    nombre: String,
    identificacion: Option<Identification>,
    identificacion_extranjero: Option<String>,
    nombre_comercial: Option<String>,
    ubicacion: Option<Location>,
    telefono: Option<Phone>,
    correo_electronico: Option<String>,
}

impl ReceptorBuilder {
    pub fn new(nombre: impl Into<String>) -> Self {
        Self {
            nombre: nombre.into(),
            identificacion: None,
            identificacion_extranjero: None,
            nombre_comercial: None,
            ubicacion: None,
            telefono: None,
            correo_electronico: None,
        }
    }

    pub fn identificacion(mut self, identificacion: Identification) -> Self {
        self.identificacion = Some(identificacion);
        self
    }

    pub fn identificacion_extranjero(mut self, numero: impl Into<String>) -> Self {
        self.identificacion_extranjero = Some(numero.into());
        self
    }

    pub fn nombre_comercial(mut self, nombre: impl Into<String>) -> Self {
        self.nombre_comercial = Some(nombre.into());
        self
    }

    pub fn ubicacion(mut self, ubicacion: Location) -> Self {
        self.ubicacion = Some(ubicacion);
        self
    }

    pub fn telefono(mut self, telefono: Phone) -> Self {
        self.telefono = Some(telefono);
        self
    }

    pub fn correo(mut self, correo: impl Into<String>) -> Self {
        self.correo_electronico = Some(correo.into());
        self
    }

    pub fn build(self) -> Receptor {
        Receptor {
            nombre: self.nombre,
            identificacion: self.identificacion,
            identificacion_extranjero: self.identificacion_extranjero,
            nombre_comercial: self.nombre_comercial,
            ubicacion: self.ubicacion,
            telefono: self.telefono,
            correo_electronico: self.correo_electronico,
        }
    }
}

/// Builder for a DetalleServicio line.
pub struct LineBuilder {
    numero_linea: u32,
    detalle: String,
    cantidad: Decimal,
    unidad_medida: String,
    precio_unitario: Decimal,
    codigo: Option<String>,
    descuento: Option<Discount>,
    base_imponible: Option<Decimal>,
    impuesto: Option<Tax>,
    impuesto_neto: Option<Decimal>,
    totals: Option<(Decimal, Decimal, Decimal)>,
}

impl LineBuilder {
    pub fn new(
        numero_linea: u32,
        detalle: impl Into<String>,
        cantidad: Decimal,
        unidad_medida: impl Into<String>,
        precio_unitario: Decimal,
    ) -> Self {
        Self {
            numero_linea,
            detalle: detalle.into(),
            cantidad,
            unidad_medida: unidad_medida.into(),
            precio_unitario,
            codigo: None,
            descuento: None,
            base_imponible: None,
            impuesto: None,
            impuesto_neto: None,
            totals: None,
        }
    }

    pub fn codigo(mut self, codigo: impl Into<String>) -> Self {
        self.codigo = Some(codigo.into());
        self
    }

    pub fn descuento(mut self, monto: Decimal, naturaleza: impl Into<String>) -> Self {
        self.descuento = Some(Discount {
            monto,
            naturaleza: naturaleza.into(),
        });
        self
    }

    pub fn base_imponible(mut self, base: Decimal) -> Self {
        self.base_imponible = Some(base);
        self
    }

    pub fn impuesto(mut self, impuesto: Tax) -> Self {
        self.impuesto = Some(impuesto);
        self
    }

    pub fn impuesto_neto(mut self, neto: Decimal) -> Self {
        self.impuesto_neto = Some(neto);
        self
    }

    /// The pre-computed MontoTotal, SubTotal and MontoTotalLinea.
    pub fn totals(mut self, monto_total: Decimal, sub_total: Decimal, monto_total_linea: Decimal) -> Self {
        self.totals = Some((monto_total, sub_total, monto_total_linea));
        self
    }

    pub fn build(self) -> Result<InvoiceLine, FacturaError> {
        let (monto_total, sub_total, monto_total_linea) = self.totals.ok_or_else(|| {
            FacturaError::Builder(format!(
                "line {} needs monto_total, sub_total and monto_total_linea",
                self.numero_linea
            ))
        })?;

        Ok(InvoiceLine {
            numero_linea: self.numero_linea,
            codigo: self.codigo,
            cantidad: self.cantidad,
            unidad_medida: self.unidad_medida,
            detalle: self.detalle,
            precio_unitario: self.precio_unitario,
            monto_total,
            descuento: self.descuento,
            sub_total,
            base_imponible: self.base_imponible,
            impuesto: self.impuesto,
            impuesto_neto: self.impuesto_neto,
            monto_total_linea,
        })
    }
}
