use tracing::debug;

use crate::core::*;

use super::precision::*;
use super::xml_utils::{XmlWriter, format_datetime};
use super::{FACTURA_NAMESPACE, FACTURA_SCHEMA_LOCATION, XSI_NAMESPACE};

const ROOT: &str = "FacturaElectronica";

/// Commercial code type for the seller's own product code.
const SELLER_CODE_TYPE: &str = "01";

/// Render an invoice as canonical Factura Electrónica v4.4 XML.
///
/// Does not validate; pass documents through
/// [`validate_invoice`](crate::core::validate_invoice) first, or use
/// [`render_validated_invoice`].
pub fn render_invoice(invoice: &ElectronicInvoice) -> Result<String, FacturaError> {
    let xml = write_invoice(invoice)?.into_string()?;
    debug!(clave = %invoice.clave, bytes = xml.len(), "rendered invoice");
    Ok(xml)
}

/// Same as [`render_invoice`], as UTF-8 bytes.
pub fn render_invoice_bytes(invoice: &ElectronicInvoice) -> Result<Vec<u8>, FacturaError> {
    let bytes = write_invoice(invoice)?.into_bytes();
    debug!(clave = %invoice.clave, bytes = bytes.len(), "rendered invoice");
    Ok(bytes)
}

/// Validate against `catalogs`, then render.
pub fn render_validated_invoice(
    invoice: &ElectronicInvoice,
    catalogs: &Catalogs,
) -> Result<String, FacturaError> {
    validate_invoice(invoice, catalogs).map_err(FacturaError::Validation)?;
    render_invoice(invoice)
}

fn write_invoice(invoice: &ElectronicInvoice) -> Result<XmlWriter, FacturaError> {
    let mut w = XmlWriter::new()?;
    let schema_location = format!("{FACTURA_NAMESPACE} {FACTURA_SCHEMA_LOCATION}");

    w.start_element_with_attrs(
        ROOT,
        &[
            ("xmlns", FACTURA_NAMESPACE),
            ("xmlns:xsi", XSI_NAMESPACE),
            ("xsi:schemaLocation", &schema_location),
        ],
    )?;

    w.text_element("Clave", &invoice.clave)?;
    w.text_element("CodigoActividad", &invoice.codigo_actividad)?;
    w.text_element("NumeroConsecutivo", &invoice.numero_consecutivo)?;
    w.text_element("FechaEmision", &format_datetime(&invoice.fecha_emision))?;

    write_emisor(&mut w, &invoice.emisor)?;
    if let Some(receptor) = &invoice.receptor {
        write_receptor(&mut w, receptor)?;
    }

    w.text_element("CondicionVenta", invoice.condicion_venta.code())?;
    if let Some(plazo) = invoice.plazo_credito {
        w.text_element("PlazoCredito", &plazo.to_string())?;
    }
    for medio in &invoice.medios_pago {
        w.text_element("MedioPago", medio.code())?;
    }

    let mut lines: Vec<&InvoiceLine> = invoice.detalle_servicio.iter().collect();
    lines.sort_by_key(|l| l.numero_linea);
    w.start_element("DetalleServicio")?;
    for line in lines {
        write_line(&mut w, line)?;
    }
    w.end_element("DetalleServicio")?;

    for charge in &invoice.otros_cargos {
        write_other_charge(&mut w, charge)?;
    }

    write_summary(&mut w, &invoice.resumen)?;

    for reference in &invoice.informacion_referencia {
        write_reference(&mut w, reference)?;
    }

    w.end_element(ROOT)?;
    Ok(w)
}

fn write_emisor(w: &mut XmlWriter, emisor: &Emisor) -> Result<(), FacturaError> {
    w.start_element("Emisor")?;
    w.text_element("Nombre", &emisor.nombre)?;
    write_identification(w, &emisor.identificacion)?;
    w.optional_text_element("NombreComercial", emisor.nombre_comercial.as_deref())?;
    if let Some(location) = &emisor.ubicacion {
        write_location(w, location)?;
    }
    if let Some(phone) = &emisor.telefono {
        write_phone(w, phone)?;
    }
    w.optional_text_element("CorreoElectronico", emisor.correo_electronico.as_deref())?;
    w.end_element("Emisor")?;
    Ok(())
}

fn write_receptor(w: &mut XmlWriter, receptor: &Receptor) -> Result<(), FacturaError> {
    w.start_element("Receptor")?;
    w.text_element("Nombre", &receptor.nombre)?;
    if let Some(identification) = &receptor.identificacion {
        write_identification(w, identification)?;
    }
    w.optional_text_element(
        "IdentificacionExtranjero",
        receptor.identificacion_extranjero.as_deref(),
    )?;
    w.optional_text_element("NombreComercial", receptor.nombre_comercial.as_deref())?;
    if let Some(location) = &receptor.ubicacion {
        write_location(w, location)?;
    }
    if let Some(phone) = &receptor.telefono {
        write_phone(w, phone)?;
    }
    w.optional_text_element("CorreoElectronico", receptor.correo_electronico.as_deref())?;
    w.end_element("Receptor")?;
    Ok(())
}

fn write_identification(
    w: &mut XmlWriter,
    identification: &Identification,
) -> Result<(), FacturaError> {
    w.start_element("Identificacion")?;
    w.text_element("Tipo", identification.tipo.code())?;
    w.text_element("Numero", &identification.numero)?;
    w.end_element("Identificacion")?;
    Ok(())
}

fn write_location(w: &mut XmlWriter, location: &Location) -> Result<(), FacturaError> {
    w.start_element("Ubicacion")?;
    w.text_element("Provincia", &location.provincia)?;
    w.text_element("Canton", &location.canton)?;
    w.text_element("Distrito", &location.distrito)?;
    w.optional_text_element("Barrio", location.barrio.as_deref())?;
    w.optional_text_element("OtrasSenas", location.otras_senas.as_deref())?;
    w.end_element("Ubicacion")?;
    Ok(())
}

fn write_phone(w: &mut XmlWriter, phone: &Phone) -> Result<(), FacturaError> {
    w.start_element("Telefono")?;
    w.text_element("CodigoPais", &phone.codigo_pais)?;
    w.text_element("NumTelefono", &phone.numero)?;
    w.end_element("Telefono")?;
    Ok(())
}

fn write_line(w: &mut XmlWriter, line: &InvoiceLine) -> Result<(), FacturaError> {
    w.start_element("LineaDetalle")?;
    w.text_element("NumeroLinea", &line.numero_linea.to_string())?;
    if let Some(codigo) = &line.codigo {
        w.start_element("CodigoComercial")?;
        w.text_element("Tipo", SELLER_CODE_TYPE)?;
        w.text_element("Codigo", codigo)?;
        w.end_element("CodigoComercial")?;
    }
    w.decimal_element("Cantidad", line.cantidad, QUANTITY)?;
    w.text_element("UnidadMedida", &line.unidad_medida)?;
    w.text_element("Detalle", &line.detalle)?;
    w.decimal_element("PrecioUnitario", line.precio_unitario, UNIT_PRICE)?;
    w.decimal_element("MontoTotal", line.monto_total, MONEY)?;
    if let Some(discount) = &line.descuento {
        w.start_element("Descuento")?;
        w.decimal_element("MontoDescuento", discount.monto, MONEY)?;
        w.text_element("NaturalezaDescuento", &discount.naturaleza)?;
        w.end_element("Descuento")?;
    }
    w.decimal_element("SubTotal", line.sub_total, MONEY)?;
    w.optional_decimal_element("BaseImponible", line.base_imponible, MONEY)?;
    if let Some(tax) = &line.impuesto {
        write_tax(w, tax)?;
    }
    w.optional_decimal_element("ImpuestoNeto", line.impuesto_neto, MONEY)?;
    w.decimal_element("MontoTotalLinea", line.monto_total_linea, MONEY)?;
    w.end_element("LineaDetalle")?;
    Ok(())
}

fn write_tax(w: &mut XmlWriter, tax: &Tax) -> Result<(), FacturaError> {
    w.start_element("Impuesto")?;
    w.text_element("Codigo", &tax.codigo)?;
    w.optional_text_element("CodigoTarifa", tax.codigo_tarifa.map(|c| c.code()))?;
    w.decimal_element("Tarifa", tax.tarifa, RATE)?;
    w.optional_decimal_element("FactorIVA", tax.factor_iva, FACTOR_IVA)?;
    w.decimal_element("Monto", tax.monto, MONEY)?;
    if let Some(exoneration) = &tax.exoneracion {
        w.start_element("Exoneracion")?;
        w.text_element("TipoDocumento", exoneration.tipo_documento.code())?;
        w.text_element("NumeroDocumento", &exoneration.numero_documento)?;
        w.text_element("NombreInstitucion", &exoneration.nombre_institucion)?;
        w.text_element("FechaEmision", &format_datetime(&exoneration.fecha_emision))?;
        w.decimal_element(
            "PorcentajeExoneracion",
            exoneration.porcentaje_exoneracion,
            RATE,
        )?;
        w.decimal_element("MontoExoneracion", exoneration.monto_exoneracion, MONEY)?;
        w.end_element("Exoneracion")?;
    }
    w.end_element("Impuesto")?;
    Ok(())
}

fn write_other_charge(w: &mut XmlWriter, charge: &OtherCharge) -> Result<(), FacturaError> {
    w.start_element("OtrosCargos")?;
    w.text_element("TipoDocumento", charge.tipo_documento.code())?;
    w.optional_text_element(
        "NumeroIdentidadTercero",
        charge.numero_identidad_tercero.as_deref(),
    )?;
    w.optional_text_element("NombreTercero", charge.nombre_tercero.as_deref())?;
    w.text_element("Detalle", &charge.detalle)?;
    w.optional_decimal_element("Porcentaje", charge.porcentaje, RATE)?;
    w.decimal_element("MontoCargo", charge.monto_cargo, MONEY)?;
    w.end_element("OtrosCargos")?;
    Ok(())
}

fn write_summary(w: &mut XmlWriter, s: &InvoiceSummary) -> Result<(), FacturaError> {
    w.start_element("ResumenFactura")?;
    w.text_element("CodigoMoneda", &s.moneda)?;
    w.optional_decimal_element("TipoCambio", s.tipo_cambio, EXCHANGE_RATE)?;
    w.decimal_element("TotalServGravados", s.total_serv_gravados, MONEY)?;
    w.decimal_element("TotalServExentos", s.total_serv_exentos, MONEY)?;
    w.optional_decimal_element("TotalServExonerado", s.total_serv_exonerado, MONEY)?;
    w.optional_decimal_element("TotalServNoSujeto", s.total_serv_no_sujeto, MONEY)?;
    w.decimal_element("TotalMercanciasGravadas", s.total_mercancias_gravadas, MONEY)?;
    w.decimal_element("TotalMercanciasExentas", s.total_mercancias_exentas, MONEY)?;
    w.optional_decimal_element("TotalMercExonerada", s.total_mercancias_exoneradas, MONEY)?;
    w.optional_decimal_element("TotalMercNoSujeta", s.total_mercancias_no_sujeto, MONEY)?;
    w.decimal_element("TotalGravado", s.total_gravado, MONEY)?;
    w.decimal_element("TotalExento", s.total_exento, MONEY)?;
    w.decimal_element("TotalExonerado", s.total_exonerado, MONEY)?;
    w.optional_decimal_element("TotalNoSujeto", s.total_no_sujeto, MONEY)?;
    w.decimal_element("TotalVenta", s.total_venta, MONEY)?;
    w.decimal_element("TotalDescuentos", s.total_descuentos, MONEY)?;
    w.decimal_element("TotalVentaNeta", s.total_venta_neta, MONEY)?;
    w.decimal_element("TotalImpuesto", s.total_impuestos, MONEY)?;
    w.optional_decimal_element("TotalIVADevuelto", s.total_iva_devuelto, MONEY)?;
    w.decimal_element("TotalOtrosCargos", s.total_otros_cargos, MONEY)?;
    w.decimal_element("TotalComprobante", s.total_comprobante, MONEY)?;
    w.end_element("ResumenFactura")?;
    Ok(())
}

fn write_reference(w: &mut XmlWriter, reference: &ReferenceInformation) -> Result<(), FacturaError> {
    w.start_element("InformacionReferencia")?;
    w.text_element("TipoDoc", reference.tipo_documento.code())?;
    w.text_element("Numero", &reference.numero)?;
    w.text_element("FechaEmision", &format_datetime(&reference.fecha_emision))?;
    w.text_element("Codigo", reference.codigo.code())?;
    w.text_element("Razon", &reference.razon)?;
    w.end_element("InformacionReferencia")?;
    Ok(())
}
