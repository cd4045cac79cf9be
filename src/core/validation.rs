use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::{debug, trace};

use super::activities::is_activity_code_shaped;
use super::catalogs::Catalogs;
use super::consecutive::{DocumentType, check_key_consecutive, validate_consecutive};
use super::currencies::{DOMESTIC_CURRENCY, minor_units};
use super::error::ValidationError;
use super::key::{KeyError, KeyFields, decompose_key};
use super::tax_codes::TAX_CODE_USED_GOODS;
use super::types::*;

/// Maximum number of DetalleServicio lines per document.
pub const MAX_LINES: usize = 1000;

/// Maximum number of MedioPago entries per document.
pub const MAX_PAYMENT_METHODS: usize = 4;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Validate an invoice against the v4.4 structural, cross-field and
/// arithmetic rules.
///
/// Returns every violation found, not just the first. The document is
/// never modified.
pub fn validate_invoice(
    invoice: &ElectronicInvoice,
    catalogs: &Catalogs,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    trace!(clave = %invoice.clave, "checking header");
    validate_header(invoice, catalogs, &mut errors);

    trace!(clave = %invoice.clave, "checking parties");
    validate_emisor(&invoice.emisor, &mut errors);
    if let Some(receptor) = &invoice.receptor {
        validate_receptor(receptor, &mut errors);
    }

    trace!(clave = %invoice.clave, "checking sale terms");
    validate_sale_terms(invoice, &mut errors);

    trace!(clave = %invoice.clave, lines = invoice.detalle_servicio.len(), "checking lines");
    validate_lines(&invoice.detalle_servicio, catalogs, &mut errors);
    for (i, charge) in invoice.otros_cargos.iter().enumerate() {
        validate_other_charge(charge, i, &mut errors);
    }
    for (i, reference) in invoice.informacion_referencia.iter().enumerate() {
        validate_reference(reference, i, &mut errors);
    }

    trace!(clave = %invoice.clave, "checking summary");
    validate_summary(&invoice.resumen, catalogs, &mut errors);
    errors.extend(validate_arithmetic(invoice));

    debug!(clave = %invoice.clave, errors = errors.len(), "validated invoice");
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Tolerance for arithmetic checks: two units of the currency's minor unit.
pub fn arithmetic_tolerance(moneda: &str) -> Decimal {
    Decimal::new(2, minor_units(moneda))
}

/// Validate line and summary arithmetic against the declared amounts.
pub fn validate_arithmetic(invoice: &ElectronicInvoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let tolerance = arithmetic_tolerance(&invoice.resumen.moneda);

    for (i, line) in invoice.detalle_servicio.iter().enumerate() {
        validate_line_arithmetic(line, i, tolerance, &mut errors);
    }

    let s = &invoice.resumen;
    let lines = &invoice.detalle_servicio;
    let discounts = sum(lines.iter().map(InvoiceLine::discount_amount));

    check_amount(
        "resumen.total_gravado",
        s.total_gravado,
        s.total_serv_gravados.checked_add(s.total_mercancias_gravadas),
        "total_serv_gravados + total_mercancias_gravadas",
        tolerance,
        &mut errors,
    );
    check_amount(
        "resumen.total_exento",
        s.total_exento,
        s.total_serv_exentos.checked_add(s.total_mercancias_exentas),
        "total_serv_exentos + total_mercancias_exentas",
        tolerance,
        &mut errors,
    );
    check_amount(
        "resumen.total_exonerado",
        s.total_exonerado,
        sum([s.total_serv_exonerado, s.total_mercancias_exoneradas]
            .into_iter()
            .flatten()),
        "total_serv_exonerado + total_mercancias_exoneradas",
        tolerance,
        &mut errors,
    );
    if let Some(no_sujeto) = s.total_no_sujeto {
        check_amount(
            "resumen.total_no_sujeto",
            no_sujeto,
            sum([s.total_serv_no_sujeto, s.total_mercancias_no_sujeto]
                .into_iter()
                .flatten()),
            "total_serv_no_sujeto + total_mercancias_no_sujeto",
            tolerance,
            &mut errors,
        );
    }

    check_amount(
        "resumen.total_venta",
        s.total_venta,
        sum(lines.iter().map(|l| l.monto_total)),
        "sum of line monto_total",
        tolerance,
        &mut errors,
    );
    check_amount(
        "resumen.total_venta",
        s.total_venta,
        sum([
            s.total_gravado,
            s.total_exento,
            s.total_exonerado,
            s.total_no_sujeto.unwrap_or_default(),
        ]),
        "total_gravado + total_exento + total_exonerado + total_no_sujeto",
        tolerance,
        &mut errors,
    );
    check_amount(
        "resumen.total_descuentos",
        s.total_descuentos,
        discounts,
        "sum of line discounts",
        tolerance,
        &mut errors,
    );
    check_amount(
        "resumen.total_venta_neta",
        s.total_venta_neta,
        discounts.and_then(|d| s.total_venta.checked_sub(d)),
        "total_venta - line discounts",
        tolerance,
        &mut errors,
    );
    check_amount(
        "resumen.total_impuestos",
        s.total_impuestos,
        sum(lines.iter().map(InvoiceLine::tax_amount)),
        "sum of line taxes",
        tolerance,
        &mut errors,
    );
    check_amount(
        "resumen.total_otros_cargos",
        s.total_otros_cargos,
        sum(invoice.otros_cargos.iter().map(|c| c.monto_cargo)),
        "sum of otros_cargos",
        tolerance,
        &mut errors,
    );
    check_amount(
        "resumen.total_comprobante",
        s.total_comprobante,
        sum([s.total_venta_neta, s.total_impuestos, s.total_otros_cargos])
            .and_then(|t| t.checked_sub(s.total_iva_devuelto.unwrap_or_default())),
        "total_venta_neta + total_impuestos + total_otros_cargos - total_iva_devuelto",
        tolerance,
        &mut errors,
    );

    errors
}

fn validate_header(
    invoice: &ElectronicInvoice,
    catalogs: &Catalogs,
    errors: &mut Vec<ValidationError>,
) {
    let key = match decompose_key(&invoice.clave) {
        Ok(fields) => Some(fields),
        Err(e) => {
            errors.push(ValidationError::new("clave", e.kind(), e.to_string()));
            None
        }
    };
    if let Some(key) = &key {
        validate_key_against_document(key, invoice, errors);
    }

    match validate_consecutive(&invoice.numero_consecutivo) {
        Ok(fields) => {
            if fields.document_type != DocumentType::FacturaElectronica {
                errors.push(ValidationError::consistency(
                    "numero_consecutivo",
                    format!(
                        "document type {} is not a factura electrónica (01)",
                        fields.document_type.code()
                    ),
                ));
            }
            if let Some(Err(e)) = key
                .as_ref()
                .map(|k| check_key_consecutive(k, &invoice.numero_consecutivo))
            {
                errors.push(ValidationError::new(
                    "numero_consecutivo",
                    e.kind(),
                    e.to_string(),
                ));
            }
        }
        Err(e) => errors.push(ValidationError::new(
            "numero_consecutivo",
            e.kind(),
            e.to_string(),
        )),
    }

    if !is_activity_code_shaped(&invoice.codigo_actividad) {
        errors.push(ValidationError::format(
            "codigo_actividad",
            format!(
                "activity code must be 1 to 6 digits, got '{}'",
                invoice.codigo_actividad
            ),
        ));
    } else if !catalogs.is_known_activity(&invoice.codigo_actividad) {
        errors.push(ValidationError::catalog(
            "codigo_actividad",
            format!(
                "activity code '{}' is not in the activity catalog",
                invoice.codigo_actividad
            ),
        ));
    }
}

fn validate_key_against_document(
    key: &KeyFields,
    invoice: &ElectronicInvoice,
    errors: &mut Vec<ValidationError>,
) {
    let identification = &invoice.emisor.identificacion;
    if !key.issuer_matches(identification) {
        let err = KeyError::IssuerMismatch {
            expected: identification.numero.clone(),
            found: key.issuer.clone(),
        };
        errors.push(ValidationError::new("clave", err.kind(), err.to_string()));
    }

    // The key carries the issuer's local calendar date.
    let local_date = invoice.fecha_emision.date_naive();
    if key.issue_date != local_date {
        errors.push(ValidationError::consistency(
            "clave",
            format!(
                "clave date {} does not match fecha_emision date {}",
                key.issue_date, local_date
            ),
        ));
    }
}

fn validate_emisor(emisor: &Emisor, errors: &mut Vec<ValidationError>) {
    check_text(&emisor.nombre, 100, "emisor.nombre", errors);
    if emisor.identificacion.tipo == IdentificationType::Extranjero {
        errors.push(ValidationError::catalog(
            "emisor.identificacion.tipo",
            "emisor identification type must be 01, 02, 03 or 04",
        ));
    }
    validate_identification(&emisor.identificacion, "emisor.identificacion", errors);
    check_optional_text(
        emisor.nombre_comercial.as_deref(),
        80,
        "emisor.nombre_comercial",
        errors,
    );
    if let Some(location) = &emisor.ubicacion {
        validate_location(location, "emisor.ubicacion", errors);
    }
    if let Some(phone) = &emisor.telefono {
        validate_phone(phone, "emisor.telefono", errors);
    }
    if let Some(email) = &emisor.correo_electronico {
        validate_email(email, "emisor.correo_electronico", errors);
    }
}

fn validate_receptor(receptor: &Receptor, errors: &mut Vec<ValidationError>) {
    check_text(&receptor.nombre, 100, "receptor.nombre", errors);
    if let Some(identification) = &receptor.identificacion {
        validate_identification(identification, "receptor.identificacion", errors);
    }
    check_optional_text(
        receptor.identificacion_extranjero.as_deref(),
        20,
        "receptor.identificacion_extranjero",
        errors,
    );
    check_optional_text(
        receptor.nombre_comercial.as_deref(),
        80,
        "receptor.nombre_comercial",
        errors,
    );
    if let Some(location) = &receptor.ubicacion {
        validate_location(location, "receptor.ubicacion", errors);
    }
    if let Some(phone) = &receptor.telefono {
        validate_phone(phone, "receptor.telefono", errors);
    }
    if let Some(email) = &receptor.correo_electronico {
        validate_email(email, "receptor.correo_electronico", errors);
    }
}

fn validate_identification(
    identification: &Identification,
    prefix: &str,
    errors: &mut Vec<ValidationError>,
) {
    if !identification.tipo.accepts(&identification.numero) {
        errors.push(ValidationError::format(
            format!("{prefix}.numero"),
            format!(
                "identification type {} requires {}, got '{}'",
                identification.tipo.code(),
                identification.tipo.length_rule(),
                identification.numero
            ),
        ));
    }
}

fn validate_location(location: &Location, prefix: &str, errors: &mut Vec<ValidationError>) {
    for (name, value, width) in [
        ("provincia", &location.provincia, 1),
        ("canton", &location.canton, 2),
        ("distrito", &location.distrito, 2),
    ] {
        if !is_digits(value, width..=width) {
            errors.push(ValidationError::format(
                format!("{prefix}.{name}"),
                format!("{name} must be exactly {width} digit(s), got '{value}'"),
            ));
        }
    }
    check_optional_text(
        location.barrio.as_deref(),
        50,
        &format!("{prefix}.barrio"),
        errors,
    );
    check_optional_text(
        location.otras_senas.as_deref(),
        250,
        &format!("{prefix}.otras_senas"),
        errors,
    );
}

fn validate_phone(phone: &Phone, prefix: &str, errors: &mut Vec<ValidationError>) {
    if !is_digits(&phone.codigo_pais, 1..=3) {
        errors.push(ValidationError::format(
            format!("{prefix}.codigo_pais"),
            format!(
                "country code must be 1 to 3 digits, got '{}'",
                phone.codigo_pais
            ),
        ));
    }
    if !is_digits(&phone.numero, 8..=20) {
        errors.push(ValidationError::format(
            format!("{prefix}.numero"),
            format!("phone number must be 8 to 20 digits, got '{}'", phone.numero),
        ));
    }
}

fn validate_email(email: &str, field: &str, errors: &mut Vec<ValidationError>) {
    let well_formed = email.chars().count() <= 160
        && !email.chars().any(char::is_whitespace)
        && email.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.contains('@') && domain.contains('.')
        });
    if !well_formed {
        errors.push(ValidationError::format(
            field,
            format!("'{email}' is not a valid email address"),
        ));
    }
}

fn validate_sale_terms(invoice: &ElectronicInvoice, errors: &mut Vec<ValidationError>) {
    match (invoice.condicion_venta, invoice.plazo_credito) {
        (SaleCondition::Credito, None) => errors.push(ValidationError::conditional(
            "plazo_credito",
            "plazo_credito is required when condicion_venta is 02 (crédito)",
        )),
        (SaleCondition::Credito, Some(0)) => errors.push(ValidationError::format(
            "plazo_credito",
            "plazo_credito must be a positive number of days",
        )),
        (SaleCondition::Credito, Some(_)) | (_, None) => {}
        (other, Some(_)) => errors.push(ValidationError::conditional(
            "plazo_credito",
            format!(
                "plazo_credito must be absent when condicion_venta is {}",
                other.code()
            ),
        )),
    }

    let medios = &invoice.medios_pago;
    if medios.is_empty() {
        errors.push(ValidationError::conditional(
            "medios_pago",
            "at least one payment method is required",
        ));
    } else if medios.len() > MAX_PAYMENT_METHODS {
        errors.push(ValidationError::format(
            "medios_pago",
            format!(
                "at most {MAX_PAYMENT_METHODS} payment methods are allowed, got {}",
                medios.len()
            ),
        ));
    }
    let mut seen = HashSet::new();
    for (i, medio) in medios.iter().enumerate() {
        if !seen.insert(medio) {
            errors.push(ValidationError::consistency(
                format!("medios_pago[{i}]"),
                format!("payment method {} is listed more than once", medio.code()),
            ));
        }
    }
}

fn validate_lines(lines: &[InvoiceLine], catalogs: &Catalogs, errors: &mut Vec<ValidationError>) {
    if lines.is_empty() {
        errors.push(ValidationError::conditional(
            "detalle_servicio",
            "invoice must have at least one line",
        ));
    } else if lines.len() > MAX_LINES {
        errors.push(ValidationError::format(
            "detalle_servicio",
            format!(
                "at most {MAX_LINES} lines are allowed, got {}",
                lines.len()
            ),
        ));
    }

    let mut numbers = HashSet::new();
    for (i, line) in lines.iter().enumerate() {
        if !numbers.insert(line.numero_linea) {
            errors.push(ValidationError::consistency(
                format!("detalle_servicio[{i}].numero_linea"),
                format!("numero_linea {} is used more than once", line.numero_linea),
            ));
        }
        validate_line(line, i, catalogs, errors);
    }
}

fn validate_line(
    line: &InvoiceLine,
    index: usize,
    catalogs: &Catalogs,
    errors: &mut Vec<ValidationError>,
) {
    let prefix = format!("detalle_servicio[{index}]");

    if line.numero_linea == 0 {
        errors.push(ValidationError::format(
            format!("{prefix}.numero_linea"),
            "numero_linea must be positive",
        ));
    }
    check_optional_text(line.codigo.as_deref(), 20, &format!("{prefix}.codigo"), errors);

    if line.cantidad <= Decimal::ZERO {
        errors.push(ValidationError::format(
            format!("{prefix}.cantidad"),
            format!("cantidad must be positive, got {}", line.cantidad),
        ));
    }
    if !catalogs.is_known_unit(&line.unidad_medida) {
        errors.push(ValidationError::catalog(
            format!("{prefix}.unidad_medida"),
            format!(
                "unit '{}' is not in the unit of measure catalog",
                line.unidad_medida
            ),
        ));
    }
    check_text(&line.detalle, 200, &format!("{prefix}.detalle"), errors);

    let mut amounts = vec![
        ("precio_unitario", line.precio_unitario),
        ("monto_total", line.monto_total),
        ("sub_total", line.sub_total),
        ("monto_total_linea", line.monto_total_linea),
    ];
    amounts.extend(line.base_imponible.map(|v| ("base_imponible", v)));
    amounts.extend(line.impuesto_neto.map(|v| ("impuesto_neto", v)));
    check_non_negative(&prefix, &amounts, errors);

    if let Some(discount) = &line.descuento {
        if discount.monto.is_sign_negative() {
            errors.push(ValidationError::format(
                format!("{prefix}.descuento.monto"),
                format!("discount must not be negative, got {}", discount.monto),
            ));
        }
        check_text(
            &discount.naturaleza,
            80,
            &format!("{prefix}.descuento.naturaleza"),
            errors,
        );
    }

    if let Some(tax) = &line.impuesto {
        validate_tax(tax, &format!("{prefix}.impuesto"), catalogs, errors);
    }
}

fn validate_tax(tax: &Tax, prefix: &str, catalogs: &Catalogs, errors: &mut Vec<ValidationError>) {
    if !catalogs.is_known_tax_code(&tax.codigo) {
        errors.push(ValidationError::catalog(
            format!("{prefix}.codigo"),
            format!("tax code '{}' is not in the tax catalog", tax.codigo),
        ));
    }
    check_percentage(tax.tarifa, &format!("{prefix}.tarifa"), errors);
    if tax.monto.is_sign_negative() {
        errors.push(ValidationError::format(
            format!("{prefix}.monto"),
            format!("tax amount must not be negative, got {}", tax.monto),
        ));
    }

    if let Some(rate_code) = tax.codigo_tarifa.filter(|c| c.rate() != tax.tarifa) {
        errors.push(ValidationError::consistency(
            format!("{prefix}.tarifa"),
            format!(
                "tarifa {} does not match rate code {} ({}%)",
                tax.tarifa,
                rate_code.code(),
                rate_code.rate()
            ),
        ));
    }

    if let Some(factor) = tax.factor_iva {
        if tax.codigo != TAX_CODE_USED_GOODS {
            errors.push(ValidationError::conditional(
                format!("{prefix}.factor_iva"),
                format!(
                    "factor_iva is only allowed for tax code {TAX_CODE_USED_GOODS}, got '{}'",
                    tax.codigo
                ),
            ));
        } else if factor.is_sign_negative() || factor > Decimal::ONE {
            errors.push(ValidationError::format(
                format!("{prefix}.factor_iva"),
                format!("factor_iva must be between 0 and 1, got {factor}"),
            ));
        }
    }

    if let Some(exoneration) = &tax.exoneracion {
        let prefix = format!("{prefix}.exoneracion");
        check_text(
            &exoneration.numero_documento,
            40,
            &format!("{prefix}.numero_documento"),
            errors,
        );
        check_text(
            &exoneration.nombre_institucion,
            160,
            &format!("{prefix}.nombre_institucion"),
            errors,
        );
        check_percentage(
            exoneration.porcentaje_exoneracion,
            &format!("{prefix}.porcentaje_exoneracion"),
            errors,
        );
        if exoneration.monto_exoneracion.is_sign_negative() {
            errors.push(ValidationError::format(
                format!("{prefix}.monto_exoneracion"),
                "exonerated amount must not be negative",
            ));
        } else if exoneration.monto_exoneracion > tax.monto {
            errors.push(ValidationError::consistency(
                format!("{prefix}.monto_exoneracion"),
                format!(
                    "exonerated amount {} exceeds the tax amount {}",
                    exoneration.monto_exoneracion, tax.monto
                ),
            ));
        }
    }
}

fn validate_line_arithmetic(
    line: &InvoiceLine,
    index: usize,
    tolerance: Decimal,
    errors: &mut Vec<ValidationError>,
) {
    let prefix = format!("detalle_servicio[{index}]");

    check_amount(
        &format!("{prefix}.monto_total"),
        line.monto_total,
        line.cantidad.checked_mul(line.precio_unitario),
        "cantidad * precio_unitario",
        tolerance,
        errors,
    );
    check_amount(
        &format!("{prefix}.sub_total"),
        line.sub_total,
        line.monto_total.checked_sub(line.discount_amount()),
        "monto_total - descuento",
        tolerance,
        errors,
    );

    if let Some(tax) = &line.impuesto {
        let base = line.base_imponible.unwrap_or(line.sub_total);
        // Used goods carry an explicit factor in place of the nominal rate.
        let expected = match tax.factor_iva {
            Some(factor) => base.checked_mul(factor),
            None => base.checked_mul(tax.tarifa).and_then(|t| t.checked_div(HUNDRED)),
        };
        check_amount(
            &format!("{prefix}.impuesto.monto"),
            tax.monto,
            expected,
            "tarifa applied to the taxable base",
            tolerance,
            errors,
        );

        if let Some(neto) = line.impuesto_neto {
            let exonerated = tax
                .exoneracion
                .as_ref()
                .map_or(Decimal::ZERO, |e| e.monto_exoneracion);
            check_amount(
                &format!("{prefix}.impuesto_neto"),
                neto,
                tax.monto.checked_sub(exonerated),
                "impuesto.monto - monto_exoneracion",
                tolerance,
                errors,
            );
        }
    }

    check_amount(
        &format!("{prefix}.monto_total_linea"),
        line.monto_total_linea,
        line.sub_total.checked_add(line.tax_amount()),
        "sub_total + line tax",
        tolerance,
        errors,
    );
}

fn validate_other_charge(charge: &OtherCharge, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("otros_cargos[{index}]");

    check_text(&charge.detalle, 160, &format!("{prefix}.detalle"), errors);
    if charge.monto_cargo.is_sign_negative() {
        errors.push(ValidationError::format(
            format!("{prefix}.monto_cargo"),
            format!("charge must not be negative, got {}", charge.monto_cargo),
        ));
    }
    if let Some(pct) = charge.porcentaje {
        check_percentage(pct, &format!("{prefix}.porcentaje"), errors);
    }

    if charge.tipo_documento == OtherChargeType::CobroTercero {
        if charge.numero_identidad_tercero.is_none() {
            errors.push(ValidationError::conditional(
                format!("{prefix}.numero_identidad_tercero"),
                "third-party identification is required for charge type 04",
            ));
        }
        if charge.nombre_tercero.is_none() {
            errors.push(ValidationError::conditional(
                format!("{prefix}.nombre_tercero"),
                "third-party name is required for charge type 04",
            ));
        }
    }
    check_optional_text(
        charge.numero_identidad_tercero.as_deref(),
        20,
        &format!("{prefix}.numero_identidad_tercero"),
        errors,
    );
    check_optional_text(
        charge.nombre_tercero.as_deref(),
        100,
        &format!("{prefix}.nombre_tercero"),
        errors,
    );
}

fn validate_reference(
    reference: &ReferenceInformation,
    index: usize,
    errors: &mut Vec<ValidationError>,
) {
    let prefix = format!("informacion_referencia[{index}]");
    check_text(&reference.numero, 50, &format!("{prefix}.numero"), errors);
    check_text(&reference.razon, 180, &format!("{prefix}.razon"), errors);
}

fn validate_summary(summary: &InvoiceSummary, catalogs: &Catalogs, errors: &mut Vec<ValidationError>) {
    let moneda = summary.moneda.as_str();
    if moneda.len() != 3 || !moneda.bytes().all(|b| b.is_ascii_uppercase()) {
        errors.push(ValidationError::format(
            "resumen.moneda",
            format!("currency must be a 3-letter ISO 4217 code, got '{moneda}'"),
        ));
    } else if !catalogs.is_known_currency(moneda) {
        errors.push(ValidationError::catalog(
            "resumen.moneda",
            format!("currency '{moneda}' is not a known ISO 4217 code"),
        ));
    }

    match (moneda == DOMESTIC_CURRENCY, summary.tipo_cambio) {
        (true, Some(_)) => errors.push(ValidationError::conditional(
            "resumen.tipo_cambio",
            format!("tipo_cambio must be absent for {DOMESTIC_CURRENCY}"),
        )),
        (false, None) => errors.push(ValidationError::conditional(
            "resumen.tipo_cambio",
            format!("tipo_cambio is required for {moneda}"),
        )),
        (false, Some(rate)) if rate <= Decimal::ZERO => {
            errors.push(ValidationError::format(
                "resumen.tipo_cambio",
                format!("tipo_cambio must be positive, got {rate}"),
            ))
        }
        _ => {}
    }

    let mut amounts = vec![
        ("total_serv_gravados", summary.total_serv_gravados),
        ("total_serv_exentos", summary.total_serv_exentos),
        ("total_mercancias_gravadas", summary.total_mercancias_gravadas),
        ("total_mercancias_exentas", summary.total_mercancias_exentas),
        ("total_gravado", summary.total_gravado),
        ("total_exento", summary.total_exento),
        ("total_exonerado", summary.total_exonerado),
        ("total_venta", summary.total_venta),
        ("total_descuentos", summary.total_descuentos),
        ("total_venta_neta", summary.total_venta_neta),
        ("total_impuestos", summary.total_impuestos),
        ("total_otros_cargos", summary.total_otros_cargos),
        ("total_comprobante", summary.total_comprobante),
    ];
    for (name, value) in [
        ("total_serv_exonerado", summary.total_serv_exonerado),
        ("total_serv_no_sujeto", summary.total_serv_no_sujeto),
        ("total_mercancias_exoneradas", summary.total_mercancias_exoneradas),
        ("total_mercancias_no_sujeto", summary.total_mercancias_no_sujeto),
        ("total_no_sujeto", summary.total_no_sujeto),
        ("total_iva_devuelto", summary.total_iva_devuelto),
    ] {
        amounts.extend(value.map(|v| (name, v)));
    }
    check_non_negative("resumen", &amounts, errors);
}

fn check_amount(
    field: &str,
    declared: Decimal,
    expected: Option<Decimal>,
    rule: &str,
    tolerance: Decimal,
    errors: &mut Vec<ValidationError>,
) {
    let Some(expected) = expected else {
        errors.push(ValidationError::arithmetic(
            field,
            format!("{rule} overflows the decimal range"),
        ));
        return;
    };
    let within = declared
        .checked_sub(expected)
        .is_some_and(|diff| diff.abs() <= tolerance);
    if !within {
        errors.push(ValidationError::arithmetic(
            field,
            format!("declared {declared} does not match {rule} = {expected} (tolerance {tolerance})"),
        ));
    }
}

fn check_non_negative(prefix: &str, amounts: &[(&str, Decimal)], errors: &mut Vec<ValidationError>) {
    for (name, value) in amounts {
        if value.is_sign_negative() && !value.is_zero() {
            errors.push(ValidationError::format(
                format!("{prefix}.{name}"),
                format!("{name} must not be negative, got {value}"),
            ));
        }
    }
}

fn check_percentage(value: Decimal, field: &str, errors: &mut Vec<ValidationError>) {
    if value.is_sign_negative() || value > HUNDRED {
        errors.push(ValidationError::format(
            field,
            format!("percentage must be between 0 and 100, got {value}"),
        ));
    }
}

fn check_text(value: &str, max: usize, field: &str, errors: &mut Vec<ValidationError>) {
    let len = value.chars().count();
    if value.trim().is_empty() {
        errors.push(ValidationError::format(field, "must not be empty"));
    } else if len > max {
        errors.push(ValidationError::format(
            field,
            format!("must be at most {max} characters, got {len}"),
        ));
    }
}

fn check_optional_text(
    value: Option<&str>,
    max: usize,
    field: &str,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(value) = value {
        check_text(value, max, field, errors);
    }
}

fn is_digits(value: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

fn sum<I: IntoIterator<Item = Decimal>>(values: I) -> Option<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
}
