//! Boundary conditions: limits, zero-decimal currencies, text lengths.

use chrono::{DateTime, FixedOffset};
use factura_cr::core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn fecha(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

fn line(numero: u32) -> InvoiceLine {
    LineBuilder::new(numero, "Consultoría", dec!(1), "Sp", dec!(100))
        .impuesto(Tax::iva(TaxRateCode::General, dec!(13)))
        .totals(dec!(100), dec!(100), dec!(113))
        .build()
        .unwrap()
}

fn invoice_with_lines(count: u32) -> ElectronicInvoice {
    let n = Decimal::from(count);
    let mut builder = InvoiceBuilder::new(
        "50612122300310112345600100001010000000001111111111",
        "00100001010000000001",
        fecha("2023-12-12T10:30:00-06:00"),
    )
    .codigo_actividad("620100")
    .emisor(
        EmisorBuilder::new(
            "Soluciones Digitales S.A.",
            Identification::new(IdentificationType::Juridica, "3101123456"),
        )
        .build(),
    )
    .medio_pago(PaymentMethod::Efectivo)
    .resumen(InvoiceSummary {
        total_serv_gravados: dec!(100) * n,
        total_gravado: dec!(100) * n,
        total_venta: dec!(100) * n,
        total_venta_neta: dec!(100) * n,
        total_impuestos: dec!(13) * n,
        total_comprobante: dec!(113) * n,
        ..InvoiceSummary::zeroed("CRC")
    });
    for numero in 1..=count {
        builder = builder.add_line(line(numero));
    }
    builder.build_unchecked().unwrap()
}

fn errors_of(invoice: &ElectronicInvoice) -> Vec<ValidationError> {
    validate_invoice(invoice, &Catalogs::default()).err().unwrap_or_default()
}

fn has(errors: &[ValidationError], field: &str, kind: ErrorKind) -> bool {
    errors.iter().any(|e| e.field == field && e.kind == kind)
}

#[test]
fn thousand_lines_is_the_limit() {
    let invoice = invoice_with_lines(MAX_LINES as u32);
    assert!(errors_of(&invoice).is_empty());

    let invoice = invoice_with_lines(MAX_LINES as u32 + 1);
    assert!(has(&errors_of(&invoice), "detalle_servicio", ErrorKind::Format));
}

#[test]
fn no_lines() {
    let mut invoice = invoice_with_lines(1);
    invoice.detalle_servicio.clear();
    assert!(has(
        &errors_of(&invoice),
        "detalle_servicio",
        ErrorKind::ConditionalField
    ));
}

#[test]
fn duplicate_line_numbers() {
    let mut invoice = invoice_with_lines(2);
    invoice.detalle_servicio[1].numero_linea = 1;
    assert!(has(
        &errors_of(&invoice),
        "detalle_servicio[1].numero_linea",
        ErrorKind::Consistency
    ));
}

#[test]
fn four_payment_methods_is_the_limit() {
    let mut invoice = invoice_with_lines(1);
    invoice.medios_pago = vec![
        PaymentMethod::Efectivo,
        PaymentMethod::Tarjeta,
        PaymentMethod::Cheque,
        PaymentMethod::Transferencia,
    ];
    assert!(errors_of(&invoice).is_empty());

    invoice.medios_pago.push(PaymentMethod::SinpeMovil);
    assert!(has(&errors_of(&invoice), "medios_pago", ErrorKind::Format));
}

#[test]
fn repeated_payment_method() {
    let mut invoice = invoice_with_lines(1);
    invoice.medios_pago = vec![PaymentMethod::Tarjeta, PaymentMethod::Tarjeta];
    assert!(has(
        &errors_of(&invoice),
        "medios_pago[1]",
        ErrorKind::Consistency
    ));
}

#[test]
fn zero_decimal_currency_tolerance() {
    assert_eq!(arithmetic_tolerance("CRC"), dec!(0.02));
    assert_eq!(arithmetic_tolerance("JPY"), dec!(2));
    assert_eq!(arithmetic_tolerance("ZZZ"), dec!(0.02));

    let mut invoice = invoice_with_lines(1);
    invoice.resumen.moneda = "JPY".into();
    invoice.resumen.tipo_cambio = Some(dec!(3.45));
    invoice.resumen.total_comprobante = dec!(115);
    assert!(errors_of(&invoice).is_empty());

    invoice.resumen.total_comprobante = dec!(116);
    assert!(has(
        &errors_of(&invoice),
        "resumen.total_comprobante",
        ErrorKind::ArithmeticMismatch
    ));
}

#[test]
fn name_length_counts_characters() {
    let mut invoice = invoice_with_lines(1);
    invoice.emisor.nombre = "ñ".repeat(100);
    assert!(errors_of(&invoice).is_empty());

    invoice.emisor.nombre = "ñ".repeat(101);
    assert!(has(&errors_of(&invoice), "emisor.nombre", ErrorKind::Format));
}

#[test]
fn empty_detail_text() {
    let mut invoice = invoice_with_lines(1);
    invoice.detalle_servicio[0].detalle = String::new();
    assert!(has(
        &errors_of(&invoice),
        "detalle_servicio[0].detalle",
        ErrorKind::Format
    ));
}

#[test]
fn identification_lengths() {
    let cases = [
        (IdentificationType::Fisica, "112345678", true),
        (IdentificationType::Fisica, "11234567", false),
        (IdentificationType::Juridica, "310112345", false),
        (IdentificationType::Dimex, "12345678901", true),
        (IdentificationType::Dimex, "123456789012", true),
        (IdentificationType::Dimex, "1234567890", false),
        (IdentificationType::Nite, "3101123456", true),
        (IdentificationType::Extranjero, "AB1234567", true),
        (IdentificationType::Extranjero, "AB-1234", false),
    ];
    for (tipo, numero, ok) in cases {
        assert_eq!(tipo.accepts(numero), ok, "{tipo:?} {numero}");
    }
}

#[test]
fn receptor_identification_is_checked() {
    let mut invoice = invoice_with_lines(1);
    invoice.receptor = Some(
        ReceptorBuilder::new("Cliente")
            .identificacion(Identification::new(IdentificationType::Fisica, "12345"))
            .build(),
    );
    assert!(has(
        &errors_of(&invoice),
        "receptor.identificacion.numero",
        ErrorKind::Format
    ));
}

#[test]
fn key_date_follows_local_calendar() {
    // 23:30 local on the 12th is already the 13th in UTC.
    let mut invoice = invoice_with_lines(1);
    invoice.fecha_emision = fecha("2023-12-12T23:30:00-06:00");
    assert!(errors_of(&invoice).is_empty());

    invoice.fecha_emision = fecha("2023-12-13T00:30:00-06:00");
    assert!(has(&errors_of(&invoice), "clave", ErrorKind::Consistency));
}

#[test]
fn non_invoice_consecutive() {
    let mut invoice = invoice_with_lines(1);
    invoice.clave = "50612122300310112345600100001040000000001111111111".into();
    invoice.numero_consecutivo = "00100001040000000001".into();
    let errors = errors_of(&invoice);
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(has(&errors, "numero_consecutivo", ErrorKind::Consistency));
}

#[test]
fn malformed_key_skips_cross_checks() {
    let mut invoice = invoice_with_lines(1);
    invoice.clave = "123".into();
    let errors = errors_of(&invoice);
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(has(&errors, "clave", ErrorKind::Format));
}

#[test]
fn negative_amounts_are_format_errors() {
    let mut invoice = invoice_with_lines(1);
    invoice.resumen.total_descuentos = dec!(-1);
    assert!(has(
        &errors_of(&invoice),
        "resumen.total_descuentos",
        ErrorKind::Format
    ));
}

#[test]
fn huge_amounts_do_not_panic() {
    let mut invoice = invoice_with_lines(1);
    invoice.detalle_servicio[0].cantidad = Decimal::MAX;
    invoice.detalle_servicio[0].precio_unitario = Decimal::MAX;
    assert!(has(
        &errors_of(&invoice),
        "detalle_servicio[0].monto_total",
        ErrorKind::ArithmeticMismatch
    ));
}

fn reference(numero: &str, razon: &str) -> ReferenceInformation {
    ReferenceInformation {
        tipo_documento: ReferenceDocumentType::FacturaElectronica,
        numero: numero.into(),
        fecha_emision: fecha("2023-12-01T09:00:00-06:00"),
        codigo: ReferenceCode::CorrigeMonto,
        razon: razon.into(),
    }
}

#[test]
fn zero_quantity() {
    let mut invoice = invoice_with_lines(1);
    invoice.detalle_servicio[0].cantidad = Decimal::ZERO;
    assert!(has(
        &errors_of(&invoice),
        "detalle_servicio[0].cantidad",
        ErrorKind::Format
    ));
}

#[test]
fn tax_rate_above_one_hundred() {
    let mut invoice = invoice_with_lines(1);
    invoice.detalle_servicio[0].impuesto.as_mut().unwrap().tarifa = dec!(150);
    assert!(has(
        &errors_of(&invoice),
        "detalle_servicio[0].impuesto.tarifa",
        ErrorKind::Format
    ));
}

#[test]
fn exoneration_bounds() {
    let mut invoice = invoice_with_lines(1);
    let tax = invoice.detalle_servicio[0].impuesto.as_mut().unwrap();
    tax.exoneracion = Some(Exoneration {
        tipo_documento: ExonerationType::ComprasAutorizadas,
        numero_documento: "AL-00012345-23".into(),
        nombre_institucion: "Ministerio de Hacienda".into(),
        fecha_emision: fecha("2023-01-15T08:00:00-06:00"),
        porcentaje_exoneracion: dec!(150),
        monto_exoneracion: dec!(20.00),
    });
    let errors = errors_of(&invoice);
    assert!(has(
        &errors,
        "detalle_servicio[0].impuesto.exoneracion.porcentaje_exoneracion",
        ErrorKind::Format
    ));
    assert!(has(
        &errors,
        "detalle_servicio[0].impuesto.exoneracion.monto_exoneracion",
        ErrorKind::Consistency
    ));

    // the full tax amount at 100% is allowed
    let exoneracion = invoice.detalle_servicio[0]
        .impuesto
        .as_mut()
        .unwrap()
        .exoneracion
        .as_mut()
        .unwrap();
    exoneracion.porcentaje_exoneracion = dec!(100);
    exoneracion.monto_exoneracion = dec!(13.00);
    assert!(errors_of(&invoice).is_empty());
}

#[test]
fn reference_text_lengths() {
    let mut invoice = invoice_with_lines(1);
    invoice.informacion_referencia = vec![
        reference(&"9".repeat(51), "Corrige monto"),
        reference("FE-0001", ""),
        reference("FE-0002", &"ñ".repeat(181)),
    ];
    let errors = errors_of(&invoice);
    assert!(has(&errors, "informacion_referencia[0].numero", ErrorKind::Format));
    assert!(has(&errors, "informacion_referencia[1].razon", ErrorKind::Format));
    assert!(has(&errors, "informacion_referencia[2].razon", ErrorKind::Format));
    assert!(!errors.iter().any(|e| e.field == "informacion_referencia[0].razon"));

    invoice.informacion_referencia = vec![reference(&"9".repeat(50), &"ñ".repeat(180))];
    assert!(
        !errors_of(&invoice)
            .iter()
            .any(|e| e.field.starts_with("informacion_referencia"))
    );
}

#[test]
fn other_charge_percentage_above_one_hundred() {
    let mut invoice = invoice_with_lines(1);
    invoice.otros_cargos.push(OtherCharge {
        tipo_documento: OtherChargeType::ImpuestoServicio,
        numero_identidad_tercero: None,
        nombre_tercero: None,
        detalle: "Impuesto de servicio".into(),
        porcentaje: Some(dec!(101)),
        monto_cargo: dec!(10),
    });
    invoice.resumen.total_otros_cargos = dec!(10);
    invoice.resumen.total_comprobante = dec!(123);
    let errors = errors_of(&invoice);
    assert!(has(&errors, "otros_cargos[0].porcentaje", ErrorKind::Format));
    assert_eq!(errors.len(), 1);
}
