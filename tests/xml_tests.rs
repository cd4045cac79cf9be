//! Canonical XML rendering tests for Factura Electrónica v4.4.

#![cfg(feature = "xml")]

use chrono::{DateTime, FixedOffset};
use factura_cr::core::*;
use factura_cr::xml::{format_decimal, render_invoice, render_invoice_bytes, render_validated_invoice};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

fn emisor() -> Emisor {
    EmisorBuilder::new(
        "Soluciones Digitales S.A.",
        Identification::new(IdentificationType::Juridica, "3101123456"),
    )
    .build()
}

fn simple_invoice() -> ElectronicInvoice {
    let line = LineBuilder::new(1, "Consultoría", dec!(1), "Sp", dec!(100))
        .impuesto(Tax::iva(TaxRateCode::General, dec!(13)))
        .totals(dec!(100), dec!(100), dec!(113))
        .build()
        .unwrap();
    InvoiceBuilder::new(
        "50612122300310112345600100001010000000001111111111",
        "00100001010000000001",
        date("2023-12-12T10:30:00-06:00"),
    )
    .codigo_actividad("620100")
    .emisor(emisor())
    .medio_pago(PaymentMethod::Efectivo)
    .add_line(line)
    .resumen(InvoiceSummary {
        total_serv_gravados: dec!(100),
        total_gravado: dec!(100),
        total_venta: dec!(100),
        total_venta_neta: dec!(100),
        total_impuestos: dec!(13),
        total_comprobante: dec!(113),
        ..InvoiceSummary::zeroed("CRC")
    })
    .build()
    .unwrap()
}

/// Two lines (added out of order), a discount, credit terms, a third-party
/// charge and a reference to a contract.
fn full_invoice() -> ElectronicInvoice {
    let licencia = LineBuilder::new(2, "Licencia anual", dec!(2), "Unid", dec!(15000.5))
        .impuesto(Tax::iva(TaxRateCode::General, dec!(3900.13)))
        .totals(dec!(30001), dec!(30001), dec!(33901.13))
        .build()
        .unwrap();
    let desarrollo = LineBuilder::new(1, "Desarrollo de software", dec!(10), "h", dec!(25000))
        .codigo("SRV-001")
        .descuento(dec!(25000), "Cliente frecuente")
        .impuesto(Tax::iva(TaxRateCode::General, dec!(29250)))
        .totals(dec!(250000), dec!(225000), dec!(254250))
        .build()
        .unwrap();

    InvoiceBuilder::new(
        "50612122300310112345600100001010000000001111111111",
        "00100001010000000001",
        date("2023-12-12T10:30:00-06:00"),
    )
    .codigo_actividad("620100")
    .emisor(
        EmisorBuilder::new(
            "Soluciones Digitales S.A.",
            Identification::new(IdentificationType::Juridica, "3101123456"),
        )
        .nombre_comercial("SolDig")
        .ubicacion(Location {
            provincia: "1".into(),
            canton: "01".into(),
            distrito: "08".into(),
            barrio: Some("Pavas".into()),
            otras_senas: Some("Frente al parque".into()),
        })
        .telefono(Phone::costa_rica("22223333"))
        .correo("facturas@soluciones.cr")
        .build(),
    )
    .receptor(
        ReceptorBuilder::new("Comercial del Valle S.A.")
            .identificacion(Identification::new(IdentificationType::Juridica, "3101654321"))
            .correo("compras@delvalle.cr")
            .build(),
    )
    .credito(30)
    .medio_pago(PaymentMethod::Transferencia)
    .medio_pago(PaymentMethod::SinpeMovil)
    .add_line(licencia)
    .add_line(desarrollo)
    .add_other_charge(OtherCharge {
        tipo_documento: OtherChargeType::CobroTercero,
        numero_identidad_tercero: Some("3101999999".into()),
        nombre_tercero: Some("Colegio de Profesionales".into()),
        detalle: "Timbre profesional".into(),
        porcentaje: Some(dec!(2)),
        monto_cargo: dec!(500),
    })
    .resumen(InvoiceSummary {
        total_serv_gravados: dec!(250000),
        total_mercancias_gravadas: dec!(30001),
        total_gravado: dec!(280001),
        total_venta: dec!(280001),
        total_descuentos: dec!(25000),
        total_venta_neta: dec!(255001),
        total_impuestos: dec!(33150.13),
        total_otros_cargos: dec!(500),
        total_comprobante: dec!(288651.13),
        ..InvoiceSummary::zeroed("CRC")
    })
    .add_reference(ReferenceInformation {
        tipo_documento: ReferenceDocumentType::Contrato,
        numero: "CT-2023-045".into(),
        fecha_emision: date("2023-11-01T09:00:00-06:00"),
        codigo: ReferenceCode::ReferenciaOtroDocumento,
        razon: "Contrato de servicios".into(),
    })
    .build()
    .unwrap()
}

#[test]
fn full_invoice_snapshot() {
    let xml = render_invoice(&full_invoice()).unwrap();
    insta::assert_snapshot!("factura_full", xml);
}

#[test]
fn thirteen_percent_service_line() {
    let xml = render_invoice(&simple_invoice()).unwrap();
    assert!(xml.contains("<MontoTotal>100.00</MontoTotal>"));
    assert!(xml.contains("<Monto>13.00</Monto>"));
    assert!(xml.contains("<MontoTotalLinea>113.00</MontoTotalLinea>"));
    assert!(xml.contains("<TotalComprobante>113.00</TotalComprobante>"));
    assert!(xml.contains("<CodigoMoneda>CRC</CodigoMoneda>"));
    assert!(!xml.contains("TipoCambio"));
    assert!(!xml.contains("<Receptor>"));
    assert!(!xml.contains("PlazoCredito"));
}

#[test]
fn rendering_is_deterministic() {
    let invoice = full_invoice();
    let first = render_invoice(&invoice).unwrap();
    let second = render_invoice(&invoice.clone()).unwrap();
    assert_eq!(first, second);
    assert_eq!(render_invoice_bytes(&invoice).unwrap(), first.into_bytes());
}

#[test]
fn output_is_well_formed() {
    use quick_xml::Reader;
    use quick_xml::events::Event;

    let xml = render_invoice(&full_invoice()).unwrap();
    let mut reader = Reader::from_str(&xml);
    let mut depth = 0i32;
    let mut lines = 0;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) => {
                depth += 1;
                if e.name().as_ref() == b"LineaDetalle" {
                    lines += 1;
                }
            }
            Event::End(_) => depth -= 1,
            Event::Eof => break,
            _ => {}
        }
    }
    assert_eq!(depth, 0);
    assert_eq!(lines, 2);
}

#[test]
fn usd_invoice_carries_exchange_rate() {
    let mut invoice = simple_invoice();
    invoice.resumen.moneda = "USD".into();
    invoice.resumen.tipo_cambio = Some(dec!(512.34));
    let xml = render_validated_invoice(&invoice, &Catalogs::default()).unwrap();
    assert!(xml.contains(
        "<CodigoMoneda>USD</CodigoMoneda>\n    <TipoCambio>512.34000</TipoCambio>"
    ));
}

#[test]
fn exoneration_and_net_tax() {
    let mut invoice = simple_invoice();
    let line = &mut invoice.detalle_servicio[0];
    let tax = line.impuesto.as_mut().unwrap();
    tax.exoneracion = Some(Exoneration {
        tipo_documento: ExonerationType::ComprasAutorizadas,
        numero_documento: "AL-00012345-23".into(),
        nombre_institucion: "Ministerio de Hacienda".into(),
        fecha_emision: date("2023-01-15T08:00:00-06:00"),
        porcentaje_exoneracion: dec!(100),
        monto_exoneracion: dec!(13),
    });
    line.impuesto_neto = Some(Decimal::ZERO);
    line.monto_total_linea = dec!(100);
    invoice.resumen.total_impuestos = Decimal::ZERO;
    invoice.resumen.total_comprobante = dec!(100);

    let xml = render_validated_invoice(&invoice, &Catalogs::default()).unwrap();
    let exoneracion = xml.find("<Exoneracion>").unwrap();
    let neto = xml.find("<ImpuestoNeto>0.00</ImpuestoNeto>").unwrap();
    assert!(exoneracion < neto);
    assert!(xml.contains("<FechaEmision>2023-01-15T08:00:00-06:00</FechaEmision>"));
    assert!(xml.contains("<PorcentajeExoneracion>100.00</PorcentajeExoneracion>"));
    assert!(xml.contains("<MontoExoneracion>13.00</MontoExoneracion>"));
}

#[test]
fn used_goods_factor_precision() {
    let mut invoice = simple_invoice();
    let tax = invoice.detalle_servicio[0].impuesto.as_mut().unwrap();
    tax.codigo = "08".into();
    tax.codigo_tarifa = None;
    tax.factor_iva = Some(dec!(0.13));
    let xml = render_invoice(&invoice).unwrap();
    assert!(xml.contains("<Codigo>08</Codigo>"));
    assert!(xml.contains("<FactorIVA>0.1300</FactorIVA>"));
    assert!(!xml.contains("CodigoTarifa"));
    assert!(xml.find("<FactorIVA>").unwrap() < xml.find("<Monto>").unwrap());
}

#[test]
fn special_characters_are_escaped() {
    let mut invoice = simple_invoice();
    invoice.detalle_servicio[0].detalle = "Tornillos < 5mm & tuercas".into();
    let xml = render_invoice(&invoice).unwrap();
    assert!(xml.contains("<Detalle>Tornillos &lt; 5mm &amp; tuercas</Detalle>"));
}

#[test]
fn validated_render_rejects_bad_totals() {
    let mut invoice = simple_invoice();
    invoice.resumen.total_comprobante = dec!(200);
    let err = render_validated_invoice(&invoice, &Catalogs::default()).unwrap_err();
    assert!(
        err.validation_errors()
            .iter()
            .any(|e| e.field == "resumen.total_comprobante")
    );
}

#[test]
fn decimal_formatting() {
    assert_eq!(format_decimal(dec!(1.005), 2).unwrap(), "1.01");
    assert_eq!(format_decimal(dec!(-1.005), 2).unwrap(), "-1.01");
    assert_eq!(format_decimal(dec!(7), 5).unwrap(), "7.00000");
    assert_eq!(format_decimal(dec!(-0.001), 2).unwrap(), "0.00");
}

#[test]
fn oversized_quantity_is_an_xml_error() {
    let mut invoice = simple_invoice();
    invoice.detalle_servicio[0].cantidad = Decimal::from_i128_with_scale(10i128.pow(26), 0);
    assert!(matches!(render_invoice(&invoice), Err(FacturaError::Xml(_))));
}

#[test]
fn reference_is_flat_without_wrapper() {
    let xml = render_invoice(&full_invoice()).unwrap();
    assert!(xml.contains(
        "<InformacionReferencia>\n    <TipoDoc>06</TipoDoc>\n    <Numero>CT-2023-045</Numero>"
    ));
    assert!(!xml.contains("<Referencia>"));
    assert!(!xml.contains("<Fax>"));
    assert!(!xml.contains("<OtroCargo>"));
}
