use std::io::Cursor;

use chrono::{DateTime, FixedOffset};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::FacturaError;

fn xml_io(e: std::io::Error) -> FacturaError {
    FacturaError::Xml(format!("write error: {e}"))
}

/// Indented XML writer over an in-memory buffer.
pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    pub fn new() -> Result<Self, FacturaError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner().into_inner()
    }

    pub fn into_string(self) -> Result<String, FacturaError> {
        String::from_utf8(self.into_bytes())
            .map_err(|e| FacturaError::Xml(format!("UTF-8 error: {e}")))
    }

    pub fn start_element(&mut self, name: &str) -> Result<&mut Self, FacturaError> {
        self.writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, FacturaError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn end_element(&mut self, name: &str) -> Result<&mut Self, FacturaError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self, FacturaError> {
        self.start_element(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    /// Write a decimal with exactly `dp` fractional digits.
    pub fn decimal_element(
        &mut self,
        name: &str,
        value: Decimal,
        dp: u32,
    ) -> Result<&mut Self, FacturaError> {
        let text = format_decimal(value, dp)?;
        self.text_element(name, &text)
    }

    pub fn optional_text_element(
        &mut self,
        name: &str,
        text: Option<&str>,
    ) -> Result<&mut Self, FacturaError> {
        if let Some(text) = text {
            self.text_element(name, text)?;
        }
        Ok(self)
    }

    pub fn optional_decimal_element(
        &mut self,
        name: &str,
        value: Option<Decimal>,
        dp: u32,
    ) -> Result<&mut Self, FacturaError> {
        if let Some(value) = value {
            self.decimal_element(name, value, dp)?;
        }
        Ok(self)
    }
}

/// Format a Decimal with exactly `dp` fractional digits, rounding half away
/// from zero.
///
/// Fails when the value is too large to carry `dp` fractional digits in a
/// 96-bit mantissa (e.g. 10^26 at 3 digits).
pub fn format_decimal(value: Decimal, dp: u32) -> Result<String, FacturaError> {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    if rounded.scale() != dp {
        return Err(FacturaError::Xml(format!(
            "{value} cannot be written with {dp} fractional digits"
        )));
    }
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    Ok(rounded.to_string())
}

/// `YYYY-MM-DDThh:mm:ss±hh:mm`.
pub fn format_datetime(value: &DateTime<FixedOffset>) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}
