//! Hacienda unit-of-measure codes (UnidadMedida).
//!
//! Covers the SI units, the derived units and the commercial units most
//! used on Costa Rican invoices. The full annex can be supplied at runtime
//! through [`super::Catalogs`].

/// Check whether `code` is a built-in unit of measure code.
pub fn is_known_unit_code(code: &str) -> bool {
    UNIT_CODES.binary_search(&code).is_ok()
}

/// Built-in unit codes, sorted for binary search.
pub(crate) static UNIT_CODES: &[&str] = &[
    "A",      // Ampere
    "Al",     // Alquiler de uso habitacional
    "Alc",    // Alquiler de uso comercial
    "Bls",    // Bolsa
    "Caja",   // Caja
    "Cc",     // Centímetro cúbico
    "Cm",     // Comisiones
    "Doc",    // Docena
    "Gal",    // Galón
    "Hz",     // Hertz
    "I",      // Intereses
    "J",      // Joule
    "K",      // Kelvin
    "Kit",    // Kit
    "Km",     // Kilómetro
    "Kw",     // Kilovatio
    "L",      // Litro
    "Lb",     // Libra
    "N",      // Newton
    "Os",     // Otro tipo de servicio
    "Otros",  // Otros
    "Oz",     // Onzas
    "Pa",     // Pascal
    "Paq",    // Paquete
    "Par",    // Par
    "Pie",    // Pie
    "Pulg",   // Pulgada
    "Rollo",  // Rollo
    "Sp",     // Servicios profesionales
    "Spe",    // Servicios personales
    "St",     // Servicios técnicos
    "Unid",   // Unidad
    "V",      // Volt
    "W",      // Watt
    "cd",     // Candela
    "cm",     // Centímetro
    "d",      // Día
    "g",      // Gramo
    "h",      // Hora
    "kWh",    // Kilovatio hora
    "kg",     // Kilogramo
    "m",      // Metro
    "m/s",    // Metro por segundo
    "mL",     // Mililitro
    "min",    // Minuto
    "mm",     // Milímetro
    "mol",    // Mol
    "m²",     // Metro cuadrado
    "m³",     // Metro cúbico
    "s",      // Segundo
    "t",      // Tonelada
    "°C",     // Grado Celsius
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert!(is_known_unit_code("Unid"));
        assert!(is_known_unit_code("Sp"));
        assert!(is_known_unit_code("kg"));
        assert!(is_known_unit_code("m²"));
        assert!(is_known_unit_code("h"));
        assert!(is_known_unit_code("Otros"));
    }

    #[test]
    fn unknown_codes() {
        assert!(!is_known_unit_code("C62"));
        assert!(!is_known_unit_code(""));
        assert!(!is_known_unit_code("unid"));
    }

    #[test]
    fn list_is_sorted() {
        for window in UNIT_CODES.windows(2) {
            assert!(
                window[0] < window[1],
                "unit codes not sorted: {} >= {}",
                window[0],
                window[1]
            );
        }
    }
}
