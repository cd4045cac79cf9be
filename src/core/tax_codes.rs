//! Tax codes (Impuesto/Codigo).

/// IVA.
pub const TAX_CODE_IVA: &str = "01";

/// IVA under the used goods regime; the only code that carries a FactorIVA.
pub const TAX_CODE_USED_GOODS: &str = "08";

/// Check whether `code` is a built-in tax code.
pub fn is_known_tax_code(code: &str) -> bool {
    TAX_CODES.binary_search(&code).is_ok()
}

/// Sorted for binary search.
pub(crate) static TAX_CODES: &[&str] = &[
    "01", // Impuesto al Valor Agregado
    "02", // Impuesto Selectivo de Consumo
    "03", // Impuesto único a los combustibles
    "04", // Impuesto específico de bebidas alcohólicas
    "05", // Impuesto específico sobre bebidas envasadas sin contenido alcohólico y jabones de tocador
    "06", // Impuesto a los productos de tabaco
    "07", // IVA (cálculo especial)
    "08", // IVA Régimen de Bienes Usados (Factor)
    "12", // Impuesto específico al cemento
    "99", // Otros
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert!(is_known_tax_code(TAX_CODE_IVA));
        assert!(is_known_tax_code(TAX_CODE_USED_GOODS));
        assert!(is_known_tax_code("99"));
        assert!(!is_known_tax_code("09"));
        assert!(!is_known_tax_code("1"));
    }

    #[test]
    fn list_is_sorted() {
        for window in TAX_CODES.windows(2) {
            assert!(
                window[0] < window[1],
                "tax codes not sorted: {} >= {}",
                window[0],
                window[1]
            );
        }
    }
}
