//! Economic activity codes (CodigoActividad).
//!
//! Six-digit codes registered with Hacienda for the issuer. The built-in
//! table is a curated subset of the most common activities; load the full
//! register through [`super::Catalogs::from_json`].

/// Check whether `code` is a built-in activity code.
pub fn is_known_activity_code(code: &str) -> bool {
    ACTIVITY_CODES.binary_search(&code).is_ok()
}

/// Structural rule for activity codes: 1 to 6 ASCII digits.
pub fn is_activity_code_shaped(code: &str) -> bool {
    (1..=6).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_digit())
}

/// Sorted for binary search.
pub(crate) static ACTIVITY_CODES: &[&str] = &[
    "011100", // Cultivo de cereales, legumbres y semillas oleaginosas
    "011300", // Cultivo de hortalizas, raíces y tubérculos
    "012200", // Cultivo de frutas tropicales y subtropicales
    "012700", // Cultivo de plantas con las que se preparan bebidas (café)
    "014100", // Cría de ganado bovino
    "107100", // Elaboración de productos de panadería
    "110700", // Elaboración de bebidas no alcohólicas
    "410000", // Construcción de edificios
    "432100", // Instalaciones eléctricas
    "452000", // Mantenimiento y reparación de vehículos automotores
    "462000", // Venta al por mayor de materias primas agropecuarias
    "463000", // Venta al por mayor de alimentos, bebidas y tabaco
    "471100", // Venta al por menor en comercios no especializados (supermercados)
    "471900", // Otras actividades de venta al por menor en comercios no especializados
    "472100", // Venta al por menor de alimentos en comercios especializados
    "474100", // Venta al por menor de computadoras y equipo de telecomunicaciones
    "475200", // Venta al por menor de artículos de ferretería
    "477200", // Venta al por menor de productos farmacéuticos
    "479100", // Venta al por menor por correo y por internet
    "492300", // Transporte de carga por carretera
    "551000", // Actividades de alojamiento para estancias cortas
    "561000", // Actividades de restaurantes y de servicio móvil de comidas
    "563000", // Actividades de servicio de bebidas
    "582000", // Publicación de programas informáticos
    "620100", // Actividades de programación informática
    "620200", // Actividades de consultoría informática
    "631100", // Procesamiento de datos, hospedaje y actividades conexas
    "681000", // Actividades inmobiliarias con bienes propios o arrendados
    "691000", // Actividades jurídicas
    "692000", // Actividades de contabilidad y auditoría
    "702000", // Actividades de consultoría de gestión
    "711000", // Actividades de arquitectura e ingeniería
    "731000", // Publicidad
    "741000", // Actividades especializadas de diseño
    "791100", // Actividades de agencias de viajes
    "821100", // Actividades combinadas de servicios administrativos de oficina
    "854900", // Otros tipos de enseñanza
    "862000", // Actividades de médicos y odontólogos
    "960200", // Peluquería y otros tratamientos de belleza
];
