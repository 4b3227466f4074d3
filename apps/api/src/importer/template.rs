//! Template generator — the canonical 44-column header plus one sample row
//! documenting the cell encoding conventions (SI/NO booleans, `|` lists,
//! `Nombre:Capacidad:Cantidad` room tuples).

/// Download name for the generated template file.
pub const TEMPLATE_FILENAME: &str = "plantilla_hoteles_dgd.csv";

/// Fixed column order. The parser is positional, so this order is the contract.
pub const HEADERS: [&str; 44] = [
    "ID",
    "Nombre",
    "Ubicacion",
    "Rating",
    "Reviews",
    "Categoria",
    "Destacado",
    "Estado",
    "Descripcion",
    "Latitud",
    "Longitud",
    "Highlights",
    "ImagenPrincipal",
    "Galeria",
    "PlanAlimenticio",
    "PoliticaNinos",
    "Bares",
    "CheckIn",
    "CheckOut",
    "Desayuno",
    "Almuerzo",
    "Cena",
    "Wifi",
    "Piscina",
    "Spa",
    "Gimnasio",
    "AireAcondicionado",
    "RoomService",
    "Playa",
    "ClubNinos",
    "PetFriendly",
    "Movilidad",
    "Eventos",
    "Parqueadero",
    "AguaCaliente",
    "MiniNevera",
    "Cajilla",
    "Show",
    "Actividades",
    "ParqueNinos",
    "PiscinaNinos",
    "PlayaPrivada",
    "TiposHabitacion_Formato_Nombre:Capacidad:Cantidad",
    "Restaurantes_Formato_Nombre:Cocina:Reserva(SI/NO)",
];

/// Example data row shipped with the template. `AUTO` in the ID column asks
/// the importer to generate a fresh identifier.
pub const SAMPLE_ROW: [&str; 44] = [
    "AUTO",
    "Hotel Demo Excel",
    "Cartagena",
    "4.5",
    "120",
    "Confort",
    "SI",
    "Activo",
    "Descripcion del hotel aqui",
    "10.39",
    "-75.55",
    "Playa|Centro",
    "https://img.com/main.jpg",
    "https://img.com/1.jpg|https://img.com/2.jpg",
    "Todo Incluido",
    "Niños gratis",
    "2",
    "15:00",
    "12:00",
    "7-10",
    "12-2",
    "7-9",
    "SI",
    "SI",
    "NO",
    "SI",
    "SI",
    "SI",
    "SI",
    "SI",
    "NO",
    "SI",
    "SI",
    "NO",
    "SI",
    "SI",
    "SI",
    "SI",
    "SI",
    "SI",
    "SI",
    "NO",
    "Estandar:2:50|Suite:4:10",
    "Restaurante A:Italiana:SI|Buffet B:Internacional:NO",
];

/// Renders the full template: header row, one sample row, newline-terminated.
pub fn template_csv() -> String {
    format!("{}\n{}\n", HEADERS.join(","), SAMPLE_ROW.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_has_exactly_two_rows() {
        let csv = template_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn test_header_and_sample_have_44_columns() {
        assert_eq!(HEADERS.len(), 44);
        assert_eq!(SAMPLE_ROW.len(), 44);
        let csv = template_csv();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap().split(',').count(), 44);
        assert_eq!(lines.next().unwrap().split(',').count(), 44);
    }

    #[test]
    fn test_sample_row_demonstrates_auto_id() {
        assert_eq!(SAMPLE_ROW[0], "AUTO");
    }
}
