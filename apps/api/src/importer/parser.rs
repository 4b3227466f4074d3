//! Table parser — maps the flat 44-column spreadsheet export into nested
//! `Hotel` records. Decoding is positional (the header row is discarded) and
//! never fails: malformed cells fall back to documented defaults, and rows
//! with fewer than five columns are dropped.

use chrono::Utc;
use uuid::Uuid;

use crate::models::hotel::{
    Category, ExtendedAmenities, Hotel, HotelAmenities, HotelSchedules, Restaurant, RoomType,
    Status,
};

/// ID cell sentinel asking for a generated identifier.
const AUTO_ID: &str = "AUTO";

const DEFAULT_NAME: &str = "Nuevo Hotel Importado";
const DEFAULT_LOCATION: &str = "Sin Ubicación";
const DEFAULT_ROOM_NAME: &str = "Habitación";
const DEFAULT_RESTAURANT_NAME: &str = "Restaurante";
const DEFAULT_CUISINE: &str = "General";
const ROOM_DESCRIPTION: &str = "Importada desde hoja de cálculo";
const RESTAURANT_SCHEDULE: &str = "Consultar horario";
const DEFAULT_CHECK_IN: &str = "15:00";
const DEFAULT_CHECK_OUT: &str = "12:00";

/// Parses a full spreadsheet export. The first line is the header and is
/// skipped; blank lines are skipped; short rows (< 5 columns) are dropped.
pub fn parse_hotels(text: &str) -> Vec<Hotel> {
    // One timestamp per batch keeps room/restaurant ids stable within a run;
    // the row index disambiguates rows parsed in the same millisecond.
    let batch_millis = Utc::now().timestamp_millis();

    text.lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .filter_map(|(row_idx, line)| parse_row(line, batch_millis, row_idx))
        .collect()
}

/// Decodes one data row, or `None` when the row is too short to be meaningful.
fn parse_row(line: &str, batch_millis: i64, row_idx: usize) -> Option<Hotel> {
    let cols: Vec<String> = split_columns(line).iter().map(|c| clean(c)).collect();
    if cols.len() < 5 {
        return None;
    }

    let col = |i: usize| cols.get(i).map(String::as_str).unwrap_or("");

    let amenities = HotelAmenities {
        wifi: parse_bool(col(22)),
        pool: parse_bool(col(23)),
        spa: parse_bool(col(24)),
        gym: parse_bool(col(25)),
        ac: parse_bool(col(26)),
        room_service: parse_bool(col(27)),
        beach: parse_bool(col(28)),
        kids_club: parse_bool(col(29)),
    };

    let extended_amenities = ExtendedAmenities {
        pet_friendly: parse_bool(col(30)),
        accessibility: parse_bool(col(31)),
        events_hall: parse_bool(col(32)),
        parking: parse_bool(col(33)),
        hot_water: parse_bool(col(34)),
        mini_fridge: parse_bool(col(35)),
        safe: parse_bool(col(36)),
        night_show: parse_bool(col(37)),
        extra_activities: parse_bool(col(38)),
        kids_park: parse_bool(col(39)),
        kids_pool: parse_bool(col(40)),
        private_beach: parse_bool(col(41)),
    };

    Some(Hotel {
        id: decode_id(col(0)),
        name: non_empty_or(col(1), DEFAULT_NAME),
        location: non_empty_or(col(2), DEFAULT_LOCATION),
        rating: col(3).parse().unwrap_or(0.0),
        reviews: col(4).parse().unwrap_or(0),
        category: Category::from_sheet(col(5)),
        featured: parse_bool(col(6)),
        status: Status::from_sheet(col(7)),

        description: col(8).to_string(),
        latitude: col(9).to_string(),
        longitude: col(10).to_string(),
        highlights: parse_list(col(11)),

        main_image: col(12).to_string(),
        gallery: parse_list(col(13)),

        meal_plan: col(14).to_string(),
        child_policy: col(15).to_string(),
        bars: col(16).parse().unwrap_or(0),

        schedules: HotelSchedules {
            check_in: non_empty_or(col(17), DEFAULT_CHECK_IN),
            check_out: non_empty_or(col(18), DEFAULT_CHECK_OUT),
            breakfast_time: col(19).to_string(),
            lunch_time: col(20).to_string(),
            dinner_time: col(21).to_string(),
        },

        amenities,
        extended_amenities,
        room_types: parse_rooms(col(42), batch_millis, row_idx),
        restaurants: parse_restaurants(col(43), batch_millis, row_idx),
        nearby_places: Vec::new(),
    })
}

/// Splits a line on commas that are not inside a double-quoted section.
pub fn split_columns(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Strips one leading and one trailing quote, trimming surrounding whitespace.
fn clean(raw: &str) -> String {
    let s = raw.trim();
    let s = s.strip_prefix('"').unwrap_or(s);
    let s = s.strip_suffix('"').unwrap_or(s);
    s.trim().to_string()
}

/// {TRUE, SI, YES, 1, S} case-insensitively → true; everything else → false.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_uppercase().as_str(),
        "TRUE" | "SI" | "YES" | "1" | "S"
    )
}

/// `|`-delimited list, each segment trimmed; empty cell → empty list.
pub fn parse_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split('|').map(|s| s.trim().to_string()).collect()
}

/// `Nombre:Capacidad:Cantidad` tuples. Capacity defaults to 2 and quantity to
/// 1 when missing or non-numeric.
pub fn parse_rooms(value: &str, batch_millis: i64, row_idx: usize) -> Vec<RoomType> {
    if value.is_empty() {
        return Vec::new();
    }
    value
        .split('|')
        .enumerate()
        .map(|(idx, item)| {
            let mut parts = item.split(':');
            RoomType {
                id: format!("room-{batch_millis}-{row_idx}-{idx}"),
                name: non_empty_or(parts.next().unwrap_or("").trim(), DEFAULT_ROOM_NAME),
                capacity: parse_int_or(parts.next(), 2),
                quantity: parse_int_or(parts.next(), 1),
                description: ROOM_DESCRIPTION.to_string(),
            }
        })
        .collect()
}

/// `Nombre:Cocina:Reserva` tuples; the reservation flag uses the boolean rule.
pub fn parse_restaurants(value: &str, batch_millis: i64, row_idx: usize) -> Vec<Restaurant> {
    if value.is_empty() {
        return Vec::new();
    }
    value
        .split('|')
        .enumerate()
        .map(|(idx, item)| {
            let mut parts = item.split(':');
            Restaurant {
                id: format!("rest-{batch_millis}-{row_idx}-{idx}"),
                name: non_empty_or(parts.next().unwrap_or("").trim(), DEFAULT_RESTAURANT_NAME),
                cuisine_type: non_empty_or(parts.next().unwrap_or("").trim(), DEFAULT_CUISINE),
                requires_reservation: parse_bool(parts.next().unwrap_or("")),
                schedule: RESTAURANT_SCHEDULE.to_string(),
            }
        })
        .collect()
}

/// Empty cell or the `AUTO` sentinel → fresh UUID; anything else verbatim.
fn decode_id(value: &str) -> String {
    if value.is_empty() || value == AUTO_ID {
        Uuid::new_v4().to_string()
    } else {
        value.to_string()
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

fn parse_int_or(part: Option<&str>, fallback: i32) -> i32 {
    part.and_then(|p| p.trim().parse().ok()).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::template::template_csv;
    use std::collections::HashSet;

    #[test]
    fn test_parse_bool_accepted_tokens() {
        for token in ["TRUE", "true", "SI", "si", "YES", "1", "S", "s", " Si "] {
            assert!(parse_bool(token), "{token} should decode to true");
        }
    }

    #[test]
    fn test_parse_bool_everything_else_is_false() {
        for token in ["", "NO", "0", "FALSE", "si!", "2", "verdadero"] {
            assert!(!parse_bool(token), "{token} should decode to false");
        }
    }

    #[test]
    fn test_parse_list_empty_and_trimming() {
        assert!(parse_list("").is_empty());
        assert_eq!(parse_list("A|B| C "), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_parse_rooms_full_tuple() {
        let rooms = parse_rooms("Suite:4:10", 1000, 0);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name, "Suite");
        assert_eq!(rooms[0].capacity, 4);
        assert_eq!(rooms[0].quantity, 10);
        assert_eq!(rooms[0].description, "Importada desde hoja de cálculo");
    }

    #[test]
    fn test_parse_rooms_defaults_for_missing_parts() {
        let rooms = parse_rooms("X::", 1000, 0);
        assert_eq!(rooms[0].name, "X");
        assert_eq!(rooms[0].capacity, 2);
        assert_eq!(rooms[0].quantity, 1);

        let rooms = parse_rooms(":abc:", 1000, 0);
        assert_eq!(rooms[0].name, "Habitación");
        assert_eq!(rooms[0].capacity, 2);
    }

    #[test]
    fn test_parse_rooms_ids_unique_within_batch() {
        let a = parse_rooms("A:1:1|B:2:2", 1000, 0);
        let b = parse_rooms("A:1:1|B:2:2", 1000, 1);
        let ids: HashSet<&str> = a
            .iter()
            .chain(b.iter())
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_parse_restaurants_reservation_flag() {
        let rests = parse_restaurants("A:Italian:SI", 1000, 0);
        assert!(rests[0].requires_reservation);
        assert_eq!(rests[0].cuisine_type, "Italian");
        assert_eq!(rests[0].schedule, "Consultar horario");

        let rests = parse_restaurants("A:Italian:NO", 1000, 0);
        assert!(!rests[0].requires_reservation);
    }

    #[test]
    fn test_parse_restaurants_placeholder_defaults() {
        let rests = parse_restaurants("::", 1000, 0);
        assert_eq!(rests[0].name, "Restaurante");
        assert_eq!(rests[0].cuisine_type, "General");
        assert!(!rests[0].requires_reservation);
    }

    #[test]
    fn test_split_columns_respects_quotes() {
        let cols = split_columns(r#"a,"b, con coma",c"#);
        assert_eq!(cols.len(), 3);
        assert_eq!(clean(&cols[1]), "b, con coma");
    }

    #[test]
    fn test_short_rows_are_dropped() {
        let csv = "H1,H2,H3,H4,H5\na,b,c\n";
        assert!(parse_hotels(csv).is_empty());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let csv = "header\n\n   \n";
        assert!(parse_hotels(csv).is_empty());
    }

    #[test]
    fn test_auto_and_empty_ids_generate_unique_uuids() {
        let csv = "header\nAUTO,Hotel A,Loc,4,10\n,Hotel B,Loc,4,10\n";
        let hotels = parse_hotels(csv);
        assert_eq!(hotels.len(), 2);
        assert!(!hotels[0].id.is_empty());
        assert!(!hotels[1].id.is_empty());
        assert_ne!(hotels[0].id, hotels[1].id);
        assert_ne!(hotels[0].id, "AUTO");
    }

    #[test]
    fn test_explicit_id_preserved_verbatim() {
        let csv = "header\nhotel-custom-7,Hotel A,Loc,4,10\n";
        let hotels = parse_hotels(csv);
        assert_eq!(hotels[0].id, "hotel-custom-7");
    }

    #[test]
    fn test_short_row_gets_scalar_defaults() {
        let csv = "header\nAUTO,,,x,y\n";
        let hotels = parse_hotels(csv);
        let hotel = &hotels[0];
        assert_eq!(hotel.name, "Nuevo Hotel Importado");
        assert_eq!(hotel.location, "Sin Ubicación");
        assert_eq!(hotel.rating, 0.0);
        assert_eq!(hotel.reviews, 0);
        assert_eq!(hotel.schedules.check_in, "15:00");
        assert_eq!(hotel.schedules.check_out, "12:00");
        assert!(hotel.room_types.is_empty());
        assert!(hotel.restaurants.is_empty());
        // Nested records are present even when every column is missing.
        assert!(!hotel.amenities.wifi);
        assert!(!hotel.extended_amenities.private_beach);
    }

    /// End-to-end decode of the shipped template sample row.
    #[test]
    fn test_template_sample_row_round_trip() {
        let hotels = parse_hotels(&template_csv());
        assert_eq!(hotels.len(), 1);
        let h = &hotels[0];

        assert_eq!(h.name, "Hotel Demo Excel");
        assert_eq!(h.location, "Cartagena");
        assert_eq!(h.rating, 4.5);
        assert_eq!(h.reviews, 120);
        assert_eq!(h.category, Category::Confort);
        assert!(h.featured);
        assert_eq!(h.status, Status::Activo);
        assert_eq!(h.highlights, vec!["Playa", "Centro"]);
        assert_eq!(h.gallery.len(), 2);
        assert_eq!(h.meal_plan, "Todo Incluido");
        assert_eq!(h.bars, 2);
        assert_eq!(h.schedules.breakfast_time, "7-10");

        assert!(h.amenities.wifi);
        assert!(h.amenities.pool);
        assert!(!h.amenities.spa);
        assert!(h.amenities.gym);
        assert!(!h.extended_amenities.pet_friendly);
        assert!(!h.extended_amenities.private_beach);

        assert_eq!(h.room_types.len(), 2);
        assert_eq!(h.room_types[0].name, "Estandar");
        assert_eq!(h.room_types[0].capacity, 2);
        assert_eq!(h.room_types[0].quantity, 50);
        assert_eq!(h.room_types[1].name, "Suite");
        assert_eq!(h.room_types[1].capacity, 4);
        assert_eq!(h.room_types[1].quantity, 10);

        assert_eq!(h.restaurants.len(), 2);
        assert_eq!(h.restaurants[0].name, "Restaurante A");
        assert!(h.restaurants[0].requires_reservation);
        assert_eq!(h.restaurants[1].name, "Buffet B");
        assert!(!h.restaurants[1].requires_reservation);

        assert!(h.nearby_places.is_empty());
    }
}
