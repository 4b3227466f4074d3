//! Hotel domain model — the structured entity behind one property listing,
//! plus the `hotels` table row it is stored as.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Commercial tier of a property. Unknown sheet/database values clamp to
/// `Confort` instead of failing the row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Elite,
    #[default]
    Confort,
    Esencial,
}

impl Category {
    /// Decodes a free-text cell, clamping anything outside the allowed set.
    pub fn from_sheet(value: &str) -> Self {
        let v = value.trim();
        if v.eq_ignore_ascii_case("Elite") {
            Category::Elite
        } else if v.eq_ignore_ascii_case("Esencial") {
            Category::Esencial
        } else {
            Category::Confort
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Elite => "Elite",
            Category::Confort => "Confort",
            Category::Esencial => "Esencial",
        }
    }
}

/// Publication state of a property. Unknown values clamp to `Activo`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Activo,
    Inactivo,
}

impl Status {
    pub fn from_sheet(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("Inactivo") {
            Status::Inactivo
        } else {
            Status::Activo
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Activo => "Activo",
            Status::Inactivo => "Inactivo",
        }
    }
}

/// The eight basic filterable amenities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotelAmenities {
    pub wifi: bool,
    pub pool: bool,
    pub spa: bool,
    pub gym: bool,
    pub ac: bool,
    pub room_service: bool,
    pub beach: bool,
    pub kids_club: bool,
}

/// The twelve extended facility flags shown on the property profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtendedAmenities {
    pub pet_friendly: bool,
    pub accessibility: bool,
    pub events_hall: bool,
    pub parking: bool,
    pub hot_water: bool,
    pub mini_fridge: bool,
    pub safe: bool,
    pub night_show: bool,
    pub extra_activities: bool,
    pub kids_park: bool,
    pub kids_pool: bool,
    pub private_beach: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub cuisine_type: String,
    pub requires_reservation: bool,
    pub schedule: String,
}

/// Daily operational times, all free-text (e.g. "15:00", "7-10").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotelSchedules {
    pub check_in: String,
    pub check_out: String,
    pub breakfast_time: String,
    pub lunch_time: String,
    pub dinner_time: String,
}

/// A point of interest near the property, suggested by the assistant or
/// entered manually in the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NearbyPlace {
    pub id: String,
    pub name: String,
    /// "attraction" | "activity" | "dining"
    #[serde(rename = "type")]
    pub kind: String,
    /// e.g. "5 min a pie", "2 km"
    pub distance: String,
    pub note: Option<String>,
}

/// One property's full public and operational record. Mutations are always
/// whole-record replacements keyed by `id`; there is no partial patch path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub location: String,
    pub rating: f64,
    pub reviews: i32,
    pub category: Category,
    pub featured: bool,
    pub status: Status,

    pub description: String,
    // Kept as raw strings; the map widget tolerates empty coordinates.
    pub latitude: String,
    pub longitude: String,
    pub highlights: Vec<String>,

    pub main_image: String,
    pub gallery: Vec<String>,

    pub amenities: HotelAmenities,
    pub extended_amenities: ExtendedAmenities,
    pub room_types: Vec<RoomType>,
    pub restaurants: Vec<Restaurant>,
    pub bars: i32,
    pub schedules: HotelSchedules,
    pub nearby_places: Vec<NearbyPlace>,

    pub meal_plan: String,
    pub child_policy: String,
}

/// `hotels` table row. Nested records are JSONB columns; any of them may be
/// NULL in rows written before a column existed, so they load as `Option` and
/// fill with defaults (a `Hotel` never carries null amenities or schedules).
#[derive(Debug, Clone, FromRow)]
pub struct HotelRow {
    pub id: String,
    pub name: String,
    pub location: String,
    pub rating: f64,
    pub reviews: i32,
    pub category: String,
    pub featured: bool,
    pub status: String,
    pub description: String,
    pub latitude: String,
    pub longitude: String,
    pub highlights: Option<Json<Vec<String>>>,
    pub main_image: String,
    pub gallery: Option<Json<Vec<String>>>,
    pub amenities: Option<Json<HotelAmenities>>,
    pub extended_amenities: Option<Json<ExtendedAmenities>>,
    pub room_types: Option<Json<Vec<RoomType>>>,
    pub restaurants: Option<Json<Vec<Restaurant>>>,
    pub bars: i32,
    pub schedules: Option<Json<HotelSchedules>>,
    pub nearby_places: Option<Json<Vec<NearbyPlace>>>,
    pub meal_plan: String,
    pub child_policy: String,
}

impl From<HotelRow> for Hotel {
    fn from(row: HotelRow) -> Self {
        Hotel {
            id: row.id,
            name: row.name,
            location: row.location,
            rating: row.rating,
            reviews: row.reviews,
            category: Category::from_sheet(&row.category),
            featured: row.featured,
            status: Status::from_sheet(&row.status),
            description: row.description,
            latitude: row.latitude,
            longitude: row.longitude,
            highlights: row.highlights.map(|j| j.0).unwrap_or_default(),
            main_image: row.main_image,
            gallery: row.gallery.map(|j| j.0).unwrap_or_default(),
            amenities: row.amenities.map(|j| j.0).unwrap_or_default(),
            extended_amenities: row.extended_amenities.map(|j| j.0).unwrap_or_default(),
            room_types: row.room_types.map(|j| j.0).unwrap_or_default(),
            restaurants: row.restaurants.map(|j| j.0).unwrap_or_default(),
            bars: row.bars,
            schedules: row.schedules.map(|j| j.0).unwrap_or_default(),
            nearby_places: row.nearby_places.map(|j| j.0).unwrap_or_default(),
            meal_plan: row.meal_plan,
            child_policy: row.child_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_clamps_unknown_values() {
        assert_eq!(Category::from_sheet("Elite"), Category::Elite);
        assert_eq!(Category::from_sheet("esencial"), Category::Esencial);
        assert_eq!(Category::from_sheet("Premium Deluxe"), Category::Confort);
        assert_eq!(Category::from_sheet(""), Category::Confort);
    }

    #[test]
    fn test_status_clamps_unknown_values() {
        assert_eq!(Status::from_sheet("Inactivo"), Status::Inactivo);
        assert_eq!(Status::from_sheet("inactivo "), Status::Inactivo);
        assert_eq!(Status::from_sheet("Pausado"), Status::Activo);
        assert_eq!(Status::from_sheet(""), Status::Activo);
    }

    #[test]
    fn test_category_serializes_to_wire_string() {
        assert_eq!(
            serde_json::to_string(&Category::Esencial).unwrap(),
            r#""Esencial""#
        );
        let back: Category = serde_json::from_str(r#""Elite""#).unwrap();
        assert_eq!(back, Category::Elite);
    }

    #[test]
    fn test_hotel_serde_uses_camel_case_keys() {
        let hotel = Hotel {
            id: "h-1".into(),
            main_image: "https://img.com/main.jpg".into(),
            child_policy: "Niños gratis".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&hotel).unwrap();
        assert_eq!(json["mainImage"], "https://img.com/main.jpg");
        assert_eq!(json["childPolicy"], "Niños gratis");
        assert!(json.get("main_image").is_none());
        assert_eq!(json["extendedAmenities"]["petFriendly"], false);
    }

    #[test]
    fn test_hotel_deserializes_with_missing_nested_records() {
        // A minimal payload must still produce non-null amenities/schedules.
        let hotel: Hotel = serde_json::from_str(r#"{"id": "h-2", "name": "Prueba"}"#).unwrap();
        assert_eq!(hotel.name, "Prueba");
        assert!(!hotel.amenities.wifi);
        assert_eq!(hotel.schedules.check_in, "");
        assert!(hotel.room_types.is_empty());
        assert_eq!(hotel.category, Category::Confort);
    }

    #[test]
    fn test_nearby_place_kind_serializes_as_type() {
        let place = NearbyPlace {
            id: "p-1".into(),
            name: "Muralla".into(),
            kind: "attraction".into(),
            distance: "5 min a pie".into(),
            note: None,
        };
        let json = serde_json::to_value(&place).unwrap();
        assert_eq!(json["type"], "attraction");
    }
}
