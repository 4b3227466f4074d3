//! Hotel catalog queries. Writes are whole-record upserts keyed by id; there
//! is no partial update path.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::hotel::{Hotel, HotelRow};

pub async fn fetch_hotels(pool: &PgPool) -> Result<Vec<Hotel>, sqlx::Error> {
    let rows: Vec<HotelRow> = sqlx::query_as("SELECT * FROM hotels ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Hotel::from).collect())
}

pub async fn fetch_hotel(pool: &PgPool, id: &str) -> Result<Option<Hotel>, sqlx::Error> {
    let row: Option<HotelRow> = sqlx::query_as("SELECT * FROM hotels WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Hotel::from))
}

pub async fn upsert_hotel(pool: &PgPool, hotel: &Hotel) -> Result<Hotel, sqlx::Error> {
    let row: HotelRow = sqlx::query_as(
        r#"
        INSERT INTO hotels
            (id, name, location, rating, reviews, category, featured, status,
             description, latitude, longitude, highlights, main_image, gallery,
             amenities, extended_amenities, room_types, restaurants, bars,
             schedules, nearby_places, meal_plan, child_policy)
        VALUES
            ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
             $15, $16, $17, $18, $19, $20, $21, $22, $23)
        ON CONFLICT (id) DO UPDATE SET
            name = EXCLUDED.name,
            location = EXCLUDED.location,
            rating = EXCLUDED.rating,
            reviews = EXCLUDED.reviews,
            category = EXCLUDED.category,
            featured = EXCLUDED.featured,
            status = EXCLUDED.status,
            description = EXCLUDED.description,
            latitude = EXCLUDED.latitude,
            longitude = EXCLUDED.longitude,
            highlights = EXCLUDED.highlights,
            main_image = EXCLUDED.main_image,
            gallery = EXCLUDED.gallery,
            amenities = EXCLUDED.amenities,
            extended_amenities = EXCLUDED.extended_amenities,
            room_types = EXCLUDED.room_types,
            restaurants = EXCLUDED.restaurants,
            bars = EXCLUDED.bars,
            schedules = EXCLUDED.schedules,
            nearby_places = EXCLUDED.nearby_places,
            meal_plan = EXCLUDED.meal_plan,
            child_policy = EXCLUDED.child_policy
        RETURNING *
        "#,
    )
    .bind(&hotel.id)
    .bind(&hotel.name)
    .bind(&hotel.location)
    .bind(hotel.rating)
    .bind(hotel.reviews)
    .bind(hotel.category.as_str())
    .bind(hotel.featured)
    .bind(hotel.status.as_str())
    .bind(&hotel.description)
    .bind(&hotel.latitude)
    .bind(&hotel.longitude)
    .bind(Json(&hotel.highlights))
    .bind(&hotel.main_image)
    .bind(Json(&hotel.gallery))
    .bind(Json(&hotel.amenities))
    .bind(Json(&hotel.extended_amenities))
    .bind(Json(&hotel.room_types))
    .bind(Json(&hotel.restaurants))
    .bind(hotel.bars)
    .bind(Json(&hotel.schedules))
    .bind(Json(&hotel.nearby_places))
    .bind(&hotel.meal_plan)
    .bind(&hotel.child_policy)
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}

pub async fn delete_hotel(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM hotels WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
