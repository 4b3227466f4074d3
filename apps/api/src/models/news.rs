use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A news bulletin shown on the homepage, optionally linked to one hotel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsItem {
    pub id: String,
    pub category: String,
    pub tag_color: String,
    pub title: String,
    pub content: String,
    pub related_hotel_id: Option<String>,
    pub destination: String,
    pub publish_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub is_active: bool,
}

impl NewsItem {
    /// The editor submits empty strings for "no hotel"; store NULL instead so
    /// the related-hotel foreign key stays meaningful.
    pub fn normalized(mut self) -> Self {
        if matches!(self.related_hotel_id.as_deref(), Some(s) if s.trim().is_empty()) {
            self.related_hotel_id = None;
        }
        self
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct NewsRow {
    pub id: String,
    pub category: String,
    pub tag_color: String,
    pub title: String,
    pub content: String,
    pub related_hotel_id: Option<String>,
    pub destination: String,
    pub publish_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub is_active: bool,
}

impl From<NewsRow> for NewsItem {
    fn from(row: NewsRow) -> Self {
        NewsItem {
            id: row.id,
            category: row.category,
            tag_color: row.tag_color,
            title: row.title,
            content: row.content,
            related_hotel_id: row.related_hotel_id,
            destination: row.destination,
            publish_date: row.publish_date,
            expiration_date: row.expiration_date,
            is_active: row.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_turns_empty_hotel_link_into_none() {
        let item = NewsItem {
            related_hotel_id: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(item.normalized().related_hotel_id, None);
    }

    #[test]
    fn test_normalized_keeps_real_hotel_link() {
        let item = NewsItem {
            related_hotel_id: Some("h-9".into()),
            ..Default::default()
        };
        assert_eq!(item.normalized().related_hotel_id.as_deref(), Some("h-9"));
    }

    #[test]
    fn test_news_serde_camel_case_and_dates() {
        let json = r#"{
            "id": "n-1",
            "category": "Mantenimiento",
            "tagColor": "red",
            "title": "Cierre de Piscina",
            "content": "Detalle",
            "relatedHotelId": "h-1",
            "destination": "Cartagena",
            "publishDate": "2026-08-01",
            "expirationDate": null,
            "isActive": true
        }"#;
        let item: NewsItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.tag_color, "red");
        assert_eq!(
            item.publish_date,
            Some(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap())
        );
        assert_eq!(item.expiration_date, None);
        assert!(item.is_active);
    }
}
