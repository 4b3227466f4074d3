use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One homepage carousel slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroSlide {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub promo_tag: String,
    /// Badge palette key: "blue" | "red" | "green" | "orange" | "purple".
    pub tag_color: String,
    pub image_url: String,
    pub cta_text: String,
    pub cta_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_serde_round_trip() {
        let slide = HeroSlide {
            id: "s-1".into(),
            title: "Descubre Cartagena".into(),
            subtitle: "Tarifas exclusivas para grupos".into(),
            promo_tag: "Novedad".into(),
            tag_color: "blue".into(),
            image_url: "https://img.com/slide.jpg".into(),
            cta_text: "Ver Detalles".into(),
            cta_link: "/hotel/123".into(),
        };
        let json = serde_json::to_value(&slide).unwrap();
        assert_eq!(json["promoTag"], "Novedad");
        assert_eq!(json["ctaLink"], "/hotel/123");
        let back: HeroSlide = serde_json::from_value(json).unwrap();
        assert_eq!(back, slide);
    }
}
