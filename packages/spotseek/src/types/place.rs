//! Place detail types, shaped after the place-details service payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fully resolved place record.
///
/// Produced by the detail stage from a place identifier and read-only
/// afterwards; enrichment attaches secondary data next to it without
/// touching it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Opaque identifier in the place-search ecosystem.
    pub place_id: String,

    pub name: String,

    pub formatted_address: String,

    pub geometry: Geometry,

    /// Average review rating on a five-point scale, if the place has any.
    pub rating: Option<f64>,

    /// Total number of ratings behind `rating`.
    pub user_ratings_total: Option<u32>,

    /// Top reviews, in the order the detail service returned them.
    pub reviews: Option<Vec<Review>>,

    pub photos: Option<Vec<Photo>>,

    pub opening_hours: Option<OpeningHours>,

    /// Category tags (e.g. "restaurant", "point_of_interest").
    pub types: Vec<String>,

    /// Canonical map URL for the place.
    pub url: String,

    pub website: Option<String>,
}

/// Location plus the recommended map viewport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
    pub viewport: Viewport,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub northeast: LatLng,
    pub southwest: LatLng,
}

/// A single user review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub author_name: String,

    pub author_url: Option<String>,

    pub language: String,

    pub original_language: Option<String>,

    pub profile_photo_url: Option<String>,

    /// This reviewer's rating on a five-point scale.
    pub rating: f64,

    /// Human-readable recency, e.g. "3 か月前".
    pub relative_time_description: String,

    pub text: String,

    /// When the review was written (unix seconds on the wire).
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,

    pub translated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub height: u32,
    pub width: u32,
    pub html_attributions: Vec<String>,
    pub photo_reference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningHours {
    pub open_now: bool,
    pub periods: Vec<OpeningPeriod>,
    pub weekday_text: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningPeriod {
    pub open: PeriodDetail,
    /// Absent for places open around the clock.
    pub close: Option<PeriodDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodDetail {
    pub date: Option<String>,
    /// Day of week, 0 = Sunday.
    pub day: u8,
    /// Local time as "HHMM".
    pub time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_detail_payload() {
        let json = r#"{
            "place_id": "ChIJabc123",
            "name": "神田ラーメン 一番",
            "formatted_address": "東京都千代田区神田1-1-1",
            "geometry": {
                "location": {"lat": 35.691, "lng": 139.770},
                "viewport": {
                    "northeast": {"lat": 35.692, "lng": 139.771},
                    "southwest": {"lat": 35.690, "lng": 139.769}
                }
            },
            "rating": 4.3,
            "user_ratings_total": 210,
            "reviews": [{
                "author_name": "田中",
                "language": "ja",
                "rating": 5.0,
                "relative_time_description": "1 か月前",
                "text": "スープが最高。",
                "time": 1717000000,
                "translated": false,
                "author_url": null,
                "original_language": null,
                "profile_photo_url": null
            }],
            "photos": null,
            "opening_hours": null,
            "types": ["restaurant", "point_of_interest"],
            "url": "https://maps.example/?cid=1",
            "website": null
        }"#;

        let place: PlaceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(place.place_id, "ChIJabc123");
        assert_eq!(place.rating, Some(4.3));

        let reviews = place.reviews.as_ref().unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].time.timestamp(), 1_717_000_000);
    }
}
