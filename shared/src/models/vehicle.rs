//! Vehicle models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tracked vehicle as stored by the app
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub vin: Option<String>,
    /// Current odometer reading in miles
    pub mileage: u32,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Name shown to the user: the nickname if set, otherwise "2019 Toyota Camry"
    pub fn display_name(&self) -> String {
        match self.nickname.as_deref().map(str::trim) {
            Some(nickname) if !nickname.is_empty() => nickname.to_string(),
            _ => format!("{} {} {}", self.year, self.make, self.model),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn vehicle(nickname: Option<&str>) -> Vehicle {
        Vehicle {
            id: "veh-1".to_string(),
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2019,
            nickname: nickname.map(str::to_string),
            vin: None,
            mileage: 50_000,
            created_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_display_name_uses_year_make_model() {
        assert_eq!(vehicle(None).display_name(), "2019 Toyota Camry");
    }

    #[test]
    fn test_display_name_prefers_nickname() {
        assert_eq!(vehicle(Some("Daily Driver")).display_name(), "Daily Driver");
        assert_eq!(vehicle(Some("   ")).display_name(), "2019 Toyota Camry");
    }

    #[test]
    fn test_deserializes_camel_case() {
        let json = r#"{
            "id": "abc",
            "make": "Honda",
            "model": "Civic",
            "year": 2021,
            "mileage": 12000,
            "createdAt": "2022-03-01T12:00:00Z"
        }"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.mileage, 12000);
        assert!(vehicle.nickname.is_none());
    }
}
