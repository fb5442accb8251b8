// src/taxonomy/mod.rs
// The closed service-category taxonomy and urgency vocabulary.
// Configuration data: defined once at build time, never extended at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six service categories a guest request can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    ServiceFb,
    Housekeeping,
    Maintenance,
    Porter,
    Concierge,
    Reception,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 6] = [
        ServiceCategory::ServiceFb,
        ServiceCategory::Housekeeping,
        ServiceCategory::Maintenance,
        ServiceCategory::Porter,
        ServiceCategory::Concierge,
        ServiceCategory::Reception,
    ];

    /// Wire key used in prompts and API payloads.
    pub fn key(&self) -> &'static str {
        match self {
            ServiceCategory::ServiceFb => "service_fb",
            ServiceCategory::Housekeeping => "housekeeping",
            ServiceCategory::Maintenance => "maintenance",
            ServiceCategory::Porter => "porter",
            ServiceCategory::Concierge => "concierge",
            ServiceCategory::Reception => "reception",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "service_fb" => Some(ServiceCategory::ServiceFb),
            "housekeeping" => Some(ServiceCategory::Housekeeping),
            "maintenance" => Some(ServiceCategory::Maintenance),
            "porter" => Some(ServiceCategory::Porter),
            "concierge" => Some(ServiceCategory::Concierge),
            "reception" => Some(ServiceCategory::Reception),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ServiceCategory::ServiceFb => "Food & Beverage",
            ServiceCategory::Housekeeping => "Housekeeping",
            ServiceCategory::Maintenance => "Maintenance",
            ServiceCategory::Porter => "Porter Services",
            ServiceCategory::Concierge => "Concierge",
            ServiceCategory::Reception => "Reception",
        }
    }

    /// Human-readable definition handed to the model and to API consumers.
    pub fn description(&self) -> &'static str {
        match self {
            ServiceCategory::ServiceFb => {
                "Food, beverages, room service, restaurant requests, coffee, tea, meals, \
                 drinks, dining, kitchen, bar, alcohol, snacks, water, ice"
            }
            ServiceCategory::Housekeeping => {
                "Room cleaning, towels, linens, bathroom supplies, bed making, trash removal, \
                 vacuum, dusting, room tidying, fresh sheets, pillows, blankets"
            }
            ServiceCategory::Maintenance => {
                "Repairs, technical issues, broken items, AC/heating, plumbing, electrical, \
                 lights, TV, WiFi, locks, windows, fixtures, appliances"
            }
            ServiceCategory::Porter => {
                "Luggage assistance, heavy item moving, transportation of bags, carrying items, \
                 bell services, package delivery"
            }
            ServiceCategory::Concierge => {
                "External services, directions, recommendations, bookings outside hotel, tours, \
                 tickets, transportation, local information, attractions"
            }
            ServiceCategory::Reception => {
                "Check-in/out, billing, room changes, hotel policies, complaints, front desk \
                 services, reservations, account issues, key cards"
            }
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The closed four-level urgency vocabulary for category assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Urgent,
}

impl Urgency {
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "low" => Some(Urgency::Low),
            "medium" => Some(Urgency::Medium),
            "high" => Some(Urgency::High),
            "urgent" => Some(Urgency::Urgent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_key_roundtrip() {
        for category in ServiceCategory::ALL {
            assert_eq!(ServiceCategory::from_key(category.key()), Some(category));
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert_eq!(ServiceCategory::from_key("spa"), None);
        assert_eq!(ServiceCategory::from_key(""), None);
        assert_eq!(ServiceCategory::from_key("SERVICE_FB"), None);
    }

    #[test]
    fn test_category_serializes_to_wire_key() {
        let json = serde_json::to_string(&ServiceCategory::ServiceFb).unwrap();
        assert_eq!(json, "\"service_fb\"");

        let parsed: ServiceCategory = serde_json::from_str("\"housekeeping\"").unwrap();
        assert_eq!(parsed, ServiceCategory::Housekeeping);
    }

    #[test]
    fn test_urgency_vocabulary_closed() {
        assert_eq!(Urgency::parse("medium"), Some(Urgency::Medium));
        assert_eq!(Urgency::parse("urgent"), Some(Urgency::Urgent));
        assert_eq!(Urgency::parse("critical"), None);
        assert_eq!(Urgency::parse("HIGH"), None);
    }

    #[test]
    fn test_urgency_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Urgency::High).unwrap(), "\"high\"");
    }
}
