use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContacts {
    pub police: String,
    pub flood_control: String,
    pub emergency_services: String,
}

/// Where the resident is. Only used to fill in the system directive
/// so nothing here is validated or geocoded.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: String,
    pub state: String,
    pub country: String,
    pub emergency_contacts: EmergencyContacts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            city: String::from("Chennai"),
            state: String::from("Tamil Nadu"),
            country: String::from("India"),
            emergency_contacts: EmergencyContacts {
                police: String::from("100"),
                flood_control: String::from("1913"),
                emergency_services: String::from("112"),
            },
            coordinates: None,
        }
    }
}
