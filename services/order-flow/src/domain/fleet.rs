use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Jenis kendaraan di armada
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    Truck,
    Van,
    Car,
}

impl VehicleType {
    pub fn as_str(&self) -> &str {
        match self {
            VehicleType::Truck => "TRUCK",
            VehicleType::Van => "VAN",
            VehicleType::Car => "CAR",
        }
    }
}

// Status operasional kendaraan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    Available,
    InTransit,
    Maintenance,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &str {
        match self {
            VehicleStatus::Available => "AVAILABLE",
            VehicleStatus::InTransit => "IN_TRANSIT",
            VehicleStatus::Maintenance => "MAINTENANCE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "AVAILABLE" => Some(VehicleStatus::Available),
            "IN_TRANSIT" => Some(VehicleStatus::InTransit),
            "MAINTENANCE" => Some(VehicleStatus::Maintenance),
            _ => None,
        }
    }
}

// Model kendaraan armada
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub status: VehicleStatus,
    // Kapasitas muatan dalam kg
    pub capacity: f64,
    pub location: String,
    pub image_url: String,
    pub truck_number: String,
}

// Request untuk registrasi kendaraan baru
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub status: VehicleStatus,
    pub capacity: f64,
    pub location: String,
    pub image_url: String,
    pub truck_number: String,
}

// Status ketersediaan driver
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    Available,
    OnTrip,
    OffDuty,
}

impl DriverStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DriverStatus::Available => "AVAILABLE",
            DriverStatus::OnTrip => "ON_TRIP",
            DriverStatus::OffDuty => "OFF_DUTY",
        }
    }
}

// Model driver
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub status: DriverStatus,
    pub rating: f64,
    pub license_plate: String,
    pub vehicle_type: VehicleType,
    pub phone_number: String,
    pub image_url: String,
}

// Request untuk registrasi driver baru
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    pub name: String,
    pub status: DriverStatus,
    pub rating: f64,
    pub license_plate: String,
    pub vehicle_type: VehicleType,
    pub phone_number: String,
    pub image_url: String,
}

// Status perjalanan terjadwal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

// Perjalanan kendaraan + driver (read-only untuk workflow ini)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub transport_id: String,
    pub driver_id: String,
    pub origin: String,
    pub destination: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: TripStatus,
    pub distance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_status_roundtrip() {
        for status in [
            VehicleStatus::Available,
            VehicleStatus::InTransit,
            VehicleStatus::Maintenance,
        ] {
            assert_eq!(VehicleStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(VehicleStatus::from_str("SCRAPPED"), None);
    }

    #[test]
    fn test_vehicle_type_serde_rename() {
        let vehicle = Vehicle {
            id: "truck-1".to_string(),
            name: "Tata Ace".to_string(),
            vehicle_type: VehicleType::Truck,
            status: VehicleStatus::Available,
            capacity: 750.0,
            location: "Mumbai".to_string(),
            image_url: "https://example.com/truck.jpg".to_string(),
            truck_number: "MH01AB1234".to_string(),
        };

        let json = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(json["type"], "TRUCK");
        assert_eq!(json["truckNumber"], "MH01AB1234");
    }
}
