use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::client::{Address, Client};

// Status pengiriman pada order transport
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    InTransit,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::InTransit => "IN_TRANSIT",
            OrderStatus::Delivered => "DELIVERED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "NEW" => Some(OrderStatus::New),
            "IN_TRANSIT" => Some(OrderStatus::InTransit),
            "DELIVERED" => Some(OrderStatus::Delivered),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Ukuran muatan, menentukan truck yang tersedia
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportSize {
    Small,
    Medium,
    Large,
}

impl TransportSize {
    pub fn as_str(&self) -> &str {
        match self {
            TransportSize::Small => "SMALL",
            TransportSize::Medium => "MEDIUM",
            TransportSize::Large => "LARGE",
        }
    }
}

impl std::fmt::Display for TransportSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Mode pembayaran
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    Upi,
    Cheque,
    Cash,
}

impl PaymentMode {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMode::Upi => "UPI",
            PaymentMode::Cheque => "CHEQUE",
            PaymentMode::Cash => "CASH",
        }
    }

    // Label field transaction id per mode
    pub fn transaction_label(&self) -> &str {
        match self {
            PaymentMode::Upi => "UPI Transaction ID",
            PaymentMode::Cheque => "Cheque Number",
            PaymentMode::Cash => "Cash Transaction ID",
        }
    }
}

// Tipe pembayaran: lunas atau sebagian
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    Complete,
    Partial,
}

impl PaymentType {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentType::Complete => "COMPLETE",
            PaymentType::Partial => "PARTIAL",
        }
    }
}

// Leg pengiriman sebuah order: asal, tujuan, ukuran, truck
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderTransport {
    pub status: OrderStatus,
    pub source: Address,
    pub destination: Address,
    pub size: TransportSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truck_id: Option<String>,
    // Jarak km, diisi setelah distance service merespon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

// Snapshot billing sebuah order.
// totalAmount selalu diturunkan dari empat field lain, tidak pernah diedit langsung.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    pub distance: f64,
    pub rate_per_km: f64,
    pub subtotal: f64,
    pub gst_rate: f64,
    pub gst_amount: f64,
    pub total_amount: f64,
}

impl Billing {
    // Hitung billing dari input dasar. Pure & deterministic, tanpa rounding;
    // pembulatan 2 desimal hanya untuk display.
    pub fn compute(distance: f64, rate_per_km: f64, gst_rate: f64) -> Self {
        let subtotal = distance * rate_per_km;
        let gst_amount = subtotal * gst_rate / 100.0;
        let total_amount = subtotal + gst_amount;

        Billing {
            distance,
            rate_per_km,
            subtotal,
            gst_rate,
            gst_amount,
            total_amount,
        }
    }
}

// Record pembayaran sebuah order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub amount: f64,
    pub payment_type: PaymentType,
    pub payment_mode: PaymentMode,
    pub transaction_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_payment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_amount: Option<f64>,
}

// Order lengkap hasil submit wizard; id & timestamps dari backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub client: Client,
    pub transport: OrderTransport,
    pub billing: Billing,
    pub payment: Payment,
    pub driver_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Request create order: Order tanpa id dan timestamps
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub client: Client,
    pub transport: OrderTransport,
    pub billing: Billing,
    pub payment: Payment,
    pub driver_id: String,
}

// Pilihan truck yang available untuk ukuran tertentu
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TruckOption {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truck_number: Option<String>,
}

// Pilihan driver yang available untuk assignment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DriverOption {
    pub id: String,
    pub name: String,
}
