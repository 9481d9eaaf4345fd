use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::AppError;
use shared::utils::validation;

// Tipe alamat yang dikenal backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddressType {
    Office,
    Billing,
    Transport,
    Driver,
}

impl AddressType {
    pub fn as_str(&self) -> &str {
        match self {
            AddressType::Office => "OFFICE",
            AddressType::Billing => "BILLING",
            AddressType::Transport => "TRANSPORT",
            AddressType::Driver => "DRIVER",
        }
    }
}

// Alamat milik client; id kosong untuk alamat yang belum dipersist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line3: Option<String>,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    pub country: String,
    pub address_type: AddressType,
}

impl Address {
    // Label singkat untuk tampilan pilihan alamat
    pub fn short_label(&self) -> String {
        format!("{}, {}", self.address_line1, self.city)
    }
}

// Model utama Client dari directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub company_name: String,
    pub contact_email: String,
    pub contact_person_name: String,
    pub contact_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst_number: Option<String>,
    pub addresses: Vec<Address>,
}

impl Client {
    // Cari alamat tersimpan berdasarkan id
    pub fn find_address(&self, address_id: &str) -> Option<&Address> {
        self.addresses
            .iter()
            .find(|addr| addr.id.as_deref() == Some(address_id))
    }
}

// Request untuk create client baru
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub company_name: String,
    pub contact_email: String,
    pub contact_person_name: String,
    pub contact_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst_number: Option<String>,
    pub addresses: Vec<Address>,
}

// Request untuk update client (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<Address>>,
}

// Validasi field alamat (dipakai form client dan form transport)
pub fn validate_address(address: &Address, field_prefix: &str) -> AppResult {
    if !validation::has_min_length(&address.address_line1, 3) {
        return Err(AppError::validation(
            format!("{}.addressLine1", field_prefix),
            "Address line 1 minimal 3 karakter",
        ));
    }
    if !validation::has_min_length(&address.city, 2) {
        return Err(AppError::validation(
            format!("{}.city", field_prefix),
            "Kota harus diisi",
        ));
    }
    if !validation::has_min_length(&address.state, 2) {
        return Err(AppError::validation(
            format!("{}.state", field_prefix),
            "Provinsi/state harus diisi",
        ));
    }
    if !validation::is_valid_pin_code(&address.pin_code) {
        return Err(AppError::validation(
            format!("{}.pinCode", field_prefix),
            "PIN code harus 6-10 karakter",
        ));
    }
    if !validation::has_min_length(&address.country, 2) {
        return Err(AppError::validation(
            format!("{}.country", field_prefix),
            "Negara harus diisi",
        ));
    }

    Ok(())
}

// Validasi input create client
pub fn validate_create_client(req: &CreateClientRequest) -> AppResult {
    if !validation::has_min_length(&req.company_name, 2) {
        return Err(AppError::validation(
            "companyName",
            "Nama perusahaan minimal 2 karakter",
        ));
    }
    if !validation::is_valid_email(&req.contact_email) {
        return Err(AppError::validation(
            "contactEmail",
            "Format email tidak valid",
        ));
    }
    if !validation::has_min_length(&req.contact_person_name, 2) {
        return Err(AppError::validation(
            "contactPersonName",
            "Nama contact person minimal 2 karakter",
        ));
    }
    if !validation::is_valid_phone(&req.contact_number) {
        return Err(AppError::validation(
            "contactNumber",
            "Nomor telepon harus 10-15 digit angka",
        ));
    }
    if let Some(alternate) = req.alternate_contact.as_deref() {
        if !alternate.is_empty() && !validation::is_valid_phone(alternate) {
            return Err(AppError::validation(
                "alternateContact",
                "Nomor telepon harus 10-15 digit angka",
            ));
        }
    }
    if let Some(gst) = req.gst_number.as_deref() {
        if !gst.is_empty() && !validation::is_valid_gst_number(gst) {
            return Err(AppError::validation(
                "gstNumber",
                "Nomor GST harus 15 karakter alphanumeric",
            ));
        }
    }

    // Invariant: client baru minimal punya satu alamat
    if req.addresses.is_empty() {
        return Err(AppError::validation(
            "addresses",
            "Minimal satu alamat harus diisi",
        ));
    }
    for (idx, address) in req.addresses.iter().enumerate() {
        validate_address(address, &format!("addresses[{}]", idx))?;
    }

    Ok(())
}
