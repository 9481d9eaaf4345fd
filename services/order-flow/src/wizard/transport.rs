use crate::domain::{
    validate_address, Address, Client, OrderStatus, OrderTransport, TransportSize,
};
use crate::error::{AppError, AppResult};

// Pilihan alamat pada step transport: pakai alamat tersimpan milik client,
// atau isi alamat baru
#[derive(Debug, Clone, PartialEq)]
pub enum AddressChoice {
    Existing(String),
    New(Address),
}

// Form step transport
#[derive(Debug, Clone)]
pub struct TransportForm {
    pub status: OrderStatus,
    pub size: TransportSize,
    pub source: AddressChoice,
    pub destination: AddressChoice,
    pub truck_id: Option<String>,
    pub distance: Option<f64>,
}

impl TransportForm {
    pub fn new(source: AddressChoice, destination: AddressChoice) -> Self {
        Self {
            status: OrderStatus::New,
            size: TransportSize::Medium,
            source,
            destination,
            truck_id: None,
            distance: None,
        }
    }

    // Resolve form menjadi OrderTransport terhadap alamat tersimpan client.
    // Alamat existing yang id-nya sudah hilang = missing reference, bukan
    // substitusi diam-diam.
    pub fn resolve(&self, client: &Client) -> AppResult<OrderTransport> {
        let source = resolve_address(client, &self.source, "source")?;
        let destination = resolve_address(client, &self.destination, "destination")?;

        if let Some(distance) = self.distance {
            if distance < 0.0 {
                return Err(AppError::validation(
                    "distance",
                    "Jarak tidak boleh negatif",
                ));
            }
        }

        Ok(OrderTransport {
            status: self.status,
            source,
            destination,
            size: self.size,
            truck_id: self.truck_id.clone(),
            distance: self.distance,
        })
    }
}

fn resolve_address(client: &Client, choice: &AddressChoice, field: &str) -> AppResult<Address> {
    match choice {
        AddressChoice::Existing(id) => client.find_address(id).cloned().ok_or_else(|| {
            AppError::missing_reference(format!(
                "Alamat {} tidak ditemukan di daftar alamat client {}",
                id, client.id
            ))
        }),
        AddressChoice::New(address) => {
            validate_address(address, field)?;
            Ok(address.clone())
        }
    }
}
