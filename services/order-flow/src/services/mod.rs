// Data source layer untuk Order Flow.
// Semua akses data lewat trait di sini; implementasi remote (backend API)
// dan in-memory dipilih lewat konfigurasi, bukan fallback implisit.
pub mod memory;
pub mod remote;

use std::sync::Arc;

use async_trait::async_trait;
use shared::utils::http_client::HttpClientError;

use crate::config::AppConfig;
use crate::domain::{
    Address, Client, CreateClientRequest, CreateDriverRequest, CreateOrderRequest,
    CreateVehicleRequest, Driver, DriverOption, Order, OrderStatus, TransportSize, Trip,
    TruckOption, UpdateClientRequest, Vehicle, VehicleStatus,
};
use crate::error::AppResult;

pub use memory::InMemoryDataSource;
pub use remote::{
    RemoteClientDirectory, RemoteDistanceService, RemoteDriverService, RemoteFleetService,
    RemoteImageUploader, RemoteOrderGateway,
};

// Directory client perusahaan
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    async fn list_clients(&self) -> AppResult<Vec<Client>>;
    async fn get_client(&self, id: &str) -> AppResult<Client>;
    async fn create_client(&self, req: CreateClientRequest) -> AppResult<Client>;
    async fn update_client(&self, id: &str, req: UpdateClientRequest) -> AppResult<Client>;
    async fn delete_client(&self, id: &str) -> AppResult<()>;
}

// Gateway order: list/get/create + update status transport.
// Order dibuat sekali di akhir wizard; setelah itu hanya status yang berubah.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn list_orders(&self) -> AppResult<Vec<Order>>;
    async fn get_order(&self, id: &str) -> AppResult<Order>;
    async fn create_order(&self, req: CreateOrderRequest) -> AppResult<Order>;
    async fn update_order_status(&self, id: &str, status: OrderStatus) -> AppResult<Order>;
    // Transaction id baru untuk pembayaran CASH; setiap panggilan menghasilkan id baru
    async fn cash_transaction_id(&self) -> AppResult<String>;
}

// Lookup jarak km antara dua alamat (pakai PIN code)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DistanceService: Send + Sync {
    async fn distance_km(&self, source: &Address, destination: &Address) -> AppResult<f64>;
}

// Data armada: kendaraan, ketersediaan truck per ukuran, dan trips
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FleetService: Send + Sync {
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>>;
    async fn get_vehicle(&self, id: &str) -> AppResult<Vehicle>;
    async fn create_vehicle(&self, req: CreateVehicleRequest) -> AppResult<Vehicle>;
    async fn update_vehicle_status(&self, id: &str, status: VehicleStatus) -> AppResult<Vehicle>;
    async fn available_trucks(&self, size: TransportSize) -> AppResult<Vec<TruckOption>>;
    async fn list_trips(&self) -> AppResult<Vec<Trip>>;
    async fn trips_for_vehicle(&self, transport_id: &str) -> AppResult<Vec<Trip>>;
    async fn trips_for_driver(&self, driver_id: &str) -> AppResult<Vec<Trip>>;
}

// Data driver + filter yang available untuk assignment
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriverService: Send + Sync {
    async fn list_drivers(&self) -> AppResult<Vec<Driver>>;
    async fn get_driver(&self, id: &str) -> AppResult<Driver>;
    async fn create_driver(&self, req: CreateDriverRequest) -> AppResult<Driver>;
    async fn available_drivers(&self) -> AppResult<Vec<DriverOption>>;
}

// Folder tujuan upload image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFolder {
    Trucks,
    Drivers,
}

impl ImageFolder {
    pub fn as_str(&self) -> &str {
        match self {
            ImageFolder::Trucks => "trucks",
            ImageFolder::Drivers => "drivers",
        }
    }
}

// Upload foto kendaraan/driver; gagal -> placeholder URL
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        folder: ImageFolder,
    ) -> AppResult<String>;
}

// Kumpulan semua data source yang dipakai wizard dan demo binary
#[derive(Clone)]
pub struct DataSources {
    pub clients: Arc<dyn ClientDirectory>,
    pub orders: Arc<dyn OrderGateway>,
    pub distance: Arc<dyn DistanceService>,
    pub fleet: Arc<dyn FleetService>,
    pub drivers: Arc<dyn DriverService>,
    pub uploads: Arc<dyn ImageUploader>,
}

impl DataSources {
    // Data source remote: semua operasi ke backend API
    pub fn remote(config: &AppConfig) -> Result<Self, HttpClientError> {
        let api = Arc::new(shared::utils::http_client::ApiClient::new(
            config.api_base_url.as_str(),
            config.request_timeout_secs,
        )?);

        Ok(DataSources {
            clients: Arc::new(RemoteClientDirectory::new(api.clone())),
            orders: Arc::new(RemoteOrderGateway::new(api.clone())),
            distance: Arc::new(RemoteDistanceService::new(api.clone())),
            fleet: Arc::new(RemoteFleetService::new(api.clone())),
            drivers: Arc::new(RemoteDriverService::new(api.clone())),
            uploads: Arc::new(RemoteImageUploader::new(api)),
        })
    }

    // Data source in-memory dengan seed data (demo/offline/test)
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryDataSource::with_seed_data());

        DataSources {
            clients: store.clone(),
            orders: store.clone(),
            distance: store.clone(),
            fleet: store.clone(),
            drivers: store.clone(),
            uploads: store,
        }
    }
}
