use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use shared::utils::http_client::ApiClient;

use crate::domain::{
    Address, Client, CreateClientRequest, CreateDriverRequest, CreateOrderRequest,
    CreateVehicleRequest, Driver, DriverOption, Order, OrderStatus, TransportSize, Trip,
    TruckOption, UpdateClientRequest, Vehicle, VehicleStatus,
};
use crate::error::AppResult;
use crate::services::{
    ClientDirectory, DistanceService, DriverService, FleetService, ImageFolder, ImageUploader,
    OrderGateway,
};

// Placeholder ketika upload image gagal (tidak fatal untuk workflow)
const TRUCK_IMAGE_PLACEHOLDER: &str =
    "https://images.unsplash.com/photo-1519003722824-194d4455a60c?auto=format&fit=crop";
const DRIVER_IMAGE_PLACEHOLDER: &str = "https://randomuser.me/api/portraits/men/1.jpg";

// ===== Client directory =====

pub struct RemoteClientDirectory {
    api: Arc<ApiClient>,
}

impl RemoteClientDirectory {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ClientDirectory for RemoteClientDirectory {
    async fn list_clients(&self) -> AppResult<Vec<Client>> {
        Ok(self.api.get("/clients").await?)
    }

    async fn get_client(&self, id: &str) -> AppResult<Client> {
        Ok(self.api.get(&format!("/clients/{}", id)).await?)
    }

    async fn create_client(&self, req: CreateClientRequest) -> AppResult<Client> {
        let client: Client = self.api.post("/clients", &req).await?;
        tracing::info!("Client {} berhasil dibuat", client.id);
        Ok(client)
    }

    async fn update_client(&self, id: &str, req: UpdateClientRequest) -> AppResult<Client> {
        Ok(self.api.put(&format!("/clients/{}", id), &req).await?)
    }

    async fn delete_client(&self, id: &str) -> AppResult<()> {
        Ok(self.api.delete(&format!("/clients/{}", id)).await?)
    }
}

// ===== Order gateway =====

#[derive(Debug, serde::Serialize)]
struct UpdateStatusBody {
    status: OrderStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CashTransactionResponse {
    transaction_id: String,
}

pub struct RemoteOrderGateway {
    api: Arc<ApiClient>,
}

impl RemoteOrderGateway {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OrderGateway for RemoteOrderGateway {
    async fn list_orders(&self) -> AppResult<Vec<Order>> {
        Ok(self.api.get("/orders").await?)
    }

    async fn get_order(&self, id: &str) -> AppResult<Order> {
        Ok(self.api.get(&format!("/orders/{}", id)).await?)
    }

    async fn create_order(&self, req: CreateOrderRequest) -> AppResult<Order> {
        let order: Order = self.api.post("/orders", &req).await?;
        tracing::info!("Order {} berhasil dibuat", order.id);
        Ok(order)
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> AppResult<Order> {
        let body = UpdateStatusBody { status };
        Ok(self.api.patch(&format!("/orders/{}", id), &body).await?)
    }

    async fn cash_transaction_id(&self) -> AppResult<String> {
        let response: CashTransactionResponse = self.api.get("/payments/cash/new").await?;
        Ok(response.transaction_id)
    }
}

// ===== Distance service =====

// Backend kadang mengirim {"distance": 123} dan kadang angka polos
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DistanceResponse {
    Object { distance: f64 },
    Plain(f64),
}

impl DistanceResponse {
    fn km(self) -> f64 {
        match self {
            DistanceResponse::Object { distance } => distance,
            DistanceResponse::Plain(distance) => distance,
        }
    }
}

pub struct RemoteDistanceService {
    api: Arc<ApiClient>,
}

impl RemoteDistanceService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DistanceService for RemoteDistanceService {
    async fn distance_km(&self, source: &Address, destination: &Address) -> AppResult<f64> {
        let endpoint = format!(
            "/distance?fromPinCode={}&toPinCode={}&country={}",
            source.pin_code, destination.pin_code, source.country
        );

        let response: DistanceResponse = self.api.get(&endpoint).await?;
        let distance = response.km();

        tracing::debug!(
            "Distance {} -> {}: {} km",
            source.city,
            destination.city,
            distance
        );
        Ok(distance)
    }
}

// ===== Fleet service =====

pub struct RemoteFleetService {
    api: Arc<ApiClient>,
}

impl RemoteFleetService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl FleetService for RemoteFleetService {
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.api.get("/transports").await?)
    }

    async fn get_vehicle(&self, id: &str) -> AppResult<Vehicle> {
        Ok(self.api.get(&format!("/transports/{}", id)).await?)
    }

    async fn create_vehicle(&self, req: CreateVehicleRequest) -> AppResult<Vehicle> {
        Ok(self.api.post("/trucks", &req).await?)
    }

    async fn update_vehicle_status(&self, id: &str, status: VehicleStatus) -> AppResult<Vehicle> {
        let body = serde_json::json!({ "status": status });
        Ok(self.api.patch(&format!("/transports/{}", id), &body).await?)
    }

    async fn available_trucks(&self, size: TransportSize) -> AppResult<Vec<TruckOption>> {
        Ok(self.api.get(&format!("/trucks?size={}", size)).await?)
    }

    async fn list_trips(&self) -> AppResult<Vec<Trip>> {
        Ok(self.api.get("/trips").await?)
    }

    async fn trips_for_vehicle(&self, transport_id: &str) -> AppResult<Vec<Trip>> {
        Ok(self
            .api
            .get(&format!("/transports/{}/trips", transport_id))
            .await?)
    }

    async fn trips_for_driver(&self, driver_id: &str) -> AppResult<Vec<Trip>> {
        Ok(self.api.get(&format!("/drivers/{}/trips", driver_id)).await?)
    }
}

// ===== Driver service =====

pub struct RemoteDriverService {
    api: Arc<ApiClient>,
}

impl RemoteDriverService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DriverService for RemoteDriverService {
    async fn list_drivers(&self) -> AppResult<Vec<Driver>> {
        Ok(self.api.get("/drivers").await?)
    }

    async fn get_driver(&self, id: &str) -> AppResult<Driver> {
        Ok(self.api.get(&format!("/drivers/{}", id)).await?)
    }

    async fn create_driver(&self, req: CreateDriverRequest) -> AppResult<Driver> {
        Ok(self.api.post("/drivers", &req).await?)
    }

    async fn available_drivers(&self) -> AppResult<Vec<DriverOption>> {
        // Extra fields dari record driver diabaikan saat deserialize
        Ok(self.api.get("/drivers?status=AVAILABLE").await?)
    }
}

// ===== Image uploader =====

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadImageResponse {
    image_url: String,
}

pub struct RemoteImageUploader {
    api: Arc<ApiClient>,
}

impl RemoteImageUploader {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ImageUploader for RemoteImageUploader {
    async fn upload_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        folder: ImageFolder,
    ) -> AppResult<String> {
        let endpoint = format!("/uploads/images/{}", folder.as_str());

        match self
            .api
            .post_file::<UploadImageResponse>(&endpoint, "fileName", bytes, filename)
            .await
        {
            Ok(response) => Ok(response.image_url),
            Err(err) => {
                // Upload gagal bukan blocker; pakai placeholder
                tracing::warn!("Upload image gagal ({}), pakai placeholder", err);
                let placeholder = match folder {
                    ImageFolder::Trucks => TRUCK_IMAGE_PLACEHOLDER,
                    ImageFolder::Drivers => DRIVER_IMAGE_PLACEHOLDER,
                };
                Ok(placeholder.to_string())
            }
        }
    }
}
