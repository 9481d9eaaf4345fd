use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    Address, AddressType, Billing, Client, CreateClientRequest, CreateDriverRequest,
    CreateOrderRequest, CreateVehicleRequest, Driver, DriverOption, DriverStatus, Order,
    OrderStatus, OrderTransport, Payment, PaymentMode, PaymentType, TransportSize, Trip,
    TripStatus, TruckOption, UpdateClientRequest, Vehicle, VehicleStatus, VehicleType,
};
use crate::error::{AppError, AppResult};
use crate::services::{
    ClientDirectory, DistanceService, DriverService, FleetService, ImageFolder, ImageUploader,
    OrderGateway,
};

// Rute yang jaraknya sudah dikenal (pasangan PIN code, simetris)
const KNOWN_ROUTES: &[(&str, &str, f64)] = &[
    ("400001", "110001", 1400.0), // Mumbai - Delhi
    ("560001", "600001", 350.0),  // Bangalore - Chennai
];

// Kapasitas minimum (kg) per ukuran muatan
fn min_capacity_for(size: TransportSize) -> f64 {
    match size {
        TransportSize::Small => 0.0,
        TransportSize::Medium => 1000.0,
        TransportSize::Large => 5000.0,
    }
}

// Data source in-memory. Pengganti backend untuk demo, offline mode, dan test;
// satu instance memegang seluruh state di balik RwLock (bukan array global).
pub struct InMemoryDataSource {
    clients: RwLock<Vec<Client>>,
    orders: RwLock<Vec<Order>>,
    vehicles: RwLock<Vec<Vehicle>>,
    drivers: RwLock<Vec<Driver>>,
    trips: RwLock<Vec<Trip>>,
}

// Generate id unik dengan prefix entity (pola timestamp + random)
fn generate_id(prefix: &str) -> String {
    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let random: u16 = rand::random::<u16>() % 10000;
    format!("{}-{}-{:04}", prefix, timestamp, random)
}

// Pastikan setiap alamat punya id sebelum disimpan
fn assign_address_ids(addresses: &mut [Address]) {
    for address in addresses.iter_mut() {
        if address.id.is_none() {
            address.id = Some(format!("addr-{}", Uuid::new_v4()));
        }
    }
}

// Heuristic jarak dari sepasang PIN code: deterministic dan simetris,
// band 50-499 km seperti data demo
fn pin_code_distance(from: &str, to: &str) -> f64 {
    for (a, b, km) in KNOWN_ROUTES {
        if (from == *a && to == *b) || (from == *b && to == *a) {
            return *km;
        }
    }

    let seed = |pin: &str| -> u32 {
        pin.bytes()
            .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32))
    };
    let mixed = seed(from) ^ seed(to);
    50.0 + (mixed % 450) as f64
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self {
            clients: RwLock::new(Vec::new()),
            orders: RwLock::new(Vec::new()),
            vehicles: RwLock::new(Vec::new()),
            drivers: RwLock::new(Vec::new()),
            trips: RwLock::new(Vec::new()),
        }
    }

    // Seed data demo: 2 client, 2 order, 5 kendaraan, 5 driver, 5 trip
    pub fn with_seed_data() -> Self {
        Self {
            clients: RwLock::new(seed_clients()),
            orders: RwLock::new(seed_orders()),
            vehicles: RwLock::new(seed_vehicles()),
            drivers: RwLock::new(seed_drivers()),
            trips: RwLock::new(seed_trips()),
        }
    }
}

impl Default for InMemoryDataSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClientDirectory for InMemoryDataSource {
    async fn list_clients(&self) -> AppResult<Vec<Client>> {
        Ok(self.clients.read().await.clone())
    }

    async fn get_client(&self, id: &str) -> AppResult<Client> {
        self.clients
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Client {} tidak ditemukan", id)))
    }

    async fn create_client(&self, req: CreateClientRequest) -> AppResult<Client> {
        crate::domain::validate_create_client(&req)?;

        let mut addresses = req.addresses;
        assign_address_ids(&mut addresses);

        let client = Client {
            id: generate_id("client"),
            company_name: req.company_name,
            contact_email: req.contact_email,
            contact_person_name: req.contact_person_name,
            contact_number: req.contact_number,
            alternate_contact: req.alternate_contact,
            gst_number: req.gst_number,
            addresses,
        };

        self.clients.write().await.push(client.clone());
        tracing::info!("Client {} dibuat (in-memory)", client.id);
        Ok(client)
    }

    async fn update_client(&self, id: &str, req: UpdateClientRequest) -> AppResult<Client> {
        let mut clients = self.clients.write().await;
        let client = clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(format!("Client {} tidak ditemukan", id)))?;

        if let Some(company_name) = req.company_name {
            client.company_name = company_name;
        }
        if let Some(contact_email) = req.contact_email {
            client.contact_email = contact_email;
        }
        if let Some(contact_person_name) = req.contact_person_name {
            client.contact_person_name = contact_person_name;
        }
        if let Some(contact_number) = req.contact_number {
            client.contact_number = contact_number;
        }
        if let Some(alternate_contact) = req.alternate_contact {
            client.alternate_contact = Some(alternate_contact);
        }
        if let Some(gst_number) = req.gst_number {
            client.gst_number = Some(gst_number);
        }
        if let Some(mut addresses) = req.addresses {
            // Invariant: client selalu punya minimal satu alamat
            if addresses.is_empty() {
                return Err(AppError::validation(
                    "addresses",
                    "Minimal satu alamat harus diisi",
                ));
            }
            assign_address_ids(&mut addresses);
            client.addresses = addresses;
        }

        Ok(client.clone())
    }

    async fn delete_client(&self, id: &str) -> AppResult<()> {
        let mut clients = self.clients.write().await;
        let before = clients.len();
        clients.retain(|c| c.id != id);

        if clients.len() == before {
            return Err(AppError::not_found(format!("Client {} tidak ditemukan", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderGateway for InMemoryDataSource {
    async fn list_orders(&self) -> AppResult<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }

    async fn get_order(&self, id: &str) -> AppResult<Order> {
        self.orders
            .read()
            .await
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Order {} tidak ditemukan", id)))
    }

    async fn create_order(&self, req: CreateOrderRequest) -> AppResult<Order> {
        let now = Utc::now();
        let order = Order {
            id: generate_id("order"),
            client: req.client,
            transport: req.transport,
            billing: req.billing,
            payment: req.payment,
            driver_id: req.driver_id,
            created_at: now,
            updated_at: now,
        };

        self.orders.write().await.push(order.clone());
        tracing::info!("Order {} dibuat (in-memory)", order.id);
        Ok(order)
    }

    async fn update_order_status(&self, id: &str, status: OrderStatus) -> AppResult<Order> {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| AppError::not_found(format!("Order {} tidak ditemukan", id)))?;

        // Hanya status transport yang boleh berubah setelah order dibuat
        order.transport.status = status;
        order.updated_at = Utc::now();
        Ok(order.clone())
    }

    async fn cash_transaction_id(&self) -> AppResult<String> {
        let number: u32 = 100_000 + rand::random::<u32>() % 900_000;
        Ok(format!("CASH-{}", number))
    }
}

#[async_trait]
impl DistanceService for InMemoryDataSource {
    async fn distance_km(&self, source: &Address, destination: &Address) -> AppResult<f64> {
        Ok(pin_code_distance(&source.pin_code, &destination.pin_code))
    }
}

#[async_trait]
impl FleetService for InMemoryDataSource {
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.vehicles.read().await.clone())
    }

    async fn get_vehicle(&self, id: &str) -> AppResult<Vehicle> {
        self.vehicles
            .read()
            .await
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Kendaraan {} tidak ditemukan", id)))
    }

    async fn create_vehicle(&self, req: CreateVehicleRequest) -> AppResult<Vehicle> {
        let vehicle = Vehicle {
            id: generate_id("truck"),
            name: req.name,
            vehicle_type: req.vehicle_type,
            status: req.status,
            capacity: req.capacity,
            location: req.location,
            image_url: req.image_url,
            truck_number: req.truck_number,
        };

        self.vehicles.write().await.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn update_vehicle_status(&self, id: &str, status: VehicleStatus) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| AppError::not_found(format!("Kendaraan {} tidak ditemukan", id)))?;

        vehicle.status = status;
        Ok(vehicle.clone())
    }

    async fn available_trucks(&self, size: TransportSize) -> AppResult<Vec<TruckOption>> {
        let min_capacity = min_capacity_for(size);

        let trucks = self
            .vehicles
            .read()
            .await
            .iter()
            .filter(|v| v.status == VehicleStatus::Available && v.capacity >= min_capacity)
            .map(|v| TruckOption {
                id: v.id.clone(),
                name: format!("{} - {}", v.name, v.truck_number),
                capacity: Some(v.capacity),
                truck_number: Some(v.truck_number.clone()),
            })
            .collect();

        Ok(trucks)
    }

    async fn list_trips(&self) -> AppResult<Vec<Trip>> {
        Ok(self.trips.read().await.clone())
    }

    async fn trips_for_vehicle(&self, transport_id: &str) -> AppResult<Vec<Trip>> {
        Ok(self
            .trips
            .read()
            .await
            .iter()
            .filter(|t| t.transport_id == transport_id)
            .cloned()
            .collect())
    }

    async fn trips_for_driver(&self, driver_id: &str) -> AppResult<Vec<Trip>> {
        Ok(self
            .trips
            .read()
            .await
            .iter()
            .filter(|t| t.driver_id == driver_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DriverService for InMemoryDataSource {
    async fn list_drivers(&self) -> AppResult<Vec<Driver>> {
        Ok(self.drivers.read().await.clone())
    }

    async fn get_driver(&self, id: &str) -> AppResult<Driver> {
        self.drivers
            .read()
            .await
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Driver {} tidak ditemukan", id)))
    }

    async fn create_driver(&self, req: CreateDriverRequest) -> AppResult<Driver> {
        let driver = Driver {
            id: generate_id("driver"),
            name: req.name,
            status: req.status,
            rating: req.rating,
            license_plate: req.license_plate,
            vehicle_type: req.vehicle_type,
            phone_number: req.phone_number,
            image_url: req.image_url,
        };

        self.drivers.write().await.push(driver.clone());
        Ok(driver)
    }

    async fn available_drivers(&self) -> AppResult<Vec<DriverOption>> {
        let drivers = self
            .drivers
            .read()
            .await
            .iter()
            .filter(|d| d.status == DriverStatus::Available)
            .map(|d| DriverOption {
                id: d.id.clone(),
                name: d.name.clone(),
            })
            .collect();

        Ok(drivers)
    }
}

#[async_trait]
impl ImageUploader for InMemoryDataSource {
    async fn upload_image(
        &self,
        _bytes: Vec<u8>,
        _filename: &str,
        folder: ImageFolder,
    ) -> AppResult<String> {
        // Tidak ada storage beneran; kembalikan placeholder per folder
        let url = match folder {
            ImageFolder::Trucks => {
                "https://images.unsplash.com/photo-1519003722824-194d4455a60c?auto=format&fit=crop"
            }
            ImageFolder::Drivers => "https://randomuser.me/api/portraits/men/1.jpg",
        };
        Ok(url.to_string())
    }
}

// ===== Seed data demo =====

fn office_address(id: &str, line1: &str, city: &str, state: &str, pin: &str) -> Address {
    Address {
        id: Some(id.to_string()),
        address_line1: line1.to_string(),
        address_line2: None,
        address_line3: None,
        city: city.to_string(),
        state: state.to_string(),
        pin_code: pin.to_string(),
        country: "India".to_string(),
        address_type: AddressType::Office,
    }
}

fn transport_address(id: &str, line1: &str, city: &str, state: &str, pin: &str) -> Address {
    Address {
        address_type: AddressType::Transport,
        ..office_address(id, line1, city, state, pin)
    }
}

fn seed_clients() -> Vec<Client> {
    vec![
        Client {
            id: "client-1".to_string(),
            company_name: "ABC Logistics".to_string(),
            contact_email: "john@abclogistics.com".to_string(),
            contact_person_name: "John Doe".to_string(),
            contact_number: "9876543210".to_string(),
            alternate_contact: None,
            gst_number: None,
            addresses: vec![office_address(
                "addr-1",
                "123 Main Street",
                "Mumbai",
                "Maharashtra",
                "400001",
            )],
        },
        Client {
            id: "client-2".to_string(),
            company_name: "XYZ Transport".to_string(),
            contact_email: "jane@xyztransport.com".to_string(),
            contact_person_name: "Jane Smith".to_string(),
            contact_number: "8765432109".to_string(),
            alternate_contact: None,
            gst_number: None,
            addresses: vec![office_address(
                "addr-2",
                "789 Business Park",
                "Bangalore",
                "Karnataka",
                "560001",
            )],
        },
    ]
}

fn seed_orders() -> Vec<Order> {
    let clients = seed_clients();

    vec![
        Order {
            id: "order-1".to_string(),
            client: clients[0].clone(),
            transport: OrderTransport {
                status: OrderStatus::New,
                source: transport_address(
                    "src-1",
                    "123 Main Street",
                    "Mumbai",
                    "Maharashtra",
                    "400001",
                ),
                destination: transport_address(
                    "dest-1",
                    "456 Central Avenue",
                    "Delhi",
                    "Delhi",
                    "110001",
                ),
                size: TransportSize::Medium,
                truck_id: Some("truck-1".to_string()),
                distance: Some(1400.0),
            },
            billing: Billing::compute(1400.0, 15.0, 18.0),
            payment: Payment {
                amount: 24780.0,
                payment_type: PaymentType::Complete,
                payment_mode: PaymentMode::Upi,
                transaction_id: "UPI-123456".to_string(),
                next_payment_date: None,
                remaining_amount: None,
            },
            driver_id: "driver-1".to_string(),
            created_at: Utc.with_ymd_and_hms(2023, 8, 15, 10, 30, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2023, 8, 15, 10, 30, 0).unwrap(),
        },
        Order {
            id: "order-2".to_string(),
            client: clients[1].clone(),
            transport: OrderTransport {
                status: OrderStatus::InTransit,
                source: transport_address(
                    "src-2",
                    "789 Business Park",
                    "Bangalore",
                    "Karnataka",
                    "560001",
                ),
                destination: transport_address(
                    "dest-2",
                    "101 Industrial Area",
                    "Chennai",
                    "Tamil Nadu",
                    "600001",
                ),
                size: TransportSize::Large,
                truck_id: Some("truck-3".to_string()),
                distance: Some(350.0),
            },
            billing: Billing::compute(350.0, 20.0, 18.0),
            payment: Payment {
                amount: 5000.0,
                payment_type: PaymentType::Partial,
                payment_mode: PaymentMode::Cheque,
                transaction_id: "CHQ-654321".to_string(),
                next_payment_date: Some(chrono::NaiveDate::from_ymd_opt(2023, 9, 30).unwrap()),
                remaining_amount: Some(3260.0),
            },
            driver_id: "driver-2".to_string(),
            created_at: Utc.with_ymd_and_hms(2023, 8, 20, 14, 45, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2023, 8, 22, 9, 15, 0).unwrap(),
        },
    ]
}

fn seed_vehicles() -> Vec<Vehicle> {
    vec![
        Vehicle {
            id: "truck-1".to_string(),
            name: "Truck Alpha".to_string(),
            vehicle_type: VehicleType::Truck,
            status: VehicleStatus::Available,
            capacity: 5000.0,
            location: "Mumbai".to_string(),
            image_url:
                "https://images.unsplash.com/photo-1519003722824-194d4455a60c?auto=format&fit=crop"
                    .to_string(),
            truck_number: "MH01AB1234".to_string(),
        },
        Vehicle {
            id: "truck-2".to_string(),
            name: "Delivery Van 1".to_string(),
            vehicle_type: VehicleType::Van,
            status: VehicleStatus::InTransit,
            capacity: 1500.0,
            location: "Delhi".to_string(),
            image_url:
                "https://images.unsplash.com/photo-1555215695-3004980ad54e?auto=format&fit=crop"
                    .to_string(),
            truck_number: "DL02CD5678".to_string(),
        },
        Vehicle {
            id: "truck-3".to_string(),
            name: "Bharat Benz".to_string(),
            vehicle_type: VehicleType::Truck,
            status: VehicleStatus::Available,
            capacity: 8000.0,
            location: "Bangalore".to_string(),
            image_url:
                "https://images.unsplash.com/photo-1601584115197-04ecc0da31d7?auto=format&fit=crop"
                    .to_string(),
            truck_number: "MH03EF9012".to_string(),
        },
        Vehicle {
            id: "truck-4".to_string(),
            name: "Courier Car".to_string(),
            vehicle_type: VehicleType::Car,
            status: VehicleStatus::Available,
            capacity: 500.0,
            location: "Chennai".to_string(),
            image_url:
                "https://images.unsplash.com/photo-1533473359331-0135ef1b58bf?auto=format&fit=crop"
                    .to_string(),
            truck_number: "TN04GH3456".to_string(),
        },
        Vehicle {
            id: "truck-5".to_string(),
            name: "Heavy Loader".to_string(),
            vehicle_type: VehicleType::Truck,
            status: VehicleStatus::Maintenance,
            capacity: 10000.0,
            location: "Pune".to_string(),
            image_url:
                "https://images.unsplash.com/photo-1566207474742-0fa4adffcced?auto=format&fit=crop"
                    .to_string(),
            truck_number: "MH05IJ7890".to_string(),
        },
    ]
}

fn seed_drivers() -> Vec<Driver> {
    vec![
        Driver {
            id: "driver-1".to_string(),
            name: "Raj Kumar".to_string(),
            status: DriverStatus::Available,
            rating: 4.8,
            license_plate: "MH01AB1234".to_string(),
            vehicle_type: VehicleType::Truck,
            phone_number: "9812345670".to_string(),
            image_url: "https://randomuser.me/api/portraits/men/1.jpg".to_string(),
        },
        Driver {
            id: "driver-2".to_string(),
            name: "Sunil Verma".to_string(),
            status: DriverStatus::OnTrip,
            rating: 4.9,
            license_plate: "DL02CD5678".to_string(),
            vehicle_type: VehicleType::Van,
            phone_number: "9823456781".to_string(),
            image_url: "https://randomuser.me/api/portraits/men/2.jpg".to_string(),
        },
        Driver {
            id: "driver-3".to_string(),
            name: "Amit Singh".to_string(),
            status: DriverStatus::Available,
            rating: 4.7,
            license_plate: "MH03EF9012".to_string(),
            vehicle_type: VehicleType::Truck,
            phone_number: "9834567892".to_string(),
            image_url: "https://randomuser.me/api/portraits/men/3.jpg".to_string(),
        },
        Driver {
            id: "driver-4".to_string(),
            name: "Priya Sharma".to_string(),
            status: DriverStatus::OffDuty,
            rating: 4.6,
            license_plate: "TN04GH3456".to_string(),
            vehicle_type: VehicleType::Car,
            phone_number: "9845678903".to_string(),
            image_url: "https://randomuser.me/api/portraits/women/4.jpg".to_string(),
        },
        Driver {
            id: "driver-5".to_string(),
            name: "Vikram Patel".to_string(),
            status: DriverStatus::Available,
            rating: 4.9,
            license_plate: "MH05IJ7890".to_string(),
            vehicle_type: VehicleType::Van,
            phone_number: "9856789014".to_string(),
            image_url: "https://randomuser.me/api/portraits/men/5.jpg".to_string(),
        },
    ]
}

fn seed_trips() -> Vec<Trip> {
    vec![
        Trip {
            id: "trip-1".to_string(),
            transport_id: "truck-2".to_string(),
            driver_id: "driver-2".to_string(),
            origin: "Delhi".to_string(),
            destination: "Jaipur".to_string(),
            start_time: Utc.with_ymd_and_hms(2023, 11, 1, 8, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2023, 11, 1, 16, 0, 0).unwrap(),
            status: TripStatus::InProgress,
            distance: 281.0,
        },
        Trip {
            id: "trip-2".to_string(),
            transport_id: "truck-1".to_string(),
            driver_id: "driver-1".to_string(),
            origin: "Mumbai".to_string(),
            destination: "Pune".to_string(),
            start_time: Utc.with_ymd_and_hms(2023, 11, 2, 9, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2023, 11, 2, 14, 0, 0).unwrap(),
            status: TripStatus::Scheduled,
            distance: 149.0,
        },
        Trip {
            id: "trip-3".to_string(),
            transport_id: "truck-4".to_string(),
            driver_id: "driver-3".to_string(),
            origin: "Chennai".to_string(),
            destination: "Bangalore".to_string(),
            start_time: Utc.with_ymd_and_hms(2023, 10, 28, 10, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2023, 10, 28, 14, 30, 0).unwrap(),
            status: TripStatus::Completed,
            distance: 350.0,
        },
        Trip {
            id: "trip-4".to_string(),
            transport_id: "truck-5".to_string(),
            driver_id: "driver-4".to_string(),
            origin: "Pune".to_string(),
            destination: "Nashik".to_string(),
            start_time: Utc.with_ymd_and_hms(2023, 10, 30, 8, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2023, 10, 30, 12, 0, 0).unwrap(),
            status: TripStatus::Cancelled,
            distance: 212.0,
        },
        Trip {
            id: "trip-5".to_string(),
            transport_id: "truck-3".to_string(),
            driver_id: "driver-5".to_string(),
            origin: "Bangalore".to_string(),
            destination: "Hyderabad".to_string(),
            start_time: Utc.with_ymd_and_hms(2023, 11, 3, 7, 30, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2023, 11, 3, 10, 30, 0).unwrap(),
            status: TripStatus::Scheduled,
            distance: 569.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_address(pin: &str) -> Address {
        Address {
            id: None,
            address_line1: "12 Test Lane".to_string(),
            address_line2: None,
            address_line3: None,
            city: "Testville".to_string(),
            state: "Teststate".to_string(),
            pin_code: pin.to_string(),
            country: "India".to_string(),
            address_type: AddressType::Transport,
        }
    }

    #[tokio::test]
    async fn test_seed_data_loaded() {
        let store = InMemoryDataSource::with_seed_data();

        assert_eq!(store.list_clients().await.unwrap().len(), 2);
        assert_eq!(store.list_orders().await.unwrap().len(), 2);
        assert_eq!(store.list_vehicles().await.unwrap().len(), 5);
        assert_eq!(store.list_drivers().await.unwrap().len(), 5);
        assert_eq!(store.list_trips().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_seed_billing_matches_payment() {
        let store = InMemoryDataSource::with_seed_data();
        let order = store.get_order("order-2").await.unwrap();

        // 350 x 20 x 1.18 = 8260; partial 5000 -> sisa 3260
        assert_eq!(order.billing.total_amount, 8260.0);
        assert_eq!(order.payment.remaining_amount, Some(3260.0));
    }

    #[tokio::test]
    async fn test_create_client_assigns_address_ids() {
        let store = InMemoryDataSource::with_seed_data();

        let created = store
            .create_client(CreateClientRequest {
                company_name: "PQR Movers".to_string(),
                contact_email: "ops@pqrmovers.in".to_string(),
                contact_person_name: "Asha Rao".to_string(),
                contact_number: "9988776655".to_string(),
                alternate_contact: None,
                gst_number: None,
                addresses: vec![new_address("411001")],
            })
            .await
            .unwrap();

        assert!(created.addresses[0].id.is_some());
        assert_eq!(store.list_clients().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_client_rejects_empty_addresses() {
        let store = InMemoryDataSource::new();

        let err = store
            .create_client(CreateClientRequest {
                company_name: "PQR Movers".to_string(),
                contact_email: "ops@pqrmovers.in".to_string(),
                contact_person_name: "Asha Rao".to_string(),
                contact_number: "9988776655".to_string(),
                alternate_contact: None,
                gst_number: None,
                addresses: vec![],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_order_status_touches_timestamp() {
        let store = InMemoryDataSource::with_seed_data();
        let before = store.get_order("order-1").await.unwrap();

        let updated = store
            .update_order_status("order-1", OrderStatus::InTransit)
            .await
            .unwrap();

        assert_eq!(updated.transport.status, OrderStatus::InTransit);
        assert!(updated.updated_at > before.updated_at);
        // Field lain tidak berubah
        assert_eq!(updated.billing, before.billing);
        assert_eq!(updated.payment, before.payment);
    }

    #[tokio::test]
    async fn test_update_status_unknown_order() {
        let store = InMemoryDataSource::with_seed_data();
        let err = store
            .update_order_status("order-99", OrderStatus::Delivered)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_available_trucks_filters_by_size() {
        let store = InMemoryDataSource::with_seed_data();

        let small = store.available_trucks(TransportSize::Small).await.unwrap();
        let medium = store.available_trucks(TransportSize::Medium).await.unwrap();
        let large = store.available_trucks(TransportSize::Large).await.unwrap();

        // Heavy Loader maintenance dan Delivery Van in-transit tidak muncul
        assert_eq!(small.len(), 3);
        assert_eq!(medium.len(), 2);
        assert_eq!(large.len(), 2);
        assert!(large.iter().all(|t| t.capacity.unwrap() >= 5000.0));
    }

    #[tokio::test]
    async fn test_available_drivers_filtered() {
        let store = InMemoryDataSource::with_seed_data();
        let drivers = store.available_drivers().await.unwrap();

        assert_eq!(drivers.len(), 3);
        assert!(drivers.iter().any(|d| d.name == "Raj Kumar"));
        assert!(drivers.iter().all(|d| d.id != "driver-2"));
    }

    #[tokio::test]
    async fn test_distance_known_route() {
        let store = InMemoryDataSource::with_seed_data();
        let mumbai = new_address("400001");
        let delhi = new_address("110001");

        let km = store.distance_km(&mumbai, &delhi).await.unwrap();
        assert_eq!(km, 1400.0);
    }

    #[tokio::test]
    async fn test_distance_heuristic_deterministic_and_symmetric() {
        let store = InMemoryDataSource::new();
        let a = new_address("411001");
        let b = new_address("682001");

        let first = store.distance_km(&a, &b).await.unwrap();
        let second = store.distance_km(&a, &b).await.unwrap();
        let reverse = store.distance_km(&b, &a).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, reverse);
        assert!((50.0..500.0).contains(&first));
    }

    #[tokio::test]
    async fn test_cash_transaction_id_changes() {
        let store = InMemoryDataSource::new();

        let first = store.cash_transaction_id().await.unwrap();
        assert!(first.starts_with("CASH-"));
        assert_eq!(first.len(), 11);
    }

    #[tokio::test]
    async fn test_delete_client() {
        let store = InMemoryDataSource::with_seed_data();
        store.delete_client("client-1").await.unwrap();

        assert_eq!(store.list_clients().await.unwrap().len(), 1);
        assert!(store.delete_client("client-1").await.is_err());
    }
}
