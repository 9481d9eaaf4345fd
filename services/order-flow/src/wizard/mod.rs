// Wizard pembuatan order: client -> transport -> billing -> payment -> selesai.
// Wizard memegang draft order secara eksklusif selama flow berjalan;
// order final baru dibuat satu kali di submit_order.
pub mod billing;
pub mod payment;
pub mod transport;

pub use billing::BillingForm;
pub use payment::PaymentForm;
pub use transport::{AddressChoice, TransportForm};

use crate::config::AppState;
use crate::domain::{
    validate_create_client, Billing, Client, CreateClientRequest, CreateOrderRequest, DriverOption,
    Order, OrderTransport, TransportSize, TruckOption,
};
use crate::error::{AppError, AppResult};
use crate::services::DataSources;

// Step yang sedang aktif di wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    ClientSelection,
    ClientForm,
    Transport,
    Billing,
    Payment,
    Completed,
}

impl WizardStep {
    pub fn as_str(&self) -> &str {
        match self {
            WizardStep::ClientSelection => "client-selection",
            WizardStep::ClientForm => "client-form",
            WizardStep::Transport => "transport",
            WizardStep::Billing => "billing",
            WizardStep::Payment => "payment",
            WizardStep::Completed => "completed",
        }
    }
}

pub struct OrderWizard {
    sources: DataSources,
    default_rate_per_km: f64,
    default_gst_rate: f64,
    step: WizardStep,
    client: Option<Client>,
    transport: Option<OrderTransport>,
    billing_form: Option<BillingForm>,
    billing: Option<Billing>,
    payment_form: Option<PaymentForm>,
    // Last-known-good daftar driver available; tetap dipakai kalau refresh gagal
    available_drivers: Vec<DriverOption>,
    order: Option<Order>,
}

impl OrderWizard {
    pub fn new(state: &AppState) -> Self {
        Self {
            sources: state.sources.clone(),
            default_rate_per_km: state.config.default_rate_per_km,
            default_gst_rate: state.config.default_gst_rate,
            step: WizardStep::ClientSelection,
            client: None,
            transport: None,
            billing_form: None,
            billing: None,
            payment_form: None,
            available_drivers: Vec::new(),
            order: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    pub fn transport(&self) -> Option<&OrderTransport> {
        self.transport.as_ref()
    }

    pub fn billing(&self) -> Option<&Billing> {
        self.billing.as_ref()
    }

    // Order hasil submit (hanya ada setelah Completed); read-only copy
    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    fn ensure_step(&self, expected: WizardStep) -> AppResult {
        if self.step != expected {
            return Err(AppError::internal(format!(
                "Aksi ini butuh step {}, sekarang di step {}",
                expected.as_str(),
                self.step.as_str()
            )));
        }
        Ok(())
    }

    // ===== Step 1: pilih atau buat client =====

    pub async fn list_clients(&self) -> AppResult<Vec<Client>> {
        self.ensure_step(WizardStep::ClientSelection)?;
        self.sources.clients.list_clients().await
    }

    pub fn select_client(&mut self, client: Client) -> AppResult {
        self.ensure_step(WizardStep::ClientSelection)?;

        tracing::info!("Client {} dipilih untuk order baru", client.company_name);
        self.client = Some(client);
        self.step = WizardStep::Transport;
        Ok(())
    }

    pub fn begin_new_client(&mut self) -> AppResult {
        self.ensure_step(WizardStep::ClientSelection)?;
        self.step = WizardStep::ClientForm;
        Ok(())
    }

    pub async fn submit_new_client(&mut self, req: CreateClientRequest) -> AppResult<Client> {
        self.ensure_step(WizardStep::ClientForm)?;

        // Validasi form dulu, baru panggil directory
        validate_create_client(&req)?;
        let client = self.sources.clients.create_client(req).await?;

        tracing::info!("Client baru {} dibuat dari wizard", client.id);
        self.client = Some(client.clone());
        self.step = WizardStep::Transport;
        Ok(client)
    }

    // ===== Step 2: transport (alamat + truck) =====

    pub async fn available_trucks(&self, size: TransportSize) -> AppResult<Vec<TruckOption>> {
        self.ensure_step(WizardStep::Transport)?;
        self.sources.fleet.available_trucks(size).await
    }

    pub fn submit_transport(&mut self, form: TransportForm) -> AppResult {
        self.ensure_step(WizardStep::Transport)?;

        let client = self
            .client
            .as_ref()
            .ok_or_else(|| AppError::internal("Client belum dipilih"))?;
        let transport = form.resolve(client)?;

        // Form billing dimulai dari jarak yang sudah ada (0 kalau belum dihitung)
        self.billing_form = Some(BillingForm::new(
            transport.distance.unwrap_or(0.0),
            self.default_rate_per_km,
            self.default_gst_rate,
        ));

        tracing::info!(
            "Transport {} -> {} ({}) tersimpan di draft",
            transport.source.city,
            transport.destination.city,
            transport.size
        );
        self.transport = Some(transport);
        self.step = WizardStep::Billing;
        Ok(())
    }

    // ===== Step 3: billing =====

    pub fn billing_form(&self) -> AppResult<&BillingForm> {
        self.ensure_step(WizardStep::Billing)?;
        self.billing_form
            .as_ref()
            .ok_or_else(|| AppError::internal("Form billing belum dimulai"))
    }

    pub fn billing_form_mut(&mut self) -> AppResult<&mut BillingForm> {
        self.ensure_step(WizardStep::Billing)?;
        self.billing_form
            .as_mut()
            .ok_or_else(|| AppError::internal("Form billing belum dimulai"))
    }

    // Hitung ulang jarak lewat distance service.
    // Gagal: nilai jarak sebelumnya dipertahankan dan error-nya retryable.
    // Dua kali recalculate boleh; respon terakhir yang menang.
    pub async fn recalculate_distance(&mut self) -> AppResult<f64> {
        self.ensure_step(WizardStep::Billing)?;

        let transport = self
            .transport
            .as_ref()
            .ok_or_else(|| AppError::internal("Transport belum tersimpan"))?;

        match self
            .sources
            .distance
            .distance_km(&transport.source, &transport.destination)
            .await
        {
            Ok(distance) => {
                if let Some(form) = self.billing_form.as_mut() {
                    form.distance = distance;
                }
                tracing::info!(
                    "Jarak {} -> {}: {} km",
                    transport.source.city,
                    transport.destination.city,
                    distance
                );
                Ok(distance)
            }
            Err(err) => {
                tracing::warn!("Hitung jarak gagal, nilai lama dipertahankan: {}", err);
                Err(err)
            }
        }
    }

    // Billing hasil hitungan form saat ini (preview sebelum submit)
    pub fn billing_preview(&self) -> AppResult<Billing> {
        Ok(self.billing_form()?.compute())
    }

    pub fn submit_billing(&mut self) -> AppResult<Billing> {
        self.ensure_step(WizardStep::Billing)?;

        let form = self
            .billing_form
            .as_ref()
            .ok_or_else(|| AppError::internal("Form billing belum dimulai"))?;
        form.validate()?;

        let billing = form.compute();

        // Jarak final ikut tersimpan di transport draft
        if let Some(transport) = self.transport.as_mut() {
            transport.distance = Some(billing.distance);
        }

        self.payment_form = Some(PaymentForm::new(billing.total_amount));
        self.billing = Some(billing.clone());
        self.step = WizardStep::Payment;

        tracing::info!(
            "Billing tersimpan: subtotal {:.2}, GST {:.2}, total {:.2}",
            billing.subtotal,
            billing.gst_amount,
            billing.total_amount
        );
        Ok(billing)
    }

    // ===== Step 4: payment + driver =====

    pub fn payment_form(&self) -> AppResult<&PaymentForm> {
        self.ensure_step(WizardStep::Payment)?;
        self.payment_form
            .as_ref()
            .ok_or_else(|| AppError::internal("Form payment belum dimulai"))
    }

    pub fn payment_form_mut(&mut self) -> AppResult<&mut PaymentForm> {
        self.ensure_step(WizardStep::Payment)?;
        self.payment_form
            .as_mut()
            .ok_or_else(|| AppError::internal("Form payment belum dimulai"))
    }

    // Refresh daftar driver available.
    // Gagal: daftar last-known-good dipertahankan, error-nya retryable.
    pub async fn refresh_available_drivers(&mut self) -> AppResult<Vec<DriverOption>> {
        self.ensure_step(WizardStep::Payment)?;

        match self.sources.drivers.available_drivers().await {
            Ok(drivers) => {
                self.available_drivers = drivers.clone();
                Ok(drivers)
            }
            Err(err) => {
                tracing::warn!(
                    "Gagal ambil daftar driver, pakai daftar lama ({} driver): {}",
                    self.available_drivers.len(),
                    err
                );
                Err(err)
            }
        }
    }

    pub fn available_drivers(&self) -> &[DriverOption] {
        &self.available_drivers
    }

    // Pilih driver dari daftar available
    pub fn select_driver(&mut self, driver_id: &str) -> AppResult {
        self.ensure_step(WizardStep::Payment)?;

        if !self.available_drivers.iter().any(|d| d.id == driver_id) {
            return Err(AppError::missing_reference(format!(
                "Driver {} tidak ada di daftar driver available",
                driver_id
            )));
        }

        if let Some(form) = self.payment_form.as_mut() {
            form.driver_id = Some(driver_id.to_string());
        }
        Ok(())
    }

    // Generate transaction id untuk pembayaran CASH.
    // Idempotent dari sisi form: id baru menggantikan id sebelumnya.
    pub async fn generate_cash_transaction_id(&mut self) -> AppResult<String> {
        self.ensure_step(WizardStep::Payment)?;

        {
            let form = self
                .payment_form
                .as_ref()
                .ok_or_else(|| AppError::internal("Form payment belum dimulai"))?;
            if form.payment_mode != crate::domain::PaymentMode::Cash {
                return Err(AppError::validation(
                    "transactionId",
                    "Generate transaction id hanya untuk pembayaran CASH",
                ));
            }
        }

        let transaction_id = self.sources.orders.cash_transaction_id().await?;
        if let Some(form) = self.payment_form.as_mut() {
            form.set_transaction_id(transaction_id.clone());
        }
        Ok(transaction_id)
    }

    // Submit final: validasi dulu (tanpa network), baru create order.
    // Gagal di gateway: draft utuh, step tetap payment, boleh submit ulang.
    pub async fn submit_order(&mut self) -> AppResult<Order> {
        self.ensure_step(WizardStep::Payment)?;

        let form = self
            .payment_form
            .as_ref()
            .ok_or_else(|| AppError::internal("Form payment belum dimulai"))?;
        form.validate()?;

        let client = self
            .client
            .clone()
            .ok_or_else(|| AppError::internal("Client belum dipilih"))?;
        let transport = self
            .transport
            .clone()
            .ok_or_else(|| AppError::internal("Transport belum tersimpan"))?;
        let billing = self
            .billing
            .clone()
            .ok_or_else(|| AppError::internal("Billing belum tersimpan"))?;
        let driver_id = form
            .driver_id
            .clone()
            .ok_or_else(|| AppError::validation("driverId", "Driver harus dipilih"))?;

        let request = CreateOrderRequest {
            client,
            transport,
            billing,
            payment: form.to_payment(),
            driver_id,
        };

        let order = self.sources.orders.create_order(request).await?;

        tracing::info!("Order {} berhasil dibuat", order.id);
        self.order = Some(order.clone());
        self.step = WizardStep::Completed;
        Ok(order)
    }

    // ===== Navigasi =====

    // Mundur satu step mengikuti edge yang sama dengan UI aslinya
    pub fn back(&mut self) -> WizardStep {
        self.step = match self.step {
            WizardStep::ClientForm => WizardStep::ClientSelection,
            WizardStep::Transport => WizardStep::ClientSelection,
            WizardStep::Billing => WizardStep::Transport,
            WizardStep::Payment => WizardStep::Billing,
            // Dari selection/completed tidak ada mundur
            other => other,
        };
        self.step
    }

    // Buang seluruh draft; tidak ada persistence untuk state parsial
    pub fn reset(&mut self) {
        self.step = WizardStep::ClientSelection;
        self.client = None;
        self.transport = None;
        self.billing_form = None;
        self.billing = None;
        self.payment_form = None;
        self.available_drivers.clear();
        self.order = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::{AppConfig, DataSourceMode};
    use crate::domain::{Address, AddressType, PaymentMode, PaymentType};
    use crate::services::{
        DistanceService, InMemoryDataSource, MockDistanceService, MockOrderGateway, OrderGateway,
    };

    fn test_config() -> AppConfig {
        AppConfig {
            api_base_url: "http://localhost:8080/api".to_string(),
            data_source: DataSourceMode::Memory,
            request_timeout_secs: 5,
            default_rate_per_km: 15.0,
            default_gst_rate: 18.0,
            environment: "test".to_string(),
        }
    }

    fn memory_state() -> AppState {
        AppState::with_sources(test_config(), DataSources::in_memory())
    }

    // Sources in-memory dengan order gateway / distance service yang di-override
    fn state_with_overrides(
        orders: Option<Arc<dyn OrderGateway>>,
        distance: Option<Arc<dyn DistanceService>>,
    ) -> AppState {
        let store = Arc::new(InMemoryDataSource::with_seed_data());
        let sources = DataSources {
            clients: store.clone(),
            orders: orders.unwrap_or_else(|| store.clone()),
            distance: distance.unwrap_or_else(|| store.clone()),
            fleet: store.clone(),
            drivers: store.clone(),
            uploads: store,
        };
        AppState::with_sources(test_config(), sources)
    }

    fn delhi_address() -> Address {
        Address {
            id: None,
            address_line1: "456 Central Avenue".to_string(),
            address_line2: None,
            address_line3: None,
            city: "Delhi".to_string(),
            state: "Delhi".to_string(),
            pin_code: "110001".to_string(),
            country: "India".to_string(),
            address_type: AddressType::Transport,
        }
    }

    async fn wizard_at_billing(state: &AppState) -> OrderWizard {
        let mut wizard = OrderWizard::new(state);

        let clients = wizard.list_clients().await.unwrap();
        let abc = clients.into_iter().find(|c| c.id == "client-1").unwrap();
        wizard.select_client(abc).unwrap();

        let form = TransportForm::new(
            AddressChoice::Existing("addr-1".to_string()),
            AddressChoice::New(delhi_address()),
        );
        wizard.submit_transport(form).unwrap();
        wizard
    }

    #[tokio::test]
    async fn test_happy_path_complete_payment() {
        let state = memory_state();
        let mut wizard = wizard_at_billing(&state).await;

        // Mumbai -> Delhi adalah rute yang dikenal data source demo
        let km = wizard.recalculate_distance().await.unwrap();
        assert_eq!(km, 1400.0);

        let billing = wizard.submit_billing().unwrap();
        assert_eq!(billing.total_amount, 24780.0);
        assert_eq!(wizard.step(), WizardStep::Payment);

        wizard.refresh_available_drivers().await.unwrap();
        wizard.select_driver("driver-1").unwrap();
        wizard
            .payment_form_mut()
            .unwrap()
            .set_transaction_id("UPI-778899");

        let order = wizard.submit_order().await.unwrap();
        assert_eq!(wizard.step(), WizardStep::Completed);
        assert!(order.id.starts_with("order-"));
        assert_eq!(order.payment.payment_type, PaymentType::Complete);
        assert_eq!(order.payment.amount, 24780.0);
        assert_eq!(order.payment.remaining_amount, Some(0.0));
        assert_eq!(order.driver_id, "driver-1");
        assert_eq!(order.transport.distance, Some(1400.0));
        assert_eq!(wizard.order().unwrap().id, order.id);
    }

    #[tokio::test]
    async fn test_partial_payment_flow() {
        let state = memory_state();
        let mut wizard = OrderWizard::new(&state);

        let clients = wizard.list_clients().await.unwrap();
        let xyz = clients.into_iter().find(|c| c.id == "client-2").unwrap();
        wizard.select_client(xyz).unwrap();

        // Bangalore (addr-2) -> Chennai: 350 km di rute yang dikenal
        let mut chennai = delhi_address();
        chennai.city = "Chennai".to_string();
        chennai.state = "Tamil Nadu".to_string();
        chennai.pin_code = "600001".to_string();

        let form = TransportForm::new(
            AddressChoice::Existing("addr-2".to_string()),
            AddressChoice::New(chennai),
        );
        wizard.submit_transport(form).unwrap();

        wizard.recalculate_distance().await.unwrap();
        wizard.billing_form_mut().unwrap().rate_per_km = 20.0;

        let billing = wizard.submit_billing().unwrap();
        assert_eq!(billing.total_amount, 8260.0);

        wizard.refresh_available_drivers().await.unwrap();
        wizard.select_driver("driver-3").unwrap();

        let today = chrono::Utc::now().date_naive();
        {
            let form = wizard.payment_form_mut().unwrap();
            form.set_payment_type(PaymentType::Partial);
            form.set_amount(5000.0).unwrap();
            form.set_payment_mode(PaymentMode::Cheque);
            form.set_transaction_id("CHQ-112233");
            form.set_next_payment_date(Some(today + chrono::Duration::days(30)));
        }

        let order = wizard.submit_order().await.unwrap();
        assert_eq!(order.payment.remaining_amount, Some(3260.0));
        assert_eq!(order.payment.payment_mode, PaymentMode::Cheque);
    }

    #[tokio::test]
    async fn test_submit_without_driver_never_hits_gateway() {
        // MockOrderGateway tanpa expectation: panic kalau create_order terpanggil
        let gateway = MockOrderGateway::new();
        let state = state_with_overrides(Some(Arc::new(gateway)), None);

        let mut wizard = wizard_at_billing(&state).await;
        wizard.recalculate_distance().await.unwrap();
        wizard.submit_billing().unwrap();
        wizard
            .payment_form_mut()
            .unwrap()
            .set_transaction_id("UPI-1");

        let err = wizard.submit_order().await.unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "driverId"));
        assert_eq!(wizard.step(), WizardStep::Payment);
    }

    #[tokio::test]
    async fn test_distance_failure_keeps_previous_value() {
        let mut distance = MockDistanceService::new();
        distance
            .expect_distance_km()
            .returning(|_, _| Err(AppError::service("distance API down")));

        let state = state_with_overrides(None, Some(Arc::new(distance)));
        let mut wizard = wizard_at_billing(&state).await;

        // Percobaan pertama: gagal, jarak tetap 0 (belum pernah dihitung)
        let err = wizard.recalculate_distance().await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(wizard.billing_form().unwrap().distance, 0.0);

        // Isi manual lalu gagal lagi: nilai lama dipertahankan
        wizard.billing_form_mut().unwrap().distance = 900.0;
        assert!(wizard.recalculate_distance().await.is_err());
        assert_eq!(wizard.billing_form().unwrap().distance, 900.0);

        // Wizard tetap bisa lanjut
        assert!(wizard.submit_billing().is_ok());
    }

    #[tokio::test]
    async fn test_gateway_failure_preserves_draft_for_retry() {
        let mut gateway = MockOrderGateway::new();
        gateway
            .expect_create_order()
            .times(1)
            .returning(|_| Err(AppError::service("backend 500")));
        gateway.expect_create_order().times(1).returning(|req| {
            let now = chrono::Utc::now();
            Ok(Order {
                id: "order-app-1".to_string(),
                client: req.client,
                transport: req.transport,
                billing: req.billing,
                payment: req.payment,
                driver_id: req.driver_id,
                created_at: now,
                updated_at: now,
            })
        });

        let state = state_with_overrides(Some(Arc::new(gateway)), None);
        let mut wizard = wizard_at_billing(&state).await;
        wizard.recalculate_distance().await.unwrap();
        wizard.submit_billing().unwrap();

        wizard.refresh_available_drivers().await.unwrap();
        wizard.select_driver("driver-1").unwrap();
        wizard
            .payment_form_mut()
            .unwrap()
            .set_transaction_id("UPI-55");

        // Submit pertama gagal; draft tidak hilang
        let err = wizard.submit_order().await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(wizard.step(), WizardStep::Payment);
        assert_eq!(wizard.payment_form().unwrap().transaction_id, "UPI-55");

        // Submit ulang tanpa isi ulang data
        let order = wizard.submit_order().await.unwrap();
        assert_eq!(order.id, "order-app-1");
        assert_eq!(wizard.step(), WizardStep::Completed);
    }

    #[tokio::test]
    async fn test_select_unknown_driver_rejected() {
        let state = memory_state();
        let mut wizard = wizard_at_billing(&state).await;
        wizard.recalculate_distance().await.unwrap();
        wizard.submit_billing().unwrap();

        wizard.refresh_available_drivers().await.unwrap();
        let err = wizard.select_driver("driver-404").unwrap_err();
        assert!(matches!(err, AppError::MissingReference(_)));

        // driver-2 ada tapi sedang ON_TRIP, tidak masuk daftar available
        assert!(wizard.select_driver("driver-2").is_err());
    }

    #[tokio::test]
    async fn test_cash_transaction_id_only_for_cash_and_replaces() {
        let state = memory_state();
        let mut wizard = wizard_at_billing(&state).await;
        wizard.recalculate_distance().await.unwrap();
        wizard.submit_billing().unwrap();

        // Mode default UPI: generate ditolak
        assert!(wizard.generate_cash_transaction_id().await.is_err());

        wizard
            .payment_form_mut()
            .unwrap()
            .set_payment_mode(PaymentMode::Cash);

        let first = wizard.generate_cash_transaction_id().await.unwrap();
        assert_eq!(wizard.payment_form().unwrap().transaction_id, first);

        // Generate ulang menggantikan id sebelumnya
        let second = wizard.generate_cash_transaction_id().await.unwrap();
        assert_eq!(wizard.payment_form().unwrap().transaction_id, second);
    }

    #[tokio::test]
    async fn test_back_edges_and_reset() {
        let state = memory_state();
        let mut wizard = wizard_at_billing(&state).await;

        assert_eq!(wizard.step(), WizardStep::Billing);
        assert_eq!(wizard.back(), WizardStep::Transport);
        assert_eq!(wizard.back(), WizardStep::ClientSelection);
        assert_eq!(wizard.back(), WizardStep::ClientSelection);

        wizard.reset();
        assert_eq!(wizard.step(), WizardStep::ClientSelection);
        assert!(wizard.client().is_none());
        assert!(wizard.transport().is_none());
        assert!(wizard.order().is_none());
    }

    #[tokio::test]
    async fn test_actions_guarded_by_step() {
        let state = memory_state();
        let mut wizard = OrderWizard::new(&state);

        // Belum di step billing/payment
        assert!(wizard.recalculate_distance().await.is_err());
        assert!(wizard.submit_billing().is_err());
        assert!(wizard.submit_order().await.is_err());
        assert!(wizard
            .available_trucks(TransportSize::Medium)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_new_client_flow() {
        let state = memory_state();
        let mut wizard = OrderWizard::new(&state);

        wizard.begin_new_client().unwrap();
        assert_eq!(wizard.step(), WizardStep::ClientForm);

        let req = CreateClientRequest {
            company_name: "PQR Movers".to_string(),
            contact_email: "ops@pqrmovers.in".to_string(),
            contact_person_name: "Asha Rao".to_string(),
            contact_number: "9988776655".to_string(),
            alternate_contact: None,
            gst_number: Some("29ABCDE1234F1Z5".to_string()),
            addresses: vec![delhi_address()],
        };

        let client = wizard.submit_new_client(req).await.unwrap();
        assert_eq!(wizard.step(), WizardStep::Transport);
        assert!(client.addresses[0].id.is_some());
        assert_eq!(wizard.client().unwrap().company_name, "PQR Movers");
    }
}
