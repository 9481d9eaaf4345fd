// Demo binary untuk ARMADA LINK Order Flow
// Menjalankan satu flow pembuatan order end-to-end terhadap data source
// yang dikonfigurasi (default: in-memory)
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use order_flow::domain::{PaymentMode, PaymentType};
use order_flow::wizard::{AddressChoice, OrderWizard, TransportForm};
use order_flow::{AppError, AppResult, AppState};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load environment variables dari .env file
    match dotenv() {
        Ok(path) => println!("✅ Environment loaded dari: {:?}", path),
        Err(e) => println!("⚠️  Tidak bisa load .env: {} (menggunakan system env)", e),
    }

    // Initialize tracing subscriber untuk structured logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_flow=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚚 Memulai ARMADA LINK - Order Flow");

    // Load konfigurasi & state dari environment
    let state = AppState::from_env()?;
    tracing::info!("✅ Konfigurasi berhasil dimuat");
    tracing::info!("🔧 Environment: {}", state.config.environment);
    tracing::info!("🗄️  Data source: {}", state.config.data_source.as_str());
    tracing::info!("🌐 API base URL: {}", state.config.api_base_url);

    run_demo_flow(&state).await?;

    tracing::info!("✅ Demo flow selesai");
    Ok(())
}

// Jalankan wizard sekali: pilih client pertama, rute dari alamat tersimpan
// ke alamat baru, billing dengan rate default, pembayaran sebagian
async fn run_demo_flow(state: &AppState) -> AppResult<()> {
    let mut wizard = OrderWizard::new(state);

    // Step 1: pilih client
    let clients = wizard.list_clients().await?;
    tracing::info!("📇 {} client tersedia", clients.len());
    let client = clients
        .into_iter()
        .next()
        .ok_or_else(|| AppError::not_found("Tidak ada client di directory"))?;
    let source_address = client
        .addresses
        .first()
        .cloned()
        .ok_or_else(|| AppError::not_found("Client tidak punya alamat tersimpan"))?;
    tracing::info!("🏢 Client: {}", client.company_name);
    wizard.select_client(client)?;

    // Step 2: transport, alamat asal dari alamat tersimpan client
    let source_id = source_address
        .id
        .ok_or_else(|| AppError::internal("Alamat tersimpan tanpa id"))?;
    let destination = order_flow::domain::Address {
        id: None,
        address_line1: "456 Central Avenue".to_string(),
        address_line2: None,
        address_line3: None,
        city: "Delhi".to_string(),
        state: "Delhi".to_string(),
        pin_code: "110001".to_string(),
        country: "India".to_string(),
        address_type: order_flow::domain::AddressType::Transport,
    };

    let mut transport_form = TransportForm::new(
        AddressChoice::Existing(source_id),
        AddressChoice::New(destination),
    );

    let trucks = wizard.available_trucks(transport_form.size).await?;
    tracing::info!("🚛 {} truck available untuk ukuran {}", trucks.len(), transport_form.size);
    transport_form.truck_id = trucks.first().map(|t| t.id.clone());
    wizard.submit_transport(transport_form)?;

    // Step 3: billing, jarak dari distance service
    match wizard.recalculate_distance().await {
        Ok(km) => tracing::info!("📏 Jarak terhitung: {} km", km),
        Err(e) => tracing::warn!("📏 Hitung jarak gagal (pakai nilai lama): {}", e),
    }
    let billing = wizard.submit_billing()?;
    tracing::info!(
        "🧾 Subtotal ₹{:.2} + GST ₹{:.2} = Total ₹{:.2}",
        billing.subtotal,
        billing.gst_amount,
        billing.total_amount
    );

    // Step 4: pembayaran sebagian + assignment driver
    let drivers = wizard.refresh_available_drivers().await?;
    let driver = drivers
        .first()
        .ok_or_else(|| AppError::not_found("Tidak ada driver available"))?
        .clone();
    wizard.select_driver(&driver.id)?;
    tracing::info!("🧑 Driver: {}", driver.name);

    {
        let form = wizard.payment_form_mut()?;
        form.set_payment_type(PaymentType::Partial);
        form.set_amount((billing.total_amount / 2.0).floor())?;
        form.set_payment_mode(PaymentMode::Cash);
        form.set_next_payment_date(Some(
            chrono::Utc::now().date_naive() + chrono::Duration::days(30),
        ));
    }
    let transaction_id = wizard.generate_cash_transaction_id().await?;
    tracing::info!("💳 Transaction id: {}", transaction_id);

    // Submit final
    let order = wizard.submit_order().await?;
    println!();
    println!("=== ORDER SUMMARY ===");
    println!("Order ID     : {}", order.id);
    println!("Client       : {}", order.client.company_name);
    println!(
        "Rute         : {} -> {} ({} km)",
        order.transport.source.city,
        order.transport.destination.city,
        order.transport.distance.unwrap_or(0.0)
    );
    println!("Truck        : {}", order.transport.truck_id.as_deref().unwrap_or("-"));
    println!("Total        : ₹{:.2}", order.billing.total_amount);
    println!(
        "Dibayar      : ₹{:.2} ({})",
        order.payment.amount,
        order.payment.payment_type.as_str()
    );
    println!(
        "Sisa         : ₹{:.2}",
        order.payment.remaining_amount.unwrap_or(0.0)
    );
    println!("Driver       : {}", order.driver_id);
    println!("Dibuat pada  : {}", order.created_at);

    Ok(())
}
