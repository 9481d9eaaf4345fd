// Modul domain untuk Order Flow
pub mod client;
pub mod fleet;
pub mod order;

// Export publik untuk semua models
pub use client::*;
pub use fleet::*;
pub use order::*;
