use chrono::NaiveDate;

use crate::domain::{Payment, PaymentMode, PaymentType};
use crate::error::{AppError, AppResult};
use shared::utils::validation;

// Form step payment + assignment driver.
// State machine kecil: COMPLETE mengunci amount ke total billing,
// PARTIAL membuka amount dan menghitung sisa.
#[derive(Debug, Clone)]
pub struct PaymentForm {
    total_amount: f64,
    pub payment_type: PaymentType,
    pub payment_mode: PaymentMode,
    amount: f64,
    pub transaction_id: String,
    pub next_payment_date: Option<NaiveDate>,
    remaining_amount: f64,
    pub driver_id: Option<String>,
}

impl PaymentForm {
    // Default seperti form aslinya: pembayaran lunas via UPI
    pub fn new(total_amount: f64) -> Self {
        Self {
            total_amount,
            payment_type: PaymentType::Complete,
            payment_mode: PaymentMode::Upi,
            amount: total_amount,
            transaction_id: String::new(),
            next_payment_date: None,
            remaining_amount: 0.0,
            driver_id: None,
        }
    }

    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn remaining_amount(&self) -> f64 {
        self.remaining_amount
    }

    // Ganti tipe pembayaran.
    // COMPLETE: amount dipaksa = total, sisa 0, next payment date dihapus.
    // PARTIAL: amount bisa diedit, sisa dihitung ulang.
    pub fn set_payment_type(&mut self, payment_type: PaymentType) {
        self.payment_type = payment_type;

        match payment_type {
            PaymentType::Complete => {
                self.amount = self.total_amount;
                self.remaining_amount = 0.0;
                self.next_payment_date = None;
            }
            PaymentType::Partial => {
                self.recompute_remaining();
            }
        }
    }

    // Edit amount hanya berlaku untuk pembayaran PARTIAL
    pub fn set_amount(&mut self, amount: f64) -> AppResult {
        if self.payment_type == PaymentType::Complete {
            return Err(AppError::validation(
                "amount",
                "Amount mengikuti total billing untuk pembayaran lunas",
            ));
        }

        self.amount = amount;
        self.recompute_remaining();
        Ok(())
    }

    pub fn set_payment_mode(&mut self, mode: PaymentMode) {
        self.payment_mode = mode;
    }

    pub fn set_transaction_id(&mut self, transaction_id: impl Into<String>) {
        self.transaction_id = transaction_id.into();
    }

    pub fn set_next_payment_date(&mut self, date: Option<NaiveDate>) {
        self.next_payment_date = date;
    }

    // Sisa tagihan tidak pernah negatif
    fn recompute_remaining(&mut self) {
        self.remaining_amount = (self.total_amount - self.amount).max(0.0);
    }

    // Validasi sebelum submit order
    pub fn validate(&self) -> AppResult {
        if self.amount < 1.0 {
            return Err(AppError::validation("amount", "Amount minimal 1"));
        }

        if self.transaction_id.trim().is_empty() {
            return Err(AppError::validation(
                "transactionId",
                format!("{} harus diisi", self.payment_mode.transaction_label()),
            ));
        }

        if self.payment_type == PaymentType::Partial && self.remaining_amount > 0.0 {
            match self.next_payment_date {
                None => {
                    return Err(AppError::validation(
                        "nextPaymentDate",
                        "Tanggal pembayaran berikutnya harus diisi untuk pembayaran sebagian",
                    ));
                }
                Some(date) if !validation::is_today_or_future(date) => {
                    return Err(AppError::validation(
                        "nextPaymentDate",
                        "Tanggal pembayaran berikutnya tidak boleh di masa lalu",
                    ));
                }
                Some(_) => {}
            }
        }

        if self.driver_id.is_none() {
            return Err(AppError::validation("driverId", "Driver harus dipilih"));
        }

        Ok(())
    }

    // Bentuk record Payment final untuk order
    pub fn to_payment(&self) -> Payment {
        Payment {
            amount: self.amount,
            payment_type: self.payment_type,
            payment_mode: self.payment_mode,
            transaction_id: self.transaction_id.clone(),
            next_payment_date: self.next_payment_date,
            remaining_amount: Some(self.remaining_amount),
        }
    }
}
