use crate::domain::Billing;
use crate::error::{AppError, AppResult};

// Form step billing. Subtotal/GST/total tidak disimpan di form:
// selalu diturunkan ulang dari tiga input ini lewat compute().
#[derive(Debug, Clone, PartialEq)]
pub struct BillingForm {
    pub distance: f64,
    pub rate_per_km: f64,
    pub gst_rate: f64,
}

impl BillingForm {
    pub fn new(distance: f64, rate_per_km: f64, gst_rate: f64) -> Self {
        Self {
            distance,
            rate_per_km,
            gst_rate,
        }
    }

    // Billing hasil perhitungan saat ini (untuk preview maupun snapshot)
    pub fn compute(&self) -> Billing {
        Billing::compute(self.distance, self.rate_per_km, self.gst_rate)
    }

    // Constraint sebelum lanjut ke step payment
    pub fn validate(&self) -> AppResult {
        if self.distance < 1.0 {
            return Err(AppError::validation(
                "distance",
                "Jarak minimal 1 km",
            ));
        }
        if self.rate_per_km < 1.0 {
            return Err(AppError::validation(
                "ratePerKm",
                "Rate per km minimal 1",
            ));
        }
        if !(0.0..=100.0).contains(&self.gst_rate) {
            return Err(AppError::validation(
                "gstRate",
                "GST rate harus antara 0 dan 100",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_matches_manual() {
        let form = BillingForm::new(1400.0, 15.0, 18.0);
        let billing = form.compute();

        assert_eq!(billing.subtotal, 21000.0);
        assert_eq!(billing.gst_amount, 3780.0);
        assert_eq!(billing.total_amount, 24780.0);
    }

    #[test]
    fn test_recompute_after_rate_change() {
        let mut form = BillingForm::new(350.0, 15.0, 18.0);
        form.rate_per_km = 20.0;

        let billing = form.compute();
        assert_eq!(billing.subtotal, 7000.0);
        assert_eq!(billing.total_amount, 8260.0);
    }

    #[test]
    fn test_validate_bounds() {
        assert!(BillingForm::new(1.0, 1.0, 0.0).validate().is_ok());
        assert!(BillingForm::new(1.0, 1.0, 100.0).validate().is_ok());

        let err = BillingForm::new(0.0, 15.0, 18.0).validate().unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "distance"));

        let err = BillingForm::new(10.0, 0.5, 18.0).validate().unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "ratePerKm"));

        let err = BillingForm::new(10.0, 15.0, 101.0).validate().unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "gstRate"));

        let err = BillingForm::new(10.0, 15.0, -1.0).validate().unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "gstRate"));
    }
}
