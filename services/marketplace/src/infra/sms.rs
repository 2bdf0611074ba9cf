use tracing::info;

use crate::domain::repository::OtpDelivery;
use crate::error::MarketError;

/// Development delivery channel: writes the code to the log instead of sending an SMS.
#[derive(Clone, Default)]
pub struct LogOtpDelivery;

impl OtpDelivery for LogOtpDelivery {
    async fn deliver(&self, phone: &str, code: &str) -> Result<(), MarketError> {
        info!(phone, code, "otp issued (log delivery)");
        Ok(())
    }
}
