use chrono::{DateTime, Duration, Utc};
use rand::RngExt;
use tracing::info;

use agrilink_domain::id::OtpId;

use crate::domain::repository::{OtpDelivery, OtpRepository};
use crate::domain::types::{OTP_TTL_SECS, OtpRecord, normalize_phone};
use crate::error::MarketError;

/// Source of OTP codes. Swapped for a fixed code in tests.
pub trait OtpGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform 6-digit numeric codes in `100000..=999999`.
#[derive(Clone, Copy, Default)]
pub struct RandomOtpGenerator;

impl OtpGenerator for RandomOtpGenerator {
    fn generate(&self) -> String {
        rand::rng().random_range(100_000..=999_999u32).to_string()
    }
}

pub struct SendOtpInput {
    pub phone: String,
}

#[derive(Debug)]
pub struct SendOtpOutput {
    pub phone: String,
    pub expires_at: DateTime<Utc>,
}

pub struct SendOtpUseCase<O, D, G>
where
    O: OtpRepository,
    D: OtpDelivery,
    G: OtpGenerator,
{
    pub otps: O,
    pub delivery: D,
    pub generator: G,
}

impl<O, D, G> SendOtpUseCase<O, D, G>
where
    O: OtpRepository,
    D: OtpDelivery,
    G: OtpGenerator,
{
    /// Issue a code for any well-formed phone, registered or not.
    /// Earlier codes for the same phone are left in place.
    pub async fn execute(&self, input: SendOtpInput) -> Result<SendOtpOutput, MarketError> {
        let phone = normalize_phone(&input.phone).ok_or(MarketError::Validation("phone"))?;

        let now = Utc::now();
        let record = OtpRecord {
            id: OtpId::new(),
            phone: phone.clone(),
            code: self.generator.generate(),
            expires_at: now + Duration::seconds(OTP_TTL_SECS),
            created_at: now,
        };
        self.otps.create(&record).await?;
        self.delivery.deliver(&record.phone, &record.code).await?;

        info!(otp_id = %record.id, "otp created");
        Ok(SendOtpOutput {
            phone,
            expires_at: record.expires_at,
        })
    }
}

/// Match `code` against the newest active OTP for `phone`.
///
/// An older unexpired code only matches once every newer one has been consumed.
pub(crate) async fn find_matching<O: OtpRepository>(
    otps: &O,
    phone: &str,
    code: &str,
) -> Result<OtpRecord, MarketError> {
    let record = otps
        .find_latest_active(phone, Utc::now())
        .await?
        .ok_or(MarketError::InvalidOrExpiredCode)?;
    if record.code != code.trim() {
        return Err(MarketError::InvalidOrExpiredCode);
    }
    Ok(record)
}

/// Delete a matched OTP. Losing a race to a concurrent verification counts as a bad code.
pub(crate) async fn consume<O: OtpRepository>(
    otps: &O,
    record: &OtpRecord,
) -> Result<(), MarketError> {
    if !otps.delete(record.id).await? {
        return Err(MarketError::InvalidOrExpiredCode);
    }
    Ok(())
}
