use chrono::{DateTime, Utc};

use agrilink_domain::equipment::EquipmentAvailability;
use agrilink_domain::id::{ApplicationId, EquipmentId, JobId, OtpId, UserId};
use agrilink_domain::job::JobUrgency;
use agrilink_domain::user::UserRole;

/// OTP length in digits.
pub const OTP_LEN: usize = 6;

/// OTP time-to-live in seconds (10 minutes).
pub const OTP_TTL_SECS: i64 = 600;

/// Registered marketplace account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Canonical form, see [`normalize_phone`]. Unique across users.
    pub phone: String,
    pub role: UserRole,
    pub location: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    /// Farmers only.
    pub farm_size: Option<i32>,
    /// Rental providers only.
    pub vehicle_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One-time passcode issued to a phone number.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub id: OtpId,
    pub phone: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OtpRecord {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Job posted by a farmer.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub farmer_id: UserId,
    /// Snapshot of the farmer's name at posting time; not re-synced on rename.
    pub farm_name: String,
    pub job_type: String,
    pub crop_type: String,
    pub location: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub wage: String,
    pub duration: String,
    pub start_date: String,
    pub description: String,
    pub urgency: JobUrgency,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a [`Job`]. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct JobPatch {
    pub job_type: Option<String>,
    pub crop_type: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub wage: Option<String>,
    pub duration: Option<String>,
    pub start_date: Option<String>,
    pub description: Option<String>,
    pub urgency: Option<JobUrgency>,
}

impl JobPatch {
    /// Required text fields present in this patch, by wire name.
    pub fn required_text(&self) -> [(&'static str, Option<&str>); 7] {
        [
            ("jobType", self.job_type.as_deref()),
            ("cropType", self.crop_type.as_deref()),
            ("location", self.location.as_deref()),
            ("wage", self.wage.as_deref()),
            ("duration", self.duration.as_deref()),
            ("startDate", self.start_date.as_deref()),
            ("description", self.description.as_deref()),
        ]
    }

    pub fn apply(self, job: &mut Job) {
        merge(&mut job.job_type, self.job_type);
        merge(&mut job.crop_type, self.crop_type);
        merge(&mut job.location, self.location);
        merge_opt(&mut job.latitude, self.latitude);
        merge_opt(&mut job.longitude, self.longitude);
        merge(&mut job.wage, self.wage);
        merge(&mut job.duration, self.duration);
        merge(&mut job.start_date, self.start_date);
        merge(&mut job.description, self.description);
        merge(&mut job.urgency, self.urgency);
    }
}

/// Equipment listed by a rental provider.
#[derive(Debug, Clone)]
pub struct Equipment {
    pub id: EquipmentId,
    pub owner_id: UserId,
    pub name: String,
    pub equipment_type: String,
    pub location: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub price_per_day: String,
    pub price_per_week: String,
    pub availability: EquipmentAvailability,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Partial update for an [`Equipment`]. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct EquipmentPatch {
    pub name: Option<String>,
    pub equipment_type: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub price_per_day: Option<String>,
    pub price_per_week: Option<String>,
    pub availability: Option<EquipmentAvailability>,
    pub description: Option<String>,
}

impl EquipmentPatch {
    /// Required text fields present in this patch, by wire name.
    pub fn required_text(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("name", self.name.as_deref()),
            ("type", self.equipment_type.as_deref()),
            ("location", self.location.as_deref()),
            ("pricePerDay", self.price_per_day.as_deref()),
            ("pricePerWeek", self.price_per_week.as_deref()),
            ("description", self.description.as_deref()),
        ]
    }

    pub fn apply(self, equipment: &mut Equipment) {
        merge(&mut equipment.name, self.name);
        merge(&mut equipment.equipment_type, self.equipment_type);
        merge(&mut equipment.location, self.location);
        merge_opt(&mut equipment.latitude, self.latitude);
        merge_opt(&mut equipment.longitude, self.longitude);
        merge(&mut equipment.price_per_day, self.price_per_day);
        merge(&mut equipment.price_per_week, self.price_per_week);
        merge(&mut equipment.availability, self.availability);
        merge(&mut equipment.description, self.description);
    }
}

fn merge<T>(field: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *field = v;
    }
}

fn merge_opt<T>(field: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *field = value;
    }
}

/// A worker's application to a job.
#[derive(Debug, Clone)]
pub struct JobApplication {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub worker_id: UserId,
    pub applied_at: DateTime<Utc>,
}

/// An established session: opaque token bound to a user.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
}

/// Caller identity for one request. Passed explicitly into every authorization check.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub session: Option<Session>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self { session: None }
    }

    pub fn bound(token: impl Into<String>, user_id: UserId) -> Self {
        Self {
            session: Some(Session {
                token: token.into(),
                user_id,
            }),
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.session.as_ref().map(|s| s.user_id)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }
}

/// Canonicalize a phone number to an optional leading `+` followed by digits.
///
/// Spaces and hyphens are ignored; 6 to 15 digits are accepted.
/// Returns `None` for anything else.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let (plus, rest) = match raw.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let mut digits = String::with_capacity(rest.len() + 1);
    if plus {
        digits.push('+');
    }
    for c in rest.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' => {}
            _ => return None,
        }
    }
    let count = digits.len() - usize::from(plus);
    (6..=15).contains(&count).then_some(digits)
}

/// True when the string is empty or only whitespace.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
