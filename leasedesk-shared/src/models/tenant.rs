/// Tenant model and wire schema
///
/// This module provides the typed Tenant record exchanged with the tenant
/// backend. The backend speaks display-oriented JSON keys; those names are
/// mapped here, at the serde boundary, and nowhere else.
///
/// # Wire Format
///
/// ```json
/// {
///   "id": "7",
///   "Tenant Name": "Jane Doe",
///   "Email Address": "jane@example.com",
///   "House Address": "12 Elm St, Unit 3",
///   "Phone Number": "555-0100",
///   "Lease Start Date": "2024-01-01T00:00:00Z",
///   "Lease End Date": "2024-12-31T00:00:00Z",
///   "Paid/Unpaid": "Unpaid",
///   "Rent Per Month": 1200
/// }
/// ```
///
/// # Example
///
/// ```
/// use leasedesk_shared::models::tenant::{TenantDraft, PaymentStatus, DEFAULT_RENT_PER_MONTH};
/// use chrono::{TimeZone, Utc};
///
/// let draft = TenantDraft {
///     name: "Jane Doe".to_string(),
///     email: "jane@example.com".to_string(),
///     address: "12 Elm St".to_string(),
///     phone: "555-0100".to_string(),
///     lease_start: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
///     lease_end: Some(Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap()),
/// };
///
/// let payload = draft.into_create(DEFAULT_RENT_PER_MONTH).unwrap();
/// assert_eq!(payload.payment_status, PaymentStatus::Unpaid);
/// ```

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use validator::{Validate, ValidationErrors};

/// Monthly rent applied to newly created tenants unless configured otherwise
pub const DEFAULT_RENT_PER_MONTH: f64 = 1200.0;

/// Payment status of a tenant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Rent for the current period has been received
    #[serde(rename = "Paid", alias = "paid")]
    Paid,

    /// Rent is outstanding (the state every new tenant starts in)
    #[default]
    #[serde(rename = "Unpaid", alias = "unpaid")]
    Unpaid,
}

impl PaymentStatus {
    /// Converts the status to its wire/display string
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Unpaid => "Unpaid",
        }
    }

    /// Parses a status string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "paid" => Some(PaymentStatus::Paid),
            "unpaid" => Some(PaymentStatus::Unpaid),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque tenant identifier assigned by the backend
///
/// Backends hand these out either as JSON strings or as numbers; both are
/// accepted and kept as text so that equality and URL building are uniform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Wraps a raw identifier
    pub fn new(id: impl Into<String>) -> Self {
        TenantId(id.into())
    }

    /// Returns the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TenantId {
    fn from(id: &str) -> Self {
        TenantId::new(id)
    }
}

impl From<String> for TenantId {
    fn from(id: String) -> Self {
        TenantId(id)
    }
}

impl<'de> Deserialize<'de> for TenantId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => TenantId(s),
            RawId::Number(n) => TenantId(n.to_string()),
        })
    }
}

/// Tenant record as returned by the backend
///
/// Every field except the id decodes leniently. Missing or null text is
/// empty. A lease date, payment status or rent that is missing, empty or
/// unparseable decodes as `None`. A single off-schema record therefore never
/// fails a whole list fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    /// Backend-assigned identifier
    pub id: TenantId,

    /// Tenant's full name
    #[serde(rename = "Tenant Name", default, deserialize_with = "lenient_text")]
    pub name: String,

    /// Contact email address
    #[serde(rename = "Email Address", default, deserialize_with = "lenient_text")]
    pub email: String,

    /// House or unit address
    #[serde(rename = "House Address", default, deserialize_with = "lenient_text")]
    pub address: String,

    /// Contact phone number
    #[serde(rename = "Phone Number", default, deserialize_with = "lenient_text")]
    pub phone: String,

    /// When the lease starts
    #[serde(
        rename = "Lease Start Date",
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub lease_start: Option<DateTime<Utc>>,

    /// When the lease ends
    #[serde(
        rename = "Lease End Date",
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub lease_end: Option<DateTime<Utc>>,

    /// Payment status, absent on records created outside this client
    #[serde(
        rename = "Paid/Unpaid",
        default,
        deserialize_with = "lenient_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_status: Option<PaymentStatus>,

    /// Monthly rent amount
    #[serde(
        rename = "Rent Per Month",
        default,
        deserialize_with = "lenient_rent",
        skip_serializing_if = "Option::is_none"
    )]
    pub rent_per_month: Option<f64>,
}

impl Tenant {
    /// Payment status to display; records without one count as unpaid
    pub fn effective_payment_status(&self) -> PaymentStatus {
        self.payment_status.unwrap_or_default()
    }
}

/// Parses a lease date given as RFC 3339 or as `YYYY-MM-DD` (midnight UTC)
pub fn parse_lease_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => text,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(raw)) => parse_lease_date(&raw),
        _ => None,
    })
}

fn lenient_status<'de, D>(deserializer: D) -> Result<Option<PaymentStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(raw)) => PaymentStatus::from_str(raw.trim()),
        _ => None,
    })
}

fn lenient_rent<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let rent = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(raw)) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(rent.filter(|amount| amount.is_finite()))
}

/// Creation payload sent to `POST /tenants`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTenant {
    #[serde(rename = "House Address")]
    pub address: String,

    #[serde(rename = "Tenant Name")]
    pub name: String,

    #[serde(rename = "Email Address")]
    pub email: String,

    #[serde(rename = "Phone Number")]
    pub phone: String,

    #[serde(rename = "Lease Start Date")]
    pub lease_start: DateTime<Utc>,

    #[serde(rename = "Lease End Date")]
    pub lease_end: DateTime<Utc>,

    /// Always `Unpaid` for new tenants
    #[serde(rename = "Paid/Unpaid")]
    pub payment_status: PaymentStatus,

    #[serde(rename = "Rent Per Month")]
    pub rent_per_month: f64,
}

/// Tenant fields as entered on the creation form
///
/// Only presence is checked: every text field must be non-empty and both
/// lease dates must be set. Whitespace counts as content, email format is
/// not checked, and the lease end may precede the lease start.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct TenantDraft {
    #[validate(length(min = 1, message = "Tenant name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Email address is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "House address is required"))]
    pub address: String,

    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,

    #[validate(required(message = "Lease start date is required"))]
    pub lease_start: Option<DateTime<Utc>>,

    #[validate(required(message = "Lease end date is required"))]
    pub lease_end: Option<DateTime<Utc>>,
}

impl TenantDraft {
    /// Validates the draft and builds the creation payload
    ///
    /// The payload always carries [`PaymentStatus::Unpaid`] and the given rent.
    ///
    /// # Errors
    ///
    /// Returns the collected validation errors if any field is missing.
    pub fn into_create(self, rent_per_month: f64) -> Result<CreateTenant, ValidationErrors> {
        self.validate()?;

        // validate() guarantees both dates are present
        let (Some(lease_start), Some(lease_end)) = (self.lease_start, self.lease_end) else {
            return Err(ValidationErrors::new());
        };

        Ok(CreateTenant {
            address: self.address,
            name: self.name,
            email: self.email,
            phone: self.phone,
            lease_start,
            lease_end,
            payment_status: PaymentStatus::Unpaid,
            rent_per_month,
        })
    }
}
