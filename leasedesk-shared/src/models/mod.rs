/// Data models shared by the LeaseDesk client
///
/// # Models
///
/// - `tenant`: Tenant records, the creation payload and the form draft
///
/// # Example
///
/// ```
/// use leasedesk_shared::models::tenant::{Tenant, PaymentStatus};
///
/// let json = r#"{"id": 1, "Tenant Name": "Jane Doe"}"#;
/// let tenant: Tenant = serde_json::from_str(json).unwrap();
/// assert_eq!(tenant.effective_payment_status(), PaymentStatus::Unpaid);
/// ```

pub mod tenant;
