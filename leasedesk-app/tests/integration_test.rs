/// Integration tests for the LeaseDesk client
///
/// These tests drive the HTTP client and the screens against a real
/// (in-memory) tenant backend:
/// - Wire schema in both directions
/// - Non-success statuses surfaced as errors
/// - Dashboard and creation form over HTTP

mod common;

use chrono::{TimeZone, Utc};
use common::TestContext;
use leasedesk_app::alert::{Alert, RecordingPresenter};
use leasedesk_app::api::TenantApi;
use leasedesk_app::navigation::Route;
use leasedesk_app::screens::owner_dashboard::{DashboardBody, OwnerDashboard};
use leasedesk_app::screens::tenant_list::{SubmitOutcome, TenantListScreen};
use leasedesk_app::screens::ActionOutcome;
use leasedesk_app::shell::AppShell;
use leasedesk_shared::auth::{AuthUser, StaticAuthProvider};
use leasedesk_shared::models::tenant::{CreateTenant, PaymentStatus, TenantId};
use serde_json::json;
use std::sync::Arc;

fn payload(name: &str) -> CreateTenant {
    CreateTenant {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        address: "12 Elm St".to_string(),
        phone: "555-0100".to_string(),
        lease_start: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        lease_end: Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap(),
        payment_status: PaymentStatus::Unpaid,
        rent_per_month: 1200.0,
    }
}

#[tokio::test]
async fn test_list_tolerates_backend_shapes() {
    let ctx = TestContext::new().await.unwrap();
    ctx.backend.seed(json!({
        "id": 42,
        "Tenant Name": "Ann",
        "Email Address": "ann@example.com",
        "House Address": "12 Elm St",
        "Phone Number": "555-0100",
        "Lease Start Date": "2024-01-01T00:00:00Z",
        "Lease End Date": "2024-12-31T00:00:00Z"
    }));
    ctx.backend.seed(json!({
        "id": "abc",
        "Tenant Name": "Bob",
        "Email Address": "bob@example.com",
        "House Address": "3 Oak Ave",
        "Phone Number": "555-0101",
        "Lease Start Date": "2024-02-01T00:00:00Z",
        "Lease End Date": "2025-01-31T00:00:00Z",
        "Paid/Unpaid": "Paid",
        "Rent Per Month": 950
    }));

    let tenants = ctx.api.list_tenants().await.unwrap();

    assert_eq!(tenants.len(), 2);
    assert_eq!(tenants[0].id, TenantId::new("42"));
    assert_eq!(tenants[0].payment_status, None);
    assert_eq!(tenants[0].effective_payment_status(), PaymentStatus::Unpaid);
    assert_eq!(tenants[1].payment_status, Some(PaymentStatus::Paid));
    assert_eq!(tenants[1].rent_per_month, Some(950.0));
}

fn off_schema_records() -> Vec<serde_json::Value> {
    vec![
        json!({"id": 1, "Tenant Name": "Ann", "Paid/Unpaid": "Paid"}),
        json!({"id": 2, "Tenant Name": "Bob", "Paid/Unpaid": ""}),
        json!({
            "id": 3,
            "Tenant Name": "Cy",
            "Paid/Unpaid": null,
            "Lease Start Date": "2024-01-01"
        }),
        json!({"id": 4, "Tenant Name": "Di", "Paid/Unpaid": "Overdue", "Rent Per Month": "1200"}),
        json!({"id": 5, "Tenant Name": "Ed", "Lease End Date": "soon", "Rent Per Month": "n/a"}),
    ]
}

#[tokio::test]
async fn test_list_decodes_off_schema_records() {
    let ctx = TestContext::new().await.unwrap();
    for record in off_schema_records() {
        ctx.backend.seed(record);
    }

    let tenants = ctx.api.list_tenants().await.unwrap();

    assert_eq!(tenants.len(), 5);
    assert_eq!(tenants[0].payment_status, Some(PaymentStatus::Paid));
    assert_eq!(tenants[1].payment_status, None);
    assert_eq!(tenants[2].payment_status, None);
    assert_eq!(
        tenants[2].lease_start,
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(tenants[3].payment_status, None);
    assert_eq!(tenants[3].rent_per_month, Some(1200.0));
    assert_eq!(tenants[4].lease_end, None);
    assert_eq!(tenants[4].rent_per_month, None);
}

#[tokio::test]
async fn test_dashboard_lists_off_schema_records() {
    let ctx = TestContext::new().await.unwrap();
    for record in off_schema_records() {
        ctx.backend.seed(record);
    }
    let alerts = RecordingPresenter::new();
    let provider = Arc::new(StaticAuthProvider::signed_in(AuthUser::new("owner-1")));
    let shell = AppShell::new(
        provider,
        Arc::new(ctx.api.clone()),
        Arc::new(alerts.clone()),
        1200.0,
    );

    let mut dashboard = OwnerDashboard::new(&shell.context());
    assert_eq!(dashboard.mount().await, ActionOutcome::Done);
    assert!(alerts.alerts().is_empty());

    let DashboardBody::List(rows) = dashboard.view().body else {
        panic!("expected a tenant list");
    };
    let labels: Vec<_> = rows
        .iter()
        .map(|row| (row.name.as_str(), row.status_label()))
        .collect();
    assert_eq!(
        labels,
        vec![
            ("Ann", "Paid"),
            ("Bob", "Unpaid"),
            ("Cy", "Unpaid"),
            ("Di", "Unpaid"),
            ("Ed", "Unpaid"),
        ]
    );

    assert!(dashboard.show_details(&TenantId::new("3")));
    let details = dashboard.details().unwrap();
    assert_eq!(details.lease_start, "1/1/2024");
    assert!(dashboard.show_details(&TenantId::new("5")));
    assert_eq!(dashboard.details().unwrap().lease_end, "Not set");
}

#[tokio::test]
async fn test_create_sends_display_keys() {
    let ctx = TestContext::new().await.unwrap();

    ctx.api.create_tenant(&payload("Ann")).await.unwrap();

    let records = ctx.backend.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record["Tenant Name"], "Ann");
    assert_eq!(record["Email Address"], "ann@example.com");
    assert_eq!(record["Paid/Unpaid"], "Unpaid");
    assert_eq!(record["Rent Per Month"], 1200.0);
    assert_eq!(record["Lease Start Date"], "2024-01-01T00:00:00Z");
}

#[tokio::test]
async fn test_delete_by_id() {
    let ctx = TestContext::new().await.unwrap();
    ctx.backend.seed(json!({ "id": 7, "Tenant Name": "Ann" }));
    ctx.backend.seed(json!({ "id": "x/y", "Tenant Name": "Bob" }));

    ctx.api.delete_tenant(&TenantId::new("x/y")).await.unwrap();
    ctx.api.delete_tenant(&TenantId::new("7")).await.unwrap();
    assert!(ctx.backend.records().is_empty());

    let err = ctx.api.delete_tenant(&TenantId::new("7")).await.unwrap_err();
    assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let ctx = TestContext::new().await.unwrap();
    ctx.backend.set_failing(true);

    let err = ctx.api.list_tenants().await.unwrap_err();
    assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
    assert!(err.to_string().contains("backend unavailable"));

    assert!(ctx.api.create_tenant(&payload("Ann")).await.is_err());
    assert!(ctx.backend.records().is_empty());
}

#[tokio::test]
async fn test_concurrent_creates() {
    let ctx = TestContext::new().await.unwrap();
    let names = ["Ann", "Bob", "Cy", "Dee"];

    let results = futures::future::join_all(
        names.iter().map(|name| {
            let tenant = payload(name);
            let api = &ctx.api;
            async move { api.create_tenant(&tenant).await }
        }),
    )
    .await;

    assert!(results.iter().all(Result::is_ok));
    let tenants = ctx.api.list_tenants().await.unwrap();
    assert_eq!(tenants.len(), names.len());
}

#[tokio::test]
async fn test_dashboard_and_form_over_http() {
    let ctx = TestContext::new().await.unwrap();
    let alerts = RecordingPresenter::new();
    let provider = Arc::new(StaticAuthProvider::signed_in(AuthUser::new("owner-1")));
    let mut shell = AppShell::new(
        provider,
        Arc::new(ctx.api.clone()),
        Arc::new(alerts.clone()),
        1200.0,
    );
    shell.mount();
    shell.navigator().navigate(Route::OwnerDashboard).unwrap();

    let mut dashboard = OwnerDashboard::new(&shell.context());
    assert_eq!(dashboard.mount().await, ActionOutcome::Done);
    assert_eq!(dashboard.view().body, DashboardBody::Empty);

    dashboard.add_tenant().unwrap();
    let mut form = TenantListScreen::new(&shell.context());
    form.set_name("Ann");
    form.set_email("ann@example.com");
    form.set_address("12 Elm St");
    form.set_phone("555-0100");
    form.confirm_end(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());

    assert_eq!(form.submit().await, SubmitOutcome::Created);
    form.unmount();
    assert_eq!(shell.navigator().current(), Route::OwnerDashboard);

    assert!(dashboard.on_focus().await);
    let DashboardBody::List(rows) = dashboard.view().body else {
        panic!("expected a tenant list");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Ann");
    assert_eq!(rows[0].status_label(), "Unpaid");

    let id = rows[0].id.clone();
    assert_eq!(dashboard.delete_tenant(&id).await, ActionOutcome::Done);
    assert!(ctx.backend.records().is_empty());
    assert_eq!(
        alerts.alerts(),
        vec![
            Alert::success("Tenant added successfully!"),
            Alert::success("Tenant deleted successfully"),
        ]
    );
}

#[tokio::test]
async fn test_unreachable_backend_alerts() {
    let ctx = TestContext::new().await.unwrap();
    ctx.backend.set_failing(true);
    let alerts = RecordingPresenter::new();
    let provider = Arc::new(StaticAuthProvider::signed_in(AuthUser::new("owner-1")));
    let shell = AppShell::new(
        provider,
        Arc::new(ctx.api.clone()),
        Arc::new(alerts.clone()),
        1200.0,
    );

    let mut dashboard = OwnerDashboard::new(&shell.context());
    assert_eq!(dashboard.mount().await, ActionOutcome::Failed);
    assert_eq!(alerts.last(), Some(Alert::error("Failed to fetch tenants.")));
    assert!(ctx.base_url.starts_with("http://127.0.0.1:"));
}
