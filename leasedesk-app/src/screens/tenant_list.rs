/// Tenant creation form
///
/// Mounted at the `TenantList` route. Collects name, email, address, phone
/// and the two lease dates, then submits a creation request.
///
/// # Submit Flow
///
/// ```text
/// submit()
///   ├─> any field missing?  ── yes ──> alert "All fields must be filled!"  (nothing sent)
///   ├─> POST /tenants  (status "Unpaid", configured rent)
///   ├─> ok:        alert Success ─> publish Created ─> navigate back
///   ├─> failed:    log detail ─> alert Error  (form keeps its data)
///   └─> unmounted: nothing
/// ```

use crate::alert::Alert;
use crate::error::ValidationErrorDetail;
use crate::scope::{ScopeGuard, ScreenScope};
use crate::screens::ScreenContext;
use chrono::{DateTime, Utc};
use leasedesk_shared::events::TenantEvent;
use leasedesk_shared::models::tenant::TenantDraft;

/// Alert title shown when a required field is empty
pub const VALIDATION_ALERT: &str = "All fields must be filled!";

/// Label shown on the end date button before a date is picked
pub const NO_END_DATE_LABEL: &str = "Select End Date";

/// Visibility of one modal date picker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatePicker {
    visible: bool,
}

impl DatePicker {
    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Result of [`TenantListScreen::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Required fields were missing; nothing was sent
    Invalid(Vec<ValidationErrorDetail>),

    /// The tenant was created and the screen navigated back
    Created,

    /// The backend rejected the request or was unreachable
    Failed,

    /// The screen unmounted while the request was in flight
    Cancelled,
}

/// Tenant creation form state
pub struct TenantListScreen {
    ctx: ScreenContext,
    scope: ScreenScope,
    draft: TenantDraft,
    start_picker: DatePicker,
    end_picker: DatePicker,
}

impl TenantListScreen {
    /// Creates the form with the lease start set to now and everything else empty
    pub fn new(ctx: &ScreenContext) -> Self {
        TenantListScreen {
            ctx: ctx.clone(),
            scope: ctx.new_scope(),
            draft: TenantDraft {
                lease_start: Some(Utc::now()),
                ..TenantDraft::default()
            },
            start_picker: DatePicker::default(),
            end_picker: DatePicker::default(),
        }
    }

    /// Current form contents
    pub fn draft(&self) -> &TenantDraft {
        &self.draft
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.draft.email = email.into();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.draft.address = address.into();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.draft.phone = phone.into();
    }

    pub fn show_start_picker(&mut self) {
        self.start_picker.show();
    }

    /// Closes the start picker without changing the date
    pub fn hide_start_picker(&mut self) {
        self.start_picker.hide();
    }

    /// Stores the picked lease start and closes the picker
    pub fn confirm_start(&mut self, date: DateTime<Utc>) {
        self.draft.lease_start = Some(date);
        self.start_picker.hide();
    }

    pub fn show_end_picker(&mut self) {
        self.end_picker.show();
    }

    /// Closes the end picker without changing the date
    pub fn hide_end_picker(&mut self) {
        self.end_picker.hide();
    }

    /// Stores the picked lease end and closes the picker
    ///
    /// An end date before the start date is accepted.
    pub fn confirm_end(&mut self, date: DateTime<Utc>) {
        self.draft.lease_end = Some(date);
        self.end_picker.hide();
    }

    pub fn start_picker(&self) -> DatePicker {
        self.start_picker
    }

    pub fn end_picker(&self) -> DatePicker {
        self.end_picker
    }

    /// Date the start picker opens on
    pub fn start_picker_date(&self) -> DateTime<Utc> {
        self.draft.lease_start.unwrap_or_else(Utc::now)
    }

    /// Date the end picker opens on
    pub fn end_picker_date(&self) -> DateTime<Utc> {
        self.draft.lease_end.unwrap_or_else(Utc::now)
    }

    /// Text on the start date button, e.g. `Mon Jan 01 2024`
    pub fn lease_start_label(&self) -> String {
        self.draft
            .lease_start
            .map(date_button_label)
            .unwrap_or_default()
    }

    /// Text on the end date button
    pub fn lease_end_label(&self) -> String {
        self.draft
            .lease_end
            .map(date_button_label)
            .unwrap_or_else(|| NO_END_DATE_LABEL.to_string())
    }

    /// Handle that unmounts this screen's requests from elsewhere
    pub fn lifetime(&self) -> ScopeGuard {
        self.scope.guard()
    }

    /// Validates the form and submits a creation request
    pub async fn submit(&mut self) -> SubmitOutcome {
        let payload = match self.draft.clone().into_create(self.ctx.rent_per_month) {
            Ok(payload) => payload,
            Err(errors) => {
                let details = ValidationErrorDetail::from_errors(&errors);
                tracing::debug!(missing = details.len(), "tenant form incomplete");
                self.ctx.alerts.present(Alert::new(VALIDATION_ALERT));
                return SubmitOutcome::Invalid(details);
            }
        };

        let result = self.scope.run(self.ctx.api.create_tenant(&payload)).await;
        match result {
            Ok(()) => {
                tracing::info!(name = %payload.name, "tenant added");
                self.ctx
                    .alerts
                    .present(Alert::success("Tenant added successfully!"));
                self.ctx.events.publish(TenantEvent::Created {
                    name: payload.name,
                });
                self.ctx.navigator.go_back();
                SubmitOutcome::Created
            }
            Err(err) if err.is_cancelled() => {
                tracing::debug!("tenant form unmounted before create finished");
                SubmitOutcome::Cancelled
            }
            Err(err) => {
                tracing::error!(error = %err, "error adding tenant");
                self.ctx.alerts.present(Alert::error("Failed to add tenant."));
                SubmitOutcome::Failed
            }
        }
    }

    /// Cancels any request still in flight
    pub fn unmount(&mut self) {
        self.scope.cancel();
        self.start_picker.hide();
        self.end_picker.hide();
    }
}

fn date_button_label(date: DateTime<Utc>) -> String {
    date.format("%a %b %d %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::RecordingPresenter;
    use crate::api::{ApiCall, ApiOperation, MockTenantApi};
    use crate::navigation::{Navigator, Route, START_ROUTE};
    use chrono::TimeZone;
    use leasedesk_shared::auth::AuthState;
    use leasedesk_shared::events::TenantEvents;
    use leasedesk_shared::models::tenant::PaymentStatus;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::{broadcast, watch};
    use tokio_util::sync::CancellationToken;

    struct Harness {
        api: MockTenantApi,
        alerts: RecordingPresenter,
        navigator: Navigator,
        events: broadcast::Receiver<TenantEvent>,
        ctx: ScreenContext,
        _auth: watch::Sender<AuthState>,
    }

    fn harness() -> Harness {
        let api = MockTenantApi::new();
        let alerts = RecordingPresenter::new();
        let (auth_tx, auth_rx) = watch::channel(AuthState::Authenticated);
        let navigator = Navigator::new(START_ROUTE, auth_rx);
        navigator.navigate(Route::OwnerDashboard).unwrap();
        navigator.navigate(Route::TenantList).unwrap();
        let bus = TenantEvents::default();
        let events = bus.subscribe();

        let ctx = ScreenContext::new(
            Arc::new(api.clone()),
            Arc::new(alerts.clone()),
            navigator.clone(),
            bus,
            950.0,
            CancellationToken::new(),
        );

        Harness {
            api,
            alerts,
            navigator,
            events,
            ctx,
            _auth: auth_tx,
        }
    }

    fn fill(screen: &mut TenantListScreen) {
        screen.set_name("Jane Doe");
        screen.set_email("jane@example.com");
        screen.set_address("12 Elm St");
        screen.set_phone("555-0100");
        screen.confirm_start(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        screen.confirm_end(Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_new_form_prefills_start_only() {
        let h = harness();
        let screen = TenantListScreen::new(&h.ctx);

        assert!(screen.draft().lease_start.is_some());
        assert!(screen.draft().lease_end.is_none());
        assert!(screen.draft().name.is_empty());
        assert_eq!(screen.lease_end_label(), NO_END_DATE_LABEL);
    }

    #[test]
    fn test_date_pickers() {
        let h = harness();
        let mut screen = TenantListScreen::new(&h.ctx);

        screen.show_start_picker();
        assert!(screen.start_picker().is_visible());
        assert!(!screen.end_picker().is_visible());
        screen.hide_start_picker();
        assert!(!screen.start_picker().is_visible());

        let end = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        screen.show_end_picker();
        screen.confirm_end(end);
        assert!(!screen.end_picker().is_visible());
        assert_eq!(screen.end_picker_date(), end);
        assert_eq!(screen.lease_end_label(), "Thu Jun 01 2023");

        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        screen.confirm_start(start);
        assert_eq!(screen.lease_start_label(), "Mon Jan 01 2024");
    }

    #[tokio::test]
    async fn test_missing_field_sends_nothing() {
        let mut h = harness();

        let clears: [fn(&mut TenantListScreen); 6] = [
            |s: &mut TenantListScreen| s.set_name(""),
            |s: &mut TenantListScreen| s.set_email(""),
            |s: &mut TenantListScreen| s.set_address(""),
            |s: &mut TenantListScreen| s.set_phone(""),
            |s: &mut TenantListScreen| s.draft.lease_start = None,
            |s: &mut TenantListScreen| s.draft.lease_end = None,
        ];

        for clear in clears {
            let mut screen = TenantListScreen::new(&h.ctx);
            fill(&mut screen);
            clear(&mut screen);

            let outcome = screen.submit().await;
            assert!(matches!(outcome, SubmitOutcome::Invalid(ref d) if d.len() == 1));
            assert_eq!(h.alerts.last(), Some(Alert::new(VALIDATION_ALERT)));
        }

        assert!(h.api.calls().is_empty());
        assert!(h.events.try_recv().is_err());
        assert_eq!(h.navigator.current(), Route::TenantList);
        assert_eq!(h.alerts.alerts().len(), 6);
    }

    #[tokio::test]
    async fn test_successful_submit() {
        let mut h = harness();
        let mut screen = TenantListScreen::new(&h.ctx);
        fill(&mut screen);

        assert_eq!(screen.submit().await, SubmitOutcome::Created);

        let calls = h.api.calls();
        assert_eq!(calls.len(), 1);
        let ApiCall::Create(payload) = &calls[0] else {
            panic!("expected create, got {calls:?}");
        };
        assert_eq!(payload.payment_status, PaymentStatus::Unpaid);
        assert_eq!(payload.rent_per_month, 950.0);
        assert_eq!(payload.name, "Jane Doe");

        assert_eq!(
            h.events.try_recv().unwrap(),
            TenantEvent::Created {
                name: "Jane Doe".to_string()
            }
        );
        assert!(h.events.try_recv().is_err());
        assert_eq!(h.navigator.current(), Route::OwnerDashboard);
        assert_eq!(
            h.alerts.alerts(),
            vec![Alert::success("Tenant added successfully!")]
        );
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_form() {
        let mut h = harness();
        h.api.fail(ApiOperation::Create, true);
        let mut screen = TenantListScreen::new(&h.ctx);
        fill(&mut screen);
        let before = screen.draft().clone();

        assert_eq!(screen.submit().await, SubmitOutcome::Failed);

        assert_eq!(screen.draft(), &before);
        assert_eq!(h.alerts.last(), Some(Alert::error("Failed to add tenant.")));
        assert!(h.events.try_recv().is_err());
        assert_eq!(h.navigator.current(), Route::TenantList);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_mid_request_is_silent() {
        let mut h = harness();
        h.api.set_delay(Some(Duration::from_secs(10)));
        let mut screen = TenantListScreen::new(&h.ctx);
        fill(&mut screen);

        let lifetime = screen.lifetime();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            lifetime.cancel();
        });

        assert_eq!(screen.submit().await, SubmitOutcome::Cancelled);
        assert!(h.alerts.alerts().is_empty());
        assert!(h.events.try_recv().is_err());
        assert_eq!(h.navigator.current(), Route::TenantList);
    }

    #[tokio::test]
    async fn test_unmounted_form_does_not_submit() {
        let h = harness();
        let mut screen = TenantListScreen::new(&h.ctx);
        fill(&mut screen);
        screen.unmount();

        assert_eq!(screen.submit().await, SubmitOutcome::Cancelled);
        assert!(h.api.calls().is_empty());
    }
}
