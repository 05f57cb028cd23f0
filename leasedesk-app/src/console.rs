/// Line-oriented console front-end
///
/// Reads one command per line, runs it against the screen showing on top
/// of the navigation stack and prints the result. Screens are mounted when
/// their route comes to the top and unmounted when it leaves the stack.
///
/// # Commands
///
/// ```text
/// everywhere       help | quit | back | login <user> | logout
/// StartScreen      dashboard
/// OwnerDashboard   list | show <n> | close | delete <n> | add | refresh
/// TenantList       name|email|address|phone <text> | start [YYYY-MM-DD]
///                  | end [YYYY-MM-DD] | submit
/// ```

use crate::alert::RecordingPresenter;
use crate::api::TenantApi;
use crate::navigation::Route;
use crate::screens::owner_dashboard::{
    DashboardBody, OwnerDashboard, TenantDetails, DASHBOARD_TITLE, EMPTY_PLACEHOLDER,
    LOADING_TEXT, SECTION_TITLE,
};
use crate::screens::tenant_list::{SubmitOutcome, TenantListScreen};
use crate::shell::{AppShell, ShellView};
use anyhow::Result;
use chrono::{DateTime, Utc};
use leasedesk_shared::auth::{AuthState, AuthUser, StaticAuthProvider};
use leasedesk_shared::models::tenant::parse_lease_date;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// How long to wait for the auth provider to settle
const AUTH_WAIT: Duration = Duration::from_secs(5);

/// Parsed console command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Back,
    Login(String),
    Logout,
    OpenDashboard,
    List,
    Show(usize),
    Close,
    Delete(usize),
    Add,
    Refresh,
    SetName(String),
    SetEmail(String),
    SetAddress(String),
    SetPhone(String),
    PickStart,
    PickEnd,
    SetStart(DateTime<Utc>),
    SetEnd(DateTime<Utc>),
    Submit,
}

/// Command parse errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for a list.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid tenant number '{0}'")]
    InvalidIndex(String),
}

/// Parses `line` as a command for the screen at `route`
///
/// Returns `Ok(None)` for a blank line.
pub fn parse_command(route: Route, line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match (route, word) {
        (_, "help") => Command::Help,
        (_, "quit") | (_, "exit") => Command::Quit,
        (_, "back") => Command::Back,
        (_, "login") => Command::Login(required(rest, "login <user>")?.to_string()),
        (_, "logout") => Command::Logout,

        (Route::StartScreen, "dashboard") => Command::OpenDashboard,

        (Route::OwnerDashboard, "list") => Command::List,
        (Route::OwnerDashboard, "show") => Command::Show(index(rest, "show <n>")?),
        (Route::OwnerDashboard, "close") => Command::Close,
        (Route::OwnerDashboard, "delete") => Command::Delete(index(rest, "delete <n>")?),
        (Route::OwnerDashboard, "add") => Command::Add,
        (Route::OwnerDashboard, "refresh") => Command::Refresh,

        // Text fields take the rest of the line verbatim, including empty
        (Route::TenantList, "name") => Command::SetName(rest.to_string()),
        (Route::TenantList, "email") => Command::SetEmail(rest.to_string()),
        (Route::TenantList, "address") => Command::SetAddress(rest.to_string()),
        (Route::TenantList, "phone") => Command::SetPhone(rest.to_string()),
        (Route::TenantList, "start") if rest.is_empty() => Command::PickStart,
        (Route::TenantList, "end") if rest.is_empty() => Command::PickEnd,
        (Route::TenantList, "start") => Command::SetStart(date(rest)?),
        (Route::TenantList, "end") => Command::SetEnd(date(rest)?),
        (Route::TenantList, "submit") => Command::Submit,

        _ => return Err(CommandError::Unknown(word.to_string())),
    };

    Ok(Some(command))
}

fn required<'a>(rest: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(rest)
    }
}

fn index(rest: &str, usage: &'static str) -> Result<usize, CommandError> {
    let rest = required(rest, usage)?;
    match rest.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(CommandError::InvalidIndex(rest.to_string())),
    }
}

/// Parses a date argument; `YYYY-MM-DD` means midnight UTC
fn date(rest: &str) -> Result<DateTime<Utc>, CommandError> {
    parse_lease_date(rest).ok_or_else(|| CommandError::InvalidDate(rest.to_string()))
}

fn help_text(route: Route) -> &'static str {
    match route {
        Route::StartScreen => "dashboard | login <user> | logout | back | help | quit",
        Route::OwnerDashboard => {
            "list | show <n> | close | delete <n> | add | refresh | back | logout | help | quit"
        }
        Route::TenantList => {
            "name|email|address|phone <text> | start [YYYY-MM-DD] | end [YYYY-MM-DD] | submit | back | help | quit"
        }
        _ => "back | login <user> | logout | help | quit",
    }
}

/// Console driver over one app shell
pub struct Console<W: Write> {
    shell: AppShell,
    provider: Arc<StaticAuthProvider>,
    alerts: RecordingPresenter,
    dashboard: Option<OwnerDashboard>,
    form: Option<TenantListScreen>,
    focused: Route,
    out: W,
}

impl<W: Write> Console<W> {
    /// Builds a console writing to `out`
    pub fn new(
        provider: Arc<StaticAuthProvider>,
        api: Arc<dyn TenantApi>,
        rent_per_month: f64,
        out: W,
    ) -> Self {
        let alerts = RecordingPresenter::new();
        let shell = AppShell::new(
            provider.clone(),
            api,
            Arc::new(alerts.clone()),
            rent_per_month,
        );

        Console {
            shell,
            provider,
            alerts,
            dashboard: None,
            form: None,
            focused: Route::StartScreen,
            out,
        }
    }

    pub fn shell(&self) -> &AppShell {
        &self.shell
    }

    /// Consumes the console, returning its writer
    pub fn into_writer(self) -> W {
        self.out
    }

    /// Runs commands from `input` until `quit` or end of input
    pub async fn run<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        self.shell.mount();
        self.wait_for_auth(|state| !state.is_unknown()).await;

        match self.shell.view() {
            ShellView::Loading => writeln!(self.out, "Loading...")?,
            ShellView::Ready { current, .. } => {
                writeln!(self.out, "{} ({})", current, self.shell.auth_state())?
            }
        }
        self.prompt()?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let route = self.shell.navigator().current();
            match parse_command(route, &line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.execute(command).await?,
                Err(err) => writeln!(self.out, "{}", err)?,
            }

            self.shell.apply_auth_state();
            self.sync_screens().await?;
            self.flush_alerts()?;
            self.prompt()?;
        }

        self.unmount_screens();
        self.shell.unmount();
        tracing::info!("console closed");
        Ok(())
    }

    async fn execute(&mut self, command: Command) -> Result<()> {
        tracing::debug!(?command, "console command");

        match command {
            Command::Help => {
                let route = self.shell.navigator().current();
                writeln!(self.out, "{}", help_text(route))?;
            }
            Command::Quit => {}
            Command::Back => {
                if !self.shell.navigator().go_back() {
                    writeln!(self.out, "Already at the start screen")?;
                }
            }
            Command::Login(user) => {
                self.provider.sign_in(AuthUser::new(user));
                self.wait_for_auth(AuthState::is_authenticated).await;
                match self.provider.current().user() {
                    Some(user) => writeln!(self.out, "Signed in as {}", user.uid)?,
                    None => writeln!(self.out, "Sign-in failed")?,
                }
            }
            Command::Logout => {
                self.provider.sign_out();
                self.wait_for_auth(|state| *state == AuthState::Unauthenticated)
                    .await;
                writeln!(self.out, "Signed out")?;
            }
            Command::OpenDashboard => {
                if let Err(err) = self.shell.navigator().navigate(Route::OwnerDashboard) {
                    writeln!(self.out, "{}", err)?;
                }
            }
            Command::List | Command::Show(_) | Command::Close | Command::Delete(_)
            | Command::Add | Command::Refresh => self.execute_dashboard(command).await?,
            _ => self.execute_form(command).await?,
        }
        Ok(())
    }

    async fn execute_dashboard(&mut self, command: Command) -> Result<()> {
        let Some(dashboard) = self.dashboard.as_mut() else {
            writeln!(self.out, "Dashboard is not open")?;
            return Ok(());
        };

        match command {
            Command::List => {}
            Command::Show(n) => match dashboard.tenants().get(n - 1).map(|t| t.id.clone()) {
                Some(id) => {
                    dashboard.show_details(&id);
                }
                None => writeln!(self.out, "No tenant #{}", n)?,
            },
            Command::Close => dashboard.close_details(),
            Command::Delete(n) => match dashboard.tenants().get(n - 1).map(|t| t.id.clone()) {
                Some(id) => {
                    dashboard.delete_tenant(&id).await;
                }
                None => writeln!(self.out, "No tenant #{}", n)?,
            },
            Command::Add => {
                if let Err(err) = dashboard.add_tenant() {
                    writeln!(self.out, "{}", err)?;
                }
                return Ok(());
            }
            Command::Refresh => {
                dashboard.fetch_tenants().await;
            }
            _ => {}
        }

        self.render_dashboard()
    }

    async fn execute_form(&mut self, command: Command) -> Result<()> {
        let Some(form) = self.form.as_mut() else {
            writeln!(self.out, "Tenant form is not open")?;
            return Ok(());
        };

        match command {
            Command::SetName(name) => form.set_name(name),
            Command::SetEmail(email) => form.set_email(email),
            Command::SetAddress(address) => form.set_address(address),
            Command::SetPhone(phone) => form.set_phone(phone),
            Command::PickStart => {
                form.show_start_picker();
                writeln!(
                    self.out,
                    "Start date picker opens on {}",
                    form.start_picker_date().format("%Y-%m-%d")
                )?;
                return Ok(());
            }
            Command::PickEnd => {
                form.show_end_picker();
                writeln!(
                    self.out,
                    "End date picker opens on {}",
                    form.end_picker_date().format("%Y-%m-%d")
                )?;
                return Ok(());
            }
            Command::SetStart(date) => {
                form.show_start_picker();
                form.confirm_start(date);
            }
            Command::SetEnd(date) => {
                form.show_end_picker();
                form.confirm_end(date);
            }
            Command::Submit => {
                if let SubmitOutcome::Invalid(details) = form.submit().await {
                    for detail in details {
                        writeln!(self.out, "  {}: {}", detail.field, detail.message)?;
                    }
                }
                return Ok(());
            }
            _ => return Ok(()),
        }

        self.render_form()
    }

    /// Mounts the screen on top of the stack and unmounts screens that left it
    async fn sync_screens(&mut self) -> Result<()> {
        let navigator = self.shell.navigator().clone();
        let current = navigator.current();

        if current != Route::TenantList {
            if let Some(mut form) = self.form.take() {
                form.unmount();
            }
        }
        if !navigator.contains(Route::OwnerDashboard) {
            if let Some(mut dashboard) = self.dashboard.take() {
                dashboard.unmount();
            }
        }

        match current {
            Route::OwnerDashboard => match self.dashboard.as_mut() {
                None => {
                    let mut dashboard = OwnerDashboard::new(&self.shell.context());
                    dashboard.mount().await;
                    self.dashboard = Some(dashboard);
                    self.render_dashboard()?;
                }
                Some(dashboard) if self.focused != Route::OwnerDashboard => {
                    dashboard.on_focus().await;
                    self.render_dashboard()?;
                }
                Some(_) => {}
            },
            Route::TenantList if self.form.is_none() => {
                self.form = Some(TenantListScreen::new(&self.shell.context()));
                self.render_form()?;
            }
            _ => {}
        }

        self.focused = current;
        Ok(())
    }

    fn unmount_screens(&mut self) {
        if let Some(mut form) = self.form.take() {
            form.unmount();
        }
        if let Some(mut dashboard) = self.dashboard.take() {
            dashboard.unmount();
        }
    }

    async fn wait_for_auth<F>(&self, settled: F)
    where
        F: Fn(&AuthState) -> bool,
    {
        let mut state_rx = self.shell.subscribe_auth();
        if tokio::time::timeout(AUTH_WAIT, state_rx.wait_for(|state| settled(state)))
            .await
            .is_err()
        {
            tracing::warn!(state = %self.shell.auth_state(), "auth provider did not settle");
        }
    }

    fn render_dashboard(&mut self) -> Result<()> {
        let Some(dashboard) = self.dashboard.as_ref() else {
            return Ok(());
        };
        let view = dashboard.view();

        writeln!(self.out, "{}", DASHBOARD_TITLE)?;
        writeln!(self.out, "{}", SECTION_TITLE)?;
        match &view.body {
            DashboardBody::Loading => writeln!(self.out, "  {}", LOADING_TEXT)?,
            DashboardBody::Empty => writeln!(self.out, "  {}", EMPTY_PLACEHOLDER)?,
            DashboardBody::List(rows) => {
                for (n, row) in rows.iter().enumerate() {
                    writeln!(self.out, "  {}. {}  {}", n + 1, row.name, row.status_label())?;
                }
            }
        }
        if let Some(details) = &view.details {
            write_details(&mut self.out, details)?;
        }
        Ok(())
    }

    fn render_form(&mut self) -> Result<()> {
        let Some(form) = self.form.as_ref() else {
            return Ok(());
        };
        let draft = form.draft();

        writeln!(self.out, "Add Tenant")?;
        writeln!(self.out, "  Tenant Name:      {}", draft.name)?;
        writeln!(self.out, "  Email Address:    {}", draft.email)?;
        writeln!(self.out, "  House Address:    {}", draft.address)?;
        writeln!(self.out, "  Phone Number:     {}", draft.phone)?;
        writeln!(self.out, "  Lease Start Date: {}", form.lease_start_label())?;
        writeln!(self.out, "  Lease End Date:   {}", form.lease_end_label())?;
        Ok(())
    }

    fn flush_alerts(&mut self) -> Result<()> {
        for alert in self.alerts.drain() {
            writeln!(self.out, "{}", alert)?;
        }
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "{}> ", self.shell.navigator().current())?;
        self.out.flush()?;
        Ok(())
    }
}

fn write_details<W: Write>(out: &mut W, details: &TenantDetails) -> Result<()> {
    writeln!(out, "  ---")?;
    writeln!(out, "  Name:       {}", details.name)?;
    writeln!(out, "  Email:      {}", details.email)?;
    writeln!(out, "  Address:    {}", details.address)?;
    writeln!(out, "  Phone:      {}", details.phone)?;
    writeln!(out, "  Lease from: {}", details.lease_start)?;
    writeln!(out, "  Lease to:   {}", details.lease_end)?;
    Ok(())
}
