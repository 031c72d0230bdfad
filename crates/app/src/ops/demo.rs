use std::time::Duration;

use clap::Args;
use tokio::sync::watch;

use common::prelude::{
    FieldUpdate, NavigatorError, NewFile, Priority, PriorityFilter, RecordForm, Status,
};
use service::{
    DeleteError, Gate, RecordDialog, ServiceState, ServiceStateSetupError, Session, SessionError,
    SubmitError, Toast,
};

/// Walk through a signed-in session against in-memory collaborators
#[derive(Args, Debug, Clone)]
pub struct Demo {
    /// Override the configured upload tick, in milliseconds
    #[arg(long)]
    pub upload_tick_ms: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("state error: {0}")]
    State(#[from] ServiceStateSetupError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error(transparent)]
    Delete(#[from] DeleteError),
    #[error(transparent)]
    Navigator(#[from] NavigatorError),
    #[error("demo went off script: {0}")]
    OffScript(&'static str),
}

struct Transcript {
    lines: Vec<String>,
    toasts: flume::Receiver<Toast>,
}

impl Transcript {
    fn step(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
        let toasts: Vec<Toast> = self.toasts.drain().collect();
        for toast in toasts {
            self.lines.push(format!("  toast: {}", toast));
        }
    }
}

fn form(title: &str, category: &str, priority: Priority, status: Status) -> RecordForm {
    RecordForm::default()
        .with(FieldUpdate::Title(title.to_string()))
        .with(FieldUpdate::Description(format!("{} for the demo", title)))
        .with(FieldUpdate::Category(category.to_string()))
        .with(FieldUpdate::Priority(priority))
        .with(FieldUpdate::Status(status))
}

#[async_trait::async_trait]
impl crate::op::Op for Demo {
    type Error = DemoError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut config = ctx.service.clone();
        if let Some(ms) = self.upload_tick_ms {
            config.upload_tick = Duration::from_millis(ms);
        }
        let state = ServiceState::from_config(&config)?;
        let mut out = Transcript {
            lines: Vec::new(),
            toasts: state.toasts(),
        };
        let mut session = Session::new(state.clone());

        let user = session
            .register("demo@skycloud.dev", "demo-password", "Demo User")
            .await?;
        out.step(format!("signed in as {} <{}>", user.display_name, user.email));

        let Gate::Dashboard { records, .. } = session.gate() else {
            return Err(DemoError::OffScript("dashboard not reachable after sign in"));
        };

        for (title, category, priority, status) in [
            ("Quarterly report", "Work", Priority::High, Status::Active),
            ("Garden plan", "Home", Priority::Low, Status::Pending),
            ("Team offsite", "Work", Priority::Medium, Status::Completed),
        ] {
            records.submit(&form(title, category, priority, status), None).await?;
            out.step(format!("added \"{}\"", title));
        }

        records.set_priority_filter(PriorityFilter::Only(Priority::High));
        out.step(format!(
            "priority High shows {} of {} records",
            records.visible().len(),
            records.records().len()
        ));
        records.set_priority_filter(PriorityFilter::All);

        let mut dialog = RecordDialog::new();
        dialog.open_new();
        dialog.update(FieldUpdate::Title("Hi".to_string()));
        if dialog.submit(records).await.is_ok() {
            return Err(DemoError::OffScript("short title was accepted"));
        }
        out.step(format!(
            "form rejected: {}",
            dialog.error().unwrap_or_default()
        ));

        let garden = records
            .records()
            .iter()
            .find(|r| r.title == "Garden plan")
            .cloned()
            .ok_or(DemoError::OffScript("garden plan missing"))?;
        dialog.open_edit(&garden);
        dialog.update(FieldUpdate::Status(Status::Active));
        dialog.submit(records).await?;
        out.step("marked \"Garden plan\" active");

        let offsite = records
            .records()
            .iter()
            .find(|r| r.title == "Team offsite")
            .and_then(|r| r.id.clone())
            .ok_or(DemoError::OffScript("team offsite missing"))?;
        records.delete(&offsite).await?;
        out.step(format!("{} records left", records.records().len()));

        let mut drive = state.folder_session();
        let folder = drive.create_folder("Receipts")?;
        out.step(format!("created folder {}", folder.name));

        drive.navigate_to(&folder.id)?;
        let (progress, _watch) = watch::channel(0u8);
        let file = drive
            .upload(NewFile::new("march.pdf", 524_288), &progress)
            .await?;
        out.step(format!("uploaded {} ({})", file.name, file.size.as_deref().unwrap_or_default()));

        drive.go_home();
        drive.rename(&folder.id, "Receipts 2024")?;
        out.step("renamed folder");
        drive.delete(&folder.id)?;
        out.step(format!("root holds {} entries", drive.listing().len()));

        session.logout().await?;
        out.step(format!("signed out, dashboard open: {}", session.gate().is_signed_in()));

        Ok(out.lines.join("\n"))
    }
}
