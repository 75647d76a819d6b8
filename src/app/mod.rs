mod navigation;
mod state;
mod ui;

use std::sync::mpsc as std_mpsc;
use std::time::{Duration, Instant};

use derivative::Derivative;
use eframe::{egui, App};
use tokio::runtime::Handle;

use crate::api::{self, ApiEvent, ApiRequest, PdfApiClient};
use crate::config::Settings;
use crate::documents::{CardAction, DocumentListController};
use crate::notify::{Alerts, Message, UploadMessage};
use crate::session::Session;
use crate::upload::{DragEvent, PendingRedirect, SelectedFile, UploadController};
pub use navigation::{Navigator, SystemBrowser};
pub use state::{FormState, SessionForm};

#[derive(Derivative)]
#[derivative(Debug)]
pub struct PdfManager {
    settings: Settings,
    client: PdfApiClient,
    form: FormState,
    session_form: SessionForm,
    upload: UploadController,
    documents: DocumentListController,
    upload_message: UploadMessage,
    alerts: Alerts,
    redirect: Option<PendingRedirect>,
    outbox: Vec<ApiRequest>,
    #[derivative(Debug = "ignore")]
    navigator: Box<dyn Navigator>,
    runtime: Option<Handle>,
    event_sender: std_mpsc::Sender<ApiEvent>,
    event_receiver: std_mpsc::Receiver<ApiEvent>,
    #[derivative(Debug = "ignore")]
    repaint: Option<egui::Context>,
}

impl PdfManager {
    /// Builds the manager and queues the initial document list load. Requests
    /// only leave the outbox once a runtime is attached.
    pub fn new(
        settings: Settings,
        session: Session,
        runtime: Option<Handle>,
        navigator: Box<dyn Navigator>,
    ) -> Self {
        tracing::info!(base_url = %session.base_url(), "Initializing PDF manager");
        let (event_sender, event_receiver) = std_mpsc::channel();

        let mut manager = Self {
            settings,
            client: PdfApiClient::new(session),
            form: FormState::default(),
            session_form: SessionForm::default(),
            upload: UploadController::default(),
            documents: DocumentListController::default(),
            upload_message: UploadMessage::default(),
            alerts: Alerts::default(),
            redirect: None,
            outbox: Vec::new(),
            navigator,
            runtime,
            event_sender,
            event_receiver,
            repaint: None,
        };
        let request = manager.documents.load();
        manager.dispatch(request);
        manager
    }

    fn dispatch(&mut self, request: ApiRequest) {
        tracing::debug!(?request, "Queueing request");
        self.outbox.push(request);
    }

    /// Hands queued requests to the runtime. Each result comes back through
    /// the event channel and wakes the UI.
    fn flush_outbox(&mut self) {
        let Some(runtime) = &self.runtime else {
            return;
        };

        for request in self.outbox.drain(..) {
            let client = self.client.clone();
            let sender = self.event_sender.clone();
            let repaint = self.repaint.clone();

            runtime.spawn(async move {
                let event = api::execute(&client, request).await;
                sender.send(event).unwrap_or_default();
                if let Some(ctx) = repaint {
                    ctx.request_repaint();
                }
            });
        }
    }

    fn drain_events(&mut self, now: Instant) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.handle_event(event, now);
        }
    }

    pub fn handle_event(&mut self, event: ApiEvent, now: Instant) {
        match event {
            ApiEvent::Uploaded { token, result } => {
                let Some(settlement) = self.upload.settle(token, result, now) else {
                    return;
                };
                let outcome = &settlement.outcome;
                if outcome.success {
                    let document_id = outcome.document_id.as_deref();
                    tracing::info!(document_id, "Upload finished");
                    self.form.reset();
                } else {
                    tracing::warn!(error = outcome.error.as_deref(), "Upload did not complete");
                }
                self.upload_message.show(settlement.message, now);
                self.redirect = settlement.redirect;
            }
            ApiEvent::DocumentsLoaded { token, result } => {
                self.documents.finish_load(token, result, now);
            }
            ApiEvent::Deleted {
                document_id,
                result,
            } => {
                let settlement = self.documents.finish_delete(&document_id, result);
                self.alerts.push(settlement.alert, now);
                if let Some(request) = settlement.reload {
                    self.dispatch(request);
                }
            }
        }
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        self.form.select(file);
    }

    fn pick_file(&mut self, now: Instant) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF", &["pdf", "PDF"])
            .pick_file()
        else {
            return;
        };

        match SelectedFile::from_path(&path) {
            Ok(file) => self.select_file(file),
            Err(e) => {
                tracing::error!("Could not read {}: {}", path.display(), e);
                self.upload_message
                    .show(Message::error(format!("❌ Could not read file: {}", e)), now);
            }
        }
    }

    pub fn apply_drag_events(&mut self, events: Vec<DragEvent>) {
        for event in events {
            if let Some(file) = self.form.drop_zone.handle(event) {
                self.select_file(file);
            }
        }
    }

    pub fn submit_upload(&mut self, now: Instant) {
        match self.upload.submit(self.form.file.as_ref(), &self.form.title) {
            Ok(request) => {
                self.upload_message.hide();
                self.dispatch(request);
            }
            Err(e) => {
                tracing::debug!("Upload rejected: {}", e);
                self.upload_message.show(Message::error(e.to_string()), now);
            }
        }
    }

    pub fn refresh(&mut self) {
        if let Some(request) = self.documents.refresh() {
            self.dispatch(request);
        }
    }

    pub fn card_action(&mut self, action: CardAction) {
        match action {
            CardAction::Open(document_id) => self.open_document(&document_id),
            CardAction::Delete(document_id) => self.documents.request_delete(document_id),
        }
    }

    pub fn answer_delete_confirmation(&mut self, accepted: bool) {
        if let Some(request) = self.documents.confirm_delete(accepted) {
            self.dispatch(request);
        }
    }

    fn open_document(&mut self, document_id: &str) {
        let url = self.client.session().document_page(document_id);
        tracing::info!(%url, "Opening document");
        self.navigator.open(&url);
    }

    /// Replaces the server session with one taken from a pasted curl command.
    pub fn apply_session(&mut self) {
        match Session::from_curl(&self.session_form.curl_text, &self.settings.csrf_cookie_name) {
            Ok(session) => {
                tracing::info!(base_url = %session.base_url(), "Session updated");
                let notice = Message::info(format!("Using session for {}", session.base_url()));
                self.alerts.push(notice, Instant::now());
                self.client = PdfApiClient::new(session);
                self.session_form = SessionForm::default();
                let request = self.documents.load();
                self.dispatch(request);
            }
            Err(e) => {
                tracing::warn!("Rejected session: {}", e);
                self.session_form.error = Some(e.to_string());
            }
        }
    }

    /// Fires whatever deadlines have passed.
    pub fn tick(&mut self, now: Instant) {
        self.upload_message.tick(now);
        self.alerts.tick(now);

        if self.redirect.as_ref().is_some_and(|r| now >= r.due) {
            if let Some(redirect) = self.redirect.take() {
                let request = self.documents.load();
                self.dispatch(request);
                self.open_document(&redirect.document_id);
            }
        }

        if self.documents.poll_due(now, self.settings.poll_interval()) {
            let request = self.documents.reload_in_background();
            self.dispatch(request);
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        [
            self.upload_message.next_deadline(),
            self.alerts.next_deadline(),
            self.redirect.as_ref().map(|r| r.due),
            self.documents.next_poll(self.settings.poll_interval()),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if self.repaint.is_none() {
            self.repaint = Some(ctx.clone());
        }

        self.drain_events(now);

        let (hovering, dropped) = ctx.input(|i| {
            (!i.raw.hovered_files.is_empty(), i.raw.dropped_files.clone())
        });
        let events = self.form.drop_zone.events_from_input(hovering, &dropped);
        self.apply_drag_events(events);

        self.tick(now);
    }
}

impl App for PdfManager {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
        self.flush_outbox();

        if let Some(deadline) = self.next_deadline() {
            let wait = deadline.saturating_duration_since(Instant::now());
            ctx.request_repaint_after(wait.max(Duration::from_millis(16)));
        }
    }
}
