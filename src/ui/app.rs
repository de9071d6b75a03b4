use chrono::{Duration, Local, NaiveDate};
use eframe::egui;
use egui::{Color32, RichText};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::api::{
    format_day_heading, format_week_range, Company, MemoryStore, RestStore, Schedule, ScheduleDraft, ScheduleId,
    ScheduleStore, Site,
};
use crate::board::{
    now_offset, week_start, Directory, DropRegistry, GestureEngine, NowTicker, ScheduleBook, ScheduleMutation, Ticket,
};
use crate::config::{Config, ViewMode};
use crate::error::StoreError;
use super::theme;
use super::views::{self, BoardView, DetailAction, FormAction};

pub struct SiteboardApp {
    config: Config,
    state: AppState,
    tab: Tab,

    // Current view
    selected_date: NaiveDate,

    // Data
    book: ScheduleBook,
    directory: Directory,
    store: Option<Arc<dyn ScheduleStore>>,

    // Board interaction, rebuilt every frame from pointer input
    gestures: GestureEngine,
    drop_targets: DropRegistry,
    now_ticker: NowTicker,

    // Add form
    draft: ScheduleDraft,
    form_error: Option<String>,
    creating: bool,

    // Detail sheet and delete confirmation
    detail: Option<Schedule>,
    pending_delete: Option<Schedule>,
    show_delete_confirm: bool,

    // List filters
    site_query: String,
    contact_query: String,
    contact_filter: Option<crate::api::WorkType>,

    // Settings dialog
    show_settings: bool,
    settings_url: String,
    settings_key: String,
    settings_sample_data: bool,
    settings_font_scale: f32,
    settings_start_hour: u8,
    settings_end_hour: u8,
    settings_snap: u32,
    settings_min_duration: u32,

    // Status
    status_message: Option<(String, bool)>, // (message, is_error)
    loading: bool,
    is_offline: bool,

    // Progress bar state
    progress: f32,
    progress_start: Instant,
    progress_phase: ProgressPhase,

    // Async communication
    runtime: tokio::runtime::Runtime,
    result_rx: Receiver<AsyncResult>,
    result_tx: Sender<AsyncResult>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum AppState {
    Setup,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tab {
    Board,
    Sites,
    Add,
    Contacts,
}

enum AsyncResult {
    Loaded {
        schedules: Vec<Schedule>,
        companies: Vec<Company>,
        sites: Vec<Site>,
    },
    Created(Schedule),
    CreateFailed(String),
    Updated(Ticket),
    UpdateFailed { ticket: Ticket, message: String, offline: bool },
    Deleted(ScheduleId),
    Error(String),
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ProgressPhase {
    Idle,
    FastStart,    // 0→17% in 0.25s
    SlowCrawl,    // 17%→50% slowly
    Completing,   // snap to 100%
    FadingOut,
    Shrinking,    // shrink back on error
}

/// Sample data lives in memory; everything else goes to the REST endpoint
fn build_store(config: &Config, today: NaiveDate) -> Result<Arc<dyn ScheduleStore>, StoreError> {
    if config.use_sample_data {
        return Ok(Arc::new(MemoryStore::with_sample_data(today)));
    }
    Ok(Arc::new(RestStore::new(config)?))
}

/// The store a write should go to, or why there is none
fn writable_store(store: &Option<Arc<dyn ScheduleStore>>) -> Result<Arc<dyn ScheduleStore>, StoreError> {
    store.clone().ok_or(StoreError::NotConfigured)
}

impl SiteboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> std::io::Result<Self> {
        let config = Config::load().unwrap_or_else(|e| {
            warn!("using default config: {:#}", e);
            Config::default()
        });
        super::setup_fonts(&cc.egui_ctx);
        super::setup_theme(&cc.egui_ctx);
        let state = if config.is_configured() {
            AppState::Main
        } else {
            AppState::Setup
        };

        let runtime = tokio::runtime::Runtime::new()?;
        let (result_tx, result_rx) = channel();

        let today = Local::now().date_naive();
        let store = if state == AppState::Main {
            build_store(&config, today)
                .map_err(|e| warn!("store unavailable: {}", e))
                .ok()
        } else {
            None
        };

        let mut app = Self {
            show_settings: false,
            settings_url: config.store_url.clone(),
            settings_key: String::new(),
            settings_sample_data: config.use_sample_data,
            settings_font_scale: config.font_scale,
            settings_start_hour: config.start_hour,
            settings_end_hour: config.end_hour,
            settings_snap: config.snap_minutes,
            settings_min_duration: config.min_duration_minutes,
            now_ticker: NowTicker::new(std::time::Duration::from_secs(config.now_poll_secs.max(1))),
            config,
            state,
            tab: Tab::Board,
            selected_date: today,
            book: ScheduleBook::default(),
            directory: Directory::default(),
            store,
            gestures: GestureEngine::new(),
            drop_targets: DropRegistry::new(),
            draft: ScheduleDraft::new(&[], &[], today),
            form_error: None,
            creating: false,
            detail: None,
            pending_delete: None,
            show_delete_confirm: false,
            site_query: String::new(),
            contact_query: String::new(),
            contact_filter: None,
            status_message: None,
            loading: false,
            is_offline: false,
            progress: 0.0,
            progress_start: Instant::now(),
            progress_phase: ProgressPhase::Idle,
            runtime,
            result_rx,
            result_tx,
        };

        if state == AppState::Main {
            app.refresh_data();
        }

        Ok(app)
    }

    fn start_progress(&mut self) {
        self.progress = 0.0;
        self.progress_phase = ProgressPhase::FastStart;
        self.progress_start = Instant::now();
    }

    fn settle_progress(&mut self, ok: bool) {
        self.progress_phase = if ok { ProgressPhase::Completing } else { ProgressPhase::Shrinking };
        self.progress_start = Instant::now();
    }

    fn check_async_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                AsyncResult::Loaded { schedules, companies, sites } => {
                    info!(schedules = schedules.len(), companies = companies.len(), sites = sites.len(), "board loaded");
                    if self.gestures.cancel() {
                        debug!("gesture dropped by reload");
                    }
                    self.book.replace_all(schedules);
                    self.directory = Directory::new(companies, sites);
                    self.loading = false;
                    self.is_offline = false;
                    self.status_message = None;
                    self.settle_progress(true);
                }
                AsyncResult::Created(schedule) => {
                    info!(schedule = schedule.id, date = %schedule.date, "schedule created");
                    self.creating = false;
                    self.loading = false;
                    self.settle_progress(true);
                    self.selected_date = schedule.date;
                    self.book.insert(schedule);
                    self.reset_draft();
                    self.tab = Tab::Board;
                    self.status_message = Some(("Schedule added".to_string(), false));
                }
                AsyncResult::CreateFailed(msg) => {
                    self.creating = false;
                    self.loading = false;
                    self.settle_progress(false);
                    self.form_error = Some(msg);
                }
                AsyncResult::Updated(ticket) => {
                    self.book.confirm(ticket);
                }
                AsyncResult::UpdateFailed { ticket, message, offline } => {
                    if self.book.rollback(ticket) {
                        let msg = if offline {
                            "No connection, change reverted".to_string()
                        } else {
                            format!("Couldn't save change: {}", message)
                        };
                        self.status_message = Some((msg, true));
                    }
                }
                AsyncResult::Deleted(id) => {
                    info!(schedule = id, "schedule deleted");
                    self.loading = false;
                    self.settle_progress(true);
                    self.book.remove(id);
                }
                AsyncResult::Error(msg) => {
                    self.loading = false;
                    self.is_offline = false;
                    self.status_message = Some((msg, true));
                    self.settle_progress(false);
                }
                AsyncResult::Offline => {
                    self.loading = false;
                    self.creating = false;
                    self.is_offline = true;
                    self.status_message = None;
                    self.settle_progress(false);
                }
            }
        }
    }

    fn refresh_data(&mut self) {
        let Some(store) = self.store.clone() else {
            return;
        };
        if self.loading {
            return;
        }

        self.loading = true;
        self.start_progress();

        let tx = self.result_tx.clone();
        self.runtime.spawn(async move {
            let result = tokio::try_join!(store.list(), store.list_companies(), store.list_sites());
            match result {
                Ok((schedules, companies, sites)) => {
                    let _ = tx.send(AsyncResult::Loaded { schedules, companies, sites });
                }
                Err(e) if e.is_offline() => {
                    warn!("load failed, offline: {}", e);
                    let _ = tx.send(AsyncResult::Offline);
                }
                Err(e) => {
                    warn!("load failed: {}", e);
                    let _ = tx.send(AsyncResult::Error(format!("Error: {}", e)));
                }
            }
        });
    }

    /// Show the mutation now, then write it; a failed write restores the old value
    fn commit_mutation(&mut self, mutation: ScheduleMutation) {
        if let Err(e) = mutation.after.validate(self.config.min_duration_minutes as i32) {
            warn!(schedule = mutation.after.id, "mutation rejected: {}", e);
            self.status_message = Some((e.to_string(), true));
            return;
        }
        let store = match writable_store(&self.store) {
            Ok(store) => store,
            Err(e) => {
                warn!(schedule = mutation.after.id, "mutation dropped: {}", e);
                self.status_message = Some((e.to_string(), true));
                return;
            }
        };

        let ticket = self.book.apply(&mutation);
        let schedule = mutation.after;
        info!(
            schedule = schedule.id,
            company = schedule.company_id,
            date = %schedule.date,
            start = %schedule.time_start,
            end = %schedule.time_end,
            "schedule changed"
        );

        let tx = self.result_tx.clone();
        self.runtime.spawn(async move {
            match store.update(&schedule).await {
                Ok(()) => {
                    let _ = tx.send(AsyncResult::Updated(ticket));
                }
                Err(e) => {
                    warn!(schedule = schedule.id, "update failed: {}", e);
                    let _ = tx.send(AsyncResult::UpdateFailed {
                        ticket,
                        message: e.to_string(),
                        offline: e.is_offline(),
                    });
                }
            }
        });
    }

    fn reset_draft(&mut self) {
        self.draft = ScheduleDraft::new(self.directory.companies(), self.directory.sites(), self.selected_date);
        self.form_error = None;
    }

    fn submit_draft(&mut self) {
        let new_schedule = match self.draft.build(self.config.min_duration_minutes as i32) {
            Ok(s) => s,
            Err(e) => {
                self.form_error = Some(e.to_string());
                return;
            }
        };
        let store = match writable_store(&self.store) {
            Ok(store) => store,
            Err(e) => {
                self.form_error = Some(e.to_string());
                return;
            }
        };

        self.form_error = None;
        self.creating = true;
        self.loading = true;
        self.start_progress();

        let tx = self.result_tx.clone();
        self.runtime.spawn(async move {
            match store.create(&new_schedule).await {
                Ok(schedule) => {
                    let _ = tx.send(AsyncResult::Created(schedule));
                }
                Err(e) if e.is_offline() => {
                    let _ = tx.send(AsyncResult::Offline);
                }
                Err(e) => {
                    warn!("create failed: {}", e);
                    let _ = tx.send(AsyncResult::CreateFailed(format!("Failed to add: {}", e)));
                }
            }
        });
    }

    fn delete_schedule(&mut self, schedule: &Schedule) {
        let store = match writable_store(&self.store) {
            Ok(store) => store,
            Err(e) => {
                self.status_message = Some((e.to_string(), true));
                return;
            }
        };
        self.loading = true;
        self.start_progress();

        let id = schedule.id;
        let tx = self.result_tx.clone();
        self.runtime.spawn(async move {
            match store.delete(id).await {
                Ok(()) => {
                    let _ = tx.send(AsyncResult::Deleted(id));
                }
                Err(e) if e.is_offline() => {
                    let _ = tx.send(AsyncResult::Offline);
                }
                Err(e) => {
                    let _ = tx.send(AsyncResult::Error(format!("Failed to delete: {}", e)));
                }
            }
        });
    }

    fn open_settings(&mut self) {
        self.settings_url = self.config.store_url.clone();
        self.settings_key = String::new();
        self.settings_sample_data = self.config.use_sample_data;
        self.settings_font_scale = self.config.font_scale;
        self.settings_start_hour = self.config.start_hour;
        self.settings_end_hour = self.config.end_hour;
        self.settings_snap = self.config.snap_minutes;
        self.settings_min_duration = self.config.min_duration_minutes;
        self.show_settings = true;
    }

    fn save_settings(&mut self) {
        let connection_changed = self.config.store_url != self.settings_url.trim()
            || self.config.use_sample_data != self.settings_sample_data
            || !self.settings_key.is_empty()
            || self.store.is_none();

        self.config.store_url = self.settings_url.trim().to_string();
        self.config.use_sample_data = self.settings_sample_data;
        self.config.font_scale = self.settings_font_scale;
        self.config.start_hour = self.settings_start_hour;
        self.config.end_hour = self.settings_end_hour.max(self.settings_start_hour).min(23);
        self.config.snap_minutes = self.settings_snap;
        self.config.min_duration_minutes = self.settings_min_duration;
        if !self.settings_key.is_empty() {
            self.config.api_key = Some(self.settings_key.trim().to_string());
        }
        self.now_ticker.invalidate();
        self.gestures.cancel();

        if let Err(e) = self.config.save() {
            self.status_message = Some((format!("Failed to save: {:#}", e), true));
            return;
        }
        self.show_settings = false;

        if !self.config.is_configured() {
            return;
        }
        self.state = AppState::Main;
        if connection_changed {
            match build_store(&self.config, Local::now().date_naive()) {
                Ok(store) => {
                    self.store = Some(store);
                    self.loading = false;
                    self.refresh_data();
                }
                Err(e) => {
                    self.store = None;
                    self.status_message = Some((format!("Can't connect: {}", e), true));
                }
            }
        }
    }

    fn shift_date(&mut self, forward: bool) {
        let step = match self.config.view_mode {
            ViewMode::Day => Duration::days(1),
            ViewMode::Week => Duration::days(7),
        };
        self.selected_date = if forward { self.selected_date + step } else { self.selected_date - step };
        self.gestures.cancel();
    }

    fn render_setup(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("Siteboard setup");
            ui.add_space(20.0);
            ui.label("Connect to your schedule store, or start with sample data.");
            ui.add_space(20.0);
        });

        egui::Grid::new("setup_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                ui.label("Store URL:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.settings_url)
                        .hint_text("project.example.co")
                        .desired_width(350.0),
                );
                ui.end_row();

                ui.label("API key:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.settings_key)
                        .password(true)
                        .hint_text("Paste your API key here")
                        .desired_width(350.0),
                );
                ui.end_row();

                ui.label("");
                ui.checkbox(&mut self.settings_sample_data, "Use sample data instead");
                ui.end_row();
            });

        ui.add_space(20.0);

        if ui.button("Save and connect").clicked() {
            self.save_settings();
        }
    }

    /// Icon-only header button, gray and white on hover
    fn icon_button(ui: &mut egui::Ui, icon: &str, hover_text: &str) -> bool {
        let font_id = egui::FontId::proportional(18.0);
        let size = ui.fonts(|f| f.layout_no_wrap(icon.to_string(), font_id.clone(), Color32::WHITE).size());
        let (rect, response) = ui.allocate_exact_size(size + egui::vec2(8.0, 4.0), egui::Sense::click());
        let color = if response.hovered() { Color32::WHITE } else { Color32::from_rgb(150, 150, 150) };
        ui.painter().text(rect.center(), egui::Align2::CENTER_CENTER, icon, font_id, color);
        response.on_hover_text(hover_text).clicked()
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let (button_bg, button_text) = theme::button_colors();

            egui::Frame::none()
                .fill(button_bg)
                .rounding(egui::Rounding::same(12.0))
                .inner_margin(egui::Margin::symmetric(8.0, 4.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let left = ui.add(egui::Label::new(
                            RichText::new(egui_phosphor::regular::CARET_LEFT).size(14.0).color(button_text),
                        ).sense(egui::Sense::click()));
                        if left.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        if left.clicked() {
                            self.shift_date(false);
                        }

                        let date_text = match self.config.view_mode {
                            ViewMode::Day => format_day_heading(self.selected_date),
                            ViewMode::Week => format_week_range(week_start(self.selected_date)),
                        };
                        ui.allocate_ui_with_layout(
                            egui::vec2(120.0, 14.0),
                            egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                            |ui| {
                                ui.label(RichText::new(&date_text).size(14.0).color(button_text));
                            },
                        );

                        let right = ui.add(egui::Label::new(
                            RichText::new(egui_phosphor::regular::CARET_RIGHT).size(14.0).color(button_text),
                        ).sense(egui::Sense::click()));
                        if right.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        if right.clicked() {
                            self.shift_date(true);
                        }
                    });
                });

            if ui.button("Today").clicked() {
                self.selected_date = Local::now().date_naive();
                self.gestures.cancel();
            }

            ui.add_space(16.0);
            let before = self.config.view_mode;
            ui.selectable_value(
                &mut self.config.view_mode,
                ViewMode::Day,
                format!("{} Day", egui_phosphor::regular::CALENDAR_BLANK),
            );
            ui.selectable_value(
                &mut self.config.view_mode,
                ViewMode::Week,
                format!("{} Week", egui_phosphor::regular::SQUARES_FOUR),
            );
            if self.config.view_mode != before {
                self.gestures.cancel();
                if let Err(e) = self.config.save() {
                    warn!("view mode not saved: {:#}", e);
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if Self::icon_button(ui, egui_phosphor::regular::FADERS_HORIZONTAL, "Settings") {
                    self.open_settings();
                }
                ui.add_space(12.0);
                if Self::icon_button(ui, egui_phosphor::regular::CLOUD_ARROW_DOWN, "Reload") {
                    self.refresh_data();
                }
            });
        });
    }

    fn render_tabs(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let before = self.tab;
            ui.selectable_value(&mut self.tab, Tab::Board, format!("{} Board", egui_phosphor::regular::CALENDAR));
            ui.selectable_value(&mut self.tab, Tab::Sites, format!("{} Sites", egui_phosphor::regular::BUILDINGS));
            ui.selectable_value(&mut self.tab, Tab::Add, format!("{} Add", egui_phosphor::regular::PLUS_CIRCLE));
            ui.selectable_value(&mut self.tab, Tab::Contacts, format!("{} Contacts", egui_phosphor::regular::ADDRESS_BOOK));
            if self.tab != before {
                self.gestures.cancel();
                if self.tab == Tab::Add {
                    self.reset_draft();
                }
            }
        });
    }

    fn render_board(&mut self, ui: &mut egui::Ui) {
        let scale = self.config.time_scale();
        let today = Local::now().date_naive();

        views::render_legend(ui);
        ui.add_space(4.0);

        let now_px = match self.config.view_mode {
            ViewMode::Day => {
                let at = Instant::now();
                let date = self.selected_date;
                let offset = self
                    .now_ticker
                    .poll(at, date, || now_offset(&scale, date, Local::now().naive_local()));
                ui.ctx().request_repaint_after(self.now_ticker.due_in(at));
                offset
            }
            ViewMode::Week => None,
        };

        let view = BoardView {
            scale: &scale,
            book: &self.book,
            directory: &self.directory,
            date: self.selected_date,
            today,
        };
        let result = match self.config.view_mode {
            ViewMode::Day => views::render_day_timeline(ui, &view, &mut self.gestures, &mut self.drop_targets, now_px),
            ViewMode::Week => views::render_week_grid(ui, &view, &mut self.gestures, &mut self.drop_targets),
        };

        if self.gestures.is_active() {
            ui.ctx().request_repaint();
        }
        if let Some(schedule) = result.tapped {
            self.detail = Some(schedule);
        }
        if let Some(mutation) = result.committed {
            self.commit_mutation(mutation);
        }
    }

    fn render_main(&mut self, ui: &mut egui::Ui) {
        self.render_header(ui);
        ui.add_space(6.0);
        self.render_tabs(ui);
        ui.add_space(8.0);

        if self.is_offline {
            ui.add_space(40.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(egui_phosphor::regular::WIFI_SLASH)
                        .size(34.0)
                        .color(theme::error_color()),
                );
                ui.add_space(16.0);
                ui.label(RichText::new("No connection").size(20.0).color(Color32::from_rgb(200, 200, 210)));
                ui.add_space(8.0);
                ui.label(
                    RichText::new("Check your network and try again")
                        .size(14.0)
                        .color(Color32::from_rgb(120, 120, 140)),
                );
                ui.add_space(24.0);
                if ui
                    .add(
                        egui::Button::new(
                            RichText::new(format!("{} Retry", egui_phosphor::regular::ARROWS_CLOCKWISE))
                                .size(17.0)
                                .color(Color32::WHITE),
                        )
                        .fill(theme::accent())
                        .rounding(6.0),
                    )
                    .clicked()
                {
                    self.is_offline = false;
                    self.refresh_data();
                }
            });
            return;
        }

        match self.tab {
            Tab::Board => self.render_board(ui),
            Tab::Sites => {
                let today = Local::now().date_naive();
                if let Some(date) =
                    views::render_site_list(ui, &self.directory, self.book.all(), today, &mut self.site_query)
                {
                    self.selected_date = date;
                    self.config.view_mode = ViewMode::Day;
                    self.tab = Tab::Board;
                }
            }
            Tab::Add => {
                let action = views::render_schedule_form(
                    ui,
                    &mut self.draft,
                    &self.directory,
                    self.form_error.as_deref(),
                    self.creating,
                );
                match action {
                    FormAction::Submit => self.submit_draft(),
                    FormAction::Cancel => {
                        self.reset_draft();
                        self.tab = Tab::Board;
                    }
                    FormAction::None => {}
                }
            }
            Tab::Contacts => {
                views::render_contacts(ui, &self.directory, &mut self.contact_query, &mut self.contact_filter);
            }
        }
    }

    fn render_settings(&mut self, ui: &mut egui::Ui) {
        let section_color = Color32::from_rgb(140, 140, 160);

        ui.label(RichText::new("Connection").color(section_color).strong());
        ui.add_space(8.0);

        egui::Grid::new("connection_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                ui.label("Store URL");
                ui.add(egui::TextEdit::singleline(&mut self.settings_url).desired_width(350.0));
                ui.end_row();

                ui.label("API key");
                ui.add(
                    egui::TextEdit::singleline(&mut self.settings_key)
                        .password(true)
                        .hint_text("Leave blank to keep existing")
                        .desired_width(350.0),
                );
                ui.end_row();

                ui.label("");
                ui.checkbox(&mut self.settings_sample_data, "Use sample data");
                ui.end_row();
            });

        ui.add_space(20.0);

        ui.label(RichText::new("Board").color(section_color).strong());
        ui.add_space(8.0);

        egui::Grid::new("board_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                ui.label("Font scale");
                ui.horizontal(|ui| {
                    ui.add(egui::Slider::new(&mut self.settings_font_scale, 0.75..=2.0).show_value(false));
                    ui.label(format!("{:.0}%", self.settings_font_scale * 100.0));
                });
                ui.end_row();

                ui.label("Visible hours");
                ui.horizontal(|ui| {
                    ui.add(egui::DragValue::new(&mut self.settings_start_hour).range(0..=23).suffix(":00"));
                    ui.label("to");
                    ui.add(egui::DragValue::new(&mut self.settings_end_hour).range(1..=23).suffix(":00"));
                });
                ui.end_row();

                ui.label("Snap");
                ui.horizontal(|ui| {
                    for minutes in [5, 10, 15, 30] {
                        ui.radio_value(&mut self.settings_snap, minutes, format!("{} min", minutes));
                    }
                });
                ui.end_row();

                ui.label("Minimum length");
                ui.add(egui::DragValue::new(&mut self.settings_min_duration).range(5..=240).suffix(" min"));
                ui.end_row();
            });

        ui.add_space(24.0);

        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                self.save_settings();
            }
            if ui.button("Cancel").clicked() {
                self.show_settings = false;
            }
        });
    }

    fn advance_progress(&mut self, ctx: &egui::Context) {
        let elapsed = self.progress_start.elapsed().as_secs_f32();
        match self.progress_phase {
            ProgressPhase::Idle => return,
            ProgressPhase::FastStart => {
                self.progress = (elapsed / 0.25 * 0.17).min(0.17);
                if elapsed >= 0.25 {
                    self.progress_phase = ProgressPhase::SlowCrawl;
                    self.progress_start = Instant::now();
                }
            }
            ProgressPhase::SlowCrawl => {
                self.progress = 0.17 + (elapsed / 7.5 * 0.33).min(0.33);
            }
            ProgressPhase::Completing => {
                let t = (elapsed / 0.15).min(1.0);
                self.progress += (1.0 - self.progress) * t;
                if elapsed >= 0.15 {
                    self.progress = 1.0;
                    self.progress_phase = ProgressPhase::FadingOut;
                    self.progress_start = Instant::now();
                }
            }
            ProgressPhase::FadingOut => {
                if elapsed >= 0.3 {
                    self.progress_phase = ProgressPhase::Idle;
                    self.progress = 0.0;
                }
            }
            ProgressPhase::Shrinking => {
                let t = (elapsed / 0.2).min(1.0);
                self.progress *= 1.0 - t;
                if elapsed >= 0.2 {
                    self.progress_phase = ProgressPhase::Idle;
                    self.progress = 0.0;
                }
            }
        }
        ctx.request_repaint();
    }

    fn paint_progress(&self, ui: &mut egui::Ui) {
        let bar_height = 4.0;
        let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), bar_height), egui::Sense::hover());
        if self.progress_phase == ProgressPhase::Idle || self.progress <= 0.0 || !ui.is_rect_visible(rect) {
            return;
        }
        let alpha = if self.progress_phase == ProgressPhase::FadingOut {
            let t = self.progress_start.elapsed().as_secs_f32() / 0.3;
            ((1.0 - t).max(0.0) * 255.0) as u8
        } else {
            255
        };
        let bar = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width() * self.progress, bar_height));
        let (r, g, b, _) = theme::accent().to_tuple();
        ui.painter().rect_filled(bar, 0.0, Color32::from_rgba_unmultiplied(r, g, b, alpha));
    }

    fn render_status(&mut self, ui: &mut egui::Ui) {
        let mut dismiss = false;
        let mut copy: Option<String> = None;
        if let Some((msg, is_error)) = &self.status_message {
            let color = if *is_error { theme::error_color() } else { theme::success_color() };
            let dim_color = Color32::from_rgb(120, 120, 130);
            ui.horizontal(|ui| {
                ui.add(egui::Label::new(RichText::new(msg).color(color)));
                ui.add_space(8.0);

                let copy_btn = ui.add(egui::Label::new(
                    RichText::new(egui_phosphor::regular::COPY).size(14.0).color(dim_color),
                ).sense(egui::Sense::click()));
                if copy_btn.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                if copy_btn.clicked() {
                    copy = Some(msg.clone());
                }

                let close_btn = ui.add(egui::Label::new(
                    RichText::new(egui_phosphor::regular::X).size(14.0).color(dim_color),
                ).sense(egui::Sense::click()));
                if close_btn.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                if close_btn.clicked() {
                    dismiss = true;
                }
            });
            ui.add_space(8.0);
        }
        if let Some(text) = copy {
            ui.ctx().copy_text(text);
        }
        if dismiss {
            self.status_message = None;
        }
    }

    fn dialog_frame() -> egui::Frame {
        let (content_bg, frame_color, _) = theme::dialog_colors();
        egui::Frame::none()
            .fill(content_bg)
            .stroke(egui::Stroke::new(2.0, frame_color))
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::same(20.0))
    }

    fn render_dialogs(&mut self, ctx: &egui::Context) {
        if self.show_settings {
            egui::Window::new("Settings")
                .collapsible(false)
                .resizable(false)
                .default_width(600.0)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .frame(Self::dialog_frame())
                .show(ctx, |ui| {
                    self.render_settings(ui);
                });
        }

        if let Some(schedule) = self.detail.clone() {
            let mut action = DetailAction::None;
            egui::Window::new("Schedule")
                .collapsible(false)
                .resizable(false)
                .default_width(380.0)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .frame(Self::dialog_frame())
                .show(ctx, |ui| {
                    action = views::render_schedule_detail(ui, &schedule, &self.directory);
                });
            match action {
                DetailAction::Close => self.detail = None,
                DetailAction::Delete => {
                    self.detail = None;
                    self.pending_delete = Some(schedule);
                    self.show_delete_confirm = true;
                }
                DetailAction::None => {}
            }
        }

        if self.show_delete_confirm {
            let mut do_delete = false;
            let mut cancel_delete = false;

            egui::Window::new("Confirm Delete")
                .collapsible(false)
                .resizable(false)
                .default_width(400.0)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .frame(Self::dialog_frame())
                .show(ctx, |ui| {
                    ui.add_space(10.0);
                    if let Some(schedule) = &self.pending_delete {
                        ui.label(RichText::new("Delete this schedule?").size(14.0));
                        ui.add_space(10.0);
                        ui.label(RichText::new(self.directory.site_name(schedule.site_id)).strong());
                        ui.label(format!(
                            "{} {} - {}",
                            schedule.date.format("%Y-%m-%d"),
                            schedule.time_start,
                            schedule.time_end
                        ));
                    }
                    ui.add_space(20.0);
                    ui.horizontal(|ui| {
                        if ui
                            .button(RichText::new("Delete").color(theme::error_color()))
                            .clicked()
                        {
                            do_delete = true;
                        }
                        if ui.button("Cancel").clicked() {
                            cancel_delete = true;
                        }
                    });
                });

            if do_delete {
                if let Some(schedule) = self.pending_delete.take() {
                    self.delete_schedule(&schedule);
                }
                self.show_delete_confirm = false;
            }
            if cancel_delete {
                self.pending_delete = None;
                self.show_delete_confirm = false;
            }
        }
    }
}

impl eframe::App for SiteboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pinch-to-zoom or Ctrl+scroll adjusts the font scale
        let zoom_delta = ctx.input(|i| i.zoom_delta());
        if zoom_delta != 1.0 {
            self.config.font_scale = (self.config.font_scale * zoom_delta).clamp(0.75, 2.5);
            if (zoom_delta - 1.0).abs() > 0.01 {
                if let Err(e) = self.config.save() {
                    warn!("font scale not saved: {:#}", e);
                }
            }
        }
        ctx.set_pixels_per_point(self.config.font_scale);

        self.check_async_results();
        self.advance_progress(ctx);
        self.render_dialogs(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(12.0, 0.0)))
            .show(ctx, |ui| {
                self.paint_progress(ui);
                if !self.loading {
                    self.render_status(ui);
                }

                match self.state {
                    AppState::Setup => self.render_setup(ui),
                    AppState::Main => self.render_main(ui),
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_without_a_store_explain_why() {
        let err = writable_store(&None).err().unwrap();
        assert!(matches!(err, StoreError::NotConfigured));
        assert_eq!(err.to_string(), "store is not configured");
    }

    #[test]
    fn writes_go_to_the_configured_store() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 9).unwrap();
        let store: Arc<dyn ScheduleStore> = Arc::new(MemoryStore::with_sample_data(today));
        let picked = writable_store(&Some(store.clone())).unwrap();
        assert!(Arc::ptr_eq(&picked, &store));
    }

    #[test]
    fn sample_config_builds_a_memory_store() {
        let config = Config { use_sample_data: true, ..Config::default() };
        let today = NaiveDate::from_ymd_opt(2025, 12, 9).unwrap();
        assert!(build_store(&config, today).is_ok());
    }
}
