use chrono::NaiveDate;
use egui::{pos2, vec2, Align2, Color32, FontId, RichText, Rounding, Sense, Stroke, Ui};

use crate::api::{Schedule, ScheduleDraft, WorkType};
use crate::board::{
    self, count_for_site_on, day_rows, is_weekend, next_schedule_for_site, week_grid, Directory, DropKey,
    DropRegistry, GestureEngine, GestureKind, GestureOutcome, Point, PointerEvent, PointerPhase, ScheduleBook,
    ScheduleMutation, Surface, TimeScale, EDGE_HANDLE_PX,
};
use super::theme;

const LABEL_WIDTH: f32 = 150.0;
const HEADER_HEIGHT: f32 = 28.0;
const ROW_HEIGHT: f32 = 52.0;
const BLOCK_PAD: f32 = 4.0;
const CHIP_HEIGHT: f32 = 34.0;
const CHIP_GAP: f32 = 4.0;
const WEEK_ROW_MIN: f32 = 64.0;
const MIN_CELL_WIDTH: f32 = 96.0;

/// What the board needs to draw one frame
pub struct BoardView<'a> {
    pub scale: &'a TimeScale,
    pub book: &'a ScheduleBook,
    pub directory: &'a Directory,
    pub date: NaiveDate,
    pub today: NaiveDate,
}

#[derive(Default)]
pub struct BoardResult {
    pub tapped: Option<Schedule>,
    pub committed: Option<ScheduleMutation>,
}

impl BoardResult {
    fn record(&mut self, outcome: GestureOutcome) {
        match outcome {
            GestureOutcome::Tap(schedule) => self.tapped = Some(schedule),
            GestureOutcome::Commit(mutation) => self.committed = Some(mutation),
            GestureOutcome::None => {}
        }
    }
}

fn to_point(pos: egui::Pos2) -> Point {
    Point::new(pos.x, pos.y)
}

fn to_board_rect(rect: egui::Rect) -> board::Rect {
    board::Rect {
        min: to_point(rect.min),
        max: to_point(rect.max),
    }
}

/// Mouse and touch both arrive through egui's pointer; reduce this frame's input to one event
fn pointer_event(ctx: &egui::Context) -> PointerEvent {
    ctx.input(|i| {
        let pos = i.pointer.latest_pos().map(to_point).unwrap_or_default();
        let phase = if i.key_pressed(egui::Key::Escape)
            || i.pointer.button_pressed(egui::PointerButton::Secondary)
        {
            PointerPhase::Cancel
        } else if i.pointer.button_released(egui::PointerButton::Primary) {
            PointerPhase::Up
        } else if i.pointer.button_pressed(egui::PointerButton::Primary) {
            PointerPhase::Down
        } else if i.pointer.button_down(egui::PointerButton::Primary) {
            PointerPhase::Move
        } else {
            // Button came up outside the window
            PointerPhase::Cancel
        };
        PointerEvent::new(pos, phase)
    })
}

/// Feed this frame's pointer to an active gesture, after every drop target is registered
fn drive_gesture(ui: &Ui, scale: &TimeScale, gestures: &mut GestureEngine, targets: &DropRegistry) -> BoardResult {
    let mut result = BoardResult::default();
    if gestures.is_active() {
        let event = pointer_event(ui.ctx());
        result.record(gestures.handle(event, scale, targets));
    }
    if gestures.dragging_id().is_some() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
    }
    result
}

/// Start a gesture when the primary button goes down on `rect`
fn press_on_block(ui: &Ui, rect: egui::Rect, schedule: &Schedule, surface: Surface, gestures: &mut GestureEngine) {
    if gestures.is_active() {
        return;
    }
    let Some(pos) = ui.ctx().pointer_latest_pos() else {
        return;
    };
    if !rect.contains(pos) || !ui.clip_rect().contains(pos) {
        return;
    }

    let kind = match surface {
        Surface::Day => GestureKind::classify(to_board_rect(rect), to_point(pos)),
        Surface::Week => GestureKind::Move,
    };
    ui.ctx().set_cursor_icon(match kind {
        GestureKind::Move => egui::CursorIcon::Grab,
        GestureKind::ResizeStart | GestureKind::ResizeEnd => egui::CursorIcon::ResizeHorizontal,
    });

    if ui.ctx().input(|i| i.pointer.button_pressed(egui::PointerButton::Primary)) {
        gestures.begin(surface, schedule, kind, to_point(pos));
    }
}

fn paint_block(painter: &egui::Painter, rect: egui::Rect, schedule: &Schedule, title: &str, subtitle: &str, faded: bool) {
    let base = theme::work_type_color(schedule.work_type);
    let fill = if faded { theme::dimmed(base) } else { base };
    painter.rect_filled(rect, Rounding::same(4.0), fill);

    let text_painter = painter.with_clip_rect(rect.shrink(2.0).intersect(painter.clip_rect()));
    let left = rect.min.x + 6.0;
    text_painter.text(
        pos2(left, rect.center().y - 7.0),
        Align2::LEFT_CENTER,
        title,
        FontId::proportional(12.0),
        Color32::WHITE,
    );
    text_painter.text(
        pos2(left, rect.center().y + 8.0),
        Align2::LEFT_CENTER,
        subtitle,
        FontId::proportional(10.0),
        Color32::from_white_alpha(210),
    );
}

/// Outline a block whose save has not come back yet
fn paint_pending(painter: &egui::Painter, rect: egui::Rect) {
    painter.rect_stroke(rect.shrink(1.0), Rounding::same(4.0), Stroke::new(1.5, theme::accent()));
}

/// Darken the resize handles of a hovered timeline block
fn paint_edge_handles(painter: &egui::Painter, rect: egui::Rect) {
    let shade = Color32::from_black_alpha(50);
    let handle = vec2(EDGE_HANDLE_PX, rect.height());
    painter.rect_filled(egui::Rect::from_min_size(rect.min, handle), Rounding::same(4.0), shade);
    painter.rect_filled(
        egui::Rect::from_min_size(pos2(rect.max.x - EDGE_HANDLE_PX, rect.min.y), handle),
        Rounding::same(4.0),
        shade,
    );
}

/// Day timeline: hours across, one row per company.
pub fn render_day_timeline(
    ui: &mut Ui,
    view: &BoardView<'_>,
    gestures: &mut GestureEngine,
    targets: &mut DropRegistry,
    now_px: Option<f32>,
) -> BoardResult {
    let (grid_line, hour_label, row_label) = theme::grid_colors();
    let (drop_highlight, _, _) = theme::board_highlights();
    let scale = view.scale;
    let rows = day_rows(scale, view.directory.companies(), view.book.all(), view.date);

    let highlighted = gestures.highlighted_target();
    let dragging = gestures.dragging_id();
    let preview = gestures.preview(scale);
    let mut ghost: Option<(egui::Rect, &Schedule)> = None;

    targets.clear();

    egui::ScrollArea::both()
        .id_salt("day_timeline")
        .drag_to_scroll(false)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let timeline_width = scale.max_offset_px();
            let size = vec2(
                LABEL_WIDTH + timeline_width,
                HEADER_HEIGHT + rows.len().max(1) as f32 * ROW_HEIGHT,
            );
            let (area, _) = ui.allocate_exact_size(size, Sense::hover());
            let painter = ui.painter();
            let origin_x = area.min.x + LABEL_WIDTH;
            let body_top = area.min.y + HEADER_HEIGHT;
            let visible = to_board_rect(ui.clip_rect());

            // Hour columns, both ends labelled
            for (i, hour) in scale.hours().enumerate() {
                let x = origin_x + scale.minutes_to_offset_px(i as i32 * 60);
                painter.text(
                    pos2(x + 4.0, area.min.y + HEADER_HEIGHT / 2.0),
                    Align2::LEFT_CENTER,
                    format!("{:02}:00", hour),
                    FontId::proportional(11.0),
                    hour_label,
                );
                painter.line_segment([pos2(x, body_top), pos2(x, area.max.y)], Stroke::new(1.0, grid_line));
            }
            painter.line_segment(
                [pos2(area.max.x, body_top), pos2(area.max.x, area.max.y)],
                Stroke::new(1.0, grid_line),
            );

            if rows.is_empty() {
                painter.text(
                    pos2(area.min.x + 8.0, body_top + ROW_HEIGHT / 2.0),
                    Align2::LEFT_CENTER,
                    "No companies yet",
                    FontId::proportional(13.0),
                    hour_label,
                );
            }

            for (row_idx, row) in rows.iter().enumerate() {
                let top = body_top + row_idx as f32 * ROW_HEIGHT;
                let row_rect = egui::Rect::from_min_size(pos2(area.min.x, top), vec2(size.x, ROW_HEIGHT));
                let key = DropKey::Row(row.company.id);
                targets.register_visible(key, to_board_rect(row_rect), visible);

                if highlighted == Some(key) {
                    painter.rect_filled(row_rect, 0.0, drop_highlight);
                }
                painter.line_segment(
                    [pos2(area.min.x, row_rect.max.y), pos2(area.max.x, row_rect.max.y)],
                    Stroke::new(1.0, grid_line),
                );
                painter.with_clip_rect(egui::Rect::from_min_size(row_rect.min, vec2(LABEL_WIDTH - 8.0, ROW_HEIGHT)))
                    .text(
                        pos2(area.min.x + 8.0, row_rect.center().y),
                        Align2::LEFT_CENTER,
                        &row.company.name,
                        FontId::proportional(13.0),
                        row_label,
                    );

                for block in &row.blocks {
                    let schedule = block.schedule;
                    let resizing = preview.filter(|p| p.schedule_id == schedule.id && p.kind != GestureKind::Move);
                    let (left, width) = match resizing {
                        Some(p) => (p.left_px, p.width_px),
                        None => (block.left_px, block.width_px),
                    };
                    let rect = egui::Rect::from_min_size(
                        pos2(origin_x + left, top + BLOCK_PAD),
                        vec2(width.max(2.0), ROW_HEIGHT - BLOCK_PAD * 2.0),
                    );

                    let subtitle = match resizing {
                        Some(p) => format!("{} - {}", p.time_start, p.time_end),
                        None => schedule.work_type.label().to_string(),
                    };
                    let faded = dragging == Some(schedule.id);
                    paint_block(painter, rect, schedule, view.directory.site_name(schedule.site_id), &subtitle, faded);
                    if view.book.is_pending(schedule.id) {
                        paint_pending(painter, rect);
                    }

                    let hovered = ui.ctx().pointer_hover_pos().is_some_and(|p| rect.contains(p));
                    if hovered && !gestures.is_active() {
                        paint_edge_handles(painter, rect);
                    }
                    if faded {
                        ghost = Some((rect, schedule));
                    }

                    press_on_block(ui, rect, schedule, Surface::Day, gestures);
                }
            }

            if let Some(x) = now_px {
                let x = origin_x + x;
                painter.line_segment([pos2(x, body_top), pos2(x, area.max.y)], Stroke::new(2.0, theme::now_line_color()));
            }
        });

    // Floating copy of the moved block, following the pointer
    if let (Some((rect, schedule)), Some(p)) = (ghost, preview) {
        let painter = ui.ctx().layer_painter(egui::LayerId::new(egui::Order::Tooltip, egui::Id::new("day_ghost")));
        let moved = rect.translate(vec2(p.offset.x, p.offset.y));
        let times = format!("{} - {}", p.time_start, p.time_end);
        paint_block(&painter, moved, schedule, view.directory.site_name(schedule.site_id), &times, false);
        painter.rect_stroke(moved, Rounding::same(4.0), Stroke::new(1.5, Color32::WHITE));
    }

    drive_gesture(ui, scale, gestures, targets)
}

/// Week grid: Monday to Sunday across, one row per company.
pub fn render_week_grid(
    ui: &mut Ui,
    view: &BoardView<'_>,
    gestures: &mut GestureEngine,
    targets: &mut DropRegistry,
) -> BoardResult {
    let (grid_line, hour_label, row_label) = theme::grid_colors();
    let (drop_highlight, today_bg, weekend_tint) = theme::board_highlights();
    let grid = week_grid(view.directory.companies(), view.book.all(), view.date);

    let highlighted = gestures.highlighted_target();
    let dragging = gestures.dragging_id();
    let preview = gestures.preview(view.scale);
    let mut ghost: Option<(egui::Rect, &Schedule)> = None;

    targets.clear();

    egui::ScrollArea::vertical()
        .id_salt("week_grid")
        .drag_to_scroll(false)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let cell_width = ((ui.available_width() - LABEL_WIDTH) / 7.0).max(MIN_CELL_WIDTH);
            let row_heights: Vec<f32> = grid
                .rows
                .iter()
                .map(|row| {
                    let stacked = row.cells.iter().map(|c| c.schedules.len()).max().unwrap_or(0);
                    (stacked as f32 * (CHIP_HEIGHT + CHIP_GAP) + CHIP_GAP * 2.0).max(WEEK_ROW_MIN)
                })
                .collect();
            let size = vec2(
                LABEL_WIDTH + cell_width * 7.0,
                HEADER_HEIGHT + row_heights.iter().sum::<f32>(),
            );
            let (area, _) = ui.allocate_exact_size(size, Sense::hover());
            let painter = ui.painter();
            let columns_x = area.min.x + LABEL_WIDTH;
            let visible = to_board_rect(ui.clip_rect());

            for (i, date) in grid.dates.iter().enumerate() {
                let x = columns_x + i as f32 * cell_width;
                let column = egui::Rect::from_min_max(pos2(x, area.min.y), pos2(x + cell_width, area.max.y));
                if *date == view.today {
                    painter.rect_filled(column, 0.0, today_bg);
                } else if is_weekend(*date) {
                    painter.rect_filled(
                        egui::Rect::from_min_size(column.min, vec2(cell_width, HEADER_HEIGHT)),
                        0.0,
                        weekend_tint,
                    );
                }
                let label_color = if *date == view.today { theme::accent() } else { hour_label };
                painter.text(
                    pos2(column.center().x, area.min.y + HEADER_HEIGHT / 2.0),
                    Align2::CENTER_CENTER,
                    date.format("%a %-m/%-d").to_string(),
                    FontId::proportional(12.0),
                    label_color,
                );
                painter.line_segment([column.left_top(), column.left_bottom()], Stroke::new(1.0, grid_line));
            }

            let mut top = area.min.y + HEADER_HEIGHT;
            for (row, height) in grid.rows.iter().zip(&row_heights) {
                painter.line_segment([pos2(area.min.x, top), pos2(area.max.x, top)], Stroke::new(1.0, grid_line));
                painter.with_clip_rect(egui::Rect::from_min_size(pos2(area.min.x, top), vec2(LABEL_WIDTH - 8.0, *height)))
                    .text(
                        pos2(area.min.x + 8.0, top + height / 2.0),
                        Align2::LEFT_CENTER,
                        &row.company.name,
                        FontId::proportional(13.0),
                        row_label,
                    );

                for (i, cell) in row.cells.iter().enumerate() {
                    let cell_rect = egui::Rect::from_min_size(
                        pos2(columns_x + i as f32 * cell_width, top),
                        vec2(cell_width, *height),
                    );
                    let key = DropKey::Cell(cell.date, cell.company_id);
                    targets.register_visible(key, to_board_rect(cell_rect), visible);
                    if highlighted == Some(key) {
                        painter.rect_filled(cell_rect, 0.0, drop_highlight);
                    }

                    for (n, schedule) in cell.schedules.iter().enumerate() {
                        let chip = egui::Rect::from_min_size(
                            pos2(cell_rect.min.x + CHIP_GAP, cell_rect.min.y + CHIP_GAP + n as f32 * (CHIP_HEIGHT + CHIP_GAP)),
                            vec2(cell_width - CHIP_GAP * 2.0, CHIP_HEIGHT),
                        );
                        let times = format!("{}-{}", schedule.time_start, schedule.time_end);
                        let faded = dragging == Some(schedule.id);
                        paint_block(painter, chip, schedule, view.directory.site_name(schedule.site_id), &times, faded);
                        if view.book.is_pending(schedule.id) {
                            paint_pending(painter, chip);
                        }
                        if faded {
                            ghost = Some((chip, *schedule));
                        }
                        press_on_block(ui, chip, schedule, Surface::Week, gestures);
                    }
                }
                top += height;
            }
            painter.line_segment([pos2(area.min.x, top), pos2(area.max.x, top)], Stroke::new(1.0, grid_line));
        });

    if let (Some((rect, schedule)), Some(p)) = (ghost, preview) {
        let painter = ui.ctx().layer_painter(egui::LayerId::new(egui::Order::Tooltip, egui::Id::new("week_ghost")));
        let moved = rect.translate(vec2(p.offset.x, p.offset.y));
        let times = format!("{}-{}", schedule.time_start, schedule.time_end);
        paint_block(&painter, moved, schedule, view.directory.site_name(schedule.site_id), &times, false);
        painter.rect_stroke(moved, Rounding::same(4.0), Stroke::new(1.5, Color32::WHITE));
    }

    drive_gesture(ui, view.scale, gestures, targets)
}

fn swatch(ui: &mut Ui, work_type: WorkType) {
    ui.label(
        RichText::new(egui_phosphor::fill::CIRCLE)
            .family(theme::phosphor_fill_family())
            .size(12.0)
            .color(theme::work_type_color(work_type)),
    );
}

pub fn render_legend(ui: &mut Ui) {
    ui.horizontal_wrapped(|ui| {
        for work_type in WorkType::ALL {
            ui.spacing_mut().item_spacing.x = 4.0;
            swatch(ui, work_type);
            ui.label(RichText::new(work_type.label()).size(12.0));
            ui.add_space(10.0);
        }
    });
}

fn search_box(ui: &mut Ui, query: &mut String, hint: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(egui_phosphor::regular::MAGNIFYING_GLASS).color(Color32::GRAY));
        ui.add(
            egui::TextEdit::singleline(query)
                .hint_text(hint)
                .desired_width(f32::INFINITY),
        );
    });
}

/// Site cards with today's load and the next visit. Returns the date to jump to when a card is clicked.
pub fn render_site_list(
    ui: &mut Ui,
    directory: &Directory,
    schedules: &[Schedule],
    today: NaiveDate,
    query: &mut String,
) -> Option<NaiveDate> {
    let mut jump_to = None;
    let (_, hour_label, _) = theme::grid_colors();

    search_box(ui, query, "Search by site name or address...");
    ui.add_space(8.0);

    let sites = directory.filter_sites(query);
    if sites.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(RichText::new("No matching sites").color(hour_label));
        });
        return None;
    }

    egui::ScrollArea::vertical().id_salt("site_list").show(ui, |ui| {
        for site in sites {
            let today_count = count_for_site_on(schedules, site.id, today);
            let next = next_schedule_for_site(schedules, site.id, today);

            let frame = egui::Frame::none()
                .fill(ui.visuals().faint_bg_color)
                .rounding(Rounding::same(8.0))
                .inner_margin(egui::Margin::same(12.0))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&site.name).strong());
                        if today_count > 0 {
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.label(RichText::new(format!("Today: {}", today_count)).color(theme::accent()));
                            });
                        }
                    });
                    if !site.address.is_empty() {
                        ui.label(
                            RichText::new(format!("{} {}", egui_phosphor::regular::MAP_PIN, site.address))
                                .size(12.0)
                                .color(hour_label),
                        );
                    }
                    if let Some(next) = next {
                        ui.horizontal(|ui| {
                            swatch(ui, next.work_type);
                            ui.label(
                                RichText::new(format!(
                                    "Next: {} {} - {} {}",
                                    next.date.format("%-m/%-d"),
                                    next.time_start,
                                    next.time_end,
                                    next.work_type.label()
                                ))
                                .size(12.0),
                            );
                        });
                    }
                });

            let response = ui.interact(frame.response.rect, ui.id().with(("site", site.id)), Sense::click());
            if response.hovered() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            }
            if response.clicked() {
                jump_to = next.map(|s| s.date);
            }
            ui.add_space(6.0);
        }
    });

    jump_to
}

pub fn render_contacts(ui: &mut Ui, directory: &Directory, query: &mut String, filter: &mut Option<WorkType>) {
    let (_, hour_label, _) = theme::grid_colors();

    search_box(ui, query, "Search by company name...");
    ui.add_space(6.0);
    ui.horizontal_wrapped(|ui| {
        ui.selectable_value(filter, None, "All");
        for work_type in WorkType::ALL {
            ui.selectable_value(filter, Some(work_type), work_type.label());
        }
    });
    ui.add_space(8.0);

    let companies = directory.filter_companies(query, *filter);
    if companies.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(RichText::new("No matching contacts").color(hour_label));
        });
        return;
    }

    egui::ScrollArea::vertical().id_salt("contacts").show(ui, |ui| {
        for company in companies {
            egui::Frame::none()
                .fill(ui.visuals().faint_bg_color)
                .rounding(Rounding::same(8.0))
                .inner_margin(egui::Margin::same(12.0))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        swatch(ui, company.work_type);
                        ui.label(RichText::new(&company.name).strong());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(RichText::new(company.work_type.label()).size(12.0).color(hour_label));
                        });
                    });
                });
            ui.add_space(6.0);
        }
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Cancel,
}

pub fn render_schedule_form(
    ui: &mut Ui,
    draft: &mut ScheduleDraft,
    directory: &Directory,
    error: Option<&str>,
    busy: bool,
) -> FormAction {
    let mut action = FormAction::None;

    egui::Grid::new("schedule_form")
        .num_columns(2)
        .spacing([20.0, 10.0])
        .show(ui, |ui| {
            ui.label("Company");
            let company_text = draft
                .company_id
                .map(|id| directory.company_name(id).to_string())
                .unwrap_or_else(|| "Select company".to_string());
            egui::ComboBox::from_id_salt("form_company")
                .selected_text(company_text)
                .width(260.0)
                .show_ui(ui, |ui| {
                    for company in directory.companies() {
                        ui.selectable_value(&mut draft.company_id, Some(company.id), &company.name);
                    }
                });
            ui.end_row();

            ui.label("Site");
            let site_text = draft
                .site_id
                .map(|id| directory.site_name(id).to_string())
                .unwrap_or_else(|| "Select site".to_string());
            egui::ComboBox::from_id_salt("form_site")
                .selected_text(site_text)
                .width(260.0)
                .show_ui(ui, |ui| {
                    for site in directory.sites() {
                        ui.selectable_value(&mut draft.site_id, Some(site.id), &site.name);
                    }
                });
            ui.end_row();

            ui.label("Date");
            ui.add(egui::TextEdit::singleline(&mut draft.date).hint_text("YYYY-MM-DD").desired_width(120.0));
            ui.end_row();

            ui.label("Time");
            ui.horizontal(|ui| {
                ui.add(egui::TextEdit::singleline(&mut draft.time_start).hint_text("09:00").desired_width(60.0));
                ui.label("-");
                ui.add(egui::TextEdit::singleline(&mut draft.time_end).hint_text("17:00").desired_width(60.0));
            });
            ui.end_row();

            ui.label("Work type");
            ui.horizontal(|ui| {
                swatch(ui, draft.work_type);
                egui::ComboBox::from_id_salt("form_work_type")
                    .selected_text(draft.work_type.label())
                    .width(200.0)
                    .show_ui(ui, |ui| {
                        for work_type in WorkType::ALL {
                            ui.selectable_value(&mut draft.work_type, work_type, work_type.label());
                        }
                    });
            });
            ui.end_row();
        });

    if let Some(error) = error {
        ui.add_space(6.0);
        ui.label(RichText::new(error).color(theme::error_color()));
    }

    ui.add_space(12.0);
    ui.add_enabled_ui(!busy, |ui| {
        ui.horizontal(|ui| {
            if ui.button(format!("{} Add schedule", egui_phosphor::regular::PLUS)).clicked() {
                action = FormAction::Submit;
            }
            if ui.button("Cancel").clicked() {
                action = FormAction::Cancel;
            }
        });
    });

    action
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    None,
    Close,
    Delete,
}

/// Body of the sheet shown when a schedule is tapped
pub fn render_schedule_detail(ui: &mut Ui, schedule: &Schedule, directory: &Directory) -> DetailAction {
    let mut action = DetailAction::None;
    let (_, hour_label, _) = theme::grid_colors();

    ui.label(RichText::new(directory.site_name(schedule.site_id)).size(18.0).strong());
    ui.horizontal(|ui| {
        swatch(ui, schedule.work_type);
        ui.label(schedule.work_type.label());
    });
    ui.add_space(8.0);

    egui::Grid::new("schedule_detail")
        .num_columns(2)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            ui.label(RichText::new("Company").color(hour_label));
            ui.label(directory.company_name(schedule.company_id));
            ui.end_row();

            ui.label(RichText::new("Date").color(hour_label));
            ui.label(schedule.date.format("%Y-%m-%d (%a)").to_string());
            ui.end_row();

            ui.label(RichText::new("Time").color(hour_label));
            ui.label(format!("{} - {}", schedule.time_start, schedule.time_end));
            ui.end_row();

            ui.label(RichText::new("Address").color(hour_label));
            ui.label(directory.site_address(schedule.site_id));
            ui.end_row();
        });

    ui.add_space(16.0);
    ui.horizontal(|ui| {
        let delete = egui::Button::new(
            RichText::new(format!("{} Delete", egui_phosphor::regular::TRASH)).color(theme::error_color()),
        );
        if ui.add(delete).clicked() {
            action = DetailAction::Delete;
        }
        if ui.button("Close").clicked() {
            action = DetailAction::Close;
        }
    });

    action
}
