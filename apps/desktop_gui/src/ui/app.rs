use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use hierarchy::{
    build, layered_layout, HierarchyError, TreeLayout, SURFACE_HEIGHT, SURFACE_MARGIN,
    SURFACE_WIDTH,
};
use shared::domain::{PersonId, PersonRecord};
use shared::protocol::AppendRequest;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

const NODE_RADIUS: f32 = 10.0;
const LABEL_OFFSET: f32 = 20.0;
// steelblue nodes on #ccc edges, as the tree has always been drawn.
const NODE_FILL: egui::Color32 = egui::Color32::from_rgb(70, 130, 180);
const EDGE_COLOR: egui::Color32 = egui::Color32::from_rgb(204, 204, 204);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

impl StatusBanner {
    fn info(message: impl Into<String>) -> Self {
        Self {
            severity: StatusBannerSeverity::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: StatusBannerSeverity::Error,
            message: message.into(),
        }
    }
}

/// The add-member window's field state. Fields stay raw text until submit;
/// coercion happens on the backend's success path, the same as for fetched
/// rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct AddMemberForm {
    id: String,
    name: String,
    father_id: String,
    mother_id: String,
    in_flight: bool,
}

impl AddMemberForm {
    fn to_request(&self) -> AppendRequest {
        AppendRequest {
            id: self.id.clone(),
            name: self.name.clone(),
            father_id: self.father_id.clone(),
            mother_id: self.mother_id.clone(),
        }
    }
}

/// Derived drawing state, rebuilt only when the roster changes. A broken
/// hierarchy is a visible state of the canvas, not a crash.
#[derive(Debug, Clone, PartialEq)]
enum TreeView {
    Empty,
    Ready(TreeLayout),
    Broken(HierarchyError),
}

pub struct FamilyTreeApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    /// The in-memory roster; owned here exclusively and mutated only by
    /// [`FamilyTreeApp::apply_event`].
    roster: Vec<PersonRecord>,
    fetch_generation: u64,
    fetch_in_flight: bool,
    tree_view: TreeView,
    add_form: Option<AddMemberForm>,
    banner: Option<StatusBanner>,
    status: String,
}

impl FamilyTreeApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            roster: Vec::new(),
            fetch_generation: 0,
            fetch_in_flight: false,
            tree_view: TreeView::Empty,
            add_form: None,
            banner: None,
            status: String::new(),
        };
        app.request_fetch();
        app
    }

    fn request_fetch(&mut self) {
        self.fetch_generation += 1;
        self.fetch_in_flight = true;
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchRoster {
                generation: self.fetch_generation,
            },
            &mut self.status,
        );
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    /// Single mutation entry point for roster state.
    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::RosterLoaded {
                generation,
                persons,
            } => {
                if generation != self.fetch_generation {
                    tracing::debug!(
                        generation,
                        current = self.fetch_generation,
                        "dropping stale roster response"
                    );
                    return;
                }
                self.fetch_in_flight = false;
                self.roster = persons;
                self.rebuild_tree();
                self.status = format!("{} records loaded", self.roster.len());
            }
            UiEvent::FetchFailed { generation } => {
                if generation != self.fetch_generation {
                    tracing::debug!(generation, "dropping stale fetch failure");
                    return;
                }
                // Diagnostics already went to the log; the roster keeps its
                // previous value and no error state is shown for reads.
                self.fetch_in_flight = false;
            }
            UiEvent::PersonAppended { person } => {
                self.add_form = None;
                self.roster.push(person);
                self.rebuild_tree();
                self.banner = Some(StatusBanner::info("Data added successfully"));
            }
            UiEvent::AppendRejected { message } => {
                if let Some(form) = self.add_form.as_mut() {
                    form.in_flight = false;
                }
                self.banner = Some(StatusBanner::error(format!(
                    "Remote store rejected the entry: {message}"
                )));
            }
            UiEvent::AppendFailed { reason } => {
                if let Some(form) = self.add_form.as_mut() {
                    form.in_flight = false;
                }
                self.banner = Some(StatusBanner::error(format!(
                    "Could not add the entry: {reason}"
                )));
            }
            UiEvent::BackendGone { reason } => {
                self.banner = Some(StatusBanner::error(format!(
                    "Backend worker failed to start: {reason}"
                )));
            }
        }
    }

    fn rebuild_tree(&mut self) {
        self.tree_view = if self.roster.is_empty() {
            TreeView::Empty
        } else {
            match build(&self.roster) {
                Ok(tree) => TreeView::Ready(layered_layout(
                    &tree,
                    SURFACE_WIDTH - 2.0 * SURFACE_MARGIN,
                    SURFACE_HEIGHT - 2.0 * SURFACE_MARGIN,
                )),
                Err(err) => TreeView::Broken(err),
            }
        };
    }

    fn show_banner_panel(&mut self, ctx: &egui::Context) {
        let Some(banner) = self.banner.clone() else {
            return;
        };
        let mut dismiss = false;
        egui::TopBottomPanel::top("status_banner").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let color = match banner.severity {
                    StatusBannerSeverity::Info => ui.visuals().strong_text_color(),
                    StatusBannerSeverity::Error => ui.visuals().error_fg_color,
                };
                ui.colored_label(color, &banner.message);
                if ui.small_button("Dismiss").clicked() {
                    dismiss = true;
                }
            });
        });
        if dismiss {
            self.banner = None;
        }
    }

    fn show_action_bar(&mut self, ctx: &egui::Context) {
        let mut open_form = false;
        let mut refresh = false;
        egui::TopBottomPanel::bottom("action_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Tambah Anggota").clicked() {
                    open_form = true;
                }
                if ui
                    .add_enabled(!self.fetch_in_flight, egui::Button::new("Refresh"))
                    .clicked()
                {
                    refresh = true;
                }
                ui.separator();
                ui.label(&self.status);
            });
        });
        if open_form && self.add_form.is_none() {
            self.add_form = Some(AddMemberForm::default());
        }
        if refresh {
            self.request_fetch();
        }
    }

    fn show_roster_table(&self, ui: &mut egui::Ui) {
        ui.heading("Tabel Silsilah Keluarga");
        ui.add_space(4.0);
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("roster_grid")
                .striped(true)
                .num_columns(4)
                .min_col_width(60.0)
                .show(ui, |ui| {
                    ui.strong("ID");
                    ui.strong("Nama");
                    ui.strong("Ayah ID");
                    ui.strong("Ibu ID");
                    ui.end_row();
                    // One row per roster record, unfiltered and unsorted;
                    // the table reads the roster, never the tree.
                    for person in &self.roster {
                        ui.label(person.id.as_str());
                        ui.label(&person.name);
                        ui.label(parent_cell(&person.father_id));
                        ui.label(parent_cell(&person.mother_id));
                        ui.end_row();
                    }
                });
        });
    }

    fn show_tree_canvas(&self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(egui::vec2(SURFACE_WIDTH, SURFACE_HEIGHT), egui::Sense::hover());
        let surface = response.rect;
        painter.rect_filled(
            surface,
            egui::CornerRadius::ZERO,
            ui.visuals().extreme_bg_color,
        );
        painter.rect_stroke(
            surface,
            egui::CornerRadius::ZERO,
            egui::Stroke::new(1.0, EDGE_COLOR),
            egui::StrokeKind::Middle,
        );

        match &self.tree_view {
            TreeView::Empty => {}
            TreeView::Broken(err) => {
                painter.text(
                    surface.center(),
                    egui::Align2::CENTER_CENTER,
                    format!("Cannot draw tree: {err}"),
                    egui::FontId::proportional(14.0),
                    ui.visuals().error_fg_color,
                );
            }
            TreeView::Ready(layout) => {
                let origin = surface.min + egui::vec2(SURFACE_MARGIN, SURFACE_MARGIN);
                for &(parent, child) in &layout.edges {
                    let a = origin + egui::vec2(layout.nodes[parent].x, layout.nodes[parent].y);
                    let b = origin + egui::vec2(layout.nodes[child].x, layout.nodes[child].y);
                    painter.line_segment([a, b], egui::Stroke::new(1.0, EDGE_COLOR));
                }
                for node in &layout.nodes {
                    let center = origin + egui::vec2(node.x, node.y);
                    painter.circle_filled(center, NODE_RADIUS, NODE_FILL);
                    painter.text(
                        center - egui::vec2(0.0, LABEL_OFFSET),
                        egui::Align2::CENTER_BOTTOM,
                        &node.label,
                        egui::FontId::proportional(12.0),
                        ui.visuals().strong_text_color(),
                    );
                }
            }
        }
    }

    fn show_add_form(&mut self, ctx: &egui::Context) {
        let Some(form) = self.add_form.as_mut() else {
            return;
        };
        let mut submit = false;
        let mut cancel = false;
        egui::Window::new("Tambah Anggota")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("add_member_form")
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label("ID");
                        ui.text_edit_singleline(&mut form.id);
                        ui.end_row();
                        ui.label("Nama");
                        ui.text_edit_singleline(&mut form.name);
                        ui.end_row();
                        ui.label("Ayah ID");
                        ui.text_edit_singleline(&mut form.father_id);
                        ui.end_row();
                        ui.label("Ibu ID");
                        ui.text_edit_singleline(&mut form.mother_id);
                        ui.end_row();
                    });
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if form.in_flight {
                        ui.add_enabled(false, egui::Button::new("Submitting..."));
                    } else if ui.button("Submit").clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if submit {
            form.in_flight = true;
            let request = form.to_request();
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::AppendPerson { request },
                &mut self.status,
            );
        } else if cancel {
            // Explicit cancellation outcome; nothing was sent anywhere.
            tracing::debug!("add-member interaction cancelled");
            self.add_form = None;
        }
    }
}

fn parent_cell(parent: &Option<PersonId>) -> &str {
    parent.as_ref().map(PersonId::as_str).unwrap_or("")
}

impl eframe::App for FamilyTreeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_banner_panel(ctx);
        self.show_action_bar(ctx);
        egui::SidePanel::left("roster_table")
            .default_width(420.0)
            .show(ctx, |ui| self.show_roster_table(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.show_tree_canvas(ui));
        self.show_add_form(ctx);

        // Keep polling the event queue while a request may be in flight.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
