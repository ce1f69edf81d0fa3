use std::sync::mpsc;

use eframe::egui;

use crate::cleaner::{self, ReclaimOutcome};
use crate::privilege;
use crate::roots;
use crate::scanner::{self, Inventory};
use crate::snapshot::{self, SystemMetrics};
use crate::startup::{self, StartupEntry};
use crate::utils;

/// Messages sent from background threads to the UI thread. One message per
/// finished operation; the engine returns complete values, not a live feed.
enum BgMessage {
    ScanDone(Inventory),
    ReclaimDone(ReclaimOutcome),
    MetricsDone(SystemMetrics),
    StartupDone(Vec<StartupEntry>),
}

/// Overall application operation state.
#[derive(PartialEq)]
enum AppPhase {
    Idle,
    Scanning,
    Cleaning,
}

/// Which view the navigation sidebar has selected.
#[derive(PartialEq, Clone, Copy)]
enum Pane {
    Dashboard,
    Optimizer,
    Tools,
}

/// Confirmation dialog state.
struct ConfirmDialog {
    visible: bool,
    item_count: usize,
    total_bytes: u64,
    breakdown: Vec<String>,
}

pub struct ZenithApp {
    pane: Pane,
    phase: AppPhase,
    sender: mpsc::Sender<BgMessage>,
    receiver: mpsc::Receiver<BgMessage>,
    elevated: bool,
    status: String,
    inventory: Option<Inventory>,
    last_outcome: Option<ReclaimOutcome>,
    confirm_dialog: ConfirmDialog,
    startup_entries: Option<Vec<StartupEntry>>,
    startup_loading: bool,
    metrics: Option<SystemMetrics>,
    metrics_loading: bool,
}

impl ZenithApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let (sender, receiver) = mpsc::channel::<BgMessage>();
        Self {
            pane: Pane::Dashboard,
            phase: AppPhase::Idle,
            sender,
            receiver,
            elevated: privilege::is_elevated(),
            status: "Click \"Analyze System\" to check for junk files.".to_string(),
            inventory: None,
            last_outcome: None,
            confirm_dialog: ConfirmDialog {
                visible: false,
                item_count: 0,
                total_bytes: 0,
                breakdown: vec![],
            },
            startup_entries: None,
            startup_loading: false,
            metrics: None,
            metrics_loading: false,
        }
    }

    fn start_scan(&mut self) {
        self.phase = AppPhase::Scanning;
        self.status = "Analyzing system files...".to_string();
        self.inventory = None;
        self.last_outcome = None;

        let tx = self.sender.clone();
        std::thread::spawn(move || {
            let scan_roots = roots::resolve_roots();
            let inventory = scanner::scan(&scan_roots);
            let _ = tx.send(BgMessage::ScanDone(inventory));
        });
    }

    fn start_clean(&mut self) {
        self.confirm_dialog.visible = false;
        let Some(inventory) = self.inventory.take() else {
            return;
        };
        self.phase = AppPhase::Cleaning;
        self.status = "Cleaning up junk files...".to_string();

        let tx = self.sender.clone();
        std::thread::spawn(move || {
            let outcome = cleaner::reclaim(&inventory.items);
            let _ = tx.send(BgMessage::ReclaimDone(outcome));
        });
    }

    fn load_startup_entries(&mut self) {
        if self.startup_loading {
            return;
        }
        self.startup_loading = true;

        let tx = self.sender.clone();
        std::thread::spawn(move || {
            let entries = startup::list_entries();
            let _ = tx.send(BgMessage::StartupDone(entries));
        });
    }

    fn load_metrics(&mut self) {
        if self.metrics_loading {
            return;
        }
        self.metrics_loading = true;

        let tx = self.sender.clone();
        std::thread::spawn(move || {
            let metrics = snapshot::capture();
            let _ = tx.send(BgMessage::MetricsDone(metrics));
        });
    }

    fn select_pane(&mut self, pane: Pane) {
        self.pane = pane;
        // Entering a view refreshes its data.
        match pane {
            Pane::Optimizer => self.load_startup_entries(),
            Pane::Tools => self.load_metrics(),
            Pane::Dashboard => {}
        }
    }

    fn drain_messages(&mut self) {
        while let Ok(msg) = self.receiver.try_recv() {
            match msg {
                BgMessage::ScanDone(inventory) => {
                    self.phase = AppPhase::Idle;
                    self.status = if inventory.is_empty() {
                        "System is clean. No junk files found.".to_string()
                    } else {
                        format!(
                            "Analysis complete. Found {:.2} MB of junk across {} items.",
                            inventory.total_size_mb(),
                            inventory.len()
                        )
                    };
                    self.inventory = Some(inventory);
                }
                BgMessage::ReclaimDone(outcome) => {
                    self.phase = AppPhase::Idle;
                    self.status = if outcome.failed_count() == 0 {
                        "System is clean and optimized!".to_string()
                    } else {
                        format!(
                            "Cleanup complete. Could not delete {} item(s) (likely in use).",
                            outcome.failed_count()
                        )
                    };
                    self.last_outcome = Some(outcome);
                }
                BgMessage::StartupDone(entries) => {
                    self.startup_loading = false;
                    self.startup_entries = Some(entries);
                }
                BgMessage::MetricsDone(metrics) => {
                    self.metrics_loading = false;
                    self.metrics = Some(metrics);
                }
            }
        }
    }

    fn show_confirm_dialog(&mut self) {
        let Some(ref inventory) = self.inventory else {
            return;
        };

        let mut files = 0usize;
        let mut links = 0usize;
        let mut dirs = 0usize;
        for item in &inventory.items {
            match item.kind {
                crate::scanner::CandidateKind::File => files += 1,
                crate::scanner::CandidateKind::SymbolicLink => links += 1,
                crate::scanner::CandidateKind::EmptyDirectory => dirs += 1,
            }
        }

        let mut breakdown = Vec::new();
        if files > 0 {
            breakdown.push(format!("{files} temporary files"));
        }
        if links > 0 {
            breakdown.push(format!("{links} symbolic links"));
        }
        if dirs > 0 {
            breakdown.push(format!("{dirs} empty folders"));
        }

        self.confirm_dialog = ConfirmDialog {
            visible: true,
            item_count: inventory.len(),
            total_bytes: inventory.total_bytes,
            breakdown,
        };
    }

    fn render_nav(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("nav")
            .exact_width(170.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.vertical_centered(|ui| {
                    ui.heading(
                        egui::RichText::new("Zenith")
                            .size(26.0)
                            .strong()
                            .color(egui::Color32::from_rgb(80, 180, 220)),
                    );
                });
                ui.add_space(16.0);

                let panes = [
                    (Pane::Dashboard, "Dashboard"),
                    (Pane::Optimizer, "Optimizer"),
                    (Pane::Tools, "Tools"),
                ];
                for (pane, label) in panes {
                    let selected = self.pane == pane;
                    if ui
                        .selectable_label(selected, egui::RichText::new(label).size(15.0))
                        .clicked()
                        && !selected
                    {
                        self.select_pane(pane);
                    }
                    ui.add_space(4.0);
                }
            });
    }

    fn render_dashboard(&mut self, ui: &mut egui::Ui) {
        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            ui.heading(egui::RichText::new("System Cleanup").size(22.0).strong());
            ui.label(
                egui::RichText::new("Reclaim disk space from temporary locations")
                    .size(13.0)
                    .color(egui::Color32::GRAY),
            );
        });
        ui.add_space(8.0);

        if !self.elevated {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(
                        "Running without elevated privileges. Some system items may fail to delete.",
                    )
                    .color(egui::Color32::from_rgb(220, 150, 50)),
                );
            });
            ui.add_space(4.0);
        }

        ui.separator();
        ui.add_space(24.0);

        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(&self.status).size(15.0));
            ui.add_space(16.0);

            match self.phase {
                AppPhase::Scanning => {
                    ui.spinner();
                    ui.add_space(4.0);
                    ui.label(egui::RichText::new("Analyzing...").color(egui::Color32::GRAY));
                }
                AppPhase::Cleaning => {
                    ui.spinner();
                    ui.add_space(4.0);
                    ui.label(egui::RichText::new("Cleaning...").color(egui::Color32::GRAY));
                }
                AppPhase::Idle => {
                    let reclaimable = self
                        .inventory
                        .as_ref()
                        .filter(|inv| !inv.is_empty())
                        .map(|inv| inv.total_size_mb());

                    if let Some(mb) = reclaimable {
                        let clean_button = egui::Button::new(
                            egui::RichText::new(format!("CLEAN {mb:.2} MB NOW"))
                                .size(16.0)
                                .strong()
                                .color(egui::Color32::WHITE),
                        )
                        .fill(egui::Color32::from_rgb(200, 50, 50));
                        if ui.add_sized([260.0, 44.0], clean_button).clicked() {
                            self.show_confirm_dialog();
                        }
                    } else {
                        let analyze_button = egui::Button::new(
                            egui::RichText::new("ANALYZE SYSTEM")
                                .size(16.0)
                                .strong()
                                .color(egui::Color32::WHITE),
                        )
                        .fill(egui::Color32::from_rgb(40, 120, 180));
                        if ui.add_sized([260.0, 44.0], analyze_button).clicked() {
                            self.start_scan();
                        }
                    }
                }
            }
        });

        ui.add_space(16.0);
        self.render_last_outcome(ui);
    }

    fn render_last_outcome(&self, ui: &mut egui::Ui) {
        let Some(ref outcome) = self.last_outcome else {
            return;
        };

        if outcome.reclaimed_bytes > 0 {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "Last cleanup freed: {}",
                        utils::format_size(outcome.reclaimed_bytes)
                    ))
                    .color(egui::Color32::from_rgb(80, 200, 80)),
                );
            });
        }

        if outcome.failed_count() > 0 {
            ui.add_space(4.0);
            egui::CollapsingHeader::new(
                egui::RichText::new(format!("Warnings ({})", outcome.failed_count()))
                    .color(egui::Color32::from_rgb(220, 150, 50)),
            )
            .default_open(false)
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, true])
                    .max_height(160.0)
                    .show(ui, |ui| {
                        for failure in &outcome.failures {
                            ui.label(
                                egui::RichText::new(format!(
                                    "Failed to delete {}: {}",
                                    utils::display_path(&failure.path),
                                    failure.error
                                ))
                                .color(egui::Color32::from_rgb(220, 100, 50)),
                            );
                        }
                    });
            });
        }
    }

    fn render_optimizer(&self, ui: &mut egui::Ui) {
        ui.add_space(12.0);
        ui.heading(egui::RichText::new("Startup Manager").size(22.0).strong());
        ui.label(
            egui::RichText::new("Programs that launch when you log in")
                .size(13.0)
                .color(egui::Color32::GRAY),
        );
        ui.add_space(8.0);
        ui.separator();

        if self.startup_loading {
            ui.add_space(16.0);
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading startup programs...");
            });
            return;
        }

        let Some(ref entries) = self.startup_entries else {
            return;
        };

        if entries.is_empty() {
            ui.add_space(16.0);
            ui.label(
                egui::RichText::new("No startup programs found.")
                    .italics()
                    .color(egui::Color32::GRAY),
            );
            return;
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (i, entry) in entries.iter().enumerate() {
                    ui.add_space(6.0);
                    ui.horizontal(|ui| {
                        // State toggling is not implemented; the store is
                        // read-only here, so the marker is display-only.
                        let mut enabled = entry.enabled;
                        ui.add_enabled(false, egui::Checkbox::new(&mut enabled, ""));
                        ui.vertical(|ui| {
                            ui.label(egui::RichText::new(&entry.name).strong());
                            ui.label(
                                egui::RichText::new(&entry.command)
                                    .small()
                                    .color(egui::Color32::from_rgb(160, 160, 170)),
                            );
                        });
                    });
                    ui.add_space(6.0);
                    if i < entries.len() - 1 {
                        ui.separator();
                    }
                }
            });
    }

    fn render_tools(&self, ui: &mut egui::Ui) {
        ui.add_space(12.0);
        ui.heading(egui::RichText::new("System Information").size(22.0).strong());
        ui.label(
            egui::RichText::new("A snapshot of current resource usage")
                .size(13.0)
                .color(egui::Color32::GRAY),
        );
        ui.add_space(8.0);
        ui.separator();
        ui.add_space(16.0);

        if self.metrics_loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Reading system metrics...");
            });
            return;
        }

        let Some(ref metrics) = self.metrics else {
            return;
        };

        egui::Frame::group(ui.style()).inner_margin(12.0).show(ui, |ui| {
            egui::Grid::new("system_metrics")
                .num_columns(2)
                .spacing([48.0, 10.0])
                .show(ui, |ui| {
                    let rows = [
                        ("Operating System", metrics.os_label()),
                        ("CPU Usage", metrics.cpu_label()),
                        ("Memory Usage", metrics.ram_label()),
                        ("Disk Usage", metrics.disk_label()),
                    ];
                    for (label, value) in rows {
                        ui.label(egui::RichText::new(label).strong());
                        ui.label(egui::RichText::new(value).monospace());
                        ui.end_row();
                    }
                });
        });
    }

    fn render_confirm_dialog(&mut self, ctx: &egui::Context) {
        let mut should_clean = false;
        let mut should_cancel = false;

        // Dim everything behind the dialog and swallow clicks on it.
        egui::Area::new(egui::Id::new("confirm_overlay"))
            .fixed_pos(egui::Pos2::ZERO)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let screen = ui.ctx().screen_rect();
                ui.allocate_rect(screen, egui::Sense::click());
                ui.painter()
                    .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(160));
            });

        egui::Window::new("")
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([360.0, 0.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new("\u{26A0}")
                            .size(36.0)
                            .color(egui::Color32::from_rgb(220, 180, 50)),
                    );
                    ui.add_space(4.0);
                    ui.label(egui::RichText::new("Confirm Cleanup").size(18.0).strong());
                });
                ui.add_space(8.0);

                ui.label(format!(
                    "Are you sure you want to permanently delete {} items?",
                    self.confirm_dialog.item_count
                ));
                ui.add_space(8.0);

                egui::Frame::group(ui.style()).inner_margin(8.0).show(ui, |ui| {
                    for line in &self.confirm_dialog.breakdown {
                        ui.label(format!("\u{2022} {line}"));
                    }
                });

                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "Total: {} will be freed",
                            utils::format_size(self.confirm_dialog.total_bytes)
                        ))
                        .strong()
                        .size(15.0)
                        .color(egui::Color32::from_rgb(80, 200, 80)),
                    );
                });

                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new("This action cannot be undone.")
                        .small()
                        .color(egui::Color32::from_rgb(200, 100, 100)),
                );
                ui.add_space(12.0);

                ui.columns(2, |cols| {
                    cols[0].vertical_centered(|ui| {
                        if ui.add_sized([140.0, 32.0], egui::Button::new("Cancel")).clicked() {
                            should_cancel = true;
                        }
                    });
                    cols[1].vertical_centered(|ui| {
                        if ui
                            .add_sized(
                                [140.0, 32.0],
                                egui::Button::new(
                                    egui::RichText::new("Delete Files")
                                        .strong()
                                        .color(egui::Color32::WHITE),
                                )
                                .fill(egui::Color32::from_rgb(200, 50, 50)),
                            )
                            .clicked()
                        {
                            should_clean = true;
                        }
                    });
                });
                ui.add_space(8.0);
            });

        if should_cancel {
            self.confirm_dialog.visible = false;
        }
        if should_clean {
            self.start_clean();
        }
    }
}

impl eframe::App for ZenithApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_messages();

        if self.phase != AppPhase::Idle || self.startup_loading || self.metrics_loading {
            ctx.request_repaint();
        }

        if self.confirm_dialog.visible {
            self.render_confirm_dialog(ctx);
        }

        self.render_nav(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.pane {
            Pane::Dashboard => self.render_dashboard(ui),
            Pane::Optimizer => self.render_optimizer(ui),
            Pane::Tools => self.render_tools(ui),
        });
    }
}
