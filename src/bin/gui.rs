#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use pump_sizing_toolbox::hydraulics::pipeline::{Pipeline, PipelineInput};
use pump_sizing_toolbox::hydraulics::section::{Section, SectionInput};
use pump_sizing_toolbox::hydraulics::tdh::{self, compute_tdh, generate_flow_sweep};
use pump_sizing_toolbox::{config, i18n, material_db};
use rfd::FileDialog;
use std::{env, fs, path::Path};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/ko/en)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default().with_inner_size([1100.0, 760.0]);
    if let Some(icon) = icon_data {
        viewport = viewport.with_icon(icon);
    }
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "Pump Sizing Toolbox",
        native_options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                eprintln!("Font error: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 바이너리 폰트 바이트를 egui에 등록한다.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글 표시를 위해 흔한 경로에서 CJK 폰트를 찾아 적용한다.
/// 전부 실패하면 Err를 반환하고 egui 기본 폰트로 동작한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let candidates = [
        "assets/fonts/malgun.ttf",
        "assets/fonts/NanumGothic.ttf",
        "C:\\Windows\\Fonts\\malgun.ttf",
        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
        "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    ];
    for path in candidates {
        if Path::new(path).exists() {
            let bytes =
                fs::read(path).map_err(|e| format!("Failed to read font file {path}: {e}"))?;
            apply_font_bytes(ctx, bytes, "cjk_font");
            return Ok(());
        }
    }
    Err("No CJK font found; falling back to default fonts".to_string())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    TdhCurve,
    Materials,
    Settings,
}

/// 구간 입력 폼 상태. 제출 시마다 검증을 거쳐 `Section` 값 객체로 변환된다.
#[derive(Clone)]
struct SectionForm {
    material: String,
    absolute_roughness: f64,
    section_length: f64,
    diameter: f64,
    inlet_pressure: f64,
    outlet_pressure: f64,
    k_values: Vec<f64>,
    k_value_input: f64,
}

impl SectionForm {
    fn new(is_metric: bool) -> Self {
        let roughness = material_db::roughness_for("CS", is_metric).unwrap_or(0.000045);
        Self {
            material: "Commercial steel".to_string(),
            absolute_roughness: roughness,
            section_length: if is_metric { 100.0 } else { 300.0 },
            diameter: if is_metric { 0.3 } else { 1.0 },
            inlet_pressure: 0.0,
            outlet_pressure: 0.0,
            k_values: Vec::new(),
            k_value_input: 0.0,
        }
    }
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    tab: Tab,
    lang_input: String,
    settings_status: Option<String>,
    // 파이프라인 폼
    start_ele_min: f64,
    start_ele_max: f64,
    end_ele_min: f64,
    end_ele_max: f64,
    start_pressure: f64,
    end_pressure: f64,
    start_flow_rate: f64,
    end_flow_rate: f64,
    is_end_day_lighted: bool,
    auto_viscosity: bool,
    kinematic_viscosity: f64,
    sweep_points: usize,
    sections: Vec<SectionForm>,
    // 결과
    tdh_max_points: Vec<[f64; 2]>,
    tdh_min_points: Vec<[f64; 2]>,
    calc_error: Option<String>,
    export_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        let is_metric = config.unit_system.is_metric();
        let lang_input = config.language.clone();
        let sweep_points = config.sweep_points;
        Self {
            config,
            tr,
            tab: Tab::TdhCurve,
            lang_input,
            settings_status: None,
            start_ele_min: 0.0,
            start_ele_max: 0.0,
            end_ele_min: 10.0,
            end_ele_max: 10.0,
            start_pressure: 0.0,
            end_pressure: 0.0,
            start_flow_rate: 0.05,
            end_flow_rate: 0.05,
            is_end_day_lighted: false,
            auto_viscosity: true,
            kinematic_viscosity: tdh::default_kinematic_viscosity(is_metric),
            sweep_points,
            sections: vec![SectionForm::new(is_metric)],
            tdh_max_points: Vec::new(),
            tdh_min_points: Vec::new(),
            calc_error: None,
            export_status: None,
        }
    }

    /// 사이드 메뉴를 제공한다.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        ui.style_mut().wrap = Some(false);
        ui.vertical_centered(|ui| {
            ui.heading(txt("gui.nav.heading", "Menu"));
            ui.add_space(8.0);
        });
        for (tab, label) in [
            (Tab::TdhCurve, txt("gui.tab.tdh_curve", "TDH Curve")),
            (Tab::Materials, txt("gui.tab.materials", "Pipe Materials")),
            (Tab::Settings, txt("gui.tab.settings", "Settings")),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    fn ui_tdh_curve(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let is_metric = self.config.unit_system.is_metric();
        let (len_unit, pressure_unit, flow_unit, visc_unit) = if is_metric {
            ("m", "kPa", "m³/s", "m²/s")
        } else {
            ("ft", "psi", "ft³/s", "ft²/s")
        };

        ui.heading(txt("gui.tdh.heading", "System TDH vs Flow Rate"));
        ui.small(txt(
            "gui.tdh.intro",
            "Enter the boundary conditions and pipe sections, then calculate the \
             max/min-case total dynamic head curves for pump selection.",
        ));
        ui.add_space(8.0);

        egui::Grid::new("boundary_grid")
            .num_columns(4)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label(format!(
                    "{} [{len_unit}]",
                    txt("gui.tdh.start_ele_min", "Start elevation min")
                ));
                ui.add(egui::DragValue::new(&mut self.start_ele_min).speed(0.5));
                ui.label(format!(
                    "{} [{len_unit}]",
                    txt("gui.tdh.start_ele_max", "Start elevation max")
                ));
                ui.add(egui::DragValue::new(&mut self.start_ele_max).speed(0.5));
                ui.end_row();

                ui.label(format!(
                    "{} [{len_unit}]",
                    txt("gui.tdh.end_ele_min", "End elevation min")
                ));
                ui.add(egui::DragValue::new(&mut self.end_ele_min).speed(0.5));
                ui.label(format!(
                    "{} [{len_unit}]",
                    txt("gui.tdh.end_ele_max", "End elevation max")
                ));
                ui.add(egui::DragValue::new(&mut self.end_ele_max).speed(0.5));
                ui.end_row();

                ui.label(format!(
                    "{} [{pressure_unit}]",
                    txt("gui.tdh.start_pressure", "Start pressure (gauge)")
                ));
                ui.add(egui::DragValue::new(&mut self.start_pressure).speed(1.0));
                ui.label(format!(
                    "{} [{pressure_unit}]",
                    txt("gui.tdh.end_pressure", "End pressure (gauge)")
                ));
                ui.add(egui::DragValue::new(&mut self.end_pressure).speed(1.0));
                ui.end_row();

                ui.label(format!(
                    "{} [{flow_unit}]",
                    txt("gui.tdh.start_flow", "Design flow, start side")
                ));
                ui.add(egui::DragValue::new(&mut self.start_flow_rate).speed(0.005));
                ui.label(format!(
                    "{} [{flow_unit}]",
                    txt("gui.tdh.end_flow", "Design flow, discharge side")
                ));
                ui.add(egui::DragValue::new(&mut self.end_flow_rate).speed(0.005));
                ui.end_row();

                ui.label(txt("gui.tdh.day_lighted", "Discharge end day-lighted"));
                ui.checkbox(&mut self.is_end_day_lighted, "");
                ui.label(txt("gui.tdh.sweep_points", "Sweep points"));
                ui.add(egui::DragValue::new(&mut self.sweep_points).clamp_range(2..=400));
                ui.end_row();

                ui.label(format!(
                    "{} [{visc_unit}]",
                    txt("gui.tdh.viscosity", "Kinematic viscosity")
                ));
                ui.horizontal(|ui| {
                    ui.checkbox(
                        &mut self.auto_viscosity,
                        txt("gui.tdh.viscosity_auto", "water 20°C"),
                    );
                    if self.auto_viscosity {
                        self.kinematic_viscosity = tdh::default_kinematic_viscosity(is_metric);
                    }
                    ui.add_enabled(
                        !self.auto_viscosity,
                        egui::DragValue::new(&mut self.kinematic_viscosity)
                            .speed(1e-7)
                            .clamp_range(f64::MIN_POSITIVE..=f64::INFINITY),
                    );
                });
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.separator();
        self.ui_sections(ui, is_metric, len_unit);

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui
                .button(txt("gui.tdh.calculate", "Calculate TDH curves"))
                .clicked()
            {
                self.calculate();
            }
            if !self.tdh_max_points.is_empty()
                && ui.button(txt("gui.tdh.export", "Export CSV…")).clicked()
            {
                self.export_csv();
            }
            if let Some(status) = &self.export_status {
                ui.small(status.clone());
            }
        });
        if let Some(err) = &self.calc_error {
            ui.colored_label(egui::Color32::RED, err.clone());
        }

        if !self.tdh_max_points.is_empty() {
            ui.add_space(8.0);
            let max_line = egui_plot::Line::new(egui_plot::PlotPoints::from(
                self.tdh_max_points.clone(),
            ))
            .name(txt("gui.tdh.series_max", "TDH Max"));
            let min_line = egui_plot::Line::new(egui_plot::PlotPoints::from(
                self.tdh_min_points.clone(),
            ))
            .name(txt("gui.tdh.series_min", "TDH Min"));
            egui_plot::Plot::new("tdh_plot")
                .legend(egui_plot::Legend::default())
                .x_axis_label(format!(
                    "{} [{flow_unit}]",
                    txt("gui.tdh.axis_flow", "Flow Rate")
                ))
                .y_axis_label(format!("{} [{len_unit}]", txt("gui.tdh.axis_head", "TDH")))
                .height(380.0)
                .show(ui, |plot_ui| {
                    plot_ui.line(max_line);
                    plot_ui.line(min_line);
                });
        }
    }

    fn ui_sections(&mut self, ui: &mut egui::Ui, is_metric: bool, len_unit: &str) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        ui.strong(txt("gui.section.heading", "Pipe sections (in flow order)"));

        let mut remove_index = None;
        for (idx, form) in self.sections.iter_mut().enumerate() {
            egui::CollapsingHeader::new(format!(
                "{} {} — {}",
                txt("gui.section.label", "Section"),
                idx + 1,
                form.material
            ))
            .id_source(("section_header", idx))
            .default_open(true)
            .show(ui, |ui| {
                egui::Grid::new(("section_grid", idx))
                    .num_columns(4)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(txt("gui.section.material", "Material"));
                        ui.horizontal(|ui| {
                            ui.text_edit_singleline(&mut form.material);
                            egui::ComboBox::from_id_source(("section_material", idx))
                                .selected_text(txt("gui.section.preset", "preset"))
                                .show_ui(ui, |ui| {
                                    for mat in material_db::materials() {
                                        if ui.selectable_label(false, mat.name).clicked() {
                                            form.material = mat.name.to_string();
                                            if let Some(r) =
                                                material_db::roughness_for(mat.code, is_metric)
                                            {
                                                form.absolute_roughness = r;
                                            }
                                        }
                                    }
                                });
                        });
                        ui.label(format!(
                            "{} [{len_unit}]",
                            txt("gui.section.roughness", "Absolute roughness ε")
                        ));
                        ui.add(
                            egui::DragValue::new(&mut form.absolute_roughness)
                                .speed(1e-6)
                                .clamp_range(0.0..=f64::INFINITY),
                        );
                        ui.end_row();

                        ui.label(format!(
                            "{} [{len_unit}]",
                            txt("gui.section.length", "Length")
                        ));
                        ui.add(egui::DragValue::new(&mut form.section_length).speed(1.0));
                        ui.label(format!(
                            "{} [{len_unit}]",
                            txt("gui.section.diameter", "Inside diameter")
                        ));
                        ui.add(egui::DragValue::new(&mut form.diameter).speed(0.01));
                        ui.end_row();

                        ui.label(txt("gui.section.inlet_pressure", "Inlet pressure (record)"));
                        ui.add(egui::DragValue::new(&mut form.inlet_pressure).speed(1.0));
                        ui.label(txt(
                            "gui.section.outlet_pressure",
                            "Outlet pressure (record)",
                        ));
                        ui.add(egui::DragValue::new(&mut form.outlet_pressure).speed(1.0));
                        ui.end_row();
                    });

                ui.horizontal(|ui| {
                    ui.label(txt("gui.section.k_values", "Fitting K values:"));
                    if form.k_values.is_empty() {
                        ui.small(txt("gui.section.k_none", "(none)"));
                    } else {
                        let list = form
                            .k_values
                            .iter()
                            .map(|k| format!("{k:.2}"))
                            .collect::<Vec<_>>()
                            .join(", ");
                        ui.small(list);
                    }
                    ui.add(egui::DragValue::new(&mut form.k_value_input).speed(0.05));
                    if ui.button(txt("gui.section.k_add", "Add K")).clicked() {
                        form.k_values.push(form.k_value_input);
                        form.k_value_input = 0.0;
                    }
                });

                if ui
                    .button(txt("gui.section.remove", "Remove section"))
                    .clicked()
                {
                    remove_index = Some(idx);
                }
            });
        }
        if let Some(idx) = remove_index {
            self.sections.remove(idx);
        }
        if ui
            .button(txt("gui.section.add", "Add section"))
            .clicked()
        {
            self.sections.push(SectionForm::new(is_metric));
        }
    }

    /// 폼 상태로부터 값 객체를 구성하고 TDH 곡선을 계산한다.
    /// 검증/계산 오류는 화면에 표시하고 세션은 유지한다.
    fn calculate(&mut self) {
        self.calc_error = None;
        self.export_status = None;
        let is_metric = self.config.unit_system.is_metric();
        // 수동 입력된 점도가 0 이하로 드래그됐으면 물 기본값으로 되돌린다.
        let kinematic_viscosity = tdh::resolve_kinematic_viscosity(self.kinematic_viscosity, is_metric);

        let build = || -> Result<(Vec<[f64; 2]>, Vec<[f64; 2]>), String> {
            let mut sections = Vec::with_capacity(self.sections.len());
            for form in &self.sections {
                sections.push(
                    Section::new(SectionInput {
                        absolute_roughness: form.absolute_roughness,
                        section_length: form.section_length,
                        diameter: form.diameter,
                        material: form.material.clone(),
                        inlet_pressure: form.inlet_pressure,
                        outlet_pressure: form.outlet_pressure,
                        k_values: form.k_values.clone(),
                    })
                    .map_err(|e| e.to_string())?,
                );
            }
            let pipeline = Pipeline::new(PipelineInput {
                sections,
                start_ele_min: self.start_ele_min,
                start_ele_max: self.start_ele_max,
                end_ele_min: self.end_ele_min,
                end_ele_max: self.end_ele_max,
                start_pressure: self.start_pressure,
                end_pressure: self.end_pressure,
                start_flow_rate: self.start_flow_rate,
                end_flow_rate: self.end_flow_rate,
                is_end_day_lighted: self.is_end_day_lighted,
                is_metric,
            })
            .map_err(|e| e.to_string())?;

            let start_flow_rates =
                generate_flow_sweep(pipeline.start_flow_rate(), self.sweep_points)
                    .map_err(|e| e.to_string())?;
            let end_flow_rates = generate_flow_sweep(pipeline.end_flow_rate(), self.sweep_points)
                .map_err(|e| e.to_string())?;
            let curves = compute_tdh(
                &pipeline,
                &start_flow_rates,
                &end_flow_rates,
                kinematic_viscosity,
                is_metric,
            )
            .map_err(|e| e.to_string())?;

            let max_points = start_flow_rates
                .iter()
                .zip(&curves.heads_max)
                .map(|(q, h)| [*q, *h])
                .collect();
            let min_points = start_flow_rates
                .iter()
                .zip(&curves.heads_min)
                .map(|(q, h)| [*q, *h])
                .collect();
            Ok((max_points, min_points))
        };

        match build() {
            Ok((max_points, min_points)) => {
                self.tdh_max_points = max_points;
                self.tdh_min_points = min_points;
            }
            Err(msg) => self.calc_error = Some(msg),
        }
    }

    /// 계산된 곡선을 CSV로 저장한다.
    fn export_csv(&mut self) {
        let Some(path) = FileDialog::new()
            .set_file_name("tdh_curves.csv")
            .save_file()
        else {
            return;
        };
        let mut content = String::from("flow_rate,tdh_max,tdh_min\n");
        for (max_point, min_point) in self.tdh_max_points.iter().zip(&self.tdh_min_points) {
            content.push_str(&format!(
                "{},{},{}\n",
                max_point[0], max_point[1], min_point[1]
            ));
        }
        self.export_status = match fs::write(&path, content) {
            Ok(()) => Some(format!("Saved: {}", path.display())),
            Err(e) => Some(format!("Save failed: {e}")),
        };
    }

    fn ui_materials(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let is_metric = self.config.unit_system.is_metric();
        let unit = if is_metric { "m" } else { "ft" };

        ui.heading(txt("gui.materials.heading", "Pipe material roughness"));
        ui.small(txt(
            "gui.materials.note",
            "Approximate reference values; prefer the pipe spec sheet for design.",
        ));
        ui.add_space(8.0);
        egui::Grid::new("materials_grid")
            .num_columns(4)
            .striped(true)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                ui.strong(txt("gui.materials.code", "Code"));
                ui.strong(txt("gui.materials.name", "Name"));
                ui.strong(format!("ε [{unit}]"));
                ui.strong(txt("gui.materials.notes", "Notes"));
                ui.end_row();
                for mat in material_db::materials() {
                    let roughness =
                        material_db::roughness_for(mat.code, is_metric).unwrap_or(mat.roughness_m);
                    ui.label(mat.code);
                    ui.label(mat.name);
                    ui.label(format!("{roughness:.3e}"));
                    ui.label(mat.notes);
                    ui.end_row();
                }
            });
    }

    fn ui_settings(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        ui.heading(txt("gui.settings.heading", "Settings"));
        ui.add_space(8.0);
        ui.label(txt("gui.settings.unit_system", "Unit system"));
        ui.radio_value(
            &mut self.config.unit_system,
            config::UnitSystem::Metric,
            config::UnitSystem::Metric.label(),
        );
        ui.radio_value(
            &mut self.config.unit_system,
            config::UnitSystem::Imperial,
            config::UnitSystem::Imperial.label(),
        );
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label(txt("gui.settings.language", "Language (auto/ko/en)"));
            ui.text_edit_singleline(&mut self.lang_input);
        });
        ui.add_space(8.0);
        if ui.button(txt("gui.settings.save", "Save")).clicked() {
            self.config.language = self.lang_input.clone();
            self.config.sweep_points = self.sweep_points;
            let lang_code = i18n::resolve_language("auto", Some(self.config.language.as_str()));
            self.tr = i18n::Translator::new_with_pack(
                &lang_code,
                self.config.language_pack_dir.as_deref(),
            );
            self.settings_status = Some(match self.config.save() {
                Ok(()) => txt("gui.settings.saved", "Settings saved."),
                Err(e) => format!("{e}"),
            });
        }
        if let Some(status) = &self.settings_status {
            ui.small(status.clone());
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::SidePanel::left("nav")
            .resizable(false)
            .default_width(160.0)
            .show(ctx, |ui| self.ui_nav(ui));
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.tab {
                Tab::TdhCurve => self.ui_tdh_curve(ui),
                Tab::Materials => self.ui_materials(ui),
                Tab::Settings => self.ui_settings(ui),
            });
        });
    }
}
