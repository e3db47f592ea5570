use std::io::{self, Write};

use crate::app::AppError;
use crate::config::{Config, UnitSystem};
use crate::hydraulics::pipeline::{Pipeline, PipelineInput};
use crate::hydraulics::section::{Section, SectionInput};
use crate::hydraulics::tdh::{self, compute_tdh, generate_flow_sweep};
use crate::i18n::{keys, Translator};
use crate::material_db;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    TdhCurve,
    Materials,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_TDH_CURVE));
    println!("{}", tr.t(keys::MAIN_MENU_MATERIALS));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::TdhCurve),
            "2" => return Ok(MenuChoice::Materials),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// TDH 곡선 계산 메뉴를 처리한다. 경계 조건과 구간들을 입력받아
/// 최대/최소 조건 곡선을 표로 출력한다.
pub fn handle_tdh_curve(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::TDH_HEADING));
    println!("{}", tr.t(keys::TDH_NOTE_UNITS));
    let is_metric = cfg.unit_system.is_metric();

    let start_ele_min = read_f64(tr, tr.t(keys::PROMPT_START_ELE_MIN))?;
    let start_ele_max = read_f64(tr, tr.t(keys::PROMPT_START_ELE_MAX))?;
    let end_ele_min = read_f64(tr, tr.t(keys::PROMPT_END_ELE_MIN))?;
    let end_ele_max = read_f64(tr, tr.t(keys::PROMPT_END_ELE_MAX))?;
    let start_pressure = read_f64(tr, tr.t(keys::PROMPT_START_PRESSURE))?;
    let end_pressure = read_f64(tr, tr.t(keys::PROMPT_END_PRESSURE))?;
    let start_flow_rate = read_f64(tr, tr.t(keys::PROMPT_START_FLOW))?;
    let end_flow_rate = read_f64(tr, tr.t(keys::PROMPT_END_FLOW))?;
    let is_end_day_lighted = read_yes_no(tr, tr.t(keys::PROMPT_DAY_LIGHTED))?;
    let kinematic_viscosity =
        tdh::resolve_kinematic_viscosity(read_f64(tr, tr.t(keys::PROMPT_VISCOSITY))?, is_metric);

    let mut sections = Vec::new();
    loop {
        println!("{}", tr.t(keys::SECTION_HEADING));
        let material = read_line(tr.t(keys::PROMPT_MATERIAL))?.trim().to_string();
        if let Some(roughness) = material_db::roughness_for(&material, is_metric) {
            println!("{} {roughness:.3e}", tr.t(keys::NOTE_MATERIAL_ROUGHNESS));
        }
        let absolute_roughness = read_f64(tr, tr.t(keys::PROMPT_ROUGHNESS))?;
        let section_length = read_f64(tr, tr.t(keys::PROMPT_SECTION_LENGTH))?;
        let diameter = read_f64(tr, tr.t(keys::PROMPT_DIAMETER))?;
        let inlet_pressure = read_f64(tr, tr.t(keys::PROMPT_INLET_PRESSURE))?;
        let outlet_pressure = read_f64(tr, tr.t(keys::PROMPT_OUTLET_PRESSURE))?;
        let mut k_values = Vec::new();
        loop {
            let line = read_line(tr.t(keys::PROMPT_K_VALUE))?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }
            match trimmed.parse::<f64>() {
                Ok(k) => k_values.push(k),
                Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
            }
        }
        sections.push(Section::new(SectionInput {
            absolute_roughness,
            section_length,
            diameter,
            material,
            inlet_pressure,
            outlet_pressure,
            k_values,
        })?);
        if !read_yes_no(tr, tr.t(keys::PROMPT_ADD_SECTION))? {
            break;
        }
    }

    let pipeline = Pipeline::new(PipelineInput {
        sections,
        start_ele_min,
        start_ele_max,
        end_ele_min,
        end_ele_max,
        start_pressure,
        end_pressure,
        start_flow_rate,
        end_flow_rate,
        is_end_day_lighted,
        is_metric,
    })?;

    let start_flow_rates = generate_flow_sweep(pipeline.start_flow_rate(), cfg.sweep_points)?;
    let end_flow_rates = generate_flow_sweep(pipeline.end_flow_rate(), cfg.sweep_points)?;
    let curves = compute_tdh(
        &pipeline,
        &start_flow_rates,
        &end_flow_rates,
        kinematic_viscosity,
        is_metric,
    )?;

    println!("{}", tr.t(keys::RESULT_HEADING));
    println!(
        "{} {:.2}",
        tr.t(keys::RESULT_TOTAL_LENGTH),
        pipeline.pipeline_length()
    );
    println!(
        "{} {}",
        tr.t(keys::RESULT_MATERIALS),
        pipeline.material_list().join(", ")
    );
    println!("{}", tr.t(keys::RESULT_TABLE_HEADER));
    for i in 0..start_flow_rates.len() {
        println!(
            "{:>11.4} {:>12.3} {:>12.3}",
            start_flow_rates[i], curves.heads_max[i], curves.heads_min[i]
        );
    }
    Ok(())
}

/// 배관 재질 거칠기 참고표를 출력한다.
pub fn handle_materials(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::MATERIALS_HEADING));
    println!("{}", tr.t(keys::MATERIALS_NOTE));
    let is_metric = cfg.unit_system.is_metric();
    let unit = if is_metric { "m" } else { "ft" };
    for mat in material_db::materials() {
        let roughness = material_db::roughness_for(mat.code, is_metric).unwrap_or(mat.roughness_m);
        println!(
            "{:<6} {:<18} ε = {roughness:.3e} {unit}  {}",
            mat.code, mat.name, mat.notes
        );
    }
    Ok(())
}

/// 설정 메뉴를 처리한다. 단위 시스템, 스윕 점 개수, 언어를 바꿀 수 있다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_UNIT_SYSTEM),
        cfg.unit_system.label()
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    match sel.trim() {
        "" => {}
        "1" => cfg.unit_system = UnitSystem::Metric,
        "2" => cfg.unit_system = UnitSystem::Imperial,
        _ => println!("{}", tr.t(keys::SETTINGS_INVALID)),
    }
    let sweep = read_line(tr.t(keys::SETTINGS_PROMPT_SWEEP))?;
    let sweep = sweep.trim();
    if !sweep.is_empty() {
        match sweep.parse::<usize>() {
            Ok(n) if n >= 2 => cfg.sweep_points = n,
            _ => println!("{}", tr.t(keys::SETTINGS_INVALID)),
        }
    }
    // 언어 변경은 다음 실행부터 적용된다.
    let lang = read_line(tr.t(keys::SETTINGS_PROMPT_LANG))?;
    let lang = lang.trim().to_lowercase();
    if !lang.is_empty() {
        match lang.as_str() {
            "auto" | "ko" | "en" => cfg.language = lang,
            _ => println!("{}", tr.t(keys::SETTINGS_INVALID)),
        }
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let line = read_line(prompt)?;
        match line.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_yes_no(tr: &Translator, prompt: &str) -> Result<bool, AppError> {
    loop {
        let line = read_line(&format!("{prompt}{}", tr.t(keys::PROMPT_YES_NO)))?;
        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}
