use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_TDH_CURVE: &str = "main_menu.tdh_curve";
    pub const MAIN_MENU_MATERIALS: &str = "main_menu.materials";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const PROMPT_YES_NO: &str = "prompt.yes_no";

    pub const TDH_HEADING: &str = "tdh.heading";
    pub const TDH_NOTE_UNITS: &str = "tdh.note_units";
    pub const PROMPT_START_ELE_MIN: &str = "prompt.start_ele_min";
    pub const PROMPT_START_ELE_MAX: &str = "prompt.start_ele_max";
    pub const PROMPT_END_ELE_MIN: &str = "prompt.end_ele_min";
    pub const PROMPT_END_ELE_MAX: &str = "prompt.end_ele_max";
    pub const PROMPT_START_PRESSURE: &str = "prompt.start_pressure";
    pub const PROMPT_END_PRESSURE: &str = "prompt.end_pressure";
    pub const PROMPT_START_FLOW: &str = "prompt.start_flow";
    pub const PROMPT_END_FLOW: &str = "prompt.end_flow";
    pub const PROMPT_DAY_LIGHTED: &str = "prompt.day_lighted";
    pub const PROMPT_VISCOSITY: &str = "prompt.viscosity";

    pub const SECTION_HEADING: &str = "section.heading";
    pub const PROMPT_MATERIAL: &str = "prompt.material";
    pub const NOTE_MATERIAL_ROUGHNESS: &str = "note.material_roughness";
    pub const PROMPT_ROUGHNESS: &str = "prompt.roughness";
    pub const PROMPT_SECTION_LENGTH: &str = "prompt.section_length";
    pub const PROMPT_DIAMETER: &str = "prompt.diameter";
    pub const PROMPT_INLET_PRESSURE: &str = "prompt.inlet_pressure";
    pub const PROMPT_OUTLET_PRESSURE: &str = "prompt.outlet_pressure";
    pub const PROMPT_K_VALUE: &str = "prompt.k_value";
    pub const PROMPT_ADD_SECTION: &str = "prompt.add_section";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_TOTAL_LENGTH: &str = "result.total_length";
    pub const RESULT_MATERIALS: &str = "result.materials";
    pub const RESULT_TABLE_HEADER: &str = "result.table_header";

    pub const MATERIALS_HEADING: &str = "materials.heading";
    pub const MATERIALS_NOTE: &str = "materials.note";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_UNIT_SYSTEM: &str = "settings.current_unit_system";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_PROMPT_SWEEP: &str = "settings.prompt_sweep";
    pub const SETTINGS_PROMPT_LANG: &str = "settings.prompt_lang";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    if let Ok(lang) = std::env::var("LC_ALL") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Pump Sizing Toolbox ===",
        MAIN_MENU_TDH_CURVE => "1) TDH 곡선 계산",
        MAIN_MENU_MATERIALS => "2) 배관 재질 거칠기 참고표",
        MAIN_MENU_SETTINGS => "3) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        PROMPT_YES_NO => "(y/n): ",
        TDH_HEADING => "\n-- TDH 곡선 계산 --",
        TDH_NOTE_UNITS => "참고: 미터계는 m/kPa/m³/s, 야드파운드계는 ft/psi/ft³/s 기준입니다.",
        PROMPT_START_ELE_MIN => "시작 표고 최소 [m|ft]: ",
        PROMPT_START_ELE_MAX => "시작 표고 최대 [m|ft]: ",
        PROMPT_END_ELE_MIN => "종점 표고 최소 [m|ft]: ",
        PROMPT_END_ELE_MAX => "종점 표고 최대 [m|ft]: ",
        PROMPT_START_PRESSURE => "시작 경계 압력(게이지) [kPa|psi]: ",
        PROMPT_END_PRESSURE => "종점 경계 압력(게이지) [kPa|psi]: ",
        PROMPT_START_FLOW => "시작측 설계 유량 [m³/s|ft³/s]: ",
        PROMPT_END_FLOW => "토출측 설계 유량 [m³/s|ft³/s]: ",
        PROMPT_DAY_LIGHTED => "토출 끝이 대기 개방(day-lighted)입니까? ",
        PROMPT_VISCOSITY => "동점성계수 [m²/s|ft²/s] (0 입력 시 물 20°C 기본값): ",
        SECTION_HEADING => "\n-- 구간 입력 --",
        PROMPT_MATERIAL => "재질 (코드 또는 이름, 예: CS, PVC): ",
        NOTE_MATERIAL_ROUGHNESS => "참고 거칠기:",
        PROMPT_ROUGHNESS => "절대 거칠기 ε [m|ft]: ",
        PROMPT_SECTION_LENGTH => "구간 길이 [m|ft]: ",
        PROMPT_DIAMETER => "내경 [m|ft]: ",
        PROMPT_INLET_PRESSURE => "구간 입구 압력 (기록용, 없으면 0): ",
        PROMPT_OUTLET_PRESSURE => "구간 출구 압력 (기록용, 없으면 0): ",
        PROMPT_K_VALUE => "피팅 K 값 (빈 줄이면 종료): ",
        PROMPT_ADD_SECTION => "구간을 더 추가하시겠습니까? ",
        RESULT_HEADING => "\n-- 계산 결과 --",
        RESULT_TOTAL_LENGTH => "전체 배관 길이:",
        RESULT_MATERIALS => "재질 목록:",
        RESULT_TABLE_HEADER => "       유량     TDH 최대     TDH 최소",
        MATERIALS_HEADING => "\n-- 배관 재질 거칠기 참고표 --",
        MATERIALS_NOTE => "참고용 개략치입니다. 설계 시 배관 사양서 값을 우선하세요.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "현재 단위 시스템:",
        SETTINGS_OPTIONS => "1) Metric  2) Imperial",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_PROMPT_SWEEP => "유량 스윕 점 개수(짝수 권장, 취소하려면 엔터): ",
        SETTINGS_PROMPT_LANG => "언어 (auto/ko/en, 취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 변경되었습니다.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Pump Sizing Toolbox ===",
        MAIN_MENU_TDH_CURVE => "1) TDH curve calculation",
        MAIN_MENU_MATERIALS => "2) Pipe material roughness reference",
        MAIN_MENU_SETTINGS => "3) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        PROMPT_YES_NO => "(y/n): ",
        TDH_HEADING => "\n-- TDH Curve Calculation --",
        TDH_NOTE_UNITS => "Note: metric uses m/kPa/m³/s, imperial uses ft/psi/ft³/s.",
        PROMPT_START_ELE_MIN => "Start elevation, min [m|ft]: ",
        PROMPT_START_ELE_MAX => "Start elevation, max [m|ft]: ",
        PROMPT_END_ELE_MIN => "End elevation, min [m|ft]: ",
        PROMPT_END_ELE_MAX => "End elevation, max [m|ft]: ",
        PROMPT_START_PRESSURE => "Start boundary pressure (gauge) [kPa|psi]: ",
        PROMPT_END_PRESSURE => "End boundary pressure (gauge) [kPa|psi]: ",
        PROMPT_START_FLOW => "Design flow rate, start side [m³/s|ft³/s]: ",
        PROMPT_END_FLOW => "Design flow rate, discharge side [m³/s|ft³/s]: ",
        PROMPT_DAY_LIGHTED => "Is the discharge end day-lighted (open to atmosphere)? ",
        PROMPT_VISCOSITY => "Kinematic viscosity [m²/s|ft²/s] (0 = water at 20°C default): ",
        SECTION_HEADING => "\n-- Section Input --",
        PROMPT_MATERIAL => "Material (code or name, e.g. CS, PVC): ",
        NOTE_MATERIAL_ROUGHNESS => "Reference roughness:",
        PROMPT_ROUGHNESS => "Absolute roughness ε [m|ft]: ",
        PROMPT_SECTION_LENGTH => "Section length [m|ft]: ",
        PROMPT_DIAMETER => "Inside diameter [m|ft]: ",
        PROMPT_INLET_PRESSURE => "Section inlet pressure (bookkeeping, 0 if none): ",
        PROMPT_OUTLET_PRESSURE => "Section outlet pressure (bookkeeping, 0 if none): ",
        PROMPT_K_VALUE => "Fitting K value (empty line to finish): ",
        PROMPT_ADD_SECTION => "Add another section? ",
        RESULT_HEADING => "\n-- Results --",
        RESULT_TOTAL_LENGTH => "Total pipeline length:",
        RESULT_MATERIALS => "Material list:",
        RESULT_TABLE_HEADER => "  Flow rate      TDH max      TDH min",
        MATERIALS_HEADING => "\n-- Pipe Material Roughness Reference --",
        MATERIALS_NOTE => "Approximate reference values; prefer the pipe spec sheet for design.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "Current unit system:",
        SETTINGS_OPTIONS => "1) Metric  2) Imperial",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_PROMPT_SWEEP => "Flow sweep point count (even recommended, enter to cancel): ",
        SETTINGS_PROMPT_LANG => "Language (auto/ko/en, enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; settings unchanged.",
        SETTINGS_SAVED => "Settings updated.",
        _ => return None,
    })
}
