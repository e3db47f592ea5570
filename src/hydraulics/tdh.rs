use super::pipeline::Pipeline;
use super::section::Section;

/// TDH 계산/스윕 생성 오류를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TdhError {
    /// 시작/종점 유량 배열 길이가 다른 경우
    FlowRateLengthMismatch { start: usize, end: usize },
    /// 스윕 목표 유량이 설정되지 않았거나 0 이하인 경우
    InvalidSweepTarget,
    /// 스윕 점 개수가 2 미만인 경우
    InvalidSweepCount,
}

impl std::fmt::Display for TdhError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TdhError::FlowRateLengthMismatch { start, end } => write!(
                f,
                "유량 배열 길이가 일치하지 않습니다: 시작측 {start}, 토출측 {end}"
            ),
            TdhError::InvalidSweepTarget => write!(f, "목표 유량은 0보다 큰 값이어야 합니다."),
            TdhError::InvalidSweepCount => write!(f, "스윕 점 개수는 2 이상이어야 합니다."),
        }
    }
}

impl std::error::Error for TdhError {}

/// 물 20°C 기준 동점성계수 [m²/s].
pub const KINEMATIC_VISCOSITY_WATER_METRIC: f64 = 1.003e-6;
/// 물 20°C 기준 동점성계수 [ft²/s].
pub const KINEMATIC_VISCOSITY_WATER_IMPERIAL: f64 = 1.1e-5;
/// 유량 스윕 기본 점 개수.
pub const DEFAULT_SWEEP_POINTS: usize = 20;

/// 단위계에 맞는 물의 기본 동점성계수를 반환한다.
/// 입력 폼에서 점도를 비워두면 이 값이 쓰인다.
pub fn default_kinematic_viscosity(is_metric: bool) -> f64 {
    if is_metric {
        KINEMATIC_VISCOSITY_WATER_METRIC
    } else {
        KINEMATIC_VISCOSITY_WATER_IMPERIAL
    }
}

/// 사용자 입력 동점성계수를 정리한다. 0 이하나 비유한값은 Re 계산을
/// 망가뜨리므로 물 20°C 기본값으로 대체한다. 모든 입력 폼이 엔진 호출
/// 전에 이 함수를 거친다.
pub fn resolve_kinematic_viscosity(value: f64, is_metric: bool) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        default_kinematic_viscosity(is_metric)
    }
}

fn gravity(is_metric: bool) -> f64 {
    if is_metric {
        9.81
    } else {
        32.17
    }
}

/// 압력차 → 수두 환산계수. 미터계 kPa→m 약 10.2, 야드파운드계 psi→ft 약 2.31.
fn pressure_to_head_factor(is_metric: bool) -> f64 {
    if is_metric {
        10.2
    } else {
        2.31
    }
}

fn flow_area(diameter: f64) -> f64 {
    std::f64::consts::PI * diameter * diameter / 4.0
}

fn velocity(flow_rate: f64, diameter: f64) -> f64 {
    flow_rate / flow_area(diameter)
}

/// 레이놀즈수 Re = v·D/ν.
pub fn reynolds_number(flow_rate: f64, diameter: f64, kinematic_viscosity: f64) -> f64 {
    velocity(flow_rate, diameter) * diameter / kinematic_viscosity
}

/// Darcy 마찰계수를 구한다.
///
/// - 유량 0이면 0 (무류 축퇴 케이스, 하류 0-나눗셈 방지)
/// - Re < 2300이면 층류식 64/Re
/// - 그 외에는 Colebrook 식에 대한 Serghides 3단계 명시 근사
///
/// 반복 수렴 루프가 아니라 고정된 3단계 평가라서 동일 입력이면 비트 단위로 재현된다.
pub fn friction_factor(
    flow_rate: f64,
    diameter: f64,
    absolute_roughness: f64,
    kinematic_viscosity: f64,
) -> f64 {
    if flow_rate == 0.0 {
        return 0.0;
    }
    let reynolds = reynolds_number(flow_rate, diameter, kinematic_viscosity);
    if reynolds < 2300.0 {
        return 64.0 / reynolds;
    }

    let roughness_term = absolute_roughness / diameter / 3.7;
    let a = -2.0 * (roughness_term + 12.0 / reynolds).log10();
    let b = -2.0 * (roughness_term + 2.51 * a / reynolds).log10();
    let c = -2.0 * (roughness_term + 2.51 * b / reynolds).log10();

    (a - (b - a).powi(2) / (c - 2.0 * b + a)).powi(-2)
}

/// 속도수두 v²/2g.
fn velocity_head(flow_rate: f64, diameter: f64, is_metric: bool) -> f64 {
    velocity(flow_rate, diameter).powi(2) / (2.0 * gravity(is_metric))
}

/// 마찰(주요) 손실 f·(L/D)·v²/2g.
fn major_loss(section: &Section, flow_rate: f64, kinematic_viscosity: f64, is_metric: bool) -> f64 {
    friction_factor(
        flow_rate,
        section.diameter(),
        section.absolute_roughness(),
        kinematic_viscosity,
    ) * (section.section_length() / section.diameter())
        * velocity_head(flow_rate, section.diameter(), is_metric)
}

/// 피팅(부차) 손실 ΣK·v²/2g.
fn minor_loss(section: &Section, flow_rate: f64, is_metric: bool) -> f64 {
    section.k_sum() * velocity_head(flow_rate, section.diameter(), is_metric)
}

/// 개방 토출(day-lighted) 보정항 (v₂²−v₁²)/2g.
/// 경계 유량 값을 그대로 속도 자리에 대입하는 원 모델의 관례를 따른다.
fn day_lighted_velocity_head(
    start_flow_rate: f64,
    end_flow_rate: f64,
    is_metric: bool,
    is_day_lighted: bool,
) -> f64 {
    if !is_day_lighted {
        return 0.0;
    }
    (end_flow_rate.powi(2) - start_flow_rate.powi(2)) / (2.0 * gravity(is_metric))
}

/// 최대/최소 표고 조건별 TDH 곡선. 입력 유량 배열과 인덱스 단위로 정렬된다.
#[derive(Debug, Clone)]
pub struct TdhCurves {
    /// 최악 조건(시작 표고 최소, 종점 표고 최대) 전양정
    pub heads_max: Vec<f64>,
    /// 최선 조건(시작 표고 최대, 종점 표고 최소) 전양정
    pub heads_min: Vec<f64>,
}

/// 유량 스윕 전체에 대해 최대/최소 조건 TDH를 계산한다.
///
/// 마찰/피팅 손실은 모든 구간에서 토출측 유량(`end_flow_rates[i]`)으로 구동된다.
/// 곡선이 토출측 스윕으로 매개화되는 의도된 단순화다.
pub fn compute_tdh(
    pipeline: &Pipeline,
    start_flow_rates: &[f64],
    end_flow_rates: &[f64],
    kinematic_viscosity: f64,
    is_metric: bool,
) -> Result<TdhCurves, TdhError> {
    if start_flow_rates.len() != end_flow_rates.len() {
        return Err(TdhError::FlowRateLengthMismatch {
            start: start_flow_rates.len(),
            end: end_flow_rates.len(),
        });
    }

    // 압력수두는 i에 무관하므로 루프 밖에서 한 번만 계산한다.
    let pressure_head = (pipeline.end_pressure() - pipeline.start_pressure())
        * pressure_to_head_factor(is_metric);
    let static_head_max = pipeline.end_ele_max() - pipeline.start_ele_min();
    let static_head_min = pipeline.end_ele_min() - pipeline.start_ele_max();

    let mut heads_max = Vec::with_capacity(start_flow_rates.len());
    let mut heads_min = Vec::with_capacity(start_flow_rates.len());
    for (start_q, end_q) in start_flow_rates.iter().zip(end_flow_rates) {
        let mut tdh_without_static = pressure_head
            + day_lighted_velocity_head(
                *start_q,
                *end_q,
                is_metric,
                pipeline.is_end_day_lighted(),
            );
        for section in pipeline.sections() {
            tdh_without_static += major_loss(section, *end_q, kinematic_viscosity, is_metric)
                + minor_loss(section, *end_q, is_metric);
        }
        heads_max.push(static_head_max + tdh_without_static);
        heads_min.push(static_head_min + tdh_without_static);
    }
    Ok(TdhCurves {
        heads_max,
        heads_min,
    })
}

/// 0부터 목표 유량의 약 2배까지 등간격 유량 스윕을 생성한다.
///
/// step = 목표 / floor(count/2)이고 값은 0, step, …, (count−1)·step이다.
/// 설계점 너머의 곡선 거동을 보여주기 위해 의도적으로 목표를 넘어선다.
pub fn generate_flow_sweep(target_flow_rate: f64, count: usize) -> Result<Vec<f64>, TdhError> {
    if !target_flow_rate.is_finite() || target_flow_rate <= 0.0 {
        return Err(TdhError::InvalidSweepTarget);
    }
    if count < 2 {
        return Err(TdhError::InvalidSweepCount);
    }
    let step = target_flow_rate / (count / 2) as f64;
    Ok((0..count).map(|i| i as f64 * step).collect())
}
