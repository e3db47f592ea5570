use super::section::Section;

/// 파이프라인 검증 오류를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineError {
    /// 구간이 하나도 없는 경우
    EmptySections,
    /// 시작 표고(최소/최대)가 설정되지 않은 경우
    StartElevationNotSet,
    /// 종점 표고(최소/최대)가 설정되지 않은 경우
    EndElevationNotSet,
    /// 표고 값이 음수인 경우
    NegativeElevation,
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::EmptySections => {
                write!(f, "파이프라인에는 최소 한 개의 구간이 필요합니다.")
            }
            PipelineError::StartElevationNotSet => {
                write!(f, "시작 표고(최소/최대)를 설정해야 합니다.")
            }
            PipelineError::EndElevationNotSet => {
                write!(f, "종점 표고(최소/최대)를 설정해야 합니다.")
            }
            PipelineError::NegativeElevation => write!(f, "표고 값은 음수가 될 수 없습니다."),
        }
    }
}

impl std::error::Error for PipelineError {}

/// 파이프라인 구성 입력값.
///
/// 표고는 측량 오차를 감안해 최소/최대 두 값을 받는다. 엔진은 최악 조건
/// (시작 최소, 종점 최대)과 최선 조건(시작 최대, 종점 최소) 두 곡선을 만든다.
#[derive(Debug, Clone)]
pub struct PipelineInput {
    pub sections: Vec<Section>,
    pub start_ele_min: f64,
    pub start_ele_max: f64,
    pub end_ele_min: f64,
    pub end_ele_max: f64,
    /// 시작 경계 압력 (게이지)
    pub start_pressure: f64,
    /// 종점 경계 압력 (게이지)
    pub end_pressure: f64,
    /// 설계 유량 범위의 시작측 유량
    pub start_flow_rate: f64,
    /// 설계 유량 범위의 토출측 유량
    pub end_flow_rate: f64,
    /// 토출 끝이 대기에 개방(day-lighted)되어 있는지 여부
    pub is_end_day_lighted: bool,
    /// 미터계 여부
    pub is_metric: bool,
}

/// 계산 한 건에 쓰이는 파이프라인 값 객체. 구간 목록과 시스템 경계 조건을 담는다.
#[derive(Debug, Clone)]
pub struct Pipeline {
    sections: Vec<Section>,
    start_ele_min: f64,
    start_ele_max: f64,
    end_ele_min: f64,
    end_ele_max: f64,
    start_pressure: f64,
    end_pressure: f64,
    start_flow_rate: f64,
    end_flow_rate: f64,
    is_end_day_lighted: bool,
    is_metric: bool,
}

impl Pipeline {
    /// 입력값을 검증해 파이프라인을 생성한다. 첫 번째로 위반된 조건을 오류로 반환한다.
    /// 검증 순서: 구간 존재 → 시작 표고 설정 → 종점 표고 설정 → 표고 비음수.
    pub fn new(input: PipelineInput) -> Result<Self, PipelineError> {
        if input.sections.is_empty() {
            return Err(PipelineError::EmptySections);
        }
        if !input.start_ele_min.is_finite() || !input.start_ele_max.is_finite() {
            return Err(PipelineError::StartElevationNotSet);
        }
        if !input.end_ele_min.is_finite() || !input.end_ele_max.is_finite() {
            return Err(PipelineError::EndElevationNotSet);
        }
        if input.start_ele_min < 0.0
            || input.end_ele_min < 0.0
            || input.start_ele_max < 0.0
            || input.end_ele_max < 0.0
        {
            return Err(PipelineError::NegativeElevation);
        }
        Ok(Self {
            sections: input.sections,
            start_ele_min: input.start_ele_min,
            start_ele_max: input.start_ele_max,
            end_ele_min: input.end_ele_min,
            end_ele_max: input.end_ele_max,
            start_pressure: input.start_pressure,
            end_pressure: input.end_pressure,
            start_flow_rate: input.start_flow_rate,
            end_flow_rate: input.end_flow_rate,
            is_end_day_lighted: input.is_end_day_lighted,
            is_metric: input.is_metric,
        })
    }

    /// 흐름 방향 순서의 구간 목록.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn start_ele_min(&self) -> f64 {
        self.start_ele_min
    }

    pub fn start_ele_max(&self) -> f64 {
        self.start_ele_max
    }

    pub fn end_ele_min(&self) -> f64 {
        self.end_ele_min
    }

    pub fn end_ele_max(&self) -> f64 {
        self.end_ele_max
    }

    pub fn start_pressure(&self) -> f64 {
        self.start_pressure
    }

    pub fn end_pressure(&self) -> f64 {
        self.end_pressure
    }

    pub fn start_flow_rate(&self) -> f64 {
        self.start_flow_rate
    }

    pub fn end_flow_rate(&self) -> f64 {
        self.end_flow_rate
    }

    pub fn is_end_day_lighted(&self) -> bool {
        self.is_end_day_lighted
    }

    pub fn is_metric(&self) -> bool {
        self.is_metric
    }

    /// 전체 길이 = 구간 길이의 합. 매 호출 시 재계산한다.
    pub fn pipeline_length(&self) -> f64 {
        self.sections.iter().map(Section::section_length).sum()
    }

    /// 구간 순서를 유지한 재질 목록.
    pub fn material_list(&self) -> Vec<&str> {
        self.sections.iter().map(Section::material).collect()
    }

    /// 구간을 맨 뒤에 추가한다. 기존 구간의 교체나 삭제는 지원하지 않는다.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// 시작 표고 최소값을 교체한다. 생성 시와 동일한 검증을 거친다.
    pub fn set_start_ele_min(&mut self, value: f64) -> Result<(), PipelineError> {
        validate_elevation(value, PipelineError::StartElevationNotSet)?;
        self.start_ele_min = value;
        Ok(())
    }

    /// 시작 표고 최대값을 교체한다.
    pub fn set_start_ele_max(&mut self, value: f64) -> Result<(), PipelineError> {
        validate_elevation(value, PipelineError::StartElevationNotSet)?;
        self.start_ele_max = value;
        Ok(())
    }

    /// 종점 표고 최소값을 교체한다.
    pub fn set_end_ele_min(&mut self, value: f64) -> Result<(), PipelineError> {
        validate_elevation(value, PipelineError::EndElevationNotSet)?;
        self.end_ele_min = value;
        Ok(())
    }

    /// 종점 표고 최대값을 교체한다.
    pub fn set_end_ele_max(&mut self, value: f64) -> Result<(), PipelineError> {
        validate_elevation(value, PipelineError::EndElevationNotSet)?;
        self.end_ele_max = value;
        Ok(())
    }

    pub fn set_start_pressure(&mut self, value: f64) {
        self.start_pressure = value;
    }

    pub fn set_end_pressure(&mut self, value: f64) {
        self.end_pressure = value;
    }

    pub fn set_start_flow_rate(&mut self, value: f64) {
        self.start_flow_rate = value;
    }

    pub fn set_end_flow_rate(&mut self, value: f64) {
        self.end_flow_rate = value;
    }

    pub fn set_is_end_day_lighted(&mut self, value: bool) {
        self.is_end_day_lighted = value;
    }

    pub fn set_is_metric(&mut self, value: bool) {
        self.is_metric = value;
    }
}

fn validate_elevation(value: f64, not_set: PipelineError) -> Result<(), PipelineError> {
    if !value.is_finite() {
        return Err(not_set);
    }
    if value < 0.0 {
        return Err(PipelineError::NegativeElevation);
    }
    Ok(())
}
