/// 배관 구간 검증 오류를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionError {
    /// 절대 거칠기가 설정되지 않았거나 음수인 경우
    InvalidRoughness,
    /// 구간 길이가 설정되지 않았거나 0 이하인 경우
    InvalidLength,
    /// 내경이 설정되지 않았거나 0 이하인 경우
    InvalidDiameter,
}

impl std::fmt::Display for SectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionError::InvalidRoughness => write!(f, "절대 거칠기는 0 이상의 값이어야 합니다."),
            SectionError::InvalidLength => write!(f, "구간 길이는 0보다 커야 합니다."),
            SectionError::InvalidDiameter => write!(f, "내경은 0보다 커야 합니다."),
        }
    }
}

impl std::error::Error for SectionError {}

/// 배관 구간 구성 입력값.
#[derive(Debug, Clone)]
pub struct SectionInput {
    /// 절대 거칠기 ε (단위계의 길이 단위)
    pub absolute_roughness: f64,
    /// 구간 길이
    pub section_length: f64,
    /// 내경(수력 직경)
    pub diameter: f64,
    /// 재질 표기. 표시용이며 계산에는 쓰지 않는다.
    pub material: String,
    /// 구간 입구 압력 (표시용)
    pub inlet_pressure: f64,
    /// 구간 출구 압력 (표시용)
    pub outlet_pressure: f64,
    /// 피팅 K 값 목록. 입력 순서를 유지한다.
    pub k_values: Vec<f64>,
}

/// 하나의 배관 구간. 생성 시 검증을 통과한 값만 담는다.
#[derive(Debug, Clone)]
pub struct Section {
    absolute_roughness: f64,
    section_length: f64,
    diameter: f64,
    material: String,
    inlet_pressure: f64,
    outlet_pressure: f64,
    k_values: Vec<f64>,
}

impl Section {
    /// 입력값을 검증해 구간을 생성한다. 첫 번째로 위반된 조건을 오류로 반환한다.
    /// 검증 순서: 거칠기 → 길이 → 내경. 재질과 K 값 목록은 타입상 항상 존재한다.
    pub fn new(input: SectionInput) -> Result<Self, SectionError> {
        validate_roughness(input.absolute_roughness)?;
        validate_length(input.section_length)?;
        validate_diameter(input.diameter)?;
        Ok(Self {
            absolute_roughness: input.absolute_roughness,
            section_length: input.section_length,
            diameter: input.diameter,
            material: input.material,
            inlet_pressure: input.inlet_pressure,
            outlet_pressure: input.outlet_pressure,
            k_values: input.k_values,
        })
    }

    pub fn absolute_roughness(&self) -> f64 {
        self.absolute_roughness
    }

    pub fn section_length(&self) -> f64 {
        self.section_length
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn inlet_pressure(&self) -> f64 {
        self.inlet_pressure
    }

    pub fn outlet_pressure(&self) -> f64 {
        self.outlet_pressure
    }

    pub fn k_values(&self) -> &[f64] {
        &self.k_values
    }

    /// 구간 내 모든 K 값의 합.
    pub fn k_sum(&self) -> f64 {
        self.k_values.iter().sum()
    }

    /// 절대 거칠기를 교체한다. 생성 시와 동일한 검증을 거친다.
    pub fn set_absolute_roughness(&mut self, value: f64) -> Result<(), SectionError> {
        validate_roughness(value)?;
        self.absolute_roughness = value;
        Ok(())
    }

    /// 구간 길이를 교체한다.
    pub fn set_section_length(&mut self, value: f64) -> Result<(), SectionError> {
        validate_length(value)?;
        self.section_length = value;
        Ok(())
    }

    /// 내경을 교체한다.
    pub fn set_diameter(&mut self, value: f64) -> Result<(), SectionError> {
        validate_diameter(value)?;
        self.diameter = value;
        Ok(())
    }

    pub fn set_material(&mut self, value: impl Into<String>) {
        self.material = value.into();
    }

    pub fn set_inlet_pressure(&mut self, value: f64) {
        self.inlet_pressure = value;
    }

    pub fn set_outlet_pressure(&mut self, value: f64) {
        self.outlet_pressure = value;
    }

    /// K 값을 맨 뒤에 추가한다. 기존 항목의 교체나 삭제는 지원하지 않는다.
    pub fn add_k_value(&mut self, k: f64) {
        self.k_values.push(k);
    }
}

fn validate_roughness(value: f64) -> Result<(), SectionError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SectionError::InvalidRoughness)
    }
}

fn validate_length(value: f64) -> Result<(), SectionError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SectionError::InvalidLength)
    }
}

fn validate_diameter(value: f64) -> Result<(), SectionError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SectionError::InvalidDiameter)
    }
}
