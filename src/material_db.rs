/// 대표 배관 재질의 절대 거칠기 참고표와 조회 기능을 제공한다.
/// 값은 참고용 개략치이며 실제 설계에서는 배관 사양서 값을 우선해야 한다.

const FOOT_PER_METER: f64 = 1.0 / 0.3048;

#[derive(Debug)]
pub struct PipeMaterial {
    pub code: &'static str,
    pub name: &'static str,
    /// 절대 거칠기 ε [m]
    pub roughness_m: f64,
    pub notes: &'static str,
}

pub fn materials() -> &'static [PipeMaterial] {
    MATERIALS
}

pub fn find_material(code: &str) -> Option<&'static PipeMaterial> {
    MATERIALS
        .iter()
        .find(|m| m.code.eq_ignore_ascii_case(code) || m.name.eq_ignore_ascii_case(code))
}

/// 단위계에 맞는 절대 거칠기를 반환한다. 미터계는 m, 야드파운드계는 ft.
pub fn roughness_for(code: &str, is_metric: bool) -> Option<f64> {
    let mat = find_material(code)?;
    if is_metric {
        Some(mat.roughness_m)
    } else {
        Some(mat.roughness_m * FOOT_PER_METER)
    }
}

const MATERIALS: &[PipeMaterial] = &[
    PipeMaterial {
        code: "CS",
        name: "Commercial steel",
        roughness_m: 0.000045,
        notes: "탄소강 신관 기준",
    },
    PipeMaterial {
        code: "GI",
        name: "Galvanized iron",
        roughness_m: 0.00015,
        notes: "",
    },
    PipeMaterial {
        code: "CI",
        name: "Cast iron",
        roughness_m: 0.00026,
        notes: "",
    },
    PipeMaterial {
        code: "DI",
        name: "Ductile iron",
        roughness_m: 0.00026,
        notes: "내면 라이닝 없으면 주철과 동급",
    },
    PipeMaterial {
        code: "SS",
        name: "Stainless steel",
        roughness_m: 0.000015,
        notes: "",
    },
    PipeMaterial {
        code: "CU",
        name: "Copper",
        roughness_m: 0.0000015,
        notes: "인발관",
    },
    PipeMaterial {
        code: "PVC",
        name: "PVC",
        roughness_m: 0.0000015,
        notes: "플라스틱 평활관",
    },
    PipeMaterial {
        code: "HDPE",
        name: "HDPE",
        roughness_m: 0.0000015,
        notes: "",
    },
    PipeMaterial {
        code: "CONC",
        name: "Concrete",
        roughness_m: 0.0003,
        notes: "표면 상태에 따라 0.3~3 mm",
    },
];
