//! 구간/파이프라인 값 객체 검증과 재질 참고표 회귀 테스트.
use pump_sizing_toolbox::hydraulics::{
    Pipeline, PipelineError, PipelineInput, Section, SectionError, SectionInput,
};
use pump_sizing_toolbox::material_db;

fn sample_section() -> Section {
    Section::new(SectionInput {
        absolute_roughness: 0.000045,
        section_length: 100.0,
        diameter: 0.3,
        material: "Commercial steel".to_string(),
        inlet_pressure: 0.0,
        outlet_pressure: 0.0,
        k_values: vec![0.5, 0.9],
    })
    .expect("sample section")
}

fn sample_pipeline_input() -> PipelineInput {
    PipelineInput {
        sections: vec![sample_section()],
        start_ele_min: 0.0,
        start_ele_max: 2.0,
        end_ele_min: 8.0,
        end_ele_max: 10.0,
        start_pressure: 0.0,
        end_pressure: 0.0,
        start_flow_rate: 0.05,
        end_flow_rate: 0.05,
        is_end_day_lighted: false,
        is_metric: true,
    }
}

#[test]
fn section_rejects_negative_roughness() {
    let mut input = SectionInput {
        absolute_roughness: -1e-5,
        ..sample_input()
    };
    assert_eq!(
        Section::new(input.clone()).unwrap_err(),
        SectionError::InvalidRoughness
    );
    input.absolute_roughness = f64::NAN;
    assert_eq!(
        Section::new(input).unwrap_err(),
        SectionError::InvalidRoughness
    );
}

fn sample_input() -> SectionInput {
    SectionInput {
        absolute_roughness: 0.000045,
        section_length: 100.0,
        diameter: 0.3,
        material: "CS".to_string(),
        inlet_pressure: 0.0,
        outlet_pressure: 0.0,
        k_values: Vec::new(),
    }
}

#[test]
fn section_rejects_nonpositive_length_and_diameter() {
    let mut input = sample_input();
    input.section_length = 0.0;
    assert_eq!(
        Section::new(input.clone()).unwrap_err(),
        SectionError::InvalidLength
    );
    input.section_length = 100.0;
    input.diameter = 0.0;
    assert_eq!(
        Section::new(input.clone()).unwrap_err(),
        SectionError::InvalidDiameter
    );
    input.diameter = f64::INFINITY;
    assert_eq!(
        Section::new(input).unwrap_err(),
        SectionError::InvalidDiameter
    );
}

#[test]
fn section_reports_first_violation_only() {
    // 거칠기와 길이를 동시에 위반하면 거칠기 오류가 우선한다.
    let input = SectionInput {
        absolute_roughness: -1.0,
        section_length: -1.0,
        ..sample_input()
    };
    assert_eq!(
        Section::new(input).unwrap_err(),
        SectionError::InvalidRoughness
    );
}

#[test]
fn section_zero_roughness_is_valid() {
    let input = SectionInput {
        absolute_roughness: 0.0,
        ..sample_input()
    };
    assert!(Section::new(input).is_ok());
}

#[test]
fn section_setters_revalidate() {
    let mut section = sample_section();
    assert_eq!(
        section.set_diameter(-0.1).unwrap_err(),
        SectionError::InvalidDiameter
    );
    // 실패한 설정은 기존 값을 건드리지 않는다.
    assert_eq!(section.diameter(), 0.3);
    section.set_diameter(0.25).expect("valid diameter");
    assert_eq!(section.diameter(), 0.25);
    assert_eq!(
        section.set_section_length(f64::NAN).unwrap_err(),
        SectionError::InvalidLength
    );
    section.set_material("PVC");
    assert_eq!(section.material(), "PVC");
}

#[test]
fn section_k_values_append_only() {
    let mut section = sample_section();
    assert_eq!(section.k_values(), &[0.5, 0.9]);
    section.add_k_value(1.2);
    assert_eq!(section.k_values(), &[0.5, 0.9, 1.2]);
    assert!((section.k_sum() - 2.6).abs() < 1e-12);
}

#[test]
fn pipeline_requires_at_least_one_section() {
    let input = PipelineInput {
        sections: Vec::new(),
        ..sample_pipeline_input()
    };
    assert_eq!(
        Pipeline::new(input).unwrap_err(),
        PipelineError::EmptySections
    );
}

#[test]
fn pipeline_validation_order() {
    // 구간 없음이 표고 미설정보다 우선한다.
    let input = PipelineInput {
        sections: Vec::new(),
        start_ele_min: f64::NAN,
        ..sample_pipeline_input()
    };
    assert_eq!(
        Pipeline::new(input).unwrap_err(),
        PipelineError::EmptySections
    );

    let input = PipelineInput {
        start_ele_min: f64::NAN,
        end_ele_max: f64::NAN,
        ..sample_pipeline_input()
    };
    assert_eq!(
        Pipeline::new(input).unwrap_err(),
        PipelineError::StartElevationNotSet
    );

    let input = PipelineInput {
        end_ele_max: f64::INFINITY,
        ..sample_pipeline_input()
    };
    assert_eq!(
        Pipeline::new(input).unwrap_err(),
        PipelineError::EndElevationNotSet
    );

    let input = PipelineInput {
        start_ele_min: -1.0,
        ..sample_pipeline_input()
    };
    assert_eq!(
        Pipeline::new(input).unwrap_err(),
        PipelineError::NegativeElevation
    );
}

#[test]
fn pipeline_length_and_materials_follow_sections() {
    let mut pipeline = Pipeline::new(sample_pipeline_input()).expect("pipeline");
    assert!((pipeline.pipeline_length() - 100.0).abs() < 1e-12);
    assert_eq!(pipeline.material_list(), vec!["Commercial steel"]);

    let second = Section::new(SectionInput {
        section_length: 50.0,
        material: "PVC".to_string(),
        ..sample_input()
    })
    .expect("second section");
    pipeline.add_section(second);
    assert!((pipeline.pipeline_length() - 150.0).abs() < 1e-12);
    assert_eq!(pipeline.material_list(), vec!["Commercial steel", "PVC"]);
}

#[test]
fn pipeline_elevation_setters_revalidate() {
    let mut pipeline = Pipeline::new(sample_pipeline_input()).expect("pipeline");
    assert_eq!(
        pipeline.set_end_ele_max(f64::NAN).unwrap_err(),
        PipelineError::EndElevationNotSet
    );
    assert_eq!(
        pipeline.set_start_ele_min(-3.0).unwrap_err(),
        PipelineError::NegativeElevation
    );
    assert_eq!(pipeline.start_ele_min(), 0.0);
    pipeline.set_start_ele_min(1.0).expect("valid elevation");
    assert_eq!(pipeline.start_ele_min(), 1.0);
}

#[test]
fn material_lookup_is_case_insensitive() {
    let by_code = material_db::find_material("cs").expect("code lookup");
    assert_eq!(by_code.name, "Commercial steel");
    let by_name = material_db::find_material("commercial STEEL").expect("name lookup");
    assert_eq!(by_name.code, "CS");
    assert!(material_db::find_material("unobtainium").is_none());
}

#[test]
fn material_roughness_converts_to_feet() {
    let metric = material_db::roughness_for("CS", true).expect("metric");
    assert!((metric - 0.000045).abs() < 1e-12);
    let imperial = material_db::roughness_for("CS", false).expect("imperial");
    assert!((imperial - 0.000045 / 0.3048).abs() < 1e-12);
}
