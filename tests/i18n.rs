//! 번역기 생성/폴백과 언어 결정 우선순위 테스트.
use pump_sizing_toolbox::i18n::{keys, resolve_language, Language, Translator};

#[test]
fn translator_new_selects_builtin_table() {
    let en = Translator::new("en");
    assert_eq!(en.language(), Language::En);
    assert_eq!(en.language_code(), "en");
    assert_eq!(en.t(keys::APP_EXIT), "Exiting application.");

    let ko = Translator::new("ko");
    assert_eq!(ko.language_code(), "ko");
    assert_eq!(ko.t(keys::APP_EXIT), "프로그램을 종료합니다.");
}

#[test]
fn translator_unknown_code_falls_back_to_korean() {
    // 원 저작 언어가 한국어이므로 미지원 코드는 ko로 폴백한다.
    let tr = Translator::new("fr");
    assert_eq!(tr.language(), Language::Ko);
}

#[test]
fn translator_without_pack_has_no_overrides() {
    let tr = Translator::new("en");
    assert!(tr.lookup(keys::APP_EXIT).is_none());
    assert!(tr.lookup("gui.tab.tdh_curve").is_none());
}

#[test]
fn missing_key_reports_placeholder() {
    let tr = Translator::new("ko");
    assert_eq!(tr.t("no.such.key"), "[missing translation]");
}

#[test]
fn language_resolution_prefers_cli_then_config() {
    // CLI 플래그가 설정값을 이긴다.
    assert_eq!(resolve_language("ko", Some("en")), "ko");
    // CLI가 auto면 설정값을 쓴다.
    assert_eq!(resolve_language("auto", Some("en")), "en");
    // 지역 변형은 기본 언어로 정규화된다.
    assert_eq!(resolve_language("ko-KR", Some("en")), "ko");
    // 미지원 CLI 코드는 무시하고 설정값으로 넘어간다.
    assert_eq!(resolve_language("de", Some("en")), "en");
}
