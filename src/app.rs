use crate::config::Config;
use crate::hydraulics::pipeline::PipelineError;
use crate::hydraulics::section::SectionError;
use crate::hydraulics::tdh::TdhError;
use crate::i18n::{self, Translator};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// 구간 검증 오류
    Section(SectionError),
    /// 파이프라인 검증 오류
    Pipeline(PipelineError),
    /// TDH 계산/스윕 오류
    Tdh(TdhError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Section(e) => write!(f, "구간 입력 오류: {e}"),
            AppError::Pipeline(e) => write!(f, "파이프라인 입력 오류: {e}"),
            AppError::Tdh(e) => write!(f, "TDH 계산 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<SectionError> for AppError {
    fn from(value: SectionError) -> Self {
        AppError::Section(value)
    }
}

impl From<PipelineError> for AppError {
    fn from(value: PipelineError) -> Self {
        AppError::Pipeline(value)
    }
}

impl From<TdhError> for AppError {
    fn from(value: TdhError) -> Self {
        AppError::Tdh(value)
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
/// 검증/계산 오류는 출력 후 메뉴로 돌아가고, 입출력 오류만 상위로 전파한다.
pub fn run(config: &mut Config, tr: &Translator) -> Result<(), AppError> {
    loop {
        let outcome = match ui_cli::main_menu(tr)? {
            MenuChoice::TdhCurve => ui_cli::handle_tdh_curve(tr, config),
            MenuChoice::Materials => ui_cli::handle_materials(tr, config),
            MenuChoice::Settings => ui_cli::handle_settings(tr, config)
                .and_then(|_| config.save().map_err(AppError::from)),
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        if let Err(err) = outcome {
            match err {
                AppError::Io(e) => return Err(AppError::Io(e)),
                other => println!("{}: {other}", tr.t(i18n::keys::ERROR_PREFIX)),
            }
        }
    }
    Ok(())
}
