//! 파이프라인 수리 계산 모듈 모음.

pub mod pipeline;
pub mod section;
pub mod tdh;

pub use pipeline::{Pipeline, PipelineError, PipelineInput};
pub use section::{Section, SectionError, SectionInput};
pub use tdh::{compute_tdh, generate_flow_sweep, TdhCurves, TdhError};
