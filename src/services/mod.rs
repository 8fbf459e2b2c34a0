// Business logic services

pub mod assessment_pipeline_service;
pub mod generation_service;
pub mod openai_client;

pub use assessment_pipeline_service::{
    AssessmentOutcome, AssessmentPipelineService, StepOutcome, StepStatus,
};
pub use generation_service::GenerationService;
pub use openai_client::{ChatCompletionMessage, OpenAiClient, CHAT_COMPLETION_MODEL};
