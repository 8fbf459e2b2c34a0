// Data models and generation schemas

pub mod user;
pub mod wellness_score;
pub mod hsa_info;
pub mod recommendation;
pub mod action_plan;
pub mod chat_message;
pub mod assessment_response;
pub mod generation;
pub mod validation;

pub use user::*;
pub use wellness_score::*;
pub use hsa_info::*;
pub use recommendation::*;
pub use action_plan::*;
pub use chat_message::*;
pub use assessment_response::*;
pub use generation::*;
pub use validation::*;
