pub mod generator;
pub mod llm_service;

pub use generator::Generator;
pub use llm_service::LlmService;
