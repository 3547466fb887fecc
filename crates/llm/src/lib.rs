//! docsum LLM Integration
//!
//! Text chunking, prompt construction, the Cohere generation client and
//! the chunk → summarize → combine orchestration.

mod chunking;
mod client;
mod llm_trait;
mod prompts;
mod summarize;
mod types;

pub use chunking::chunk_text;
pub use client::CohereClient;
pub use llm_trait::GenerationClient;
pub use prompts::{build_prompt, SummaryMode, SUMMARY_END_MARKER, SUMMARY_START_MARKER};
pub use summarize::{clean_summary, Summarizer};
pub use types::{
    CohereGenerateRequest, CohereGenerateResponse, CohereGeneration, GenerateRequest,
    StyleParameters,
};
