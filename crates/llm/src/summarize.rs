use std::sync::Arc;

use docsum_common::{DocsumError, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

use crate::chunking::chunk_text;
use crate::llm_trait::GenerationClient;
use crate::prompts::{build_prompt, SummaryMode, SUMMARY_END_MARKER, SUMMARY_START_MARKER};
use crate::types::{GenerateRequest, StyleParameters};

const TEMPERATURE: f32 = 0.1;
const MAX_TOKENS: u32 = 1024;

/// Summarizer for long text: per-chunk summaries, then one combining pass
pub struct Summarizer {
    client: Arc<dyn GenerationClient>,
    max_chunk_chars: usize,
    concurrency: usize,
}

impl Summarizer {
    /// Create new summarizer
    pub fn new(client: Arc<dyn GenerationClient>, max_chunk_chars: usize) -> Self {
        Self {
            client,
            max_chunk_chars,
            concurrency: 1,
        }
    }

    /// Allow up to `concurrency` per-chunk generation calls in flight
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Chunk `text` and summarize it
    pub async fn summarize_text(&self, text: &str, style: &StyleParameters) -> Result<String> {
        info!("Starting summarization - Text length: {} chars", text.chars().count());

        let chunks = chunk_text(text, self.max_chunk_chars);
        info!("Text divided into {} chunks for processing", chunks.len());

        self.summarize(&chunks, style).await
    }

    /// Summarize pre-chunked text
    ///
    /// Any generation failure aborts the whole run; no partial summary is
    /// returned.
    pub async fn summarize(&self, chunks: &[String], style: &StyleParameters) -> Result<String> {
        let summaries = match chunks {
            [] => return Err(DocsumError::EmptyInput),
            [single] => {
                debug!("Single chunk, using direct summarization");
                return self.generate_summary(single, style, SummaryMode::SingleChunk).await;
            }
            _ => self.summarize_chunks(chunks, style).await?,
        };

        // Never combine a single summary
        if let [only] = summaries.as_slice() {
            return Ok(only.clone());
        }

        let combined = summaries.join("\n\n");
        info!("Combined chunk summaries - Length: {} chars", combined.chars().count());

        self.generate_summary(&combined, style, SummaryMode::MetaCombine)
            .await
    }

    /// Summarize each chunk, results in chunk order
    async fn summarize_chunks(
        &self,
        chunks: &[String],
        style: &StyleParameters,
    ) -> Result<Vec<String>> {
        let total = chunks.len();

        // `buffered` yields in input order regardless of completion order
        stream::iter(chunks.iter().enumerate())
            .map(|(i, chunk)| async move {
                debug!("Summarizing chunk {}/{}", i + 1, total);
                self.generate_summary(chunk, style, SummaryMode::SingleChunk)
                    .await
            })
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    async fn generate_summary(
        &self,
        text: &str,
        style: &StyleParameters,
        mode: SummaryMode,
    ) -> Result<String> {
        let request = GenerateRequest {
            prompt: build_prompt(text, style, mode),
            temperature: TEMPERATURE,
            stop_sequences: vec![SUMMARY_END_MARKER.to_string()],
            max_tokens: MAX_TOKENS,
        };

        let raw = self.client.generate(request).await?;
        Ok(clean_summary(&raw))
    }
}

/// Strip summary markers from untrusted model output
///
/// Truncates at the first end marker, removes every start marker and trims
/// whitespace, repeating until no marker is left so that cleaning twice is
/// the same as cleaning once.
pub fn clean_summary(raw: &str) -> String {
    let mut text = raw.to_string();

    loop {
        if let Some(end) = text.find(SUMMARY_END_MARKER) {
            text.truncate(end);
        }
        if !text.contains(SUMMARY_START_MARKER) {
            break;
        }
        text = text.replace(SUMMARY_START_MARKER, "");
    }

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Scripted client recording every prompt it receives
    struct ScriptedClient {
        prompts: Mutex<Vec<String>>,
        fail_on_call: Option<usize>,
    }

    impl ScriptedClient {
        fn new() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                fail_on_call: None,
            }
        }

        fn failing_on(call: usize) -> Self {
            Self {
                fail_on_call: Some(call),
                ..Self::new()
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationClient for ScriptedClient {
        async fn generate(&self, request: GenerateRequest) -> Result<String> {
            assert_eq!(request.stop_sequences, vec![SUMMARY_END_MARKER.to_string()]);
            assert_eq!(request.max_tokens, MAX_TOKENS);

            let call = {
                let mut prompts = self.prompts.lock().unwrap();
                prompts.push(request.prompt.clone());
                prompts.len()
            };

            if self.fail_on_call == Some(call) {
                return Err(DocsumError::generation("upstream exploded"));
            }

            if request.prompt.contains("<section_summaries>") {
                Ok(" <summary>combined</summary> trailing".to_string())
            } else {
                let body = request
                    .prompt
                    .split("<text>\n")
                    .nth(1)
                    .and_then(|rest| rest.split("\n</text>").next())
                    .unwrap_or_default();
                Ok(format!("summary of [{}]</summary>", body.trim()))
            }
        }

        async fn test_connection(&self) -> Result<bool> {
            Ok(true)
        }
    }

    /// Client whose latency decreases with the chunk number
    struct SlowFirstClient;

    #[async_trait]
    impl GenerationClient for SlowFirstClient {
        async fn generate(&self, request: GenerateRequest) -> Result<String> {
            if request.prompt.contains("<section_summaries>") {
                let body = request
                    .prompt
                    .split("<section_summaries>\n")
                    .nth(1)
                    .and_then(|rest| rest.split("\n</section_summaries>").next())
                    .unwrap_or_default();
                return Ok(body.to_string());
            }

            let delay = if request.prompt.contains("c1") {
                30
            } else if request.prompt.contains("c2") {
                15
            } else {
                0
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;

            let label = ["c1", "c2", "c3"]
                .into_iter()
                .find(|label| request.prompt.contains(label))
                .unwrap_or("?");
            Ok(format!("s-{}", label))
        }

        async fn test_connection(&self) -> Result<bool> {
            Ok(true)
        }
    }

    fn chunks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_single_chunk_calls_generation_once() {
        let client = Arc::new(ScriptedClient::new());
        let summarizer = Summarizer::new(client.clone(), 15_000);

        let summary = summarizer
            .summarize(&chunks(&["only chunk"]), &StyleParameters::default())
            .await
            .unwrap();

        assert_eq!(summary, "summary of [only chunk]");
        assert_eq!(client.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_three_chunks_call_generation_four_times() {
        let client = Arc::new(ScriptedClient::new());
        let summarizer = Summarizer::new(client.clone(), 15_000);

        let summary = summarizer
            .summarize(&chunks(&["c1", "c2", "c3"]), &StyleParameters::default())
            .await
            .unwrap();

        assert_eq!(summary, "combined");

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 4);

        let meta = &prompts[3];
        assert!(meta.contains(
            "<section_summaries>\nsummary of [c1]\n\nsummary of [c2]\n\nsummary of [c3]\n</section_summaries>"
        ));
    }

    #[tokio::test]
    async fn test_empty_chunks_fail_without_calls() {
        let client = Arc::new(ScriptedClient::new());
        let summarizer = Summarizer::new(client.clone(), 15_000);

        let err = summarizer
            .summarize(&[], &StyleParameters::default())
            .await
            .unwrap_err();

        assert!(matches!(err, DocsumError::EmptyInput));
        assert!(client.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_failure_on_second_chunk_aborts() {
        let client = Arc::new(ScriptedClient::failing_on(2));
        let summarizer = Summarizer::new(client.clone(), 15_000);

        let err = summarizer
            .summarize(&chunks(&["c1", "c2", "c3"]), &StyleParameters::default())
            .await
            .unwrap_err();

        assert!(matches!(err, DocsumError::Generation(_)));
        // No third chunk call, no combining call
        assert_eq!(client.prompts().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_results_keep_chunk_order() {
        let summarizer = Summarizer::new(Arc::new(SlowFirstClient), 15_000).with_concurrency(3);

        let summary = summarizer
            .summarize(&chunks(&["c1", "c2", "c3"]), &StyleParameters::default())
            .await
            .unwrap();

        assert_eq!(summary, "s-c1\n\ns-c2\n\ns-c3");
    }

    #[tokio::test]
    async fn test_summarize_text_chunks_long_input() {
        let client = Arc::new(ScriptedClient::new());
        let summarizer = Summarizer::new(client.clone(), 10);

        let summary = summarizer
            .summarize_text("first line\nsecond line", &StyleParameters::default())
            .await
            .unwrap();

        assert_eq!(summary, "combined");
        assert_eq!(client.prompts().len(), 3);
    }

    #[test]
    fn test_clean_summary_truncates_at_end_marker() {
        assert_eq!(clean_summary("  Key facts.</summary> junk </summary>"), "Key facts.");
    }

    #[test]
    fn test_clean_summary_removes_start_marker() {
        assert_eq!(clean_summary("<summary>\nKey <summary>facts.\n"), "Key facts.");
    }

    #[test]
    fn test_clean_summary_nested_markers() {
        assert_eq!(clean_summary("a<sum<summary>mary>b"), "ab");
        assert_eq!(clean_summary("a</<summary>summary>b"), "a");
    }

    proptest! {
        #[test]
        fn prop_clean_summary_is_idempotent(raw in "(<summary>|</summary>|<sum|mary>|</|[a-z ]|\\n){0,30}") {
            let once = clean_summary(&raw);
            prop_assert_eq!(clean_summary(&once), once.clone());
        }
    }
}
