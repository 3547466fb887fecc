//! Prompt templates for summarization

use crate::types::StyleParameters;

/// Marker opening the summary in the model output
pub const SUMMARY_START_MARKER: &str = "<summary>";

/// Marker closing the summary; also used as the stop sequence
pub const SUMMARY_END_MARKER: &str = "</summary>";

/// How the input text is framed in the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMode {
    /// Input is a piece of the source text
    SingleChunk,
    /// Input is the blank-line separated per-chunk summaries
    MetaCombine,
}

const NO_META_COMMENTARY_RULES: &str = r#"- Start directly with the content, without any introductory phrases
- NEVER start with "This document", "This text", "The document", "The text", or similar phrases
- NEVER use phrases like "This document discusses", "This text explains", or "The content describes"
- NEVER refer to the document, text, article, or content itself in any way"#;

const OUTPUT_EXAMPLES: &str = r#"Example of good output format for paragraph style:
"Machine Learning courses require basic computer science expertise. Students need knowledge of data structures and Big O notation. The course emphasizes application across various domains."

Example of good output format for bullet points:
"• Machine Learning requires basic computer science expertise
• Students need knowledge of data structures and Big O notation
• The course emphasizes application across various domains""#;

/// Build the generation prompt for `text`
pub fn build_prompt(text: &str, style: &StyleParameters, mode: SummaryMode) -> String {
    match mode {
        SummaryMode::SingleChunk => chunk_prompt(text, style),
        SummaryMode::MetaCombine => combine_prompt(text, style),
    }
}

/// Prompt for summarizing one chunk of source text
fn chunk_prompt(text: &str, style: &StyleParameters) -> String {
    format!(
        r#"
<instruction>
You are an expert document summarizer. Create a {length} length summary of the following text.

Rules:
- Provide ONLY the summary between {start} and {end} tags
- Format as {format} style summary
- Focus primarily on {focus} content
- Use a {tone} tone
- Capture the key points and main ideas
- Be concise but comprehensive
- Preserve important details, names, dates, and facts
{no_meta}
- NEVER use phrases like "Here is a summary" or "In conclusion"
- NEVER include introductions, conclusions, or meta-commentary
- Present the information directly as standalone content

Example of what to avoid:
"This document serves as an overview for a Machine Learning course..."
"The text explains that machine learning requires basic computer science expertise..."
"Here is a cohesive medium combined summary of the sections..."

{examples}
</instruction>

<text>
{text}
</text>

{start}
"#,
        length = style.length,
        format = style.format,
        focus = style.focus,
        tone = style.tone,
        start = SUMMARY_START_MARKER,
        end = SUMMARY_END_MARKER,
        no_meta = NO_META_COMMENTARY_RULES,
        examples = OUTPUT_EXAMPLES,
        text = text,
    )
}

/// Prompt for merging section summaries into one
fn combine_prompt(summaries: &str, style: &StyleParameters) -> String {
    format!(
        r#"
<instruction>
You are an expert document summarizer. Below are several summaries of different sections of a document.
Create a cohesive {length} combined summary from these section summaries.

Rules:
- Provide ONLY the summary between {start} and {end} tags
- Format as {format} style summary
- Focus primarily on {focus} content
- Use a {tone} tone
- Combine all important information
- Eliminate redundancies
- Create a smooth, cohesive summary
{no_meta}
- NEVER use phrases like "Based on the summaries" or "The documents discuss"
- NEVER include introductions, conclusions, or meta-commentary
- Present the information directly as standalone content

Example of what to avoid:
"This document serves as an overview for a Machine Learning course..."
"Based on the summaries, machine learning requires basic computer science expertise..."
"Here is a cohesive medium combined summary of the sections..."

{examples}
</instruction>

<section_summaries>
{summaries}
</section_summaries>

{start}
"#,
        length = style.length,
        format = style.format,
        focus = style.focus,
        tone = style.tone,
        start = SUMMARY_START_MARKER,
        end = SUMMARY_END_MARKER,
        no_meta = NO_META_COMMENTARY_RULES,
        examples = OUTPUT_EXAMPLES,
        summaries = summaries,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> StyleParameters {
        StyleParameters {
            length: "short".to_string(),
            format: "bullet".to_string(),
            focus: "technical".to_string(),
            tone: "formal".to_string(),
        }
    }

    #[test]
    fn test_chunk_prompt_embeds_text_and_style() {
        let prompt = build_prompt("Rust is fast.", &style(), SummaryMode::SingleChunk);

        assert!(prompt.contains("<text>\nRust is fast.\n</text>"));
        assert!(prompt.contains("Create a short length summary"));
        assert!(prompt.contains("Format as bullet style summary"));
        assert!(prompt.contains("Focus primarily on technical content"));
        assert!(prompt.contains("Use a formal tone"));
        assert!(prompt.contains("NEVER refer to the document"));
        assert!(prompt.trim_end().ends_with(SUMMARY_START_MARKER));
        assert!(!prompt.contains("<section_summaries>"));
    }

    #[test]
    fn test_combine_prompt_framing() {
        let prompt = build_prompt("first\n\nsecond", &style(), SummaryMode::MetaCombine);

        assert!(prompt.contains("<section_summaries>\nfirst\n\nsecond\n</section_summaries>"));
        assert!(prompt.contains("Eliminate redundancies"));
        assert!(prompt.contains("Create a cohesive short combined summary"));
        assert!(!prompt.contains("<text>"));
        assert!(prompt.trim_end().ends_with(SUMMARY_START_MARKER));
    }

    #[test]
    fn test_unrecognized_style_passed_verbatim() {
        let mut style = style();
        style.tone = "pirate-ish, but polite".to_string();
        let prompt = build_prompt("x", &style, SummaryMode::SingleChunk);
        assert!(prompt.contains("Use a pirate-ish, but polite tone"));
    }

    #[test]
    fn test_builder_is_deterministic() {
        let a = build_prompt("same", &style(), SummaryMode::MetaCombine);
        let b = build_prompt("same", &style(), SummaryMode::MetaCombine);
        assert_eq!(a, b);
    }
}
