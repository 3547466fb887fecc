/// Split text into chunks of at most `max_chars` characters, on line boundaries
///
/// Text that already fits is returned unchanged as a single chunk. Longer text
/// is split on `\n` and the lines are packed greedily, each followed by a
/// newline. A line longer than `max_chars` becomes an oversized chunk of its
/// own; lines are never split.
///
/// Lengths are counted in characters, which only approximates the model's
/// token budget.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for paragraph in text.split('\n') {
        let paragraph_len = paragraph.chars().count();

        if current_len + paragraph_len + 1 > max_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        current.push_str(paragraph);
        current.push('\n');
        current_len += paragraph_len + 1;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_chunk_short_text() {
        let text = "This is a short text.";
        let chunks = chunk_text(text, 100);
        assert_eq!(chunks, vec![text.to_string()]);
    }

    #[test]
    fn test_chunk_exact_length_is_single() {
        let text = "a".repeat(50);
        assert_eq!(chunk_text(&text, 50), vec![text]);
    }

    #[test]
    fn test_ten_paragraphs_split_after_seventh() {
        let paragraphs: Vec<String> = (0..10)
            .map(|i| char::from(b'a' + i as u8).to_string().repeat(2000))
            .collect();
        let text = paragraphs.join("\n");

        let chunks = chunk_text(&text, 15_000);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], format!("{}\n", paragraphs[..7].join("\n")));
        assert_eq!(chunks[1], format!("{}\n", paragraphs[7..].join("\n")));
    }

    #[test]
    fn test_oversized_paragraph_kept_whole() {
        let text = format!("short\n{}\ntail", "x".repeat(30));
        let chunks = chunk_text(&text, 10);

        assert_eq!(chunks, vec![
            "short\n".to_string(),
            format!("{}\n", "x".repeat(30)),
            "tail\n".to_string(),
        ]);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // 7 characters, 19 bytes
        let text = "가나다\n라마바";
        assert_eq!(chunk_text(text, 7), vec![text.to_string()]);
        assert_eq!(chunk_text(text, 5).len(), 2);
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let text = "one\n\ntwo";
        let chunks = chunk_text(text, 4);
        assert_eq!(chunks.concat(), "one\n\ntwo\n");
    }

    proptest! {
        #[test]
        fn prop_short_text_is_identity(text in "[a-z \\n]{0,40}") {
            prop_assert_eq!(chunk_text(&text, 40), vec![text.clone()]);
        }

        #[test]
        fn prop_paragraphs_preserved_in_order(
            paragraphs in proptest::collection::vec("[a-zA-Z0-9 ]{0,30}", 1..20),
            max_chars in 1usize..60,
        ) {
            let text = paragraphs.join("\n");
            let chunks = chunk_text(&text, max_chars);
            let joined = chunks.concat();

            if text.chars().count() <= max_chars {
                prop_assert_eq!(joined, text);
            } else {
                prop_assert_eq!(joined, format!("{}\n", text));
            }
        }

        #[test]
        fn prop_no_empty_chunks(text in "[a-z\\n]{1,200}", max_chars in 1usize..50) {
            for chunk in chunk_text(&text, max_chars) {
                prop_assert!(!chunk.is_empty());
            }
        }

        #[test]
        fn prop_chunks_respect_bound_unless_single_line(
            text in "[a-z\\n]{1,200}",
            max_chars in 1usize..50,
        ) {
            for chunk in chunk_text(&text, max_chars) {
                let len = chunk.chars().count();
                let lines = chunk.trim_end_matches('\n').split('\n').count();
                prop_assert!(len <= max_chars || lines == 1);
            }
        }
    }
}
