use std::path::Path;

use tokio::fs;

use crate::{error::Result, types::VideoInsight};

/// Format an insight as human-readable markdown
pub fn format_insight_readable(insight: &VideoInsight) -> String {
    let mut output = String::new();

    // Title
    output.push_str(&format!("# {}\n\n", insight.title));

    // Summary
    if !insight.summary.is_empty() {
        output.push_str("## Summary\n\n");
        output.push_str(&insight.summary);
        output.push_str("\n\n");
    }

    // Description
    if !insight.description.is_empty() {
        output.push_str("## Description\n\n");
        output.push_str(&insight.description);
        output.push_str("\n\n");
    }

    // Tags
    if !insight.tags.is_empty() {
        output.push_str("## Tags\n\n");
        output.push_str(&insight.tags.join(" "));
        output.push_str("\n\n");
    }

    // Chapters
    output.push_str("## Chapters\n\n");
    for chapter in &insight.chapters {
        output.push_str(&format!("- [{}] {}\n", chapter.time, chapter.title));
    }

    output
}

/// Save an insight as pretty JSON
pub async fn save_insight(insight: &VideoInsight, path: &Path) -> Result<()> {
    let pretty_json = serde_json::to_string_pretty(insight)?;
    fs::write(path, &pretty_json).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{extract::default_chapters, types::Chapter};

    fn sample() -> VideoInsight {
        VideoInsight {
            title: "Rust in Production".to_string(),
            summary: "Short summary.".to_string(),
            description: String::new(),
            tags: vec!["#rust".to_string(), "#backend".to_string()],
            chapters: vec![Chapter::new("00:00", "Intro"), Chapter::new("05:30", "Middle")],
        }
    }

    #[test]
    fn test_readable_layout() {
        let text = format_insight_readable(&sample());
        assert!(text.starts_with("# Rust in Production\n\n## Summary\n\nShort summary.\n\n"));
        assert!(!text.contains("## Description"));
        assert!(text.contains("## Tags\n\n#rust #backend\n\n"));
        assert!(text.ends_with("## Chapters\n\n- [00:00] Intro\n- [05:30] Middle\n"));
    }

    #[test]
    fn test_default_chapters_render() {
        let insight = VideoInsight {
            title: String::new(),
            summary: String::new(),
            description: String::new(),
            tags: Vec::new(),
            chapters: default_chapters(),
        };
        let text = format_insight_readable(&insight);
        assert!(text.contains("- [00:00] Introduction\n"));
        assert!(!text.contains("## Tags"));
    }

    #[tokio::test]
    async fn test_save_insight_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("insight.json");
        save_insight(&sample(), &path).await.unwrap();

        let saved: VideoInsight =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, sample());
    }
}
