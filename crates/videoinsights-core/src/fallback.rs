//! Canned results shown when the provider path is abandoned.

use crate::types::{Chapter, VideoInsight};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    Hebrew,
    English,
}

impl Locale {
    /// Coarse locale for a language hint; anything unknown (including "auto") is English
    pub fn from_hint(hint: &str) -> Self {
        let primary = hint.trim().split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("he") || primary.eq_ignore_ascii_case("iw") {
            Locale::Hebrew
        } else {
            Locale::English
        }
    }
}

/// Deterministic placeholder record for the given language hint
pub fn synthesize(language: &str) -> VideoInsight {
    match Locale::from_hint(language) {
        Locale::Hebrew => hebrew(),
        Locale::English => english(),
    }
}

fn chapters(titles: [&str; 5]) -> Vec<Chapter> {
    ["00:00", "02:15", "08:43", "15:27", "23:05"]
        .into_iter()
        .zip(titles)
        .map(|(time, title)| Chapter::new(time, title))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn english() -> VideoInsight {
    VideoInsight {
        title: "Tech Review: The Next Generation of Artificial Intelligence".to_string(),
        summary: "In this video, the host provides a comprehensive overview of developments in the field of artificial intelligence. They begin by explaining the basic concepts and then move on to discuss the latest applications. Towards the end of the video, there is a practical demonstration of an innovative AI tool.".to_string(),
        description: "An in-depth review of current and future artificial intelligence technologies. The video covers the theoretical foundations of machine learning, presents practical applications in various industries, and demonstrates innovative tools that are changing the way we interact with technology.\n\nKey topics:\n- Foundations of artificial intelligence\n- Business applications of machine learning\n- Generative models and their uses\n- Practical demonstration of an advanced AI tool".to_string(),
        tags: strings(&[
            "#ArtificialIntelligence",
            "#Technology",
            "#Innovation",
            "MachineLearning",
            "Tech",
            "TechReview",
        ]),
        chapters: chapters([
            "Introduction",
            "Foundations of AI",
            "Practical Applications in Industry",
            "Practical Demonstration",
            "Summary and Conclusions",
        ]),
    }
}

fn hebrew() -> VideoInsight {
    VideoInsight {
        title: "סקירת טכנולוגיה: הדור הבא של בינה מלאכותית".to_string(),
        summary: "בסרטון זה המנחה מציג סקירה מקיפה של התפתחויות בתחום הבינה המלאכותית. הוא מתחיל בהסבר על המושגים הבסיסיים ואז עובר לדון ביישומים העדכניים ביותר. לקראת סוף הסרטון, ישנה הדגמה מעשית של כלי AI חדשני.".to_string(),
        description: "סקירה מעמיקה של טכנולוגיות בינה מלאכותית עכשוויות ועתידיות. הסרטון מכסה את היסודות התיאורטיים של למידת מכונה, מציג יישומים מעשיים בתעשיות שונות, ומדגים כלים חדשניים שמשנים את האופן בו אנו מתקשרים עם טכנולוגיה.\n\nנושאים עיקריים:\n- יסודות הבינה המלאכותית\n- יישומים עסקיים של למידת מכונה\n- מודלים גנרטיביים ושימושיהם\n- הדגמה מעשית של כלי AI מתקדם".to_string(),
        tags: strings(&[
            "#בינהמלאכותית",
            "#טכנולוגיה",
            "#חדשנות",
            "למידתמכונה",
            "טק",
            "סקירהטכנולוגית",
        ]),
        chapters: chapters([
            "פתיחה והקדמה",
            "יסודות הבינה המלאכותית",
            "יישומים מעשיים בתעשייה",
            "הדגמה מעשית",
            "סיכום ומסקנות",
        ]),
    }
}
