use super::lexicon::Lexicon;

/// Recognizes at most one disease name inside a question.
///
/// Matching is a plain substring scan over the lexicon in its priority order,
/// so the longest matching name wins even when a shorter one appears earlier
/// in the question text. Equal-length names resolve by lexicon load order.
/// The scan is O(L·M) per question and is meant for lexicons of a few hundred
/// entries.
#[derive(Debug, Clone, Default)]
pub struct EntityExtractor {
    lexicon: Lexicon,
}

impl EntityExtractor {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// First lexicon entry occurring in the trimmed question.
    pub fn extract(&self, question: &str) -> Option<&str> {
        let question = question.trim();
        self.lexicon.iter().find(|name| question.contains(name))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(names: &[&str]) -> EntityExtractor {
        EntityExtractor::new(Lexicon::from_names(names))
    }

    #[test]
    fn longer_name_beats_contained_substring() {
        let extractor = extractor(&["B", "AB"]);
        assert_eq!(extractor.extract("AB"), Some("AB"));
    }

    #[test]
    fn extracts_compound_name() {
        let extractor = extractor(&["flu", "seasonal flu"]);
        assert_eq!(
            extractor.extract("what are the symptoms of seasonal flu"),
            Some("seasonal flu")
        );
        assert_eq!(extractor.extract("is flu contagious"), Some("flu"));
    }

    #[test]
    fn priority_is_length_not_text_position() {
        // "gout" occurs first in the text, but "diabetes" is longer.
        let extractor = extractor(&["gout", "diabetes"]);
        assert_eq!(
            extractor.extract("gout or diabetes, which is worse?"),
            Some("diabetes")
        );
    }

    #[test]
    fn equal_length_resolves_by_load_order() {
        let extractor = extractor(&["mump", "gout"]);
        assert_eq!(extractor.extract("gout and mump"), Some("mump"));
    }

    #[test]
    fn question_is_trimmed() {
        let extractor = extractor(&["flu"]);
        assert_eq!(extractor.extract("   flu\n"), Some("flu"));
    }

    #[test]
    fn returns_none_without_match() {
        let extractor = extractor(&["flu", "asthma"]);
        assert_eq!(extractor.extract("how do I treat a headache"), None);
        assert_eq!(extractor.extract(""), None);
    }

    #[test]
    fn empty_lexicon_never_matches() {
        let extractor = EntityExtractor::default();
        assert!(extractor.lexicon().is_empty());
        assert_eq!(extractor.extract("seasonal flu symptoms"), None);
    }

    #[test]
    fn none_iff_no_entry_is_substring() {
        let names = ["flu", "seasonal flu", "gout", "感冒"];
        let extractor = extractor(&names);
        let questions = [
            "seasonal flu?",
            "  gout  ",
            "感冒吃什么药",
            "nothing here",
            "FLU in caps",
            "",
        ];

        for q in questions {
            let any = names.iter().any(|n| q.trim().contains(n));
            assert_eq!(extractor.extract(q).is_some(), any, "question: {q:?}");
        }
    }
}
