/// Static category catalog used for folder matching and suggestion

/// A topical bucket with the keywords that signal it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

impl Category {
    /// True when any keyword of this category occurs in `text_lower`
    pub fn any_keyword_in(&self, text_lower: &str) -> bool {
        self.keywords.iter().any(|keyword| text_lower.contains(keyword))
    }

    /// Number of distinct keywords that occur in `text_lower`
    pub fn keyword_hits(&self, text_lower: &str) -> usize {
        self.keywords
            .iter()
            .filter(|keyword| text_lower.contains(*keyword))
            .count()
    }

    /// True when `folder_lower` names this category or mentions one of its keywords
    pub fn describes(&self, folder_lower: &str) -> bool {
        folder_lower.contains(self.name) || self.any_keyword_in(folder_lower)
    }
}

/// The catalog, in iteration order. Suggestion ties resolve to the earliest entry.
pub static CATALOG: &[Category] = &[
    Category {
        name: "technology",
        keywords: &[
            "tech", "programming", "code", "software", "development", "ai", "ml", "data",
            "algorithm", "computer", "digital", "api", "web", "app", "system", "database",
            "server", "cloud", "cybersecurity", "blockchain", "iot",
        ],
    },
    Category {
        name: "cooking",
        keywords: &[
            "food", "recipe", "meal", "ingredient", "kitchen", "cook", "bake", "chef", "cuisine",
            "dish", "cooking", "baking", "spice", "flavor", "restaurant", "menu", "dietary",
            "nutritional",
        ],
    },
    Category {
        name: "health",
        keywords: &[
            "fitness", "exercise", "diet", "wellness", "medical", "doctor", "nutrition",
            "workout", "medicine", "health", "gym", "training", "therapy", "mental", "physical",
            "wellbeing", "lifestyle",
        ],
    },
    Category {
        name: "business",
        keywords: &[
            "marketing", "strategy", "startup", "finance", "management", "sales", "entrepreneur",
            "company", "business", "corporate", "enterprise", "leadership", "team", "project",
            "planning", "analysis",
        ],
    },
    Category {
        name: "education",
        keywords: &[
            "learn", "study", "school", "university", "course", "tutorial", "teaching",
            "academic", "education", "learning", "student", "teacher", "curriculum",
            "assignment", "research", "knowledge",
        ],
    },
    Category {
        name: "travel",
        keywords: &[
            "trip", "vacation", "flight", "hotel", "destination", "tourism", "journey",
            "adventure", "travel", "booking", "itinerary", "sightseeing", "culture", "explore",
            "visit", "tour",
        ],
    },
    Category {
        name: "science",
        keywords: &[
            "research", "experiment", "theory", "discovery", "analysis", "hypothesis",
            "scientific", "science", "physics", "chemistry", "biology", "mathematics",
            "engineering", "laboratory", "study",
        ],
    },
    Category {
        name: "art",
        keywords: &[
            "creative", "design", "painting", "drawing", "artistic", "visual", "aesthetic",
            "culture", "art", "artist", "gallery", "exhibition", "craft", "photography",
            "sculpture", "music", "literature",
        ],
    },
];

/// Look up a category by name, ignoring case
pub fn find_category(name: &str) -> Option<&'static Category> {
    let name = name.to_lowercase();
    CATALOG.iter().find(|category| category.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_eight_categories_in_order() {
        let names: Vec<&str> = CATALOG.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec!["technology", "cooking", "health", "business", "education", "travel", "science", "art"]
        );
    }

    #[test]
    fn test_keywords_are_nonempty_lowercase_and_unique() {
        for category in CATALOG {
            assert!(!category.keywords.is_empty(), "{} has no keywords", category.name);

            let unique: HashSet<&str> = category.keywords.iter().copied().collect();
            assert_eq!(unique.len(), category.keywords.len(), "{} repeats a keyword", category.name);

            for keyword in category.keywords {
                assert_eq!(*keyword, keyword.to_lowercase());
                assert!(!keyword.trim().is_empty());
            }
        }
    }

    #[test]
    fn test_keyword_hits_counts_occurrence_not_frequency() {
        let cooking = find_category("cooking").unwrap();
        // "food" twice still counts once; "cook" and "cooking" both hit
        assert_eq!(cooking.keyword_hits("food food cooking"), 3);
    }

    #[test]
    fn test_describes_by_name_or_keyword() {
        let science = find_category("Science").unwrap();
        assert!(science.describes("my science notes"));
        assert!(science.describes("physics homework"));
        assert!(!science.describes("holiday plans"));
    }

    #[test]
    fn test_find_category_unknown() {
        assert!(find_category("gardening").is_none());
    }
}
