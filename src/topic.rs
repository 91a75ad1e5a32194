/// Fixed set of quick-chip topics used to annotate a query before sending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Uses,
    SideEffects,
    Interactions,
    Precautions,
    HowToTake,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Uses => "uses",
            Topic::SideEffects => "side_effects",
            Topic::Interactions => "interactions",
            Topic::Precautions => "precautions",
            Topic::HowToTake => "how_to_take",
        }
    }

    /// All topics, in chip-row order.
    pub fn all() -> Vec<Topic> {
        vec![
            Topic::Uses,
            Topic::SideEffects,
            Topic::Interactions,
            Topic::Precautions,
            Topic::HowToTake,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Topic::Uses => "Uses",
            Topic::SideEffects => "Side Effects",
            Topic::Interactions => "Interactions",
            Topic::Precautions => "Precautions",
            Topic::HowToTake => "How to Take",
        }
    }

    /// Annotate `text` with this topic, e.g. "aspirin" with `HowToTake`
    /// becomes "aspirin (how to take)".
    ///
    /// Purely textual; callers are expected to check that `text` is
    /// non-empty and to apply this at most once per submission.
    pub fn augment(&self, text: &str) -> String {
        format!("{} ({})", text, self.as_str().replace('_', " "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_augment_appends_topic_label() {
        let augmented = Topic::HowToTake.augment("aspirin dosage");
        assert_eq!(augmented, "aspirin dosage (how to take)");
    }

    #[test]
    fn test_augment_replaces_every_underscore() {
        assert_eq!(Topic::SideEffects.augment("ibuprofen"), "ibuprofen (side effects)");
        assert_eq!(Topic::Uses.augment("metformin"), "metformin (uses)");
    }

    #[test]
    fn test_all_in_chip_order() {
        let tags: Vec<&str> = Topic::all().iter().map(|t| t.as_str()).collect();
        assert_eq!(
            tags,
            vec!["uses", "side_effects", "interactions", "precautions", "how_to_take"]
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Topic::Uses.display_name(), "Uses");
        assert_eq!(Topic::SideEffects.display_name(), "Side Effects");
        assert_eq!(Topic::Interactions.display_name(), "Interactions");
        assert_eq!(Topic::Precautions.display_name(), "Precautions");
        assert_eq!(Topic::HowToTake.display_name(), "How to Take");
    }
}
