//! Enums that carry a display value next to their constant name.

/// An enum with a stable constant name and a human-readable value.
///
/// The name is the `SCREAMING_SNAKE_CASE` identifier; the
/// value is what gets rendered and serialized.
pub trait LabeledEnum: Copy + 'static {
    /// Every variant, in declaration order.
    fn variants() -> &'static [Self];

    /// Constant name, e.g. `IN_PROGRESS`.
    fn name(self) -> &'static str;

    /// Display value, e.g. `In Progress`.
    fn value(self) -> &'static str;

    /// Position of the variant in [`LabeledEnum::variants`].
    fn ordinal(self) -> usize
    where
        Self: PartialEq,
    {
        Self::variants()
            .iter()
            .position(|variant| *variant == self)
            .unwrap_or_default()
    }

    /// Constant names of every variant.
    fn names() -> Vec<&'static str> {
        Self::variants().iter().map(|variant| variant.name()).collect()
    }

    /// Look a variant up by exact constant name.
    fn from_name(name: &str) -> Option<Self> {
        Self::variants()
            .iter()
            .copied()
            .find(|variant| variant.name() == name)
    }

    /// Case-insensitive lookup by constant name or display value.
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::variants().iter().copied().find(|variant| {
            variant.name().eq_ignore_ascii_case(text) || variant.value().eq_ignore_ascii_case(text)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Stage {
        InProgress,
        Completed,
    }

    impl LabeledEnum for Stage {
        fn variants() -> &'static [Self] {
            &[Self::InProgress, Self::Completed]
        }

        fn name(self) -> &'static str {
            match self {
                Self::InProgress => "IN_PROGRESS",
                Self::Completed => "COMPLETED",
            }
        }

        fn value(self) -> &'static str {
            match self {
                Self::InProgress => "In Progress",
                Self::Completed => "Completed",
            }
        }
    }

    #[test]
    fn lookups_by_name_and_value() {
        assert_eq!(Stage::from_name("IN_PROGRESS"), Some(Stage::InProgress));
        assert_eq!(Stage::from_name("in_progress"), None);
        assert_eq!(Stage::parse(" in progress "), Some(Stage::InProgress));
        assert_eq!(Stage::parse("completed"), Some(Stage::Completed));
        assert_eq!(Stage::parse("done"), None);
    }

    #[test]
    fn ordinals_and_names_follow_declaration_order() {
        assert_eq!(Stage::Completed.ordinal(), 1);
        assert_eq!(Stage::names(), vec!["IN_PROGRESS", "COMPLETED"]);
    }
}
