//! Prompt template for quest suggestions.

/// Build the generation prompt for `theme`. Same theme, same prompt.
pub fn build_prompt(theme: &str) -> String {
    let theme = theme.split_whitespace().collect::<Vec<_>>().join(" ");
    format!(
        "Here is a fun quest for a Discord community about {theme}. \
         The first sentence is the quest title and the rest explains what to do.\n\nQuest:"
    )
}
