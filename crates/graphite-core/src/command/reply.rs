//! Reply text for every command outcome.
//!
//! Markdown is Discord-flavoured (`**bold**`, `` `code` ``, `<@id>` mentions).

use graphite_types::quest::{ClaimedQuest, MAX_POINTS, MIN_POINTS, Quest, QuestId};
use graphite_types::suggestion::QuestSuggestion;

use crate::suggest::format::truncate_chars;

/// Titles longer than this are shortened for display.
pub const DISPLAY_TITLE_MAX_CHARS: usize = 100;

/// Timestamp layout for "Posted on".
const POSTED_ON_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A quest as rendered in a listing, creator already resolved.
#[derive(Debug, Clone)]
pub struct ListedQuest<'a> {
    pub quest: &'a Quest,
    pub creator_name: Option<String>,
}

pub fn mention(user_id: &str) -> String {
    format!("<@{user_id}>")
}

/// Shorten a title for display, marking the cut with an ellipsis.
pub fn display_title(title: &str) -> String {
    if title.chars().count() <= DISPLAY_TITLE_MAX_CHARS {
        return title.to_string();
    }
    let cut = truncate_chars(title, DISPLAY_TITLE_MAX_CHARS - 1).trim_end();
    format!("{cut}…")
}

pub fn quest_created(quest: &Quest) -> String {
    format!(
        "Woof! Quest created by {}, powered by Graphite!\n**{}**\n{}\nReward: {} points\nQuest ID: `{}` (claim it with `/quest claim quest_id:{}`)",
        mention(&quest.creator_id),
        display_title(&quest.title),
        quest.description,
        quest.points,
        quest.id,
        quest.id,
    )
}

pub fn points_out_of_range() -> String {
    format!("Woof! Points must be between {MIN_POINTS} and {MAX_POINTS}. Try again!")
}

pub fn invalid_input(reason: &str) -> String {
    format!("Woof! That didn't work: {reason}. Try again!")
}

pub fn invalid_page() -> String {
    "Woof! Page must be 1 or higher. Try again!".to_string()
}

pub fn no_quests() -> String {
    "Woof! No quests found. Create one with /quest create!".to_string()
}

pub fn page_out_of_range(requested: i64, total_pages: u32) -> String {
    let pages = if total_pages == 1 {
        "There is only 1 page".to_string()
    } else {
        format!("There are only {total_pages} pages")
    };
    format!("Woof! Page {requested} doesn't exist. {pages} of quests, try `/quest list page:{total_pages}`.")
}

/// Render one listing page.
///
/// `first_index` is the 1-based position of the first item across all pages.
pub fn quest_list(
    quests: &[ListedQuest<'_>],
    page: i64,
    total_pages: u32,
    first_index: u64,
) -> String {
    let mut out = format!("Woof! Here are the quests I found (page {page} of {total_pages}):\n\n");

    for (offset, listed) in quests.iter().enumerate() {
        let quest = listed.quest;
        let creator = match &listed.creator_name {
            Some(name) => name.clone(),
            None => format!("User ID {}", quest.creator_id),
        };
        out.push_str(&format!(
            "**Quest {}: {}** (ID `{}`)\nDescription: {}\nCreated by: {}\nReward: {} points\nPosted on: {}\n\n",
            first_index + offset as u64,
            display_title(&quest.title),
            quest.id,
            quest.description,
            creator,
            quest.points,
            quest.created_at.format(POSTED_ON_FORMAT),
        ));
    }

    if page < i64::from(total_pages) {
        let next = page + 1;
        out.push_str(&format!("More quests on the next page: `/quest list page:{next}`"));
    }

    out.trim_end().to_string()
}

pub fn quest_claimed(claimed: &ClaimedQuest) -> String {
    format!(
        "Woof! {} claimed quest `{}`: **{}** for {} points. Good luck!",
        mention(&claimed.claim.user_id),
        claimed.quest.id,
        display_title(&claimed.quest.title),
        claimed.quest.points,
    )
}

pub fn quest_not_found(raw_id: &str) -> String {
    format!("Woof! I couldn't find a quest with ID `{}`. Check /quest list for valid IDs.", raw_id.trim())
}

pub fn self_claim(id: QuestId) -> String {
    format!("Woof! You created quest `{id}`, so you can't claim it. Let someone else take it on!")
}

pub fn duplicate_claim(id: QuestId) -> String {
    format!("Woof! You've already claimed quest `{id}`.")
}

pub fn suggestion(theme: &str, suggestion: &QuestSuggestion) -> String {
    format!(
        "Woof! Here's a quest idea about {}:\n**{}**\n{}\nLike it? Create it with `/quest create`.",
        theme.trim(),
        suggestion.title,
        suggestion.description,
    )
}

pub fn missing_theme() -> String {
    "Woof! Give me a theme to sniff out a quest idea.".to_string()
}

pub fn suggestion_unavailable() -> String {
    "Woof! Sorry, I couldn't come up with a quest idea right now. Please try again later.".to_string()
}

pub fn internal_error() -> String {
    "Woof! Something went wrong on my end. Please try again later.".to_string()
}
