//! `/quest` slash command definition and option parsing.

use std::collections::HashMap;

use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption, ResolvedOption, ResolvedValue};

use graphite_core::command::{Invocation, QuestCommand};

pub const COMMAND_NAME: &str = "quest";

/// Discord rejects messages longer than this.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Option value as delivered by the gateway, platform types stripped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionArg<'a> {
    Str(&'a str),
    Int(i64),
}

/// Build the `/quest` command with its four subcommands.
pub fn quest_command() -> CreateCommand {
    let text = |name: &str, description: &str| {
        CreateCommandOption::new(CommandOptionType::String, name, description).required(true)
    };

    CreateCommand::new(COMMAND_NAME)
        .description("Community quest board")
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "create", "Post a new quest")
                .add_sub_option(text("title", "Quest title"))
                .add_sub_option(text("description", "What needs doing"))
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::Integer,
                        "points",
                        "Reward points (1-1000)",
                    )
                    .required(true),
                ),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "list", "Browse quests, newest first")
                .add_sub_option(CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "page",
                    "Page number (default 1)",
                )),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "claim", "Claim a quest")
                .add_sub_option(text("quest_id", "Quest ID from /quest list")),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "suggest", "Get a quest idea")
                .add_sub_option(text("theme", "What the quest should be about")),
        )
}

/// Flatten the resolved options of a `/quest` interaction into the
/// subcommand name and its arguments.
pub fn flatten_options<'a>(
    options: &'a [ResolvedOption<'a>],
) -> Option<(&'a str, HashMap<&'a str, OptionArg<'a>>)> {
    let sub = options.first()?;
    let ResolvedValue::SubCommand(args) = &sub.value else {
        return None;
    };

    let args = args
        .iter()
        .filter_map(|opt| match &opt.value {
            ResolvedValue::String(s) => Some((opt.name, OptionArg::Str(*s))),
            ResolvedValue::Integer(n) => Some((opt.name, OptionArg::Int(*n))),
            _ => None,
        })
        .collect();

    Some((sub.name, args))
}

/// Turn a subcommand and its arguments into an invocation. `None` when the
/// subcommand is unknown or a required option is missing.
pub fn parse_invocation(
    user_id: &str,
    subcommand: &str,
    args: &HashMap<&str, OptionArg<'_>>,
) -> Option<Invocation> {
    let text = |name: &str| match args.get(name) {
        Some(OptionArg::Str(s)) => Some((*s).to_string()),
        _ => None,
    };
    let int = |name: &str| match args.get(name) {
        Some(OptionArg::Int(n)) => Some(*n),
        _ => None,
    };

    let command = match subcommand {
        "create" => QuestCommand::Create {
            title: text("title")?,
            description: text("description")?,
            points: int("points")?,
        },
        "list" => QuestCommand::List { page: int("page") },
        "claim" => QuestCommand::Claim {
            quest_id: text("quest_id")?,
        },
        "suggest" => QuestCommand::Suggest {
            theme: text("theme")?,
        },
        _ => return None,
    };

    Some(Invocation {
        user_id: user_id.to_string(),
        command,
    })
}

/// Cut a reply to the gateway message limit, ending with an ellipsis.
pub fn truncate_reply(text: &str) -> String {
    if text.chars().count() <= MAX_MESSAGE_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(MAX_MESSAGE_CHARS - 1).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args<'a>(pairs: &[(&'a str, OptionArg<'a>)]) -> HashMap<&'a str, OptionArg<'a>> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_parse_create() {
        let inv = parse_invocation(
            "42",
            "create",
            &args(&[
                ("title", OptionArg::Str("Find the Lost Gem")),
                ("description", OptionArg::Str("Search the cave")),
                ("points", OptionArg::Int(50)),
            ]),
        )
        .unwrap();

        assert_eq!(inv.user_id, "42");
        assert_eq!(
            inv.command,
            QuestCommand::Create {
                title: "Find the Lost Gem".to_string(),
                description: "Search the cave".to_string(),
                points: 50,
            }
        );
    }

    #[test]
    fn test_parse_list_page_is_optional() {
        let inv = parse_invocation("42", "list", &HashMap::new()).unwrap();
        assert_eq!(inv.command, QuestCommand::List { page: None });

        let inv = parse_invocation("42", "list", &args(&[("page", OptionArg::Int(3))])).unwrap();
        assert_eq!(inv.command, QuestCommand::List { page: Some(3) });
    }

    #[test]
    fn test_parse_rejects_missing_or_mistyped_options() {
        assert!(parse_invocation("42", "claim", &HashMap::new()).is_none());
        assert!(
            parse_invocation(
                "42",
                "create",
                &args(&[
                    ("title", OptionArg::Str("t")),
                    ("description", OptionArg::Str("d")),
                    ("points", OptionArg::Str("fifty")),
                ]),
            )
            .is_none()
        );
        assert!(parse_invocation("42", "delete", &HashMap::new()).is_none());
    }

    #[test]
    fn test_truncate_reply() {
        assert_eq!(truncate_reply("Woof!"), "Woof!");

        let exact = "a".repeat(MAX_MESSAGE_CHARS);
        assert_eq!(truncate_reply(&exact), exact);

        let long = "é".repeat(MAX_MESSAGE_CHARS + 10);
        let cut = truncate_reply(&long);
        assert_eq!(cut.chars().count(), MAX_MESSAGE_CHARS);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_unknown_subcommand_shape_is_ignored() {
        assert!(flatten_options(&[]).is_none());
    }
}
