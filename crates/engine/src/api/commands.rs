//! Inbound commands and dispatch.
//!
//! The chat collaborator parses user input and hands over an already split
//! [`Command`]. Every command yields exactly one [`RenderResult`]; no failure is
//! dropped.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tavernkeep_domain::{CatalogKind, OwnerId};

use super::handlers;
use super::render::RenderResult;
use crate::app::App;

/// What a command asks for, with its argument layout.
///
/// `quoted[n]` is `Command::quoted_args[n]`, `trailing[n]` is
/// `Command::raw_trailing_args[n]`. "Owner" is the mentioned user when present,
/// otherwise the actor. A "name" argument is `quoted[0]`, or all trailing
/// arguments joined by spaces when nothing was quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// name. Always created for the actor.
    CreateCharacter,
    /// Lists the owner's characters.
    ListCharacters,
    /// name. Shows the owner's character sheet.
    ShowCharacter,
    /// quoted[0] name, quoted[1] description (optional), quoted[2] image (optional)
    RegisterItem,
    /// As `RegisterItem`, plus trailing[0] hp (positive integer)
    RegisterEnemy,
    /// name
    ShowItem,
    /// name
    ShowEnemy,
    /// name
    DeleteItem,
    /// name
    DeleteEnemy,
    /// trailing[0] one-based page (optional)
    ListItems,
    /// trailing[0] one-based page (optional)
    ListEnemies,
    /// quoted[0] listing title, quoted[1] page caption, trailing[0] `next` or `previous`
    Paginate,
    /// quoted[0] character name, quoted[1] catalog item name. Gives to the owner's character.
    GiveItem,
    /// quoted[0] character name, quoted[1] item name
    TakeItem,
    /// quoted[0] character name, trailing[0] amount
    AddCurrency,
    /// quoted[0] character name, trailing[0] amount or `all`
    RemoveCurrency,
    /// quoted[0] reward control id, quoted[1] catalog item name. Claimed by the actor.
    ClaimReward,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Opaque correlation id echoed on the result.
    #[serde(default)]
    pub request_id: Option<String>,
    pub kind: CommandKind,
    pub actor_id: String,
    #[serde(default)]
    pub mentioned_user_id: Option<String>,
    #[serde(default)]
    pub quoted_args: Vec<String>,
    #[serde(default)]
    pub raw_trailing_args: Vec<String>,
}

/// Result of a handler: the error side is already rendered.
pub(crate) type HandlerResult = Result<RenderResult, RenderResult>;

impl Command {
    pub fn new(kind: CommandKind, actor_id: impl Into<String>) -> Self {
        Self {
            request_id: None,
            kind,
            actor_id: actor_id.into(),
            mentioned_user_id: None,
            quoted_args: Vec::new(),
            raw_trailing_args: Vec::new(),
        }
    }

    pub fn mentioning(mut self, user_id: impl Into<String>) -> Self {
        self.mentioned_user_id = Some(user_id.into());
        self
    }

    pub fn quoted(mut self, arg: impl Into<String>) -> Self {
        self.quoted_args.push(arg.into());
        self
    }

    pub fn trailing(mut self, arg: impl Into<String>) -> Self {
        self.raw_trailing_args.push(arg.into());
        self
    }

    /// Non-blank `quoted[index]`, trimmed.
    pub fn quoted_arg(&self, index: usize) -> Option<&str> {
        non_blank(self.quoted_args.get(index))
    }

    /// Non-blank `trailing[index]`, trimmed.
    pub fn trailing_arg(&self, index: usize) -> Option<&str> {
        non_blank(self.raw_trailing_args.get(index))
    }

    /// `quoted[0]`, or every trailing argument joined by spaces.
    pub fn name_arg(&self) -> Option<String> {
        if let Some(name) = self.quoted_arg(0) {
            return Some(name.to_string());
        }
        let joined = self.raw_trailing_args.join(" ");
        let joined = joined.trim();
        (!joined.is_empty()).then(|| joined.to_string())
    }

    pub(crate) fn actor(&self) -> Result<OwnerId, RenderResult> {
        OwnerId::new(self.actor_id.clone())
            .map_err(|e| RenderResult::user_error(format!("Invalid actor: {}", e)))
    }

    /// The mentioned user, falling back to the actor.
    pub(crate) fn owner(&self) -> Result<OwnerId, RenderResult> {
        match &self.mentioned_user_id {
            Some(id) if !id.trim().is_empty() => OwnerId::new(id.clone())
                .map_err(|e| RenderResult::user_error(format!("Invalid mentioned user: {}", e))),
            _ => self.actor(),
        }
    }
}

fn non_blank(arg: Option<&String>) -> Option<&str> {
    arg.map(|s| s.trim()).filter(|s| !s.is_empty())
}

pub(crate) fn require<T>(value: Option<T>, what: &str) -> Result<T, RenderResult> {
    value.ok_or_else(|| RenderResult::user_error(format!("Missing {}", what)))
}

/// Routes commands to use cases.
#[derive(Clone)]
pub struct CommandHandler {
    app: Arc<App>,
}

impl CommandHandler {
    pub fn new(app: Arc<App>) -> Self {
        Self { app }
    }

    pub async fn handle(&self, command: Command) -> RenderResult {
        let app = self.app.as_ref();
        let cmd = &command;

        tracing::debug!(
            kind = ?cmd.kind,
            actor_id = %cmd.actor_id,
            request_id = ?cmd.request_id,
            "Handling command"
        );

        let result = match cmd.kind {
            CommandKind::CreateCharacter => handlers::character::create(app, cmd).await,
            CommandKind::ListCharacters => handlers::character::list(app, cmd).await,
            CommandKind::ShowCharacter => handlers::character::show(app, cmd).await,
            CommandKind::RegisterItem => handlers::catalog::register(app, cmd, CatalogKind::Item).await,
            CommandKind::RegisterEnemy => {
                handlers::catalog::register(app, cmd, CatalogKind::Enemy).await
            }
            CommandKind::ShowItem => handlers::catalog::show(app, cmd, CatalogKind::Item).await,
            CommandKind::ShowEnemy => handlers::catalog::show(app, cmd, CatalogKind::Enemy).await,
            CommandKind::DeleteItem => handlers::catalog::delete(app, cmd, CatalogKind::Item).await,
            CommandKind::DeleteEnemy => handlers::catalog::delete(app, cmd, CatalogKind::Enemy).await,
            CommandKind::ListItems => handlers::catalog::list(app, cmd, CatalogKind::Item).await,
            CommandKind::ListEnemies => handlers::catalog::list(app, cmd, CatalogKind::Enemy).await,
            CommandKind::Paginate => handlers::catalog::paginate(app, cmd).await,
            CommandKind::GiveItem => handlers::inventory::give(app, cmd).await,
            CommandKind::TakeItem => handlers::inventory::take(app, cmd).await,
            CommandKind::AddCurrency => handlers::inventory::add_currency(app, cmd).await,
            CommandKind::RemoveCurrency => handlers::inventory::remove_currency(app, cmd).await,
            CommandKind::ClaimReward => handlers::reward::claim(app, cmd).await,
        };

        let rendered = match result {
            Ok(rendered) | Err(rendered) => rendered,
        };
        rendered.with_request_id(command.request_id)
    }

    /// Parses one JSON command and handles it. Malformed input is a user error.
    ///
    /// A `request_id` string is echoed even when the rest of the command does
    /// not deserialize.
    pub async fn handle_json(&self, line: &str) -> RenderResult {
        let value: serde_json::Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => return malformed(&e, None),
        };
        let request_id = value
            .get("request_id")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);

        match serde_json::from_value::<Command>(value) {
            Ok(command) => self.handle(command).await,
            Err(e) => malformed(&e, request_id),
        }
    }
}

fn malformed(error: &serde_json::Error, request_id: Option<String>) -> RenderResult {
    tracing::debug!(error = %error, request_id = ?request_id, "Malformed command");
    RenderResult::user_error(format!("Malformed command: {}", error)).with_request_id(request_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::render::RenderKind;

    #[test]
    fn deserializes_with_defaults() {
        let cmd: Command =
            serde_json::from_str(r#"{"kind":"list_items","actor_id":"42"}"#).unwrap();
        assert_eq!(cmd.kind, CommandKind::ListItems);
        assert!(cmd.quoted_args.is_empty());
        assert_eq!(cmd.mentioned_user_id, None);
    }

    #[test]
    fn name_arg_prefers_quoted() {
        let cmd = Command::new(CommandKind::ShowItem, "1")
            .quoted("Master Sword")
            .trailing("ignored");
        assert_eq!(cmd.name_arg().as_deref(), Some("Master Sword"));

        let cmd = Command::new(CommandKind::ShowItem, "1")
            .trailing("iron")
            .trailing("sword");
        assert_eq!(cmd.name_arg().as_deref(), Some("iron sword"));

        let cmd = Command::new(CommandKind::ShowItem, "1").quoted("   ");
        assert_eq!(cmd.name_arg(), None);
    }

    #[test]
    fn owner_falls_back_to_actor() {
        let cmd = Command::new(CommandKind::ListCharacters, "1");
        assert_eq!(cmd.owner().unwrap().as_str(), "1");

        let cmd = cmd.mentioning("2");
        assert_eq!(cmd.owner().unwrap().as_str(), "2");
    }

    #[test]
    fn invalid_actor_is_user_error() {
        let cmd = Command::new(CommandKind::ListCharacters, "bad:id");
        assert_eq!(cmd.actor().unwrap_err().kind, RenderKind::UserError);
    }
}
