use tavernkeep_domain::Character;

use crate::api::commands::{require, Command, HandlerResult};
use crate::api::error_mapping::render_character_error;
use crate::api::render::RenderResult;
use crate::app::App;

pub(crate) async fn create(app: &App, cmd: &Command) -> HandlerResult {
    let actor = cmd.actor()?;
    let name = require(cmd.name_arg(), "character name")?;

    let character = app
        .use_cases
        .characters
        .create
        .execute(actor, &name)
        .await
        .map_err(|e| render_character_error(&e, "create character"))?;

    Ok(RenderResult::success("Character created")
        .with_field("Name", character.name().as_str())
        .with_field("Owner", character.owner_id().as_str()))
}

pub(crate) async fn list(app: &App, cmd: &Command) -> HandlerResult {
    let owner = cmd.owner()?;

    let characters = app
        .use_cases
        .characters
        .list
        .execute(&owner)
        .await
        .map_err(|e| render_character_error(&e, "list characters"))?;

    let title = format!("Characters of {}", owner);
    if characters.is_empty() {
        return Ok(RenderResult::success(title).with_field("Characters", "None"));
    }

    Ok(characters
        .iter()
        .fold(RenderResult::success(title), |rendered, c| {
            rendered.with_field(
                c.name().as_str(),
                format!("{} currency, {} items", c.currency(), c.items().len()),
            )
        }))
}

pub(crate) async fn show(app: &App, cmd: &Command) -> HandlerResult {
    let owner = cmd.owner()?;
    let name = require(cmd.name_arg(), "character name")?;

    let character = app
        .use_cases
        .characters
        .show
        .execute(&owner, &name)
        .await
        .map_err(|e| render_character_error(&e, "show character"))?;

    Ok(sheet(&character))
}

pub(crate) fn sheet(character: &Character) -> RenderResult {
    let items = if character.items().is_empty() {
        "None".to_string()
    } else {
        character
            .items()
            .iter()
            .map(|item| item.name().as_str())
            .collect::<Vec<_>>()
            .join("\n")
    };

    RenderResult::success(character.name().as_str())
        .with_field("Owner", character.owner_id().as_str())
        .with_field("Currency", character.currency().to_string())
        .with_field("Items", items)
}
