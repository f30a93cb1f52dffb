use tavernkeep_domain::{Amount, CharacterKey, CharacterName, Withdrawal};

use crate::api::commands::{require, Command, HandlerResult};
use crate::api::error_mapping::{render_domain_error, render_inventory_error};
use crate::api::render::RenderResult;
use crate::app::App;

/// Key of the owner's character named in `quoted[0]`.
fn target_character(cmd: &Command) -> Result<(CharacterKey, CharacterName), RenderResult> {
    let owner = cmd.owner()?;
    let name = require(cmd.quoted_arg(0), "character name")?;
    let name = CharacterName::new(name).map_err(|e| render_domain_error(&e))?;
    Ok((CharacterKey::new(&owner, &name), name))
}

pub(crate) async fn give(app: &App, cmd: &Command) -> HandlerResult {
    let (key, name) = target_character(cmd)?;
    let item_name = require(cmd.quoted_arg(1), "item name")?;

    let instance = app
        .use_cases
        .inventory
        .give
        .execute(&key, item_name)
        .await
        .map_err(|e| render_inventory_error(&e, "give item"))?;

    Ok(RenderResult::success(format!("{} received {}", name, instance.name()))
        .with_field("Character", name.as_str())
        .with_field("Item", instance.name().as_str())
        .with_image(instance.template.image_ref.clone()))
}

pub(crate) async fn take(app: &App, cmd: &Command) -> HandlerResult {
    let (key, name) = target_character(cmd)?;
    let item_name = require(cmd.quoted_arg(1), "item name")?;

    let removed = app
        .use_cases
        .inventory
        .remove
        .execute(&key, item_name)
        .await
        .map_err(|e| render_inventory_error(&e, "take item"))?;

    Ok(RenderResult::success(format!("{} lost {}", name, removed.name()))
        .with_field("Character", name.as_str())
        .with_field("Item", removed.name().as_str()))
}

pub(crate) async fn add_currency(app: &App, cmd: &Command) -> HandlerResult {
    let (key, name) = target_character(cmd)?;
    let amount: Amount = require(cmd.trailing_arg(0), "amount")?
        .parse()
        .map_err(|e| render_domain_error(&e))?;

    let balance = app
        .use_cases
        .inventory
        .add_currency
        .execute(&key, amount)
        .await
        .map_err(|e| render_inventory_error(&e, "add currency"))?;

    Ok(RenderResult::success(format!("Added {} to {}", amount, name))
        .with_field("Added", amount.to_string())
        .with_field("Balance", balance.to_string()))
}

pub(crate) async fn remove_currency(app: &App, cmd: &Command) -> HandlerResult {
    let (key, name) = target_character(cmd)?;
    let withdrawal: Withdrawal = require(cmd.trailing_arg(0), "amount")?
        .parse()
        .map_err(|e| render_domain_error(&e))?;

    let change = app
        .use_cases
        .inventory
        .remove_currency
        .execute(&key, withdrawal)
        .await
        .map_err(|e| render_inventory_error(&e, "remove currency"))?;

    Ok(RenderResult::success(format!("Removed {} from {}", change.removed, name))
        .with_field("Previous", change.previous.to_string())
        .with_field("Removed", change.removed.to_string())
        .with_field("Balance", change.current.to_string()))
}
