use tavernkeep_domain::{CatalogItem, CatalogKind, PageDirection};

use crate::api::commands::{require, Command, HandlerResult};
use crate::api::error_mapping::{render_catalog_error, render_domain_error};
use crate::api::render::{RenderControl, RenderResult};
use crate::app::App;
use crate::use_cases::{CatalogPage, RegisterInput};

pub(crate) async fn register(app: &App, cmd: &Command, kind: CatalogKind) -> HandlerResult {
    let actor = cmd.actor()?;
    let name = require(cmd.quoted_arg(0), "name")?;

    let hp = match kind {
        CatalogKind::Item => None,
        CatalogKind::Enemy => {
            let raw = require(cmd.trailing_arg(0), "hp")?;
            let hp = raw.parse::<u32>().ok().filter(|hp| *hp > 0).ok_or_else(|| {
                RenderResult::user_error(format!("HP must be a positive whole number, got '{}'", raw))
            })?;
            Some(hp)
        }
    };

    let input = RegisterInput {
        name: name.to_string(),
        description: cmd.quoted_arg(1).unwrap_or_default().to_string(),
        image_ref: cmd.quoted_arg(2).map(str::to_string),
        hp,
    };

    let entry = app
        .use_cases
        .catalog
        .register
        .execute(kind, actor, input)
        .await
        .map_err(|e| render_catalog_error(&e, "register catalog entry"))?;

    Ok(render_entry(&entry).with_field("Catalog", kind.listing_title()))
}

pub(crate) async fn show(app: &App, cmd: &Command, kind: CatalogKind) -> HandlerResult {
    let name = require(cmd.name_arg(), "name")?;

    let entry = app
        .use_cases
        .catalog
        .show
        .execute(kind, &name)
        .await
        .map_err(|e| render_catalog_error(&e, "show catalog entry"))?;

    Ok(render_entry(&entry))
}

pub(crate) async fn delete(app: &App, cmd: &Command, kind: CatalogKind) -> HandlerResult {
    let name = require(cmd.name_arg(), "name")?;

    app.use_cases
        .catalog
        .delete
        .execute(kind, &name)
        .await
        .map_err(|e| render_catalog_error(&e, "delete catalog entry"))?;

    Ok(RenderResult::success(format!("Deleted {} {}", kind, name)))
}

pub(crate) async fn list(app: &App, cmd: &Command, kind: CatalogKind) -> HandlerResult {
    let page = match cmd.trailing_arg(0) {
        None => None,
        Some(raw) => Some(raw.parse::<usize>().map_err(|_| {
            RenderResult::user_error(format!("Page must be a whole number, got '{}'", raw))
        })?),
    };

    let page = app
        .use_cases
        .catalog
        .browse
        .open(kind, page)
        .await
        .map_err(|e| render_catalog_error(&e, "list catalog"))?;

    Ok(render_listing(&page))
}

pub(crate) async fn paginate(app: &App, cmd: &Command) -> HandlerResult {
    let title = require(cmd.quoted_arg(0), "listing title")?;
    let caption = require(cmd.quoted_arg(1), "page caption")?;
    let direction: PageDirection = require(cmd.trailing_arg(0), "direction")?
        .parse()
        .map_err(|e| render_domain_error(&e))?;

    let page = app
        .use_cases
        .catalog
        .browse
        .navigate(title, caption, direction)
        .await
        .map_err(|e| render_catalog_error(&e, "change page"))?;

    Ok(render_listing(&page))
}

fn render_entry(entry: &CatalogItem) -> RenderResult {
    let mut rendered = RenderResult::success(entry.name.as_str());
    if !entry.description.is_empty() {
        rendered = rendered.with_field("Description", entry.description.as_str());
    }
    if let Some(hp) = entry.hp {
        rendered = rendered.with_field("HP", hp.to_string());
    }
    rendered
        .with_field("Registered by", entry.registered_by.as_str())
        .with_image(entry.image_ref.clone())
}

/// A listing page: one field per entry, caption in the footer.
fn render_listing(page: &CatalogPage) -> RenderResult {
    let rendered = page
        .entries
        .iter()
        .fold(RenderResult::success(page.kind.listing_title()), |r, entry| {
            let mut value = if entry.description.is_empty() {
                "-".to_string()
            } else {
                entry.description.to_string()
            };
            if let Some(hp) = entry.hp {
                value = format!("HP {} | {}", hp, value);
            }
            r.with_field(entry.name.as_str(), value)
        });

    rendered
        .with_footer(page.state.caption())
        .with_controls(RenderControl::pagination(page.state.controls()))
}
