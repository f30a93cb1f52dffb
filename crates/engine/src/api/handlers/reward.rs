use crate::api::commands::{require, Command, HandlerResult};
use crate::api::error_mapping::render_reward_error;
use crate::api::render::RenderResult;
use crate::app::App;
use crate::use_cases::DispenseOutcome;

/// Every answer to a claim disables the control: it was consumed either way.
pub(crate) async fn claim(app: &App, cmd: &Command) -> HandlerResult {
    let actor = cmd.actor()?;
    let control_id = require(cmd.quoted_arg(0), "reward id")?;
    let item_name = require(cmd.quoted_arg(1), "item name")?;

    let outcome = app
        .use_cases
        .claim_reward
        .execute(control_id, &actor, item_name)
        .await
        .map_err(|e| render_reward_error(&e, "claim reward").disable_further_interaction())?;

    let rendered = match outcome {
        DispenseOutcome::Assigned {
            character_name,
            instance,
        } => RenderResult::success(format!("{} received {}", character_name, instance.name()))
            .with_field("Character", character_name)
            .with_field("Item", instance.name().as_str())
            .with_image(instance.template.image_ref.clone()),
        DispenseOutcome::AmbiguousOwnership { candidates } => RenderResult::ambiguous(format!(
            "You have several characters. Ask the game master to hand {} to one of them.",
            item_name
        ))
        .with_field("Characters", candidates.join("\n")),
        DispenseOutcome::NoCharacters => RenderResult::user_error(format!(
            "You have no character to receive {}",
            item_name
        )),
    };

    Ok(rendered.disable_further_interaction())
}
