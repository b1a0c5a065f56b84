use poise::serenity_prelude as serenity;
use tracing::{info, instrument};

use crate::discord::bot::Context;
use crate::error::AppError;

/// Change how results of one of your players are announced
#[poise::command(slash_command, guild_only)]
#[instrument(skip(ctx), fields(user_id = %ctx.author().id, riot_id = %riot_id))]
pub async fn settings(
    ctx: Context<'_>,
    #[description = "Riot ID of the player"] riot_id: String,
    #[description = "Mention you when a result is posted"] mention: Option<bool>,
    #[description = "Add the fielded units to result cards"] extra_analysis: Option<bool>,
) -> Result<(), AppError> {
    let settings = ctx
        .data()
        .enrollment
        .update_settings(&riot_id, ctx.author().id.get(), mention, extra_analysis)
        .await?;

    let on_off = |enabled: bool| if enabled { "on" } else { "off" };

    let embed = serenity::CreateEmbed::new()
        .title("Settings Updated")
        .description(format!("Settings for **{riot_id}**"))
        .color(0x00ff00)
        .field("Mention", on_off(settings.mention_on_notify), true)
        .field(
            "Extra analysis",
            on_off(settings.include_extra_analysis),
            true,
        );

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    info!(?settings, "Player settings updated");

    Ok(())
}
