use poise::serenity_prelude as serenity;
use tracing::{info, instrument};

use crate::discord::bot::Context;
use crate::error::AppError;

/// Check tracked players right now instead of waiting for the next cycle
#[poise::command(slash_command, guild_only)]
#[instrument(skip(ctx), fields(user_id = %ctx.author().id))]
pub async fn forcecheck(
    ctx: Context<'_>,
    #[description = "Riot ID to check (everyone if empty)"] riot_id: Option<String>,
) -> Result<(), AppError> {
    ctx.defer().await?;

    let report = ctx
        .data()
        .poller
        .force_check(riot_id.as_deref())
        .await?;

    let embed = serenity::CreateEmbed::new()
        .title("Check Finished")
        .color(if report.failed == 0 { 0x00ff00 } else { 0xff6600 })
        .field("Checked", report.checked.to_string(), true)
        .field("Failed", report.failed.to_string(), true)
        .field("Notifications", report.notifications.to_string(), true);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    info!(
        checked = report.checked,
        failed = report.failed,
        "Forced check completed"
    );

    Ok(())
}
