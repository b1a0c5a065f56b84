use poise::serenity_prelude as serenity;
use tracing::{info, instrument};

use crate::discord::bot::Context;
use crate::error::AppError;
use crate::riot::Region;

/// Look up a TFT player and open a confirmation to track them
#[poise::command(slash_command, guild_only)]
#[instrument(
    skip(ctx),
    fields(user_id = %ctx.author().id, riot_id = %riot_id)
)]
pub async fn track(
    ctx: Context<'_>,
    #[description = "Riot ID, e.g. Name#TAG"] riot_id: String,
    #[description = "Server region"] region: Option<Region>,
) -> Result<(), AppError> {
    let region = region.unwrap_or(ctx.data().default_region);

    // Defer response since API calls might take a moment
    ctx.defer().await?;

    let session = ctx
        .data()
        .enrollment
        .lookup(&riot_id, region, ctx.author().id.get())
        .await?;

    let snapshot = &session.snapshot;
    let deadline = session.expires_at(ctx.data().enrollment.session_ttl());

    let rank = snapshot
        .rank
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "Unranked".into());
    let latest = snapshot
        .latest_match
        .as_ref()
        .map(|m| format!("#{} ({})", m.placement, m.match_id))
        .unwrap_or_else(|| "No recent game".into());

    let embed = serenity::CreateEmbed::new()
        .title("Confirm Tracking")
        .description(format!(
            "Found **{}** on **{}**.\nRun `/confirm {}` before <t:{}:t> to start tracking, or `/cancel` to drop it.",
            snapshot.riot_id,
            region.display_name(),
            snapshot.riot_id,
            deadline.timestamp()
        ))
        .color(0x0099ff)
        .field("Rank", rank, true)
        .field("Latest game", latest, true);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    info!(key = %session.key, "Pending confirmation sent");

    Ok(())
}

/// Confirm a pending lookup; notifications go to this channel
#[poise::command(slash_command, guild_only)]
#[instrument(
    skip(ctx),
    fields(user_id = %ctx.author().id, channel_id = %ctx.channel_id(), riot_id = %riot_id)
)]
pub async fn confirm(
    ctx: Context<'_>,
    #[description = "Riot ID used with /track"] riot_id: String,
) -> Result<(), AppError> {
    let player = ctx
        .data()
        .enrollment
        .confirm(&riot_id, ctx.author().id.get(), ctx.channel_id().get())
        .await?;

    let embed = serenity::CreateEmbed::new()
        .title("Player Tracked")
        .description(format!(
            "Now tracking **{}** on **{}**. Results will be posted in this channel.",
            player.riot_id,
            player.region.display_name()
        ))
        .color(0x00ff00);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

/// Drop a pending confirmation, or all of yours
#[poise::command(slash_command, guild_only)]
#[instrument(skip(ctx), fields(user_id = %ctx.author().id))]
pub async fn cancel(
    ctx: Context<'_>,
    #[description = "Riot ID to cancel (all pending ones if empty)"] riot_id: Option<String>,
) -> Result<(), AppError> {
    let requester = ctx.author().id.get();
    let enrollment = &ctx.data().enrollment;

    let message = match riot_id {
        Some(riot_id) => {
            if enrollment.cancel(&riot_id, requester).await? {
                format!("Cancelled the pending confirmation for **{riot_id}**.")
            } else {
                format!("You have no pending confirmation for **{riot_id}**.")
            }
        }
        None => match enrollment.cancel_all(requester).await? {
            0 => "You have no pending confirmation.".to_string(),
            n => format!("Cancelled {n} pending confirmation(s)."),
        },
    };

    ctx.say(message).await?;

    Ok(())
}
