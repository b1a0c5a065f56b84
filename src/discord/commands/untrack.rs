use poise::serenity_prelude as serenity;
use tracing::instrument;

use super::myplayers::roster_embed;
use crate::discord::bot::Context;
use crate::error::AppError;
use crate::tracking::{EnrollmentError, UntrackTarget};

/// Stop tracking one of your players
///
/// Without an argument, shows your numbered players to pick from.
#[poise::command(slash_command, guild_only)]
#[instrument(skip(ctx), fields(user_id = %ctx.author().id, player = ?player))]
pub async fn untrack(
    ctx: Context<'_>,
    #[description = "Riot ID, or position in /myplayers"] player: Option<String>,
) -> Result<(), AppError> {
    let Some(player) = player else {
        let players = ctx
            .data()
            .enrollment
            .list_owned(ctx.author().id.get())
            .await?;

        if players.is_empty() {
            ctx.say("You are not tracking anyone.").await?;
            return Ok(());
        }

        let embed = roster_embed(&players, ctx.data().max_tracked_players)
            .footer(serenity::CreateEmbedFooter::new(
                "Run /untrack with a position or Riot ID to remove one",
            ));
        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        return Ok(());
    };

    let target: UntrackTarget = player.parse().map_err(EnrollmentError::from)?;

    let removed = ctx
        .data()
        .enrollment
        .untrack(&target, ctx.author().id.get())
        .await?;

    let Some(removed) = removed else {
        return Err(EnrollmentError::NotTracked(player).into());
    };

    let embed = serenity::CreateEmbed::new()
        .title("Player Untracked")
        .description(format!("Stopped tracking **{}**", removed.riot_id))
        .color(0xff6600);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
