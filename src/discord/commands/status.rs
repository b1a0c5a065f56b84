use poise::serenity_prelude as serenity;

use crate::db::PlayerStore;
use crate::discord::bot::Context;
use crate::error::AppError;

/// Show the poller and Riot API state
#[poise::command(slash_command)]
pub async fn status(ctx: Context<'_>) -> Result<(), AppError> {
    let data = ctx.data();
    let tracked = data.store.count_players().await?;
    let status = data.poller.status().await;
    let metrics = data.riot_metrics.snapshot();

    let last_cycle = match &status.last_report {
        Some(report) => format!(
            "<t:{}:R> · {} checked, {} failed, {} notification(s)",
            report.finished_at.timestamp(),
            report.checked,
            report.failed,
            report.notifications
        ),
        None => "No cycle yet".to_string(),
    };

    let embed = serenity::CreateEmbed::new()
        .title("Tracker Status")
        .color(0x0099ff)
        .field(
            "Tracked players",
            format!("{tracked}/{}", data.max_tracked_players),
            true,
        )
        .field("Cycles", status.cycles.to_string(), true)
        .field("Last cycle", last_cycle, false)
        .field(
            "Riot API",
            format!(
                "{} requests ({} failed) · {:.2} req/min",
                metrics.total, metrics.failures, metrics.per_minute
            ),
            false,
        );

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
