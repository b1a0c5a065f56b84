use poise::serenity_prelude as serenity;

use crate::discord::bot::Context;
use crate::error::AppError;
use crate::tracking::TrackedPlayer;

/// List the players you track
#[poise::command(slash_command, guild_only)]
pub async fn myplayers(ctx: Context<'_>) -> Result<(), AppError> {
    let players = ctx
        .data()
        .enrollment
        .list_owned(ctx.author().id.get())
        .await?;

    if players.is_empty() {
        ctx.say("You are not tracking anyone.\nUse `/track` to add players.")
            .await?;
        return Ok(());
    }

    let embed = roster_embed(&players, ctx.data().max_tracked_players);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

/// Numbered roster. Positions are the ones `/untrack` accepts.
pub(super) fn roster_embed(players: &[TrackedPlayer], max_players: usize) -> serenity::CreateEmbed {
    let mut description = String::new();
    for (i, player) in players.iter().enumerate() {
        let rank = player
            .last_rank
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "Unranked".into());
        description.push_str(&format!(
            "{}. **{}** ({}) · {} · <#{}>\n",
            i + 1,
            player.riot_id,
            player.region,
            rank,
            player.notify_channel
        ));
    }

    serenity::CreateEmbed::new()
        .title(format!("Your Players ({}/{})", players.len(), max_players))
        .description(description)
        .color(0x0099ff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::tests::player;
    use crate::tracking::Rank;

    #[test]
    fn roster_lines_are_numbered_from_one() {
        let mut alice = player("Alice", 1, 42);
        alice.last_rank = Some(Rank::new("GOLD", "II", 34));
        let bob = player("Bob", 1, 43);

        let json = serde_json::to_value(roster_embed(&[alice, bob], 8)).unwrap();
        assert_eq!(json["title"], "Your Players (2/8)");

        let description = json["description"].as_str().unwrap();
        let lines: Vec<&str> = description.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1. **Alice#VN2**"));
        assert!(lines[0].ends_with("Gold II - 34 LP · <#42>"));
        assert!(lines[1].starts_with("2. **Bob#VN2**"));
        assert!(lines[1].ends_with("Unranked · <#43>"));
    }
}
