use poise::serenity_prelude::{
    CreateAllowedMentions, CreateEmbed, CreateEmbedFooter, CreateMessage, UserId,
};

use super::{MatchEntry, Notification, RankMove};
use crate::tracking::{MatchSummary, Rank, TrackedPlayer};

const GOLD: u32 = 0xf1c40f;
const GREEN: u32 = 0x2ecc71;
const RED: u32 = 0xe74c3c;
const BLUE: u32 = 0x3498db;

const MAX_TRAITS: usize = 5;

/// Build the full Discord message for a notification, mentions included.
pub fn render(notification: &Notification) -> CreateMessage {
    let (embed, players): (CreateEmbed, Vec<&TrackedPlayer>) = match notification {
        Notification::Match { entries, .. } => {
            let players = entries.iter().map(|e| &e.player).collect();
            match entries.as_slice() {
                [single] => (single_match_card(single), players),
                _ => (group_match_card(entries), players),
            }
        }
        Notification::Rank {
            player,
            from,
            to,
            movement,
        } => (rank_card(player, from, to, *movement), vec![player]),
    };

    let mentioned = mentions(&players);
    let mut message = CreateMessage::new().embed(embed).allowed_mentions(
        CreateAllowedMentions::new().users(mentioned.iter().copied().map(UserId::new)),
    );

    if !mentioned.is_empty() {
        let content = mentioned
            .iter()
            .map(|id| format!("<@{id}>"))
            .collect::<Vec<_>>()
            .join(" ");
        message = message.content(content);
    }

    message
}

/// Owners to ping, each once, in first-seen order.
fn mentions(players: &[&TrackedPlayer]) -> Vec<u64> {
    let mut owners = Vec::new();
    for player in players {
        if player.settings.mention_on_notify && !owners.contains(&player.owner_id) {
            owners.push(player.owner_id);
        }
    }
    owners
}

fn single_match_card(entry: &MatchEntry) -> CreateEmbed {
    let MatchEntry { player, summary } = entry;

    let mut fields = vec![
        ("Placement", ordinal(summary.placement), true),
        ("Level", summary.composition.level.to_string(), true),
    ];
    if let Some(rank) = &player.last_rank {
        fields.push(("Rank", rank.to_string(), true));
    }
    if let Some(traits) = traits_line(summary) {
        fields.push(("Composition", traits, false));
    }
    if player.settings.include_extra_analysis {
        if let Some(units) = units_line(summary) {
            fields.push(("Units", units, false));
        }
    }

    CreateEmbed::new()
        .title(format!(
            "{} {} finished {}",
            placement_icon(summary.placement),
            player.riot_id,
            ordinal(summary.placement)
        ))
        .description(format!(
            "**{}** just finished a game on {}.",
            player.riot_id,
            player.region.display_name()
        ))
        .color(placement_colour(summary.placement))
        .fields(fields)
        .footer(footer(summary))
}

fn group_match_card(entries: &[MatchEntry]) -> CreateEmbed {
    let mut sorted: Vec<&MatchEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.summary.placement);

    let best = sorted.first().map(|e| e.summary.placement).unwrap_or(8);

    let fields = sorted.iter().map(|entry| {
        let mut value = ordinal(entry.summary.placement);
        if let Some(rank) = &entry.player.last_rank {
            value.push_str(&format!(" · {rank}"));
        }
        if let Some(traits) = traits_line(&entry.summary) {
            value.push('\n');
            value.push_str(&traits);
        }
        (
            format!(
                "{} {}",
                placement_icon(entry.summary.placement),
                entry.player.riot_id
            ),
            value,
            false,
        )
    });

    let mut embed = CreateEmbed::new()
        .title(format!("🎮 {} tracked players in the same lobby", entries.len()))
        .color(placement_colour(best))
        .fields(fields);

    if let Some(first) = sorted.first() {
        embed = embed.footer(footer(&first.summary));
    }
    embed
}

fn rank_card(player: &TrackedPlayer, from: &Rank, to: &Rank, movement: RankMove) -> CreateEmbed {
    let (title, colour) = match movement {
        RankMove::Up => (format!("📈 {} ranked up", player.riot_id), GREEN),
        RankMove::Down => (format!("📉 {} ranked down", player.riot_id), RED),
    };

    CreateEmbed::new()
        .title(title)
        .description(format!("{from} → **{to}**"))
        .color(colour)
        .footer(CreateEmbedFooter::new(player.region.display_name()))
}

fn footer(summary: &MatchSummary) -> CreateEmbedFooter {
    CreateEmbedFooter::new(format!(
        "{} · {}",
        summary.match_id,
        summary.finished_at.format("%Y-%m-%d %H:%M UTC")
    ))
}

fn traits_line(summary: &MatchSummary) -> Option<String> {
    let traits = &summary.composition.traits;
    if traits.is_empty() {
        return None;
    }

    Some(
        traits
            .iter()
            .take(MAX_TRAITS)
            .map(|t| format!("{} {}", t.num_units, t.name))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

fn units_line(summary: &MatchSummary) -> Option<String> {
    let units = &summary.composition.units;
    if units.is_empty() {
        return None;
    }

    Some(
        units
            .iter()
            .map(|u| format!("{} {}", u.name, "★".repeat(u.stars as usize)))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

fn placement_colour(placement: u8) -> u32 {
    match placement {
        1 => GOLD,
        2..=4 => GREEN,
        5..=8 => RED,
        _ => BLUE,
    }
}

fn placement_icon(placement: u8) -> &'static str {
    match placement {
        1 => "👑",
        2..=4 => "🟢",
        _ => "🔴",
    }
}

fn ordinal(placement: u8) -> String {
    let suffix = match placement {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{placement}{suffix}")
}
