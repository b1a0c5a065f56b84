use async_trait::async_trait;
use chrono::DateTime;
use tracing::{debug, instrument};

use super::client::RiotClient;
use super::types::{LeagueEntryDto, MatchDto, display_id};
use super::{ProfileProvider, ProviderError, Region};
use crate::tracking::{
    Composition, MatchSummary, ProfileSnapshot, Rank, RiotId, TraitSummary, UnitSummary,
};

impl RiotClient {
    /// Resolve the PUUID of an identity, hitting account-v1 only once per key.
    async fn resolve_account(
        &self,
        riot_id: &RiotId,
        region: Region,
    ) -> Result<(String, RiotId), ProviderError> {
        let key = riot_id.key();
        if let Some(cached) = self.accounts.read().await.get(&key) {
            return Ok(cached.clone());
        }

        let account = self
            .get_account_by_riot_id(region, &riot_id.game_name, &riot_id.tag_line)
            .await?;

        let canonical = RiotId::new(
            account
                .game_name
                .unwrap_or_else(|| riot_id.game_name.clone()),
            account.tag_line.unwrap_or_else(|| riot_id.tag_line.clone()),
        );
        debug!(riot_id = %canonical, "🛰️ resolved account");

        let resolved = (account.puuid, canonical);
        self.accounts.write().await.insert(key, resolved.clone());
        Ok(resolved)
    }
}

#[async_trait]
impl ProfileProvider for RiotClient {
    #[instrument(skip(self), fields(riot_id = %riot_id, region = %region))]
    async fn fetch_profile(
        &self,
        riot_id: &RiotId,
        region: Region,
    ) -> Result<ProfileSnapshot, ProviderError> {
        let (puuid, canonical) = self.resolve_account(riot_id, region).await?;

        let entries = self.get_tft_league_entries(region, &puuid).await?;
        let rank = entries
            .iter()
            .find(|entry| entry.is_ranked_tft())
            .and_then(rank_of);

        let latest_match = match self.get_match_ids(region, &puuid, 1).await?.first() {
            Some(match_id) => {
                let match_data = self.get_match(region, match_id).await?;
                Some(summarize(&match_data, &puuid)?)
            }
            None => None,
        };

        Ok(ProfileSnapshot {
            riot_id: canonical,
            rank,
            latest_match,
        })
    }
}

fn rank_of(entry: &LeagueEntryDto) -> Option<Rank> {
    let tier = entry.tier.clone()?;
    Some(Rank::new(
        tier,
        entry.rank.clone().unwrap_or_default(),
        entry.league_points,
    ))
}

fn summarize(match_data: &MatchDto, puuid: &str) -> Result<MatchSummary, ProviderError> {
    let participant = match_data
        .info
        .participants
        .iter()
        .find(|p| p.puuid == puuid)
        .ok_or_else(|| ProviderError::MissingParticipant {
            match_id: match_data.metadata.match_id.clone(),
        })?;

    let mut traits: Vec<TraitSummary> = participant
        .traits
        .iter()
        .filter(|t| t.tier_current > 0)
        .map(|t| TraitSummary {
            name: display_id(&t.name).to_string(),
            num_units: t.num_units,
        })
        .collect();
    traits.sort_by(|a, b| b.num_units.cmp(&a.num_units));

    let mut units: Vec<UnitSummary> = participant
        .units
        .iter()
        .map(|u| UnitSummary {
            name: display_id(&u.character_id).to_string(),
            stars: u.tier,
        })
        .collect();
    units.sort_by(|a, b| b.stars.cmp(&a.stars));

    Ok(MatchSummary {
        match_id: match_data.metadata.match_id.clone(),
        placement: participant.placement,
        finished_at: DateTime::from_timestamp_millis(match_data.info.game_datetime)
            .unwrap_or_default(),
        composition: Composition {
            level: participant.level,
            traits,
            units,
        },
    })
}
