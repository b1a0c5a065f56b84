use crate::riot::client::RiotClient;
use crate::riot::region::Region;
use crate::riot::types::MatchDto;
use crate::riot::ProviderError;

impl RiotClient {
    /// Get the most recent TFT match IDs of a player, newest first
    /// Uses regional routing (americas, europe, asia, sea)
    pub async fn get_match_ids(
        &self,
        region: Region,
        puuid: &str,
        count: u32,
    ) -> Result<Vec<String>, ProviderError> {
        let url = format!(
            "{}/tft/match/v1/matches/by-puuid/{}/ids?start=0&count={}",
            self.host(region.match_cluster()),
            puuid,
            count
        );

        self.get(&url).await
    }

    /// Get TFT match details by match ID
    pub async fn get_match(&self, region: Region, match_id: &str) -> Result<MatchDto, ProviderError> {
        let url = format!(
            "{}/tft/match/v1/matches/{}",
            self.host(region.match_cluster()),
            match_id
        );

        self.get(&url).await
    }
}
