use crate::riot::client::RiotClient;
use crate::riot::region::Region;
use crate::riot::types::LeagueEntryDto;
use crate::riot::ProviderError;

impl RiotClient {
    /// Get TFT league entries (ranked info) for a player by PUUID
    /// Uses platform routing (vn2, euw1, kr, etc.)
    pub async fn get_tft_league_entries(
        &self,
        region: Region,
        puuid: &str,
    ) -> Result<Vec<LeagueEntryDto>, ProviderError> {
        let url = format!(
            "{}/tft/league/v1/by-puuid/{}",
            self.host(region.platform()),
            puuid
        );

        self.get(&url).await
    }
}
