use garde::Validate as _;
use roster_dal::{
    error::Result,
    filter::PlayerFilter,
    player::{CreatePlayer, NewPlayer, Player, PlayerRepository, UpdatePlayer},
    ListingParams, Pool,
};
use tracing::debug;

use crate::service_from_request;

service_from_request!(PlayerService);

/// Validation and merge rules on top of the player table.
///
/// Holds no state of its own, a new instance is created for every request.
pub struct PlayerService {
    repository: PlayerRepository,
}

impl PlayerService {
    pub fn new(pool: Pool) -> Self {
        Self {
            repository: PlayerRepository::new(pool),
        }
    }

    pub async fn list(&self, filter: &PlayerFilter, params: ListingParams) -> Result<Vec<Player>> {
        debug!("Listing players with {filter:?}, {params:?}");
        self.repository.list(filter, params).await
    }

    pub async fn count(&self, filter: &PlayerFilter) -> Result<u64> {
        self.repository.count(filter).await
    }

    pub async fn get(&self, id: i64) -> Result<Player> {
        self.repository.get(id).await
    }

    /// All fields but `banned` must be present, `banned` defaults to false.
    pub async fn create(&self, payload: CreatePlayer) -> Result<Player> {
        payload.validate()?;
        let player = NewPlayer::try_from(payload)?;
        debug!("Creating player {}", player.name);
        self.repository.create(player).await
    }

    /// Only present fields are validated and applied, the patch is checked
    /// before the player is looked up.
    pub async fn update(&self, id: i64, patch: UpdatePlayer) -> Result<Player> {
        patch.validate()?;
        let mut player = self.repository.get(id).await?;
        player.apply(patch);
        debug!("Updating player {id}");
        self.repository.save(&player).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        debug!("Deleting player {id}");
        self.repository.delete(id).await
    }
}
