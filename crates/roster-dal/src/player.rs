use crate::{
    ChosenDB, Error, ListingParams, MAX_LIMIT,
    error::Result,
    filter::PlayerFilter,
    validation::{valid_birthday, valid_experience, valid_name, valid_title},
};
use futures::{StreamExt as _, TryStreamExt as _};
use garde::Validate;
use serde::{Deserialize, Serialize};
use sqlx::QueryBuilder;
use tracing::debug;

const PLAYER_COLUMNS: &str =
    "id, name, title, race, profession, birthday, banned, experience, level, until_next_level";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Race {
    Human,
    Dwarf,
    Elf,
    Giant,
    Orc,
    Troll,
    Hobbit,
}

impl Race {
    pub fn as_str(&self) -> &'static str {
        match self {
            Race::Human => "HUMAN",
            Race::Dwarf => "DWARF",
            Race::Elf => "ELF",
            Race::Giant => "GIANT",
            Race::Orc => "ORC",
            Race::Troll => "TROLL",
            Race::Hobbit => "HOBBIT",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Profession {
    Warrior,
    Rogue,
    Sorcerer,
    Cleric,
    Paladin,
    Nazgul,
    Warlock,
    Druid,
}

impl Profession {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profession::Warrior => "WARRIOR",
            Profession::Rogue => "ROGUE",
            Profession::Sorcerer => "SORCERER",
            Profession::Cleric => "CLERIC",
            Profession::Paladin => "PALADIN",
            Profession::Nazgul => "NAZGUL",
            Profession::Warlock => "WARLOCK",
            Profession::Druid => "DRUID",
        }
    }
}

/// Sort key for listings
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerOrder {
    #[default]
    Id,
    Name,
    Experience,
    Birthday,
    Level,
}

impl PlayerOrder {
    pub fn column(&self) -> &'static str {
        match self {
            PlayerOrder::Id => "id",
            PlayerOrder::Name => "name",
            PlayerOrder::Experience => "experience",
            PlayerOrder::Birthday => "birthday",
            PlayerOrder::Level => "level",
        }
    }
}

/// Level reached with given experience and experience missing to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    pub level: i32,
    pub until_next_level: i32,
}

impl Progression {
    pub fn from_experience(experience: i32) -> Self {
        let exp = f64::from(experience.max(0));
        let level = (((2500.0 + 200.0 * exp).sqrt() - 50.0) / 100.0).floor() as i32;
        Progression {
            level,
            until_next_level: 50 * (level + 1) * (level + 2) - experience,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, sqlx::FromRow)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    /// Epoch milliseconds
    pub birthday: i64,
    pub banned: bool,
    pub experience: i32,
    pub level: i32,
    pub until_next_level: i32,
}

impl Player {
    /// Overwrites fields present in the patch, recomputing progression when
    /// experience changes. The patch is expected to be validated already.
    pub fn apply(&mut self, patch: UpdatePlayer) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(experience) = patch.experience {
            self.set_experience(experience);
        }
        if let Some(birthday) = patch.birthday {
            self.birthday = birthday;
        }
        if let Some(race) = patch.race {
            self.race = race;
        }
        if let Some(profession) = patch.profession {
            self.profession = profession;
        }
        if let Some(banned) = patch.banned {
            self.banned = banned;
        }
    }

    fn set_experience(&mut self, experience: i32) {
        let progression = Progression::from_experience(experience);
        self.experience = experience;
        self.level = progression.level;
        self.until_next_level = progression.until_next_level;
    }
}

/// Create request, every field is optional on the wire so that missing
/// fields are reported as validation errors.
#[derive(Debug, Serialize, Deserialize, Clone, Default, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayer {
    #[garde(required, inner(custom(valid_name)))]
    pub name: Option<String>,
    #[garde(required, inner(custom(valid_title)))]
    pub title: Option<String>,
    #[garde(required)]
    pub race: Option<Race>,
    #[garde(required)]
    pub profession: Option<Profession>,
    #[garde(required, inner(custom(valid_birthday)))]
    pub birthday: Option<i64>,
    #[garde(skip)]
    pub banned: Option<bool>,
    #[garde(required, inner(custom(valid_experience)))]
    pub experience: Option<i32>,
}

/// Partial update, absent fields keep their stored values.
#[derive(Debug, Serialize, Deserialize, Clone, Default, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
#[garde(allow_unvalidated)]
pub struct UpdatePlayer {
    #[garde(inner(custom(valid_name)))]
    pub name: Option<String>,
    #[garde(inner(custom(valid_title)))]
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    #[garde(inner(custom(valid_birthday)))]
    pub birthday: Option<i64>,
    pub banned: Option<bool>,
    #[garde(inner(custom(valid_experience)))]
    pub experience: Option<i32>,
}

/// Complete record ready to be inserted
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    pub birthday: i64,
    pub banned: bool,
    pub experience: i32,
    pub progression: Progression,
}

impl TryFrom<CreatePlayer> for NewPlayer {
    type Error = Error;

    fn try_from(payload: CreatePlayer) -> Result<Self> {
        fn missing(field: &str) -> Error {
            Error::InvalidInput(format!("{field}: not set"))
        }
        let experience = payload.experience.ok_or_else(|| missing("experience"))?;
        Ok(NewPlayer {
            name: payload.name.ok_or_else(|| missing("name"))?,
            title: payload.title.ok_or_else(|| missing("title"))?,
            race: payload.race.ok_or_else(|| missing("race"))?,
            profession: payload.profession.ok_or_else(|| missing("profession"))?,
            birthday: payload.birthday.ok_or_else(|| missing("birthday"))?,
            banned: payload.banned.unwrap_or(false),
            experience,
            progression: Progression::from_experience(experience),
        })
    }
}

pub type PlayerRepository = PlayerRepositoryImpl<sqlx::Pool<ChosenDB>>;

pub struct PlayerRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> PlayerRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn create(&self, player: NewPlayer) -> Result<Player> {
        let result = sqlx::query(
            "INSERT INTO player (name, title, race, profession, birthday, banned, experience, level, until_next_level)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&player.name)
        .bind(&player.title)
        .bind(player.race)
        .bind(player.profession)
        .bind(player.birthday)
        .bind(player.banned)
        .bind(player.experience)
        .bind(player.progression.level)
        .bind(player.progression.until_next_level)
        .execute(&self.executor)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Created player {id}");
        self.get(id).await
    }

    /// Writes all mutable columns of the player
    pub async fn save(&self, player: &Player) -> Result<Player> {
        let result = sqlx::query(
            "UPDATE player SET name = ?, title = ?, race = ?, profession = ?, birthday = ?, banned = ?,
            experience = ?, level = ?, until_next_level = ? WHERE id = ?",
        )
        .bind(&player.name)
        .bind(&player.title)
        .bind(player.race)
        .bind(player.profession)
        .bind(player.birthday)
        .bind(player.banned)
        .bind(player.experience)
        .bind(player.level)
        .bind(player.until_next_level)
        .bind(player.id)
        .execute(&self.executor)
        .await?;

        if result.rows_affected() == 0 {
            Err(Error::RecordNotFound(format!("Player {}", player.id)))
        } else {
            self.get(player.id).await
        }
    }

    pub async fn get(&self, id: i64) -> Result<Player> {
        let query = format!("SELECT {PLAYER_COLUMNS} FROM player WHERE id = ?");
        sqlx::query_as::<_, Player>(&query)
            .bind(id)
            .fetch_optional(&self.executor)
            .await?
            .ok_or_else(|| Error::RecordNotFound(format!("Player {id}")))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM player WHERE id = ?")
            .bind(id)
            .execute(&self.executor)
            .await?;

        if res.rows_affected() == 0 {
            Err(Error::RecordNotFound(format!("Player {id}")))
        } else {
            Ok(())
        }
    }

    pub async fn list(&self, filter: &PlayerFilter, params: ListingParams) -> Result<Vec<Player>> {
        let mut query = QueryBuilder::<ChosenDB>::new(format!("SELECT {PLAYER_COLUMNS} FROM player"));
        filter.push_where(&mut query);
        query
            .push(format!(" ORDER BY {} LIMIT ", params.ordering()))
            .push_bind(params.limit)
            .push(" OFFSET ")
            .push_bind(params.offset);

        let records = query
            .build_query_as::<Player>()
            .fetch(&self.executor)
            .take(MAX_LIMIT)
            .try_collect::<Vec<_>>()
            .await?;
        Ok(records)
    }

    pub async fn count(&self, filter: &PlayerFilter) -> Result<u64> {
        let mut query = QueryBuilder::<ChosenDB>::new("SELECT count(*) FROM player");
        filter.push_where(&mut query);
        let count = query
            .build_query_scalar::<i64>()
            .fetch_one(&self.executor)
            .await?;
        Ok(count.max(0) as u64)
    }
}
