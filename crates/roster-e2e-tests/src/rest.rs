use anyhow::Result;
use reqwest::Url;
use roster_dal::player::Player;
use serde_json::json;
use tracing::info;

pub fn player_payload(name: &str, experience: i32) -> serde_json::Value {
    json!({
        "name": name,
        "title": "Adventurer",
        "race": "HUMAN",
        "profession": "WARRIOR",
        "birthday": 1_000_000_000_000i64,
        "experience": experience
    })
}

pub async fn create_player<T>(client: &reqwest::Client, base_url: &Url, payload: &T) -> Result<Player>
where
    T: serde::Serialize,
{
    let api_url = base_url.join("players")?;

    let response = client.post(api_url).json(payload).send().await?;
    info!("Response: {:#?}", response);
    assert!(response.status().is_success());
    assert!(response.status().as_u16() == 200);

    let new_player: Player = response.json().await?;
    Ok(new_player)
}
