//! AI commentary command.

use tokio::runtime::Runtime;

use crate::error::{Error, Result};
use crate::insight::{self, GeminiClient};

/// Print the AI commentary for one track.
///
/// The API key comes from the flag/env var, falling back to the config
/// file. A missing key or failing request degrades to the fixed
/// placeholder strings; the command itself only fails when the track
/// does not exist.
pub fn cmd_insight(rt: &Runtime, id: &str, api_key: Option<&str>) -> Result<()> {
    let config = crate::config::load();
    let store = super::catalog::open_store()?;
    let track = store
        .find(id)
        .ok_or_else(|| Error::unknown_track(id))?
        .clone();

    let key = api_key
        .map(str::to_string)
        .or(config.credentials.gemini_api_key);
    let Some(key) = key.filter(|k| !k.is_empty()) else {
        println!("{}", insight::KEY_MISSING);
        return Ok(());
    };

    let client = GeminiClient::new(key);
    let text = rt.block_on(insight::song_insight(&client, &track));

    println!("《{}》", track.title);
    println!("{text}");
    Ok(())
}
