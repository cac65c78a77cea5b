use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::FetchError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub name: String,
    pub base: u8,
}

// the normalized shape every fetch produces, nothing else from the API survives
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntityRecord {
    pub id: u32,
    pub name: String,
    pub stats: Vec<Stat>,
    pub sprite_url: Option<String>,
    pub type_tags: Vec<String>,
}

impl EntityRecord {
    pub fn stat(&self, name: &str) -> Option<u8> {
        self.stats.iter().find(|s| s.name == name).map(|s| s.base)
    }
}

#[derive(Debug, Deserialize)]
pub(in crate::fetcher) struct ApiPokemon {
    id: u32,
    name: String,
    stats: Vec<ApiStat>,
    #[serde(default)]
    sprites: Option<ApiSprites>,
    #[serde(default)]
    types: Vec<ApiType>,
}

#[derive(Debug, Deserialize)]
struct ApiStat {
    base_stat: i64,
    stat: ApiNamed,
}

#[derive(Debug, Deserialize)]
struct ApiNamed {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiSprites {
    #[serde(default)]
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiType {
    #[serde(rename = "type")]
    kind: ApiNamed,
}

pub fn parse_record(requested: u32, body: &str) -> Result<EntityRecord, FetchError> {
    let raw: ApiPokemon = serde_json::from_str(body).map_err(|e| FetchError::Parse {
        id: requested,
        source: e,
    })?;
    normalize(requested, raw)
}

pub(in crate::fetcher) fn normalize(
    requested: u32,
    raw: ApiPokemon,
) -> Result<EntityRecord, FetchError> {
    let invalid = |message: String| FetchError::InvalidRecord {
        id: requested,
        message,
    };

    if raw.id == 0 {
        return Err(invalid("id must be positive".to_string()));
    }
    if raw.id != requested {
        return Err(FetchError::IdMismatch {
            requested,
            returned: raw.id,
        });
    }
    if raw.name.trim().is_empty() {
        return Err(invalid("name is empty".to_string()));
    }

    let mut seen = HashSet::new();
    let mut stats = Vec::with_capacity(raw.stats.len());
    for s in raw.stats {
        let base = u8::try_from(s.base_stat).map_err(|_| {
            invalid(format!(
                "base stat {} for '{}' is outside 0..=255",
                s.base_stat, s.stat.name
            ))
        })?;
        if !seen.insert(s.stat.name.clone()) {
            return Err(invalid(format!("duplicate stat '{}'", s.stat.name)));
        }
        stats.push(Stat {
            name: s.stat.name,
            base,
        });
    }

    Ok(EntityRecord {
        id: raw.id,
        name: raw.name,
        stats,
        sprite_url: raw.sprites.and_then(|s| s.front_default),
        type_tags: raw.types.into_iter().map(|t| t.kind.name).collect(),
    })
}
