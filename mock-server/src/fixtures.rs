//! Built-in records, shaped like the public API's `/pokemon/{id}` payloads.

use serde_json::{json, Value};

const SPRITES: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";
const STAT_NAMES: [&str; 6] = [
    "hp",
    "attack",
    "defense",
    "special-attack",
    "special-defense",
    "speed",
];

struct Spec {
    id: u32,
    name: &'static str,
    height: u32,
    weight: u32,
    base_experience: Option<u32>,
    types: &'static [&'static str],
    stats: [u32; 6],
    /// Index into `STAT_NAMES` of the stat that yields one effort point.
    effort_stat: usize,
    artwork: bool,
}

#[rustfmt::skip]
const SPECS: &[Spec] = &[
    Spec { id: 1, name: "bulbasaur", height: 7, weight: 69, base_experience: Some(64), types: &["grass", "poison"], stats: [45, 49, 49, 65, 65, 45], effort_stat: 3, artwork: true },
    Spec { id: 2, name: "ivysaur", height: 10, weight: 130, base_experience: Some(142), types: &["grass", "poison"], stats: [60, 62, 63, 80, 80, 60], effort_stat: 3, artwork: true },
    Spec { id: 3, name: "venusaur", height: 20, weight: 1000, base_experience: Some(236), types: &["grass", "poison"], stats: [80, 82, 83, 100, 100, 80], effort_stat: 3, artwork: true },
    Spec { id: 4, name: "charmander", height: 6, weight: 85, base_experience: Some(62), types: &["fire"], stats: [39, 52, 43, 60, 50, 65], effort_stat: 5, artwork: true },
    Spec { id: 7, name: "squirtle", height: 5, weight: 90, base_experience: Some(63), types: &["water"], stats: [44, 48, 65, 50, 64, 43], effort_stat: 2, artwork: true },
    Spec { id: 25, name: "pikachu", height: 4, weight: 60, base_experience: Some(112), types: &["electric"], stats: [35, 55, 40, 50, 50, 90], effort_stat: 5, artwork: true },
    Spec { id: 10158, name: "pikachu-starter", height: 4, weight: 60, base_experience: None, types: &["electric"], stats: [45, 80, 50, 75, 60, 120], effort_stat: 5, artwork: false },
];

/// All built-in records, ordered by id.
pub fn records() -> Vec<Value> {
    SPECS.iter().map(record).collect()
}

fn record(spec: &Spec) -> Value {
    let types: Vec<Value> = spec
        .types
        .iter()
        .enumerate()
        .map(|(i, name)| {
            json!({
                "slot": i + 1,
                "type": { "name": name, "url": format!("https://pokeapi.co/api/v2/type/{name}/") }
            })
        })
        .collect();

    let stats: Vec<Value> = STAT_NAMES
        .iter()
        .zip(spec.stats)
        .enumerate()
        .map(|(i, (name, base))| {
            json!({
                "base_stat": base,
                "effort": u32::from(i == spec.effort_stat),
                "stat": { "name": name, "url": format!("https://pokeapi.co/api/v2/stat/{}/", i + 1) }
            })
        })
        .collect();

    let artwork = if spec.artwork {
        json!(format!("{SPRITES}/other/official-artwork/{}.png", spec.id))
    } else {
        Value::Null
    };

    let mut record = json!({
        "id": spec.id,
        "name": spec.name,
        "height": spec.height,
        "weight": spec.weight,
        "is_default": spec.id < 10000,
        "types": types,
        "stats": stats,
        "sprites": {
            "front_default": format!("{SPRITES}/{}.png", spec.id),
            "other": { "official-artwork": { "front_default": artwork } }
        }
    });
    if let Some(exp) = spec.base_experience {
        record["base_experience"] = json!(exp);
    }
    record
}
