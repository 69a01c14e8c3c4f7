use crate::dice::chest::Chest;
use crate::dice::face::Face;
use crate::search::state::UnrolledState;
use anyhow::Context;
use anyhow::Result;
use anyhow::anyhow;
use anyhow::bail;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// driver-facing shape of an UnrolledState: one symbol per banked die
/// plus the count of dice still to throw. symbols, not pip values,
/// because the Worm and the Five share a value.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateDto {
    banked_faces: Vec<String>,
    remaining_dice_count: usize,
}

pub fn encode(state: &UnrolledState) -> Value {
    serde_json::to_value(StateDto {
        banked_faces: state
            .chest()
            .dice()
            .dice()
            .iter()
            .map(|face| face.to_string())
            .collect(),
        remaining_dice_count: state.remaining(),
    })
    .expect("state serializes")
}

pub fn decode(value: &Value) -> Result<UnrolledState> {
    let dto: StateDto =
        serde_json::from_value(value.clone()).context("malformed state payload")?;
    let mut counts: BTreeMap<Face, usize> = BTreeMap::new();
    for symbol in &dto.banked_faces {
        let face = Face::try_from(symbol.as_str()).map_err(|e| anyhow!(e))?;
        *counts.entry(face).or_default() += 1;
    }
    // reject impossible positions here; the constructors panic
    let banked = counts.values().sum::<usize>();
    if banked + dto.remaining_dice_count > crate::N_DICE {
        bail!(
            "{} banked + {} in hand exceeds the pool of {}",
            banked,
            dto.remaining_dice_count,
            crate::N_DICE
        );
    }
    let chest = counts
        .into_iter()
        .fold(Chest::empty(), |chest, (face, n)| chest.bank(face, n));
    Ok(UnrolledState::from((chest, dto.remaining_dice_count)))
}
