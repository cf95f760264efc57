//! Teams derived from player team pointers

use crate::core::types::{Address, Player, FREE_AGENTS};
use crate::scanner::heuristics::label_order;
use std::collections::HashMap;

/// Sorts labels ("team " prefixed last) and numbers them in order
pub fn sorted_team_labels<I>(labels: I) -> Vec<(u32, String)>
where
    I: IntoIterator<Item = String>,
{
    let mut labels: Vec<String> = labels.into_iter().collect();
    labels.sort_by(|a, b| label_order(a.trim(), b.trim()));
    labels.dedup();
    labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| (i as u32, label))
        .collect()
}

/// Groups players by team pointer and relabels them.
///
/// A null pointer is "Free Agents". When one label is shared by several
/// distinct pointers, each pointer's label gets ` [k]` with `k` counting
/// pointers in order of first appearance. Returns the label for every
/// pointer seen and the ordered `(index, label)` list.
pub fn derive_teams_from_players(
    players: &mut [Player],
) -> (HashMap<Address, String>, Vec<(u32, String)>) {
    let mut ptr_label: HashMap<Address, String> = HashMap::new();
    let mut label_ptrs: Vec<(String, Vec<Address>)> = Vec::new();

    for player in players.iter() {
        let ptr = player.team_ptr;
        if ptr_label.contains_key(&ptr) {
            continue;
        }
        let label = if ptr.is_null() {
            FREE_AGENTS.to_string()
        } else {
            player.team.clone()
        };
        match label_ptrs.iter_mut().find(|(l, _)| *l == label) {
            Some((_, ptrs)) => ptrs.push(ptr),
            None => label_ptrs.push((label.clone(), vec![ptr])),
        }
        ptr_label.insert(ptr, label);
    }

    for (label, ptrs) in &label_ptrs {
        if ptrs.len() > 1 {
            for (k, ptr) in ptrs.iter().enumerate() {
                ptr_label.insert(*ptr, format!("{} [{}]", label, k));
            }
        }
    }

    for player in players.iter_mut() {
        if let Some(label) = ptr_label.get(&player.team_ptr) {
            player.team = label.clone();
        }
    }

    let ordered = sorted_team_labels(ptr_label.values().cloned());
    (ptr_label, ordered)
}
