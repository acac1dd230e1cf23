//! Instruction chains: singly linked lists of instructions per
//! (step, audience), walked from the head.

use std::collections::{HashMap, HashSet};

use crate::domain::roles::Audience;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainNode {
    pub id: i64,
    pub step_id: i64,
    pub audience: Audience,
    pub is_active: bool,
    pub next_id: Option<i64>,
}

/// Ordered ids of the `audience` chain for `step_id`.
///
/// `nodes` are all instructions of the step. The head is the lowest-id
/// active node of the audience that no other node links to. Inactive nodes
/// are stepped over; the walk stops on a revisit or on a link that leaves
/// the step or the audience.
pub fn walk_chain(nodes: &[ChainNode], step_id: i64, audience: Audience) -> Vec<i64> {
    let by_id: HashMap<i64, &ChainNode> = nodes.iter().map(|n| (n.id, n)).collect();
    let linked: HashSet<i64> = nodes.iter().filter_map(|n| n.next_id).collect();

    let head = nodes
        .iter()
        .filter(|n| n.step_id == step_id && n.audience == audience && n.is_active)
        .filter(|n| !linked.contains(&n.id))
        .min_by_key(|n| n.id);

    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor = head;

    while let Some(node) = cursor {
        if node.step_id != step_id || node.audience != audience || !seen.insert(node.id) {
            break;
        }
        if node.is_active {
            chain.push(node.id);
        }
        cursor = node.next_id.and_then(|id| by_id.get(&id).copied());
    }

    chain
}

/// Reject a `next_id` link for node `id` (None while creating) that would
/// leave the step or audience, or close a loop back onto `id`.
pub fn check_link(
    nodes: &[ChainNode],
    id: Option<i64>,
    step_id: i64,
    audience: Audience,
    next_id: i64,
) -> Result<(), DomainError> {
    let invalid =
        |detail: String| DomainError::validation(ValidationKind::InvalidInstructionLink, detail);
    let by_id: HashMap<i64, &ChainNode> = nodes.iter().map(|n| (n.id, n)).collect();

    let target = by_id
        .get(&next_id)
        .ok_or_else(|| invalid(format!("Instruction {next_id} is not part of this step")))?;
    if target.step_id != step_id || target.audience != audience {
        return Err(invalid(format!(
            "Instruction {next_id} belongs to another step or audience"
        )));
    }
    let Some(id) = id else {
        return Ok(());
    };

    let mut seen = HashSet::new();
    let mut cursor = Some(next_id);
    while let Some(current) = cursor {
        if current == id {
            return Err(invalid(format!(
                "Linking {id} to {next_id} would create a loop"
            )));
        }
        if !seen.insert(current) {
            break;
        }
        cursor = by_id.get(&current).and_then(|n| n.next_id);
    }
    Ok(())
}
