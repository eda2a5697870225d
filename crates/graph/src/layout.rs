//! Deterministic force-directed placement
//!
//! Spring-embedder over the relation graph: seeded random initial
//! positions, pairwise repulsion, spring attraction along edges, damped
//! steps, iteration cap. The same topology and the same seed always give
//! the same positions, which keeps the picture stable across re-renders
//! triggered by unrelated UI changes.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use paperscope_common::config::LayoutConfig;

use crate::relation::{NodeId, RelationGraph};

/// 2-D node position
pub type Position = (f32, f32);

/// Movement threshold below which the embedding is considered settled
const SETTLED_EPS: f32 = 0.1;

/// Minimum pairwise distance used to avoid division blowups
const MIN_DISTANCE: f32 = 1e-3;

/// Compute a position per node
///
/// Pure read of the graph; node order comes from the graph's ordered key
/// set, so enumeration order cannot leak into the result. Positions are
/// normalized to `[-scale, scale]`.
pub fn layout(graph: &RelationGraph, seed: u64, config: &LayoutConfig) -> BTreeMap<NodeId, Position> {
    let ids: Vec<&NodeId> = graph.nodes().map(|n| &n.id).collect();
    let n = ids.len();
    if n == 0 {
        return BTreeMap::new();
    }
    if n == 1 {
        return BTreeMap::from([(ids[0].clone(), (0.0, 0.0))]);
    }

    let index: HashMap<&NodeId, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

    // Springs are undirected for layout purposes; a symmetric relation
    // stored in both directions still contributes one spring.
    let springs: BTreeSet<(usize, usize)> = graph
        .edges()
        .filter_map(|e| {
            let a = *index.get(&e.source)?;
            let b = *index.get(&e.target)?;
            Some((a.min(b), a.max(b)))
        })
        .collect();

    // Seeded initial placement in a spring_length-sized square, drawn in
    // node key order
    let mut rng = StdRng::seed_from_u64(seed);
    let mut positions: Vec<Position> = (0..n)
        .map(|_| {
            (
                (rng.gen::<f32>() - 0.5) * config.spring_length,
                (rng.gen::<f32>() - 0.5) * config.spring_length,
            )
        })
        .collect();

    let repulsion = -config.repulsion;
    let mut iterations = 0;
    for iter in 0..config.max_iterations {
        iterations = iter + 1;
        let mut disp = vec![(0.0f32, 0.0f32); n];

        // Pairwise repulsion
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = positions[i].0 - positions[j].0;
                let dy = positions[i].1 - positions[j].1;
                let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let force = repulsion / dist;
                let (ux, uy) = (dx / dist, dy / dist);
                disp[i].0 += ux * force;
                disp[i].1 += uy * force;
                disp[j].0 -= ux * force;
                disp[j].1 -= uy * force;
            }
        }

        // Spring attraction along edges
        for &(i, j) in &springs {
            let dx = positions[i].0 - positions[j].0;
            let dy = positions[i].1 - positions[j].1;
            let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
            let force = config.spring_constant * (dist - config.spring_length);
            let (ux, uy) = (dx / dist, dy / dist);
            disp[i].0 -= ux * force;
            disp[i].1 -= uy * force;
            disp[j].0 += ux * force;
            disp[j].1 += uy * force;
        }

        // Damped, capped step
        let mut max_move = 0.0f32;
        for i in 0..n {
            let (dx, dy) = (disp[i].0 * config.damping, disp[i].1 * config.damping);
            let len = (dx * dx + dy * dy).sqrt();
            let clamp = if len > config.max_step {
                config.max_step / len
            } else {
                1.0
            };
            positions[i].0 += dx * clamp;
            positions[i].1 += dy * clamp;
            max_move = max_move.max(len.min(config.max_step));
        }

        if max_move < SETTLED_EPS {
            break;
        }
    }

    // Normalize to [-scale, scale], preserving the aspect ratio
    let max_abs = positions
        .iter()
        .flat_map(|&(x, y)| [x.abs(), y.abs()])
        .fold(0.0f32, f32::max);
    if max_abs > 0.0 {
        let factor = config.scale / max_abs;
        for pos in &mut positions {
            pos.0 *= factor;
            pos.1 *= factor;
        }
    }

    debug!(nodes = n, springs = springs.len(), iterations, "layout computed");

    ids.into_iter()
        .cloned()
        .zip(positions)
        .collect()
}
