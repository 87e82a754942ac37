use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::app::GridPos;

/// Expansion order for every node: west, north, east, south. Fixes which of
/// several equal-length routes is returned.
pub const NEIGHBOR_ORDER: [GridPos; 4] = [
    GridPos::new(-1, 0),
    GridPos::new(0, -1),
    GridPos::new(1, 0),
    GridPos::new(0, 1),
];

/// Planned route: excludes the start cell, ends on the goal cell, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Vec<GridPos>);

impl Path {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn steps(&self) -> &[GridPos] {
        &self.0
    }

    pub fn goal(&self) -> Option<GridPos> {
        self.0.last().copied()
    }

    pub fn into_steps(self) -> Vec<GridPos> {
        self.0
    }
}

/// Uniform-cost search over the 4-connected grid.
///
/// `step_cost` is the cost of entering a cell, `None` when the cell is
/// blocked. The search stops when the goal is popped, not when it is first
/// discovered. Returns `None` for an unreachable goal and for `start == goal`.
pub fn uniform_cost_search<F>(start: GridPos, goal: GridPos, mut step_cost: F) -> Option<Path>
where
    F: FnMut(GridPos) -> Option<u32>,
{
    if start == goal {
        return None;
    }

    let mut best: HashMap<GridPos, u32> = HashMap::new();
    let mut came_from: HashMap<GridPos, GridPos> = HashMap::new();
    let mut frontier = BinaryHeap::new();
    best.insert(start, 0);
    frontier.push(Reverse((0u32, start)));

    let mut reached = false;
    while let Some(Reverse((cost, current))) = frontier.pop() {
        if best.get(&current).is_some_and(|known| cost > *known) {
            continue;
        }
        if current == goal {
            reached = true;
            break;
        }
        for delta in NEIGHBOR_ORDER {
            let next = current + delta;
            let Some(enter_cost) = step_cost(next) else {
                continue;
            };
            let next_cost = cost.saturating_add(enter_cost);
            if best.get(&next).is_some_and(|known| next_cost >= *known) {
                continue;
            }
            best.insert(next, next_cost);
            came_from.insert(next, current);
            frontier.push(Reverse((next_cost, next)));
        }
    }

    if !reached {
        return None;
    }

    let mut steps = Vec::new();
    let mut cursor = goal;
    while cursor != start {
        steps.push(cursor);
        cursor = *came_from.get(&cursor)?;
    }
    steps.reverse();
    Some(Path(steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashSet, VecDeque};

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn open_box(width: i32, height: i32) -> impl FnMut(GridPos) -> Option<u32> {
        move |pos| (pos.x >= 0 && pos.y >= 0 && pos.x < width && pos.y < height).then_some(1)
    }

    fn bfs_distance(walkable: &HashSet<GridPos>, start: GridPos, goal: GridPos) -> Option<usize> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0usize)]);
        while let Some((cell, distance)) = queue.pop_front() {
            if cell == goal {
                return Some(distance);
            }
            for delta in NEIGHBOR_ORDER {
                let next = cell + delta;
                if walkable.contains(&next) && seen.insert(next) {
                    queue.push_back((next, distance + 1));
                }
            }
        }
        None
    }

    fn assert_connected(start: GridPos, path: &Path) {
        let mut previous = start;
        for step in path.steps() {
            let delta = *step - previous;
            assert_eq!(delta.x.abs() + delta.y.abs(), 1, "{previous:?} -> {step:?}");
            previous = *step;
        }
    }

    #[test]
    fn open_grid_path_is_manhattan_length() {
        let path = uniform_cost_search(GridPos::new(0, 0), GridPos::new(4, 4), open_box(5, 5))
            .expect("path");
        assert_eq!(path.len(), 8);
        assert_eq!(path.goal(), Some(GridPos::new(4, 4)));
        assert!(!path.steps().contains(&GridPos::new(0, 0)));
        assert_connected(GridPos::new(0, 0), &path);
    }

    #[test]
    fn start_equal_to_goal_has_no_path() {
        assert_eq!(
            uniform_cost_search(GridPos::new(2, 2), GridPos::new(2, 2), open_box(5, 5)),
            None
        );
    }

    #[test]
    fn blocked_goal_has_no_path() {
        let path = uniform_cost_search(GridPos::new(0, 0), GridPos::new(9, 9), open_box(5, 5));
        assert_eq!(path, None);
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let wall: HashSet<GridPos> = [(1, 2), (3, 2), (2, 1), (2, 3)]
            .into_iter()
            .map(|(x, y)| GridPos::new(x, y))
            .collect();
        let mut cost = |pos: GridPos| {
            let in_bounds = pos.x >= 0 && pos.y >= 0 && pos.x < 5 && pos.y < 5;
            (in_bounds && !wall.contains(&pos)).then_some(1)
        };
        assert_eq!(
            uniform_cost_search(GridPos::new(0, 0), GridPos::new(2, 2), &mut cost),
            None
        );
    }

    #[test]
    fn tie_break_follows_neighbor_order() {
        let first = uniform_cost_search(GridPos::new(0, 0), GridPos::new(2, 2), open_box(3, 3))
            .expect("path");
        for _ in 0..8 {
            let again = uniform_cost_search(GridPos::new(0, 0), GridPos::new(2, 2), open_box(3, 3))
                .expect("path");
            assert_eq!(again, first);
        }
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn weighted_cells_are_avoided_when_cheaper_route_exists() {
        let cost = |pos: GridPos| {
            let in_bounds = pos.x >= 0 && pos.y >= 0 && pos.x < 3 && pos.y < 3;
            if !in_bounds {
                return None;
            }
            Some(if pos == GridPos::new(1, 0) { 10 } else { 1 })
        };
        let path = uniform_cost_search(GridPos::new(0, 0), GridPos::new(2, 0), cost).expect("path");
        assert!(!path.steps().contains(&GridPos::new(1, 0)));
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn matches_bfs_oracle_on_random_grids() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x15_0a1c);
        for _ in 0..200 {
            let width = rng.gen_range(2..=8);
            let height = rng.gen_range(2..=8);
            let mut walkable = HashSet::new();
            for y in 0..height {
                for x in 0..width {
                    if rng.gen_bool(0.7) {
                        walkable.insert(GridPos::new(x, y));
                    }
                }
            }
            let start = GridPos::new(rng.gen_range(0..width), rng.gen_range(0..height));
            let goal = GridPos::new(rng.gen_range(0..width), rng.gen_range(0..height));
            walkable.insert(start);

            let expected = bfs_distance(&walkable, start, goal);
            let actual = uniform_cost_search(start, goal, |pos| walkable.contains(&pos).then_some(1));
            match (expected, actual) {
                (Some(0), None) => assert_eq!(start, goal),
                (Some(distance), Some(path)) => {
                    assert_eq!(path.len(), distance);
                    assert_connected(start, &path);
                    assert!(path.steps().iter().all(|cell| walkable.contains(cell)));
                }
                (None, None) => {}
                (expected, actual) => {
                    panic!("start={start:?} goal={goal:?} expected={expected:?} actual={actual:?}")
                }
            }
        }
    }
}
