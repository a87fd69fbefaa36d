use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet, VecDeque};

use crate::direction::{Direction, DIRECTIONS};
use crate::grid::Grid;
use crate::level::Level;
use crate::position::Position;

/// Static facts about a level needed for every state of the search.
struct Board<'a> {
    grid: &'a Grid,

    /// How many pushes a lone crate needs to get from a cell to the nearest goal. `None` if it
    /// can never reach one.
    goal_distance: Vec<Option<usize>>,
}

/// The cells the worker can reach without pushing anything.
struct Reach<'a> {
    board: &'a Board<'a>,
    visited: Vec<bool>,

    /// The direction in which each visited cell was entered. `None` for the starting cell.
    came_from: Vec<Option<Direction>>,
}

/// A state of the search, reached by a sequence of pushes.
struct Node {
    /// Any cell in the region the worker can reach.
    worker: Position,

    /// Sorted, so equal states compare equal.
    crates: Vec<Position>,

    pushes: usize,
    parent: Option<usize>,

    /// The crate position and direction of the push leading here.
    push: Option<(Position, Direction)>,
}

impl<'a> Board<'a> {
    fn new(grid: &'a Grid) -> Self {
        let mut board = Board {
            grid,
            goal_distance: vec![None; grid.rows() * grid.columns()],
        };

        // Pull crates backwards from every goal.
        let mut queue = VecDeque::new();
        for (i, cell) in grid.cells().iter().enumerate() {
            if cell.is_goal() {
                board.goal_distance[i] = Some(0);
                queue.push_back(Position::from_index(i, grid.columns()));
            }
        }

        while let Some(pos) = queue.pop_front() {
            let dist = board.distance(pos).unwrap_or(0);
            for &dir in &DIRECTIONS {
                let from = pos.neighbour(dir.reverse());
                let worker = from.neighbour(dir.reverse());
                if board.is_floor(from)
                    && board.is_floor(worker)
                    && board.distance(from).is_none()
                {
                    let i = board.index(from);
                    board.goal_distance[i] = Some(dist + 1);
                    queue.push_back(from);
                }
            }
        }

        board
    }

    fn index(&self, pos: Position) -> usize {
        pos.to_index(self.grid.columns())
    }

    fn is_floor(&self, pos: Position) -> bool {
        self.grid.get(pos).map_or(false, |cell| !cell.is_wall())
    }

    fn distance(&self, pos: Position) -> Option<usize> {
        if self.grid.in_bounds(pos) {
            self.goal_distance[self.index(pos)]
        } else {
            None
        }
    }

    /// A lower bound on the pushes still needed, or `None` if some crate is stuck for good.
    fn estimate(&self, crates: &[Position]) -> Option<usize> {
        crates.iter().map(|&pos| self.distance(pos)).sum()
    }

    fn is_solved(&self, crates: &[Position]) -> bool {
        crates.iter().all(|&pos| self.grid.is_goal(pos))
    }

    fn reachable(&self, worker: Position, crates: &HashSet<Position>) -> Reach<'_> {
        let size = self.goal_distance.len();
        let mut reach = Reach {
            board: self,
            visited: vec![false; size],
            came_from: vec![None; size],
        };

        reach.visited[self.index(worker)] = true;
        let mut queue = VecDeque::with_capacity(size);
        queue.push_back(worker);

        while let Some(pos) = queue.pop_front() {
            for &dir in &DIRECTIONS {
                let neighbour = pos.neighbour(dir);
                if !self.is_floor(neighbour) || crates.contains(&neighbour) {
                    continue;
                }
                let i = self.index(neighbour);
                if !reach.visited[i] {
                    reach.visited[i] = true;
                    reach.came_from[i] = Some(dir);
                    queue.push_back(neighbour);
                }
            }
        }

        reach
    }
}

impl<'a> Reach<'a> {
    fn contains(&self, pos: Position) -> bool {
        self.board.grid.in_bounds(pos) && self.visited[self.board.index(pos)]
    }

    /// The first reachable cell, identifying the region independently of where in it the worker
    /// stands.
    fn region(&self) -> usize {
        self.visited.iter().position(|&v| v).unwrap_or(0)
    }

    /// The steps leading from the start to `to`, which has to be reachable.
    fn path_to(&self, to: Position) -> Vec<Direction> {
        let mut path = vec![];
        let mut pos = to;
        while let Some(dir) = self.came_from[self.board.index(pos)] {
            path.push(dir);
            pos = pos.neighbour(dir.reverse());
        }
        path.reverse();
        path
    }
}

impl Level {
    /// Search for a sequence of moves solving the level from its current state, using at most
    /// `max_pushes` pushes. The result is in LURD notation and can be passed to `replay`. It is
    /// not necessarily the shortest solution.
    pub fn solve(&self, max_pushes: usize) -> Option<String> {
        let board = Board::new(&self.grid);

        let mut crates = self.crate_positions();
        crates.sort();
        if board.is_solved(&crates) {
            return Some(String::new());
        }
        let estimate = board.estimate(&crates)?;

        let mut nodes = vec![Node {
            worker: self.worker_position(),
            crates,
            pushes: 0,
            parent: None,
            push: None,
        }];
        let mut queue = BinaryHeap::new();
        queue.push(Reverse((2 * estimate, 0)));
        let mut visited = HashSet::new();

        while let Some(Reverse((_, id))) = queue.pop() {
            let occupied: HashSet<Position> = nodes[id].crates.iter().cloned().collect();
            let reach = board.reachable(nodes[id].worker, &occupied);
            if !visited.insert((reach.region(), nodes[id].crates.clone())) {
                continue;
            }
            if nodes[id].pushes >= max_pushes {
                continue;
            }

            for i in 0..nodes[id].crates.len() {
                let from = nodes[id].crates[i];
                for &dir in &DIRECTIONS {
                    let to = from.neighbour(dir);
                    if !reach.contains(from.neighbour(dir.reverse()))
                        || occupied.contains(&to)
                        || board.distance(to).is_none()
                    {
                        continue;
                    }

                    let mut crates = nodes[id].crates.clone();
                    crates[i] = to;
                    crates.sort();
                    let solved = board.is_solved(&crates);
                    let estimate = match board.estimate(&crates) {
                        Some(estimate) => estimate,
                        None => continue,
                    };

                    let pushes = nodes[id].pushes + 1;
                    nodes.push(Node {
                        worker: from,
                        crates,
                        pushes,
                        parent: Some(id),
                        push: Some((from, dir)),
                    });

                    if solved {
                        info!(
                            "Found a solution with {} pushes after {} states",
                            pushes,
                            visited.len()
                        );
                        return Some(self.solution_string(&board, &nodes, nodes.len() - 1));
                    }
                    queue.push(Reverse((pushes + 2 * estimate, nodes.len() - 1)));
                }
            }
        }

        debug!(
            "No solution within {} pushes, searched {} states",
            max_pushes,
            visited.len()
        );
        None
    }

    /// Turn the pushes leading to `id` into moves, walking the worker to each crate.
    fn solution_string(&self, board: &Board<'_>, nodes: &[Node], id: usize) -> String {
        let mut pushes = vec![];
        let mut current = Some(id);
        while let Some(id) = current {
            pushes.extend(nodes[id].push);
            current = nodes[id].parent;
        }
        pushes.reverse();

        let mut result = String::new();
        let mut worker = self.worker_position();
        let mut crates: HashSet<Position> = self.crate_positions().into_iter().collect();
        for (from, dir) in pushes {
            let reach = board.reachable(worker, &crates);
            for step in reach.path_to(from.neighbour(dir.reverse())) {
                result.push(step.to_char().to_ascii_lowercase());
            }
            result.push(dir.to_char());

            crates.remove(&from);
            crates.insert(from.neighbour(dir));
            worker = from;
        }
        result
    }
}
