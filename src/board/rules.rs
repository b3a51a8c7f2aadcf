//! Move validation, capture resolution and win detection.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use super::piece::{CaptureFlags, Owner, Piece};
use super::position::{Direction, Position};
use super::state::Board;
use crate::core::Side;

/// Destinations reachable by one piece.
pub type MoveList = SmallVec<[Position; 20]>;

/// What a successful move did to the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub from: Position,
    pub to: Position,

    /// Enemy pieces removed by custodian or shield-wall capture.
    pub captured: SmallVec<[Position; 4]>,

    /// Corner or throne marker the king took over, if any.
    pub removed_structure: Option<Position>,
}

/// An edge line for shield-wall scans: its squares in order and the
/// direction pointing into the board.
struct EdgeLine {
    cells: Vec<Position>,
    inward: Direction,
}

impl Board {
    /// Whether the side to move may slide the piece on `from` to `to`.
    ///
    /// Pieces slide orthogonally over empty squares. The king may also
    /// cross a throne and land on a corner or throne marker.
    #[must_use]
    pub fn is_legal_move(&self, from: Position, to: Position) -> bool {
        if !self.in_bounds(from) || !self.in_bounds(to) {
            return false;
        }
        let Some(piece) = self.get_piece(from) else {
            return false;
        };
        if piece.owner.side() != Some(self.turn()) {
            return false;
        }
        let Some(dir) = Direction::between(from, to) else {
            return false;
        };

        let mut cur = from;
        loop {
            let Some(next) = cur.step(dir, self.rows(), self.cols()) else {
                return false;
            };
            let occupant = self.get_piece(next);
            if next == to {
                return match occupant {
                    None => true,
                    Some(target) => piece.is_king && target.is_neutral(),
                };
            }
            match occupant {
                None => {}
                Some(blocker) if piece.is_king && blocker.is_throne => {}
                Some(_) => return false,
            }
            cur = next;
        }
    }

    /// Move a piece, resolving captures and passing the turn.
    ///
    /// Returns `false` and leaves the board untouched if the move is
    /// illegal.
    pub fn move_piece(&mut self, from: Position, to: Position) -> bool {
        self.try_move(from, to).is_some()
    }

    /// Like [`Board::move_piece`], reporting what the move changed.
    pub fn try_move(&mut self, from: Position, to: Position) -> Option<MoveOutcome> {
        if !self.is_legal_move(from, to) {
            trace!(%from, %to, turn = %self.turn(), "illegal move rejected");
            return None;
        }

        let mut piece = self.remove_at(from)?;

        let mut removed_structure = None;
        let mut landed_on_throne = false;
        if let Some(target) = self.get_piece(to).copied() {
            // Only the king reaches an occupied square: a corner or throne.
            landed_on_throne = target.is_throne;
            self.remove_at(to);
            removed_structure = Some(to);
        }

        let leaves_throne =
            piece.is_king && self.king_on_throne && self.ruleset().leave_throne;
        if piece.is_king {
            self.king_on_throne = landed_on_throne;
        }

        piece.row = to.row;
        piece.col = to.col;
        self.place(piece);
        if leaves_throne {
            self.place(Piece::throne(from));
        }

        let mut captured = self.custodian_captures(to);
        for &pos in &captured {
            self.remove_at(pos);
        }

        if self.ruleset().shield_wall {
            for pos in self.shield_wall_captures(to) {
                if self.remove_at(pos).is_some() {
                    captured.push(pos);
                }
            }
        }

        if !captured.is_empty() {
            trace!(%from, %to, captured = captured.len(), "captures resolved");
        }

        self.set_turn(self.turn().opponent());

        Some(MoveOutcome {
            from,
            to,
            captured,
            removed_structure,
        })
    }

    /// Legal destinations for the piece on `from`, ignoring whose turn it is.
    #[must_use]
    pub fn get_valid_moves(&self, from: Position) -> MoveList {
        let mut moves = MoveList::new();
        let Some(piece) = self.get_piece(from) else {
            return moves;
        };
        if piece.is_neutral() {
            return moves;
        }

        for dir in Direction::ALL {
            let mut cur = from;
            while let Some(next) = cur.step(dir, self.rows(), self.cols()) {
                match self.get_piece(next) {
                    None => moves.push(next),
                    Some(target) if piece.is_king && target.is_neutral() => {
                        moves.push(next);
                        if !target.is_throne {
                            break;
                        }
                    }
                    Some(_) => break,
                }
                cur = next;
            }
        }
        moves
    }

    /// Destinations for the piece at (row, col), or `None` if the square is
    /// empty or off the board.
    #[must_use]
    pub fn select_piece(&self, row: usize, col: usize) -> Option<Vec<Position>> {
        let pos = Position::new(row, col);
        self.get_piece(pos)?;
        Some(self.get_valid_moves(pos).into_vec())
    }

    /// Whether `side` has any legal move.
    #[must_use]
    pub fn has_legal_move(&self, side: Side) -> bool {
        let owner = Owner::from(side);
        self.pieces()
            .filter(|p| p.owner == owner)
            .any(|p| !self.get_valid_moves(p.position()).is_empty())
    }

    /// Which sides of the piece on `pos` face a hostile neighbor. Board
    /// edges never count as hostile.
    #[must_use]
    pub fn capture_flags(&self, pos: Position) -> CaptureFlags {
        let mut flags = CaptureFlags::default();
        let Some(piece) = self.get_piece(pos) else {
            return flags;
        };
        for dir in Direction::ALL {
            let hostile = pos
                .step(dir, self.rows(), self.cols())
                .and_then(|n| self.get_piece(n))
                .is_some_and(|n| n.is_hostile_to(piece));
            match dir {
                Direction::North => flags.north = hostile,
                Direction::South => flags.south = hostile,
                Direction::East => flags.east = hostile,
                Direction::West => flags.west = hostile,
            }
        }
        flags
    }

    /// Enemy neighbors of the mover that are now flanked.
    ///
    /// A soldier falls only when the mover closes the flank, i.e. the square
    /// beyond it on the mover's axis is hostile; a sandwich that already
    /// existed does not trigger. The king must be hostile on all four sides.
    fn custodian_captures(&self, mover: Position) -> SmallVec<[Position; 4]> {
        let Some(side) = self.get_piece(mover).and_then(|p| p.owner.side()) else {
            return SmallVec::new();
        };
        let enemy = Owner::from(side.opponent());
        let (rows, cols) = (self.rows(), self.cols());

        Direction::ALL
            .iter()
            .filter_map(|&dir| {
                let target = mover.step(dir, rows, cols)?;
                let piece = self.get_piece(target)?;
                if piece.owner != enemy {
                    return None;
                }
                let captured = if piece.is_king {
                    self.capture_flags(target).is_captured(true)
                } else {
                    target
                        .step(dir, rows, cols)
                        .and_then(|far| self.get_piece(far))
                        .is_some_and(|far| far.is_hostile_to(piece))
                };
                captured.then_some(target)
            })
            .collect()
    }

    /// Edge lines close enough to the mover to take part in a shield wall.
    fn edge_lines_near(&self, mover: Position) -> SmallVec<[EdgeLine; 2]> {
        let (rows, cols) = (self.rows(), self.cols());
        let mut lines = SmallVec::new();
        if rows < 2 || cols < 2 {
            return lines;
        }
        let row_line = |row: usize| (0..cols).map(|c| Position::new(row, c)).collect();
        let col_line = |col: usize| (0..rows).map(|r| Position::new(r, col)).collect();

        if mover.row <= 1 {
            lines.push(EdgeLine { cells: row_line(0), inward: Direction::South });
        }
        if mover.row + 2 >= rows {
            lines.push(EdgeLine { cells: row_line(rows - 1), inward: Direction::North });
        }
        if mover.col <= 1 {
            lines.push(EdgeLine { cells: col_line(0), inward: Direction::East });
        }
        if mover.col + 2 >= cols {
            lines.push(EdgeLine { cells: col_line(cols - 1), inward: Direction::West });
        }
        lines
    }

    /// Enemy soldiers captured by a shield wall the mover just closed.
    ///
    /// A wall is a run of two or more adjacent enemy pieces along an edge
    /// where every piece is pinned from the inside by the mover's side, and
    /// both ends of the run are closed by the mover's side, a neutral
    /// marker, or the end of the line. The mover must be one of the closing
    /// or pinning pieces. The king may form part of the run but is never
    /// removed this way.
    fn shield_wall_captures(&self, mover: Position) -> Vec<Position> {
        let Some(side) = self.get_piece(mover).and_then(|p| p.owner.side()) else {
            return Vec::new();
        };
        let own = Owner::from(side);
        let enemy = Owner::from(side.opponent());

        let is_enemy = |pos: Position| self.get_piece(pos).is_some_and(|p| p.owner == enemy);
        let closes = |pos: Option<&Position>| match pos {
            None => true,
            Some(&p) => self.get_piece(p).is_some_and(|q| q.owner == own || q.is_neutral()),
        };

        let mut taken: FxHashSet<Position> = FxHashSet::default();
        for line in self.edge_lines_near(mover) {
            let cells = &line.cells;
            let mut start = 0;
            while start < cells.len() {
                if !is_enemy(cells[start]) {
                    start += 1;
                    continue;
                }
                let mut end = start;
                while end < cells.len() && is_enemy(cells[end]) {
                    end += 1;
                }
                let run = &cells[start..end];

                let pins: Option<Vec<Position>> = run
                    .iter()
                    .map(|pos| {
                        pos.step(line.inward, self.rows(), self.cols())
                            .filter(|&inner| self.get_piece(inner).is_some_and(|p| p.owner == own))
                    })
                    .collect();

                let before = start.checked_sub(1).and_then(|i| cells.get(i));
                let after = cells.get(end);

                if let Some(pins) = pins {
                    let involved = pins.contains(&mover)
                        || before == Some(&mover)
                        || after == Some(&mover);
                    if run.len() >= 2 && involved && closes(before) && closes(after) {
                        taken.extend(
                            run.iter()
                                .copied()
                                .filter(|&pos| self.get_piece(pos).is_some_and(|p| !p.is_king)),
                        );
                    }
                }
                start = end;
            }
        }

        let mut taken: Vec<Position> = taken.into_iter().collect();
        taken.sort();
        taken
    }

    /// Whether the king sits in an edge fort: the region it can reach over
    /// empty squares touches no attacker, the king can still move, and every
    /// defender walling the region is safe from capture along both axes.
    #[must_use]
    pub fn is_fort(&self) -> bool {
        let Some(king) = self.king_position() else {
            return false;
        };
        if !self.is_edge(king) {
            return false;
        }

        let mut region: FxHashSet<Position> = FxHashSet::default();
        let mut walls: FxHashSet<Position> = FxHashSet::default();
        let mut frontier = vec![king];
        region.insert(king);

        while let Some(pos) = frontier.pop() {
            for dir in Direction::ALL {
                let Some(next) = pos.step(dir, self.rows(), self.cols()) else {
                    continue;
                };
                if region.contains(&next) {
                    continue;
                }
                match self.get_piece(next).map(|p| p.owner) {
                    None => {
                        if region.insert(next) {
                            frontier.push(next);
                        }
                    }
                    Some(Owner::Attacker) => return false,
                    Some(Owner::Defender) => {
                        walls.insert(next);
                    }
                    Some(Owner::Neutral) => {}
                }
            }
        }

        if self.get_valid_moves(king).is_empty() {
            return false;
        }

        walls.iter().all(|&wall| self.is_wall_secure(wall, &region))
    }

    /// A wall defender is secure if, on each axis, at least one neighbor is
    /// off the board, inside the fort, or another defender.
    fn is_wall_secure(&self, wall: Position, region: &FxHashSet<Position>) -> bool {
        let safe_side = |dir: Direction| match wall.step(dir, self.rows(), self.cols()) {
            None => true,
            Some(n) => {
                region.contains(&n)
                    || self.get_piece(n).is_some_and(|p| p.owner == Owner::Defender)
            }
        };
        (safe_side(Direction::North) || safe_side(Direction::South))
            && (safe_side(Direction::East) || safe_side(Direction::West))
    }

    /// The winner, if the game is over.
    ///
    /// Checked in order: king gone (attackers), king on a corner, too few
    /// attackers, edge fort (defenders), then a side to move without a
    /// legal move loses.
    #[must_use]
    pub fn check_for_winner(&self) -> Option<Side> {
        let Some(king) = self.king_position() else {
            return Some(Side::Attacker);
        };
        if self.is_corner(king) {
            return Some(Side::Defender);
        }
        if self.count(Owner::Attacker) < self.ruleset().min_attackers {
            return Some(Side::Defender);
        }
        if self.ruleset().fort_victory && self.is_fort() {
            return Some(Side::Defender);
        }
        if self.ruleset().stalemate_loses && !self.has_legal_move(self.turn()) {
            return Some(self.turn().opponent());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ruleset::Ruleset;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_sandwich_capture() {
        let mut board = Board::from_template(&[[0u8, 1, 0], [0, 0, 0], [0, 2, 3], [0, 1, 0]]);
        assert!(board.move_piece(pos(0, 1), pos(1, 1)));
        assert_eq!(board.count(Owner::Defender), 1);
        assert!(board.get_piece(pos(2, 1)).is_none());
    }

    #[test]
    fn test_double_capture() {
        let mut board =
            Board::from_template(&[[0u8, 1, 0], [0, 2, 0], [1, 0, 3], [0, 2, 0], [0, 1, 0]]);
        let outcome = board.try_move(pos(2, 0), pos(2, 1)).unwrap();
        assert_eq!(outcome.captured.len(), 2);
        assert_eq!(board.count(Owner::Defender), 1);
    }

    #[test]
    fn test_single_flank_is_not_a_capture() {
        let mut board = Board::from_template(&[[0u8, 1, 0], [0, 2, 0], [1, 1, 3], [0, 0, 0]]);
        let outcome = board.try_move(pos(2, 0), pos(1, 0)).unwrap();
        assert!(outcome.captured.is_empty());
        assert_eq!(board.count(Owner::Defender), 2);
    }

    #[test]
    fn test_mover_is_never_captured_by_its_own_move() {
        let mut board = Board::from_template(&[[0u8, 2, 0], [1, 0, 0], [0, 2, 3]]);
        assert!(board.move_piece(pos(1, 0), pos(1, 1)));
        assert!(board.get_piece(pos(1, 1)).is_some());
    }

    #[test]
    fn test_corner_is_hostile() {
        // Defender beside a corner is taken by one attacker on the far side.
        let mut board = Board::from_template(&[[4u8, 2, 0, 0], [0, 0, 0, 1], [0, 0, 0, 0], [3, 0, 0, 0]])
            .with_ruleset(Ruleset::basic().with_min_attackers(0));
        assert!(board.move_piece(pos(1, 3), pos(0, 3)));
        assert!(board.get_piece(pos(0, 1)).is_some());
        assert!(board.move_piece(pos(3, 0), pos(3, 1)));
        assert!(board.move_piece(pos(0, 3), pos(0, 2)));
        assert!(board.get_piece(pos(0, 1)).is_none());
    }

    #[test]
    fn test_king_needs_four_sides() {
        let mut board = Board::from_template(&[[0u8, 0, 0], [1, 0, 0], [1, 3, 1], [0, 1, 0]]);
        assert!(!board.capture_flags(pos(2, 1)).is_captured(true));
        assert!(board.move_piece(pos(1, 0), pos(1, 1)));
        assert!(board.king().is_none());
        assert_eq!(board.check_for_winner(), Some(Side::Attacker));
    }

    #[test]
    fn test_king_flanked_on_two_sides_survives() {
        let mut board = Board::from_template(&[[0u8, 1, 0], [0, 0, 0], [0, 3, 0], [0, 1, 0]])
            .with_ruleset(Ruleset::basic().with_min_attackers(0));
        assert!(board.move_piece(pos(0, 1), pos(1, 1)));
        assert!(board.king().is_some());
    }

    #[test]
    fn test_king_escape_to_corner() {
        let mut board = Board::from_template_with_turn(
            &[[0u8, 0, 0], [1, 0, 0], [1, 0, 3], [0, 1, 0]],
            Side::Defender,
        )
        .with_ruleset(Ruleset::default().with_min_attackers(0));
        assert!(board.move_piece(pos(2, 2), pos(0, 2)));
        assert_eq!(board.check_for_winner(), Some(Side::Defender));
    }

    #[test]
    fn test_king_takes_corner_marker() {
        let mut board = Board::from_template_with_turn(&[[4u8, 0, 3], [0, 0, 0], [1, 0, 1]], Side::Defender)
            .with_ruleset(Ruleset::basic().with_min_attackers(0));
        let outcome = board.try_move(pos(0, 2), pos(0, 0)).unwrap();
        assert_eq!(outcome.removed_structure, Some(pos(0, 0)));
        assert!(board.get_piece(pos(0, 0)).is_some_and(|p| p.is_king));
        assert_eq!(board.check_for_winner(), Some(Side::Defender));
    }

    #[test]
    fn test_soldiers_cannot_enter_corners_or_thrones() {
        let board = Board::from_template(&[[4u8, 0, 1], [5, 0, 0], [1, 0, 3]]);
        assert!(!board.is_legal_move(pos(0, 2), pos(0, 0)));
        assert!(!board.is_legal_move(pos(2, 0), pos(1, 0)));
        assert!(!board.is_legal_move(pos(2, 0), pos(0, 0)));
    }

    #[test]
    fn test_invalid_moves_are_rejected() {
        let template = [
            [0u8, 0, 0],
            [0, 1, 0],
            [0, 0, 0],
            [2, 5, 0],
            [0, 0, 0],
            [0, 1, 1],
            [0, 0, 3],
        ];
        let mut board = Board::from_template(&template);
        let before = board.to_flat_array();

        assert!(!board.move_piece(pos(1, 1), pos(1, 1)), "onto itself");
        assert!(!board.move_piece(pos(1, 1), pos(1, 3)), "out of bounds");
        assert!(!board.move_piece(pos(1, 1), pos(2, 2)), "diagonal");
        assert!(!board.move_piece(pos(5, 1), pos(5, 2)), "onto a piece");
        assert!(!board.move_piece(pos(1, 1), pos(4, 1)), "through a throne");
        assert!(!board.move_piece(pos(1, 1), pos(3, 1)), "onto a throne");
        assert!(!board.move_piece(pos(3, 0), pos(2, 0)), "defender on attacker turn");
        assert!(!board.move_piece(pos(0, 0), pos(0, 1)), "empty square");

        assert_eq!(board.to_flat_array(), before);
        assert_eq!(board.turn(), Side::Attacker);

        assert!(board.move_piece(pos(5, 1), pos(5, 0)));
        assert_ne!(board.to_flat_array(), before);
        assert_eq!(board.turn(), Side::Defender);
    }

    #[test]
    fn test_no_recapture_after_capture() {
        let mut board = Board::from_template(&[[0u8, 1, 2, 0], [0, 0, 0, 0], [0, 2, 3, 2], [0, 1, 0, 0]])
            .with_ruleset(Ruleset::basic().with_min_attackers(0));
        let defenders = board.count(Owner::Defender);
        assert!(board.move_piece(pos(0, 1), pos(1, 1)));
        assert_eq!(board.count(Owner::Defender), defenders - 1);

        let attackers = board.count(Owner::Attacker);
        assert!(board.move_piece(pos(0, 2), pos(0, 1)));
        assert_eq!(board.count(Owner::Attacker), attackers);
    }

    #[test]
    fn test_turn_alternates() {
        let mut board = Board::new();
        assert_eq!(board.turn(), Side::Attacker);
        assert!(board.move_piece(pos(0, 3), pos(2, 3)));
        assert_eq!(board.turn(), Side::Defender);
        // Same piece cannot move twice in a row
        assert!(!board.move_piece(pos(2, 3), pos(2, 2)));
        assert_eq!(board.turn(), Side::Defender);
    }

    #[test]
    fn test_king_leaves_throne_behind() {
        let mut board = Board::from_template_with_turn(
            &[[0u8, 0, 0, 0, 0], [0, 0, 0, 0, 0], [0, 0, 3, 0, 0], [1, 1, 1, 1, 0]],
            Side::Defender,
        );
        assert!(board.move_piece(pos(2, 2), pos(2, 4)));
        assert!(board.get_piece(pos(2, 2)).is_some_and(|p| p.is_throne));
        assert_eq!(board.code_at(pos(2, 2)), 5);

        // The king may cross the throne; soldiers may not.
        let moves = board.get_valid_moves(pos(2, 4));
        assert!(moves.contains(&pos(2, 2)));
        assert!(moves.contains(&pos(2, 0)));
        assert!(!board.get_valid_moves(pos(3, 2)).contains(&pos(1, 2)));
    }

    #[test]
    fn test_throne_marker_can_be_disabled() {
        let mut board = Board::from_template_with_turn(
            &[[0u8, 0, 0], [0, 3, 0], [1, 1, 1], [1, 0, 0]],
            Side::Defender,
        )
        .with_ruleset(Ruleset::basic());
        assert!(board.move_piece(pos(1, 1), pos(1, 2)));
        assert!(board.get_piece(pos(1, 1)).is_none());
    }

    #[test]
    fn test_shield_wall_capture() {
        let template = [
            [0u8, 0, 3, 0],
            [1, 0, 1, 0],
            [1, 0, 1, 2],
            [0, 0, 1, 2],
            [1, 0, 0, 1],
            [0, 0, 1, 0],
        ];
        let mut board = Board::from_template(&template);
        assert_eq!(board.count(Owner::Defender), 3);
        let outcome = board.try_move(pos(1, 2), pos(1, 3)).unwrap();
        assert_eq!(outcome.captured.len(), 2);
        assert_eq!(board.count(Owner::Defender), 1);
    }

    #[test]
    fn test_shield_wall_needs_full_pin() {
        let template = [
            [0u8, 0, 3, 0],
            [1, 0, 1, 0],
            [1, 0, 1, 2],
            [0, 0, 0, 2],
            [1, 0, 0, 1],
            [0, 0, 1, 0],
        ];
        let mut board = Board::from_template(&template);
        let outcome = board.try_move(pos(1, 2), pos(1, 3)).unwrap();
        assert!(outcome.captured.is_empty());
        assert_eq!(board.count(Owner::Defender), 3);
    }

    #[test]
    fn test_shield_wall_can_be_disabled() {
        let template = [
            [0u8, 0, 3, 0],
            [1, 0, 1, 0],
            [1, 0, 1, 2],
            [0, 0, 1, 2],
            [1, 0, 0, 1],
            [0, 0, 1, 0],
        ];
        let mut board =
            Board::from_template(&template).with_ruleset(Ruleset::default().with_shield_wall(false));
        assert!(board.move_piece(pos(1, 2), pos(1, 3)));
        assert_eq!(board.count(Owner::Defender), 3);
    }

    #[test]
    fn test_fort_victory() {
        let template = [
            [0u8, 0, 0],
            [1, 2, 0],
            [1, 2, 3],
            [0, 2, 0],
            [1, 0, 2],
            [0, 1, 0],
        ];
        let mut board = Board::from_template_with_turn(&template, Side::Defender);
        assert_eq!(board.check_for_winner(), None);
        assert!(board.move_piece(pos(1, 1), pos(1, 2)));
        assert!(board.is_fort());
        assert_eq!(board.check_for_winner(), Some(Side::Defender));
    }

    #[test]
    fn test_fort_victory_can_be_disabled() {
        let template = [
            [0u8, 0, 0],
            [1, 2, 0],
            [1, 2, 3],
            [0, 2, 0],
            [1, 0, 2],
            [0, 1, 0],
        ];
        let mut board = Board::from_template_with_turn(&template, Side::Defender)
            .with_ruleset(Ruleset::default().with_fort_victory(false));
        assert!(board.move_piece(pos(1, 1), pos(1, 2)));
        assert_eq!(board.check_for_winner(), None);
    }

    #[test]
    fn test_too_few_attackers() {
        let board = Board::from_template(&[[1u8, 0, 0], [0, 3, 0], [1, 0, 1]]);
        assert_eq!(board.check_for_winner(), Some(Side::Defender));
    }

    #[test]
    fn test_stalemate_loses() {
        // The lone attacker is boxed in by the board edge and defenders.
        let template = [[1u8, 2, 0], [2, 0, 3], [0, 0, 0]];
        let rules = Ruleset::basic().with_min_attackers(0);
        let board = Board::from_template(&template).with_ruleset(rules.clone());
        assert!(!board.has_legal_move(Side::Attacker));
        assert_eq!(board.check_for_winner(), Some(Side::Defender));

        let lenient = Board::from_template(&template).with_ruleset(rules.with_stalemate_loses(false));
        assert_eq!(lenient.check_for_winner(), None);
    }

    #[test]
    fn test_select_piece() {
        let board = Board::new();
        assert!(board.select_piece(2, 2).is_none());
        let moves = board.select_piece(0, 3).unwrap();
        // Slides down column 3 until the defender on row 5
        assert!(moves.contains(&pos(1, 3)));
        assert!(moves.contains(&pos(4, 3)));
        assert!(!moves.contains(&pos(5, 3)));
        // Corner marker blocks sideways travel
        assert!(moves.contains(&pos(0, 1)));
        assert!(!moves.contains(&pos(0, 0)));
    }
}
