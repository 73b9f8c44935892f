//! Pseudo-move enumeration and heuristic ordering.

use crate::core::board::{Board, SIZE};
use crate::core::mv::Move;
use crate::core::piece::{self, LandingKind, Side, EMPTY, PAWN_SLOT, POOL_SLOTS};

/// Movement rule switches for the 4×4 variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rules {
    pub enable_promotion: bool,
    pub enable_drop: bool,
}

impl Rules {
    pub fn new(enable_promotion: bool, enable_drop: bool) -> Self {
        Self {
            enable_promotion,
            enable_drop,
        }
    }

    /// All pseudo-moves of `to_move` on `board`, in heuristic order:
    /// king-captures, then other captures, then drops, then quiet moves.
    pub fn moves(&self, board: &Board, to_move: Side) -> Vec<Move> {
        let mut out: Vec<Move> = Vec::with_capacity(10);

        for r in 0..SIZE {
            for c in 0..SIZE {
                if piece::side_of(board.get(r, c)) != Some(to_move) {
                    continue;
                }
                self.piece_moves(board, to_move, r, c, &mut out);
            }
        }

        if self.enable_drop {
            self.drop_moves(board, to_move, &mut out);
        }

        order_moves(&mut out);
        out
    }

    fn piece_moves(&self, board: &Board, to_move: Side, r: usize, c: usize, out: &mut Vec<Move>) {
        let glyph = board.get(r, c);
        let enemy = to_move.opponent();

        for d in piece::deltas(glyph) {
            let nr = r as i8 + d.dr;
            let nc = c as i8 + d.dc;
            if nr < 0 || nr >= SIZE as i8 || nc < 0 || nc >= SIZE as i8 {
                continue;
            }
            let (nr, nc) = (nr as usize, nc as usize);
            let target = board.get(nr, nc);

            let landing_ok = match d.kind {
                LandingKind::Default | LandingKind::OtherEmpty => {
                    target == EMPTY || piece::side_of(target) == Some(enemy)
                }
                LandingKind::EmptyOnly => target == EMPTY,
                LandingKind::EnemyOnly => piece::side_of(target) == Some(enemy),
            };
            if !landing_ok {
                continue;
            }

            if d.kind == LandingKind::OtherEmpty {
                let vr = (r as i8 + d.via.0) as usize;
                let vc = (c as i8 + d.via.1) as usize;
                if !board.is_empty(vr, vc) {
                    continue;
                }
            }

            let m = Move::new(r, c, nr, nc, piece::is_king(target), target != EMPTY);

            if self.enable_promotion && glyph == piece::pawn_of(to_move) && nr == to_move.far_row()
            {
                for choice in 1..=3 {
                    out.push(m.with_promotion(choice));
                }
            }
            out.push(m);
        }
    }

    fn drop_moves(&self, board: &Board, to_move: Side, out: &mut Vec<Move>) {
        for slot in 0..POOL_SLOTS {
            if board.pool(to_move, slot) == 0 {
                continue;
            }
            for r in 0..SIZE {
                if slot == PAWN_SLOT && r == to_move.far_row() {
                    continue;
                }
                for c in 0..SIZE {
                    if board.is_empty(r, c) {
                        out.push(Move::drop(to_move, slot, r, c));
                    }
                }
            }
        }
    }
}

/// Stable tier sort; emission order is preserved within a tier.
pub fn order_moves(moves: &mut [Move]) {
    moves.sort_by_key(|m| {
        if m.is_king_capture() {
            0u8
        } else if m.is_capture() {
            1
        } else if m.is_drop() {
            2
        } else {
            3
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        Board::parse(text).unwrap()
    }

    #[test]
    fn pawn_advances_and_captures_diagonally_forward() {
        // P at (2, 1) with enemies on both forward diagonals.
        let b = board("    ,p r , P  ,    ");
        let moves = Rules::default().moves(&b, Side::Upper);
        let dests: Vec<(usize, usize)> = moves.iter().map(|m| (m.to_row(), m.to_col())).collect();
        assert!(dests.contains(&(1, 0)), "diagonal capture of the pawn");
        assert!(dests.contains(&(1, 2)), "diagonal capture of the rook");
        assert!(dests.contains(&(1, 1)), "forward advance");
        assert_eq!(moves.len(), 3);
    }

    #[test]
    fn pawn_cannot_capture_straight_ahead() {
        let b = board("    , p  , P  ,    ");
        let moves = Rules::default().moves(&b, Side::Upper);
        assert!(moves.is_empty());
    }

    #[test]
    fn knight_walks_through_an_empty_intermediate_square() {
        let b = board("    ,    ,X   ,N   ");
        let moves = Rules::default().moves(&b, Side::Upper);
        let dests: Vec<(usize, usize)> = moves.iter().map(|m| (m.to_row(), m.to_col())).collect();
        // (1, 1) requires (2, 0) to be empty; it holds the obstacle.
        assert!(!dests.contains(&(1, 1)));
        // (2, 2) walks through (3, 1), which is empty.
        assert!(dests.contains(&(2, 2)));
    }

    #[test]
    fn king_captures_sort_before_captures_before_quiet() {
        // K at (2, 2) adjacent to both the enemy king and an enemy rook.
        let b = board("    ,  kr,  K ,    ");
        let moves = Rules::default().moves(&b, Side::Upper);
        assert!(moves[0].is_king_capture());
        assert!(moves[1].is_capture() && !moves[1].is_king_capture());
        assert!(moves.last().is_some_and(|m| !m.is_capture()));
    }

    #[test]
    fn promotion_fans_out_before_the_unpromoted_variant() {
        let b = board("    ,P   ,    ,    ");
        let moves = Rules::new(true, false).moves(&b, Side::Upper);
        assert_eq!(moves.len(), 4);
        assert_eq!(moves[0].promotion(), 1);
        assert_eq!(moves[1].promotion(), 2);
        assert_eq!(moves[2].promotion(), 3);
        assert_eq!(moves[3].promotion(), 0);
    }

    #[test]
    fn drops_cover_empty_squares_except_the_pawn_far_rank() {
        let mut b = board("    ,    ,    ,K   ");
        b.set_pool(Side::Upper, PAWN_SLOT, 1);
        let moves = Rules::new(false, true).moves(&b, Side::Upper);
        let drops: Vec<Move> = moves.into_iter().filter(|m| m.is_drop()).collect();
        // 15 empty squares, minus the 4 squares of the empty far rank.
        assert_eq!(drops.len(), 11);
        assert!(drops.iter().all(|m| m.to_row() != Side::Upper.far_row()));
    }

    #[test]
    fn drops_come_after_captures_and_before_quiet_moves() {
        let mut b = board("    ,r   ,R   ,    ");
        b.set_pool(Side::Upper, 0, 1);
        let moves = Rules::new(false, true).moves(&b, Side::Upper);
        assert!(moves[0].is_capture());
        assert!(moves[1].is_drop());
        assert!(moves.last().is_some_and(|m| !m.is_drop() && !m.is_capture()));
    }
}
