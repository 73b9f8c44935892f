//! Piece alphabet and movement delta tables.
//!
//! Pieces are tagged by a single byte glyph; there is no piece hierarchy.
//! Movement is a lookup into fixed per-glyph delta tables. Every delta is a
//! single step (the board is 4×4, nothing slides), and knights *walk* an L
//! through an empty orthogonally adjacent square rather than jumping.

/// The empty-square glyph.
pub const EMPTY: u8 = b' ';

/// Every glyph a board cell may hold.
pub const ALPHABET: &[u8] = b" PRNBKXprnbkx";

/// Number of captured-pool slots per side, in the fixed order `R B N P`.
pub const POOL_SLOTS: usize = 4;

/// Pool slot holding captured pawns (the only slot with a drop restriction).
pub const PAWN_SLOT: usize = 3;

/// The two players. Side 0 owns the uppercase glyphs, side 1 the lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Upper,
    Lower,
}

impl Side {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Upper => 0,
            Side::Lower => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Upper => Side::Lower,
            Side::Lower => Side::Upper,
        }
    }

    /// The rank this side's pawns promote on (and may not drop onto).
    #[inline]
    pub fn far_row(self) -> usize {
        match self {
            Side::Upper => 0,
            Side::Lower => 3,
        }
    }
}

/// The side owning `glyph`, or `None` for the empty square.
#[inline]
pub fn side_of(glyph: u8) -> Option<Side> {
    match glyph {
        b'P' | b'R' | b'N' | b'B' | b'K' | b'X' => Some(Side::Upper),
        b'p' | b'r' | b'n' | b'b' | b'k' | b'x' => Some(Side::Lower),
        _ => None,
    }
}

#[inline]
pub fn is_king(glyph: u8) -> bool {
    glyph == b'K' || glyph == b'k'
}

#[inline]
pub fn pawn_of(side: Side) -> u8 {
    match side {
        Side::Upper => b'P',
        Side::Lower => b'p',
    }
}

/// Pool slot for a captured `glyph`, in the fixed order `R B N P`.
///
/// Kings and obstacles have no slot: capturing an obstacle does not feed the
/// pool, and a king capture ends the branch before any pool bookkeeping.
#[inline]
pub fn pool_slot(glyph: u8) -> Option<usize> {
    match glyph {
        b'R' | b'r' => Some(0),
        b'B' | b'b' => Some(1),
        b'N' | b'n' => Some(2),
        b'P' | b'p' => Some(3),
        _ => None,
    }
}

/// The glyph placed on the board when `side` drops from pool slot `slot`.
#[inline]
pub fn drop_glyph(side: Side, slot: usize) -> u8 {
    const UPPER: [u8; POOL_SLOTS] = *b"RBNP";
    const LOWER: [u8; POOL_SLOTS] = *b"rbnp";
    match side {
        Side::Upper => UPPER[slot],
        Side::Lower => LOWER[slot],
    }
}

/// The glyph substituted for a promoting pawn. `choice` is 1, 2, or 3 and
/// selects R, B, or N in the side-appropriate case.
#[inline]
pub fn promotion_glyph(side: Side, choice: u8) -> u8 {
    const UPPER: [u8; 3] = *b"RBN";
    const LOWER: [u8; 3] = *b"rbn";
    match side {
        Side::Upper => UPPER[choice as usize - 1],
        Side::Lower => LOWER[choice as usize - 1],
    }
}

/// Landing constraint attached to a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingKind {
    /// Land on an empty or enemy square.
    Default,
    /// Land on an empty square only (pawn advance).
    EmptyOnly,
    /// Land on an enemy square only (pawn capture).
    EnemyOnly,
    /// `Default`, plus the intermediate square at `via` must be empty.
    OtherEmpty,
}

/// One movement step of a piece.
#[derive(Debug, Clone, Copy)]
pub struct Delta {
    pub dr: i8,
    pub dc: i8,
    pub kind: LandingKind,
    /// Intermediate-square offset, meaningful only for [`LandingKind::OtherEmpty`].
    pub via: (i8, i8),
}

const fn step(dr: i8, dc: i8) -> Delta {
    Delta {
        dr,
        dc,
        kind: LandingKind::Default,
        via: (0, 0),
    }
}

const fn pawn(dr: i8, dc: i8, kind: LandingKind) -> Delta {
    Delta {
        dr,
        dc,
        kind,
        via: (0, 0),
    }
}

const fn walk(dr: i8, dc: i8, vr: i8, vc: i8) -> Delta {
    Delta {
        dr,
        dc,
        kind: LandingKind::OtherEmpty,
        via: (vr, vc),
    }
}

pub const UPPER_PAWN_DELTAS: [Delta; 3] = [
    pawn(-1, 0, LandingKind::EmptyOnly),
    pawn(-1, -1, LandingKind::EnemyOnly),
    pawn(-1, 1, LandingKind::EnemyOnly),
];

pub const LOWER_PAWN_DELTAS: [Delta; 3] = [
    pawn(1, 0, LandingKind::EmptyOnly),
    pawn(1, -1, LandingKind::EnemyOnly),
    pawn(1, 1, LandingKind::EnemyOnly),
];

pub const ROOK_DELTAS: [Delta; 4] = [step(-1, 0), step(1, 0), step(0, -1), step(0, 1)];

pub const BISHOP_DELTAS: [Delta; 4] = [step(-1, -1), step(1, 1), step(1, -1), step(-1, 1)];

pub const KING_DELTAS: [Delta; 8] = [
    step(-1, 0),
    step(1, 0),
    step(0, -1),
    step(0, 1),
    step(-1, -1),
    step(1, 1),
    step(1, -1),
    step(-1, 1),
];

pub const KNIGHT_DELTAS: [Delta; 8] = [
    walk(-2, -1, -1, 0),
    walk(-2, 1, -1, 0),
    walk(-1, -2, 0, -1),
    walk(1, -2, 0, -1),
    walk(2, -1, 1, 0),
    walk(2, 1, 1, 0),
    walk(-1, 2, 0, 1),
    walk(1, 2, 0, 1),
];

/// The delta table of `glyph`. Obstacles and the empty square have none.
#[inline]
pub fn deltas(glyph: u8) -> &'static [Delta] {
    match glyph {
        b'P' => &UPPER_PAWN_DELTAS,
        b'p' => &LOWER_PAWN_DELTAS,
        b'R' | b'r' => &ROOK_DELTAS,
        b'B' | b'b' => &BISHOP_DELTAS,
        b'K' | b'k' => &KING_DELTAS,
        b'N' | b'n' => &KNIGHT_DELTAS,
        _ => &[],
    }
}
