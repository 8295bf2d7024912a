use crate::logic::board::{Color, PieceKind, Square, BOARD_SIZE, NUM_SQUARES};
use crate::logic::pieces::CastleSide;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::OnceLock;

// 6 Piece Kinds * 2 Colors * 64 Squares
const NUM_PIECE_KINDS: usize = 6;
const NUM_COLORS: usize = 2;
const TABLE_SIZE: usize = NUM_PIECE_KINDS * NUM_COLORS * NUM_SQUARES;

// Fixed seed so hashes are identical across runs.
const ZOBRIST_SEED: u64 = 0x00C0_FFEE_D15C_0B0A;

pub struct ZobristKeys {
    pub piece_keys: [u64; TABLE_SIZE],
    pub side_key: u64,
    pub castle_keys: [u64; 4],
    pub en_passant_keys: [u64; BOARD_SIZE],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut piece_keys = [0; TABLE_SIZE];
        for key in &mut piece_keys {
            *key = rng.gen();
        }
        let side_key = rng.gen();
        let mut castle_keys = [0; 4];
        for key in &mut castle_keys {
            *key = rng.gen();
        }
        let mut en_passant_keys = [0; BOARD_SIZE];
        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        Self {
            piece_keys,
            side_key,
            castle_keys,
            en_passant_keys,
        }
    }

    pub fn get() -> &'static Self {
        static INSTANCE: OnceLock<ZobristKeys> = OnceLock::new();
        INSTANCE.get_or_init(ZobristKeys::new)
    }

    pub fn get_piece_key(&self, kind: PieceKind, color: Color, square: Square) -> u64 {
        // ((color * 6 + kind) * 64) + square
        let idx = (color.index() * NUM_PIECE_KINDS + kind.index()) * NUM_SQUARES + square.index();
        self.piece_keys.get(idx).copied().unwrap_or(0)
    }

    pub fn get_castle_key(&self, color: Color, side: CastleSide) -> u64 {
        let idx = color.index() * 2 + side.index();
        self.castle_keys.get(idx).copied().unwrap_or(0)
    }

    pub fn get_en_passant_key(&self, col: usize) -> u64 {
        self.en_passant_keys.get(col).copied().unwrap_or(0)
    }
}
