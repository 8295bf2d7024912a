use crate::logic::board::PieceKind;
use crate::logic::eval_constants::{
    VAL_BISHOP, VAL_KING, VAL_KNIGHT, VAL_PAWN, VAL_QUEEN, VAL_ROOK,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub val_pawn: i32,
    pub val_knight: i32,
    pub val_bishop: i32,
    pub val_rook: i32,
    pub val_queen: i32,
    pub val_king: i32,

    // Terminal scores, charged against the side with no legal move
    pub mate_score: i32,
    pub stalemate_score: i32,

    // Move ordering
    pub score_capture_base: i32,
    pub score_check: i32,

    pub default_depth: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            val_pawn: VAL_PAWN,
            val_knight: VAL_KNIGHT,
            val_bishop: VAL_BISHOP,
            val_rook: VAL_ROOK,
            val_queen: VAL_QUEEN,
            val_king: VAL_KING,

            mate_score: 2000,
            stalemate_score: 200,

            score_capture_base: 900_000,
            score_check: 500_000,

            default_depth: 3,
        }
    }
}

#[derive(Deserialize)]
struct EngineConfigJson {
    val_pawn: Option<f32>,
    val_knight: Option<f32>,
    val_bishop: Option<f32>,
    val_rook: Option<f32>,
    val_queen: Option<f32>,
    val_king: Option<f32>,

    mate_score: Option<i32>,
    stalemate_score: Option<i32>,

    score_capture_base: Option<f32>,
    score_check: Option<f32>,

    default_depth: Option<u8>,
}

impl EngineConfig {
    /// Piece values and ordering bonuses in `json_str` are scale factors over the defaults.
    /// Terminal scores and depth are absolute.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        Ok(Self {
            val_pawn: apply_scale(default.val_pawn, json_config.val_pawn),
            val_knight: apply_scale(default.val_knight, json_config.val_knight),
            val_bishop: apply_scale(default.val_bishop, json_config.val_bishop),
            val_rook: apply_scale(default.val_rook, json_config.val_rook),
            val_queen: apply_scale(default.val_queen, json_config.val_queen),
            val_king: apply_scale(default.val_king, json_config.val_king),

            mate_score: json_config.mate_score.unwrap_or(default.mate_score),
            stalemate_score: json_config
                .stalemate_score
                .unwrap_or(default.stalemate_score),

            score_capture_base: apply_scale(
                default.score_capture_base,
                json_config.score_capture_base,
            ),
            score_check: apply_scale(default.score_check, json_config.score_check),

            default_depth: json_config.default_depth.unwrap_or(default.default_depth),
        })
    }

    pub const fn piece_value(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::King => self.val_king,
            PieceKind::Queen => self.val_queen,
            PieceKind::Rook => self.val_rook,
            PieceKind::Bishop => self.val_bishop,
            PieceKind::Knight => self.val_knight,
            PieceKind::Pawn => self.val_pawn,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn apply_scale(default_val: i32, scale: Option<f32>) -> i32 {
    scale.map_or(default_val, |s| (default_val as f32 * s) as i32)
}
