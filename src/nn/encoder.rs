//! Board encoding for oracle input.

use std::sync::Arc;

use crate::board::piece::{ATTACKER, CORNER, DEFENDER, KING, THRONE};
use crate::board::Board;
use crate::core::Side;
use crate::nn::traits::EncodedState;

/// Turns a board into a tensor.
pub trait StateEncoder: Send + Sync {
    /// Encode the board, including whose turn it is where the format allows.
    fn encode(&self, board: &Board) -> EncodedState;

    /// Shape of encodings for a `rows` x `cols` board.
    fn output_shape(&self, rows: usize, cols: usize) -> Vec<usize>;
}

impl<E: StateEncoder + ?Sized> StateEncoder for Arc<E> {
    fn encode(&self, board: &Board) -> EncodedState {
        (**self).encode(board)
    }

    fn output_shape(&self, rows: usize, cols: usize) -> Vec<usize> {
        (**self).output_shape(rows, cols)
    }
}

/// Raw occupancy codes as floats, shape `[rows, cols]`.
///
/// This is the flat board array training records have always used; it
/// carries no turn information.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatBoardEncoder;

impl StateEncoder for FlatBoardEncoder {
    fn encode(&self, board: &Board) -> EncodedState {
        let tensor = board.grid().iter().map(|&code| f32::from(code)).collect();
        EncodedState::new(tensor, self.output_shape(board.rows(), board.cols()))
    }

    fn output_shape(&self, rows: usize, cols: usize) -> Vec<usize> {
        vec![rows, cols]
    }
}

/// One-hot planes, shape `[6, rows, cols]`:
///
/// 0. attackers
/// 1. defender soldiers
/// 2. king
/// 3. corner markers
/// 4. throne markers
/// 5. side to move (all ones when the defenders move)
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaneEncoder;

impl PlaneEncoder {
    pub const PLANES: usize = 6;

    fn plane_for(code: u8) -> Option<usize> {
        match code {
            ATTACKER => Some(0),
            DEFENDER => Some(1),
            KING => Some(2),
            CORNER => Some(3),
            THRONE => Some(4),
            _ => None,
        }
    }
}

impl StateEncoder for PlaneEncoder {
    fn encode(&self, board: &Board) -> EncodedState {
        let area = board.rows() * board.cols();
        let mut tensor = vec![0.0f32; Self::PLANES * area];

        for (i, &code) in board.grid().iter().enumerate() {
            if let Some(plane) = Self::plane_for(code) {
                tensor[plane * area + i] = 1.0;
            }
        }
        if board.turn() == Side::Defender {
            tensor[5 * area..].fill(1.0);
        }

        EncodedState::new(tensor, self.output_shape(board.rows(), board.cols()))
    }

    fn output_shape(&self, rows: usize, cols: usize) -> Vec<usize> {
        vec![Self::PLANES, rows, cols]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    #[test]
    fn test_flat_encoder_mirrors_grid() {
        let board = Board::new();
        let encoded = FlatBoardEncoder.encode(&board);
        assert_eq!(encoded.shape, vec![11, 11]);
        assert_eq!(encoded.get(0), Some(4.0));
        assert_eq!(encoded.get(5 * 11 + 5), Some(3.0));
        let expected: Vec<f32> = board.to_flat_array().into_iter().map(f32::from).collect();
        assert_eq!(encoded.tensor, expected);
    }

    #[test]
    fn test_plane_encoder_counts() {
        let board = Board::new();
        let encoded = PlaneEncoder.encode(&board);
        let area = 121;
        assert_eq!(encoded.shape, vec![6, 11, 11]);
        let plane_sum = |p: usize| encoded.tensor[p * area..(p + 1) * area].iter().sum::<f32>();
        assert_eq!(plane_sum(0), 24.0);
        assert_eq!(plane_sum(1), 12.0);
        assert_eq!(plane_sum(2), 1.0);
        assert_eq!(plane_sum(3), 4.0);
        assert_eq!(plane_sum(4), 0.0);
        assert_eq!(plane_sum(5), 0.0);
    }

    #[test]
    fn test_shared_encoder_delegates() {
        let shared: Arc<dyn StateEncoder> = Arc::new(PlaneEncoder);
        let board = Board::new();
        assert_eq!(shared.encode(&board), PlaneEncoder.encode(&board));
        assert_eq!(shared.output_shape(4, 3), vec![PlaneEncoder::PLANES, 4, 3]);
    }

    #[test]
    fn test_plane_encoder_turn_plane() {
        let mut board = Board::new();
        assert!(board.move_piece(Position::new(0, 3), Position::new(2, 3)));
        let encoded = PlaneEncoder.encode(&board);
        assert!(encoded.tensor[5 * 121..].iter().all(|&v| v == 1.0));
    }
}
