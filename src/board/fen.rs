use super::fen_tables::{CHAR_TO_PC, PC_TO_CHAR};
use super::{Board, CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ, Color, Piece};
use crate::square::Square;

impl Board {
    /// Parses Forsyth-Edwards Notation into `self`, replacing all state.
    ///
    /// Accepts the four mandatory fields (piece placement, side to move,
    /// castling rights, en passant target) plus the two optional trailing
    /// move counters, defaulting them to `0` and `1` when absent.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), String> {
        let mut fields = fen.split_whitespace();

        let placement = fields
            .next()
            .ok_or_else(|| "FEN missing piece placement field".to_string())?;
        let active_color = fields.next().unwrap_or("w");
        let castling = fields.next().unwrap_or("-");
        let ep = fields.next().unwrap_or("-");
        let halfmove = fields.next().unwrap_or("0");
        let fullmove = fields.next().unwrap_or("1");

        *self = Board::new_empty();

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(format!(
                "FEN piece placement must have 8 ranks, found {}",
                ranks.len()
            ));
        }

        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_from_top;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    if file > 8 {
                        return Err(format!("FEN rank '{}' overflows the board", rank_str));
                    }
                    continue;
                }

                if file >= 8 {
                    return Err(format!("FEN rank '{}' overflows the board", rank_str));
                }

                let (piece, color) = CHAR_TO_PC[c as usize]
                    .ok_or_else(|| format!("Invalid FEN piece character '{}'", c))?;
                let sq = Square::from_file_rank(file as u8, rank as u8)
                    .ok_or_else(|| format!("Invalid square at rank {} file {}", rank, file))?;
                self.place_piece_on(color, piece, sq);
                file += 1;
            }

            if file != 8 {
                return Err(format!("FEN rank '{}' does not cover 8 files", rank_str));
            }
        }

        self.side_to_move = match active_color {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(format!("Invalid FEN side to move '{}'", other)),
        };

        self.castling_rights = 0;
        if castling != "-" {
            for c in castling.chars() {
                self.castling_rights |= match c {
                    'K' => CASTLE_WK,
                    'Q' => CASTLE_WQ,
                    'k' => CASTLE_BK,
                    'q' => CASTLE_BQ,
                    other => return Err(format!("Invalid FEN castling character '{}'", other)),
                };
            }
        }

        self.en_passant = if ep == "-" {
            None
        } else {
            Some(Square::from_algebraic(ep).ok_or_else(|| format!("Invalid FEN en passant square '{}'", ep))?)
        };

        self.halfmove_clock = halfmove
            .parse()
            .map_err(|_| format!("Invalid FEN halfmove clock '{}'", halfmove))?;
        self.fullmove_number = fullmove
            .parse()
            .map_err(|_| format!("Invalid FEN fullmove number '{}'", fullmove))?;

        self.history.clear();
        self.refresh_zobrist();

        Ok(())
    }

    /// Serializes the current position back to FEN.
    pub fn to_fen(&self) -> String {
        let mut placement = String::with_capacity(64 + 8);

        for rank_from_top in 0..8 {
            let rank = 7 - rank_from_top;
            let mut empty_run = 0u8;

            for file in 0..8 {
                let sq = Square::from_file_rank(file, rank).unwrap();
                match self.piece_at(sq) {
                    Some((color, piece)) => {
                        if empty_run > 0 {
                            placement.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        placement.push(PC_TO_CHAR[pc_index(piece, color)]);
                    }
                    None => empty_run += 1,
                }
            }

            if empty_run > 0 {
                placement.push_str(&empty_run.to_string());
            }
            if rank_from_top != 7 {
                placement.push('/');
            }
        }

        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };

        let mut castling = String::new();
        if self.has_castling(CASTLE_WK) {
            castling.push('K');
        }
        if self.has_castling(CASTLE_WQ) {
            castling.push('Q');
        }
        if self.has_castling(CASTLE_BK) {
            castling.push('k');
        }
        if self.has_castling(CASTLE_BQ) {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = match self.en_passant {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!(
            "{} {} {} {} {} {}",
            placement, side, castling, ep, self.halfmove_clock, self.fullmove_number
        )
    }

    fn place_piece_on(&mut self, color: Color, piece: Piece, sq: Square) {
        let bit = 1u64 << sq.index();
        let new_bb = self.bb(color, piece) | bit;
        self.set_bb(color, piece, new_bb);
    }
}

#[inline]
const fn pc_index(piece: Piece, color: Color) -> usize {
    (color as usize) * 6 + (piece as usize)
}
