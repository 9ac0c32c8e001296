//! Line protocol spoken with the external game manager.
//!
//! ```text
//! engine  -> "Othello AI"               name
//! manager -> "1,4,0,1,1"                color, depth limit, minimax?, caching, ordering
//! manager -> "SCORE 2 2"                per turn, followed by the board
//! manager -> "[[0, 0, ...], ...]"       rows of 0 (empty) / 1 (dark) / 2 (light)
//! engine  -> "2 3"                      column and row of the chosen move
//! manager -> "FINAL 33 31"              game over
//! ```

use std::io::{BufRead, Write};

use crate::ai::{Algorithm, SearchAgent, SearchConfig, SearchStats};
use crate::error::ProtocolError;
use crate::game::{Board, Color, CELLS, SIZE};

/// Settings received in the handshake line.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionParams {
    pub color: Color,
    pub config: SearchConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Score { dark: u32, light: u32 },
    Final { dark: u32, light: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub color: Color,
    pub turns: usize,
    pub final_score: (u32, u32),
    pub stats: SearchStats,
}

/// Parse `color,limit,minimax,caching,ordering`. Cache lifetime and evaluator
/// are not part of the handshake and come from `base`.
pub fn parse_handshake(line: &str, base: &SearchConfig) -> Result<SessionParams, ProtocolError> {
    let malformed = |reason: String| ProtocolError::Handshake {
        line: line.to_string(),
        reason,
    };

    let fields = line
        .split(',')
        .map(|field| {
            let field = field.trim();
            field
                .parse::<i32>()
                .map_err(|_| malformed(format!("'{field}' is not an integer")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let [color, limit, minimax, caching, ordering] = fields[..] else {
        return Err(malformed(format!("expected 5 fields, got {}", fields.len())));
    };

    let color = u8::try_from(color)
        .ok()
        .and_then(Color::from_code)
        .ok_or_else(|| malformed(format!("unknown color {color}")))?;

    let algorithm = if minimax == 1 {
        Algorithm::Minimax
    } else {
        Algorithm::AlphaBeta
    };

    Ok(SessionParams {
        color,
        config: SearchConfig {
            algorithm,
            depth_limit: limit,
            caching: caching != 0,
            ordering: ordering != 0,
            ..base.clone()
        },
    })
}

/// Parse `SCORE d l` or `FINAL d l`.
pub fn parse_status(line: &str) -> Result<Status, ProtocolError> {
    let malformed = || ProtocolError::Status(line.to_string());

    let mut parts = line.split_whitespace();
    let (Some(status), Some(dark), Some(light), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };
    let dark = dark.parse().map_err(|_| malformed())?;
    let light = light.parse().map_err(|_| malformed())?;

    match status {
        "SCORE" => Ok(Status::Score { dark, light }),
        "FINAL" => Ok(Status::Final { dark, light }),
        _ => Err(malformed()),
    }
}

/// Parse a nested list of cell codes, rows first. Brackets or parentheses
/// and any whitespace are accepted as separators.
pub fn parse_board(line: &str) -> Result<Board, ProtocolError> {
    let mut codes = Vec::with_capacity(CELLS);
    for token in line.split(|c: char| matches!(c, ',' | '[' | ']' | '(' | ')') || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        let code = token
            .parse::<u8>()
            .map_err(|_| ProtocolError::BoardSyntax(format!("unexpected token '{token}'")))?;
        codes.push(code);
    }
    Ok(Board::from_codes(&codes)?)
}

/// Render a board the way the game manager sends it.
pub fn format_board(board: &Board) -> String {
    let codes = board.to_codes();
    let rows: Vec<String> = codes
        .chunks(SIZE)
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            format!("[{}]", cells.join(", "))
        })
        .collect();
    format!("[{}]", rows.join(", "))
}

fn log_settings(params: &SessionParams) {
    let config = &params.config;
    log::info!("Playing {}", params.color.name());
    match config.algorithm {
        Algorithm::Minimax => log::info!("Running MINIMAX"),
        Algorithm::AlphaBeta => log::info!("Running ALPHA-BETA"),
    }
    log::info!(
        "State caching is {} ({:?})",
        if config.caching { "ON" } else { "OFF" },
        config.cache_policy
    );
    log::info!("Node ordering is {}", if config.ordering { "ON" } else { "OFF" });
    log::info!("Depth limit is {}", config.depth());
    if config.algorithm == Algorithm::Minimax && config.ordering {
        log::warn!("Node ordering has no effect on minimax");
    }
}

/// One game against the manager over a reader/writer pair.
pub struct Session<R, W> {
    reader: R,
    writer: W,
    name: String,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(reader: R, writer: W, name: impl Into<String>) -> Self {
        Session {
            reader,
            writer,
            name: name.into(),
        }
    }

    fn read_line(&mut self, what: &'static str) -> Result<String, ProtocolError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(ProtocolError::UnexpectedEof(what));
        }
        Ok(line.trim().to_string())
    }

    fn write_line(&mut self, line: &str) -> Result<(), ProtocolError> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Play until the manager reports `FINAL`. Handshake settings override
    /// the matching fields of `base`.
    pub fn run(&mut self, base: &SearchConfig) -> Result<SessionSummary, ProtocolError> {
        let name = self.name.clone();
        self.write_line(&name)?;

        let handshake = self.read_line("handshake")?;
        let params = parse_handshake(&handshake, base)?;
        log_settings(&params);

        let color = params.color;
        let mut agent = SearchAgent::new(params.config);
        let mut turns = 0;

        loop {
            let status = self.read_line("status")?;
            match parse_status(&status)? {
                Status::Final { dark, light } => {
                    log::info!("Game over: dark {dark}, light {light}");
                    return Ok(SessionSummary {
                        color,
                        turns,
                        final_score: (dark, light),
                        stats: agent.total_stats(),
                    });
                }
                Status::Score { dark, light } => {
                    log::debug!("Score: dark {dark}, light {light}");
                    let line = self.read_line("board")?;
                    let board = parse_board(&line)?;
                    let mv = agent
                        .select(&board, color)
                        .ok_or(ProtocolError::NoLegalMove(color))?;
                    self.write_line(&mv.to_string())?;
                    turns += 1;
                }
            }
        }
    }
}
