use crate::game::Board;

use super::cache::SearchResult;
use super::evaluator::{NEG_INF, POS_INF};
use super::search::Context;

/// Root color to move.
pub(crate) fn max_node(ctx: &mut Context<'_>, board: &Board, depth: u32) -> SearchResult {
    ctx.enter();
    if let Some(hit) = ctx.probe(board) {
        return hit;
    }
    expand_max(ctx, board, depth)
}

/// Opponent of the root color to move.
pub(crate) fn min_node(ctx: &mut Context<'_>, board: &Board, depth: u32) -> SearchResult {
    ctx.enter();
    if let Some(hit) = ctx.probe(board) {
        return hit;
    }
    expand_min(ctx, board, depth)
}

pub(crate) fn expand_max(ctx: &mut Context<'_>, board: &Board, depth: u32) -> SearchResult {
    let moves = board.legal_moves(ctx.root);
    if moves.is_empty() {
        return ctx.terminal(board);
    }
    if depth == 0 {
        return ctx.cutoff(board);
    }

    let mut best = SearchResult::new(None, NEG_INF);
    for mv in moves {
        let child = board.play(ctx.root, mv);
        let value = min_node(ctx, &child, depth - 1).value;
        // Strict: the first move in enumeration order wins ties
        if value > best.value {
            best = SearchResult::new(Some(mv), value);
        }
        ctx.record(child, mv, value);
    }
    best
}

fn expand_min(ctx: &mut Context<'_>, board: &Board, depth: u32) -> SearchResult {
    let opponent = ctx.root.other();
    let moves = board.legal_moves(opponent);
    if moves.is_empty() {
        return ctx.terminal(board);
    }
    if depth == 0 {
        return ctx.cutoff(board);
    }

    let mut best = SearchResult::new(None, POS_INF);
    for mv in moves {
        let child = board.play(opponent, mv);
        let value = max_node(ctx, &child, depth - 1).value;
        if value < best.value {
            best = SearchResult::new(Some(mv), value);
        }
        ctx.record(child, mv, value);
    }
    best
}
