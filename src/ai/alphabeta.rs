use std::cmp::Reverse;

use crate::game::{Board, Move};

use super::cache::SearchResult;
use super::evaluator::{Value, NEG_INF, POS_INF};
use super::search::Context;

/// Root color to move.
pub(crate) fn max_node(
    ctx: &mut Context<'_>,
    board: &Board,
    alpha: Value,
    beta: Value,
    depth: u32,
) -> SearchResult {
    ctx.enter();
    if let Some(hit) = ctx.probe(board) {
        return hit;
    }
    expand_max(ctx, board, alpha, beta, depth)
}

/// Opponent of the root color to move.
pub(crate) fn min_node(
    ctx: &mut Context<'_>,
    board: &Board,
    alpha: Value,
    beta: Value,
    depth: u32,
) -> SearchResult {
    ctx.enter();
    if let Some(hit) = ctx.probe(board) {
        return hit;
    }
    expand_min(ctx, board, alpha, beta, depth)
}

pub(crate) fn expand_max(
    ctx: &mut Context<'_>,
    board: &Board,
    mut alpha: Value,
    beta: Value,
    depth: u32,
) -> SearchResult {
    let moves = board.legal_moves(ctx.root);
    if moves.is_empty() {
        return ctx.terminal(board);
    }
    if depth == 0 {
        return ctx.cutoff(board);
    }

    let mut children: Vec<(Move, Board)> = moves
        .into_iter()
        .map(|mv| (mv, board.play(ctx.root, mv)))
        .collect();
    if ctx.ordering {
        // Stable sort: equal utilities keep enumeration order
        let (evaluator, root) = (ctx.evaluator, ctx.root);
        children.sort_by_key(|(_, child)| Reverse(evaluator.utility(child, root)));
    }

    let mut best = SearchResult::new(None, NEG_INF);
    for (mv, child) in children {
        let value = min_node(ctx, &child, alpha, beta, depth - 1).value;
        if value > best.value {
            best = SearchResult::new(Some(mv), value);
        }
        alpha = alpha.max(best.value);
        ctx.record(child, mv, value);
        if best.value >= beta {
            ctx.stats.prunes += 1;
            return best;
        }
    }
    best
}

fn expand_min(
    ctx: &mut Context<'_>,
    board: &Board,
    alpha: Value,
    mut beta: Value,
    depth: u32,
) -> SearchResult {
    let opponent = ctx.root.other();
    let moves = board.legal_moves(opponent);
    if moves.is_empty() {
        return ctx.terminal(board);
    }
    if depth == 0 {
        return ctx.cutoff(board);
    }

    // MIN nodes always use enumeration order
    let mut best = SearchResult::new(None, POS_INF);
    for mv in moves {
        let child = board.play(opponent, mv);
        let value = max_node(ctx, &child, alpha, beta, depth - 1).value;
        if value < best.value {
            best = SearchResult::new(Some(mv), value);
        }
        beta = beta.min(best.value);
        ctx.record(child, mv, value);
        if best.value <= alpha {
            ctx.stats.prunes += 1;
            ctx.stats.min_prunes += 1;
            return best;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use crate::ai::cache::TranspositionCache;
    use crate::ai::evaluator::{compute_utility, DiskDifferential};
    use crate::ai::search::{alphabeta, minimax, DepthLimit};
    use crate::game::{Board, Cell, Color, Move, SIZE};

    fn midgame() -> Board {
        Board::initial()
            .play(Color::Dark, Move::new(2, 3))
            .play(Color::Light, Move::new(2, 2))
            .play(Color::Dark, Move::new(3, 2))
            .play(Color::Light, Move::new(4, 2))
    }

    #[test]
    fn matches_minimax_value_and_move() {
        let board = midgame();
        for depth in 1..=4 {
            let limit = DepthLimit::Plies(depth);
            let mm = minimax(&board, Color::Dark, limit, &DiskDifferential, None);
            let ab = alphabeta(&board, Color::Dark, limit, &DiskDifferential, None, false);
            assert_eq!(mm.result, ab.result, "depth {depth}");
        }
    }

    #[test]
    fn ordering_preserves_value() {
        let board = midgame();
        for depth in 1..=4 {
            let limit = DepthLimit::Plies(depth);
            let plain = alphabeta(&board, Color::Dark, limit, &DiskDifferential, None, false);
            let ordered = alphabeta(&board, Color::Dark, limit, &DiskDifferential, None, true);
            assert_eq!(plain.result.value, ordered.result.value, "depth {depth}");
        }
    }

    #[test]
    fn ordering_expands_every_root_child() {
        // A root with one child per opening move: nothing can prune at the
        // root, so all four children must be visited with ordering on.
        let report = alphabeta(
            &Board::initial(),
            Color::Dark,
            DepthLimit::Plies(1),
            &DiskDifferential,
            None,
            true,
        );
        assert_eq!(report.stats.nodes, 5);
        assert_eq!(report.result.best_move, Some(Move::new(2, 3)));
        assert_eq!(report.result.value, 3);
    }

    #[test]
    fn ordering_agrees_when_best_move_is_enumerated_last() {
        // Dark has two moves: (2,2) flips one disk, (5,5) flips two.
        let board = Board::empty()
            .with_cell(0, 0, Cell::Dark)
            .with_cell(1, 1, Cell::Light)
            .with_cell(5, 6, Cell::Light)
            .with_cell(5, 7, Cell::Dark)
            .with_cell(6, 5, Cell::Light)
            .with_cell(7, 5, Cell::Dark);
        assert_eq!(
            board.legal_moves(Color::Dark),
            vec![Move::new(2, 2), Move::new(5, 5)]
        );

        let report = alphabeta(
            &board,
            Color::Dark,
            DepthLimit::Plies(1),
            &DiskDifferential,
            None,
            true,
        );
        assert_eq!(report.result.best_move, Some(Move::new(5, 5)));
        assert_eq!(report.result.value, 5);
        let unordered = alphabeta(
            &board,
            Color::Dark,
            DepthLimit::Plies(1),
            &DiskDifferential,
            None,
            false,
        );
        assert_eq!(unordered.result, report.result);
    }

    #[test]
    fn prunes_where_minimax_does_not() {
        let board = Board::initial();
        let limit = DepthLimit::Plies(4);
        let mm = minimax(&board, Color::Dark, limit, &DiskDifferential, None);
        let ab = alphabeta(&board, Color::Dark, limit, &DiskDifferential, None, false);
        assert_eq!(mm.result.value, ab.result.value);
        assert_eq!(mm.stats.prunes, 0);
        assert!(ab.stats.prunes > 0);
        assert!(ab.stats.min_prunes > 0);
        assert!(ab.stats.nodes < mm.stats.nodes);
    }

    /// Disks only on rows 0 and 7, so every move is a horizontal capture.
    /// Row 0: D D L D L . . .   Row 7: . L L D D D D D
    fn two_row_board() -> Board {
        let mut board = Board::empty()
            .with_cell(0, 0, Cell::Dark)
            .with_cell(0, 1, Cell::Dark)
            .with_cell(0, 2, Cell::Light)
            .with_cell(0, 3, Cell::Dark)
            .with_cell(0, 4, Cell::Light)
            .with_cell(7, 1, Cell::Light)
            .with_cell(7, 2, Cell::Light);
        for col in 3..SIZE {
            board = board.with_cell(7, col, Cell::Dark);
        }
        board
    }

    #[test]
    fn min_node_prunes_after_strong_first_move() {
        let board = two_row_board();
        assert_eq!(
            board.legal_moves(Color::Dark),
            vec![Move::new(0, 7), Move::new(5, 0)]
        );

        // (0,7) leaves light without a reply: 9. After (5,0) light's only
        // reply drops the score to 0, which closes the window at that MIN node.
        let limit = DepthLimit::Plies(2);
        let ab = alphabeta(&board, Color::Dark, limit, &DiskDifferential, None, false);
        assert_eq!(ab.result.best_move, Some(Move::new(0, 7)));
        assert_eq!(ab.result.value, 9);
        assert_eq!(ab.stats.prunes, 1);
        assert_eq!(ab.stats.min_prunes, 1);

        let mm = minimax(&board, Color::Dark, limit, &DiskDifferential, None);
        assert_eq!(mm.result, ab.result);
        assert_eq!(mm.stats.min_prunes, 0);
    }

    #[test]
    fn terminal_root_returns_utility() {
        let mut board = Board::empty();
        for row in 0..SIZE {
            for col in 0..SIZE {
                board = board.with_cell(row, col, Cell::Dark);
            }
        }
        let board = board.with_cell(7, 7, Cell::Light);
        let report = alphabeta(
            &board,
            Color::Light,
            DepthLimit::Plies(3),
            &DiskDifferential,
            None,
            true,
        );
        assert_eq!(report.result.best_move, None);
        assert_eq!(report.result.value, compute_utility(&board, Color::Light));
    }

    #[test]
    fn reissue_with_persisted_cache_returns_same_move() {
        let board = midgame();
        let limit = DepthLimit::Plies(3);
        let mut cache = TranspositionCache::new();
        let first = alphabeta(
            &board,
            Color::Dark,
            limit,
            &DiskDifferential,
            Some(&mut cache),
            true,
        );
        let second = alphabeta(
            &board,
            Color::Dark,
            limit,
            &DiskDifferential,
            Some(&mut cache),
            true,
        );
        assert_eq!(first.result, second.result);
        assert!(second.stats.cache_hits > 0);
        assert!(second.stats.nodes < first.stats.nodes);
    }
}
