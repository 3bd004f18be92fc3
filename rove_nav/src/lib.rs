// Copyright 2025 the Rove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rove Nav: the spatial focus navigation engine.
//!
//! Given a container, the currently active node, a direction, and the
//! remembered focus alignment, [`move_focus`] decides which node should
//! receive focus next. It holds no state of its own: callers (normally a
//! `rove_zone` controller) own the active element and the alignment and pass
//! them in per move.
//!
//! ## Model
//!
//! - **Linear moves** ([`Direction::Next`], [`Direction::Prev`],
//!   [`Direction::Home`], [`Direction::End`]) walk document order via
//!   [`rove_tree::Tree::next_focusable`] and friends.
//! - **Directional moves** ([`Direction::Up`], [`Direction::Down`],
//!   [`Direction::Left`], [`Direction::Right`]) walk document order too, but
//!   score each candidate geometrically: the first qualifying row (or column)
//!   beyond the active element is locked in, and within it the winner is the
//!   candidate closest to the remembered [`Alignment`] anchor. A candidate
//!   whose span contains the anchor is a perfect match.
//! - **Paging moves** ([`Direction::PageUp`], [`Direction::PageDown`]) score
//!   like their arrow counterparts but ignore candidates further than
//!   [`NavOptions::page_height`] away.
//!
//! Pixel comparisons are floored first so sub-pixel layout jitter cannot make
//! two visually identical rows look different.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Rect;
//! use rove_nav::{move_focus, Alignment, Direction, NavOptions};
//! use rove_tree::{FocusableNode, NodeFlags, Tree};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(None, FocusableNode::default());
//! let cell = |x: f64, y: f64| FocusableNode {
//!     bounds: Rect::new(x, y, x + 50.0, y + 50.0),
//!     flags: NodeFlags::VISIBLE | NodeFlags::FOCUSABLE,
//!     ..FocusableNode::default()
//! };
//! let a = tree.insert(Some(root), cell(0.0, 0.0));
//! let b = tree.insert(Some(root), cell(0.0, 50.0));
//!
//! let alignment = Alignment::from_rect(tree.bounds(a).unwrap());
//! let next = move_focus(
//!     &tree,
//!     root,
//!     a,
//!     Direction::Down,
//!     alignment,
//!     &NavOptions::default(),
//! );
//! assert_eq!(next, Some(b));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use kurbo::Rect;
use rove_tree::{NodeId, Tree};

/// Direction of a focus move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Next node in document order (Tab).
    Next,
    /// Previous node in document order (Shift+Tab).
    Prev,
    /// Geometrically upward (Up arrow).
    Up,
    /// Geometrically downward (Down arrow).
    Down,
    /// Toward the start of the reading direction (Left arrow).
    Left,
    /// Toward the end of the reading direction (Right arrow).
    Right,
    /// One page up.
    PageUp,
    /// One page down.
    PageDown,
    /// First node in the container.
    Home,
    /// Last node in the container.
    End,
}

/// Navigation axis of a zone. The zone controller uses this to decide which
/// arrow keys are bound to focus movement at all; the engine itself is
/// axis-agnostic.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Up/Down move focus; Left/Right are left to the focused element.
    Vertical,
    /// Left/Right move focus; Up/Down are left to the focused element.
    Horizontal,
    /// All four arrows move focus.
    #[default]
    Bidirectional,
}

/// Remembered 2D anchor that keeps directional navigation visually aligned
/// across rows and columns.
///
/// Vertical moves keep `x` (the column the user is traveling down), and
/// horizontal moves keep `y`. Non-directional focus causes (clicks, initial
/// focus) reset both to the focused element's center.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Alignment {
    /// Horizontal anchor.
    pub x: f64,
    /// Vertical anchor.
    pub y: f64,
}

impl Alignment {
    /// Anchor at the center of a rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        let c = rect.center();
        Self { x: c.x, y: c.y }
    }
}

/// Per-move navigation policy.
#[derive(Copy, Clone, Debug)]
pub struct NavOptions {
    /// Wrap to the far end of the container when a move runs off the edge.
    pub circular: bool,
    /// Right-to-left reading order: flips which edge comparison Left/Right
    /// use and which end of the container they wrap to.
    pub rtl: bool,
    /// Stop a horizontal search at the row edge instead of scanning on
    /// (the "no horizontal wrap" attribute).
    pub no_wrap_horizontal: bool,
    /// Stop a vertical search at the column edge instead of scanning on.
    pub no_wrap_vertical: bool,
    /// Maximum distance a paging move may travel. Candidates further away
    /// are not considered regardless of score.
    pub page_height: f64,
}

impl NavOptions {
    /// Fallback paging distance when the host has not measured a viewport.
    pub const DEFAULT_PAGE_HEIGHT: f64 = 480.0;
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            circular: false,
            rtl: false,
            no_wrap_horizontal: false,
            no_wrap_vertical: false,
            page_height: Self::DEFAULT_PAGE_HEIGHT,
        }
    }
}

/// Decide the node that should receive focus after a move in `direction`.
///
/// Returns `None` when no candidate qualifies; the caller treats that as a
/// no-op (focus stays put) and may fall back to platform behavior. The
/// decision is deterministic: a fixed tree and arguments always produce the
/// same answer.
pub fn move_focus(
    tree: &Tree,
    container: NodeId,
    active: NodeId,
    direction: Direction,
    alignment: Alignment,
    options: &NavOptions,
) -> Option<NodeId> {
    if !tree.is_alive(container) || !tree.contains(container, active) {
        return None;
    }
    match direction {
        Direction::Next => move_linear(tree, container, active, true, options.circular),
        Direction::Prev => move_linear(tree, container, active, false, options.circular),
        Direction::Home => tree.first_focusable(container).filter(|&n| n != active),
        Direction::End => tree.last_focusable(container).filter(|&n| n != active),
        Direction::Down => move_vertical(tree, container, active, alignment, options, true, None),
        Direction::Up => move_vertical(tree, container, active, alignment, options, false, None),
        Direction::PageDown => {
            let bound = Some(options.page_height);
            move_vertical(tree, container, active, alignment, options, true, bound)
        }
        Direction::PageUp => {
            let bound = Some(options.page_height);
            move_vertical(tree, container, active, alignment, options, false, bound)
        }
        Direction::Right => move_horizontal(tree, container, active, alignment, options, true),
        Direction::Left => move_horizontal(tree, container, active, alignment, options, false),
    }
}

/// Refresh the remembered alignment after a successful move.
///
/// Directional moves keep the cross-axis anchor so travel stays visually
/// aligned; any other cause re-anchors at the new element's center.
pub fn refresh_alignment(direction: Direction, new_rect: Rect, previous: Alignment) -> Alignment {
    let center = new_rect.center();
    match direction {
        Direction::Up | Direction::Down | Direction::PageUp | Direction::PageDown => Alignment {
            x: previous.x,
            y: center.y,
        },
        Direction::Left | Direction::Right => Alignment {
            x: center.x,
            y: previous.y,
        },
        _ => Alignment::from_rect(new_rect),
    }
}

/// Floor a pixel coordinate so rectangles within 1px of each other compare
/// equal. Manual cast-based flooring keeps this available without `std`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "Pixel coordinates are far inside the exactly-representable i64 range."
)]
fn floor_px(v: f64) -> i64 {
    // The cast rounds toward zero; shift negatives down to round toward -∞.
    let t = v as i64;
    if v < 0.0 && (t as f64) > v { t - 1 } else { t }
}

/// Score of one visited candidate.
enum Score {
    /// Does not qualify; keep scanning.
    Skip,
    /// Abort the scan entirely (wrap disabled on this axis).
    Stop,
    /// Qualifies at this distance from the alignment anchor; lower wins and
    /// zero is a perfect match.
    Dist(f64),
}

fn move_linear(
    tree: &Tree,
    container: NodeId,
    active: NodeId,
    forward: bool,
    circular: bool,
) -> Option<NodeId> {
    let next = if forward {
        tree.next_focusable(container, active, false)
    } else {
        tree.prev_focusable(container, active, false)
    };
    if next.is_some() {
        return next;
    }
    if !circular {
        return None;
    }
    let wrapped = if forward {
        tree.first_focusable(container)
    } else {
        tree.last_focusable(container)
    };
    wrapped.filter(|&n| n != active)
}

fn move_vertical(
    tree: &Tree,
    container: NodeId,
    active: NodeId,
    alignment: Alignment,
    options: &NavOptions,
    downward: bool,
    page_bound: Option<f64>,
) -> Option<NodeId> {
    let no_wrap = options.no_wrap_vertical;
    // Paging is bounded travel; it never wraps around the container.
    let circular = options.circular && page_bound.is_none();
    // Running marker for the nearest qualifying row.
    let mut target_row: Option<i64> = None;
    search(
        tree,
        container,
        active,
        downward,
        circular,
        move |active_rect, target| {
            let (edge, limit) = if downward {
                (floor_px(target.y0), floor_px(active_rect.y1))
            } else {
                (floor_px(target.y1), floor_px(active_rect.y0))
            };
            let beyond = if downward { edge >= limit } else { edge <= limit };
            let qualifies = match target_row {
                None => beyond,
                Some(row) => edge == row,
            };
            if !qualifies {
                // Once the nearest row is locked and left behind, a pinned
                // axis stops the scan instead of drifting further.
                return if no_wrap && target_row.is_some() {
                    Score::Stop
                } else {
                    Score::Skip
                };
            }
            if let Some(bound) = page_bound {
                #[allow(
                    clippy::cast_precision_loss,
                    reason = "Pixel coordinates are small."
                )]
                let travel = (edge - limit).unsigned_abs() as f64;
                if travel > bound {
                    return Score::Skip;
                }
            }
            target_row = Some(edge);
            Score::Dist(axis_distance(alignment.x, target.x0, target.x1))
        },
    )
}

fn move_horizontal(
    tree: &Tree,
    container: NodeId,
    active: NodeId,
    alignment: Alignment,
    options: &NavOptions,
    toward_end: bool,
) -> Option<NodeId> {
    // In RTL reading order the "end" direction runs backward through the
    // document and the edge comparison flips.
    let forward = toward_end != options.rtl;
    let no_wrap = options.no_wrap_horizontal;
    let mut target_col: Option<i64> = None;
    search(
        tree,
        container,
        active,
        forward,
        options.circular,
        move |active_rect, target| {
            // A pinned horizontal axis refuses to leave the active row.
            if no_wrap {
                let row_overlap = floor_px(target.y0) < floor_px(active_rect.y1)
                    && floor_px(target.y1) > floor_px(active_rect.y0);
                if !row_overlap {
                    return Score::Stop;
                }
            }
            let (edge, limit) = if forward {
                (floor_px(target.x0), floor_px(active_rect.x1))
            } else {
                (floor_px(target.x1), floor_px(active_rect.x0))
            };
            let beyond = if forward { edge >= limit } else { edge <= limit };
            let qualifies = match target_col {
                None => beyond,
                Some(col) => edge == col,
            };
            if !qualifies {
                return if no_wrap && target_col.is_some() {
                    Score::Stop
                } else {
                    Score::Skip
                };
            }
            target_col = Some(edge);
            Score::Dist(axis_distance(alignment.y, target.y0, target.y1))
        },
    )
}

/// Distance from the alignment anchor to a candidate's span along one axis.
/// Containment of the anchor within the span is a perfect match.
fn axis_distance(anchor: f64, span_start: f64, span_end: f64) -> f64 {
    if anchor >= span_start && anchor <= span_end {
        0.0
    } else {
        (span_start + (span_end - span_start) / 2.0 - anchor).abs()
    }
}

/// Walk document order from `active`, score every candidate, and return the
/// best one. Wraps to the container's far end when the scan is exhausted,
/// circular navigation is on, and the scan was not aborted by a
/// [`Score::Stop`].
fn search(
    tree: &Tree,
    container: NodeId,
    active: NodeId,
    forward: bool,
    circular: bool,
    mut score: impl FnMut(Rect, Rect) -> Score,
) -> Option<NodeId> {
    let active_rect = tree.bounds(active)?;
    let mut best: Option<(NodeId, f64)> = None;
    let mut stopped = false;
    let mut cur = active;
    loop {
        let next = if forward {
            tree.next_focusable(container, cur, false)
        } else {
            tree.prev_focusable(container, cur, false)
        };
        let Some(candidate) = next else { break };
        cur = candidate;
        let Some(rect) = tree.bounds(candidate) else {
            continue;
        };
        match score(active_rect, rect) {
            Score::Skip => {}
            Score::Stop => {
                stopped = true;
                break;
            }
            Score::Dist(d) => {
                if best.is_none_or(|(_, bd)| d < bd) {
                    best = Some((candidate, d));
                }
                if d == 0.0 {
                    // Perfect alignment match; nothing can beat it.
                    break;
                }
            }
        }
    }
    if let Some((node, _)) = best {
        return Some(node);
    }
    if !circular || stopped {
        return None;
    }
    let wrapped = if forward {
        tree.first_focusable(container)
    } else {
        tree.last_focusable(container)
    };
    wrapped.filter(|&n| n != active)
}
