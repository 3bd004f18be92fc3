// Copyright 2025 the Rove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-zone configuration.

use rove_nav::{Axis, NavOptions};
use rove_tree::{NodeId, Tree};

/// A caller-supplied filter over nodes, consulted with the tree at decision
/// time. Plain function pointers keep the controller `Copy`-friendly and free
/// of captured state.
pub type NodePredicate = fn(&Tree, NodeId) -> bool;

/// How a zone treats the Tab key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TabHandling {
    /// Tab is left to the platform: sequential order enters and leaves the
    /// zone through its single roving stop.
    #[default]
    None,
    /// Tab and Shift+Tab move within the zone like Next/Prev.
    All,
    /// Tab moves within the zone only while focus is on a text-input node;
    /// elsewhere the platform handles it.
    InputOnly,
}

/// Immutable per-zone policy, fixed at attach time.
#[derive(Copy, Clone, Debug)]
pub struct ZoneConfig {
    /// Which arrow keys are bound to focus movement.
    pub axis: Axis,
    /// Wrap from the last element to the first and vice versa.
    pub circular: bool,
    /// Right-to-left reading order for horizontal moves.
    pub rtl: bool,
    /// Tab key policy.
    pub handle_tab: TabHandling,
    /// A disabled zone keeps its bookkeeping but forces every child out of
    /// the tab order and ignores input.
    pub disabled: bool,
    /// Pin directional searches to the current row/column instead of
    /// scanning on into the next one.
    pub check_for_no_wrap: bool,
    /// Maximum distance a PageUp/PageDown move may travel.
    pub page_height: f64,
    /// Veto filter applied before any element is made active.
    pub should_receive_focus: Option<NodePredicate>,
    /// Whether a directional move landing on a nested zone root should
    /// delegate into that zone (`None` means always).
    pub should_enter_inner_zone: Option<NodePredicate>,
    /// Picks the element that receives the initial roving stop; falls back
    /// to the first focusable descendant.
    pub default_tabbable: Option<NodePredicate>,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            axis: Axis::default(),
            circular: false,
            rtl: false,
            handle_tab: TabHandling::default(),
            disabled: false,
            check_for_no_wrap: false,
            page_height: NavOptions::DEFAULT_PAGE_HEIGHT,
            should_receive_focus: None,
            should_enter_inner_zone: None,
            default_tabbable: None,
        }
    }
}

impl ZoneConfig {
    /// The engine options this configuration translates to.
    pub(crate) fn nav_options(&self) -> NavOptions {
        NavOptions {
            circular: self.circular,
            rtl: self.rtl,
            no_wrap_horizontal: self.check_for_no_wrap,
            no_wrap_vertical: self.check_for_no_wrap,
            page_height: self.page_height,
        }
    }
}
