//! Class helpers shared by pages and components. Colors live in `assets/main.css`
//! as custom properties switched by the root theme class.

use crate::domain::Theme;

pub fn root_class(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "app theme-dark",
        Theme::Light => "app theme-light",
    }
}

// ============================================
// BUTTON STYLES
// ============================================

pub fn btn_primary() -> &'static str {
    "btn btn-primary"
}

pub fn btn_secondary() -> &'static str {
    "btn btn-secondary"
}

pub fn nav_button(active: bool) -> &'static str {
    if active {
        "nav-btn nav-btn-active"
    } else {
        "nav-btn"
    }
}

pub fn chip(active: bool) -> &'static str {
    if active {
        "chip chip-active"
    } else {
        "chip"
    }
}

pub fn theme_option(active: bool) -> &'static str {
    if active {
        "btn btn-primary"
    } else {
        "btn btn-secondary"
    }
}

// ============================================
// INPUT / PANEL STYLES
// ============================================

pub fn input_class() -> &'static str {
    "field-input"
}

pub fn label_class() -> &'static str {
    "field-label"
}

pub fn panel() -> &'static str {
    "panel"
}

pub fn text_muted() -> &'static str {
    "text-muted"
}

// ============================================
// RESULT TABLE
// ============================================

pub fn rank_badge(rank: usize) -> &'static str {
    match rank {
        1 => "rank-badge rank-gold",
        2 => "rank-badge rank-silver",
        3 => "rank-badge rank-bronze",
        _ => "rank-badge",
    }
}

pub fn result_row(is_price_leader: bool) -> &'static str {
    if is_price_leader {
        "result-row result-row-leader"
    } else {
        "result-row"
    }
}

pub fn sort_header(active: bool) -> &'static str {
    if active {
        "sort-header sort-header-active"
    } else {
        "sort-header"
    }
}
