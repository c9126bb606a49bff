//! Presentation for the mission panel and the badge toast.
//!
//! The HTML fragments are what the dashboard writes into `#mission-panel`
//! and appends to `<body>`; the text variants are for terminal output.

use crate::mission::{MissionSummary, RecordOutcome};

/// How long the dashboard keeps a badge on screen.
pub const BADGE_DISPLAY_MS: u64 = 3000;

pub fn mission_panel_html(summary: &MissionSummary) -> String {
    format!(
        "<h3>Missões</h3>\n<p>Justificativas Salvas: {}</p>\n<p>Relatórios Exportados: {}</p>\n",
        summary.justification_saves, summary.report_exports
    )
}

pub fn badge_html(action: &str) -> String {
    format!(
        "<div class=\"badge\"><span>Conquista Desbloqueada: Mestre {}!</span></div>\n",
        v_htmlescape::escape(action)
    )
}

pub fn mission_panel_text(summary: &MissionSummary) -> String {
    format!(
        "Missões\n  Justificativas Salvas: {}\n  Relatórios Exportados: {}\n",
        summary.justification_saves, summary.report_exports
    )
}

pub fn badge_text(action: &str) -> String {
    format!("Conquista Desbloqueada: Mestre {action}!\n")
}

/// Badge fragment for a record, if it unlocked one.
pub fn outcome_badge(outcome: &RecordOutcome, html: bool) -> Option<String> {
    if !outcome.badge_unlocked {
        return None;
    }
    Some(if html {
        badge_html(&outcome.action)
    } else {
        badge_text(&outcome.action)
    })
}
