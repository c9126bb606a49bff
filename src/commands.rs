use crate::cli::{FilterArgs, MissionsArgs, RecordArgs, ShowArgs};
use crate::config::{resolve_column, resolve_delimiter, PanelConfig};
use crate::filter::{filter_rows, parse_rows};
use crate::mission::{MissionTracker, RecordOutcome};
use crate::render::{mission_panel_html, mission_panel_text, outcome_badge};
use crate::store::FileStore;
use crate::PanelError;
use std::io::{Read, Write};
use std::path::Path;

pub fn handle_filter(
    config: &PanelConfig,
    args: &FilterArgs,
    mut input: impl Read,
    out: &mut impl Write,
) -> Result<(), PanelError> {
    let column = resolve_column(config, args.column);
    let delimiter = resolve_delimiter(config, args.delimiter.as_deref())?;

    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            input.read_to_string(&mut buf)?;
            buf
        }
    };

    let rows = parse_rows(&text, delimiter);
    let visibility = filter_rows(&args.term, &rows, column);
    let separator = delimiter.to_string();
    let mut visible = 0;
    for (row, show) in rows.iter().zip(visibility) {
        if show {
            visible += 1;
            writeln!(out, "{}", row.join(separator.as_str()))?;
        }
    }
    eprintln!("panel: {visible} of {} rows visible", rows.len());
    Ok(())
}

fn open_tracker(store_dir: &Path, config: &PanelConfig) -> MissionTracker<FileStore> {
    MissionTracker::load(
        FileStore::new(store_dir),
        config.missions.storage_key.as_str(),
        config.missions.badge_policy,
    )
}

fn show_outcome(
    tracker: &MissionTracker<FileStore>,
    outcome: &RecordOutcome,
    show: &ShowArgs,
    out: &mut impl Write,
) -> Result<(), PanelError> {
    let summary = tracker.summary();
    if show.html {
        write!(out, "{}", mission_panel_html(&summary))?;
    } else {
        write!(out, "{}", mission_panel_text(&summary))?;
    }
    if let Some(badge) = outcome_badge(outcome, show.html) {
        write!(out, "{badge}")?;
    }
    eprintln!("panel: {} = {}", outcome.action, outcome.count);
    Ok(())
}

pub fn handle_record(
    store_dir: &Path,
    config: &PanelConfig,
    args: &RecordArgs,
    out: &mut impl Write,
) -> Result<(), PanelError> {
    if args.action.is_empty() {
        return Err(PanelError::Config("action name must not be empty".into()));
    }
    let mut tracker = open_tracker(store_dir, config);
    let outcome = tracker.record(&args.action)?;
    show_outcome(&tracker, &outcome, &args.show, out)
}

pub fn handle_load(
    store_dir: &Path,
    config: &PanelConfig,
    args: &ShowArgs,
    out: &mut impl Write,
) -> Result<(), PanelError> {
    let mut tracker = open_tracker(store_dir, config);
    let outcome = tracker.page_load()?;
    show_outcome(&tracker, &outcome, args, out)
}

pub fn handle_missions(
    store_dir: &Path,
    config: &PanelConfig,
    args: &MissionsArgs,
    out: &mut impl Write,
) -> Result<(), PanelError> {
    let tracker = open_tracker(store_dir, config);
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(tracker.counters())?)?;
    } else if args.html {
        write!(out, "{}", mission_panel_html(&tracker.summary()))?;
    } else {
        write!(out, "{}", mission_panel_text(&tracker.summary()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn filter_args(term: &str) -> FilterArgs {
        FilterArgs {
            term: term.into(),
            column: None,
            delimiter: None,
            file: None,
        }
    }

    fn record_args(action: &str) -> RecordArgs {
        RecordArgs {
            action: action.into(),
            show: ShowArgs { html: false },
        }
    }

    #[test]
    fn filter_prints_visible_rows_in_order() {
        let input = "1\t2\t3\t4\tAlice\n1\t2\t3\t4\tBob\n1\t2\t3\t4\tMalik\n";
        let mut out = Vec::new();
        handle_filter(&PanelConfig::default(), &filter_args("ALI"), input.as_bytes(), &mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1\t2\t3\t4\tAlice\n1\t2\t3\t4\tMalik\n"
        );
    }

    #[test]
    fn filter_honours_column_and_delimiter_flags() {
        let args = FilterArgs {
            column: Some(0),
            delimiter: Some(",".into()),
            ..filter_args("x")
        };
        let mut out = Vec::new();
        handle_filter(&PanelConfig::default(), &args, "xa,1\nb,x\n".as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "xa,1\n");
    }

    #[test]
    fn record_writes_panel_and_badge_on_fifth() {
        let dir = TempDir::new().unwrap();
        let config = PanelConfig::default();
        for _ in 0..4 {
            let mut out = Vec::new();
            handle_record(dir.path(), &config, &record_args("saveJustification"), &mut out)
                .unwrap();
            assert!(!String::from_utf8(out).unwrap().contains("Conquista"));
        }
        let mut out = Vec::new();
        handle_record(dir.path(), &config, &record_args("saveJustification"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Justificativas Salvas: 5"), "{text}");
        assert!(text.contains("Mestre saveJustification!"), "{text}");
    }

    #[test]
    fn record_rejects_empty_action() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        let err = handle_record(dir.path(), &PanelConfig::default(), &record_args(""), &mut out);
        assert!(matches!(err, Err(PanelError::Config(_))));
    }

    #[test]
    fn missions_json_lists_all_counters() {
        let dir = TempDir::new().unwrap();
        let config = PanelConfig::default();
        let mut sink = Vec::new();
        handle_load(dir.path(), &config, &ShowArgs { html: false }, &mut sink).unwrap();
        handle_record(dir.path(), &config, &record_args("exportReport"), &mut sink).unwrap();

        let mut out = Vec::new();
        let args = MissionsArgs { html: false, json: true };
        handle_missions(dir.path(), &config, &args, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["pageLoad"], 1);
        assert_eq!(value["exportReport"], 1);
    }
}
