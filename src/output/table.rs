//! Terminal table rendering for navigator screens and summaries.

use crate::aggregator::{FinalizedStat, HotMethod, IndexSummary};
use crate::navigator::{Row, Screen};
use colored::*;

/// Render a navigator screen for the terminal
pub fn render_screen(screen: &Screen) -> String {
    let mut out = String::new();

    out.push_str(&render_path(&screen.path));
    out.push_str(&render_section("Self Stat", &screen.self_rows));
    out.push_str(&render_section("Children", &screen.children));
    out.push_str(&render_section("Parents", &screen.parents));

    out
}

/// `PATH:  -> a -> b-> current`
fn render_path(path: &[String]) -> String {
    let mut out = String::from("PATH: ");
    if let Some((current, history)) = path.split_last() {
        for method in history {
            out.push_str(" -> ");
            out.push_str(method);
        }
        out.push_str("-> ");
        out.push_str(&current.bold().to_string());
    }
    out.push('\n');
    out
}

fn render_section(name: &str, rows: &[Row]) -> String {
    let mut out = format!("==== {} ====\n", name.bold());
    out.push_str(&format!(
        "{:>3} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>4} {}\n",
        "#", "AVG_CT", "min_ct", "max_ct", "min_wt", "AVG_WT", "PERCENT_WT", "max_wt", "mark", "method"
    ));

    for row in rows {
        let code = if row.is_back_edge {
            "0".to_string()
        } else {
            row.index.map(|i| i.to_string()).unwrap_or_default()
        };
        // Pad before colouring; escape codes would count toward the width
        let mark = format!("{:>4}", if row.is_marked { "*" } else { "" });
        let mark = if row.is_marked { mark.yellow().to_string() } else { mark };

        out.push_str(&format!(
            "{:>3} {} {} {}\n",
            code,
            render_stat(&row.stat),
            mark,
            row.method
        ));
    }

    out
}

fn render_stat(stat: &FinalizedStat) -> String {
    format!(
        "{:>10.2} {:>10.2} {:>10.2} {:>10} {:>10} {:>10} {:>10}",
        stat.avg_count,
        stat.min_count as f64,
        stat.max_count as f64,
        format_wall_time(Some(stat.min_wall_time)),
        format_wall_time(Some(stat.avg_wall_time)),
        format_wall_time(stat.percentile_wall_time),
        format_wall_time(Some(stat.max_wall_time)),
    )
}

/// Floor and group thousands with commas; `-` when undefined
pub fn format_wall_time(value: Option<f64>) -> String {
    let Some(value) = value else {
        return "-".to_string();
    };

    let digits = (value.floor() as u64).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Render the summary command output
pub fn render_summary(summary: &IndexSummary, methods: &[HotMethod]) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "CALL GRAPH SUMMARY".bold()));
    out.push_str(&format!("{}\n", "=".repeat(80)));
    out.push_str(&format!("Requests:        {}\n", summary.request_count));
    out.push_str(&format!("Methods:         {}\n", summary.method_count));
    out.push_str(&format!("Edges:           {}\n", summary.edge_count));
    out.push_str(&format!(
        "Root wall time:  {} (p: {})\n",
        format_wall_time(summary.root_avg_wall_time),
        format_wall_time(summary.root_percentile_wall_time)
    ));
    out.push_str(&format!("{}\n", "=".repeat(80)));

    out.push_str(&format!(
        "{:>3} {:>10} {:>10} {:>10} {:>7} {}\n",
        "#", "AVG_CT", "AVG_WT", "PERCENT_WT", "%ROOT", "method"
    ));
    for (i, hot) in methods.iter().enumerate() {
        let share = hot
            .percentage
            .map(|p| format!("{:.1}%", p))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:>3} {:>10.2} {:>10} {:>10} {:>7} {}\n",
            i + 1,
            hot.stat.avg_count,
            format_wall_time(Some(hot.stat.avg_wall_time)),
            format_wall_time(hot.stat.percentile_wall_time),
            share,
            hot.method
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn stat(avg_wall_time: f64) -> FinalizedStat {
        FinalizedStat {
            avg_count: 1.5,
            min_count: 1,
            max_count: 2,
            avg_wall_time,
            min_wall_time: 10.0,
            max_wall_time: 9_999.0,
            percentile_wall_time: None,
            observations: 2,
        }
    }

    fn row(method: &str, index: Option<usize>, is_back_edge: bool, is_marked: bool) -> Row {
        Row {
            index,
            method: method.to_string(),
            stat: stat(1234.9),
            is_back_edge,
            is_marked,
        }
    }

    #[test]
    fn test_format_wall_time() {
        assert_eq!(format_wall_time(None), "-");
        assert_eq!(format_wall_time(Some(0.7)), "0");
        assert_eq!(format_wall_time(Some(999.9)), "999");
        assert_eq!(format_wall_time(Some(1000.0)), "1,000");
        assert_eq!(format_wall_time(Some(1_234_567.8)), "1,234,567");
    }

    #[test]
    fn test_render_screen() {
        colored::control::set_override(false);

        let screen = Screen {
            path: vec!["main()".to_string(), "load".to_string()],
            self_rows: vec![row("load", None, false, false)],
            children: vec![row("query", Some(1), false, true)],
            parents: vec![row("main()", None, true, false)],
            root_index: BTreeMap::from([(1, "query".to_string())]),
        };

        let out = render_screen(&screen);

        assert!(out.starts_with("PATH:  -> main()-> load\n"));
        assert!(out.contains("==== Children ===="));
        assert!(out.contains("1,234"));
        assert!(out.contains("9,999"));

        let query_line = out.lines().find(|l| l.ends_with("query")).unwrap();
        assert!(query_line.trim_start().starts_with('1'));
        assert!(query_line.contains('*'));

        let back_line = out.lines().filter(|l| l.ends_with("main()")).last().unwrap();
        assert!(back_line.trim_start().starts_with('0'));
    }

    /// Drop `ESC [ ... m` sequences
    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_marked_rows_keep_column_alignment() {
        colored::control::set_override(true);

        let rows = vec![row("query", Some(1), false, true), row("fetch", Some(2), false, false)];
        let out = render_section("Children", &rows);

        let marked = strip_ansi(out.lines().find(|l| l.ends_with("query")).unwrap());
        let unmarked = strip_ansi(out.lines().find(|l| l.ends_with("fetch")).unwrap());
        assert_eq!(marked.len() - "query".len(), unmarked.len() - "fetch".len());
        assert!(marked.ends_with("   * query"));
        assert!(unmarked.ends_with("      fetch"));

        colored::control::unset_override();
    }
}
