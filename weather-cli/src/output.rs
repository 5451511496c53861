use nws_weather_core::{Config, ReportLine};

const DELIMITER: &str = "|";

/// One `label value` per line, or every value on a single `|`-joined line.
pub fn format_lines(lines: &[ReportLine], delimited: bool) -> String {
    if lines.is_empty() {
        return String::new();
    }

    if delimited {
        let values: Vec<&str> = lines.iter().map(|l| l.value.as_str()).collect();
        return format!("{}\n", values.join(DELIMITER));
    }

    lines
        .iter()
        .map(|l| {
            if l.label.is_empty() {
                format!("{}\n", l.value)
            } else {
                format!("{} {}\n", l.label, l.value)
            }
        })
        .collect()
}

/// Terminal width from `COLUMNS`, else the configured width.
pub fn separator_width(config: &Config) -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.trim().parse().ok())
        .filter(|w| *w > 0)
        .unwrap_or(config.separator_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<ReportLine> {
        vec![
            ReportLine::new("Current Weather:", "Clear"),
            ReportLine::new("", "☀️"),
            ReportLine::new("Current Temperature:", "68°F"),
        ]
    }

    #[test]
    fn one_per_line() {
        assert_eq!(
            format_lines(&lines(), false),
            "Current Weather: Clear\n☀️\nCurrent Temperature: 68°F\n"
        );
    }

    #[test]
    fn pipe_delimited() {
        assert_eq!(format_lines(&lines(), true), "Clear|☀️|68°F\n");
    }

    #[test]
    fn nothing_to_print() {
        assert_eq!(format_lines(&[], true), "");
    }
}
