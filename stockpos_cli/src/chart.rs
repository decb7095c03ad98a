//! Text rendering of the positioning bar chart.
//!
//! One row per ticker, two bars around a center axis: the distance down
//! to the period minimum grows leftward, the distance up to the period
//! maximum grows rightward. Bars are scaled linearly to the largest
//! magnitude on either side, so the widest mover spans the full half.

use stockpos_lib::TickerSummary;

/// Character cells available on each side of the axis.
const HALF_WIDTH: usize = 30;

const BAR: &str = "█";

/// Renders the ranked summaries as a horizontal bar chart.
pub fn render_spread_chart(summaries: &[TickerSummary]) -> String {
    let mut scale = 0.0f64;
    for s in summaries {
        scale = scale.max(s.pct_from_min.abs()).max(s.pct_from_max.abs());
    }
    if scale <= 0.0 {
        scale = 1.0;
    }
    let label_width = summaries.iter().map(|s| s.ticker.len()).max().unwrap_or(0);

    let mut out = String::new();
    for s in summaries {
        let down = BAR.repeat(bar_cells(s.pct_from_min, scale));
        let up = BAR.repeat(bar_cells(s.pct_from_max, scale));
        out.push_str(&format!(
            "{ticker:>lw$}  {down:>hw$}|{up:<hw$}  {pmin:>7} / {pmax}\n",
            ticker = s.ticker,
            lw = label_width,
            down = down,
            up = up,
            hw = HALF_WIDTH,
            pmin = format_pct(s.pct_from_min),
            pmax = format_pct(s.pct_from_max),
        ));
    }
    out
}

fn bar_cells(value: f64, scale: f64) -> usize {
    let cells = (value.abs() / scale * HALF_WIDTH as f64).round() as usize;
    cells.min(HALF_WIDTH)
}

/// Percentage label scaled for display, e.g. `-27.3%`.
fn format_pct(value: f64) -> String {
    format!("{:+.1}%", value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn summary(ticker: &str, pct_from_min: f64, pct_from_max: f64) -> TickerSummary {
        TickerSummary {
            ticker: ticker.to_string(),
            display_name: None,
            min_value: 1.0,
            min_date: NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
            max_value: 2.0,
            max_date: NaiveDate::from_ymd_opt(2024, 6, 13).unwrap(),
            current_value: 1.5,
            pct_from_min,
            pct_from_max,
            spread: (pct_from_min - pct_from_max).abs(),
        }
    }

    #[test]
    fn one_row_per_ticker() {
        let chart = render_spread_chart(&[
            summary("AAPL", -0.10, 0.20),
            summary("MSFT", -0.05, 0.40),
            summary("ISP.MI", -0.30, 0.01),
        ]);
        assert_eq!(chart.lines().count(), 3);
        for line in chart.lines() {
            assert!(line.contains('|'));
        }
    }

    #[test]
    fn widest_magnitude_spans_a_full_half() {
        let chart = render_spread_chart(&[summary("AAPL", -0.10, 0.40)]);
        let line = chart.lines().next().unwrap();
        let (left, rest) = line.split_once('|').unwrap();
        assert_eq!(left.matches(BAR).count(), (0.10_f64 / 0.40 * 30.0).round() as usize);
        assert_eq!(rest.matches(BAR).count(), 30);
    }

    #[test]
    fn labels_are_scaled_percentages() {
        let chart = render_spread_chart(&[summary("AAPL", -0.2727, 0.45)]);
        assert!(chart.contains("-27.3%"));
        assert!(chart.contains("+45.0%"));
    }

    #[test]
    fn flat_series_renders_without_bars() {
        let chart = render_spread_chart(&[summary("AAPL", 0.0, 0.0)]);
        assert!(!chart.contains(BAR));
        assert!(chart.contains("+0.0%"));
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(render_spread_chart(&[]).is_empty());
    }
}
