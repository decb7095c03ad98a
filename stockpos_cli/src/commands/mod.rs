pub mod history;
pub mod summary;
pub mod validate;

use anyhow::{bail, Result};
use chrono::{Days, NaiveDate, Utc};
use stockpos_lib::validation;

/// Default trailing window, matching the one-year dashboard view.
const DEFAULT_WINDOW_DAYS: u32 = 365;

/// Turns the shared `--since`/`--until`/`--days` flags into a concrete
/// inclusive window ending no later than today.
pub(crate) fn resolve_window(
    since: Option<&str>,
    until: Option<&str>,
    days: Option<u32>,
) -> Result<(NaiveDate, NaiveDate)> {
    let today = Utc::now().date_naive();
    let (start, end) = if let Some(s) = since {
        let start = validation::parse_date(s)?;
        let end = match until {
            Some(u) => validation::parse_date(u)?,
            None => today,
        };
        (start, end)
    } else if until.is_some() {
        bail!("--until requires --since");
    } else {
        let days = days.unwrap_or(DEFAULT_WINDOW_DAYS);
        let start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        (start, today)
    };
    validation::validate_window(start, end, today)?;
    Ok((start, end))
}
