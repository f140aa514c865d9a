//! Relative-age labels ("5 minutes ago").

use crate::types::Locale;

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_DAY: i64 = 86_400_000;

/// Label for an age of `elapsed_ms`.
///
/// Units are floor-divided. Anything under a minute, including timestamps in
/// the future, is "just now". No pluralization and no upper unit past days.
pub fn relative_label(elapsed_ms: i64, locale: Locale) -> String {
    let minutes = elapsed_ms.div_euclid(MS_PER_MINUTE);
    let hours = elapsed_ms.div_euclid(MS_PER_HOUR);
    let days = elapsed_ms.div_euclid(MS_PER_DAY);

    match locale {
        Locale::English => {
            if minutes < 1 {
                "just now".to_string()
            } else if minutes < 60 {
                format!("{} minutes ago", minutes)
            } else if hours < 24 {
                format!("{} hours ago", hours)
            } else {
                format!("{} days ago", days)
            }
        }
        Locale::Chinese => {
            if minutes < 1 {
                "刚刚".to_string()
            } else if minutes < 60 {
                format!("{}分钟前", minutes)
            } else if hours < 24 {
                format!("{}小时前", hours)
            } else {
                format!("{}天前", days)
            }
        }
    }
}
