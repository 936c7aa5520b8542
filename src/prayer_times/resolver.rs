use chrono::NaiveTime;

use crate::models::{Prayer, PrayerTimeRecord, TimeOfDay};

/// Which prayer should be highlighted at `now`.
///
/// Only the clock part of each stored time matters; the record's date is ignored.
/// Between Jacija and Rani Sabah the night prayer stays active, and from Rani Sabah
/// until Sabah the dawn prayer is shown. Returns `None` when one of the three anchor
/// times (Rani Sabah, Sabah, Jacija) cannot be parsed.
pub fn resolve(now: NaiveTime, record: &PrayerTimeRecord) -> Option<Prayer> {
    resolve_times(now, &record.schedule())
}

/// Same as [`resolve`], over raw `(prayer, "HH:mm")` pairs in chronological order.
pub fn resolve_times(now: NaiveTime, times: &[(Prayer, &str)]) -> Option<Prayer> {
    let parsed: Vec<(Prayer, NaiveTime)> = times
        .iter()
        .filter_map(|(prayer, raw)| match TimeOfDay::parse(raw) {
            Some(t) => Some((*prayer, t.as_naive())),
            None => {
                log::debug!("Skipping unparsable {} time '{}'", prayer, raw);
                None
            }
        })
        .collect();

    let anchor = |wanted: Prayer| {
        parsed
            .iter()
            .find(|(p, _)| *p == wanted)
            .map(|(_, t)| *t)
    };
    let jacija = anchor(Prayer::Jacija)?;
    let rani_sabah = anchor(Prayer::RaniSabah)?;
    let sabah = anchor(Prayer::Sabah)?;

    if now >= jacija || now < rani_sabah {
        return Some(Prayer::Jacija);
    }
    if now <= sabah {
        return Some(Prayer::Sabah);
    }

    // Last prayer that has already started; if none has, the first one.
    parsed
        .iter()
        .take_while(|(_, t)| *t <= now)
        .last()
        .or_else(|| parsed.first())
        .map(|(p, _)| *p)
}
