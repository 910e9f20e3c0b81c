use std::time::Duration;

/// Parse the optional timer token of `mail start`.
///
/// Accepted forms, tried in order: `<hours>h`, `[d.]h:mm[:ss[.fffffff]]` and
/// a bare number of hours. Anything else yields `None`.
pub fn parse_timer(token: &str) -> Option<Duration> {
    let token = token.trim();
    if token.ends_with(['h', 'H']) {
        let num = &token[..token.len() - 1];
        return match parse_hours(num) {
            Some(d) => {
                tracing::info!("parsed timer '{token}' as {num} hours");
                Some(d)
            }
            None => {
                tracing::info!("failed to parse hours from '{token}'");
                None
            }
        };
    }
    if token.contains(':') {
        if let Some(d) = parse_clock(token) {
            tracing::info!("parsed timer '{token}' as clock duration {}", format_timer(d));
            return Some(d);
        }
    }
    if let Some(d) = parse_hours(token) {
        tracing::info!("parsed timer '{token}' as numeric hours");
        return Some(d);
    }
    tracing::info!("could not parse timer parameter '{token}'");
    None
}

fn parse_hours(input: &str) -> Option<Duration> {
    let hours: f64 = input.trim().parse().ok()?;
    if !hours.is_finite() || hours < 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(hours * 3600.0).ok()
}

fn parse_clock(input: &str) -> Option<Duration> {
    let (days, rest) = match input.split_once('.') {
        Some((d, r)) if !d.contains(':') => (d.parse::<u64>().ok()?, r),
        _ => (0, input),
    };
    let parts: Vec<&str> = rest.split(':').collect();
    let (h, m, s) = match parts.as_slice() {
        [h, m] => (*h, *m, "0"),
        [h, m, s] => (*h, *m, *s),
        _ => return None,
    };
    let (s, frac) = s.split_once('.').unwrap_or((s, ""));
    let h: u64 = h.parse().ok()?;
    let m: u64 = m.parse().ok()?;
    let s: u64 = s.parse().ok()?;
    if h > 23 || m > 59 || s > 59 {
        return None;
    }
    let nanos = parse_fraction(frac)?;
    let secs = days
        .checked_mul(86_400)?
        .checked_add(h * 3600 + m * 60 + s)?;
    Some(Duration::new(secs, nanos))
}

/// Fractional seconds with up to seven digits, returned as nanoseconds.
fn parse_fraction(frac: &str) -> Option<u32> {
    if frac.is_empty() {
        return Some(0);
    }
    if frac.len() > 7 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = frac.parse().ok()?;
    Some(value * 10u32.pow(9 - frac.len() as u32))
}

/// Render a duration as `[d.]hh:mm:ss[.fffffff]`.
pub fn format_timer(dur: Duration) -> String {
    let secs = dur.as_secs();
    let days = secs / 86_400;
    let h = (secs % 86_400) / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    let ticks = dur.subsec_nanos() / 100;
    let mut out = String::new();
    if days > 0 {
        out.push_str(&format!("{days}."));
    }
    out.push_str(&format!("{h:02}:{m:02}:{s:02}"));
    if ticks > 0 {
        out.push_str(&format!(".{ticks:07}"));
    }
    out
}
