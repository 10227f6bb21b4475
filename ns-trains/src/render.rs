//! Plain-text rendering of records, one line per record.

use std::fmt::Write;

use crate::domain::{Connection, Departure, Disruption, Price, Station, Trip};

/// Format a duration in seconds as `H:MM`.
pub fn format_duration(secs: u32) -> String {
    format!("{}:{:02}", secs / 3600, (secs % 3600) / 60)
}

/// Render a departure board line.
///
/// `15:32 +5 - NS Sprinter 4987 > Rhenen (via Bunnik) (Platform 4!)`
pub fn departure_line(d: &Departure) -> String {
    let mut line = d.departure.format("%H:%M").to_string();
    if let Some(delay) = d.delay.filter(|&m| m > 0) {
        let _ = write!(line, " +{delay}");
    }

    line.push_str(" -");
    if let Some(carrier) = &d.carrier {
        let _ = write!(line, " {carrier}");
    }
    let _ = write!(line, " {} {} > {}", d.train_type, d.service, d.destination);

    if !d.via.is_empty() {
        let _ = write!(line, " (via {})", d.via);
    }
    if let Some(platform) = &d.platform {
        let marker = if d.platform_changed { "!" } else { "" };
        let _ = write!(line, " (Platform {platform}{marker})");
    }
    line
}

pub fn station_line(s: &Station) -> String {
    format!("{:<6} {} ({})", s.code, s.name, s.country)
}

pub fn disruption_line(d: &Disruption) -> String {
    let mut line = format!("[{}] {}", d.kind, d.id);
    if let Some(route) = &d.applicable {
        let _ = write!(line, ": {route}");
    }
    if let Some(reason) = &d.reason {
        let _ = write!(line, " - {reason}");
    }
    if let Some(period) = &d.period {
        let _ = write!(line, " ({period})");
    }
    line
}

/// Render a trip as a summary line followed by one indented line per
/// connection.
pub fn trip_lines(t: &Trip) -> Vec<String> {
    let mut summary = format!(
        "{} -> {}  {}  {} change(s)",
        t.departure_scheduled.format("%H:%M"),
        t.arrival_scheduled.format("%H:%M"),
        format_duration(t.duration_actual.unwrap_or(t.duration_scheduled)),
        t.changes,
    );
    if t.optimal {
        summary.push_str("  [optimal]");
    }
    if let Some(status) = &t.status {
        let _ = write!(summary, "  {status}");
    }

    let mut lines = vec![summary];
    lines.extend(t.notices.iter().map(|n| format!("  ! {}", n.text)));
    lines.extend(t.connections.iter().map(connection_line));
    lines
}

fn connection_line(c: &Connection) -> String {
    let mut line = format!("  {} {}", c.mode, c.vehicle_type);
    if let Some(service) = &c.service {
        let _ = write!(line, " {service}");
    }
    if let (Some(first), Some(last)) = (c.stops.first(), c.stops.last()) {
        let _ = write!(
            line,
            ": {} {} -> {} {}",
            first.station,
            first.time.format("%H:%M"),
            last.station,
            last.time.format("%H:%M"),
        );
    }
    line
}

pub fn price_line(p: &Price) -> String {
    format!(
        "{}  class {}  {}%  {}",
        p.product,
        p.class,
        p.discount.percent(),
        p.amount_display()
    )
}
