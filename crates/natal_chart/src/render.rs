//! Plain-text chart rendering.

use std::fmt::{self, Display, Formatter};

use crate::chart::{AnglePoint, ChartResult};
use crate::zodiac::sign_position;

/// Renders a chart line by line; same chart, same text.
pub struct TextChart<'a>(pub &'a ChartResult);

fn position(lon: f64) -> String {
    let pos = sign_position(lon);
    format!("{} {:<11} ({lon:>8.4}°)", pos.dms, pos.sign.name())
}

fn angle_line(f: &mut Formatter<'_>, label: &str, point: Option<&AnglePoint>) -> fmt::Result {
    match point {
        Some(p) => writeln!(f, "{label:<10} {}", position(p.longitude)),
        None => writeln!(f, "{label:<10} unknown (no birth time)"),
    }
}

impl Display for TextChart<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let chart = self.0;
        let input = &chart.input;
        let settings = &chart.settings;

        writeln!(
            f,
            "Natal chart for {} at {:.4}°, {:.4}°{}",
            input.birth_datetime.to_rfc3339(),
            input.latitude,
            input.longitude,
            if input.date_only { " (date only)" } else { "" }
        )?;
        writeln!(
            f,
            "Houses: {} | Rulers: {} | Positions: {}",
            settings.house_system,
            settings.rulers_scheme,
            if settings.libraries.jpl_ephemeris {
                "JPL ephemeris"
            } else {
                "mean motion (approximate)"
            }
        )?;

        writeln!(f, "\nPlanets")?;
        for (body, p) in &chart.planets {
            writeln!(
                f,
                "  {:<8} {}{}",
                body.name(),
                position(p.ecliptic_longitude),
                if p.retrograde { " R" } else { "" }
            )?;
        }

        writeln!(f, "\nAngles")?;
        angle_line(f, "  Asc", chart.ascendant.as_ref())?;
        angle_line(f, "  MC", chart.midheaven.as_ref())?;

        if !chart.houses.is_empty() {
            writeln!(f, "\nHouses")?;
            for cusp in &chart.houses {
                writeln!(f, "  {:>2}  {}", cusp.house, position(cusp.cusp_longitude))?;
            }
        }

        writeln!(f, "\nAspects")?;
        if chart.aspects.is_empty() {
            writeln!(f, "  none")?;
        }
        for a in &chart.aspects {
            writeln!(
                f,
                "  {} {} {} (separation {:.2}°, off by {:.2}°, orb {:.1}°)",
                a.planet1, a.aspect, a.planet2, a.separation, a.difference, a.orb_allowed
            )?;
        }

        writeln!(f, "\nMutual receptions")?;
        if chart.mutual_receptions.is_empty() {
            writeln!(f, "  none")?;
        }
        for r in &chart.mutual_receptions {
            writeln!(
                f,
                "  {} in {} / {} in {} ({})",
                r.planet1, r.signs[0], r.planet2, r.signs[1], r.scheme
            )?;
        }

        for fb in &settings.fallbacks {
            writeln!(
                f,
                "\nNote: {} used instead of {}: {}",
                fb.used, fb.requested, fb.reason
            )?;
        }
        Ok(())
    }
}
