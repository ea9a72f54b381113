use clap::Args;
use kzone_core::{StrikeZone, Zone};

use super::config::ConfigArg;

#[derive(Debug, Clone, Args)]
pub(crate) struct ZoneArg {
    /// Horizontal plate location in feet (catcher's view, negative is left)
    #[arg(allow_negative_numbers = true)]
    x: f64,
    /// Vertical plate location in feet
    #[arg(allow_negative_numbers = true)]
    z: f64,
    #[clap(flatten)]
    config: ConfigArg,
}

pub(crate) fn run(arg: &ZoneArg) -> anyhow::Result<()> {
    let config = arg.config.load()?;
    let Some(zone) = classify(&config.strike_zone, arg.x, arg.z) else {
        anyhow::bail!("Location ({}, {}) cannot be classified", arg.x, arg.z);
    };
    println!("{}", describe(zone));
    Ok(())
}

fn classify(strike_zone: &StrikeZone, x: f64, z: f64) -> Option<Zone> {
    strike_zone.classify(Some(x), Some(z))
}

fn describe(zone: Zone) -> String {
    let area = if zone.is_strike() { "strike zone" } else { "ball zone" };
    format!("{zone} ({area})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let strike_zone = StrikeZone::default();
        let zone = classify(&strike_zone, 0.0, 2.5).unwrap();
        assert_eq!(describe(zone), "5 (strike zone)");
        let zone = classify(&strike_zone, -1.2, 4.0).unwrap();
        assert_eq!(describe(zone), "10 (ball zone)");
        assert_eq!(classify(&strike_zone, f64::NAN, 2.5), None);
    }
}
