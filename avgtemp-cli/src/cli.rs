use anyhow::bail;
use clap::{Parser, Subcommand};

use avgtemp_core::{
    AverageService, Config, Coordinate, ProviderRegistry, ServiceId, model::COORDINATE_RANGE,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "avgtemp", version, about = "Average temperature CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Average the current temperature reported by the selected services.
    Average {
        /// Latitude, -180 to 180.
        #[arg(long = "lat")]
        latitude: f64,

        /// Longitude, -180 to 180.
        #[arg(long = "lon")]
        longitude: f64,

        /// Service to query; repeat for several, e.g.
        /// `--service NOAA --service ACCUWEATHER`.
        #[arg(long = "service", value_name = "NAME", required = true)]
        services: Vec<String>,
    },

    /// Configure the endpoint for a specific service.
    Configure {
        /// Service name, e.g. "NOAA" or "WEATHER_DOT_COM".
        service: String,
    },

    /// List the supported service names.
    Services,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Average { latitude, longitude, services } => {
                let coordinate = checked_coordinate(latitude, longitude)?;

                let config = Config::load()?;
                let registry = ProviderRegistry::from_config(&config);
                let average =
                    AverageService::new(registry).average_temp(&services, coordinate).await?;

                println!("average_temp: {average}");
            }
            Command::Configure { service } => {
                let id = ServiceId::try_from(service.as_str())?;

                let mut config = Config::load()?;
                let url = inquire::Text::new(&format!("Base URL for {id}:"))
                    .with_initial_value(&config.service_url(id))
                    .prompt()?;

                config.set_service_url(id, url);
                config.save()?;

                println!("Saved endpoint for {id} to {}", Config::config_file_path()?.display());
            }
            Command::Services => {
                for id in ServiceId::all() {
                    println!("{id}");
                }
            }
        }

        Ok(())
    }
}

/// Range-check both axes before anything reaches the core; the core
/// trusts its callers on this.
fn checked_coordinate(latitude: f64, longitude: f64) -> anyhow::Result<Coordinate> {
    if !COORDINATE_RANGE.contains(&latitude) {
        bail!("latitude {latitude} is outside the accepted range [-180, 180]");
    }
    if !COORDINATE_RANGE.contains(&longitude) {
        bail!("longitude {longitude} is outside the accepted range [-180, 180]");
    }

    Ok(Coordinate::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_in_range_coordinates() {
        let coordinate = checked_coordinate(33.3, 44.4).expect("in range");
        assert_eq!(coordinate, Coordinate::new(33.3, 44.4));

        assert!(checked_coordinate(-180.0, 180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        let err = checked_coordinate(180.5, 0.0).unwrap_err();
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        let err = checked_coordinate(0.0, -200.0).unwrap_err();
        assert!(err.to_string().contains("longitude"));
    }
}
