use crate::app_config::Gpsd;
use crate::domain::Endpoint;
use clap::Parser;

/// Prints the current position reported by gpsd, or the last known one.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// gpsd host, defaults to `gpsd.host` from the configuration
    host: Option<String>,
    /// gpsd port, defaults to `gpsd.port` from the configuration
    port: Option<u16>,
    #[arg(hide = true)]
    extra: Vec<String>,
}

impl Cli {
    pub fn endpoint(&self, gpsd: &Gpsd) -> Endpoint {
        Endpoint::new(self.host.as_deref().unwrap_or(gpsd.host()), self.port.unwrap_or(gpsd.port()))
    }

    /// Positional arguments past host and port. These are ignored.
    pub fn extra(&self) -> &[String] {
        &self.extra
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(vec!["gpsfix"], Endpoint::new("127.0.0.1", 2947))]
    #[case(vec!["gpsfix", "gps.local"], Endpoint::new("gps.local", 2947))]
    #[case(vec!["gpsfix", "gps.local", "3000"], Endpoint::new("gps.local", 3000))]
    #[case(vec!["gpsfix", "gps.local", "3000", "extra"], Endpoint::new("gps.local", 3000))]
    fn endpoint_falls_back_to_the_configuration(#[case] args: Vec<&str>, #[case] expected: Endpoint) -> Result<(), clap::Error> {
        let config = AppConfigBuilder::new().build();

        let cli = Cli::try_parse_from(args)?;

        assert_eq!(cli.endpoint(config.gpsd()), expected);
        Ok(())
    }

    #[test]
    fn collects_extra_arguments() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from(["gpsfix", "localhost", "2947", "one", "two"])?;

        assert_eq!(cli.extra().to_vec(), vec!["one".to_string(), "two".to_string()]);
        Ok(())
    }

    #[test]
    fn rejects_a_port_that_is_not_a_number() {
        let result = Cli::try_parse_from(["gpsfix", "localhost", "gpsd"]);

        assert!(result.is_err());
    }
}
