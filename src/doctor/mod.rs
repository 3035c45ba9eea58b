//! Doctor command for endpoint diagnostics
//!
//! Checks the configuration and, in remote mode, every endpoint a submission
//! could reach.

use colored::Colorize;

use crate::client::PredictionClient;
use crate::config::{Config, Mode};

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

impl HealthCheck {
    fn new(name: impl Into<String>, status: HealthStatus) -> Self {
        Self { name: name.into(), status }
    }
}

/// Doctor diagnostics system
pub struct Doctor {
    config: Config,
}

impl Doctor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run all health checks
    pub async fn run_diagnostics(&self) -> Vec<HealthCheck> {
        let mut checks = vec![self.check_config(), self.check_mode(), self.check_transport()];

        if self.config.validate().is_err() {
            return checks;
        }

        if self.config.assessment.mode != Mode::Remote {
            checks.push(HealthCheck::new(
                "Endpoints",
                HealthStatus::Warn(format!(
                    "Not contacted in {} mode",
                    self.config.assessment.mode.as_str()
                )),
            ));
            return checks;
        }

        let client = match PredictionClient::from_config(&self.config) {
            Ok(client) => client,
            Err(e) => {
                checks.push(HealthCheck::new("HTTP Client", HealthStatus::Fail(e.to_string())));
                return checks;
            }
        };

        for (idx, url) in client.endpoints().iter().enumerate() {
            let name = if idx == 0 {
                "Primary Endpoint".to_string()
            } else {
                format!("Backup Endpoint {}", idx)
            };
            checks.push(Self::check_endpoint(&client, name, url).await);
        }

        checks.push(Self::check_academic_options(&client).await);
        checks
    }

    fn check_config(&self) -> HealthCheck {
        match self.config.validate() {
            Ok(()) => HealthCheck::new("Configuration", HealthStatus::Pass),
            Err(e) => HealthCheck::new("Configuration", HealthStatus::Fail(e.to_string())),
        }
    }

    fn check_mode(&self) -> HealthCheck {
        let status = match self.config.assessment.mode {
            Mode::Remote => HealthStatus::Pass,
            Mode::Local => HealthStatus::Warn("Using local rules; remote service not consulted".to_string()),
            Mode::Mock => HealthStatus::Warn("Mock mode returns a fixed result".to_string()),
        };
        HealthCheck::new("Assessment Mode", status)
    }

    fn check_transport(&self) -> HealthCheck {
        if self.config.downgrade_enabled() {
            HealthCheck::new(
                "Transport",
                HealthStatus::Warn("Plain-http fallback is enabled".to_string()),
            )
        } else {
            HealthCheck::new("Transport", HealthStatus::Pass)
        }
    }

    async fn check_endpoint(client: &PredictionClient, name: String, url: &str) -> HealthCheck {
        match client.probe(url).await {
            Ok(()) => HealthCheck::new(name, HealthStatus::Pass),
            Err(e) => HealthCheck::new(name, HealthStatus::Fail(format!("{}: {}", url, e.user_message()))),
        }
    }

    async fn check_academic_options(client: &PredictionClient) -> HealthCheck {
        match client.academic_options().await {
            Ok(options) if !options.is_empty() => HealthCheck::new("Academic Options", HealthStatus::Pass),
            Ok(_) => HealthCheck::new(
                "Academic Options",
                HealthStatus::Warn("Service returned no options; built-in list will be used".to_string()),
            ),
            Err(e) => HealthCheck::new("Academic Options", HealthStatus::Warn(e.user_message())),
        }
    }

    /// Display diagnostics results
    pub fn display_results(checks: &[HealthCheck]) {
        println!("\nmindcheck Diagnostics\n");
        println!("{:<20} Status", "Check");
        println!("{}", "=".repeat(50));

        for check in checks {
            let message = match &check.status {
                HealthStatus::Pass => "PASS".green().to_string(),
                HealthStatus::Warn(msg) => format!("WARN: {}", msg).yellow().to_string(),
                HealthStatus::Fail(msg) => format!("FAIL: {}", msg).red().to_string(),
            };
            println!("{:<20} {}", check.name, message);
        }

        let failed = Self::failure_count(checks);
        println!();
        if failed == 0 {
            println!("{}", "All checks passed".green().bold());
        } else {
            println!("{}", format!("{} check(s) failed", failed).red().bold());
        }
    }

    pub fn failure_count(checks: &[HealthCheck]) -> usize {
        checks
            .iter()
            .filter(|c| matches!(c.status, HealthStatus::Fail(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_config_stops_before_network() {
        let mut config = Config::default();
        config.api.base_url = "localhost:5000".to_string();
        let checks = Doctor::new(config).run_diagnostics().await;

        assert_eq!(checks.len(), 3);
        assert!(matches!(checks[0].status, HealthStatus::Fail(_)));
        assert_eq!(Doctor::failure_count(&checks), 1);
    }

    #[test]
    fn test_mode_and_transport_warnings() {
        let mut config = Config::default();
        config.assessment.mode = Mode::Mock;
        config.api.insecure_fallback = true;
        let doctor = Doctor::new(config);

        assert!(matches!(doctor.check_mode().status, HealthStatus::Warn(_)));
        assert!(matches!(doctor.check_transport().status, HealthStatus::Warn(_)));
    }

    #[tokio::test]
    async fn test_offline_modes_skip_endpoints() {
        let closed = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}", listener.local_addr().unwrap())
        };

        for mode in [Mode::Local, Mode::Mock] {
            let mut config = Config::default();
            config.api.base_url = closed.clone();
            config.assessment.mode = mode;
            let checks = Doctor::new(config).run_diagnostics().await;

            assert_eq!(Doctor::failure_count(&checks), 0);
            let last = checks.last().unwrap();
            assert_eq!(last.name, "Endpoints");
            assert!(matches!(last.status, HealthStatus::Warn(_)));
        }
    }

    #[tokio::test]
    async fn test_remote_mode_reports_unreachable_endpoint() {
        let closed = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}", listener.local_addr().unwrap())
        };
        let mut config = Config::default();
        config.api.base_url = closed;
        config.api.timeout_secs = 2;
        let checks = Doctor::new(config).run_diagnostics().await;

        assert_eq!(Doctor::failure_count(&checks), 1);
        assert_eq!(checks[3].name, "Primary Endpoint");
    }
}
