use std::time::Duration;
use shared::{SimulationSettings, ValidationPolicy};

pub struct Config {
    /// Spreadsheet endpoint. Without one, submissions go to the simulated transport.
    pub endpoint_url: Option<&'static str>,
    pub request_timeout: Duration,
    pub simulated_delay: Duration,
    pub simulated_failure_rate: f64,
    pub simulated_seed: Option<u64>,
    pub utc_offset_hours: i8,
    pub require_valid_email: bool,
    pub success_message_ttl: Option<Duration>,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            endpoint_url: option_env!("DATEVOTE_ENDPOINT"),
            request_timeout: Duration::from_secs(15),
            simulated_delay: Duration::from_millis(1500),
            simulated_failure_rate: 0.1,
            simulated_seed: None,
            utc_offset_hours: 8,
            require_valid_email: false,
            success_message_ttl: Some(Duration::from_secs(4)),
        }
    }

    pub const fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy { require_valid_email: self.require_valid_email }
    }

    pub const fn simulation(&self) -> SimulationSettings {
        SimulationSettings {
            delay: self.simulated_delay,
            failure_rate: self.simulated_failure_rate,
            seed: self.simulated_seed,
        }
    }
}

pub const CONFIG: Config = Config::new();
