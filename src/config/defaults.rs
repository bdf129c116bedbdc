use super::*;

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            console_level: None,
            file_level: None,
            file: "/tmp/zecharge/zecharge.log".to_string(),
            backup_count: 5,
            console_output: true,
            json_format: false,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            default_schedule_id: 1,
            use_utc: false,
        }
    }
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            vin: None,
            account_id: None,
            country: "GB".to_string(),
            api_url: "https://api-wired-prod-1-euw1.wrd-aws.com".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            timezone: "local".to_string(),
            schedule: ScheduleConfig::default(),
            vehicle: VehicleConfig::default(),
        }
    }
}
