//! HTTP channel to the Kamereon car adapter
//!
//! Speaks the JSON:API dialect of the vehicle API. Credentials come from a
//! [`CredentialProvider`] so login and token refresh stay out of this module.

use crate::error::{Result, ZeChargeError};
use crate::logging::{LogContext, StructuredLogger, get_logger_with_context};
use crate::schedule::ChargeSchedules;
use crate::vehicle::{ChargeMode, VehicleChannel, charge_mode_command, charge_schedule_command};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Value, json};

const JSON_API: &str = "application/vnd.api+json";

/// Supplies the authentication headers for each request
#[async_trait::async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn auth_headers(&self) -> Result<Vec<(String, String)>>;
}

/// Fixed headers, e.g. an API key and an already issued id token
pub struct StaticCredentials {
    headers: Vec<(String, String)>,
}

impl StaticCredentials {
    pub fn new(headers: Vec<(String, String)>) -> Self {
        Self { headers }
    }
}

#[async_trait::async_trait]
impl CredentialProvider for StaticCredentials {
    async fn auth_headers(&self) -> Result<Vec<(String, String)>> {
        Ok(self.headers.clone())
    }
}

/// URL of a car adapter endpoint
pub fn car_adapter_url(
    root_url: &str,
    account_id: &str,
    version: u8,
    vin: &str,
    endpoint: &str,
) -> String {
    format!(
        "{}/commerce/v1/accounts/{}/kamereon/kca/car-adapter/v{}/cars/{}/{}",
        root_url.trim_end_matches('/'),
        account_id,
        version,
        vin,
        endpoint
    )
}

/// `data.attributes` of a JSON:API response body
pub fn response_attributes(body: &Value) -> Result<&Value> {
    body.get("data")
        .and_then(|d| d.get("attributes"))
        .ok_or_else(|| ZeChargeError::api("Response has no data.attributes"))
}

/// Vehicle channel over the Kamereon HTTP API
pub struct KamereonChannel {
    client: reqwest::Client,
    credentials: Box<dyn CredentialProvider>,
    root_url: String,
    account_id: String,
    vin: String,
    country: String,
    logger: StructuredLogger,
}

impl KamereonChannel {
    pub fn new(
        credentials: Box<dyn CredentialProvider>,
        root_url: String,
        account_id: String,
        vin: String,
        country: String,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        let logger = get_logger_with_context(LogContext::new("kamereon").with_vin(vin.clone()));
        Ok(Self {
            client,
            credentials,
            root_url,
            account_id,
            vin,
            country,
            logger,
        })
    }

    fn url(&self, version: u8, endpoint: &str) -> String {
        car_adapter_url(&self.root_url, &self.account_id, version, &self.vin, endpoint)
    }

    async fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_API));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_API));
        for (name, value) in self.credentials.auth_headers().await? {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ZeChargeError::auth(format!("Bad header name {}: {}", name, e)))?;
            let value = HeaderValue::from_str(&value)
                .map_err(|e| ZeChargeError::auth(format!("Bad header value: {}", e)))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    async fn get(&self, version: u8, endpoint: &str) -> Result<Value> {
        let url = self.url(version, endpoint);
        self.logger.debug(&format!("GET {}", url));
        let resp = self
            .client
            .get(&url)
            .headers(self.headers().await?)
            .query(&[("country", self.country.as_str())])
            .send()
            .await?;
        Self::read_body(resp).await
    }

    async fn post(&self, version: u8, endpoint: &str, data: Value) -> Result<Value> {
        let url = self.url(version, endpoint);
        self.logger.debug(&format!("POST {}", url));
        let resp = self
            .client
            .post(&url)
            .headers(self.headers().await?)
            .query(&[("country", self.country.as_str())])
            .json(&json!({ "data": data }))
            .send()
            .await?;
        Self::read_body(resp).await
    }

    async fn read_body(resp: reqwest::Response) -> Result<Value> {
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ZeChargeError::auth(format!("Vehicle API refused: {}", status)));
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ZeChargeError::api(format!("{}: {}", status, text)));
        }
        Ok(resp.json().await?)
    }
}

#[async_trait::async_trait]
impl VehicleChannel for KamereonChannel {
    async fn charge_schedules(&self) -> Result<ChargeSchedules> {
        let body = self.get(1, "charging-settings").await?;
        ChargeSchedules::from_value(response_attributes(&body)?)
    }

    async fn submit_charge_schedules(&self, payload: Value) -> Result<()> {
        let body = self
            .post(2, "actions/charge-schedule", charge_schedule_command(payload))
            .await?;
        self.logger.trace(&format!("Charge schedule accepted: {}", body));
        Ok(())
    }

    async fn charge_mode(&self) -> Result<ChargeMode> {
        let body = self.get(1, "charge-mode").await?;
        let raw = response_attributes(&body)?
            .get("chargeMode")
            .and_then(Value::as_str)
            .ok_or_else(|| ZeChargeError::api("Response has no chargeMode"))?;
        ChargeMode::from_label(raw)
            .ok_or_else(|| ZeChargeError::api(format!("Unknown charge mode {}", raw)))
    }

    async fn set_charge_mode(&self, mode: ChargeMode) -> Result<()> {
        self.post(1, "actions/charge-mode", charge_mode_command(mode))
            .await?;
        Ok(())
    }
}
