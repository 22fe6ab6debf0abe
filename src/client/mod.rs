//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::Instrument;

use crate::domain::{
    Alfaname, AlfanameCommand, BalanceResponse, CampaignDetailResponse, CampaignId,
    CampaignInfoResponse, Credentials, MessageStatus, SendSms, SendSmsResponse, StateCode,
    StateListResponse, ValidationError,
};
use crate::transport::{self, TransportError};

const DEFAULT_ENDPOINT: &str = "http://sms-fly.com/api/api.php";
const XML_CONTENT_TYPE: &str = "text/xml";
/// Plain-text body SMS-Fly returns instead of XML when basic auth fails.
const ACCESS_DENIED_BODY: &str = "Access denied! Incorrect login or password.";

type BoxError = Box<dyn StdError + Send + Sync>;
type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_xml<'a>(
        &'a self,
        url: &'a str,
        credentials: &'a Credentials,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_xml<'a>(
        &'a self,
        url: &'a str,
        credentials: &'a Credentials,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .basic_auth(
                    credentials.login().as_str(),
                    Some(credentials.password().as_str()),
                )
                .header(CONTENT_TYPE, XML_CONTENT_TYPE)
                .header(ACCEPT, XML_CONTENT_TYPE)
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsFlyClient`].
///
/// This error preserves:
/// - HTTP-level failures (non-2xx status or transport failures),
/// - authentication failures reported in the plain-text body,
/// - API-level failures (a `state` code other than `ACCEPT`),
/// - validation/parse failures.
pub enum SmsFlyError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The server rejected the login/password pair.
    #[error("access denied: incorrect login or password")]
    AccessDenied,

    /// SMS-Fly answered with a state code that is not `ACCEPT`.
    #[error("API error {code}: {}", describe_state(.code, .text))]
    Api {
        code: StateCode,
        text: Option<String>,
    },

    /// Response body could not be parsed as the expected XML shape.
    #[error("parse error: {0}")]
    Parse(#[source] BoxError),

    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[source] url::ParseError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn describe_state(code: &StateCode, text: &Option<String>) -> String {
    code.description()
        .or(text.as_deref())
        .unwrap_or("unknown state code")
        .to_owned()
}

#[derive(Debug, Clone)]
/// Builder for [`SmsFlyClient`].
///
/// Use this when you need to customize the endpoint, timeout, or user-agent.
pub struct SmsFlyClientBuilder {
    credentials: Credentials,
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SmsFlyClientBuilder {
    /// Create a builder with the default endpoint and no timeout/user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`SmsFlyClient`].
    ///
    /// Fails with [`SmsFlyError::InvalidEndpoint`] when the endpoint does not parse as a URL.
    pub fn build(self) -> Result<SmsFlyClient, SmsFlyError> {
        let endpoint = url::Url::parse(&self.endpoint).map_err(SmsFlyError::InvalidEndpoint)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| SmsFlyError::Transport(Box::new(err)))?;

        Ok(SmsFlyClient {
            credentials: self.credentials,
            endpoint: endpoint.into(),
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level SMS-Fly client.
///
/// Every operation renders an XML request, POSTs it with basic authentication to a single
/// endpoint (`http://sms-fly.com/api/api.php` by default) and decodes the XML answer.
pub struct SmsFlyClient {
    credentials: Credentials,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl SmsFlyClient {
    /// Create a client using the default endpoint.
    ///
    /// For more customization, use [`SmsFlyClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> SmsFlyClientBuilder {
        SmsFlyClientBuilder::new(credentials)
    }

    /// Send one message to one or more recipients.
    ///
    /// Errors:
    /// - [`SmsFlyError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`SmsFlyError::AccessDenied`] for rejected credentials,
    /// - [`SmsFlyError::Api`] when the returned state code is not `ACCEPT`.
    pub async fn send_sms(&self, request: SendSms) -> Result<SendSmsResponse, SmsFlyError> {
        let operation = transport::SEND_SMS_OPERATION;
        let body = self
            .execute(operation, transport::encode_send_sms_xml(&request))
            .await?;
        let parsed = decode(operation, &body, transport::decode_send_sms_xml_response)?;

        if !parsed.state.is_accepted() {
            if parsed.state.known().is_none() {
                tracing::warn!(operation, code = %parsed.state, body = %body, "unknown state code");
            }
            return Err(SmsFlyError::Api {
                code: parsed.state,
                text: parsed.text,
            });
        }

        Ok(parsed)
    }

    /// Current account balance.
    pub async fn get_balance(&self) -> Result<BalanceResponse, SmsFlyError> {
        let operation = transport::GET_BALANCE_OPERATION;
        let body = self
            .execute(operation, transport::encode_get_balance_xml())
            .await?;
        decode(operation, &body, transport::decode_balance_xml_response)
    }

    /// Campaign attributes and per-status message counts.
    pub async fn get_campaign_info(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<CampaignInfoResponse, SmsFlyError> {
        let operation = transport::GET_CAMPAIGN_INFO_OPERATION;
        let body = self
            .execute(operation, transport::encode_campaign_info_xml(campaign_id))
            .await?;
        decode(operation, &body, transport::decode_campaign_info_xml_response)
    }

    /// Campaign attributes and one attribute map per message.
    pub async fn get_campaign_detail(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<CampaignDetailResponse, SmsFlyError> {
        let operation = transport::GET_CAMPAIGN_DETAIL_OPERATION;
        let body = self
            .execute(operation, transport::encode_campaign_detail_xml(campaign_id))
            .await?;
        decode(
            operation,
            &body,
            transport::decode_campaign_detail_xml_response,
        )
    }

    /// Delivery status of one recipient within a campaign.
    pub async fn get_message_status(
        &self,
        request: MessageStatus,
    ) -> Result<StateListResponse, SmsFlyError> {
        let operation = transport::GET_MESSAGE_STATUS_OPERATION;
        let body = self
            .execute(operation, transport::encode_message_status_xml(&request))
            .await?;
        decode(operation, &body, transport::decode_state_list_xml_response)
    }

    /// Run one `MANAGEALFANAME` sub-command.
    pub async fn manage_alfaname(
        &self,
        command: AlfanameCommand,
    ) -> Result<StateListResponse, SmsFlyError> {
        let operation = transport::MANAGE_ALFANAME_OPERATION;
        let span = tracing::debug_span!("smsfly.alfaname", command = command.id());
        let body = self
            .execute(operation, transport::encode_alfaname_xml(&command))
            .instrument(span)
            .await?;
        decode(operation, &body, transport::decode_state_list_xml_response)
    }

    /// Submit a new sender name for registration.
    pub async fn add_alfaname(&self, name: Alfaname) -> Result<StateListResponse, SmsFlyError> {
        self.manage_alfaname(AlfanameCommand::Add(name)).await
    }

    /// Registration state of a sender name.
    pub async fn check_alfaname(&self, name: Alfaname) -> Result<StateListResponse, SmsFlyError> {
        self.manage_alfaname(AlfanameCommand::Check(name)).await
    }

    /// All sender names of the account.
    pub async fn get_alfanames_list(&self) -> Result<StateListResponse, SmsFlyError> {
        self.manage_alfaname(AlfanameCommand::List).await
    }

    async fn execute(&self, operation: &'static str, xml: String) -> Result<String, SmsFlyError> {
        let span = tracing::debug_span!("smsfly.request", operation);
        self.post(xml).instrument(span).await
    }

    async fn post(&self, xml: String) -> Result<String, SmsFlyError> {
        let response = self
            .http
            .post_xml(&self.endpoint, &self.credentials, xml)
            .await
            .map_err(SmsFlyError::Transport)?;
        tracing::debug!(status = response.status, "received response");

        // Checked regardless of status: failed basic auth may come back as 401.
        if response.body.trim() == ACCESS_DENIED_BODY {
            tracing::warn!(login = self.credentials.login().as_str(), "access denied");
            return Err(SmsFlyError::AccessDenied);
        }

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(SmsFlyError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(response.body)
    }
}

fn decode<T>(
    operation: &'static str,
    body: &str,
    decoder: impl FnOnce(&str) -> Result<T, TransportError>,
) -> Result<T, SmsFlyError> {
    decoder(body).map_err(|err| match err {
        TransportError::Rejected { code, text } => {
            tracing::warn!(operation, code = %code, "request rejected");
            SmsFlyError::Api {
                code: StateCode::new(code),
                text,
            }
        }
        other => {
            tracing::warn!(operation, error = %other, body, "undecodable response");
            SmsFlyError::Parse(Box::new(other))
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use crate::domain::{MessageText, RawPhoneNumber, SendOptions};

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        last_url: Option<String>,
        last_login: Option<String>,
        last_body: Option<String>,
        response_status: u16,
        response_body: String,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_url: None,
                    last_login: None,
                    last_body: None,
                    response_status,
                    response_body: response_body.into(),
                })),
            }
        }

        fn last_request(&self) -> (Option<String>, Option<String>, String) {
            let state = self.state.lock().unwrap();
            (
                state.last_url.clone(),
                state.last_login.clone(),
                state.last_body.clone().unwrap_or_default(),
            )
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_xml<'a>(
            &'a self,
            url: &'a str,
            credentials: &'a Credentials,
            body: String,
        ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
            Box::pin(async move {
                let (status, body) = {
                    let mut state = self.state.lock().unwrap();
                    state.last_url = Some(url.to_owned());
                    state.last_login = Some(credentials.login().as_str().to_owned());
                    state.last_body = Some(body);
                    (state.response_status, state.response_body.clone())
                };
                Ok(HttpResponse { status, body })
            })
        }
    }

    fn make_client(transport: FakeTransport) -> SmsFlyClient {
        SmsFlyClient {
            credentials: Credentials::new("user", "pass").unwrap(),
            endpoint: "https://example.invalid/api/api.php".to_owned(),
            http: Arc::new(transport),
        }
    }

    fn send_request() -> SendSms {
        SendSms::to_one(
            RawPhoneNumber::new("380501234567").unwrap(),
            MessageText::new("hello").unwrap(),
            SendOptions::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn send_sms_posts_xml_and_parses_accept() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<message>
  <state code="ACCEPT" campaignID="1234" date="2024-05-01 10:00:01">accepted</state>
  <to recipient="380501234567" status="ACCEPTED" />
</message>"#;
        let transport = FakeTransport::new(200, xml);
        let client = make_client(transport.clone());

        let response = client.send_sms(send_request()).await.unwrap();
        assert!(response.state.is_accepted());
        assert_eq!(response.campaign_id.as_deref(), Some("1234"));
        assert_eq!(response.recipients.len(), 1);

        let (url, login, body) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/api/api.php"));
        assert_eq!(login.as_deref(), Some("user"));
        assert!(body.contains("<operation>SENDSMS</operation>"));
        assert!(body.contains("<recipient>380501234567</recipient>"));
        assert!(body.contains("<body>hello</body>"));
    }

    #[tokio::test]
    async fn send_sms_maps_error_state_to_api_error() {
        let xml = r#"<message><state code="ERRPHONES" /></message>"#;
        let client = make_client(FakeTransport::new(200, xml));

        let err = client.send_sms(send_request()).await.unwrap_err();
        match &err {
            SmsFlyError::Api { code, text } => {
                assert_eq!(code.as_str(), "ERRPHONES");
                assert_eq!(text, &None);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "API error ERRPHONES: Invalid recipient phone number."
        );
    }

    #[tokio::test]
    async fn send_sms_maps_unknown_state_to_api_error() {
        let xml = r#"<message><state code="MAINTENANCE">try later</state></message>"#;
        let client = make_client(FakeTransport::new(200, xml));

        let err = client.send_sms(send_request()).await.unwrap_err();
        assert_eq!(err.to_string(), "API error MAINTENANCE: try later");
    }

    #[tokio::test]
    async fn access_denied_body_maps_to_access_denied() {
        let client = make_client(FakeTransport::new(
            200,
            "Access denied! Incorrect login or password.\n",
        ));

        let err = client.get_balance().await.unwrap_err();
        assert!(matches!(err, SmsFlyError::AccessDenied));
    }

    #[tokio::test]
    async fn access_denied_body_wins_over_http_status() {
        let client = make_client(FakeTransport::new(
            401,
            "Access denied! Incorrect login or password.",
        ));

        let err = client.get_balance().await.unwrap_err();
        assert!(matches!(err, SmsFlyError::AccessDenied));
    }

    #[tokio::test]
    async fn non_success_http_status_is_preserved() {
        let client = make_client(FakeTransport::new(503, "oops"));
        let err = client.get_balance().await.unwrap_err();
        assert!(matches!(
            err,
            SmsFlyError::HttpStatus {
                status: 503,
                body: Some(_)
            }
        ));

        let client = make_client(FakeTransport::new(500, "   "));
        let err = client.get_balance().await.unwrap_err();
        assert!(matches!(
            err,
            SmsFlyError::HttpStatus {
                status: 500,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn invalid_xml_maps_to_parse_error() {
        let client = make_client(FakeTransport::new(200, "<message><balance>1</message>"));
        let err = client.get_balance().await.unwrap_err();
        assert!(matches!(err, SmsFlyError::Parse(_)));
    }

    #[tokio::test]
    async fn get_balance_returns_balance_text() {
        let transport = FakeTransport::new(200, "<message><balance>99.10</balance></message>");
        let client = make_client(transport.clone());

        let balance = client.get_balance().await.unwrap();
        assert_eq!(balance.balance, "99.10");

        let (_, _, body) = transport.last_request();
        assert!(body.contains("<operation>GETBALANCE</operation>"));
    }

    #[tokio::test]
    async fn get_balance_maps_state_code_to_api_error() {
        let client = make_client(FakeTransport::new(
            200,
            r#"<message><state code="XMLERROR" /></message>"#,
        ));
        let err = client.get_balance().await.unwrap_err();
        assert!(matches!(err, SmsFlyError::Api { ref code, .. } if code.as_str() == "XMLERROR"));
    }

    #[tokio::test]
    async fn campaign_operations_send_campaign_id() {
        let xml = r#"<message><campaign campaignID="77" status="COMPLETE"><state status="DELIVERED" messages="5" /><message recipient="380501234567" status="DELIVERED" /></campaign></message>"#;
        let transport = FakeTransport::new(200, xml);
        let client = make_client(transport.clone());
        let id = CampaignId::from(77);

        let info = client.get_campaign_info(&id).await.unwrap();
        assert_eq!(info.states.get("DELIVERED").map(String::as_str), Some("5"));
        let (_, _, body) = transport.last_request();
        assert!(body.contains("<operation>GETCAMPAIGNINFO</operation><message campaignID=\"77\" />"));

        let detail = client.get_campaign_detail(&id).await.unwrap();
        assert_eq!(detail.messages.len(), 1);
        let (_, _, body) = transport.last_request();
        assert!(body.contains("<operation>GETCAMPAIGNDETAIL</operation>"));
    }

    #[tokio::test]
    async fn message_status_and_alfaname_return_state_lists() {
        let xml = r#"<message><state campaignID="77" recipient="380501234567" status="DELIVERED" /></message>"#;
        let transport = FakeTransport::new(200, xml);
        let client = make_client(transport.clone());

        let status = client
            .get_message_status(MessageStatus::new(
                CampaignId::from(77),
                RawPhoneNumber::new("380501234567").unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(
            status.single().and_then(|s| s.get("status")).map(String::as_str),
            Some("DELIVERED")
        );
        let (_, _, body) = transport.last_request();
        assert!(body.contains("recipient=\"380501234567\""));

        client
            .check_alfaname(Alfaname::new("Shop").unwrap())
            .await
            .unwrap();
        let (_, _, body) = transport.last_request();
        assert!(body.contains("<command id=\"CHECKALFANAME\" alfaname=\"Shop\" />"));

        client
            .add_alfaname(Alfaname::new("Shop").unwrap())
            .await
            .unwrap();
        let (_, _, body) = transport.last_request();
        assert!(body.contains("<command id=\"ADDALFANAME\" alfaname=\"Shop\" />"));

        client.get_alfanames_list().await.unwrap();
        let (_, _, body) = transport.last_request();
        assert!(body.contains("<command id=\"GETALFANAMESLIST\" />"));
    }

    #[test]
    fn builder_validates_endpoint() {
        let credentials = Credentials::new("user", "pass").unwrap();

        let client = SmsFlyClient::builder(credentials.clone())
            .endpoint("https://example.invalid/api/api.php")
            .timeout(Duration::from_secs(5))
            .user_agent("smsfly-tests")
            .build()
            .unwrap();
        assert_eq!(client.endpoint, "https://example.invalid/api/api.php");

        let err = SmsFlyClient::builder(credentials)
            .endpoint("not a url")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SmsFlyError::InvalidEndpoint(_)));
    }

    #[test]
    fn default_endpoint_is_used() {
        let client = SmsFlyClient::new(Credentials::new("user", "pass").unwrap());
        assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
    }
}
