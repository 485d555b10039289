use json_auto::{typed, MapperBuilder, ObjSchema, Schema, Typed};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseType {
    #[default]
    #[serde(rename = "code")]
    Code,
    #[serde(rename = "code id_token")]
    CodeIdToken,
}

impl ResponseType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::CodeIdToken => "code id_token",
        }
    }
}

/// Signed request object passed by value in the `request` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestJwtContainer(pub String);

/// An authorization request as received at the authorization endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    pub client: ClientId,
    pub scopes: Vec<String>,
    pub redirect_uri: Url,
    pub state: Option<String>,
    #[serde(default)]
    pub response_type: ResponseType,
    #[serde(default)]
    pub nonce: Option<String>,
    #[serde(default)]
    pub request: Option<RequestJwtContainer>,
}

impl AuthRequest {
    pub const OIDC_SCOPE: &'static str = "openid";

    pub fn new(client: ClientId, scopes: Vec<String>, redirect_uri: Url, state: Option<String>) -> Self {
        Self {
            client,
            scopes,
            redirect_uri,
            state,
            response_type: ResponseType::default(),
            nonce: None,
            request: None,
        }
    }

    pub fn with_response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn with_request(mut self, request: RequestJwtContainer) -> Self {
        self.request = Some(request);
        self
    }

    /// True when the `openid` scope was requested, in any letter case.
    pub fn is_oidc(&self) -> bool {
        self.scopes
            .iter()
            .any(|scope| scope.to_lowercase() == Self::OIDC_SCOPE)
    }
}

typed!(
    ClientId => "ClientId",
    RequestJwtContainer => "RequestJwtContainer",
    AuthRequest => "AuthRequest",
);

impl Typed for ResponseType {
    fn schema() -> Schema {
        Schema::Str
    }
}

/// Registers the authorization request types with a mapper.
pub fn register(builder: MapperBuilder) -> MapperBuilder {
    builder.register_record(
        "AuthRequest",
        ObjSchema::new()
            .field("client", Schema::Str)
            .field("scopes", Vec::<String>::schema())
            .field("redirectUri", Schema::Str)
            .field("state", Schema::nullable(Schema::Str))
            .field("responseType", ResponseType::schema())
            .field("nonce", Schema::nullable(Schema::Str))
            .field("request", Schema::nullable(Schema::Str)),
    )
}
