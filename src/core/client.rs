use crate::config::CorreiosConfig;
use crate::core::merge::merge_quotes;
use crate::core::services::DEFAULT_SERVICES;
use crate::domain::model::{ConnectionStatus, QuoteRequest, QuoteResult};
use crate::domain::wire::{
    DeadlineItem, DeadlineRecord, DeadlineRequest, PriceItem, PriceRecord, PriceRequest,
    RecordsPayload, TokenResponse,
};
use crate::utils::error::{CorreiosError, Result};
use crate::utils::validation::{
    clamp_dimension, normalize_cep, round_dimension, weight_to_grams, ALTURA_MINIMA_CM,
    COMPRIMENTO_MINIMO_CM, LARGURA_MINIMA_CM, PESO_MINIMO_KG,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Local;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// Tokens are valid for one hour; refresh after 50 minutes to stay clear of
/// the boundary.
const TOKEN_TTL: Duration = Duration::from_secs(50 * 60);

/// Candidate paths per resource. The API has moved these around between
/// versions; a 404 means "try the next one", anything else is final.
const PRICE_ENDPOINTS: &[&str] = &["/preco/v1/nacional", "/preco/v1", "/api/preco/v1/nacional"];
const DEADLINE_ENDPOINTS: &[&str] = &["/prazo/v1/nacional", "/prazo/v1", "/api/prazo/v1/nacional"];

/// State bound to one acquired token. The contract and DR are the ones the
/// server associated with the token, which take precedence over the
/// configured values for the rest of the session.
#[derive(Debug, Clone)]
struct Session {
    token: String,
    obtained_at: Instant,
    contrato: String,
    dr: Option<u32>,
}

impl Session {
    fn is_expired(&self) -> bool {
        self.obtained_at.elapsed() > TOKEN_TTL
    }
}

/// Client for the Correios contract API: token lifecycle plus the combined
/// price/delivery-time quote.
pub struct CorreiosClient {
    config: CorreiosConfig,
    http: Client,
    api_base: String,
    token_base: String,
    session: Mutex<Option<Session>>,
}

impl CorreiosClient {
    /// Builds a client against the hosts selected by `config.ambiente`. No
    /// network traffic happens until the first authenticated call.
    pub fn new(config: CorreiosConfig) -> Result<Self> {
        let ambiente = config.ambiente;
        Self::with_base_urls(config, ambiente.api_base(), ambiente.token_base())
    }

    /// Same as [`new`](Self::new) but with explicit base URLs, for test
    /// servers and proxies.
    pub fn with_base_urls(
        config: CorreiosConfig,
        api_base: impl Into<String>,
        token_base: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| CorreiosError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token_base: token_base.into().trim_end_matches('/').to_string(),
            session: Mutex::new(None),
        })
    }

    /// Synchronous credential check, no network. Fails if contract,
    /// postage card or access code is missing.
    pub fn validate_configuration(&self) -> Result<()> {
        self.config.validate()
    }

    /// Acquires a token and reports the outcome without ever failing.
    pub async fn verify_connection(&self) -> ConnectionStatus {
        match self.obtain_token().await {
            Ok(_) => ConnectionStatus {
                conectado: true,
                mensagem: "Connection with the Correios API OK".to_string(),
            },
            Err(e) => ConnectionStatus {
                conectado: false,
                mensagem: e.to_string(),
            },
        }
    }

    /// Authenticates against the token endpoint and caches the session.
    ///
    /// The postage-card endpoint is tried first; a 401/403 there falls back
    /// to the generic endpoint with an empty body. Any other failure
    /// propagates as-is.
    pub async fn obtain_token(&self) -> Result<String> {
        Ok(self.acquire_session().await?.token)
    }

    /// Requests price and delivery time for every service code and merges
    /// them into one result, keyed by service code.
    pub async fn calculate_quote(&self, request: &QuoteRequest) -> Result<QuoteResult> {
        let session = self.ensure_session().await?;

        let cep_destino = normalize_cep("cepDestino", &request.cep_destino)?;
        let cep_origem = self.config.cep_origem.as_deref().ok_or_else(|| {
            CorreiosError::validation("origin CEP is required; set CORREIOS_CEP_ORIGEM")
        })?;
        let cep_origem = normalize_cep("cepOrigem", cep_origem)?;

        let dr = session.dr.unwrap_or(0);
        let servicos: Vec<String> = request
            .servicos
            .clone()
            .unwrap_or_else(|| DEFAULT_SERVICES.iter().map(|s| s.to_string()).collect());

        let peso = clamp_dimension(request.peso, PESO_MINIMO_KG);
        let comprimento = clamp_dimension(request.comprimento, COMPRIMENTO_MINIMO_CM);
        let largura = clamp_dimension(request.largura, LARGURA_MINIMA_CM);
        let altura = clamp_dimension(request.altura, ALTURA_MINIMA_CM);
        let dt_evento = Local::now().format("%d-%m-%Y").to_string();

        let price_request = PriceRequest {
            id_lote: "1".to_string(),
            parametros_produto: servicos
                .iter()
                .map(|codigo| PriceItem {
                    cep_origem: cep_origem.clone(),
                    cep_destino: cep_destino.clone(),
                    nu_contrato: session.contrato.clone(),
                    nu_dr: dr,
                    nu_requisicao: "1".to_string(),
                    tp_objeto: "2".to_string(),
                    dt_evento: dt_evento.clone(),
                    altura: round_dimension(altura).to_string(),
                    largura: round_dimension(largura).to_string(),
                    diametro: "0".to_string(),
                    comprimento: round_dimension(comprimento).to_string(),
                    ps_objeto: weight_to_grams(peso).to_string(),
                    co_produto: codigo.clone(),
                    vl_declarado: request.valor_declarado.map(|v| v.to_string()),
                })
                .collect(),
        };

        let deadline_request = DeadlineRequest {
            id_lote: "1".to_string(),
            parametros_prazo: servicos
                .iter()
                .map(|codigo| DeadlineItem {
                    cep_origem: cep_origem.clone(),
                    cep_destino: cep_destino.clone(),
                    co_produto: codigo.clone(),
                    nu_requisicao: "1".to_string(),
                    dt_evento: dt_evento.clone(),
                })
                .collect(),
        };

        tracing::debug!(
            origem = %cep_origem,
            destino = %cep_destino,
            servicos = servicos.len(),
            "fetching price and delivery time"
        );

        // A join, not a race: both must succeed. If either fails, the other
        // in-flight future is dropped with the error propagating.
        let (precos, prazos) = tokio::try_join!(
            self.fetch_price(&session.token, &price_request),
            self.fetch_deadline(&session.token, &deadline_request),
        )?;

        Ok(QuoteResult {
            servicos: merge_quotes(precos.into_records(), prazos.into_records()),
        })
    }

    /// Returns the cached session if it is still fresh, acquiring a new one
    /// otherwise. Refresh is always lazy; there is no background renewal.
    async fn ensure_session(&self) -> Result<Session> {
        if let Some(session) = self.session_lock().as_ref() {
            if !session.is_expired() {
                return Ok(session.clone());
            }
            tracing::debug!("cached token older than 50 minutes, reauthenticating");
        }
        self.acquire_session().await
    }

    async fn acquire_session(&self) -> Result<Session> {
        let usuario = self.config.usuario.as_deref().ok_or_else(|| {
            CorreiosError::config(
                "Meu Correios user is required for authentication; set CORREIOS_USUARIO",
            )
        })?;
        let basic = BASE64.encode(format!("{usuario}:{}", self.config.codigo_acesso));

        let mut body = serde_json::json!({
            "numero": self.config.cartao_postagem,
            "contrato": self.config.contrato,
        });
        if let Some(dr) = self.config.dr {
            body["dr"] = dr.into();
        }

        let response = match self
            .post_token("/v1/autentica/cartaopostagem", &basic, &body)
            .await
        {
            Ok(response) => response,
            Err(CorreiosError::Auth {
                status: Some(401 | 403),
                ..
            }) => {
                tracing::debug!("postage-card authentication rejected, trying generic endpoint");
                self.post_token("/v1/autentica", &basic, &serde_json::json!({}))
                    .await?
            }
            Err(e) => return Err(e),
        };

        let token = response.token.ok_or_else(|| CorreiosError::Auth {
            status: None,
            message: "token missing from authentication response".to_string(),
        })?;

        // The server may echo back the contract/DR it actually bound the
        // token to; those win over the configured values.
        let (contrato, dr) = if let Some(cartao) = &response.cartao_postagem {
            (
                cartao
                    .contrato
                    .clone()
                    .unwrap_or_else(|| self.config.contrato.clone()),
                cartao.dr.or(self.config.dr),
            )
        } else if let Some(contrato) = &response.contrato {
            (
                contrato
                    .numero
                    .clone()
                    .unwrap_or_else(|| self.config.contrato.clone()),
                contrato.dr.or(self.config.dr),
            )
        } else {
            (self.config.contrato.clone(), self.config.dr)
        };

        let session = Session {
            token,
            obtained_at: Instant::now(),
            contrato,
            dr,
        };
        // Concurrent acquisitions may race here; last write wins, which is
        // fine because tokens are interchangeable.
        *self.session_lock() = Some(session.clone());
        tracing::info!(ambiente = ?self.config.ambiente, "Correios token acquired");
        Ok(session)
    }

    async fn post_token(&self, path: &str, basic: &str, body: &Value) -> Result<TokenResponse> {
        let url = format!("{}{}", self.token_base, path);
        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Basic {basic}"))
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(CorreiosError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let payload: Value = response.json().await.unwrap_or(Value::Null);
            return Err(CorreiosError::Auth {
                status: Some(status.as_u16()),
                message: auth_error_message(status, &payload),
            });
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(CorreiosError::from_transport)
    }

    async fn fetch_price(
        &self,
        token: &str,
        body: &PriceRequest,
    ) -> Result<RecordsPayload<PriceRecord>> {
        self.post_with_probe(PRICE_ENDPOINTS, "price", token, body)
            .await
    }

    async fn fetch_deadline(
        &self,
        token: &str,
        body: &DeadlineRequest,
    ) -> Result<RecordsPayload<DeadlineRecord>> {
        self.post_with_probe(DEADLINE_ENDPOINTS, "delivery-time", token, body)
            .await
    }

    /// Tries each candidate path in order. A 404 moves on to the next
    /// candidate; any other failure aborts the probe immediately.
    async fn post_with_probe<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoints: &[&str],
        resource: &'static str,
        token: &str,
        body: &B,
    ) -> Result<T> {
        for endpoint in endpoints {
            let url = format!("{}{}", self.api_base, endpoint);
            let response = self
                .http
                .post(&url)
                .bearer_auth(token)
                .header("Accept", "application/json")
                .json(body)
                .send()
                .await
                .map_err(CorreiosError::from_transport)?;

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                tracing::debug!(endpoint = %endpoint, "endpoint not found, trying next candidate");
                continue;
            }
            if !status.is_success() {
                let payload: Value = response.json().await.unwrap_or(Value::Null);
                return Err(CorreiosError::RemoteApi {
                    status: status.as_u16(),
                    message: api_error_message(status, &payload),
                });
            }
            return response
                .json::<T>()
                .await
                .map_err(CorreiosError::from_transport);
        }
        Err(CorreiosError::EndpointNotFound { resource })
    }

    fn session_lock(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Token endpoint errors: `msgs[0]`, then `causa`, then the status text.
fn auth_error_message(status: StatusCode, body: &Value) -> String {
    first_msg(body)
        .or_else(|| {
            body.get("causa")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| status_text(status))
}

/// Quote endpoint errors: `msgs[0]`, then `mensagem`, `message`, `erro`,
/// then the status text.
fn api_error_message(status: StatusCode, body: &Value) -> String {
    first_msg(body)
        .or_else(|| string_field(body, "mensagem"))
        .or_else(|| string_field(body, "message"))
        .or_else(|| string_field(body, "erro"))
        .unwrap_or_else(|| status_text(status))
}

fn first_msg(body: &Value) -> Option<String> {
    body.get("msgs")
        .and_then(Value::as_array)
        .and_then(|msgs| msgs.first())
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn string_field(body: &Value, field: &str) -> Option<String> {
    body.get(field).and_then(Value::as_str).map(str::to_string)
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_aged(age: Duration) -> Session {
        Session {
            token: "t".to_string(),
            obtained_at: Instant::now().checked_sub(age).unwrap(),
            contrato: "9912345678".to_string(),
            dr: None,
        }
    }

    #[test]
    fn test_token_fresh_within_50_minutes() {
        assert!(!session_aged(Duration::from_secs(49 * 60)).is_expired());
        assert!(!session_aged(Duration::ZERO).is_expired());
    }

    #[test]
    fn test_token_expired_after_50_minutes() {
        assert!(session_aged(Duration::from_secs(51 * 60)).is_expired());
    }

    #[test]
    fn test_auth_error_message_preference() {
        let status = StatusCode::UNAUTHORIZED;
        let body = serde_json::json!({"msgs": ["Cartão inválido"], "causa": "credencial"});
        assert_eq!(auth_error_message(status, &body), "Cartão inválido");

        let body = serde_json::json!({"causa": "credencial"});
        assert_eq!(auth_error_message(status, &body), "credencial");

        assert_eq!(auth_error_message(status, &Value::Null), "Unauthorized");
    }

    #[test]
    fn test_api_error_message_preference() {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let body = serde_json::json!({"mensagem": "contrato suspenso", "erro": "x"});
        assert_eq!(api_error_message(status, &body), "contrato suspenso");

        let body = serde_json::json!({"erro": "falha interna"});
        assert_eq!(api_error_message(status, &body), "falha interna");

        assert_eq!(
            api_error_message(status, &Value::Null),
            "Internal Server Error"
        );
    }
}
