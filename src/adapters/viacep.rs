//! Address lookup via the public ViaCEP service. Independent of the carrier
//! client: no authentication, plain GET.

use crate::domain::model::Address;
use crate::utils::error::{CorreiosError, Result};
use crate::utils::validation::normalize_cep;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const VIACEP_BASE: &str = "https://viacep.com.br";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    /// Present (and truthy) when the CEP does not exist.
    erro: Option<Value>,
    #[serde(default)]
    cep: String,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    complemento: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

impl ViaCepResponse {
    fn not_found(&self) -> bool {
        match &self.erro {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s == "true",
            Some(_) => true,
            None => false,
        }
    }
}

/// Looks up the address for a CEP. `Ok(None)` means the service answered but
/// does not know the CEP; malformed CEPs fail before any network call.
pub async fn lookup_address(cep: &str) -> Result<Option<Address>> {
    let http = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| CorreiosError::config(format!("failed to build HTTP client: {e}")))?;
    lookup_address_with(&http, VIACEP_BASE, cep).await
}

/// Same as [`lookup_address`] but against an explicit base URL, for test
/// servers.
pub async fn lookup_address_with(
    http: &reqwest::Client,
    base_url: &str,
    cep: &str,
) -> Result<Option<Address>> {
    let cep = normalize_cep("cep", cep)?;
    let url = format!("{}/ws/{}/json/", base_url.trim_end_matches('/'), cep);

    let response = http
        .get(&url)
        .send()
        .await
        .map_err(CorreiosError::from_transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(CorreiosError::RemoteApi {
            status: status.as_u16(),
            message: format!("ViaCEP lookup failed for {cep}"),
        });
    }

    let body: ViaCepResponse = response
        .json()
        .await
        .map_err(CorreiosError::from_transport)?;

    if body.not_found() {
        return Ok(None);
    }

    Ok(Some(Address {
        cep: body.cep,
        logradouro: body.logradouro,
        complemento: body.complemento,
        bairro: body.bairro,
        localidade: body.localidade,
        uf: body.uf,
    }))
}
