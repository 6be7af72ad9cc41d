use crate::utils::error::{CorreiosError, Result};
use serde::{Deserialize, Serialize};

/// Which Correios deployment the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Producao,
    Homologacao,
}

impl Environment {
    pub fn api_base(&self) -> &'static str {
        match self {
            Environment::Producao => "https://api.correios.com.br",
            Environment::Homologacao => "https://apihom.correios.com.br",
        }
    }

    pub fn token_base(&self) -> &'static str {
        match self {
            Environment::Producao => "https://api.correios.com.br/token",
            Environment::Homologacao => "https://apihom.correios.com.br/token",
        }
    }
}

/// Contract credentials and defaults for the Correios client. Immutable once
/// the client is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorreiosConfig {
    pub contrato: String,
    pub cartao_postagem: String,
    pub codigo_acesso: String,
    pub usuario: Option<String>,
    pub cep_origem: Option<String>,
    /// Regional office (DR) code associated with the contract.
    pub dr: Option<u32>,
    #[serde(default)]
    pub ambiente: Environment,
}

impl CorreiosConfig {
    /// Loads configuration from `CORREIOS_*` environment variables, reading a
    /// `.env` file first if one is present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let ambiente = match std::env::var("CORREIOS_AMBIENTE").ok().as_deref() {
            Some("homologacao") => Environment::Homologacao,
            _ => Environment::Producao,
        };

        let dr = match std::env::var("CORREIOS_DR").ok() {
            Some(raw) => Some(raw.parse::<u32>().map_err(|_| {
                CorreiosError::config(format!("CORREIOS_DR must be numeric, got {raw:?}"))
            })?),
            None => None,
        };

        Ok(Self {
            contrato: required_var("CORREIOS_CONTRATO")?,
            cartao_postagem: required_var("CORREIOS_CARTAO_POSTAGEM")?,
            codigo_acesso: required_var("CORREIOS_CODIGO_ACESSO")?,
            usuario: std::env::var("CORREIOS_USUARIO").ok(),
            cep_origem: std::env::var("CORREIOS_CEP_ORIGEM").ok(),
            dr,
            ambiente,
        })
    }

    /// Checks the fields every authenticated call depends on. Synchronous, no
    /// network.
    pub fn validate(&self) -> Result<()> {
        required_field("contrato", &self.contrato)?;
        required_field("cartao_postagem", &self.cartao_postagem)?;
        required_field("codigo_acesso", &self.codigo_acesso)?;
        Ok(())
    }
}

fn required_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| CorreiosError::config(format!("environment variable {name} is not set")))
}

fn required_field(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CorreiosError::config(format!("{name} is not configured")));
    }
    Ok(())
}
