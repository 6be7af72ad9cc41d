use serde::{Deserialize, Serialize};

/// One shipment to quote. Every dimension is optional; missing or undersized
/// values are raised to the carrier minimums before transmission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub cep_destino: String,
    /// Weight in kilograms.
    pub peso: Option<f64>,
    /// Length in centimeters.
    pub comprimento: Option<f64>,
    /// Width in centimeters.
    pub largura: Option<f64>,
    /// Height in centimeters.
    pub altura: Option<f64>,
    pub valor_declarado: Option<f64>,
    /// Service codes to quote; defaults to the contract SEDEX/PAC pair.
    pub servicos: Option<Vec<String>>,
}

impl QuoteRequest {
    pub fn new(cep_destino: impl Into<String>) -> Self {
        Self {
            cep_destino: cep_destino.into(),
            ..Self::default()
        }
    }
}

/// Price and delivery time for a single carrier service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceQuote {
    pub codigo: String,
    pub nome: String,
    /// Delivery time in business days.
    pub prazo: i64,
    pub valor: f64,
    pub entrega_domiciliar: bool,
    pub entrega_sabado: bool,
    pub erro: Option<String>,
    pub msg_erro: Option<String>,
}

/// Merged quote, one entry per service code the price endpoint answered for,
/// in the order the price endpoint returned them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResult {
    pub servicos: Vec<ServiceQuote>,
}

/// Outcome of [`verify_connection`](crate::CorreiosClient::verify_connection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub conectado: bool,
    pub mensagem: String,
}

/// A street address as returned by the ViaCEP lookup service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub cep: String,
    pub logradouro: String,
    pub complemento: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
}
