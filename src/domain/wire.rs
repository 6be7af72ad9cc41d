//! Payloads exchanged with the Correios API, field names as the carrier
//! defines them. Response records are deliberately lenient: the API has been
//! observed returning prices and delivery days as either strings or numbers,
//! and record lists either bare or wrapped in an `objetos` object.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: Option<String>,
    #[serde(rename = "expiraEm")]
    pub expira_em: Option<String>,
    pub emissao: Option<String>,
    pub ambiente: Option<String>,
    pub contrato: Option<TokenContrato>,
    #[serde(rename = "cartaoPostagem")]
    pub cartao_postagem: Option<TokenCartaoPostagem>,
}

#[derive(Debug, Deserialize)]
pub struct TokenContrato {
    pub numero: Option<String>,
    pub dr: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct TokenCartaoPostagem {
    pub numero: Option<String>,
    pub contrato: Option<String>,
    pub dr: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRequest {
    pub id_lote: String,
    pub parametros_produto: Vec<PriceItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceItem {
    pub cep_origem: String,
    pub cep_destino: String,
    pub nu_contrato: String,
    #[serde(rename = "nuDR")]
    pub nu_dr: u32,
    pub nu_requisicao: String,
    /// Object type: "2" is the parcel classification.
    pub tp_objeto: String,
    /// Quote date, dd-mm-yyyy.
    pub dt_evento: String,
    pub altura: String,
    pub largura: String,
    pub diametro: String,
    pub comprimento: String,
    /// Weight in whole grams.
    pub ps_objeto: String,
    pub co_produto: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vl_declarado: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineRequest {
    pub id_lote: String,
    pub parametros_prazo: Vec<DeadlineItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineItem {
    pub cep_origem: String,
    pub cep_destino: String,
    pub co_produto: String,
    pub nu_requisicao: String,
    pub dt_evento: String,
}

/// A record list that arrives either bare (`[...]`) or wrapped
/// (`{"objetos": [...]}`). This is the single normalization point; a future
/// API version changing the envelope only needs a variant here.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordsPayload<T> {
    Wrapped { objetos: Vec<T> },
    Bare(Vec<T>),
    Other(Value),
}

impl<T> RecordsPayload<T> {
    pub fn into_records(self) -> Vec<T> {
        match self {
            RecordsPayload::Wrapped { objetos } => objetos,
            RecordsPayload::Bare(records) => records,
            RecordsPayload::Other(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub co_produto: Option<String>,
    pub codigo: Option<String>,
    pub pc_final: Option<Value>,
    pub valor: Option<Value>,
    pub tx_erro: Option<String>,
}

impl PriceRecord {
    pub fn service_code(&self) -> Option<&str> {
        self.co_produto.as_deref().or(self.codigo.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineRecord {
    pub co_produto: Option<String>,
    pub codigo: Option<String>,
    pub prazo_entrega: Option<Value>,
    pub prazo: Option<Value>,
    pub tx_erro: Option<String>,
}

impl DeadlineRecord {
    pub fn service_code(&self) -> Option<&str> {
        self.co_produto.as_deref().or(self.codigo.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_payload_accepts_both_shapes() {
        let wrapped: RecordsPayload<PriceRecord> =
            serde_json::from_str(r#"{"objetos": [{"coProduto": "03220"}]}"#).unwrap();
        assert_eq!(wrapped.into_records().len(), 1);

        let bare: RecordsPayload<PriceRecord> =
            serde_json::from_str(r#"[{"coProduto": "03220"}, {"coProduto": "03298"}]"#).unwrap();
        assert_eq!(bare.into_records().len(), 2);

        let other: RecordsPayload<PriceRecord> = serde_json::from_str(r#"{"x": 1}"#).unwrap();
        assert!(other.into_records().is_empty());
    }

    #[test]
    fn test_price_item_serializes_carrier_field_names() {
        let item = PriceItem {
            cep_origem: "70002900".to_string(),
            cep_destino: "01310100".to_string(),
            nu_contrato: "9912345678".to_string(),
            nu_dr: 10,
            nu_requisicao: "1".to_string(),
            tp_objeto: "2".to_string(),
            dt_evento: "29-08-2026".to_string(),
            altura: "2".to_string(),
            largura: "11".to_string(),
            diametro: "0".to_string(),
            comprimento: "16".to_string(),
            ps_objeto: "300".to_string(),
            co_produto: "03220".to_string(),
            vl_declarado: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["cepOrigem"], "70002900");
        assert_eq!(json["nuDR"], 10);
        assert_eq!(json["psObjeto"], "300");
        assert_eq!(json["coProduto"], "03220");
        assert!(json.get("vlDeclarado").is_none());
    }
}
