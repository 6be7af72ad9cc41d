//! Joins the price and delivery-time responses into one quote per service.
//!
//! The join is deliberately lenient, matching the carrier's behavior: a price
//! record without a delivery-time match keeps its entry with `prazo = 0`, an
//! unparseable price becomes `0.0`, and a delivery-time record without a
//! price match produces no entry at all.

use crate::core::services::service_name;
use crate::domain::model::ServiceQuote;
use crate::domain::wire::{DeadlineRecord, PriceRecord};
use serde_json::Value;
use std::collections::HashMap;

pub fn merge_quotes(precos: Vec<PriceRecord>, prazos: Vec<DeadlineRecord>) -> Vec<ServiceQuote> {
    let prazo_map: HashMap<String, DeadlineRecord> = prazos
        .into_iter()
        .filter_map(|p| {
            let code = p.service_code()?.to_string();
            Some((code, p))
        })
        .collect();

    precos
        .into_iter()
        .map(|preco| {
            let codigo = preco
                .service_code()
                .map(str::to_string)
                .unwrap_or_else(|| "N/A".to_string());
            let prazo = prazo_map.get(&codigo);

            let valor = parse_decimal(preco.pc_final.as_ref().or(preco.valor.as_ref()));
            let dias = prazo
                .map(|p| parse_days(p.prazo_entrega.as_ref().or(p.prazo.as_ref())))
                .unwrap_or(0);

            // The price record's carrier error wins over the delivery-time one.
            let erro = preco
                .tx_erro
                .clone()
                .or_else(|| prazo.and_then(|p| p.tx_erro.clone()));

            ServiceQuote {
                nome: service_name(&codigo),
                codigo,
                prazo: dias,
                valor,
                entrega_domiciliar: true,
                entrega_sabado: false,
                erro: erro.clone(),
                msg_erro: erro,
            }
        })
        .collect()
}

/// Parses a carrier price, tolerating comma as the decimal separator and both
/// string and numeric JSON encodings. Anything unparseable is 0.
fn parse_decimal(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.replace(',', ".").parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn parse_days(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        _ => 0,
    }
}
