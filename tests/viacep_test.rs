use anyhow::Result;
use correios_frete::adapters::viacep::lookup_address_with;
use correios_frete::CorreiosError;
use httpmock::prelude::*;

#[tokio::test]
async fn test_lookup_returns_address_for_known_cep() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/ws/01310100/json/");
        then.status(200).json_body(serde_json::json!({
            "cep": "01310-100",
            "logradouro": "Avenida Paulista",
            "complemento": "de 612 a 1510 - lado par",
            "bairro": "Bela Vista",
            "localidade": "São Paulo",
            "uf": "SP"
        }));
    });

    let http = reqwest::Client::new();
    let address = lookup_address_with(&http, &server.base_url(), "01310-100")
        .await?
        .expect("address expected");

    assert_eq!(address.logradouro, "Avenida Paulista");
    assert_eq!(address.localidade, "São Paulo");
    assert_eq!(address.uf, "SP");
    mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_lookup_returns_none_when_service_reports_unknown_cep() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/ws/99999999/json/");
        then.status(200).json_body(serde_json::json!({"erro": true}));
    });

    let http = reqwest::Client::new();
    let address = lookup_address_with(&http, &server.base_url(), "99999-999").await?;
    assert!(address.is_none());
    Ok(())
}

#[tokio::test]
async fn test_lookup_rejects_malformed_cep_without_network() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path_contains("/ws/");
        then.status(200).json_body(serde_json::json!({}));
    });

    let http = reqwest::Client::new();
    let err = lookup_address_with(&http, &server.base_url(), "123")
        .await
        .unwrap_err();

    assert!(matches!(err, CorreiosError::Validation { .. }));
    mock.assert_hits(0);
    Ok(())
}
