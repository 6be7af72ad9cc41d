/// Contract product codes and their display names, from the Correios
/// commercial tables. Unknown codes fall back to `Serviço {code}`.
const SERVICE_NAMES: &[(&str, &str)] = &[
    ("03140", "SEDEX 12 CONTRATO AG"),
    ("03158", "SEDEX 10 CONTRATO AG"),
    ("03174", "SEDEX 12 REVERSO"),
    ("03182", "SEDEX 10 REVERSO"),
    ("03190", "SEDEX HOJE REVERSO"),
    ("03204", "SEDEX HOJE CONTRATO AG"),
    ("03212", "SEDEX CONTR GRAND FORMATO"),
    ("03220", "SEDEX CONTRATO AG"),
    ("03247", "SEDEX REVERSO"),
    ("03271", "SEDEX CONTRATO PGTO ENTREGA"),
    ("03298", "PAC CONTRATO AG"),
    ("03301", "PAC REVERSO"),
    ("03310", "PAC CONTRATO PGTO ENTREGA"),
    ("03328", "PAC CONTR GRAND FORMATO"),
    ("03662", "SEDEX HOJE EMPRESARIAL"),
    ("03972", "TRANSFER LOG"),
    ("04000", "PAC PC CONTRATO AG"),
    ("04090", "SEDEX PC CONTRATO AG"),
    ("04227", "CORREIOS MINI ENVIOS CTR AG"),
    ("04960", "DESVIO MINI ENVIOS AG"),
    ("04014", "SEDEX à vista"),
    ("04065", "SEDEX à vista pagamento na entrega"),
    ("04510", "PAC à vista"),
    ("04707", "PAC à vista pagamento na entrega"),
    ("40126", "SEDEX a Cobrar, sem contrato"),
    ("40215", "SEDEX 10, sem contrato"),
    ("40290", "SEDEX Hoje, sem contrato"),
    ("40096", "SEDEX com contrato"),
    ("40436", "SEDEX a Cobrar, com contrato"),
    ("40444", "SEDEX 10, com contrato"),
    ("40568", "SEDEX 12, com contrato"),
    ("40606", "SEDEX Hoje, com contrato"),
    ("41068", "PAC com contrato"),
    ("41106", "PAC a Cobrar, com contrato"),
];

/// Default service pair for a contract quote: SEDEX CONTRATO AG + PAC
/// CONTRATO AG.
pub const DEFAULT_SERVICES: &[&str] = &["03220", "03298"];

pub fn service_name(code: &str) -> String {
    SERVICE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| format!("Serviço {code}"))
}
