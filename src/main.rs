use clap::Parser;
use correios_frete::utils::logger;
use correios_frete::{lookup_address, CorreiosClient, CorreiosConfig, QuoteRequest};

#[derive(Debug, Parser)]
#[command(name = "correios-frete")]
#[command(about = "Cotação de frete (preço + prazo) pela API de contrato dos Correios")]
struct Cli {
    /// Destination CEP, with or without formatting
    #[arg(long, default_value = "01310-100")]
    cep_destino: String,

    /// Weight in kg
    #[arg(long)]
    peso: Option<f64>,

    /// Length in cm
    #[arg(long)]
    comprimento: Option<f64>,

    /// Width in cm
    #[arg(long)]
    largura: Option<f64>,

    /// Height in cm
    #[arg(long)]
    altura: Option<f64>,

    /// Declared value in BRL
    #[arg(long)]
    valor_declarado: Option<f64>,

    /// Service codes, comma separated (default: SEDEX + PAC contract pair)
    #[arg(long, value_delimiter = ',')]
    servicos: Vec<String>,

    /// Also look up the destination address via ViaCEP
    #[arg(long)]
    endereco: bool,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let config = match CorreiosConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let client = CorreiosClient::new(config)?;
    if let Err(e) = client.validate_configuration() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{e}");
        std::process::exit(1);
    }

    if cli.endereco {
        match lookup_address(&cli.cep_destino).await {
            Ok(Some(endereco)) => {
                println!(
                    "Destino: {}, {} - {}/{}",
                    endereco.logradouro, endereco.bairro, endereco.localidade, endereco.uf
                );
            }
            Ok(None) => println!("Destino: CEP não encontrado no ViaCEP"),
            Err(e) => tracing::warn!("ViaCEP lookup failed: {}", e),
        }
    }

    let request = QuoteRequest {
        cep_destino: cli.cep_destino.clone(),
        peso: cli.peso,
        comprimento: cli.comprimento,
        largura: cli.largura,
        altura: cli.altura,
        valor_declarado: cli.valor_declarado,
        servicos: if cli.servicos.is_empty() {
            None
        } else {
            Some(cli.servicos.clone())
        },
    };

    tracing::info!("Calculando frete para {}", cli.cep_destino);
    match client.calculate_quote(&request).await {
        Ok(resultado) => {
            for servico in &resultado.servicos {
                match &servico.msg_erro {
                    Some(erro) => println!("  {}: erro - {}", servico.nome, erro),
                    None => println!(
                        "  {}: R$ {:.2} - {} dias úteis",
                        servico.nome, servico.valor, servico.prazo
                    ),
                }
            }
        }
        Err(e) => {
            tracing::error!("Quote failed: {}", e);
            eprintln!("{e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
