use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use sepalib::{
    message::DirectDebitInitiation,
    model::{CreditorAccount, DebtorAccount, LocalInstrument, Mandate, SequenceType},
};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Seq {
    Frst,
    Rcur,
    Ooff,
    Fnal,
}

impl From<Seq> for SequenceType {
    fn from(s: Seq) -> Self {
        match s {
            Seq::Frst => SequenceType::Frst,
            Seq::Rcur => SequenceType::Rcur,
            Seq::Ooff => SequenceType::Ooff,
            Seq::Fnal => SequenceType::Fnal,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Instrument {
    Core,
    Cor1,
    B2b,
}

impl From<Instrument> for LocalInstrument {
    fn from(i: Instrument) -> Self {
        match i {
            Instrument::Core => LocalInstrument::Core,
            Instrument::Cor1 => LocalInstrument::Cor1,
            Instrument::B2b => LocalInstrument::B2b,
        }
    }
}

/// Данные кредитора (TOML-файл).
#[derive(Debug, Deserialize)]
struct CreditorConfig {
    name: String,
    iban: String,
    bic: String,
    creditor_id: String,
    /// Дата исполнения YYYY-MM-DD (ReqdColltnDt).
    collection_date: Option<String>,
    /// Имя инициатора, если отличается от кредитора.
    initiator: Option<String>,
}

/// Строка входного CSV: одна транзакция.
#[derive(Debug, Deserialize)]
struct TxRow {
    name: String,
    iban: String,
    bic: String,
    mandate_id: String,
    mandate_date: String,
    original_mandate_id: Option<String>,
    amount: String,
    remittance: String,
}

#[derive(Parser, Debug)]
#[command(name = "sepa", version, about = "Формирование SEPA pain.008 (Lastschrift) из CSV")]
struct Cli {
    /// Данные кредитора (TOML-файл)
    #[arg(short = 'c', long = "creditor")]
    creditor: String,

    /// Входной CSV с транзакциями (по умолчанию stdin)
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Выходной XML (по умолчанию stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Вид повторения
    #[arg(long = "sequence", value_enum, default_value = "ooff")]
    sequence: Seq,

    /// Вид списания
    #[arg(long = "instrument", value_enum, default_value = "core")]
    instrument: Instrument,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let cfg: CreditorConfig = toml::from_str(
        &std::fs::read_to_string(&cli.creditor)
            .with_context(|| format!("creditor config {}", cli.creditor))?,
    )
    .with_context(|| format!("creditor config {}", cli.creditor))?;

    let initiator = cfg.initiator.clone().unwrap_or_else(|| cfg.name.clone());
    let mut msg = DirectDebitInitiation::new(&initiator);

    let cdtr = CreditorAccount {
        name: cfg.name,
        iban: cfg.iban,
        bic: cfg.bic,
        creditor_id: cfg.creditor_id,
    };
    if msg.set_creditor(
        &cdtr,
        cfg.collection_date.as_deref(),
        cli.sequence.into(),
        cli.instrument.into(),
    ) {
        for e in msg.errors() {
            warn!("{e}");
        }
        bail!("creditor record rejected");
    }

    // reader
    let reader: Box<dyn Read> = match cli.input {
        Some(path) => Box::new(File::open(&path).with_context(|| format!("input {path}"))?),
        None => Box::new(io::stdin()),
    };
    let mut rdr = csv::ReaderBuilder::new().from_reader(BufReader::new(reader));

    let mut accepted = 0usize;
    let mut rejected = 0usize;
    for rec in rdr.deserialize::<TxRow>() {
        let row = rec?;
        let amount: Decimal = row
            .amount
            .parse()
            .with_context(|| format!("amount: {}", row.amount))?;
        let dbtr = DebtorAccount {
            name: row.name,
            iban: row.iban,
            bic: row.bic,
        };
        let mandate = Mandate {
            id: row.mandate_id,
            date_of_signature: row.mandate_date,
            original_id: row.original_mandate_id.filter(|s| !s.is_empty()),
        };
        // отбракованная строка не прерывает прогон: ошибки в лог, дальше
        let before = msg.errors().len();
        if msg.add_transaction(&dbtr, &mandate, amount, &row.remittance) {
            rejected += 1;
            for e in &msg.errors()[before..] {
                warn!("{e}");
            }
        } else {
            accepted += 1;
        }
    }
    info!(accepted, rejected, "transactions collected");

    let xml = msg.to_xml()?;

    // writer
    match cli.output {
        Some(path) => {
            let mut f = File::create(&path).with_context(|| format!("output {path}"))?;
            f.write_all(&xml)?;
        }
        None => io::stdout().write_all(&xml)?,
    }
    Ok(())
}
