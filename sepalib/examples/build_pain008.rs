use rust_decimal::Decimal;
use sepalib::{
    message::DirectDebitInitiation,
    model::{CreditorAccount, DebtorAccount, LocalInstrument, Mandate, SequenceType},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: один сборник с одной транзакцией -> stdout
    let mut msg = DirectDebitInitiation::new("Verein Sonne e.V.");

    msg.set_creditor(
        &CreditorAccount {
            name: "Verein Sonne e.V.".into(),
            iban: "DE02120300000000202051".into(),
            bic: "BYLADEM1001".into(),
            creditor_id: "DE98ZZZ09999999999".into(),
        },
        Some("2019-11-20"),
        SequenceType::Rcur,
        LocalInstrument::Core,
    );

    msg.add_transaction(
        &DebtorAccount {
            name: "Erika Musterfrau".into(),
            iban: "DE02500105170137075030".into(),
            bic: "INGDDEFFXXX".into(),
        },
        &Mandate {
            id: "MNDT-2019-0001".into(),
            date_of_signature: "2019-07-14".into(),
            original_id: None,
        },
        Decimal::from_str_exact("19.99")?,
        "Mitgliedsbeitrag 2019",
    );

    let xml = msg.to_xml()?;
    std::io::Write::write_all(&mut std::io::stdout(), &xml)?;
    Ok(())
}
