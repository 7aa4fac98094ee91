use rust_decimal::Decimal;
use sepalib::{
    message::DirectDebitInitiation,
    model::{CreditorAccount, DebtorAccount, LocalInstrument, Mandate, SequenceType},
    validate,
};

fn creditor() -> CreditorAccount {
    CreditorAccount {
        name: "Müller & Co".into(),
        iban: "DE02120300000000202051".into(),
        bic: "BYLADEM1001".into(),
        creditor_id: "DE98ZZZ09999999999".into(),
    }
}

fn debtor() -> DebtorAccount {
    DebtorAccount {
        name: "Erika Musterfrau".into(),
        iban: "DE02500105170137075030".into(),
        bic: "INGDDEFFXXX".into(),
    }
}

fn mandate() -> Mandate {
    Mandate {
        id: "MNDT-2019-0001".into(),
        date_of_signature: "2019-07-14".into(),
        original_id: None,
    }
}

fn amount(s: &str) -> Decimal {
    Decimal::from_str_exact(s).expect("amount")
}

fn message() -> DirectDebitInitiation {
    DirectDebitInitiation::new("Verein Sonne e.V.")
}

#[test]
fn valid_creditor_is_accepted_and_sanitized() {
    let mut msg = message();
    let has_error = msg.set_creditor(
        &creditor(),
        Some("2019-11-20"),
        SequenceType::Rcur,
        LocalInstrument::Core,
    );
    assert!(!has_error);
    assert!(msg.errors().is_empty());

    let info = msg.creditor().expect("creditor stored");
    assert_eq!(info.name, "Mueller + Co");
    assert_eq!(info.bic, "BYLADEM1001");
    assert_eq!(info.requested_collection_date.as_deref(), Some("2019-11-20"));
}

#[test]
fn creditor_bic_is_uppercased() {
    let mut cdtr = creditor();
    cdtr.bic = "byladem1001".into();
    let mut msg = message();
    assert!(!msg.set_creditor(&cdtr, None, SequenceType::Ooff, LocalInstrument::Core));
    assert_eq!(msg.creditor().expect("stored").bic, "BYLADEM1001");
}

#[test]
fn short_scheme_id_is_rejected_but_record_is_stored() {
    let mut cdtr = creditor();
    cdtr.creditor_id = "DE98ZZZ".into(); // 7 символов
    let mut msg = message();
    assert!(msg.set_creditor(&cdtr, None, SequenceType::Ooff, LocalInstrument::Core));
    assert_eq!(msg.errors().len(), 1);
    // запись сохраняется и при ошибке
    assert_eq!(msg.creditor().expect("stored").scheme_id, "DE98ZZZ");
}

#[test]
fn creditor_errors_accumulate_without_short_circuit() {
    let cdtr = CreditorAccount {
        name: "".into(),
        iban: "DE12AB".into(),
        bic: "ABCDEFGH".into(),
        creditor_id: "X".into(),
    };
    let mut msg = message();
    assert!(msg.set_creditor(&cdtr, None, SequenceType::Ooff, LocalInstrument::Core));
    // Gläubiger-ID + имя + длина IBAN + нецифровой хвост IBAN
    assert_eq!(msg.errors().len(), 4);
}

#[test]
fn iban_rules_reject_wrong_length_and_non_numeric_tail() {
    assert!(validate::iban_length_invalid("DE123"));
    assert!(validate::iban_length_invalid("DE0212030000000020205112"));
    assert!(!validate::iban_length_invalid("DE02120300000000202051"));

    assert!(validate::iban_tail_not_numeric("DE02AB0300000000202051"));
    assert!(!validate::iban_tail_not_numeric("DE02120300000000202051"));
}

#[test]
fn bic_length_never_rejects_with_legacy_predicate() {
    assert!(!validate::bic_length_invalid("X"));
    assert!(!validate::bic_length_invalid("MARKDEF1100"));
    assert!(!validate::bic_length_invalid("ABCDEFGHIJKLMNOP"));

    assert!(validate::bic_length_invalid_strict("X"));
    assert!(validate::bic_length_invalid_strict("ABCDEFGHIJKLMNOP"));
    assert!(!validate::bic_length_invalid_strict("MARKDEF1"));
    assert!(!validate::bic_length_invalid_strict("MARKDEF1100"));
}

#[test]
fn accepted_transactions_update_list_and_ctrl_sum() {
    let mut msg = message();
    msg.set_creditor(&creditor(), None, SequenceType::Ooff, LocalInstrument::Core);

    assert!(!msg.add_transaction(&debtor(), &mandate(), amount("10.00"), "Beitrag 2019"));
    assert!(!msg.add_transaction(&debtor(), &mandate(), amount("20.50"), "Beitrag 2019"));

    assert_eq!(msg.transactions().len(), 2);
    assert_eq!(msg.ctrl_sum(), amount("30.50"));
    assert!(msg.errors().is_empty());
}

#[test]
fn negative_amount_is_rejected_without_trace_in_state() {
    let mut msg = message();
    msg.set_creditor(&creditor(), None, SequenceType::Ooff, LocalInstrument::Core);

    let has_error = msg.add_transaction(&debtor(), &mandate(), amount("-5"), "Rückbuchung");
    assert!(has_error);
    assert_eq!(msg.errors().len(), 1);
    assert!(msg.transactions().is_empty());
    assert_eq!(msg.ctrl_sum(), Decimal::ZERO);
}

#[test]
fn zero_amount_is_accepted() {
    // известная особенность: нулевая сумма проходит проверку
    let mut msg = message();
    assert!(!msg.add_transaction(&debtor(), &mandate(), amount("0.00"), "Nullbetrag"));
    assert_eq!(msg.transactions().len(), 1);
    assert_eq!(msg.ctrl_sum(), Decimal::ZERO);
}

#[test]
fn transaction_errors_accumulate_without_short_circuit() {
    let dbtr = DebtorAccount {
        name: "".into(),
        iban: "DE12AB".into(),
        bic: "INGDDEFFXXX".into(),
    };
    let mndt = Mandate {
        id: "".into(),
        date_of_signature: "2019-01-01".into(),
        original_id: None,
    };
    let mut msg = message();
    assert!(msg.add_transaction(&dbtr, &mndt, amount("1.00"), ""));
    // мандат + имя + длина IBAN + нецифровой хвост IBAN
    assert_eq!(msg.errors().len(), 4);
    assert!(msg.transactions().is_empty());
}

#[test]
fn debtor_name_and_remittance_are_sanitized() {
    let mut dbtr = debtor();
    dbtr.name = "Jörg Bäcker".into();
    let mut msg = message();
    assert!(!msg.add_transaction(&dbtr, &mandate(), amount("5.00"), "Gebühr 10% & Rest"));

    let tx = &msg.transactions()[0];
    assert_eq!(tx.debtor_name, "Joerg Baecker");
    assert_eq!(tx.remittance_info, "Gebuehr 10. + Rest");
}

#[test]
fn error_log_is_never_cleared() {
    let mut msg = message();
    assert!(msg.add_transaction(&debtor(), &mandate(), amount("-1"), ""));
    assert_eq!(msg.errors().len(), 1);

    // удачный вызов не чистит накопленное
    assert!(!msg.add_transaction(&debtor(), &mandate(), amount("5.00"), "ok"));
    assert_eq!(msg.errors().len(), 1);

    assert!(msg.add_transaction(&debtor(), &mandate(), amount("-2"), ""));
    assert_eq!(msg.errors().len(), 2);
}

#[test]
fn scheme_id_predicate_boundary() {
    assert!(validate::scheme_id_too_short(""));
    assert!(validate::scheme_id_too_short("DE98ZZZ")); // 7
    assert!(!validate::scheme_id_too_short("DE98ZZZ0")); // 8
}
