//! Доменные модели: входные записи вызывающей стороны и проверенные
//! неизменяемые записи внутри сообщения.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Вид списания `<LclInstrm>`: CORE, COR1, B2B.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LocalInstrument {
    Core,
    Cor1,
    B2b,
}

/// Вид повторения `<SeqTp>`: FRST, RCUR, OOFF, FNAL.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SequenceType {
    Frst,
    Rcur,
    Ooff,
    Fnal,
}

/// Счёт кредитора (Gläubiger) — вход вызывающей стороны.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditorAccount {
    pub name: String,
    pub iban: String,
    pub bic: String,
    /// Gläubiger-ID (Creditor Scheme Identification).
    pub creditor_id: String,
}

/// Счёт дебитора (Schuldner) — вход вызывающей стороны.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebtorAccount {
    pub name: String,
    pub iban: String,
    pub bic: String,
}

/// Мандат прямого дебетования.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mandate {
    pub id: String,
    /// Дата подписи, строка YYYY-MM-DD (формат не проверяется).
    pub date_of_signature: String,
    /// Прежняя ID при изменённом мандате.
    pub original_id: Option<String>,
}

/// Проверенный блок `<PmtInf>`; один на сообщение, после создания не меняется.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditorInfo {
    pub local_instrument: LocalInstrument,
    pub sequence_type: SequenceType,
    pub requested_collection_date: Option<String>,
    pub name: String,
    pub iban: String,
    pub bic: String,
    pub scheme_id: String,
}

/// Проверенная одиночная транзакция `<DrctDbtTxInf>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub instructed_amount: Decimal,
    pub mandate_id: String,
    pub date_of_signature: String,
    pub original_mandate_id: Option<String>,
    pub debtor_bic: String,
    pub debtor_name: String,
    pub debtor_iban: String,
    pub remittance_info: String,
}

/// Денежный формат SEPA: точка-разделитель, ровно 2 знака после точки.
/// Суммы накапливаются без округления; округление half-up происходит
/// только здесь, при выводе.
pub fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}
