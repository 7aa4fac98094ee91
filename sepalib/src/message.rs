//! Состояние одного SEPA-сообщения: идентификаторы, кредитор,
//! упорядоченный список транзакций и контрольная сумма.

use crate::{
    charset::sanitize,
    error::Result,
    formats::pain008::Pain008,
    model::{
        CreditorAccount, CreditorInfo, DebtorAccount, LocalInstrument, Mandate, SequenceType,
        Transaction,
    },
    traits::WriteMessage,
    validate::{build_creditor, build_transaction},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::path::Path;

/// Один пакет прямого дебетования (pain.008). Жизненный цикл: создать,
/// один раз задать кредитора, добавить транзакции, сериализовать.
pub struct DirectDebitInitiation {
    timestamp: DateTime<Utc>,
    message_id: String,
    initiator_name: String,
    creditor: Option<CreditorInfo>,
    transactions: Vec<Transaction>,
    ctrl_sum: Decimal,
    errors: Vec<String>,
}

impl DirectDebitInitiation {
    /// Новое сообщение; момент создания берётся из системных часов.
    pub fn new(initiator_name: &str) -> Self {
        Self::with_timestamp(initiator_name, Utc::now())
    }

    /// Новое сообщение с заданным моментом создания (внешние часы,
    /// детерминированные тесты). MsgId: `ID-<секунды Unix>`.
    pub fn with_timestamp(initiator_name: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            message_id: format!("ID-{}", timestamp.timestamp()),
            initiator_name: sanitize(initiator_name, Some(70)),
            creditor: None,
            transactions: Vec::new(),
            ctrl_sum: Decimal::ZERO,
            errors: Vec::new(),
        }
    }

    /// Данные кредитора и вид платежа. Возвращает `true`, если этот вызов
    /// добавил ошибки; запись сохраняется и при ошибках.
    pub fn set_creditor(
        &mut self,
        cdtr: &CreditorAccount,
        requested_collection_date: Option<&str>,
        sequence_type: SequenceType,
        local_instrument: LocalInstrument,
    ) -> bool {
        let (info, has_error) = build_creditor(
            cdtr,
            requested_collection_date.map(str::to_owned),
            sequence_type,
            local_instrument,
            &mut self.errors,
        );
        if has_error {
            tracing::debug!(creditor = %cdtr.name, "creditor record has validation errors");
        }
        self.creditor = Some(info);
        has_error
    }

    /// Одна транзакция. Возвращает `true`, если этот вызов добавил ошибки;
    /// в таком случае транзакция отбрасывается целиком. Иначе она попадает
    /// в конец списка, а сумма — в контрольную.
    pub fn add_transaction(
        &mut self,
        dbtr: &DebtorAccount,
        mandate: &Mandate,
        amount: Decimal,
        remittance_info: &str,
    ) -> bool {
        let (tx, has_error) =
            build_transaction(dbtr, mandate, amount, remittance_info, &mut self.errors);
        if has_error {
            tracing::debug!(debtor = %dbtr.name, "transaction rejected");
            return true;
        }
        self.ctrl_sum += tx.instructed_amount;
        self.transactions.push(tx);
        debug_assert_eq!(
            self.ctrl_sum,
            self.transactions
                .iter()
                .map(|t| t.instructed_amount)
                .sum::<Decimal>()
        );
        false
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn initiator_name(&self) -> &str {
        &self.initiator_name
    }

    pub fn creditor(&self) -> Option<&CreditorInfo> {
        self.creditor.as_ref()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn ctrl_sum(&self) -> Decimal {
        self.ctrl_sum
    }

    /// Накопленные сообщения об ошибках всех вызовов; список не очищается.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Полный XML-документ pain.008 (UTF-8) одним вызовом.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        Pain008::write(&mut buf, self)?;
        Ok(buf)
    }

    /// Пишет документ в файл одной блокирующей записью. При неудаче
    /// открытия или записи возвращает `false`, деталь уходит в лог.
    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        let bytes = match self.to_xml() {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!("pain.008 serialization failed: {e}");
                return false;
            }
        };
        match std::fs::write(path, &bytes) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("cannot write {}: {e}", path.display());
                false
            }
        }
    }
}
